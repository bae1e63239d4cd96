use crate::domain::events::AudioEvent;
use crate::domain::materials::{Cell, MaterialId};

use super::Engine;

/// Circular brush. Writes the stable state directly (never during a tick).
///
/// Cells with `dx² + dy² <= r²` that fall inside the grid take `material`.
/// The clamped bounding square is marked dirty and one Paint event is queued.
/// Negative radius, unregistered materials, and strokes that land entirely
/// off the grid change nothing and emit nothing.
pub(super) fn paint(engine: &mut Engine, cx: i32, cy: i32, material: MaterialId, radius: i32) -> usize {
    if radius < 0 || !engine.registry.is_registered(material) {
        return 0;
    }

    let (cx64, cy64, r) = (cx as i64, cy as i64, radius as i64);
    let x0 = (cx64 - r).max(0);
    let y0 = (cy64 - r).max(0);
    let x1 = (cx64 + r).min(engine.grid.width() as i64 - 1);
    let y1 = (cy64 + r).min(engine.grid.height() as i64 - 1);
    if x0 > x1 || y0 > y1 {
        return 0;
    }

    let r2 = r * r;
    let stamp = Cell::of(material);
    let mut painted = 0usize;

    for y in y0..=y1 {
        let dy = y - cy64;
        for x in x0..=x1 {
            let dx = x - cx64;
            if dx * dx + dy * dy <= r2 {
                let idx = engine.grid.index(x as u32, y as u32);
                engine.grid.set_front(idx, stamp);
                painted += 1;
            }
        }
    }

    // The square can clip the grid while the disc itself misses it
    if painted == 0 {
        return 0;
    }

    let (x0, y0, x1, y1) = (x0 as i32, y0 as i32, x1 as i32, y1 as i32);
    engine.dirty.mark_region(x0, y0, x1, y1);
    engine.tiles.wake_region(x0, y0, x1, y1);
    engine.audio.push(AudioEvent::paint(cx, cy));
    painted
}

pub(super) fn clear(engine: &mut Engine) {
    engine.grid.clear();
    engine.dirty.mark_all();
    engine.tiles.wake_all();
    engine.audio.clear();
    engine.accumulator = 0.0;
    engine.parity = 0;
    engine.tick_count = 0;
}
