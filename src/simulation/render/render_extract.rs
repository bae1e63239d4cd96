#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::spatial::dirty::DirtyRect;

use super::Engine;

pub(super) fn take_dirty_rect(engine: &mut Engine) -> Option<DirtyRect> {
    engine.dirty.take()
}

/// Palette lookup over the whole material plane
pub(super) fn refresh_colors(engine: &mut Engine) -> &[u32] {
    let size = engine.grid.size();
    if engine.color_buffer.len() != size {
        engine.color_buffer.resize(size, 0);
    }

    let palette = engine.registry.palette_abgr();
    let materials = engine.grid.materials();
    let row = engine.grid.width() as usize;

    #[cfg(feature = "parallel")]
    {
        engine
            .color_buffer
            .par_chunks_mut(row)
            .zip(materials.par_chunks(row))
            .for_each(|(dst, src)| {
                for (c, &m) in dst.iter_mut().zip(src) {
                    *c = palette[m as usize];
                }
            });
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (dst, src) in engine.color_buffer.chunks_mut(row).zip(materials.chunks(row)) {
            for (c, &m) in dst.iter_mut().zip(src) {
                *c = palette[m as usize];
            }
        }
    }

    &engine.color_buffer
}

/// Tightly packed copy of `rect` (clamped to the grid), row-major
pub(super) fn extract_rect_materials(engine: &mut Engine, rect: DirtyRect) -> &[u8] {
    let width = engine.grid.width();
    let height = engine.grid.height();

    let x0 = rect.x.min(width);
    let y0 = rect.y.min(height);
    let x1 = rect.x.saturating_add(rect.w).min(width);
    let y1 = rect.y.saturating_add(rect.h).min(height);
    let clamped = DirtyRect { x: x0, y: y0, w: x1 - x0, h: y1 - y0 };
    let w = clamped.w as usize;

    engine.rect_transfer_buffer.clear();
    engine.rect_transfer_buffer.reserve(clamped.area());

    let materials = engine.grid.materials();
    let stride = width as usize;
    for y in y0 as usize..y1 as usize {
        let start = y * stride + x0 as usize;
        engine.rect_transfer_buffer.extend_from_slice(&materials[start..start + w]);
    }

    &engine.rect_transfer_buffer
}
