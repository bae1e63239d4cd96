//! Serpentine sweep over the scheduled tiles
//!
//! Rows run bottom to top. Row `y` runs left to right when `(y ^ parity)` is
//! odd, right to left otherwise. Tiles only decide which spans of a row are
//! visited; the visiting order is always the global row order, so a culled
//! sweep visits the same cells in the same sequence as a full one would.

use crate::spatial::tiles::TILE_SIZE;
use crate::systems::behaviors::{BehaviorRegistry, UpdateContext};

pub(super) fn sweep(ctx: &mut UpdateContext, behaviors: &BehaviorRegistry) {
    let width = ctx.grid.width();
    let height = ctx.grid.height();
    let (tiles_x, _) = ctx.tiles.dimensions();

    for y in (0..height).rev() {
        let left_to_right = ((y ^ ctx.parity) & 1) == 1;
        let ty = y / TILE_SIZE;

        for step in 0..tiles_x {
            let tx = if left_to_right { step } else { tiles_x - 1 - step };
            if !ctx.tiles.is_scheduled(tx, ty) {
                continue;
            }

            let x0 = tx * TILE_SIZE;
            let x1 = (x0 + TILE_SIZE).min(width);
            if left_to_right {
                for x in x0..x1 {
                    visit(ctx, behaviors, x, y);
                }
            } else {
                for x in (x0..x1).rev() {
                    visit(ctx, behaviors, x, y);
                }
            }
        }
    }
}

#[inline]
fn visit(ctx: &mut UpdateContext, behaviors: &BehaviorRegistry, x: u32, y: u32) {
    let cell = ctx.grid.front_at(ctx.grid.index(x, y));
    if cell.is_empty() {
        return;
    }

    let (dispatched, kind) = {
        let props = ctx.registry.props(cell.material);
        (props.is_dispatched(), props.behavior)
    };
    if !dispatched {
        return;
    }

    behaviors.update(kind, ctx, x as i32, y as i32, cell);

    // Dice-driven cells can change on their own; keep their tile awake
    if kind.is_stochastic() {
        ctx.tiles.keep_alive(x, y);
    }
}
