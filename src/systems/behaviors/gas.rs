//! GasBehavior - smoke
//!
//! Rises straight up, then along one of the upper diagonals. A plume that
//! cannot rise thins out at random.

use super::{Behavior, UpdateContext};
use crate::domain::materials::{Cell, MAT_EMPTY};

pub struct GasBehavior;

impl GasBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for GasBehavior {
    fn update(&self, ctx: &mut UpdateContext, x: i32, y: i32, cell: Cell) {
        let above = y - 1;

        if ctx.try_move(x, y, x, above, cell) {
            return;
        }

        let (first, second) = ctx.lateral_order(x, y);
        for dx in [first, second] {
            if ctx.try_move(x, y, x + dx, above, cell) {
                return;
            }
        }

        if ctx.chance(ctx.settings.smoke_dissipate_chance) {
            ctx.set_cell(x, y, MAT_EMPTY);
        }
    }
}
