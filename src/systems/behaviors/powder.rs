//! PowderBehavior - granular solids (sand)
//!
//! Falls straight down, sinks through liquid below, then slides down one of
//! the two diagonals. Diagonal liquid is displaced before plain diagonal moves
//! are tried, so a grain sitting on a water surface sinks instead of rolling.

use super::{Behavior, UpdateContext};
use crate::domain::materials::{BehaviorKind, Cell};

pub struct PowderBehavior;

impl PowderBehavior {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn is_liquid(ctx: &UpdateContext, x: i32, y: i32) -> bool {
        ctx.kind_at(x, y) == BehaviorKind::Water
    }
}

impl Behavior for PowderBehavior {
    fn update(&self, ctx: &mut UpdateContext, x: i32, y: i32, cell: Cell) {
        let below = y + 1;

        if ctx.try_move(x, y, x, below, cell) {
            return;
        }
        if Self::is_liquid(ctx, x, below) && ctx.try_swap(x, y, x, below, cell) {
            return;
        }

        let (first, second) = ctx.lateral_order(x, y);

        for dx in [first, second] {
            if Self::is_liquid(ctx, x + dx, below) && ctx.try_swap(x, y, x + dx, below, cell) {
                return;
            }
        }
        for dx in [first, second] {
            if ctx.try_move(x, y, x + dx, below, cell) {
                return;
            }
        }
    }
}
