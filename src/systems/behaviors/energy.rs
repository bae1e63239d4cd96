//! EnergyBehavior - fire
//!
//! Each tick a flame may burn out (and does nothing else), may puff smoke
//! into the empty cell above it, and sets every neighbouring combustible
//! cell alight.

use super::{Behavior, UpdateContext};
use crate::domain::materials::{BehaviorKind, Cell, MAT_EMPTY};

pub struct EnergyBehavior;

/// Moore neighbourhood offsets
pub(super) const NEIGHBOURS: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

impl EnergyBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for EnergyBehavior {
    fn update(&self, ctx: &mut UpdateContext, x: i32, y: i32, cell: Cell) {
        if ctx.chance(ctx.settings.fire_extinguish_chance) {
            ctx.set_cell(x, y, MAT_EMPTY);
            return;
        }

        if ctx.read(x, y - 1).is_empty() && ctx.chance(ctx.settings.fire_smoke_chance) {
            if let Some(smoke) = ctx.registry.first_with_behavior(BehaviorKind::Smoke) {
                ctx.try_spawn(x, y - 1, smoke);
            }
        }

        for (dx, dy) in NEIGHBOURS {
            let (nx, ny) = (x + dx, y + dy);
            if ctx.kind_at(nx, ny) == BehaviorKind::Wood {
                ctx.ignite(nx, ny, cell.material);
            }
        }
    }
}
