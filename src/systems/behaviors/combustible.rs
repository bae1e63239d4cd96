//! CombustibleBehavior - wood
//!
//! Inert until a flame touches it: any burning cell among the eight
//! neighbours turns it into that flame.

use super::energy::NEIGHBOURS;
use super::{Behavior, UpdateContext};
use crate::domain::materials::{BehaviorKind, Cell};

pub struct CombustibleBehavior;

impl CombustibleBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for CombustibleBehavior {
    fn update(&self, ctx: &mut UpdateContext, x: i32, y: i32, _cell: Cell) {
        for (dx, dy) in NEIGHBOURS {
            let (nx, ny) = (x + dx, y + dy);
            if ctx.kind_at(nx, ny) == BehaviorKind::Fire {
                let flame = ctx.read(nx, ny).material;
                ctx.ignite(x, y, flame);
                return;
            }
        }
    }
}
