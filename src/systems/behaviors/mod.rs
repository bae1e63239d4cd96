//! Behaviors - per-material cell rules
//!
//! Each rule set is a small stateless struct behind the `Behavior` trait.
//! `BehaviorRegistry` is a table of trait objects indexed by `BehaviorKind`,
//! so adding a rule means adding a variant and a table entry, nothing else.

mod combustible;
mod context;
mod energy;
mod gas;
mod liquid;
mod powder;

pub use combustible::CombustibleBehavior;
pub use context::{TickCounters, UpdateContext};
pub use energy::EnergyBehavior;
pub use gas::GasBehavior;
pub use liquid::LiquidBehavior;
pub use powder::PowderBehavior;

use crate::domain::materials::{BehaviorKind, Cell};

/// Behavior trait - one implementation per rule set
///
/// `cell` is the pre-tick value at (x, y); (x, y) is always inside the grid.
pub trait Behavior: Send + Sync {
    fn update(&self, ctx: &mut UpdateContext, x: i32, y: i32, cell: Cell);
}

/// Dispatch table indexed by `BehaviorKind`
pub struct BehaviorRegistry {
    table: [Option<Box<dyn Behavior>>; BehaviorKind::COUNT],
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        let mut table: [Option<Box<dyn Behavior>>; BehaviorKind::COUNT] = Default::default();
        table[BehaviorKind::Sand.index()] = Some(Box::new(PowderBehavior::new()));
        table[BehaviorKind::Water.index()] = Some(Box::new(LiquidBehavior::new()));
        table[BehaviorKind::Wood.index()] = Some(Box::new(CombustibleBehavior::new()));
        table[BehaviorKind::Fire.index()] = Some(Box::new(EnergyBehavior::new()));
        table[BehaviorKind::Smoke.index()] = Some(Box::new(GasBehavior::new()));
        Self { table }
    }

    /// Run the rule for `kind`. `BehaviorKind::None` has no entry and does nothing.
    #[inline]
    pub fn update(&self, kind: BehaviorKind, ctx: &mut UpdateContext, x: i32, y: i32, cell: Cell) {
        if let Some(behavior) = &self.table[kind.index()] {
            ctx.counters.cells_dispatched += 1;
            behavior.update(ctx, x, y, cell);
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
