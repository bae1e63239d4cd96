//! UpdateContext - everything a behavior may touch during one tick
//!
//! Reads always see the pre-tick `front` state. Writes go to `back`, and every
//! write grows the dirty rect and wakes the surrounding tiles.

use crate::core::random::{lateral_order, Dice};
use crate::core::settings::EngineSettings;
use crate::domain::events::AudioEvent;
use crate::domain::materials::{BehaviorKind, Cell, MaterialId, MAT_NULL};
use crate::domain::registry::MaterialRegistry;
use crate::spatial::dirty::DirtyTracker;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileActivity;

/// Per-tick work counters (fed into perf stats)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickCounters {
    pub cells_dispatched: u32,
    pub moves: u32,
    pub swaps: u32,
    pub writes: u32,
    pub spawns: u32,
}

pub struct UpdateContext<'a> {
    pub grid: &'a mut Grid,
    pub dirty: &'a mut DirtyTracker,
    pub tiles: &'a mut TileActivity,
    pub events: &'a mut Vec<AudioEvent>,
    pub dice: &'a mut Dice,
    pub registry: &'a MaterialRegistry,
    pub settings: &'a EngineSettings,
    pub parity: u32,
    pub counters: TickCounters,
}

impl<'a> UpdateContext<'a> {
    // === Reads (stable state) ===

    /// Bounds-checked read of the pre-tick state; `Cell::NULL` outside the grid
    #[inline]
    pub fn read(&self, x: i32, y: i32) -> Cell {
        self.grid.read(x, y)
    }

    #[inline]
    pub fn in_range(&self, x: i32, y: i32) -> bool {
        self.grid.in_bounds(x, y)
    }

    /// Behavior class of the pre-tick cell at (x, y). Out of range is `None`.
    #[inline]
    pub fn kind_at(&self, x: i32, y: i32) -> BehaviorKind {
        match self.grid.material(x, y) {
            MAT_NULL => BehaviorKind::None,
            m => self.registry.behavior(m),
        }
    }

    /// Lateral directions for (x, y) this tick, preferred side first
    #[inline]
    pub fn lateral_order(&self, x: i32, y: i32) -> (i32, i32) {
        lateral_order(x, y, self.parity)
    }

    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.dice.chance(p)
    }

    // === Writes ===

    #[inline]
    fn touched(&mut self, x: u32, y: u32) {
        self.dirty.mark(x, y);
        self.tiles.wake_cell(x, y);
    }

    /// Move `cell` from (sx, sy) into the empty cell (tx, ty).
    ///
    /// Fails when the target is outside the grid, holds something in the
    /// stable state, or was already claimed by an earlier write this tick.
    /// The source is vacated only if nothing else has written it this tick.
    pub fn try_move(&mut self, sx: i32, sy: i32, tx: i32, ty: i32, cell: Cell) -> bool {
        let (Some(src), Some(dst)) = (self.grid.try_index(sx, sy), self.grid.try_index(tx, ty)) else {
            return false;
        };
        if src == dst {
            return false;
        }
        if !self.grid.front_at(dst).is_empty() || !self.grid.back_at(dst).is_empty() {
            return false;
        }

        self.grid.set_back(dst, cell);
        if self.grid.back_untouched(src) {
            self.grid.set_back(src, Cell::EMPTY);
        }

        self.touched(sx as u32, sy as u32);
        self.touched(tx as u32, ty as u32);
        self.counters.moves += 1;
        true
    }

    /// Exchange `cell` at (sx, sy) with whatever stably sits at (tx, ty).
    ///
    /// Fails outside the grid, onto itself, into immobile material, or when
    /// either side was already rewritten this tick (the displaced cell would
    /// otherwise be duplicated or lost).
    pub fn try_swap(&mut self, sx: i32, sy: i32, tx: i32, ty: i32, cell: Cell) -> bool {
        let (Some(src), Some(dst)) = (self.grid.try_index(sx, sy), self.grid.try_index(tx, ty)) else {
            return false;
        };
        if src == dst {
            return false;
        }
        let other = self.grid.front_at(dst);
        if self.registry.is_static(other.material) {
            return false;
        }
        if !self.grid.back_untouched(dst) || !self.grid.back_untouched(src) {
            return false;
        }

        self.grid.set_back(dst, cell);
        self.grid.set_back(src, other);

        self.touched(sx as u32, sy as u32);
        self.touched(tx as u32, ty as u32);
        self.counters.swaps += 1;
        true
    }

    /// Overwrite (x, y) in place. Returns the material it replaced in the
    /// write buffer, or `None` outside the grid.
    pub fn set_cell(&mut self, x: i32, y: i32, material: MaterialId) -> Option<MaterialId> {
        let idx = self.grid.try_index(x, y)?;
        let prev = self.grid.back_at(idx).material;
        self.grid.set_back(idx, Cell::of(material));
        self.touched(x as u32, y as u32);
        self.counters.writes += 1;
        Some(prev)
    }

    /// Create `material` at (x, y) only if the cell is empty before and
    /// during this tick.
    pub fn try_spawn(&mut self, x: i32, y: i32, material: MaterialId) -> bool {
        let Some(idx) = self.grid.try_index(x, y) else {
            return false;
        };
        if !self.grid.front_at(idx).is_empty() || !self.grid.back_at(idx).is_empty() {
            return false;
        }
        self.grid.set_back(idx, Cell::of(material));
        self.touched(x as u32, y as u32);
        self.counters.spawns += 1;
        true
    }

    /// Turn (x, y) into `fire`. Emits one Ignite event when a combustible
    /// cell actually catches; re-igniting an already burning cell is silent.
    pub fn ignite(&mut self, x: i32, y: i32, fire: MaterialId) {
        let Some(prev) = self.set_cell(x, y, fire) else {
            return;
        };
        if prev != fire && self.registry.behavior(prev) == BehaviorKind::Wood {
            self.events.push(AudioEvent::ignite(x, y));
        }
    }
}
