//! LiquidBehavior - water
//!
//! Falls, then flows down a diagonal, then spreads sideways. Sideways spread
//! is only allowed when the cell directly below is not liquid: a liquid
//! surface resting on more liquid does not creep, which keeps pools from
//! shimmering forever.

use super::{Behavior, UpdateContext};
use crate::domain::materials::{BehaviorKind, Cell};

pub struct LiquidBehavior;

impl LiquidBehavior {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn is_open(ctx: &UpdateContext, x: i32, y: i32) -> bool {
        ctx.read(x, y).is_empty()
    }
}

impl Behavior for LiquidBehavior {
    fn update(&self, ctx: &mut UpdateContext, x: i32, y: i32, cell: Cell) {
        let below = y + 1;

        if ctx.try_move(x, y, x, below, cell) {
            return;
        }

        let (first, second) = ctx.lateral_order(x, y);

        for dx in [first, second] {
            if Self::is_open(ctx, x + dx, below) && ctx.try_move(x, y, x + dx, below, cell) {
                return;
            }
        }

        if ctx.kind_at(x, below) == BehaviorKind::Water {
            return;
        }

        for dx in [first, second] {
            if Self::is_open(ctx, x + dx, y) && ctx.try_move(x, y, x + dx, y, cell) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Scene;
    use crate::domain::materials::{MAT_EMPTY, MAT_STONE, MAT_WATER};

    #[test]
    fn falls_then_flows_diagonally() {
        let mut s = Scene::new(3, 3);
        s.put(1, 1, MAT_WATER);
        s.put(1, 2, MAT_STONE);
        s.put(2, 2, MAT_STONE);
        s.update_cell(1, 1);
        assert_eq!(s.at(0, 2), MAT_WATER);
        assert_eq!(s.at(1, 1), MAT_EMPTY);
    }

    #[test]
    fn spreads_sideways_on_solid_ground() {
        let mut s = Scene::new(3, 2);
        s.put(1, 0, MAT_WATER);
        for x in 0..3 {
            s.put(x, 1, MAT_STONE);
        }
        s.update_cell(1, 0);
        assert_eq!(s.at(1, 0), MAT_EMPTY);
        assert_eq!(s.grid.count_material(MAT_WATER), 1);
        assert!(s.at(0, 0) == MAT_WATER || s.at(2, 0) == MAT_WATER);
    }

    #[test]
    fn spreads_sideways_on_bottom_row() {
        let mut s = Scene::new(3, 1);
        s.put(1, 0, MAT_WATER);
        s.update_cell(1, 0);
        assert_eq!(s.at(1, 0), MAT_EMPTY);
    }

    #[test]
    fn does_not_creep_on_top_of_water() {
        let mut s = Scene::new(3, 2);
        s.put(1, 0, MAT_WATER);
        s.put(0, 1, MAT_WATER);
        s.put(1, 1, MAT_WATER);
        s.put(2, 1, MAT_WATER);
        s.update_cell(1, 0);
        assert_eq!(s.at(1, 0), MAT_WATER);
        assert_eq!(s.at(0, 0), MAT_EMPTY);
        assert_eq!(s.at(2, 0), MAT_EMPTY);
    }

    #[test]
    fn still_flows_diagonally_on_top_of_water() {
        let mut s = Scene::new(3, 2);
        s.put(1, 0, MAT_WATER);
        s.put(1, 1, MAT_WATER);
        s.put(2, 1, MAT_STONE);
        s.update_cell(1, 0);
        assert_eq!(s.at(0, 1), MAT_WATER);
        assert_eq!(s.at(1, 0), MAT_EMPTY);
    }
}
