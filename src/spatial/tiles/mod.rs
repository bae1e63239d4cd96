//! Tile activity - decides which 32x32 tiles the sweep visits
//!
//! Cell rules only look one cell away, so a cell whose 3x3 neighbourhood did
//! not change since it was last visited will fail exactly the same moves
//! again. A tile is therefore swept only when
//! - a cell within one cell of it changed during the previous tick or paint, or
//! - it holds a stochastic material (Fire, Smoke), which re-arms its own tile.
//!
//! `scheduled` is the set for the tick in progress; `next` collects wake-ups
//! for the following tick.

mod bitset;

use bitset::BitSet;

/// Tile edge length in cells
pub const TILE_SIZE: u32 = 32;

pub struct TileActivity {
    tiles_x: u32,
    tiles_y: u32,
    width: u32,
    height: u32,
    scheduled: BitSet,
    next: BitSet,
    enabled: bool,
}

impl TileActivity {
    pub fn new(width: u32, height: u32) -> Self {
        let tiles_x = (width + TILE_SIZE - 1) / TILE_SIZE;
        let tiles_y = (height + TILE_SIZE - 1) / TILE_SIZE;
        let count = (tiles_x * tiles_y) as usize;

        let mut next = BitSet::new(count);
        // Everything is swept on the first tick
        next.set_all();

        Self {
            tiles_x,
            tiles_y,
            width,
            height,
            scheduled: BitSet::new(count),
            next,
            enabled: true,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.tiles_x, self.tiles_y)
    }

    #[inline]
    pub fn total_tiles(&self) -> usize {
        (self.tiles_x * self.tiles_y) as usize
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turning culling back on schedules everything once, since wake-ups
    /// are not trusted across the switch.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.next.set_all();
        }
        self.enabled = enabled;
    }

    #[inline]
    fn tile_index(&self, tx: u32, ty: u32) -> usize {
        (ty * self.tiles_x + tx) as usize
    }

    /// Promote pending wake-ups to the set swept by this tick
    pub fn begin_tick(&mut self) {
        self.next.drain_into(&mut self.scheduled);
    }

    /// Should the sweep visit tile (tx, ty) this tick?
    #[inline]
    pub fn is_scheduled(&self, tx: u32, ty: u32) -> bool {
        !self.enabled || self.scheduled.get(self.tile_index(tx, ty))
    }

    /// Tiles visited by the tick in progress
    pub fn scheduled_count(&self) -> usize {
        if self.enabled {
            self.scheduled.count_ones()
        } else {
            self.total_tiles()
        }
    }

    /// A cell changed: wake every tile touching its 3x3 neighbourhood
    #[inline]
    pub fn wake_cell(&mut self, x: u32, y: u32) {
        let (x, y) = (x as i32, y as i32);
        self.wake_region(x, y, x, y);
    }

    /// Cells in an inclusive rectangle changed: wake the tiles touching it
    /// plus a one-cell margin
    pub fn wake_region(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let x0 = (x0 as i64 - 1).max(0);
        let y0 = (y0 as i64 - 1).max(0);
        let x1 = (x1 as i64 + 1).min(self.width as i64 - 1);
        let y1 = (y1 as i64 + 1).min(self.height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }
        let ts = TILE_SIZE as i64;
        for ty in (y0 / ts)..=(y1 / ts) {
            for tx in (x0 / ts)..=(x1 / ts) {
                let idx = self.tile_index(tx as u32, ty as u32);
                self.next.set(idx);
            }
        }
    }

    /// Keep the tile holding (x, y) scheduled for the next tick
    #[inline]
    pub fn keep_alive(&mut self, x: u32, y: u32) {
        let idx = self.tile_index(x / TILE_SIZE, y / TILE_SIZE);
        self.next.set(idx);
    }

    pub fn wake_all(&mut self) {
        self.next.set_all();
    }

    /// Tiles already queued for the next tick
    pub fn pending_count(&self) -> usize {
        self.next.count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_sweeps_everything() {
        let mut t = TileActivity::new(100, 70);
        assert_eq!(t.dimensions(), (4, 3));
        t.begin_tick();
        assert_eq!(t.scheduled_count(), 12);
        // nothing woke during the tick, so the following one is idle
        t.begin_tick();
        assert_eq!(t.scheduled_count(), 0);
        assert!(!t.is_scheduled(0, 0));
    }

    #[test]
    fn interior_change_wakes_single_tile() {
        let mut t = TileActivity::new(128, 128);
        t.begin_tick();
        t.begin_tick();
        t.wake_cell(40, 40);
        t.begin_tick();
        assert_eq!(t.scheduled_count(), 1);
        assert!(t.is_scheduled(1, 1));
    }

    #[test]
    fn edge_change_wakes_neighbours() {
        let mut t = TileActivity::new(128, 128);
        t.begin_tick();
        t.begin_tick();
        // bottom-right corner cell of tile (0,0)
        t.wake_cell(31, 31);
        t.begin_tick();
        assert!(t.is_scheduled(0, 0));
        assert!(t.is_scheduled(1, 0));
        assert!(t.is_scheduled(0, 1));
        assert!(t.is_scheduled(1, 1));
        assert_eq!(t.scheduled_count(), 4);
    }

    #[test]
    fn keep_alive_only_touches_own_tile() {
        let mut t = TileActivity::new(64, 64);
        t.begin_tick();
        t.begin_tick();
        t.keep_alive(31, 31);
        t.begin_tick();
        assert_eq!(t.scheduled_count(), 1);
        assert!(t.is_scheduled(0, 0));
    }

    #[test]
    fn disabled_schedules_everything() {
        let mut t = TileActivity::new(64, 64);
        t.set_enabled(false);
        t.begin_tick();
        t.begin_tick();
        assert!(t.is_scheduled(1, 1));
        assert_eq!(t.scheduled_count(), 4);

        t.set_enabled(true);
        t.begin_tick();
        assert_eq!(t.scheduled_count(), 4);
    }
}
