//! Dirty tracking for the renderer - one running bounding rectangle
//!
//! Every mutation grows `[min, max]`; the renderer drains it once per frame
//! and uploads only that sub-rectangle of the material plane. The rectangle
//! is a conservative superset of the changed cells. An empty tracker is
//! `min > max`, and draining it reports `None` rather than a zero-size rect.

/// Changed region in cell coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl DirtyRect {
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> usize {
        (self.w as usize) * (self.h as usize)
    }
}

pub struct DirtyTracker {
    width: u32,
    height: u32,
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

impl DirtyTracker {
    pub fn new(width: u32, height: u32) -> Self {
        let mut tracker = Self {
            width,
            height,
            min_x: 0,
            min_y: 0,
            max_x: 0,
            max_y: 0,
        };
        tracker.reset();
        tracker
    }

    #[inline]
    fn reset(&mut self) {
        self.min_x = i64::MAX;
        self.min_y = i64::MAX;
        self.max_x = i64::MIN;
        self.max_y = i64::MIN;
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Grow the region to include (x, y). Caller guarantees the cell is in range.
    #[inline]
    pub fn mark(&mut self, x: u32, y: u32) {
        let (x, y) = (x as i64, y as i64);
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Grow the region by an inclusive rectangle, clamped to the grid.
    /// A rectangle entirely outside the grid is ignored.
    pub fn mark_region(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;
        let (x0, x1) = ((x0 as i64).max(0), (x1 as i64).min(max_x));
        let (y0, y1) = ((y0 as i64).max(0), (y1 as i64).min(max_y));
        if x0 > x1 || y0 > y1 {
            return;
        }
        self.min_x = self.min_x.min(x0);
        self.min_y = self.min_y.min(y0);
        self.max_x = self.max_x.max(x1);
        self.max_y = self.max_y.max(y1);
    }

    pub fn mark_all(&mut self) {
        self.mark_region(0, 0, self.width as i32 - 1, self.height as i32 - 1);
    }

    /// Current region without draining it
    pub fn peek(&self) -> Option<DirtyRect> {
        if self.is_clean() {
            return None;
        }
        Some(DirtyRect {
            x: self.min_x as u32,
            y: self.min_y as u32,
            w: (self.max_x - self.min_x + 1) as u32,
            h: (self.max_y - self.min_y + 1) as u32,
        })
    }

    /// Drain the region: returns it and resets to clean
    pub fn take(&mut self) -> Option<DirtyRect> {
        let rect = self.peek();
        self.reset();
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_tracker_reports_nothing() {
        let mut t = DirtyTracker::new(10, 10);
        assert!(t.is_clean());
        assert_eq!(t.take(), None);
    }

    #[test]
    fn second_take_is_empty() {
        let mut t = DirtyTracker::new(10, 10);
        t.mark(3, 4);
        assert_eq!(t.take(), Some(DirtyRect { x: 3, y: 4, w: 1, h: 1 }));
        assert_eq!(t.take(), None);
    }

    #[test]
    fn far_apart_marks_span_the_gap() {
        let mut t = DirtyTracker::new(100, 100);
        t.mark(2, 90);
        t.mark(80, 5);
        let r = t.take().unwrap();
        assert_eq!(r, DirtyRect { x: 2, y: 5, w: 79, h: 86 });
        assert!(r.contains(2, 90) && r.contains(80, 5));
        assert_eq!(r.area(), 79 * 86);
    }

    #[test]
    fn region_is_clamped() {
        let mut t = DirtyTracker::new(10, 8);
        t.mark_region(-3, -3, 2, 2);
        assert_eq!(t.peek(), Some(DirtyRect { x: 0, y: 0, w: 3, h: 3 }));
        t.mark_region(8, 6, 20, 20);
        assert_eq!(t.peek(), Some(DirtyRect { x: 0, y: 0, w: 10, h: 8 }));
    }

    #[test]
    fn region_outside_grid_is_ignored() {
        let mut t = DirtyTracker::new(10, 10);
        t.mark_region(20, 20, 25, 25);
        t.mark_region(-9, 0, -1, 5);
        assert!(t.is_clean());
    }

    #[test]
    fn mark_all_covers_grid() {
        let mut t = DirtyTracker::new(7, 5);
        t.mark_all();
        assert_eq!(t.take(), Some(DirtyRect { x: 0, y: 0, w: 7, h: 5 }));
    }
}
