//! Grid - double-buffered cell storage with an SoA material shadow
//!
//! `front` is the stable state every reader sees between ticks. `back` is
//! the write target during a tick: it is reseeded from `front` at the start
//! of the tick and swapped in at the end (a `Vec` swap, no copy).
//!
//! The shadow keeps just the material byte per cell (front/back pair) so the
//! renderer can upload one byte per cell without touching the full `Cell`s.

use crate::domain::materials::{Cell, MaterialId, MAT_EMPTY, MAT_NULL};

mod indexing;

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,

    front: Vec<Cell>,
    back: Vec<Cell>,

    shadow_front: Vec<MaterialId>,
    shadow_back: Vec<MaterialId>,
}

impl Grid {
    /// Create an all-Empty grid.
    ///
    /// # Panics
    /// Zero width or height is a programming error and aborts construction.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be non-zero (got {}x{})",
            width,
            height
        );
        let size = (width as usize)
            .checked_mul(height as usize)
            .expect("grid size overflows usize");

        Self {
            width,
            height,
            size,
            front: vec![Cell::EMPTY; size],
            back: vec![Cell::EMPTY; size],
            shadow_front: vec![MAT_EMPTY; size],
            shadow_back: vec![MAT_EMPTY; size],
        }
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Front (stable) access ===

    /// Bounds-checked read of the stable state; `Cell::NULL` outside the grid
    #[inline]
    pub fn read(&self, x: i32, y: i32) -> Cell {
        match self.try_index(x, y) {
            Some(idx) => self.front[idx],
            None => Cell::NULL,
        }
    }

    /// Material at (x, y) in the stable state; `MAT_NULL` outside the grid
    #[inline]
    pub fn material(&self, x: i32, y: i32) -> MaterialId {
        match self.try_index(x, y) {
            Some(idx) => self.front[idx].material,
            None => MAT_NULL,
        }
    }

    #[inline]
    pub fn front_at(&self, idx: usize) -> Cell {
        self.front[idx]
    }

    /// Out-of-band write to the stable state (paint, clear). Keeps the shadow in sync.
    #[inline]
    pub fn set_front(&mut self, idx: usize, cell: Cell) {
        self.front[idx] = cell;
        self.shadow_front[idx] = cell.material;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.front
    }

    /// Material plane of the stable state (row-major, one byte per cell)
    pub fn materials(&self) -> &[MaterialId] {
        &self.shadow_front
    }

    // === Back (in-progress tick) access ===

    #[inline]
    pub fn back_at(&self, idx: usize) -> Cell {
        self.back[idx]
    }

    #[inline]
    pub fn set_back(&mut self, idx: usize, cell: Cell) {
        self.back[idx] = cell;
        self.shadow_back[idx] = cell.material;
    }

    /// `back[idx]` still holds the pre-tick value
    #[inline]
    pub fn back_untouched(&self, idx: usize) -> bool {
        self.back[idx] == self.front[idx]
    }

    // === Tick lifecycle ===

    /// Seed the write buffer with the pre-tick state
    pub fn reseed_back(&mut self) {
        self.back.copy_from_slice(&self.front);
        self.shadow_back.copy_from_slice(&self.shadow_front);
    }

    /// Publish the written buffer as the new stable state
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        std::mem::swap(&mut self.shadow_front, &mut self.shadow_back);
    }

    /// Reset both buffers to Empty
    pub fn clear(&mut self) {
        self.front.fill(Cell::EMPTY);
        self.back.fill(Cell::EMPTY);
        self.shadow_front.fill(MAT_EMPTY);
        self.shadow_back.fill(MAT_EMPTY);
    }

    // === Stats ===

    pub fn count_material(&self, material: MaterialId) -> usize {
        self.shadow_front.iter().filter(|&&m| m == material).count()
    }

    pub fn non_empty_count(&self) -> usize {
        self.shadow_front.iter().filter(|&&m| m != MAT_EMPTY).count()
    }

    // === Raw pointers for JS interop ===

    pub fn materials_ptr(&self) -> *const u8 {
        self.shadow_front.as_ptr()
    }

    pub fn cells_ptr(&self) -> *const Cell {
        self.front.as_ptr()
    }

    /// Shadow plane agrees with the full cells (holds outside a tick)
    pub fn shadow_in_sync(&self) -> bool {
        self.front
            .iter()
            .zip(self.shadow_front.iter())
            .all(|(c, &m)| c.material == m)
    }
}
