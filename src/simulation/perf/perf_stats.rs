use wasm_bindgen::prelude::*;
use crate::systems::behaviors::TickCounters;

/// Snapshot of the last `update()` call (all zeros while perf is disabled)
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) update_ms: f64,
    pub(super) sweep_ms: f64,
    pub(super) sweep_ms_max: f64,
    pub(super) ticks: u32,
    pub(super) cells_dispatched: u32,
    pub(super) moves: u32,
    pub(super) swaps: u32,
    pub(super) writes: u32,
    pub(super) spawns: u32,
    pub(super) tiles_swept: u32,
    pub(super) total_tiles: u32,
    pub(super) non_empty_cells: u32,
    pub(super) grid_size: u32,
    pub(super) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub(crate) fn record_tick(&mut self, counters: &TickCounters, tiles_swept: usize, sweep_ms: f64) {
        self.ticks += 1;
        self.cells_dispatched += counters.cells_dispatched;
        self.moves += counters.moves;
        self.swaps += counters.swaps;
        self.writes += counters.writes;
        self.spawns += counters.spawns;
        self.tiles_swept += tiles_swept as u32;
        self.sweep_ms += sweep_ms;
        self.sweep_ms_max = self.sweep_ms_max.max(sweep_ms);
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn update_ms(&self) -> f64 { self.update_ms }
    #[wasm_bindgen(getter)]
    pub fn sweep_ms(&self) -> f64 { self.sweep_ms }
    #[wasm_bindgen(getter)]
    pub fn sweep_ms_max(&self) -> f64 { self.sweep_ms_max }
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u32 { self.ticks }
    #[wasm_bindgen(getter)]
    pub fn cells_dispatched(&self) -> u32 { self.cells_dispatched }
    #[wasm_bindgen(getter)]
    pub fn moves(&self) -> u32 { self.moves }
    #[wasm_bindgen(getter)]
    pub fn swaps(&self) -> u32 { self.swaps }
    #[wasm_bindgen(getter)]
    pub fn writes(&self) -> u32 { self.writes }
    #[wasm_bindgen(getter)]
    pub fn spawns(&self) -> u32 { self.spawns }
    /// Tiles visited, summed over the ticks of the call
    #[wasm_bindgen(getter)]
    pub fn tiles_swept(&self) -> u32 { self.tiles_swept }
    #[wasm_bindgen(getter)]
    pub fn total_tiles(&self) -> u32 { self.total_tiles }
    #[wasm_bindgen(getter)]
    pub fn non_empty_cells(&self) -> u32 { self.non_empty_cells }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}
