//! Engine - owns the grid and drives it through fixed ticks
//!
//! The engine only orchestrates: cell rules live in `systems::behaviors`,
//! storage in `spatial`. Between ticks the stable state (`front`) is the only
//! thing hosts can observe; paint writes go straight into it.

use std::sync::Arc;

use crate::core::error::EngineResult;
use crate::core::random::Dice;
use crate::core::settings::EngineSettings;
use crate::domain::events::AudioEvent;
use crate::domain::materials::{Cell, MaterialId};
use crate::domain::registry::MaterialRegistry;
use crate::spatial::dirty::{DirtyRect, DirtyTracker};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileActivity;
use crate::systems::behaviors::{BehaviorRegistry, TickCounters, UpdateContext};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "step/sweep.rs"]
mod sweep;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "audio/audio.rs"]
mod audio;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::{DirtyRectResult, Simulation};
pub use perf_stats::PerfStats;

use perf_timer::timed;

pub struct Engine {
    registry: Arc<MaterialRegistry>,
    settings: EngineSettings,
    grid: Grid,
    dirty: DirtyTracker,
    tiles: TileActivity,
    behaviors: BehaviorRegistry,
    dice: Dice,
    audio: Vec<AudioEvent>,

    // Scheduler
    accumulator: f64,
    parity: u32,
    paused: bool,
    step_once: bool,
    tick_count: u64,

    // Render export
    color_buffer: Vec<u32>,
    rect_transfer_buffer: Vec<u8>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl Engine {
    /// Engine over an all-Empty grid with default settings.
    ///
    /// # Panics
    /// When `width` or `height` is zero.
    pub fn new(width: u32, height: u32, registry: Arc<MaterialRegistry>) -> Self {
        init::create_engine(width, height, registry, EngineSettings::default())
    }

    /// Engine with explicit settings (validated first)
    pub fn with_settings(
        width: u32,
        height: u32,
        registry: Arc<MaterialRegistry>,
        settings: EngineSettings,
    ) -> EngineResult<Self> {
        settings.validate()?;
        Ok(init::create_engine(width, height, registry, settings))
    }

    /// Engine with the built-in material set
    pub fn with_default_materials(width: u32, height: u32) -> Self {
        Self::new(width, height, Arc::new(MaterialRegistry::with_defaults()))
    }

    // === Dimensions & state ===

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn registry(&self) -> &Arc<MaterialRegistry> { &self.registry }

    pub fn settings(&self) -> &EngineSettings { &self.settings }

    /// Ticks run since construction (or the last `clear`)
    pub fn tick_count(&self) -> u64 { self.tick_count }

    /// Sweep-direction bit, toggled by every tick
    pub fn parity(&self) -> u32 { self.parity }

    /// Simulated time carried over to the next `update`
    pub fn accumulator(&self) -> f64 { self.accumulator }

    // === Scheduling ===

    /// Advance by `dt` seconds of wall time. Returns the number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        step::update(self, dt)
    }

    /// Run exactly one tick, ignoring the accumulator and the pause flag
    pub fn tick(&mut self) -> TickCounters {
        step::tick(self)
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        settings::set_paused(self, paused);
    }

    /// While paused, let the next `update` run a single tick
    pub fn request_step_once(&mut self) {
        settings::request_step_once(self);
    }

    pub fn step_once_pending(&self) -> bool {
        self.step_once
    }

    pub fn set_tile_culling_enabled(&mut self, enabled: bool) {
        settings::set_tile_culling_enabled(self, enabled);
    }

    /// Replace the runtime settings (timestep, rule odds, culling). The RNG
    /// is reseeded when the new settings carry a seed.
    pub fn load_settings_json(&mut self, json: &str) -> EngineResult<()> {
        settings::load_settings_json(self, json)
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last update's perf snapshot (zeros when perf is disabled)
    pub fn perf_stats(&self) -> PerfStats {
        self.perf_stats.clone()
    }

    /// Active tiles queued for the next tick
    pub fn pending_tiles(&self) -> usize {
        self.tiles.pending_count()
    }

    pub fn total_tiles(&self) -> usize {
        self.tiles.total_tiles()
    }

    // === Cell access ===

    /// Stable-state cell at (x, y); `Cell::NULL` outside the grid
    pub fn read(&self, x: i32, y: i32) -> Cell {
        self.grid.read(x, y)
    }

    /// Material plane, one byte per cell, row-major
    pub fn materials(&self) -> &[MaterialId] {
        self.grid.materials()
    }

    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    pub fn count_material(&self, material: MaterialId) -> usize {
        self.grid.count_material(material)
    }

    pub fn non_empty_count(&self) -> usize {
        self.grid.non_empty_count()
    }

    // === Commands ===

    /// Stamp a disc of `material` centred on (cx, cy). Returns the number of
    /// cells written.
    pub fn paint(&mut self, cx: i32, cy: i32, material: MaterialId, radius: i32) -> usize {
        commands::paint(self, cx, cy, material, radius)
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === Render export ===

    /// Drain the region changed since the last call
    pub fn take_dirty_rect(&mut self) -> Option<DirtyRect> {
        render_extract::take_dirty_rect(self)
    }

    pub fn palette_abgr(&self) -> &[u32] {
        self.registry.palette_abgr()
    }

    /// Expand the material plane into packed ABGR colors
    pub fn refresh_colors(&mut self) -> &[u32] {
        render_extract::refresh_colors(self)
    }

    /// Copy the materials inside `rect` (clamped to the grid) into a tightly
    /// packed row-major buffer
    pub fn extract_rect_materials(&mut self, rect: DirtyRect) -> &[u8] {
        render_extract::extract_rect_materials(self, rect)
    }

    pub fn materials_ptr(&self) -> *const u8 {
        self.grid.materials_ptr()
    }

    pub fn cells_ptr(&self) -> *const Cell {
        self.grid.cells_ptr()
    }

    // === Audio export ===

    /// Drain queued audio events in emission order
    pub fn take_audio_events(&mut self) -> Vec<AudioEvent> {
        audio::take_audio_events(self)
    }

    pub fn pending_audio_events(&self) -> usize {
        self.audio.len()
    }

    /// Drain as flat `[kind, x, y]` triples
    pub fn take_audio_events_flat(&mut self) -> Vec<i32> {
        audio::take_audio_events_flat(self)
    }

    /// Drain as a JSON array of `{kind, x, y}`
    pub fn take_audio_events_json(&mut self) -> String {
        audio::take_audio_events_json(self)
    }

    // === Internals ===

    /// Open a tick (schedule tiles, reseed the write buffer), run `f` over a
    /// live context, then publish the writes and flip parity.
    fn run_tick<R>(
        &mut self,
        f: impl FnOnce(&mut UpdateContext, &BehaviorRegistry) -> R,
    ) -> (R, TickCounters) {
        self.tiles.begin_tick();
        self.grid.reseed_back();

        let mut ctx = UpdateContext {
            grid: &mut self.grid,
            dirty: &mut self.dirty,
            tiles: &mut self.tiles,
            events: &mut self.audio,
            dice: &mut self.dice,
            registry: &self.registry,
            settings: &self.settings,
            parity: self.parity,
            counters: TickCounters::default(),
        };
        let out = f(&mut ctx, &self.behaviors);
        let counters = ctx.counters;

        self.grid.swap_buffers();
        self.parity ^= 1;
        self.tick_count += 1;
        (out, counters)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
