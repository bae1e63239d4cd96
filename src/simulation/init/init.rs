use std::sync::Arc;

use tracing::info;

use crate::core::random::Dice;
use crate::core::settings::EngineSettings;
use crate::domain::registry::MaterialRegistry;
use crate::spatial::dirty::DirtyTracker;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileActivity;
use crate::systems::behaviors::BehaviorRegistry;

use super::{Engine, PerfStats};

pub(super) fn create_engine(
    width: u32,
    height: u32,
    registry: Arc<MaterialRegistry>,
    settings: EngineSettings,
) -> Engine {
    let grid = Grid::new(width, height);
    let mut tiles = TileActivity::new(width, height);
    tiles.set_enabled(settings.tile_culling);

    info!(
        width,
        height,
        materials = registry.registered().count(),
        seeded = settings.rng_seed.is_some(),
        "engine created"
    );

    Engine {
        dice: Dice::from_seed_option(settings.rng_seed),
        registry,
        settings,
        grid,
        dirty: DirtyTracker::new(width, height),
        tiles,
        behaviors: BehaviorRegistry::new(),
        audio: Vec::new(),
        accumulator: 0.0,
        parity: 0,
        paused: false,
        step_once: false,
        tick_count: 0,
        color_buffer: Vec::new(),
        rect_transfer_buffer: Vec::new(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
