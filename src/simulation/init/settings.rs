use tracing::info;

use crate::core::error::EngineResult;
use crate::core::random::Dice;
use crate::core::settings::EngineSettings;

use super::Engine;

pub(super) fn set_paused(engine: &mut Engine, paused: bool) {
    engine.paused = paused;
}

pub(super) fn request_step_once(engine: &mut Engine) {
    engine.step_once = true;
}

pub(super) fn enable_perf_metrics(engine: &mut Engine, enabled: bool) {
    engine.perf_enabled = enabled;
    if !enabled {
        engine.perf_stats.reset();
    }
}

pub(super) fn set_tile_culling_enabled(engine: &mut Engine, enabled: bool) {
    engine.settings.tile_culling = enabled;
    engine.tiles.set_enabled(enabled);
}

pub(super) fn load_settings_json(engine: &mut Engine, json: &str) -> EngineResult<()> {
    let settings = EngineSettings::from_json(json)?;
    if let Some(seed) = settings.rng_seed {
        engine.dice = Dice::seeded(seed);
    }
    engine.tiles.set_enabled(settings.tile_culling);
    info!(tile_culling = settings.tile_culling, "runtime settings replaced");
    engine.settings = settings;
    Ok(())
}
