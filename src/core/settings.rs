//! Engine settings - timestep, rule odds, RNG seeding, sweep culling
//!
//! Loaded from JSON by the host (every field optional, missing fields keep
//! their defaults) and validated before the engine accepts them.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{EngineError, EngineResult};

/// Default simulation rate: 120 ticks per second
pub const DEFAULT_FIXED_STEP: f32 = 1.0 / 120.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineSettings {
    /// Seconds of simulated time per tick
    pub fixed_step: f32,
    /// Per-tick odds that a Fire cell burns out
    pub fire_extinguish_chance: f32,
    /// Per-tick odds that a Fire cell puffs Smoke into the cell above
    pub fire_smoke_chance: f32,
    /// Per-tick odds that a Smoke cell unable to rise disappears
    pub smoke_dissipate_chance: f32,
    /// Fixed seed for the probabilistic rules; `None` draws from entropy
    pub rng_seed: Option<u64>,
    /// Skip tiles whose neighbourhood did not change last tick
    pub tile_culling: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fixed_step: DEFAULT_FIXED_STEP,
            fire_extinguish_chance: 0.05,
            fire_smoke_chance: 0.20,
            smoke_dissipate_chance: 0.02,
            rng_seed: None,
            tile_culling: true,
        }
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        info!(fixed_step = settings.fixed_step, seeded = settings.rng_seed.is_some(), "settings loaded");
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Settings with a fixed RNG seed, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !self.fixed_step.is_finite() || self.fixed_step <= 0.0 {
            return Err(EngineError::InvalidSetting {
                name: "fixedStep",
                reason: format!("must be a positive number of seconds, got {}", self.fixed_step),
            });
        }
        check_chance("fireExtinguishChance", self.fire_extinguish_chance)?;
        check_chance("fireSmokeChance", self.fire_smoke_chance)?;
        check_chance("smokeDissipateChance", self.smoke_dissipate_chance)?;
        Ok(())
    }
}

fn check_chance(name: &'static str, value: f32) -> EngineResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidSetting {
            name,
            reason: format!("must be within [0, 1], got {}", value),
        })
    }
}
