//! Cellfall Engine - falling-sand cellular automaton in WASM
//!
//! Architecture:
//! - core/        - errors, settings, randomness
//! - domain/      - materials, registry, audio events
//! - spatial/     - double-buffered grid, dirty rect, tile activity
//! - systems/     - per-material behaviors
//! - simulation/  - engine orchestration and the JS facade

pub mod core;
pub mod domain;
pub mod simulation;
pub mod spatial;
pub mod systems;

// Short paths for the commonly used modules
pub use domain::materials;
pub use spatial::grid;
pub use systems::behaviors;

use wasm_bindgen::prelude::*;

// Thread pool for the parallel color expansion (browser builds with atomics)
#[cfg(all(feature = "parallel", target_arch = "wasm32", target_feature = "atomics"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&format!("cellfall engine {} initialized", version()).into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::error::{EngineError, EngineResult};
pub use crate::core::settings::EngineSettings;
pub use domain::events::{AudioEvent, AudioEventKind};
pub use domain::materials::{Cell, MaterialId};
pub use domain::registry::MaterialRegistry;
pub use simulation::{DirtyRectResult, Engine, PerfStats, Simulation};
pub use spatial::dirty::DirtyRect;

// Material constants for JS
#[wasm_bindgen]
pub fn mat_empty() -> u8 { domain::materials::MAT_EMPTY }
#[wasm_bindgen]
pub fn mat_sand() -> u8 { domain::materials::MAT_SAND }
#[wasm_bindgen]
pub fn mat_water() -> u8 { domain::materials::MAT_WATER }
#[wasm_bindgen]
pub fn mat_stone() -> u8 { domain::materials::MAT_STONE }
#[wasm_bindgen]
pub fn mat_wood() -> u8 { domain::materials::MAT_WOOD }
#[wasm_bindgen]
pub fn mat_fire() -> u8 { domain::materials::MAT_FIRE }
#[wasm_bindgen]
pub fn mat_smoke() -> u8 { domain::materials::MAT_SMOKE }
