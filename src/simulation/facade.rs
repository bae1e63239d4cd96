use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::core::settings::EngineSettings;
use crate::domain::materials::MaterialId;
use crate::domain::registry::MaterialRegistry;
use crate::spatial::dirty::DirtyRect;

use super::perf_stats::PerfStats;
use super::Engine;

/// Result of draining the dirty tracker; `found == false` means nothing changed
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyRectResult {
    found: bool,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl From<Option<DirtyRect>> for DirtyRectResult {
    fn from(rect: Option<DirtyRect>) -> Self {
        match rect {
            Some(r) => Self { found: true, x: r.x, y: r.y, w: r.w, h: r.h },
            None => Self::default(),
        }
    }
}

#[wasm_bindgen]
impl DirtyRectResult {
    #[wasm_bindgen(getter)]
    pub fn found(&self) -> bool { self.found }
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u32 { self.x }
    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u32 { self.y }
    #[wasm_bindgen(getter)]
    pub fn w(&self) -> u32 { self.w }
    #[wasm_bindgen(getter)]
    pub fn h(&self) -> u32 { self.h }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct Simulation {
    core: Engine,
}

#[wasm_bindgen]
impl Simulation {
    /// Simulation with the built-in materials and default settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            core: Engine::with_default_materials(width, height),
        }
    }

    /// Simulation over a custom material bundle and optional settings JSON
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        width: u32,
        height: u32,
        bundle_json: Option<String>,
        settings_json: Option<String>,
    ) -> Result<Simulation, JsValue> {
        let registry = match bundle_json {
            Some(json) => MaterialRegistry::from_bundle_json(&json).map_err(js_err)?,
            None => MaterialRegistry::with_defaults(),
        };
        let settings = match settings_json {
            Some(json) => EngineSettings::from_json(&json).map_err(js_err)?,
            None => EngineSettings::default(),
        };
        let core = Engine::with_settings(width, height, Arc::new(registry), settings).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 { self.core.tick_count() }

    // === Scheduling ===

    /// Advance by `dt` seconds; returns the number of ticks run
    pub fn update(&mut self, dt: f32) -> u32 {
        self.core.update(dt)
    }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool { self.core.paused() }

    #[wasm_bindgen(setter)]
    pub fn set_paused(&mut self, paused: bool) {
        self.core.set_paused(paused);
    }

    pub fn request_step_once(&mut self) {
        self.core.request_step_once();
    }

    pub fn load_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.load_settings_json(json).map_err(js_err)
    }

    pub fn settings_json(&self) -> String {
        self.core.settings().to_json()
    }

    pub fn set_tile_culling_enabled(&mut self, enabled: bool) {
        self.core.set_tile_culling_enabled(enabled);
    }

    /// Enable or disable per-update perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    // === Input ===

    /// Stamp a disc of `material`; returns the number of cells written
    pub fn paint(&mut self, cx: i32, cy: i32, material: MaterialId, radius: i32) -> u32 {
        self.core.paint(cx, cy, material, radius) as u32
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Material at (x, y); 255 outside the grid
    pub fn material_at(&self, x: i32, y: i32) -> u8 {
        self.core.read(x, y).material
    }

    pub fn count_material(&self, material: MaterialId) -> u32 {
        self.core.count_material(material) as u32
    }

    pub fn non_empty_count(&self) -> u32 {
        self.core.non_empty_count() as u32
    }

    /// `{"formatVersion":1,"materials":[{id,name,color,density,hidden}]}`
    pub fn material_manifest_json(&self) -> String {
        self.core.registry().manifest_json()
    }

    // === Renderer ===

    pub fn take_dirty_rect(&mut self) -> DirtyRectResult {
        self.core.take_dirty_rect().into()
    }

    /// Material plane (one byte per cell) in linear memory
    pub fn materials_ptr(&self) -> *const u8 {
        self.core.materials_ptr()
    }

    pub fn materials_len(&self) -> usize {
        self.core.materials().len()
    }

    /// Full cell buffer (`[material, meta]` per cell) in linear memory
    pub fn cells_ptr(&self) -> *const u8 {
        self.core.cells_ptr() as *const u8
    }

    pub fn cells_len_bytes(&self) -> usize {
        std::mem::size_of_val(self.core.cells())
    }

    /// Packed ABGR color per material id (256 entries)
    pub fn palette(&self) -> Vec<u32> {
        self.core.palette_abgr().to_vec()
    }

    /// Recolor the whole plane; returns a pointer to `width*height` ABGR pixels
    pub fn refresh_colors(&mut self) -> *const u32 {
        self.core.refresh_colors().as_ptr()
    }

    /// Materials inside the rect, tightly packed row by row
    pub fn extract_rect_materials(&mut self, x: u32, y: u32, w: u32, h: u32) -> Vec<u8> {
        self.core.extract_rect_materials(DirtyRect { x, y, w, h }).to_vec()
    }

    // === Audio ===

    /// Drain audio events as flat `[kind, x, y]` triples (kind 0 = ignite, 1 = paint)
    pub fn take_audio_events(&mut self) -> Vec<i32> {
        self.core.take_audio_events_flat()
    }

    pub fn take_audio_events_json(&mut self) -> String {
        self.core.take_audio_events_json()
    }
}

impl Simulation {
    /// Native access to the engine behind the bindings
    pub fn engine(&self) -> &Engine {
        &self.core
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.core
    }
}
