//! Material registry - the 256-slot "world configuration" table
//!
//! Built once at startup (defaults or a JSON bundle), then shared read-only
//! through an `Arc` by the engine, the behaviors and the render export.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{EngineError, EngineResult};
use crate::domain::materials::{
    builtin_materials, BehaviorKind, MaterialId, MaterialProps, Rgba, MATERIAL_SLOTS, MAT_EMPTY,
    MAT_NULL,
};

#[derive(Clone, Debug)]
pub struct MaterialRegistry {
    slots: Vec<MaterialProps>,
    palette: Vec<u32>,
    /// Lowest registered id per behavior, for rules that create material
    first_by_kind: [Option<MaterialId>; BehaviorKind::COUNT],
}

impl MaterialRegistry {
    /// Registry with every slot unregistered except Empty
    pub fn empty() -> Self {
        let mut slots = vec![MaterialProps::default(); MATERIAL_SLOTS];
        slots[MAT_EMPTY as usize] =
            MaterialProps::new("Empty", Rgba::TRANSPARENT, 0, BehaviorKind::None);
        let mut registry = Self {
            slots,
            palette: vec![0; MATERIAL_SLOTS],
            first_by_kind: [None; BehaviorKind::COUNT],
        };
        registry.rebuild_palette();
        registry
    }

    /// Registry holding the built-in set (Empty, Sand, Water, Stone, Wood, Fire, Smoke)
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for (id, props) in builtin_materials() {
            registry.slots[id as usize] = props;
        }
        registry.rebuild_palette();
        registry
    }

    /// Build a registry from a material bundle.
    ///
    /// The bundle replaces the default set entirely; Empty is always present
    /// even if the bundle omits it.
    pub fn from_bundle_json(json: &str) -> EngineResult<Self> {
        let bundle: BundleRoot = serde_json::from_str(json)?;
        let mut registry = Self::empty();
        let mut seen = [false; MATERIAL_SLOTS];

        for el in bundle.materials {
            if el.id == MAT_NULL {
                return Err(EngineError::ReservedMaterialId(el.id));
            }
            if seen[el.id as usize] {
                return Err(EngineError::DuplicateMaterial(el.id));
            }
            if el.name.trim().is_empty() {
                return Err(EngineError::UnnamedMaterial { id: el.id });
            }
            if el.id == MAT_EMPTY && el.behavior != BehaviorKind::None {
                return Err(EngineError::EmptySlotBehavior);
            }
            seen[el.id as usize] = true;

            registry.slots[el.id as usize] = MaterialProps {
                name: el.name,
                color: el.color,
                density: el.density,
                behavior: el.behavior,
                is_static: el.is_static,
            };
        }

        registry.rebuild_palette();
        info!(materials = registry.registered().count(), "material bundle loaded");
        Ok(registry)
    }

    /// Props for an id. Unregistered ids yield an empty descriptor.
    #[inline]
    pub fn props(&self, id: MaterialId) -> &MaterialProps {
        &self.slots[id as usize]
    }

    #[inline]
    pub fn is_registered(&self, id: MaterialId) -> bool {
        self.slots[id as usize].is_registered()
    }

    #[inline]
    pub fn behavior(&self, id: MaterialId) -> BehaviorKind {
        self.slots[id as usize].behavior
    }

    #[inline]
    pub fn is_static(&self, id: MaterialId) -> bool {
        self.slots[id as usize].is_static
    }

    /// Lowest registered id driven by `kind` (e.g. the material Fire emits as smoke)
    #[inline]
    pub fn first_with_behavior(&self, kind: BehaviorKind) -> Option<MaterialId> {
        self.first_by_kind[kind.index()]
    }

    /// Packed ABGR color per id (256 entries, unregistered = 0)
    #[inline]
    pub fn palette_abgr(&self) -> &[u32] {
        &self.palette
    }

    /// Registered materials in id order
    pub fn registered(&self) -> impl Iterator<Item = (MaterialId, &MaterialProps)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_registered())
            .map(|(id, p)| (id as MaterialId, p))
    }

    /// Id of the material with the given name (case-insensitive)
    pub fn id_by_name(&self, name: &str) -> Option<MaterialId> {
        self.registered()
            .find(|(_, p)| p.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    /// JSON listing for brush pickers: `{"formatVersion":1,"materials":[{id,name,color,...}]}`
    pub fn manifest_json(&self) -> String {
        let materials: Vec<ManifestMaterial<'_>> = self
            .registered()
            .map(|(id, p)| ManifestMaterial {
                id,
                name: &p.name,
                color: p.color,
                density: p.density,
                hidden: id == MAT_EMPTY,
            })
            .collect();
        let out = Manifest {
            format_version: 1,
            materials,
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }

    fn rebuild_palette(&mut self) {
        for (slot, props) in self.palette.iter_mut().zip(self.slots.iter()) {
            *slot = props.color.to_abgr();
        }
        self.first_by_kind = [None; BehaviorKind::COUNT];
        for (id, props) in self.slots.iter().enumerate() {
            if !props.is_registered() || props.behavior == BehaviorKind::None {
                continue;
            }
            let entry = &mut self.first_by_kind[props.behavior.index()];
            if entry.is_none() {
                *entry = Some(id as MaterialId);
            }
        }
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    format_version: u32,
    materials: Vec<ManifestMaterial<'a>>,
}

#[derive(Serialize)]
struct ManifestMaterial<'a> {
    id: MaterialId,
    name: &'a str,
    color: Rgba,
    density: u8,
    hidden: bool,
}

#[derive(Deserialize)]
struct BundleRoot {
    materials: Vec<BundleMaterial>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleMaterial {
    id: MaterialId,
    name: String,
    color: Rgba,
    #[serde(default)]
    density: u8,
    #[serde(default)]
    behavior: BehaviorKind,
    #[serde(default, rename = "static")]
    is_static: bool,
}
