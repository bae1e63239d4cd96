//! Material definitions - ids, cell layout and static per-material props
//!
//! A cell is two bytes: the material id indexing the registry and a free
//! per-material scratch byte. Ids 0..=6 are the built-in set; the remaining
//! slots of the 256-entry table stay unregistered unless a bundle fills them.

use serde::{Deserialize, Serialize};

/// Material identifier (index into the 256-slot registry)
pub type MaterialId = u8;

pub const MAT_EMPTY: MaterialId = 0;
pub const MAT_SAND: MaterialId = 1;
pub const MAT_WATER: MaterialId = 2;
pub const MAT_STONE: MaterialId = 3;
pub const MAT_WOOD: MaterialId = 4;
pub const MAT_FIRE: MaterialId = 5;
pub const MAT_SMOKE: MaterialId = 6;

/// Highest built-in material id
pub const MAT_LAST_BUILTIN: MaterialId = MAT_SMOKE;

/// Returned by out-of-range reads. Never stored in the grid.
pub const MAT_NULL: MaterialId = 0xFF;

/// Registry size (one slot per possible id)
pub const MATERIAL_SLOTS: usize = 256;

/// One grid cell. Plain value type, stored contiguously row-major.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub material: MaterialId,
    pub meta: u8,
}

impl Cell {
    pub const EMPTY: Cell = Cell { material: MAT_EMPTY, meta: 0 };

    /// Sentinel handed out for coordinates outside the grid
    pub const NULL: Cell = Cell { material: MAT_NULL, meta: 0 };

    #[inline]
    pub const fn of(material: MaterialId) -> Self {
        Cell { material, meta: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.material == MAT_EMPTY
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.material == MAT_NULL
    }
}

/// Straight RGBA color, 8 bits per channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed ABGR (little-endian bytes come out as [r, g, b, a], ready for
    /// a canvas `ImageData` or an RGBA8 texture upload)
    #[inline]
    pub const fn to_abgr(self) -> u32 {
        ((self.a as u32) << 24) | ((self.b as u32) << 16) | ((self.g as u32) << 8) | (self.r as u32)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Rgba::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Which rule set drives a material each tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorKind {
    /// Never dispatched (Empty, unregistered slots)
    #[default]
    None,
    Sand,
    Water,
    Wood,
    Fire,
    Smoke,
}

impl BehaviorKind {
    /// Number of variants (dispatch table size)
    pub const COUNT: usize = 6;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rules that roll dice every tick. A cell of this kind may change even
    /// when its neighbourhood did not, so its tile must stay scheduled.
    #[inline]
    pub fn is_stochastic(self) -> bool {
        matches!(self, BehaviorKind::Fire | BehaviorKind::Smoke)
    }
}

/// Static properties of one material slot
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MaterialProps {
    pub name: String,
    pub color: Rgba,
    pub density: u8,
    pub behavior: BehaviorKind,
    /// Member of the "never updates" class (e.g. Stone): skipped by the sweep
    pub is_static: bool,
}

impl MaterialProps {
    pub fn new(name: &str, color: Rgba, density: u8, behavior: BehaviorKind) -> Self {
        Self {
            name: name.to_string(),
            color,
            density,
            behavior,
            is_static: false,
        }
    }

    pub fn immobile(name: &str, color: Rgba, density: u8) -> Self {
        Self {
            name: name.to_string(),
            color,
            density,
            behavior: BehaviorKind::None,
            is_static: true,
        }
    }

    /// Unregistered slots carry an empty name
    #[inline]
    pub fn is_registered(&self) -> bool {
        !self.name.is_empty()
    }

    /// Whether the sweep hands cells of this material to a behavior
    #[inline]
    pub fn is_dispatched(&self) -> bool {
        !self.is_static && self.behavior != BehaviorKind::None
    }
}

/// Built-in material set, in id order
pub fn builtin_materials() -> [(MaterialId, MaterialProps); 7] {
    [
        (MAT_EMPTY, MaterialProps::new("Empty", Rgba::TRANSPARENT, 0, BehaviorKind::None)),
        (MAT_SAND, MaterialProps::new("Sand", Rgba::new(217, 191, 77, 255), 3, BehaviorKind::Sand)),
        (MAT_WATER, MaterialProps::new("Water", Rgba::new(51, 102, 230, 200), 1, BehaviorKind::Water)),
        (MAT_STONE, MaterialProps::immobile("Stone", Rgba::new(128, 128, 140, 255), 255)),
        (MAT_WOOD, MaterialProps::new("Wood", Rgba::new(142, 86, 55, 255), 255, BehaviorKind::Wood)),
        (MAT_FIRE, MaterialProps::new("Fire", Rgba::new(255, 35, 1, 255), 255, BehaviorKind::Fire)),
        (MAT_SMOKE, MaterialProps::new("Smoke", Rgba::new(28, 13, 2, 255), 255, BehaviorKind::Smoke)),
    ]
}
