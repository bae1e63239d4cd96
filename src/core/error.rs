//! Engine errors
//!
//! The simulation itself never fails: out-of-range access degrades to a
//! sentinel or a no-op. Only loading configuration and material bundles can
//! be rejected.

use thiserror::Error;

use crate::domain::materials::MaterialId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("material {0} is defined more than once")]
    DuplicateMaterial(MaterialId),

    #[error("material {id} has an empty name")]
    UnnamedMaterial { id: MaterialId },

    #[error("material 0 is reserved for Empty and cannot carry a behavior")]
    EmptySlotBehavior,

    #[error("material id {0} is reserved as the out-of-range sentinel")]
    ReservedMaterialId(MaterialId),
}

pub type EngineResult<T> = Result<T, EngineError>;
