//! Audio events - discrete simulation happenings a sound layer can react to
//!
//! Events are queued in emission order and drained by the consumer. Positions
//! are grid coordinates; the host normalizes them for stereo panning.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioEventKind {
    /// A combustible cell caught fire
    Ignite,
    /// A brush stroke was applied
    Paint,
}

impl AudioEventKind {
    /// Numeric code used by the flat export (`[kind, x, y]` triples)
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            AudioEventKind::Ignite => 0,
            AudioEventKind::Paint => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AudioEvent {
    pub kind: AudioEventKind,
    pub x: i32,
    pub y: i32,
}

impl AudioEvent {
    pub fn ignite(x: i32, y: i32) -> Self {
        Self { kind: AudioEventKind::Ignite, x, y }
    }

    pub fn paint(x: i32, y: i32) -> Self {
        Self { kind: AudioEventKind::Paint, x, y }
    }
}
