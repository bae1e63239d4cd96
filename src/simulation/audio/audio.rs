use crate::domain::events::AudioEvent;

use super::Engine;

pub(super) fn take_audio_events(engine: &mut Engine) -> Vec<AudioEvent> {
    std::mem::take(&mut engine.audio)
}

pub(super) fn take_audio_events_flat(engine: &mut Engine) -> Vec<i32> {
    let mut flat = Vec::with_capacity(engine.audio.len() * 3);
    for ev in engine.audio.drain(..) {
        flat.extend_from_slice(&[ev.kind.code(), ev.x, ev.y]);
    }
    flat
}

pub(super) fn take_audio_events_json(engine: &mut Engine) -> String {
    let events = take_audio_events(engine);
    serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
}
