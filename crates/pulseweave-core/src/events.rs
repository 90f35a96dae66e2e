use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::player::PlayerState;

/// Every user-visible state change produces an Event.
/// The display layer polls snapshots; front-ends print the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PlaybackStarted {
        pattern: String,
        steps: usize,
        at: DateTime<Utc>,
    },
    PlaybackStopped {
        pattern: String,
        at: DateTime<Utc>,
    },
    PatternChanged {
        index: usize,
        pattern: String,
        /// Whether playback carried over onto the new pattern.
        playing: bool,
        at: DateTime<Utc>,
    },
    IntensityChanged {
        intensity: f32,
        percent: u8,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: PlayerState,
        pattern: String,
        pattern_index: usize,
        intensity_percent: u8,
        glyph: char,
        pulse_active: bool,
        at: DateTime<Utc>,
    },
}
