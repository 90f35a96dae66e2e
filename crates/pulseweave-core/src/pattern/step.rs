use serde::{Deserialize, Serialize};

/// Strongest amplitude the core ever emits. Sinks map this onto whatever
/// their device treats as full strength.
pub const AMPLITUDE_MAX: u8 = 255;

/// Pause inserted after a step when none is given explicitly.
pub const DEFAULT_PAUSE_AFTER_MS: u64 = 100;

/// A single timed vibration emission: buzz for `duration_ms` at `amplitude`,
/// then stay quiet for `pause_after_ms` before the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibrationStep {
    /// Pulse length in milliseconds. Always at least 1.
    pub duration_ms: u64,
    /// Pulse strength in 1..=255.
    pub amplitude: u8,
    /// Silence after the pulse, in milliseconds.
    #[serde(default = "default_pause_after")]
    pub pause_after_ms: u64,
}

fn default_pause_after() -> u64 {
    DEFAULT_PAUSE_AFTER_MS
}

impl VibrationStep {
    /// Create a step with the default pause after it.
    ///
    /// Duration and amplitude are clamped to their valid minimums so a step
    /// can never describe a zero-length or zero-strength pulse.
    pub fn new(duration_ms: u64, amplitude: u8) -> Self {
        Self::with_pause(duration_ms, amplitude, DEFAULT_PAUSE_AFTER_MS)
    }

    /// Create a step with an explicit pause after it.
    pub fn with_pause(duration_ms: u64, amplitude: u8, pause_after_ms: u64) -> Self {
        Self {
            duration_ms: duration_ms.max(1),
            amplitude: amplitude.max(1),
            pause_after_ms,
        }
    }

    /// Total wall time this step occupies: pulse plus trailing pause.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn total_ms(&self) -> u64 {
        self.duration_ms.saturating_add(self.pause_after_ms)
    }
}

/// Total wall time of one full run through `steps`.
pub fn sequence_ms(steps: &[VibrationStep]) -> u64 {
    steps.iter().fold(0u64, |acc, s| acc.saturating_add(s.total_ms()))
}
