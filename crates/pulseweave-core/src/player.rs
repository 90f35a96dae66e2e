//! Playback engine.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically and
//! supplies the vibration sink on every call.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Playing -> Stopped
//! ```
//!
//! Within `Playing` the engine cycles through three phases per sequence:
//! the pulse itself, the per-step rest, and a fixed pause between full
//! cycles. Each emitted amplitude is scaled by the current intensity at
//! emission time; pulses already handed to the sink are never touched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::intensity::Intensity;
use crate::pattern::VibrationStep;
use crate::sink::VibrationSink;

/// Pause between full runs of a sequence, in milliseconds.
pub const DEFAULT_CYCLE_PAUSE_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Stopped,
    Playing,
}

/// Which part of the current step the engine is pacing through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// The pulse is in flight at the sink.
    Pulse,
    /// Quiet gap after a pulse (`pause_after_ms`).
    Rest,
    /// Quiet gap after a completed sequence, before looping.
    CyclePause,
}

/// Core playback engine.
///
/// Operates on wall-clock deltas -- no internal thread. At most one engine
/// drives a sink at a time; a new `play()` while already playing restarts
/// with the new sequence and stays in `Playing`.
#[derive(Debug)]
pub struct Player {
    steps: Vec<VibrationStep>,
    state: PlayerState,
    phase: Phase,
    step_index: usize,
    /// Remaining time in milliseconds for the current phase.
    remaining_ms: u64,
    /// Timestamp (ms since epoch) of the last tick while playing.
    last_tick_epoch_ms: Option<u64>,
    cycle_pause_ms: u64,
    cycles_completed: u64,
}

impl Player {
    pub fn new(cycle_pause_ms: u64) -> Self {
        Self {
            steps: Vec::new(),
            state: PlayerState::Stopped,
            phase: Phase::Pulse,
            step_index: 0,
            remaining_ms: 0,
            last_tick_epoch_ms: None,
            cycle_pause_ms,
            cycles_completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    /// Whether a pulse is currently in flight (drives the indicator cue).
    pub fn pulse_active(&self) -> bool {
        self.is_playing() && self.phase == Phase::Pulse
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Full sequence runs completed since the last `play()`.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start playing `steps` from the beginning, emitting the first pulse
    /// immediately.
    ///
    /// Called while already playing this restarts with the new sequence and
    /// preserves the `Playing` state (pattern switch mid-play). An empty
    /// sequence is refused and leaves the engine stopped.
    pub fn play(
        &mut self,
        steps: Vec<VibrationStep>,
        intensity: &Intensity,
        sink: &mut dyn VibrationSink,
    ) -> bool {
        if steps.is_empty() {
            debug!("refusing to play an empty sequence");
            return false;
        }
        if self.is_playing() {
            // Supersede the in-flight pulse before restarting.
            sink.cancel_all();
        }
        self.steps = steps;
        self.state = PlayerState::Playing;
        self.step_index = 0;
        self.cycles_completed = 0;
        self.last_tick_epoch_ms = Some(now_ms());
        self.emit(intensity, sink);
        true
    }

    /// Stop playback and cancel any in-flight pulse at the sink.
    ///
    /// Returns `false` if the engine was already stopped. Stopping is
    /// synchronous: state is `Stopped` before this returns.
    pub fn stop(&mut self, sink: &mut dyn VibrationSink) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.state = PlayerState::Stopped;
        self.last_tick_epoch_ms = None;
        sink.cancel_all();
        true
    }

    /// Call periodically while playing. Emits the next pulse whenever the
    /// current phase has elapsed. A no-op when stopped.
    pub fn tick(&mut self, intensity: &Intensity, sink: &mut dyn VibrationSink) {
        if !self.is_playing() {
            return;
        }
        self.flush_elapsed();
        if self.remaining_ms > 0 {
            return;
        }
        match self.phase {
            Phase::Pulse => {
                let pause = self
                    .steps
                    .get(self.step_index)
                    .map(|s| s.pause_after_ms)
                    .unwrap_or(0);
                self.phase = Phase::Rest;
                self.remaining_ms = pause;
            }
            Phase::Rest => {
                if self.step_index + 1 < self.steps.len() {
                    self.step_index += 1;
                    self.emit(intensity, sink);
                } else {
                    self.cycles_completed += 1;
                    self.phase = Phase::CyclePause;
                    self.remaining_ms = self.cycle_pause_ms;
                }
            }
            Phase::CyclePause => {
                self.step_index = 0;
                self.emit(intensity, sink);
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn emit(&mut self, intensity: &Intensity, sink: &mut dyn VibrationSink) {
        let Some(step) = self.steps.get(self.step_index).copied() else {
            // Unreachable with the indices this engine maintains; fail quiet.
            self.state = PlayerState::Stopped;
            return;
        };
        let adjusted = intensity.scale(step.amplitude);
        debug!(
            step = self.step_index,
            duration_ms = step.duration_ms,
            amplitude = adjusted,
            "emit pulse"
        );
        sink.pulse(step.duration_ms, adjusted);
        self.phase = Phase::Pulse;
        self.remaining_ms = step.duration_ms;
    }

    fn flush_elapsed(&mut self) {
        if let Some(last) = self.last_tick_epoch_ms {
            let now = now_ms();
            let elapsed = now.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now);
        }
    }

    /// Force the current phase to elapse without waiting on the wall clock.
    #[cfg(test)]
    fn elapse(&mut self, ms: u64) {
        self.remaining_ms = self.remaining_ms.saturating_sub(ms);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_PAUSE_MS)
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
