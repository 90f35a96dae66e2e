//! Session controller: the single owner of all playback state.
//!
//! Stands in for the watch screen controller. It owns the selector, playback
//! engine, intensity and indicator, translates discrete input events into
//! state changes, and guarantees the sink is cancelled on teardown. All
//! mutation happens through sequential calls on this one owner; nothing here
//! needs locks.

use chrono::Utc;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::events::Event;
use crate::indicator::Indicator;
use crate::intensity::Intensity;
use crate::player::{Player, PlayerState};
use crate::selector::PatternSelector;
use crate::sink::VibrationSink;

/// Discrete, already-debounced user inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Center tap: toggle play/stop on the current pattern.
    TapCenter,
    /// Tap on the pattern label: advance to the next pattern.
    TapNext,
    /// Horizontal fling forward: advance to the next pattern.
    SwipeNext,
    /// Horizontal fling backward: retreat to the previous pattern.
    SwipePrevious,
    /// Vertical drag, already converted to an intensity delta.
    Drag { delta: f32 },
}

/// One active screen's worth of playback state.
pub struct Session {
    selector: PatternSelector,
    player: Player,
    intensity: Intensity,
    indicator: Indicator,
}

impl Session {
    /// Build a session over `catalog` with the given tunables.
    ///
    /// # Errors
    ///
    /// Fails only on an empty catalog.
    pub fn new(catalog: Catalog, config: &Config) -> Result<Self> {
        Ok(Self {
            selector: PatternSelector::new(catalog)?,
            player: Player::new(config.playback.cycle_pause_ms),
            intensity: Intensity::default(),
            indicator: Indicator::new(config.ui.indicator_tick_ms),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn pattern_name(&self) -> &str {
        self.selector.current_name()
    }

    pub fn cycles_completed(&self) -> u64 {
        self.player.cycles_completed()
    }

    /// Read-only projection of the current state for the display layer.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.player.state(),
            pattern: self.selector.current_name().to_string(),
            pattern_index: self.selector.index(),
            intensity_percent: self.intensity.percent(),
            glyph: self.indicator.glyph(),
            pulse_active: self.player.pulse_active(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Dispatch one discrete input event.
    pub fn handle_input(&mut self, input: InputEvent, sink: &mut dyn VibrationSink) -> Option<Event> {
        match input {
            InputEvent::TapCenter => self.toggle(sink),
            InputEvent::TapNext | InputEvent::SwipeNext => self.next_pattern(sink),
            InputEvent::SwipePrevious => self.previous_pattern(sink),
            InputEvent::Drag { delta } => self.adjust_intensity(delta),
        }
    }

    /// Toggle play/stop on the selected pattern.
    pub fn toggle(&mut self, sink: &mut dyn VibrationSink) -> Option<Event> {
        if self.player.is_playing() {
            self.stop(sink)
        } else {
            self.start(sink)
        }
    }

    /// Start playing the selected pattern from the beginning.
    pub fn start(&mut self, sink: &mut dyn VibrationSink) -> Option<Event> {
        if !sink.has_vibrator() {
            warn!("device has no vibrator; playback will be silent");
        }
        let steps = self.selector.current_steps();
        if !self.player.play(steps.clone(), &self.intensity, sink) {
            return None;
        }
        Some(Event::PlaybackStarted {
            pattern: self.selector.current_name().to_string(),
            steps: steps.len(),
            at: Utc::now(),
        })
    }

    /// Stop playback, cancelling the in-flight pulse.
    pub fn stop(&mut self, sink: &mut dyn VibrationSink) -> Option<Event> {
        if !self.player.stop(sink) {
            return None;
        }
        Some(Event::PlaybackStopped {
            pattern: self.selector.current_name().to_string(),
            at: Utc::now(),
        })
    }

    /// Advance to the next pattern; if playing, restart on the new one.
    pub fn next_pattern(&mut self, sink: &mut dyn VibrationSink) -> Option<Event> {
        self.selector.next();
        self.after_pattern_change(sink)
    }

    /// Retreat to the previous pattern; if playing, restart on the new one.
    pub fn previous_pattern(&mut self, sink: &mut dyn VibrationSink) -> Option<Event> {
        self.selector.previous();
        self.after_pattern_change(sink)
    }

    /// Jump to a pattern by name; if playing, restart on it.
    pub fn select_pattern(&mut self, name: &str, sink: &mut dyn VibrationSink) -> Result<Option<Event>> {
        self.selector.select(name)?;
        Ok(self.after_pattern_change(sink))
    }

    /// Shift intensity by `delta`. Takes effect from the next emitted pulse.
    pub fn adjust_intensity(&mut self, delta: f32) -> Option<Event> {
        let value = self.intensity.adjust(delta);
        debug!(intensity = value, "intensity adjusted");
        Some(Event::IntensityChanged {
            intensity: value,
            percent: self.intensity.percent(),
            at: Utc::now(),
        })
    }

    /// Set intensity to an absolute value in `[0, 1]`.
    pub fn set_intensity(&mut self, value: f32) -> Option<Event> {
        self.intensity = Intensity::new(value);
        Some(Event::IntensityChanged {
            intensity: self.intensity.value(),
            percent: self.intensity.percent(),
            at: Utc::now(),
        })
    }

    /// Drive the playback engine and the indicator. Call on a short cadence.
    pub fn tick(&mut self, sink: &mut dyn VibrationSink) {
        self.indicator.tick();
        self.player.tick(&self.intensity, sink);
    }

    /// Unconditional shutdown: stop the loop and cancel outstanding pulses.
    ///
    /// Safe to call at any time, including mid-pulse and repeatedly; leaving
    /// the screen must always land here.
    pub fn teardown(&mut self, sink: &mut dyn VibrationSink) {
        self.player.stop(sink);
        sink.cancel_all();
    }

    fn after_pattern_change(&mut self, sink: &mut dyn VibrationSink) -> Option<Event> {
        let playing = self.player.is_playing();
        if playing {
            // Restart immediately on the new pattern, staying in Playing.
            let steps = self.selector.current_steps();
            self.player.play(steps, &self.intensity, sink);
        }
        Some(Event::PatternChanged {
            index: self.selector.index(),
            pattern: self.selector.current_name().to_string(),
            playing: self.player.state() == PlayerState::Playing,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;

    fn session() -> Session {
        let catalog = Catalog::builtin(&Config::default().random);
        Session::new(catalog, &Config::default()).unwrap()
    }

    #[test]
    fn tap_toggles_playback() {
        let mut s = session();
        let mut sink = RecordingSink::new();

        let started = s.handle_input(InputEvent::TapCenter, &mut sink);
        assert!(matches!(started, Some(Event::PlaybackStarted { .. })));
        assert!(s.is_playing());
        assert_eq!(sink.pulses.len(), 1);

        let stopped = s.handle_input(InputEvent::TapCenter, &mut sink);
        assert!(matches!(stopped, Some(Event::PlaybackStopped { .. })));
        assert!(!s.is_playing());
        assert_eq!(sink.cancels, 1);
    }

    #[test]
    fn swipe_while_stopped_changes_pattern_without_playing() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        let before = s.pattern_name().to_string();

        let ev = s.handle_input(InputEvent::SwipeNext, &mut sink);
        assert!(matches!(ev, Some(Event::PatternChanged { playing: false, .. })));
        assert_ne!(s.pattern_name(), before);
        assert!(sink.pulses.is_empty());
    }

    #[test]
    fn tap_next_advances_like_a_swipe() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        let before = s.pattern_name().to_string();

        let ev = s.handle_input(InputEvent::TapNext, &mut sink);
        assert!(matches!(ev, Some(Event::PatternChanged { index: 1, .. })));
        assert_ne!(s.pattern_name(), before);

        // While playing it restarts on the new pattern, same as a fling.
        s.toggle(&mut sink);
        s.handle_input(InputEvent::TapNext, &mut sink);
        assert!(s.is_playing());
        assert_eq!(sink.cancels, 1);
    }

    #[test]
    fn swipe_while_playing_restarts_on_new_pattern() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.toggle(&mut sink);
        assert!(s.is_playing());

        let ev = s.handle_input(InputEvent::SwipeNext, &mut sink);
        assert!(matches!(ev, Some(Event::PatternChanged { playing: true, .. })));
        assert!(s.is_playing());
        // Old pulse superseded, new pattern's first pulse emitted.
        assert_eq!(sink.cancels, 1);
        assert_eq!(sink.pulses.len(), 2);
    }

    #[test]
    fn drag_adjusts_intensity_clamped() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.handle_input(InputEvent::Drag { delta: -0.3 }, &mut sink);
        assert!((s.intensity().value() - 0.7).abs() < 1e-6);
        s.handle_input(InputEvent::Drag { delta: 5.0 }, &mut sink);
        assert_eq!(s.intensity().value(), 1.0);
    }

    #[test]
    fn intensity_applies_to_newly_emitted_pulses() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.adjust_intensity(-0.5);
        s.start(&mut sink);
        let (_, amplitude) = sink.last_pulse().unwrap();
        // heartbeat opens at 230; half intensity rounds to 115
        assert_eq!(amplitude, 115);
    }

    #[test]
    fn teardown_always_cancels() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.toggle(&mut sink);
        s.teardown(&mut sink);
        assert!(!s.is_playing());
        assert!(sink.cancels >= 1);

        // Idempotent.
        s.teardown(&mut sink);
        assert!(!s.is_playing());
    }

    #[test]
    fn select_pattern_by_name() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.select_pattern("sos", &mut sink).unwrap();
        assert_eq!(s.pattern_name(), "sos");
        assert!(s.select_pattern("unknown", &mut sink).is_err());
    }

    #[test]
    fn snapshot_projects_display_state() {
        let s = session();
        match s.snapshot() {
            Event::StateSnapshot {
                state,
                pattern_index,
                intensity_percent,
                pulse_active,
                ..
            } => {
                assert_eq!(state, PlayerState::Stopped);
                assert_eq!(pattern_index, 0);
                assert_eq!(intensity_percent, 100);
                assert!(!pulse_active);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
