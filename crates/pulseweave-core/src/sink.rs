//! The vibration sink boundary.
//!
//! The hardware vibrator is an opaque, exclusive external resource: it accepts
//! fire-and-forget pulses and a blanket cancel. Issuing a new pulse supersedes
//! whatever the device was still playing.

/// Abstraction over a device vibrator.
///
/// Implementations must treat `pulse` as fire-and-forget: the call returns
/// immediately and the engine paces playback itself. Amplitudes arrive
/// already clamped to `1..=255`; device-specific mapping happens behind this
/// trait.
pub trait VibrationSink {
    /// Play a single timed pulse, superseding any pulse still in flight.
    fn pulse(&mut self, duration_ms: u64, amplitude: u8);

    /// Cancel any in-flight pulse.
    fn cancel_all(&mut self);

    /// Whether the device has vibration hardware at all.
    fn has_vibrator(&self) -> bool {
        true
    }
}

/// Sink for devices without a vibrator. Every call is a silent no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl VibrationSink for NullSink {
    fn pulse(&mut self, _duration_ms: u64, _amplitude: u8) {}

    fn cancel_all(&mut self) {}

    fn has_vibrator(&self) -> bool {
        false
    }
}

/// Sink that records every call; the test double for the whole crate.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// Emitted pulses as `(duration_ms, amplitude)` in emission order.
    pub pulses: Vec<(u64, u8)>,
    /// Number of `cancel_all` calls received.
    pub cancels: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_pulse(&self) -> Option<(u64, u8)> {
        self.pulses.last().copied()
    }
}

impl VibrationSink for RecordingSink {
    fn pulse(&mut self, duration_ms: u64, amplitude: u8) {
        self.pulses.push((duration_ms, amplitude));
    }

    fn cancel_all(&mut self) {
        self.cancels += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_captures_calls() {
        let mut sink = RecordingSink::new();
        sink.pulse(120, 200);
        sink.pulse(80, 60);
        sink.cancel_all();
        assert_eq!(sink.pulses, vec![(120, 200), (80, 60)]);
        assert_eq!(sink.last_pulse(), Some((80, 60)));
        assert_eq!(sink.cancels, 1);
    }

    #[test]
    fn null_sink_reports_no_hardware() {
        assert!(!NullSink.has_vibrator());
        assert!(RecordingSink::new().has_vibrator());
    }
}
