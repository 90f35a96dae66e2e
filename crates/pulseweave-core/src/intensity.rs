//! Global intensity scalar applied to every emitted amplitude.

use crate::pattern::AMPLITUDE_MAX;

/// Multiplier in `[0, 1]` applied to step amplitudes at emission time.
///
/// Scaling is multiplicative and never retroactive: a pulse already handed to
/// the sink keeps the amplitude it was emitted with. The inner value is
/// always finite and in range; construction and adjustment enforce it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intensity(f32);

impl Default for Intensity {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Intensity {
    /// Non-finite input (NaN, infinities) falls back to full intensity.
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self::default()
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Rounded percentage for display.
    pub fn percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }

    /// Shift the intensity by `delta`, clamped to `[0, 1]`.
    ///
    /// A non-finite delta leaves the intensity unchanged.
    pub fn adjust(&mut self, delta: f32) -> f32 {
        let next = self.0 + delta;
        if next.is_finite() {
            self.0 = next.clamp(0.0, 1.0);
        }
        self.0
    }

    /// Scale an amplitude by the current intensity.
    ///
    /// The result is clamped to `1..=255`: even at intensity zero a pulse that
    /// is emitted at all is emitted at the floor amplitude.
    pub fn scale(&self, amplitude: u8) -> u8 {
        let adjusted = (amplitude as f32 * self.0).round();
        adjusted.clamp(1.0, AMPLITUDE_MAX as f32) as u8
    }
}
