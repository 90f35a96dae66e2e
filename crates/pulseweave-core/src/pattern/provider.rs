//! Pattern providers: named sources of vibration step sequences.
//!
//! A provider is either *static* (the same fixed sequence every time) or
//! *random* (a sequence drawn once and cached until the selector invalidates
//! it, so revisiting the provider yields a fresh pattern).

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use super::step::{VibrationStep, AMPLITUDE_MAX};

/// Parameters for drawing a random step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomSpec {
    /// Number of steps per generated sequence.
    pub length: usize,
    /// Inclusive pulse duration range in milliseconds.
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
    /// Inclusive raw amplitude range; raw values are scaled onto 1..=255.
    pub min_amplitude: u16,
    pub max_amplitude: u16,
}

impl Default for RandomSpec {
    fn default() -> Self {
        Self {
            length: 12,
            min_duration_ms: 20,
            max_duration_ms: 500,
            min_amplitude: 30,
            max_amplitude: 500,
        }
    }
}

impl RandomSpec {
    /// Draw one sequence from this spec.
    pub fn generate(&self, rng: &mut Mcg128Xsl64) -> Vec<VibrationStep> {
        let length = self.length.max(1);
        let (dur_lo, dur_hi) = ordered(self.min_duration_ms.max(1), self.max_duration_ms.max(1));
        let (amp_lo, amp_hi) = ordered(self.min_amplitude.max(1), self.max_amplitude.max(1));
        (0..length)
            .map(|_| {
                let duration_ms = rng.gen_range(dur_lo..=dur_hi);
                let raw = rng.gen_range(amp_lo..=amp_hi);
                VibrationStep::new(duration_ms, scale_raw_amplitude(raw, amp_hi))
            })
            .collect()
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Map a raw draw in 1..=`max_raw` onto the 1..=255 device range.
fn scale_raw_amplitude(raw: u16, max_raw: u16) -> u8 {
    let scaled = (raw as f32 / max_raw as f32) * AMPLITUDE_MAX as f32;
    scaled.round().clamp(1.0, AMPLITUDE_MAX as f32) as u8
}

/// Where a provider's steps come from.
#[derive(Debug, Clone)]
pub enum PatternSource {
    /// Fixed sequence, identical on every call.
    Static(Vec<VibrationStep>),
    /// Sequence drawn once per activation and cached.
    Random {
        spec: RandomSpec,
        cached: Option<Vec<VibrationStep>>,
    },
}

/// A named entry in the catalog.
#[derive(Debug, Clone)]
pub struct PatternProvider {
    name: String,
    source: PatternSource,
}

impl PatternProvider {
    /// A static provider with a fixed step sequence.
    pub fn fixed(name: impl Into<String>, steps: Vec<VibrationStep>) -> Self {
        Self {
            name: name.into(),
            source: PatternSource::Static(steps),
        }
    }

    /// A random provider; its sequence is drawn lazily on first use.
    pub fn random(name: impl Into<String>, spec: RandomSpec) -> Self {
        Self {
            name: name.into(),
            source: PatternSource::Random { spec, cached: None },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_random(&self) -> bool {
        matches!(self.source, PatternSource::Random { .. })
    }

    /// The provider's current step sequence.
    ///
    /// For random providers this draws and caches a sequence on first call
    /// after creation or invalidation; later calls return the cached one.
    pub fn steps(&mut self, rng: &mut Mcg128Xsl64) -> &[VibrationStep] {
        match &mut self.source {
            PatternSource::Static(steps) => steps,
            PatternSource::Random { spec, cached } => {
                cached.get_or_insert_with(|| spec.generate(rng))
            }
        }
    }

    /// Drop a random provider's cached sequence. No-op for static providers.
    pub fn invalidate(&mut self) {
        if let PatternSource::Random { cached, .. } = &mut self.source {
            *cached = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Mcg128Xsl64 {
        Mcg128Xsl64::seed_from_u64(7)
    }

    #[test]
    fn static_provider_is_stable() {
        let steps = vec![VibrationStep::new(100, 200)];
        let mut p = PatternProvider::fixed("steady", steps.clone());
        let mut r = rng();
        assert_eq!(p.steps(&mut r), &steps[..]);
        p.invalidate();
        assert_eq!(p.steps(&mut r), &steps[..]);
    }

    #[test]
    fn random_provider_caches_until_invalidated() {
        let mut p = PatternProvider::random("surprise", RandomSpec::default());
        let mut r = rng();
        let first = p.steps(&mut r).to_vec();
        let again = p.steps(&mut r).to_vec();
        assert_eq!(first, again);

        p.invalidate();
        let fresh = p.steps(&mut r).to_vec();
        assert_eq!(fresh.len(), first.len());
        assert_ne!(fresh, first);
    }

    #[test]
    fn generated_steps_respect_ranges() {
        let spec = RandomSpec::default();
        let mut r = rng();
        for step in spec.generate(&mut r) {
            assert!((spec.min_duration_ms..=spec.max_duration_ms).contains(&step.duration_ms));
            assert!((1..=AMPLITUDE_MAX).contains(&step.amplitude));
        }
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let spec = RandomSpec::default();
        let a = spec.generate(&mut Mcg128Xsl64::seed_from_u64(42));
        let b = spec.generate(&mut Mcg128Xsl64::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn raw_amplitude_scaling_hits_device_max() {
        assert_eq!(scale_raw_amplitude(500, 500), AMPLITUDE_MAX);
        assert!(scale_raw_amplitude(30, 500) >= 1);
    }
}
