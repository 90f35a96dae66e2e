//! The built-in pattern list, in navigation order.

use super::provider::{PatternProvider, RandomSpec};
use super::step::{VibrationStep, AMPLITUDE_MAX};

/// The providers every catalog starts with, in cyclic navigation order.
///
/// `random_spec` parameterizes the "shuffle" provider; "sparkle" uses its own
/// shorter, busier spec.
pub fn builtin_providers(random_spec: RandomSpec) -> Vec<PatternProvider> {
    vec![
        PatternProvider::fixed("heartbeat", heartbeat()),
        PatternProvider::fixed("waves", waves()),
        PatternProvider::fixed("pulse train", pulse_train()),
        PatternProvider::fixed("crescendo", crescendo()),
        PatternProvider::fixed("sos", sos()),
        PatternProvider::random("shuffle", random_spec),
        PatternProvider::random("sparkle", sparkle_spec()),
    ]
}

/// Two quick beats, a long rest. The classic lub-dub.
fn heartbeat() -> Vec<VibrationStep> {
    vec![
        VibrationStep::with_pause(90, 230, 110),
        VibrationStep::with_pause(70, 160, 650),
    ]
}

/// Amplitude swells up and back down in smooth stages.
fn waves() -> Vec<VibrationStep> {
    vec![
        VibrationStep::new(180, 60),
        VibrationStep::new(180, 120),
        VibrationStep::new(200, 190),
        VibrationStep::new(220, AMPLITUDE_MAX),
        VibrationStep::new(200, 190),
        VibrationStep::new(180, 120),
        VibrationStep::with_pause(180, 60, 400),
    ]
}

/// Even metronome ticks at full strength.
fn pulse_train() -> Vec<VibrationStep> {
    vec![VibrationStep::with_pause(45, AMPLITUDE_MAX, 255); 6]
}

/// Each pulse longer and stronger than the last.
fn crescendo() -> Vec<VibrationStep> {
    (1..=5u64)
        .map(|i| VibrationStep::with_pause(60 + i * 50, (40 * i).min(255) as u8, 150))
        .collect()
}

/// ... --- ... with letter gaps.
fn sos() -> Vec<VibrationStep> {
    let dot = VibrationStep::with_pause(70, AMPLITUDE_MAX, 90);
    let dash = VibrationStep::with_pause(210, AMPLITUDE_MAX, 90);
    let mut steps = vec![dot; 3];
    if let Some(s) = steps.last_mut() {
        s.pause_after_ms = 250;
    }
    steps.extend(vec![dash; 3]);
    if let Some(s) = steps.last_mut() {
        s.pause_after_ms = 250;
    }
    steps.extend(vec![dot; 3]);
    if let Some(s) = steps.last_mut() {
        s.pause_after_ms = 600;
    }
    steps
}

/// Short busy flickers for the second random slot.
fn sparkle_spec() -> RandomSpec {
    RandomSpec {
        length: 16,
        min_duration_ms: 20,
        max_duration_ms: 90,
        min_amplitude: 60,
        max_amplitude: 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_list_is_nonempty_and_uniquely_named() {
        let providers = builtin_providers(RandomSpec::default());
        assert!(providers.len() >= 2);
        let mut names: Vec<_> = providers.iter().map(|p| p.name().to_string()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), providers.len());
    }

    #[test]
    fn builtin_list_contains_random_providers() {
        let providers = builtin_providers(RandomSpec::default());
        assert!(providers.iter().any(|p| p.is_random()));
        assert!(providers.iter().any(|p| !p.is_random()));
    }

    #[test]
    fn crescendo_is_monotonic() {
        let steps = crescendo();
        for pair in steps.windows(2) {
            assert!(pair[0].amplitude < pair[1].amplitude);
            assert!(pair[0].duration_ms < pair[1].duration_ms);
        }
    }
}
