mod presets;
mod provider;
mod step;

pub use presets::builtin_providers;
pub use provider::{PatternProvider, RandomSpec};
pub use step::{sequence_ms, VibrationStep, AMPLITUDE_MAX, DEFAULT_PAUSE_AFTER_MS};
