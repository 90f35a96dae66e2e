//! # Pulseweave Core Library
//!
//! Core logic for Pulseweave, a small haptic pattern player: named vibration
//! patterns are played as timed pulse sequences against a device vibrator,
//! with a global intensity multiplier and cyclic pattern navigation. The
//! watch screen (or the bundled CLI) is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Playback engine**: a wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()`; it paces pulses and pauses and
//!   emits each pulse to a [`VibrationSink`]
//! - **Catalog & selector**: an ordered list of pattern providers (static and
//!   random) with cyclic navigation; random patterns regenerate on revisit
//! - **Session**: the single owner wiring selector, engine, intensity and
//!   indicator together behind discrete input events
//!
//! ## Key Components
//!
//! - [`Session`]: screen-controller equivalent and main entry point
//! - [`Player`]: playback engine state machine
//! - [`Catalog`] / [`PatternSelector`]: pattern storage and navigation
//! - [`VibrationSink`]: the hardware vibrator boundary
//! - [`Config`]: TOML-backed tunables

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod indicator;
pub mod intensity;
pub mod pattern;
pub mod player;
pub mod selector;
pub mod session;
pub mod sink;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use indicator::Indicator;
pub use intensity::Intensity;
pub use pattern::{PatternProvider, RandomSpec, VibrationStep, AMPLITUDE_MAX};
pub use player::{Player, PlayerState};
pub use selector::PatternSelector;
pub use session::{InputEvent, Session};
pub use sink::{NullSink, RecordingSink, VibrationSink};
