pub mod config;
pub mod pattern;
pub mod play;
