//! Stand-ins for the device vibrator.

use pulseweave_core::VibrationSink;

/// Simulated vibrator that narrates every pulse on stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    pulses: u64,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VibrationSink for ConsoleSink {
    fn pulse(&mut self, duration_ms: u64, amplitude: u8) {
        self.pulses += 1;
        println!("pulse #{:<4} {:>4} ms @ {:>3}/255", self.pulses, duration_ms, amplitude);
    }

    fn cancel_all(&mut self) {
        println!("cancel");
    }
}
