//! Decorative spinner glyph shown while the screen is up.
//!
//! Free-running on its own fixed interval, fully decoupled from playback;
//! the only playback-derived bit is the "pulse active" cue the display layer
//! reads alongside the glyph.

/// Frame interval between glyph changes, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 150;

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Wall-clock driven spinner. Call `tick()` on the same cadence as the rest
/// of the session; it advances frames on its own interval.
#[derive(Debug)]
pub struct Indicator {
    frame: usize,
    tick_ms: u64,
    last_advance_epoch_ms: Option<u64>,
}

impl Indicator {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            frame: 0,
            tick_ms: tick_ms.max(1),
            last_advance_epoch_ms: None,
        }
    }

    pub fn glyph(&self) -> char {
        FRAMES[self.frame]
    }

    /// Advance by however many frame intervals have elapsed.
    pub fn tick(&mut self) {
        let now = now_ms();
        let last = *self.last_advance_epoch_ms.get_or_insert(now);
        let elapsed = now.saturating_sub(last);
        let frames = (elapsed / self.tick_ms) as usize;
        if frames > 0 {
            self.frame = (self.frame + frames) % FRAMES.len();
            self.last_advance_epoch_ms = Some(last + frames as u64 * self.tick_ms);
        }
    }
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_is_stable_between_intervals() {
        let mut ind = Indicator::new(60_000);
        let before = ind.glyph();
        ind.tick();
        ind.tick();
        assert_eq!(ind.glyph(), before);
    }

    #[test]
    fn advances_once_interval_elapses() {
        let mut ind = Indicator::new(150);
        ind.tick();
        assert_eq!(ind.frame, 0);
        // Backdate the last advance by exactly one interval.
        ind.last_advance_epoch_ms = Some(now_ms() - 150);
        ind.tick();
        assert_eq!(ind.frame, 1);
    }

    #[test]
    fn wraps_around_the_frame_ring() {
        let mut ind = Indicator::new(150);
        ind.tick();
        ind.last_advance_epoch_ms = Some(now_ms() - 150 * FRAMES.len() as u64);
        ind.tick();
        assert_eq!(ind.frame, 0);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let ind = Indicator::new(0);
        assert_eq!(ind.tick_ms, 1);
    }
}
