use serde::{Deserialize, Serialize};

/// Upper bound on the per-tick delta, in seconds. A stall longer than this
/// (breakpoint, window drag) advances the simulation by exactly this much.
pub const MAX_DELTA: f32 = 1.0;

/// Decrement applied by one slow-down press.
pub const SCALE_DOWN_STEP: f32 = 0.025;
/// Increment applied by one speed-up press.
pub const SCALE_UP_STEP: f32 = 0.05;
/// The exact value a reset restores, independent of prior adjustments.
pub const SCALE_RESET: f32 = 1.0;

/// Simulation clock: decouples simulated time from wall-clock time via a
/// pause flag and a time-scale factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimClock {
    playing: bool,
    delta: f32,
    total: f32,
    scale: f32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            playing: true,
            delta: 0.0,
            total: 0.0,
            scale: SCALE_RESET,
        }
    }
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one tick's wall-clock delta. The value is clamped to
    /// [`MAX_DELTA`]; simulated time advances only while playing.
    pub fn advance(&mut self, raw_delta: f32) {
        self.delta = raw_delta.min(MAX_DELTA);
        if self.playing {
            self.total += self.delta * self.scale;
        }
    }

    /// The clamped delta of the most recent tick.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Accumulated simulated time.
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Current time-scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether simulated time is advancing.
    pub fn playing(&self) -> bool {
        self.playing
    }

    /// Pause or resume accumulation. Paused time is frozen, not lost;
    /// resuming continues from the frozen value.
    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
        tracing::info!(playing = self.playing, "animation toggled");
    }

    pub fn slow_down(&mut self) {
        self.scale -= SCALE_DOWN_STEP;
        tracing::info!(scale = self.scale, "time scale");
    }

    pub fn speed_up(&mut self) {
        self.scale += SCALE_UP_STEP;
        tracing::info!(scale = self.scale, "time scale");
    }

    pub fn reset_scale(&mut self) {
        self.scale = SCALE_RESET;
        tracing::info!(scale = self.scale, "time scale reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn delta_is_clamped() {
        let mut clock = SimClock::new();
        clock.advance(5.0);
        assert_eq!(clock.delta(), MAX_DELTA);
        assert_eq!(clock.total(), MAX_DELTA);

        clock.advance(0.016);
        assert_relative_eq!(clock.delta(), 0.016);
    }

    #[test]
    fn total_accumulates_scaled_delta() {
        let mut clock = SimClock::new();
        clock.speed_up(); // 1.05
        clock.advance(0.5);
        assert_relative_eq!(clock.total(), 0.5 * 1.05);
    }

    #[test]
    fn pause_freezes_total_across_ticks() {
        let mut clock = SimClock::new();
        clock.advance(0.25);
        let frozen = clock.total();

        clock.toggle_playing();
        for _ in 0..100 {
            clock.advance(0.9);
        }
        assert_eq!(clock.total(), frozen);

        // Resume continues from the frozen value.
        clock.toggle_playing();
        clock.advance(0.1);
        assert_relative_eq!(clock.total(), frozen + 0.1);
    }

    #[test]
    fn paused_clock_still_tracks_delta() {
        let mut clock = SimClock::new();
        clock.toggle_playing();
        clock.advance(0.016);
        assert_relative_eq!(clock.delta(), 0.016);
        assert_eq!(clock.total(), 0.0);
    }

    #[test]
    fn scale_reset_is_exact() {
        let mut clock = SimClock::new();
        for _ in 0..7 {
            clock.slow_down();
        }
        for _ in 0..3 {
            clock.speed_up();
        }
        assert_ne!(clock.scale(), SCALE_RESET);
        clock.reset_scale();
        assert_eq!(clock.scale(), SCALE_RESET);
    }

    #[test]
    fn scale_steps_match_constants() {
        let mut clock = SimClock::new();
        clock.slow_down();
        assert_relative_eq!(clock.scale(), 1.0 - SCALE_DOWN_STEP);
        clock.speed_up();
        assert_relative_eq!(clock.scale(), 1.0 - SCALE_DOWN_STEP + SCALE_UP_STEP);
    }
}
