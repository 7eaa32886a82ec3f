//! Tick pacing for the runner.

use web_time::{Duration, Instant};

/// Tick timing with rate calculation and optional rate limiting
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target tick rate in Hz (0 = unlimited)
    target_rate: u32,
    /// Minimum tick duration based on target rate
    min_tick_duration: Duration,
    /// Last tick timestamp
    last_tick: Instant,
    /// Smoothed tick rate using exponential moving average
    smoothed_rate: f64,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f64,
}

impl FrameTiming {
    /// Create a new tick timer with the given rate target (0 = unlimited).
    #[must_use]
    pub fn new(target_rate: u32) -> Self {
        let min_tick_duration = if target_rate > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_rate))
        } else {
            Duration::ZERO
        };

        Self {
            target_rate,
            min_tick_duration,
            last_tick: Instant::now(),
            smoothed_rate: f64::from(target_rate.max(1)),
            smoothing: 0.05,
        }
    }

    /// Fixed step length for the target rate, in seconds. `None` when
    /// unlimited.
    #[must_use]
    pub fn fixed_dt(&self) -> Option<f64> {
        (self.target_rate > 0).then(|| self.min_tick_duration.as_secs_f64())
    }

    /// Returns true if enough time has passed to run the next tick.
    #[must_use]
    pub fn should_tick(&self) -> bool {
        if self.target_rate == 0 {
            return true;
        }
        self.last_tick.elapsed() >= self.min_tick_duration
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.min_tick_duration
            .saturating_sub(self.last_tick.elapsed())
    }

    /// Call after each tick. Returns the measured tick length in seconds.
    pub fn end_tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        let tick_time = elapsed.as_secs_f64();
        if tick_time > 0.0 {
            let instant_rate = 1.0 / tick_time;
            // Exponential moving average for a stable readout
            self.smoothed_rate = self.smoothed_rate * (1.0 - self.smoothing)
                + instant_rate * self.smoothing;
        }
        tick_time
    }

    /// Get the current tick rate (smoothed)
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.smoothed_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_ticks() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_tick());
        assert_eq!(timing.fixed_dt(), None);
        assert_eq!(timing.remaining(), Duration::ZERO);
    }

    #[test]
    fn fixed_dt_matches_rate() {
        let timing = FrameTiming::new(50);
        let dt = timing.fixed_dt().unwrap();
        assert!((dt - 0.02).abs() < 1e-9);
    }

    #[test]
    fn end_tick_measures_elapsed_time() {
        let mut timing = FrameTiming::new(1000);
        std::thread::sleep(Duration::from_millis(5));
        let dt = timing.end_tick();
        assert!(dt >= 0.005);
        assert!(timing.rate() > 0.0);
    }
}
