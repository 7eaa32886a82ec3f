/// Leading-edge rate gate on the simulation clock.
///
/// The first call opens the gate; after that it stays shut until `interval`
/// seconds have passed since the last time it opened. A zero interval never
/// shuts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    /// Minimum spacing between openings (seconds)
    interval: f64,
    /// Earliest time the gate opens again
    next: f64,
}

impl Throttle {
    /// Gate that opens at most once per `interval` seconds.
    #[must_use]
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(0.0),
            next: f64::NEG_INFINITY,
        }
    }

    /// Spacing between openings.
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Whether the gate would open at `now`, without consuming it.
    #[must_use]
    pub fn is_open(&self, now: f64) -> bool {
        now >= self.next
    }

    /// Open the gate if allowed at `now`. Returns whether it opened.
    pub fn ready(&mut self, now: f64) -> bool {
        if !self.is_open(now) {
            return false;
        }
        self.next = now + self.interval;
        true
    }

    /// Forget the last opening.
    pub fn reset(&mut self) {
        self.next = f64::NEG_INFINITY;
    }
}
