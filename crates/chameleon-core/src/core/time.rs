/// Timing for a single frame, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Clock reading after this frame's advance.
    pub now: f64,
    /// Time elapsed since the previous frame.
    pub delta: f64,
}

impl FrameTime {
    pub fn new(now: f64, delta: f64) -> Self {
        Self { now, delta }
    }
}

/// Injected game clock.
/// The only source of "now" the game logic reads. Driven by the frame loop,
/// never by wall-clock time, so tests can step it deterministically.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    now: f64,
    delta: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame. Negative or non-finite deltas are treated as zero
    /// so the clock stays monotonic.
    pub fn advance(&mut self, delta_ms: f64) -> FrameTime {
        let delta = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        self.now += delta;
        self.delta = delta;
        self.frame()
    }

    /// Current timestamp in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Delta of the most recent advance.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn frame(&self) -> FrameTime {
        FrameTime::new(self.now, self.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut clock = Clock::new();
        clock.advance(16.67);
        let frame = clock.advance(16.67);
        assert!((frame.now - 33.34).abs() < 1e-9);
        assert_eq!(frame.delta, 16.67);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut clock = Clock::new();
        clock.advance(500.0);
        let frame = clock.advance(-20.0);
        assert_eq!(frame.now, 500.0);
        assert_eq!(frame.delta, 0.0);
    }

    #[test]
    fn nan_delta_is_ignored() {
        let mut clock = Clock::new();
        clock.advance(f64::NAN);
        assert_eq!(clock.now(), 0.0);
    }
}
