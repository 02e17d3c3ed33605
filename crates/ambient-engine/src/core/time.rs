/// Frame clock.
/// Turns the host's frame timestamps (ms) into per-frame deltas in seconds.
pub struct FrameClock {
    /// Timestamp of the previous tick, if any.
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Record a frame at `now_ms`. Returns seconds since the previous frame,
    /// or 0 for the first frame after construction or `reset`.
    /// Timestamps that go backwards yield 0 rather than a negative delta.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp so the next tick starts fresh.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
