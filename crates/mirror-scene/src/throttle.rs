use std::time::{Duration, Instant};

/// Pose detection cadence.
pub const DETECTION_INTERVAL: Duration = Duration::from_millis(33);

/// Scene render cadence, 30 per second.
pub const RENDER_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 30);

/// Lets work through at most once per `interval`.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when nothing was accepted yet or `interval` has passed since.
    pub fn ready(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn accept(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// `ready` and, if so, `accept`.
    pub fn try_accept(&mut self, now: Instant) -> bool {
        let ready = self.ready(now);
        if ready {
            self.accept(now);
        }
        ready
    }

    /// Forget the last accepted frame.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
