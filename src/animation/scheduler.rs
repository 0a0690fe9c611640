use crate::traits::{FrameScheduler, FrameToken};
use instant::Instant;

/// Schedulers that queue requested frames for the host to drain
pub trait QueuedFrames {
    /// Removes and returns every frame requested since the last call
    fn take_pending(&mut self) -> Vec<FrameToken>;

    fn has_pending(&self) -> bool;
}

/// Fake clock for deterministic animation tests
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    now: f64,
    pending: Vec<FrameToken>,
    requested: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Moves the clock forward by `ms` milliseconds
    pub fn advance(&mut self, ms: f64) {
        self.now += ms;
    }

    pub fn set_now(&mut self, now: f64) {
        self.now = now;
    }

    /// Total number of frames requested so far
    pub fn requested(&self) -> usize {
        self.requested
    }
}

impl FrameScheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self, token: FrameToken) {
        self.requested += 1;
        self.pending.push(token);
    }
}

impl QueuedFrames for ManualScheduler {
    fn take_pending(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
    }

    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Wall-clock scheduler; the host drains its queue on every tick
#[derive(Debug, Clone)]
pub struct InstantScheduler {
    started: Instant,
    pending: Vec<FrameToken>,
}

impl InstantScheduler {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            pending: Vec::new(),
        }
    }
}

impl Default for InstantScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for InstantScheduler {
    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&mut self, token: FrameToken) {
        self.pending.push(token);
    }
}

impl QueuedFrames for InstantScheduler {
    fn take_pending(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
    }

    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_clock_and_queue() {
        let mut scheduler = ManualScheduler::starting_at(100.0);
        scheduler.advance(16.0);
        assert_eq!(scheduler.now_ms(), 116.0);

        scheduler.request_frame(FrameToken { epoch: 3 });
        assert!(scheduler.has_pending());
        assert_eq!(scheduler.take_pending(), vec![FrameToken { epoch: 3 }]);
        assert!(!scheduler.has_pending());
        assert_eq!(scheduler.requested(), 1);
    }

    #[test]
    fn test_instant_scheduler_is_monotonic() {
        let scheduler = InstantScheduler::new();
        let a = scheduler.now_ms();
        let b = scheduler.now_ms();
        assert!(b >= a);
    }
}
