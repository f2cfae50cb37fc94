//! Periodic timers fed by elapsed frame time
//!
//! Stands in for browser `setInterval` so the games stay headless: the frame
//! loop feeds wall time in, the timer reports how many periods elapsed.

use crate::consts::MAX_CATCH_UP;

/// A re-armable periodic timer
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    period_ms: f64,
    elapsed_ms: f64,
    armed: bool,
}

impl Interval {
    /// Create a disarmed timer with the given period
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
            armed: false,
        }
    }

    /// Start (or restart) counting from zero
    pub fn arm(&mut self) {
        self.elapsed_ms = 0.0;
        self.armed = true;
    }

    /// Restart with a new period, like clearing and re-creating an interval
    pub fn rearm(&mut self, period_ms: f64) {
        self.period_ms = period_ms;
        self.arm();
    }

    /// Stop firing and drop any accumulated time
    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Feed elapsed time; returns how many periods completed.
    ///
    /// At most `MAX_CATCH_UP` firings are reported per call; the backlog
    /// beyond that is dropped so a long stall (hidden tab) doesn't replay
    /// minutes of game time in one frame.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.armed || self.period_ms <= 0.0 || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.period_ms && fired < MAX_CATCH_UP {
            self.elapsed_ms -= self.period_ms;
            fired += 1;
        }
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms = 0.0;
        }
        fired
    }
}
