//! Tick scheduler - one recurring timer per game session.
//!
//! The scheduler does not read the clock. The host feeds it elapsed
//! milliseconds (one frame at a time) and gets back at most one
//! [`TickToken`] per call. A late frame fires one tick, never a backlog.
//!
//! Every (re)arm starts a new generation. Tokens carry the generation they
//! were fired in, so a controller can reject a tick that belongs to a session
//! it has already replaced.

/// Proof that a tick fired for a specific arming of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

impl TickToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval_ms: u32,
    elapsed_ms: u32,
    generation: u64,
    armed: bool,
}

impl TickScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            generation: 0,
            armed: false,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel any running timer and start a fresh one phased from now.
    pub fn arm(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.elapsed_ms = 0;
        self.armed = true;
        self.generation
    }

    /// Stop firing. Outstanding tokens become stale.
    pub fn cancel(&mut self) {
        if self.armed {
            self.generation = self.generation.wrapping_add(1);
        }
        self.armed = false;
        self.elapsed_ms = 0;
    }

    /// Account for `elapsed_ms` of wall time.
    ///
    /// Fires when strictly more than one interval has passed since the last
    /// firing (or arming), then restarts the phase from zero.
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<TickToken> {
        if !self.armed {
            return None;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms > self.interval_ms {
            self.elapsed_ms = 0;
            return Some(TickToken {
                generation: self.generation,
            });
        }
        None
    }

    /// Whether `token` was fired by the current arming.
    pub fn is_current(&self, token: TickToken) -> bool {
        self.armed && token.generation == self.generation
    }
}
