//! Tick sources for rename-suffix generation.
//!
//! The rename-retry engine derives fallback suffixes from a monotonically
//! advancing counter. The counter is passed in as a capability so production
//! code uses wall-clock ticks while tests script the sequence.

use core::cell::Cell;
use std::sync::OnceLock;
use std::time::Instant;

/// A monotonically advancing counter. Successive calls never decrease.
pub trait TickSource {
    fn ticks(&self) -> u64;
}

/// Milliseconds elapsed since the process first observed this source.
///
/// Resolution is coarse: two calls within the same millisecond return the
/// same value, so suffixes derived from it can repeat across a tight loop.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemTicks;

static EPOCH: OnceLock<Instant> = OnceLock::new();

impl TickSource for SystemTicks {
    fn ticks(&self) -> u64 {
        EPOCH.get_or_init(Instant::now).elapsed().as_millis() as u64
    }
}

/// Scripted tick source: starts at `start` and advances by `step` per call.
///
/// Single-threaded (`Cell`-backed). Intended for tests and callers that want
/// reproducible rename suffixes.
#[derive(Debug)]
pub struct SequenceTicks {
    next: Cell<u64>,
    step: u64,
}

impl SequenceTicks {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl TickSource for SequenceTicks {
    fn ticks(&self) -> u64 {
        let t = self.next.get();
        self.next.set(t + self.step);
        t
    }
}
