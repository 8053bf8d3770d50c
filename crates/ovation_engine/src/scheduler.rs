//! Animation scheduler
//!
//! A pure timeline multiplexer: it owns a registry of heterogeneous clocks,
//! advances every one of them on each tick, and exposes their current
//! outputs. It knows nothing about what an output means visually.
//!
//! Each registered clock latches its epoch on the first tick after
//! registration, so a session activated between frames starts all delays
//! from its first rendered frame. A clock's output depends only on elapsed
//! time and its own parameters; registration order is never observable.

use slotmap::{new_key_type, SlotMap};

use crate::clock::Clock;

new_key_type! {
    /// Handle to a registered clock
    pub struct ClockId;
}

struct ClockEntry {
    clock: Clock,
    /// Absolute time of the first tick seen by this clock
    epoch_ms: Option<f64>,
    /// Absolute time of the most recent tick, for looping deltas
    last_ms: Option<f64>,
}

/// Registry of active clocks, advanced together by `tick(now)`
#[derive(Default)]
pub struct Scheduler {
    clocks: SlotMap<ClockId, ClockEntry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clock; it starts advancing on the next tick
    pub fn register(&mut self, clock: Clock) -> ClockId {
        self.clocks.insert(ClockEntry {
            clock,
            epoch_ms: None,
            last_ms: None,
        })
    }

    /// Advance every registered clock to the given timestamp
    ///
    /// O(1) per clock. A `now` earlier than a clock's epoch clamps that
    /// clock's elapsed time to zero rather than running it backwards.
    pub fn tick(&mut self, now_ms: f64) {
        for (_, entry) in self.clocks.iter_mut() {
            let epoch = *entry.epoch_ms.get_or_insert(now_ms);
            let elapsed = (now_ms - epoch).max(0.0);
            let dt = (now_ms - entry.last_ms.unwrap_or(now_ms)).max(0.0);
            entry.last_ms = Some(now_ms);
            entry.clock.advance(elapsed, dt);
        }
    }

    /// Current output of a clock, `None` once disposed
    pub fn output(&self, id: ClockId) -> Option<f32> {
        self.clocks.get(id).map(|entry| entry.clock.output())
    }

    /// Whether a one-shot clock has pinned at 1
    pub fn is_terminal(&self, id: ClockId) -> bool {
        self.clocks
            .get(id)
            .map(|entry| entry.clock.is_terminal())
            .unwrap_or(false)
    }

    /// Number of active clocks
    pub fn clock_count(&self) -> usize {
        self.clocks.len()
    }

    /// Dispose one clock. Idempotent: disposing twice is a no-op.
    pub fn unregister(&mut self, id: ClockId) -> bool {
        self.clocks.remove(id).is_some()
    }

    /// Dispose every clock; the active-clock count drops to exactly 0
    pub fn unregister_all(&mut self) {
        let disposed = self.clocks.len();
        self.clocks.clear();
        if disposed > 0 {
            tracing::trace!(disposed, "scheduler disposed all clocks");
        }
    }
}
