//! Timeline clock primitives
//!
//! Two kinds of clock drive every animated entity:
//!
//! - [`OneShotClock`]: delay, then a linear ramp to 1, then hold at 1 until
//!   disposed. Progress is a pure function of elapsed time since creation.
//! - [`LoopingClock`]: an infinite cycle through eased keyframe segments,
//!   advanced by per-tick deltas. Each full cycle replays identically.
//!
//! Both are wrapped in the [`Clock`] enum so the scheduler ticks a
//! heterogeneous registry uniformly.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// A delayed, bounded, one-shot timeline
///
/// Progress stays 0 until `elapsed >= delay`, ramps linearly to 1 over
/// `duration`, then pins at 1 (`terminal`) until the clock is disposed.
#[derive(Clone, Copy, Debug)]
pub struct OneShotClock {
    delay_ms: f32,
    duration_ms: f32,
    progress: f32,
    terminal: bool,
}

impl OneShotClock {
    pub fn new(delay_ms: f32, duration_ms: f32) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            duration_ms: duration_ms.max(0.0),
            progress: 0.0,
            terminal: false,
        }
    }

    /// Advance to an absolute elapsed time since creation, returning progress
    ///
    /// Output is clamped to `[0, 1]` for any input, including negative or
    /// huge values. A zero duration snaps straight to 1 once the delay has
    /// passed.
    pub fn advance(&mut self, elapsed_ms: f64) -> f32 {
        if self.terminal {
            return 1.0;
        }
        let active_ms = elapsed_ms as f32 - self.delay_ms;
        if active_ms < 0.0 {
            self.progress = 0.0;
            return 0.0;
        }
        self.progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (active_ms / self.duration_ms).clamp(0.0, 1.0)
        };
        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.terminal = true;
        }
        self.progress
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether the clock reached 1 and will not advance again
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }
}

/// One leg of a looping waveform: ease from the current value to `target`
/// over `duration_ms`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub target: f32,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Segment {
    pub fn new(target: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            target,
            duration_ms,
            easing,
        }
    }

    pub fn linear(target: f32, duration_ms: f32) -> Self {
        Self::new(target, duration_ms, Easing::Linear)
    }
}

/// A perpetually looping keyframe-segment clock
///
/// Holds a current segment index and segment-local elapsed counter; when the
/// counter reaches the segment's duration the remainder carries into the next
/// segment, wrapping to index 0 after the last. Every cycle replays the same
/// values: segment 0 always starts from the waveform's initial value.
#[derive(Clone, Debug)]
pub struct LoopingClock {
    initial: f32,
    segments: Vec<Segment>,
    index: usize,
    local_ms: f32,
    value: f32,
    stopped: bool,
}

impl LoopingClock {
    pub fn new(initial: f32, segments: Vec<Segment>) -> Self {
        Self {
            initial,
            segments,
            index: 0,
            local_ms: 0.0,
            value: initial,
            stopped: false,
        }
    }

    fn cycle_ms(&self) -> f32 {
        self.segments.iter().map(|s| s.duration_ms.max(0.0)).sum()
    }

    fn segment_start(&self) -> f32 {
        if self.index == 0 {
            self.initial
        } else {
            self.segments[self.index - 1].target
        }
    }

    /// Advance by a time delta, returning the current waveform value
    pub fn advance_by(&mut self, dt_ms: f64) -> f32 {
        if self.stopped || self.segments.is_empty() {
            return self.value;
        }
        let cycle = self.cycle_ms();
        if cycle <= 0.0 {
            // Degenerate waveform: pin to the last target
            self.value = self.segments[self.segments.len() - 1].target;
            return self.value;
        }

        // Advancing by whole cycles is the identity, so a huge dt reduces
        // to its remainder before walking segments.
        let mut dt = (dt_ms.max(0.0) as f32) % cycle;
        loop {
            let segment = self.segments[self.index];
            let duration = segment.duration_ms.max(0.0);
            let remaining = duration - self.local_ms;
            if dt < remaining {
                self.local_ms += dt;
                let t = if duration <= 0.0 {
                    1.0
                } else {
                    self.local_ms / duration
                };
                let start = self.segment_start();
                self.value = start + (segment.target - start) * segment.easing.apply(t);
                return self.value;
            }
            dt -= remaining;
            self.value = segment.target;
            self.index = (self.index + 1) % self.segments.len();
            self.local_ms = 0.0;
        }
    }

    /// Current waveform value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Halt advancement, freezing the last value. Idempotent.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Return to the initial value and segment, ready to run again
    pub fn reset(&mut self) {
        self.index = 0;
        self.local_ms = 0.0;
        self.value = self.initial;
        self.stopped = false;
    }
}

/// Tagged union over both clock kinds
#[derive(Clone, Debug)]
pub enum Clock {
    OneShot(OneShotClock),
    Looping(LoopingClock),
}

impl Clock {
    pub fn one_shot(delay_ms: f32, duration_ms: f32) -> Self {
        Clock::OneShot(OneShotClock::new(delay_ms, duration_ms))
    }

    pub fn looping(initial: f32, segments: Vec<Segment>) -> Self {
        Clock::Looping(LoopingClock::new(initial, segments))
    }

    /// Advance the clock and return its output value
    ///
    /// One-shot clocks use absolute `elapsed_ms` since their epoch; looping
    /// clocks consume the per-tick `dt_ms` delta.
    pub fn advance(&mut self, elapsed_ms: f64, dt_ms: f64) -> f32 {
        match self {
            Clock::OneShot(clock) => clock.advance(elapsed_ms),
            Clock::Looping(clock) => clock.advance_by(dt_ms),
        }
    }

    /// Last output without advancing
    pub fn output(&self) -> f32 {
        match self {
            Clock::OneShot(clock) => clock.progress(),
            Clock::Looping(clock) => clock.value(),
        }
    }

    /// True only for a one-shot clock pinned at 1
    pub fn is_terminal(&self) -> bool {
        match self {
            Clock::OneShot(clock) => clock.is_terminal(),
            Clock::Looping(_) => false,
        }
    }

    /// Halt a looping clock; a no-op for one-shots, whose progress is already
    /// a pure function of elapsed time
    pub fn stop(&mut self) {
        if let Clock::Looping(clock) = self {
            clock.stop();
        }
    }
}
