//! Piecewise-linear breakpoint curves
//!
//! One pure sampling function reused for every animated channel
//! (translate, opacity, scale, rotation). A curve maps a progress value in
//! `[0, 1]` through sorted `(at, value)` breakpoints; outside the breakpoint
//! span the output clamps to the nearest boundary value, never extrapolates.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// One `(input, output)` pair on a piecewise-linear curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Progress position (0.0 to 1.0)
    pub at: f32,
    /// Output value at this position
    pub value: f32,
}

/// A piecewise-linear interpolation curve
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    breakpoints: Vec<Breakpoint>,
}

impl Curve {
    /// Create a curve from breakpoints, validating ordering and range
    pub fn new(breakpoints: Vec<Breakpoint>) -> Result<Self> {
        if breakpoints.is_empty() {
            return Err(ConfigError::EmptyCurve);
        }
        for bp in &breakpoints {
            if !(0.0..=1.0).contains(&bp.at) || !bp.at.is_finite() {
                return Err(ConfigError::BreakpointOutOfRange { at: bp.at });
            }
        }
        for pair in breakpoints.windows(2) {
            if pair[1].at <= pair[0].at {
                return Err(ConfigError::UnsortedBreakpoints {
                    prev: pair[0].at,
                    at: pair[1].at,
                });
            }
        }
        Ok(Self { breakpoints })
    }

    /// Create a curve from `(at, value)` pairs
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(at, value)| Breakpoint { at, value })
                .collect(),
        )
    }

    /// A curve that outputs the same value everywhere
    pub fn constant(value: f32) -> Self {
        Self {
            breakpoints: vec![Breakpoint { at: 0.0, value }],
        }
    }

    /// A straight ramp from `start` at progress 0 to `end` at progress 1
    pub fn linear(start: f32, end: f32) -> Self {
        Self {
            breakpoints: vec![
                Breakpoint {
                    at: 0.0,
                    value: start,
                },
                Breakpoint { at: 1.0, value: end },
            ],
        }
    }

    /// Sample the curve at a progress value
    ///
    /// Before the first breakpoint or after the last, the output clamps to
    /// the boundary value. Between two breakpoints the output is linear.
    pub fn sample(&self, progress: f32) -> f32 {
        let first = self.breakpoints[0];
        if progress <= first.at {
            return first.value;
        }
        let last = self.breakpoints[self.breakpoints.len() - 1];
        if progress >= last.at {
            return last.value;
        }

        let mut prev = first;
        for &bp in &self.breakpoints[1..] {
            if progress < bp.at {
                let local = (progress - prev.at) / (bp.at - prev.at);
                return prev.value + (bp.value - prev.value) * local;
            }
            prev = bp;
        }
        last.value
    }

    /// Breakpoints of this curve
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_identities() {
        let curve = Curve::from_pairs(&[(0.0, 2.0), (1.0, 8.0)]).unwrap();
        assert_eq!(curve.sample(0.0), 2.0);
        assert_eq!(curve.sample(1.0), 8.0);
        assert!((curve.sample(0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_fade_table() {
        // Opacity fade: ramp in over the first tenth, hold, ramp out
        let curve = Curve::from_pairs(&[(0.0, 0.0), (0.1, 1.0), (0.9, 1.0), (1.0, 0.0)]).unwrap();
        let mid_ramp = curve.sample(0.05);
        assert!(mid_ramp > 0.0 && mid_ramp < 1.0);
        assert_eq!(curve.sample(0.5), 1.0);
        assert_eq!(curve.sample(1.0), 0.0);
    }

    #[test]
    fn test_clamps_outside_span() {
        let curve = Curve::from_pairs(&[(0.2, 3.0), (0.8, 7.0)]).unwrap();
        assert_eq!(curve.sample(0.0), 3.0);
        assert_eq!(curve.sample(-5.0), 3.0);
        assert_eq!(curve.sample(1.0), 7.0);
        assert_eq!(curve.sample(100.0), 7.0);
    }

    #[test]
    fn test_constant() {
        let curve = Curve::constant(0.4);
        assert_eq!(curve.sample(0.0), 0.4);
        assert_eq!(curve.sample(0.7), 0.4);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Curve::new(vec![]), Err(ConfigError::EmptyCurve));
    }

    #[test]
    fn test_rejects_unsorted() {
        let err = Curve::from_pairs(&[(0.5, 1.0), (0.2, 0.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::UnsortedBreakpoints { .. }));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Curve::from_pairs(&[(-0.1, 0.0), (1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::BreakpointOutOfRange { .. }));
        let err = Curve::from_pairs(&[(0.0, 0.0), (1.5, 1.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::BreakpointOutOfRange { .. }));
    }

    #[test]
    fn test_rejects_duplicate_position() {
        let err = Curve::from_pairs(&[(0.5, 0.0), (0.5, 1.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::UnsortedBreakpoints { .. }));
    }
}
