//! Ambient effect set
//!
//! The perpetual loops that run for the whole life of a session, independent
//! of particle lifetimes: badge pulse, halo rotation and glow, shake, the
//! headline bounce and shimmer, and the backdrop swell. Exactly one instance
//! of each kind exists per active session; deactivation disposes their
//! clocks along with everything else.
//!
//! Every effect is a tagged variant over the same looping-clock abstraction,
//! so the whole set is this declarative waveform table rather than bespoke
//! per-effect setup code.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, Segment};
use crate::easing::Easing;
use crate::error::{ConfigError, Result};

/// The perpetually looping secondary animations of an active session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmbientKind {
    /// Badge scale oscillation
    Pulse,
    /// Full-turn halo rotation
    Rotate,
    /// Horizontal jitter
    Shake,
    /// Halo scale breathing
    Glow,
    /// Headline vertical bounce
    TextBounce,
    /// Headline opacity shimmer
    TextGlow,
    /// Backdrop scale swell
    BackgroundPulse,
}

impl AmbientKind {
    pub const ALL: [AmbientKind; 7] = [
        AmbientKind::Pulse,
        AmbientKind::Rotate,
        AmbientKind::Shake,
        AmbientKind::Glow,
        AmbientKind::TextBounce,
        AmbientKind::TextGlow,
        AmbientKind::BackgroundPulse,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AmbientKind::Pulse => "pulse",
            AmbientKind::Rotate => "rotate",
            AmbientKind::Shake => "shake",
            AmbientKind::Glow => "glow",
            AmbientKind::TextBounce => "text_bounce",
            AmbientKind::TextGlow => "text_glow",
            AmbientKind::BackgroundPulse => "background_pulse",
        }
    }
}

/// The looping waveform for one ambient effect
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Value each cycle starts from
    pub initial: f32,
    /// Keyframe legs cycled forever
    pub segments: Vec<Segment>,
}

impl Waveform {
    pub fn new(initial: f32, segments: Vec<Segment>) -> Self {
        Self { initial, segments }
    }

    /// Build a looping clock playing this waveform
    pub fn clock(&self) -> Clock {
        Clock::looping(self.initial, self.segments.clone())
    }

    pub(crate) fn validate(&self, effect: &str) -> Result<()> {
        if self.segments.is_empty() {
            return Err(ConfigError::EmptyWaveform {
                effect: effect.to_string(),
            });
        }
        for segment in &self.segments {
            if !(segment.duration_ms > 0.0) {
                return Err(ConfigError::NonPositiveSegment {
                    effect: effect.to_string(),
                    duration_ms: segment.duration_ms,
                });
            }
        }
        Ok(())
    }
}

/// Declarative waveform table, one entry per ambient kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmbientConfig {
    pub pulse: Waveform,
    pub rotate: Waveform,
    pub shake: Waveform,
    pub glow: Waveform,
    pub text_bounce: Waveform,
    pub text_glow: Waveform,
    pub background_pulse: Waveform,
}

impl AmbientConfig {
    pub fn waveform(&self, kind: AmbientKind) -> &Waveform {
        match kind {
            AmbientKind::Pulse => &self.pulse,
            AmbientKind::Rotate => &self.rotate,
            AmbientKind::Shake => &self.shake,
            AmbientKind::Glow => &self.glow,
            AmbientKind::TextBounce => &self.text_bounce,
            AmbientKind::TextGlow => &self.text_glow,
            AmbientKind::BackgroundPulse => &self.background_pulse,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for kind in AmbientKind::ALL {
            self.waveform(kind).validate(kind.name())?;
        }
        Ok(())
    }
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            // Badge scale 0.9 <-> 1.3 at 500ms legs
            pulse: Waveform::new(
                0.9,
                vec![
                    Segment::new(1.3, 500.0, Easing::EaseInOut),
                    Segment::new(0.9, 500.0, Easing::EaseInOut),
                ],
            ),
            // Full turn over 8s, sawtooth (each cycle restarts from 0)
            rotate: Waveform::new(0.0, vec![Segment::linear(1.0, 8_000.0)]),
            // -1 -> 1 -> 0 at 400ms legs
            shake: Waveform::new(
                0.0,
                vec![
                    Segment::new(-1.0, 400.0, Easing::EaseInOut),
                    Segment::new(1.0, 400.0, Easing::EaseInOut),
                    Segment::new(0.0, 400.0, Easing::EaseInOut),
                ],
            ),
            // Halo breathing at 1200ms legs
            glow: Waveform::new(
                1.0,
                vec![
                    Segment::new(1.15, 1_200.0, Easing::EaseInOut),
                    Segment::new(1.0, 1_200.0, Easing::EaseInOut),
                ],
            ),
            text_bounce: Waveform::new(
                0.0,
                vec![
                    Segment::new(-6.0, 350.0, Easing::EaseOut),
                    Segment::new(0.0, 350.0, Easing::EaseIn),
                ],
            ),
            text_glow: Waveform::new(
                0.6,
                vec![
                    Segment::new(1.0, 800.0, Easing::EaseInOut),
                    Segment::new(0.6, 800.0, Easing::EaseInOut),
                ],
            ),
            background_pulse: Waveform::new(
                1.0,
                vec![
                    Segment::new(1.05, 1_500.0, Easing::EaseInOut),
                    Segment::new(1.0, 1_500.0, Easing::EaseInOut),
                ],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        AmbientConfig::default().validate().unwrap();
    }

    #[test]
    fn test_one_waveform_per_kind() {
        let config = AmbientConfig::default();
        for kind in AmbientKind::ALL {
            assert!(!config.waveform(kind).segments.is_empty(), "{}", kind.name());
        }
    }

    #[test]
    fn test_pulse_oscillates_between_legs() {
        let config = AmbientConfig::default();
        let mut clock = config.pulse.clock();
        // Peak of the first leg
        let peak = clock.advance(0.0, 500.0);
        assert!((peak - 1.3).abs() < 1e-4);
        // Back to the trough after the second leg
        let trough = clock.advance(0.0, 500.0);
        assert!((trough - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_is_sawtooth() {
        let config = AmbientConfig::default();
        let mut clock = config.rotate.clock();
        assert!((clock.advance(0.0, 4_000.0) - 0.5).abs() < 1e-4);
        // 8s later: same place in the cycle
        assert!((clock.advance(0.0, 8_000.0) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_shake_returns_to_rest() {
        let config = AmbientConfig::default();
        let mut clock = config.shake.clock();
        let low = clock.advance(0.0, 400.0);
        assert!((low - -1.0).abs() < 1e-4);
        let high = clock.advance(0.0, 400.0);
        assert!((high - 1.0).abs() < 1e-4);
        let rest = clock.advance(0.0, 400.0);
        assert!(rest.abs() < 1e-4);
    }
}
