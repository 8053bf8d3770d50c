//! Engine configuration
//!
//! Everything the overlay's look is made of lives here as plain data:
//! per-category counts and generation ranges, the ambient waveform table,
//! the channel curve tables, and the viewport. The engine only reads it, so
//! a skin can swap any of it without touching the scheduling code.
//! Validation is fail-fast at construction; nothing here is checked again at
//! tick time.

use serde::{Deserialize, Serialize};

use crate::ambient::AmbientConfig;
use crate::curve::Curve;
use crate::error::{ConfigError, Result};

// ============================================================================
// Primitive value types
// ============================================================================

/// An RGBA color with channels in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A `[min, max)` draw range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max - self.min
    }

    fn validate(&self, field: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFiniteRange {
                field: field.to_string(),
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field: field.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Visible viewport dimensions in pixels
///
/// Trajectory offsets are configured as fractions of these dimensions. A zero
/// dimension is degenerate but valid: offsets collapse to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Confetti piece silhouettes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Rect,
    Circle,
    Triangle,
    Ribbon,
}

// ============================================================================
// Particle categories
// ============================================================================

/// The five randomized particle families of the celebration overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleCategory {
    Sparkle,
    Confetti,
    Heart,
    Star,
    InnerFlame,
}

impl ParticleCategory {
    pub const ALL: [ParticleCategory; 5] = [
        ParticleCategory::Sparkle,
        ParticleCategory::Confetti,
        ParticleCategory::Heart,
        ParticleCategory::Star,
        ParticleCategory::InnerFlame,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParticleCategory::Sparkle => "sparkle",
            ParticleCategory::Confetti => "confetti",
            ParticleCategory::Heart => "heart",
            ParticleCategory::Star => "star",
            ParticleCategory::InnerFlame => "inner_flame",
        }
    }
}

/// Counts and generation ranges for one particle category
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Particles generated per activation
    pub count: usize,
    /// Target horizontal offset as a fraction of viewport width
    pub offset_x: Range,
    /// Target vertical offset as a fraction of viewport height
    pub offset_y: Range,
    pub duration_ms: Range,
    pub delay_ms: Range,
    /// Base size in pixels
    pub size: Range,
    /// Rotation speed in degrees per second (sign picks direction)
    pub rotation_speed: Range,
    /// Optional per-axis scale factor ranges (x, y)
    pub axis_scale: Option<(Range, Range)>,
    pub palette: Vec<Color>,
    /// Silhouette set; empty means the category has a fixed glyph
    pub shapes: Vec<Shape>,
}

impl CategoryConfig {
    fn validate(&self, category: ParticleCategory) -> Result<()> {
        let name = category.name();
        self.offset_x.validate(&format!("{name}.offset_x"))?;
        self.offset_y.validate(&format!("{name}.offset_y"))?;
        self.duration_ms.validate(&format!("{name}.duration_ms"))?;
        self.delay_ms.validate(&format!("{name}.delay_ms"))?;
        self.size.validate(&format!("{name}.size"))?;
        self.rotation_speed
            .validate(&format!("{name}.rotation_speed"))?;
        if let Some((sx, sy)) = &self.axis_scale {
            sx.validate(&format!("{name}.axis_scale.x"))?;
            sy.validate(&format!("{name}.axis_scale.y"))?;
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette {
                category: name.to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Ray decorations
// ============================================================================

/// The fixed ray decoration fan behind the badge
///
/// Count is fixed per session (not randomized); only each ray's rotation
/// phase is drawn from the randomness source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RayConfig {
    pub count: usize,
    /// One full turn takes this long
    pub rotation_period_ms: f32,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self {
            count: 12,
            rotation_period_ms: 8_000.0,
        }
    }
}

// ============================================================================
// Channel curve tables
// ============================================================================

/// Per-channel breakpoint tables mapping one-shot progress to render values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelCurves {
    /// Fraction of the target horizontal offset reached at a given progress
    pub translate_x: Curve,
    /// Fraction of the target vertical offset reached at a given progress
    pub translate_y: Curve,
    pub opacity: Curve,
    pub scale: Curve,
    /// Fraction of the total rotation reached at a given progress
    pub rotation: Curve,
}

impl Default for ChannelCurves {
    fn default() -> Self {
        Self {
            translate_x: Curve::linear(0.0, 1.0),
            translate_y: Curve::linear(0.0, 1.0),
            opacity: table(&[(0.0, 0.0), (0.1, 1.0), (0.9, 1.0), (1.0, 0.0)]),
            scale: table(&[(0.0, 0.0), (0.2, 1.5), (0.8, 1.2), (1.0, 0.3)]),
            rotation: Curve::linear(0.0, 1.0),
        }
    }
}

fn table(pairs: &[(f32, f32)]) -> Curve {
    Curve::from_pairs(pairs).expect("built-in curve tables are valid")
}

// ============================================================================
// Engine configuration root
// ============================================================================

/// Full configuration surface supplied at engine construction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub viewport: Viewport,
    pub sparkle: CategoryConfig,
    pub confetti: CategoryConfig,
    pub heart: CategoryConfig,
    pub star: CategoryConfig,
    pub inner_flame: CategoryConfig,
    pub rays: RayConfig,
    pub ambient: AmbientConfig,
    pub curves: ChannelCurves,
}

impl EngineConfig {
    /// Reference configuration at the given viewport
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn category(&self, category: ParticleCategory) -> &CategoryConfig {
        match category {
            ParticleCategory::Sparkle => &self.sparkle,
            ParticleCategory::Confetti => &self.confetti,
            ParticleCategory::Heart => &self.heart,
            ParticleCategory::Star => &self.star,
            ParticleCategory::InnerFlame => &self.inner_flame,
        }
    }

    /// Sum of configured particle counts across all categories
    pub fn total_particle_count(&self) -> usize {
        ParticleCategory::ALL
            .iter()
            .map(|c| self.category(*c).count)
            .sum()
    }

    /// Validate every range, palette, waveform, and curve table
    pub fn validate(&self) -> Result<()> {
        for category in ParticleCategory::ALL {
            self.category(category).validate(category)?;
        }
        self.ambient.validate()?;
        // Channel curves were validated at construction; re-building them
        // here catches tables deserialized from untrusted data.
        for curve in [
            &self.curves.translate_x,
            &self.curves.translate_y,
            &self.curves.opacity,
            &self.curves.scale,
            &self.curves.rotation,
        ] {
            Curve::new(curve.breakpoints().to_vec())?;
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(390.0, 844.0),
            sparkle: CategoryConfig {
                count: 35,
                offset_x: Range::new(-0.45, 0.45),
                offset_y: Range::new(-0.45, 0.45),
                duration_ms: Range::new(600.0, 1_800.0),
                delay_ms: Range::new(0.0, 900.0),
                size: Range::new(4.0, 10.0),
                rotation_speed: Range::new(-180.0, 180.0),
                axis_scale: None,
                palette: vec![
                    Color::rgb(1.0, 1.0, 1.0),
                    Color::rgb(1.0, 0.95, 0.7),
                    Color::rgb(1.0, 0.85, 0.4),
                ],
                shapes: vec![],
            },
            confetti: CategoryConfig {
                count: 40,
                offset_x: Range::new(-0.5, 0.5),
                offset_y: Range::new(0.2, 0.9),
                duration_ms: Range::new(2_500.0, 6_000.0),
                delay_ms: Range::new(0.0, 1_200.0),
                size: Range::new(6.0, 12.0),
                rotation_speed: Range::new(-360.0, 360.0),
                axis_scale: Some((Range::new(0.6, 1.0), Range::new(0.3, 0.8))),
                palette: vec![
                    Color::rgb(0.95, 0.3, 0.3),
                    Color::rgb(0.3, 0.65, 0.95),
                    Color::rgb(0.35, 0.85, 0.45),
                    Color::rgb(1.0, 0.8, 0.25),
                    Color::rgb(0.75, 0.4, 0.9),
                ],
                shapes: vec![Shape::Rect, Shape::Circle, Shape::Triangle, Shape::Ribbon],
            },
            heart: CategoryConfig {
                count: 15,
                offset_x: Range::new(-0.4, 0.4),
                offset_y: Range::new(-0.7, -0.25),
                duration_ms: Range::new(1_800.0, 3_600.0),
                delay_ms: Range::new(0.0, 1_000.0),
                size: Range::new(10.0, 18.0),
                rotation_speed: Range::new(-45.0, 45.0),
                axis_scale: None,
                palette: vec![
                    Color::rgb(0.95, 0.35, 0.5),
                    Color::rgb(0.9, 0.2, 0.35),
                    Color::rgb(1.0, 0.55, 0.65),
                ],
                shapes: vec![],
            },
            star: CategoryConfig {
                count: 20,
                offset_x: Range::new(-0.45, 0.45),
                offset_y: Range::new(-0.6, 0.3),
                duration_ms: Range::new(1_200.0, 3_000.0),
                delay_ms: Range::new(0.0, 1_100.0),
                size: Range::new(8.0, 16.0),
                rotation_speed: Range::new(-270.0, 270.0),
                axis_scale: None,
                palette: vec![
                    Color::rgb(1.0, 0.85, 0.3),
                    Color::rgb(1.0, 0.75, 0.1),
                    Color::rgb(1.0, 0.95, 0.6),
                ],
                shapes: vec![],
            },
            inner_flame: CategoryConfig {
                count: 25,
                offset_x: Range::new(-0.12, 0.12),
                offset_y: Range::new(-0.35, -0.05),
                duration_ms: Range::new(600.0, 1_400.0),
                delay_ms: Range::new(0.0, 600.0),
                size: Range::new(6.0, 14.0),
                rotation_speed: Range::new(-30.0, 30.0),
                axis_scale: None,
                palette: vec![
                    Color::rgb(1.0, 0.6, 0.15),
                    Color::rgb(1.0, 0.45, 0.1),
                    Color::rgb(1.0, 0.8, 0.3),
                ],
                shapes: vec![],
            },
            rays: RayConfig::default(),
            ambient: AmbientConfig::default(),
            curves: ChannelCurves::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_counts() {
        let config = EngineConfig::default();
        assert_eq!(config.sparkle.count, 35);
        assert_eq!(config.confetti.count, 40);
        assert_eq!(config.heart.count, 15);
        assert_eq!(config.star.count, 20);
        assert_eq!(config.inner_flame.count, 25);
        assert_eq!(config.total_particle_count(), 135);
        assert_eq!(config.rays.count, 12);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = EngineConfig::default();
        config.star.size = Range::new(10.0, 4.0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { .. }));
    }

    #[test]
    fn test_empty_palette_rejected() {
        let mut config = EngineConfig::default();
        config.heart.palette.clear();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyPalette {
                category: "heart".to_string()
            }
        );
    }

    #[test]
    fn test_empty_waveform_rejected() {
        let mut config = EngineConfig::default();
        config.ambient.glow.segments.clear();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyWaveform { .. }));
    }

    #[test]
    fn test_zero_segment_duration_rejected() {
        let mut config = EngineConfig::default();
        config.ambient.pulse.segments[0].duration_ms = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveSegment { .. }));
    }

    #[test]
    fn test_zero_width_range_is_valid() {
        let mut config = EngineConfig::default();
        config.sparkle.size = Range::new(5.0, 5.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
