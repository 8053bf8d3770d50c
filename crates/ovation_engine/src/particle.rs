//! Particle parameter generation
//!
//! Draws immutable, randomized-but-bounded parameter sets for every particle
//! category, plus the fixed ray decoration fan. Generation is synchronous,
//! side-effect-free apart from consuming the injected randomness source, and
//! bit-identical for an identical source sequence.

use crate::config::{CategoryConfig, Color, ParticleCategory, RayConfig, Shape, Viewport};
use crate::rng::{RandomSource, RandomSourceExt};

/// Immutable parameters of one generated particle
///
/// Never mutated after generation; a fresh activation always produces
/// entirely new instances.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleParams {
    pub category: ParticleCategory,
    /// Target horizontal travel in pixels at progress 1
    pub target_dx: f32,
    /// Target vertical travel in pixels at progress 1
    pub target_dy: f32,
    pub duration_ms: f32,
    pub delay_ms: f32,
    /// Base size in pixels
    pub size: f32,
    pub color: Color,
    /// Degrees per second; sign picks direction
    pub rotation_speed: f32,
    /// Optional per-axis scale factors (x, y)
    pub axis_scale: Option<(f32, f32)>,
    pub shape: Option<Shape>,
}

/// Immutable parameters of one ray decoration
///
/// The fan's count is fixed by configuration; only the rotation phase is
/// randomized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayParams {
    /// Resting angle of this ray within the fan, degrees
    pub base_angle_deg: f32,
    /// Random rotation phase offset, degrees in `[0, 360)`
    pub phase_deg: f32,
}

/// Generate exactly `config.count` particles for a category
///
/// Every scalar field is a uniform draw from its `[min, max)` range; color
/// and shape are uniform picks from their sets. Zero-width ranges and a zero
/// viewport produce valid degenerate output and never panic.
pub fn generate(
    category: ParticleCategory,
    config: &CategoryConfig,
    viewport: Viewport,
    rng: &mut dyn RandomSource,
) -> Vec<ParticleParams> {
    let mut particles = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        // Draw order is part of the determinism contract: changing it
        // changes output for a given source sequence.
        let target_dx = rng.range(config.offset_x.min, config.offset_x.max) * viewport.width;
        let target_dy = rng.range(config.offset_y.min, config.offset_y.max) * viewport.height;
        let duration_ms = rng.range(config.duration_ms.min, config.duration_ms.max);
        let delay_ms = rng.range(config.delay_ms.min, config.delay_ms.max);
        let size = rng.range(config.size.min, config.size.max);
        let color = rng
            .pick(&config.palette)
            .copied()
            .unwrap_or(Color::WHITE);
        let rotation_speed = rng.range(config.rotation_speed.min, config.rotation_speed.max);
        let axis_scale = config
            .axis_scale
            .as_ref()
            .map(|(sx, sy)| (rng.range(sx.min, sx.max), rng.range(sy.min, sy.max)));
        let shape = rng.pick(&config.shapes).copied();

        particles.push(ParticleParams {
            category,
            target_dx,
            target_dy,
            duration_ms,
            delay_ms,
            size,
            color,
            rotation_speed,
            axis_scale,
            shape,
        });
    }
    particles
}

/// Generate the fixed ray fan: evenly spaced base angles, random phases
pub fn generate_rays(config: &RayConfig, rng: &mut dyn RandomSource) -> Vec<RayParams> {
    let step = if config.count == 0 {
        0.0
    } else {
        360.0 / config.count as f32
    };
    (0..config.count)
        .map(|i| RayParams {
            base_angle_deg: step * i as f32,
            phase_deg: rng.range(0.0, 360.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::rng::SeededSource;

    #[test]
    fn test_count_invariant() {
        let config = EngineConfig::default();
        let mut rng = SeededSource::new(1);
        for category in ParticleCategory::ALL {
            let generated = generate(category, config.category(category), config.viewport, &mut rng);
            assert_eq!(generated.len(), config.category(category).count);
        }
    }

    #[test]
    fn test_determinism() {
        let config = EngineConfig::default();
        let mut a = SeededSource::new(99);
        let mut b = SeededSource::new(99);
        let first = generate(
            ParticleCategory::Confetti,
            &config.confetti,
            config.viewport,
            &mut a,
        );
        let second = generate(
            ParticleCategory::Confetti,
            &config.confetti,
            config.viewport,
            &mut b,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_fields_within_ranges() {
        let config = EngineConfig::default();
        let mut rng = SeededSource::new(3);
        let cat = &config.star;
        for p in generate(ParticleCategory::Star, cat, config.viewport, &mut rng) {
            assert!(p.duration_ms >= cat.duration_ms.min && p.duration_ms < cat.duration_ms.max);
            assert!(p.delay_ms >= cat.delay_ms.min && p.delay_ms < cat.delay_ms.max);
            assert!(p.size >= cat.size.min && p.size < cat.size.max);
            assert!(cat.palette.contains(&p.color));
            assert!(p.shape.is_none());
            let dx_frac = p.target_dx / config.viewport.width;
            assert!(dx_frac >= cat.offset_x.min && dx_frac < cat.offset_x.max + 1e-4);
        }
    }

    #[test]
    fn test_confetti_carries_shape_and_axis_scale() {
        let config = EngineConfig::default();
        let mut rng = SeededSource::new(4);
        for p in generate(
            ParticleCategory::Confetti,
            &config.confetti,
            config.viewport,
            &mut rng,
        ) {
            assert!(p.shape.is_some());
            let (sx, sy) = p.axis_scale.expect("confetti has per-axis scale");
            assert!((0.6..1.0).contains(&sx));
            assert!((0.3..0.8).contains(&sy));
        }
    }

    #[test]
    fn test_zero_viewport_degenerates_to_zero_offsets() {
        let config = EngineConfig::default();
        let mut rng = SeededSource::new(5);
        let generated = generate(
            ParticleCategory::Sparkle,
            &config.sparkle,
            Viewport::new(0.0, 0.0),
            &mut rng,
        );
        assert_eq!(generated.len(), 35);
        for p in generated {
            assert_eq!(p.target_dx, 0.0);
            assert_eq!(p.target_dy, 0.0);
        }
    }

    #[test]
    fn test_zero_width_ranges_are_valid() {
        let config = EngineConfig::default();
        let mut cat = config.sparkle.clone();
        cat.size = crate::config::Range::new(7.0, 7.0);
        cat.delay_ms = crate::config::Range::new(0.0, 0.0);
        let mut rng = SeededSource::new(6);
        for p in generate(ParticleCategory::Sparkle, &cat, config.viewport, &mut rng) {
            assert_eq!(p.size, 7.0);
            assert_eq!(p.delay_ms, 0.0);
        }
    }

    #[test]
    fn test_ray_fan() {
        let config = RayConfig::default();
        let mut rng = SeededSource::new(7);
        let rays = generate_rays(&config, &mut rng);
        assert_eq!(rays.len(), 12);
        assert_eq!(rays[0].base_angle_deg, 0.0);
        assert!((rays[1].base_angle_deg - 30.0).abs() < 1e-6);
        assert!((rays[11].base_angle_deg - 330.0).abs() < 1e-6);
        for ray in &rays {
            assert!((0.0..360.0).contains(&ray.phase_deg));
        }
    }

    #[test]
    fn test_ray_phases_deterministic() {
        let config = RayConfig::default();
        let a = generate_rays(&config, &mut SeededSource::new(8));
        let b = generate_rays(&config, &mut SeededSource::new(8));
        assert_eq!(a, b);
    }
}
