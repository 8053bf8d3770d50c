//! Render parameter composition
//!
//! Pure functions turning a clock output plus immutable entity params into
//! the transform the paint surface consumes. No painting happens here and no
//! state is held; the same inputs always compose the same frame values.

use crate::ambient::AmbientKind;
use crate::config::ChannelCurves;
use crate::particle::{ParticleParams, RayParams};

/// Per-entity values handed to the external render surface each frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    /// Horizontal offset in pixels
    pub translate_x: f32,
    /// Vertical offset in pixels
    pub translate_y: f32,
    /// 0 (invisible) to 1 (opaque)
    pub opacity: f32,
    /// Uniform scale multiplier
    pub scale: f32,
    /// Rotation in degrees
    pub rotation: f32,
}

impl RenderParams {
    pub const IDENTITY: RenderParams = RenderParams {
        translate_x: 0.0,
        translate_y: 0.0,
        opacity: 1.0,
        scale: 1.0,
        rotation: 0.0,
    };
}

impl Default for RenderParams {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Compose a particle's frame values from its one-shot progress
///
/// Each channel runs the shared curve tables: translation channels scale the
/// particle's target offsets, rotation scales the total sweep the particle
/// covers over its full duration, opacity and scale are read directly.
pub fn compose_particle(
    progress: f32,
    params: &ParticleParams,
    curves: &ChannelCurves,
) -> RenderParams {
    let total_rotation = params.rotation_speed * params.duration_ms / 1_000.0;
    RenderParams {
        translate_x: curves.translate_x.sample(progress) * params.target_dx,
        translate_y: curves.translate_y.sample(progress) * params.target_dy,
        opacity: curves.opacity.sample(progress),
        scale: curves.scale.sample(progress),
        rotation: curves.rotation.sample(progress) * total_rotation,
    }
}

/// Compose an ambient effect's frame values from its looping clock value
///
/// Each kind drives exactly one channel; the rest stay at identity. Shake and
/// text-bounce values are logical offsets the renderer scales to taste.
pub fn compose_ambient(kind: AmbientKind, value: f32) -> RenderParams {
    let mut out = RenderParams::IDENTITY;
    match kind {
        AmbientKind::Pulse | AmbientKind::Glow | AmbientKind::BackgroundPulse => {
            out.scale = value;
        }
        AmbientKind::Rotate => out.rotation = value * 360.0,
        AmbientKind::Shake => out.translate_x = value,
        AmbientKind::TextBounce => out.translate_y = value,
        AmbientKind::TextGlow => out.opacity = value,
    }
    out
}

/// Compose a ray's frame values from its looping rotation value
pub fn compose_ray(params: &RayParams, value: f32) -> RenderParams {
    RenderParams {
        rotation: params.base_angle_deg + params.phase_deg + value * 360.0,
        ..RenderParams::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Color, ParticleCategory};

    fn particle() -> ParticleParams {
        ParticleParams {
            category: ParticleCategory::Confetti,
            target_dx: 100.0,
            target_dy: -40.0,
            duration_ms: 2_000.0,
            delay_ms: 0.0,
            size: 8.0,
            color: Color::WHITE,
            rotation_speed: 90.0,
            axis_scale: None,
            shape: None,
        }
    }

    #[test]
    fn test_particle_composition_endpoints() {
        let curves = ChannelCurves::default();
        let p = particle();

        let start = compose_particle(0.0, &p, &curves);
        assert_eq!(start.translate_x, 0.0);
        assert_eq!(start.translate_y, 0.0);
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.rotation, 0.0);

        let end = compose_particle(1.0, &p, &curves);
        assert_eq!(end.translate_x, 100.0);
        assert_eq!(end.translate_y, -40.0);
        assert_eq!(end.opacity, 0.0);
        // Full sweep: 90 deg/s over 2s
        assert!((end.rotation - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_particle_composition_is_pure() {
        let curves = ChannelCurves::default();
        let p = particle();
        assert_eq!(
            compose_particle(0.37, &p, &curves),
            compose_particle(0.37, &p, &curves)
        );
    }

    #[test]
    fn test_ambient_channel_mapping() {
        let pulse = compose_ambient(AmbientKind::Pulse, 1.2);
        assert_eq!(pulse.scale, 1.2);
        assert_eq!(pulse.opacity, 1.0);

        let rotate = compose_ambient(AmbientKind::Rotate, 0.25);
        assert_eq!(rotate.rotation, 90.0);
        assert_eq!(rotate.scale, 1.0);

        let shake = compose_ambient(AmbientKind::Shake, -1.0);
        assert_eq!(shake.translate_x, -1.0);

        let glow = compose_ambient(AmbientKind::TextGlow, 0.8);
        assert_eq!(glow.opacity, 0.8);
    }

    #[test]
    fn test_ray_composition() {
        let ray = RayParams {
            base_angle_deg: 30.0,
            phase_deg: 15.0,
        };
        let out = compose_ray(&ray, 0.5);
        assert!((out.rotation - 225.0).abs() < 1e-4);
        assert_eq!(out.scale, 1.0);
        assert_eq!(out.opacity, 1.0);
    }
}
