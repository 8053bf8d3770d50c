//! Ovation Animation Engine
//!
//! Headless choreography engine for the streak celebration overlay: it
//! generates randomized, independently timed particle timelines, drives them
//! together with a set of perpetually looping ambient effects from one
//! tick-driven time source, and computes per-entity render parameters for an
//! external paint surface.
//!
//! # Features
//!
//! - **One-shot clocks**: delay, linear ramp, permanent hold at 1
//! - **Looping clocks**: eased keyframe-segment cycles, replayed forever
//! - **Bounded randomized generation**: uniform draws behind an injected
//!   randomness source, bit-identical under a seeded source
//! - **Piecewise-linear channel curves**: one pure interpolation reused for
//!   translate, opacity, scale, and rotation
//! - **Session lifecycle**: activate/deactivate with total, immediate
//!   teardown; no clock outlives its session
//!
//! # Example
//!
//! ```
//! use ovation_engine::{EngineConfig, OverlayEngine};
//!
//! let mut engine = OverlayEngine::new(EngineConfig::default()).unwrap();
//! engine.activate(7);
//! let frame = engine.tick(0.0);
//! assert_eq!(frame.len(), engine.session().unwrap().entity_count());
//! engine.deactivate();
//! assert_eq!(engine.clock_count(), 0);
//! ```

pub mod ambient;
pub mod clock;
pub mod config;
pub mod curve;
pub mod easing;
pub mod engine;
pub mod error;
pub mod particle;
pub mod render;
pub mod rng;
pub mod scheduler;

pub use ambient::{AmbientConfig, AmbientKind, Waveform};
pub use clock::{Clock, LoopingClock, OneShotClock, Segment};
pub use config::{
    CategoryConfig, ChannelCurves, Color, EngineConfig, ParticleCategory, Range, RayConfig, Shape,
    Viewport,
};
pub use curve::{Breakpoint, Curve};
pub use easing::Easing;
pub use engine::{EntityId, EntityKind, Frame, OverlayEngine, OverlayState, Session};
pub use error::{ConfigError, Result};
pub use particle::{generate, generate_rays, ParticleParams, RayParams};
pub use render::{compose_ambient, compose_particle, compose_ray, RenderParams};
pub use rng::{EntropySource, RandomSource, RandomSourceExt, SeededSource, SequenceSource};
pub use scheduler::{ClockId, Scheduler};
