//! Overlay engine and session lifecycle
//!
//! The aggregate root tying generation and scheduling together. An engine is
//! either `Hidden` or `Active`; `activate` builds a fresh session (tearing
//! down any prior one first, clocks disposed before anything new is
//! generated), `deactivate` disposes every clock and drops the entity arena
//! wholesale, and `tick` turns the session's clock outputs into a frame of
//! render parameters.
//!
//! Re-activating while active deliberately discards the in-flight session
//! rather than blending or queueing: the overlay is a modal popup, and a new
//! streak replaces the old celebration outright.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::ambient::AmbientKind;
use crate::clock::{Clock, Segment};
use crate::config::{EngineConfig, ParticleCategory};
use crate::error::Result;
use crate::particle::{self, ParticleParams, RayParams};
use crate::render::{self, RenderParams};
use crate::rng::{EntropySource, RandomSource};
use crate::scheduler::{ClockId, Scheduler};

new_key_type! {
    /// Handle to one animated entity within a session
    pub struct EntityId;
}

/// What an entity is, for the paint surface's benefit
#[derive(Clone, Debug)]
pub enum EntityKind {
    Particle(ParticleParams),
    Ray(RayParams),
    Ambient(AmbientKind),
}

struct Entity {
    kind: EntityKind,
    clock: ClockId,
}

/// Engine lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    Hidden,
    Active,
}

/// The entities and clocks created by one activation, torn down as a unit
pub struct Session {
    streak_count: i64,
    entities: SlotMap<EntityId, Entity>,
}

impl Session {
    /// Opaque display data passed to `activate`; never validated
    pub fn streak_count(&self) -> i64 {
        self.streak_count
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Immutable kind/params of one entity, for the paint surface
    pub fn entity(&self, id: EntityId) -> Option<&EntityKind> {
        self.entities.get(id).map(|e| &e.kind)
    }

    /// Iterate entity ids and kinds
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &EntityKind)> {
        self.entities.iter().map(|(id, e)| (id, &e.kind))
    }
}

/// A frame of computed values, one entry per live entity
pub type Frame = FxHashMap<EntityId, RenderParams>;

/// The celebration overlay's animation choreography engine
///
/// Owns the scheduler, the randomness source, and at most one current
/// session. Single-threaded and tick-driven: the external render loop calls
/// [`OverlayEngine::tick`] once per frame with the current timestamp.
pub struct OverlayEngine {
    config: EngineConfig,
    scheduler: Scheduler,
    rng: Box<dyn RandomSource>,
    session: Option<Session>,
}

impl OverlayEngine {
    /// Create an engine with an entropy-backed randomness source
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_source(config, Box::new(EntropySource::new()))
    }

    /// Create an engine with an injected randomness source
    ///
    /// Tests inject a seeded source to make generation bit-identical.
    pub fn with_source(config: EngineConfig, rng: Box<dyn RandomSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scheduler: Scheduler::new(),
            rng,
            session: None,
        })
    }

    /// Begin a session, replacing any in-flight one
    ///
    /// Teardown happens first: every clock of the prior session is disposed
    /// before generation, so the active-clock count never accumulates across
    /// re-activations. Generation is synchronous; the new clocks start
    /// advancing on the next tick.
    pub fn activate(&mut self, streak_count: i64) {
        if let Some(prior) = self.session.take() {
            tracing::debug!(
                discarded_entities = prior.entity_count(),
                "discarding in-flight session"
            );
            self.scheduler.unregister_all();
        }

        let mut entities = SlotMap::with_key();

        for category in ParticleCategory::ALL {
            let generated = particle::generate(
                category,
                self.config.category(category),
                self.config.viewport,
                self.rng.as_mut(),
            );
            for params in generated {
                let clock = self
                    .scheduler
                    .register(Clock::one_shot(params.delay_ms, params.duration_ms));
                entities.insert(Entity {
                    kind: EntityKind::Particle(params),
                    clock,
                });
            }
        }

        for ray in particle::generate_rays(&self.config.rays, self.rng.as_mut()) {
            let clock = self.scheduler.register(Clock::looping(
                0.0,
                vec![Segment::linear(
                    1.0,
                    self.config.rays.rotation_period_ms.max(1.0),
                )],
            ));
            entities.insert(Entity {
                kind: EntityKind::Ray(ray),
                clock,
            });
        }

        for kind in AmbientKind::ALL {
            let clock = self
                .scheduler
                .register(self.config.ambient.waveform(kind).clock());
            entities.insert(Entity {
                kind: EntityKind::Ambient(kind),
                clock,
            });
        }

        tracing::debug!(
            streak_count,
            entities = entities.len(),
            clocks = self.scheduler.clock_count(),
            "celebration session activated"
        );
        self.session = Some(Session {
            streak_count,
            entities,
        });
    }

    /// End the current session synchronously
    ///
    /// Every clock is disposed and the entity arena dropped wholesale; no
    /// entity from the session can produce another value even if `tick` is
    /// called again before the next `activate`.
    pub fn deactivate(&mut self) {
        if let Some(session) = self.session.take() {
            self.scheduler.unregister_all();
            tracing::debug!(
                streak_count = session.streak_count,
                entities = session.entity_count(),
                "celebration session deactivated"
            );
        }
    }

    /// Advance every clock to `now_ms` and compose the frame
    ///
    /// Returns an empty frame while hidden. Per-entity values depend only on
    /// elapsed time and that entity's immutable params, never on tick order.
    pub fn tick(&mut self, now_ms: f64) -> Frame {
        self.scheduler.tick(now_ms);
        let Some(session) = &self.session else {
            return Frame::default();
        };

        let mut frame =
            Frame::with_capacity_and_hasher(session.entities.len(), Default::default());
        for (id, entity) in &session.entities {
            let Some(output) = self.scheduler.output(entity.clock) else {
                continue;
            };
            let params = match &entity.kind {
                EntityKind::Particle(p) => render::compose_particle(output, p, &self.config.curves),
                EntityKind::Ray(r) => render::compose_ray(r, output),
                EntityKind::Ambient(k) => render::compose_ambient(*k, output),
            };
            frame.insert(id, params);
        }
        frame
    }

    pub fn state(&self) -> OverlayState {
        if self.session.is_some() {
            OverlayState::Active
        } else {
            OverlayState::Hidden
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, if active
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Number of clocks currently registered (0 while hidden)
    pub fn clock_count(&self) -> usize {
        self.scheduler.clock_count()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
