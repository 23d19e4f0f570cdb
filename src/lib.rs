//! Rubble Collision – frame-based 2D collision detection and response.
//!
//! Every frame the engine gathers collidable entities, buckets them into a
//! uniform spatial grid, tests candidate pairs with axis-aligned bounding
//! boxes, classifies each contact into a gameplay event, fans the event out
//! to collaborators (damage, particles, audio, camera, springs) and applies
//! the built-in response. Checks are capped per frame by a performance
//! governor so dense scenes degrade instead of stalling.
//!
//! Coordinates are screen-space: +y points down, so an AABB's top is its
//! minimum y.

pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::{
    collaborators::{
        AudioCue, CameraShake, CollaboratorResult, Collaborators, DamageQueue, NoopCollaborator,
        ParticleEffect, ParticleSpawner, RecordingCollaborator, SpringActuator,
    },
    events::{CollisionEvent, CollisionEventKind, EventClassifier},
    filter::{CollisionFilter, CollisionMatrix, LayerFilter},
    governor::FrameMetrics,
    resolver::Resolution,
};
pub use config::CollisionConfig;
pub use crate::core::{
    body::{CollidableBody, CollisionDescriptor, CollisionType, TileMaterial},
    state::{ActorState, BallPhase, LifeState, MotionState, PlayerState},
    types::Aabb,
};
pub use error::{CollaboratorError, ConfigError};
pub use utils::allocator::{Arena, EntityId};
pub use world::{CollisionManager, Entity, EntityBuilder, EntityRecord, EntitySource, EntityWorld};

/// High-level convenience wrapper that owns an [`EntityWorld`] and the
/// [`CollisionManager`] that runs over it.
pub struct CollisionEngine {
    world: EntityWorld,
    manager: CollisionManager,
}

impl Default for CollisionEngine {
    fn default() -> Self {
        Self {
            world: EntityWorld::new(),
            manager: CollisionManager::default(),
        }
    }
}

impl CollisionEngine {
    /// Creates an engine from a validated configuration.
    pub fn new(config: CollisionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            world: EntityWorld::new(),
            manager: CollisionManager::new(config)?,
        })
    }

    /// Replaces the no-op collaborators with the given set.
    pub fn with_collaborators(mut self, collaborators: Collaborators) -> Self {
        self.manager.set_collaborators(collaborators);
        self
    }

    /// Adds an entity to the world and returns its [`EntityId`].
    pub fn spawn(&mut self, builder: EntityBuilder) -> EntityId {
        self.world.spawn(builder)
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.world.despawn(id)
    }

    pub fn world(&self) -> &EntityWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut EntityWorld {
        &mut self.world
    }

    pub fn manager(&self) -> &CollisionManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut CollisionManager {
        &mut self.manager
    }

    /// Runs one collision pass at `timestamp` (seconds).
    pub fn step(&mut self, timestamp: f64) -> FrameMetrics {
        self.manager.step(&mut self.world, timestamp)
    }

    /// Events from the most recent pass.
    pub fn events(&self) -> &[CollisionEvent] {
        self.manager.events()
    }

    pub fn metrics(&self) -> FrameMetrics {
        self.manager.metrics()
    }

    /// Changes the per-frame check ceiling; takes effect on the next step.
    pub fn set_check_budget(&mut self, ceiling: usize) {
        self.manager.set_check_budget(ceiling);
    }

    /// Velocity of an entity, if it exists.
    pub fn velocity(&self, id: EntityId) -> Option<Vec2> {
        self.world.motion(id).map(|motion| motion.velocity)
    }
}
