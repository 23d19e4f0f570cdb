//! Per-frame collision pipeline: grid broad-phase, AABB narrow-phase, event
//! classification, collaborator dispatch and the built-in resolver.

pub mod broadphase;
pub mod collaborators;
pub mod dispatch;
pub mod events;
pub mod filter;
pub mod governor;
pub mod grid;
pub mod narrowphase;
pub mod resolver;

pub use broadphase::{BroadPhase, CandidatePair};
pub use collaborators::{
    AudioCue, CameraShake, CollaboratorCall, CollaboratorResult, Collaborators, DamageQueue,
    NoopCollaborator, ParticleEffect, ParticleSpawner, RecordingCollaborator, SpringActuator,
};
pub use dispatch::EventDispatcher;
pub use events::{
    ClassificationRule, CollisionEvent, CollisionEventKind, EventClassifier, DEFAULT_RULES,
};
pub use filter::{CollisionFilter, CollisionMatrix, LayerFilter};
pub use governor::{FrameMetrics, PerformanceGovernor};
pub use grid::SpatialGrid;
pub use narrowphase::NarrowPhase;
pub use resolver::{DamageRequest, LandingEvent, Resolution, Resolver};
