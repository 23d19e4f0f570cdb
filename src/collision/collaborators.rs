//! Capability traits for the systems that react to collision events.
//!
//! Every call is synchronous and fire-and-forget: the caller only looks at the
//! `Result` to log and count failures.

use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{core::body::TileMaterial, error::CollaboratorError, utils::allocator::EntityId};

pub type CollaboratorResult = Result<(), CollaboratorError>;

/// Visual effect families the particle system knows how to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleEffect {
    Debris,
    Spark,
    Dust,
    Burst,
}

pub trait DamageQueue: Send + Sync {
    fn queue_damage(&self, target: EntityId, amount: u32, source: EntityId) -> CollaboratorResult;
}

pub trait ParticleSpawner: Send + Sync {
    fn spawn_at(&self, effect: ParticleEffect, position: Vec2, count: Option<u32>)
        -> CollaboratorResult;
}

pub trait AudioCue: Send + Sync {
    fn play(&self, cue: &str, position: Option<Vec2>) -> CollaboratorResult;

    /// Destruction sound for a tile material. Backends with dedicated
    /// destruction banks override this; the rest fall back to a named cue.
    fn play_destruction(&self, material: TileMaterial, position: Vec2) -> CollaboratorResult {
        self.play(material.destruction_cue(), Some(position))
    }
}

pub trait CameraShake: Send + Sync {
    fn trigger(&self, position: Vec2, incident_velocity: Vec2) -> CollaboratorResult;
}

/// Spring physics lives outside the collision core; this hands it the activation.
pub trait SpringActuator: Send + Sync {
    fn activate(&self, spring: EntityId, target: EntityId, normal: Vec2) -> CollaboratorResult;
}

/// Backend that accepts and ignores every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCollaborator;

impl DamageQueue for NoopCollaborator {
    fn queue_damage(
        &self,
        _target: EntityId,
        _amount: u32,
        _source: EntityId,
    ) -> CollaboratorResult {
        Ok(())
    }
}

impl ParticleSpawner for NoopCollaborator {
    fn spawn_at(
        &self,
        _effect: ParticleEffect,
        _position: Vec2,
        _count: Option<u32>,
    ) -> CollaboratorResult {
        Ok(())
    }
}

impl AudioCue for NoopCollaborator {
    fn play(&self, _cue: &str, _position: Option<Vec2>) -> CollaboratorResult {
        Ok(())
    }
}

impl CameraShake for NoopCollaborator {
    fn trigger(&self, _position: Vec2, _incident_velocity: Vec2) -> CollaboratorResult {
        Ok(())
    }
}

impl SpringActuator for NoopCollaborator {
    fn activate(&self, _spring: EntityId, _target: EntityId, _normal: Vec2) -> CollaboratorResult {
        Ok(())
    }
}

/// One recorded collaborator invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum CollaboratorCall {
    Damage {
        target: EntityId,
        amount: u32,
        source: EntityId,
    },
    Particles {
        effect: ParticleEffect,
        position: Vec2,
        count: Option<u32>,
    },
    Audio {
        cue: String,
        position: Option<Vec2>,
    },
    Shake {
        position: Vec2,
        incident_velocity: Vec2,
    },
    Spring {
        spring: EntityId,
        target: EntityId,
        normal: Vec2,
    },
}

/// Backend that records every call. Clones share the same log, so one handle
/// can be installed in every slot of [`Collaborators`] and inspected later.
#[derive(Debug, Default, Clone)]
pub struct RecordingCollaborator {
    calls: Arc<Mutex<Vec<CollaboratorCall>>>,
}

impl RecordingCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: CollaboratorCall) -> CollaboratorResult {
        self.calls.lock().push(call);
        Ok(())
    }

    pub fn calls(&self) -> Vec<CollaboratorCall> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn damage_requests(&self) -> Vec<(EntityId, u32, EntityId)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                CollaboratorCall::Damage {
                    target,
                    amount,
                    source,
                } => Some((*target, *amount, *source)),
                _ => None,
            })
            .collect()
    }

    pub fn audio_cues(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                CollaboratorCall::Audio { cue, .. } => Some(cue.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&CollaboratorCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }
}

impl DamageQueue for RecordingCollaborator {
    fn queue_damage(&self, target: EntityId, amount: u32, source: EntityId) -> CollaboratorResult {
        self.record(CollaboratorCall::Damage {
            target,
            amount,
            source,
        })
    }
}

impl ParticleSpawner for RecordingCollaborator {
    fn spawn_at(
        &self,
        effect: ParticleEffect,
        position: Vec2,
        count: Option<u32>,
    ) -> CollaboratorResult {
        self.record(CollaboratorCall::Particles {
            effect,
            position,
            count,
        })
    }
}

impl AudioCue for RecordingCollaborator {
    fn play(&self, cue: &str, position: Option<Vec2>) -> CollaboratorResult {
        self.record(CollaboratorCall::Audio {
            cue: cue.to_string(),
            position,
        })
    }
}

impl CameraShake for RecordingCollaborator {
    fn trigger(&self, position: Vec2, incident_velocity: Vec2) -> CollaboratorResult {
        self.record(CollaboratorCall::Shake {
            position,
            incident_velocity,
        })
    }
}

impl SpringActuator for RecordingCollaborator {
    fn activate(&self, spring: EntityId, target: EntityId, normal: Vec2) -> CollaboratorResult {
        self.record(CollaboratorCall::Spring {
            spring,
            target,
            normal,
        })
    }
}

/// The full set of collaborators notified during dispatch.
pub struct Collaborators {
    pub damage: Box<dyn DamageQueue>,
    pub particles: Box<dyn ParticleSpawner>,
    pub audio: Box<dyn AudioCue>,
    pub camera: Box<dyn CameraShake>,
    pub springs: Box<dyn SpringActuator>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            damage: Box::new(NoopCollaborator),
            particles: Box::new(NoopCollaborator),
            audio: Box::new(NoopCollaborator),
            camera: Box::new(NoopCollaborator),
            springs: Box::new(NoopCollaborator),
        }
    }
}

impl Collaborators {
    /// Installs the same recorder in every slot.
    pub fn recording(recorder: &RecordingCollaborator) -> Self {
        Self {
            damage: Box::new(recorder.clone()),
            particles: Box::new(recorder.clone()),
            audio: Box::new(recorder.clone()),
            camera: Box::new(recorder.clone()),
            springs: Box::new(recorder.clone()),
        }
    }

    pub fn with_damage_queue<Q: DamageQueue + 'static>(mut self, queue: Q) -> Self {
        self.damage = Box::new(queue);
        self
    }

    pub fn with_particles<P: ParticleSpawner + 'static>(mut self, spawner: P) -> Self {
        self.particles = Box::new(spawner);
        self
    }

    pub fn with_audio<A: AudioCue + 'static>(mut self, audio: A) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_camera<C: CameraShake + 'static>(mut self, camera: C) -> Self {
        self.camera = Box::new(camera);
        self
    }

    pub fn with_springs<S: SpringActuator + 'static>(mut self, springs: S) -> Self {
        self.springs = Box::new(springs);
        self
    }
}
