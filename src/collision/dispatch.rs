use log::warn;

use crate::{
    collision::{
        collaborators::{CollaboratorResult, Collaborators, ParticleEffect},
        events::{CollisionEvent, CollisionEventKind},
        resolver::Resolution,
    },
    core::body::TileMaterial,
};

pub const CUE_BALL_HIT_SOLID: &str = "ball_hit_solid";
pub const CUE_BALL_BOUNCE: &str = "ball_bounce";
pub const CUE_PLAYER_DEATH: &str = "player_death";
pub const CUE_PLAYER_LAND: &str = "player_land";
pub const CUE_SPRING: &str = "spring";

const DEBRIS_COUNT: u32 = 6;
const SPARK_COUNT: u32 = 3;
const DEATH_BURST_COUNT: u32 = 12;
const LANDING_DUST_COUNT: u32 = 4;

/// Fans events out to collaborators.
///
/// Each call is isolated: a failing collaborator is logged and counted, and
/// the remaining collaborators and pairs are still served.
pub struct EventDispatcher {
    collaborators: Collaborators,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(Collaborators::default())
    }
}

impl EventDispatcher {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn set_collaborators(&mut self, collaborators: Collaborators) {
        self.collaborators = collaborators;
    }

    /// Notifies collaborators of a freshly classified event. Returns the number of failed calls.
    pub fn dispatch(&self, event: &CollisionEvent) -> usize {
        let c = &self.collaborators;
        let at = event.contact_point;
        let mut failures = 0;

        match event.kind {
            CollisionEventKind::BallTileHit => {
                let debris = c.particles.spawn_at(ParticleEffect::Debris, at, Some(DEBRIS_COUNT));
                absorb(event, "particles", debris, &mut failures);
                let audio = match event.b.material.filter(TileMaterial::is_destructible) {
                    Some(material) => c.audio.play_destruction(material, at),
                    None => c.audio.play(CUE_BALL_HIT_SOLID, Some(at)),
                };
                absorb(event, "audio", audio, &mut failures);
                let shake = c.camera.trigger(at, event.incident_velocity);
                absorb(event, "camera", shake, &mut failures);
            }
            CollisionEventKind::BallWallBounce => {
                let sparks = c.particles.spawn_at(ParticleEffect::Spark, at, Some(SPARK_COUNT));
                absorb(event, "particles", sparks, &mut failures);
                absorb(event, "audio", c.audio.play(CUE_BALL_BOUNCE, Some(at)), &mut failures);
            }
            // Only the landing sub-event is interesting to collaborators.
            CollisionEventKind::PlayerGroundContact => {}
            CollisionEventKind::PlayerHazardContact => {
                let burst = c
                    .particles
                    .spawn_at(ParticleEffect::Burst, at, Some(DEATH_BURST_COUNT));
                absorb(event, "particles", burst, &mut failures);
                absorb(event, "audio", c.audio.play(CUE_PLAYER_DEATH, Some(at)), &mut failures);
                let shake = c.camera.trigger(at, event.incident_velocity);
                absorb(event, "camera", shake, &mut failures);
            }
            CollisionEventKind::SpringActivation => {
                absorb(event, "audio", c.audio.play(CUE_SPRING, Some(at)), &mut failures);
                let activation = c.springs.activate(event.b.id, event.a.id, event.normal);
                absorb(event, "springs", activation, &mut failures);
            }
        }
        failures
    }

    /// Forwards the resolver's damage request and landing sub-event.
    /// Returns the number of failed calls.
    pub fn dispatch_resolution(&self, event: &CollisionEvent, resolution: &Resolution) -> usize {
        let c = &self.collaborators;
        let mut failures = 0;

        if let Some(request) = resolution.damage {
            let queued = c
                .damage
                .queue_damage(request.target, request.amount, request.source);
            absorb(event, "damage", queued, &mut failures);
        }

        if let Some(landing) = resolution.landing {
            let at = landing.position;
            let dust = c
                .particles
                .spawn_at(ParticleEffect::Dust, at, Some(LANDING_DUST_COUNT));
            absorb(event, "particles", dust, &mut failures);
            absorb(event, "audio", c.audio.play(CUE_PLAYER_LAND, Some(at)), &mut failures);
            let shake = c.camera.trigger(at, landing.incident_velocity);
            absorb(event, "camera", shake, &mut failures);
        }
        failures
    }
}

fn absorb(
    event: &CollisionEvent,
    collaborator: &str,
    result: CollaboratorResult,
    failures: &mut usize,
) {
    if let Err(err) = result {
        *failures += 1;
        warn!(
            "{collaborator} collaborator failed on {:?} ({} vs {}): {err}",
            event.kind, event.a.id, event.b.id
        );
    }
}
