use glam::Vec2;

use crate::{
    collision::events::{CollisionEvent, CollisionEventKind},
    config::{DEFAULT_GROUND_TOLERANCE, DEFAULT_LANDING_SPEED},
    core::state::{BallPhase, LifeState},
    utils::{allocator::EntityId, math::reflect},
    world::EntitySource,
};

/// Damage the resolver wants delivered to the damage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRequest {
    pub target: EntityId,
    pub amount: u32,
    pub source: EntityId,
}

/// Hard landing sub-event raised alongside a ground contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingEvent {
    pub player: EntityId,
    pub impact_speed: f32,
    pub position: Vec2,
    pub incident_velocity: Vec2,
}

/// What the resolver did for one event.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// New velocity of the subject body after reflection.
    pub reflected_velocity: Option<Vec2>,
    pub grounded: bool,
    pub landing: Option<LandingEvent>,
    pub damage: Option<DamageRequest>,
    pub killed: bool,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Event-kind specific response. Stateless between frames; reads and writes
/// entity state only through [`EntitySource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    /// Max gap between the player's bottom and the surface's top that counts as standing.
    pub ground_tolerance: f32,
    /// Downward speed above which a ground contact is also a landing.
    pub landing_speed: f32,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_GROUND_TOLERANCE, DEFAULT_LANDING_SPEED)
    }
}

impl Resolver {
    pub fn new(ground_tolerance: f32, landing_speed: f32) -> Self {
        Self {
            ground_tolerance,
            landing_speed,
        }
    }

    pub fn apply<S: EntitySource + ?Sized>(
        &self,
        event: &CollisionEvent,
        source: &mut S,
    ) -> Resolution {
        match event.kind {
            CollisionEventKind::BallTileHit => self.bounce_ball(event, source, true),
            CollisionEventKind::BallWallBounce => self.bounce_ball(event, source, false),
            CollisionEventKind::PlayerGroundContact => self.ground_player(event, source),
            CollisionEventKind::PlayerHazardContact => Self::kill_player(event, source),
            // Impulses belong to the spring collaborator.
            CollisionEventKind::SpringActivation => Resolution::default(),
        }
    }

    fn bounce_ball<S: EntitySource + ?Sized>(
        &self,
        event: &CollisionEvent,
        source: &mut S,
        damages_partner: bool,
    ) -> Resolution {
        let mut resolution = Resolution::default();
        if event.involves_sensor() {
            return resolution;
        }

        let Some(motion) = source.motion_mut(event.a.id) else {
            return resolution;
        };
        if motion.ball_phase() != Some(BallPhase::Flying) {
            return resolution;
        }
        // Already leaving this contact, typically after an earlier reflection this frame.
        if motion.velocity.dot(event.normal) >= 0.0 {
            return resolution;
        }

        motion.velocity = reflect(motion.velocity, event.normal);
        resolution.reflected_velocity = Some(motion.velocity);

        if damages_partner {
            resolution.damage = event.b.damage_per_hit().map(|amount| DamageRequest {
                target: event.b.id,
                amount,
                source: event.a.id,
            });
        }
        resolution
    }

    fn ground_player<S: EntitySource + ?Sized>(
        &self,
        event: &CollisionEvent,
        source: &mut S,
    ) -> Resolution {
        let mut resolution = Resolution::default();
        if event.involves_sensor() {
            return resolution;
        }

        let gap = (event.a.bounds.bottom() - event.b.bounds.top()).abs();
        if gap > self.ground_tolerance {
            return resolution;
        }

        let Some(motion) = source.motion_mut(event.a.id) else {
            return resolution;
        };
        let velocity = motion.velocity;
        let Some(player) = motion.player_state_mut() else {
            return resolution;
        };
        if player.is_dead() {
            return resolution;
        }

        player.grounded = true;
        resolution.grounded = true;

        if velocity.y > self.landing_speed {
            resolution.landing = Some(LandingEvent {
                player: event.a.id,
                impact_speed: velocity.y,
                position: Vec2::new(event.a.bounds.center().x, event.a.bounds.bottom()),
                incident_velocity: velocity,
            });
        }
        resolution
    }

    fn kill_player<S: EntitySource + ?Sized>(event: &CollisionEvent, source: &mut S) -> Resolution {
        let mut resolution = Resolution::default();
        let Some(player) = source
            .motion_mut(event.a.id)
            .and_then(|motion| motion.player_state_mut())
        else {
            return resolution;
        };

        if player.life != LifeState::Dead {
            player.life = LifeState::Dead;
            resolution.killed = true;
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            body::{CollidableBody, TileMaterial},
            state::{ActorState, MotionState},
        },
        world::{EntityBuilder, EntityWorld},
    };

    fn snapshot(world: &EntityWorld, id: EntityId) -> CollidableBody {
        let entity = world.entity(id).unwrap();
        CollidableBody::from_descriptor(id, &entity.collision.unwrap(), entity.bounds.unwrap())
    }

    fn resolve(
        world: &mut EntityWorld,
        kind: CollisionEventKind,
        a: EntityId,
        b: EntityId,
    ) -> Resolution {
        let (a, b) = (snapshot(world, a), snapshot(world, b));
        let event = CollisionEvent::new(kind, a, b, Vec2::ZERO, 0.0);
        Resolver::default().apply(&event, world)
    }

    #[test]
    fn flying_ball_reflects_and_damages_destructible_tile() {
        let mut world = EntityWorld::new();
        let ball = world.spawn(
            EntityBuilder::ball()
                .at(100.0, 100.0)
                .size(16.0, 16.0)
                .velocity(0.0, 200.0),
        );
        let tile = world.spawn(
            EntityBuilder::tile(TileMaterial::Scaffolding)
                .at(100.0, 116.0)
                .size(32.0, 32.0),
        );

        let resolution = resolve(&mut world, CollisionEventKind::BallTileHit, ball, tile);

        let velocity = world.motion(ball).unwrap().velocity;
        assert!(velocity.y < 0.0);
        assert!((velocity.length() - 200.0).abs() < 1e-3);
        assert_eq!(resolution.reflected_velocity, Some(velocity));
        assert_eq!(
            resolution.damage,
            Some(DamageRequest {
                target: tile,
                amount: 1,
                source: ball
            })
        );
    }

    #[test]
    fn receding_ball_is_neither_reflected_nor_damaging() {
        let mut world = EntityWorld::new();
        // Tile sits below the ball; the ball is already heading up and away.
        let ball = world.spawn(
            EntityBuilder::ball()
                .at(0.0, 0.0)
                .size(8.0, 8.0)
                .velocity(20.0, -100.0),
        );
        let tile = world.spawn(
            EntityBuilder::tile(TileMaterial::Wood)
                .at(0.0, 6.0)
                .size(8.0, 8.0),
        );

        let resolution = resolve(&mut world, CollisionEventKind::BallTileHit, ball, tile);

        assert!(resolution.is_empty());
        assert_eq!(world.motion(ball).unwrap().velocity, Vec2::new(20.0, -100.0));
    }

    #[test]
    fn held_ball_is_left_alone() {
        let mut world = EntityWorld::new();
        let ball = world.spawn(
            EntityBuilder::ball()
                .phase(BallPhase::Held)
                .at(0.0, 0.0)
                .size(16.0, 16.0)
                .velocity(0.0, 50.0),
        );
        let wall = world.spawn(EntityBuilder::wall().at(0.0, 10.0).size(64.0, 16.0));

        let resolution = resolve(&mut world, CollisionEventKind::BallWallBounce, ball, wall);

        assert!(resolution.is_empty());
        assert_eq!(world.motion(ball).unwrap().velocity, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn indestructible_tile_gets_no_damage_request() {
        let mut world = EntityWorld::new();
        let ball = world.spawn(
            EntityBuilder::ball()
                .at(0.0, 0.0)
                .size(8.0, 8.0)
                .velocity(10.0, 10.0),
        );
        let steel = world.spawn(
            EntityBuilder::tile(TileMaterial::Steel)
                .at(4.0, 4.0)
                .size(8.0, 8.0),
        );

        let resolution = resolve(&mut world, CollisionEventKind::BallTileHit, ball, steel);
        assert!(resolution.reflected_velocity.is_some());
        assert!(resolution.damage.is_none());
    }

    #[test]
    fn ground_contact_outside_tolerance_does_not_ground() {
        let mut world = EntityWorld::new();
        // Bottom edge at 140, tile top at 120: deep side contact, not standing.
        let player = world.spawn(EntityBuilder::player().at(80.0, 108.0).size(24.0, 32.0));
        let tile = world.spawn(
            EntityBuilder::tile(TileMaterial::Brick)
                .at(100.0, 120.0)
                .size(32.0, 32.0),
        );

        let resolution = resolve(&mut world, CollisionEventKind::PlayerGroundContact, player, tile);
        assert!(!resolution.grounded);
        assert!(!world.motion(player).unwrap().player_state().unwrap().grounded);
    }

    #[test]
    fn fast_descent_onto_ground_raises_landing() {
        let mut world = EntityWorld::new();
        let player = world.spawn(
            EntityBuilder::player()
                .at(100.0, 90.0)
                .size(24.0, 32.0)
                .velocity(0.0, 180.0),
        );
        let tile = world.spawn(
            EntityBuilder::tile(TileMaterial::Wood)
                .at(96.0, 120.0)
                .size(32.0, 32.0),
        );

        let resolution = resolve(&mut world, CollisionEventKind::PlayerGroundContact, player, tile);

        assert!(resolution.grounded);
        let landing = resolution.landing.unwrap();
        assert_eq!(landing.player, player);
        assert_eq!(landing.impact_speed, 180.0);
        assert_eq!(landing.position, Vec2::new(112.0, 122.0));
    }

    #[test]
    fn sensor_partner_suppresses_physical_response() {
        let mut world = EntityWorld::new();
        let ball = world.spawn(
            EntityBuilder::ball()
                .at(0.0, 0.0)
                .size(8.0, 8.0)
                .velocity(0.0, 30.0),
        );
        let sensor_wall = world.spawn(
            EntityBuilder::wall()
                .sensor(true)
                .at(0.0, 6.0)
                .size(32.0, 8.0),
        );

        let resolution = resolve(&mut world, CollisionEventKind::BallWallBounce, ball, sensor_wall);
        assert!(resolution.is_empty());
        assert_eq!(world.motion(ball).unwrap().velocity, Vec2::new(0.0, 30.0));
    }

    #[test]
    fn hazard_kills_once() {
        let mut world = EntityWorld::new();
        let player = world.spawn(EntityBuilder::player().at(0.0, 0.0).size(16.0, 16.0));
        let spikes = world.spawn(EntityBuilder::hazard().at(0.0, 8.0).size(16.0, 8.0));

        let kind = CollisionEventKind::PlayerHazardContact;

        assert!(resolve(&mut world, kind, player, spikes).killed);
        assert!(!resolve(&mut world, kind, player, spikes).killed);
        assert!(matches!(
            world.motion(player).unwrap().actor,
            ActorState::Player(state) if state.life == LifeState::Dead
        ));
    }

    #[test]
    fn spring_activation_leaves_velocity_untouched() {
        let mut world = EntityWorld::new();
        let player = world.spawn(
            EntityBuilder::player()
                .at(0.0, 0.0)
                .size(16.0, 16.0)
                .velocity(5.0, 90.0),
        );
        let spring = world.spawn(EntityBuilder::spring().at(0.0, 12.0).size(16.0, 8.0));

        let resolution = resolve(&mut world, CollisionEventKind::SpringActivation, player, spring);
        assert!(resolution.is_empty());
        assert_eq!(
            *world.motion(player).unwrap(),
            MotionState {
                velocity: Vec2::new(5.0, 90.0),
                ..MotionState::player(Vec2::ZERO)
            }
        );
    }
}
