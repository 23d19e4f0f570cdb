//! Entity-side interfaces: the [`EntitySource`] the collision pass reads from,
//! and [`EntityWorld`], an arena-backed implementation of it.

pub mod collision_manager;

use glam::Vec2;

use crate::{
    core::{
        body::{CollisionDescriptor, CollisionType, TileMaterial},
        state::{BallPhase, MotionState},
        types::Aabb,
    },
    utils::allocator::{Arena, EntityId},
};

pub use collision_manager::{CollisionManager, SkipReason};

/// One active entity as seen by the collision pass. Either component may be
/// missing, in which case the entity sits the frame out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRecord {
    pub id: EntityId,
    pub collision: Option<CollisionDescriptor>,
    pub bounds: Option<Aabb>,
}

/// Query surface of the entity layer.
pub trait EntitySource {
    /// Appends every currently active entity to `out`.
    fn collect_active(&self, out: &mut Vec<EntityRecord>);

    fn motion(&self, id: EntityId) -> Option<&MotionState>;

    fn motion_mut(&mut self, id: EntityId) -> Option<&mut MotionState>;
}

/// Entity stored in an [`EntityWorld`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub collision: Option<CollisionDescriptor>,
    pub bounds: Option<Aabb>,
    pub motion: MotionState,
    pub enabled: bool,
}

/// Builder for world entities, with presets for every collision type.
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    collision: Option<CollisionDescriptor>,
    position: Vec2,
    size: Vec2,
    has_bounds: bool,
    motion: MotionState,
}

impl EntityBuilder {
    /// Entity without a collision component and with a zero-size box at the origin.
    pub fn bare() -> Self {
        Self {
            collision: None,
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            has_bounds: true,
            motion: MotionState::default(),
        }
    }

    pub fn of_kind(kind: CollisionType) -> Self {
        let mut descriptor = CollisionDescriptor::new(kind);
        descriptor.is_static = matches!(
            kind,
            CollisionType::Tile
                | CollisionType::Wall
                | CollisionType::Spring
                | CollisionType::Hazard
        );
        Self {
            collision: Some(descriptor),
            ..Self::bare()
        }
    }

    /// A flying ball.
    pub fn ball() -> Self {
        let mut builder = Self::of_kind(CollisionType::Ball);
        builder.motion = MotionState::ball(BallPhase::Flying, Vec2::ZERO);
        builder
    }

    pub fn player() -> Self {
        let mut builder = Self::of_kind(CollisionType::Player);
        builder.motion = MotionState::player(Vec2::ZERO);
        builder
    }

    pub fn tile(material: TileMaterial) -> Self {
        let mut builder = Self::of_kind(CollisionType::Tile);
        if let Some(descriptor) = builder.collision.as_mut() {
            descriptor.material = Some(material);
        }
        builder
    }

    pub fn wall() -> Self {
        Self::of_kind(CollisionType::Wall)
    }

    pub fn spring() -> Self {
        Self::of_kind(CollisionType::Spring)
    }

    pub fn elevator() -> Self {
        Self::of_kind(CollisionType::Elevator)
    }

    pub fn hazard() -> Self {
        Self::of_kind(CollisionType::Hazard)
    }

    /// Top-left corner.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn velocity(mut self, x: f32, y: f32) -> Self {
        self.motion.velocity = Vec2::new(x, y);
        self
    }

    pub fn phase(mut self, phase: BallPhase) -> Self {
        self.motion = MotionState::ball(phase, self.motion.velocity);
        self
    }

    pub fn layer(mut self, layer: u32) -> Self {
        if let Some(descriptor) = self.collision.as_mut() {
            descriptor.layer = layer;
        }
        self
    }

    pub fn static_body(mut self, is_static: bool) -> Self {
        if let Some(descriptor) = self.collision.as_mut() {
            descriptor.is_static = is_static;
        }
        self
    }

    pub fn sensor(mut self, is_sensor: bool) -> Self {
        if let Some(descriptor) = self.collision.as_mut() {
            descriptor.is_sensor = is_sensor;
        }
        self
    }

    /// Keeps the entity but switches its collision component off.
    pub fn collision_active(mut self, is_active: bool) -> Self {
        if let Some(descriptor) = self.collision.as_mut() {
            descriptor.is_active = is_active;
        }
        self
    }

    pub fn without_collision(mut self) -> Self {
        self.collision = None;
        self
    }

    pub fn without_bounds(mut self) -> Self {
        self.has_bounds = false;
        self
    }

    pub fn build(self) -> Entity {
        Entity {
            collision: self.collision,
            bounds: self
                .has_bounds
                .then(|| Aabb::from_position_size(self.position, self.size)),
            motion: self.motion,
            enabled: true,
        }
    }
}

/// Arena-backed entity store.
#[derive(Default)]
pub struct EntityWorld {
    entities: Arena<Entity>,
}

impl EntityWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, builder: EntityBuilder) -> EntityId {
        self.insert(builder.build())
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.entities.insert(entity)
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    /// Disabled entities are not reported as active.
    pub fn set_enabled(&mut self, id: EntityId, enabled: bool) -> bool {
        match self.entities.get_mut(id) {
            Some(entity) => {
                entity.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Moves an entity's bounds to a new top-left corner.
    pub fn set_position(&mut self, id: EntityId, x: f32, y: f32) -> bool {
        let Some(bounds) = self.entities.get_mut(id).and_then(|e| e.bounds.as_mut()) else {
            return false;
        };
        *bounds = Aabb::from_position_size(Vec2::new(x, y), bounds.size());
        true
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.ids()
    }
}

impl EntitySource for EntityWorld {
    fn collect_active(&self, out: &mut Vec<EntityRecord>) {
        out.extend(
            self.entities
                .iter()
                .filter(|(_, entity)| entity.enabled)
                .map(|(id, entity)| EntityRecord {
                    id,
                    collision: entity.collision,
                    bounds: entity.bounds,
                }),
        );
    }

    fn motion(&self, id: EntityId) -> Option<&MotionState> {
        self.entities.get(id).map(|entity| &entity.motion)
    }

    fn motion_mut(&mut self, id: EntityId) -> Option<&mut MotionState> {
        self.entities.get_mut(id).map(|entity| &mut entity.motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_and_despawned_entities_are_not_reported() {
        let mut world = EntityWorld::new();
        let ball = world.spawn(EntityBuilder::ball().size(8.0, 8.0));
        let wall = world.spawn(EntityBuilder::wall().size(64.0, 8.0));
        let tile = world.spawn(EntityBuilder::tile(TileMaterial::Wood).size(16.0, 16.0));

        world.set_enabled(wall, false);
        world.despawn(tile);

        let mut records = Vec::new();
        world.collect_active(&mut records);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, ball);
    }

    #[test]
    fn presets_mark_level_geometry_static() {
        let tile = EntityBuilder::tile(TileMaterial::Brick).build();
        let ball = EntityBuilder::ball().build();
        assert!(tile.collision.unwrap().is_static);
        assert!(!ball.collision.unwrap().is_static);
        assert_eq!(ball.motion.ball_phase(), Some(BallPhase::Flying));
    }

    #[test]
    fn set_position_keeps_size() {
        let mut world = EntityWorld::new();
        let id = world.spawn(EntityBuilder::elevator().at(0.0, 0.0).size(48.0, 8.0));
        assert!(world.set_position(id, 10.0, 20.0));
        let bounds = world.entity(id).unwrap().bounds.unwrap();
        assert_eq!(bounds.min, Vec2::new(10.0, 20.0));
        assert_eq!(bounds.size(), Vec2::new(48.0, 8.0));
    }
}
