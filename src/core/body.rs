use serde::{Deserialize, Serialize};

use super::types::Aabb;
use crate::utils::allocator::EntityId;

/// Semantic tag carried by every collidable body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionType {
    Ball,
    Player,
    Tile,
    Wall,
    Spring,
    Elevator,
    Hazard,
}

impl CollisionType {
    pub const ALL: [CollisionType; 7] = [
        CollisionType::Ball,
        CollisionType::Player,
        CollisionType::Tile,
        CollisionType::Wall,
        CollisionType::Spring,
        CollisionType::Elevator,
        CollisionType::Hazard,
    ];
}

/// What a tile is made of; decides how much damage a ball hit deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileMaterial {
    Scaffolding,
    Wood,
    Glass,
    Brick,
    Steel,
}

impl TileMaterial {
    /// Damage dealt per ball hit, or `None` for indestructible materials.
    pub fn damage_per_hit(&self) -> Option<u32> {
        match self {
            TileMaterial::Steel => None,
            TileMaterial::Glass => Some(2),
            TileMaterial::Scaffolding | TileMaterial::Wood | TileMaterial::Brick => Some(1),
        }
    }

    pub fn is_destructible(&self) -> bool {
        self.damage_per_hit().is_some()
    }

    pub fn destruction_cue(&self) -> &'static str {
        match self {
            TileMaterial::Scaffolding => "scaffolding_break",
            TileMaterial::Wood => "wood_break",
            TileMaterial::Glass => "glass_shatter",
            TileMaterial::Brick => "brick_crumble",
            TileMaterial::Steel => "steel_clang",
        }
    }
}

/// Collision component as reported by the entity layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionDescriptor {
    pub kind: CollisionType,
    pub layer: u32,
    pub is_static: bool,
    pub is_sensor: bool,
    pub is_active: bool,
    pub material: Option<TileMaterial>,
}

impl CollisionDescriptor {
    pub fn new(kind: CollisionType) -> Self {
        Self {
            kind,
            layer: 0,
            is_static: false,
            is_sensor: false,
            is_active: true,
            material: None,
        }
    }
}

/// Frame-scoped snapshot of one body taking part in the collision pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollidableBody {
    pub id: EntityId,
    pub bounds: Aabb,
    pub kind: CollisionType,
    pub layer: u32,
    pub is_static: bool,
    pub is_sensor: bool,
    pub is_active: bool,
    pub material: Option<TileMaterial>,
}

impl CollidableBody {
    pub fn new(id: EntityId, kind: CollisionType, bounds: Aabb) -> Self {
        Self::from_descriptor(id, &CollisionDescriptor::new(kind), bounds)
    }

    pub fn from_descriptor(id: EntityId, descriptor: &CollisionDescriptor, bounds: Aabb) -> Self {
        Self {
            id,
            bounds,
            kind: descriptor.kind,
            layer: descriptor.layer,
            is_static: descriptor.is_static,
            is_sensor: descriptor.is_sensor,
            is_active: descriptor.is_active,
            material: descriptor.material,
        }
    }

    /// Damage a ball hit deals to this body; `None` unless it is a destructible tile.
    pub fn damage_per_hit(&self) -> Option<u32> {
        if self.kind != CollisionType::Tile {
            return None;
        }
        self.material.and_then(|material| material.damage_per_hit())
    }
}
