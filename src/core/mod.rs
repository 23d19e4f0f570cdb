//! Core types describing collidable bodies and the entity state they carry.

pub mod body;
pub mod state;
pub mod types;

pub use body::{CollidableBody, CollisionDescriptor, CollisionType, TileMaterial};
pub use state::{ActorState, BallPhase, LifeState, MotionState, PlayerState};
pub use types::Aabb;
