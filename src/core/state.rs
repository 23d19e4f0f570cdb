use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lifecycle of the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Resting on the player, waiting to be launched.
    Held,
    Flying,
    /// Fell out of the level.
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub grounded: bool,
    pub life: LifeState,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            grounded: false,
            life: LifeState::Alive,
        }
    }
}

impl PlayerState {
    pub fn is_dead(&self) -> bool {
        self.life == LifeState::Dead
    }
}

/// Per-kind actor state owned by the entity layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorState {
    Ball(BallPhase),
    Player(PlayerState),
    Inert,
}

/// Motion and actor state the resolver reads and updates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub velocity: Vec2,
    pub actor: ActorState,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            actor: ActorState::Inert,
        }
    }
}

impl MotionState {
    pub fn ball(phase: BallPhase, velocity: Vec2) -> Self {
        Self {
            velocity,
            actor: ActorState::Ball(phase),
        }
    }

    pub fn player(velocity: Vec2) -> Self {
        Self {
            velocity,
            actor: ActorState::Player(PlayerState::default()),
        }
    }

    pub fn ball_phase(&self) -> Option<BallPhase> {
        match self.actor {
            ActorState::Ball(phase) => Some(phase),
            _ => None,
        }
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.actor {
            ActorState::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.actor {
            ActorState::Player(state) => Some(state),
            _ => None,
        }
    }
}
