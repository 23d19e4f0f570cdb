//! Collision event vocabulary and the ordered rule list that produces it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{
    core::body::{CollidableBody, CollisionType},
    utils::math::direction_or,
};

/// The closed set of semantic collision events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionEventKind {
    BallTileHit,
    PlayerGroundContact,
    BallWallBounce,
    PlayerHazardContact,
    SpringActivation,
}

/// Normal used when both centers coincide: straight up in screen space.
pub const FALLBACK_NORMAL: Vec2 = Vec2::NEG_Y;

/// Immutable snapshot of one classified overlap.
///
/// `a` is the subject of the rule (ball or player), `b` the body it touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub kind: CollisionEventKind,
    pub a: CollidableBody,
    pub b: CollidableBody,
    /// Midpoint of the two centers.
    pub contact_point: Vec2,
    /// Unit vector from `b`'s center toward `a`'s center.
    pub normal: Vec2,
    /// `velocity(a) - velocity(b)` before any response was applied.
    pub incident_velocity: Vec2,
    pub timestamp: f64,
}

impl CollisionEvent {
    pub fn new(
        kind: CollisionEventKind,
        a: CollidableBody,
        b: CollidableBody,
        incident_velocity: Vec2,
        timestamp: f64,
    ) -> Self {
        let (center_a, center_b) = (a.bounds.center(), b.bounds.center());
        Self {
            kind,
            a,
            b,
            contact_point: (center_a + center_b) * 0.5,
            normal: direction_or(center_b, center_a, FALLBACK_NORMAL),
            incident_velocity,
            timestamp,
        }
    }

    /// Either participant is a sensor.
    pub fn involves_sensor(&self) -> bool {
        self.a.is_sensor || self.b.is_sensor
    }
}

/// One entry of the classification table: a subject type matched against a
/// set of partner types, in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub kind: CollisionEventKind,
    pub subject: &'static [CollisionType],
    pub partner: &'static [CollisionType],
}

impl ClassificationRule {
    pub const fn new(
        kind: CollisionEventKind,
        subject: &'static [CollisionType],
        partner: &'static [CollisionType],
    ) -> Self {
        Self {
            kind,
            subject,
            partner,
        }
    }

    /// `Some(true)` when `a` is the subject, `Some(false)` when `b` is.
    pub fn orientation(&self, a: CollisionType, b: CollisionType) -> Option<bool> {
        if self.subject.contains(&a) && self.partner.contains(&b) {
            Some(true)
        } else if self.subject.contains(&b) && self.partner.contains(&a) {
            Some(false)
        } else {
            None
        }
    }
}

/// Default rule table. Earlier entries win.
pub const DEFAULT_RULES: [ClassificationRule; 5] = {
    use crate::core::body::CollisionType as T;
    use crate::collision::events::CollisionEventKind as K;
    [
        ClassificationRule::new(K::PlayerHazardContact, &[T::Player], &[T::Hazard]),
        ClassificationRule::new(K::SpringActivation, &[T::Player, T::Ball], &[T::Spring]),
        ClassificationRule::new(K::BallTileHit, &[T::Ball], &[T::Tile]),
        ClassificationRule::new(K::BallWallBounce, &[T::Ball], &[T::Wall, T::Elevator]),
        ClassificationRule::new(
            K::PlayerGroundContact,
            &[T::Player],
            &[T::Tile, T::Wall, T::Elevator],
        ),
    ]
};

/// First-match classifier over an ordered rule list.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    rules: Vec<ClassificationRule>,
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

impl EventClassifier {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Matching rule kind plus whether the pair must be swapped so the subject comes first.
    pub fn classify_kinds(
        &self,
        a: CollisionType,
        b: CollisionType,
    ) -> Option<(CollisionEventKind, bool)> {
        self.rules.iter().find_map(|rule| {
            rule.orientation(a, b)
                .map(|a_is_subject| (rule.kind, !a_is_subject))
        })
    }

    /// Oriented `(kind, subject, partner)` for an overlapping pair, or `None`
    /// when the pair is geometrically true but semantically uninteresting.
    pub fn classify<'a>(
        &self,
        a: &'a CollidableBody,
        b: &'a CollidableBody,
    ) -> Option<(CollisionEventKind, &'a CollidableBody, &'a CollidableBody)> {
        let (kind, swap) = self.classify_kinds(a.kind, b.kind)?;
        if swap {
            Some((kind, b, a))
        } else {
            Some((kind, a, b))
        }
    }
}
