//! Small vector helpers layered on top of `glam`.

use glam::Vec2;

/// Elastic reflection of `velocity` about the unit `normal`: `v - 2(v·n)n`.
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Direction from `from` to `to`, or `fallback` when the points coincide.
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(fallback)
}
