use crate::core::{body::CollidableBody, types::Aabb};

/// Exact and conservative overlap tests on axis-aligned boxes.
pub struct NarrowPhase;

impl NarrowPhase {
    /// Interval overlap on both axes. Touching edges count as overlapping.
    pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
        let (a_left, a_right, a_top, a_bottom) = (a.min.x, a.max.x, a.min.y, a.max.y);
        let (b_left, b_right, b_top, b_bottom) = (b.min.x, b.max.x, b.min.y, b.max.y);
        !(a_right < b_left || a_left > b_right || a_bottom < b_top || a_top > b_bottom)
    }

    pub fn test(a: &CollidableBody, b: &CollidableBody) -> bool {
        Self::aabb_overlap(&a.bounds, &b.bounds)
    }

    /// Cheap pre-reject: true when the centers are farther apart than the
    /// summed half-diagonals scaled by `margin`, so the boxes cannot touch.
    pub fn too_far_apart(a: &Aabb, b: &Aabb, margin: f32) -> bool {
        let reach = (a.half_diagonal() + b.half_diagonal()) * margin;
        a.center().distance_squared(b.center()) > reach * reach
    }
}
