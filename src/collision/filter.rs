use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    config::FilterConfig,
    core::body::{CollidableBody, CollisionType},
};

/// Type-pair permission matrix.
///
/// A pair is permitted when either side lists the other, so asymmetric
/// declarations still behave symmetrically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMatrix {
    permitted: HashMap<CollisionType, HashSet<CollisionType>>,
}

impl Default for CollisionMatrix {
    fn default() -> Self {
        use crate::core::body::CollisionType::*;

        let mut matrix = Self::empty();
        for other in [Tile, Wall, Elevator, Spring] {
            matrix.allow(Ball, other);
        }
        for other in [Tile, Wall, Elevator, Hazard, Spring] {
            matrix.allow(Player, other);
        }
        matrix
    }
}

impl CollisionMatrix {
    /// Matrix that permits nothing.
    pub fn empty() -> Self {
        Self {
            permitted: HashMap::new(),
        }
    }

    pub fn from_pairs(pairs: &BTreeMap<CollisionType, Vec<CollisionType>>) -> Self {
        let mut matrix = Self::empty();
        for (kind, others) in pairs {
            for other in others {
                matrix.allow(*kind, *other);
            }
        }
        matrix
    }

    /// Declares `a -> b`.
    pub fn allow(&mut self, a: CollisionType, b: CollisionType) -> &mut Self {
        self.permitted.entry(a).or_default().insert(b);
        self
    }

    /// Removes the pair in both directions.
    pub fn deny(&mut self, a: CollisionType, b: CollisionType) -> &mut Self {
        if let Some(set) = self.permitted.get_mut(&a) {
            set.remove(&b);
        }
        if let Some(set) = self.permitted.get_mut(&b) {
            set.remove(&a);
        }
        self
    }

    pub fn should_collide(&self, a: CollisionType, b: CollisionType) -> bool {
        self.declares(a, b) || self.declares(b, a)
    }

    fn declares(&self, from: CollisionType, to: CollisionType) -> bool {
        self.permitted
            .get(&from)
            .is_some_and(|set| set.contains(&to))
    }
}

/// Layer-pair filter. Permissive unless pairs are explicitly blocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerFilter {
    blocked: HashSet<(u32, u32)>,
}

impl LayerFilter {
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn block(&mut self, a: u32, b: u32) -> &mut Self {
        self.blocked.insert(Self::key(a, b));
        self
    }

    pub fn unblock(&mut self, a: u32, b: u32) -> &mut Self {
        self.blocked.remove(&Self::key(a, b));
        self
    }

    pub fn is_permissive(&self) -> bool {
        self.blocked.is_empty()
    }

    pub fn layers_interact(&self, a: u32, b: u32) -> bool {
        self.is_permissive() || !self.blocked.contains(&Self::key(a, b))
    }

    fn key(a: u32, b: u32) -> (u32, u32) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// Combined type/layer filter plus static-pair rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionFilter {
    pub matrix: CollisionMatrix,
    pub layers: LayerFilter,
}

impl CollisionFilter {
    pub fn new(matrix: CollisionMatrix, layers: LayerFilter) -> Self {
        Self { matrix, layers }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        let matrix = config
            .pairs
            .as_ref()
            .map(CollisionMatrix::from_pairs)
            .unwrap_or_default();
        let mut layers = LayerFilter::permissive();
        for [a, b] in &config.blocked_layers {
            layers.block(*a, *b);
        }
        Self { matrix, layers }
    }

    pub fn should_collide(&self, a: CollisionType, b: CollisionType) -> bool {
        self.matrix.should_collide(a, b)
    }

    /// Both bodies static: can never produce a new event.
    pub fn is_static_pair(a: &CollidableBody, b: &CollidableBody) -> bool {
        a.is_static && b.is_static
    }

    /// Type matrix and layer filter both allow the pair.
    pub fn permits(&self, a: &CollidableBody, b: &CollidableBody) -> bool {
        self.should_collide(a.kind, b.kind) && self.layers.layers_interact(a.layer, b.layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::CollisionType::*;
    use crate::{core::types::Aabb, utils::allocator::EntityId};
    use glam::Vec2;

    fn body(index: u32, kind: CollisionType, layer: u32, is_static: bool) -> CollidableBody {
        let mut body = CollidableBody::new(
            EntityId::from_index(index),
            kind,
            Aabb::from_position_size(Vec2::ZERO, Vec2::ONE),
        );
        body.layer = layer;
        body.is_static = is_static;
        body
    }

    #[test]
    fn default_matrix_is_symmetric_and_excludes_tile_pairs() {
        let matrix = CollisionMatrix::default();
        assert!(matrix.should_collide(Ball, Tile));
        assert!(matrix.should_collide(Tile, Ball));
        assert!(matrix.should_collide(Hazard, Player));
        assert!(!matrix.should_collide(Tile, Tile));
        assert!(!matrix.should_collide(Ball, Hazard));
        assert!(!matrix.should_collide(Ball, Player));
    }

    #[test]
    fn one_sided_declaration_counts_both_ways() {
        let mut matrix = CollisionMatrix::empty();
        matrix.allow(Spring, Elevator);
        assert!(matrix.should_collide(Elevator, Spring));

        matrix.deny(Elevator, Spring);
        assert!(!matrix.should_collide(Spring, Elevator));
    }

    #[test]
    fn layers_are_permissive_until_blocked() {
        let mut filter = CollisionFilter::default();
        let ball = body(0, Ball, 1, false);
        let tile = body(1, Tile, 2, true);
        assert!(filter.permits(&ball, &tile));

        filter.layers.block(2, 1);
        assert!(!filter.permits(&ball, &tile));
        assert!(filter.layers.layers_interact(1, 1));
    }

    #[test]
    fn static_pairs_are_flagged() {
        let wall = body(0, Wall, 0, true);
        let tile = body(1, Tile, 0, true);
        let ball = body(2, Ball, 0, false);
        assert!(CollisionFilter::is_static_pair(&wall, &tile));
        assert!(!CollisionFilter::is_static_pair(&ball, &tile));
    }

    #[test]
    fn config_pairs_replace_default_matrix() {
        let mut pairs = BTreeMap::new();
        pairs.insert(Tile, vec![Tile]);
        let filter = CollisionFilter::from_config(&FilterConfig {
            pairs: Some(pairs),
            blocked_layers: vec![[3, 4]],
        });
        assert!(filter.should_collide(Tile, Tile));
        assert!(!filter.should_collide(Ball, Tile));
        assert!(!filter.layers.layers_interact(4, 3));
    }
}
