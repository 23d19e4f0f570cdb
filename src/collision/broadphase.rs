use std::collections::HashSet;

use crate::{
    collision::{
        filter::CollisionFilter, governor::PerformanceGovernor, grid::SpatialGrid,
        narrowphase::NarrowPhase,
    },
    config::{DEFAULT_CELL_SIZE, DEFAULT_DISTANCE_MARGIN},
    core::body::CollidableBody,
    utils::allocator::EntityId,
};

/// Unordered candidate pair, stored as slots into the frame's body list.
/// `first` always holds the body with the smaller id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidatePair {
    pub first: usize,
    pub second: usize,
}

/// Broad-phase driver: buckets bodies into the grid and emits budgeted,
/// filtered, de-duplicated candidate pairs.
pub struct BroadPhase {
    grid: SpatialGrid,
    seen: HashSet<(EntityId, EntityId)>,
    pub distance_margin: f32,
}

impl Default for BroadPhase {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, DEFAULT_DISTANCE_MARGIN)
    }
}

impl BroadPhase {
    pub fn new(cell_size: f32, distance_margin: f32) -> Self {
        Self {
            grid: SpatialGrid::new(cell_size),
            seen: HashSet::new(),
            distance_margin,
        }
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SpatialGrid {
        &mut self.grid
    }

    /// Rebuilds the grid from scratch. Returns the populated cell count.
    pub fn rebuild(&mut self, bodies: &[CollidableBody]) -> usize {
        self.grid.clear();
        for (slot, body) in bodies.iter().enumerate() {
            self.grid.insert(slot, &body.bounds);
        }
        self.grid.populated_cell_count()
    }

    /// Fills `out` with the pairs that deserve a narrow-phase test.
    ///
    /// Per unique pair: budget claim, type/layer filter, static-pair reject,
    /// center-distance reject. When the budget runs out generation stops for
    /// the rest of the frame.
    pub fn generate(
        &mut self,
        bodies: &[CollidableBody],
        filter: &CollisionFilter,
        governor: &mut PerformanceGovernor,
        out: &mut Vec<CandidatePair>,
    ) {
        out.clear();
        self.seen.clear();
        let mut sink = PairSink {
            bodies,
            filter,
            governor,
            seen: &mut self.seen,
            distance_margin: self.distance_margin,
            out,
        };

        for &key in self.grid.occupied_cells() {
            let slots = self.grid.query(key);
            for (i, &slot_a) in slots.iter().enumerate() {
                for &slot_b in &slots[i + 1..] {
                    if !sink.offer(slot_a, slot_b) {
                        return;
                    }
                }
            }
        }

        // Oversized bodies are not bucketed, so they meet every other body.
        for &large in self.grid.oversized() {
            for slot in (0..bodies.len()).filter(|&slot| slot != large) {
                if !sink.offer(large, slot) {
                    return;
                }
            }
        }
    }
}

struct PairSink<'a> {
    bodies: &'a [CollidableBody],
    filter: &'a CollisionFilter,
    governor: &'a mut PerformanceGovernor,
    seen: &'a mut HashSet<(EntityId, EntityId)>,
    distance_margin: f32,
    out: &'a mut Vec<CandidatePair>,
}

impl PairSink<'_> {
    /// Runs one slot pair through dedup, budget and rejects. Returns `false`
    /// once the budget is exhausted.
    fn offer(&mut self, slot_a: usize, slot_b: usize) -> bool {
        let (a, b) = (&self.bodies[slot_a], &self.bodies[slot_b]);
        let pair = if a.id <= b.id {
            CandidatePair {
                first: slot_a,
                second: slot_b,
            }
        } else {
            CandidatePair {
                first: slot_b,
                second: slot_a,
            }
        };

        let pair_key = (self.bodies[pair.first].id, self.bodies[pair.second].id);
        if !self.seen.insert(pair_key) {
            return true;
        }

        if !self.governor.try_claim_check() {
            return false;
        }

        if !self.filter.permits(a, b) || CollisionFilter::is_static_pair(a, b) {
            return true;
        }

        if NarrowPhase::too_far_apart(&a.bounds, &b.bounds, self.distance_margin) {
            return true;
        }

        self.governor.record_check_executed();
        self.out.push(pair);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{body::CollisionType, types::Aabb};
    use glam::Vec2;

    fn body(index: u32, kind: CollisionType, x: f32, y: f32, size: f32) -> CollidableBody {
        CollidableBody::new(
            EntityId::from_index(index),
            kind,
            Aabb::from_position_size(Vec2::new(x, y), Vec2::splat(size)),
        )
    }

    fn run(bodies: &[CollidableBody], ceiling: usize) -> (Vec<CandidatePair>, PerformanceGovernor) {
        let mut broadphase = BroadPhase::new(64.0, 1.5);
        let mut governor = PerformanceGovernor::new(ceiling);
        governor.begin_frame();
        broadphase.rebuild(bodies);
        let mut pairs = Vec::new();
        broadphase.generate(bodies, &CollisionFilter::default(), &mut governor, &mut pairs);
        (pairs, governor)
    }

    #[test]
    fn pair_sharing_several_cells_is_emitted_once() {
        // Both bodies straddle the same four cells.
        let bodies = [
            body(0, CollisionType::Ball, 56.0, 56.0, 16.0),
            body(1, CollisionType::Tile, 60.0, 60.0, 16.0),
        ];
        let (pairs, governor) = run(&bodies, 100);

        assert_eq!(pairs, vec![CandidatePair { first: 0, second: 1 }]);
        assert_eq!(governor.metrics().checks_attempted, 1);
        assert_eq!(governor.metrics().checks_executed, 1);
    }

    #[test]
    fn first_slot_holds_smaller_id() {
        let bodies = [
            body(9, CollisionType::Tile, 0.0, 0.0, 16.0),
            body(2, CollisionType::Ball, 4.0, 4.0, 16.0),
        ];
        let (pairs, _) = run(&bodies, 100);
        assert_eq!(pairs, vec![CandidatePair { first: 1, second: 0 }]);
    }

    #[test]
    fn filtered_and_static_pairs_never_reach_narrow_phase() {
        let mut wall = body(0, CollisionType::Wall, 0.0, 0.0, 16.0);
        let mut tile = body(1, CollisionType::Tile, 4.0, 4.0, 16.0);
        wall.is_static = true;
        tile.is_static = true;
        let other_tile = body(2, CollisionType::Tile, 8.0, 8.0, 16.0);

        let (pairs, governor) = run(&[wall, tile, other_tile], 100);
        assert!(pairs.is_empty());
        assert_eq!(governor.metrics().checks_attempted, 3);
        assert_eq!(governor.metrics().checks_executed, 0);
    }

    #[test]
    fn exhausted_budget_drops_remaining_pairs() {
        let bodies: Vec<_> = (0..6)
            .map(|i| {
                let kind = if i == 0 {
                    CollisionType::Ball
                } else {
                    CollisionType::Tile
                };
                body(i, kind, i as f32, 0.0, 16.0)
            })
            .collect();
        let (pairs, governor) = run(&bodies, 2);

        assert_eq!(pairs.len(), 2);
        let metrics = governor.metrics();
        assert_eq!(metrics.checks_executed, 2);
        assert!(metrics.budget_exhausted);
    }

    #[test]
    fn oversized_body_still_meets_small_ones() {
        let mut floor = body(0, CollisionType::Wall, -1.0e5, 0.0, 2.0e5);
        floor.is_static = true;
        let bodies = [
            floor,
            body(1, CollisionType::Ball, 5000.0, 5000.0, 8.0),
            body(2, CollisionType::Ball, -7000.0, 100.0, 8.0),
        ];

        let (pairs, governor) = run(&bodies, 100);

        assert_eq!(
            pairs,
            vec![
                CandidatePair { first: 0, second: 1 },
                CandidatePair { first: 0, second: 2 },
            ]
        );
        assert_eq!(governor.metrics().checks_executed, 2);
    }
}
