use serde::{Deserialize, Serialize};

/// Read-only per-frame diagnostics snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMetrics {
    /// Bodies that entered the pass.
    pub bodies_considered: usize,
    /// Entities skipped for missing or invalid components.
    pub bodies_skipped: usize,
    pub cells_populated: usize,
    /// Unique candidate pairs that reached the budget check.
    pub checks_attempted: usize,
    /// Narrow-phase tests actually run.
    pub checks_executed: usize,
    pub collisions_found: usize,
    pub events_dispatched: usize,
    pub collaborator_failures: usize,
    pub check_ceiling: usize,
    pub budget_exhausted: bool,
}

/// Owns the per-frame check ceiling and the counters of the current pass.
///
/// Counters are pass-scoped: [`begin_frame`](Self::begin_frame) wipes them so
/// nothing carries over between frames.
#[derive(Debug, Clone)]
pub struct PerformanceGovernor {
    ceiling: usize,
    current: FrameMetrics,
}

impl PerformanceGovernor {
    pub fn new(ceiling: usize) -> Self {
        Self {
            ceiling,
            current: FrameMetrics {
                check_ceiling: ceiling,
                ..FrameMetrics::default()
            },
        }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Takes effect from the next frame.
    pub fn set_ceiling(&mut self, ceiling: usize) {
        self.ceiling = ceiling;
    }

    pub fn begin_frame(&mut self) {
        self.current = FrameMetrics {
            check_ceiling: self.ceiling,
            ..FrameMetrics::default()
        };
    }

    /// Counts one candidate pair and claims a narrow-phase slot if any remain.
    ///
    /// Once this returns `false` the frame is marked exhausted and the caller
    /// must stop generating pairs; nothing is deferred to the next frame.
    pub fn try_claim_check(&mut self) -> bool {
        self.current.checks_attempted += 1;
        if self.current.checks_executed >= self.current.check_ceiling {
            if !self.current.budget_exhausted {
                log::debug!(
                    "collision check budget exhausted at {} checks",
                    self.current.check_ceiling
                );
            }
            self.current.budget_exhausted = true;
            return false;
        }
        true
    }

    pub fn record_check_executed(&mut self) {
        self.current.checks_executed += 1;
    }

    pub fn has_budget(&self) -> bool {
        self.current.checks_executed < self.current.check_ceiling
    }

    pub fn record_bodies(&mut self, considered: usize, skipped: usize) {
        self.current.bodies_considered = considered;
        self.current.bodies_skipped = skipped;
    }

    pub fn record_cells(&mut self, populated: usize) {
        self.current.cells_populated = populated;
    }

    pub fn record_collision(&mut self) {
        self.current.collisions_found += 1;
    }

    pub fn record_event(&mut self) {
        self.current.events_dispatched += 1;
    }

    pub fn record_collaborator_failures(&mut self, failures: usize) {
        self.current.collaborator_failures += failures;
    }

    pub fn metrics(&self) -> FrameMetrics {
        self.current
    }
}
