use std::time::Instant;

use glam::Vec2;
use log::{debug, log_enabled, Level};

use crate::{
    collision::{
        broadphase::{BroadPhase, CandidatePair},
        collaborators::Collaborators,
        dispatch::EventDispatcher,
        events::{CollisionEvent, EventClassifier},
        filter::CollisionFilter,
        governor::{FrameMetrics, PerformanceGovernor},
        narrowphase::NarrowPhase,
        resolver::{Resolution, Resolver},
    },
    config::CollisionConfig,
    core::body::CollidableBody,
    error::ConfigError,
    utils::{
        logging::{warn_if_pass_over_budget, TraceSpan},
        profiling::{PassProfiler, ScopedTimer},
    },
    world::{EntityRecord, EntitySource},
};

/// Runs the per-frame detect → classify → dispatch → resolve pass.
///
/// One manager owns its filter, grid and budget; nothing is global, so any
/// number of independent simulations can run side by side. All frame data
/// (bodies, pairs, events, counters) is rebuilt on every [`step`](Self::step);
/// only the buffers are reused.
pub struct CollisionManager {
    config: CollisionConfig,
    pub filter: CollisionFilter,
    pub classifier: EventClassifier,
    pub resolver: Resolver,
    broadphase: BroadPhase,
    governor: PerformanceGovernor,
    dispatcher: EventDispatcher,
    profiler: PassProfiler,
    records: Vec<EntityRecord>,
    bodies: Vec<CollidableBody>,
    /// Velocity of each body at the start of the pass, by slot.
    velocities: Vec<Vec2>,
    pairs: Vec<CandidatePair>,
    events: Vec<CollisionEvent>,
    resolutions: Vec<Resolution>,
}

impl Default for CollisionManager {
    fn default() -> Self {
        Self::from_valid_config(CollisionConfig::default())
    }
}

impl CollisionManager {
    pub fn new(config: CollisionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CollisionConfig) -> Self {
        Self {
            filter: CollisionFilter::from_config(&config.filter),
            classifier: EventClassifier::default(),
            resolver: Resolver::new(config.ground_tolerance, config.landing_speed),
            broadphase: BroadPhase::new(config.cell_size, config.distance_margin),
            governor: PerformanceGovernor::new(config.check_budget),
            dispatcher: EventDispatcher::default(),
            profiler: PassProfiler::default(),
            records: Vec::new(),
            bodies: Vec::new(),
            velocities: Vec::new(),
            pairs: Vec::new(),
            events: Vec::new(),
            resolutions: Vec::new(),
            config,
        }
    }

    pub fn with_collaborators(mut self, collaborators: Collaborators) -> Self {
        self.dispatcher.set_collaborators(collaborators);
        self
    }

    pub fn set_collaborators(&mut self, collaborators: Collaborators) {
        self.dispatcher.set_collaborators(collaborators);
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Applies a new configuration; the filter is rebuilt from its `filter` section.
    pub fn reconfigure(&mut self, config: CollisionConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.cell_size != self.broadphase.grid().cell_size() {
            self.broadphase.grid_mut().set_cell_size(config.cell_size);
        }
        self.broadphase.distance_margin = config.distance_margin;
        self.governor.set_ceiling(config.check_budget);
        self.resolver = Resolver::new(config.ground_tolerance, config.landing_speed);
        self.filter = CollisionFilter::from_config(&config.filter);
        self.config = config;
        Ok(())
    }

    /// Changes the per-frame narrow-phase ceiling from the next frame on.
    pub fn set_check_budget(&mut self, ceiling: usize) {
        self.config.check_budget = ceiling;
        self.governor.set_ceiling(ceiling);
    }

    pub fn check_budget(&self) -> usize {
        self.governor.ceiling()
    }

    /// Runs one collision pass against `source` and returns its metrics.
    pub fn step<S: EntitySource + ?Sized>(
        &mut self,
        source: &mut S,
        timestamp: f64,
    ) -> FrameMetrics {
        let _span = TraceSpan::new("collision::step");
        let pass_start = Instant::now();

        self.governor.begin_frame();
        self.profiler.reset();
        self.events.clear();
        self.resolutions.clear();

        {
            let _timer = ScopedTimer::new(&mut self.profiler.gather_time);
            let skipped = gather_bodies(
                &*source,
                &mut self.records,
                &mut self.bodies,
                &mut self.velocities,
            );
            self.governor.record_bodies(self.bodies.len(), skipped);
        }

        {
            let _timer = ScopedTimer::new(&mut self.profiler.grid_time);
            let cells = self.broadphase.rebuild(&self.bodies);
            self.governor.record_cells(cells);
        }

        {
            let _timer = ScopedTimer::new(&mut self.profiler.broad_phase_time);
            self.broadphase.generate(
                &self.bodies,
                &self.filter,
                &mut self.governor,
                &mut self.pairs,
            );
        }

        for pair in &self.pairs {
            let (a, b) = (&self.bodies[pair.first], &self.bodies[pair.second]);

            let narrow_start = Instant::now();
            let overlapping = NarrowPhase::test(a, b);
            self.profiler.narrow_phase_time += narrow_start.elapsed();
            if !overlapping {
                continue;
            }
            self.governor.record_collision();

            let Some((kind, subject, partner)) = self.classifier.classify(a, b) else {
                continue;
            };

            let dispatch_start = Instant::now();
            let (velocity_a, velocity_b) =
                (self.velocities[pair.first], self.velocities[pair.second]);
            let incident = if subject.id == a.id {
                velocity_a - velocity_b
            } else {
                velocity_b - velocity_a
            };
            let event = CollisionEvent::new(kind, *subject, *partner, incident, timestamp);

            let mut failures = self.dispatcher.dispatch(&event);
            let resolution = self.resolver.apply(&event, &mut *source);
            failures += self.dispatcher.dispatch_resolution(&event, &resolution);

            self.governor.record_event();
            self.governor.record_collaborator_failures(failures);
            self.events.push(event);
            self.resolutions.push(resolution);
            self.profiler.dispatch_time += dispatch_start.elapsed();
        }

        self.profiler.total_pass_time = pass_start.elapsed();
        warn_if_pass_over_budget(self.profiler.total_pass_time, self.config.time_budget_ms);
        if log_enabled!(Level::Debug) {
            self.profiler.report();
        }

        self.governor.metrics()
    }

    /// Metrics of the most recent pass.
    pub fn metrics(&self) -> FrameMetrics {
        self.governor.metrics()
    }

    /// Events produced by the most recent pass, in dispatch order.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Resolver output for each entry of [`events`](Self::events).
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn profiler(&self) -> &PassProfiler {
        &self.profiler
    }

    /// Bodies that entered the most recent pass.
    pub fn bodies(&self) -> &[CollidableBody] {
        &self.bodies
    }
}

/// Why an entity sat out a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingCollision,
    MissingBounds,
    Inactive,
    InvalidBounds,
}

fn gather_bodies<S: EntitySource + ?Sized>(
    source: &S,
    records: &mut Vec<EntityRecord>,
    bodies: &mut Vec<CollidableBody>,
    velocities: &mut Vec<Vec2>,
) -> usize {
    records.clear();
    bodies.clear();
    velocities.clear();
    source.collect_active(records);

    let mut skipped = 0;
    for record in records.iter() {
        match body_from_record(record) {
            Ok(body) => {
                velocities.push(source.motion(body.id).map(|m| m.velocity).unwrap_or_default());
                bodies.push(body);
            }
            Err(reason) => {
                debug!("skipping {} for this pass: {:?}", record.id, reason);
                skipped += 1;
            }
        }
    }
    skipped
}

fn body_from_record(record: &EntityRecord) -> Result<CollidableBody, SkipReason> {
    let descriptor = record.collision.ok_or(SkipReason::MissingCollision)?;
    let bounds = record.bounds.ok_or(SkipReason::MissingBounds)?;
    if !descriptor.is_active {
        return Err(SkipReason::Inactive);
    }
    if !bounds.is_valid() {
        return Err(SkipReason::InvalidBounds);
    }
    Ok(CollidableBody::from_descriptor(record.id, &descriptor, bounds))
}
