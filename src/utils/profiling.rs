use std::time::{Duration, Instant};

/// Per-stage timings for the most recent collision pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassProfiler {
    pub gather_time: Duration,
    pub grid_time: Duration,
    pub broad_phase_time: Duration,
    pub narrow_phase_time: Duration,
    pub dispatch_time: Duration,
    pub total_pass_time: Duration,
}

impl PassProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_pass_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        let share = |stage: Duration| (stage.as_micros() as f32 / total_us) * 100.0;
        log::debug!(
            "collision pass {:.3} ms | gather {:.1}% grid {:.1}% broad {:.1}% narrow {:.1}% dispatch {:.1}%",
            self.total_pass_time.as_secs_f32() * 1000.0,
            share(self.gather_time),
            share(self.grid_time),
            share(self.broad_phase_time),
            share(self.narrow_phase_time),
            share(self.dispatch_time),
        );
    }
}

/// Adds the elapsed time of its scope to `output` when dropped.
pub struct ScopedTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
