use log::{log_enabled, warn, Level};
use std::time::{Duration, Instant};

/// Scoped trace span: logs entry and elapsed time at `trace` level.
pub struct TraceSpan<'a> {
    label: &'a str,
    start: Instant,
}

impl<'a> TraceSpan<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for TraceSpan<'_> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            log::trace!("end {} ({} µs)", self.label, self.start.elapsed().as_micros());
        }
    }
}

/// Logs a warning when a collision pass ran longer than its time budget.
/// Returns whether the budget was exceeded.
pub fn warn_if_pass_over_budget(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if budget_ms > 0.0 && elapsed_ms > budget_ms {
        warn!("collision pass exceeded budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_check_only_fires_above_limit() {
        assert!(!warn_if_pass_over_budget(Duration::from_micros(500), 2.0));
        assert!(warn_if_pass_over_budget(Duration::from_millis(3), 2.0));
        assert!(!warn_if_pass_over_budget(Duration::from_millis(3), 0.0));
    }
}
