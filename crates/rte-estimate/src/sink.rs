//! Result sinks for streaming batch output.

use crate::{RouteFailure, RouteResult};

/// Callbacks invoked by [`Estimator::run_batch_into`][crate::Estimator::run_batch_into].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl ResultSink for Printer {
///     fn on_result(&mut self, result: RouteResult) {
///         println!("{} → {}: {:?}", result.origin, result.destination, result.fastest_time());
///     }
/// }
/// ```
pub trait ResultSink {
    /// Called once per pair, in batch order.
    fn on_result(&mut self, _result: RouteResult) {}

    /// Called once after the last pair.
    fn on_batch_end(&mut self, _summary: &BatchSummary) {}
}

/// A [`ResultSink`] that discards everything.
pub struct NoopSink;

impl ResultSink for NoopSink {}

impl ResultSink for Vec<RouteResult> {
    fn on_result(&mut self, result: RouteResult) {
        self.push(result);
    }
}

/// Outcome counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub pairs:           usize,
    pub routed:          usize,
    pub unreachable:     usize,
    pub tie_in_failures: usize,
    pub routing_errors:  usize,
}

impl BatchSummary {
    pub fn record(&mut self, result: &RouteResult) {
        self.pairs += 1;
        match result.failure() {
            None => self.routed += 1,
            Some(RouteFailure::Unreachable) => self.unreachable += 1,
            Some(RouteFailure::Routing(_)) => self.routing_errors += 1,
            Some(_) => self.tie_in_failures += 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.pairs - self.routed
    }
}
