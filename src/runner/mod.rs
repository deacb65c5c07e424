//! Batch runners — sequential and bounded-parallel execution strategies.
//!
//! Both runners drive [`process_message`](crate::processor::process_message)
//! over one finite batch, emit per-item records through a
//! [`ReportSink`](crate::report::ReportSink), and return a
//! [`RunReport`](crate::types::RunReport) with identical aggregate semantics.
//! They differ only in scheduling: input-order serial vs. fan-out capped at K
//! in-flight fetches with unspecified completion order.

mod parallel;
mod sequential;

pub use parallel::run_parallel;
pub use sequential::run_sequential;

use crate::report::ReportSink;
use crate::types::{ItemFailure, ItemResult, RunReport, RunSummary, Strategy};
use std::time::Duration;

/// Per-item outcome under the best-effort-partial policy.
pub(crate) type ItemOutcome = Result<ItemResult, ItemFailure>;

/// Single-owner accumulator for per-item outcomes.
///
/// Exactly one task owns an accumulator for the duration of a run; the
/// parallel runner feeds it from the task consuming the completion stream, so
/// no aggregate update ever races another.
pub(crate) struct RunAccumulator {
    results: Vec<ItemResult>,
    failures: Vec<ItemFailure>,
    total_bytes: u64,
}

impl RunAccumulator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
            failures: Vec::new(),
            total_bytes: 0,
        }
    }

    /// Fold one outcome into the running totals and forward it to the sink.
    ///
    /// Failed items are reported but excluded from the byte and count
    /// aggregates.
    pub(crate) fn record(&mut self, outcome: ItemOutcome, sink: &dyn ReportSink) {
        match outcome {
            Ok(result) => {
                self.total_bytes += result.total_bytes;
                sink.item_completed(&result);
                self.results.push(result);
            }
            Err(failure) => {
                sink.item_failed(&failure);
                self.failures.push(failure);
            }
        }
    }

    /// Close out the run: build the summary, emit it, and hand back the report.
    pub(crate) fn finish(
        self,
        strategy: Strategy,
        concurrency: usize,
        total_elapsed: Duration,
        sink: &dyn ReportSink,
    ) -> RunReport {
        let summary = RunSummary {
            strategy,
            concurrency,
            total_elapsed,
            total_bytes: self.total_bytes,
            succeeded: self.results.len(),
            failed: self.failures.len(),
        };
        sink.run_completed(&summary);
        RunReport {
            results: self.results,
            failures: self.failures,
            summary,
        }
    }
}

/// Report for a degenerate empty batch: nothing dispatched, zero totals.
pub(crate) fn empty_run(
    strategy: Strategy,
    concurrency: usize,
    sink: &dyn ReportSink,
) -> RunReport {
    RunAccumulator::with_capacity(0).finish(strategy, concurrency, Duration::ZERO, sink)
}
