//! Run reporting — an injected sink for per-item and per-run records.
//!
//! Runners never print; they emit through a [`ReportSink`] so embedders can
//! route output wherever they like and tests can record it deterministically.

use crate::types::{ItemFailure, ItemResult, RunSummary, Strategy};

/// Sink for per-item and per-run report records.
///
/// Implementations must be `Send + Sync`: the bounded parallel runner calls
/// the sink from its aggregating task while workers are still in flight.
/// Calls for a given run are ordered (items before the summary), but item
/// order under the parallel strategy is completion order.
pub trait ReportSink: Send + Sync {
    /// A strategy run is about to start over `batch_size` items.
    fn run_started(&self, strategy: Strategy, batch_size: usize, concurrency: usize);

    /// One item finished processing successfully.
    fn item_completed(&self, result: &ItemResult);

    /// One item's attachment fetch failed.
    fn item_failed(&self, failure: &ItemFailure);

    /// The whole run finished; `summary` holds the aggregate totals.
    fn run_completed(&self, summary: &RunSummary);
}

/// Console reporter printing the classic comparison format.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Create a console reporter.
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for ConsoleReporter {
    fn run_started(&self, strategy: Strategy, batch_size: usize, concurrency: usize) {
        match strategy {
            Strategy::Sequential => {
                println!("### Starting serial processing - {} messages", batch_size);
            }
            Strategy::Parallel => {
                println!(
                    "### Starting parallel processing - {} messages, {} in parallel",
                    batch_size, concurrency
                );
            }
        }
    }

    fn item_completed(&self, result: &ItemResult) {
        println!(
            "{}, attachments:{}, bytes:{}, time:{}",
            result.id.truncated(),
            result.attachment_count,
            result.total_bytes,
            result.elapsed.as_secs_f64()
        );
    }

    fn item_failed(&self, failure: &ItemFailure) {
        println!("{}, FAILED: {}", failure.id.truncated(), failure.error);
    }

    fn run_completed(&self, summary: &RunSummary) {
        if summary.failed > 0 {
            println!(
                "### Total time {}: {}, total bytes {}: {} ({} failed)",
                summary.strategy.label(),
                summary.total_elapsed.as_secs_f64(),
                summary.strategy.label(),
                summary.total_bytes,
                summary.failed
            );
        } else {
            println!(
                "### Total time {}: {}, total bytes {}: {}",
                summary.strategy.label(),
                summary.total_elapsed.as_secs_f64(),
                summary.strategy.label(),
                summary.total_bytes
            );
        }
    }
}

/// Sink that discards everything. Useful when only the returned
/// [`RunReport`](crate::RunReport) matters.
#[derive(Debug, Default)]
pub struct NullReporter;

impl ReportSink for NullReporter {
    fn run_started(&self, _strategy: Strategy, _batch_size: usize, _concurrency: usize) {}
    fn item_completed(&self, _result: &ItemResult) {}
    fn item_failed(&self, _failure: &ItemFailure) {}
    fn run_completed(&self, _summary: &RunSummary) {}
}
