//! Bounded parallel runner — fan-out with at most K fetches in flight.
//!
//! Items flow through `stream::iter(..).buffer_unordered(k)`, so at most `k`
//! attachment fetches are ever in flight and each item enters the stream
//! exactly once. All aggregation happens in the single task consuming the
//! completion stream; workers never touch shared totals, so no lock or atomic
//! read-modify-write is needed for correctness.

use crate::client::MailService;
use crate::processor::process_message;
use crate::report::ReportSink;
use crate::types::{ItemFailure, MessageDescriptor, RunReport, Strategy};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

use super::{ItemOutcome, RunAccumulator, empty_run};

/// Process the batch with at most `concurrency` fetches in flight.
///
/// Completion order is determined by real fetch latencies and is not stable
/// across runs; per-item elapsed times are measured inside each item's fetch
/// and exclude time spent waiting for a worker slot. The run clock spans from
/// just before the first dispatch to just after the last result is folded in.
///
/// Failure policy is best-effort-partial: one item's failure is reported and
/// excluded from the aggregate while every other item still runs to
/// completion.
pub async fn run_parallel(
    client: Arc<dyn MailService>,
    batch: Vec<MessageDescriptor>,
    concurrency: usize,
    sink: &dyn ReportSink,
) -> RunReport {
    let concurrency = concurrency.max(1);
    let batch_size = batch.len();
    sink.run_started(Strategy::Parallel, batch_size, concurrency);

    if batch.is_empty() {
        return empty_run(Strategy::Parallel, concurrency, sink);
    }

    tracing::info!(
        batch_size = batch_size,
        concurrency = concurrency,
        "Starting parallel run"
    );

    let start = Instant::now();

    let mut completions = stream::iter(batch)
        .map(|message| {
            let client = Arc::clone(&client);
            async move {
                let outcome: ItemOutcome =
                    process_message(client.as_ref(), &message).await.map_err(|e| {
                        tracing::warn!(message_id = %message.id, error = %e, "Attachment fetch failed");
                        ItemFailure {
                            id: message.id.clone(),
                            error: e.to_string(),
                        }
                    });
                outcome
            }
        })
        .buffer_unordered(concurrency);

    // Single aggregating owner: results are folded in here, in completion
    // order, while up to `concurrency` fetches remain in flight.
    let mut acc = RunAccumulator::with_capacity(batch_size);
    while let Some(outcome) = completions.next().await {
        acc.record(outcome, sink);
    }

    let total_elapsed = start.elapsed();
    tracing::info!(
        elapsed_ms = total_elapsed.as_millis() as u64,
        "Parallel run finished"
    );

    acc.finish(Strategy::Parallel, concurrency, total_elapsed, sink)
}
