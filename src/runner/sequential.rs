//! Sequential runner — one item at a time, in input order.

use crate::client::MailService;
use crate::processor::process_message;
use crate::report::ReportSink;
use crate::types::{ItemFailure, MessageDescriptor, RunReport, Strategy};
use std::time::Instant;

use super::{RunAccumulator, empty_run};

/// Process the batch strictly serially, emitting results in input order.
///
/// The run clock starts just before the first item and stops just after the
/// last. Per-item fetch failures follow the best-effort-partial policy: the
/// item is reported failed and excluded from the aggregate, and the run
/// continues with the next item.
pub async fn run_sequential(
    client: &dyn MailService,
    batch: &[MessageDescriptor],
    sink: &dyn ReportSink,
) -> RunReport {
    sink.run_started(Strategy::Sequential, batch.len(), 1);

    if batch.is_empty() {
        return empty_run(Strategy::Sequential, 1, sink);
    }

    tracing::info!(batch_size = batch.len(), "Starting sequential run");

    let start = Instant::now();
    let mut acc = RunAccumulator::with_capacity(batch.len());

    for message in batch {
        let outcome = process_message(client, message).await.map_err(|e| {
            tracing::warn!(message_id = %message.id, error = %e, "Attachment fetch failed");
            ItemFailure {
                id: message.id.clone(),
                error: e.to_string(),
            }
        });
        acc.record(outcome, sink);
    }

    let total_elapsed = start.elapsed();
    tracing::info!(
        elapsed_ms = total_elapsed.as_millis() as u64,
        "Sequential run finished"
    );

    acc.finish(Strategy::Sequential, 1, total_elapsed, sink)
}
