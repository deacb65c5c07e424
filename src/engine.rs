//! Top-level batch engine — wires the mail service, configuration, and report
//! sink together and exposes the strategy runs.

use crate::client::{MailService, MessageQuery};
use crate::config::Config;
use crate::error::Result;
use crate::report::ReportSink;
use crate::runner::{run_parallel, run_sequential};
use crate::types::{MessageDescriptor, RunReport};
use std::sync::Arc;

/// Outcome of running both strategies over the same workload.
#[derive(Clone, Debug)]
pub struct Comparison {
    /// Report from the sequential run
    pub sequential: RunReport,
    /// Report from the bounded-parallel run
    pub parallel: RunReport,
}

impl Comparison {
    /// Wall-clock speedup of the parallel run over the sequential run.
    ///
    /// Returns `None` when the parallel run took no measurable time (empty
    /// batch), where a ratio would be meaningless.
    pub fn speedup(&self) -> Option<f64> {
        let parallel = self.parallel.summary.total_elapsed.as_secs_f64();
        if parallel == 0.0 {
            return None;
        }
        Some(self.sequential.summary.total_elapsed.as_secs_f64() / parallel)
    }
}

/// Batch-fetch engine comparing sequential and bounded-parallel processing.
///
/// Holds an already-authenticated [`MailService`], a validated [`Config`],
/// and a [`ReportSink`]. Each strategy run fetches a batch of messages (or
/// reuses one, per config), processes every item's attachments, and reports
/// per-item and aggregate statistics.
pub struct BatchEngine {
    client: Arc<dyn MailService>,
    config: Config,
    sink: Arc<dyn ReportSink>,
}

impl BatchEngine {
    /// Create an engine, validating the configuration.
    pub fn new(
        client: Arc<dyn MailService>,
        config: Config,
        sink: Arc<dyn ReportSink>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            config,
            sink,
        })
    }

    /// The configuration in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch one batch of message descriptors from the mail service.
    ///
    /// A `message_count` of zero short-circuits to an empty batch without a
    /// remote call. Auth and service errors propagate; nothing has been
    /// dispatched or reported at that point.
    pub async fn fetch_batch(&self) -> Result<Vec<MessageDescriptor>> {
        if self.config.message_count == 0 {
            return Ok(Vec::new());
        }
        let query = MessageQuery::batch(self.config.message_count);
        let batch = self.client.list_messages(&query).await?;
        tracing::info!(batch_size = batch.len(), "Fetched message batch");
        Ok(batch)
    }

    /// Fetch a batch and process it sequentially.
    pub async fn run_sequential(&self) -> Result<RunReport> {
        let batch = self.fetch_batch().await?;
        Ok(run_sequential(self.client.as_ref(), &batch, self.sink.as_ref()).await)
    }

    /// Fetch a batch and process it with bounded parallelism
    /// (`config.max_parallelism` fetches in flight at most).
    pub async fn run_parallel(&self) -> Result<RunReport> {
        let batch = self.fetch_batch().await?;
        Ok(run_parallel(
            Arc::clone(&self.client),
            batch,
            self.config.max_parallelism,
            self.sink.as_ref(),
        )
        .await)
    }

    /// Run the sequential strategy, then the parallel strategy, and return
    /// both reports.
    ///
    /// With `refetch_per_strategy` (the default) each run fetches its own
    /// batch, matching the reference behavior; the mailbox may drift between
    /// runs. With it disabled, one batch is fetched and shared for a
    /// drift-free comparison.
    pub async fn run_comparison(&self) -> Result<Comparison> {
        if self.config.refetch_per_strategy {
            let sequential = self.run_sequential().await?;
            let parallel = self.run_parallel().await?;
            return Ok(Comparison {
                sequential,
                parallel,
            });
        }

        let batch = self.fetch_batch().await?;
        let sequential = run_sequential(self.client.as_ref(), &batch, self.sink.as_ref()).await;
        let parallel = run_parallel(
            Arc::clone(&self.client),
            batch,
            self.config.max_parallelism,
            self.sink.as_ref(),
        )
        .await;
        Ok(Comparison {
            sequential,
            parallel,
        })
    }
}
