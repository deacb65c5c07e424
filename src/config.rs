//! Configuration types for mailbatch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Batch processing configuration
///
/// All fields have sensible defaults matching the reference workload
/// (20 messages, 10-wide parallel fan-out), so `Config::default()` works
/// out of the box. Values are consumed by [`BatchEngine`](crate::BatchEngine);
/// how they are loaded (file, env, hardcoded) is up to the embedding
/// application.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Number of messages to request from the mail service per batch (default: 20)
    ///
    /// Zero is legal and produces an empty run: no fetches, zero totals.
    #[serde(default = "default_message_count")]
    pub message_count: usize,

    /// Concurrency cap K for the bounded parallel runner (default: 10)
    ///
    /// Must be at least 1. May exceed the batch size, in which case the
    /// effective parallelism is bounded by the batch.
    #[serde(default = "default_max_parallelism")]
    pub max_parallelism: usize,

    /// Fetch a fresh batch for each strategy run (default: true)
    ///
    /// Matches the reference behavior, at the cost of the two strategies
    /// possibly seeing different batches if the mailbox changes between runs.
    /// Set to false to fetch once and reuse the batch for a drift-free
    /// comparison.
    #[serde(default = "default_true")]
    pub refetch_per_strategy: bool,
}

impl Config {
    /// Validate the configuration, returning a [`Error::Config`] describing
    /// the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.max_parallelism == 0 {
            return Err(Error::config(
                "max_parallelism must be at least 1",
                "max_parallelism",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message_count: default_message_count(),
            max_parallelism: default_max_parallelism(),
            refetch_per_strategy: true,
        }
    }
}

fn default_message_count() -> usize {
    20
}

fn default_max_parallelism() -> usize {
    10
}

fn default_true() -> bool {
    true
}
