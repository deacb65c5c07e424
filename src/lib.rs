//! # mailbatch
//!
//! Batch mail attachment fetching with directly comparable execution
//! strategies: fully sequential and bounded-parallel with a configurable
//! concurrency cap.
//!
//! ## Design Philosophy
//!
//! mailbatch is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Strategy-comparable** - Both runners do identical per-item work over
//!   the same batch semantics; only the scheduling differs
//! - **Race-free by construction** - All aggregation happens in a single
//!   owning task, never through shared mutable counters
//! - **Sink-driven** - Runners emit records through an injected sink, no
//!   console output interleaved with the core
//!
//! ## Quick Start
//!
//! ```no_run
//! use mailbatch::{BatchEngine, Config, ConsoleReporter, GraphMailService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Token acquisition (device code flow, client credentials, ...) is
//!     // external; hand the engine an already-authenticated client.
//!     let client = Arc::new(GraphMailService::new(std::env::var("GRAPH_TOKEN")?)?);
//!
//!     let config = Config {
//!         message_count: 20,
//!         max_parallelism: 10,
//!         ..Default::default()
//!     };
//!
//!     let engine = BatchEngine::new(client, config, Arc::new(ConsoleReporter::new()))?;
//!     let comparison = engine.run_comparison().await?;
//!
//!     if let Some(speedup) = comparison.speedup() {
//!         println!("parallel speedup: {:.2}x", speedup);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Mail service client interface and query vocabulary
pub mod client;
/// Configuration types
pub mod config;
/// Batch engine orchestration
pub mod engine;
/// Error types
pub mod error;
/// Microsoft Graph mail service client
pub mod graph;
/// Per-item processing (dependent attachment fetch + timing)
pub mod processor;
/// Run reporting sinks
pub mod report;
/// Sequential and bounded-parallel runners
pub mod runner;
/// Core types
pub mod types;


// Re-export commonly used types
pub use client::{MailService, MessageField, MessageFilter, MessageQuery};
pub use config::Config;
pub use engine::{BatchEngine, Comparison};
pub use error::{Error, Result};
pub use graph::GraphMailService;
pub use processor::process_message;
pub use report::{ConsoleReporter, NullReporter, ReportSink};
pub use runner::{run_parallel, run_sequential};
pub use types::{
    AttachmentDescriptor, ItemFailure, ItemResult, MessageDescriptor, MessageId, RunReport,
    RunSummary, Strategy,
};
