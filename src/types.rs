//! Core types for mailbatch

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unique identifier for a mail message
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

/// Number of trailing identifier characters shown in per-item report lines.
const TRUNCATED_ID_LEN: usize = 12;

impl MessageId {
    /// Create a new MessageId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing characters of the identifier, for compact report lines.
    ///
    /// Remote message identifiers are long and share a common prefix; the tail
    /// is the distinguishing part. Identifiers shorter than the truncation
    /// window are returned whole.
    pub fn truncated(&self) -> &str {
        match self.0.char_indices().rev().nth(TRUNCATED_ID_LEN - 1) {
            Some((idx, _)) => &self.0[idx..],
            None => &self.0,
        }
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for MessageId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MessageId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == **other
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mail message as returned by the mail service listing.
///
/// Immutable once fetched; owned by the batch for the duration of one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    /// Unique message identifier
    pub id: MessageId,
    /// Sender address or display name
    #[serde(default)]
    pub sender: String,
    /// Message subject line
    #[serde(default)]
    pub subject: String,
}

/// One attachment of a message, as returned by the mail service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    /// Attachment file name
    #[serde(default)]
    pub name: String,
    /// MIME content type, when the service reports one
    #[serde(default)]
    pub content_type: Option<String>,
    /// Size in bytes; services may omit this, in which case it counts as zero
    #[serde(default)]
    pub size_bytes: Option<u64>,
}

impl AttachmentDescriptor {
    /// Size in bytes, treating an absent size as zero.
    pub fn size_or_zero(&self) -> u64 {
        self.size_bytes.unwrap_or(0)
    }
}

/// Result of processing a single message: its attachment stats and fetch timing.
///
/// Produced once per message per run; the elapsed duration strictly bounds the
/// attachment fetch itself, excluding any queueing delay imposed by a runner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemResult {
    /// Identifier of the processed message
    pub id: MessageId,
    /// Number of attachments on the message
    pub attachment_count: usize,
    /// Sum of attachment sizes in bytes (absent sizes count as zero)
    pub total_bytes: u64,
    /// Wall-clock duration of the attachment fetch
    pub elapsed: Duration,
}

/// A message whose attachment fetch failed.
///
/// Under the best-effort-partial policy the item is excluded from the byte and
/// count aggregates and surfaced through the report sink instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemFailure {
    /// Identifier of the failed message
    pub id: MessageId,
    /// Error message from the attachment fetch
    pub error: String,
}

/// Execution strategy for a batch run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One item at a time, in input order
    Sequential,
    /// Bounded-parallel fan-out with a concurrency cap
    Parallel,
}

impl Strategy {
    /// Human-readable label used in report lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sequential => "serial",
            Self::Parallel => "parallel",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate statistics for one strategy run over one batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Which strategy produced this summary
    pub strategy: Strategy,
    /// Concurrency cap in effect (1 for sequential)
    pub concurrency: usize,
    /// Wall-clock time for the whole batch
    pub total_elapsed: Duration,
    /// Accumulated bytes across all successfully processed items
    pub total_bytes: u64,
    /// Number of items processed successfully
    pub succeeded: usize,
    /// Number of items whose attachment fetch failed
    pub failed: usize,
}

/// Full outcome of one strategy run: per-item records plus the summary.
///
/// Sequential runs list `results` in input order; parallel runs list them in
/// completion order, which is unspecified and must not be relied upon.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Per-item results for successfully processed messages
    pub results: Vec<ItemResult>,
    /// Items whose attachment fetch failed
    pub failures: Vec<ItemFailure>,
    /// Aggregate statistics for the run
    pub summary: RunSummary,
}
