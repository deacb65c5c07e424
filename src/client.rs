//! Mail service client interface — the consumed seam between the batch engine
//! and whatever remote mail service actually serves messages and attachments.
//!
//! The engine only ever talks to [`MailService`]; production code plugs in
//! [`GraphMailService`](crate::graph::GraphMailService), tests plug in a
//! deterministic mock. Implementations must be safe for concurrent use: the
//! bounded parallel runner shares one client across all in-flight workers.

use crate::error::Result;
use crate::types::{AttachmentDescriptor, MessageDescriptor, MessageId};

/// Server-side filter applied when listing messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageFilter {
    /// No filter — list the newest messages regardless of content
    All,
    /// Only messages that carry at least one attachment
    #[default]
    HasAttachments,
}

/// Message fields requested from the service, beyond the identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageField {
    /// Sender address / display name
    Sender,
    /// Subject line
    Subject,
}

/// Parameters for a message listing call.
#[derive(Clone, Debug)]
pub struct MessageQuery {
    /// Maximum number of messages to return
    pub max_count: usize,
    /// Server-side filter predicate
    pub filter: MessageFilter,
    /// Fields to populate on each descriptor
    pub fields: Vec<MessageField>,
}

impl MessageQuery {
    /// Query for the newest `max_count` messages with attachments, selecting
    /// sender and subject. This is the batch shape the engine uses.
    pub fn batch(max_count: usize) -> Self {
        Self {
            max_count,
            filter: MessageFilter::HasAttachments,
            fields: vec![MessageField::Sender, MessageField::Subject],
        }
    }
}

/// Abstraction over the remote mail service, enabling testability.
///
/// Authentication is entirely the implementation's concern: the engine expects
/// an already-authenticated client and maps credential failures surfaced here
/// to [`Error::Auth`](crate::Error::Auth).
#[async_trait::async_trait]
pub trait MailService: Send + Sync {
    /// List up to `query.max_count` messages matching the query filter,
    /// in the service's newest-first order.
    async fn list_messages(&self, query: &MessageQuery) -> Result<Vec<MessageDescriptor>>;

    /// Fetch the attachment descriptors for one message.
    async fn get_attachments(&self, id: &MessageId) -> Result<Vec<AttachmentDescriptor>>;
}
