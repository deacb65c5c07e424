//! Per-item processing — the dependent attachment fetch for one message,
//! with wall-clock timing that strictly bounds the fetch call.

use crate::client::MailService;
use crate::error::Result;
use crate::types::{ItemResult, MessageDescriptor};
use std::time::Instant;

/// Fetch one message's attachments and produce its [`ItemResult`].
///
/// The elapsed duration is taken immediately around the `get_attachments`
/// call, so queueing delay while waiting for a worker slot never inflates it.
/// Fetch errors propagate unchanged; the calling runner decides policy.
pub async fn process_message(
    client: &dyn MailService,
    message: &MessageDescriptor,
) -> Result<ItemResult> {
    let start = Instant::now();
    let attachments = client.get_attachments(&message.id).await?;
    let elapsed = start.elapsed();

    let total_bytes: u64 = attachments.iter().map(|a| a.size_or_zero()).sum();

    tracing::debug!(
        message_id = %message.id,
        attachments = attachments.len(),
        bytes = total_bytes,
        elapsed_ms = elapsed.as_millis() as u64,
        "Processed message"
    );

    Ok(ItemResult {
        id: message.id.clone(),
        attachment_count: attachments.len(),
        total_bytes,
        elapsed,
    })
}
