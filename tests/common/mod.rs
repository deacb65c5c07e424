//! Shared helpers for integration tests: a scriptable, instrumented mock mail
//! service and a recording report sink.

use async_trait::async_trait;
use mailbatch::{
    AttachmentDescriptor, Error, ItemFailure, ItemResult, MailService, MessageDescriptor,
    MessageId, MessageQuery, ReportSink, Result, RunSummary, Strategy,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted message: attachment sizes, simulated fetch latency, and
/// whether the attachment fetch should fail.
#[derive(Clone, Debug)]
pub struct MockMessage {
    pub id: String,
    pub sizes: Vec<Option<u64>>,
    pub latency: Duration,
    pub fail: bool,
}

impl MockMessage {
    pub fn new(id: &str, sizes: &[u64]) -> Self {
        Self {
            id: id.to_string(),
            sizes: sizes.iter().copied().map(Some).collect(),
            latency: Duration::ZERO,
            fail: false,
        }
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

/// Deterministic mail service with concurrency instrumentation: tracks the
/// number of `get_attachments` calls currently in flight and the maximum
/// observed at any instant.
pub struct MockMailService {
    messages: Vec<MockMessage>,
    auth_error: Option<String>,
    list_calls: Arc<AtomicUsize>,
    fetch_calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockMailService {
    pub fn new(messages: Vec<MockMessage>) -> Self {
        Self {
            messages,
            auth_error: None,
            list_calls: Arc::new(AtomicUsize::new(0)),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// `count` messages `msg-0..`, each with one attachment of `bytes_each`
    /// bytes and the given fetch latency.
    pub fn uniform(count: usize, bytes_each: u64, latency: Duration) -> Self {
        Self::new(
            (0..count)
                .map(|i| MockMessage::new(&format!("msg-{}", i), &[bytes_each]).latency(latency))
                .collect(),
        )
    }

    pub fn failing_auth(mut self, message: &str) -> Self {
        self.auth_error = Some(message.to_string());
        self
    }

    pub fn fetch_call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetch_calls)
    }

    pub fn max_in_flight_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.max_in_flight)
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn list_messages(&self, query: &MessageQuery) -> Result<Vec<MessageDescriptor>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.auth_error {
            return Err(Error::Auth(message.clone()));
        }
        Ok(self
            .messages
            .iter()
            .take(query.max_count)
            .map(|m| MessageDescriptor {
                id: MessageId::new(&m.id),
                sender: format!("{}@example.com", m.id),
                subject: format!("subject for {}", m.id),
            })
            .collect())
    }

    async fn get_attachments(&self, id: &MessageId) -> Result<Vec<AttachmentDescriptor>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let message = self.messages.iter().find(|m| m.id == id.as_str()).cloned();

        let result = match message {
            Some(m) => {
                if !m.latency.is_zero() {
                    tokio::time::sleep(m.latency).await;
                }
                if m.fail {
                    Err(Error::RemoteService(format!(
                        "attachment fetch failed for {}",
                        m.id
                    )))
                } else {
                    Ok(m.sizes
                        .iter()
                        .enumerate()
                        .map(|(i, size)| AttachmentDescriptor {
                            name: format!("{}-att-{}", m.id, i),
                            content_type: None,
                            size_bytes: *size,
                        })
                        .collect())
                }
            }
            None => Err(Error::RemoteService(format!("no such message: {}", id))),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Everything a runner can emit, in emission order.
#[derive(Clone, Debug)]
pub enum SinkEvent {
    RunStarted(Strategy, usize, usize),
    ItemCompleted(ItemResult),
    ItemFailed(ItemFailure),
    RunCompleted(RunSummary),
}

/// Report sink that records every emission for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn completed(&self) -> Vec<ItemResult> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::ItemCompleted(result) => Some(result),
                _ => None,
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<RunSummary> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::RunCompleted(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }
}

impl ReportSink for RecordingSink {
    fn run_started(&self, strategy: Strategy, batch_size: usize, concurrency: usize) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::RunStarted(strategy, batch_size, concurrency));
    }

    fn item_completed(&self, result: &ItemResult) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::ItemCompleted(result.clone()));
    }

    fn item_failed(&self, failure: &ItemFailure) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::ItemFailed(failure.clone()));
    }

    fn run_completed(&self, summary: &RunSummary) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::RunCompleted(summary.clone()));
    }
}

/// Fetch the scripted batch through the service's own listing call.
pub async fn batch_of(service: &MockMailService, n: usize) -> Vec<MessageDescriptor> {
    service
        .list_messages(&MessageQuery::batch(n))
        .await
        .expect("mock list should not fail")
}
