//! Microsoft Graph implementation of [`MailService`].
//!
//! Talks to the Graph REST API (`/me/messages`, `/me/messages/{id}/attachments`)
//! over HTTPS. Token acquisition is external: the client is constructed with a
//! pre-acquired bearer token (for example from a device-code flow) and never
//! refreshes it. 401/403 responses surface as [`Error::Auth`]; other request
//! failures as [`Error::RemoteService`] or [`Error::Network`].

use crate::client::{MailService, MessageField, MessageFilter, MessageQuery};
use crate::error::{Error, Result};
use crate::types::{AttachmentDescriptor, MessageDescriptor, MessageId};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

/// Default Graph API endpoint
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Production [`MailService`] backed by the Microsoft Graph REST API.
pub struct GraphMailService {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

impl GraphMailService {
    /// Create a client against the public Graph endpoint with a pre-acquired
    /// bearer token.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, access_token)
    }

    /// Create a client against a custom endpoint (test servers, sovereign clouds).
    pub fn with_base_url(base_url: &str, access_token: impl Into<String>) -> Result<Self> {
        // Normalize to a trailing slash so path segments append instead of
        // replacing the final component.
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(
                format!("base URL cannot hold path segments: {}", base_url),
                "base_url",
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            access_token: access_token.into(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: cannot_be_a_base was rejected at construction
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Auth(format!(
                "mail service rejected credentials ({}): {}",
                status, body
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::RemoteService(format!(
                "mail service returned {}: {}",
                status, body
            )));
        }
        Ok(response)
    }
}

/// Render a filter as a Graph `$filter` expression, if any.
fn filter_expression(filter: MessageFilter) -> Option<&'static str> {
    match filter {
        MessageFilter::All => None,
        MessageFilter::HasAttachments => Some("hasAttachments eq true"),
    }
}

/// Render the requested fields as a Graph `$select` list.
fn select_list(fields: &[MessageField]) -> String {
    fields
        .iter()
        .map(|f| match f {
            MessageField::Sender => "sender",
            MessageField::Subject => "subject",
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait::async_trait]
impl MailService for GraphMailService {
    async fn list_messages(&self, query: &MessageQuery) -> Result<Vec<MessageDescriptor>> {
        let mut url = self.endpoint(&["me", "messages"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("$top", &query.max_count.to_string());
            if let Some(filter) = filter_expression(query.filter) {
                pairs.append_pair("$filter", filter);
            }
            if !query.fields.is_empty() {
                pairs.append_pair("$select", &select_list(&query.fields));
            }
        }

        tracing::debug!(url = %url, max_count = query.max_count, "Listing messages");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let envelope: ListEnvelope<GraphMessage> = response.json().await?;

        let messages: Vec<MessageDescriptor> = envelope
            .value
            .into_iter()
            .map(GraphMessage::into_descriptor)
            .collect();

        tracing::debug!(count = messages.len(), "Listed messages");
        Ok(messages)
    }

    async fn get_attachments(&self, id: &MessageId) -> Result<Vec<AttachmentDescriptor>> {
        let url = self.endpoint(&["me", "messages", id.as_str(), "attachments"]);

        tracing::debug!(message_id = %id, "Fetching attachments");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let envelope: ListEnvelope<GraphAttachment> = response.json().await?;

        Ok(envelope
            .value
            .into_iter()
            .map(GraphAttachment::into_descriptor)
            .collect())
    }
}

/// Graph collection envelope: `{"value": [...]}`
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphMessage {
    id: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    sender: Option<GraphRecipient>,
}

impl GraphMessage {
    fn into_descriptor(self) -> MessageDescriptor {
        let sender = self
            .sender
            .and_then(|r| r.email_address)
            .map(|a| a.address.or(a.name).unwrap_or_default())
            .unwrap_or_default();
        MessageDescriptor {
            id: MessageId::new(self.id),
            sender,
            subject: self.subject.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphRecipient {
    #[serde(default)]
    email_address: Option<GraphEmailAddress>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphEmailAddress {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphAttachment {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    size: Option<u64>,
}

impl GraphAttachment {
    fn into_descriptor(self) -> AttachmentDescriptor {
        AttachmentDescriptor {
            name: self.name.unwrap_or_default(),
            content_type: self.content_type,
            size_bytes: self.size,
        }
    }
}
