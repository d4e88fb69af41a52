//! One message out, one display string back.
//!
//! [`WebhookClient::send`] never returns an error. Every failure is folded
//! into one of the fixed bot messages, and the detail goes to `tracing` for
//! whoever runs the client.

use crate::core::config::is_configured_url;
use crate::core::constants::{
    BOT_ERROR_MESSAGE, SIMULATED_RESPONSE, UNEXPECTED_FORMAT_MESSAGE,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

#[derive(Serialize)]
struct WebhookRequest<'a> {
    message: &'a str,
}

/// Decoded reply body, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookReply {
    Array(Vec<Value>),
    Object(serde_json::Map<String, Value>),
    Other(Value),
}

impl From<Value> for WebhookReply {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => WebhookReply::Array(items),
            Value::Object(map) => WebhookReply::Object(map),
            other => WebhookReply::Other(other),
        }
    }
}

impl WebhookReply {
    /// Pull the reply text out of the body.
    ///
    /// A non-empty array is checked first, and only its first element counts.
    /// A bare object is checked second. n8n workflows emit both shapes.
    pub fn output(&self) -> Option<&str> {
        match self {
            WebhookReply::Array(items) => items.first().and_then(output_field),
            WebhookReply::Object(map) => map.get("output").and_then(Value::as_str),
            WebhookReply::Other(_) => None,
        }
    }
}

fn output_field(value: &Value) -> Option<&str> {
    value.as_object()?.get("output")?.as_str()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    HttpStatus(u16),
    Decode,
}

/// Classified result of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The URL is unconfigured; no request was made.
    Simulated,
    Reply(String),
    Failed(FailureKind),
    UnexpectedFormat,
}

impl WebhookOutcome {
    /// Text shown to the user for this outcome.
    pub fn into_display_text(self) -> String {
        match self {
            WebhookOutcome::Simulated => SIMULATED_RESPONSE.to_string(),
            WebhookOutcome::Reply(text) => text,
            WebhookOutcome::Failed(_) => BOT_ERROR_MESSAGE.to_string(),
            WebhookOutcome::UnexpectedFormat => UNEXPECTED_FORMAT_MESSAGE.to_string(),
        }
    }
}

/// Stateless between calls. The wrapped `reqwest::Client` only pools
/// connections.
#[derive(Clone, Default)]
pub struct WebhookClient {
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Exchange `user_message` for a display string. Never fails.
    pub async fn send(&self, user_message: &str, webhook_url: &str) -> String {
        self.exchange(user_message, webhook_url)
            .await
            .into_display_text()
    }

    /// Same exchange as [`send`](Self::send), keeping the classification.
    ///
    /// One attempt, no timeout and no retry.
    pub async fn exchange(&self, user_message: &str, webhook_url: &str) -> WebhookOutcome {
        if !is_configured_url(webhook_url) {
            warn!("webhook URL is not configured; returning simulated response");
            return WebhookOutcome::Simulated;
        }

        let request = WebhookRequest {
            message: user_message,
        };

        let response = match self
            .client
            .post(webhook_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "failed to send message to webhook");
                return WebhookOutcome::Failed(FailureKind::Transport);
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "webhook response was not ok");
            return WebhookOutcome::Failed(FailureKind::HttpStatus(status.as_u16()));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, "failed to read webhook response body");
                return WebhookOutcome::Failed(FailureKind::Transport);
            }
        };

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(err) => {
                error!(error = %err, body = %body, "webhook response is not valid JSON");
                return WebhookOutcome::Failed(FailureKind::Decode);
            }
        };

        normalize(value)
    }
}

/// Map a decoded body to a reply or to the unexpected-format outcome.
pub fn normalize(value: Value) -> WebhookOutcome {
    let reply = WebhookReply::from(value);
    match reply.output() {
        Some(text) => {
            debug!(len = text.len(), "received webhook reply");
            WebhookOutcome::Reply(text.to_string())
        }
        None => {
            error!(payload = ?reply, "webhook response has no string `output` field");
            WebhookOutcome::UnexpectedFormat
        }
    }
}
