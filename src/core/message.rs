use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// Opaque message identifier, unique within a process.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// `<sender>-<unix millis>-<sequence>[-<random hex>]`. The process-wide
    /// sequence keeps ids distinct; the random part is added when the OS
    /// source is available.
    pub fn generate(sender: Sender) -> Self {
        let sequence = NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let mut id = format!(
            "{}-{}-{sequence}",
            sender.as_str(),
            Utc::now().timestamp_millis()
        );

        let mut entropy = [0_u8; 4];
        match getrandom::fill(&mut entropy) {
            Ok(()) => id.push_str(&format!("-{:08x}", u32::from_le_bytes(entropy))),
            Err(err) => tracing::debug!("no random id suffix: {err}"),
        }

        Self(id)
    }

    /// Fixed identifiers for messages the session creates itself.
    pub fn fixed(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    id: MessageId,
    text: String,
    sender: Sender,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(sender),
            text: text.into(),
            sender,
        }
    }

    pub fn with_id(id: MessageId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }
}
