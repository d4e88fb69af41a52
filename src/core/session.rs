//! Conversation state owned by the front end.
//!
//! The session holds the append-only message list and the busy flag that
//! keeps a second submission from starting while one is in flight. It never
//! talks to the network itself; [`PendingSend`] carries the message and URL
//! to the webhook client and the reply comes back through
//! [`ChatSession::finish_submit`].

use crate::core::config::ConfigStore;
use crate::core::constants::{BOT_GREETING, SETTINGS_SAVED_PREFIX};
use crate::core::message::{ChatMessage, MessageId, Sender};
use crate::core::webhook::WebhookClient;
use crate::utils::logging::LoggingState;
use std::error::Error;
use std::fmt;
use tracing::warn;

/// Why a submission was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Input was empty after trimming.
    Empty,
    /// A previous send has not resolved yet.
    Busy,
    /// The webhook URL is still the placeholder or empty.
    NeedsConfiguration,
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejected::Empty => write!(f, "Nothing to send"),
            SubmitRejected::Busy => write!(f, "Still waiting for the previous reply"),
            SubmitRejected::NeedsConfiguration => write!(
                f,
                "Configuration needed: set your n8n webhook URL with /settings <url>"
            ),
        }
    }
}

impl Error for SubmitRejected {}

/// A submission accepted by the session and ready to go out.
#[derive(Debug, Clone)]
pub struct PendingSend {
    message: String,
    webhook_url: String,
}

impl PendingSend {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub async fn dispatch(&self, client: &WebhookClient) -> String {
        client.send(&self.message, &self.webhook_url).await
    }
}

pub struct ChatSession {
    messages: Vec<ChatMessage>,
    is_loading: bool,
    logging: LoggingState,
}

impl ChatSession {
    pub fn new(logging: LoggingState) -> Self {
        let mut session = Self {
            messages: Vec::new(),
            is_loading: false,
            logging,
        };
        session.append(ChatMessage::with_id(
            MessageId::fixed("initial-greeting"),
            Sender::Bot,
            BOT_GREETING,
        ));
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// `disabled`, `active (<file>)` or `paused (<file>)`.
    pub fn transcript_status(&self) -> String {
        self.logging.get_status_string()
    }

    pub fn logging_mut(&mut self) -> &mut LoggingState {
        &mut self.logging
    }

    /// Accept `text` for sending: appends the user message and raises the
    /// busy flag. Unconfigured sessions send nothing and record nothing.
    pub fn begin_submit(
        &mut self,
        text: &str,
        config: &ConfigStore,
    ) -> Result<PendingSend, SubmitRejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SubmitRejected::Empty);
        }
        if self.is_loading {
            return Err(SubmitRejected::Busy);
        }
        if !config.is_configured() {
            return Err(SubmitRejected::NeedsConfiguration);
        }

        self.append(ChatMessage::user(text));
        self.is_loading = true;

        Ok(PendingSend {
            message: text.to_string(),
            webhook_url: config.webhook_url().to_string(),
        })
    }

    /// Record the reply for the outstanding send and clear the busy flag.
    pub fn finish_submit(&mut self, reply: String) -> ChatMessage {
        self.is_loading = false;
        let message = ChatMessage::bot(reply);
        self.append(message.clone());
        message
    }

    /// Convenience for front ends that simply wait for the reply.
    pub async fn submit(
        &mut self,
        text: &str,
        config: &ConfigStore,
        client: &WebhookClient,
    ) -> Result<ChatMessage, SubmitRejected> {
        let pending = self.begin_submit(text, config)?;
        let reply = pending.dispatch(client).await;
        Ok(self.finish_submit(reply))
    }

    /// Save a new webhook URL and restart the conversation.
    pub fn save_settings(
        &mut self,
        config: &mut ConfigStore,
        url: &str,
    ) -> Result<(), Box<dyn Error>> {
        config.save(url)?;
        self.messages.clear();
        self.append(ChatMessage::with_id(
            MessageId::fixed("config-saved"),
            Sender::Bot,
            format!("{SETTINGS_SAVED_PREFIX}{BOT_GREETING}"),
        ));
        Ok(())
    }

    fn append(&mut self, message: ChatMessage) {
        if let Err(err) = self.logging.log_message(&message) {
            warn!("failed to write transcript: {err}");
        }
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{BOT_ERROR_MESSAGE, DEFAULT_WEBHOOK_URL};
    use crate::utils::test_utils::{direct_client, MockWebhook};
    use tempfile::TempDir;

    fn configured_store(dir: &TempDir, url: &str) -> ConfigStore {
        let mut store = ConfigStore::open(dir.path().join("config.toml"));
        store.save(url).unwrap();
        store
    }

    fn session() -> ChatSession {
        ChatSession::new(LoggingState::new(None).unwrap())
    }

    #[test]
    fn starts_with_greeting() {
        let session = session();
        assert_eq!(session.messages().len(), 1);
        let greeting = &session.messages()[0];
        assert_eq!(greeting.text(), BOT_GREETING);
        assert_eq!(greeting.sender(), Sender::Bot);
        assert_eq!(greeting.id().as_str(), "initial-greeting");
        assert!(!session.is_loading());
    }

    #[test]
    fn unconfigured_submission_is_not_recorded() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::open(temp_dir.path().join("config.toml"));
        assert_eq!(store.webhook_url(), DEFAULT_WEBHOOK_URL);
        let mut session = session();

        let err = session.begin_submit("hello", &store).unwrap_err();
        assert_eq!(err, SubmitRejected::NeedsConfiguration);
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_loading());
    }

    #[test]
    fn blank_input_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let store = configured_store(&temp_dir, "https://x.test/hook");
        let mut session = session();

        assert_eq!(
            session.begin_submit("  \n ", &store).unwrap_err(),
            SubmitRejected::Empty
        );
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn busy_flag_rejects_overlapping_submissions() {
        let temp_dir = TempDir::new().unwrap();
        let store = configured_store(&temp_dir, "https://x.test/hook");
        let mut session = session();

        let pending = session.begin_submit("  first  ", &store).unwrap();
        assert_eq!(pending.message(), "first");
        assert_eq!(pending.webhook_url(), "https://x.test/hook");
        assert!(session.is_loading());

        assert_eq!(
            session.begin_submit("second", &store).unwrap_err(),
            SubmitRejected::Busy
        );

        let reply = session.finish_submit("reply".to_string());
        assert_eq!(reply.text(), "reply");
        assert!(!session.is_loading());

        let senders: Vec<_> = session.messages().iter().map(|m| m.sender()).collect();
        assert_eq!(senders, vec![Sender::Bot, Sender::User, Sender::Bot]);
        assert!(session.begin_submit("third", &store).is_ok());
    }

    #[test]
    fn saving_settings_resets_conversation() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = ConfigStore::open(temp_dir.path().join("config.toml"));
        let mut session = session();

        session
            .save_settings(&mut store, "  https://n8n.example.com/webhook/abc ")
            .unwrap();

        assert!(store.is_configured());
        assert_eq!(store.webhook_url(), "https://n8n.example.com/webhook/abc");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(
            session.messages()[0].text(),
            format!("Settings saved! {BOT_GREETING}")
        );
        assert_eq!(session.messages()[0].id().as_str(), "config-saved");
    }

    #[test]
    fn transcript_includes_greeting_and_settings_saved_message() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("chat.log");
        let logging = LoggingState::new(Some(log_path.to_string_lossy().to_string())).unwrap();
        let mut store = ConfigStore::open(temp_dir.path().join("config.toml"));
        let mut session = ChatSession::new(logging);

        let pending = session.begin_submit("hello", &store);
        assert_eq!(pending.unwrap_err(), SubmitRejected::NeedsConfiguration);
        session
            .save_settings(&mut store, "https://x.test/hook")
            .unwrap();
        session.begin_submit("hello", &store).unwrap();
        session.finish_submit("hi there".to_string());

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(
            contents,
            format!("{BOT_GREETING}\n\nSettings saved! {BOT_GREETING}\n\nYou: hello\n\nhi there\n\n")
        );
    }

    #[tokio::test]
    async fn submit_appends_user_message_and_reply() {
        let server = MockWebhook::start(200, r#"[{"output":"pong"}]"#).await;
        let temp_dir = TempDir::new().unwrap();
        let store = configured_store(&temp_dir, &server.url);
        let client = WebhookClient::with_client(direct_client());
        let mut session = session();

        let reply = session.submit("ping", &store, &client).await.unwrap();
        assert_eq!(reply.text(), "pong");

        let texts: Vec<_> = session.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec![BOT_GREETING, "ping", "pong"]);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn failed_exchange_still_clears_busy_flag() {
        let server = MockWebhook::start(500, "boom").await;
        let temp_dir = TempDir::new().unwrap();
        let store = configured_store(&temp_dir, &server.url);
        let client = WebhookClient::with_client(direct_client());
        let mut session = session();

        let reply = session.submit("ping", &store, &client).await.unwrap();
        assert_eq!(reply.text(), BOT_ERROR_MESSAGE);
        assert_eq!(reply.sender(), Sender::Bot);
        assert!(!session.is_loading());
    }
}
