//! Fixed strings shared by the configuration store, the webhook client and
//! the chat session.

/// Substring that marks a webhook URL the user has not customized yet.
pub const PLACEHOLDER_MARKER: &str = "YOUR_N8N_INSTANCE";

/// Value used when nothing has been persisted.
pub const DEFAULT_WEBHOOK_URL: &str = "https://YOUR_N8N_INSTANCE.com/webhook/YOUR_PATH";

pub const BOT_GREETING: &str =
    "Hello! I'm a chatbot connected to an n8n workflow. How can I help you today?";

pub const SETTINGS_SAVED_PREFIX: &str = "Settings saved! ";

/// Returned instead of a network call while the URL is unconfigured.
pub const SIMULATED_RESPONSE: &str = "This is a simulated response. Please configure your n8n webhook URL in the settings to get a real reply.";

/// Shown for transport, HTTP status and body decode failures alike.
pub const BOT_ERROR_MESSAGE: &str = "Sorry, I'm having trouble connecting right now. Please check your webhook URL in settings or try again in a moment.";

pub const UNEXPECTED_FORMAT_MESSAGE: &str =
    "I received a response, but the format was unexpected.";
