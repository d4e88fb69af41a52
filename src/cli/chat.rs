//! Line-oriented interactive chat.

use std::error::Error;
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::core::config::ConfigStore;
use crate::core::message::{ChatMessage, Sender};
use crate::core::session::{ChatSession, SubmitRejected};
use crate::core::webhook::WebhookClient;
use crate::utils::logging::LoggingState;

const HELP_TEXT: &str = "\
Commands:
  /settings         Show the current webhook URL and transcript log
  /settings <url>   Save a new webhook URL and start over
  /log              Pause or resume the transcript log
  /help             Show this help
  /quit             Leave the chat
Anything else is sent to the webhook.";

/// What the loop should do after handling one line.
#[derive(Debug, PartialEq, Eq)]
enum LineAction {
    Continue,
    Quit,
}

pub async fn run_chat(store: ConfigStore, log_file: Option<String>) -> Result<(), Box<dyn Error>> {
    let logging = LoggingState::new(log_file)?;
    let session = ChatSession::new(logging);
    let client = WebhookClient::new();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    run_chat_loop(stdin, &mut stdout, session, store, &client).await
}

/// Drives a session from `input` until EOF or `/quit`.
pub async fn run_chat_loop<R, W>(
    input: R,
    output: &mut W,
    mut session: ChatSession,
    mut store: ConfigStore,
    client: &WebhookClient,
) -> Result<(), Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    print_header(output, &session, &store)?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };

        let action = handle_line(&line, output, &mut session, &mut store, client).await?;
        if action == LineAction::Quit {
            break;
        }
    }

    Ok(())
}

async fn handle_line<W: Write>(
    line: &str,
    output: &mut W,
    session: &mut ChatSession,
    store: &mut ConfigStore,
    client: &WebhookClient,
) -> Result<LineAction, Box<dyn Error>> {
    let trimmed = line.trim();

    if let Some(command) = trimmed.strip_prefix('/') {
        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((command, ""));
        match name {
            "quit" | "exit" => return Ok(LineAction::Quit),
            "help" => writeln!(output, "{HELP_TEXT}")?,
            "settings" if rest.is_empty() => {
                writeln!(output, "Webhook URL: {}", store.webhook_url())?;
                writeln!(output, "Transcript log: {}", session.transcript_status())?;
            }
            "settings" => match session.save_settings(store, rest) {
                Ok(()) => print_header(output, session, store)?,
                Err(err) => writeln!(output, "❌ Failed to save settings: {err}")?,
            },
            "log" => match session.logging_mut().toggle_logging() {
                Ok(message) => writeln!(output, "{message}")?,
                Err(err) => writeln!(output, "⚠️  {err}")?,
            },
            _ => writeln!(output, "Unknown command: /{name}. Type /help for commands.")?,
        }
        return Ok(LineAction::Continue);
    }

    let pending = match session.begin_submit(trimmed, store) {
        Ok(pending) => pending,
        Err(SubmitRejected::Empty) => return Ok(LineAction::Continue),
        Err(rejected) => {
            writeln!(output, "⚠️  {rejected}")?;
            return Ok(LineAction::Continue);
        }
    };

    writeln!(output, "…")?;
    output.flush()?;
    let reply = pending.dispatch(client).await;
    let message = session.finish_submit(reply);
    print_message(output, &message)?;

    Ok(LineAction::Continue)
}

fn print_header<W: Write>(
    output: &mut W,
    session: &ChatSession,
    store: &ConfigStore,
) -> Result<(), Box<dyn Error>> {
    writeln!(output, "n8n Webhook Chatbot")?;
    if !store.is_configured() {
        writeln!(
            output,
            "⚠️  Configuration Needed: set your n8n webhook URL with /settings <url>"
        )?;
    }
    for message in session.messages() {
        print_message(output, message)?;
    }
    Ok(())
}

fn print_message<W: Write>(output: &mut W, message: &ChatMessage) -> Result<(), Box<dyn Error>> {
    match message.sender() {
        Sender::User => writeln!(output, "You: {}", message.text())?,
        Sender::Bot => writeln!(output, "{}", message.text())?,
    }
    writeln!(output)?;
    Ok(())
}
