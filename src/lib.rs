//! hookchat is a terminal chat client for a single n8n webhook.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the persisted webhook URL ([`core::config::ConfigStore`]),
//!   the webhook exchange and reply normalization
//!   ([`core::webhook::WebhookClient`]), and the append-only conversation
//!   ([`core::session::ChatSession`]).
//! - [`cli`] parses arguments and runs the interactive chat, the one-shot
//!   `say` command and the `set`/`unset`/`show` configuration commands.
//! - [`utils`] holds the transcript logger.
//!
//! The binary crate (`src/main.rs`) routes straight into [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod utils;
