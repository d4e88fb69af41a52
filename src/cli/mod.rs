//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod chat;
pub mod say;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cli::chat::run_chat;
use crate::cli::say::run_say;
use crate::cli::settings::{describe, set_setting, unset_setting};
use crate::core::config::ConfigStore;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("VERGEN_GIT_SHA"),
    "\nbuilt: ",
    env!("VERGEN_BUILD_DATE"),
    "\nrustc: ",
    env!("VERGEN_RUSTC_SEMVER"),
);

#[derive(Parser)]
#[command(name = "hookchat")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "A terminal chat client for n8n webhooks")]
#[command(
    long_about = "hookchat forwards each message you type to a single n8n webhook \
and prints the reply. The webhook receives a JSON POST of the form \
{\"message\": \"...\"} and should answer with {\"output\": \"...\"} or \
[{\"output\": \"...\"}].\n\n\
Configuration:\n\
  hookchat set webhook-url <url>   Save the webhook URL\n\
  hookchat show                    Print the current configuration\n\n\
Environment Variables:\n\
  RUST_LOG          Diagnostic log filter (defaults to warn)\n\n\
Commands inside the chat:\n\
  /settings <url>   Save a new webhook URL and start over\n\
  /log              Pause or resume the transcript log\n\
  /help             Show the command list\n\
  /quit             Leave the chat"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the platform default
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the conversation transcript to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive chat (default)
    Chat,
    /// Send one message and print the reply
    Say {
        /// Message to send
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set a configuration value
    Set {
        /// Configuration key to set (webhook-url)
        key: String,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset (webhook-url)
        key: String,
    },
    /// Show the current configuration
    Show,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

/// Diagnostics go to stderr so they never interleave with replies on stdout.
fn init_tracing() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_store(path: Option<PathBuf>) -> Result<ConfigStore, Box<dyn Error>> {
    match path {
        Some(path) => Ok(ConfigStore::open(path)),
        None => Ok(ConfigStore::open_default()?),
    }
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut store = open_store(args.config)?;

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(store, args.log).await,
        Commands::Say { prompt } => run_say(prompt, &store).await,
        Commands::Set { key, value } => {
            match set_setting(&mut store, &key, value.as_deref()) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            match unset_setting(&mut store, &key) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Show => {
            println!("{}", describe(&store));
            Ok(())
        }
    }
}
