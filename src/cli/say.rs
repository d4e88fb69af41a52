//! Non-interactive "say" command

use std::error::Error;

use crate::core::config::ConfigStore;
use crate::core::webhook::WebhookClient;

pub async fn run_say(prompt: Vec<String>, store: &ConfigStore) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("Usage: hookchat say <prompt>");
        std::process::exit(1);
    }

    if !store.is_configured() {
        eprintln!("⚠️  Webhook URL is not configured. Replying with a simulated response.");
        eprintln!("Example: hookchat set webhook-url https://n8n.example.com/webhook/chat");
    }

    let client = WebhookClient::new();
    let reply = client.send(prompt, store.webhook_url()).await;
    println!("{reply}");

    Ok(())
}
