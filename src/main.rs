//! Interactive chat binary.
//!
//! Wires the dialogue engine to the simulated ticket inventory and the
//! canned AI fallback, then drives a conversation over stdin/stdout. One
//! session spans the whole program run; type "sair" (or EOF) to quit.

use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use aerochat::adapters::memory::InMemorySessionStore;
use aerochat::adapters::simulated::{CannedAiResponder, SimulatedTicketService};
use aerochat::application::{ChatRequest, DialogueRouter};
use aerochat::config::AppConfig;
use aerochat::domain::nlu::RuleClassifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.engine.log_level.clone())),
        )
        .init();

    let store = Arc::new(InMemorySessionStore::new(config.engine.session_ttl()));
    let _sweeper = InMemorySessionStore::spawn_sweeper(
        Arc::clone(&store),
        config.engine.sweep_interval(),
    );

    let router = DialogueRouter::new(
        Box::new(RuleClassifier::new()),
        store,
        Arc::new(SimulatedTicketService::new()),
        Arc::new(CannedAiResponder::new()),
        config.engine.service_timeout(),
    );

    info!("aerochat ready");
    let mut stdout = io::stdout();
    stdout
        .write_all("Aerochat, assistente de reservas. Digite 'sair' para encerrar.\n> ".as_bytes())
        .await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut session_id = None;

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            continue;
        }
        if message.eq_ignore_ascii_case("sair") {
            break;
        }

        let mut request = ChatRequest::new("local-user", message);
        if let Some(id) = session_id {
            request = request.in_session(id);
        }

        let response = router.process_message(request).await?;
        session_id = Some(response.session_id);

        stdout
            .write_all(format!("{}\n> ", response.response).as_bytes())
            .await?;
        stdout.flush().await?;
    }

    info!("aerochat shutting down");
    Ok(())
}
