//! GABE companion - interactive demo entrypoint.
//!
//! Loads configuration from the environment, wires the gateway, registry and
//! store, and runs a line-oriented chat loop on stdin. A missing AI provider
//! is fatal; missing persistence degrades to memory-only with a warning.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gabe_companion::adapters::ai::ProviderGateway;
use gabe_companion::adapters::storage::{FirestoreProfileStore, InMemoryProfileStore};
use gabe_companion::application::{GenerateError, GenerateRequest, ResponseOrchestrator};
use gabe_companion::config::AppConfig;
use gabe_companion::domain::foundation::SessionId;
use gabe_companion::domain::session::SessionRegistry;
use gabe_companion::ports::ProfileStore;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.validate() {
        error!(error = %err, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let gateway = match ProviderGateway::from_config(&config.ai) {
        Ok(gateway) => gateway,
        Err(err) => {
            error!(error = %err, "cannot start without a provider");
            return ExitCode::FAILURE;
        }
    };

    let store: Arc<dyn ProfileStore> = if config.firestore.is_enabled() {
        Arc::new(FirestoreProfileStore::from_config(&config.firestore))
    } else {
        warn!("no document store configured, running memory-only");
        Arc::new(InMemoryProfileStore::new())
    };

    let registry = Arc::new(SessionRegistry::new(config.companion.history_capacity));
    let orchestrator = Arc::new(ResponseOrchestrator::new(
        gateway,
        Arc::clone(&registry),
        store,
        config.companion.clone(),
    ));

    // Idle sessions are swept in the background.
    let ttl = config.companion.session_idle_ttl();
    let sweeper_registry = Arc::clone(&registry);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ttl / 4);
        loop {
            interval.tick().await;
            let evicted = sweeper_registry.evict_idle(ttl);
            if evicted > 0 {
                info!(evicted, "swept idle sessions");
            }
        }
    });

    info!("GABE is listening. Type a message, or ctrl-d to quit.");

    let session_id = match SessionId::new(uuid::Uuid::new_v4().to_string()) {
        Ok(id) => id,
        Err(err) => {
            error!(error = %err, "could not create session");
            return ExitCode::FAILURE;
        }
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let request = GenerateRequest {
                    message: line,
                    user_name: std::env::var("GABE_USER_NAME").ok(),
                    age_bracket: std::env::var("GABE_AGE_BRACKET").ok(),
                    session_id: session_id.clone(),
                };
                match orchestrator.generate(request).await {
                    Ok(reply) => {
                        println!("GABE [{}]: {}", reply.provider, reply.text);
                        if reply.has_more_chunks {
                            println!("(say \"continue\" for more)");
                        }
                    }
                    Err(GenerateError::InvalidMessage) => {
                        println!("GABE: I'm here whenever you want to talk.");
                    }
                }
            }
            Ok(None) => break,
            Err(err) => {
                error!(error = %err, "stdin closed unexpectedly");
                break;
            }
        }
    }

    info!("goodbye");
    ExitCode::SUCCESS
}
