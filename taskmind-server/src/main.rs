//! Taskmind Server - Headless Daemon
//!
//! An axum HTTP server that:
//! - Admits chat requests for bearer-authenticated users (rate limit, credits)
//! - Streams completions from an OpenRouter-compatible provider
//! - Records token usage in the ledger without delaying the reply
//!
//! Also ships user administration and migration commands.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod backends;
mod cli;
mod commands;
mod config;
mod middleware;
mod router;
mod server_utils;
mod state;
mod user_commands;

#[cfg(test)]
mod test_helpers;

use backends::Backends;
use cli::{Cli, Commands, ServeArgs, StoreArgs};
use config::ServerConfig;
use state::AppState;
use taskmind_core::chat::completion::OpenRouterAdapter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(&cli.serve, &cli.store).await,
        Commands::Migrate => commands::handle_migrate(&cli.store).await,
        Commands::User(cmd) => commands::handle_user_command(cmd, &cli.store).await,
        Commands::Status => commands::handle_status(&cli.store).await,
    }
}

async fn run_server(args: &ServeArgs, store: &StoreArgs) -> Result<()> {
    info!("🚀 Taskmind Server starting on port {}...", args.port);

    let config = ServerConfig::from_args(args)?;
    let backends = Backends::connect(store).await?;
    let completion = Arc::new(OpenRouterAdapter::new(config.openrouter())?);

    info!(
        "🤖 Default model {}, providers {:?}",
        config.chat.default_model, config.chat.provider.order
    );

    let state = AppState::new_with_components(backends, completion, config.chat.clone());
    info!("✅ Application state initialized");

    let app = router::build_router(state, &config.frontend_url);
    let listener = server_utils::create_listener(&config.bind, config.port).await?;

    info!("🌐 Server listening on http://{}", listener.local_addr()?);
    info!("💬 Chat endpoint at POST /chat");

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("👋 Server stopped");
    Ok(())
}
