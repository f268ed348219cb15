use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taskmind",
    about = "Taskmind Server - authenticated chat with usage accounting",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    #[arg(short, long, env = "TASKMIND_PORT", default_value = "8000")]
    pub port: u16,

    #[arg(long, env = "TASKMIND_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:3000")]
    pub frontend_url: String,

    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub openrouter_api_key: Option<String>,

    #[arg(long, env = "BASE_URL", default_value = "https://openrouter.ai/api/v1")]
    pub base_url: String,

    #[arg(long, env = "TASKMIND_CHAT_CONFIG", help = "JSON file with chat settings")]
    pub chat_config: Option<PathBuf>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct StoreArgs {
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "REDIS_URL", hide_env_values = true)]
    pub redis_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default if no command specified)")]
    Serve,

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(subcommand, about = "Manage users")]
    User(UserCommands),

    #[command(about = "Show backend status")]
    Status,
}

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user and print its API key")]
    Add {
        #[arg(help = "Email address")]
        email: String,

        #[arg(long, env = "TASKMIND_USER_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long, help = "Initial credit balance")]
        credits: Option<i64>,
    },

    #[command(about = "Show a user with recent usage")]
    Show {
        #[arg(help = "Email address")]
        email: String,

        #[arg(long, default_value = "10", help = "Number of usage records to list")]
        limit: i64,

        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Set a user's credit balance")]
    SetCredits {
        #[arg(help = "Email address")]
        email: String,

        #[arg(help = "New balance", allow_negative_numbers = true)]
        credits: i64,
    },
}
