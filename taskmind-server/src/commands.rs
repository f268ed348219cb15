use anyhow::{Context, Result};
use colored::Colorize;
use taskmind_core::store::UserRepository;

use crate::backends::require_postgres;
use crate::cli::{StoreArgs, UserCommands};
use crate::user_commands;

pub async fn handle_user_command(cmd: UserCommands, store: &StoreArgs) -> Result<()> {
    let pg = require_postgres(store).await?;
    match cmd {
        UserCommands::Add { email, password, credits } => {
            user_commands::add_user(&pg, &email, &password, credits).await
        },
        UserCommands::Show { email, limit, json } => {
            user_commands::show_user(&pg, &pg, &email, limit, json).await
        },
        UserCommands::SetCredits { email, credits } => {
            user_commands::set_credits(&pg, &email, credits).await
        },
    }
}

pub async fn handle_migrate(store: &StoreArgs) -> Result<()> {
    let pg = require_postgres(store).await?;
    pg.run_migrations().await.context("Failed to run migrations")?;
    println!("{} Migrations applied", "✓".green());
    Ok(())
}

pub async fn handle_status(store: &StoreArgs) -> Result<()> {
    println!("{}", "Taskmind Server Status".cyan().bold());

    match store.database_url {
        Some(_) => {
            let pg = require_postgres(store).await?;
            let users = pg.count_users().await?;
            println!("  Database: {} ({} users)", "PostgreSQL".green(), users);
        },
        None => println!("  Database: {}", "in-memory (DATABASE_URL not set)".yellow()),
    }

    let counters = if store.redis_url.is_some() {
        "Redis".green()
    } else {
        "in-memory (REDIS_URL not set)".yellow()
    };
    println!("  Rate-limit counters: {}", counters);
    println!("  Version: {}", option_env!("GIT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")));
    Ok(())
}
