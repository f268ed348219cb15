use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use taskmind_core::accounts;
use taskmind_core::store::{UsageLedger, UserRepository};
use taskmind_types::User;

pub async fn add_user(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
    credits: Option<i64>,
) -> Result<()> {
    let user = accounts::register(users, email, password, credits).await?;
    println!("{} User created: {}", "✓".green(), user.email.green());
    println!("  Credits: {}", user.credits);
    println!("  API key: {}", user.api_key.bold());
    Ok(())
}

pub async fn show_user(
    users: &dyn UserRepository,
    ledger: &dyn UsageLedger,
    email: &str,
    limit: i64,
    json: bool,
) -> Result<()> {
    let user = find_user(users, email).await?;
    let records = ledger.list_for_user(user.id, limit).await?;

    if json {
        let output = serde_json::json!({ "user": user, "usage": records });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let status = if user.is_active {
        Cell::new("Active").fg(Color::Green)
    } else {
        Cell::new("Inactive").fg(Color::Red)
    };
    let credits = if user.credits > 0 {
        Cell::new(user.credits).fg(Color::Green)
    } else {
        Cell::new(user.credits).fg(Color::Red)
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Email", "Credits", "Subscription", "Status"]);
    table.add_row(vec![
        Cell::new(user.id),
        Cell::new(&user.email),
        credits,
        Cell::new(user.subscription_id.as_deref().unwrap_or("-")),
        status,
    ]);
    println!("{table}");

    if records.is_empty() {
        println!("{}", "No usage recorded.".yellow());
        return Ok(());
    }

    let mut usage = Table::new();
    usage.load_preset(UTF8_FULL);
    usage.set_header(vec!["Time", "Model", "Tokens", "Endpoint", "Status"]);
    for record in &records {
        usage.add_row(vec![
            Cell::new(record.timestamp.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(&record.model),
            Cell::new(record.tokens_used),
            Cell::new(format!("{} {}", record.method, record.endpoint)),
            Cell::new(record.status_code),
        ]);
    }
    println!("{usage}");
    let total: i64 = records.iter().map(|r| r.tokens_used).sum();
    println!("\n{} tokens across the last {} requests", total, records.len());
    Ok(())
}

pub async fn set_credits(users: &dyn UserRepository, email: &str, credits: i64) -> Result<()> {
    let user = find_user(users, email).await?;
    users.set_credits(user.id, credits).await?;
    println!(
        "{} Credits for {}: {} → {}",
        "✓".green(),
        user.email.green(),
        user.credits,
        credits
    );
    Ok(())
}

async fn find_user(users: &dyn UserRepository, email: &str) -> Result<User> {
    users.find_by_email(email).await?.with_context(|| format!("User not found: {}", email))
}
