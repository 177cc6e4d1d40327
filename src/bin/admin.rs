//! CLI administration tool for shorty.
//!
//! Provides registry inspection, short code conversion and cleanup of
//! records left behind by interrupted creates, without HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Convert between ids and short codes
//! cargo run --bin admin -- code encode 125
//! cargo run --bin admin -- code decode 21
//!
//! # Remove code-less records older than an hour
//! cargo run --bin admin -- prune --older-than-minutes 60 --yes
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `stats`, `db` and `prune`): PostgreSQL connection string

use shorty::domain::repositories::UrlRepository;
use shorty::infrastructure::persistence::PgUrlRepository;
use shorty::utils::base62;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorty.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Convert between registry ids and short codes
    Code {
        #[command(subcommand)]
        action: CodeAction,
    },

    /// Delete records that never received a short code
    Prune {
        /// Only records created at least this many minutes ago
        #[arg(long, default_value_t = 60)]
        older_than_minutes: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// Short code subcommands. These work offline.
#[derive(Subcommand)]
enum CodeAction {
    /// Print the short code for a registry id
    Encode { id: i64 },

    /// Print the registry id behind a short code
    Decode { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
        Commands::Code { action } => handle_code_action(action)?,
        Commands::Prune {
            older_than_minutes,
            yes,
        } => prune(&connect().await?, older_than_minutes, yes).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Displays registry statistics.
///
/// Shows:
/// - Number of links with a short code
/// - Number of code-less records (interrupted creates)
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgUrlRepository::new(Arc::new(pool.clone()));
    let links_count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    let pending_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE short_code IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:           {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Without code:    {}",
        pending_count.to_string().bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let last_id: Option<i64> = sqlx::query_scalar("SELECT MAX(id) FROM urls")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            match last_id {
                Some(id) => println!(
                    "  Last id:    {} ({})",
                    id.to_string().bright_white(),
                    base62::encode(id)?.cyan()
                ),
                None => println!("  Last id:    {}", "none".bright_black()),
            }
            println!();
        }
    }

    Ok(())
}

fn handle_code_action(action: CodeAction) -> Result<()> {
    match action {
        CodeAction::Encode { id } => {
            let code = base62::encode(id).with_context(|| format!("Cannot encode id {id}"))?;
            println!("{}", code.cyan().bold());
        }
        CodeAction::Decode { code } => {
            let id = base62::decode(&code).with_context(|| format!("Cannot decode '{code}'"))?;
            println!("{}", id.to_string().bright_white().bold());
        }
    }

    Ok(())
}

/// Deletes code-less records older than the given age, with confirmation.
///
/// Such records are left when the process dies between insert and code
/// assignment; they are never reachable by any short code.
async fn prune(pool: &PgPool, older_than_minutes: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Prune code-less records".bright_blue().bold());
    println!();

    if older_than_minutes < 0 {
        anyhow::bail!("--older-than-minutes must not be negative");
    }
    let cutoff = Utc::now() - Duration::minutes(older_than_minutes);

    println!(
        "  Created before: {}",
        cutoff.format("%Y-%m-%d %H:%M:%S UTC").to_string().cyan()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete these records?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let repo = PgUrlRepository::new(Arc::new(pool.clone()));
    let removed = repo
        .prune_orphans(cutoff)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prune records: {}", e))?;

    println!(
        "{} {}",
        "✅ Removed records:".green().bold(),
        removed.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

