//! CLI administration tool for shortlink.
//!
//! Creates short links and inspects the store directly, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Visit statistics for one code
//! cargo run --bin admin -- stats aB3xY9
//!
//! # Totals across all links
//! cargo run --bin admin -- summary
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! Reads the same environment variables as the server (`DATABASE_URL`,
//! `BASE_URL`, `CODE_LENGTH`, ...).

use shortlink::config;
use shortlink::server::{build_state, connect_pool};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link for a URL
    Shorten {
        /// Destination URL (http or https)
        url: String,
    },

    /// Show visit statistics for a short code
    Stats {
        /// Short code
        code: String,
    },

    /// Show totals across all links
    Summary,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Shorten { url } => {
            let state = build_state(pool, &config);
            let link = state
                .link_service
                .create_short_link(url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create short link: {}", e))?;

            println!("{}", "✅ Short link created".green().bold());
            println!();
            println!("  Code:        {}", link.code.bright_yellow().bold());
            println!("  Short URL:   {}", state.short_url(&link.code).cyan());
            println!("  Destination: {}", link.destination.bright_white());
            println!();
        }
        Commands::Stats { code } => {
            let state = build_state(pool, &config);
            let link = state
                .redirect_service
                .stats(&code)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "📊 Link statistics".bright_blue().bold());
            println!();
            println!("  Code:        {}", link.code.cyan());
            println!("  Destination: {}", link.destination.bright_white());
            println!(
                "  Visits:      {}",
                link.visit_count.to_string().bright_green().bold()
            );
            println!(
                "  Created:     {}",
                link.created_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .bright_black()
            );
            println!();
        }
        Commands::Summary => handle_summary(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Prints the number of links and the sum of their visit counters.
async fn handle_summary(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Summary".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

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

            let applied: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
