//! CLI administration tool for short-url.
//!
//! Inspects mappings and analytics, warms the cache and checks the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Counts of mappings and redirect events
//! cargo run --bin admin -- stats
//!
//! # Show one alias with its analytics
//! cargo run --bin admin -- lookup aB3dE5f
//!
//! # Push every hot alias into Redis
//! cargo run --bin admin -- cache warm --yes
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `short_url::config`). `cache warm` requires Redis.

use short_url::application::services::AnalyticsService;
use short_url::config::{Config, load_from_env, mask_connection_string};
use short_url::domain::repositories::{AnalyticsRepository, UrlRepository};
use short_url::infrastructure::cache::RedisCache;
use short_url::infrastructure::persistence::{PgAnalyticsRepository, PgUrlRepository};
use short_url::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-url.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show mapping and redirect counts
    Stats,

    /// Show an alias and its analytics
    Lookup {
        /// Short code to look up
        short_code: String,
    },

    /// Cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Promote every alias at or above the promotion threshold
    Warm {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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

    let config = load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Lookup { short_code } => handle_lookup(&pool, &short_code).await?,
        Commands::Cache { action } => handle_cache_action(action, &config, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

/// Displays mapping and redirect event counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let events_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM redirect_events")
        .fetch_one(pool)
        .await?;

    println!(
        "  Short URLs: {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Redirects:  {}",
        events_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Prints a mapping with its analytics, read straight from the store.
///
/// Unlike `GET /analytics/{short_code}` this never promotes into the cache.
async fn handle_lookup(pool: &PgPool, short_code: &str) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let urls = PgUrlRepository::new(pool.clone());
    let analytics = PgAnalyticsRepository::new(pool);

    let Some(mapping) = urls
        .find_by_code(short_code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    else {
        println!("{} {}", "❌ Alias not found:".red(), short_code.bright_white());
        return Ok(());
    };

    println!("{}", "🔗 Short URL".bright_blue().bold());
    println!();
    println!("  Code:     {}", mapping.short_code.cyan());
    println!("  Long URL: {}", mapping.long_url.bright_white());

    if let Some(stats) = analytics
        .get_analytics(short_code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    {
        println!(
            "  Visits:   {}",
            stats.redirect_count.to_string().bright_green().bold()
        );

        if let Some(last) = stats.request_times.last() {
            println!(
                "  Last:     {}",
                last.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
            );
        }

        if !stats.user_agents.is_empty() {
            println!("  User agents:");
            for agent in &stats.user_agents {
                println!("    - {}", agent.bright_black());
            }
        }
    }
    println!();

    Ok(())
}

/// Handles cache maintenance commands.
async fn handle_cache_action(action: CacheAction, config: &Config, pool: PgPool) -> Result<()> {
    match action {
        CacheAction::Warm { yes } => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("Redis is not configured (set REDIS_URL or REDIS_HOST)")?;

            println!("{}", "🔥 Cache warm-up".bright_blue().bold());
            println!();
            println!("  Redis:     {}", mask_connection_string(redis_url).cyan());
            println!(
                "  Threshold: {} redirects",
                config.promotion_threshold.to_string().cyan()
            );
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Promote every hot alias into the cache?")
                    .default(true)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let cache = RedisCache::connect(redis_url, config.cache_ttl_seconds)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            let service = AnalyticsService::new(
                Arc::new(PgAnalyticsRepository::new(Arc::new(pool))),
                Arc::new(cache),
                config.promotion_threshold,
            );

            let promoted = service
                .warm_cache()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to warm cache: {}", e))?;

            println!(
                "{} {}",
                "✅ Promoted aliases:".green().bold(),
                promoted.to_string().bright_white().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
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

            println!(
                "  Database:   {}",
                mask_connection_string(&config.database_url).bright_black()
            );
            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
