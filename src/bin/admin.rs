//! CLI administration tool for SmolLink.
//!
//! Moderates links and creators directly against the database, without going
//! through the HTTP routes (which may be switched off in anarchy mode).
//!
//! # Usage
//!
//! ```bash
//! # Inspect a shortlink
//! cargo run --bin admin -- link show aB3dE9z
//!
//! # Disable a shortlink
//! cargo run --bin admin -- link disable aB3dE9z --reason "Phishing"
//!
//! # Ban a creator by IP address
//! cargo run --bin admin -- creator ban 203.0.113.9 --reason "Spam"
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `smollink::config`). When Redis is configured, link
//! changes invalidate the shared cache entry too. Local caches of running
//! instances are not reachable from here.

use smollink::application::services::ModerationService;
use smollink::config::{self, Config};
use smollink::domain::entities::Creator;
use smollink::domain::repositories::{CreatorRepository, LinkRepository};
use smollink::infrastructure::cache::{CacheService, LocalCache, NullCache, RedisCache};
use smollink::infrastructure::persistence::{PgCreatorRepository, PgLinkRepository};
use smollink::server::connect_cache;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing SmolLink.
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
    /// Inspect and moderate shortlinks
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Inspect and moderate creators
    Creator {
        #[command(subcommand)]
        action: CreatorAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Shortlink subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show a shortlink
    Show { id: String },

    /// Disable a shortlink
    Disable {
        id: String,

        /// Reason shown on the link's error page
        #[arg(short, long)]
        reason: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete a shortlink
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Creator subcommands.
#[derive(Subcommand)]
enum CreatorAction {
    /// Show a creator by IP address
    Show { ip: String },

    /// Forbid a creator from making shortlinks
    Ban {
        ip: String,

        #[arg(short, long)]
        reason: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Allow a creator to make shortlinks again
    Unban { ip: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// Repositories and services the commands operate on.
struct Admin {
    pool: PgPool,
    links: Arc<PgLinkRepository>,
    creators: Arc<PgCreatorRepository>,
    moderation: ModerationService,
}

impl Admin {
    async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPool::connect(&config.database.url)
            .await
            .context("Failed to connect to database")?;
        let shared = Arc::new(pool.clone());

        let links = Arc::new(PgLinkRepository::new(shared.clone()));
        let creators = Arc::new(PgCreatorRepository::new(shared));

        let cache: Arc<dyn CacheService> = match connect_cache(&config.cache).await {
            Some(manager) => Arc::new(RedisCache::new(
                manager,
                config.cache.ttl_seconds,
                config.cache.timeout,
            )),
            None => Arc::new(NullCache::new()),
        };

        let moderation = ModerationService::new(
            Arc::new(LocalCache::new()),
            cache,
            links.clone(),
            creators.clone(),
        );

        Ok(Self {
            pool,
            links,
            creators,
            moderation,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let admin = Admin::connect(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &admin).await?,
        Commands::Creator { action } => handle_creator_action(action, &admin).await?,
        Commands::Stats => handle_stats(&admin.pool).await?,
        Commands::Db { action } => handle_db_action(action, &admin.pool).await?,
    }

    Ok(())
}

/// Asks for confirmation unless `skip` is set.
fn confirm(prompt: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
    }

    Ok(confirmed)
}

/// Dispatches shortlink commands.
async fn handle_link_action(action: LinkAction, admin: &Admin) -> Result<()> {
    match action {
        LinkAction::Show { id } => {
            let link = admin
                .links
                .find_by_id(&id)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Shortlink not found")?;

            let status = if link.disabled {
                "DISABLED".red()
            } else {
                "ACTIVE".green()
            };

            println!("{}", "🔗 Shortlink".bright_blue().bold());
            println!();
            println!("  ID:       {}", link.id.cyan());
            println!("  Target:   {}", link.redirect_to.bright_white());
            println!(
                "  Creator:  {}",
                link.creator_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string())
                    .bright_black()
            );
            println!(
                "  Created:  {}",
                link.created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            println!("  Status:   {}", status);
            if link.disabled
                && let Some(reason) = &link.disabled_reason
            {
                println!("  Reason:   {}", reason.yellow());
            }
            println!();
        }
        LinkAction::Disable { id, reason, yes } => {
            println!("  Shortlink: {}", id.cyan());
            if !confirm("Disable this shortlink?", yes)? {
                return Ok(());
            }

            admin
                .moderation
                .disable(&id, reason.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to disable shortlink: {}", e))?;

            println!("{}", "✅ Shortlink disabled".green().bold());
        }
        LinkAction::Delete { id, yes } => {
            println!("  Shortlink: {}", id.cyan());
            if !confirm("Delete this shortlink permanently?", yes)? {
                return Ok(());
            }

            admin
                .moderation
                .delete(&id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to delete shortlink: {}", e))?;

            println!("{}", "✅ Shortlink deleted".green().bold());
        }
    }

    Ok(())
}

/// Dispatches creator commands.
async fn handle_creator_action(action: CreatorAction, admin: &Admin) -> Result<()> {
    match action {
        CreatorAction::Show { ip } => {
            let creator = admin
                .creators
                .find_by_ip(&ip)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Creator not found")?;

            print_creator(&creator);
        }
        CreatorAction::Ban { ip, reason, yes } => {
            println!("  Creator: {}", ip.cyan());
            if !confirm("Ban this creator?", yes)? {
                return Ok(());
            }

            let creator = admin
                .moderation
                .ban_creator(&ip, reason)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to ban creator: {}", e))?;

            println!("{}", "✅ Creator banned".green().bold());
            print_creator(&creator);
        }
        CreatorAction::Unban { ip } => {
            let creator = admin
                .moderation
                .unban_creator(&ip)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to unban creator: {}", e))?;

            println!("{}", "✅ Creator unbanned".green().bold());
            print_creator(&creator);
        }
    }

    Ok(())
}

fn print_creator(creator: &Creator) {
    let status = if creator.disabled {
        "BANNED".red()
    } else {
        "ACTIVE".green()
    };

    println!();
    println!("  ID:       {}", creator.id.to_string().bright_black());
    println!("  IP:       {}", creator.ip_address.cyan());
    println!(
        "  Seen:     {}",
        creator
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!("  Status:   {}", status);
    if creator.disabled
        && let Some(reason) = &creator.disabled_reason
    {
        println!("  Reason:   {}", reason.yellow());
    }
    println!();
}

/// Displays system statistics.
///
/// Shows:
/// - Total and disabled links
/// - Total and banned creators
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let disabled_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE disabled")
        .fetch_one(pool)
        .await?;

    let creators_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM creators")
        .fetch_one(pool)
        .await?;

    let banned_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM creators WHERE disabled")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:            {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Disabled links:   {}",
        disabled_count.to_string().bright_red().bold()
    );
    println!(
        "  Creators:         {}",
        creators_count.to_string().bright_green().bold()
    );
    println!(
        "  Banned creators:  {}",
        banned_count.to_string().bright_red().bold()
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
