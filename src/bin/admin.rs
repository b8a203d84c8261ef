//! CLI administration tool for go-links.
//!
//! Manages short links directly in PostgreSQL, without going through the
//! HTTP admin page.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Create a link (alias generated when omitted)
//! cargo run --bin admin -- links create --url https://example.org --alias demo
//!
//! # Delete a link
//! cargo run --bin admin -- links delete demo
//!
//! # Seed the sample link
//! cargo run --bin admin -- links seed
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `ALIAS_MAX_ATTEMPTS` (optional): random alias candidates per allocation

use go_links::application::services::ShortLinkService;
use go_links::application::services::short_link_service::DEFAULT_MAX_ALIAS_ATTEMPTS;
use go_links::error::AppError;
use go_links::infrastructure::persistence::PgShortLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// Alias created by `links seed`.
const SEED_ALIAS: &str = "testalias";
const SEED_URL: &str = "example.org";

type Service = ShortLinkService<PgShortLinkRepository>;

/// CLI tool for managing go-links.
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links
    List,

    /// Create a new link
    Create {
        /// Destination URL (prompted if omitted)
        #[arg(short, long)]
        url: Option<String>,

        /// Alias (generated if omitted)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Delete a link
    Delete {
        /// Alias of the link to delete
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Recreate the sample `testalias` link
    Seed,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Run pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgShortLinkRepository::new(Arc::new(pool.clone())));
    let max_attempts = std::env::var("ALIAS_MAX_ATTEMPTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_ALIAS_ATTEMPTS);
    let service = ShortLinkService::new(repo, max_attempts);

    match action {
        LinkAction::List => list_links(&service).await?,
        LinkAction::Create { url, alias } => create_link(&service, url, alias).await?,
        LinkAction::Delete { alias, yes } => delete_link(&service, alias, yes).await?,
        LinkAction::Seed => seed(&service).await?,
    }

    Ok(())
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links
///
///   Alias            URL
///   ───────────────────────────────────────────────
///   demo             https://example.org
/// ```
async fn list_links(service: &Service) -> Result<()> {
    println!("{}", "📋 Short Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<16} {}",
        "Alias".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for link in &links {
        println!("  {:<16} {}", link.alias.cyan(), link.url);
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates a link, prompting for the URL when it was not given.
async fn create_link(service: &Service, url: Option<String>, alias: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("URL").interact_text()?,
    };

    match service.create_link(&url, alias.as_deref()).await {
        Ok(link) => {
            println!("{}", "✅ Link created".green().bold());
            println!("  Alias: {}", link.alias.bright_yellow().bold());
            println!("  URL:   {}", link.url.cyan());
            println!();
            Ok(())
        }
        Err(AppError::Validation { details, .. }) => {
            if let Some(obj) = details.as_object() {
                for (field, message) in obj {
                    println!(
                        "  {} {}",
                        format!("{field}:").red(),
                        message.as_str().unwrap_or_default()
                    );
                }
            }
            anyhow::bail!("Link not created")
        }
        Err(e) => Err(anyhow::anyhow!("Failed to create link: {}", e)),
    }
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &Service, alias: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Link".bright_blue().bold());
    println!();

    let link = service
        .find_link(&alias)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(link) = link else {
        println!("{}", "⚠️  No link with this alias".yellow());
        return Ok(());
    };

    println!("  Alias: {}", link.alias.cyan());
    println!("  URL:   {}", link.url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(&alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Deletes and recreates the sample link.
async fn seed(service: &Service) -> Result<()> {
    service
        .delete_link(SEED_ALIAS)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to clean up seed link: {}", e))?;

    service
        .reserve_with_alias(SEED_ALIAS, SEED_URL)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed link: {}", e))?;

    println!("{}", "🌱 Database has been seeded".green().bold());

    Ok(())
}

/// Handles database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "📦 Running migrations...".bright_blue());

            sqlx::migrate!("./migrations").run(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
