//! CLI administration tool for shortner.
//!
//! Talks to the same store as the HTTP service, without going through the API.
//!
//! # Usage
//!
//! ```bash
//! # List every mapping (full store scan)
//! cargo run --bin admin -- list
//!
//! # Show where an alias points
//! cargo run --bin admin -- resolve aB3xY9
//!
//! # Delete the mapping for a URL
//! cargo run --bin admin -- delete "https://example.com/some/long/path"
//!
//! # Check the store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `shortner::config`.

use shortner::application::services::ShortnerService;
use shortner::config;
use shortner::infrastructure::persistence;
use shortner::utils::alias_generator::is_valid_alias;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing shortner.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// List all mappings
    List,

    /// Show the original URL behind an alias
    Resolve {
        /// 6-character alias
        alias: String,
    },

    /// Delete the mapping for an original URL
    Delete {
        /// Original URL, exactly as it was shortened
        url: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection and count mappings
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let repository = persistence::connect(&config).await?;
    let service = ShortnerService::new(repository, config.short_url_base.clone());

    match cli.command {
        Commands::List => list_mappings(&service).await?,
        Commands::Resolve { alias } => resolve_alias(&service, &alias).await?,
        Commands::Delete { url, yes } => delete_mapping(&service, &url, yes).await?,
        Commands::Store {
            action: StoreAction::Check,
        } => check_store(&service).await?,
    }

    Ok(())
}

/// Lists all mappings sorted by original URL.
///
/// # Output Format
///
/// ```text
/// Mappings
///
///   Alias   Short URL             Original URL
///   ──────────────────────────────────────────────────────────
///   aB3xY9  http://8000/aB3xY9    https://example.com/some/long/path
/// ```
async fn list_mappings(service: &ShortnerService) -> Result<()> {
    println!("{}", "Mappings".bright_blue().bold());
    println!();

    let mappings = service.list().await.context("Failed to list mappings")?;

    if mappings.is_empty() {
        println!("{}", "  No mappings found".yellow());
        return Ok(());
    }

    println!(
        "  {:<7} {:<22} {}",
        "Alias".bright_white().bold(),
        "Short URL".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<7} {:<22} {}",
            mapping.alias.cyan(),
            service.short_url(&mapping.alias).bright_black(),
            mapping.original_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn resolve_alias(service: &ShortnerService, alias: &str) -> Result<()> {
    if !is_valid_alias(alias) {
        anyhow::bail!("'{}' is not a valid alias (6 alphanumeric characters)", alias);
    }

    let original_url = service.resolve(alias).await?;

    println!("  {} -> {}", alias.cyan(), original_url.bright_white());

    Ok(())
}

/// Deletes a mapping after confirmation (default: No).
async fn delete_mapping(service: &ShortnerService, url: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete Mapping".bright_blue().bold());
    println!();

    let mapping = service.find_by_original_url(url).await?;

    println!("  URL:   {}", mapping.original_url.cyan());
    println!("  Alias: {}", mapping.alias.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this mapping?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service.delete(url).await?;

    println!("{}", "Mapping deleted".green().bold());
    println!();

    Ok(())
}

async fn check_store(service: &ShortnerService) -> Result<()> {
    println!("{}", "Store Check".bright_blue().bold());
    println!();

    if !service.health_check().await {
        println!("  Connection: {}", "FAILED".red().bold());
        anyhow::bail!("Store did not answer PING");
    }
    println!("  Connection: {}", "OK".green().bold());

    let count = service.list().await?.len();
    println!(
        "  Mappings:   {}",
        count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}
