//! CLI administration tool for refero.
//!
//! Inspects the catalogue and the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Link, category and membership counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Server version and applied migrations
//! cargo run --bin admin -- db info
//!
//! # Root categories with their direct children
//! cargo run --bin admin -- category tree
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use refero::config::mask_connection_string;
use refero::domain::repositories::{CategoryRepository, LinkRepository, MembershipRepository};
use refero::domain::unit_of_work::Database;
use refero::infrastructure::persistence::PgDatabase;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;

/// CLI tool for managing refero.
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

    /// Category operations
    Category {
        #[command(subcommand)]
        action: CategoryAction,
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

#[derive(Subcommand)]
enum CategoryAction {
    /// Print root categories and their direct children
    Tree,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&database_url)
            )
        })?;
    let db = PgDatabase::new(pool);

    match cli.command {
        Commands::Stats => handle_stats(&db).await?,
        Commands::Db { action } => handle_db_action(action, &db).await?,
        Commands::Category { action } => match action {
            CategoryAction::Tree => print_category_tree(&db).await?,
        },
    }

    Ok(())
}

/// Displays catalogue statistics.
async fn handle_stats(db: &PgDatabase) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let mut conn = db.connection().await?;
    let links = conn.count_links().await?;
    let categories = conn.count_categories().await?;
    let memberships = conn.count_memberships().await?;
    let uncategorized = conn.list_uncategorized_links().await?.len();

    println!("  Links:         {}", links.to_string().bright_green().bold());
    println!(
        "  Uncategorized: {}",
        uncategorized.to_string().bright_green().bold()
    );
    println!(
        "  Categories:    {}",
        categories.to_string().bright_green().bold()
    );
    println!(
        "  Memberships:   {}",
        memberships.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, db: &PgDatabase) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            db.ping().await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(db.pool())
                .await?;

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(db.pool())
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

async fn print_category_tree(db: &PgDatabase) -> Result<()> {
    println!("{}", "🗂  Categories".bright_blue().bold());
    println!();

    let mut conn = db.connection().await?;
    let roots = conn.list_root_categories().await?;

    if roots.is_empty() {
        println!("  {}", "(no categories)".bright_black());
    }

    for root in roots {
        println!("  {}", root.name.cyan().bold());
        for child in conn.list_child_categories(root.id).await? {
            println!("    └─ {}", child.name.cyan());
        }
    }
    println!();

    Ok(())
}
