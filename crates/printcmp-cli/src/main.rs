mod import;
mod query;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use printcmp_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "printcmp-cli")]
#[command(about = "Print price comparison operator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Load catalog data from external files
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
    /// List the formats, quantities and finishes offered for a category
    Options {
        /// Category slug or name (e.g. tarjetas, "Roll Up")
        #[arg(long)]
        category: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Rank vendors by price for one product configuration
    Compare {
        #[arg(long)]
        category: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        format: Option<String>,
        #[arg(long)]
        finish: Option<String>,
        /// Only meaningful for Carpetas
        #[arg(long)]
        folder_type: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the category vocabulary
    Categories,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Upsert the vendor directory from the vendors file
    Seed,
}

#[derive(Debug, Subcommand)]
enum ImportCommands {
    /// Upsert offers from a semicolon-separated export
    Offers {
        #[arg(long)]
        file: PathBuf,
        /// Parse and report without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => run_db(command).await?,
        Some(Commands::Import {
            command: ImportCommands::Offers { file, dry_run },
        }) => import::run_import_offers(&file, dry_run).await?,
        Some(Commands::Options { category, json }) => {
            let (config, pool) = connect().await?;
            query::run_options(&pool, query_timeout(&config), &category, json).await?;
        }
        Some(Commands::Compare {
            category,
            quantity,
            format,
            finish,
            folder_type,
            json,
        }) => {
            let (config, pool) = connect().await?;
            let request = query::compare_request(category, quantity, format, finish, folder_type);
            query::run_compare(&pool, query_timeout(&config), request, json).await?;
        }
        Some(Commands::Categories) => query::run_categories(),
        None => println!("printcmp-cli ready; run with --help for commands"),
    }

    Ok(())
}

async fn run_db(command: DbCommands) -> anyhow::Result<()> {
    let (config, pool) = connect().await?;

    match command {
        DbCommands::Ping => {
            printcmp_db::health_check(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = printcmp_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Seed => {
            let file = printcmp_core::load_vendors(&config.vendors_path)?;
            let count = printcmp_db::seed_vendors(&pool, &file.vendors).await?;
            println!(
                "seeded {count} vendor(s) from {}",
                config.vendors_path.display()
            );
        }
    }

    Ok(())
}

pub(crate) async fn connect() -> anyhow::Result<(AppConfig, sqlx::PgPool)> {
    let config = printcmp_core::load_app_config()?;
    let pool_config = printcmp_db::PoolConfig::from_app_config(&config);
    let pool = printcmp_db::connect_pool(&config.database_url, pool_config).await?;
    Ok((config, pool))
}

fn query_timeout(config: &AppConfig) -> Duration {
    Duration::from_secs(config.query_timeout_secs)
}
