use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use library_app::modules::{books::models::ListBooksParams, taxonomies::models::ListTermsParams};
use library_app::modules::taxonomies::{models::TermPayload, TERM_NOT_FOUND};
use library_db::{TaxonomyKind, TermSummary};
use library_kernel::settings::Settings;

/// Command-line entrypoint for the library API
#[derive(Debug, Parser)]
#[command(name = "library-cli", version, about)]
struct Cli {
    /// Directory holding base.toml and the per-environment overlays
    #[arg(long, global = true, env = "LIBRARY_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// List published books as JSON
    Books {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        term_id: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        last_id: Option<u64>,
    },
    /// List authors or categories in use as JSON
    Terms {
        #[arg(value_enum)]
        collection: Collection,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        id: Option<u64>,
    },
    /// Show a single term
    Term { id: u64 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Collection {
    Authors,
    Categories,
}

impl From<Collection> for TaxonomyKind {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::Authors => TaxonomyKind::Author,
            Collection::Categories => TaxonomyKind::Category,
        }
    }
}

fn load_settings(config_dir: Option<PathBuf>) -> anyhow::Result<Settings> {
    let settings = match config_dir {
        Some(dir) => {
            let environment = std::env::var("LIBRARY_ENV").unwrap_or_else(|_| "local".to_string());
            Settings::load_from(&dir, &environment)
        }
        None => Settings::load(),
    };
    settings.with_context(|| "failed to load library settings")
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{}", rendered);
    Ok(())
}

async fn query(command: Command, settings: &Settings) -> anyhow::Result<ExitCode> {
    let catalog = library_db::open(&settings.database)
        .await
        .context("failed to open catalog")?;

    match command {
        Command::Serve => anyhow::bail!("serve is not a query command"),
        Command::Books {
            search,
            term_id,
            limit,
            last_id,
        } => {
            let params = ListBooksParams {
                s: search,
                term_id,
                limit,
                last_id,
            };
            let books = catalog
                .list_books(&params.to_query(&settings.library))
                .await
                .context("failed to list books")?;
            print_json(&books)?;
        }
        Command::Terms {
            collection,
            search,
            id,
        } => {
            let query = ListTermsParams { s: search, id }.to_query(collection.into());
            let terms = catalog
                .list_terms(&query)
                .await
                .context("failed to list terms")?;
            print_json(&TermPayload::from_results(&query, terms))?;
        }
        Command::Term { id } => match catalog.get_term(id).await? {
            Some(term) => print_json(&TermSummary::from(term))?,
            None => {
                eprintln!("{}", TERM_NOT_FOUND);
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config_dir)?;
    library_telemetry::init(&settings.telemetry)?;

    tracing::debug!(env = ?settings.environment, command = ?cli.command, "library-cli starting");

    match cli.command {
        Command::Serve => {
            library_app::run(settings).await?;
            Ok(ExitCode::SUCCESS)
        }
        command => query(command, &settings).await,
    }
}
