use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use price_catalog::{
    AppConfig, CatalogView, HttpObjectStore, MemoryObjectStore, ObjectStore,
    view::ViewState,
    web::{self, AppState},
};

#[derive(Parser)]
#[command(name = "price-catalog", version, about = "Lowest-price product catalog")]
struct Cli {
    /// Config file; defaults to config/default plus RUN_MODE and env overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the catalog in the background and serve the dashboard
    Serve,
    /// Load the catalog once and print each product's offers
    List {
        #[arg(long)]
        search: Option<String>,
        /// Read the catalog document from a local file instead of object storage
        #[arg(long)]
        catalog_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    let _guard = init_tracing(&config)?;

    info!("Starting price-catalog {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Serve => serve(config).await,
        Command::List { search, catalog_file } => list(config, search, catalog_file).await,
    }
}

fn init_tracing(config: &AppConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::from_default_env().add_directive("price_catalog=debug".parse()?);
    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match &config.logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "price-catalog.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry.with(fmt::layer().with_ansi(false).with_writer(writer)).init();
            Ok(Some(guard))
        }
        None => {
            registry.init();
            Ok(None)
        }
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let store: Arc<dyn ObjectStore> = Arc::new(HttpObjectStore::from_config(&config.storage)?);
    let view = Arc::new(CatalogView::from_config(&config, store)?);

    tokio::spawn({
        let view = view.clone();
        async move {
            if let Err(e) = view.initialize().await {
                warn!(error = %e, "Catalog initialization skipped");
            }
        }
    });

    let state = AppState {
        view,
        config: config.clone(),
    };
    web::serve(config, state).await
}

async fn list(config: AppConfig, search: Option<String>, catalog_file: Option<PathBuf>) -> Result<()> {
    let store: Arc<dyn ObjectStore> = match catalog_file {
        Some(path) => {
            Arc::new(MemoryObjectStore::from_file(&config.storage.bucket, &config.storage.catalog_key, path).await?)
        }
        None => Arc::new(HttpObjectStore::from_config(&config.storage)?),
    };

    let view = CatalogView::from_config(&config, store)?;
    view.initialize().await?;
    if let ViewState::Failed(message) = view.state().await {
        anyhow::bail!(message);
    }

    if let Some(query) = search {
        view.set_query(&query).await;
    }

    for card in view.visible_products().await? {
        println!("{}", card.display_name);
        println!("  lowest: {} on {} ({})", card.lowest.formatted_price, card.lowest.website, card.lowest.url);
        for offer in &card.others {
            println!("  {}: {} ({})", offer.website, offer.formatted_price, offer.url);
        }
        if let Some(savings) = &card.savings {
            println!("  {}", savings);
        }
    }

    Ok(())
}
