use clap::{Parser, Subcommand};
use fichas::application::catalog::CatalogProvider;
use fichas::application::ledger::TokenLedger;
use fichas::domain::ports::{ProductStoreBox, TokenStoreBox};
use fichas::domain::token::RedemptionOutcome;
use fichas::infrastructure::in_memory::{InMemoryProductStore, InMemoryTokenStore};
#[cfg(feature = "storage-rocksdb")]
use fichas::infrastructure::rocksdb::RocksDBStore;
use fichas::interfaces::csv::product_reader::ProductReader;
use fichas::interfaces::csv::product_writer::ProductWriter;
use fichas::interfaces::csv::token_writer::TokenWriter;
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const EXIT_ALREADY_CONSUMED: u8 = 2;
const EXIT_NOT_FOUND: u8 = 3;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "FICHAS_DB_PATH", global = true)]
    db_path: Option<PathBuf>,

    /// Catalog CSV (id,name,price,image) to load before running the command.
    #[arg(long, env = "FICHAS_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the catalog, sorted by name
    Products,
    /// Buy a product and print the issued tokens
    Buy {
        product_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// List available tokens, most recent first
    Wallet,
    /// Redeem a token code at the bar
    Redeem { code: String },
    /// Print a token as JSON without redeeming it
    Show { code: String },
    /// Import a catalog CSV into the store
    ImportCatalog { input: PathBuf },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let (product_store, token_store) = open_stores(cli.db_path)?;
    let catalog = CatalogProvider::new(product_store);
    let ledger = TokenLedger::new(token_store);

    if let Some(path) = &cli.catalog {
        load_catalog(&catalog, path).await?;
    }

    let stdout = io::stdout();
    match cli.command {
        Command::Products => {
            let products = catalog.list_products().await.into_diagnostic()?;
            ProductWriter::new(stdout.lock())
                .write_products(&products)
                .into_diagnostic()?;
        }
        Command::Buy {
            product_id,
            quantity,
        } => {
            let product = catalog
                .find_product(&product_id)
                .await
                .into_diagnostic()?
                .ok_or_else(|| miette!("Unknown product: {product_id}"))?;
            let tokens = ledger.issue(&product, quantity).await.into_diagnostic()?;
            TokenWriter::new(stdout.lock())
                .write_tokens(&tokens)
                .into_diagnostic()?;
        }
        Command::Wallet => {
            let tokens = ledger.list_available().await.into_diagnostic()?;
            TokenWriter::new(stdout.lock())
                .write_tokens(&tokens)
                .into_diagnostic()?;
        }
        Command::Redeem { code } => {
            let outcome = ledger.redeem(&code).await.into_diagnostic()?;
            match outcome.token() {
                Some(token) => println!("{} {}", outcome.label(), token.product_name),
                None => println!("{}", outcome.label()),
            }
            return Ok(match outcome {
                RedemptionOutcome::Redeemed(_) => ExitCode::SUCCESS,
                RedemptionOutcome::AlreadyConsumed(_) => ExitCode::from(EXIT_ALREADY_CONSUMED),
                RedemptionOutcome::NotFound => ExitCode::from(EXIT_NOT_FOUND),
            });
        }
        Command::Show { code } => match ledger.find_by_id(&code).await.into_diagnostic()? {
            Some(token) => {
                println!("{}", serde_json::to_string_pretty(&token).into_diagnostic()?);
            }
            None => {
                println!("{}", RedemptionOutcome::NotFound.label());
                return Ok(ExitCode::from(EXIT_NOT_FOUND));
            }
        },
        Command::ImportCatalog { input } => {
            let count = load_catalog(&catalog, &input).await?;
            println!("imported {count} products");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn open_stores(db_path: Option<PathBuf>) -> Result<(ProductStoreBox, TokenStoreBox)> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok((Box::new(store.clone()), Box::new(store)))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
            );
            Ok(in_memory_stores())
        }
        None => Ok(in_memory_stores()),
    }
}

fn in_memory_stores() -> (ProductStoreBox, TokenStoreBox) {
    (
        Box::new(InMemoryProductStore::new()),
        Box::new(InMemoryTokenStore::new()),
    )
}

async fn load_catalog(catalog: &CatalogProvider, path: &Path) -> Result<usize> {
    let file = File::open(path).into_diagnostic()?;
    let mut products = Vec::new();
    for row in ProductReader::new(file).products() {
        match row {
            Ok(product) => products.push(product),
            Err(e) => warn!(error = %e, "Skipping catalog row"),
        }
    }
    catalog.import(products).await.into_diagnostic()
}
