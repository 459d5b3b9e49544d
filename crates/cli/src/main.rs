//! Dewdrop CLI - Catalog queries and cart snapshot management.
//!
//! # Usage
//!
//! ```bash
//! # Filter and sort the catalog
//! dewdrop catalog list --brand Lumen --skin-type "oily, combination" --sort price-asc
//!
//! # Curated homepage lists
//! dewdrop catalog featured
//! dewdrop catalog best-sellers
//!
//! # Manage the cart snapshot
//! dewdrop cart add vitamin-c-serum --variant 30ml --price 28.00 -q 2
//! dewdrop cart update vitamin-c-serum --variant 30ml 1
//! dewdrop cart show
//!
//! # Check how free-form skin types will be stored
//! dewdrop skin-types "Oily, Dry" UNKNOWN
//! ```
//!
//! # Commands
//!
//! - `catalog` - Query a product catalog snapshot
//! - `cart` - Inspect and mutate a cart snapshot file
//! - `skin-types` - Normalize skin-type input

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::{CliConfig, LogFormat};
use error::CliError;

#[derive(Parser)]
#[command(name = "dewdrop")]
#[command(author, version, about = "Dewdrop storefront tools")]
struct Cli {
    /// Product catalog JSON (overrides `DEWDROP_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Cart snapshot JSON (overrides `DEWDROP_CART_PATH`)
    #[arg(long, global = true)]
    cart: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the cart snapshot
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Normalize skin-type input the way the catalog stores it
    SkinTypes {
        /// Comma-separated values or separate arguments
        #[arg(required = true)]
        input: Vec<String>,

        /// Also show tags outside the canonical set
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Filter and sort published products
    List(commands::catalog::ListArgs),
    /// Featured products, in catalog order
    Featured,
    /// Best-selling products, highest rated first
    BestSellers,
    /// Brand, category and skin-type counts for the filter sidebar
    Facets,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show line items and totals
    Show,
    /// Add units of a product
    Add(AddArgs),
    /// Set a line's quantity (0 or less removes it)
    Update {
        product_id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        #[arg(long)]
        variant: Option<String>,
    },
    /// Remove a line
    Remove {
        product_id: String,

        #[arg(long)]
        variant: Option<String>,
    },
    /// Empty the cart
    Clear,
}

#[derive(Args)]
struct AddArgs {
    product_id: String,

    /// Unit price, e.g. 28.00
    #[arg(long)]
    price: Decimal,

    /// Size, shade or other variant
    #[arg(long)]
    variant: Option<String>,

    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,

    /// Reject the add if the line would exceed this many units
    #[arg(long)]
    stock_limit: Option<u32>,
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dewdrop_cli=info,dewdrop_core=info".into());

    let json = format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = CliConfig::from_env();
    init_tracing(config.as_ref().map_or(LogFormat::Text, |c| c.log_format));

    let result = config
        .map_err(CliError::from)
        .and_then(|config| run(cli, config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut config: CliConfig) -> Result<(), CliError> {
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }
    if let Some(path) = cli.cart {
        config.cart_path = path;
    }
    let format = commands::OutputFormat::from_flag(cli.json);

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List(args) => commands::catalog::list(&config, &args, format)?,
            CatalogAction::Featured => commands::catalog::featured(&config, format)?,
            CatalogAction::BestSellers => commands::catalog::best_sellers(&config, format)?,
            CatalogAction::Facets => commands::catalog::facets(&config, format)?,
        },
        Commands::Cart { action } => {
            let path = &config.cart_path;
            match action {
                CartAction::Show => commands::cart::show(path, format)?,
                CartAction::Add(args) => {
                    let mut item = dewdrop_core::AddItem::new(args.product_id, args.price)
                        .quantity(args.quantity);
                    if let Some(variant) = args.variant {
                        item = item.variant(variant);
                    }
                    if let Some(limit) = args.stock_limit {
                        item = item.stock_limit(limit);
                    }
                    commands::cart::add(path, item, format)?;
                }
                CartAction::Update {
                    product_id,
                    quantity,
                    variant,
                } => commands::cart::update(path, &product_id, variant.as_deref(), quantity, format)?,
                CartAction::Remove {
                    product_id,
                    variant,
                } => commands::cart::remove(path, &product_id, variant.as_deref(), format)?,
                CartAction::Clear => commands::cart::clear(path, format)?,
            }
        }
        Commands::SkinTypes { input, all } => commands::skin_types::run(&input, all, format)?,
    }
    Ok(())
}
