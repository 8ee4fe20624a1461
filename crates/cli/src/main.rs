//! Bakehouse CLI - Recipe costing and pricing tools.
//!
//! # Usage
//!
//! ```bash
//! # Convert a quantity between units
//! bh-cli convert 1.5 kg g
//!
//! # Cost a recipe, with a per-line breakdown
//! bh-cli --catalog bakery.yaml recipe cost rec_chocolate_cake --breakdown
//!
//! # Scale a recipe to 24 servings
//! bh-cli --catalog bakery.yaml recipe scale rec_chocolate_cake 24
//!
//! # Price every product in the catalog
//! bh-cli --catalog bakery.yaml product price --all
//!
//! # Check a catalog for invalid records, cycles and low stock
//! bh-cli --catalog bakery.yaml check
//! ```
//!
//! # Commands
//!
//! - `convert` - Convert a quantity between units of the same family
//! - `recipe cost` - Cost one batch of a recipe
//! - `recipe scale` - Scale a recipe to a new serving count
//! - `recipe can-use` - Check whether a sub-recipe can be added without a cycle
//! - `product price` - Compute cost price, suggested price and margin
//! - `check` - Validate a whole catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bakehouse_core::Unit;
use bakehouse_costing::{CostingConfig, LogFormat};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "bh-cli")]
#[command(author, version, about = "Bakehouse costing tools")]
struct Cli {
    /// Catalog file (YAML or JSON). Defaults to `BAKEHOUSE_CATALOG`.
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a quantity between units
    Convert {
        /// Quantity to convert
        value: Decimal,
        /// Unit the quantity is in (e.g. `kg`, `liter`, `dozen`)
        from: Unit,
        /// Unit to convert into
        to: Unit,
    },
    /// Cost, scale and check recipes
    Recipe {
        #[command(subcommand)]
        action: RecipeAction,
    },
    /// Price products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Validate every record in the catalog
    Check,
}

#[derive(Subcommand)]
enum RecipeAction {
    /// Cost one batch of a recipe
    Cost {
        /// Recipe ID
        id: String,

        /// Show per-line costs, labor and suggested price
        #[arg(short, long)]
        breakdown: bool,
    },
    /// Scale a recipe to a new number of servings
    Scale {
        /// Recipe ID
        id: String,

        /// Servings the scaled recipe should yield (1-999)
        servings: u32,
    },
    /// Check whether a recipe can use another as a sub-recipe
    CanUse {
        /// Recipe being edited
        id: String,

        /// Sub-recipe to add
        sub_recipe: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Compute cost price, suggested price and profit margin
    Price {
        /// Product ID
        #[arg(required_unless_present = "all")]
        id: Option<String>,

        /// Price every product in the catalog
        #[arg(short, long, conflicts_with = "id")]
        all: bool,
    },
}

#[tokio::main]
async fn main() {
    let config = match CostingConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`, in text or JSON format.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bakehouse_costing=info,bakehouse_cli=info".into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, config: &CostingConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert { value, from, to } => {
            commands::convert::convert(value, from, to)?;
        }
        Commands::Recipe { action } => {
            let catalog = commands::load_catalog(cli.catalog, config).await?;
            match action {
                RecipeAction::Cost { id, breakdown } => {
                    commands::recipe::cost(&catalog, &id, breakdown)?;
                }
                RecipeAction::Scale { id, servings } => {
                    commands::recipe::scale(&catalog, &id, servings)?;
                }
                RecipeAction::CanUse { id, sub_recipe } => {
                    commands::recipe::can_use(&catalog, &id, &sub_recipe)?;
                }
            }
        }
        Commands::Product { action } => {
            let catalog = commands::load_catalog(cli.catalog, config).await?;
            match action {
                ProductAction::Price { id: Some(id), all: false } => {
                    commands::product::price(&catalog, &id)?;
                }
                ProductAction::Price { .. } => commands::product::price_all(&catalog)?,
            }
        }
        Commands::Check => {
            let catalog = commands::load_catalog(cli.catalog, config).await?;
            commands::check::check(&catalog)?;
        }
    }
    Ok(())
}
