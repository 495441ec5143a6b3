mod catalog;

use anyhow::Context;
use clap::{Parser, Subcommand};
use maison_core::SortBy;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "maison")]
#[command(about = "Maison storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products, optionally filtered and sorted
    Products {
        /// Only list products in this category
        #[arg(long)]
        category: Option<String>,
        /// Lowest price to include (inclusive)
        #[arg(long, requires = "max_price")]
        min_price: Option<Decimal>,
        /// Highest price to include (inclusive)
        #[arg(long, requires = "min_price")]
        max_price: Option<Decimal>,
        /// Sort key: price-asc, price-desc, or rating
        #[arg(long)]
        sort: Option<SortBy>,
        /// Print the filtered view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one product by id
    Product {
        id: String,
        /// Also list related products from the same category
        #[arg(long)]
        related: bool,
    },
    /// List catalog categories
    Categories,
}

fn build_storefront(
    config: &maison_core::AppConfig,
) -> anyhow::Result<maison_engine::Storefront<maison_gateway::FakeStoreClient>> {
    maison_engine::Storefront::from_config(config).context("failed to build catalog client")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = maison_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("maison: pass --help to list commands");
        return Ok(());
    };

    let storefront = build_storefront(&config)?;

    match command {
        Commands::Products {
            category,
            min_price,
            max_price,
            sort,
            json,
        } => {
            let query = catalog::ProductQuery {
                category,
                price_range: min_price.zip(max_price),
                sort,
            };
            catalog::run_products(&storefront, query, json).await?;
        }
        Commands::Product { id, related } => {
            catalog::run_product(&storefront, &id, related).await?;
        }
        Commands::Categories => catalog::run_categories(&storefront).await?,
    }

    Ok(())
}
