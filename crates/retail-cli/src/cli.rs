//! CLI argument definitions using clap
//!
//! This module contains the clap structs for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// RetailMind - storefront analytics from the command line
#[derive(Parser)]
#[command(name = "retail")]
#[command(about = "Demand, pricing, restock and recommendation analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file (JSON dump of products, sales, events, orders, personas)
    #[arg(long, default_value = "retail.json", global = true)]
    pub data: PathBuf,

    /// Analytics config file (TOML)
    ///
    /// Falls back to the override in the user data dir, then to the
    /// built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dashboard metrics (total sales, low stock, best sellers, orders)
    Metrics,

    /// List the catalog with stock status
    Products {
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Demand forecast from sales history
    Forecast {
        /// Only use this product's sales (default: all products)
        #[arg(short, long)]
        product: Option<String>,
    },

    /// Revenue curve and optimal price
    Price {
        /// Use this product's price as the base price
        #[arg(short, long, conflicts_with = "base_price")]
        product: Option<String>,

        /// Base price for the curve (default from config)
        #[arg(long)]
        base_price: Option<f64>,
    },

    /// Restock suggestions for products projected to run short
    Restock {
        /// Case-insensitive product name filter
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Recommend products for a shopper persona
    Recommend {
        /// Budget range as "min-max" (e.g. 100-500)
        #[arg(short, long)]
        budget: String,

        /// Comma-separated hobbies (e.g. tech,sport)
        #[arg(long, default_value = "")]
        hobbies: String,

        /// Comma-separated favorite brands
        #[arg(long)]
        brands: Option<String>,

        /// Job type
        #[arg(long)]
        job: Option<String>,

        /// Ranking strategy: score-boost, catalog-order
        #[arg(long, default_value = "score-boost")]
        strategy: String,

        /// Record the persona in the snapshot
        #[arg(long)]
        save_persona: bool,
    },

    /// Full admin report (metrics, forecast, price curve, restock)
    Dashboard {
        /// Product to focus the forecast and price curve on
        #[arg(short, long)]
        product: Option<String>,
    },

    /// Append sales from a CSV file (productId,quantity,date,weather,event)
    ImportSales {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Check out a cart, creating orders and decrementing stock
    Checkout {
        /// Cart line as PRODUCT_ID:QTY (repeatable; QTY defaults to 1)
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
    },

    /// Show the resolved analytics configuration
    Config,
}
