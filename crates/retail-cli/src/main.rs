//! RetailMind CLI - storefront analytics
//!
//! Usage:
//!   retail dashboard                    Full admin report
//!   retail forecast --product p1        Demand forecast for one product
//!   retail price --base-price 250       Revenue curve and optimal price
//!   retail recommend -b 100-500 --hobbies tech,sport
//!   retail import-sales --file sales.csv

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let data = cli.data.as_path();

    match cli.command {
        Commands::Metrics => commands::cmd_metrics(data, &config, cli.json),
        Commands::Products { search } => {
            commands::cmd_products(data, &config, search.as_deref(), cli.json)
        }
        Commands::Forecast { product } => {
            commands::cmd_forecast(data, &config, product.as_deref(), cli.json)
        }
        Commands::Price {
            product,
            base_price,
        } => commands::cmd_price(data, &config, product.as_deref(), base_price, cli.json),
        Commands::Restock { search } => {
            commands::cmd_restock(data, &config, search.as_deref(), cli.json)
        }
        Commands::Recommend {
            budget,
            hobbies,
            brands,
            job,
            strategy,
            save_persona,
        } => {
            let persona =
                commands::persona_from_args(&budget, &hobbies, brands.as_deref(), job.as_deref());
            commands::cmd_recommend(data, &config, persona, &strategy, save_persona, cli.json)
        }
        Commands::Dashboard { product } => {
            commands::cmd_dashboard(data, &config, product.as_deref(), cli.json)
        }
        Commands::ImportSales { file } => commands::cmd_import_sales(data, &file),
        Commands::Checkout { items } => commands::cmd_checkout(data, &items, cli.json),
        Commands::Config => commands::cmd_config(cli.config.as_deref(), &config, cli.json),
    }
}
