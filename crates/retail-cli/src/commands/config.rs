//! Configuration display command

use std::path::Path;

use anyhow::Result;
use retail_core::config::{default_config_path, resolve_path};
use retail_core::AnalyticsConfig;
use serde_json::json;

use super::print_json;

pub fn cmd_config(config_path: Option<&Path>, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let source = resolve_path(config_path);

    if json {
        return print_json(&json!({
            "source": source.as_ref().map(|p| p.display().to_string()),
            "config": config,
        }));
    }

    println!();
    println!("⚙️  Analytics Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    match &source {
        Some(path) => println!("   Source: {}", path.display()),
        None => println!("   Source: built-in defaults"),
    }
    if let Some(path) = config_path.filter(|p| !p.exists()) {
        println!("   ⚠️  {} does not exist, ignored", path.display());
    }
    if source.is_none() {
        if let Some(path) = default_config_path() {
            println!("   Override: {} (not present)", path.display());
        }
    }

    let p = &config.pricing;
    println!();
    println!("   Pricing");
    println!(
        "     demand(p) = {} - {} * p, base {:.2}",
        p.demand_intercept, p.demand_slope, p.default_base_price
    );
    println!("     price factors: {:?}", p.price_factors);

    let d = &config.demand;
    println!("   Demand");
    println!(
        "     rainy x{}, cloudy x{}, weekend x{}",
        d.rainy_factor, d.cloudy_factor, d.weekend_factor
    );
    println!(
        "     fallback: {} observed {} predicted {}",
        d.fallback_day, d.fallback_observed, d.fallback_predicted
    );

    println!("   Restock");
    println!(
        "     horizon {} days, safety buffer {}",
        config.restock.horizon_days, config.restock.safety_buffer
    );

    println!("   Recommend");
    println!(
        "     affinity categories: {}, event boost x{}",
        config.recommend.affinity_categories.join(", "),
        config.recommend.event_boost
    );

    println!("   Metrics");
    println!(
        "     low stock below {}, top {} products",
        config.metrics.low_stock_threshold, config.metrics.top_products
    );
    println!(
        "     stock status: low < {}, medium < {}",
        config.stock_status.low_below, config.stock_status.medium_below
    );
    println!();

    Ok(())
}
