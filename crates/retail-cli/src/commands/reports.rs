//! Analytics report commands (metrics, products, forecast, price, restock, dashboard)

use std::path::Path;

use anyhow::Result;
use retail_core::{
    AnalyticsConfig, Dashboard, DashboardMetrics, DemandEstimator, ForecastPoint,
    MetricsAggregator, PriceOptimization, PriceOptimizer, ProductFilter, RestockAdvisor,
    RestockSuggestion,
};
use serde_json::json;

use super::{load_snapshot, print_json, truncate};

pub fn cmd_metrics(data_path: &Path, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let snapshot = load_snapshot(data_path)?;
    let metrics = MetricsAggregator::with_policy(config.metrics.clone()).aggregate(
        &snapshot.products,
        &snapshot.sales,
        &snapshot.orders,
    );

    if json {
        return print_json(&metrics);
    }

    print_metrics(&metrics, config.metrics.low_stock_threshold);
    Ok(())
}

pub fn cmd_products(
    data_path: &Path,
    config: &AnalyticsConfig,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(data_path)?;
    let products: Vec<_> = snapshot
        .products
        .iter()
        .filter(|p| name_matches(&p.name, search))
        .collect();

    if json {
        let rows: Vec<_> = products
            .iter()
            .map(|p| json!({ "product": p, "stockStatus": config.stock_status(p.stock) }))
            .collect();
        return print_json(&rows);
    }

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    println!();
    println!("🛍️  Products");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<12} {:<28} {:>10} {:>6}  {}",
        "ID", "Name", "Price", "Stock", "Status"
    );
    for p in products {
        println!(
            "   {:<12} {:<28} {:>10.2} {:>6}  {}",
            truncate(&p.id, 12),
            truncate(&p.name, 28),
            p.price,
            p.stock,
            config.stock_status(p.stock)
        );
    }
    println!();
    Ok(())
}

pub fn cmd_forecast(
    data_path: &Path,
    config: &AnalyticsConfig,
    product: Option<&str>,
    json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(data_path)?;
    let filter = ProductFilter::from(product);
    snapshot.selected_product(&filter)?;

    let points = DemandEstimator::with_factors(config.demand.clone())
        .estimate(&snapshot.sales_for(&filter), &snapshot.events)?;

    if json {
        return print_json(&json!({ "demandData": points }));
    }

    println!();
    println!("📈 Demand Forecast ({})", filter.product_id().unwrap_or("all products"));
    println!("   ─────────────────────────────");
    print_forecast(&points);
    println!();
    Ok(())
}

pub fn cmd_price(
    data_path: &Path,
    config: &AnalyticsConfig,
    product: Option<&str>,
    base_price: Option<f64>,
    json: bool,
) -> Result<()> {
    let base_price = match (product, base_price) {
        (_, Some(price)) => price,
        (Some(id), None) => {
            let snapshot = load_snapshot(data_path)?;
            snapshot
                .product(id)
                .map(|p| p.price)
                .ok_or_else(|| anyhow::anyhow!("Product not found: {}", id))?
        }
        (None, None) => config.pricing.default_base_price,
    };

    let result = PriceOptimizer::with_model(config.pricing.clone()).optimize(base_price)?;

    if json {
        return print_json(&result);
    }

    println!();
    println!("💲 Price Optimization (base {:.2})", base_price);
    println!("   ─────────────────────────────");
    print_price_curve(&result);
    println!();
    Ok(())
}

pub fn cmd_restock(
    data_path: &Path,
    config: &AnalyticsConfig,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(data_path)?;
    let suggestions: Vec<RestockSuggestion> = RestockAdvisor::with_policy(config.restock.clone())
        .suggest_all(&snapshot.products, &snapshot.sales, &snapshot.events)?
        .into_iter()
        .filter(|s| name_matches(&s.product_name, search))
        .collect();

    if json {
        return print_json(&suggestions);
    }

    if suggestions.is_empty() {
        println!("✅ No products need restocking.");
        return Ok(());
    }

    println!();
    println!("📦 Restock Suggestions");
    println!("   ─────────────────────────────────────────────────────────────");
    print_restock(&suggestions);
    println!();
    Ok(())
}

pub fn cmd_dashboard(
    data_path: &Path,
    config: &AnalyticsConfig,
    product: Option<&str>,
    json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(data_path)?;
    let report = Dashboard::new(config).build(&snapshot, &ProductFilter::from(product))?;

    if json {
        return print_json(&report);
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│        🏪 RetailMind Dashboard          │");
    println!("╰─────────────────────────────────────────╯");

    print_metrics(&report.metrics, config.metrics.low_stock_threshold);

    println!(
        "  📈 Demand ({})",
        report.selection.as_deref().unwrap_or("all products")
    );
    print_forecast(&report.demand_data);
    println!();

    println!("  💲 Pricing (base {:.2})", report.base_price);
    print_price_curve(&PriceOptimization {
        price_data: report.price_data,
        optimal_price: report.optimal_price,
    });
    println!();

    if report.restock_suggestions.is_empty() {
        println!("  ✅ No products need restocking.");
    } else {
        println!("  📦 Restock");
        print_restock(&report.restock_suggestions);
    }
    println!();
    Ok(())
}

/// Case-insensitive substring match; no search matches everything
fn name_matches(name: &str, search: Option<&str>) -> bool {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => name.to_lowercase().contains(&s.to_lowercase()),
        None => true,
    }
}

fn print_metrics(metrics: &DashboardMetrics, low_stock_threshold: u32) {
    println!();
    println!("  Total units sold:  {}", metrics.total_sales);
    println!("  Total orders:      {}", metrics.total_orders);
    println!();

    if metrics.low_stock.is_empty() {
        println!("  ✅ Nothing below {} units", low_stock_threshold);
    } else {
        println!("  ⚠️  Low stock (< {} units):", low_stock_threshold);
        for item in &metrics.low_stock {
            println!("     {:<30} {:>6}", truncate(&item.name, 30), item.stock);
        }
    }
    println!();

    if !metrics.top_products.is_empty() {
        println!("  🏆 Top products:");
        for (i, top) in metrics.top_products.iter().enumerate() {
            println!(
                "     {}. {:<28} {:>6} units",
                i + 1,
                truncate(&top.name, 28),
                top.total_quantity
            );
        }
        println!();
    }
}

fn print_forecast(points: &[ForecastPoint]) {
    println!("   {:<12} {:>9} {:>10}", "Day", "Observed", "Predicted");
    for point in points {
        println!(
            "   {:<12} {:>9} {:>10}",
            point.day, point.observed_demand, point.predicted_demand
        );
    }
}

fn print_price_curve(result: &PriceOptimization) {
    println!("   {:>10} {:>10} {:>8}", "Price", "Revenue", "Demand");
    for point in &result.price_data {
        println!(
            "   {:>10.2} {:>10} {:>8}",
            point.price, point.revenue, point.demand
        );
    }
    println!("   🎯 Optimal price: {:.2}", result.optimal_price);
}

fn print_restock(suggestions: &[RestockSuggestion]) {
    println!(
        "   {:<28} {:>7} {:>10} {:>9}",
        "Product", "Stock", "Predicted", "Reorder"
    );
    for s in suggestions {
        println!(
            "   {:<28} {:>7} {:>10} {:>9}",
            truncate(&s.product_name, 28),
            s.current_stock,
            s.predicted_demand,
            s.recommended_restock_qty
        );
    }
}
