//! Integration tests for retail-core
//!
//! These tests exercise the full import → analyze → checkout workflow
//! against a snapshot on disk.

use std::io::Write;

use chrono::{TimeZone, Utc};
use retail_core::{
    import::parse_sales_csv, AnalyticsConfig, Cart, Dashboard, Error, ProductFilter, Recommender,
    Snapshot, StockStatus,
};

fn catalog_json() -> serde_json::Value {
    serde_json::json!({
        "products": [
            {"_id": "p1", "name": "Umbrella", "category": "Accessories", "price": 250.0,
             "stock": 5, "brand": "Rainy Day", "demand": 40, "image": "☂️"},
            {"_id": "p2", "name": "Coca Cola", "category": "Beverages", "price": 40.0,
             "stock": 100, "demand": 70},
            {"_id": "p3", "name": "Protein Bar", "category": "Health", "price": 120.0,
             "stock": 20, "tags": ["fitness"], "demand": 50}
        ],
        "events": [
            {"name": "Monsoon", "impact": "20", "products": ["umbrella"], "type": "seasonal"},
            {"name": "Gym Week", "impact": 10, "products": ["protein"], "date": "2025-07-20"}
        ]
    })
}

/// Two umbrella sales (rainy Monday during Monsoon, clear Saturday),
/// one cloudy cola sale and one sunny protein bar sale
fn sales_csv() -> &'static str {
    "productId,quantity,date,weather,event
p1,10,2025-07-14,Rainy,Monsoon
p1,10,2025-07-12,Clear,
p2,6,2025-07-15,Cloudy,
p3,2,2025-07-16,sunny,
"
}

fn loaded_snapshot() -> Snapshot {
    let mut snapshot: Snapshot = serde_json::from_value(catalog_json()).unwrap();
    snapshot
        .sales
        .extend(parse_sales_csv(sales_csv().as_bytes()).unwrap());
    snapshot
}

// =============================================================================
// Dashboard Workflow
// =============================================================================

#[test]
fn test_import_then_dashboard() {
    let config = AnalyticsConfig::default();
    let snapshot = loaded_snapshot();
    assert_eq!(snapshot.sales.len(), 4);

    let report = Dashboard::new(&config)
        .build(&snapshot, &ProductFilter::All)
        .unwrap();

    assert_eq!(report.metrics.total_sales, 28);
    let top: Vec<(&str, u64)> = report
        .metrics
        .top_products
        .iter()
        .map(|t| (t.product_id.as_str(), t.total_quantity))
        .collect();
    assert_eq!(top, vec![("p1", 20), ("p2", 6), ("p3", 2)]);

    let low: Vec<&str> = report.metrics.low_stock.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(low, vec!["p1", "p3"]);

    // Umbrella: 10/day * 5 days * 1.2 (Monsoon) = 60; 60 - 5 + 10 = 65
    assert_eq!(report.restock_suggestions.len(), 1);
    assert_eq!(report.restock_suggestions[0].product_id, "p1");
    assert_eq!(report.restock_suggestions[0].predicted_demand, 60);
    assert_eq!(report.restock_suggestions[0].recommended_restock_qty, 65);

    assert_eq!(report.base_price, 300.0);
    assert_eq!(report.optimal_price, 500.0);
}

#[test]
fn test_product_dashboard() {
    let config = AnalyticsConfig::default();
    let report = Dashboard::new(&config)
        .build(&loaded_snapshot(), &ProductFilter::from(Some("p1")))
        .unwrap();

    // 10 * 1.2 (Monsoon) * 1.2 (rain) = 14.4; 10 * 1.1 (Saturday) = 11
    let predicted: Vec<u32> = report.demand_data.iter().map(|p| p.predicted_demand).collect();
    assert_eq!(predicted, vec![14, 11]);

    let prices: Vec<f64> = report.price_data.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![200.0, 225.0, 250.0, 275.0, 300.0]);
    assert_eq!(report.price_data[2].revenue, 18750);
    assert_eq!(report.price_data[2].demand, 75);
}

// =============================================================================
// Recommendation Workflow
// =============================================================================

#[test]
fn test_persona_recommendations() {
    let snapshot = loaded_snapshot();
    let persona = serde_json::from_value(serde_json::json!({
        "jobType": "Engineer",
        "budgetRange": "100-300",
        "hobbies": "fitness, reading"
    }))
    .unwrap();

    let recs = Recommender::new()
        .recommend(&snapshot.products, &persona, &snapshot.events)
        .unwrap();

    // Umbrella has no matching tag or affinity category; cola is under budget
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].product.id, "p3");
    assert_eq!(recs[0].score, 1.0);
    assert_eq!(recs[0].boost, 1.2);
    assert_eq!(recs[0].product.demand, 60);
}

// =============================================================================
// Checkout and Persistence
// =============================================================================

#[test]
fn test_checkout_persists_through_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("retail.json");
    loaded_snapshot().save(&path).unwrap();

    let mut snapshot = Snapshot::load(&path).unwrap();
    let mut cart = Cart::new();
    cart.add_quantity(snapshot.product("p1").unwrap(), 3);
    cart.add(snapshot.product("p2").unwrap());
    assert_eq!(cart.total(), 790.0);

    let now = Utc.with_ymd_and_hms(2025, 7, 21, 18, 0, 0).unwrap();
    let orders = cart.checkout(&mut snapshot.products, now).unwrap();
    snapshot.orders.extend(orders);
    snapshot.save(&path).unwrap();

    let reloaded = Snapshot::load(&path).unwrap();
    assert_eq!(reloaded.orders.len(), 2);
    assert_eq!(reloaded.product("p1").unwrap().stock, 2);
    assert_eq!(reloaded.product("p2").unwrap().stock, 99);

    let config = AnalyticsConfig::default();
    assert_eq!(
        config.stock_status(reloaded.product("p1").unwrap().stock),
        StockStatus::Low
    );

    let report = Dashboard::new(&config)
        .build(&reloaded, &ProductFilter::All)
        .unwrap();
    assert_eq!(report.metrics.total_orders, 2);
    // 60 - 2 + 10
    assert_eq!(report.restock_suggestions[0].recommended_restock_qty, 68);
}

#[test]
fn test_oversold_checkout_leaves_catalog_untouched() {
    let mut snapshot = loaded_snapshot();
    let mut cart = Cart::new();
    cart.add_quantity(snapshot.product("p3").unwrap(), 2);
    cart.add_quantity(snapshot.product("p1").unwrap(), 6);

    let result = cart.checkout(&mut snapshot.products, Utc::now());
    assert!(matches!(result, Err(Error::InsufficientStock { .. })));
    assert_eq!(snapshot.products, loaded_snapshot().products);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_file_changes_restock() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[restock]\nhorizon_days = 10").unwrap();

    let config = AnalyticsConfig::load(Some(file.path())).unwrap();
    let report = Dashboard::new(&config)
        .build(&loaded_snapshot(), &ProductFilter::All)
        .unwrap();

    // 10/day * 10 days * 1.2 = 120; 120 - 5 + 10 = 125
    let umbrella = report
        .restock_suggestions
        .iter()
        .find(|s| s.product_id == "p1")
        .unwrap();
    assert_eq!(umbrella.recommended_restock_qty, 125);
}

#[test]
fn test_bad_event_impact_fails_dashboard() {
    let mut snapshot = loaded_snapshot();
    snapshot.events[0].impact = "lots".to_string();

    let config = AnalyticsConfig::default();
    let result = Dashboard::new(&config).build(&snapshot, &ProductFilter::All);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}
