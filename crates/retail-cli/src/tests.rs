//! CLI command tests
//!
//! Commands run against snapshot files in a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use retail_core::{AnalyticsConfig, Snapshot};
use tempfile::TempDir;

use crate::commands::{self, truncate};

fn sample_snapshot() -> Snapshot {
    serde_json::from_value(serde_json::json!({
        "products": [
            {"_id": "p1", "name": "Umbrella", "category": "Accessories", "price": 250.0,
             "stock": 5, "tags": ["rain"], "demand": 40},
            {"_id": "p2", "name": "Smart Watch", "category": "Electronics", "price": 300.0,
             "stock": 40, "tags": ["tech"], "demand": 50},
            {"_id": "p3", "name": "Yoga Mat", "category": "Fitness", "price": 120.0,
             "stock": 12, "demand": 30}
        ],
        "sales": [
            {"productId": "p1", "quantity": 10, "date": "2025-07-14", "weather": "Rainy"},
            {"productId": "p2", "quantity": 3, "date": "2025-07-12", "weather": "Clear"}
        ],
        "events": [
            {"name": "Monsoon", "impact": "20", "products": ["umbrella"]}
        ]
    }))
    .unwrap()
}

/// Write the sample snapshot into a fresh temp dir, returning (dir, path)
fn setup_data() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("retail.json");
    sample_snapshot().save(&path).unwrap();
    (dir, path)
}

fn reload(path: &Path) -> Snapshot {
    Snapshot::load(path).unwrap()
}

fn config() -> AnalyticsConfig {
    AnalyticsConfig::default()
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_metrics() {
    let (_dir, path) = setup_data();
    assert!(commands::cmd_metrics(&path, &config(), false).is_ok());
    assert!(commands::cmd_metrics(&path, &config(), true).is_ok());
}

#[test]
fn test_cmd_metrics_missing_snapshot_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nothing.json");
    assert!(commands::cmd_metrics(&path, &config(), false).is_ok());
    // Read-only commands never create the file
    assert!(!path.exists());
}

#[test]
fn test_cmd_metrics_corrupt_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("retail.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(commands::cmd_metrics(&path, &config(), false).is_err());
}

#[test]
fn test_cmd_products() {
    let (_dir, path) = setup_data();
    assert!(commands::cmd_products(&path, &config(), None, false).is_ok());
    assert!(commands::cmd_products(&path, &config(), Some("mat"), true).is_ok());
    assert!(commands::cmd_products(&path, &config(), Some("nothing"), false).is_ok());
}

#[test]
fn test_cmd_forecast() {
    let (_dir, path) = setup_data();
    assert!(commands::cmd_forecast(&path, &config(), None, false).is_ok());
    assert!(commands::cmd_forecast(&path, &config(), Some("p1"), true).is_ok());
    assert!(commands::cmd_forecast(&path, &config(), Some("all"), false).is_ok());
}

#[test]
fn test_cmd_forecast_unknown_product() {
    let (_dir, path) = setup_data();
    assert!(commands::cmd_forecast(&path, &config(), Some("zzz"), false).is_err());
}

#[test]
fn test_cmd_price() {
    let (_dir, path) = setup_data();
    assert!(commands::cmd_price(&path, &config(), None, None, false).is_ok());
    assert!(commands::cmd_price(&path, &config(), Some("p2"), None, true).is_ok());
    assert!(commands::cmd_price(&path, &config(), None, Some(120.0), false).is_ok());
}

#[test]
fn test_cmd_price_errors() {
    let (_dir, path) = setup_data();
    assert!(commands::cmd_price(&path, &config(), Some("zzz"), None, false).is_err());
    assert!(commands::cmd_price(&path, &config(), None, Some(-5.0), false).is_err());
}

#[test]
fn test_cmd_restock() {
    let (_dir, path) = setup_data();
    assert!(commands::cmd_restock(&path, &config(), None, false).is_ok());
    assert!(commands::cmd_restock(&path, &config(), Some("UMBRELLA"), true).is_ok());
}

#[test]
fn test_cmd_dashboard() {
    let (_dir, path) = setup_data();
    assert!(commands::cmd_dashboard(&path, &config(), None, false).is_ok());
    assert!(commands::cmd_dashboard(&path, &config(), Some("p1"), true).is_ok());
    assert!(commands::cmd_dashboard(&path, &config(), Some("zzz"), false).is_err());
}

// ========== Recommend Command Tests ==========

#[test]
fn test_persona_from_args() {
    let persona = commands::persona_from_args(" 100-500 ", "tech, sport,", Some("Acme"), None);
    assert_eq!(persona.budget_range, "100-500");
    assert_eq!(persona.hobbies, vec!["tech", "sport"]);
    assert_eq!(persona.favorite_brands, vec!["Acme"]);
    assert_eq!(persona.job_type, "");
}

#[test]
fn test_cmd_recommend() {
    let (_dir, path) = setup_data();
    let persona = commands::persona_from_args("100-500", "tech", Some("Acme"), Some("Engineer"));

    assert!(
        commands::cmd_recommend(&path, &config(), persona.clone(), "score-boost", false, false)
            .is_ok()
    );
    assert!(commands::cmd_recommend(&path, &config(), persona, "catalog-order", false, true).is_ok());
    // Nothing was saved
    assert!(reload(&path).personas.is_empty());
}

#[test]
fn test_cmd_recommend_saves_persona() {
    let (_dir, path) = setup_data();
    let persona = commands::persona_from_args("0-1000", "yoga", None, None);

    commands::cmd_recommend(&path, &config(), persona, "score-boost", true, false).unwrap();

    let saved = reload(&path);
    assert_eq!(saved.personas.len(), 1);
    assert_eq!(saved.personas[0].hobbies, vec!["yoga"]);
    // Catalog untouched
    assert_eq!(saved.products, sample_snapshot().products);
}

#[test]
fn test_cmd_recommend_errors() {
    let (_dir, path) = setup_data();
    let bad_budget = commands::persona_from_args("cheap", "tech", None, None);
    assert!(commands::cmd_recommend(&path, &config(), bad_budget, "score-boost", false, false).is_err());

    let persona = commands::persona_from_args("0-500", "tech", None, None);
    assert!(commands::cmd_recommend(&path, &config(), persona, "random", false, false).is_err());
}

// ========== Import Command Tests ==========

#[test]
fn test_cmd_import_sales() {
    let (dir, path) = setup_data();
    let csv = dir.path().join("sales.csv");
    fs::write(
        &csv,
        "productId,quantity,date,weather,event\n\
         p1,4,2025-07-15,Cloudy,Monsoon\n\
         p9,1,2025-07-16,,\n",
    )
    .unwrap();

    commands::cmd_import_sales(&path, &csv).unwrap();

    let snapshot = reload(&path);
    assert_eq!(snapshot.sales.len(), 4);
    assert_eq!(snapshot.sales[2].quantity, 4);
    assert_eq!(snapshot.sales[2].event.as_deref(), Some("Monsoon"));
    assert_eq!(snapshot.sales[3].product_id, "p9");
}

#[test]
fn test_cmd_import_sales_creates_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.json");
    let csv = dir.path().join("sales.csv");
    fs::write(&csv, "productId,quantity,date\np1,2,2025-07-15\n").unwrap();

    commands::cmd_import_sales(&path, &csv).unwrap();
    assert_eq!(reload(&path).sales.len(), 1);
}

#[test]
fn test_cmd_import_sales_bad_file_leaves_snapshot() {
    let (dir, path) = setup_data();
    let csv = dir.path().join("bad.csv");
    fs::write(&csv, "productId,quantity,date\np1,2,2025-07-15\np1,-1,2025-07-16\n").unwrap();

    assert!(commands::cmd_import_sales(&path, &csv).is_err());
    assert!(commands::cmd_import_sales(&path, &dir.path().join("missing.csv")).is_err());
    assert_eq!(reload(&path).sales.len(), 2);
}

// ========== Checkout Command Tests ==========

#[test]
fn test_parse_item() {
    assert_eq!(commands::parse_item("p1:3").unwrap(), ("p1".to_string(), 3));
    assert_eq!(commands::parse_item("p1").unwrap(), ("p1".to_string(), 1));
    assert!(commands::parse_item("p1:0").is_err());
    assert!(commands::parse_item("p1:x").is_err());
    assert!(commands::parse_item(":2").is_err());
}

#[test]
fn test_cmd_checkout() {
    let (_dir, path) = setup_data();
    let items = vec!["p1:2".to_string(), "p3".to_string(), "p1:1".to_string()];

    commands::cmd_checkout(&path, &items, false).unwrap();

    let snapshot = reload(&path);
    assert_eq!(snapshot.orders.len(), 2);
    assert_eq!(snapshot.orders[0].product_id, "p1");
    assert_eq!(snapshot.orders[0].quantity, 3);
    assert_eq!(snapshot.product("p1").unwrap().stock, 2);
    assert_eq!(snapshot.product("p3").unwrap().stock, 11);
}

#[test]
fn test_cmd_checkout_insufficient_stock_changes_nothing() {
    let (_dir, path) = setup_data();
    let items = vec!["p2:1".to_string(), "p1:6".to_string()];

    let err = commands::cmd_checkout(&path, &items, false).unwrap_err();
    assert!(err.to_string().contains("Insufficient stock"));

    assert_eq!(reload(&path), sample_snapshot());
}

#[test]
fn test_cmd_checkout_unknown_product() {
    let (_dir, path) = setup_data();
    assert!(commands::cmd_checkout(&path, &["ghost:1".to_string()], true).is_err());
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config() {
    let cfg = config();
    assert!(commands::cmd_config(None, &cfg, false).is_ok());
    assert!(commands::cmd_config(Some(Path::new("/nonexistent/analytics.toml")), &cfg, true).is_ok());
}

#[test]
fn test_load_config_explicit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analytics.toml");
    fs::write(&path, "[restock]\nsafety_buffer = 0\n").unwrap();

    let cfg = commands::load_config(Some(path.as_path())).unwrap();
    assert_eq!(cfg.restock.safety_buffer, 0);

    fs::write(&path, "[restock\n").unwrap();
    assert!(commands::load_config(Some(path.as_path())).is_err());
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer product name", 10), "a much ...");
    assert_eq!(truncate("Çà et là, très long", 8), "Çà et...");
}
