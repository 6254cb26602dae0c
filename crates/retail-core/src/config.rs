//! Analytics model configuration
//!
//! Every constant used by the analytics layer (price model coefficients,
//! weather factors, restock horizon, thresholds) lives here so deployments can
//! tune the model without a rebuild.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path (e.g. `retail --config my.toml`), when the file exists
//! 2. Override in data dir (~/.local/share/retailmind/config/analytics.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::StockStatus;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Linear demand model used by the price optimizer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceModel {
    /// `a` in `demand(price) = a - b * price`
    pub demand_intercept: f64,
    /// `b` in `demand(price) = a - b * price`
    pub demand_slope: f64,
    pub price_factors: Vec<f64>,
    pub default_base_price: f64,
}

impl Default for PriceModel {
    fn default() -> Self {
        Self {
            demand_intercept: 100.0,
            demand_slope: 0.1,
            price_factors: vec![0.8, 0.9, 1.0, 1.1, 1.2],
            default_base_price: 300.0,
        }
    }
}

/// Multiplicative adjustments applied per sale by the demand estimator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandFactors {
    pub rainy_factor: f64,
    pub cloudy_factor: f64,
    pub weekend_factor: f64,
    pub fallback_day: NaiveDate,
    pub fallback_observed: u32,
    pub fallback_predicted: u32,
}

impl Default for DemandFactors {
    fn default() -> Self {
        Self {
            rainy_factor: 1.2,
            cloudy_factor: 1.1,
            weekend_factor: 1.1,
            fallback_day: NaiveDate::from_ymd_opt(2025, 7, 12).unwrap_or_default(),
            fallback_observed: 10,
            fallback_predicted: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockPolicy {
    pub horizon_days: u32,
    pub safety_buffer: u32,
}

impl Default for RestockPolicy {
    fn default() -> Self {
        Self {
            horizon_days: 5,
            safety_buffer: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendPolicy {
    pub affinity_categories: Vec<String>,
    pub event_boost: f64,
}

impl Default for RecommendPolicy {
    fn default() -> Self {
        Self {
            affinity_categories: vec!["Health".to_string(), "Fitness".to_string()],
            event_boost: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsPolicy {
    pub low_stock_threshold: u32,
    pub top_products: usize,
}

impl Default for MetricsPolicy {
    fn default() -> Self {
        Self {
            low_stock_threshold: 30,
            top_products: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockStatusPolicy {
    pub low_below: u32,
    pub medium_below: u32,
}

impl Default for StockStatusPolicy {
    fn default() -> Self {
        Self {
            low_below: 15,
            medium_below: 30,
        }
    }
}

/// Full analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsConfig {
    pub pricing: PriceModel,
    pub demand: DemandFactors,
    pub restock: RestockPolicy,
    pub recommend: RecommendPolicy,
    pub metrics: MetricsPolicy,
    pub stock_status: StockStatusPolicy,
}

impl AnalyticsConfig {
    /// Load configuration (explicit path, then data-dir override, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (content, source) = match resolve_path(path) {
            Some(p) => {
                let content = fs::read_to_string(&p).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", p.display(), e))
                })?;
                (content, p.display().to_string())
            }
            None => (DEFAULT_CONFIG.to_string(), "embedded".to_string()),
        };

        debug!(source = %source, "Loading analytics config");
        parse_config(&content)
    }

    /// Catalog stock label using the configured bands
    pub fn stock_status(&self, stock: u32) -> StockStatus {
        StockStatus::classify(
            stock,
            self.stock_status.low_below,
            self.stock_status.medium_below,
        )
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("retailmind").join("config").join("analytics.toml"))
}

/// The file `load` would read, or None for the embedded defaults
pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }
    default_config_path().filter(|p| p.exists())
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    pricing: Option<RawPricing>,
    demand: Option<RawDemand>,
    restock: Option<RawRestock>,
    recommend: Option<RawRecommend>,
    metrics: Option<RawMetrics>,
    stock_status: Option<RawStockStatus>,
}

#[derive(Debug, Deserialize)]
struct RawPricing {
    demand_intercept: Option<f64>,
    demand_slope: Option<f64>,
    price_factors: Option<Vec<f64>>,
    default_base_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDemand {
    rainy_factor: Option<f64>,
    cloudy_factor: Option<f64>,
    weekend_factor: Option<f64>,
    fallback_day: Option<String>,
    fallback_observed: Option<u32>,
    fallback_predicted: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawRestock {
    horizon_days: Option<u32>,
    safety_buffer: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawRecommend {
    affinity_categories: Option<Vec<String>>,
    event_boost: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawMetrics {
    low_stock_threshold: Option<u32>,
    top_products: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawStockStatus {
    low_below: Option<u32>,
    medium_below: Option<u32>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(pricing) = raw.pricing {
        if let Some(a) = pricing.demand_intercept {
            config.pricing.demand_intercept = a;
        }
        if let Some(b) = pricing.demand_slope {
            config.pricing.demand_slope = b;
        }
        if let Some(factors) = pricing.price_factors {
            config.pricing.price_factors = factors;
        }
        if let Some(base) = pricing.default_base_price {
            config.pricing.default_base_price = base;
        }
    }

    if let Some(demand) = raw.demand {
        if let Some(f) = demand.rainy_factor {
            config.demand.rainy_factor = f;
        }
        if let Some(f) = demand.cloudy_factor {
            config.demand.cloudy_factor = f;
        }
        if let Some(f) = demand.weekend_factor {
            config.demand.weekend_factor = f;
        }
        if let Some(day) = demand.fallback_day {
            config.demand.fallback_day = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                .map_err(|e| Error::Config(format!("Invalid fallback_day '{}': {}", day, e)))?;
        }
        if let Some(n) = demand.fallback_observed {
            config.demand.fallback_observed = n;
        }
        if let Some(n) = demand.fallback_predicted {
            config.demand.fallback_predicted = n;
        }
    }

    if let Some(restock) = raw.restock {
        if let Some(days) = restock.horizon_days {
            config.restock.horizon_days = days;
        }
        if let Some(buffer) = restock.safety_buffer {
            config.restock.safety_buffer = buffer;
        }
    }

    if let Some(recommend) = raw.recommend {
        if let Some(categories) = recommend.affinity_categories {
            config.recommend.affinity_categories = categories;
        }
        if let Some(boost) = recommend.event_boost {
            config.recommend.event_boost = boost;
        }
    }

    if let Some(metrics) = raw.metrics {
        if let Some(threshold) = metrics.low_stock_threshold {
            config.metrics.low_stock_threshold = threshold;
        }
        if let Some(n) = metrics.top_products {
            config.metrics.top_products = n;
        }
    }

    if let Some(status) = raw.stock_status {
        if let Some(n) = status.low_below {
            config.stock_status.low_below = n;
        }
        if let Some(n) = status.medium_below {
            config.stock_status.medium_below = n;
        }
    }

    Ok(config)
}
