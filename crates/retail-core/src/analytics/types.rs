//! Result records produced by the analyzers
//!
//! These are derived values only; nothing here is written back to the store.
//! Field names serialize in camelCase to match what the admin dashboard reads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Product;

/// One point of the demand chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub day: NaiveDate,
    pub observed_demand: u32,
    pub predicted_demand: u32,
}

/// One bar of the price/revenue chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub price: f64,
    pub revenue: i64,
    pub demand: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOptimization {
    pub price_data: Vec<PricePoint>,
    /// Vertex of the revenue parabola; does not depend on the base price
    pub optimal_price: f64,
}

/// A product projected to run short; only emitted when a reorder is needed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockSuggestion {
    pub product_id: String,
    pub product_name: String,
    pub current_stock: u32,
    pub predicted_demand: u32,
    pub recommended_restock_qty: u32,
}

/// A catalog product that passed the persona filter
///
/// `product.demand` already includes any event boost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub product: Product,
    /// 1 when a product tag matches a persona hobby, else 0
    pub score: f64,
    /// Event multiplier applied to demand (1.0 when no event applies)
    pub boost: f64,
    /// Product brand is one of the persona's favorites
    #[serde(rename = "brandMatch", default)]
    pub brand_match: bool,
}

impl Recommendation {
    pub fn rank_key(&self) -> f64 {
        self.score + self.boost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: String,
    pub name: String,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: String,
    pub name: String,
    pub total_quantity: u64,
}

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_sales: u64,
    pub low_stock: Vec<LowStockItem>,
    pub top_products: Vec<TopProduct>,
    pub total_orders: usize,
}
