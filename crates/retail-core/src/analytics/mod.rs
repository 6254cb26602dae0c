//! Analytics - demand, pricing, restock, recommendation and metrics
//!
//! Every analyzer is a plain struct configured from [`AnalyticsConfig`]
//! sections and run synchronously over records the caller already fetched.
//! None of them keep state between calls, so the same inputs always produce
//! the same output.
//!
//! ## Analyzers
//!
//! - **Demand Estimator** - Adjusts each observed sale by event, weather and weekday
//! - **Price Optimizer** - Revenue curve from a linear demand model
//! - **Restock Advisor** - Reorder quantities over a fixed horizon
//! - **Recommender** - Persona-filtered catalog with a pluggable ranking
//! - **Metrics Aggregator** - Totals, low stock and best sellers
//! - **Dashboard** - Runs all of the above for one product selection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use retail_core::analytics::Dashboard;
//!
//! let config = AnalyticsConfig::load(None)?;
//! let report = Dashboard::new(&config).build(&snapshot, &ProductFilter::All)?;
//! ```
//!
//! [`AnalyticsConfig`]: crate::config::AnalyticsConfig

pub mod dashboard;
pub mod demand;
pub mod metrics;
pub mod pricing;
pub mod recommend;
pub mod restock;
pub mod types;

pub use dashboard::{Dashboard, DashboardReport};
pub use demand::{mean_quantity, DemandEstimator};
pub use metrics::MetricsAggregator;
pub use pricing::PriceOptimizer;
pub use recommend::{ranking_strategy, CatalogOrder, RankingStrategy, Recommender, ScoreBoost};
pub use restock::RestockAdvisor;
pub use types::{
    DashboardMetrics, ForecastPoint, LowStockItem, PriceOptimization, PricePoint, Recommendation,
    RestockSuggestion, TopProduct,
};

use crate::error::{Error, Result};

/// Round with halves going up (2.5 -> 3, -2.5 -> -2)
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round a derived quantity and clamp it at zero
pub(crate) fn round_count(value: f64, what: &str) -> Result<u32> {
    if !value.is_finite() {
        return Err(Error::Computation(format!("{} is not finite", what)));
    }
    let rounded = round_half_up(value).max(0.0);
    if rounded > u32::MAX as f64 {
        return Err(Error::Computation(format!("{} overflows: {}", what, rounded)));
    }
    Ok(rounded as u32)
}
