//! Dashboard - one admin report for a product selection
//!
//! Metrics and restock suggestions always cover the whole catalog. The demand
//! series is limited to the selected product's sales, and the price curve is
//! built around its price (or the configured default when nothing is selected).

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::models::ProductFilter;
use crate::snapshot::Snapshot;

use super::types::{DashboardMetrics, ForecastPoint, PricePoint, RestockSuggestion};
use super::{DemandEstimator, MetricsAggregator, PriceOptimizer, RestockAdvisor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// Selected product id, None for the whole catalog
    pub selection: Option<String>,
    pub base_price: f64,
    pub metrics: DashboardMetrics,
    pub demand_data: Vec<ForecastPoint>,
    pub price_data: Vec<PricePoint>,
    pub optimal_price: f64,
    pub restock_suggestions: Vec<RestockSuggestion>,
}

pub struct Dashboard<'a> {
    config: &'a AnalyticsConfig,
}

impl<'a> Dashboard<'a> {
    pub fn new(config: &'a AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Run every analyzer against one snapshot
    ///
    /// Any analyzer error fails the whole report.
    pub fn build(&self, snapshot: &Snapshot, filter: &ProductFilter) -> Result<DashboardReport> {
        let selected = snapshot.selected_product(filter)?;
        let base_price = selected
            .map(|p| p.price)
            .unwrap_or(self.config.pricing.default_base_price);

        let metrics = MetricsAggregator::with_policy(self.config.metrics.clone()).aggregate(
            &snapshot.products,
            &snapshot.sales,
            &snapshot.orders,
        );

        let demand_data = DemandEstimator::with_factors(self.config.demand.clone())
            .estimate(&snapshot.sales_for(filter), &snapshot.events)?;

        let pricing = PriceOptimizer::with_model(self.config.pricing.clone()).optimize(base_price)?;

        let restock_suggestions = RestockAdvisor::with_policy(self.config.restock.clone())
            .suggest_all(&snapshot.products, &snapshot.sales, &snapshot.events)?;

        info!(
            selection = filter.product_id().unwrap_or("all"),
            demand_points = demand_data.len(),
            restock = restock_suggestions.len(),
            "Dashboard report built"
        );

        Ok(DashboardReport {
            selection: filter.product_id().map(str::to_string),
            base_price,
            metrics,
            demand_data,
            price_data: pricing.price_data,
            optimal_price: pricing.optimal_price,
            restock_suggestions,
        })
    }
}
