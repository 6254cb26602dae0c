//! Metrics Aggregator - headline numbers for the admin dashboard

use std::collections::HashMap;

use tracing::debug;

use crate::config::MetricsPolicy;
use crate::models::{Order, Product, Sale};

use super::types::{DashboardMetrics, LowStockItem, TopProduct};

pub struct MetricsAggregator {
    policy: MetricsPolicy,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self {
            policy: MetricsPolicy::default(),
        }
    }

    pub fn with_policy(policy: MetricsPolicy) -> Self {
        Self { policy }
    }

    pub fn aggregate(
        &self,
        products: &[Product],
        sales: &[Sale],
        orders: &[Order],
    ) -> DashboardMetrics {
        let total_sales = sales.iter().map(|s| u64::from(s.quantity)).sum();

        let low_stock = products
            .iter()
            .filter(|p| p.stock < self.policy.low_stock_threshold)
            .map(|p| LowStockItem {
                id: p.id.clone(),
                name: p.name.clone(),
                stock: p.stock,
            })
            .collect();

        let metrics = DashboardMetrics {
            total_sales,
            low_stock,
            top_products: self.top_products(products, sales),
            total_orders: orders.len(),
        };

        debug!(
            total_sales = metrics.total_sales,
            low_stock = metrics.low_stock.len(),
            total_orders = metrics.total_orders,
            "Metrics aggregated"
        );
        metrics
    }

    /// Best sellers by summed quantity; equal totals keep first-sale order
    fn top_products(&self, products: &[Product], sales: &[Sale]) -> Vec<TopProduct> {
        // Totals are kept in a Vec so ordering never depends on hashing
        let mut totals: Vec<(&str, u64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for sale in sales {
            match index.get(sale.product_id.as_str()) {
                Some(&i) => totals[i].1 += u64::from(sale.quantity),
                None => {
                    index.insert(sale.product_id.as_str(), totals.len());
                    totals.push((sale.product_id.as_str(), u64::from(sale.quantity)));
                }
            }
        }

        // Stable sort keeps first-seen order for ties
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals.truncate(self.policy.top_products);

        totals
            .into_iter()
            .map(|(product_id, total_quantity)| TopProduct {
                product_id: product_id.to_string(),
                name: products
                    .iter()
                    .find(|p| p.id == product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| product_id.to_string()),
                total_quantity,
            })
            .collect()
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}
