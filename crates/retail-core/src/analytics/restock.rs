//! Restock Advisor
//!
//! Projects demand over a fixed horizon from the product's mean sale size,
//! scaled up by any event that targets the product, and recommends enough
//! units to cover the shortfall plus a safety buffer.

use tracing::{debug, info};

use crate::config::RestockPolicy;
use crate::error::{Error, Result};
use crate::models::{Event, Product, Sale};

use super::demand::mean_quantity;
use super::round_count;
use super::types::RestockSuggestion;

pub struct RestockAdvisor {
    policy: RestockPolicy,
}

impl RestockAdvisor {
    pub fn new() -> Self {
        Self {
            policy: RestockPolicy::default(),
        }
    }

    pub fn with_policy(policy: RestockPolicy) -> Self {
        Self { policy }
    }

    /// Suggest a reorder for one product
    ///
    /// `sales` may contain other products' sales; only this product's are
    /// used. Returns `None` when no reorder is needed.
    pub fn suggest(
        &self,
        product: &Product,
        sales: &[Sale],
        event: Option<&Event>,
    ) -> Result<Option<RestockSuggestion>> {
        let own_sales: Vec<Sale> = sales
            .iter()
            .filter(|s| s.product_id == product.id)
            .cloned()
            .collect();
        let avg_daily_demand = mean_quantity(&own_sales);

        let event_impact = match event {
            Some(e) if e.affects(&product.name) => e.impact_percent()? / 100.0,
            _ => 0.0,
        };

        let predicted_demand = round_count(
            avg_daily_demand * f64::from(self.policy.horizon_days) * (1.0 + event_impact),
            "predicted demand",
        )?;

        let restock_qty = if product.stock < predicted_demand {
            (predicted_demand - product.stock)
                .checked_add(self.policy.safety_buffer)
                .ok_or_else(|| {
                    Error::Computation(format!(
                        "restock quantity for '{}' overflows",
                        product.name
                    ))
                })?
        } else {
            0
        };

        if restock_qty == 0 {
            return Ok(None);
        }

        debug!(
            product = %product.name,
            stock = product.stock,
            predicted_demand,
            restock_qty,
            "Restock needed"
        );

        Ok(Some(RestockSuggestion {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            current_stock: product.stock,
            predicted_demand,
            recommended_restock_qty: restock_qty,
        }))
    }

    /// Suggestions for a whole catalog, zero-quantity entries omitted
    ///
    /// Each product is paired with the first event whose product list names it.
    pub fn suggest_all(
        &self,
        products: &[Product],
        sales: &[Sale],
        events: &[Event],
    ) -> Result<Vec<RestockSuggestion>> {
        let mut suggestions = Vec::new();

        for product in products {
            let event = events.iter().find(|e| e.affects(&product.name));
            if let Some(suggestion) = self.suggest(product, sales, event)? {
                suggestions.push(suggestion);
            }
        }

        info!(
            products = products.len(),
            suggestions = suggestions.len(),
            "Restock analysis complete"
        );
        Ok(suggestions)
    }
}

impl Default for RestockAdvisor {
    fn default() -> Self {
        Self::new()
    }
}
