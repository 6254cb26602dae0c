//! Price Optimizer
//!
//! Uses the linear demand model `demand(p) = a - b*p`, so revenue
//! `a*p - b*p^2` peaks at `p = a / 2b`. With the default model that is 500
//! for every product: the optimum ignores the base price entirely.
//!
//! The chart points report demand as `100 - p/10`, a second formula that only
//! agrees with the model for the default coefficients. Both are kept so the
//! dashboard numbers stay what staff are used to.

use tracing::debug;

use crate::config::PriceModel;
use crate::error::{Error, Result};

use super::round_half_up;
use super::types::{PriceOptimization, PricePoint};

pub struct PriceOptimizer {
    model: PriceModel,
}

impl PriceOptimizer {
    pub fn new() -> Self {
        Self {
            model: PriceModel::default(),
        }
    }

    pub fn with_model(model: PriceModel) -> Self {
        Self { model }
    }

    /// Revenue curve around `base_price` plus the revenue-maximizing price
    pub fn optimize(&self, base_price: f64) -> Result<PriceOptimization> {
        if !base_price.is_finite() || base_price < 0.0 {
            return Err(Error::InvalidInput(format!(
                "base price must be a non-negative number, got {}",
                base_price
            )));
        }

        let optimal_price = self.optimal_price()?;

        let price_data = self
            .model
            .price_factors
            .iter()
            .map(|factor| self.point_at(base_price * factor))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            base_price,
            optimal_price,
            points = price_data.len(),
            "Price optimization complete"
        );

        Ok(PriceOptimization {
            price_data,
            optimal_price,
        })
    }

    /// Vertex of the revenue parabola, `round(a / 2b)`
    pub fn optimal_price(&self) -> Result<f64> {
        let b = self.model.demand_slope;
        if !b.is_finite() || b <= 0.0 {
            return Err(Error::Computation(format!(
                "demand slope must be positive for a revenue maximum, got {}",
                b
            )));
        }
        let price = round_half_up(self.model.demand_intercept / (2.0 * b));
        if !price.is_finite() {
            return Err(Error::Computation("optimal price is not finite".into()));
        }
        Ok(price)
    }

    /// `a*p - b*p^2`, unrounded
    pub fn revenue_at(&self, price: f64) -> f64 {
        self.model.demand_intercept * price - self.model.demand_slope * price * price
    }

    /// Revenue and demand come from the exact sampled price; only the
    /// reported price is kept on whole cents
    fn point_at(&self, price: f64) -> Result<PricePoint> {
        let revenue = round_half_up(self.revenue_at(price));
        let demand = round_half_up(100.0 - price / 10.0);
        if !revenue.is_finite() || !demand.is_finite() {
            return Err(Error::Computation(format!(
                "price point at {} is not finite",
                price
            )));
        }
        Ok(PricePoint {
            price: round_cents(price),
            revenue: revenue as i64,
            demand: demand as i64,
        })
    }
}

impl Default for PriceOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep sampled prices on whole cents (0.9 * 300 is not exactly 270 in f64)
fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
