//! Demand Estimator
//!
//! Turns each historical sale into a forecast point by applying, in order:
//! - the event factor (1 + impact/100) when the sale ran during a known event
//! - the weather factor (rainy and cloudy days sell more)
//! - the weekend factor
//!
//! There is no smoothing or extrapolation; the output has exactly one point
//! per input sale, in input order.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::config::DemandFactors;
use crate::error::Result;
use crate::models::{Event, Sale, Weather};

use super::round_count;
use super::types::ForecastPoint;

/// Mean quantity per sale, 0.0 when there are no sales
pub fn mean_quantity(sales: &[Sale]) -> f64 {
    if sales.is_empty() {
        return 0.0;
    }
    let total: u64 = sales.iter().map(|s| u64::from(s.quantity)).sum();
    total as f64 / sales.len() as f64
}

pub struct DemandEstimator {
    factors: DemandFactors,
}

impl DemandEstimator {
    pub fn new() -> Self {
        Self {
            factors: DemandFactors::default(),
        }
    }

    pub fn with_factors(factors: DemandFactors) -> Self {
        Self { factors }
    }

    /// Build the demand series for already-filtered sales
    ///
    /// An empty history yields a single placeholder point so charts always
    /// have something to draw.
    pub fn estimate(&self, sales: &[Sale], events: &[Event]) -> Result<Vec<ForecastPoint>> {
        if sales.is_empty() {
            debug!("No sales history, using fallback forecast point");
            return Ok(vec![self.fallback_point()]);
        }

        let points = sales
            .iter()
            .map(|sale| self.point_for(sale, events))
            .collect::<Result<Vec<_>>>()?;

        debug!(points = points.len(), "Demand estimate complete");
        Ok(points)
    }

    fn point_for(&self, sale: &Sale, events: &[Event]) -> Result<ForecastPoint> {
        let observed = f64::from(sale.quantity);
        let adjusted = observed
            * Self::event_factor(sale, events)?
            * self.weather_factor(sale.weather)
            * self.weekday_factor(sale.date);

        Ok(ForecastPoint {
            day: sale.date,
            observed_demand: sale.quantity,
            predicted_demand: round_count(adjusted, "predicted demand")?,
        })
    }

    fn fallback_point(&self) -> ForecastPoint {
        ForecastPoint {
            day: self.factors.fallback_day,
            observed_demand: self.factors.fallback_observed,
            predicted_demand: self.factors.fallback_predicted,
        }
    }

    fn event_factor(sale: &Sale, events: &[Event]) -> Result<f64> {
        let event = sale
            .event
            .as_deref()
            .and_then(|label| events.iter().find(|e| e.is_named(label)));

        match event {
            Some(event) => Ok(1.0 + event.impact_percent()? / 100.0),
            None => Ok(1.0),
        }
    }

    fn weather_factor(&self, weather: Weather) -> f64 {
        match weather {
            Weather::Rainy => self.factors.rainy_factor,
            Weather::Cloudy => self.factors.cloudy_factor,
            Weather::Clear | Weather::Other => 1.0,
        }
    }

    fn weekday_factor(&self, date: NaiveDate) -> f64 {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => self.factors.weekend_factor,
            _ => 1.0,
        }
    }
}

impl Default for DemandEstimator {
    fn default() -> Self {
        Self::new()
    }
}
