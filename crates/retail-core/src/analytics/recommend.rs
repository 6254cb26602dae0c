//! Recommendation Filter
//!
//! Filters the catalog down to what a persona can afford and is likely to
//! care about, boosts demand for products an event is promoting, then hands
//! the result to a [`RankingStrategy`].
//!
//! A product is eligible when its price is inside the persona's budget and
//! either one of its tags matches a hobby or its category is one of the
//! always-recommended affinity categories.

use std::cmp::Ordering;

use tracing::debug;

use crate::config::RecommendPolicy;
use crate::error::{Error, Result};
use crate::models::{Event, Persona, Product};

use super::round_count;
use super::types::Recommendation;

/// Orders eligible recommendations before they are returned
pub trait RankingStrategy: Send + Sync {
    /// Name used on the command line and in logs
    fn name(&self) -> &'static str;

    fn rank(&self, recommendations: &mut [Recommendation]);
}

/// Highest `score + boost` first, then favorite brands; remaining ties keep catalog order
pub struct ScoreBoost;

impl RankingStrategy for ScoreBoost {
    fn name(&self) -> &'static str {
        "score-boost"
    }

    fn rank(&self, recommendations: &mut [Recommendation]) {
        recommendations.sort_by(|a, b| {
            b.rank_key()
                .partial_cmp(&a.rank_key())
                .unwrap_or(Ordering::Equal)
                .then(b.brand_match.cmp(&a.brand_match))
        });
    }
}

/// Leave the catalog order untouched
pub struct CatalogOrder;

impl RankingStrategy for CatalogOrder {
    fn name(&self) -> &'static str {
        "catalog-order"
    }

    fn rank(&self, _recommendations: &mut [Recommendation]) {}
}

/// Look up a ranking strategy by its command-line name
pub fn ranking_strategy(name: &str) -> Result<Box<dyn RankingStrategy>> {
    match name.trim().to_lowercase().as_str() {
        "score-boost" | "score_boost" => Ok(Box::new(ScoreBoost)),
        "catalog-order" | "catalog_order" | "none" => Ok(Box::new(CatalogOrder)),
        _ => Err(Error::InvalidInput(format!(
            "Unknown ranking strategy: {}. Available: score-boost, catalog-order",
            name
        ))),
    }
}

pub struct Recommender {
    policy: RecommendPolicy,
    strategy: Box<dyn RankingStrategy>,
}

impl Recommender {
    /// Default policy, ranked by score + boost
    pub fn new() -> Self {
        Self {
            policy: RecommendPolicy::default(),
            strategy: Box::new(ScoreBoost),
        }
    }

    pub fn with_policy(policy: RecommendPolicy) -> Self {
        Self {
            policy,
            strategy: Box::new(ScoreBoost),
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn RankingStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Recommend products for a persona
    ///
    /// An empty result means nothing matched; it is not an error. A budget
    /// that is not "min-max" is `InvalidInput`.
    pub fn recommend(
        &self,
        catalog: &[Product],
        persona: &Persona,
        events: &[Event],
    ) -> Result<Vec<Recommendation>> {
        let budget = persona.budget()?;

        let mut recommendations = Vec::new();
        for product in catalog {
            if !budget.contains(product.price) {
                continue;
            }

            let interest_match = persona.hobbies.iter().any(|h| product.has_tag(h));
            if !interest_match && !self.is_affinity_category(&product.category) {
                continue;
            }

            let mut recommendation = self.boosted(product, interest_match, events)?;
            recommendation.brand_match = persona.prefers_brand(&product.brand);
            recommendations.push(recommendation);
        }

        self.strategy.rank(&mut recommendations);

        debug!(
            catalog = catalog.len(),
            matched = recommendations.len(),
            strategy = self.strategy.name(),
            "Recommendations computed"
        );
        Ok(recommendations)
    }

    fn is_affinity_category(&self, category: &str) -> bool {
        let category = category.trim();
        self.policy
            .affinity_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }

    fn boosted(
        &self,
        product: &Product,
        interest_match: bool,
        events: &[Event],
    ) -> Result<Recommendation> {
        let mut product = product.clone();
        let promoted = events.iter().any(|e| e.affects(&product.name));

        let boost = if promoted {
            product.demand = round_count(
                f64::from(product.demand) * self.policy.event_boost,
                "boosted demand",
            )?;
            self.policy.event_boost
        } else {
            1.0
        };

        Ok(Recommendation {
            product,
            score: if interest_match { 1.0 } else { 0.0 },
            boost,
            brand_match: false,
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}
