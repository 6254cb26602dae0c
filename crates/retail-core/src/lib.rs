//! RetailMind Core Library
//!
//! Analytics and recommendation logic for the RetailMind storefront:
//! - Domain records (products, sales, events, personas, orders)
//! - Demand estimation, price optimization and restock advice
//! - Persona-based recommendations with pluggable ranking
//! - Dashboard metrics
//! - Snapshot loading and sales CSV import
//! - Cart checkout

pub mod analytics;
pub mod cart;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod snapshot;

pub use analytics::{
    ranking_strategy, Dashboard, DashboardMetrics, DashboardReport, DemandEstimator,
    ForecastPoint, MetricsAggregator, PriceOptimization, PriceOptimizer, PricePoint,
    RankingStrategy, Recommendation, Recommender, RestockAdvisor, RestockSuggestion,
};
pub use cart::{Cart, CartItem};
pub use config::AnalyticsConfig;
pub use error::{Error, Result};
pub use import::parse_sales_csv;
pub use models::{
    BudgetRange, Event, EventKind, Order, Persona, Product, ProductFilter, Sale, StockStatus,
    Weather,
};
pub use snapshot::Snapshot;
