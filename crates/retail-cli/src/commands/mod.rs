//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `checkout` - Cart checkout against the snapshot catalog
//! - `config` - Show the resolved analytics configuration
//! - `core` - Shared utilities (snapshot/config loading, JSON output)
//! - `import` - Sales CSV import
//! - `recommend` - Persona recommendations
//! - `reports` - Metrics, products, forecast, price, restock, dashboard

pub mod checkout;
pub mod config;
pub mod core;
pub mod import;
pub mod recommend;
pub mod reports;

// Re-export command functions for main.rs
pub use checkout::*;
pub use config::*;
pub use core::*;
pub use import::*;
pub use recommend::*;
pub use reports::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
