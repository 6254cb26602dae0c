//! Domain models for RetailMind
//!
//! Record shapes mirror the documents kept by the storefront's store. Field
//! names serialize in camelCase and accept the store's `_id` keys.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Unit price in currency units
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Popularity as a 0-100 percentage
    #[serde(default)]
    pub demand: u32,
    /// Emoji or short glyph shown on product cards
    #[serde(default, alias = "image", alias = "emoji")]
    pub glyph: String,
}

impl Product {
    /// Case-insensitive tag lookup
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|t| t.trim().eq_ignore_ascii_case(tag))
    }
}

/// Weather condition recorded with a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Weather {
    Clear,
    Cloudy,
    Rainy,
    #[default]
    Other,
}

impl Weather {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for Weather {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "clear" | "sunny" => Self::Clear,
            "cloudy" | "overcast" => Self::Cloudy,
            "rainy" | "rain" => Self::Rainy,
            _ => Self::Other,
        })
    }
}

impl From<String> for Weather {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<Weather> for String {
    fn from(w: Weather) -> Self {
        w.as_str().to_string()
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One historical sales observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub product_id: String,
    pub quantity: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub weather: Weather,
    /// Name of the event running when the sale happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

/// Kind of store event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Promotion,
    Seasonal,
    FlashSale,
    #[serde(other)]
    Other,
}

/// A promotion or seasonal spike that scales demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub name: String,
    /// Percentage as entered by staff, e.g. "20" for +20%
    #[serde(default, deserialize_with = "string_or_number")]
    pub impact: String,
    /// Product-name substrings this event applies to
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
}

impl Event {
    /// Impact as a percentage number (`"20"` -> `20.0`)
    ///
    /// An empty impact counts as zero. A trailing `%` is accepted.
    pub fn impact_percent(&self) -> Result<f64> {
        let raw = self.impact.trim().trim_end_matches('%').trim();
        if raw.is_empty() {
            return Ok(0.0);
        }
        let value: f64 = raw.parse().map_err(|_| {
            Error::InvalidInput(format!(
                "event '{}' has non-numeric impact '{}'",
                self.name, self.impact
            ))
        })?;
        if !value.is_finite() {
            return Err(Error::InvalidInput(format!(
                "event '{}' has non-finite impact",
                self.name
            )));
        }
        Ok(value)
    }

    /// Whether any listed substring occurs in the product name (case-insensitive)
    pub fn affects(&self, product_name: &str) -> bool {
        let name = product_name.to_lowercase();
        self.products
            .iter()
            .map(|p| p.trim().to_lowercase())
            .any(|p| !p.is_empty() && name.contains(&p))
    }

    /// Whether a sale's event label refers to this event
    pub fn is_named(&self, label: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(label.trim())
    }
}

/// Shopper profile captured by the persona survey
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub working_hours: String,
    /// "min-max" in currency units
    pub budget_range: String,
    #[serde(default, deserialize_with = "string_list")]
    pub hobbies: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub favorite_brands: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub dietary_choices: Vec<String>,
}

impl Persona {
    pub fn budget(&self) -> Result<BudgetRange> {
        self.budget_range.parse()
    }

    /// Whether a brand is one of the persona's favorites (case-insensitive)
    pub fn prefers_brand(&self, brand: &str) -> bool {
        let brand = brand.trim();
        !brand.is_empty()
            && self
                .favorite_brands
                .iter()
                .any(|b| b.trim().eq_ignore_ascii_case(brand))
    }
}

/// Inclusive price range a shopper is willing to spend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl std::str::FromStr for BudgetRange {
    type Err = Error;

    /// Parses "min-max"; a bare number is an upper bound ("5000" == "0-5000")
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("budget range '{}' is not 'min-max'", s));
        let parse = |part: &str| -> Result<f64> {
            let value: f64 = part.trim().parse().map_err(|_| invalid())?;
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(invalid())
            }
        };

        let (min, max) = match s.split_once('-') {
            Some((min, max)) => (parse(min)?, parse(max)?),
            None => (0.0, parse(s)?),
        };

        if min > max {
            return Err(Error::InvalidInput(format!(
                "budget range '{}' has min above max",
                s
            )));
        }
        Ok(Self { min, max })
    }
}

/// A fulfilled checkout line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    #[serde(alias = "timestamp")]
    pub date: DateTime<Utc>,
}

/// Stock level band shown on product cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Low,
    Medium,
    Good,
}

impl StockStatus {
    /// Classify a stock level: below `low_below` is Low, below `medium_below` is Medium
    pub fn classify(stock: u32, low_below: u32, medium_below: u32) -> Self {
        if stock < low_below {
            Self::Low
        } else if stock < medium_below {
            Self::Medium
        } else {
            Self::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Good => "good",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which sales a computation runs over
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    All,
    Product(String),
}

impl ProductFilter {
    pub fn matches(&self, product_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Product(id) => id == product_id,
        }
    }

    pub fn product_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Product(id) => Some(id.as_str()),
        }
    }
}

impl From<Option<&str>> for ProductFilter {
    fn from(id: Option<&str>) -> Self {
        match id.map(str::trim) {
            None | Some("") => Self::All,
            Some(id) if id.eq_ignore_ascii_case("all") => Self::All,
            Some(id) => Self::Product(id.to_string()),
        }
    }
}

/// Split a comma-separated form value into trimmed, non-empty entries
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accept either a JSON list or a comma-separated string
fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(items) => items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Raw::Joined(s) => split_list(&s),
    })
}

/// Impact is entered as text in the admin form but some feeds send numbers
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
