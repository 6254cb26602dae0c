//! Sales CSV import
//!
//! Format: `productId,quantity,date,weather,event`
//!
//! Columns are located by header name (case-insensitive), so their order does
//! not matter. `weather` and `event` may be missing or empty.

use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Sale, Weather};

struct Columns {
    product_id: usize,
    quantity: usize,
    date: usize,
    weather: Option<usize>,
    event: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            product_id: require("productId")?,
            quantity: require("quantity")?,
            date: require("date")?,
            weather: find("weather"),
            event: find("event"),
        })
    }
}

/// Parse sales rows from CSV
///
/// Errors name the 1-based line of the offending row (the header is line 1).
pub fn parse_sales_csv<R: Read>(reader: R) -> Result<Vec<Sale>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut sales = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 2;

        let field = |idx: usize| record.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(field).filter(|s| !s.is_empty());

        let product_id = field(columns.product_id);
        if product_id.is_empty() {
            return Err(Error::Import(format!("line {}: missing productId", line)));
        }

        let quantity = parse_quantity(field(columns.quantity))
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;
        let date = parse_date(field(columns.date))
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;

        let weather = optional(columns.weather)
            .map(|w| w.parse::<Weather>().unwrap_or_default())
            .unwrap_or_default();

        sales.push(Sale {
            product_id: product_id.to_string(),
            quantity,
            date,
            weather,
            event: optional(columns.event).map(str::to_string),
        });
    }

    debug!("Parsed {} sales rows", sales.len());
    Ok(sales)
}

fn parse_quantity(s: &str) -> std::result::Result<u32, String> {
    match s.parse::<u32>() {
        Ok(0) => Err("quantity must be positive".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid quantity '{}'", s)),
    }
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("invalid date '{}'", s))
}
