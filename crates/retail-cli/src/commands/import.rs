//! Sales import command

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use retail_core::import::parse_sales_csv;

use super::{load_snapshot, save_snapshot};

pub fn cmd_import_sales(data_path: &Path, file: &Path) -> Result<()> {
    println!("📥 Importing sales from {}...", file.display());

    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let sales = parse_sales_csv(csv_file)
        .with_context(|| format!("Failed to parse sales CSV: {}", file.display()))?;

    println!("   Found {} sales", sales.len());

    let mut snapshot = load_snapshot(data_path)?;

    let known: HashSet<&str> = snapshot.products.iter().map(|p| p.id.as_str()).collect();
    let unknown = sales
        .iter()
        .filter(|s| !known.contains(s.product_id.as_str()))
        .count();

    snapshot.sales.extend(sales);
    save_snapshot(data_path, &snapshot)?;

    println!("   Total sales on record: {}", snapshot.sales.len());
    if unknown > 0 {
        println!(
            "   ⚠️  {} rows reference products not in the catalog",
            unknown
        );
    }
    println!("✅ Import complete!");

    Ok(())
}
