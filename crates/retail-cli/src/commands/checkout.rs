//! Checkout command

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use retail_core::Cart;

use super::{load_snapshot, print_json, save_snapshot, truncate};

/// Parse a `PRODUCT_ID[:QTY]` cart line
pub fn parse_item(item: &str) -> Result<(String, u32)> {
    let (id, qty) = match item.rsplit_once(':') {
        Some((id, qty)) => {
            let qty: u32 = qty
                .trim()
                .parse()
                .with_context(|| format!("Invalid quantity in '{}'", item))?;
            (id.trim(), qty)
        }
        None => (item.trim(), 1),
    };

    if id.is_empty() {
        bail!("Missing product id in '{}'", item);
    }
    if qty == 0 {
        bail!("Quantity must be at least 1 in '{}'", item);
    }
    Ok((id.to_string(), qty))
}

pub fn cmd_checkout(data_path: &Path, items: &[String], json: bool) -> Result<()> {
    let mut snapshot = load_snapshot(data_path)?;

    let mut cart = Cart::new();
    for item in items {
        let (id, qty) = parse_item(item)?;
        let product = snapshot
            .product(&id)
            .ok_or_else(|| anyhow::anyhow!("Product not found: {}", id))?;
        cart.add_quantity(product, qty);
    }

    let total = cart.total();
    let lines = cart.items().to_vec();

    let orders = cart.checkout(&mut snapshot.products, Utc::now())?;
    snapshot.orders.extend(orders.iter().cloned());
    save_snapshot(data_path, &snapshot)?;

    if json {
        return print_json(&orders);
    }

    println!();
    println!("🛒 Checkout");
    println!("   ─────────────────────────────");
    for line in &lines {
        println!(
            "   {:<28} x{:<4} {:>10.2}",
            truncate(&line.name, 28),
            line.quantity,
            line.subtotal()
        );
    }
    println!("   ─────────────────────────────");
    println!("   Total: {:.2}", total);
    println!();
    println!("✅ {} orders placed", orders.len());

    Ok(())
}
