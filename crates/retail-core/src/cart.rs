//! Shopping cart and checkout
//!
//! The cart is owned by the client session and handed to [`Cart::checkout`]
//! by value. Checkout is all-or-nothing: every line is validated against the
//! catalog before any stock is touched.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Order, Product};

/// One cart line, priced when it was added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit, merging with an existing line for the same product
    pub fn add(&mut self, product: &Product) {
        self.add_quantity(product, 1);
    }

    pub fn add_quantity(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                quantity,
            }),
        }
    }

    /// Change a line's quantity by `delta`, never going below 1
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> Result<()> {
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| Error::NotFound(format!("cart line {}", index)))?;

        let updated = i64::from(item.quantity)
            .saturating_add(delta)
            .clamp(1, i64::from(u32::MAX));
        item.quantity = updated as u32;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<CartItem> {
        if index >= self.items.len() {
            return Err(Error::NotFound(format!("cart line {}", index)));
        }
        Ok(self.items.remove(index))
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Turn the cart into orders, decrementing catalog stock
    ///
    /// Fails without changing `catalog` when the cart is empty, a product is
    /// unknown or a product does not have enough stock.
    pub fn checkout(self, catalog: &mut [Product], now: DateTime<Utc>) -> Result<Vec<Order>> {
        if self.items.is_empty() {
            return Err(Error::InvalidInput("cart is empty".into()));
        }

        let mut requested: HashMap<&str, u32> = HashMap::new();
        for item in &self.items {
            let total = requested.entry(item.product_id.as_str()).or_insert(0);
            *total = total.saturating_add(item.quantity);
        }

        for item in &self.items {
            let product = catalog
                .iter()
                .find(|p| p.id == item.product_id)
                .ok_or_else(|| Error::NotFound(format!("product '{}'", item.product_id)))?;

            let wanted = requested
                .get(item.product_id.as_str())
                .copied()
                .unwrap_or(item.quantity);
            if product.stock < wanted {
                return Err(Error::InsufficientStock {
                    product: product.name.clone(),
                    requested: wanted,
                    available: product.stock,
                });
            }
        }

        let stamp = now.timestamp_millis();
        let mut orders = Vec::with_capacity(self.items.len());
        for (idx, item) in self.items.into_iter().enumerate() {
            if let Some(product) = catalog.iter_mut().find(|p| p.id == item.product_id) {
                product.stock -= item.quantity;
            }
            orders.push(Order {
                id: format!("order-{}-{}", stamp, idx),
                product_id: item.product_id,
                quantity: item.quantity,
                date: now,
            });
        }

        info!(orders = orders.len(), "Checkout complete");
        Ok(orders)
    }
}
