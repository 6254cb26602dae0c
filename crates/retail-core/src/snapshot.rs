//! In-memory snapshot of the store's collections
//!
//! The analytics layer never talks to the document store directly. Callers
//! fetch one consistent snapshot (here: a JSON dump of every collection) and
//! run all computations against it.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Event, Order, Persona, Product, ProductFilter, Sale};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub events: Vec<Event>,
    pub orders: Vec<Order>,
    pub personas: Vec<Persona>,
}

impl Snapshot {
    /// Read a snapshot document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            products = snapshot.products.len(),
            sales = snapshot.sales.len(),
            events = snapshot.events.len(),
            orders = snapshot.orders.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Like `load`, but a missing file is an empty snapshot
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "Snapshot not found, starting empty");
            Ok(Self::default())
        }
    }

    /// Write the snapshot atomically (temp file in the same directory, then rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;

        debug!(path = %path.display(), "Saved snapshot");
        Ok(())
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Resolve a filter to a product, failing when the id is unknown
    pub fn selected_product(&self, filter: &ProductFilter) -> Result<Option<&Product>> {
        match filter.product_id() {
            None => Ok(None),
            Some(id) => self
                .product(id)
                .map(Some)
                .ok_or_else(|| Error::NotFound(format!("product '{}'", id))),
        }
    }

    /// Sales matching a filter, in recorded order
    pub fn sales_for(&self, filter: &ProductFilter) -> Vec<Sale> {
        self.sales
            .iter()
            .filter(|s| filter.matches(&s.product_id))
            .cloned()
            .collect()
    }
}
