//! Shared test utilities for `Kasir`.
//!
//! This module provides common helper functions for setting up in-memory
//! contexts and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    config::ContextProfile,
    core::PosContext,
    models::{Item, SaleLine},
    storage::MemoryStorage,
};

/// Installs a subscriber writing traced events to the test's captured
/// output. Only the first caller installs; later calls are no-ops, so any
/// test that wants trace output can call this.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates a test item with sensible defaults.
///
/// # Defaults
/// * `name`: `"Item {id}"`
/// * `category`: `"Makanan"`
/// * `duration`: `"-"`
pub fn sample_item(id: i64, price: i64, stock: i64) -> Item {
    Item {
        id,
        name: format!("Item {id}"),
        price,
        category: "Makanan".to_string(),
        duration: "-".to_string(),
        stock,
    }
}

/// Creates a test sale line snapshot with a generated item name.
pub fn sample_line(item_id: i64, price: i64, quantity: i64) -> SaleLine {
    SaleLine {
        item_id,
        item_name: format!("Item {item_id}"),
        quantity,
        price,
    }
}

/// Opens the store context on fresh in-memory storage, so the live catalog
/// is the warung seed list.
pub fn warung_context() -> PosContext {
    PosContext::open(ContextProfile::warung(), Box::new(MemoryStorage::new())).unwrap()
}

/// Opens the store context over a pre-persisted catalog, so tests control
/// exactly which items exist.
pub fn context_with_items(items: Vec<Item>) -> PosContext {
    let payload = serde_json::to_string(&items).unwrap();
    let storage = MemoryStorage::new().with_entry("warung_products", payload);
    PosContext::open(ContextProfile::warung(), Box::new(storage)).unwrap()
}
