//! Context profile configuration.
//!
//! A profile describes one business context: its storage keys, its
//! transaction id prefix, and the seed catalog used when no persisted
//! catalog exists yet. The two original contexts ship as built-ins;
//! additional contexts can be loaded from a TOML file.

use serde::Deserialize;
use std::path::Path;

use crate::errors::{Error, Result};
use crate::models::Item;

/// Configuration for one business context.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextProfile {
    /// Context name, e.g. `warung`
    pub name: String,
    /// Storage key holding the serialized catalog
    pub catalog_key: String,
    /// Storage key holding the serialized transaction log
    pub transactions_key: String,
    /// Prefix for generated transaction ids, e.g. `TRX`
    pub id_prefix: String,
    /// Catalog used when the catalog key is absent at initialization
    #[serde(default)]
    pub seed: Vec<Item>,
}

impl ContextProfile {
    /// The general-store context, with its original seed catalog.
    #[must_use]
    pub fn warung() -> Self {
        Self {
            name: "warung".to_string(),
            catalog_key: "warung_products".to_string(),
            transactions_key: "warung_transactions".to_string(),
            id_prefix: "TRX".to_string(),
            seed: seed_items(&[
                (1, "Nasi Goreng", 15000, "Makanan", "-", 50),
                (2, "Mie Goreng", 12000, "Makanan", "-", 45),
                (3, "Nasi Putih", 5000, "Makanan", "-", 100),
                (4, "Ayam Goreng", 20000, "Makanan", "-", 30),
                (5, "Teh Manis", 5000, "Minuman", "-", 80),
                (6, "Es Jeruk", 7000, "Minuman", "-", 60),
                (7, "Kopi", 8000, "Minuman", "-", 70),
                (8, "Air Mineral", 3000, "Minuman", "-", 120),
                (9, "Kerupuk", 2000, "Snack", "-", 90),
                (10, "Gorengan", 1000, "Snack", "-", 100),
            ]),
        }
    }

    /// The fishing-pond rental context, with its original seed catalog.
    #[must_use]
    pub fn pemancingan() -> Self {
        Self {
            name: "pemancingan".to_string(),
            catalog_key: "pemancingan_packages".to_string(),
            transactions_key: "pemancingan_transactions".to_string(),
            id_prefix: "PMC".to_string(),
            seed: seed_items(&[
                (1, "Paket Harian Biasa", 30000, "Harian", "1 Hari", 50),
                (2, "Paket Harian VIP", 50000, "Harian", "1 Hari", 30),
                (3, "Paket 3 Jam", 25000, "Jam", "3 Jam", 40),
                (4, "Paket 5 Jam", 40000, "Jam", "5 Jam", 40),
                (5, "Paket Malam", 35000, "Spesial", "Malam", 25),
                (6, "Umpan Standar", 5000, "Umpan", "-", 100),
                (7, "Umpan Premium", 10000, "Umpan", "-", 80),
                (8, "Kail Kecil", 15000, "Alat", "-", 60),
                (9, "Kail Besar", 25000, "Alat", "-", 40),
                (10, "Sewa Jaring", 20000, "Alat", "-", 30),
            ]),
        }
    }
}

fn seed_items(rows: &[(i64, &str, i64, &str, &str, i64)]) -> Vec<Item> {
    rows.iter()
        .map(|&(id, name, price, category, duration, stock)| Item {
            id,
            name: name.to_string(),
            price,
            category: category.to_string(),
            duration: duration.to_string(),
            stock,
        })
        .collect()
}

/// Loads a context profile from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<ContextProfile> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read profile file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse profile TOML: {e}"),
    })
}
