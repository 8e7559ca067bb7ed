//! Plain data entities shared by both business contexts.
//!
//! Items are the sellable catalog entries (products in the store context,
//! rental packages in the fishing context - same shape, two domain names).
//! Transactions are immutable sale records holding value snapshots of the
//! items sold, so later catalog edits never rewrite history. All types
//! serialize to the JSON shapes the persistence adapter stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

fn default_duration() -> String {
    "-".to_string()
}

/// A sellable catalog entry with price and stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique within one context, assigned by the catalog
    pub id: i64,
    /// Display name; duplicates are permitted
    pub name: String,
    /// Price per unit in the smallest currency unit (rupiah)
    pub price: i64,
    /// Free-text classification; the fishing context persists this as `type`
    #[serde(alias = "type")]
    pub category: String,
    /// Free-text duration, `"-"` when not applicable (store items omit it)
    #[serde(default = "default_duration")]
    pub duration: String,
    /// Units currently available for sale; the only field sales mutate
    pub stock: i64,
}

/// Input shape for catalog insertion - an [`Item`] without the id.
#[derive(Debug, Clone)]
pub struct NewItem {
    /// Display name; must be non-empty
    pub name: String,
    /// Price per unit in the smallest currency unit
    pub price: i64,
    /// Free-text classification
    pub category: String,
    /// Free-text duration, `"-"` when not applicable
    pub duration: String,
    /// Initial stock count
    pub stock: i64,
}

impl NewItem {
    /// Convenience constructor for store-context items, which have no
    /// meaningful duration.
    pub fn product(name: impl Into<String>, price: i64, category: impl Into<String>, stock: i64) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
            duration: default_duration(),
            stock,
        }
    }
}

/// Partial overlay for catalog updates; unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    /// New display name, if changing
    pub name: Option<String>,
    /// New unit price, if changing
    pub price: Option<i64>,
    /// New classification, if changing
    pub category: Option<String>,
    /// New duration, if changing
    pub duration: Option<String>,
    /// New stock count, if changing
    pub stock: Option<i64>,
}

impl ItemPatch {
    /// Patch that only replaces the stock count.
    #[must_use]
    pub const fn stock(stock: i64) -> Self {
        Self {
            name: None,
            price: None,
            category: None,
            duration: None,
            stock: Some(stock),
        }
    }
}

/// One line of a sale: a value snapshot of the item at sale time.
///
/// Captured by value, not by reference - editing or deleting the catalog
/// item later does not alter transactions that sold it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    /// Catalog id of the item at sale time
    pub item_id: i64,
    /// Item name at sale time
    pub item_name: String,
    /// Units sold
    pub quantity: i64,
    /// Unit price at sale time
    pub price: i64,
}

impl SaleLine {
    /// Snapshot `quantity` units of `item`.
    #[must_use]
    pub fn snapshot(item: &Item, quantity: i64) -> Self {
        Self {
            item_id: item.id,
            item_name: item.name.clone(),
            quantity,
            price: item.price,
        }
    }

    /// Line subtotal (`quantity * price`).
    #[must_use]
    pub const fn subtotal(&self) -> i64 {
        self.quantity * self.price
    }
}

/// An immutable record of one completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Context prefix + creation millis + monotonic sequence, e.g.
    /// `TRX-1724567890123-0001`
    pub id: String,
    /// Creation timestamp, immutable thereafter
    pub date: DateTime<Utc>,
    /// Value snapshots of the items sold, in cart order
    pub items: Vec<SaleLine>,
    /// Sale total; always equals the sum of the line subtotals
    pub total: i64,
}

impl Transaction {
    /// Builds a transaction after verifying the declared total against the
    /// recomputed line sum. The invariant is checked here, at construction,
    /// and never re-derived later.
    pub fn new(
        id: String,
        date: DateTime<Utc>,
        items: Vec<SaleLine>,
        declared_total: i64,
    ) -> Result<Self> {
        let computed: i64 = items.iter().map(SaleLine::subtotal).sum();
        if computed != declared_total {
            return Err(Error::TotalMismatch {
                declared: declared_total,
                computed,
            });
        }
        Ok(Self {
            id,
            date,
            items,
            total: declared_total,
        })
    }
}

/// Formats an amount the way the counters display it, e.g. `Rp 15.000`.
#[must_use]
pub fn format_rupiah(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if negative {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_transaction_total_verified_at_construction() {
        let lines = vec![
            SaleLine {
                item_id: 1,
                item_name: "Kopi".to_string(),
                quantity: 2,
                price: 8000,
            },
            SaleLine {
                item_id: 3,
                item_name: "Nasi Putih".to_string(),
                quantity: 1,
                price: 5000,
            },
        ];

        let ok = Transaction::new("TRX-1-0001".to_string(), Utc::now(), lines.clone(), 21000);
        assert_eq!(ok.unwrap().total, 21000);

        let bad = Transaction::new("TRX-1-0002".to_string(), Utc::now(), lines, 20000);
        assert!(matches!(
            bad.unwrap_err(),
            Error::TotalMismatch {
                declared: 20000,
                computed: 21000
            }
        ));
    }

    #[test]
    fn test_item_accepts_type_alias_and_missing_duration() {
        // Store-context payloads have `category` and no `duration`
        let store: Item = serde_json::from_str(
            r#"{"id":7,"name":"Kopi","price":8000,"category":"Minuman","stock":70}"#,
        )
        .unwrap();
        assert_eq!(store.category, "Minuman");
        assert_eq!(store.duration, "-");

        // Fishing-context payloads historically used `type`
        let fishing: Item = serde_json::from_str(
            r#"{"id":3,"name":"Paket 3 Jam","price":25000,"type":"Jam","duration":"3 Jam","stock":40}"#,
        )
        .unwrap();
        assert_eq!(fishing.category, "Jam");
        assert_eq!(fishing.duration, "3 Jam");
    }

    #[test]
    fn test_sale_line_snapshot_is_independent_of_item() {
        let item = Item {
            id: 4,
            name: "Ayam Goreng".to_string(),
            price: 20000,
            category: "Makanan".to_string(),
            duration: "-".to_string(),
            stock: 30,
        };
        let line = SaleLine::snapshot(&item, 3);
        assert_eq!(line.item_id, 4);
        assert_eq!(line.item_name, "Ayam Goreng");
        assert_eq!(line.subtotal(), 60000);
    }

    #[test]
    fn test_sale_line_serializes_camel_case() {
        let line = SaleLine {
            item_id: 1,
            item_name: "Kopi".to_string(),
            quantity: 2,
            price: 8000,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"itemId\":1"));
        assert!(json.contains("\"itemName\":\"Kopi\""));
    }

    #[test]
    fn test_format_rupiah_grouping() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(800), "Rp 800");
        assert_eq!(format_rupiah(8000), "Rp 8.000");
        assert_eq!(format_rupiah(16000), "Rp 16.000");
        assert_eq!(format_rupiah(1234567), "Rp 1.234.567");
        assert_eq!(format_rupiah(-5000), "-Rp 5.000");
    }
}
