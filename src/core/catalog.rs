//! Catalog store - owns the authoritative item list for one business context.
//!
//! This module provides the in-memory catalog operations: listing, insertion
//! with id assignment, partial updates, removal, and raw stock arithmetic.
//! Input validation follows the same rules for insertion and update: names
//! must be non-empty, prices and stock counts non-negative. The catalog knows
//! nothing about persistence; the context service mirrors it to storage after
//! every mutation.

use crate::{
    errors::{Error, Result},
    models::{Item, ItemPatch, NewItem},
};

/// The ordered item list for one context. Insertion order is preserved.
#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Wraps an already-loaded item list.
    #[must_use]
    pub const fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Current items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items matching a classification, for the category filter rows on the
    /// cashier screens.
    #[must_use]
    pub fn items_in_category(&self, category: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Adds an item, assigning the next id: `max(existing ids) + 1`, or `1`
    /// for an empty catalog. Duplicate names are permitted.
    ///
    /// # Errors
    /// Returns an error if the name is empty or whitespace-only, or if the
    /// price or stock is negative.
    pub fn add(&mut self, new_item: NewItem) -> Result<&Item> {
        validate_fields(&new_item.name, new_item.price, new_item.stock)?;

        let id = self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        self.items.push(Item {
            id,
            name: new_item.name.trim().to_string(),
            price: new_item.price,
            category: new_item.category,
            duration: new_item.duration,
            stock: new_item.stock,
        });
        // Just pushed, so last() is always present
        Ok(&self.items[self.items.len() - 1])
    }

    /// Merges the set fields of `patch` into the item matching `id` and
    /// returns the updated item.
    ///
    /// # Errors
    /// Returns [`Error::ItemNotFound`] if no item matches, so callers can
    /// tell success from a missing target, and validation errors under the
    /// same rules as [`Catalog::add`].
    pub fn update(&mut self, id: i64, patch: ItemPatch) -> Result<Item> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(Error::Config {
                    message: "Item name cannot be empty".to_string(),
                });
            }
        }
        if let Some(price) = patch.price {
            if price < 0 {
                return Err(Error::InvalidAmount { amount: price });
            }
        }
        if let Some(stock) = patch.stock {
            if stock < 0 {
                return Err(Error::InvalidAmount { amount: stock });
            }
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(Error::ItemNotFound { id })?;

        if let Some(name) = patch.name {
            item.name = name.trim().to_string();
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(duration) = patch.duration {
            item.duration = duration;
        }
        if let Some(stock) = patch.stock {
            item.stock = stock;
        }

        Ok(item.clone())
    }

    /// Removes and returns the item matching `id`. Historical transactions
    /// hold value snapshots, so removal never touches them.
    ///
    /// # Errors
    /// Returns [`Error::ItemNotFound`] if no item matches.
    pub fn remove(&mut self, id: i64) -> Result<Item> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(Error::ItemNotFound { id })?;
        Ok(self.items.remove(index))
    }

    /// Adds `delta` (signed) to the matching item's stock and returns the new
    /// count. Pure arithmetic: no clamping, no range validation. Callers must
    /// ensure the result stays non-negative; a negative result is a caller
    /// bug, not a store-detected error.
    ///
    /// # Errors
    /// Returns [`Error::ItemNotFound`] if no item matches.
    pub fn adjust_stock(&mut self, id: i64, delta: i64) -> Result<i64> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(Error::ItemNotFound { id })?;
        item.stock += delta;
        Ok(item.stock)
    }
}

fn validate_fields(name: &str, price: i64, stock: i64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Item name cannot be empty".to_string(),
        });
    }
    if price < 0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    if stock < 0 {
        return Err(Error::InvalidAmount { amount: stock });
    }
    Ok(())
}
