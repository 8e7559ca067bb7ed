//! Checkout flows - the interaction layer between a catalog and a sale.
//!
//! Two variants exist, matching the two cashier screens: a multi-item
//! running [`Cart`] (general store) and a single-item [`QuantityPicker`]
//! (fishing-pond counter). Both validate every quantity change against live
//! stock and reduce to the same contract: they produce a [`PendingSale`]
//! carrying the computed total, which the UI shows in an explicit
//! confirmation gate. Confirming commits the sale through the context
//! service; dropping the pending sale (declining) leaves all state unchanged.
//!
//! Validation failures here are [`Rejection`]s - interactive outcomes
//! surfaced to the user in place - not propagating errors. A rejected
//! operation never changes cart or picker state.

use thiserror::Error;

use crate::{
    errors::Result,
    models::{Item, SaleLine, Transaction},
};

use super::context::PosContext;

/// A user-facing validation outcome that aborts a checkout interaction
/// without changing any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The selected item has zero stock; the interaction never opens.
    #[error("'{name}' is out of stock")]
    OutOfStock {
        /// Name of the exhausted item
        name: String,
    },

    /// The requested quantity exceeds the item's current stock.
    #[error("only {available} of '{name}' available")]
    InsufficientStock {
        /// Name of the item that ran short
        name: String,
        /// Units currently in stock
        available: i64,
    },

    /// The requested quantity would drop below one unit.
    #[error("quantity must be at least 1")]
    QuantityBelowMinimum,

    /// Checkout was requested on an empty cart.
    #[error("cart is empty")]
    EmptyCart,
}

/// One line of a running cart, snapshotting name and price at add time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Catalog id of the item
    pub item_id: i64,
    /// Item name at add time
    pub item_name: String,
    /// Units currently in the cart
    pub quantity: i64,
    /// Unit price at add time
    pub price: i64,
}

impl CartLine {
    /// Line subtotal (`quantity * price`).
    #[must_use]
    pub const fn subtotal(&self) -> i64 {
        self.quantity * self.price
    }
}

/// Multi-item running cart - the general-store checkout variant.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cart lines, in the order items were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `item`, validated against its live stock.
    ///
    /// A fresh selection starts a quantity-1 line; re-selecting increments
    /// the existing line. Rejected additions leave the cart unchanged.
    pub fn add(&mut self, item: &Item) -> std::result::Result<(), Rejection> {
        if item.stock == 0 {
            return Err(Rejection::OutOfStock {
                name: item.name.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item.id) {
            if line.quantity >= item.stock {
                return Err(Rejection::InsufficientStock {
                    name: item.name.clone(),
                    available: item.stock,
                });
            }
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item_id: item.id,
                item_name: item.name.clone(),
                quantity: 1,
                price: item.price,
            });
        }
        Ok(())
    }

    /// Removes one unit of the matching line; the line is dropped entirely
    /// when it reaches zero. Unknown ids are ignored.
    pub fn decrement(&mut self, item_id: i64) {
        if let Some(index) = self.lines.iter().position(|line| line.item_id == item_id) {
            if self.lines[index].quantity > 1 {
                self.lines[index].quantity -= 1;
            } else {
                self.lines.remove(index);
            }
        }
    }

    /// Drops the matching line outright, whatever its quantity.
    pub fn remove(&mut self, item_id: i64) {
        self.lines.retain(|line| line.item_id != item_id);
    }

    /// Cart total: `sum(price * quantity)` across lines.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Starts the confirmation gate for the current cart contents.
    ///
    /// Rejects an empty cart. The cart itself is untouched; call
    /// [`Cart::clear`] after the pending sale is confirmed.
    pub fn checkout(&self) -> std::result::Result<PendingSale, Rejection> {
        if self.lines.is_empty() {
            return Err(Rejection::EmptyCart);
        }
        let lines = self
            .lines
            .iter()
            .map(|line| SaleLine {
                item_id: line.item_id,
                item_name: line.item_name.clone(),
                quantity: line.quantity,
                price: line.price,
            })
            .collect();
        Ok(PendingSale {
            lines,
            total: self.total(),
        })
    }

    /// Empties the cart. Called after a confirmed sale.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Single-item quantity stepper - the fishing-counter checkout variant.
#[derive(Debug)]
pub struct QuantityPicker {
    item: Item,
    quantity: i64,
}

impl QuantityPicker {
    /// Opens the stepper for `item` at quantity 1.
    ///
    /// Selecting an out-of-stock item is rejected immediately and never
    /// opens the interaction.
    pub fn open(item: &Item) -> std::result::Result<Self, Rejection> {
        if item.stock == 0 {
            return Err(Rejection::OutOfStock {
                name: item.name.clone(),
            });
        }
        Ok(Self {
            item: item.clone(),
            quantity: 1,
        })
    }

    /// Current requested quantity.
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// The item being ordered.
    #[must_use]
    pub const fn item(&self) -> &Item {
        &self.item
    }

    /// Steps the quantity up one unit, bounded by the item's stock.
    /// A rejected step leaves the quantity unchanged.
    pub fn increase(&mut self) -> std::result::Result<(), Rejection> {
        if self.quantity + 1 > self.item.stock {
            return Err(Rejection::InsufficientStock {
                name: self.item.name.clone(),
                available: self.item.stock,
            });
        }
        self.quantity += 1;
        Ok(())
    }

    /// Steps the quantity down one unit, bounded below by 1.
    /// A rejected step leaves the quantity unchanged.
    pub fn decrease(&mut self) -> std::result::Result<(), Rejection> {
        if self.quantity <= 1 {
            return Err(Rejection::QuantityBelowMinimum);
        }
        self.quantity -= 1;
        Ok(())
    }

    /// Order total: `price * quantity`.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.item.price * self.quantity
    }

    /// Starts the confirmation gate for the picked quantity.
    #[must_use]
    pub fn checkout(&self) -> PendingSale {
        PendingSale {
            lines: vec![SaleLine::snapshot(&self.item, self.quantity)],
            total: self.total(),
        }
    }
}

/// The explicit confirmation gate before a sale is committed.
///
/// Carries the computed total for display. [`PendingSale::confirm`] commits
/// the sale; dropping the value declines it and leaves all state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSale {
    lines: Vec<SaleLine>,
    total: i64,
}

impl PendingSale {
    /// The line snapshots about to be sold.
    #[must_use]
    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    /// The total shown to the user at the confirmation prompt.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.total
    }

    /// Commits the sale: records the transaction and decrements stock as one
    /// operation on the context service.
    ///
    /// # Errors
    /// Propagates [`crate::errors::Error::InsufficientStock`] if live stock
    /// changed since the flow validated it, and persistence errors.
    pub fn confirm(self, context: &mut PosContext) -> Result<Transaction> {
        context.record_sale(self.lines, self.total)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{context_with_items, sample_item};

    #[test]
    fn test_cart_add_out_of_stock_never_opens() {
        let item = sample_item(5, 8000, 0);
        let mut cart = Cart::new();

        let result = cart.add(&item);
        assert_eq!(
            result.unwrap_err(),
            Rejection::OutOfStock {
                name: item.name.clone()
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_add_increments_existing_line() {
        let item = sample_item(5, 8000, 3);
        let mut cart = Cart::new();

        cart.add(&item).unwrap();
        cart.add(&item).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), 16000);
    }

    #[test]
    fn test_cart_add_rejects_beyond_stock() {
        let item = sample_item(5, 8000, 2);
        let mut cart = Cart::new();

        cart.add(&item).unwrap();
        cart.add(&item).unwrap();
        let result = cart.add(&item);

        assert_eq!(
            result.unwrap_err(),
            Rejection::InsufficientStock {
                name: item.name.clone(),
                available: 2
            }
        );
        // Rejection leaves the cart unchanged
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_cart_decrement_drops_line_at_one() {
        let item = sample_item(5, 8000, 3);
        let mut cart = Cart::new();
        cart.add(&item).unwrap();
        cart.add(&item).unwrap();

        cart.decrement(5);
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.decrement(5);
        assert!(cart.is_empty());

        // Unknown id is ignored
        cart.decrement(99);
    }

    #[test]
    fn test_cart_remove_drops_whole_line() {
        let a = sample_item(1, 1000, 5);
        let b = sample_item(2, 2000, 5);
        let mut cart = Cart::new();
        cart.add(&a).unwrap();
        cart.add(&b).unwrap();
        cart.add(&b).unwrap();

        cart.remove(2);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].item_id, 1);
    }

    #[test]
    fn test_cart_checkout_rejects_empty() {
        let cart = Cart::new();
        assert_eq!(cart.checkout().unwrap_err(), Rejection::EmptyCart);
    }

    #[test]
    fn test_cart_checkout_totals_across_lines() {
        let a = sample_item(1, 15000, 5);
        let b = sample_item(2, 5000, 5);
        let mut cart = Cart::new();
        cart.add(&a).unwrap();
        cart.add(&a).unwrap();
        cart.add(&b).unwrap();

        let sale = cart.checkout().unwrap();
        assert_eq!(sale.total(), 35000);
        assert_eq!(sale.lines().len(), 2);
        assert_eq!(sale.lines()[0].quantity, 2);

        // Checkout leaves the cart intact until the sale is confirmed
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_picker_rejects_out_of_stock() {
        let item = sample_item(5, 8000, 0);
        let result = QuantityPicker::open(&item);
        assert_eq!(
            result.unwrap_err(),
            Rejection::OutOfStock {
                name: item.name.clone()
            }
        );
    }

    #[test]
    fn test_picker_bounds_quantity_to_stock() {
        let item = sample_item(5, 8000, 3);
        let mut picker = QuantityPicker::open(&item).unwrap();
        assert_eq!(picker.quantity(), 1);

        picker.increase().unwrap();
        picker.increase().unwrap();
        assert_eq!(picker.quantity(), 3);

        // Requesting 4 against stock 3 is rejected in place
        let result = picker.increase();
        assert_eq!(
            result.unwrap_err(),
            Rejection::InsufficientStock {
                name: item.name.clone(),
                available: 3
            }
        );
        assert_eq!(picker.quantity(), 3);
    }

    #[test]
    fn test_picker_never_drops_below_one() {
        let item = sample_item(5, 8000, 3);
        let mut picker = QuantityPicker::open(&item).unwrap();

        let result = picker.decrease();
        assert_eq!(result.unwrap_err(), Rejection::QuantityBelowMinimum);
        assert_eq!(picker.quantity(), 1);
    }

    #[test]
    fn test_confirmed_cart_sale_commits_then_cart_clears() {
        let mut context = context_with_items(vec![sample_item(1, 15000, 50), sample_item(7, 8000, 3)]);
        let mut cart = Cart::new();

        cart.add(&context.item(1).unwrap().clone()).unwrap();
        cart.add(&context.item(7).unwrap().clone()).unwrap();
        cart.add(&context.item(7).unwrap().clone()).unwrap();

        let sale = cart.checkout().unwrap();
        assert_eq!(sale.total(), 31000);

        let transaction = sale.confirm(&mut context).unwrap();
        assert_eq!(transaction.total, 31000);
        assert_eq!(context.item(1).unwrap().stock, 49);
        assert_eq!(context.item(7).unwrap().stock, 1);
        assert_eq!(context.transactions().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_declined_sale_changes_nothing() {
        let mut context = context_with_items(vec![sample_item(5, 8000, 3)]);
        let mut cart = Cart::new();
        cart.add(&context.item(5).unwrap().clone()).unwrap();

        let sale = cart.checkout().unwrap();
        drop(sale); // user declined the confirmation prompt

        assert_eq!(context.item(5).unwrap().stock, 3);
        assert!(context.transactions().is_empty());
        // The cart survives a declined confirmation
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_stale_picker_is_rechecked_at_commit() {
        let mut context = context_with_items(vec![sample_item(5, 8000, 3)]);
        let picker = {
            let item = context.item(5).unwrap().clone();
            let mut picker = QuantityPicker::open(&item).unwrap();
            picker.increase().unwrap();
            picker.increase().unwrap();
            picker
        };

        // Stock drops to 2 while the confirmation prompt is open
        let lines = vec![crate::models::SaleLine::snapshot(
            context.item(5).unwrap(),
            1,
        )];
        context.record_sale(lines, 8000).unwrap();

        let result = picker.checkout().confirm(&mut context);
        assert!(matches!(
            result.unwrap_err(),
            crate::errors::Error::InsufficientStock {
                requested: 3,
                available: 2,
                ..
            }
        ));
        // The failed commit left the second sale unrecorded
        assert_eq!(context.transactions().len(), 1);
        assert_eq!(context.item(5).unwrap().stock, 2);
    }

    #[test]
    fn test_picker_checkout_single_line() {
        let item = sample_item(5, 8000, 3);
        let mut picker = QuantityPicker::open(&item).unwrap();
        picker.increase().unwrap();

        let sale = picker.checkout();
        assert_eq!(sale.total(), 16000);
        assert_eq!(sale.lines().len(), 1);
        assert_eq!(sale.lines()[0].quantity, 2);
        assert_eq!(sale.lines()[0].item_id, 5);
    }
}
