//! Context service - one explicitly constructed object per business context.
//!
//! A [`PosContext`] ties together the catalog, the transaction log, and the
//! persistence adapter for one context (general store or fishing counter).
//! It is handed to callers directly - there is no ambient lookup and no
//! process-wide singleton - so using an uninitialized context is structurally
//! impossible rather than a runtime error.
//!
//! Both collections are loaded once at construction. Every mutation mirrors
//! the affected collection(s) to storage before returning; persistence is
//! whole-collection and synchronous.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::{
    config::ContextProfile,
    core::{Catalog, TransactionLog},
    errors::{Error, Result},
    models::{Item, ItemPatch, NewItem, SaleLine, Transaction},
    storage::Storage,
};

/// The catalog + ledger + storage of one business context.
pub struct PosContext {
    profile: ContextProfile,
    catalog: Catalog,
    ledger: TransactionLog,
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for PosContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosContext")
            .field("profile", &self.profile.name)
            .field("items", &self.catalog.items().len())
            .field("transactions", &self.ledger.transactions().len())
            .finish_non_exhaustive()
    }
}

impl PosContext {
    /// Opens a context: loads both collections from storage, seeding the
    /// catalog from the profile when its key is absent and starting with an
    /// empty log when the transaction key is absent.
    ///
    /// Persisted payloads are parsed against the expected shape; a malformed
    /// value is logged and replaced by the defaults instead of being trusted.
    ///
    /// # Errors
    /// Returns an error if storage itself fails, or if seeding cannot be
    /// persisted.
    pub fn open(profile: ContextProfile, storage: Box<dyn Storage>) -> Result<Self> {
        let mut context = Self {
            catalog: Catalog::default(),
            ledger: TransactionLog::new(profile.id_prefix.as_str()),
            profile,
            storage,
        };

        context.load_catalog()?;
        context.load_ledger()?;
        Ok(context)
    }

    fn load_catalog(&mut self) -> Result<()> {
        match self.storage.get(&self.profile.catalog_key)? {
            Some(raw) => match serde_json::from_str::<Vec<Item>>(&raw) {
                Ok(items) => {
                    self.catalog = Catalog::from_items(items);
                }
                Err(e) => {
                    warn!(
                        context = %self.profile.name,
                        error = %e,
                        "malformed persisted catalog, falling back to seed"
                    );
                    self.catalog = Catalog::from_items(self.profile.seed.clone());
                }
            },
            None => {
                info!(
                    context = %self.profile.name,
                    items = self.profile.seed.len(),
                    "no persisted catalog, seeding defaults"
                );
                self.catalog = Catalog::from_items(self.profile.seed.clone());
                self.persist_catalog()?;
            }
        }
        Ok(())
    }

    fn load_ledger(&mut self) -> Result<()> {
        let transactions = match self.storage.get(&self.profile.transactions_key)? {
            Some(raw) => match serde_json::from_str::<Vec<Transaction>>(&raw) {
                Ok(transactions) => transactions,
                Err(e) => {
                    warn!(
                        context = %self.profile.name,
                        error = %e,
                        "malformed persisted transaction log, starting empty"
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        self.ledger =
            TransactionLog::from_transactions(self.profile.id_prefix.as_str(), transactions);
        Ok(())
    }

    fn persist_catalog(&mut self) -> Result<()> {
        let payload = serde_json::to_string(self.catalog.items())?;
        self.storage.put(&self.profile.catalog_key, &payload)
    }

    fn persist_ledger(&mut self) -> Result<()> {
        let payload = serde_json::to_string(self.ledger.transactions())?;
        self.storage.put(&self.profile.transactions_key, &payload)
    }

    /// The context name, e.g. `warung`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    // --- catalog ---

    /// Current catalog items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.catalog.items()
    }

    /// Looks up a catalog item by id.
    #[must_use]
    pub fn item(&self, id: i64) -> Option<&Item> {
        self.catalog.get(id)
    }

    /// Catalog items matching a classification.
    #[must_use]
    pub fn items_in_category(&self, category: &str) -> Vec<&Item> {
        self.catalog.items_in_category(category)
    }

    /// Adds a catalog item and mirrors the catalog to storage.
    pub fn add_item(&mut self, new_item: NewItem) -> Result<Item> {
        let item = self.catalog.add(new_item)?.clone();
        self.persist_catalog()?;
        info!(context = %self.profile.name, id = item.id, name = %item.name, "added catalog item");
        Ok(item)
    }

    /// Updates a catalog item and mirrors the catalog to storage.
    pub fn update_item(&mut self, id: i64, patch: ItemPatch) -> Result<Item> {
        let item = self.catalog.update(id, patch)?;
        self.persist_catalog()?;
        Ok(item)
    }

    /// Removes a catalog item and mirrors the catalog to storage. Historical
    /// transactions referencing the item keep their snapshots.
    pub fn delete_item(&mut self, id: i64) -> Result<Item> {
        let item = self.catalog.remove(id)?;
        self.persist_catalog()?;
        info!(context = %self.profile.name, id, name = %item.name, "deleted catalog item");
        Ok(item)
    }

    /// Raw signed stock adjustment, mirrored to storage. Callers are
    /// responsible for keeping the result non-negative; sales should go
    /// through [`PosContext::record_sale`] instead.
    pub fn adjust_stock(&mut self, id: i64, delta: i64) -> Result<i64> {
        let stock = self.catalog.adjust_stock(id, delta)?;
        self.persist_catalog()?;
        Ok(stock)
    }

    // --- transaction log ---

    /// All recorded transactions, newest-first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// Sum of `total` across all recorded transactions.
    #[must_use]
    pub fn total_revenue(&self) -> i64 {
        self.ledger.total_revenue()
    }

    /// Revenue from transactions recorded today (local calendar date).
    #[must_use]
    pub fn today_revenue(&self) -> i64 {
        self.ledger.today_revenue()
    }

    /// Number of transactions recorded today (local calendar date).
    #[must_use]
    pub fn today_count(&self) -> usize {
        self.ledger.today_count()
    }

    /// Records a completed sale: one transactional boundary covering the
    /// ledger append and the per-line stock decrements.
    ///
    /// Every line is validated before anything mutates: quantities must be
    /// at least 1, and the aggregate quantity per item - lines may repeat an
    /// item id - must not exceed live stock. A failure aborts with no state
    /// change; partial application is structurally impossible in memory. The
    /// two storage writes that follow are sequential and best-effort.
    ///
    /// # Errors
    /// - [`Error::InvalidQuantity`] if a line requests fewer than 1 unit
    /// - [`Error::ItemNotFound`] if a line references an id no longer in the
    ///   catalog
    /// - [`Error::InsufficientStock`] if the quantity requested for an item,
    ///   summed across lines, exceeds live stock
    /// - [`Error::TotalMismatch`] if `declared_total` disagrees with the
    ///   recomputed line sum
    pub fn record_sale(&mut self, lines: Vec<SaleLine>, declared_total: i64) -> Result<Transaction> {
        // Validate everything before mutating anything, folding repeated
        // item ids together so stock is checked against the aggregate
        let mut requested: HashMap<i64, i64> = HashMap::new();
        for line in &lines {
            if line.quantity < 1 {
                return Err(Error::InvalidQuantity {
                    quantity: line.quantity,
                });
            }
            let total_requested = requested.entry(line.item_id).or_insert(0);
            *total_requested += line.quantity;

            let item = self
                .catalog
                .get(line.item_id)
                .ok_or(Error::ItemNotFound { id: line.item_id })?;
            if *total_requested > item.stock {
                return Err(Error::InsufficientStock {
                    name: item.name.clone(),
                    requested: *total_requested,
                    available: item.stock,
                });
            }
        }

        let transaction = self.ledger.record(lines, declared_total)?.clone();
        for line in &transaction.items {
            // Cannot fail: ids were validated above
            self.catalog.adjust_stock(line.item_id, -line.quantity)?;
        }

        self.persist_ledger()?;
        self.persist_catalog()?;

        info!(
            context = %self.profile.name,
            transaction = %transaction.id,
            total = transaction.total,
            lines = transaction.items.len(),
            "recorded sale"
        );
        Ok(transaction)
    }
}
