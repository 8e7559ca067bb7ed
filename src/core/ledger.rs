//! Transaction log - the append-only sale history for one business context.
//!
//! Transactions are created once and never edited or deleted; new records are
//! prepended so iteration order is newest-first. Ids combine the context
//! prefix, the creation time in milliseconds, and a monotonic sequence, so
//! two sales recorded in the same millisecond still get distinct ids.
//! Revenue views are computed on demand from the log, never stored.

use chrono::{DateTime, Local, Utc};

use crate::{
    errors::Result,
    models::{SaleLine, Transaction},
};

/// Append-only history of completed sales, newest-first.
#[derive(Debug)]
pub struct TransactionLog {
    id_prefix: String,
    transactions: Vec<Transaction>,
    sequence: u64,
}

impl TransactionLog {
    /// Creates an empty log generating ids with `id_prefix`.
    #[must_use]
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self::from_transactions(id_prefix, Vec::new())
    }

    /// Wraps an already-loaded history (expected newest-first, as persisted).
    #[must_use]
    pub fn from_transactions(
        id_prefix: impl Into<String>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            transactions,
            sequence: 0,
        }
    }

    /// All recorded transactions, newest-first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Constructs a transaction with a generated id and the current
    /// timestamp, verifies the declared total, and prepends it.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::TotalMismatch`] if `declared_total`
    /// disagrees with the recomputed line sum.
    pub fn record(&mut self, lines: Vec<SaleLine>, declared_total: i64) -> Result<&Transaction> {
        let now = Utc::now();
        let id = self.next_id(now);
        let transaction = Transaction::new(id, now, lines, declared_total)?;
        self.transactions.insert(0, transaction);
        Ok(&self.transactions[0])
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        self.sequence += 1;
        format!(
            "{}-{}-{:04}",
            self.id_prefix,
            now.timestamp_millis(),
            self.sequence
        )
    }

    /// Sum of `total` across all recorded transactions.
    #[must_use]
    pub fn total_revenue(&self) -> i64 {
        self.transactions.iter().map(|t| t.total).sum()
    }

    /// Transactions whose calendar date, in local time, is today.
    #[must_use]
    pub fn today_transactions(&self) -> Vec<&Transaction> {
        let today = Local::now().date_naive();
        self.transactions
            .iter()
            .filter(|t| t.date.with_timezone(&Local).date_naive() == today)
            .collect()
    }

    /// Number of transactions recorded today (local calendar date).
    #[must_use]
    pub fn today_count(&self) -> usize {
        self.today_transactions().len()
    }

    /// Revenue from transactions recorded today (local calendar date).
    #[must_use]
    pub fn today_revenue(&self) -> i64 {
        self.today_transactions().iter().map(|t| t.total).sum()
    }
}
