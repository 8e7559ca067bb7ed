//! Unified error type for the crate.
//!
//! Checkout rejections (insufficient stock, empty cart) are deliberately not
//! represented here; they are interactive outcomes surfaced to the user in
//! place, not propagating errors. See [`crate::core::checkout::Rejection`].

use thiserror::Error;

/// All the ways a catalog, ledger, or persistence operation can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what was wrong
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Item not found: {id}")]
    ItemNotFound {
        /// The id that matched no catalog item
        id: i64,
    },

    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending price or stock value
        amount: i64,
    },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The below-minimum quantity a sale line carried
        quantity: i64,
    },

    #[error("Insufficient stock for '{name}': requested {requested}, available {available}")]
    InsufficientStock {
        /// Name of the item that ran short
        name: String,
        /// Quantity the sale asked for
        requested: i64,
        /// Quantity actually in stock
        available: i64,
    },

    #[error("Transaction total mismatch: declared {declared}, computed {computed}")]
    TotalMismatch {
        /// Total handed in by the caller
        declared: i64,
        /// Total recomputed from the sale lines
        computed: i64,
    },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
