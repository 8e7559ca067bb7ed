/// Catalog store - the authoritative item list for one context
pub mod catalog;
/// Checkout flows - cart, quantity stepper, confirmation gate
pub mod checkout;
/// Context service - catalog + ledger + persistence as one object
pub mod context;
/// Transaction log - append-only sale history and revenue views
pub mod ledger;

pub use catalog::Catalog;
pub use checkout::{Cart, PendingSale, QuantityPicker, Rejection};
pub use context::PosContext;
pub use ledger::TransactionLog;
