//! Core data model, persistence and derivations

pub mod analytics;
pub mod config;
pub mod ledger;
pub mod log;
pub mod slots;
pub mod transaction;

// Re-export main types for cleaner imports
pub use ledger::TransactionStore;
pub use slots::SlotStorage;
pub use transaction::{NewTransaction, Transaction, TransactionPatch, TransactionType};
