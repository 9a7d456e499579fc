//! Ownership and persistence of the transaction collection.
//!
//! The persisted slot is the source of truth. [`TransactionStore`] keeps an
//! in-memory copy that is hydrated once at startup and written through to the
//! slot after every mutation.

use crate::core::slots::{SlotStorage, TRANSACTIONS_SLOT};
use crate::core::transaction::{NewTransaction, Transaction, TransactionPatch};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Reads the persisted collection.
///
/// Any problem reading or decoding the slot yields an empty collection so a
/// corrupted slot never blocks startup.
pub fn load_transactions(slots: &impl SlotStorage) -> Vec<Transaction> {
    let raw = match slots.read(TRANSACTIONS_SLOT) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No persisted transactions found");
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read persisted transactions: {e}");
            return Vec::new();
        }
    };

    if raw.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<Transaction>>(&raw) {
        Ok(transactions) => {
            debug!("Loaded {} transactions", transactions.len());
            transactions
        }
        Err(e) => {
            warn!("Ignoring malformed persisted transactions: {e}");
            Vec::new()
        }
    }
}

/// Overwrites the persisted slot with the full collection.
pub fn save_transactions(slots: &impl SlotStorage, transactions: &[Transaction]) -> Result<()> {
    let raw = serde_json::to_string(transactions).context("Failed to serialize transactions")?;
    slots
        .write(TRANSACTIONS_SLOT, &raw)
        .context("Failed to persist transactions")?;
    debug!("Saved {} transactions", transactions.len());
    Ok(())
}

/// Single owner of the transaction collection.
pub struct TransactionStore<S: SlotStorage> {
    slots: S,
    transactions: Vec<Transaction>,
}

impl<S: SlotStorage> TransactionStore<S> {
    /// Hydrates the store from the persisted slot.
    pub fn open(slots: S) -> Self {
        let transactions = load_transactions(&slots);
        Self {
            slots,
            transactions,
        }
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Records a new transaction under a fresh id.
    pub fn create(&mut self, fields: NewTransaction) -> Result<Transaction> {
        let tx = Transaction {
            id: self.fresh_id(),
            kind: fields.kind,
            amount: fields.amount,
            category: fields.category.trim().to_string(),
            note: fields.note.trim().to_string(),
            date: fields.date,
        };

        let mut next = self.transactions.clone();
        next.push(tx.clone());
        self.commit(next)?;

        info!(id = %tx.id, kind = %tx.kind, amount = tx.amount, "Transaction created");
        Ok(tx)
    }

    /// Merges `patch` over the transaction with `id`. Returns `None` without
    /// touching storage when no such transaction exists.
    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> Result<Option<Transaction>> {
        let Some(idx) = self.position(id) else {
            debug!("Update skipped, transaction {id} not found");
            return Ok(None);
        };

        let mut next = self.transactions.clone();
        patch.apply_to(&mut next[idx]);
        let updated = next[idx].clone();
        self.commit(next)?;

        info!(id = %updated.id, "Transaction updated");
        Ok(Some(updated))
    }

    /// Removes the transaction with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(idx) = self.position(id) else {
            debug!("Delete skipped, transaction {id} not found");
            return Ok(false);
        };

        let mut next = self.transactions.clone();
        next.remove(idx);
        self.commit(next)?;

        info!(id, "Transaction deleted");
        Ok(true)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    // Memory is only replaced once the write succeeded.
    fn commit(&mut self, next: Vec<Transaction>) -> Result<()> {
        save_transactions(&self.slots, &next)?;
        self.transactions = next;
        Ok(())
    }
}
