//! Transaction model and the field sets used to create and edit records.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Direction of a transaction. The amount itself is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Label shown in place of an empty category.
    pub fn default_label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => bail!("Unknown transaction type: {other}"),
        }
    }
}

/// One recorded income or expense event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
}

impl Transaction {
    /// The category, or the type's default label when the category is empty.
    pub fn display_category(&self) -> &str {
        if self.category.is_empty() {
            self.kind.default_label()
        } else {
            &self.category
        }
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Fields supplied when recording a new transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
}

/// Partial edit of an existing transaction. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub kind: Option<TransactionType>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub note: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.note.is_none()
            && self.date.is_none()
    }

    pub(crate) fn apply_to(self, tx: &mut Transaction) {
        if let Some(kind) = self.kind {
            tx.kind = kind;
        }
        if let Some(amount) = self.amount {
            tx.amount = amount;
        }
        if let Some(category) = self.category {
            tx.category = category.trim().to_string();
        }
        if let Some(note) = self.note {
            tx.note = note.trim().to_string();
        }
        if let Some(date) = self.date {
            tx.date = date;
        }
    }
}

/// Parses a user-entered amount, accepting only finite values greater than zero.
///
/// The store itself never validates amounts; callers collecting input run it
/// through here first.
pub fn parse_amount(input: &str) -> Result<f64> {
    let amount: f64 = match input.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Amount must be a number, got '{input}'"),
    };
    if !amount.is_finite() || amount <= 0.0 {
        bail!("Amount must be a positive number, got '{input}'");
    }
    Ok(amount)
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date '{input}', expected YYYY-MM-DD: {e}"))
}
