use super::ui;
use crate::core::analytics::{self, ListQuery, SortKey};
use crate::core::transaction::{
    self, NewTransaction, Transaction, TransactionPatch, TransactionType,
};
use crate::core::{SlotStorage, TransactionStore};
use anyhow::{Result, bail};
use chrono::Local;
use comfy_table::Cell;

/// Raw input for recording a transaction.
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub note: String,
    /// Defaults to today when missing.
    pub date: Option<String>,
}

/// Raw input for editing a transaction. Missing fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct EditArgs {
    pub id: String,
    pub kind: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub note: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListArgs {
    pub kind: String,
    pub category: String,
    pub sort: String,
}

impl Default for ListArgs {
    fn default() -> Self {
        ListArgs {
            kind: "all".to_string(),
            category: "all".to_string(),
            sort: SortKey::default().to_string(),
        }
    }
}

pub fn add<S: SlotStorage>(
    store: &mut TransactionStore<S>,
    args: AddArgs,
    currency: &str,
) -> Result<String> {
    let date = match args.date.as_deref() {
        Some(d) if !d.trim().is_empty() => transaction::parse_date(d)?,
        _ => Local::now().date_naive(),
    };
    let fields = NewTransaction {
        kind: args.kind.parse()?,
        amount: transaction::parse_amount(&args.amount)?,
        category: args.category,
        note: args.note,
        date,
    };

    let tx = store.create(fields)?;
    Ok(format!(
        "Transaction added\n\n{}",
        transactions_table(std::slice::from_ref(&tx), currency)
    ))
}

pub fn edit<S: SlotStorage>(
    store: &mut TransactionStore<S>,
    args: EditArgs,
    currency: &str,
) -> Result<String> {
    let patch = TransactionPatch {
        kind: args
            .kind
            .as_deref()
            .map(str::parse::<TransactionType>)
            .transpose()?,
        amount: args
            .amount
            .as_deref()
            .map(transaction::parse_amount)
            .transpose()?,
        category: args.category,
        note: args.note,
        date: args
            .date
            .as_deref()
            .map(transaction::parse_date)
            .transpose()?,
    };
    if patch.is_empty() {
        bail!("Nothing to update, pass at least one field to change");
    }

    match store.update(&args.id, patch)? {
        Some(tx) => Ok(format!(
            "Transaction updated\n\n{}",
            transactions_table(std::slice::from_ref(&tx), currency)
        )),
        None => bail!("No transaction found with id {}", args.id),
    }
}

pub fn delete<S: SlotStorage>(store: &mut TransactionStore<S>, id: &str) -> Result<String> {
    if store.delete(id)? {
        Ok(format!("Transaction {id} deleted"))
    } else {
        bail!("No transaction found with id {id}")
    }
}

pub fn list(transactions: &[Transaction], args: &ListArgs, currency: &str) -> Result<String> {
    let query = ListQuery {
        kind: args.kind.parse()?,
        category: args.category.parse()?,
        sort: SortKey::from_key(&args.sort),
    };
    let items = analytics::filter_and_sort(transactions, &query);
    if items.is_empty() {
        return Ok(ui::style_text(
            "No transactions to show.",
            ui::StyleType::Subtle,
        ));
    }

    let balance = analytics::balance(transactions);
    Ok(format!(
        "{}\n\n{}: {}",
        transactions_table(&items, currency),
        ui::style_text("Balance", ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_currency(balance.total, currency),
            ui::StyleType::TotalValue
        )
    ))
}

fn transactions_table(items: &[Transaction], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Date"),
        ui::header_cell("Category"),
        ui::header_cell("Note"),
        ui::header_cell("Amount"),
    ]);

    for t in items {
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(ui::format_date(t.date)),
            Cell::new(t.display_category()),
            Cell::new(&t.note),
            ui::amount_cell(t.signed_amount(), currency),
        ]);
    }
    table.to_string()
}
