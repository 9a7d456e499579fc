use super::ui;
use crate::core::Transaction;
use crate::core::analytics::{self, MonthlySummary};
use comfy_table::Cell;

/// Number of months shown by default in the monthly view.
pub const DEFAULT_MONTHS: usize = 6;

/// Balance totals followed by the top category.
pub fn balance(transactions: &[Transaction], currency: &str) -> String {
    let balance = analytics::balance(transactions);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Income"),
        ui::header_cell("Expense"),
        ui::header_cell("Balance"),
    ]);
    table.add_row(vec![
        ui::amount_cell(balance.income, currency),
        ui::amount_cell(-balance.expense, currency),
        ui::amount_cell(balance.total, currency),
    ]);

    let top = analytics::top_category(transactions).unwrap_or_else(|| "N/A".to_string());
    format!(
        "{}\n\n{}: {}",
        table,
        ui::style_text("Top category", ui::StyleType::TotalLabel),
        top
    )
}

pub fn categories(transactions: &[Transaction]) -> String {
    let categories = analytics::categories(transactions);
    if categories.is_empty() {
        return ui::style_text("No categories yet.", ui::StyleType::Subtle);
    }
    categories.join("\n")
}

/// The most recent `months` monthly summaries, newest first.
pub fn monthly(transactions: &[Transaction], months: usize, currency: &str) -> String {
    let summary = analytics::monthly_summary(transactions);
    if summary.is_empty() {
        return ui::style_text("No transactions to summarize.", ui::StyleType::Subtle);
    }
    monthly_table(&summary[..summary.len().min(months)], currency)
}

fn monthly_table(rows: &[MonthlySummary], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Income"),
        ui::header_cell("Expense"),
        ui::header_cell("Saving"),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(ui::month_label(&row.key)),
            ui::amount_cell(row.income, currency),
            ui::amount_cell(-row.expense, currency),
            ui::amount_cell(row.saving, currency),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransactionType;
    use chrono::NaiveDate;

    fn tx(id: &str, kind: TransactionType, amount: f64, category: &str, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            kind,
            amount,
            category: category.to_string(),
            note: String::new(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn test_balance_shows_top_category() {
        let list = vec![
            tx("a", TransactionType::Income, 5000.0, "Salary", "2024-03-01"),
            tx("b", TransactionType::Expense, 1200.0, "Rent", "2024-03-05"),
        ];
        let out = balance(&list, "ARS");
        assert!(out.contains("ARS 5,000.00"));
        assert!(out.contains("ARS 3,800.00"));
        assert!(out.contains("Salary"));
    }

    #[test]
    fn test_balance_empty() {
        let out = balance(&[], "ARS");
        assert!(out.contains("N/A"));
    }

    #[test]
    fn test_categories_listing() {
        let list = vec![
            tx("a", TransactionType::Expense, 1.0, "Rent", "2024-03-01"),
            tx("b", TransactionType::Expense, 1.0, "", "2024-03-01"),
            tx("c", TransactionType::Expense, 1.0, "Food", "2024-03-01"),
        ];
        assert_eq!(categories(&list), "Food\nRent");
    }

    #[test]
    fn test_monthly_truncates_to_recent_months() {
        let list: Vec<Transaction> = (1..=8)
            .map(|m| {
                tx(
                    &m.to_string(),
                    TransactionType::Income,
                    100.0,
                    "",
                    &format!("2024-{m:02}-10"),
                )
            })
            .collect();

        let out = monthly(&list, DEFAULT_MONTHS, "ARS");
        assert!(out.contains("Aug 2024"));
        assert!(out.contains("Mar 2024"));
        assert!(!out.contains("Feb 2024"));
        assert!(!out.contains("Jan 2024"));
    }
}
