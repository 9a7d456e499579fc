//! Pure derivations over a transaction collection: balance totals, category
//! sets, filtered/sorted views and monthly summaries.
use crate::core::transaction::{Transaction, TransactionType};
use anyhow::{Result, bail};
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Aggregate income, expense and net total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Balance {
    pub income: f64,
    pub expense: f64,
    pub total: f64,
}

/// Income, expense and saving for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub key: String,
    pub income: f64,
    pub expense: f64,
    pub saving: f64,
}

pub fn balance(transactions: &[Transaction]) -> Balance {
    let (income, expense) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), t| match t.kind {
                TransactionType::Income => (income + t.amount, expense),
                TransactionType::Expense => (income, expense + t.amount),
            });
    Balance {
        income,
        expense,
        total: income - expense,
    }
}

/// Distinct non-empty categories in ascending collation order.
pub fn categories(transactions: &[Transaction]) -> Vec<String> {
    let distinct: HashSet<&str> = transactions
        .iter()
        .map(|t| t.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    let mut out: Vec<String> = distinct.into_iter().map(str::to_string).collect();

    match root_collator() {
        Some(collator) => out.sort_by(|a, b| collator.compare(a, b).then_with(|| a.cmp(b))),
        None => out.sort_by(|a, b| approximate_collate(a, b)),
    }
    out
}

/// The category whose signed total has the greatest magnitude.
///
/// Empty categories are grouped under the type's default label. On a tie the
/// group seen first wins. Returns `None` for an empty collection.
pub fn top_category(transactions: &[Transaction]) -> Option<String> {
    let mut groups: Vec<(&str, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in transactions {
        let label = t.display_category();
        match index.get(label) {
            Some(&i) => groups[i].1 += t.signed_amount(),
            None => {
                index.insert(label, groups.len());
                groups.push((label, t.signed_amount()));
            }
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (label, sum) in groups {
        if best.is_none_or(|(_, best_sum)| sum.abs() > best_sum.abs()) {
            best = Some((label, sum));
        }
    }
    debug!("Top category: {best:?}");
    best.map(|(label, _)| label.to_string())
}

/// Per-month totals keyed by `YYYY-MM`, most recent month first.
pub fn monthly_summary(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for t in transactions {
        let entry = months
            .entry(t.date.format("%Y-%m").to_string())
            .or_insert((0.0, 0.0));
        match t.kind {
            TransactionType::Income => entry.0 += t.amount,
            TransactionType::Expense => entry.1 += t.amount,
        }
    }

    months
        .into_iter()
        .rev()
        .map(|(key, (income, expense))| MonthlySummary {
            key,
            income,
            expense,
            saving: income - expense,
        })
        .collect()
}

/// Type filter for [`filter_and_sort`]. Parses from `"all"`, `"income"` or `"expense"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(TypeFilter::All)
        } else {
            Ok(TypeFilter::Only(s.parse()?))
        }
    }
}

/// Exact category filter. Parses `"all"` as the wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortKey {
    /// Like `parse`, but unknown keys fall back to `DateDesc`.
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date_desc",
            SortKey::DateAsc => "date_asc",
            SortKey::AmountDesc => "amount_desc",
            SortKey::AmountAsc => "amount_asc",
        }
    }

    /// Primary comparison by key, then `id` descending on every key.
    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let primary = match self {
            SortKey::DateDesc => b.date.cmp(&a.date),
            SortKey::DateAsc => a.date.cmp(&b.date),
            SortKey::AmountDesc => b.amount.total_cmp(&a.amount),
            SortKey::AmountAsc => a.amount.total_cmp(&b.amount),
        };
        // Ties fall back to id descending for every key, ascending ones included.
        primary.then_with(|| b.id.cmp(&a.id))
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "date_desc" => Ok(SortKey::DateDesc),
            "date_asc" => Ok(SortKey::DateAsc),
            "amount_desc" => Ok(SortKey::AmountDesc),
            "amount_asc" => Ok(SortKey::AmountAsc),
            other => bail!("Unknown sort key: {other}"),
        }
    }
}

/// Filter and ordering parameters for the transaction list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub kind: TypeFilter,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

/// Returns a new, filtered and ordered copy of `transactions`.
pub fn filter_and_sort(transactions: &[Transaction], query: &ListQuery) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|t| match query.kind {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => t.kind == kind,
        })
        .filter(|t| match &query.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &t.category == category,
        })
        .cloned()
        .collect();

    out.sort_by(|a, b| query.sort.compare(a, b));
    debug!(
        "Listing {} of {} transactions sorted by {}",
        out.len(),
        transactions.len(),
        query.sort
    );
    out
}

/// Unicode root-locale collator: punctuation before digits before letters,
/// lowercase before uppercase on otherwise equal text.
fn root_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("Collator unavailable, using approximate category order: {e}");
            None
        }
    }
}

/// Rank of a character class in the fallback order.
fn char_rank(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

/// Fallback ordering: accent-stripped, case-folded text with symbols ranked
/// before digits and letters, then lowercase before uppercase, then raw text.
fn approximate_collate(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| -> Vec<(u8, char)> {
        s.nfkd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .map(|c| (char_rank(c), c))
            .collect()
    };
    let case = |s: &str| -> Vec<bool> { s.chars().map(char::is_uppercase).collect() };

    primary(a)
        .cmp(&primary(b))
        .then_with(|| case(a).cmp(&case(b)))
        .then_with(|| a.cmp(b))
}
