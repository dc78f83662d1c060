//! Per-category income/expense totals for one window.
//!
//! Entries are keyed by category *name*, not id: two catalog entries called
//! "Food" end up in a single "Food" entry. Transactions pointing at a category
//! id missing from the catalog are grouped under the fallback name.

use crate::error::Result;
use crate::schema::{Category, Transaction, TransactionType};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const FALLBACK_CATEGORY_NAME: &str = "Other";
pub const FALLBACK_CATEGORY_COLOR: &str = "#6B7280";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdownEntry {
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub income: f64,
    pub expense: f64,
    pub total: f64,
}

/// Display attributes a transaction's category id resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCategory<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub kind: TransactionType,
}

/// Id lookup over a category catalog with a fallback for unknown ids.
#[derive(Debug, Clone)]
pub struct CategoryResolver<'a> {
    by_id: HashMap<&'a str, &'a Category>,
    fallback_name: &'a str,
    fallback_color: &'a str,
}

impl<'a> CategoryResolver<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self::with_fallback(categories, FALLBACK_CATEGORY_NAME, FALLBACK_CATEGORY_COLOR)
    }

    pub fn with_fallback(
        categories: &'a [Category],
        fallback_name: &'a str,
        fallback_color: &'a str,
    ) -> Self {
        // Later duplicates of an id replace earlier ones.
        let by_id = categories.iter().map(|c| (c.id.as_str(), c)).collect();
        Self {
            by_id,
            fallback_name,
            fallback_color,
        }
    }

    /// Catalog entry for `category_id`, without any fallback.
    pub fn lookup(&self, category_id: &str) -> Option<&'a Category> {
        self.by_id.get(category_id).copied()
    }

    /// Unknown ids resolve to the fallback name and color as an expense. A
    /// known category with an empty name or color takes the fallback for that
    /// attribute only.
    pub fn resolve(&self, category_id: &str) -> ResolvedCategory<'a> {
        match self.lookup(category_id) {
            Some(category) => ResolvedCategory {
                name: non_empty_or(&category.name, self.fallback_name),
                color: non_empty_or(&category.color, self.fallback_color),
                kind: category.kind,
            },
            None => ResolvedCategory {
                name: self.fallback_name,
                color: self.fallback_color,
                kind: TransactionType::Expense,
            },
        }
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

pub fn breakdown_by_category<'a, I>(
    transactions: I,
    categories: &[Category],
) -> Result<Vec<CategoryBreakdownEntry>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    breakdown_with_resolver(transactions, &CategoryResolver::new(categories))
}

/// Groups by resolved name, drops entries with nothing in them and sorts by
/// descending total. Equal totals keep the order in which their names first
/// appeared.
pub fn breakdown_with_resolver<'a, I>(
    transactions: I,
    resolver: &CategoryResolver<'_>,
) -> Result<Vec<CategoryBreakdownEntry>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut entries: Vec<CategoryBreakdownEntry> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for transaction in transactions {
        transaction.validate()?;

        let resolved = resolver.resolve(&transaction.category_id);
        let idx = match index_by_name.get(resolved.name) {
            Some(&idx) => idx,
            None => {
                entries.push(CategoryBreakdownEntry {
                    name: resolved.name.to_string(),
                    color: resolved.color.to_string(),
                    kind: resolved.kind,
                    income: 0.0,
                    expense: 0.0,
                    total: 0.0,
                });
                index_by_name.insert(resolved.name.to_string(), entries.len() - 1);
                entries.len() - 1
            }
        };

        let entry = &mut entries[idx];
        match transaction.kind {
            TransactionType::Income => entry.income += transaction.amount,
            TransactionType::Expense => entry.expense += transaction.amount,
        }
    }

    let grouped = entries.len();
    entries.retain(|e| e.income > 0.0 || e.expense > 0.0);
    for entry in &mut entries {
        entry.total = entry.income + entry.expense;
    }
    entries.sort_by(|a, b| b.total.total_cmp(&a.total));

    debug!(
        "Category breakdown: {} names, {} dropped as empty",
        grouped,
        grouped - entries.len()
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use chrono::NaiveDate;

    fn tx(id: &str, kind: TransactionType, amount: f64, category_id: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        Transaction::new(id, kind, amount, category_id, date)
    }

    fn catalog() -> Vec<Category> {
        vec![
            Category::new("food-1", "Food", "#EF4444", TransactionType::Expense),
            Category::new("food-2", "Food", "#F97316", TransactionType::Expense),
            Category::new("salary", "Salary", "#10B981", TransactionType::Income),
            Category::new("rent", "Rent", "#3B82F6", TransactionType::Expense),
        ]
    }

    #[test]
    fn test_categories_sharing_a_name_are_merged() {
        let transactions = vec![
            tx("a", TransactionType::Expense, 100.0, "food-1"),
            tx("b", TransactionType::Expense, 100.0, "food-2"),
        ];

        let entries = breakdown_by_category(&transactions, &catalog()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Food");
        assert_eq!(entries[0].expense, 200.0);
        assert_eq!(entries[0].income, 0.0);
        assert_eq!(entries[0].total, 200.0);
        // Attributes come from the first category seen under that name.
        assert_eq!(entries[0].color, "#EF4444");
    }

    #[test]
    fn test_unknown_category_falls_back_to_other() {
        let transactions = vec![tx("a", TransactionType::Income, 50.0, "deleted")];

        let entries = breakdown_by_category(&transactions, &catalog()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, FALLBACK_CATEGORY_NAME);
        assert_eq!(entries[0].color, FALLBACK_CATEGORY_COLOR);
        assert_eq!(entries[0].kind, TransactionType::Expense);
        assert_eq!(entries[0].income, 50.0);
    }

    #[test]
    fn test_blank_category_attributes_fall_back() {
        let categories = vec![
            Category::new("blank", "", "", TransactionType::Income),
            Category::new("no-color", "Travel", "", TransactionType::Expense),
        ];
        let transactions = vec![
            tx("a", TransactionType::Expense, 5.0, "blank"),
            tx("b", TransactionType::Expense, 7.0, "no-color"),
        ];

        let entries = breakdown_by_category(&transactions, &categories).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "Travel");
        assert_eq!(entries[0].color, FALLBACK_CATEGORY_COLOR);

        assert_eq!(entries[1].name, FALLBACK_CATEGORY_NAME);
        assert_eq!(entries[1].color, FALLBACK_CATEGORY_COLOR);
        // The kind still comes from the catalog entry.
        assert_eq!(entries[1].kind, TransactionType::Income);
        assert_eq!(entries[1].expense, 5.0);

        let resolver = CategoryResolver::new(&categories);
        assert_eq!(resolver.lookup("blank").map(|c| c.name.as_str()), Some(""));
        assert!(resolver.lookup("missing").is_none());
    }

    #[test]
    fn test_income_and_expense_accumulate_separately() {
        // A refund booked as income against an expense category.
        let transactions = vec![
            tx("a", TransactionType::Expense, 80.0, "food-1"),
            tx("b", TransactionType::Income, 20.0, "food-1"),
        ];

        let entries = breakdown_by_category(&transactions, &catalog()).unwrap();
        assert_eq!(entries[0].income, 20.0);
        assert_eq!(entries[0].expense, 80.0);
        assert_eq!(entries[0].total, 100.0);
        assert_eq!(entries[0].kind, TransactionType::Expense);
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let transactions = vec![
            tx("a", TransactionType::Expense, 10.0, "rent"),
            tx("b", TransactionType::Income, 500.0, "salary"),
            tx("c", TransactionType::Expense, 10.0, "food-1"),
            tx("d", TransactionType::Expense, 0.0, "unknown"),
        ];

        let entries = breakdown_by_category(&transactions, &catalog()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Rent", "Food"]);
    }

    #[test]
    fn test_zero_entries_are_dropped() {
        let transactions = vec![tx("a", TransactionType::Expense, 0.0, "rent")];
        let entries = breakdown_by_category(&transactions, &catalog()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_custom_fallback() {
        let categories = catalog();
        let resolver = CategoryResolver::with_fallback(&categories, "Uncategorized", "#000000");
        let transactions = vec![tx("a", TransactionType::Expense, 5.0, "missing")];

        let entries = breakdown_with_resolver(&transactions, &resolver).unwrap();
        assert_eq!(entries[0].name, "Uncategorized");
        assert_eq!(entries[0].color, "#000000");
    }

    #[test]
    fn test_malformed_amount_fails_the_breakdown() {
        let transactions = vec![tx("bad", TransactionType::Expense, f64::INFINITY, "rent")];
        let result = breakdown_by_category(&transactions, &catalog());
        assert!(matches!(
            result,
            Err(AnalyticsError::MalformedTransaction { .. })
        ));
    }
}
