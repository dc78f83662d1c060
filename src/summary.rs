use crate::error::Result;
use crate::schema::{Transaction, TransactionType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Always `total_income - total_expenses`.
    pub balance: f64,
    pub transaction_count: usize,
}

/// Percentage changes of the current month against the previous one.
/// Whether a change is good or bad is left to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverMonth {
    pub income_change: f64,
    pub expense_change: f64,
    pub balance_change: f64,
}

impl MonthOverMonth {
    pub fn between(current: &WindowSummary, previous: &WindowSummary) -> Self {
        Self {
            income_change: percent_change(current.total_income, previous.total_income),
            expense_change: percent_change(current.total_expenses, previous.total_expenses),
            balance_change: percent_change(current.balance, previous.balance),
        }
    }
}

pub fn summarize<'a, I>(transactions: I) -> Result<WindowSummary>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut summary = WindowSummary::default();

    for transaction in transactions {
        transaction.validate()?;
        match transaction.kind {
            TransactionType::Income => summary.total_income += transaction.amount,
            TransactionType::Expense => summary.total_expenses += transaction.amount,
        }
        summary.transaction_count += 1;
    }

    summary.balance = summary.total_income - summary.total_expenses;
    Ok(summary)
}

/// `(current - previous) / previous * 100`, or `0` whenever `previous <= 0`.
///
/// A move from nothing to something therefore reports `0`, not infinity.
/// Existing displayed figures depend on this.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}
