use crate::error::Result;
use crate::schema::{Transaction, TransactionType};
use crate::utils::{format_month_label, month_key, validate_label_format};
use crate::window::trailing_months;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_MONTH_LABEL_FORMAT: &str = "%b %Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// Human readable label, e.g. "Feb 2024".
    pub month: String,
    pub month_start: NaiveDate,
    pub income: f64,
    pub expenses: f64,
    pub net_balance: f64,
}

pub fn build_series<'a, I>(
    transactions: I,
    reference: NaiveDate,
    month_count: u32,
) -> Result<Vec<MonthlyPoint>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    build_series_with_format(transactions, reference, month_count, DEFAULT_MONTH_LABEL_FORMAT)
}

/// One point per month of the trailing window ending at `reference`, oldest
/// first. Months without transactions are present with zero totals.
///
/// Transactions are bucketed by `(year, month)` in a single pass rather than
/// re-filtering the whole set once per month. Only transactions that fall
/// inside the window are validated.
pub fn build_series_with_format<'a, I>(
    transactions: I,
    reference: NaiveDate,
    month_count: u32,
    label_format: &str,
) -> Result<Vec<MonthlyPoint>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    validate_label_format(label_format)?;
    let windows = trailing_months(reference, month_count)?;

    let mut points: Vec<MonthlyPoint> = windows
        .iter()
        .map(|w| MonthlyPoint {
            month: format_month_label(w.start, label_format),
            month_start: w.start,
            income: 0.0,
            expenses: 0.0,
            net_balance: 0.0,
        })
        .collect();

    let slot_by_month: HashMap<(i32, u32), usize> = windows
        .iter()
        .enumerate()
        .map(|(idx, w)| (month_key(w.start), idx))
        .collect();

    let mut bucketed = 0usize;
    for transaction in transactions {
        let Some(&idx) = slot_by_month.get(&month_key(transaction.date)) else {
            continue;
        };
        transaction.validate()?;

        let point = &mut points[idx];
        match transaction.kind {
            TransactionType::Income => point.income += transaction.amount,
            TransactionType::Expense => point.expenses += transaction.amount,
        }
        bucketed += 1;
    }

    for point in &mut points {
        point.net_balance = point.income - point.expenses;
    }

    debug!(
        "Built {}-month series ending {}: {} transactions bucketed",
        month_count, reference, bucketed
    );

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use crate::summary::summarize;
    use crate::window::{filter_by_window, trailing_months};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new("a", TransactionType::Income, 1000.0, "salary", date(2024, 1, 15)),
            Transaction::new("b", TransactionType::Expense, 300.0, "food", date(2024, 1, 20)),
            Transaction::new("c", TransactionType::Expense, 200.0, "food", date(2024, 2, 5)),
            Transaction::new("d", TransactionType::Income, 75.0, "gift", date(2023, 9, 1)),
            Transaction::new("e", TransactionType::Expense, 40.0, "food", date(2023, 8, 31)),
            Transaction::new("f", TransactionType::Expense, 99.0, "food", date(2024, 3, 1)),
        ]
    }

    #[test]
    fn test_six_month_series() {
        let series = build_series(&sample(), date(2024, 2, 10), 6).unwrap();
        assert_eq!(series.len(), 6);

        let labels: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Sep 2023", "Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024"]
        );

        assert_eq!(series[0].income, 75.0);
        assert_eq!(series[0].expenses, 0.0);

        assert_eq!(series[1].income, 0.0);
        assert_eq!(series[1].expenses, 0.0);
        assert_eq!(series[1].net_balance, 0.0);

        assert_eq!(series[4].income, 1000.0);
        assert_eq!(series[4].expenses, 300.0);
        assert_eq!(series[4].net_balance, 700.0);

        assert_eq!(series[5].expenses, 200.0);
        assert_eq!(series[5].net_balance, -200.0);
    }

    #[test]
    fn test_series_matches_per_window_summaries() {
        let transactions = sample();
        let reference = date(2024, 2, 10);

        let series = build_series(&transactions, reference, 8).unwrap();
        let windows = trailing_months(reference, 8).unwrap();

        for (point, window) in series.iter().zip(windows.iter()) {
            let summary = summarize(filter_by_window(&transactions, window)).unwrap();
            assert_eq!(point.month_start, window.start);
            assert_eq!(point.income, summary.total_income);
            assert_eq!(point.expenses, summary.total_expenses);
            assert_eq!(point.net_balance, summary.balance);
        }
    }

    #[test]
    fn test_zero_months_is_an_error() {
        let result = build_series(&sample(), date(2024, 2, 10), 0);
        assert!(matches!(result, Err(AnalyticsError::InvalidMonthCount(0))));
    }

    #[test]
    fn test_malformed_outside_window_is_ignored() {
        let mut transactions = sample();
        transactions.push(Transaction::new(
            "old",
            TransactionType::Expense,
            -1.0,
            "food",
            date(2020, 1, 1),
        ));
        assert!(build_series(&transactions, date(2024, 2, 10), 6).is_ok());

        transactions.push(Transaction::new(
            "new",
            TransactionType::Expense,
            -1.0,
            "food",
            date(2024, 2, 2),
        ));
        assert!(build_series(&transactions, date(2024, 2, 10), 6).is_err());
    }

    #[test]
    fn test_custom_label_format() {
        let series = build_series_with_format(&sample(), date(2024, 2, 10), 2, "%Y-%m").unwrap();
        assert_eq!(series[0].month, "2024-01");
        assert_eq!(series[1].month, "2024-02");
    }
}
