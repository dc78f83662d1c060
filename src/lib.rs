//! # Finance Analytics
//!
//! Turns a user's income/expense transactions and category catalog into the
//! figures a personal finance dashboard shows: monthly totals, month-over-month
//! changes, per-category breakdowns and a trailing monthly series.
//!
//! ## Core Concepts
//!
//! - **Window**: an inclusive calendar-month date range (see [`window`])
//! - **Summary**: income, expenses, balance and count for one window
//! - **Breakdown**: income and expense per category *name* for one window
//! - **Series**: one income/expense/net point per month, oldest first
//! - **Reference date**: the single "today" every window of one view is derived from
//!
//! Everything is a pure function of its inputs. Nothing is cached, nothing
//! reads the clock behind the caller's back.
//!
//! ## Example
//!
//! ```rust,ignore
//! use finance_analytics::*;
//! use chrono::NaiveDate;
//!
//! let ledger = Ledger::from_json(&payload)?;
//! let reference = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
//!
//! let stats = dashboard_stats(&ledger, reference)?;
//! println!("{} spent this month", stats.current.total_expenses);
//! println!("{:+.1}% vs last month", stats.changes.expense_change);
//! ```

pub mod breakdown;
pub mod config;
pub mod error;
pub mod filter;
pub mod ingestion;
pub mod schema;
pub mod series;
pub mod summary;
pub mod utils;
pub mod views;
pub mod window;

pub use breakdown::{
    breakdown_by_category, breakdown_with_resolver, CategoryBreakdownEntry, CategoryResolver,
    ResolvedCategory, FALLBACK_CATEGORY_COLOR, FALLBACK_CATEGORY_NAME,
};
pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, Result};
pub use filter::{recent_transactions, RecentTransaction, TransactionQuery};
pub use ingestion::*;
pub use schema::*;
pub use series::{build_series, build_series_with_format, MonthlyPoint};
pub use summary::{percent_change, summarize, MonthOverMonth, WindowSummary};
pub use views::{AnalyticsEngine, AnalyticsStats, DashboardStats};
pub use window::{filter_by_window, month_bounds, reference_today, trailing_months, DateWindow};

use chrono::NaiveDate;

/// Dashboard view of a ledger with the default configuration.
pub fn dashboard_stats(ledger: &Ledger, reference: NaiveDate) -> Result<DashboardStats> {
    AnalyticsEngine::default().dashboard(&ledger.transactions, &ledger.categories, reference)
}

/// Analytics view of a ledger with the default configuration.
pub fn analytics_stats(ledger: &Ledger, reference: NaiveDate) -> Result<AnalyticsStats> {
    AnalyticsEngine::default().analytics(&ledger.transactions, &ledger.categories, reference)
}
