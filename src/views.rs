use crate::breakdown::{breakdown_with_resolver, CategoryBreakdownEntry, CategoryResolver};
use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::filter::{recent_transactions, RecentTransaction};
use crate::schema::{Category, Transaction};
use crate::series::{build_series_with_format, MonthlyPoint};
use crate::summary::{summarize, MonthOverMonth, WindowSummary};
use crate::window::{filter_by_window, month_bounds, DateWindow};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub reference_date: NaiveDate,
    pub current_window: DateWindow,
    pub current: WindowSummary,
    pub previous: WindowSummary,
    pub changes: MonthOverMonth,
    pub breakdown: Vec<CategoryBreakdownEntry>,
    pub series: Vec<MonthlyPoint>,
    pub recent: Vec<RecentTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub reference_date: NaiveDate,
    pub current_window: DateWindow,
    pub current: WindowSummary,
    pub breakdown: Vec<CategoryBreakdownEntry>,
    pub series: Vec<MonthlyPoint>,
}

impl DashboardStats {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl AnalyticsStats {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Composes the partitioner and aggregators into the dashboard and analytics
/// views. Holds only its configuration; every call recomputes from its inputs.
///
/// The `reference` date passed to each view is used for every window of that
/// view. Capture it once, e.g. with [`crate::window::reference_today`].
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    fn resolver<'a>(&'a self, categories: &'a [Category]) -> CategoryResolver<'a> {
        CategoryResolver::with_fallback(
            categories,
            &self.config.fallback_category_name,
            &self.config.fallback_category_color,
        )
    }

    pub fn dashboard(
        &self,
        transactions: &[Transaction],
        categories: &[Category],
        reference: NaiveDate,
    ) -> Result<DashboardStats> {
        info!(
            "Computing dashboard for {} with {} transactions and {} categories",
            reference,
            transactions.len(),
            categories.len()
        );

        let resolver = self.resolver(categories);
        let current_window = month_bounds(reference, 0)?;
        let previous_window = month_bounds(reference, 1)?;

        let current_transactions = filter_by_window(transactions, &current_window);
        let previous_transactions = filter_by_window(transactions, &previous_window);
        debug!(
            "Current window {:?}: {} transactions, previous window {:?}: {}",
            current_window.bounds(),
            current_transactions.len(),
            previous_window.bounds(),
            previous_transactions.len()
        );

        let current = summarize(current_transactions.iter().copied())?;
        let previous = summarize(previous_transactions.iter().copied())?;
        let changes = MonthOverMonth::between(&current, &previous);

        let breakdown = breakdown_with_resolver(current_transactions.iter().copied(), &resolver)?;
        let series = build_series_with_format(
            transactions,
            reference,
            self.config.dashboard_months,
            &self.config.month_label_format,
        )?;
        let recent = recent_transactions(transactions, &resolver, self.config.recent_limit);

        Ok(DashboardStats {
            reference_date: reference,
            current_window,
            current,
            previous,
            changes,
            breakdown,
            series,
            recent,
        })
    }

    pub fn analytics(
        &self,
        transactions: &[Transaction],
        categories: &[Category],
        reference: NaiveDate,
    ) -> Result<AnalyticsStats> {
        self.analytics_with_months(
            transactions,
            categories,
            reference,
            self.config.analytics_months,
        )
    }

    /// Analytics view with a caller-chosen series length. `months` must be at
    /// least 1.
    pub fn analytics_with_months(
        &self,
        transactions: &[Transaction],
        categories: &[Category],
        reference: NaiveDate,
        months: u32,
    ) -> Result<AnalyticsStats> {
        info!(
            "Computing analytics for {} over {} months with {} transactions",
            reference,
            months,
            transactions.len()
        );

        let resolver = self.resolver(categories);
        let current_window = month_bounds(reference, 0)?;
        let current_transactions = filter_by_window(transactions, &current_window);

        let current = summarize(current_transactions.iter().copied())?;
        let breakdown = breakdown_with_resolver(current_transactions.iter().copied(), &resolver)?;
        let series = build_series_with_format(
            transactions,
            reference,
            months,
            &self.config.month_label_format,
        )?;

        Ok(AnalyticsStats {
            reference_date: reference,
            current_window,
            current,
            breakdown,
            series,
        })
    }
}
