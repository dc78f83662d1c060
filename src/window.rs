//! Calendar-month partitioning of a transaction set.
//!
//! Every window is an inclusive `[start, end]` pair of calendar dates. All
//! functions take the reference date explicitly; callers capture "today" once
//! (see [`reference_today`]) and thread the same value through every window
//! of a single view so that no transaction can land in one window's filter
//! and miss another's.

use crate::error::{AnalyticsError, Result};
use crate::schema::Transaction;
use crate::utils::{last_day_of_month, month_start_before};
use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Result<Self> {
        month_bounds(date, 0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }
}

/// Today's date on the local clock. Call once per derived view.
pub fn reference_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Inclusive bounds of the calendar month `months_ago` months before the month
/// containing `reference`. `months_ago = 0` is the reference month itself.
pub fn month_bounds(reference: NaiveDate, months_ago: u32) -> Result<DateWindow> {
    let start = month_start_before(reference, months_ago)?;
    let end = last_day_of_month(start.year(), start.month())?;
    Ok(DateWindow { start, end })
}

/// Transactions dated inside `window`, in their original relative order.
pub fn filter_by_window<'a, I>(transactions: I, window: &DateWindow) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| window.contains(t.date))
        .collect()
}

/// `count` consecutive month windows ending with the reference month, oldest first.
pub fn trailing_months(reference: NaiveDate, count: u32) -> Result<Vec<DateWindow>> {
    if count == 0 {
        return Err(AnalyticsError::InvalidMonthCount(count));
    }

    let windows = (0..count)
        .rev()
        .map(|months_ago| month_bounds(reference, months_ago))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Trailing window of {} months: {} .. {}",
        count, windows[0].start, windows[windows.len() - 1].end
    );

    Ok(windows)
}
