use crate::error::{AnalyticsError, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt::Write;

pub fn first_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        AnalyticsError::DateError(format!("No such month: {:04}-{:02}", year, month))
    })
}

pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    first_day_of_month(year, month)?
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .ok_or_else(|| {
            AnalyticsError::DateError(format!(
                "Cannot compute end of month {:04}-{:02}",
                year, month
            ))
        })
}

/// First day of the calendar month `months_ago` months before the month containing `date`.
pub fn month_start_before(date: NaiveDate, months_ago: u32) -> Result<NaiveDate> {
    first_day_of_month(date.year(), date.month())?
        .checked_sub_months(Months::new(months_ago))
        .ok_or_else(|| {
            AnalyticsError::DateError(format!(
                "Cannot step {} months back from {}",
                months_ago, date
            ))
        })
}

/// `(year, month)` pair identifying the calendar month a date falls in.
pub fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Checks that a chrono format string renders on a plain date. Unknown
/// specifiers and time or offset fields (`%H`, `%z`, ...) are rejected, since
/// rendering them on a `NaiveDate` panics inside `to_string`.
pub fn validate_label_format(format: &str) -> Result<()> {
    if format.trim().is_empty() {
        return Err(AnalyticsError::InvalidConfig(
            "Month label format must not be empty".to_string(),
        ));
    }

    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDate::default().format(format)).map_err(|_| {
        AnalyticsError::InvalidConfig(format!(
            "Month label format '{}' cannot be rendered on a calendar date",
            format
        ))
    })
}

pub fn format_month_label(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}
