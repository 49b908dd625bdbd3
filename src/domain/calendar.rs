//! Month arithmetic for decision cutoffs and fetch windows.

use chrono::{Datelike, Months, NaiveDate};

/// First day of the month containing `date`.
pub fn period_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Earliest date whose data is needed to evaluate `lookback` periods of
/// momentum as of `decision_date`: `lookback + 1` months earlier.
pub fn required_start_date(decision_date: NaiveDate, lookback: usize) -> NaiveDate {
    let months = u32::try_from(lookback.saturating_add(1)).unwrap_or(u32::MAX);
    decision_date
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
