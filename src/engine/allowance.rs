use chrono::{Datelike, NaiveDate};

use crate::models::YearMonth;

/// Days the monthly budget is spread over.
///
/// For the month containing `today` this is the days remaining, today
/// included. Any other month, past or future, uses its full length. Never
/// less than 1.
pub(crate) fn allowance_denominator(month: YearMonth, today: NaiveDate) -> i64 {
    let days = i64::from(month.days_in_month());
    let remaining = if month.contains(today) {
        days - i64::from(today.day()) + 1
    } else {
        days
    };
    remaining.max(1)
}

/// Per-day spending ceiling, truncated toward zero.
pub(crate) fn daily_allowance(month: YearMonth, budget: i64, today: NaiveDate) -> i64 {
    budget / allowance_denominator(month, today)
}
