use chrono::{Datelike, Days, NaiveDate};

use crate::engine::PeriodEvent;
use crate::models::YearMonth;

/// Format whole yen with thousand separators.
/// e.g. `1234567` → `"¥1,234,567"`, `-500` → `"-¥500"`
pub(crate) fn format_yen(val: i64) -> String {
    let digits = val.unsigned_abs().to_string();
    let with_commas: String = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < 0 {
        format!("-¥{with_commas}")
    } else {
        format!("¥{with_commas}")
    }
}

/// Short form for a calendar cell: `"¥980"`, `"¥4.5k"`, `"¥12k"`, `"¥1.2M"`.
pub(crate) fn format_yen_compact(val: i64) -> String {
    let sign = if val < 0 { "-" } else { "" };
    let abs = val.unsigned_abs();
    match abs {
        0..=999 => format!("{sign}¥{abs}"),
        1_000..=9_999 => {
            let tenths = abs / 100;
            if tenths % 10 == 0 {
                format!("{sign}¥{}k", tenths / 10)
            } else {
                format!("{sign}¥{}.{}k", tenths / 10, tenths % 10)
            }
        }
        10_000..=999_999 => format!("{sign}¥{}k", abs / 1_000),
        _ => {
            let tenths = abs / 100_000;
            format!("{sign}¥{}.{}M", tenths / 10, tenths % 10)
        }
    }
}

/// Weeks of `month` as Sunday-first rows. Days outside the month are `None`.
pub(crate) fn month_grid(month: YearMonth) -> Vec<[Option<NaiveDate>; 7]> {
    let first = month.first_day();
    let lead = first.weekday().num_days_from_sunday() as usize;
    let days = month.days_in_month() as usize;

    let mut weeks = Vec::with_capacity((lead + days).div_ceil(7));
    let mut week = [None; 7];
    for offset in 0..days {
        let slot = (lead + offset) % 7;
        week[slot] = Some(first + Days::new(offset as u64));
        if slot == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

/// Keep the same day number when jumping to another month, clamped to its
/// last day.
pub(crate) fn same_day_in(month: YearMonth, day: NaiveDate) -> NaiveDate {
    let offset = day.day().min(month.days_in_month()) - 1;
    month.first_day() + Days::new(u64::from(offset))
}

/// One-line description of an engine event, for the status bar and the CLI.
pub(crate) fn event_message(event: &PeriodEvent) -> String {
    match event {
        PeriodEvent::MonthChanged { month } => format!("Viewing {month}"),
        PeriodEvent::BudgetChanged { month, amount } => {
            format!("Budget for {month} set to {}", format_yen(*amount))
        }
        PeriodEvent::ExpenseRecorded {
            date,
            amount,
            day_total,
        } => format!(
            "Recorded {} on {date} (day total {})",
            format_yen(*amount),
            format_yen(*day_total)
        ),
        PeriodEvent::ExpenseDeleted { date, removed } => {
            format!("Deleted {removed} entries for {date}")
        }
        PeriodEvent::AllExpensesDeleted { removed } => {
            format!("Deleted all {removed} entries")
        }
    }
}
