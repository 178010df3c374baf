use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::InputError;

/// A calendar month, the natural key of a monthly budget.
/// Format: "YYYY-MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Accepts "2025-06" and "2025-6".
    pub fn parse(s: &str) -> Result<Self, InputError> {
        let invalid = || InputError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if y.len() != 4 || m.is_empty() || m.len() > 2 || !digits(y) || !digits(m) {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// The true last day of the month (28-31).
    pub fn last_day(&self) -> NaiveDate {
        // Years stop at 9999, so the following month always exists.
        let next = self.first + Months::new(1);
        next.pred_opt().unwrap_or(next)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first + Months::new(1),
        }
    }

    pub fn prev(&self) -> Self {
        Self {
            first: self.first - Months::new(1),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Parse an ISO "YYYY-MM-DD" date.
pub fn parse_date(s: &str) -> Result<NaiveDate, InputError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(InputError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(s.to_string()))
}
