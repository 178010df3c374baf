use super::YearMonth;

/// Budget used for any month without a stored row.
pub const DEFAULT_MONTHLY_BUDGET: i64 = 135_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBudget {
    pub year_month: YearMonth,
    pub amount: i64,
}

impl MonthlyBudget {
    pub fn new(year_month: YearMonth, amount: i64) -> Self {
        Self { year_month, amount }
    }

    /// The stored budget for `year_month`, or `default` when none was set.
    pub fn or_default(year_month: YearMonth, stored: Option<i64>, default: i64) -> Self {
        Self::new(year_month, stored.unwrap_or(default))
    }
}
