use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use super::allowance::daily_allowance;
use crate::db::Ledger;
use crate::models::{MonthlyBudget, YearMonth};

/// A calendar cell annotated with what was spent that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MarkedDate {
    pub(crate) total: i64,
    pub(crate) over_budget: bool,
}

impl MarkedDate {
    pub(crate) fn display_text(&self) -> String {
        format!("{}円", self.total)
    }
}

/// Mark every date with a nonzero total. Dates without spending are absent.
pub(crate) fn compute_marked_dates(
    sums: &BTreeMap<NaiveDate, i64>,
    allowance: i64,
) -> BTreeMap<NaiveDate, MarkedDate> {
    sums.iter()
        .filter(|(_, total)| **total != 0)
        .map(|(date, total)| {
            (
                *date,
                MarkedDate {
                    total: *total,
                    over_budget: *total > allowance,
                },
            )
        })
        .collect()
}

/// Everything the presentation layer shows for one month. Recomputed from the
/// ledger, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PeriodView {
    pub(crate) budget: MonthlyBudget,
    /// True when no budget row exists and the configured fallback is shown.
    pub(crate) budget_is_default: bool,
    pub(crate) monthly_total: i64,
    pub(crate) daily_allowance: i64,
    pub(crate) marked_dates: BTreeMap<NaiveDate, MarkedDate>,
}

impl PeriodView {
    pub(crate) fn load(
        ledger: &Ledger,
        month: YearMonth,
        today: NaiveDate,
        default_budget: i64,
    ) -> Result<Self> {
        let stored = ledger.get_budget(month)?;
        let budget = MonthlyBudget::or_default(month, stored, default_budget);
        let monthly_total = ledger.sum_for_month(month)?;
        let daily_allowance = daily_allowance(month, budget.amount, today);
        let sums = ledger.sums_by_date_for_month(month)?;
        let marked_dates = compute_marked_dates(&sums, daily_allowance);

        debug!(
            %month,
            budget = budget.amount,
            monthly_total,
            daily_allowance,
            marked = marked_dates.len(),
            "period recomputed"
        );

        Ok(Self {
            budget,
            budget_is_default: stored.is_none(),
            monthly_total,
            daily_allowance,
            marked_dates,
        })
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.budget.year_month
    }

    pub(crate) fn balance(&self) -> i64 {
        self.budget.amount - self.monthly_total
    }
}
