//! Budget period derivation: daily allowance, marked dates and totals for the
//! month in view, recomputed from the ledger after every change.

mod allowance;
mod entry;
mod view;

pub(crate) use allowance::allowance_denominator;
pub(crate) use entry::DayEntry;
pub(crate) use view::{MarkedDate, PeriodView};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::db::Ledger;
use crate::error::InputError;
use crate::models::{YearMonth, DEFAULT_MONTHLY_BUDGET, MAX_AMOUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EngineSettings {
    pub(crate) default_budget: i64,
    pub(crate) allow_past_dates: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_budget: DEFAULT_MONTHLY_BUDGET,
            allow_past_dates: true,
        }
    }
}

/// Emitted after each change so the presentation layer can react without the
/// engine knowing how it renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PeriodEvent {
    MonthChanged { month: YearMonth },
    BudgetChanged { month: YearMonth, amount: i64 },
    ExpenseRecorded { date: NaiveDate, amount: i64, day_total: i64 },
    ExpenseDeleted { date: NaiveDate, removed: usize },
    AllExpensesDeleted { removed: usize },
}

pub(crate) struct PeriodEngine<'l> {
    ledger: &'l Ledger,
    settings: EngineSettings,
    today: NaiveDate,
    view: PeriodView,
    events: Vec<PeriodEvent>,
}

impl<'l> PeriodEngine<'l> {
    /// Starts on the month containing `today`.
    pub(crate) fn new(ledger: &'l Ledger, today: NaiveDate, settings: EngineSettings) -> Result<Self> {
        Self::with_month(ledger, YearMonth::of(today), today, settings)
    }

    pub(crate) fn with_month(
        ledger: &'l Ledger,
        month: YearMonth,
        today: NaiveDate,
        settings: EngineSettings,
    ) -> Result<Self> {
        let view = PeriodView::load(ledger, month, today, settings.default_budget)?;
        Ok(Self {
            ledger,
            settings,
            today,
            view,
            events: Vec::new(),
        })
    }

    pub(crate) fn ledger(&self) -> &'l Ledger {
        self.ledger
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.today
    }

    pub(crate) fn view(&self) -> &PeriodView {
        &self.view
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.view.month()
    }

    /// Rejects past dates unless the settings allow recording them.
    pub(crate) fn check_entry_date(&self, date: NaiveDate) -> Result<(), InputError> {
        if !self.settings.allow_past_dates && date < self.today {
            return Err(InputError::PastDate(date));
        }
        Ok(())
    }

    /// Advance the session's notion of today, e.g. after midnight passes.
    /// Returns whether the date changed.
    pub(crate) fn set_today(&mut self, today: NaiveDate) -> Result<bool> {
        if today == self.today {
            return Ok(false);
        }
        debug!(%today, "date rolled over");
        self.today = today;
        self.refresh()?;
        Ok(true)
    }

    pub(crate) fn refresh(&mut self) -> Result<()> {
        self.view = PeriodView::load(
            self.ledger,
            self.view.month(),
            self.today,
            self.settings.default_budget,
        )?;
        Ok(())
    }

    // ── Navigation ────────────────────────────────────────────

    pub(crate) fn change_month(&mut self, month: YearMonth) -> Result<()> {
        self.view = PeriodView::load(self.ledger, month, self.today, self.settings.default_budget)?;
        self.events.push(PeriodEvent::MonthChanged { month });
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<()> {
        self.change_month(self.month().next())
    }

    pub(crate) fn prev_month(&mut self) -> Result<()> {
        self.change_month(self.month().prev())
    }

    pub(crate) fn go_to_today(&mut self) -> Result<()> {
        self.change_month(YearMonth::of(self.today))
    }

    // ── Writes ────────────────────────────────────────────────

    /// Set the budget of the month currently in view.
    pub(crate) fn set_budget(&mut self, amount: i64) -> Result<()> {
        anyhow::ensure!(amount >= 0, "Budget cannot be negative: {amount}");
        if amount > MAX_AMOUNT {
            return Err(InputError::AmountTooLarge(amount.to_string()).into());
        }
        let month = self.month();
        self.ledger.upsert_budget(month, amount)?;
        info!(%month, amount, "budget set");
        self.refresh()?;
        self.events.push(PeriodEvent::BudgetChanged { month, amount });
        Ok(())
    }

    /// Append an expense. Refused before anything is written if the amount is
    /// out of range or the month's total would no longer fit in an `i64`.
    pub(crate) fn record_expense(&mut self, date: NaiveDate, amount: i64) -> Result<()> {
        if amount > MAX_AMOUNT {
            return Err(InputError::AmountTooLarge(amount.to_string()).into());
        }
        let month = YearMonth::of(date);
        if self.ledger.sum_for_month(month)?.checked_add(amount).is_none() {
            return Err(InputError::TotalOverflow(month.to_string()).into());
        }
        self.ledger.record_expense(date, amount)?;
        self.refresh()?;
        let day_total = self.ledger.sum_for_date(date)?;
        self.events.push(PeriodEvent::ExpenseRecorded {
            date,
            amount,
            day_total,
        });
        Ok(())
    }

    pub(crate) fn delete_expenses(&mut self, date: NaiveDate) -> Result<()> {
        let removed = self.ledger.delete_expenses_for_date(date)?;
        self.refresh()?;
        self.events.push(PeriodEvent::ExpenseDeleted { date, removed });
        Ok(())
    }

    pub(crate) fn delete_all_expenses(&mut self) -> Result<()> {
        let removed = self.ledger.delete_all_expenses()?;
        self.refresh()?;
        self.events.push(PeriodEvent::AllExpensesDeleted { removed });
        Ok(())
    }

    pub(crate) fn drain_events(&mut self) -> Vec<PeriodEvent> {
        std::mem::take(&mut self.events)
    }
}
