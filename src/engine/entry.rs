use anyhow::Result;
use chrono::NaiveDate;

use super::PeriodEngine;
use crate::db::Ledger;
use crate::models::{parse_expense_amount, ExpenseEntry};

/// The day dialog. Amounts are only ever appended; an existing day can be
/// added to or cleared, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum DayEntry {
    #[default]
    NoSelection,
    /// Nothing recorded yet for `date`; the user types the first amount.
    Selected { date: NaiveDate, input: String },
    ViewingExisting {
        date: NaiveDate,
        total: i64,
        entries: Vec<ExpenseEntry>,
    },
    AddingAmount {
        date: NaiveDate,
        total: i64,
        input: String,
    },
}

impl DayEntry {
    /// Open the dialog for `date`.
    pub(crate) fn select(engine: &PeriodEngine<'_>, date: NaiveDate) -> Result<Self> {
        engine.check_entry_date(date)?;
        Self::load(engine.ledger(), date)
    }

    fn load(ledger: &Ledger, date: NaiveDate) -> Result<Self> {
        let entries = ledger.expenses_for_date(date)?;
        if entries.is_empty() {
            return Ok(Self::Selected {
                date,
                input: String::new(),
            });
        }
        let total = entries.iter().map(|e| e.amount).sum();
        Ok(Self::ViewingExisting {
            date,
            total,
            entries,
        })
    }

    pub(crate) fn is_open(&self) -> bool {
        !matches!(self, Self::NoSelection)
    }

    pub(crate) fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::NoSelection => None,
            Self::Selected { date, .. }
            | Self::ViewingExisting { date, .. }
            | Self::AddingAmount { date, .. } => Some(*date),
        }
    }

    /// The amount being typed, when the dialog is accepting one.
    pub(crate) fn input(&self) -> Option<&str> {
        match self {
            Self::Selected { input, .. } | Self::AddingAmount { input, .. } => Some(input.as_str()),
            _ => None,
        }
    }

    pub(crate) fn input_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Selected { input, .. } | Self::AddingAmount { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Saving is disabled until the typed amount is acceptable.
    pub(crate) fn can_confirm(&self) -> bool {
        self.input()
            .is_some_and(|input| parse_expense_amount(input).is_ok())
    }

    pub(crate) fn begin_add(&mut self) {
        if let Self::ViewingExisting { date, total, .. } = self {
            *self = Self::AddingAmount {
                date: *date,
                total: *total,
                input: String::new(),
            };
        }
    }

    /// Record the typed amount as a new row and show the updated day.
    pub(crate) fn confirm(&mut self, engine: &mut PeriodEngine<'_>) -> Result<()> {
        let (date, input) = match self {
            Self::Selected { date, input } | Self::AddingAmount { date, input, .. } => {
                (*date, input.as_str())
            }
            _ => return Ok(()),
        };
        let amount = parse_expense_amount(input)?;
        engine.record_expense(date, amount)?;
        *self = Self::load(engine.ledger(), date)?;
        Ok(())
    }

    /// Remove everything recorded for the selected day.
    pub(crate) fn delete(&mut self, engine: &mut PeriodEngine<'_>) -> Result<()> {
        let date = match self {
            Self::ViewingExisting { date, .. } | Self::AddingAmount { date, .. } => *date,
            _ => return Ok(()),
        };
        engine.delete_expenses(date)?;
        *self = Self::Selected {
            date,
            input: String::new(),
        };
        Ok(())
    }

    pub(crate) fn dismiss(&mut self) {
        *self = Self::NoSelection;
    }
}
