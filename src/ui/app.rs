use anyhow::Result;
use chrono::{Days, NaiveDate};

use crate::engine::{DayEntry, PeriodEngine};
use crate::error::InputError;
use crate::models::YearMonth;
use crate::ui::util::{event_message, same_day_in};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Entry,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Entry => write!(f, "ENTRY"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteDay { date: NaiveDate },
    DeleteAll,
}

pub(crate) struct App<'l> {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) engine: PeriodEngine<'l>,
    /// Highlighted calendar cell; always inside the viewed month.
    pub(crate) cursor: NaiveDate,
    pub(crate) entry: DayEntry,
    pub(crate) expense_count: i64,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,
}

impl<'l> App<'l> {
    pub(crate) fn new(engine: PeriodEngine<'l>) -> Result<Self> {
        let month = engine.month();
        let today = engine.today();
        let cursor = if month.contains(today) {
            today
        } else {
            month.first_day()
        };
        let expense_count = engine.ledger().expense_count()?;

        Ok(Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            engine,
            cursor,
            entry: DayEntry::NoSelection,
            expense_count,

            pending_action: None,
            confirm_message: String::new(),
        })
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.engine.month()
    }

    /// Pull queued engine events into the status line.
    pub(crate) fn apply_events(&mut self) -> Result<()> {
        let events = self.engine.drain_events();
        if let Some(last) = events.last() {
            self.set_status(event_message(last));
            self.expense_count = self.engine.ledger().expense_count()?;
        }
        Ok(())
    }

    /// Move the cursor by `days`, following it into the adjacent month.
    pub(crate) fn move_cursor(&mut self, days: i64) -> Result<()> {
        let step = Days::new(days.unsigned_abs());
        let target = if days < 0 {
            self.cursor.checked_sub_days(step)
        } else {
            self.cursor.checked_add_days(step)
        };
        let Some(target) = target else {
            return Ok(());
        };
        let month = YearMonth::of(target);
        if month != self.month() {
            self.engine.change_month(month)?;
            self.apply_events()?;
        }
        self.cursor = target;
        Ok(())
    }

    pub(crate) fn show_month(&mut self, month: YearMonth) -> Result<()> {
        self.engine.change_month(month)?;
        self.cursor = same_day_in(month, self.cursor);
        self.apply_events()
    }

    /// Step one month forward or back, keeping the cursor's day number.
    pub(crate) fn step_month(&mut self, forward: bool) -> Result<()> {
        if forward {
            self.engine.next_month()?;
        } else {
            self.engine.prev_month()?;
        }
        self.cursor = same_day_in(self.month(), self.cursor);
        self.apply_events()
    }

    /// Pick up a new calendar date while the session stays open.
    pub(crate) fn sync_today(&mut self, today: NaiveDate) -> Result<()> {
        if self.engine.set_today(today)? {
            self.set_status(format!("Today is {today}"));
        }
        Ok(())
    }

    pub(crate) fn go_to_today(&mut self) -> Result<()> {
        self.engine.go_to_today()?;
        self.cursor = self.engine.today();
        self.apply_events()
    }

    pub(crate) fn open_day(&mut self) -> Result<()> {
        match DayEntry::select(&self.engine, self.cursor) {
            Ok(entry) => {
                self.entry = entry;
                self.input_mode = InputMode::Entry;
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    pub(crate) fn close_day(&mut self) {
        self.entry.dismiss();
        self.input_mode = InputMode::Normal;
    }

    /// The mode to return to once a prompt is finished.
    pub(crate) fn resting_mode(&self) -> InputMode {
        if self.entry.is_open() {
            InputMode::Entry
        } else {
            InputMode::Normal
        }
    }

    pub(crate) fn ask_confirm(&mut self, action: PendingAction) {
        self.confirm_message = match &action {
            PendingAction::DeleteDay { date } => format!("Delete all entries for {date}?"),
            PendingAction::DeleteAll => "Delete ALL recorded expenses? This cannot be undone.".into(),
        };
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    /// Rejected input becomes a status message; anything else is fatal.
    pub(crate) fn report(&mut self, err: anyhow::Error) -> Result<()> {
        match err.downcast_ref::<InputError>() {
            Some(input) => {
                self.set_status(input.to_string());
                Ok(())
            }
            None => Err(err),
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
