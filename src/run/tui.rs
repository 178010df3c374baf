use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::Ledger;
use crate::engine::PeriodEngine;
use crate::models::parse_expense_amount;
use crate::ui::app::{App, InputMode, PendingAction};
use crate::ui::commands;

const DATE_CHECK_INTERVAL: Duration = Duration::from_secs(30);

pub(crate) fn as_tui(ledger: &Ledger, config: &Config, today: NaiveDate) -> Result<()> {
    let engine = PeriodEngine::new(ledger, today, config.engine)?;
    let mut app = App::new(engine)?;
    info!(month = %app.month(), "starting calendar");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App<'_>) -> Result<()> {
    while app.running {
        app.sync_today(Local::now().date_naive())?;
        terminal.draw(|f| crate::ui::render::render(f, app))?;

        // Wake up periodically so the date rolls over without a key press.
        if !event::poll(DATE_CHECK_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Entry => handle_entry_input(key, app)?,
                InputMode::Confirm => handle_confirm_input(key, app)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App<'_>) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
            app.running = false;
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(-1)?,
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(1)?,
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-7)?,
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(7)?,
        KeyCode::Char('H') | KeyCode::PageUp => app.step_month(false)?,
        KeyCode::Char('L') | KeyCode::PageDown => app.step_month(true)?,
        KeyCode::Char('t') => app.go_to_today()?,
        KeyCode::Enter => app.open_day()?,
        KeyCode::Char('d') => {
            if app.engine.view().marked_dates.contains_key(&app.cursor) {
                app.ask_confirm(PendingAction::DeleteDay { date: app.cursor });
            } else {
                app.set_status(format!("Nothing recorded on {}", app.cursor));
            }
        }
        KeyCode::Esc => app.set_status(""),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App<'_>) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_entry_input(key: event::KeyEvent, app: &mut App<'_>) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
            app.running = false;
        }
        return Ok(());
    }

    // Typing only applies while the dialog shows an amount field.
    if let Some(input) = app.entry.input_mut() {
        match key.code {
            KeyCode::Char(c) if !c.is_control() => {
                input.push(c);
                return Ok(());
            }
            KeyCode::Backspace => {
                input.pop();
                return Ok(());
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Enter => {
            if !app.entry.can_confirm() {
                let reason = match app.entry.input() {
                    Some(input) if !input.trim().is_empty() => parse_expense_amount(input)
                        .err()
                        .map(|e| e.to_string()),
                    _ => None,
                };
                app.set_status(reason.unwrap_or_else(|| "Type an amount first".into()));
                return Ok(());
            }
            if let Err(e) = app.entry.confirm(&mut app.engine) {
                return app.report(e);
            }
            app.apply_events()?;
        }
        KeyCode::Char('a') => app.entry.begin_add(),
        KeyCode::Char('d') => {
            if let Some(date) = app.entry.date() {
                app.ask_confirm(PendingAction::DeleteDay { date });
            }
        }
        KeyCode::Esc => app.close_day(),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App<'_>) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                debug!(?action, "confirmed");
                match action {
                    PendingAction::DeleteDay { date } => {
                        if app.entry.date() == Some(date) {
                            app.entry.delete(&mut app.engine)?;
                        } else {
                            app.engine.delete_expenses(date)?;
                        }
                    }
                    PendingAction::DeleteAll => app.engine.delete_all_expenses()?,
                }
                app.apply_events()?;
            }
            app.input_mode = app.resting_mode();
            app.confirm_message.clear();
        }
        _ => {
            app.pending_action = None;
            app.input_mode = app.resting_mode();
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}
