use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, PendingAction};
use crate::models::{parse_amount, YearMonth};
use crate::ui::util::format_yen;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App<'_>) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit BudgetCal", cmd_quit, r);
    register_command!("quit", "Quit BudgetCal", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "budget",
        "Set budget for the viewed month (e.g. :budget 135000)",
        cmd_budget,
        r
    );
    register_command!("b", "Set budget (e.g. :b 135000)", cmd_budget, r);
    register_command!("month", "Go to month (e.g. :month 2025-06)", cmd_month, r);
    register_command!("m", "Go to month (e.g. :m 6)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("today", "Jump to today", cmd_today, r);
    register_command!("t", "Jump to today", cmd_today, r);
    register_command!(
        "delete-day",
        "Delete all entries for the selected day",
        cmd_delete_day,
        r
    );
    register_command!(
        "delete-all",
        "Delete every recorded expense",
        cmd_delete_all,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app) {
            app.report(e)?;
        }
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    if args.is_empty() {
        let view = app.engine.view();
        let source = if view.budget_is_default { " (default)" } else { "" };
        let msg = format!(
            "Budget for {} is {}{source}. Usage: :budget <amount>",
            app.month(),
            format_yen(view.budget.amount),
        );
        app.set_status(msg);
        return Ok(());
    }

    let amount = parse_amount(args)?;
    app.engine.set_budget(amount)?;
    app.apply_events()
}

fn cmd_month(args: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :month <YYYY-MM> (or a month number in the viewed year)");
        return Ok(());
    }

    // Accept "2025-06", "2025-6", "06", "6"
    let month = if args.len() <= 2 {
        YearMonth::parse(&format!("{:04}-{args}", app.month().year()))?
    } else {
        YearMonth::parse(args)?
    };
    app.show_month(month)
}

fn cmd_next_month(_args: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    app.step_month(true)
}

fn cmd_prev_month(_args: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    app.step_month(false)
}

fn cmd_today(_args: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    app.go_to_today()
}

fn cmd_delete_day(_args: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    let date = app.entry.date().unwrap_or(app.cursor);
    if app.engine.view().marked_dates.contains_key(&date) {
        app.ask_confirm(PendingAction::DeleteDay { date });
    } else {
        app.set_status(format!("Nothing recorded for {date}"));
    }
    Ok(())
}

fn cmd_delete_all(_args: &str, app: &mut App<'_>) -> anyhow::Result<()> {
    if app.expense_count == 0 {
        app.set_status("No expenses recorded");
        return Ok(());
    }
    app.ask_confirm(PendingAction::DeleteAll);
    Ok(())
}
