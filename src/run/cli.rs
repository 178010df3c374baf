use anyhow::Result;
use chrono::NaiveDate;

use crate::config::Config;
use crate::db::Ledger;
use crate::engine::{allowance_denominator, PeriodEngine};
use crate::models::{parse_amount, parse_date, parse_expense_amount, YearMonth};
use crate::ui::util::{event_message, format_yen};

pub(crate) fn as_cli(args: &[String], ledger: &Ledger, config: &Config, today: NaiveDate) -> Result<()> {
    let mut engine = PeriodEngine::new(ledger, today, config.engine)?;
    let result = match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], &mut engine),
        "day" | "d" => cli_day(&args[2..], ledger),
        "delete" => cli_delete(&args[2..], &mut engine),
        "delete-all" => cli_delete_all(&args[2..], &mut engine),
        "budget" | "b" => cli_budget(&args[2..], &mut engine),
        "summary" | "s" => cli_summary(&args[2..], &mut engine),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetcal {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    };

    for event in engine.drain_events() {
        println!("{}", event_message(&event));
    }
    result
}

fn print_usage() {
    println!("BudgetCal: monthly expense calendar");
    println!();
    println!("Usage: budgetcal [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch the interactive calendar");
    println!("  add <YYYY-MM-DD> <amount>     Record an expense");
    println!("  day <YYYY-MM-DD>              List expenses recorded on a day");
    println!("  delete <YYYY-MM-DD>           Delete every expense on a day");
    println!("  delete-all --yes              Delete every recorded expense");
    println!("  budget <amount>               Set the budget for the current month");
    println!("    --month <YYYY-MM>           Month to set (default: current)");
    println!("  summary [YYYY-MM]             Print the month's budget, spending and marked days");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_add(args: &[String], engine: &mut PeriodEngine<'_>) -> Result<()> {
    let [date, amount, ..] = args else {
        anyhow::bail!("Usage: budgetcal add <YYYY-MM-DD> <amount>");
    };
    let date = parse_date(date)?;
    let amount = parse_expense_amount(amount)?;
    engine.check_entry_date(date)?;
    engine.record_expense(date, amount)
}

fn cli_day(args: &[String], ledger: &Ledger) -> Result<()> {
    let Some(date) = args.first() else {
        anyhow::bail!("Usage: budgetcal day <YYYY-MM-DD>");
    };
    let date = parse_date(date)?;
    let entries = ledger.expenses_for_date(date)?;
    if entries.is_empty() {
        println!("Nothing recorded on {date}");
        return Ok(());
    }

    println!("{:<6} {:>12}", "ID", "Amount");
    println!("{}", "─".repeat(19));
    for e in &entries {
        println!("{:<6} {:>12}", e.id, format_yen(e.amount));
    }
    println!("{}", "─".repeat(19));
    println!("{:<6} {:>12}", "Total", format_yen(ledger.sum_for_date(date)?));
    Ok(())
}

fn cli_delete(args: &[String], engine: &mut PeriodEngine<'_>) -> Result<()> {
    let Some(date) = args.first() else {
        anyhow::bail!("Usage: budgetcal delete <YYYY-MM-DD>");
    };
    engine.delete_expenses(parse_date(date)?)
}

fn cli_delete_all(args: &[String], engine: &mut PeriodEngine<'_>) -> Result<()> {
    if !args.iter().any(|a| a == "--yes") {
        anyhow::bail!("Refusing to delete every expense without --yes");
    }
    engine.delete_all_expenses()
}

fn cli_budget(args: &[String], engine: &mut PeriodEngine<'_>) -> Result<()> {
    let Some(amount) = args.first().filter(|a| !a.starts_with('-')) else {
        anyhow::bail!("Usage: budgetcal budget <amount> [--month <YYYY-MM>]");
    };
    let amount = parse_amount(amount)?;

    // Parse --month flag
    let month = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .map(|w| YearMonth::parse(&w[1]))
        .transpose()?;
    if let Some(month) = month {
        engine.change_month(month)?;
    }
    engine.set_budget(amount)
}

fn cli_summary(args: &[String], engine: &mut PeriodEngine<'_>) -> Result<()> {
    if let Some(raw) = args.first().filter(|a| !a.starts_with('-')) {
        engine.change_month(YearMonth::parse(raw)?)?;
        // The month switch is implied by the heading below.
        engine.drain_events();
    }

    let month = engine.month();
    let view = engine.view();
    let days = allowance_denominator(month, engine.today());

    println!("BudgetCal: {month}");
    println!("{}", "─".repeat(40));
    println!(
        "  Budget:     {}{}",
        format_yen(view.budget.amount),
        if view.budget_is_default { " (default)" } else { "" }
    );
    println!("  Spent:      {}", format_yen(view.monthly_total));
    println!("  Balance:    {}", format_yen(view.balance()));
    println!(
        "  Daily:      {} (over {days} day{})",
        format_yen(view.daily_allowance),
        if days == 1 { "" } else { "s" }
    );

    if !view.marked_dates.is_empty() {
        println!();
        println!("Spending by Day:");
        for (date, mark) in &view.marked_dates {
            let flag = if mark.over_budget { "  over" } else { "" };
            println!("  {date}  {:>12}{flag}", mark.display_text());
        }
    }

    Ok(())
}
