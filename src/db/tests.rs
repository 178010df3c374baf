#![allow(clippy::unwrap_used)]

use super::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn month(s: &str) -> YearMonth {
    YearMonth::parse(s).unwrap()
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_ensure_schema_is_idempotent() {
    let ledger = Ledger::open_in_memory().unwrap();
    ledger.record_expense(date("2025-06-03"), 500).unwrap();
    ledger.ensure_schema().unwrap();
    ledger.ensure_schema().unwrap();
    assert_eq!(ledger.sum_for_date(date("2025-06-03")).unwrap(), 500);
    assert_eq!(ledger.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_unversioned_store_is_adopted() {
    // A store created by an older build: tables exist, no version bookkeeping.
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE expenses (id INTEGER PRIMARY KEY AUTOINCREMENT, date TEXT NOT NULL, amount INTEGER NOT NULL);
         INSERT INTO expenses (date, amount) VALUES ('2025-05-10', 1200);",
    )
    .unwrap();
    let ledger = Ledger { conn };
    ledger.ensure_schema().unwrap();

    assert_eq!(ledger.sum_for_date(date("2025-05-10")).unwrap(), 1200);
    assert_eq!(ledger.get_budget(month("2025-05")).unwrap(), None);
    assert_eq!(ledger.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budgetcal.db");

    let ledger = Ledger::open(&path).unwrap();
    ledger.record_expense(date("2025-06-03"), 5000).unwrap();
    ledger.upsert_budget(month("2025-06"), 120_000).unwrap();
    ledger.close().unwrap();

    let reopened = Ledger::open(&path).unwrap();
    assert_eq!(reopened.sum_for_date(date("2025-06-03")).unwrap(), 5000);
    assert_eq!(reopened.get_budget(month("2025-06")).unwrap(), Some(120_000));
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_sum_for_date_empty_is_zero() {
    let ledger = Ledger::open_in_memory().unwrap();
    assert_eq!(ledger.sum_for_date(date("2025-06-03")).unwrap(), 0);
}

#[test]
fn test_record_appends_rather_than_merges() {
    let ledger = Ledger::open_in_memory().unwrap();
    let first = ledger.record_expense(date("2025-06-03"), 5000).unwrap();
    let second = ledger.record_expense(date("2025-06-03"), 2000).unwrap();
    assert!(second > first);

    assert_eq!(ledger.sum_for_date(date("2025-06-03")).unwrap(), 7000);
    let rows = ledger.expenses_for_date(date("2025-06-03")).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].amount, 5000);
    assert_eq!(rows[1].amount, 2000);
    assert!(rows.iter().all(|r| r.date == date("2025-06-03")));
}

#[test]
fn test_sum_for_date_matches_recorded_amounts() {
    let ledger = Ledger::open_in_memory().unwrap();
    let amounts = [1, 250, 0, 9_999, 42, 130_000];
    for amount in amounts {
        ledger.record_expense(date("2025-01-31"), amount).unwrap();
    }
    ledger.record_expense(date("2025-02-01"), 777).unwrap();

    assert_eq!(
        ledger.sum_for_date(date("2025-01-31")).unwrap(),
        amounts.iter().sum::<i64>()
    );
}

#[test]
fn test_record_rejects_negative() {
    let ledger = Ledger::open_in_memory().unwrap();
    assert!(ledger.record_expense(date("2025-06-03"), -1).is_err());
    assert_eq!(ledger.expense_count().unwrap(), 0);
}

#[test]
fn test_sum_for_month_uses_true_last_day() {
    let ledger = Ledger::open_in_memory().unwrap();
    ledger.record_expense(date("2025-02-01"), 100).unwrap();
    ledger.record_expense(date("2025-03-01"), 999).unwrap();

    assert_eq!(ledger.sum_for_month(month("2025-02")).unwrap(), 100);
    assert_eq!(ledger.sum_for_month(month("2025-03")).unwrap(), 999);
}

#[test]
fn test_sum_for_month_inclusive_bounds() {
    let ledger = Ledger::open_in_memory().unwrap();
    ledger.record_expense(date("2024-01-31"), 1).unwrap();
    ledger.record_expense(date("2024-02-01"), 10).unwrap();
    ledger.record_expense(date("2024-02-29"), 100).unwrap();
    ledger.record_expense(date("2024-03-01"), 1000).unwrap();

    assert_eq!(ledger.sum_for_month(month("2024-02")).unwrap(), 110);
}

#[test]
fn test_sum_for_month_empty_is_zero() {
    let ledger = Ledger::open_in_memory().unwrap();
    assert_eq!(ledger.sum_for_month(month("2025-06")).unwrap(), 0);
}

#[test]
fn test_sums_by_date_for_month() {
    let ledger = Ledger::open_in_memory().unwrap();
    ledger.record_expense(date("2025-06-03"), 5000).unwrap();
    ledger.record_expense(date("2025-06-03"), 2000).unwrap();
    ledger.record_expense(date("2025-06-30"), 300).unwrap();
    ledger.record_expense(date("2025-05-31"), 50).unwrap();
    ledger.record_expense(date("2025-07-01"), 60).unwrap();

    let sums = ledger.sums_by_date_for_month(month("2025-06")).unwrap();
    assert_eq!(sums.len(), 2);
    assert_eq!(sums[&date("2025-06-03")], 7000);
    assert_eq!(sums[&date("2025-06-30")], 300);
}

#[test]
fn test_delete_expenses_for_date() {
    let ledger = Ledger::open_in_memory().unwrap();
    ledger.record_expense(date("2025-06-03"), 5000).unwrap();
    ledger.record_expense(date("2025-06-03"), 2000).unwrap();
    ledger.record_expense(date("2025-06-04"), 800).unwrap();

    assert_eq!(ledger.delete_expenses_for_date(date("2025-06-03")).unwrap(), 2);
    assert_eq!(ledger.sum_for_date(date("2025-06-03")).unwrap(), 0);
    assert_eq!(ledger.sum_for_date(date("2025-06-04")).unwrap(), 800);
}

#[test]
fn test_delete_expenses_for_empty_date_is_noop() {
    let ledger = Ledger::open_in_memory().unwrap();
    assert_eq!(ledger.delete_expenses_for_date(date("2025-06-03")).unwrap(), 0);
    assert_eq!(ledger.sum_for_date(date("2025-06-03")).unwrap(), 0);
}

#[test]
fn test_delete_all_expenses() {
    let ledger = Ledger::open_in_memory().unwrap();
    ledger.record_expense(date("2024-12-24"), 3000).unwrap();
    ledger.record_expense(date("2025-02-14"), 1500).unwrap();
    ledger.record_expense(date("2025-06-03"), 5000).unwrap();

    assert_eq!(ledger.delete_all_expenses().unwrap(), 3);
    assert_eq!(ledger.expense_count().unwrap(), 0);
    for m in ["2024-12", "2025-02", "2025-06"] {
        assert_eq!(ledger.sum_for_month(month(m)).unwrap(), 0);
    }
}

#[test]
fn test_delete_all_keeps_budgets() {
    let ledger = Ledger::open_in_memory().unwrap();
    ledger.upsert_budget(month("2025-06"), 80_000).unwrap();
    ledger.record_expense(date("2025-06-03"), 5000).unwrap();
    ledger.delete_all_expenses().unwrap();
    assert_eq!(ledger.get_budget(month("2025-06")).unwrap(), Some(80_000));
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_get_budget_absent() {
    let ledger = Ledger::open_in_memory().unwrap();
    assert_eq!(ledger.get_budget(month("2025-07")).unwrap(), None);
}

#[test]
fn test_upsert_budget_last_write_wins() {
    let ledger = Ledger::open_in_memory().unwrap();
    let ym = month("2025-07");
    ledger.upsert_budget(ym, 100_000).unwrap();
    ledger.upsert_budget(ym, 150_000).unwrap();

    assert_eq!(ledger.get_budget(ym).unwrap(), Some(150_000));
    assert_eq!(ledger.budget_row_count(ym).unwrap(), 1);
}

#[test]
fn test_budgets_are_per_month() {
    let ledger = Ledger::open_in_memory().unwrap();
    ledger.upsert_budget(month("2025-06"), 100_000).unwrap();
    ledger.upsert_budget(month("2025-07"), 90_000).unwrap();

    assert_eq!(ledger.get_budget(month("2025-06")).unwrap(), Some(100_000));
    assert_eq!(ledger.get_budget(month("2025-07")).unwrap(), Some(90_000));
    assert_eq!(ledger.get_budget(month("2025-08")).unwrap(), None);
}
