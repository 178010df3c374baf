use chrono::NaiveDate;

/// One row of the append-only ledger. Rows are never edited in place; adding
/// to a day inserts another row for the same date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: i64,
}
