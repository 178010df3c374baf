mod schema;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::models::{ExpenseEntry, YearMonth};

/// The local expense ledger and monthly budgets.
///
/// Opened once at startup and lent to the engine and the UI; nothing else
/// holds a connection.
pub(crate) struct Ledger {
    conn: Connection,
}

impl Ledger {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let ledger = Self { conn };
        ledger.ensure_schema().context("Database migration failed")?;
        info!(path = %path.display(), "ledger opened");
        Ok(ledger)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let ledger = Self { conn };
        ledger.ensure_schema()?;
        Ok(ledger)
    }

    /// Close the underlying handle, surfacing any error SQLite reports.
    pub(crate) fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close database")
    }

    /// Create both tables if absent and bring the schema to the current
    /// version. Safe to call any number of times.
    pub(crate) fn ensure_schema(&self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        // Also covers stores created before versioning: their tables already
        // exist and are left untouched.
        self.conn.execute_batch(schema::SCHEMA_V1)?;
        if !has_version_table {
            self.conn
                .execute("INSERT INTO schema_version (version) VALUES (1)", [])?;
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(1);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                debug!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            info!(
                from = current,
                to = schema::CURRENT_VERSION,
                "schema migrated"
            );
        }

        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    /// Append a row. Existing rows for the same date are never merged.
    pub(crate) fn record_expense(&self, date: NaiveDate, amount: i64) -> Result<i64> {
        anyhow::ensure!(amount >= 0, "Refusing to record negative amount {amount}");
        self.conn.execute(
            "INSERT INTO expenses (date, amount) VALUES (?1, ?2)",
            params![date, amount],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, %date, amount, "expense recorded");
        Ok(id)
    }

    pub(crate) fn expenses_for_date(&self, date: NaiveDate) -> Result<Vec<ExpenseEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, date, amount FROM expenses WHERE date = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![date], |row| {
            Ok(ExpenseEntry {
                id: row.get(0)?,
                date: row.get(1)?,
                amount: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn sum_for_date(&self, date: NaiveDate) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE date = ?1",
            params![date],
            |row| row.get(0),
        )?)
    }

    /// Total over the inclusive range from the first to the true last day of
    /// `month`.
    pub(crate) fn sum_for_month(&self, month: YearMonth) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE date BETWEEN ?1 AND ?2",
            params![month.first_day(), month.last_day()],
            |row| row.get(0),
        )?)
    }

    pub(crate) fn sums_by_date_for_month(&self, month: YearMonth) -> Result<BTreeMap<NaiveDate, i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, SUM(amount) FROM expenses
             WHERE date BETWEEN ?1 AND ?2
             GROUP BY date
             ORDER BY date",
        )?;
        let rows = stmt.query_map(params![month.first_day(), month.last_day()], |row| {
            Ok((row.get::<_, NaiveDate>(0)?, row.get::<_, i64>(1)?))
        })?;
        Ok(rows.collect::<std::result::Result<BTreeMap<_, _>, _>>()?)
    }

    pub(crate) fn expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    /// Remove every row for `date`. Returns how many rows were deleted; zero is
    /// not an error.
    pub(crate) fn delete_expenses_for_date(&self, date: NaiveDate) -> Result<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM expenses WHERE date = ?1", params![date])?;
        debug!(%date, deleted, "expenses deleted for date");
        Ok(deleted)
    }

    pub(crate) fn delete_all_expenses(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM expenses", [])?;
        info!(deleted, "all expenses deleted");
        Ok(deleted)
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Insert or replace the single budget row for `month`.
    pub(crate) fn upsert_budget(&self, month: YearMonth, amount: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO monthly_budgets (year_month, amount)
             VALUES (?1, ?2)
             ON CONFLICT(year_month) DO UPDATE SET amount = excluded.amount",
            params![month.to_string(), amount],
        )?;
        debug!(%month, amount, "budget upserted");
        Ok(())
    }

    /// `None` when no budget was ever set for `month`.
    pub(crate) fn get_budget(&self, month: YearMonth) -> Result<Option<i64>> {
        Ok(self
            .conn
            .query_row(
                "SELECT amount FROM monthly_budgets WHERE year_month = ?1",
                params![month.to_string()],
                |row| row.get(0),
            )
            .optional()?)
    }

    #[cfg(test)]
    pub(crate) fn budget_row_count(&self, month: YearMonth) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM monthly_budgets WHERE year_month = ?1",
            params![month.to_string()],
            |row| row.get(0),
        )?)
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }
}

#[cfg(test)]
mod tests;
