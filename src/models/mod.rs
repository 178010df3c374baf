mod amount;
mod budget;
mod expense;
mod month;

pub use amount::{parse_amount, parse_expense_amount, MAX_AMOUNT};
pub use budget::{MonthlyBudget, DEFAULT_MONTHLY_BUDGET};
pub use expense::ExpenseEntry;
pub use month::{parse_date, YearMonth};
