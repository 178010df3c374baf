use chrono::NaiveDate;
use thiserror::Error;

/// Rejected user input. Never coerced into a default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    #[error("Amount is empty")]
    EmptyAmount,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero")]
    ZeroAmount,
    #[error("Amount is too large: {0} (maximum ¥1,000,000,000,000)")]
    AmountTooLarge(String),
    #[error("Total for {0} would exceed the largest amount that can be stored")]
    TotalOverflow(String),
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),
    #[error("Cannot record expenses for a past date: {0}")]
    PastDate(NaiveDate),
}
