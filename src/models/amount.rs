use crate::error::InputError;

/// Largest amount accepted for a single expense or a monthly budget.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Parse a whole-yen amount typed by the user.
///
/// Accepts surrounding whitespace, `,` grouping in threes, a leading `¥` and a
/// trailing `円`. Negative, fractional or oversized input is rejected.
pub fn parse_amount(input: &str) -> Result<i64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyAmount);
    }

    let stripped = trimmed.strip_prefix('¥').unwrap_or(trimmed);
    let stripped = stripped.strip_suffix('円').unwrap_or(stripped).trim();

    if !is_grouped_digits(stripped) {
        return Err(InputError::InvalidAmount(trimmed.to_string()));
    }

    let digits: String = stripped.chars().filter(|c| *c != ',').collect();
    match digits.parse::<i64>() {
        Ok(n) if n <= MAX_AMOUNT => Ok(n),
        _ => Err(InputError::AmountTooLarge(trimmed.to_string())),
    }
}

/// `1234` or `1,234`: ASCII digits, with any commas separating groups of three.
fn is_grouped_digits(s: &str) -> bool {
    let mut groups = s.split(',');
    let Some(head) = groups.next() else {
        return false;
    };
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(head) {
        return false;
    }
    let mut grouped = false;
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return false;
        }
        grouped = true;
    }
    !grouped || head.len() <= 3
}

/// Parse an expense amount, which must be strictly positive.
pub fn parse_expense_amount(input: &str) -> Result<i64, InputError> {
    match parse_amount(input)? {
        0 => Err(InputError::ZeroAmount),
        n => Ok(n),
    }
}
