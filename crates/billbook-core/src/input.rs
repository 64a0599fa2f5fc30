//! Parsing of user-typed values before they reach the ledger service.

use billbook_domain::BillDate;

use crate::{CoreError, CoreResult};

/// Parses a typed amount, rejecting text that is not a finite number.
pub fn parse_amount(text: &str) -> CoreResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoreError::Validation(format!(
            "amount `{trimmed}` is not a number"
        ))),
    }
}

/// Parses `DD/MM/YYYY`, or the literal `today`.
pub fn parse_date(text: &str) -> CoreResult<BillDate> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(BillDate::today());
    }
    Ok(BillDate::parse(trimmed)?)
}
