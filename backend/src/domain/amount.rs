//! Validation of amounts typed into the member actions.

use koperasi_data::Rupiah;
use thiserror::Error;

/// Raised when an amount is not a positive whole number of rupiah.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("amount must be a positive whole number of rupiah, got '{input}'")]
pub struct InvalidAmount {
    /// The rejected input, as typed.
    pub input: String,
}

/// Parse a raw amount string.
///
/// Surrounding whitespace is ignored. Only plain ASCII digits are accepted:
/// fractional (`12.5`), exponent (`1e6`) and grouped (`1.000.000`) forms are
/// rejected instead of rounded, as are empty, negative and zero inputs.
///
/// # Examples
/// ```
/// use koperasi::domain::parse_amount;
/// use koperasi_data::Rupiah;
///
/// assert_eq!(parse_amount(" 1000000 "), Ok(Rupiah::new(1_000_000)));
/// assert!(parse_amount("-5").is_err());
/// assert!(parse_amount("abc").is_err());
/// ```
pub fn parse_amount(raw: &str) -> Result<Rupiah, InvalidAmount> {
    let reject = || InvalidAmount {
        input: raw.to_owned(),
    };
    let trimmed = raw.trim();
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reject());
    }
    match trimmed.parse::<u64>() {
        Ok(0) | Err(_) => Err(reject()),
        Ok(value) => Ok(Rupiah::new(value)),
    }
}
