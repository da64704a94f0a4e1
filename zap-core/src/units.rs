use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::U256;

use crate::error::ZapError;

/// Scales a human-readable decimal string by `10^decimals` into the token's
/// smallest unit. Malformed, negative, or over-precise input fails with
/// [`ZapError::InvalidAmount`].
pub fn to_fixed_point(amount: &str, decimals: u8) -> Result<U256, ZapError> {
    match parse_units(amount, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(ZapError::InvalidAmount(format!(
            "amount must not be negative: {amount}"
        ))),
        Err(err) => Err(ZapError::InvalidAmount(format!("{amount}: {err}"))),
    }
}

/// Formats a fixed-point amount back to a decimal string. Display only.
pub fn to_decimal_string(amount: U256, decimals: u8) -> String {
    format_units(amount, decimals).unwrap_or_else(|_| amount.to_string())
}
