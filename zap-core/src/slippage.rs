use alloy::primitives::U256;

use crate::error::ZapError;

/// Applies a whole-percent slippage tolerance to a quoted amount and returns
/// the guaranteed minimum: `quoted * (100 - tolerance) / 100`, truncating.
///
/// Tolerance is an integer percent; sub-percent tolerances are not
/// representable at this granularity.
pub fn min_after_slippage(quoted: U256, tolerance_pct: u8) -> Result<U256, ZapError> {
    if tolerance_pct > 100 {
        return Err(ZapError::InvalidSlippage(tolerance_pct));
    }
    let keep = U256::from(100 - u16::from(tolerance_pct));
    Ok(quoted * keep / U256::from(100))
}
