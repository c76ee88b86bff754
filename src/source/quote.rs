use alloy::primitives::U256;

use crate::source::{to_decimal, DecimalAmount, QuoteError, Rounding, TokenInfo};

/// Fractional digits kept in [`QuoteResult::exchange_rate`].
pub const RATE_PRECISION: u8 = 18;

/// Outcome of one quote, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResult {
    pub token_in: TokenInfo,
    pub token_out: TokenInfo,
    pub amount_in: DecimalAmount,
    pub amount_out: DecimalAmount,
    /// `amount_out / amount_in`, truncated to [`RATE_PRECISION`] digits, or
    /// fewer when the rate is too large for that many to fit in `U256`.
    pub exchange_rate: DecimalAmount,
    pub display_precision: u8,
    pub amount_in_display: String,
    pub amount_out_display: String,
    pub exchange_rate_display: String,
}

/// Converts a raw quoter output for `token_out` into a [`QuoteResult`].
///
/// Display strings carry exactly `display_precision` fractional digits,
/// rounded half-up. The displayed rate is rounded from the exact ratio, not
/// from the truncated [`QuoteResult::exchange_rate`].
pub fn format_quote(
    token_in: &TokenInfo,
    token_out: &TokenInfo,
    amount_in: &DecimalAmount,
    amount_out_raw: U256,
    display_precision: u8,
) -> Result<QuoteResult, QuoteError> {
    if amount_in.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    let amount_out = to_decimal(amount_out_raw, token_out.decimals)?;

    let exchange_rate = amount_out.checked_div_fit(amount_in, RATE_PRECISION)?;
    let exchange_rate_display = amount_out
        .checked_div(amount_in, display_precision, Rounding::HalfUp)?
        .to_fixed(display_precision)?;

    Ok(QuoteResult {
        token_in: token_in.clone(),
        token_out: token_out.clone(),
        amount_in: *amount_in,
        amount_out,
        exchange_rate,
        display_precision,
        amount_in_display: amount_in.to_fixed(display_precision)?,
        amount_out_display: amount_out.to_fixed(display_precision)?,
        exchange_rate_display,
    })
}
