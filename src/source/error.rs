/// Failures raised by amount conversion, quote formatting and token lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    /// Negative or malformed decimal numeral
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    /// Decimals outside `0..=MAX_DECIMALS`
    #[error("invalid decimals: {0} (expected 0..={max})", max = crate::source::MAX_DECIMALS)]
    InvalidDecimals(i64),
    /// More significant fractional digits than the token supports
    #[error("{amount} has more fractional digits than {decimals} decimals allow")]
    PrecisionLoss { amount: String, decimals: u8 },
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
    #[error("token not found: {0}")]
    TokenNotFound(String),
}
