use thiserror::Error;

/// Validation failures raised by the pure planning layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZapError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("slippage tolerance must be a whole percent between 0 and 100, got {0}")]
    InvalidSlippage(u8),

    #[error("swap path must contain at least two tokens")]
    EmptyPath,
}
