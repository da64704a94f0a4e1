//! Pure zap planning logic: token classification, swap-path planning,
//! slippage-adjusted quote shaping, and router call-data encoding.
//!
//! Nothing in this crate touches the network. The chain-facing side of the
//! workflow (RPC reads, approvals, transaction submission) lives in the CLI
//! crate and feeds this crate plain values.

pub mod calldata;
pub mod error;
pub mod path;
pub mod router;
pub mod slippage;
pub mod types;
pub mod units;

pub use error::ZapError;
pub use types::{
    AnchorPair, SwapPath, TokenClass, ZapInQuote, ZapOutQuote, NATIVE_DECIMALS, NATIVE_TOKEN,
    SWAP_DEADLINE_SECS,
};
