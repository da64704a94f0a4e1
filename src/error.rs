use std::time::Duration;

use alloy::primitives::B256;
use thiserror::Error;

/// RPC-level failure classes surfaced by the gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{what} call failed: {message}")]
    Call { what: &'static str, message: String },

    #[error("{what} transaction could not be completed: {message}")]
    Send { what: &'static str, message: String },

    #[error("{what} timed out after {after:?}")]
    Timeout { what: &'static str, after: Duration },
}

/// Flow-terminal failures. Each aborts the current invocation with a logged
/// diagnostic and no retry.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("token metadata unavailable: {0}")]
    MetadataUnavailable(GatewayError),

    #[error("approval transaction {0} was mined with failure status")]
    ApprovalFailed(B256),

    #[error("approval rejected: {0}")]
    ApprovalRejected(GatewayError),

    #[error("transaction rejected: {0}")]
    TransactionRejected(GatewayError),
}
