//! One module per user-facing flow. Each runs the same sequential shape:
//! check allowance, approve if needed, build swap data, then estimate or
//! submit, with every failure terminal for the invocation.

pub mod harvest;
pub mod status;
pub mod zap_in;
pub mod zap_out;

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{Address, U256};
use anyhow::Result;
use tracing::info;
use zap_core::units::to_decimal_string;
use zap_core::{NATIVE_DECIMALS, NATIVE_TOKEN, SWAP_DEADLINE_SECS};

use crate::config::Settings;
use crate::error::FlowError;
use crate::gateway::TokenGateway;

/// Addresses every flow needs, resolved once from the settings.
#[derive(Debug, Clone, Copy)]
pub struct FlowContext {
    pub owner: Address,
    pub anchors: zap_core::AnchorPair,
    pub router: Address,
    pub zap: Address,
    pub pair: Address,
    pub reference_token: Address,
}

impl FlowContext {
    pub fn new(settings: &Settings, owner: Address) -> Self {
        Self {
            owner,
            anchors: settings.anchors(),
            router: settings.router_address,
            zap: settings.zap_address,
            pair: settings.network.pair,
            reference_token: settings.network.reference_token,
        }
    }
}

/// Router deadline: 20 minutes from now.
pub(crate) fn swap_deadline() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    now + SWAP_DEADLINE_SECS
}

/// Token decimals with the native short-circuit: the zero-address sentinel
/// resolves to 18 without touching the gateway.
pub(crate) async fn decimals_of<G: TokenGateway>(gw: &G, token: Address) -> Result<u8> {
    if token == NATIVE_TOKEN {
        return Ok(NATIVE_DECIMALS);
    }
    Ok(gw
        .decimals_of(token)
        .await
        .map_err(FlowError::MetadataUnavailable)?)
}

/// Allowance gate shared by zap-in and zap-out. Reads the current approval,
/// submits one approval transaction when it falls short, and verifies the
/// mined status before letting the spending call proceed. A failed receipt
/// halts the flow; the caller must re-invoke.
pub(crate) async fn ensure_allowance<G: TokenGateway>(
    gw: &G,
    token: Address,
    owner: Address,
    spender: Address,
    required: U256,
    decimals: u8,
) -> Result<()> {
    let allowance = gw
        .allowance_of(token, owner, spender)
        .await
        .map_err(FlowError::MetadataUnavailable)?;
    info!(
        allowance = %to_decimal_string(allowance, decimals),
        "current allowance"
    );

    if allowance >= required {
        info!("allowance covers the amount, continuing");
        return Ok(());
    }

    info!("allowance low, submitting approval for token spend");
    let outcome = gw
        .approve(token, spender, required)
        .await
        .map_err(FlowError::ApprovalRejected)?;
    if !outcome.succeeded {
        return Err(FlowError::ApprovalFailed(outcome.tx_hash).into());
    }

    let refreshed = gw
        .allowance_of(token, owner, spender)
        .await
        .map_err(FlowError::MetadataUnavailable)?;
    info!(
        allowance = %to_decimal_string(refreshed, decimals),
        tx = %outcome.tx_hash,
        "approval confirmed"
    );
    Ok(())
}
