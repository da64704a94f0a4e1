use alloy::primitives::U256;
use anyhow::Result;
use tracing::info;
use zap_core::units::to_decimal_string;
use zap_core::NATIVE_DECIMALS;

use super::{decimals_of, FlowContext};
use crate::error::FlowError;
use crate::gateway::{StakingGateway, StakingSnapshot, TokenGateway};

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Yearly reward emission over total stake, as a whole percent. Integer
/// evaluation order matches the on-chain convention the pool reports with.
pub fn staking_apy_pct(reward_tokens_per_second: U256, tokens_staked: U256) -> Option<U256> {
    if tokens_staked.is_zero() {
        return None;
    }
    let per_year = reward_tokens_per_second * U256::from(SECONDS_PER_YEAR);
    Some(per_year / tokens_staked * U256::from(100))
}

#[derive(Debug, Clone)]
pub struct StakingReport {
    pub snapshot: StakingSnapshot,
    pub apy_pct: Option<U256>,
}

/// Read-only staking overview for the signing identity.
pub async fn staking_report<G: StakingGateway>(
    gw: &G,
    ctx: &FlowContext,
) -> Result<StakingReport> {
    let snapshot = gw
        .staking_snapshot(ctx.owner)
        .await
        .map_err(FlowError::MetadataUnavailable)?;

    info!(
        rewards_accrued = %to_decimal_string(snapshot.rewards_accrued, NATIVE_DECIMALS),
        staked = %to_decimal_string(snapshot.staker.amount, NATIVE_DECIMALS),
        rewards = %to_decimal_string(snapshot.staker.rewards, NATIVE_DECIMALS),
        reward_debt = %to_decimal_string(snapshot.staker.reward_debt, NATIVE_DECIMALS),
        total_staked = %to_decimal_string(snapshot.tokens_staked, NATIVE_DECIMALS),
        last_rewarded_timestamp = snapshot.last_rewarded_timestamp,
        rate = %to_decimal_string(snapshot.reward_tokens_per_second, NATIVE_DECIMALS),
        "staking snapshot"
    );

    let apy_pct = staking_apy_pct(snapshot.reward_tokens_per_second, snapshot.tokens_staked);
    match apy_pct {
        Some(apy) => info!(apy_pct = %apy, "staking APY"),
        None => info!("staking APY undefined, nothing staked"),
    }

    Ok(StakingReport { snapshot, apy_pct })
}

#[derive(Debug, Clone)]
pub struct BalanceReport {
    pub project_token: U256,
    pub wrapped_native: U256,
    pub reference_token: U256,
    pub reference_decimals: u8,
    pub native: U256,
    pub staked_lp: U256,
}

/// Read-only balance overview: both anchors, the preset reference token,
/// the native coin, and the staked LP amount.
pub async fn balance_report<G: TokenGateway + StakingGateway>(
    gw: &G,
    ctx: &FlowContext,
) -> Result<BalanceReport> {
    let project_token = gw
        .balance_of(ctx.anchors.primary, ctx.owner)
        .await
        .map_err(FlowError::MetadataUnavailable)?;
    let wrapped_native = gw
        .balance_of(ctx.anchors.secondary, ctx.owner)
        .await
        .map_err(FlowError::MetadataUnavailable)?;
    let reference_decimals = decimals_of(gw, ctx.reference_token).await?;
    let reference_token = gw
        .balance_of(ctx.reference_token, ctx.owner)
        .await
        .map_err(FlowError::MetadataUnavailable)?;
    let native = gw
        .native_balance_of(ctx.owner)
        .await
        .map_err(FlowError::MetadataUnavailable)?;
    let staked_lp = gw
        .staked_amount(ctx.owner)
        .await
        .map_err(FlowError::MetadataUnavailable)?;

    info!(
        project_token = %to_decimal_string(project_token, NATIVE_DECIMALS),
        wrapped_native = %to_decimal_string(wrapped_native, NATIVE_DECIMALS),
        reference_token = %to_decimal_string(reference_token, reference_decimals),
        native = %to_decimal_string(native, NATIVE_DECIMALS),
        staked_lp = %to_decimal_string(staked_lp, NATIVE_DECIMALS),
        "balances"
    );

    Ok(BalanceReport {
        project_token,
        wrapped_native,
        reference_token,
        reference_decimals,
        native,
        staked_lp,
    })
}
