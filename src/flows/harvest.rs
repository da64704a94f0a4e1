use alloy::primitives::U256;
use anyhow::{Context, Result};
use tracing::{info, warn};
use zap_core::units::to_decimal_string;
use zap_core::NATIVE_DECIMALS;

use super::FlowContext;
use crate::error::FlowError;
use crate::gateway::{StakingGateway, TxOutcome};

#[derive(Debug, Clone, Copy)]
pub struct HarvestRequest {
    pub submit: bool,
}

#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    pub rewards_accrued: U256,
    pub gas_estimate: u64,
    pub tx: Option<TxOutcome>,
}

/// Harvest accrued staking rewards from the companion staking contract.
pub async fn run<G: StakingGateway>(
    gw: &G,
    ctx: &FlowContext,
    req: &HarvestRequest,
) -> Result<HarvestOutcome> {
    let rewards_accrued = gw
        .rewards_accrued(ctx.owner)
        .await
        .context("rewards read failed")?;
    info!(
        rewards = %to_decimal_string(rewards_accrued, NATIVE_DECIMALS),
        "pending staking rewards"
    );

    let gas_estimate = gw
        .estimate_harvest()
        .await
        .map_err(FlowError::TransactionRejected)?;
    info!(gas_estimate, "estimated gas for harvestRewards");

    let tx = if req.submit {
        let outcome = gw
            .submit_harvest(gas_estimate * 2)
            .await
            .map_err(FlowError::TransactionRejected)?;
        if outcome.succeeded {
            info!(tx = %outcome.tx_hash, "harvest confirmed");
        } else {
            warn!(tx = %outcome.tx_hash, "harvest reverted");
        }
        Some(outcome)
    } else {
        info!("dry run, transaction not submitted");
        None
    };

    Ok(HarvestOutcome {
        rewards_accrued,
        gas_estimate,
        tx,
    })
}
