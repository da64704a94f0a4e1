use alloy::primitives::{Address, U256};
use anyhow::{Context, Result};
use tracing::{info, warn};
use zap_core::units::{to_decimal_string, to_fixed_point};
use zap_core::{calldata, path, ZapOutQuote, NATIVE_DECIMALS, NATIVE_TOKEN};

use super::{decimals_of, ensure_allowance, swap_deadline, FlowContext};
use crate::error::FlowError;
use crate::gateway::{TokenGateway, TxOutcome, ZapGateway, ZapOutCall};

#[derive(Debug, Clone)]
pub struct ZapOutRequest {
    /// Target token, or the zero-address sentinel for the native coin.
    pub token: Address,
    /// Human-readable LP amount to redeem.
    pub lp_amount: String,
    pub slippage_pct: u8,
    pub fee_bps: u64,
    pub submit: bool,
}

#[derive(Debug, Clone)]
pub struct ZapOutOutcome {
    pub quote: ZapOutQuote,
    pub gas_estimate: u64,
    pub tx: Option<TxOutcome>,
}

/// Redeem a pool position into a single target token.
pub async fn run<G: TokenGateway + ZapGateway>(
    gw: &G,
    ctx: &FlowContext,
    req: &ZapOutRequest,
) -> Result<ZapOutOutcome> {
    let pair_decimals = decimals_of(gw, ctx.pair).await?;
    let lp_amount = to_fixed_point(&req.lp_amount, pair_decimals)?;
    info!(token = %req.token, lp_amount = %req.lp_amount, "starting zap-out");

    // Native exits are quoted through the wrapped-native anchor and leave
    // the router via the swap-to-ETH leg.
    let quote_target = if req.token == NATIVE_TOKEN {
        ctx.anchors.secondary
    } else {
        req.token
    };
    let target_decimals = decimals_of(gw, quote_target).await?;

    let paths = path::zap_out_paths(quote_target, &ctx.anchors);
    let raw = gw
        .quote_zap_out(
            quote_target,
            lp_amount,
            &paths.via_secondary.tokens,
            &paths.via_primary.tokens,
            U256::from(req.fee_bps),
        )
        .await
        .context("zap-out quote failed")?;
    let quote = ZapOutQuote::from_parts(
        raw.wrapped_native_out,
        raw.project_token_out,
        raw.amount_out,
        req.slippage_pct,
    )?;
    quote.validate()?;
    info!(
        wrapped_native = %to_decimal_string(quote.anchor_secondary_amount, NATIVE_DECIMALS),
        project_token = %to_decimal_string(quote.anchor_primary_amount, NATIVE_DECIMALS),
        tokens_out = %to_decimal_string(quote.token_out, target_decimals),
        min_tokens_out = %to_decimal_string(quote.min_token_out, target_decimals),
        "zap-out quote"
    );

    // The zap spends the LP token, so the gate runs on the pair.
    ensure_allowance(gw, ctx.pair, ctx.owner, ctx.zap, lp_amount, pair_decimals).await?;

    let bundle = calldata::zap_out_bundle(
        req.token,
        &ctx.anchors,
        &quote,
        ctx.router,
        ctx.zap,
        swap_deadline(),
    );
    let call = ZapOutCall {
        token: req.token,
        lp_amount,
        min_tokens_out: quote.min_token_out,
        swap_targets: bundle.targets,
        swap_data: bundle.data,
    };

    let gas_estimate = gw
        .estimate_zap_out(&call)
        .await
        .map_err(FlowError::TransactionRejected)?;
    info!(gas_estimate, "estimated gas for ZapOut");

    let tx = if req.submit {
        let outcome = gw
            .submit_zap_out(&call, gas_estimate * 2)
            .await
            .map_err(FlowError::TransactionRejected)?;
        if outcome.succeeded {
            info!(tx = %outcome.tx_hash, "zap-out confirmed");
        } else {
            warn!(tx = %outcome.tx_hash, "zap-out reverted");
        }
        Some(outcome)
    } else {
        info!("dry run, transaction not submitted");
        None
    };

    Ok(ZapOutOutcome {
        quote,
        gas_estimate,
        tx,
    })
}
