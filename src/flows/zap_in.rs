use alloy::primitives::{Address, U256};
use anyhow::{Context, Result};
use tracing::{info, warn};
use zap_core::units::{to_decimal_string, to_fixed_point};
use zap_core::{calldata, path, ZapInQuote, NATIVE_DECIMALS, NATIVE_TOKEN};

use super::{decimals_of, ensure_allowance, swap_deadline, FlowContext};
use crate::error::FlowError;
use crate::gateway::{TokenGateway, TxOutcome, ZapGateway, ZapInCall};

#[derive(Debug, Clone)]
pub struct ZapInRequest {
    /// Input token, or the zero-address sentinel for the native coin.
    pub token: Address,
    /// Human-readable amount, scaled by the token's decimals.
    pub amount: String,
    pub slippage_pct: u8,
    pub fee_bps: u64,
    pub submit: bool,
}

#[derive(Debug, Clone)]
pub struct ZapInOutcome {
    pub quote: ZapInQuote,
    pub gas_estimate: u64,
    pub tx: Option<TxOutcome>,
}

/// Zap an input token into the pool position.
pub async fn run<G: TokenGateway + ZapGateway>(
    gw: &G,
    ctx: &FlowContext,
    req: &ZapInRequest,
) -> Result<ZapInOutcome> {
    let decimals = decimals_of(gw, req.token).await?;
    let amount_in = to_fixed_point(&req.amount, decimals)?;
    info!(token = %req.token, amount = %req.amount, "starting zap-in");

    let pre_path = path::zap_in_pre_path(req.token, &ctx.anchors);
    let path_tokens: Vec<Address> = pre_path.map(|p| p.tokens).unwrap_or_default();
    let raw = gw
        .quote_zap_in(req.token, amount_in, &path_tokens, U256::from(req.fee_bps))
        .await
        .context("zap-in quote failed")?;
    let quote = ZapInQuote::from_parts(
        raw.wrapped_native_out,
        raw.project_token_out,
        raw.amount_out,
        req.slippage_pct,
    )?;
    quote.validate()?;
    info!(
        wrapped_native = %to_decimal_string(quote.anchor_secondary_amount, NATIVE_DECIMALS),
        project_token = %to_decimal_string(quote.anchor_primary_amount, NATIVE_DECIMALS),
        pool_tokens = %to_decimal_string(quote.pool_tokens, NATIVE_DECIMALS),
        min_pool_tokens = %to_decimal_string(quote.min_pool_tokens, NATIVE_DECIMALS),
        "zap-in quote"
    );

    if req.token == NATIVE_TOKEN {
        info!("native coin input, no approval required");
    } else {
        ensure_allowance(gw, req.token, ctx.owner, ctx.zap, amount_in, decimals).await?;
    }

    let swap = calldata::zap_in_swap(
        req.token,
        &ctx.anchors,
        amount_in,
        ctx.router,
        ctx.zap,
        swap_deadline(),
    );
    let value = if req.token == NATIVE_TOKEN {
        amount_in
    } else {
        U256::ZERO
    };
    let call = ZapInCall {
        token: req.token,
        amount: amount_in,
        min_pool_tokens: quote.min_pool_tokens,
        swap_target: swap.target,
        swap_data: swap.data,
        value,
    };

    let gas_estimate = gw
        .estimate_zap_in(&call)
        .await
        .map_err(FlowError::TransactionRejected)?;
    info!(gas_estimate, "estimated gas for ZapIn");

    let tx = if req.submit {
        let outcome = gw
            .submit_zap_in(&call, gas_estimate * 2)
            .await
            .map_err(FlowError::TransactionRejected)?;
        if outcome.succeeded {
            info!(tx = %outcome.tx_hash, "zap-in confirmed");
        } else {
            warn!(tx = %outcome.tx_hash, "zap-in reverted");
        }
        Some(outcome)
    } else {
        info!("dry run, transaction not submitted");
        None
    };

    Ok(ZapInOutcome {
        quote,
        gas_estimate,
        tx,
    })
}
