//! Flow-level behavior against the mock gateway: allowance gating, the
//! native short-circuit, approval-failure halts, and dry-run defaults.

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use zap_core::router::IUniswapV2Router02;
use zap_core::{AnchorPair, NATIVE_TOKEN};

use super::mock_gateway::{ApprovalBehavior, MockGateway};
use crate::error::FlowError;
use crate::flows::zap_in::{self, ZapInRequest};
use crate::flows::zap_out::{self, ZapOutRequest};
use crate::flows::{harvest, status, FlowContext};
use crate::gateway::RawZapQuote;

const PROJECT_TOKEN: Address = Address::repeat_byte(0xaa);
const WRAPPED_NATIVE: Address = Address::repeat_byte(0xbb);
const OTHER_TOKEN: Address = Address::repeat_byte(0x01);
const PAIR: Address = Address::repeat_byte(0x44);
const ROUTER: Address = Address::repeat_byte(0x22);
const ZAP: Address = Address::repeat_byte(0x33);
const OWNER: Address = Address::repeat_byte(0x55);
const REFERENCE: Address = Address::repeat_byte(0x66);

fn ctx() -> FlowContext {
    FlowContext {
        owner: OWNER,
        anchors: AnchorPair::new(PROJECT_TOKEN, WRAPPED_NATIVE),
        router: ROUTER,
        zap: ZAP,
        pair: PAIR,
        reference_token: REFERENCE,
    }
}

fn quote() -> RawZapQuote {
    RawZapQuote {
        wrapped_native_out: U256::from(480),
        project_token_out: U256::from(520),
        amount_out: U256::from(1000),
    }
}

fn zap_in_request(token: Address) -> ZapInRequest {
    ZapInRequest {
        token,
        amount: "10".to_string(),
        slippage_pct: 10,
        fee_bps: 400,
        submit: false,
    }
}

fn zap_out_request(token: Address) -> ZapOutRequest {
    ZapOutRequest {
        token,
        lp_amount: "0.00001".to_string(),
        slippage_pct: 10,
        fee_bps: 400,
        submit: false,
    }
}

#[tokio::test]
async fn zap_in_approves_before_spending_when_allowance_is_low() {
    let gw = MockGateway::default()
        .with_decimals(PROJECT_TOKEN, 18)
        .with_allowance(PROJECT_TOKEN, U256::ZERO)
        .with_zap_in_quote(quote());

    let outcome = zap_in::run(&gw, &ctx(), &zap_in_request(PROJECT_TOKEN))
        .await
        .unwrap();

    let approvals = gw.approvals.borrow();
    assert_eq!(approvals.len(), 1);
    let expected_amount = U256::from(10u64) * U256::from(10u64).pow(U256::from(18));
    assert_eq!(approvals[0], (PROJECT_TOKEN, expected_amount));
    assert_eq!(gw.estimated_zap_ins.borrow().len(), 1);
    assert_eq!(outcome.quote.min_pool_tokens, U256::from(900));
}

#[tokio::test]
async fn zap_in_skips_approval_when_allowance_covers_the_amount() {
    let gw = MockGateway::default()
        .with_decimals(PROJECT_TOKEN, 18)
        .with_allowance(PROJECT_TOKEN, U256::MAX)
        .with_zap_in_quote(quote());

    zap_in::run(&gw, &ctx(), &zap_in_request(PROJECT_TOKEN))
        .await
        .unwrap();

    assert!(gw.approvals.borrow().is_empty());
    assert_eq!(gw.estimated_zap_ins.borrow().len(), 1);
}

#[tokio::test]
async fn zap_in_halts_when_the_approval_receipt_reports_failure() {
    let gw = MockGateway::default()
        .with_decimals(PROJECT_TOKEN, 18)
        .with_zap_in_quote(quote())
        .with_approval_behavior(ApprovalBehavior::MineWithFailure);

    let err = zap_in::run(&gw, &ctx(), &zap_in_request(PROJECT_TOKEN))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FlowError>(),
        Some(FlowError::ApprovalFailed(_))
    ));
    // The spending call must never be reached.
    assert!(gw.estimated_zap_ins.borrow().is_empty());
    assert!(gw.submitted_zap_ins.borrow().is_empty());
}

#[tokio::test]
async fn zap_in_halts_when_the_approval_send_is_rejected() {
    let gw = MockGateway::default()
        .with_decimals(PROJECT_TOKEN, 18)
        .with_zap_in_quote(quote())
        .with_approval_behavior(ApprovalBehavior::Reject);

    let err = zap_in::run(&gw, &ctx(), &zap_in_request(PROJECT_TOKEN))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FlowError>(),
        Some(FlowError::ApprovalRejected(_))
    ));
    assert!(gw.estimated_zap_ins.borrow().is_empty());
}

#[tokio::test]
async fn zap_in_native_short_circuits_metadata_and_allowance() {
    let gw = MockGateway::default().with_zap_in_quote(quote());

    let outcome = zap_in::run(&gw, &ctx(), &zap_in_request(NATIVE_TOKEN))
        .await
        .unwrap();

    assert_eq!(gw.decimals_calls.get(), 0);
    assert_eq!(gw.allowance_calls.get(), 0);
    assert!(gw.approvals.borrow().is_empty());

    let calls = gw.estimated_zap_ins.borrow();
    assert_eq!(calls.len(), 1);
    let expected_amount = U256::from(10u64) * U256::from(10u64).pow(U256::from(18));
    assert_eq!(calls[0].value, expected_amount);
    assert_eq!(calls[0].swap_target, WRAPPED_NATIVE);
    assert!(calls[0].swap_data.is_empty());
    assert!(outcome.tx.is_none());
}

#[tokio::test]
async fn zap_in_other_token_routes_through_the_router() {
    let gw = MockGateway::default()
        .with_decimals(OTHER_TOKEN, 6)
        .with_allowance(OTHER_TOKEN, U256::MAX)
        .with_zap_in_quote(quote());

    zap_in::run(&gw, &ctx(), &zap_in_request(OTHER_TOKEN))
        .await
        .unwrap();

    let calls = gw.estimated_zap_ins.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].swap_target, ROUTER);
    assert_eq!(calls[0].value, U256::ZERO);

    let swap =
        IUniswapV2Router02::swapExactTokensForTokensCall::abi_decode(&calls[0].swap_data).unwrap();
    assert_eq!(swap.path, vec![OTHER_TOKEN, WRAPPED_NATIVE]);
    assert_eq!(swap.amountIn, U256::from(10_000_000u64)); // "10" at 6 decimals
    assert_eq!(swap.amountOutMin, U256::ZERO);
    assert_eq!(swap.to, ZAP);
}

#[tokio::test]
async fn zap_in_submits_only_when_asked() {
    let gw = MockGateway::default().with_zap_in_quote(quote());

    zap_in::run(&gw, &ctx(), &zap_in_request(NATIVE_TOKEN))
        .await
        .unwrap();
    assert!(gw.submitted_zap_ins.borrow().is_empty());

    let mut req = zap_in_request(NATIVE_TOKEN);
    req.submit = true;
    let outcome = zap_in::run(&gw, &ctx(), &req).await.unwrap();
    assert_eq!(gw.submitted_zap_ins.borrow().len(), 1);
    assert!(outcome.tx.unwrap().succeeded);
}

#[tokio::test]
async fn zap_out_gates_on_the_pair_token_allowance() {
    let gw = MockGateway::default()
        .with_decimals(PAIR, 18)
        .with_decimals(OTHER_TOKEN, 6)
        .with_allowance(PAIR, U256::ZERO)
        .with_zap_out_quote(quote());

    zap_out::run(&gw, &ctx(), &zap_out_request(OTHER_TOKEN))
        .await
        .unwrap();

    let approvals = gw.approvals.borrow();
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0].0, PAIR);
    assert_eq!(gw.estimated_zap_outs.borrow().len(), 1);
}

#[tokio::test]
async fn zap_out_to_other_token_carries_two_ordered_legs() {
    let gw = MockGateway::default()
        .with_decimals(PAIR, 18)
        .with_decimals(OTHER_TOKEN, 6)
        .with_allowance(PAIR, U256::MAX)
        .with_zap_out_quote(quote());

    let outcome = zap_out::run(&gw, &ctx(), &zap_out_request(OTHER_TOKEN))
        .await
        .unwrap();
    assert_eq!(outcome.quote.min_token_out, U256::from(900));

    let calls = gw.estimated_zap_outs.borrow();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.swap_targets, [ROUTER, ROUTER]);
    assert!(!call.swap_data[0].is_empty());
    assert!(!call.swap_data[1].is_empty());
    assert_eq!(call.min_tokens_out, U256::from(900));

    // Position 0: plain swap of the wrapped-native proceeds.
    let secondary =
        IUniswapV2Router02::swapExactTokensForTokensCall::abi_decode(&call.swap_data[0]).unwrap();
    assert_eq!(secondary.path, vec![WRAPPED_NATIVE, OTHER_TOKEN]);
    assert_eq!(secondary.amountIn, quote().wrapped_native_out);

    // Position 1: fee-tolerant swap of the project-token proceeds.
    let primary =
        IUniswapV2Router02::swapExactTokensForTokensSupportingFeeOnTransferTokensCall::abi_decode(
            &call.swap_data[1],
        )
        .unwrap();
    assert_eq!(
        primary.path,
        vec![PROJECT_TOKEN, WRAPPED_NATIVE, OTHER_TOKEN]
    );
    assert_eq!(primary.amountIn, quote().project_token_out);
}

#[tokio::test]
async fn zap_out_to_native_uses_the_swap_to_eth_leg() {
    let gw = MockGateway::default()
        .with_decimals(PAIR, 18)
        .with_decimals(WRAPPED_NATIVE, 18)
        .with_allowance(PAIR, U256::MAX)
        .with_zap_out_quote(quote());

    zap_out::run(&gw, &ctx(), &zap_out_request(NATIVE_TOKEN))
        .await
        .unwrap();

    let calls = gw.estimated_zap_outs.borrow();
    let call = &calls[0];
    assert_eq!(call.token, NATIVE_TOKEN);
    assert!(call.swap_data[0].is_empty());

    let exit =
        IUniswapV2Router02::swapExactTokensForETHSupportingFeeOnTransferTokensCall::abi_decode(
            &call.swap_data[1],
        )
        .unwrap();
    assert_eq!(exit.path, vec![PROJECT_TOKEN, WRAPPED_NATIVE]);
    assert_eq!(exit.amountIn, quote().project_token_out);
}

#[tokio::test]
async fn zap_out_halts_on_failed_pair_approval() {
    let gw = MockGateway::default()
        .with_decimals(PAIR, 18)
        .with_decimals(OTHER_TOKEN, 6)
        .with_zap_out_quote(quote())
        .with_approval_behavior(ApprovalBehavior::MineWithFailure);

    let err = zap_out::run(&gw, &ctx(), &zap_out_request(OTHER_TOKEN))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FlowError>(),
        Some(FlowError::ApprovalFailed(_))
    ));
    assert!(gw.estimated_zap_outs.borrow().is_empty());
}

#[tokio::test]
async fn harvest_defaults_to_a_dry_run() {
    let gw = MockGateway::default();

    let outcome = harvest::run(&gw, &ctx(), &harvest::HarvestRequest { submit: false })
        .await
        .unwrap();

    assert_eq!(gw.harvest_estimates.get(), 1);
    assert_eq!(gw.harvest_submissions.get(), 0);
    assert!(outcome.tx.is_none());

    harvest::run(&gw, &ctx(), &harvest::HarvestRequest { submit: true })
        .await
        .unwrap();
    assert_eq!(gw.harvest_submissions.get(), 1);
}

#[tokio::test]
async fn balance_report_reads_every_configured_token() {
    let mut gw = MockGateway::default()
        .with_decimals(REFERENCE, 6)
        .with_staked_amount(U256::from(42));
    gw.balances.insert(PROJECT_TOKEN, U256::from(1));
    gw.balances.insert(WRAPPED_NATIVE, U256::from(2));
    gw.balances.insert(REFERENCE, U256::from(3));
    gw.native_balance = U256::from(4);

    let report = status::balance_report(&gw, &ctx()).await.unwrap();
    assert_eq!(report.project_token, U256::from(1));
    assert_eq!(report.wrapped_native, U256::from(2));
    assert_eq!(report.reference_token, U256::from(3));
    assert_eq!(report.reference_decimals, 6);
    assert_eq!(report.native, U256::from(4));
    assert_eq!(report.staked_lp, U256::from(42));
}
