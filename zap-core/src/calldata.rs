use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::router::IUniswapV2Router02;
use crate::types::{AnchorPair, TokenClass, ZapOutQuote};

/// A single pre-swap instruction for zap-in: where to send the swap and the
/// encoded router invocation, empty when no pre-swap is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapInstruction {
    pub target: Address,
    pub data: Bytes,
}

/// The two positional zap-out legs, aligned with the zap contract's expected
/// swap-leg order: position 0 spends the secondary-anchor proceeds, position
/// 1 the primary-anchor proceeds. A leg with no swap carries empty bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZapOutCallBundle {
    pub targets: [Address; 2],
    pub data: [Bytes; 2],
}

impl ZapOutCallBundle {
    pub fn secondary_leg(&self) -> &Bytes {
        &self.data[0]
    }

    pub fn primary_leg(&self) -> &Bytes {
        &self.data[1]
    }

    pub fn live_leg_count(&self) -> usize {
        self.data.iter().filter(|leg| !leg.is_empty()).count()
    }
}

/// Builds the zap-in pre-swap for a source token.
///
/// - native coin: no swap; the target field names the wrapped-native token
///   the zap contract wraps into.
/// - anchor token: no swap, zero target.
/// - other token: one plain router swap of the full input into the secondary
///   anchor, paid out to the zap contract.
pub fn zap_in_swap(
    source: Address,
    anchors: &AnchorPair,
    amount_in: U256,
    router: Address,
    zap: Address,
    deadline: u64,
) -> SwapInstruction {
    match anchors.classify(source) {
        TokenClass::Native => SwapInstruction {
            target: anchors.secondary,
            data: Bytes::new(),
        },
        TokenClass::Primary | TokenClass::Secondary => SwapInstruction {
            target: Address::ZERO,
            data: Bytes::new(),
        },
        TokenClass::Other => SwapInstruction {
            target: router,
            data: plain_swap(
                amount_in,
                vec![source, anchors.secondary],
                zap,
                U256::from(deadline),
            ),
        },
    }
}

/// Builds the zap-out leg bundle for a destination token.
///
/// The pool redemption leaves the zap contract holding both anchors; each
/// live leg converts one side's proceeds toward the destination. The
/// primary-anchor legs use the fee-on-transfer-tolerant router variants.
pub fn zap_out_bundle(
    target: Address,
    anchors: &AnchorPair,
    quote: &ZapOutQuote,
    router: Address,
    zap: Address,
    deadline: u64,
) -> ZapOutCallBundle {
    let deadline = U256::from(deadline);
    let (secondary_leg, primary_leg) = match anchors.classify(target) {
        TokenClass::Primary => (
            fee_tolerant_swap(
                quote.anchor_secondary_amount,
                vec![anchors.secondary, target],
                zap,
                deadline,
            ),
            Bytes::new(),
        ),
        TokenClass::Secondary => (
            Bytes::new(),
            fee_tolerant_swap(
                quote.anchor_primary_amount,
                vec![anchors.primary, target],
                zap,
                deadline,
            ),
        ),
        TokenClass::Native => (
            Bytes::new(),
            native_exit_swap(
                quote.anchor_primary_amount,
                vec![anchors.primary, anchors.secondary],
                zap,
                deadline,
            ),
        ),
        TokenClass::Other => (
            plain_swap(
                quote.anchor_secondary_amount,
                vec![anchors.secondary, target],
                zap,
                deadline,
            ),
            fee_tolerant_swap(
                quote.anchor_primary_amount,
                vec![anchors.primary, anchors.secondary, target],
                zap,
                deadline,
            ),
        ),
    };
    ZapOutCallBundle {
        targets: [router, router],
        data: [secondary_leg, primary_leg],
    }
}

// Every leg keeps amountOutMin at zero: the zap contract enforces the final
// minimum on its own output, not per router hop.

fn plain_swap(amount_in: U256, path: Vec<Address>, to: Address, deadline: U256) -> Bytes {
    IUniswapV2Router02::swapExactTokensForTokensCall {
        amountIn: amount_in,
        amountOutMin: U256::ZERO,
        path,
        to,
        deadline,
    }
    .abi_encode()
    .into()
}

fn fee_tolerant_swap(amount_in: U256, path: Vec<Address>, to: Address, deadline: U256) -> Bytes {
    IUniswapV2Router02::swapExactTokensForTokensSupportingFeeOnTransferTokensCall {
        amountIn: amount_in,
        amountOutMin: U256::ZERO,
        path,
        to,
        deadline,
    }
    .abi_encode()
    .into()
}

fn native_exit_swap(amount_in: U256, path: Vec<Address>, to: Address, deadline: U256) -> Bytes {
    IUniswapV2Router02::swapExactTokensForETHSupportingFeeOnTransferTokensCall {
        amountIn: amount_in,
        amountOutMin: U256::ZERO,
        path,
        to,
        deadline,
    }
    .abi_encode()
    .into()
}
