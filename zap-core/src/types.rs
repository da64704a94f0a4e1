use alloy::primitives::{Address, U256};
use anyhow::{anyhow, Result};

use crate::error::ZapError;
use crate::slippage;

/// Sentinel address for the chain's native coin.
pub const NATIVE_TOKEN: Address = Address::ZERO;

/// Decimal convention for the native coin and for LP tokens.
pub const NATIVE_DECIMALS: u8 = 18;

/// Router deadline horizon: 20 minutes from the time a leg is encoded.
pub const SWAP_DEADLINE_SECS: u64 = 20 * 60;

/// Where a token sits relative to the target pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Native,
    Primary,
    Secondary,
    Other,
}

/// The two underlying assets of the pool the zap contract targets:
/// the project token (primary) and the wrapped-native token (secondary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorPair {
    pub primary: Address,
    pub secondary: Address,
}

impl AnchorPair {
    pub fn new(primary: Address, secondary: Address) -> Self {
        Self { primary, secondary }
    }

    pub fn classify(&self, token: Address) -> TokenClass {
        if token == NATIVE_TOKEN {
            TokenClass::Native
        } else if token == self.primary {
            TokenClass::Primary
        } else if token == self.secondary {
            TokenClass::Secondary
        } else {
            TokenClass::Other
        }
    }

    pub fn is_anchor(&self, token: Address) -> bool {
        token == self.primary || token == self.secondary
    }
}

/// An ordered chain of router hops from a source to a destination token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPath {
    pub tokens: Vec<Address>,
}

impl SwapPath {
    pub fn new(tokens: Vec<Address>) -> Result<Self, ZapError> {
        if tokens.len() < 2 {
            return Err(ZapError::EmptyPath);
        }
        Ok(Self { tokens })
    }

    pub fn direct(from: Address, to: Address) -> Self {
        Self { tokens: vec![from, to] }
    }

    pub fn via(from: Address, mid: Address, to: Address) -> Self {
        Self { tokens: vec![from, mid, to] }
    }

    pub fn hop_count(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    pub fn is_direct(&self) -> bool {
        self.tokens.len() == 2
    }
}

/// Zap-in quote: implied anchor amounts, expected pool tokens, and the
/// slippage-adjusted minimum the zap contract must honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZapInQuote {
    pub anchor_secondary_amount: U256,
    pub anchor_primary_amount: U256,
    pub pool_tokens: U256,
    pub min_pool_tokens: U256,
}

impl ZapInQuote {
    pub fn from_parts(
        anchor_secondary_amount: U256,
        anchor_primary_amount: U256,
        pool_tokens: U256,
        slippage_tolerance_pct: u8,
    ) -> Result<Self, ZapError> {
        let min_pool_tokens = slippage::min_after_slippage(pool_tokens, slippage_tolerance_pct)?;
        Ok(Self {
            anchor_secondary_amount,
            anchor_primary_amount,
            pool_tokens,
            min_pool_tokens,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_pool_tokens > self.pool_tokens {
            return Err(anyhow!(
                "minimum pool tokens {} exceeds quoted {}",
                self.min_pool_tokens,
                self.pool_tokens
            ));
        }
        Ok(())
    }
}

/// Zap-out quote: anchor proceeds implied by redeeming the LP amount, the
/// expected target-token output, and its slippage-adjusted minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZapOutQuote {
    pub anchor_secondary_amount: U256,
    pub anchor_primary_amount: U256,
    pub token_out: U256,
    pub min_token_out: U256,
}

impl ZapOutQuote {
    pub fn from_parts(
        anchor_secondary_amount: U256,
        anchor_primary_amount: U256,
        token_out: U256,
        slippage_tolerance_pct: u8,
    ) -> Result<Self, ZapError> {
        let min_token_out = slippage::min_after_slippage(token_out, slippage_tolerance_pct)?;
        Ok(Self {
            anchor_secondary_amount,
            anchor_primary_amount,
            token_out,
            min_token_out,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_token_out > self.token_out {
            return Err(anyhow!(
                "minimum token output {} exceeds quoted {}",
                self.min_token_out,
                self.token_out
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors() -> AnchorPair {
        AnchorPair::new(Address::repeat_byte(0xaa), Address::repeat_byte(0xbb))
    }

    #[test]
    fn classify_distinguishes_all_token_kinds() {
        let pair = anchors();
        assert_eq!(pair.classify(NATIVE_TOKEN), TokenClass::Native);
        assert_eq!(pair.classify(pair.primary), TokenClass::Primary);
        assert_eq!(pair.classify(pair.secondary), TokenClass::Secondary);
        assert_eq!(pair.classify(Address::repeat_byte(0x01)), TokenClass::Other);
    }

    #[test]
    fn swap_path_rejects_fewer_than_two_tokens() {
        assert_eq!(SwapPath::new(vec![]), Err(ZapError::EmptyPath));
        assert_eq!(
            SwapPath::new(vec![Address::repeat_byte(0x01)]),
            Err(ZapError::EmptyPath)
        );
    }

    #[test]
    fn swap_path_hop_counts() {
        let pair = anchors();
        let direct = SwapPath::direct(pair.secondary, pair.primary);
        assert!(direct.is_direct());
        assert_eq!(direct.hop_count(), 1);

        let routed = SwapPath::via(pair.primary, pair.secondary, Address::repeat_byte(0x01));
        assert!(!routed.is_direct());
        assert_eq!(routed.hop_count(), 2);
    }

    #[test]
    fn zap_in_quote_applies_slippage_and_validates() {
        let quote =
            ZapInQuote::from_parts(U256::from(5), U256::from(7), U256::from(1000), 10).unwrap();
        assert_eq!(quote.min_pool_tokens, U256::from(900));
        assert!(quote.validate().is_ok());
    }

    #[test]
    fn zap_out_quote_rejects_out_of_range_tolerance() {
        let result = ZapOutQuote::from_parts(U256::from(1), U256::from(1), U256::from(100), 101);
        assert_eq!(result, Err(ZapError::InvalidSlippage(101)));
    }
}
