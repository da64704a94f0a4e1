use std::future::Future;
use std::time::Duration;

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::Provider;
use tokio::time::timeout;

use crate::config::Settings;
use crate::contracts::{IStakingPool, IZap, IERC20};
use crate::error::GatewayError;

/// Result of a mined approval transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalOutcome {
    pub tx_hash: B256,
    pub succeeded: bool,
}

/// Result of a mined zap or harvest transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub succeeded: bool,
}

/// Raw quote triple as the zap contract returns it; the flows shape it into
/// named records with slippage applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawZapQuote {
    pub wrapped_native_out: U256,
    pub project_token_out: U256,
    pub amount_out: U256,
}

/// Fully-assembled ZapIn invocation. `value` carries the native amount when
/// the input token is the native coin, zero otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZapInCall {
    pub token: Address,
    pub amount: U256,
    pub min_pool_tokens: U256,
    pub swap_target: Address,
    pub swap_data: Bytes,
    pub value: U256,
}

/// Fully-assembled ZapOut invocation with its two positional legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZapOutCall {
    pub token: Address,
    pub lp_amount: U256,
    pub min_tokens_out: U256,
    pub swap_targets: [Address; 2],
    pub swap_data: [Bytes; 2],
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StakerInfo {
    pub amount: U256,
    pub rewards: U256,
    pub reward_debt: U256,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StakingSnapshot {
    pub rewards_accrued: U256,
    pub staker: StakerInfo,
    pub tokens_staked: U256,
    pub last_rewarded_timestamp: u64,
    pub reward_tokens_per_second: U256,
}

/// ERC-20 reads and the approval write, decoupled from live RPC so flows can
/// be exercised against mock data.
pub trait TokenGateway {
    async fn decimals_of(&self, token: Address) -> Result<u8, GatewayError>;
    async fn allowance_of(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, GatewayError>;
    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<ApprovalOutcome, GatewayError>;
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, GatewayError>;
    async fn native_balance_of(&self, owner: Address) -> Result<U256, GatewayError>;
}

/// Zap contract quoting, estimation, and submission.
pub trait ZapGateway {
    async fn quote_zap_in(
        &self,
        from_token: Address,
        amount_in: U256,
        pre_path: &[Address],
        fees: U256,
    ) -> Result<RawZapQuote, GatewayError>;
    async fn quote_zap_out(
        &self,
        to_token: Address,
        lp_amount: U256,
        via_secondary: &[Address],
        via_primary: &[Address],
        fees: U256,
    ) -> Result<RawZapQuote, GatewayError>;
    async fn estimate_zap_in(&self, call: &ZapInCall) -> Result<u64, GatewayError>;
    async fn submit_zap_in(
        &self,
        call: &ZapInCall,
        gas_limit: u64,
    ) -> Result<TxOutcome, GatewayError>;
    async fn estimate_zap_out(&self, call: &ZapOutCall) -> Result<u64, GatewayError>;
    async fn submit_zap_out(
        &self,
        call: &ZapOutCall,
        gas_limit: u64,
    ) -> Result<TxOutcome, GatewayError>;
}

/// Staking pool reads and the harvest write.
pub trait StakingGateway {
    async fn staking_snapshot(&self, account: Address) -> Result<StakingSnapshot, GatewayError>;
    async fn rewards_accrued(&self, account: Address) -> Result<U256, GatewayError>;
    async fn staked_amount(&self, account: Address) -> Result<U256, GatewayError>;
    async fn estimate_harvest(&self) -> Result<u64, GatewayError>;
    async fn submit_harvest(&self, gas_limit: u64) -> Result<TxOutcome, GatewayError>;
}

/// Live gateway over an alloy provider bound to one signing identity.
/// Every read and every receipt wait is bounded by an explicit timeout; a
/// stalled node never hangs the invocation.
pub struct RpcGateway<P> {
    provider: P,
    zap: Address,
    staking: Address,
    call_timeout: Duration,
    receipt_timeout: Duration,
}

impl<P: Provider + Clone> RpcGateway<P> {
    pub fn new(provider: P, settings: &Settings) -> Self {
        Self {
            provider,
            zap: settings.zap_address,
            staking: settings.staking_address,
            call_timeout: settings.call_timeout,
            receipt_timeout: settings.receipt_timeout,
        }
    }

    async fn bounded<T, E, F>(&self, what: &'static str, fut: F) -> Result<T, GatewayError>
    where
        E: std::fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        match timeout(self.call_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(GatewayError::Call {
                what,
                message: err.to_string(),
            }),
            Err(_) => Err(GatewayError::Timeout {
                what,
                after: self.call_timeout,
            }),
        }
    }

    async fn wait_mined<E, F>(&self, what: &'static str, sent: F) -> Result<TxOutcome, GatewayError>
    where
        E: std::fmt::Display,
        F: Future<Output = Result<alloy::providers::PendingTransactionBuilder<alloy::network::Ethereum>, E>>,
    {
        let pending = match timeout(self.call_timeout, sent).await {
            Ok(Ok(pending)) => pending,
            Ok(Err(err)) => {
                return Err(GatewayError::Send {
                    what,
                    message: err.to_string(),
                })
            }
            Err(_) => {
                return Err(GatewayError::Timeout {
                    what,
                    after: self.call_timeout,
                })
            }
        };
        match timeout(self.receipt_timeout, pending.get_receipt()).await {
            Ok(Ok(receipt)) => Ok(TxOutcome {
                tx_hash: receipt.transaction_hash,
                succeeded: receipt.status(),
            }),
            Ok(Err(err)) => Err(GatewayError::Send {
                what,
                message: err.to_string(),
            }),
            Err(_) => Err(GatewayError::Timeout {
                what,
                after: self.receipt_timeout,
            }),
        }
    }
}

impl<P: Provider + Clone> TokenGateway for RpcGateway<P> {
    async fn decimals_of(&self, token: Address) -> Result<u8, GatewayError> {
        let erc20 = IERC20::new(token, self.provider.clone());
        self.bounded("decimals", async { erc20.decimals().call().await })
            .await
    }

    async fn allowance_of(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, GatewayError> {
        let erc20 = IERC20::new(token, self.provider.clone());
        self.bounded("allowance", async {
            erc20.allowance(owner, spender).call().await
        })
        .await
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<ApprovalOutcome, GatewayError> {
        let erc20 = IERC20::new(token, self.provider.clone());
        let outcome = self
            .wait_mined("approve", async { erc20.approve(spender, amount).send().await })
            .await?;
        Ok(ApprovalOutcome {
            tx_hash: outcome.tx_hash,
            succeeded: outcome.succeeded,
        })
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, GatewayError> {
        let erc20 = IERC20::new(token, self.provider.clone());
        self.bounded("balanceOf", async { erc20.balanceOf(owner).call().await })
            .await
    }

    async fn native_balance_of(&self, owner: Address) -> Result<U256, GatewayError> {
        self.bounded("native balance", async {
            self.provider.get_balance(owner).await
        })
        .await
    }
}

impl<P: Provider + Clone> ZapGateway for RpcGateway<P> {
    async fn quote_zap_in(
        &self,
        from_token: Address,
        amount_in: U256,
        pre_path: &[Address],
        fees: U256,
    ) -> Result<RawZapQuote, GatewayError> {
        let zap = IZap::new(self.zap, self.provider.clone());
        let quote = self
            .bounded("quoteZapIn", async {
                zap.quoteZapIn(from_token, amount_in, pre_path.to_vec(), fees)
                    .call()
                    .await
            })
            .await?;
        Ok(RawZapQuote {
            wrapped_native_out: quote.wrappedNativeOut,
            project_token_out: quote.projectTokenOut,
            amount_out: quote.lpTokensOut,
        })
    }

    async fn quote_zap_out(
        &self,
        to_token: Address,
        lp_amount: U256,
        via_secondary: &[Address],
        via_primary: &[Address],
        fees: U256,
    ) -> Result<RawZapQuote, GatewayError> {
        let zap = IZap::new(self.zap, self.provider.clone());
        let quote = self
            .bounded("calculateTokensOut", async {
                zap.calculateTokensOut(
                    to_token,
                    lp_amount,
                    via_secondary.to_vec(),
                    via_primary.to_vec(),
                    fees,
                )
                .call()
                .await
            })
            .await?;
        Ok(RawZapQuote {
            wrapped_native_out: quote.wrappedNativeOut,
            project_token_out: quote.projectTokenOut,
            amount_out: quote.tokensOut,
        })
    }

    async fn estimate_zap_in(&self, call: &ZapInCall) -> Result<u64, GatewayError> {
        let zap = IZap::new(self.zap, self.provider.clone());
        let builder = zap
            .ZapIn(
                call.token,
                call.amount,
                call.min_pool_tokens,
                call.swap_target,
                call.swap_data.clone(),
            )
            .value(call.value);
        self.bounded("ZapIn estimate", async { builder.estimate_gas().await })
            .await
    }

    async fn submit_zap_in(
        &self,
        call: &ZapInCall,
        gas_limit: u64,
    ) -> Result<TxOutcome, GatewayError> {
        let zap = IZap::new(self.zap, self.provider.clone());
        let builder = zap
            .ZapIn(
                call.token,
                call.amount,
                call.min_pool_tokens,
                call.swap_target,
                call.swap_data.clone(),
            )
            .value(call.value)
            .gas(gas_limit);
        self.wait_mined("ZapIn", async { builder.send().await }).await
    }

    async fn estimate_zap_out(&self, call: &ZapOutCall) -> Result<u64, GatewayError> {
        let zap = IZap::new(self.zap, self.provider.clone());
        let builder = zap.ZapOut(
            call.token,
            call.lp_amount,
            call.min_tokens_out,
            call.swap_targets.to_vec(),
            call.swap_data.to_vec(),
        );
        self.bounded("ZapOut estimate", async { builder.estimate_gas().await })
            .await
    }

    async fn submit_zap_out(
        &self,
        call: &ZapOutCall,
        gas_limit: u64,
    ) -> Result<TxOutcome, GatewayError> {
        let zap = IZap::new(self.zap, self.provider.clone());
        let builder = zap
            .ZapOut(
                call.token,
                call.lp_amount,
                call.min_tokens_out,
                call.swap_targets.to_vec(),
                call.swap_data.to_vec(),
            )
            .gas(gas_limit);
        self.wait_mined("ZapOut", async { builder.send().await }).await
    }
}

impl<P: Provider + Clone> StakingGateway for RpcGateway<P> {
    async fn staking_snapshot(&self, account: Address) -> Result<StakingSnapshot, GatewayError> {
        let staking = IStakingPool::new(self.staking, self.provider.clone());

        let rewards_accrued = self
            .bounded("getUserRewardsAccrued", async {
                staking.getUserRewardsAccrued(account).call().await
            })
            .await?;
        let staker = self
            .bounded("poolStaker", async { staking.poolStaker(account).call().await })
            .await?;
        let tokens_staked = self
            .bounded("tokensStaked", async { staking.tokensStaked().call().await })
            .await?;
        let last_rewarded = self
            .bounded("lastRewardedTimestamp", async {
                staking.lastRewardedTimestamp().call().await
            })
            .await?;
        let rate = self
            .bounded("rewardTokensPerSecond", async {
                staking.rewardTokensPerSecond().call().await
            })
            .await?;

        Ok(StakingSnapshot {
            rewards_accrued,
            staker: StakerInfo {
                amount: staker.amount,
                rewards: staker.rewards,
                reward_debt: staker.rewardDebt,
            },
            tokens_staked,
            last_rewarded_timestamp: u64::try_from(last_rewarded).unwrap_or(u64::MAX),
            reward_tokens_per_second: rate,
        })
    }

    async fn rewards_accrued(&self, account: Address) -> Result<U256, GatewayError> {
        let staking = IStakingPool::new(self.staking, self.provider.clone());
        self.bounded("getUserRewardsAccrued", async {
            staking.getUserRewardsAccrued(account).call().await
        })
        .await
    }

    async fn staked_amount(&self, account: Address) -> Result<U256, GatewayError> {
        let staking = IStakingPool::new(self.staking, self.provider.clone());
        let staker = self
            .bounded("poolStaker", async { staking.poolStaker(account).call().await })
            .await?;
        Ok(staker.amount)
    }

    async fn estimate_harvest(&self) -> Result<u64, GatewayError> {
        let staking = IStakingPool::new(self.staking, self.provider.clone());
        let builder = staking.harvestRewards();
        self.bounded("harvestRewards estimate", async { builder.estimate_gas().await })
            .await
    }

    async fn submit_harvest(&self, gas_limit: u64) -> Result<TxOutcome, GatewayError> {
        let staking = IStakingPool::new(self.staking, self.provider.clone());
        let builder = staking.harvestRewards().gas(gas_limit);
        self.wait_mined("harvestRewards", async { builder.send().await })
            .await
    }
}
