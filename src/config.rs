use std::env;
use std::time::Duration;

use alloy::primitives::{address, Address};
use thiserror::Error;
use zap_core::AnchorPair;

/// Startup-fatal configuration problems. None of these are recoverable:
/// quoting and spending both need a complete address set and a credential.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not defined in the environment variables")]
    MissingVar(&'static str),

    #[error("{var} is not a valid address: {value}")]
    InvalidAddress { var: &'static str, value: String },

    #[error("{var} is not a valid integer: {value}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("unknown network '{0}', known networks: arbitrum, bsc-testnet")]
    UnknownNetwork(String),
}

/// Per-deployment constants, resolved once at startup and never hard-coded
/// inside a flow. `project_token` is the pool's primary anchor and
/// `wrapped_native` its secondary anchor; `pair` is the pool's LP token.
#[derive(Debug, Clone, Copy)]
pub struct NetworkPreset {
    pub name: &'static str,
    pub project_token: Address,
    pub wrapped_native: Address,
    pub pair: Address,
    pub reference_token: Address,
    pub default_fee_bps: u64,
}

const ARBITRUM: NetworkPreset = NetworkPreset {
    name: "arbitrum",
    project_token: address!("888AAA48EbEa87C74f690189E947d2C679705972"),
    wrapped_native: address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1"),
    pair: address!("53D101CA2844C79632CA9AEf1Fa8d749fd0924eE"),
    reference_token: address!("Fd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9"),
    default_fee_bps: 400,
};

const BSC_TESTNET: NetworkPreset = NetworkPreset {
    name: "bsc-testnet",
    project_token: address!("4d4B826a97Cdf819808A63F7A66223D79f8Cc9f5"),
    wrapped_native: address!("ae13d989daC2f0dEbFf460aC112a837C89BAa7cd"),
    pair: address!("387B579EB0c1204f1DB886a56b575599eAd3bE4c"),
    reference_token: address!("337610d27c682E347C9cD60BD4b3b107C9d34dDd"),
    default_fee_bps: 400,
};

impl NetworkPreset {
    pub fn lookup(name: &str) -> Result<Self, ConfigError> {
        match name {
            "arbitrum" => Ok(ARBITRUM),
            "bsc-testnet" => Ok(BSC_TESTNET),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }

    pub fn anchors(&self) -> AnchorPair {
        AnchorPair::new(self.project_token, self.wrapped_native)
    }
}

/// Everything a flow needs from the environment, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub rpc_url: String,
    pub private_key: String,
    pub zap_address: Address,
    pub router_address: Address,
    pub staking_address: Address,
    pub network: NetworkPreset,
    pub call_timeout: Duration,
    pub receipt_timeout: Duration,
}

impl Settings {
    pub fn from_env(network_flag: Option<&str>) -> Result<Self, ConfigError> {
        let private_key = require_var("PRIVATE_KEY")?;
        let rpc_url = require_var("RPC_PROVIDER")?;
        let zap_address = require_address("ZAP_ADDRESS")?;
        let router_address = require_address("ROUTER_V2_ADDRESS")?;
        let staking_address = require_address("STAKING_ADDRESS")?;

        let network_name = match network_flag {
            Some(name) => name.to_string(),
            None => env::var("NETWORK").unwrap_or_else(|_| "arbitrum".to_string()),
        };
        let network = NetworkPreset::lookup(&network_name)?;

        Ok(Self {
            rpc_url,
            private_key,
            zap_address,
            router_address,
            staking_address,
            network,
            call_timeout: duration_var("RPC_CALL_TIMEOUT_SECS", 30)?,
            receipt_timeout: duration_var("RECEIPT_TIMEOUT_SECS", 180)?,
        })
    }

    pub fn anchors(&self) -> AnchorPair {
        self.network.anchors()
    }
}

fn require_var(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn require_address(var: &'static str) -> Result<Address, ConfigError> {
    let value = require_var(var)?;
    value
        .parse()
        .map_err(|_| ConfigError::InvalidAddress { var, value })
}

fn duration_var(var: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}
