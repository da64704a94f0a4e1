use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::error;
use tracing_subscriber::EnvFilter;
use zap_core::NATIVE_TOKEN;

use zap_cli::config::Settings;
use zap_cli::flows::harvest::HarvestRequest;
use zap_cli::flows::zap_in::ZapInRequest;
use zap_cli::flows::zap_out::ZapOutRequest;
use zap_cli::flows::{self, FlowContext};
use zap_cli::gateway::RpcGateway;

#[derive(Parser)]
#[command(
    name = "zap",
    version,
    about = "Zap tokens in and out of the project liquidity pool and harvest staking rewards"
)]
struct Cli {
    /// Network preset the contract-side token addresses are resolved
    /// against (falls back to the NETWORK environment variable).
    #[arg(long, global = true)]
    network: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a token (or the native coin) into a pool position.
    ZapIn {
        /// Input token address, or "native" for the chain's native coin.
        #[arg(long)]
        token: String,
        /// Human-readable amount, e.g. "10" or "0.0000001".
        #[arg(long)]
        amount: String,
        /// Slippage tolerance in whole percent.
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(..=100))]
        slippage: u8,
        /// Zap fee parameter in basis points (preset default when omitted).
        #[arg(long)]
        fees: Option<u64>,
        /// Submit the transaction instead of the default dry-run estimate.
        #[arg(long)]
        submit: bool,
    },
    /// Redeem a pool position into a single target token.
    ZapOut {
        /// Target token address, or "native" for the chain's native coin.
        #[arg(long)]
        token: String,
        /// Human-readable LP amount to redeem.
        #[arg(long)]
        lp_amount: String,
        /// Slippage tolerance in whole percent.
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(..=100))]
        slippage: u8,
        /// Zap fee parameter in basis points (preset default when omitted).
        #[arg(long)]
        fees: Option<u64>,
        /// Submit the transaction instead of the default dry-run estimate.
        #[arg(long)]
        submit: bool,
    },
    /// Harvest accrued staking rewards.
    Harvest {
        /// Submit the transaction instead of the default dry-run estimate.
        #[arg(long)]
        submit: bool,
    },
    /// Print the staking snapshot and derived APY for the signer.
    Staking,
    /// Print anchor, reference-token, native, and staked-LP balances.
    Balances,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = match Settings::from_env(cli.network.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            error!("configuration error: {err}");
            std::process::exit(2);
        }
    };

    // Flow boundary: failures are logged, never propagated as a panic.
    if let Err(err) = run(cli.command, &settings).await {
        error!("flow failed: {err:#}");
        std::process::exit(1);
    }
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let signer: PrivateKeySigner = settings
        .private_key
        .parse()
        .context("PRIVATE_KEY is not a valid signing key")?;
    let owner = signer.address();
    let wallet = EthereumWallet::from(signer);

    let url = settings
        .rpc_url
        .parse()
        .context("RPC_PROVIDER is not a valid URL")?;
    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);
    let gw = RpcGateway::new(provider, settings);
    let ctx = FlowContext::new(settings, owner);

    match command {
        Command::ZapIn {
            token,
            amount,
            slippage,
            fees,
            submit,
        } => {
            let req = ZapInRequest {
                token: parse_token(&token)?,
                amount,
                slippage_pct: slippage,
                fee_bps: fees.unwrap_or(settings.network.default_fee_bps),
                submit,
            };
            flows::zap_in::run(&gw, &ctx, &req).await?;
        }
        Command::ZapOut {
            token,
            lp_amount,
            slippage,
            fees,
            submit,
        } => {
            let req = ZapOutRequest {
                token: parse_token(&token)?,
                lp_amount,
                slippage_pct: slippage,
                fee_bps: fees.unwrap_or(settings.network.default_fee_bps),
                submit,
            };
            flows::zap_out::run(&gw, &ctx, &req).await?;
        }
        Command::Harvest { submit } => {
            flows::harvest::run(&gw, &ctx, &HarvestRequest { submit }).await?;
        }
        Command::Staking => {
            flows::status::staking_report(&gw, &ctx).await?;
        }
        Command::Balances => {
            flows::status::balance_report(&gw, &ctx).await?;
        }
    }
    Ok(())
}

fn parse_token(input: &str) -> Result<Address> {
    if input.eq_ignore_ascii_case("native") {
        return Ok(NATIVE_TOKEN);
    }
    input
        .parse()
        .map_err(|_| anyhow!("'{input}' is not a token address (use 0x... or \"native\")"))
}
