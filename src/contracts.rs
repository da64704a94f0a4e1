use alloy::sol;

sol! {
    /// Minimal ERC-20 surface: metadata, allowance management, balances.
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// The zap contract: quoting is read-only, ZapIn/ZapOut spend.
    #[sol(rpc)]
    interface IZap {
        function quoteZapIn(
            address fromToken,
            uint256 amountIn,
            address[] calldata path,
            uint256 fees
        ) external view returns (uint256 wrappedNativeOut, uint256 projectTokenOut, uint256 lpTokensOut);

        function calculateTokensOut(
            address toToken,
            uint256 lpAmount,
            address[] calldata wrappedNativePath,
            address[] calldata projectTokenPath,
            uint256 fees
        ) external view returns (uint256 wrappedNativeOut, uint256 projectTokenOut, uint256 tokensOut);

        function ZapIn(
            address fromToken,
            uint256 amountIn,
            uint256 minPoolTokens,
            address swapTarget,
            bytes calldata swapData
        ) external payable returns (uint256 lpReceived);

        function ZapOut(
            address toToken,
            uint256 lpAmount,
            uint256 minTokensOut,
            address[] calldata swapTargets,
            bytes[] calldata swapData
        ) external returns (uint256 tokensReceived);
    }

    /// Companion staking pool for the zap's LP token.
    #[sol(rpc)]
    interface IStakingPool {
        function getUserRewardsAccrued(address account) external view returns (uint256);
        function poolStaker(address account) external view returns (uint256 amount, uint256 rewards, uint256 rewardDebt);
        function tokensStaked() external view returns (uint256);
        function lastRewardedTimestamp() external view returns (uint256);
        function rewardTokensPerSecond() external view returns (uint256);
        function harvestRewards() external;
    }
}
