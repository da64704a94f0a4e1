//! Chain-facing side of the zap workflow: configuration, contract bindings,
//! the RPC gateway, and the per-flow orchestrators. The pure planning logic
//! lives in the `zap-core` member crate.

pub mod config;
pub mod contracts;
pub mod error;
pub mod flows;
pub mod gateway;

#[cfg(test)]
mod tests;
