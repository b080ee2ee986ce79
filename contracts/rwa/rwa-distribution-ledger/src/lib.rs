pub mod contract;
pub mod state;

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod testing;

pub use rwa_distribution_ledger_common::error::ContractError;
