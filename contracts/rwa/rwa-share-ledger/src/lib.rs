pub mod contract;
pub mod state;


pub use rwa_share_ledger_common::error::ContractError;
