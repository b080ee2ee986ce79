use cosmwasm_std::{OverflowError, StdError, Uint128};
use rwa_access_control::AccessError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    AccessError(#[from] AccessError),

    #[error(transparent)]
    Overflow(#[from] OverflowError),

    #[error("Empty address provided for {field}")]
    ZeroAddress { field: String },

    #[error("Amount must be greater than zero")]
    InvalidAmount {},

    #[error("Account {account} is neither the issuer nor allowlisted")]
    NotEligible { account: String },

    #[error("Transfer from {from} to {to} is not permitted")]
    TransferNotPermitted { from: String, to: String },

    #[error("Insufficient balance on {account}: balance {balance}, required {required}")]
    InsufficientBalance {
        account: String,
        balance: Uint128,
        required: Uint128,
    },

    #[error("Insufficient allowance for {spender} on {owner}: allowance {allowance}, required {required}")]
    InsufficientAllowance {
        owner: String,
        spender: String,
        allowance: Uint128,
        required: Uint128,
    },

    #[error("Name is not in the expected format (3-50 UTF-8 bytes)")]
    InvalidName {},

    #[error("Ticker symbol is not in expected format [a-zA-Z\\-]{{3,12}}")]
    InvalidSymbol {},
}
