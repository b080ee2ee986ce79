use cosmwasm_std::{ConversionOverflowError, DivideByZeroError, OverflowError, StdError};
use cw_utils::PaymentError;
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

    #[error(transparent)]
    DivideByZero(#[from] DivideByZeroError),

    #[error(transparent)]
    ConversionOverflow(#[from] ConversionOverflowError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("Empty address provided for {field}")]
    ZeroAddress { field: String },

    #[error("Cannot deposit while the share ledger has zero total supply")]
    NoShares {},

    #[error("Nothing to claim for {account}")]
    NothingToClaim { account: String },

    #[error("Account {account} is not eligible to claim")]
    NotEligible { account: String },

    #[error("Received cw20 from {sender}, which is not the configured payout token")]
    InvalidPayoutToken { sender: String },

    #[error("Re-entrant call while a claim transfer is in flight")]
    Reentrancy {},

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
