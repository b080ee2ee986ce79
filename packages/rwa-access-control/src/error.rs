use crate::role::Role;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AccessError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: {sender} does not hold the {role} role")]
    Unauthorized { role: Role, sender: String },

    #[error("Contract execution is paused.")]
    ContractPaused {},
}
