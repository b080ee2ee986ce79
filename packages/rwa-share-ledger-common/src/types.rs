use crate::error::ContractError;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

/// Configuration.
#[cw_serde]
pub struct Config {
    /// The hub account. Every share movement has the issuer on exactly one side.
    pub issuer: Addr,
    /// Contract notified with `Checkpoint { account }` after every balance change.
    /// When unset, the caller is responsible for checkpointing.
    pub checkpoint_hook: Option<Addr>,
}

/// Share token metadata plus the running supply.
#[cw_serde]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
}

/// Shares are whole units.
pub const SHARE_DECIMALS: u8 = 0;

impl TokenInfo {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.name.len() < 3 || self.name.len() > 50 {
            return Err(ContractError::InvalidName {});
        }

        let bytes = self.symbol.as_bytes();
        if bytes.len() < 3
            || bytes.len() > 12
            || !bytes.iter().all(|b| b.is_ascii_alphabetic() || *b == b'-')
        {
            return Err(ContractError::InvalidSymbol {});
        }

        Ok(())
    }
}

/// The star-graph rule: an edge is permitted iff exactly one endpoint is the issuer and
/// the other endpoint is allowlisted. Evaluated fresh on every move.
pub fn transfer_permitted(
    issuer: &Addr,
    from: &Addr,
    to: &Addr,
    from_allowed: bool,
    to_allowed: bool,
) -> bool {
    match (from == issuer, to == issuer) {
        (true, false) => to_allowed,
        (false, true) => from_allowed,
        _ => false,
    }
}
