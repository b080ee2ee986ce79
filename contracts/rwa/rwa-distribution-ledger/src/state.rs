use cosmwasm_std::{Addr, Storage};
use cw_storage_plus::{Item, Map};
use rwa_distribution_ledger_common::error::ContractError;
use rwa_distribution_ledger_common::types::{Config, HolderInfo, State};

pub const CONFIG: Item<Config> = Item::new("config");
pub const STATE: Item<State> = Item::new("state");
pub const HOLDERS: Map<&Addr, HolderInfo> = Map::new("holders");

/// Set while a claim payout is in flight, cleared by the claim reply.
pub const CLAIM_LOCK: Item<bool> = Item::new("claim_lock");

pub fn assert_unlocked(storage: &dyn Storage) -> Result<(), ContractError> {
    if CLAIM_LOCK.may_load(storage)?.unwrap_or(false) {
        return Err(ContractError::Reentrancy {});
    }

    Ok(())
}
