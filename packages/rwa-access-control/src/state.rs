use crate::error::AccessError;
use crate::role::Role;
use cosmwasm_std::{Addr, Empty, StdResult, Storage};
use cw_storage_plus::{Item, Map};

/// Role membership: (role tag, account) -> present.
pub const ROLES: Map<(&str, &Addr), Empty> = Map::new("roles");

/// Global pause switch. Missing means unpaused.
pub const PAUSED: Item<bool> = Item::new("paused");

pub fn grant_role(store: &mut dyn Storage, role: Role, account: &Addr) -> StdResult<()> {
    ROLES.save(store, (role.as_str(), account), &Empty {})
}

pub fn revoke_role(store: &mut dyn Storage, role: Role, account: &Addr) {
    ROLES.remove(store, (role.as_str(), account));
}

pub fn has_role(store: &dyn Storage, role: Role, account: &Addr) -> bool {
    ROLES.has(store, (role.as_str(), account))
}

/// Fails with `Unauthorized` unless `sender` holds `role`.
pub fn assert_role(store: &dyn Storage, role: Role, sender: &Addr) -> Result<(), AccessError> {
    if !has_role(store, role, sender) {
        return Err(AccessError::Unauthorized {
            role,
            sender: sender.to_string(),
        });
    }

    Ok(())
}

pub fn set_paused(store: &mut dyn Storage, paused: bool) -> StdResult<()> {
    PAUSED.save(store, &paused)
}

pub fn is_paused(store: &dyn Storage) -> StdResult<bool> {
    Ok(PAUSED.may_load(store)?.unwrap_or(false))
}

pub fn assert_not_paused(store: &dyn Storage) -> Result<(), AccessError> {
    if is_paused(store)? {
        return Err(AccessError::ContractPaused {});
    }

    Ok(())
}
