use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use rwa_share_ledger_common::types::{Config, TokenInfo};

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOKEN_INFO: Item<TokenInfo> = Item::new("token_info");

/// Share count per account.
pub const BALANCES: Map<&Addr, Uint128> = Map::new("balances");

/// KYC allowlist. Removing an account leaves its balance untouched.
pub const ALLOWED: Map<&Addr, bool> = Map::new("allowed");

/// (owner, spender) -> remaining allowance
pub const ALLOWANCES: Map<(&Addr, &Addr), Uint128> = Map::new("allowances");
