use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use rwa_access_control::Role;

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    /// The hub account. It also receives the `Issuer` role.
    pub issuer: String,
    pub admin: String,
    pub kyc_admin: String,
    pub pauser: String,
    /// Accounts allowlisted at instantiation.
    #[serde(default)]
    pub initial_allowlist: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mints `amount` shares to `to`. Requires the `Issuer` role. Ignores the pause switch.
    Issue { to: String, amount: Uint128 },
    /// Burns `amount` shares from `from`. Requires the `Issuer` role. Ignores the pause switch.
    Retire { from: String, amount: Uint128 },
    /// Moves shares from the sender along an issuer<->holder edge.
    Transfer { recipient: String, amount: Uint128 },
    /// Moves shares from `owner` using the sender's allowance.
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    IncreaseAllowance { spender: String, amount: Uint128 },
    DecreaseAllowance { spender: String, amount: Uint128 },
    /// Adds or removes an account from the allowlist. Requires the `KycAdmin` role.
    SetAllowed { account: String, allowed: bool },
    /// Freezes or unfreezes transfers. Requires the `Pauser` role.
    SetPaused { paused: bool },
    /// Replaces the hub account. Requires the `Admin` role.
    SetIssuer { issuer: String },
    /// Sets or clears the contract that receives checkpoint notifications.
    /// Requires the `Admin` role.
    SetCheckpointHook { contract: Option<String> },
    /// Grants or revokes a role. Requires the `Admin` role.
    UpdateRole {
        role: Role,
        account: String,
        granted: bool,
    },
}

/// Message dispatched to the checkpoint hook contract.
#[cw_serde]
pub enum CheckpointHookMsg {
    Checkpoint { account: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(IssuerResponse)]
    Issuer {},

    #[returns(cw20::BalanceResponse)]
    Balance { address: String },

    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},

    #[returns(AllowedResponse)]
    IsAllowed { address: String },

    /// Lists allowlisted accounts in ascending order.
    #[returns(AllowedAccountsResponse)]
    AllowedAccounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(cw20::AllowanceResponse)]
    Allowance { owner: String, spender: String },

    #[returns(PausedResponse)]
    Paused {},

    #[returns(HasRoleResponse)]
    HasRole { role: Role, address: String },
}

/// Response for `QueryMsg::Config`
#[cw_serde]
pub struct ConfigResponse {
    pub issuer: String,
    pub checkpoint_hook: Option<String>,
}

#[cw_serde]
pub struct IssuerResponse {
    pub issuer: Addr,
}

#[cw_serde]
pub struct AllowedResponse {
    pub allowed: bool,
}

#[cw_serde]
pub struct AllowedAccountsResponse {
    pub accounts: Vec<String>,
}

#[cw_serde]
pub struct PausedResponse {
    pub paused: bool,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}

#[cw_serde]
#[serde(rename_all = "snake_case")]
pub struct MigrateMsg {}
