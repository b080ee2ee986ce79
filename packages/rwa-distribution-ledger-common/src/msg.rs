use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Uint128, Uint256};
use cw20::Cw20ReceiveMsg;
use rwa_access_control::Role;

#[cw_serde]
pub struct InstantiateMsg {
    /// Share ledger contract whose holders are paid out.
    pub share_ledger: String,
    /// cw20 contract the revenue is paid in.
    pub payout_token: String,
    pub admin: String,
    /// Receives the `Issuer` role, the capability to deposit revenue.
    pub issuer: String,
    pub pauser: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Pulls `amount` of the payout token from the sender (which must have granted this
    /// contract an allowance) and distributes it over the current share supply.
    /// Requires the `Issuer` role. A zero amount is a no-op.
    Deposit { amount: Uint128 },
    /// cw20 `Send` entry point. Accepts `ReceiveMsg::Deposit {}` from the payout token.
    Receive(Cw20ReceiveMsg),
    /// Resynchronizes `account`'s reward debt to its current share balance.
    /// Must be called after every balance change of `account`. Permissionless.
    Checkpoint { account: String },
    /// Pays the sender's pending rewards to the sender.
    Claim {},
    /// Pays `account`'s pending rewards to `account`. Callable by anyone.
    ClaimFor { account: String },
    /// Requires the `Pauser` role. Blocks deposits and claims.
    SetPaused { paused: bool },
    /// Grants or revokes a role. Requires the `Admin` role.
    UpdateRole {
        role: Role,
        account: String,
        granted: bool,
    },
}

/// Hook messages accepted through `ExecuteMsg::Receive`.
#[cw_serde]
pub enum ReceiveMsg {
    Deposit {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Returns the global accumulator and running totals.
    #[returns(StateResponse)]
    State {},

    /// Returns what `account` could claim right now.
    #[returns(PendingResponse)]
    Pending { account: String },

    /// Returns the stored accounting for `account` together with its pending amount.
    #[returns(HolderResponse)]
    Holder { account: String },

    #[returns(PausedResponse)]
    Paused {},

    #[returns(HasRoleResponse)]
    HasRole { role: Role, address: String },
}

/// Response for `QueryMsg::Config`
#[cw_serde]
pub struct ConfigResponse {
    pub share_ledger: String,
    pub payout_token: String,
}

/// Response for `QueryMsg::State`
#[cw_serde]
pub struct StateResponse {
    pub acc_reward_per_share: Uint256,
    pub total_deposited: Uint128,
    pub total_claimed: Uint128,
    pub deposit_count: u64,
}

/// Response for `QueryMsg::Pending`
#[cw_serde]
pub struct PendingResponse {
    pub pending: Uint128,
}

/// Response for `QueryMsg::Holder`
#[cw_serde]
pub struct HolderResponse {
    pub shares: Uint128,
    /// Scaled by `PRECISION`.
    pub reward_debt: Uint256,
    /// Scaled by `PRECISION`.
    pub unclaimed: Uint256,
    pub claimed: Uint128,
    pub pending: Uint128,
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
