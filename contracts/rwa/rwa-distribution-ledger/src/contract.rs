use crate::state::{assert_unlocked, CLAIM_LOCK, CONFIG, HOLDERS, STATE};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Api, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply,
    Response, StdResult, SubMsg, Uint128, WasmMsg,
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cw2::set_contract_version;
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20ReceiveMsg, TokenInfoResponse};
use cw_utils::nonpayable;
use rwa_access_control::{
    assert_not_paused, assert_role, grant_role, has_role, is_paused, revoke_role, set_paused, Role,
};
use rwa_distribution_ledger_common::error::ContractError;
use rwa_distribution_ledger_common::msg::{
    ConfigResponse, ExecuteMsg, HasRoleResponse, HolderResponse, InstantiateMsg, MigrateMsg,
    PausedResponse, PendingResponse, QueryMsg, ReceiveMsg, StateResponse,
};
use rwa_distribution_ledger_common::types::{Config, HolderInfo, State};
use rwa_share_ledger_common::msg::{
    AllowedResponse, IssuerResponse, QueryMsg as ShareLedgerQueryMsg,
};

pub(crate) const CONTRACT_NAME: &str = "crates.io:rwa-distribution-ledger";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) const CLAIM_REPLY_ID: u64 = 1;

//--------------------------------------------------------------------------------------------------
// Instantiation
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        share_ledger: validate_address(deps.api, "share_ledger", &msg.share_ledger)?,
        payout_token: validate_address(deps.api, "payout_token", &msg.payout_token)?,
    };
    let admin = validate_address(deps.api, "admin", &msg.admin)?;
    let issuer = validate_address(deps.api, "issuer", &msg.issuer)?;
    let pauser = validate_address(deps.api, "pauser", &msg.pauser)?;

    CONFIG.save(deps.storage, &config)?;
    STATE.save(deps.storage, &State::default())?;
    CLAIM_LOCK.save(deps.storage, &false)?;

    grant_role(deps.storage, Role::Admin, &admin)?;
    grant_role(deps.storage, Role::Issuer, &issuer)?;
    grant_role(deps.storage, Role::Pauser, &pauser)?;
    set_paused(deps.storage, false)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("share_ledger", config.share_ledger)
        .add_attribute("payout_token", config.payout_token)
        .add_attribute("admin", admin)
        .add_attribute("issuer", issuer)
        .add_attribute("pauser", pauser))
}

//--------------------------------------------------------------------------------------------------
// Executions
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    // Nothing may run while a claim payout is in flight.
    assert_unlocked(deps.storage)?;

    match msg {
        // permissioned - issuer role
        ExecuteMsg::Deposit { amount } => execute_deposit(deps, env, info, amount),
        // permissioned - payout token, issuer role on the cw20 sender
        ExecuteMsg::Receive(wrapper) => execute_receive(deps, info, wrapper),
        // permissionless
        ExecuteMsg::Checkpoint { account } => execute_checkpoint(deps, account),
        ExecuteMsg::Claim {} => {
            let account = info.sender.clone();
            execute_claim(deps, info, account)
        }
        // permissionless, funds go to `account`
        ExecuteMsg::ClaimFor { account } => {
            let account = deps.api.addr_validate(&account)?;
            execute_claim(deps, info, account)
        }
        // permissioned - pauser role
        ExecuteMsg::SetPaused { paused } => execute_set_paused(deps, info, paused),
        // permissioned - admin role
        ExecuteMsg::UpdateRole {
            role,
            account,
            granted,
        } => execute_update_role(deps, info, role, account, granted),
    }
}

/// Pull-style deposit: the payout token is taken from the sender with `TransferFrom`.
/// The accumulator change and the pull happen in one transaction, so a failed pull
/// reverts the accounting too.
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let config = CONFIG.load(deps.storage)?;
    let Some(resp) = apply_deposit(deps, &config, &info.sender, amount)? else {
        return Ok(ignored_deposit_response());
    };

    let pull_msg = WasmMsg::Execute {
        contract_addr: config.payout_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(resp
        .add_message(pull_msg)
        .add_attribute("action", "deposit"))
}

/// Push-style deposit through cw20 `Send`. The tokens are already in custody.
pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.payout_token {
        return Err(ContractError::InvalidPayoutToken {
            sender: info.sender.to_string(),
        });
    }

    let depositor = deps.api.addr_validate(&wrapper.sender)?;
    let msg: ReceiveMsg = from_json(&wrapper.msg)?;
    match msg {
        ReceiveMsg::Deposit {} => {
            match apply_deposit(deps, &config, &depositor, wrapper.amount)? {
                Some(resp) => Ok(resp.add_attribute("action", "receive_deposit")),
                None => Ok(ignored_deposit_response()),
            }
        }
    }
}

/// Advances the accumulator. Returns `None` for the zero-amount no-op.
fn apply_deposit(
    deps: DepsMut,
    config: &Config,
    depositor: &Addr,
    amount: Uint128,
) -> Result<Option<Response>, ContractError> {
    assert_not_paused(deps.storage)?;
    assert_role(deps.storage, Role::Issuer, depositor)?;

    let total_supply = query_share_supply(deps.as_ref(), config)?;
    if total_supply.is_zero() {
        return Err(ContractError::NoShares {});
    }
    if amount.is_zero() {
        return Ok(None);
    }

    let mut state = STATE.load(deps.storage)?;
    state.record_deposit(amount, total_supply)?;
    STATE.save(deps.storage, &state)?;

    Ok(Some(
        Response::new()
            .add_attribute("depositor", depositor.to_string())
            .add_attribute("amount", amount)
            .add_event(
                Event::new("deposit")
                    .add_attribute("depositor", depositor.to_string())
                    .add_attribute("amount", amount)
                    .add_attribute("total_supply", total_supply)
                    .add_attribute(
                        "acc_reward_per_share",
                        state.acc_reward_per_share.to_string(),
                    ),
            ),
    ))
}

fn ignored_deposit_response() -> Response {
    Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("result", "ignored")
}

/// Resynchronizes `account` to its current share balance. Callers must run this after
/// every balance change of `account`; nothing here observes balance changes on its own.
pub fn execute_checkpoint(deps: DepsMut, account: String) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let account = deps.api.addr_validate(&account)?;

    let balance = query_share_balance(deps.as_ref(), &config, &account)?;
    let state = STATE.load(deps.storage)?;
    let mut holder = load_holder_or_default(deps.as_ref(), &account)?;
    holder.checkpoint(balance, state.acc_reward_per_share)?;
    HOLDERS.save(deps.storage, &account, &holder)?;

    Ok(Response::new()
        .add_attribute("action", "checkpoint")
        .add_event(
            Event::new("checkpoint")
                .add_attribute("account", account.to_string())
                .add_attribute("shares", holder.shares)
                .add_attribute("reward_debt", holder.reward_debt.to_string())
                .add_attribute("unclaimed", holder.unclaimed.to_string()),
        ))
}

/// Pays `account` its pending rewards. The holder's accounting is finalized and the claim
/// lock is taken before the payout transfer is dispatched; the reply releases the lock.
pub fn execute_claim(
    deps: DepsMut,
    info: MessageInfo,
    account: Addr,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_not_paused(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    let balance = query_share_balance(deps.as_ref(), &config, &account)?;
    let mut state = STATE.load(deps.storage)?;
    let mut holder = load_holder_or_default(deps.as_ref(), &account)?;
    let pending = holder.pending(balance, state.acc_reward_per_share)?;

    assert_claim_eligible(deps.as_ref(), &config, &account, balance, pending)?;
    if pending.is_zero() {
        return Err(ContractError::NothingToClaim {
            account: account.to_string(),
        });
    }

    let amount = holder.claim(balance, state.acc_reward_per_share)?;
    state.total_claimed = state.total_claimed.checked_add(amount)?;

    HOLDERS.save(deps.storage, &account, &holder)?;
    STATE.save(deps.storage, &state)?;
    CLAIM_LOCK.save(deps.storage, &true)?;

    let payout_msg = WasmMsg::Execute {
        contract_addr: config.payout_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: account.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(payout_msg, CLAIM_REPLY_ID))
        .add_attribute("action", "claim")
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("claim")
                .add_attribute("account", account.to_string())
                .add_attribute("amount", amount),
        ))
}

pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Pauser, &info.sender)?;
    set_paused(deps.storage, paused)?;

    Ok(Response::new()
        .add_attribute("action", "set_paused")
        .add_attribute("sender", info.sender)
        .add_attribute("paused", paused.to_string()))
}

pub fn execute_update_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    account: String,
    granted: bool,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;

    let account = validate_address(deps.api, role.as_str(), &account)?;
    if granted {
        grant_role(deps.storage, role, &account)?;
    } else {
        revoke_role(deps.storage, role, &account);
    }

    Ok(Response::new()
        .add_attribute("action", "update_role")
        .add_attribute("role", role.as_str())
        .add_attribute("account", account)
        .add_attribute("granted", granted.to_string()))
}

//--------------------------------------------------------------------------------------------------
// Reply
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        CLAIM_REPLY_ID => {
            CLAIM_LOCK.save(deps.storage, &false)?;
            Ok(Response::new().add_attribute("action", "claim_settled"))
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

//--------------------------------------------------------------------------------------------------
// Queries
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => Ok(to_json_binary(&query_config(deps)?)?),
        QueryMsg::State {} => Ok(to_json_binary(&query_state(deps)?)?),
        QueryMsg::Pending { account } => Ok(to_json_binary(&query_pending(deps, account)?)?),
        QueryMsg::Holder { account } => Ok(to_json_binary(&query_holder(deps, account)?)?),
        QueryMsg::Paused {} => Ok(to_json_binary(&PausedResponse {
            paused: is_paused(deps.storage)?,
        })?),
        QueryMsg::HasRole { role, address } => {
            let address = deps.api.addr_validate(&address)?;
            Ok(to_json_binary(&HasRoleResponse {
                has_role: has_role(deps.storage, role, &address),
            })?)
        }
    }
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        share_ledger: config.share_ledger.to_string(),
        payout_token: config.payout_token.to_string(),
    })
}

pub fn query_state(deps: Deps) -> StdResult<StateResponse> {
    let state = STATE.load(deps.storage)?;
    Ok(StateResponse {
        acc_reward_per_share: state.acc_reward_per_share,
        total_deposited: state.total_deposited,
        total_claimed: state.total_claimed,
        deposit_count: state.deposit_count,
    })
}

/// Read-only: the live share balance against the stored debt.
pub fn query_pending(deps: Deps, account: String) -> Result<PendingResponse, ContractError> {
    let holder = query_holder(deps, account)?;
    Ok(PendingResponse {
        pending: holder.pending,
    })
}

pub fn query_holder(deps: Deps, account: String) -> Result<HolderResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let account = deps.api.addr_validate(&account)?;

    let balance = query_share_balance(deps, &config, &account)?;
    let state = STATE.load(deps.storage)?;
    let holder = load_holder_or_default(deps, &account)?;
    let pending = holder.pending(balance, state.acc_reward_per_share)?;

    Ok(HolderResponse {
        shares: holder.shares,
        reward_debt: holder.reward_debt,
        unclaimed: holder.unclaimed,
        claimed: holder.claimed,
        pending,
    })
}

//--------------------------------------------------------------------------------------------------
// Migration
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    // Set contract to version to latest
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}

//--------------------------------------------------------------------------------------------------
// Internal Logic
//--------------------------------------------------------------------------------------------------

fn validate_address(api: &dyn Api, field: &str, address: &str) -> Result<Addr, ContractError> {
    if address.trim().is_empty() {
        return Err(ContractError::ZeroAddress {
            field: field.to_string(),
        });
    }

    Ok(api.addr_validate(address)?)
}

fn load_holder_or_default(deps: Deps, account: &Addr) -> StdResult<HolderInfo> {
    Ok(HOLDERS.may_load(deps.storage, account)?.unwrap_or_default())
}

/// The hub issuer and allowlisted accounts may claim. So may an account removed from the
/// allowlist while it still holds shares or has rewards owed: its entitlement stays claimable.
fn assert_claim_eligible(
    deps: Deps,
    config: &Config,
    account: &Addr,
    balance: Uint128,
    pending: Uint128,
) -> Result<(), ContractError> {
    if !balance.is_zero() || !pending.is_zero() {
        return Ok(());
    }

    let issuer: IssuerResponse = deps
        .querier
        .query_wasm_smart(&config.share_ledger, &ShareLedgerQueryMsg::Issuer {})?;
    if issuer.issuer == *account {
        return Ok(());
    }

    let allowed: AllowedResponse = deps.querier.query_wasm_smart(
        &config.share_ledger,
        &ShareLedgerQueryMsg::IsAllowed {
            address: account.to_string(),
        },
    )?;
    if !allowed.allowed {
        return Err(ContractError::NotEligible {
            account: account.to_string(),
        });
    }

    Ok(())
}

fn query_share_balance(deps: Deps, config: &Config, account: &Addr) -> StdResult<Uint128> {
    let res: BalanceResponse = deps.querier.query_wasm_smart(
        &config.share_ledger,
        &ShareLedgerQueryMsg::Balance {
            address: account.to_string(),
        },
    )?;

    Ok(res.balance)
}

fn query_share_supply(deps: Deps, config: &Config) -> StdResult<Uint128> {
    let res: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&config.share_ledger, &ShareLedgerQueryMsg::TokenInfo {})?;

    Ok(res.total_supply)
}
