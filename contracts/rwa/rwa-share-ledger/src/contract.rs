use crate::state::{ALLOWANCES, ALLOWED, BALANCES, CONFIG, TOKEN_INFO};
use cosmwasm_std::{
    to_json_binary, Addr, Api, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order, Response,
    StdResult, Storage, Uint128, WasmMsg,
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cw2::set_contract_version;
use cw20::{AllowanceResponse, BalanceResponse, Expiration, TokenInfoResponse};
use cw_storage_plus::Bound;
use rwa_access_control::{
    assert_not_paused, assert_role, grant_role, has_role, is_paused, revoke_role, set_paused, Role,
};
use rwa_share_ledger_common::error::ContractError;
use rwa_share_ledger_common::msg::{
    AllowedAccountsResponse, AllowedResponse, CheckpointHookMsg, ConfigResponse, ExecuteMsg,
    HasRoleResponse, InstantiateMsg, IssuerResponse, MigrateMsg, PausedResponse, QueryMsg,
};
use rwa_share_ledger_common::types::{transfer_permitted, Config, TokenInfo, SHARE_DECIMALS};

pub(crate) const CONTRACT_NAME: &str = "crates.io:rwa-share-ledger";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

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

    let issuer = validate_address(deps.api, "issuer", &msg.issuer)?;
    let admin = validate_address(deps.api, "admin", &msg.admin)?;
    let kyc_admin = validate_address(deps.api, "kyc_admin", &msg.kyc_admin)?;
    let pauser = validate_address(deps.api, "pauser", &msg.pauser)?;

    let token_info = TokenInfo {
        name: msg.name,
        symbol: msg.symbol,
        decimals: SHARE_DECIMALS,
        total_supply: Uint128::zero(),
    };
    token_info.validate()?;
    TOKEN_INFO.save(deps.storage, &token_info)?;

    let config = Config {
        issuer: issuer.clone(),
        checkpoint_hook: None,
    };
    CONFIG.save(deps.storage, &config)?;

    grant_role(deps.storage, Role::Admin, &admin)?;
    grant_role(deps.storage, Role::Issuer, &issuer)?;
    grant_role(deps.storage, Role::KycAdmin, &kyc_admin)?;
    grant_role(deps.storage, Role::Pauser, &pauser)?;
    set_paused(deps.storage, false)?;

    let mut resp = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("name", token_info.name)
        .add_attribute("symbol", token_info.symbol)
        .add_attribute("issuer", issuer)
        .add_attribute("admin", admin)
        .add_attribute("kyc_admin", kyc_admin)
        .add_attribute("pauser", pauser);

    for account in msg.initial_allowlist {
        let account = deps.api.addr_validate(&account)?;
        ALLOWED.save(deps.storage, &account, &true)?;
        resp = resp.add_event(allowlist_change_event(&account, true));
    }

    Ok(resp)
}

//--------------------------------------------------------------------------------------------------
// Executions
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // permissioned - issuer role
        ExecuteMsg::Issue { to, amount } => execute_issue(deps, info, to, amount),
        // permissioned - issuer role
        ExecuteMsg::Retire { from, amount } => execute_retire(deps, info, from, amount),
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, info, recipient, amount)
        }
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => execute_transfer_from(deps, info, owner, recipient, amount),
        ExecuteMsg::IncreaseAllowance { spender, amount } => {
            execute_increase_allowance(deps, info, spender, amount)
        }
        ExecuteMsg::DecreaseAllowance { spender, amount } => {
            execute_decrease_allowance(deps, info, spender, amount)
        }
        // permissioned - kyc admin role
        ExecuteMsg::SetAllowed { account, allowed } => {
            execute_set_allowed(deps, info, account, allowed)
        }
        // permissioned - pauser role
        ExecuteMsg::SetPaused { paused } => execute_set_paused(deps, info, paused),
        // permissioned - admin role
        ExecuteMsg::SetIssuer { issuer } => execute_set_issuer(deps, info, issuer),
        // permissioned - admin role
        ExecuteMsg::SetCheckpointHook { contract } => {
            execute_set_checkpoint_hook(deps, info, contract)
        }
        // permissioned - admin role
        ExecuteMsg::UpdateRole {
            role,
            account,
            granted,
        } => execute_update_role(deps, info, role, account, granted),
    }
}

pub fn execute_issue(
    deps: DepsMut,
    info: MessageInfo,
    to: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Issuer, &info.sender)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let config = CONFIG.load(deps.storage)?;
    let to = deps.api.addr_validate(&to)?;
    assert_eligible(deps.storage, &config, &to)?;

    let balance = load_balance(deps.storage, &to)?.checked_add(amount)?;
    let mut token_info = TOKEN_INFO.load(deps.storage)?;
    token_info.total_supply = token_info.total_supply.checked_add(amount)?;

    BALANCES.save(deps.storage, &to, &balance)?;
    TOKEN_INFO.save(deps.storage, &token_info)?;

    let resp = Response::new()
        .add_attribute("action", "issue")
        .add_attribute("to", to.to_string())
        .add_attribute("amount", amount)
        .add_event(balance_change_event(&to, amount.to_string()));

    with_checkpoint_msgs(resp, &config, &[&to])
}

pub fn execute_retire(
    deps: DepsMut,
    info: MessageInfo,
    from: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Issuer, &info.sender)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let config = CONFIG.load(deps.storage)?;
    let from = deps.api.addr_validate(&from)?;
    assert_eligible(deps.storage, &config, &from)?;

    let balance = load_balance(deps.storage, &from)?;
    if balance < amount {
        return Err(ContractError::InsufficientBalance {
            account: from.to_string(),
            balance,
            required: amount,
        });
    }
    let mut token_info = TOKEN_INFO.load(deps.storage)?;
    token_info.total_supply = token_info.total_supply.checked_sub(amount)?;

    BALANCES.save(deps.storage, &from, &(balance - amount))?;
    TOKEN_INFO.save(deps.storage, &token_info)?;

    let resp = Response::new()
        .add_attribute("action", "retire")
        .add_attribute("from", from.to_string())
        .add_attribute("amount", amount)
        .add_event(balance_change_event(&from, format!("-{}", amount)));

    with_checkpoint_msgs(resp, &config, &[&from])
}

pub fn execute_transfer(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;
    let resp = move_shares(deps.storage, &info.sender, &recipient, amount)?;

    Ok(resp.add_attribute("action", "transfer"))
}

pub fn execute_transfer_from(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let owner = deps.api.addr_validate(&owner)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let allowance = ALLOWANCES
        .may_load(deps.storage, (&owner, &info.sender))?
        .unwrap_or_default();
    if allowance < amount {
        return Err(ContractError::InsufficientAllowance {
            owner: owner.to_string(),
            spender: info.sender.to_string(),
            allowance,
            required: amount,
        });
    }

    let resp = move_shares(deps.storage, &owner, &recipient, amount)?;
    save_allowance(deps.storage, &owner, &info.sender, allowance - amount)?;

    Ok(resp
        .add_attribute("action", "transfer_from")
        .add_attribute("spender", info.sender))
}

/// The move primitive: checks pause, amount, topology and balance, in that order, before
/// touching any balance.
fn move_shares(
    storage: &mut dyn Storage,
    from: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_not_paused(storage)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let config = CONFIG.load(storage)?;
    if !transfer_permitted(
        &config.issuer,
        from,
        to,
        is_allowed(storage, from)?,
        is_allowed(storage, to)?,
    ) {
        return Err(ContractError::TransferNotPermitted {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let from_balance = load_balance(storage, from)?;
    if from_balance < amount {
        return Err(ContractError::InsufficientBalance {
            account: from.to_string(),
            balance: from_balance,
            required: amount,
        });
    }
    let to_balance = load_balance(storage, to)?.checked_add(amount)?;

    BALANCES.save(storage, from, &(from_balance - amount))?;
    BALANCES.save(storage, to, &to_balance)?;

    let resp = Response::new()
        .add_attribute("from", from.to_string())
        .add_attribute("to", to.to_string())
        .add_attribute("amount", amount)
        .add_event(balance_change_event(from, format!("-{}", amount)))
        .add_event(balance_change_event(to, amount.to_string()));

    with_checkpoint_msgs(resp, &config, &[from, to])
}

pub fn execute_increase_allowance(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    let allowance = ALLOWANCES
        .may_load(deps.storage, (&info.sender, &spender))?
        .unwrap_or_default()
        .checked_add(amount)?;
    save_allowance(deps.storage, &info.sender, &spender, allowance)?;

    Ok(Response::new()
        .add_attribute("action", "increase_allowance")
        .add_attribute("owner", info.sender)
        .add_attribute("spender", spender)
        .add_attribute("allowance", allowance))
}

pub fn execute_decrease_allowance(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    let allowance = ALLOWANCES
        .may_load(deps.storage, (&info.sender, &spender))?
        .unwrap_or_default()
        .saturating_sub(amount);
    save_allowance(deps.storage, &info.sender, &spender, allowance)?;

    Ok(Response::new()
        .add_attribute("action", "decrease_allowance")
        .add_attribute("owner", info.sender)
        .add_attribute("spender", spender)
        .add_attribute("allowance", allowance))
}

pub fn execute_set_allowed(
    deps: DepsMut,
    info: MessageInfo,
    account: String,
    allowed: bool,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::KycAdmin, &info.sender)?;

    let account = deps.api.addr_validate(&account)?;
    if allowed {
        ALLOWED.save(deps.storage, &account, &true)?;
    } else {
        ALLOWED.remove(deps.storage, &account);
    }

    Ok(Response::new()
        .add_attribute("action", "set_allowed")
        .add_event(allowlist_change_event(&account, allowed)))
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

pub fn execute_set_issuer(
    deps: DepsMut,
    info: MessageInfo,
    issuer: String,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;

    let new_issuer = validate_address(deps.api, "issuer", &issuer)?;
    let mut config = CONFIG.load(deps.storage)?;
    let previous_issuer = config.issuer;
    config.issuer = new_issuer.clone();
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_issuer")
        .add_attribute("previous_issuer", previous_issuer)
        .add_attribute("new_issuer", new_issuer))
}

pub fn execute_set_checkpoint_hook(
    deps: DepsMut,
    info: MessageInfo,
    contract: Option<String>,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;

    let hook = contract
        .map(|c| validate_address(deps.api, "checkpoint_hook", &c))
        .transpose()?;
    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.checkpoint_hook = hook.clone();
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_checkpoint_hook")
        .add_attribute(
            "checkpoint_hook",
            hook.map(|a| a.to_string()).unwrap_or_default(),
        ))
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
// Queries
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Issuer {} => to_json_binary(&IssuerResponse {
            issuer: CONFIG.load(deps.storage)?.issuer,
        }),
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::IsAllowed { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&AllowedResponse {
                allowed: is_allowed(deps.storage, &address)?,
            })
        }
        QueryMsg::AllowedAccounts { start_after, limit } => {
            to_json_binary(&query_allowed_accounts(deps, start_after, limit)?)
        }
        QueryMsg::Allowance { owner, spender } => {
            to_json_binary(&query_allowance(deps, owner, spender)?)
        }
        QueryMsg::Paused {} => to_json_binary(&PausedResponse {
            paused: is_paused(deps.storage)?,
        }),
        QueryMsg::HasRole { role, address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&HasRoleResponse {
                has_role: has_role(deps.storage, role, &address),
            })
        }
    }
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        issuer: config.issuer.to_string(),
        checkpoint_hook: config.checkpoint_hook.map(|a| a.to_string()),
    })
}

pub fn query_balance(deps: Deps, address: String) -> StdResult<BalanceResponse> {
    let address = deps.api.addr_validate(&address)?;
    Ok(BalanceResponse {
        balance: load_balance(deps.storage, &address)?,
    })
}

pub fn query_token_info(deps: Deps) -> StdResult<TokenInfoResponse> {
    let info = TOKEN_INFO.load(deps.storage)?;
    Ok(TokenInfoResponse {
        name: info.name,
        symbol: info.symbol,
        decimals: info.decimals,
        total_supply: info.total_supply,
    })
}

pub fn query_allowed_accounts(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AllowedAccountsResponse> {
    let start = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;

    let accounts = ALLOWED
        .keys(
            deps.storage,
            start.as_ref().map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .map(|k| k.map(|addr| addr.to_string()))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AllowedAccountsResponse { accounts })
}

pub fn query_allowance(deps: Deps, owner: String, spender: String) -> StdResult<AllowanceResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let spender = deps.api.addr_validate(&spender)?;
    let allowance = ALLOWANCES
        .may_load(deps.storage, (&owner, &spender))?
        .unwrap_or_default();

    Ok(AllowanceResponse {
        allowance,
        expires: Expiration::Never {},
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

fn load_balance(storage: &dyn Storage, account: &Addr) -> StdResult<Uint128> {
    Ok(BALANCES.may_load(storage, account)?.unwrap_or_default())
}

fn is_allowed(storage: &dyn Storage, account: &Addr) -> StdResult<bool> {
    Ok(ALLOWED.may_load(storage, account)?.unwrap_or(false))
}

/// Only the issuer and allowlisted accounts may receive or give up shares through
/// issue and retire.
fn assert_eligible(
    storage: &dyn Storage,
    config: &Config,
    account: &Addr,
) -> Result<(), ContractError> {
    if *account != config.issuer && !is_allowed(storage, account)? {
        return Err(ContractError::NotEligible {
            account: account.to_string(),
        });
    }

    Ok(())
}

fn save_allowance(
    storage: &mut dyn Storage,
    owner: &Addr,
    spender: &Addr,
    allowance: Uint128,
) -> StdResult<()> {
    if allowance.is_zero() {
        ALLOWANCES.remove(storage, (owner, spender));
        Ok(())
    } else {
        ALLOWANCES.save(storage, (owner, spender), &allowance)
    }
}

fn balance_change_event(account: &Addr, delta: String) -> Event {
    Event::new("balance_change")
        .add_attribute("account", account.to_string())
        .add_attribute("delta", delta)
}

fn allowlist_change_event(account: &Addr, allowed: bool) -> Event {
    Event::new("allowlist_change")
        .add_attribute("account", account.to_string())
        .add_attribute("allowed", allowed.to_string())
}

/// When a checkpoint hook is configured, appends a `Checkpoint` call for every account
/// whose balance just changed. Plain messages: a failing checkpoint reverts the move.
fn with_checkpoint_msgs(
    resp: Response,
    config: &Config,
    accounts: &[&Addr],
) -> Result<Response, ContractError> {
    let Some(hook) = &config.checkpoint_hook else {
        return Ok(resp);
    };

    let mut resp = resp;
    for account in accounts {
        resp = resp.add_message(WasmMsg::Execute {
            contract_addr: hook.to_string(),
            msg: to_json_binary(&CheckpointHookMsg::Checkpoint {
                account: account.to_string(),
            })?,
            funds: vec![],
        });
    }

    Ok(resp)
}
