use cosmwasm_std::testing::{MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, ContractResult, Empty, OwnedDeps, Querier,
    QuerierResult, QueryRequest, StdResult, SystemError, SystemResult, Uint128, WasmQuery,
};
use cw20::{BalanceResponse, TokenInfoResponse};
use rwa_share_ledger_common::msg::{AllowedResponse, IssuerResponse, QueryMsg as ShareQueryMsg};
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

pub fn mock_dependencies() -> OwnedDeps<MockStorage, MockApi, WasmMockQuerier> {
    let api = MockApi::default();
    let custom_querier = WasmMockQuerier::new(
        MockQuerier::new(&[]),
        api.addr_make("share_ledger"),
        api.addr_make("issuer"),
    );

    OwnedDeps {
        storage: MockStorage::default(),
        api,
        querier: custom_querier,
        custom_query_type: PhantomData,
    }
}

/// Answers share ledger queries from in-memory balances and an allowlist.
pub struct WasmMockQuerier {
    base: MockQuerier,
    share_ledger: Addr,
    pub issuer: Addr,
    pub balances: HashMap<String, Uint128>,
    pub allowed: HashSet<String>,
}

impl WasmMockQuerier {
    pub fn set_balance(&mut self, account: &Addr, amount: u128) {
        self.balances
            .insert(account.to_string(), Uint128::new(amount));
    }

    pub fn set_allowed(&mut self, account: &Addr, allowed: bool) {
        if allowed {
            self.allowed.insert(account.to_string());
        } else {
            self.allowed.remove(account.as_str());
        }
    }

    fn total_supply(&self) -> Uint128 {
        self.balances.values().copied().sum()
    }
}

impl Querier for WasmMockQuerier {
    fn raw_query(&self, bin_request: &[u8]) -> QuerierResult {
        let request: QueryRequest<Empty> = match from_json(bin_request) {
            Ok(v) => v,
            Err(e) => {
                return QuerierResult::Err(SystemError::InvalidRequest {
                    error: format!("Parsing query request: {}", e),
                    request: bin_request.into(),
                });
            }
        };
        self.handle_query(&request)
    }
}

impl WasmMockQuerier {
    pub fn handle_query(&self, request: &QueryRequest<Empty>) -> QuerierResult {
        match &request {
            QueryRequest::Wasm(WasmQuery::Smart { contract_addr, msg })
                if *contract_addr == self.share_ledger.as_str() =>
            {
                let q: ShareQueryMsg = from_json(msg).unwrap();
                let resp: StdResult<Binary> = match q {
                    ShareQueryMsg::Balance { address } => to_json_binary(&BalanceResponse {
                        balance: self.balances.get(&address).copied().unwrap_or_default(),
                    }),
                    ShareQueryMsg::TokenInfo {} => to_json_binary(&TokenInfoResponse {
                        name: "Harbor Tower Shares".to_string(),
                        symbol: "HTS".to_string(),
                        decimals: 0,
                        total_supply: self.total_supply(),
                    }),
                    ShareQueryMsg::Issuer {} => to_json_binary(&IssuerResponse {
                        issuer: self.issuer.clone(),
                    }),
                    ShareQueryMsg::IsAllowed { address } => to_json_binary(&AllowedResponse {
                        allowed: self.allowed.contains(&address),
                    }),
                    _ => unimplemented!(),
                };
                SystemResult::Ok(ContractResult::from(resp))
            }
            _ => self.base.handle_query(request),
        }
    }
}

impl WasmMockQuerier {
    fn new(base: MockQuerier, share_ledger: Addr, issuer: Addr) -> WasmMockQuerier {
        WasmMockQuerier {
            base,
            share_ledger,
            issuer,
            balances: Default::default(),
            allowed: Default::default(),
        }
    }
}
