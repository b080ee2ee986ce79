use cosmwasm_std::Empty;
use cw_multi_test::{Contract, ContractWrapper};

pub fn share_ledger_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        rwa_share_ledger::contract::execute,
        rwa_share_ledger::contract::instantiate,
        rwa_share_ledger::contract::query,
    );
    Box::new(contract)
}

pub fn distribution_ledger_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    )
    .with_reply(crate::contract::reply)
    .with_migrate(crate::contract::migrate);
    Box::new(contract)
}

pub fn cw20_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}
