use crate::error::ContractError;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128, Uint256};

/// Fixed-point scale of the reward accumulator (10^27).
pub const PRECISION: Uint256 = Uint256::from_u128(1_000_000_000_000_000_000_000_000_000);

/// Configuration. Both addresses are fixed at instantiation.
#[cw_serde]
pub struct Config {
    /// Share ledger whose balances and total supply weight the payouts.
    pub share_ledger: Addr,
    /// cw20 contract the revenue is paid in.
    pub payout_token: Addr,
}

/// Global accounting.
#[cw_serde]
pub struct State {
    /// Cumulative payout per share since inception, scaled by `PRECISION`. Never decreases.
    pub acc_reward_per_share: Uint256,
    pub total_deposited: Uint128,
    pub total_claimed: Uint128,
    pub deposit_count: u64,
}

impl Default for State {
    fn default() -> Self {
        State {
            acc_reward_per_share: Uint256::zero(),
            total_deposited: Uint128::zero(),
            total_claimed: Uint128::zero(),
            deposit_count: 0,
        }
    }
}

impl State {
    /// Advances the accumulator by `floor(amount * PRECISION / total_supply)` and returns
    /// the increment.
    pub fn record_deposit(
        &mut self,
        amount: Uint128,
        total_supply: Uint128,
    ) -> Result<Uint256, ContractError> {
        if total_supply.is_zero() {
            return Err(ContractError::NoShares {});
        }

        let delta = Uint256::from(amount)
            .checked_mul(PRECISION)?
            .checked_div(Uint256::from(total_supply))?;

        self.acc_reward_per_share = self.acc_reward_per_share.checked_add(delta)?;
        self.total_deposited = self.total_deposited.checked_add(amount)?;
        self.deposit_count += 1;

        Ok(delta)
    }
}

/// Per-holder accounting. `shares` and `reward_debt` describe the last sync point
/// (checkpoint or claim); `unclaimed` holds entitlement settled at a checkpoint.
/// `reward_debt` and `unclaimed` stay scaled by `PRECISION`: only payouts are floored,
/// so sub-unit remainders carry over from one sync to the next.
#[cw_serde]
#[derive(Default)]
pub struct HolderInfo {
    pub shares: Uint128,
    pub reward_debt: Uint256,
    pub unclaimed: Uint256,
    pub claimed: Uint128,
}

/// `shares * acc`, still scaled by `PRECISION`.
pub fn scaled_accrual(
    shares: Uint128,
    acc_reward_per_share: Uint256,
) -> Result<Uint256, ContractError> {
    Ok(Uint256::from(shares).checked_mul(acc_reward_per_share)?)
}

/// `floor(scaled / PRECISION)`, in payout token units.
pub fn to_units(scaled: Uint256) -> Result<Uint128, ContractError> {
    Ok(Uint128::try_from(scaled.checked_div(PRECISION)?)?)
}

impl HolderInfo {
    fn scaled_pending(
        &self,
        balance: Uint128,
        acc_reward_per_share: Uint256,
    ) -> Result<Uint256, ContractError> {
        let accrued = scaled_accrual(balance, acc_reward_per_share)?;
        Ok(self
            .unclaimed
            .checked_add(accrued.saturating_sub(self.reward_debt))?)
    }

    /// Claimable amount, computed against the holder's *current* share balance.
    pub fn pending(
        &self,
        balance: Uint128,
        acc_reward_per_share: Uint256,
    ) -> Result<Uint128, ContractError> {
        to_units(self.scaled_pending(balance, acc_reward_per_share)?)
    }

    /// Settles what the previously synced shares earned up to now, then resyncs the debt
    /// to the new balance. Moves no funds.
    pub fn checkpoint(
        &mut self,
        balance: Uint128,
        acc_reward_per_share: Uint256,
    ) -> Result<(), ContractError> {
        let settled =
            scaled_accrual(self.shares, acc_reward_per_share)?.saturating_sub(self.reward_debt);
        self.unclaimed = self.unclaimed.checked_add(settled)?;
        self.shares = balance;
        self.reward_debt = scaled_accrual(balance, acc_reward_per_share)?;

        Ok(())
    }

    /// Seals the whole units of the current pending amount as paid and returns them.
    /// The sub-unit remainder stays in `unclaimed`.
    pub fn claim(
        &mut self,
        balance: Uint128,
        acc_reward_per_share: Uint256,
    ) -> Result<Uint128, ContractError> {
        let scaled = self.scaled_pending(balance, acc_reward_per_share)?;
        let amount = to_units(scaled)?;
        self.unclaimed = scaled.checked_sub(Uint256::from(amount).checked_mul(PRECISION)?)?;
        self.shares = balance;
        self.reward_debt = scaled_accrual(balance, acc_reward_per_share)?;
        self.claimed = self.claimed.checked_add(amount)?;

        Ok(amount)
    }
}
