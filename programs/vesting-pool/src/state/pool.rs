use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::Domain;

/// Pool-wide conservation totals.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolLedger {
    /// Sum over entries of (vesting ceiling - amount claimed).
    pub total_tokens_in_vesting: u128,
}

impl PoolLedger {
    pub const SIZE: usize = 16;

    /// Funded balance not yet committed to any grant.
    pub fn tokens_available(&self, balance: u128) -> u128 {
        balance.saturating_sub(self.total_tokens_in_vesting)
    }

    pub fn lock(&mut self, amount: u128) -> core::result::Result<(), VestingError> {
        self.total_tokens_in_vesting = self
            .total_tokens_in_vesting
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(())
    }

    pub fn release(&mut self, amount: u128) -> core::result::Result<(), VestingError> {
        self.total_tokens_in_vesting = self
            .total_tokens_in_vesting
            .checked_sub(amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(())
    }
}

/// Pool PDA (`[POOL_SEED, mint, manager]`).
#[account]
#[derive(Debug, Default)]
pub struct PoolState {
    /// Token mint.
    pub mint: Pubkey,
    /// Token vault owned by this PDA.
    pub vault: Pubkey,
    /// Manager authority: pause/cancel, manual grants, root, sweep.
    pub manager: Pubkey,
    /// Network identifier mixed into every grant hash.
    pub chain_id: u64,
    /// Grants come from a merkle root instead of `add_vesting`.
    pub airdrop: bool,
    pub ledger: PoolLedger,
}

impl PoolState {
    pub const SIZE: usize =
        32 + // mint
        32 + // vault
        32 + // manager
        8 +  // chain_id
        1 +  // airdrop
        PoolLedger::SIZE;

    /// Engine view of this pool; `pool` is this account's own address.
    pub fn config(&self, pool: Pubkey) -> PoolConfig {
        PoolConfig {
            manager: self.manager,
            domain: Domain::new(pool, self.chain_id),
            airdrop: self.airdrop,
        }
    }
}

/// Static parameters the ledger operations run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    pub manager: Pubkey,
    pub domain: Domain,
    pub airdrop: bool,
}
