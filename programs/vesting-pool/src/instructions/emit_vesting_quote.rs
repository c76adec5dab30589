use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, VESTING_SEED};
use crate::events::VestingQuote;
use crate::ledger::{AccountStore, VestingPool};
use crate::state::{PoolState, VestingEntry};
use crate::utils::time;

/// Read-only: emit what the grant has vested and what is claimable now.
pub fn emit_vesting_quote(ctx: Context<EmitVestingQuote>, grant_hash: [u8; 32]) -> Result<()> {
    let now = time::unix_now()?;
    let pool = &ctx.accounts.pool;
    let config = pool.config(pool.key());

    // Quotes never write back; run the ledger over copies.
    let mut ledger = pool.ledger;
    let mut entry = VestingEntry::clone(&ctx.accounts.vesting);
    let store = AccountStore::new(grant_hash, &mut ledger, &mut entry);

    let amounts = VestingPool::new(config, store).calculate_vested_amount(&grant_hash, now)?;
    let claimable = amounts.claimable()?;

    emit!(VestingQuote {
        id: grant_hash,
        vested_amount: amounts.vested_amount,
        claimed_amount: amounts.claimed_amount,
        claimable,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(grant_hash: [u8; 32])]
pub struct EmitVestingQuote<'info> {
    #[account(
        seeds = [POOL_SEED, pool.mint.as_ref(), pool.manager.as_ref()],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    #[account(
        seeds = [VESTING_SEED, pool.key().as_ref(), grant_hash.as_ref()],
        bump
    )]
    pub vesting: Account<'info, VestingEntry>,
}
