use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, VESTING_SEED};
use crate::error::VestingError;
use crate::events::Outcome;
use crate::ledger::{AccountStore, VestingPool};
use crate::state::{PoolState, VestingEntry};
use crate::utils::time;

pub fn pause_vesting(ctx: Context<ManageVesting>, grant_hash: [u8; 32]) -> Result<()> {
    manage(ctx, grant_hash, |pool, manager, now| {
        pool.pause_vesting(manager, &grant_hash, now)
    })?;
    msg!("vesting paused");
    Ok(())
}

pub fn unpause_vesting(ctx: Context<ManageVesting>, grant_hash: [u8; 32]) -> Result<()> {
    manage(ctx, grant_hash, |pool, manager, now| {
        pool.unpause_vesting(manager, &grant_hash, now)
    })?;
    msg!("vesting unpaused");
    Ok(())
}

pub fn cancel_vesting(ctx: Context<ManageVesting>, grant_hash: [u8; 32]) -> Result<()> {
    let released = manage(ctx, grant_hash, |pool, manager, now| {
        pool.cancel_vesting(manager, &grant_hash, now)
    })?;
    msg!("vesting cancelled, {} released", released);
    Ok(())
}

fn manage<R>(
    ctx: Context<ManageVesting>,
    grant_hash: [u8; 32],
    op: impl FnOnce(
        &mut VestingPool<AccountStore<'_>>,
        &Pubkey,
        u64,
    ) -> core::result::Result<Outcome<R>, VestingError>,
) -> Result<R> {
    let now = time::unix_now()?;
    let pool_key = ctx.accounts.pool.key();
    let config = ctx.accounts.pool.config(pool_key);
    let manager = ctx.accounts.manager.key();

    let store = AccountStore::new(
        grant_hash,
        &mut ctx.accounts.pool.ledger,
        &mut ctx.accounts.vesting,
    );
    let mut pool = VestingPool::new(config, store);
    Ok(op(&mut pool, &manager, now)?.emit())
}

#[derive(Accounts)]
#[instruction(grant_hash: [u8; 32])]
pub struct ManageVesting<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.mint.as_ref(), pool.manager.as_ref()],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    #[account(
        mut,
        seeds = [VESTING_SEED, pool.key().as_ref(), grant_hash.as_ref()],
        bump
    )]
    pub vesting: Account<'info, VestingEntry>,

    pub manager: Signer<'info>,
}
