use anchor_lang::prelude::*;

use crate::constants::{AIRDROP_SEED, POOL_SEED};
use crate::ledger::{AccountStore, VestingPool};
use crate::state::{AirdropState, PoolState, VestingEntry};

pub fn initialize_root(ctx: Context<InitializeRoot>, root: [u8; 32]) -> Result<()> {
    let pool = &ctx.accounts.pool;
    let config = pool.config(pool.key());
    let manager = ctx.accounts.manager.key();

    // Setting the root touches no grant.
    let mut ledger = pool.ledger;
    let mut unused = VestingEntry::default();
    let store = AccountStore::new([0u8; 32], &mut ledger, &mut unused);

    VestingPool::new(config, store)
        .initialize_root(&mut ctx.accounts.airdrop, &manager, root)?
        .emit();
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRoot<'info> {
    #[account(
        seeds = [POOL_SEED, pool.mint.as_ref(), pool.manager.as_ref()],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    #[account(
        mut,
        seeds = [AIRDROP_SEED, pool.key().as_ref()],
        bump
    )]
    pub airdrop: Account<'info, AirdropState>,

    pub manager: Signer<'info>,
}
