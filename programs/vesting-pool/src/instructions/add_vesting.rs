use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{POOL_SEED, VAULT_SEED, VESTING_SEED};
use crate::ledger::{AccountStore, VestingPool};
use crate::state::{GrantDescriptor, PoolState, VestingEntry};
use crate::utils::vault::VaultMover;

pub fn add_vesting(
    ctx: Context<AddVesting>,
    grant_hash: [u8; 32],
    descriptor: GrantDescriptor,
) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let config = ctx.accounts.pool.config(pool_key);
    let manager = ctx.accounts.manager.key();
    let token = VaultMover::read_only(&ctx.accounts.vault);

    let store = AccountStore::new(
        grant_hash,
        &mut ctx.accounts.pool.ledger,
        &mut ctx.accounts.vesting,
    );
    VestingPool::new(config, store)
        .add_vesting(&token, &manager, &descriptor)?
        .emit();

    msg!(
        "vesting of {} added for {}",
        descriptor.terms.amount,
        descriptor.account
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(grant_hash: [u8; 32])]
pub struct AddVesting<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.mint.as_ref(), pool.manager.as_ref()],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    #[account(seeds = [VAULT_SEED, pool.key().as_ref()], bump)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = manager,
        space = 8 + VestingEntry::SIZE,
        seeds = [VESTING_SEED, pool.key().as_ref(), grant_hash.as_ref()],
        bump
    )]
    pub vesting: Account<'info, VestingEntry>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub system_program: Program<'info, System>,
}
