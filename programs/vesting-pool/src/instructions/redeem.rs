use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{AIRDROP_SEED, POOL_SEED, VAULT_SEED, VESTING_SEED};
use crate::ledger::{AccountStore, VestingPool};
use crate::state::{AirdropState, PoolState, VestingEntry, VestingTerms};
use crate::utils::time;
use crate::utils::vault::VaultMover;

/// Redeem a committed grant made out to the signer.
pub fn redeem(
    ctx: Context<Redeem>,
    grant_hash: [u8; 32],
    terms: VestingTerms,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let account = ctx.accounts.payer.key();
    redeem_into(ctx, grant_hash, account, terms, &proof)
}

/// Redeem a committed grant on behalf of `account`; the signer only pays for
/// the vesting account.
pub fn redeem_for(
    ctx: Context<Redeem>,
    grant_hash: [u8; 32],
    account: Pubkey,
    terms: VestingTerms,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    redeem_into(ctx, grant_hash, account, terms, &proof)
}

fn redeem_into(
    ctx: Context<Redeem>,
    grant_hash: [u8; 32],
    account: Pubkey,
    terms: VestingTerms,
    proof: &[[u8; 32]],
) -> Result<()> {
    let now = time::unix_now()?;
    let pool_key = ctx.accounts.pool.key();
    let config = ctx.accounts.pool.config(pool_key);
    let token = VaultMover::read_only(&ctx.accounts.vault);

    let store = AccountStore::new(
        grant_hash,
        &mut ctx.accounts.pool.ledger,
        &mut ctx.accounts.vesting,
    );
    VestingPool::new(config, store)
        .redeem_for(&ctx.accounts.airdrop, &token, account, terms, proof, now)?
        .emit();

    msg!("redeemed {} for {}", terms.amount, account);
    Ok(())
}

#[derive(Accounts)]
#[instruction(grant_hash: [u8; 32])]
pub struct Redeem<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.mint.as_ref(), pool.manager.as_ref()],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    #[account(seeds = [AIRDROP_SEED, pool.key().as_ref()], bump)]
    pub airdrop: Account<'info, AirdropState>,

    #[account(seeds = [VAULT_SEED, pool.key().as_ref()], bump)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + VestingEntry::SIZE,
        seeds = [VESTING_SEED, pool.key().as_ref(), grant_hash.as_ref()],
        bump
    )]
    pub vesting: Account<'info, VestingEntry>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
