use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{AIRDROP_SEED, POOL_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::ledger::{AccountStore, VestingPool};
use crate::state::{AirdropState, PoolState, VestingEntry};
use crate::utils::time;
use crate::utils::vault::{VaultMover, VaultTransfer};

/// After the redeem deadline, send the vault balance not backing any grant to
/// `destination`.
pub fn claim_unused_tokens(ctx: Context<ClaimUnusedTokens>) -> Result<()> {
    let now = time::unix_now()?;

    let pool_ai = ctx.accounts.pool.to_account_info();
    let pool = &ctx.accounts.pool;
    let config = pool.config(pool.key());
    let mint = pool.mint;
    let manager = pool.manager;
    let caller = ctx.accounts.manager.key();
    let destination = ctx.accounts.destination.key();

    let signer_seeds: &[&[&[u8]]] = &[&[
        POOL_SEED,
        mint.as_ref(),
        manager.as_ref(),
        &[ctx.bumps.pool],
    ]];
    let mut token = VaultMover::new(
        &ctx.accounts.vault,
        VaultTransfer {
            token_program: ctx.accounts.token_program.to_account_info(),
            vault: ctx.accounts.vault.to_account_info(),
            authority: pool_ai,
            destination: ctx.accounts.destination.to_account_info(),
            signer_seeds,
        },
    );

    // The sweep reads the totals and touches no grant.
    let mut ledger = pool.ledger;
    let mut unused = VestingEntry::default();
    let store = AccountStore::new([0u8; 32], &mut ledger, &mut unused);

    let swept = VestingPool::new(config, store)
        .claim_unused_tokens(&ctx.accounts.airdrop, &mut token, &caller, &destination, now)?
        .emit();

    msg!("swept {} unused tokens", swept);
    Ok(())
}

#[derive(Accounts)]
pub struct ClaimUnusedTokens<'info> {
    #[account(
        seeds = [POOL_SEED, pool.mint.as_ref(), pool.manager.as_ref()],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    #[account(seeds = [AIRDROP_SEED, pool.key().as_ref()], bump)]
    pub airdrop: Account<'info, AirdropState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump,
        constraint = vault.mint == pool.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == pool.mint @ VestingError::InvalidTokenMint,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub manager: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
