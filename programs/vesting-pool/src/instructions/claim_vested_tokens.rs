use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{POOL_SEED, VAULT_SEED, VESTING_SEED};
use crate::error::VestingError;
use crate::ledger::{AccountStore, VestingPool};
use crate::state::{PoolState, VestingEntry};
use crate::utils::time;
use crate::utils::vault::{VaultMover, VaultTransfer};

/// Claim vested tokens of a grant into `beneficiary_token_account`.
/// `amount == CLAIM_ALL` takes everything currently claimable.
pub fn claim_vested_tokens(
    ctx: Context<ClaimVestedTokens>,
    grant_hash: [u8; 32],
    amount: u128,
) -> Result<()> {
    let now = time::unix_now()?;

    // Capture AccountInfos/keys before taking mutable borrows.
    let pool_ai = ctx.accounts.pool.to_account_info();
    let pool_key = ctx.accounts.pool.key();
    let config = ctx.accounts.pool.config(pool_key);
    let mint = ctx.accounts.pool.mint;
    let manager = ctx.accounts.pool.manager;
    let owner = ctx.accounts.owner.key();
    let beneficiary = ctx.accounts.beneficiary_token_account.key();

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
            destination: ctx.accounts.beneficiary_token_account.to_account_info(),
            signer_seeds,
        },
    );

    let store = AccountStore::new(
        grant_hash,
        &mut ctx.accounts.pool.ledger,
        &mut ctx.accounts.vesting,
    );
    let claimed = VestingPool::new(config, store)
        .claim_vested_tokens(&mut token, &owner, &grant_hash, &beneficiary, amount, now)?
        .emit();

    msg!("claimed {} to {}", claimed, beneficiary);
    Ok(())
}

#[derive(Accounts)]
#[instruction(grant_hash: [u8; 32])]
pub struct ClaimVestedTokens<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.mint.as_ref(), pool.manager.as_ref()],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump,
        constraint = vault.mint == pool.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [VESTING_SEED, pool.key().as_ref(), grant_hash.as_ref()],
        bump
    )]
    pub vesting: Account<'info, VestingEntry>,

    #[account(
        mut,
        constraint = beneficiary_token_account.mint == pool.mint @ VestingError::InvalidTokenMint,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
