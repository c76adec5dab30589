use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::events::TokensDeposited;
use crate::state::PoolState;

/// Fund the pool vault. Anyone may deposit; only the balance above
/// `total_tokens_in_vesting` can back new grants.
pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
    require!(amount > 0, VestingError::InvalidAmount);

    let pool = &ctx.accounts.pool;
    require_keys_eq!(
        ctx.accounts.depositor_token_account.mint,
        pool.mint,
        VestingError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.depositor_token_account.owner,
        ctx.accounts.depositor.key(),
        VestingError::InvalidTokenAccount
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.vault.reload()?;

    emit!(TokensDeposited {
        depositor: ctx.accounts.depositor.key(),
        amount,
        vault_balance: ctx.accounts.vault.amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DepositTokens<'info> {
    #[account(
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

    #[account(mut)]
    pub depositor_token_account: Account<'info, TokenAccount>,

    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
