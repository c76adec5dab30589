use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{AIRDROP_SEED, POOL_SEED, VAULT_SEED};
use crate::events::PoolInitialized;
use crate::state::{AirdropState, PoolLedger, PoolState};

pub fn initialize_pool(ctx: Context<InitializePool>, chain_id: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let vault_key = ctx.accounts.vault.key();
    let mint_key = ctx.accounts.mint.key();
    let manager_key = ctx.accounts.manager.key();

    let pool = &mut ctx.accounts.pool;
    init_pool_state(pool, mint_key, vault_key, manager_key, chain_id, false);
    emit_initialized(pool_key, pool);
    Ok(())
}

pub fn initialize_airdrop(
    ctx: Context<InitializeAirdrop>,
    chain_id: u64,
    redeem_deadline: i64,
) -> Result<()> {
    let redeem_deadline = crate::utils::time::to_unix_seconds(redeem_deadline)?;
    let pool_key = ctx.accounts.pool.key();
    let vault_key = ctx.accounts.vault.key();
    let mint_key = ctx.accounts.mint.key();
    let manager_key = ctx.accounts.manager.key();

    let pool = &mut ctx.accounts.pool;
    init_pool_state(pool, mint_key, vault_key, manager_key, chain_id, true);

    // Root stays unset until `initialize_root`.
    let airdrop = &mut ctx.accounts.airdrop;
    airdrop.root = [0u8; 32];
    airdrop.initialized = false;
    airdrop.redeem_deadline = redeem_deadline;

    emit_initialized(pool_key, pool);
    msg!("airdrop redeemable until {}", redeem_deadline);
    Ok(())
}

fn init_pool_state(
    pool: &mut PoolState,
    mint: Pubkey,
    vault: Pubkey,
    manager: Pubkey,
    chain_id: u64,
    airdrop: bool,
) {
    pool.mint = mint;
    pool.vault = vault;
    pool.manager = manager;
    pool.chain_id = chain_id;
    pool.airdrop = airdrop;
    pool.ledger = PoolLedger::default();
}

fn emit_initialized(pool_key: Pubkey, pool: &PoolState) {
    emit!(PoolInitialized {
        pool: pool_key,
        mint: pool.mint,
        manager: pool.manager,
        chain_id: pool.chain_id,
        airdrop: pool.airdrop,
    });
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = manager,
        space = 8 + PoolState::SIZE,
        seeds = [POOL_SEED, mint.key().as_ref(), manager.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    #[account(
        init,
        payer = manager,
        token::mint = mint,
        token::authority = pool,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct InitializeAirdrop<'info> {
    #[account(
        init,
        payer = manager,
        space = 8 + PoolState::SIZE,
        seeds = [POOL_SEED, mint.key().as_ref(), manager.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, PoolState>,

    #[account(
        init,
        payer = manager,
        token::mint = mint,
        token::authority = pool,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = manager,
        space = 8 + AirdropState::SIZE,
        seeds = [AIRDROP_SEED, pool.key().as_ref()],
        bump
    )]
    pub airdrop: Account<'info, AirdropState>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
