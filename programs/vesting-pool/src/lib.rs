use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
#[cfg(not(target_os = "solana"))]
pub mod plan;
pub mod state;
pub mod utils;

use instructions::*;
use state::{GrantDescriptor, VestingTerms};

declare_id!("61EiRiRNSU4ZEhnn8JpC6L9VRHz6oKvD9YzSP6bNZNWp");

#[program]
pub mod vesting_pool {
    use super::*;

    pub fn initialize_pool(ctx: Context<InitializePool>, chain_id: u64) -> Result<()> {
        instructions::initialize_pool::initialize_pool(ctx, chain_id)
    }

    pub fn initialize_airdrop(
        ctx: Context<InitializeAirdrop>,
        chain_id: u64,
        redeem_deadline: i64,
    ) -> Result<()> {
        instructions::initialize_pool::initialize_airdrop(ctx, chain_id, redeem_deadline)
    }

    pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
        instructions::deposit_tokens::deposit_tokens(ctx, amount)
    }

    pub fn add_vesting(
        ctx: Context<AddVesting>,
        grant_hash: [u8; 32],
        descriptor: GrantDescriptor,
    ) -> Result<()> {
        instructions::add_vesting::add_vesting(ctx, grant_hash, descriptor)
    }

    pub fn pause_vesting(ctx: Context<ManageVesting>, grant_hash: [u8; 32]) -> Result<()> {
        instructions::manage_vesting::pause_vesting(ctx, grant_hash)
    }

    pub fn unpause_vesting(ctx: Context<ManageVesting>, grant_hash: [u8; 32]) -> Result<()> {
        instructions::manage_vesting::unpause_vesting(ctx, grant_hash)
    }

    pub fn cancel_vesting(ctx: Context<ManageVesting>, grant_hash: [u8; 32]) -> Result<()> {
        instructions::manage_vesting::cancel_vesting(ctx, grant_hash)
    }

    pub fn claim_vested_tokens(
        ctx: Context<ClaimVestedTokens>,
        grant_hash: [u8; 32],
        amount: u128,
    ) -> Result<()> {
        instructions::claim_vested_tokens::claim_vested_tokens(ctx, grant_hash, amount)
    }

    pub fn emit_vesting_quote(ctx: Context<EmitVestingQuote>, grant_hash: [u8; 32]) -> Result<()> {
        instructions::emit_vesting_quote::emit_vesting_quote(ctx, grant_hash)
    }

    pub fn initialize_root(ctx: Context<InitializeRoot>, root: [u8; 32]) -> Result<()> {
        instructions::initialize_root::initialize_root(ctx, root)
    }

    pub fn redeem(
        ctx: Context<Redeem>,
        grant_hash: [u8; 32],
        terms: VestingTerms,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::redeem::redeem(ctx, grant_hash, terms, proof)
    }

    pub fn redeem_for(
        ctx: Context<Redeem>,
        grant_hash: [u8; 32],
        account: Pubkey,
        terms: VestingTerms,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::redeem::redeem_for(ctx, grant_hash, account, terms, proof)
    }

    pub fn claim_unused_tokens(ctx: Context<ClaimUnusedTokens>) -> Result<()> {
        instructions::claim_unused_tokens::claim_unused_tokens(ctx)
    }
}
