//! Program events.
//!
//! Ledger operations never emit directly; they return an [`Outcome`] carrying
//! the records they produced, and the instruction handler emits them once the
//! whole instruction has succeeded.

use anchor_lang::prelude::*;

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub manager: Pubkey,
    pub chain_id: u64,
    pub airdrop: bool,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokensDeposited {
    pub depositor: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddedVesting {
    pub id: [u8; 32],
    pub account: Pubkey,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PausedVesting {
    pub id: [u8; 32],
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnpausedVesting {
    pub id: [u8; 32],
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelledVesting {
    pub id: [u8; 32],
    /// Unvested remainder returned to the pool.
    pub released: u128,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimedVesting {
    pub id: [u8; 32],
    pub account: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u128,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootInitialized {
    pub root: [u8; 32],
    pub redeem_deadline: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnusedTokensClaimed {
    pub to: Pubkey,
    pub amount: u128,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VestingQuote {
    pub id: [u8; 32],
    pub vested_amount: u128,
    pub claimed_amount: u128,
    pub claimable: u128,
}

/// Records produced by ledger and airdrop operations, in emission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolEvent {
    AddedVesting(AddedVesting),
    PausedVesting(PausedVesting),
    UnpausedVesting(UnpausedVesting),
    CancelledVesting(CancelledVesting),
    ClaimedVesting(ClaimedVesting),
    RootInitialized(RootInitialized),
    UnusedTokensClaimed(UnusedTokensClaimed),
}

impl PoolEvent {
    pub fn emit(&self) {
        match self {
            PoolEvent::AddedVesting(e) => emit!(e.clone()),
            PoolEvent::PausedVesting(e) => emit!(e.clone()),
            PoolEvent::UnpausedVesting(e) => emit!(e.clone()),
            PoolEvent::CancelledVesting(e) => emit!(e.clone()),
            PoolEvent::ClaimedVesting(e) => emit!(e.clone()),
            PoolEvent::RootInitialized(e) => emit!(e.clone()),
            PoolEvent::UnusedTokensClaimed(e) => emit!(e.clone()),
        }
    }
}

/// Value of a state-changing operation plus the events it produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub events: Vec<PoolEvent>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, event: PoolEvent) -> Self {
        Self {
            value,
            events: vec![event],
        }
    }

    /// Emit every recorded event and hand back the value.
    pub fn emit(self) -> T {
        for event in &self.events {
            event.emit();
        }
        self.value
    }
}
