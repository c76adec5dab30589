//! Vesting ledger operations over a [`LedgerStore`].
//!
//! Every mutating call loads what it needs, validates, computes on copies and
//! writes back only after the last fallible step (including token transfers),
//! so a failed call leaves the store untouched.

pub mod airdrop;
pub mod store;
pub mod token;

use anchor_lang::prelude::*;

use crate::ensure;
use crate::error::VestingError;
use crate::events::{
    AddedVesting, CancelledVesting, ClaimedVesting, Outcome, PausedVesting, PoolEvent,
    UnpausedVesting,
};
use crate::state::{GrantDescriptor, PoolConfig, VestedAmounts, VestingEntry};
use crate::utils::hash::Hash;

pub use store::*;
pub use token::*;

pub struct VestingPool<S> {
    config: PoolConfig,
    store: S,
}

impl<S: LedgerStore> VestingPool<S> {
    pub fn new(config: PoolConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Grant hash of `descriptor` in this pool's domain.
    pub fn vesting_hash(&self, descriptor: &GrantDescriptor) -> Hash {
        descriptor.hash(&self.config.domain)
    }

    pub fn vesting(&self, id: &Hash) -> core::result::Result<VestingEntry, VestingError> {
        self.store.load(id).ok_or(VestingError::VestingNotFound)
    }

    pub fn total_tokens_in_vesting(&self) -> u128 {
        self.store.totals().total_tokens_in_vesting
    }

    pub fn tokens_available_for_vesting<T: TokenMover>(
        &self,
        token: &T,
    ) -> core::result::Result<u128, VestingError> {
        Ok(self.store.totals().tokens_available(token.balance_of()?))
    }

    fn only_manager(&self, caller: &Pubkey) -> core::result::Result<(), VestingError> {
        ensure!(*caller == self.config.manager, VestingError::NotManager);
        Ok(())
    }

    /// Manager-created grant; not available on airdrop pools.
    pub fn add_vesting<T: TokenMover>(
        &mut self,
        token: &T,
        caller: &Pubkey,
        descriptor: &GrantDescriptor,
    ) -> core::result::Result<Outcome<Hash>, VestingError> {
        ensure!(!self.config.airdrop, VestingError::NotAvailable);
        self.only_manager(caller)?;
        self.create(token, descriptor)
    }

    pub(crate) fn create<T: TokenMover>(
        &mut self,
        token: &T,
        descriptor: &GrantDescriptor,
    ) -> core::result::Result<Outcome<Hash>, VestingError> {
        ensure!(
            descriptor.account != Pubkey::default(),
            VestingError::InvalidAccount
        );
        let entry = VestingEntry::from_descriptor(descriptor)?;
        let id = self.vesting_hash(descriptor);
        ensure!(
            self.store.load(&id).is_none(),
            VestingError::VestingIdAlreadyUsed
        );

        let mut totals = self.store.totals();
        ensure!(
            totals.tokens_available(token.balance_of()?) >= entry.amount,
            VestingError::InsufficientBalance
        );
        totals.lock(entry.amount)?;

        self.store.store(id, entry)?;
        self.store.store_totals(totals);
        Ok(Outcome::new(
            id,
            PoolEvent::AddedVesting(AddedVesting {
                id,
                account: descriptor.account,
            }),
        ))
    }

    pub fn calculate_vested_amount(
        &self,
        id: &Hash,
        now: u64,
    ) -> core::result::Result<VestedAmounts, VestingError> {
        self.vesting(id)?.vested_amounts(now)
    }

    pub fn pause_vesting(
        &mut self,
        caller: &Pubkey,
        id: &Hash,
        now: u64,
    ) -> core::result::Result<Outcome<()>, VestingError> {
        self.only_manager(caller)?;
        let mut entry = self.vesting(id)?;
        entry.pause(now)?;
        self.store.store(*id, entry)?;
        Ok(Outcome::new((), PoolEvent::PausedVesting(PausedVesting { id: *id })))
    }

    pub fn unpause_vesting(
        &mut self,
        caller: &Pubkey,
        id: &Hash,
        now: u64,
    ) -> core::result::Result<Outcome<()>, VestingError> {
        self.only_manager(caller)?;
        let mut entry = self.vesting(id)?;
        entry.unpause(now)?;
        self.store.store(*id, entry)?;
        Ok(Outcome::new(
            (),
            PoolEvent::UnpausedVesting(UnpausedVesting { id: *id }),
        ))
    }

    /// Cancel a managed grant; returns the unvested amount released to the pool.
    pub fn cancel_vesting(
        &mut self,
        caller: &Pubkey,
        id: &Hash,
        now: u64,
    ) -> core::result::Result<Outcome<u128>, VestingError> {
        self.only_manager(caller)?;
        let mut entry = self.vesting(id)?;
        let released = entry.cancel(now)?;

        let mut totals = self.store.totals();
        totals.release(released)?;

        self.store.store(*id, entry)?;
        self.store.store_totals(totals);
        Ok(Outcome::new(
            released,
            PoolEvent::CancelledVesting(CancelledVesting { id: *id, released }),
        ))
    }

    /// Transfer vested tokens of `id` to `beneficiary`. `requested` may be
    /// [`crate::constants::CLAIM_ALL`] to take everything claimable.
    pub fn claim_vested_tokens<T: TokenMover>(
        &mut self,
        token: &mut T,
        caller: &Pubkey,
        id: &Hash,
        beneficiary: &Pubkey,
        requested: u128,
        now: u64,
    ) -> core::result::Result<Outcome<u128>, VestingError> {
        ensure!(
            *beneficiary != Pubkey::default(),
            VestingError::ZeroBeneficiary
        );
        let mut entry = self
            .store
            .load(id)
            .filter(|entry| entry.account == *caller)
            .ok_or(VestingError::NotOwner)?;

        let amount = entry.claim(requested, now)?;
        let mut totals = self.store.totals();
        totals.release(amount)?;

        token.transfer(beneficiary, amount)?;

        self.store.store(*id, entry)?;
        self.store.store_totals(totals);
        Ok(Outcome::new(
            amount,
            PoolEvent::ClaimedVesting(ClaimedVesting {
                id: *id,
                account: *caller,
                beneficiary: *beneficiary,
                amount,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CLAIM_ALL, SECONDS_PER_WEEK};
    use crate::state::{Domain, VestingStatus, VestingTerms};

    const UNIT: u128 = 1_000_000_000_000_000_000;
    const START: u64 = 1_700_000_000;
    const WEEK: u64 = SECONDS_PER_WEEK;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn manager() -> Pubkey {
        key(0xAA)
    }

    fn pool() -> VestingPool<MemoryStore> {
        VestingPool::new(
            PoolConfig {
                manager: manager(),
                domain: Domain::new(key(0xEE), 1),
                airdrop: false,
            },
            MemoryStore::default(),
        )
    }

    fn grant(account: Pubkey, managed: bool, weeks: u16, amount: u128) -> GrantDescriptor {
        GrantDescriptor::new(
            account,
            VestingTerms {
                curve_type: 0,
                managed,
                duration_weeks: weeks,
                start_date: START,
                amount,
            },
        )
    }

    fn add(pool: &mut VestingPool<MemoryStore>, token: &MockToken, g: &GrantDescriptor) -> Hash {
        pool.add_vesting(token, &manager(), g).unwrap().value
    }

    fn assert_conserved(pool: &VestingPool<MemoryStore>) {
        assert_eq!(
            pool.store().audit_total().unwrap(),
            pool.total_tokens_in_vesting()
        );
    }

    #[test]
    fn add_vesting_locks_tokens() {
        let mut pool = pool();
        let token = MockToken::funded(1_000);
        let g = grant(key(1), true, 104, 600);

        let outcome = pool.add_vesting(&token, &manager(), &g).unwrap();
        let id = outcome.value;
        assert_eq!(id, pool.vesting_hash(&g));
        assert_eq!(
            outcome.events,
            vec![PoolEvent::AddedVesting(AddedVesting {
                id,
                account: key(1)
            })]
        );
        assert_eq!(pool.total_tokens_in_vesting(), 600);
        assert_eq!(pool.tokens_available_for_vesting(&token).unwrap(), 400);

        let entry = pool.vesting(&id).unwrap();
        assert_eq!(entry.amount_claimed, 0);
        assert_eq!(entry.status(), VestingStatus::Active);
        assert_conserved(&pool);
    }

    #[test]
    fn add_vesting_preconditions() {
        let mut pool = pool();
        let token = MockToken::funded(1_000);
        let g = grant(key(1), true, 104, 600);

        assert!(matches!(
            pool.add_vesting(&token, &key(1), &g),
            Err(VestingError::NotManager)
        ));

        let mut bad_curve = g;
        bad_curve.terms.curve_type = 7;
        assert!(matches!(
            pool.add_vesting(&token, &manager(), &bad_curve),
            Err(VestingError::InvalidCurve)
        ));
        assert!(matches!(
            pool.add_vesting(&token, &manager(), &grant(Pubkey::default(), true, 104, 1)),
            Err(VestingError::InvalidAccount)
        ));

        add(&mut pool, &token, &g);
        assert!(matches!(
            pool.add_vesting(&token, &manager(), &g),
            Err(VestingError::VestingIdAlreadyUsed)
        ));
        assert!(matches!(
            pool.add_vesting(&token, &manager(), &grant(key(2), true, 104, 401)),
            Err(VestingError::InsufficientBalance)
        ));
        add(&mut pool, &token, &grant(key(2), true, 104, 400));
        assert_eq!(pool.tokens_available_for_vesting(&token).unwrap(), 0);
        assert_eq!(pool.store().len(), 2);
    }

    #[test]
    fn airdrop_pools_reject_manual_grants() {
        let mut pool = pool();
        pool.config.airdrop = true;
        let token = MockToken::funded(1_000);
        assert!(matches!(
            pool.add_vesting(&token, &manager(), &grant(key(1), true, 104, 1)),
            Err(VestingError::NotAvailable)
        ));
    }

    #[test]
    fn unknown_vesting_is_not_found() {
        let mut pool = pool();
        assert!(matches!(
            pool.calculate_vested_amount(&[9; 32], START),
            Err(VestingError::VestingNotFound)
        ));
        assert!(matches!(
            pool.pause_vesting(&manager(), &[9; 32], START),
            Err(VestingError::VestingNotFound)
        ));
    }

    #[test]
    fn only_manager_controls_lifecycle() {
        let mut pool = pool();
        let token = MockToken::funded(1_000);
        let id = add(&mut pool, &token, &grant(key(1), true, 104, 600));

        assert!(matches!(
            pool.pause_vesting(&key(1), &id, START),
            Err(VestingError::NotManager)
        ));
        assert!(matches!(
            pool.unpause_vesting(&key(1), &id, START),
            Err(VestingError::NotManager)
        ));
        assert!(matches!(
            pool.cancel_vesting(&key(1), &id, START),
            Err(VestingError::NotManager)
        ));
    }

    #[test]
    fn pause_unpause_shifts_schedule() {
        let mut pool = pool();
        let amount = 200_000 * UNIT;
        let token = MockToken::funded(amount);
        let id = add(&mut pool, &token, &grant(key(1), true, 104, amount));

        let paused = pool.pause_vesting(&manager(), &id, START + 28 * WEEK).unwrap();
        assert_eq!(
            paused.events,
            vec![PoolEvent::PausedVesting(PausedVesting { id })]
        );
        pool.unpause_vesting(&manager(), &id, START + 32 * WEEK)
            .unwrap();

        let at_56 = pool.calculate_vested_amount(&id, START + 56 * WEEK).unwrap();
        assert_eq!(at_56.vested_amount, amount / 2);
        assert_eq!(at_56.claimed_amount, 0);
    }

    #[test]
    fn cancel_releases_unvested_tokens() {
        let mut pool = pool();
        let amount = 200_000 * UNIT;
        let token = MockToken::funded(amount);
        let id = add(&mut pool, &token, &grant(key(1), true, 104, amount));

        let outcome = pool.cancel_vesting(&manager(), &id, START + 3_600).unwrap();
        let frozen = 11_446_886_446_886_446_886;
        assert_eq!(outcome.value, amount - frozen);
        assert_eq!(
            outcome.events,
            vec![PoolEvent::CancelledVesting(CancelledVesting {
                id,
                released: amount - frozen
            })]
        );
        assert_eq!(pool.total_tokens_in_vesting(), frozen);
        assert_eq!(pool.tokens_available_for_vesting(&token).unwrap(), amount - frozen);
        assert_eq!(
            pool.calculate_vested_amount(&id, START + 200 * WEEK)
                .unwrap()
                .vested_amount,
            frozen
        );
        assert_conserved(&pool);

        assert!(matches!(
            pool.cancel_vesting(&manager(), &id, START + 7_200),
            Err(VestingError::AlreadyCancelled)
        ));
        assert!(matches!(
            pool.unpause_vesting(&manager(), &id, START + 7_200),
            Err(VestingError::CancelledCannotUnpause)
        ));
    }

    #[test]
    fn unmanaged_grants_cannot_be_paused_or_cancelled() {
        let mut pool = pool();
        let token = MockToken::funded(1_000);
        let id = add(&mut pool, &token, &grant(key(1), false, 104, 600));
        assert!(matches!(
            pool.pause_vesting(&manager(), &id, START),
            Err(VestingError::NotManaged)
        ));
        assert!(matches!(
            pool.cancel_vesting(&manager(), &id, START),
            Err(VestingError::NotManaged)
        ));
    }

    #[test]
    fn claim_checks_beneficiary_then_owner() {
        let mut pool = pool();
        let mut token = MockToken::funded(1_000);
        let id = add(&mut pool, &token, &grant(key(1), true, 2, 1_000));

        assert!(matches!(
            pool.claim_vested_tokens(&mut token, &key(1), &[9; 32], &Pubkey::default(), 1, START),
            Err(VestingError::ZeroBeneficiary)
        ));
        assert!(matches!(
            pool.claim_vested_tokens(&mut token, &key(1), &[9; 32], &key(5), 1, START),
            Err(VestingError::NotOwner)
        ));
        assert!(matches!(
            pool.claim_vested_tokens(&mut token, &key(2), &id, &key(5), 1, START + WEEK),
            Err(VestingError::NotOwner)
        ));
        assert!(matches!(
            pool.claim_vested_tokens(&mut token, &key(1), &id, &key(5), 1, START - 1),
            Err(VestingError::NotYetActive)
        ));
    }

    #[test]
    fn partial_claims_cannot_exceed_vested() {
        let mut pool = pool();
        let amount = 1_000 * UNIT;
        let mut token = MockToken::funded(amount);
        let owner = key(1);
        let id = add(&mut pool, &token, &grant(owner, true, 2, amount));
        let now = START + WEEK;

        let first = pool
            .claim_vested_tokens(&mut token, &owner, &id, &key(5), amount / 4, now)
            .unwrap();
        assert_eq!(first.value, amount / 4);
        assert_eq!(
            first.events,
            vec![PoolEvent::ClaimedVesting(ClaimedVesting {
                id,
                account: owner,
                beneficiary: key(5),
                amount: amount / 4,
            })]
        );
        pool.claim_vested_tokens(&mut token, &owner, &id, &key(5), amount / 8, now)
            .unwrap();
        assert!(matches!(
            pool.claim_vested_tokens(&mut token, &owner, &id, &key(5), amount / 4, now),
            Err(VestingError::ExceedsVested)
        ));
        assert_eq!(token.sent_to(&key(5)), amount * 3 / 8);
        assert_eq!(pool.total_tokens_in_vesting(), amount * 5 / 8);
        assert_conserved(&pool);
    }

    #[test]
    fn claim_all_drains_after_full_vesting() {
        let mut pool = pool();
        let amount = 1_000 * UNIT;
        let mut token = MockToken::funded(amount);
        let owner = key(1);
        let id = add(&mut pool, &token, &grant(owner, true, 2, amount));

        pool.claim_vested_tokens(&mut token, &owner, &id, &key(5), 7, START + WEEK)
            .unwrap();
        let rest = pool
            .claim_vested_tokens(&mut token, &owner, &id, &key(6), CLAIM_ALL, START + 5 * WEEK)
            .unwrap()
            .value;
        assert_eq!(rest, amount - 7);
        assert_eq!(pool.vesting(&id).unwrap().amount_claimed, amount);
        assert_eq!(token.sent_to(&key(6)), amount - 7);
        assert_eq!(token.balance, 0);
        assert_eq!(pool.total_tokens_in_vesting(), 0);

        // Nothing left: the sentinel claims zero.
        let empty = pool
            .claim_vested_tokens(&mut token, &owner, &id, &key(6), CLAIM_ALL, START + 6 * WEEK)
            .unwrap();
        assert_eq!(empty.value, 0);
    }

    #[test]
    fn claim_while_paused_and_after_cancel() {
        let mut pool = pool();
        let amount = 1_000 * UNIT;
        let mut token = MockToken::funded(amount);
        let owner = key(1);
        let id = add(&mut pool, &token, &grant(owner, true, 2, amount));

        pool.pause_vesting(&manager(), &id, START + WEEK).unwrap();
        let claimed = pool
            .claim_vested_tokens(&mut token, &owner, &id, &owner, CLAIM_ALL, START + 2 * WEEK)
            .unwrap()
            .value;
        assert_eq!(claimed, amount / 2);

        let released = pool.cancel_vesting(&manager(), &id, START + 3 * WEEK).unwrap().value;
        assert_eq!(released, amount / 2);
        assert_eq!(pool.total_tokens_in_vesting(), 0);
        assert_eq!(
            pool.claim_vested_tokens(&mut token, &owner, &id, &owner, CLAIM_ALL, START + 9 * WEEK)
                .unwrap()
                .value,
            0
        );
        assert_conserved(&pool);
    }

    #[test]
    fn failed_transfer_commits_nothing() {
        let mut pool = pool();
        let amount = 1_000 * UNIT;
        let mut token = MockToken::funded(amount);
        let owner = key(1);
        let id = add(&mut pool, &token, &grant(owner, true, 2, amount));

        token.fail_transfers = true;
        assert!(matches!(
            pool.claim_vested_tokens(&mut token, &owner, &id, &owner, CLAIM_ALL, START + WEEK),
            Err(VestingError::TokenTransferFailed)
        ));
        assert_eq!(pool.vesting(&id).unwrap().amount_claimed, 0);
        assert_eq!(pool.total_tokens_in_vesting(), amount);
        assert!(token.transfers.is_empty());

        token.fail_transfers = false;
        assert_eq!(
            pool.claim_vested_tokens(&mut token, &owner, &id, &owner, CLAIM_ALL, START + WEEK)
                .unwrap()
                .value,
            amount / 2
        );
    }
}
