//! Merkle-committed grants: root setup, proof redemption and the sweep of
//! tokens nobody redeemed before the deadline.

use anchor_lang::prelude::*;

use crate::constants::MAX_PROOF_LEN;
use crate::ensure;
use crate::error::VestingError;
use crate::events::{Outcome, PoolEvent, RootInitialized, UnusedTokensClaimed};
use crate::ledger::{LedgerStore, TokenMover, VestingPool};
use crate::state::{AirdropState, GrantDescriptor, VestingTerms};
use crate::utils::hash::Hash;
use crate::utils::merkle;

impl<S: LedgerStore> VestingPool<S> {
    /// Commit the grant set. Settable once.
    pub fn initialize_root(
        &self,
        airdrop: &mut AirdropState,
        caller: &Pubkey,
        root: Hash,
    ) -> core::result::Result<Outcome<()>, VestingError> {
        ensure!(self.config.airdrop, VestingError::NotAvailable);
        ensure!(*caller == self.config.manager, VestingError::NotManager);
        ensure!(!airdrop.initialized, VestingError::AlreadyInitialized);

        airdrop.root = root;
        airdrop.initialized = true;
        Ok(Outcome::new(
            (),
            PoolEvent::RootInitialized(RootInitialized {
                root,
                redeem_deadline: airdrop.redeem_deadline,
            }),
        ))
    }

    /// Redeem a grant made out to the caller.
    pub fn redeem<T: TokenMover>(
        &mut self,
        airdrop: &AirdropState,
        token: &T,
        caller: &Pubkey,
        terms: VestingTerms,
        proof: &[Hash],
        now: u64,
    ) -> core::result::Result<Outcome<Hash>, VestingError> {
        self.redeem_for(airdrop, token, *caller, terms, proof, now)
    }

    /// Redeem a grant on behalf of `account`; anyone holding the proof may
    /// submit it, the grant always belongs to `account`.
    pub fn redeem_for<T: TokenMover>(
        &mut self,
        airdrop: &AirdropState,
        token: &T,
        account: Pubkey,
        terms: VestingTerms,
        proof: &[Hash],
        now: u64,
    ) -> core::result::Result<Outcome<Hash>, VestingError> {
        ensure!(self.config.airdrop, VestingError::NotAvailable);
        ensure!(airdrop.initialized, VestingError::RootNotInitialized);
        ensure!(now <= airdrop.redeem_deadline, VestingError::DeadlineExceeded);
        ensure!(proof.len() <= MAX_PROOF_LEN, VestingError::ProofTooLong);

        let descriptor = GrantDescriptor::new(account, terms);
        let leaf = self.vesting_hash(&descriptor);
        ensure!(
            merkle::verify(&airdrop.root, &leaf, proof),
            VestingError::InvalidProof
        );
        ensure!(
            self.store.load(&leaf).is_none(),
            VestingError::AlreadyRedeemed
        );
        self.create(token, &descriptor)
    }

    /// Sweep everything not locked in a grant once redemption has closed.
    pub fn claim_unused_tokens<T: TokenMover>(
        &mut self,
        airdrop: &AirdropState,
        token: &mut T,
        caller: &Pubkey,
        to: &Pubkey,
        now: u64,
    ) -> core::result::Result<Outcome<u128>, VestingError> {
        ensure!(self.config.airdrop, VestingError::NotAvailable);
        ensure!(*caller == self.config.manager, VestingError::NotManager);
        ensure!(now > airdrop.redeem_deadline, VestingError::StillRedeemable);

        let unused = self.tokens_available_for_vesting(token)?;
        ensure!(unused > 0, VestingError::NothingToClaim);
        token.transfer(to, unused)?;
        Ok(Outcome::new(
            unused,
            PoolEvent::UnusedTokensClaimed(UnusedTokensClaimed { to: *to, amount: unused }),
        ))
    }
}
