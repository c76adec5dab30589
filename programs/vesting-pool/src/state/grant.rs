use anchor_lang::prelude::*;

use crate::utils::hash::{self, Hash};

/// Schedule parameters of a grant, without the beneficiary.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VestingTerms {
    /// Raw curve discriminant (`0` linear, `1` exponential); validated on creation.
    pub curve_type: u8,
    pub managed: bool,
    pub duration_weeks: u16,
    /// Unix seconds.
    pub start_date: u64,
    pub amount: u128,
}

/// Immutable grant descriptor; its hash is the merkle leaf and the vesting id.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrantDescriptor {
    pub account: Pubkey,
    pub terms: VestingTerms,
}

impl GrantDescriptor {
    pub fn new(account: Pubkey, terms: VestingTerms) -> Self {
        Self { account, terms }
    }

    pub fn hash(&self, domain: &Domain) -> Hash {
        hash::grant_hash(self, domain)
    }
}

/// Domain separation for grant hashes: the pool the grant is redeemable in and
/// the chain id configured for the deployment.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Domain {
    pub verifying_context: Pubkey,
    pub chain_id: u64,
}

impl Domain {
    pub fn new(verifying_context: Pubkey, chain_id: u64) -> Self {
        Self {
            verifying_context,
            chain_id,
        }
    }
}
