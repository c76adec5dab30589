//! Off-chain airdrop planning: grant descriptors in, root and per-recipient
//! proofs out.

use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::{CurveType, Domain, GrantDescriptor};
use crate::utils::hash::Hash;
use crate::utils::merkle;

/// Root of a committed grant set.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MerkleCommitment {
    pub root: [u8; 32],
    pub leaf_count: u64,
}

/// Everything a recipient needs to call `redeem`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProofRecord {
    pub descriptor: GrantDescriptor,
    pub grant_hash: [u8; 32],
    pub proof: Vec<[u8; 32]>,
}

pub struct AirdropPlan {
    domain: Domain,
    descriptors: Vec<GrantDescriptor>,
    tree: Vec<Vec<Hash>>,
    root: Hash,
}

impl AirdropPlan {
    /// Hash `descriptors` in order and build the tree over them. Every grant
    /// hash must be unique.
    pub fn build(
        domain: Domain,
        descriptors: Vec<GrantDescriptor>,
    ) -> core::result::Result<Self, VestingError> {
        let mut seen = BTreeSet::new();
        let mut leaves = Vec::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            CurveType::try_from(descriptor.terms.curve_type)?;
            let leaf = descriptor.hash(&domain);
            if !seen.insert(leaf) {
                return Err(VestingError::DuplicateLeaf);
            }
            leaves.push(leaf);
        }

        let tree = merkle::build_full_tree(&leaves)?;
        let root = merkle::tree_root(&tree).ok_or(VestingError::EmptyTree)?;
        Ok(Self {
            domain,
            descriptors,
            tree,
            root,
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn root(&self) -> Hash {
        self.root
    }

    pub fn commitment(&self) -> MerkleCommitment {
        MerkleCommitment {
            root: self.root,
            leaf_count: self.descriptors.len() as u64,
        }
    }

    pub fn leaves(&self) -> &[Hash] {
        &self.tree[0]
    }

    /// Tokens the pool must hold for every grant to be redeemable.
    pub fn required_tokens(&self) -> core::result::Result<u128, VestingError> {
        self.descriptors.iter().try_fold(0u128, |sum, d| {
            sum.checked_add(d.terms.amount)
                .ok_or(VestingError::MathOverflow)
        })
    }

    pub fn proof_for(&self, grant_hash: &Hash) -> core::result::Result<Vec<Hash>, VestingError> {
        merkle::extract_proof(grant_hash, &self.tree)
    }

    /// One record per grant, in input order.
    pub fn proof_records(&self) -> core::result::Result<Vec<ProofRecord>, VestingError> {
        self.descriptors
            .iter()
            .zip(self.leaves())
            .map(|(descriptor, leaf)| {
                Ok(ProofRecord {
                    descriptor: *descriptor,
                    grant_hash: *leaf,
                    proof: self.proof_for(leaf)?,
                })
            })
            .collect()
    }

    /// Proof records addressable by recipient account.
    pub fn records_by_account(
        &self,
    ) -> core::result::Result<BTreeMap<Pubkey, Vec<ProofRecord>>, VestingError> {
        let mut by_account: BTreeMap<Pubkey, Vec<ProofRecord>> = BTreeMap::new();
        for record in self.proof_records()? {
            by_account
                .entry(record.descriptor.account)
                .or_default()
                .push(record);
        }
        Ok(by_account)
    }
}
