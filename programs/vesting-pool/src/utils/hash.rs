//! Hash primitives shared by the merkle tree and grant identifiers.
//!
//! Grant hashing mirrors typed structured-data hashing: a domain separator
//! committing to the verifying context and chain id, a struct hash over the
//! fixed-width grant fields, and a final hash over `0x19 0x01 || domain ||
//! struct`. All preimages are `Pod` byte layouts so off-chain generators can
//! reproduce them byte for byte.

use bytemuck::{Pod, Zeroable};

use crate::state::{Domain, GrantDescriptor};

/// 256-bit hash value.
pub type Hash = [u8; 32];

const DOMAIN_TYPE: &[u8] = b"VestingPoolDomain(uint64 chainId,address verifyingContext)";
const VESTING_TYPE: &[u8] = b"Vesting(address account,uint8 curveType,bool managed,uint16 durationWeeks,uint64 startDate,uint128 amount)";
const TYPED_PREFIX: [u8; 2] = [0x19, 0x01];

/// Hash of the empty byte string, used to pad odd tree levels.
pub fn empty_hash() -> Hash {
    hash_bytes(&[])
}

pub fn hash_bytes(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Hash of `a || b`. Order matters; canonical ordering is the caller's job.
pub fn combine(a: &Hash, b: &Hash) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(a);
    hasher.update(b);
    *hasher.finalize().as_bytes()
}

/// Combine a pair with the smaller value (as a big-endian integer) first.
pub fn combine_sorted(a: &Hash, b: &Hash) -> Hash {
    // Lexicographic byte order on fixed-width arrays is big-endian numeric order.
    if a <= b {
        combine(a, b)
    } else {
        combine(b, a)
    }
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct DomainPreimage {
    type_hash: [u8; 32],
    chain_id: [u8; 8],
    verifying_context: [u8; 32],
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct VestingPreimage {
    type_hash: [u8; 32],
    account: [u8; 32],
    curve_type: u8,
    managed: u8,
    duration_weeks: [u8; 2],
    start_date: [u8; 8],
    amount: [u8; 16],
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct TypedPreimage {
    prefix: [u8; 2],
    domain_separator: [u8; 32],
    struct_hash: [u8; 32],
}

pub fn domain_separator(domain: &Domain) -> Hash {
    let preimage = DomainPreimage {
        type_hash: hash_bytes(DOMAIN_TYPE),
        chain_id: domain.chain_id.to_be_bytes(),
        verifying_context: domain.verifying_context.to_bytes(),
    };
    hash_bytes(bytemuck::bytes_of(&preimage))
}

/// Struct hash of the grant fields, independent of the domain.
pub fn grant_struct_hash(descriptor: &GrantDescriptor) -> Hash {
    let terms = &descriptor.terms;
    let preimage = VestingPreimage {
        type_hash: hash_bytes(VESTING_TYPE),
        account: descriptor.account.to_bytes(),
        curve_type: terms.curve_type,
        managed: terms.managed as u8,
        duration_weeks: terms.duration_weeks.to_be_bytes(),
        start_date: terms.start_date.to_be_bytes(),
        amount: terms.amount.to_be_bytes(),
    };
    hash_bytes(bytemuck::bytes_of(&preimage))
}

/// Leaf hash of a grant; doubles as its vesting id.
pub fn grant_hash(descriptor: &GrantDescriptor, domain: &Domain) -> Hash {
    let preimage = TypedPreimage {
        prefix: TYPED_PREFIX,
        domain_separator: domain_separator(domain),
        struct_hash: grant_struct_hash(descriptor),
    };
    hash_bytes(bytemuck::bytes_of(&preimage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::VestingTerms;
    use anchor_lang::prelude::Pubkey;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn descriptor(account: Pubkey, managed: bool, curve_type: u8, amount: u128) -> GrantDescriptor {
        GrantDescriptor {
            account,
            terms: VestingTerms {
                curve_type,
                managed,
                duration_weeks: 104,
                start_date: 1_700_000_000,
                amount,
            },
        }
    }

    #[test]
    fn preimage_layouts_have_no_padding() {
        assert_eq!(core::mem::size_of::<DomainPreimage>(), 72);
        assert_eq!(core::mem::size_of::<VestingPreimage>(), 92);
        assert_eq!(core::mem::size_of::<TypedPreimage>(), 66);
    }

    #[test]
    fn empty_hash_is_hash_of_nothing() {
        assert_eq!(empty_hash(), *blake3::hash(b"").as_bytes());
    }

    #[test]
    fn combine_is_ordered_and_sorted_variant_is_not() {
        let a = hash_bytes(b"a");
        let b = hash_bytes(b"b");
        assert_ne!(combine(&a, &b), combine(&b, &a));
        assert_eq!(combine_sorted(&a, &b), combine_sorted(&b, &a));
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        assert_eq!(combine_sorted(&a, &b), combine(&lo, &hi));
    }

    #[test]
    fn grant_hash_is_deterministic() {
        let domain = Domain::new(key(9), 1);
        let d = descriptor(key(1), true, 0, 200_000);
        assert_eq!(grant_hash(&d, &domain), grant_hash(&d.clone(), &domain));
    }

    #[test]
    fn grant_hash_commits_to_every_field() {
        let domain = Domain::new(key(9), 1);
        let base = descriptor(key(1), true, 0, 200_000);
        let base_hash = grant_hash(&base, &domain);

        let mut variants = vec![
            descriptor(key(2), true, 0, 200_000),
            descriptor(key(1), false, 0, 200_000),
            descriptor(key(1), true, 1, 200_000),
            descriptor(key(1), true, 0, 0),
        ];
        let mut longer = base.clone();
        longer.terms.duration_weeks = 105;
        variants.push(longer);
        let mut later = base.clone();
        later.terms.start_date += 1;
        variants.push(later);

        for variant in variants {
            assert_ne!(grant_hash(&variant, &domain), base_hash);
        }
    }

    #[test]
    fn grant_hash_is_bound_to_domain() {
        let d = descriptor(key(1), false, 0, 1);
        let h = grant_hash(&d, &Domain::new(key(9), 1));
        assert_ne!(h, grant_hash(&d, &Domain::new(key(8), 1)));
        assert_ne!(h, grant_hash(&d, &Domain::new(key(9), 2)));
    }
}
