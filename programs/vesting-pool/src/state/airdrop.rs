use anchor_lang::prelude::*;

/// Merkle airdrop PDA (`[AIRDROP_SEED, pool]`).
///
/// The redeemed set is not stored here: a grant hash is redeemed once its
/// `VestingEntry` PDA holds an entry.
#[account]
#[derive(Debug, Default)]
pub struct AirdropState {
    pub root: [u8; 32],
    /// One-shot; `root` is frozen once set.
    pub initialized: bool,
    /// Last unix second at which `redeem` is accepted.
    pub redeem_deadline: u64,
}

impl AirdropState {
    pub const SIZE: usize =
        32 + // root
        1 +  // initialized
        8;   // redeem_deadline
}
