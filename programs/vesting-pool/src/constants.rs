//! Program-wide constants.

/// PDA seed of the pool state (`[POOL_SEED, mint, manager]`).
pub const POOL_SEED: &[u8] = b"pool";

/// PDA seed of the token vault owned by the pool (`[VAULT_SEED, pool]`).
pub const VAULT_SEED: &[u8] = b"vault";

/// PDA seed of a single grant (`[VESTING_SEED, pool, grant_hash]`).
pub const VESTING_SEED: &[u8] = b"vesting";

/// PDA seed of the airdrop state (`[AIRDROP_SEED, pool]`).
pub const AIRDROP_SEED: &[u8] = b"airdrop";

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds per vesting week.
pub const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// Requested claim amount meaning "everything currently claimable".
pub const CLAIM_ALL: u128 = u128::MAX;

/// Upper bound on proof length accepted by `redeem` (trees of up to 2^32 leaves).
pub const MAX_PROOF_LEN: usize = 32;
