use crate::ensure;
use crate::error::VestingError;
use crate::state::{PoolLedger, VestingEntry};
use crate::utils::hash::Hash;

/// Read/write contract between the ledger and whatever persists it.
pub trait LedgerStore {
    /// Entry stored under `id`, if one was ever created.
    fn load(&self, id: &Hash) -> Option<VestingEntry>;

    fn store(&mut self, id: Hash, entry: VestingEntry) -> core::result::Result<(), VestingError>;

    fn totals(&self) -> PoolLedger;

    fn store_totals(&mut self, totals: PoolLedger);
}

/// On-chain store: the pool totals plus the single `VestingEntry` PDA an
/// instruction was given, derived from `id`.
pub struct AccountStore<'a> {
    id: Hash,
    ledger: &'a mut PoolLedger,
    entry: &'a mut VestingEntry,
}

impl<'a> AccountStore<'a> {
    pub fn new(id: Hash, ledger: &'a mut PoolLedger, entry: &'a mut VestingEntry) -> Self {
        Self { id, ledger, entry }
    }
}

impl LedgerStore for AccountStore<'_> {
    fn load(&self, id: &Hash) -> Option<VestingEntry> {
        (*id == self.id && self.entry.exists()).then(|| self.entry.clone())
    }

    fn store(&mut self, id: Hash, entry: VestingEntry) -> core::result::Result<(), VestingError> {
        ensure!(id == self.id, VestingError::GrantHashMismatch);
        *self.entry = entry;
        Ok(())
    }

    fn totals(&self) -> PoolLedger {
        *self.ledger
    }

    fn store_totals(&mut self, totals: PoolLedger) {
        *self.ledger = totals;
    }
}

/// Host-side store keyed by grant hash.
#[cfg(not(target_os = "solana"))]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::collections::BTreeMap<Hash, VestingEntry>,
    ledger: PoolLedger,
}

#[cfg(not(target_os = "solana"))]
impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `total_tokens_in_vesting` recomputed from the entries.
    pub fn audit_total(&self) -> core::result::Result<u128, VestingError> {
        self.entries.values().try_fold(0u128, |sum, entry| {
            sum.checked_add(entry.locked_amount()?)
                .ok_or(VestingError::MathOverflow)
        })
    }
}

#[cfg(not(target_os = "solana"))]
impl LedgerStore for MemoryStore {
    fn load(&self, id: &Hash) -> Option<VestingEntry> {
        self.entries.get(id).cloned()
    }

    fn store(&mut self, id: Hash, entry: VestingEntry) -> core::result::Result<(), VestingError> {
        self.entries.insert(id, entry);
        Ok(())
    }

    fn totals(&self) -> PoolLedger {
        self.ledger
    }

    fn store_totals(&mut self, totals: PoolLedger) {
        self.ledger = totals;
    }
}
