use anchor_lang::prelude::*;

use crate::error::VestingError;

/// Token capability handed to the ledger: the pool's balance and transfers
/// out of it. Implementations report failures instead of panicking; a failed
/// transfer aborts the enclosing operation before anything is committed.
pub trait TokenMover {
    /// Balance currently held by the pool.
    fn balance_of(&self) -> core::result::Result<u128, VestingError>;

    /// Move `amount` from the pool to the token account `to`.
    fn transfer(&mut self, to: &Pubkey, amount: u128) -> core::result::Result<(), VestingError>;
}

/// In-memory token balance for exercising the ledger off-chain.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockToken {
    pub balance: u128,
    pub transfers: Vec<(Pubkey, u128)>,
    /// When set, every transfer fails.
    pub fail_transfers: bool,
}

#[cfg(test)]
impl MockToken {
    pub fn funded(balance: u128) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }

    pub fn sent_to(&self, to: &Pubkey) -> u128 {
        self.transfers
            .iter()
            .filter(|(dest, _)| dest == to)
            .map(|(_, amount)| amount)
            .sum()
    }
}

#[cfg(test)]
impl TokenMover for MockToken {
    fn balance_of(&self) -> core::result::Result<u128, VestingError> {
        Ok(self.balance)
    }

    fn transfer(&mut self, to: &Pubkey, amount: u128) -> core::result::Result<(), VestingError> {
        if self.fail_transfers {
            return Err(VestingError::TokenTransferFailed);
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(VestingError::TokenTransferFailed)?;
        self.transfers.push((*to, amount));
        Ok(())
    }
}
