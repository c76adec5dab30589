use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::ensure;
use crate::error::VestingError;
use crate::ledger::TokenMover;

/// Accounts for a vault transfer signed by the pool PDA.
pub struct VaultTransfer<'a, 'info> {
    pub token_program: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub authority: AccountInfo<'info>,
    pub destination: AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

/// Pool vault as seen by the ledger.
pub struct VaultMover<'a, 'info> {
    balance: u128,
    transfer: Option<VaultTransfer<'a, 'info>>,
}

impl<'a, 'info> VaultMover<'a, 'info> {
    /// Balance only; any transfer fails.
    pub fn read_only(vault: &TokenAccount) -> Self {
        Self {
            balance: vault.amount as u128,
            transfer: None,
        }
    }

    pub fn new(vault: &TokenAccount, transfer: VaultTransfer<'a, 'info>) -> Self {
        Self {
            balance: vault.amount as u128,
            transfer: Some(transfer),
        }
    }
}

impl TokenMover for VaultMover<'_, '_> {
    fn balance_of(&self) -> core::result::Result<u128, VestingError> {
        Ok(self.balance)
    }

    fn transfer(&mut self, to: &Pubkey, amount: u128) -> core::result::Result<(), VestingError> {
        let cpi = self
            .transfer
            .as_ref()
            .ok_or(VestingError::TokenTransferFailed)?;
        ensure!(cpi.destination.key == to, VestingError::InvalidTokenAccount);
        if amount == 0 {
            return Ok(());
        }
        let spl_amount = u64::try_from(amount).map_err(|_| VestingError::InvalidAmount)?;

        token::transfer(
            CpiContext::new_with_signer(
                cpi.token_program.clone(),
                Transfer {
                    from: cpi.vault.clone(),
                    to: cpi.destination.clone(),
                    authority: cpi.authority.clone(),
                },
                cpi.signer_seeds,
            ),
            spl_amount,
        )
        .map_err(|err| {
            msg!("vault transfer of {} failed: {}", spl_amount, err);
            VestingError::TokenTransferFailed
        })?;

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(())
    }
}
