use anchor_lang::prelude::*;

use crate::constants::CLAIM_ALL;
use crate::ensure;
use crate::error::VestingError;
use crate::state::GrantDescriptor;
use crate::utils::{curves, time};

/// Shape of the vesting curve.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurveType {
    #[default]
    Linear,
    Exponential,
}

impl TryFrom<u8> for CurveType {
    type Error = VestingError;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(CurveType::Linear),
            1 => Ok(CurveType::Exponential),
            _ => Err(VestingError::InvalidCurve),
        }
    }
}

impl From<CurveType> for u8 {
    fn from(curve: CurveType) -> u8 {
        match curve {
            CurveType::Linear => 0,
            CurveType::Exponential => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VestingStatus {
    Active,
    Paused,
    Cancelled,
}

/// Result of `calculate_vested_amount`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VestedAmounts {
    pub vested_amount: u128,
    pub claimed_amount: u128,
}

impl VestedAmounts {
    pub fn claimable(&self) -> core::result::Result<u128, VestingError> {
        self.vested_amount
            .checked_sub(self.claimed_amount)
            .ok_or(VestingError::MathOverflow)
    }
}

/// Per-grant PDA keyed by the grant hash.
///
/// `pausing_date == 0` means not paused. A cancelled entry always carries the
/// pausing date its vested amount is frozen at.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VestingEntry {
    /// Beneficiary; the default key marks an unused slot.
    pub account: Pubkey,
    pub curve_type: CurveType,
    pub managed: bool,
    pub duration_weeks: u16,
    /// Unix seconds; pushed forward by the paused time on unpause.
    pub start_date: u64,
    pub amount: u128,
    pub amount_claimed: u128,
    pub pausing_date: u64,
    pub cancelled: bool,
}

impl VestingEntry {
    pub const SIZE: usize =
        32 + // account
        1 +  // curve_type
        1 +  // managed
        2 +  // duration_weeks
        8 +  // start_date
        16 + // amount
        16 + // amount_claimed
        8 +  // pausing_date
        1;   // cancelled

    pub fn from_descriptor(
        descriptor: &GrantDescriptor,
    ) -> core::result::Result<Self, VestingError> {
        let terms = &descriptor.terms;
        Ok(Self {
            account: descriptor.account,
            curve_type: CurveType::try_from(terms.curve_type)?,
            managed: terms.managed,
            duration_weeks: terms.duration_weeks,
            start_date: terms.start_date,
            amount: terms.amount,
            amount_claimed: 0,
            pausing_date: 0,
            cancelled: false,
        })
    }

    pub fn exists(&self) -> bool {
        self.account != Pubkey::default()
    }

    pub fn status(&self) -> VestingStatus {
        if self.cancelled {
            VestingStatus::Cancelled
        } else if self.pausing_date != 0 {
            VestingStatus::Paused
        } else {
            VestingStatus::Active
        }
    }

    pub fn duration_seconds(&self) -> u64 {
        time::weeks_to_seconds(self.duration_weeks)
    }

    /// Vested and claimed amounts at `now`, frozen at the pausing date while
    /// paused or cancelled.
    pub fn vested_amounts(&self, now: u64) -> core::result::Result<VestedAmounts, VestingError> {
        let current = if self.pausing_date != 0 {
            self.pausing_date
        } else {
            now
        };
        if current < self.start_date {
            return Err(VestingError::NotYetActive);
        }
        let elapsed = current - self.start_date;
        let total = self.duration_seconds();
        let vested_amount = if elapsed >= total {
            self.amount
        } else {
            curves::vested_amount(self.curve_type, self.amount, elapsed, total)?
        };
        Ok(VestedAmounts {
            vested_amount,
            claimed_amount: self.amount_claimed,
        })
    }

    /// Tokens this entry still holds in the pool: the vesting ceiling (the full
    /// amount, or the frozen vested amount once cancelled) minus claims.
    pub fn locked_amount(&self) -> core::result::Result<u128, VestingError> {
        let ceiling = if self.cancelled {
            self.vested_amounts(self.pausing_date)?.vested_amount
        } else {
            self.amount
        };
        ceiling
            .checked_sub(self.amount_claimed)
            .ok_or(VestingError::MathOverflow)
    }

    fn freeze_at(&self, now: u64) -> u64 {
        // Pausing before the start pins vesting to the start date.
        now.max(self.start_date)
    }

    pub fn pause(&mut self, now: u64) -> core::result::Result<(), VestingError> {
        ensure!(self.managed, VestingError::NotManaged);
        ensure!(!self.cancelled, VestingError::AlreadyCancelled);
        ensure!(self.pausing_date == 0, VestingError::AlreadyPaused);
        self.pausing_date = self.freeze_at(now);
        Ok(())
    }

    pub fn unpause(&mut self, now: u64) -> core::result::Result<(), VestingError> {
        ensure!(self.pausing_date != 0, VestingError::NotPaused);
        ensure!(!self.cancelled, VestingError::CancelledCannotUnpause);
        let paused_for = now.saturating_sub(self.pausing_date);
        self.start_date = self
            .start_date
            .checked_add(paused_for)
            .ok_or(VestingError::MathOverflow)?;
        self.pausing_date = 0;
        Ok(())
    }

    /// Cancel the grant, freezing its vested amount. Returns the unvested
    /// remainder released back to the pool.
    pub fn cancel(&mut self, now: u64) -> core::result::Result<u128, VestingError> {
        ensure!(self.managed, VestingError::NotManaged);
        ensure!(!self.cancelled, VestingError::AlreadyCancelled);
        if self.pausing_date == 0 {
            self.pausing_date = self.freeze_at(now);
        }
        let vested = self.vested_amounts(now)?.vested_amount;
        let released = self
            .amount
            .checked_sub(vested)
            .ok_or(VestingError::MathOverflow)?;
        self.cancelled = true;
        Ok(released)
    }

    /// Record a claim of `requested` tokens ([`CLAIM_ALL`] for everything
    /// claimable) and return the amount to transfer.
    pub fn claim(&mut self, requested: u128, now: u64) -> core::result::Result<u128, VestingError> {
        let claimable = self.vested_amounts(now)?.claimable()?;
        let amount = if requested == CLAIM_ALL {
            claimable
        } else {
            ensure!(requested <= claimable, VestingError::ExceedsVested);
            requested
        };
        self.amount_claimed = self
            .amount_claimed
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(amount)
    }
}
