//! Vesting curves: elapsed schedule time -> vested token amount.
//!
//! Callers clamp `elapsed` to `total`; `elapsed >= total` is fully vested
//! here as well so the boundary never loses a unit to rounding.

use crate::error::VestingError;
use crate::state::CurveType;
use crate::utils::wide::mul_div_floor;

/// Vested fraction as an exact `numerator / denominator` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: u128,
    pub denominator: u128,
}

/// Fraction of the schedule vested after `elapsed` of `total` seconds.
pub fn vested_fraction(curve: CurveType, elapsed: u64, total: u64) -> Fraction {
    if total == 0 || elapsed >= total {
        return Fraction {
            numerator: 1,
            denominator: 1,
        };
    }
    let (elapsed, total) = (elapsed as u128, total as u128);
    match curve {
        CurveType::Linear => Fraction {
            numerator: elapsed,
            denominator: total,
        },
        // Both squares fit: elapsed < total < 2^64.
        CurveType::Exponential => Fraction {
            numerator: elapsed * elapsed,
            denominator: total * total,
        },
    }
}

/// Amount of `amount` vested after `elapsed` of `total` seconds, truncated.
pub fn vested_amount(
    curve: CurveType,
    amount: u128,
    elapsed: u64,
    total: u64,
) -> Result<u128, VestingError> {
    let fraction = vested_fraction(curve, elapsed, total);
    if fraction.numerator == fraction.denominator {
        return Ok(amount);
    }
    mul_div_floor(amount, fraction.numerator, fraction.denominator).ok_or(VestingError::MathOverflow)
}
