//! Clock access and week-based durations.
//!
//! Core operations take `now` as an explicit `u64` unix timestamp; only the
//! instruction layer reads the cluster clock, through `unix_now`.

use anchor_lang::prelude::*;

use crate::constants::SECONDS_PER_WEEK;
use crate::error::VestingError;

/// Current cluster time as an unsigned unix timestamp.
pub fn unix_now() -> Result<u64> {
    let ts = Clock::get()?.unix_timestamp;
    Ok(to_unix_seconds(ts)?)
}

/// Reject pre-epoch timestamps.
pub fn to_unix_seconds(ts: i64) -> core::result::Result<u64, VestingError> {
    u64::try_from(ts).map_err(|_| VestingError::InvalidTimestamp)
}

/// Length of a schedule of `weeks` weeks, in seconds.
pub fn weeks_to_seconds(weeks: u16) -> u64 {
    // u16::MAX weeks is ~4e10 seconds, well inside u64.
    (weeks as u64) * SECONDS_PER_WEEK
}
