//! 256-bit intermediate for `a * b / d` over `u128` operands.

const LOW_MASK: u128 = u64::MAX as u128;

/// Full 128x128 -> 256 bit product as `(hi, lo)`.
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    let (a0, a1) = (a & LOW_MASK, a >> 64);
    let (b0, b1) = (b & LOW_MASK, b >> 64);

    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;

    // < 3 * 2^64, fits.
    let mid = (p00 >> 64) + (p01 & LOW_MASK) + (p10 & LOW_MASK);
    let lo = (p00 & LOW_MASK) | ((mid & LOW_MASK) << 64);
    let hi = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
    (hi, lo)
}

/// Floor of `a * b / d` computed without intermediate overflow.
///
/// Returns `None` when `d == 0` or when the quotient does not fit in `u128`.
pub fn mul_div_floor(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    let (hi, lo) = widening_mul(a, b);
    if hi == 0 {
        return Some(lo / d);
    }
    if hi >= d {
        return None;
    }

    // Restoring division of (hi, lo) by d; rem < d holds after every step.
    let mut rem = hi;
    let mut quotient: u128 = 0;
    for i in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> i) & 1);
        quotient <<= 1;
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quotient |= 1;
        }
    }
    Some(quotient)
}
