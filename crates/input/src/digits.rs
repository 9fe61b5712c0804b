//! Digit arithmetic helpers for fixed-width numeric entry.
//!
//! These back the digit-shift entry rule: the width of a segment is the
//! digit count of its maximum, and every keystroke shifts the current value
//! left by the width of the typed number before appending it.

/// Counts the base-10 digits of `value`; zero has one digit.
///
/// Computed by repeated division rather than `log10` so the zero edge case
/// needs no guard and no float rounding is involved.
pub fn digit_count(value: u64) -> u32 {
    if value == 0 {
        return 1;
    }
    let mut remaining = value;
    let mut count = 0;
    while remaining > 0 {
        remaining /= 10;
        count += 1;
    }
    count
}

/// `10^exp`. Callers keep `exp` within `u64` range (at most 19).
pub fn pow10(exp: u32) -> u64 {
    10u64.pow(exp)
}

/// Clamps `value` into `[min, max]`.
///
/// Lower bound is applied first, so a degenerate `min > max` resolves to
/// `max` instead of panicking.
pub fn clamp(value: u64, min: u64, max: u64) -> u64 {
    value.max(min).min(max)
}
