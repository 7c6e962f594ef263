/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;
/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Digit alphabet shared by every base from 2 to 16.
pub const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use textcalc::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!"), Ok(42.0));
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` if the value is finite, integral and
/// exactly representable.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, fractional or out-of-range values.
///
/// ## Example
/// ```
/// use textcalc::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(-1000.0, ()), Ok(-1000));
/// assert!(f64_to_i64_checked(1.5, ()).is_err());
/// assert!(f64_to_i64_checked(1e20, ()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(error);
    }
    if value.abs() > MAX_SAFE_I64_INT as f64 {
        return Err(error);
    }
    Ok(value as i64)
}

/// Safely converts an `f64` to `u32` if the value is finite, integral,
/// non-negative and within range.
///
/// ## Errors
/// Returns `Err(error)` when the value cannot be represented exactly.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_u32_checked<E>(value: f64, error: E) -> Result<u32, E> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(error);
    }
    Ok(value as u32)
}

/// Returns the character for `digit` in bases up to 16, upper-case.
///
/// ## Example
/// ```
/// use textcalc::util::num::digit_char;
///
/// assert_eq!(digit_char(10), Some('A'));
/// assert_eq!(digit_char(16), None);
/// ```
#[must_use]
pub fn digit_char(digit: u32) -> Option<char> {
    usize::try_from(digit).ok()
                          .and_then(|index| DIGITS.get(index))
                          .map(|&byte| char::from(byte))
}
