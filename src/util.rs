/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, plus the digit
/// alphabet used when writing numbers in bases 2 to 16.
///
/// Conversions return a `Result` that is `Ok` only if the conversion is
/// lossless.
pub mod num;
