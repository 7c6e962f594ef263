use std::{collections::HashSet, sync::LazyLock};

use ordered_float::OrderedFloat;
use regex::{Captures, Regex};
use tracing::trace;

use crate::{
    error::RuntimeError,
    interpreter::instruction::is_valid_identifier,
    util::num::{digit_char, f64_to_u32_checked},
};

/// Smallest supported base.
pub const MIN_BASE: u32 = 2;
/// Largest supported base.
pub const MAX_BASE: u32 = 16;
/// Default number of fractional digits written by [`to_base`].
pub const DEFAULT_FRACTION_DIGITS: usize = 10;

/// `int.nonrepeating(repeating)`, e.g. `0.(3)` or `1.2(45)`.
static REPEATING_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<int>[0-9]+)\.(?P<nonrep>[0-9]*)\((?P<rep>[0-9]+)\)")
        .expect("repeating decimal pattern is valid")
});

/// `digits[.digits]_base`, e.g. `1A_16` or `0.1_2`.
static BASED_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<int>[0-9A-Fa-f]+)(?:\.(?P<frac>[0-9A-Fa-f]+))?_(?P<base>[0-9]+)\b")
        .expect("based literal pattern is valid")
});

/// Expands every repeating-decimal and based literal into a plain decimal
/// literal.
///
/// Repeating decimals are expanded first: they only use decimal digits and
/// parentheses, while a based literal's alphabet includes `A`-`F`. Each
/// literal is replaced independently and written with full round-trip
/// precision. Signs are left in place for the parser.
///
/// # Errors
/// - [`RuntimeError::InvalidBase`] for a suffix outside `2..=16`.
/// - [`RuntimeError::InvalidDigitForBase`] for a digit not below its base.
/// - [`RuntimeError::NonFiniteValue`] if a literal overflows an `f64`.
///
/// # Example
/// ```
/// use textcalc::interpreter::numeral::expand_special_notations;
///
/// assert_eq!(expand_special_notations("1A_16 + 1").unwrap(), "26 + 1");
/// assert_eq!(expand_special_notations("0.(3)").unwrap(),
///            (1.0_f64 / 3.0).to_string());
/// ```
pub fn expand_special_notations(expression: &str) -> Result<String, RuntimeError> {
    let repeating = expand_repeating_decimals(expression)?;
    let expanded = expand_based_literals(&repeating)?;
    trace!(%expression, %expanded, "expanded special notations");
    Ok(expanded)
}

/// Replaces every `int.nonrep(rep)` literal by its decimal value.
///
/// # Errors
/// Returns [`RuntimeError::NonFiniteValue`] if a literal does not fit in an
/// `f64`.
pub fn expand_repeating_decimals(expression: &str) -> Result<String, RuntimeError> {
    try_replace_all(&REPEATING_DECIMAL, expression, |caps| {
        let value = repeating_decimal_value(&caps["int"], &caps["nonrep"], &caps["rep"]);
        render_literal(value)
    })
}

/// Replaces every `digits[.digits]_base` literal by its decimal value.
///
/// A match that is also a valid identifier but not a valid literal, such as
/// `C_2`, is a variable name and is left in place.
///
/// # Errors
/// See [`expand_special_notations`].
///
/// # Example
/// ```
/// use textcalc::interpreter::numeral::expand_based_literals;
///
/// assert_eq!(expand_based_literals("A_16 + C_2").unwrap(), "10 + C_2");
/// assert!(expand_based_literals("19_8").is_err());
/// ```
pub fn expand_based_literals(expression: &str) -> Result<String, RuntimeError> {
    try_replace_all(&BASED_LITERAL, expression, |caps| match literal_value(caps) {
        Ok(value) => render_literal(value),
        Err(_) if is_valid_identifier(&caps[0]) => Ok(caps[0].to_string()),
        Err(error) => Err(error),
    })
}

/// Whether `text` is, as a whole, a based literal with a valid base and
/// valid digits.
///
/// # Example
/// ```
/// use textcalc::interpreter::numeral::reads_as_based_literal;
///
/// assert!(reads_as_based_literal("FACE_16"));
/// assert!(!reads_as_based_literal("C_2"));
/// assert!(!reads_as_based_literal("FACE_16 + 1"));
/// ```
#[must_use]
pub fn reads_as_based_literal(text: &str) -> bool {
    BASED_LITERAL.captures(text)
                 .filter(|caps| caps.get(0).is_some_and(|m| m.as_str() == text))
                 .is_some_and(|caps| literal_value(&caps).is_ok())
}

fn literal_value(caps: &Captures<'_>) -> Result<f64, RuntimeError> {
    let base = parse_base(&caps["base"])?;
    let fraction = caps.name("frac").map_or("", |m| m.as_str());
    based_literal_value(&caps["int"], fraction, base, &caps[0])
}

/// Parses a base written in decimal and checks it lies in `2..=16`.
///
/// # Errors
/// Returns [`RuntimeError::InvalidBase`] otherwise.
pub fn parse_base(text: &str) -> Result<u32, RuntimeError> {
    text.parse::<u32>()
        .ok()
        .filter(|base| (MIN_BASE..=MAX_BASE).contains(base))
        .ok_or_else(|| RuntimeError::InvalidBase { base: text.to_string() })
}

/// Value of `int.nonrep(rep)`: `int + 0.nonrep + rep / (10^d - 1) / 10^k`.
///
/// The literal is computed as the exact fraction
/// `(int nonrep rep - int nonrep) / (10^k (10^d - 1))` whenever both sides
/// fit in a `u128`, so only the final conversion and division round.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn repeating_decimal_value(integer: &str, non_repeating: &str, repeating: &str) -> f64 {
    if let Some((numerator, denominator)) = exact_repeating_fraction(integer, non_repeating, repeating) {
        return numerator as f64 / denominator as f64;
    }

    let head: f64 = format!("{integer}.{non_repeating}0").parse().unwrap_or(f64::INFINITY);
    let block: f64 = repeating.parse().unwrap_or(f64::INFINITY);
    let period = 10f64.powi(i32::try_from(repeating.len()).unwrap_or(i32::MAX)) - 1.0;
    let shift = 10f64.powi(i32::try_from(non_repeating.len()).unwrap_or(i32::MAX));
    head + block / period / shift
}

fn exact_repeating_fraction(integer: &str,
                            non_repeating: &str,
                            repeating: &str)
                            -> Option<(u128, u128)> {
    let prefix: u128 = format!("{integer}{non_repeating}").parse().ok()?;
    let whole: u128 = format!("{integer}{non_repeating}{repeating}").parse().ok()?;
    let period = 10u128.checked_pow(u32::try_from(repeating.len()).ok()?)?
                      .checked_sub(1)?;
    let shift = 10u128.checked_pow(u32::try_from(non_repeating.len()).ok()?)?;
    Some((whole.checked_sub(prefix)?, period.checked_mul(shift)?))
}

/// Value of a based literal from its digit strings.
///
/// The integer part accumulates with Horner's rule, the fractional part as
/// `digit / base^position`.
///
/// # Errors
/// Returns [`RuntimeError::InvalidDigitForBase`] if any digit is not below
/// `base`.
pub fn based_literal_value(integer: &str,
                           fraction: &str,
                           base: u32,
                           literal: &str)
                           -> Result<f64, RuntimeError> {
    let radix = f64::from(base);
    let digit = |c: char| {
        c.to_digit(16)
         .filter(|d| *d < base)
         .map(f64::from)
         .ok_or_else(|| RuntimeError::InvalidDigitForBase { digit: c,
                                                            base,
                                                            literal: literal.to_string() })
    };

    let mut value = 0.0;
    for c in integer.chars() {
        value = value * radix + digit(c)?;
    }

    let mut scale = radix;
    for c in fraction.chars() {
        value += digit(c)? / scale;
        scale *= radix;
    }

    Ok(value)
}

/// Writes `value` in `base` using the digits `0-9A-F`.
///
/// The integer part is produced by repeated division, the fractional part by
/// repeated multiplication. Fraction digits stop at `max_fraction_digits`, or
/// as soon as an intermediate fraction repeats. The separator is omitted when
/// there are no fraction digits.
///
/// # Errors
/// - [`RuntimeError::InvalidBase`] unless `2 <= base <= 16`.
/// - [`RuntimeError::NonFiniteValue`] for infinity or NaN.
///
/// # Example
/// ```
/// use textcalc::interpreter::numeral::to_base;
///
/// assert_eq!(to_base(5.0, 2, 10).unwrap(), "101");
/// assert_eq!(to_base(-26.5, 16, 10).unwrap(), "-1A.8");
/// assert!(to_base(5.0, 17, 10).is_err());
/// ```
pub fn to_base(value: f64, base: u32, max_fraction_digits: usize) -> Result<String, RuntimeError> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(RuntimeError::InvalidBase { base: base.to_string() });
    }
    if !value.is_finite() {
        return Err(RuntimeError::NonFiniteValue { value });
    }

    let radix = f64::from(base);
    let magnitude = value.abs();
    let mut integer = magnitude.floor();
    let mut fraction = magnitude - integer;

    let mut integer_digits = Vec::new();
    loop {
        let digit = integer % radix;
        integer_digits.push(digit_for(digit)?);
        integer = ((integer - digit) / radix).floor();
        if integer < 1.0 {
            break;
        }
    }
    integer_digits.reverse();

    let mut fraction_digits = String::new();
    let mut seen = HashSet::new();
    while fraction > 0.0 && fraction_digits.len() < max_fraction_digits {
        if !seen.insert(OrderedFloat(fraction)) {
            break;
        }
        let scaled = fraction * radix;
        let digit = scaled.floor();
        fraction_digits.push(digit_for(digit)?);
        fraction = scaled - digit;
    }

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.extend(integer_digits);
    if !fraction_digits.is_empty() {
        out.push('.');
        out.push_str(&fraction_digits);
    }
    Ok(out)
}

fn digit_for(digit: f64) -> Result<char, RuntimeError> {
    f64_to_u32_checked(digit, ()).ok()
                                 .and_then(digit_char)
                                 .ok_or(RuntimeError::NonFiniteValue { value: digit })
}

/// Renders an expanded literal so it can be re-read by the tokenizer.
fn render_literal(value: f64) -> Result<String, RuntimeError> {
    if value.is_finite() {
        Ok(value.to_string())
    } else {
        Err(RuntimeError::NonFiniteValue { value })
    }
}

/// Like [`Regex::replace_all`], but the replacement may fail.
fn try_replace_all<F>(regex: &Regex, text: &str, mut replacement: F) -> Result<String, RuntimeError>
    where F: FnMut(&Captures<'_>) -> Result<String, RuntimeError>
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in regex.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&replacement(&caps)?);
        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}
