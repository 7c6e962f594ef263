use std::sync::LazyLock;

use regex::Regex;

use crate::{
    error::{CalcError, ParseError},
    interpreter::numeral::{parse_base, reads_as_based_literal},
};

/// Characters accepted besides ASCII letters, digits and whitespace.
pub const ALLOWED_SYMBOLS: &str = "+-*/^().=?_<>;";

/// A decimal integer part such as `007`, not preceded by anything that would
/// make it part of a name, a fraction or an exponent.
static DECIMAL_LEADING_ZERO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z_.])(?P<int>0[0-9]+)").expect("leading zero pattern is valid")
});

/// The integer part of a based literal such as `0A_16`.
static BASED_LEADING_ZERO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z_.])(?P<int>0[0-9A-Fa-f]+)(?:\.[0-9A-Fa-f]+)?_[0-9]+")
        .expect("based leading zero pattern is valid")
});

/// The shape of one instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `name = expr[;]`
    Assignment {
        /// The variable being bound.
        name:       String,
        /// The right-hand side, as written.
        expression: String,
    },
    /// `? name`
    Query {
        /// The variable being printed.
        name: String,
    },
    /// `expr =`
    BareExpression {
        /// The expression to evaluate.
        expression: String,
    },
    /// `expr => _base`
    BaseConversion {
        /// The expression to evaluate.
        expression: String,
        /// Target base, already checked to be in `2..=16`.
        base:       u32,
    },
}

/// Fails unless every character is a letter, digit, whitespace or one of
/// [`ALLOWED_SYMBOLS`].
///
/// # Errors
/// Returns [`ParseError::InvalidCharacter`] naming the first offending
/// character.
///
/// # Example
/// ```
/// use textcalc::interpreter::instruction::validate_characters;
///
/// assert!(validate_characters("A = 1A_16 * 0.(3);").is_ok());
/// assert!(validate_characters("A = 3 % 2").is_err());
/// ```
pub fn validate_characters(text: &str) -> Result<(), ParseError> {
    match text.chars().find(|c| !is_allowed(*c)) {
        Some(character) => Err(ParseError::InvalidCharacter { character,
                                                              text: text.to_string() }),
        None => Ok(()),
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || ALLOWED_SYMBOLS.contains(c)
}

/// Rejects decimal and based literals whose integer part has more than one
/// digit and starts with `0`.
///
/// # Errors
/// Returns [`ParseError::LeadingZero`] with the offending integer part.
///
/// # Example
/// ```
/// use textcalc::interpreter::instruction::detect_invalid_leading_zeros;
///
/// assert!(detect_invalid_leading_zeros("0.5 + 10 + 1.05 + 0.(03)").is_ok());
/// assert!(detect_invalid_leading_zeros("01").is_err());
/// assert!(detect_invalid_leading_zeros("01_16").is_err());
/// assert!(detect_invalid_leading_zeros("0A_16").is_err());
/// ```
pub fn detect_invalid_leading_zeros(text: &str) -> Result<(), ParseError> {
    let decimal = DECIMAL_LEADING_ZERO.captures_iter(text)
                                      .filter_map(|caps| caps.name("int"))
                                      .find(|int| !is_repeating_block(&text[..int.start()]));
    let found = decimal.or_else(|| {
                           BASED_LEADING_ZERO.captures(text)
                                             .and_then(|caps| caps.name("int"))
                       });
    match found {
        Some(int) => Err(ParseError::LeadingZero { literal: int.as_str().to_string() }),
        None => Ok(()),
    }
}

/// Whether the text before a digit run ends with `digits.digits(`, i.e. the
/// run is the repeating block of a literal such as `0.(03)`.
fn is_repeating_block(preceding: &str) -> bool {
    preceding.strip_suffix('(')
             .map(|head| head.trim_end_matches(|c: char| c.is_ascii_digit()))
             .and_then(|head| head.strip_suffix('.'))
             .is_some_and(|head| head.ends_with(|c: char| c.is_ascii_digit()))
}

/// Whether `name` matches `[A-Za-z][A-Za-z0-9_]*`.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `name` can be bound: an identifier that does not also read as a
/// based literal (`FACE_16` always means 64206).
fn is_variable_name(name: &str) -> bool {
    is_valid_identifier(name) && !reads_as_based_literal(name)
}

/// Classifies a line as an assignment, query, bare expression or base
/// conversion request.
///
/// A trailing `;` is ignored. A line containing `=>` is always a base
/// conversion request, never an assignment. A line whose last character is
/// `=` is a bare expression.
///
/// # Errors
/// - [`ParseError::InvalidVariableName`] if an assignment or query names
///   something that is not an identifier, or an identifier that reads as a
///   based literal.
/// - [`crate::error::RuntimeError::InvalidBase`] if a conversion targets a
///   base outside `2..=16`.
/// - [`ParseError::UnknownInstruction`] for any other shape.
///
/// # Example
/// ```
/// use textcalc::interpreter::instruction::{Instruction, classify};
///
/// assert_eq!(classify("A = 3+4;").unwrap(),
///            Instruction::Assignment { name:       "A".to_string(),
///                                      expression: "3+4".to_string(), });
/// assert_eq!(classify("A+1 => _2").unwrap(),
///            Instruction::BaseConversion { expression: "A+1".to_string(),
///                                          base:       2, });
/// ```
pub fn classify(line: &str) -> Result<Instruction, CalcError> {
    let trimmed = line.trim();
    let statement = trimmed.strip_suffix(';').map_or(trimmed, str::trim_end);
    let unknown = || ParseError::UnknownInstruction { line: line.to_string() };

    if let Some((expression, target)) = statement.split_once("=>") {
        let base = target.trim().strip_prefix('_').ok_or_else(unknown)?;
        let base = parse_base(base.trim())?;
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(unknown().into());
        }
        return Ok(Instruction::BaseConversion { expression: expression.to_string(),
                                                base });
    }

    if let Some(rest) = statement.strip_prefix('?') {
        let name = rest.trim();
        if !is_variable_name(name) {
            return Err(ParseError::InvalidVariableName { name: name.to_string() }.into());
        }
        return Ok(Instruction::Query { name: name.to_string() });
    }

    if let Some(expression) = statement.strip_suffix('=') {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(unknown().into());
        }
        return Ok(Instruction::BareExpression { expression: expression.to_string() });
    }

    if let Some((name, expression)) = statement.split_once('=') {
        let name = name.trim();
        if !is_variable_name(name) {
            return Err(ParseError::InvalidVariableName { name: name.to_string() }.into());
        }
        return Ok(Instruction::Assignment { name:       name.to_string(),
                                            expression: expression.trim().to_string(), });
    }

    Err(unknown().into())
}
