use std::fmt;

use crate::error::CalcError;

/// Fractional digits shown for decimal results unless a precision is given.
pub const DISPLAY_DIGITS: usize = 6;

/// One renderable result produced while processing a line or a block.
///
/// The calculator never formats terminal colors; a shell picks a style per
/// variant. `Display` renders the plain-text form, and honours a precision
/// (`{:.3}`) as the number of fractional digits shown for decimal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A variable was bound (`name = value`).
    Assigned {
        /// The variable.
        name:  String,
        /// Its new value.
        value: f64,
    },
    /// A query printed a resolved variable (`name = value`).
    Queried {
        /// The variable.
        name:  String,
        /// Its value.
        value: f64,
    },
    /// A query named a variable that has no binding.
    Undefined {
        /// The variable.
        name: String,
    },
    /// A bare expression was evaluated (`Result: value`).
    Evaluated {
        /// The result.
        value: f64,
    },
    /// A base conversion request was answered (`Result in base B: digits`).
    Converted {
        /// Target base.
        base:   u32,
        /// The value written in that base.
        digits: String,
    },
    /// Advisory note: the value repeats in decimal but terminates in `base`.
    AlternateBase {
        /// Smallest base in which the value terminates.
        base:   u32,
        /// The value written in that base.
        digits: String,
    },
    /// A line of a block failed; the remaining lines were still processed.
    Failed {
        /// The offending line.
        line:  String,
        /// Why it failed.
        error: CalcError,
    },
}

impl Outcome {
    /// Whether this outcome reports a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(DISPLAY_DIGITS);
        match self {
            Self::Assigned { name, value } | Self::Queried { name, value } => {
                write!(f, "{name} = {}", format_decimal(*value, digits))
            },
            Self::Undefined { name } => write!(f, "Variable '{name}' is not defined"),
            Self::Evaluated { value } => write!(f, "Result: {}", format_decimal(*value, digits)),
            Self::Converted { base, digits } => write!(f, "Result in base {base}: {digits}"),
            Self::AlternateBase { base, digits } => {
                write!(f, "In base {base} the value terminates: {digits}")
            },
            Self::Failed { line, error } => write!(f, "Error in '{line}': {error}"),
        }
    }
}

/// Formats a value with at most `digits` fractional digits, dropping
/// trailing zeros and a dangling separator.
///
/// # Example
/// ```
/// use textcalc::interpreter::evaluator::outcome::format_decimal;
///
/// assert_eq!(format_decimal(1.0 / 3.0, 6), "0.333333");
/// assert_eq!(format_decimal(2.5, 6), "2.5");
/// assert_eq!(format_decimal(-0.0000001, 6), "0");
/// ```
#[must_use]
pub fn format_decimal(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{value:.digits$}");
    let trimmed = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered.as_str()
    };

    if trimmed == "-0" { "0".to_string() } else { trimmed.to_string() }
}
