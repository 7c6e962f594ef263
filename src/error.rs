/// Syntax errors.
///
/// Defines every error raised while validating, classifying, tokenizing or
/// parsing an instruction line, before any arithmetic is performed.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors raised while evaluating: numeral-base violations,
/// undefined variables, and instruction blocks whose assignments never
/// resolve.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error the calculator can report for a line or a block.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// The line is syntactically invalid.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The line is well formed but could not be evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
