/// Represents all errors that can occur while validating or parsing a line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text contains a character outside the calculator's alphabet.
    #[error("Syntax error: character '{character}' is not allowed in '{text}'.")]
    InvalidCharacter {
        /// The first offending character.
        character: char,
        /// The text that was being validated.
        text:      String,
    },
    /// A decimal or based literal has a multi-digit integer part starting
    /// with `0`.
    #[error("Syntax error: literal '{literal}' has a leading zero.")]
    LeadingZero {
        /// The offending integer part, as written.
        literal: String,
    },
    /// An assignment or query names something that is not an identifier.
    #[error("Invalid variable name '{name}'. Names start with a letter followed by letters, digits or '_', and must not read as a based literal.")]
    InvalidVariableName {
        /// The rejected name.
        name: String,
    },
    /// The line is neither an assignment, a query, a bare expression nor a
    /// base conversion request.
    #[error("Syntax error: unknown instruction format '{line}'.")]
    UnknownInstruction {
        /// The rejected line.
        line: String,
    },
    /// The tokenizer found text it does not recognise, or the parser found a
    /// token where the expression should have ended.
    #[error("Syntax error: unexpected '{token}' at column {column}.")]
    UnexpectedToken {
        /// The unexpected slice.
        token:  String,
        /// Byte offset of the slice in the expanded expression.
        column: usize,
    },
    /// An opening parenthesis was never closed.
    #[error("Syntax error: missing closing parenthesis for '(' at column {column}.")]
    MissingClosingParen {
        /// Byte offset of the unmatched `(`.
        column: usize,
    },
    /// A number was expected but something else (or nothing) was found.
    #[error("Syntax error: expected number, found {found}.")]
    ExpectedNumber {
        /// Description of what was found instead.
        found: String,
    },
}
