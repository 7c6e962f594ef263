/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// A base outside `2..=16` was requested or written as a literal suffix.
    #[error("Invalid base '{base}'. Bases must be between 2 and 16.")]
    InvalidBase {
        /// The base as written.
        base: String,
    },
    /// A based literal uses a digit that does not exist in its base.
    #[error("Digit '{digit}' is not valid for base {base} in '{literal}'.")]
    InvalidDigitForBase {
        /// The offending digit.
        digit:   char,
        /// The literal's base.
        base:    u32,
        /// The literal, as written.
        literal: String,
    },
    /// An expression references a variable that has no value.
    #[error("Variable '{name}' is not defined.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Infinity and NaN have no digits in any base.
    #[error("Cannot write {value} as digits in a base.")]
    NonFiniteValue {
        /// The offending value.
        value: f64,
    },
    /// Assignments that were still pending when the block ended.
    #[error("Unresolved instructions: {}.", describe_pending(.bindings))]
    UnresolvedBlock {
        /// Every unresolved variable with its last known expression.
        bindings: Vec<(String, String)>,
    },
}

impl RuntimeError {
    /// Names of the variables an [`RuntimeError::UnresolvedBlock`] reports,
    /// empty for every other variant.
    #[must_use]
    pub fn unresolved_names(&self) -> Vec<&str> {
        match self {
            Self::UnresolvedBlock { bindings } => {
                bindings.iter().map(|(name, _)| name.as_str()).collect()
            },
            _ => Vec::new(),
        }
    }
}

fn describe_pending(bindings: &[(String, String)]) -> String {
    bindings.iter()
            .map(|(name, expression)| format!("{name} = {expression}"))
            .collect::<Vec<_>>()
            .join(", ")
}
