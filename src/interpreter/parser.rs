/// Core parsing entry points.
///
/// Declares the shared `ParseResult` alias, the whole-stream `parse`
/// function and the top of the precedence hierarchy.
pub mod core;

/// Binary operator parsing.
///
/// One function per precedence level: additive, multiplicative and the
/// right-associative exponent.
pub mod binary;

/// Primary expression parsing.
///
/// Numbers, parenthesized groups and the unary minus marker.
pub mod unary;
