/// The evaluator module runs instruction lines and owns the variables.
///
/// It applies the text passes (substitution, notation expansion), drives the
/// parser, evaluates the resulting tree and retries forward references until
/// they resolve.
///
/// # Responsibilities
/// - Dispatches each line by its instruction kind.
/// - Stores resolved and pending bindings.
/// - Produces structured outcomes for a shell to render.
pub mod evaluator;
/// Whole-line validation and classification.
///
/// Checks the character set and leading zeros of a raw line, then decides
/// whether it is an assignment, a query, a bare expression or a base
/// conversion request.
pub mod instruction;
/// The lexer module tokenizes fully expanded expressions.
///
/// It turns the text left after substitution and notation expansion into a
/// stream of numbers, operators and parentheses, and marks every unary
/// minus with its own token.
pub mod lexer;
/// Conversions between numbers and digit strings in bases 2 to 16.
///
/// Expands based literals (`1A_16`) and repeating decimals (`0.(3)`) into
/// plain decimals, and writes values in any supported base.
pub mod numeral;
/// The parser module builds the expression tree from tokens.
///
/// A four-level recursive descent: additive, multiplicative,
/// right-associative exponent, primary.
pub mod parser;
/// Low-denominator rational approximation.
///
/// Detects values whose decimal expansion repeats and finds the smallest
/// base in which they terminate.
pub mod rational;
