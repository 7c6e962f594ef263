use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, describe, parse_expression},
    },
};

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := "(" expression ")"
///              | negate primary
///              | number
/// ```
///
/// The unary minus marker binds to the primary that follows it, so
/// `~2 ^ 2` is `(-2) ^ 2`. Substituted variables written as `-A` are
/// expanded to `-1*value` before tokenizing and keep the conventional
/// reading.
///
/// # Errors
/// - [`ParseError::MissingClosingParen`] if a `(` is never closed.
/// - [`ParseError::ExpectedNumber`] if anything else appears where a number
///   is required, including the end of input.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::LParen, column)) => {
            let column = *column;
            tokens.next();
            parse_grouping(tokens, column)
        },
        Some((Token::Negate, _)) => {
            tokens.next();
            let operand = parse_primary(tokens)?;
            Ok(Expr::Negate(Box::new(operand)))
        },
        Some((Token::Number(value), _)) => {
            let value = *value;
            tokens.next();
            Ok(Expr::Number(value))
        },
        Some((token, _)) => Err(ParseError::ExpectedNumber { found: format!("'{}'",
                                                                           describe(token)), }),
        None => Err(ParseError::ExpectedNumber { found: "end of input".to_string(), }),
    }
}

/// Parses a parenthesized expression whose `(` has already been consumed.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, column: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens)?;
    match tokens.peek() {
        Some((Token::RParen, _)) => {
            tokens.next();
            Ok(expr)
        },
        _ => Err(ParseError::MissingClosingParen { column }),
    }
}
