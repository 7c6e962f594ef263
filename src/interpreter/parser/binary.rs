use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_primary},
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Expr::binary(left, op, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*` and `/`.
///
/// The rule is: `multiplicative := exponent (("*" | "/") exponent)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_exponent(tokens)?;
    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            let right = parse_exponent(tokens)?;
            left = Expr::binary(left, op, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: the exponent side recurses into
/// this same rule, so `a ^ b ^ c` parses as `a ^ (b ^ c)`.
///
/// The rule is: `exponent := primary ("^" exponent)?`
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(tokens)?;
    if let Some((Token::Caret, _)) = tokens.peek() {
        tokens.next();
        let exponent = parse_exponent(tokens)?;
        return Ok(Expr::binary(base, BinaryOperator::Pow, exponent));
    }
    Ok(base)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for every token that is not one of `+ - * / ^`. The unary
/// minus marker maps to `None`.
///
/// # Example
/// ```
/// use textcalc::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Negate), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}
