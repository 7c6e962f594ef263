use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{lexer::Token, parser::binary::parse_additive},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete token stream into a single expression.
///
/// Every token must be consumed; anything left after the outermost
/// expression (such as a stray `)` or two adjacent numbers) is an error.
///
/// # Errors
/// Returns the first syntax error met while descending the grammar, or
/// [`ParseError::UnexpectedToken`] for trailing tokens.
///
/// # Example
/// ```
/// use textcalc::{
///     ast::{BinaryOperator, Expr},
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize("1 + 2").unwrap();
/// assert_eq!(parse(&tokens).unwrap(),
///            Expr::binary(Expr::Number(1.0), BinaryOperator::Add, Expr::Number(2.0)));
/// ```
pub fn parse(tokens: &[(Token, usize)]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter)?;

    if let Some((token, column)) = iter.next() {
        return Err(ParseError::UnexpectedToken { token:  describe(token),
                                                 column: *column, });
    }

    Ok(expr)
}

/// Parses a full expression.
///
/// This is the entry point for recursive descent. It begins at the
/// lowest-precedence level, addition and subtraction.
///
/// Grammar: `expression := term (("+" | "-") term)*`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens)
}

/// Human-readable rendering of a token for error messages.
pub(crate) fn describe(token: &Token) -> String {
    match token {
        Token::Number(value) => value.to_string(),
        Token::Identifier(name) => name.clone(),
        Token::Plus => "+".to_string(),
        Token::Minus | Token::Negate => "-".to_string(),
        Token::Star => "*".to_string(),
        Token::Slash => "/".to_string(),
        Token::Caret => "^".to_string(),
        Token::LParen => "(".to_string(),
        Token::RParen => ")".to_string(),
        Token::Ignored => " ".to_string(),
    }
}
