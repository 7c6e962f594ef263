use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token of a fully expanded arithmetic expression.
///
/// The token stream is produced after variable substitution and notation
/// expansion, so it only has to cover decimal numbers, the five operators,
/// parentheses and any identifier that could not be substituted.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+", parse_number)]
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_number)]
    Number(f64),
    /// A variable name left over after substitution; its value is unknown.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// Binary `-`.
    #[token("-")]
    Minus,
    /// Unary minus marker.
    ///
    /// Never produced from user text (`~` is rejected by character
    /// validation); [`mark_unary_minus`] rewrites every `-` without a left
    /// operand into this token.
    #[token("~")]
    Negate,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Whitespace.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Returns `true` for tokens after which a `-` cannot be binary.
    const fn expects_operand_next(&self) -> bool {
        matches!(self,
                 Self::Plus
                 | Self::Minus
                 | Self::Negate
                 | Self::Star
                 | Self::Slash
                 | Self::Caret
                 | Self::LParen)
    }
}

/// Converts an expanded expression into `(Token, column)` pairs.
///
/// The column is the byte offset of the token in `source`. Every `-` that
/// follows the start of input, `(` or another operator is rewritten into
/// [`Token::Negate`].
///
/// # Errors
/// Returns [`ParseError::UnexpectedToken`] for any slice the lexer does not
/// recognise (for example `=` or a stray `_`).
///
/// # Example
/// ```
/// use textcalc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("3*-2").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|(token, _)| token).collect();
/// assert_eq!(kinds,
///            vec![Token::Number(3.0), Token::Star, Token::Negate, Token::Number(2.0)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.span().start));
        } else {
            return Err(ParseError::UnexpectedToken { token:  lexer.slice().to_string(),
                                                     column: lexer.span().start, });
        }
    }

    Ok(mark_unary_minus(tokens))
}

/// Rewrites every `-` that has no left operand into [`Token::Negate`].
#[must_use]
pub fn mark_unary_minus(tokens: Vec<(Token, usize)>) -> Vec<(Token, usize)> {
    let mut marked: Vec<(Token, usize)> = Vec::with_capacity(tokens.len());

    for (token, column) in tokens {
        let unary = token == Token::Minus
                    && marked.last().is_none_or(|(previous, _)| previous.expects_operand_next());
        if unary {
            marked.push((Token::Negate, column));
        } else {
            marked.push((token, column));
        }
    }

    marked
}

/// Returns the first identifier in the token stream, if any.
///
/// An identifier that survives substitution names a variable that is either
/// unknown or still pending.
#[must_use]
pub fn first_unresolved(tokens: &[(Token, usize)]) -> Option<&str> {
    tokens.iter().find_map(|(token, _)| match token {
                     Token::Identifier(name) => Some(name.as_str()),
                     _ => None,
                 })
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
