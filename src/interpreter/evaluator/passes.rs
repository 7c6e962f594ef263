//! Text passes applied to an expression before it is tokenized.
//!
//! Each pass takes the previous stage's text and returns a new string; none
//! of them mutate their input.

use crate::interpreter::evaluator::environment::Environment;

/// Where a `-` with no left operand negates the whole term that follows.
///
/// After `/` and `^` the minus only negates the next operand, so a value
/// substituted there is left bare for the parser's unary minus.
const TERM_NEGATED_AFTER: &str = "(+-*";

/// Removes one trailing `;` and surrounding whitespace.
#[must_use]
pub fn strip_terminator(expression: &str) -> &str {
    let trimmed = expression.trim();
    trimmed.strip_suffix(';').map_or(trimmed, str::trim_end)
}

/// Replaces every resolved variable reference by its value.
///
/// Only whole identifiers are replaced: a name is matched from its first
/// letter to the last letter, digit or `_` that follows it, so with `A` and
/// `AB` both bound, `AB` is never corrupted by substituting `A`. Letters that
/// continue a number (`1A_16`, `2e3`) or a fraction (`1.A_16`) are not names.
///
/// A variable preceded by a `-` with no left operand at the start of a term
/// becomes `-1*value`, so `-A^2` negates the power. After `/` or `^` the
/// value is written bare and the minus negates it alone, exactly as for a
/// literal: `2/-A` is `2/(-A)`.
/// Negative and non-finite values are written so they re-parse to the same
/// number. Pending and unknown names are left untouched.
///
/// # Example
/// ```
/// use textcalc::interpreter::evaluator::{
///     environment::{Binding, Environment},
///     passes::substitute_variables,
/// };
///
/// let mut env = Environment::new();
/// env.bind("A", Binding::Resolved(1.0));
/// env.bind("AB", Binding::Resolved(2.0));
/// env.bind("N", Binding::Resolved(-5.0));
///
/// assert_eq!(substitute_variables("AB+A", &env), "2+1");
/// assert_eq!(substitute_variables("-A*N", &env), "-1*1*(-5)");
/// assert_eq!(substitute_variables("2/-AB", &env), "2/-2");
/// assert_eq!(substitute_variables("1A_16+X", &env), "1A_16+X");
/// ```
#[must_use]
pub fn substitute_variables(expression: &str, environment: &Environment) -> String {
    let mut out = String::with_capacity(expression.len());
    let mut chars = expression.char_indices().peekable();
    let mut previous: Option<char> = None;

    while let Some((start, c)) = chars.next() {
        let starts_name = c.is_ascii_alphabetic() && !previous.is_some_and(continues_literal);
        if !starts_name {
            out.push(c);
            previous = Some(c);
            continue;
        }

        let mut end = start + c.len_utf8();
        while let Some(&(index, next)) = chars.peek() {
            if !(next.is_ascii_alphanumeric() || next == '_') {
                break;
            }
            end = index + next.len_utf8();
            chars.next();
        }
        let name = &expression[start..end];

        match environment.resolved(name) {
            Some(value) => {
                if follows_unary_minus(&out) {
                    out.push_str("1*");
                }
                out.push_str(&render_value(value));
            },
            None => out.push_str(name),
        }
        previous = name.chars().last();
    }

    out
}

/// Writes a value so the tokenizer reads back exactly the same `f64`.
///
/// Uses the shortest round-trip decimal form. Negative numbers are
/// parenthesized so `A^2` keeps its meaning, and infinities and NaN are
/// written as the divisions that produce them.
#[must_use]
pub fn render_value(value: f64) -> String {
    if value.is_nan() {
        "(0/0)".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "(1/0)".to_string() } else { "(-1/0)".to_string() }
    } else if value.is_sign_negative() && value != 0.0 {
        format!("({value})")
    } else {
        format!("{}", value.abs())
    }
}

fn continues_literal(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Whether `text` ends with a `-` that has no left operand and starts a
/// term.
fn follows_unary_minus(text: &str) -> bool {
    let trimmed = text.trim_end();
    trimmed.strip_suffix('-').is_some_and(|before| {
                                 before.trim_end()
                                       .chars()
                                       .last()
                                       .is_none_or(|c| TERM_NEGATED_AFTER.contains(c))
                             })
}
