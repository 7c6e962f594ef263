//! # textcalc
//!
//! textcalc is a line-oriented calculator written in Rust. It evaluates
//! arithmetic over named variables, lets assignments reference variables
//! defined further down the same block, and understands literals written in
//! bases 2 to 16 (`1A_16`) and repeating decimals (`0.(3)`).

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::evaluator::{
    core::{EvalResult, Evaluator},
    outcome::Outcome,
};

/// Defines the arithmetic expression tree.
///
/// This module declares the `Expr` enum built by the parser and walked by
/// the evaluator. By the time a tree exists, variables and special literals
/// have already been replaced by plain numbers.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while validating,
/// classifying, tokenizing, parsing or evaluating a line, and the fatal
/// block-level error for assignments that never resolve.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Carries the offending text and a human-readable reason.
/// - Integrates with `std::error::Error` through `thiserror`.
pub mod error;
/// Orchestrates the evaluation of instruction lines.
///
/// This module ties together validation, classification, notation
/// expansion, tokenizing, parsing, evaluation and the variable environment.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for processing single lines and whole blocks.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32` and `f64` without silent data loss.
/// - Provide the digit alphabet shared by every base.
pub mod util;

/// Runs one instruction block and returns everything it produced.
///
/// Each line of `source` is one instruction; blank lines are skipped. The
/// block runs on a fresh [`Evaluator`], so no variable survives the call.
///
/// # Errors
/// Returns an error if any assignment is still unresolved at the end of the
/// block. Failures of individual lines are reported as
/// [`Outcome::Failed`] instead.
///
/// # Examples
/// ```
/// use textcalc::run_block;
///
/// let outcomes = run_block("A = 2\nB = A+3\nB =>_2").unwrap();
/// let rendered: Vec<String> = outcomes.iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, vec!["A = 2", "B = 5", "Result in base 2: 101"]);
///
/// // A cycle can never resolve.
/// assert!(run_block("A = B\nB = A").is_err());
/// ```
pub fn run_block(source: &str) -> EvalResult<Vec<Outcome>> {
    Evaluator::new().process_block(source.lines())
}
