/// Core evaluation logic.
///
/// Contains the `Evaluator`, its settings, the tagged `Evaluation` state and
/// the block-level fixed-point resolution of forward references.
pub mod core;

/// Variable storage.
///
/// Maps names to resolved values or to pending right-hand sides.
pub mod environment;

/// Text normalization passes.
///
/// Terminator stripping and variable substitution, run before notation
/// expansion and tokenizing.
pub mod passes;

/// Arithmetic evaluation of parsed expressions.
pub mod arith;

/// Renderable results.
///
/// The structured `Outcome` handed to a shell, with its plain-text form.
pub mod outcome;
