use tracing::{debug, trace, warn};

use crate::{
    error::{CalcError, RuntimeError},
    interpreter::{
        evaluator::{
            arith::eval_expr,
            environment::{Binding, Environment},
            outcome::{DISPLAY_DIGITS, Outcome},
            passes::{strip_terminator, substitute_variables},
        },
        instruction::{Instruction, classify, detect_invalid_leading_zeros, validate_characters},
        lexer::{first_unresolved, tokenize},
        numeral::{DEFAULT_FRACTION_DIGITS, expand_special_notations, to_base},
        parser::core::parse,
        rational::{Approximator, MAX_DENOMINATOR},
    },
};

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, CalcError>;

/// Tunable limits of an [`Evaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Fractional digits written when converting to another base.
    pub max_fraction_digits: usize,
    /// Largest denominator tried when approximating a value as a fraction.
    pub max_denominator:     u32,
    /// Fractional digits a shell should show for decimal results.
    pub display_digits:      usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { max_fraction_digits: DEFAULT_FRACTION_DIGITS,
               max_denominator:     MAX_DENOMINATOR,
               display_digits:      DISPLAY_DIGITS, }
    }
}

/// State of one attempt to evaluate an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The expression has a value.
    Resolved(f64),
    /// The expression references a variable with no value yet.
    Pending {
        /// The first such variable.
        missing: String,
    },
    /// The expression can never be evaluated as written.
    Fatal(CalcError),
}

/// Evaluates instruction lines against an exclusively owned set of
/// variables.
///
/// ## Usage
///
/// One `Evaluator` serves one instruction block. Lines go through
/// [`Evaluator::process`] one at a time, or all at once through
/// [`Evaluator::process_block`], which also resolves forward references.
///
/// ```
/// use textcalc::interpreter::evaluator::core::Evaluator;
///
/// let mut evaluator = Evaluator::new();
/// let outcomes = evaluator.process_block(["A = B + 1", "B = 2"]).unwrap();
/// let rendered: Vec<String> = outcomes.iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, vec!["B = 2", "A = 3"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    environment:  Environment,
    settings:     Settings,
    approximator: Approximator,
}

impl Evaluator {
    /// Creates an evaluator with no variables and default [`Settings`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Creates an evaluator with no variables and the given settings.
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self { environment: Environment::new(),
               settings,
               approximator: Approximator::new(settings.max_denominator) }
    }

    /// The variables bound so far.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The settings this evaluator was built with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Forgets every variable, as between two instruction blocks.
    pub fn reset(&mut self) {
        self.environment.clear();
    }

    /// Processes one instruction line.
    ///
    /// The line is validated (character set, leading zeros), classified and
    /// dispatched:
    /// - an assignment binds its variable and echoes it; if its right-hand
    ///   side references a variable with no value yet, the binding is stored
    ///   as pending and nothing is echoed,
    /// - a query echoes a resolved variable, echoes nothing for a pending one
    ///   and reports an undefined one,
    /// - a bare expression echoes its result,
    /// - a base conversion echoes the result written in the requested base.
    ///
    /// Queries and bare expressions whose value repeats in decimal are
    /// followed by an [`Outcome::AlternateBase`] note when a base up to 16
    /// writes them exactly.
    ///
    /// # Errors
    /// Returns the first validation, syntax or evaluation error; the
    /// environment is left unchanged in that case.
    pub fn process(&mut self, line: &str) -> EvalResult<Vec<Outcome>> {
        validate_characters(line)?;
        detect_invalid_leading_zeros(line)?;

        let instruction = classify(line)?;
        debug!(?instruction, "classified line");

        match instruction {
            Instruction::Assignment { name, expression } => match self.evaluate(&expression) {
                Evaluation::Resolved(value) => {
                    self.environment.bind(&name, Binding::Resolved(value));
                    Ok(vec![Outcome::Assigned { name, value }])
                },
                Evaluation::Pending { missing } => {
                    debug!(%name, %missing, "assignment deferred");
                    self.environment.bind(&name, Binding::Pending(expression));
                    Ok(Vec::new())
                },
                Evaluation::Fatal(error) => Err(error),
            },
            Instruction::Query { name } => match self.environment.get(&name) {
                Some(Binding::Resolved(value)) => {
                    let value = *value;
                    let mut outcomes = vec![Outcome::Queried { name, value }];
                    outcomes.extend(self.alternate_base(value));
                    Ok(outcomes)
                },
                Some(Binding::Pending(_)) => Ok(Vec::new()),
                None => Ok(vec![Outcome::Undefined { name }]),
            },
            Instruction::BareExpression { expression } => {
                let value = self.evaluate_resolved(&expression)?;
                let mut outcomes = vec![Outcome::Evaluated { value }];
                outcomes.extend(self.alternate_base(value));
                Ok(outcomes)
            },
            Instruction::BaseConversion { expression, base } => {
                let value = self.evaluate_resolved(&expression)?;
                let digits = to_base(value, base, self.settings.max_fraction_digits)?;
                Ok(vec![Outcome::Converted { base, digits }])
            },
        }
    }

    /// Processes every non-blank line of a block, then resolves forward
    /// references.
    ///
    /// A line that fails is reported as [`Outcome::Failed`] and the block
    /// carries on. After the last line, pending assignments are retried in
    /// full passes until a pass changes nothing; each assignment resolved
    /// this way is echoed at the end of the block. This binds every
    /// assignment of an acyclic reference graph whatever the order it was
    /// written in.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnresolvedBlock`], naming every variable and
    /// its expression, if any assignment is still pending after the last
    /// pass. This is fatal for the block.
    pub fn process_block<I>(&mut self, lines: I) -> EvalResult<Vec<Outcome>>
        where I: IntoIterator,
              I::Item: AsRef<str>
    {
        let mut outcomes = Vec::new();

        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match self.process(line) {
                Ok(produced) => outcomes.extend(produced),
                Err(error) => {
                    warn!(%line, %error, "line failed");
                    outcomes.push(Outcome::Failed { line: line.to_string(),
                                                    error });
                },
            }
        }

        outcomes.extend(self.resolve_pending());

        let bindings = self.environment.pending();
        if bindings.is_empty() {
            Ok(outcomes)
        } else {
            Err(RuntimeError::UnresolvedBlock { bindings }.into())
        }
    }

    /// Retries pending assignments until a full pass makes no progress.
    ///
    /// Each pass either resolves (or drops, on a hard error) at least one
    /// pending binding or ends the loop, so the loop terminates. Bindings
    /// still pending afterwards are left in the environment.
    pub fn resolve_pending(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        let mut pass = 0;

        loop {
            pass += 1;
            let pending = self.environment.pending();
            trace!(pass, pending = pending.len(), "resolving pending assignments");

            let mut progressed = false;
            for (name, expression) in pending {
                match self.evaluate(&expression) {
                    Evaluation::Resolved(value) => {
                        debug!(%name, value, pass, "pending assignment resolved");
                        self.environment.bind(&name, Binding::Resolved(value));
                        outcomes.push(Outcome::Assigned { name, value });
                        progressed = true;
                    },
                    Evaluation::Pending { missing } => {
                        trace!(%name, %missing, "still pending");
                    },
                    Evaluation::Fatal(error) => {
                        warn!(%name, %error, "pending assignment failed");
                        self.environment.remove(&name);
                        outcomes.push(Outcome::Failed { line: format!("{name} = {expression}"),
                                                        error });
                        progressed = true;
                    },
                }
            }

            if !progressed {
                break;
            }
        }

        outcomes
    }

    /// Evaluates an expression against the current variables.
    ///
    /// Stages: strip a trailing `;`, substitute resolved variables, expand
    /// based and repeating-decimal literals, re-validate the character set,
    /// tokenize (marking unary minus), then parse and evaluate.
    ///
    /// An identifier that survives substitution makes the result
    /// [`Evaluation::Pending`]; every other failure is
    /// [`Evaluation::Fatal`].
    #[must_use]
    pub fn evaluate(&self, expression: &str) -> Evaluation {
        self.try_evaluate(expression).unwrap_or_else(Evaluation::Fatal)
    }

    /// Evaluates an expression that must resolve now.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UndefinedVariable`] if the expression
    /// references a variable with no value, or any syntax or evaluation
    /// error.
    pub fn evaluate_resolved(&self, expression: &str) -> EvalResult<f64> {
        match self.evaluate(expression) {
            Evaluation::Resolved(value) => Ok(value),
            Evaluation::Pending { missing } => {
                Err(RuntimeError::UndefinedVariable { name: missing }.into())
            },
            Evaluation::Fatal(error) => Err(error),
        }
    }

    fn try_evaluate(&self, expression: &str) -> EvalResult<Evaluation> {
        let statement = strip_terminator(expression);
        let substituted = substitute_variables(statement, &self.environment);
        let expanded = expand_special_notations(&substituted)?;
        validate_characters(&expanded)?;
        trace!(%statement, %substituted, %expanded, "normalized expression");

        let tokens = tokenize(&expanded)?;
        if let Some(missing) = first_unresolved(&tokens) {
            return Ok(Evaluation::Pending { missing: missing.to_string() });
        }

        let expr = parse(&tokens)?;
        Ok(Evaluation::Resolved(eval_expr(&expr)))
    }

    /// Advisory note for a value that repeats in decimal but terminates in a
    /// base up to 16.
    fn alternate_base(&self, value: f64) -> Option<Outcome> {
        if !self.approximator.has_repeating_decimal(value) {
            return None;
        }
        let base = self.approximator.find_best_finite_base(value)?;
        trace!(value, base, error = ?self.approximator.error(value), "alternate base found");
        let digits = to_base(value, base, self.settings.max_fraction_digits).ok()?;
        Some(Outcome::AlternateBase { base, digits })
    }
}
