use crate::ast::{BinaryOperator, Expr};

/// Evaluates an arithmetic tree with IEEE-754 double semantics.
///
/// Division by zero yields an infinity or NaN rather than an error; any
/// diagnosis of such values is left to whoever renders them.
///
/// # Example
/// ```
/// use textcalc::{
///     ast::{BinaryOperator, Expr},
///     interpreter::evaluator::arith::eval_expr,
/// };
///
/// let expr = Expr::binary(Expr::Number(1.0), BinaryOperator::Div, Expr::Number(0.0));
/// assert_eq!(eval_expr(&expr), f64::INFINITY);
/// ```
#[must_use]
pub fn eval_expr(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(value) => *value,
        Expr::Negate(operand) => -eval_expr(operand),
        Expr::BinaryOp { left, op, right } => apply(*op, eval_expr(left), eval_expr(right)),
    }
}

/// Applies a binary operator to two operands.
#[must_use]
pub fn apply(op: BinaryOperator, left: f64, right: f64) -> f64 {
    match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div => left / right,
        BinaryOperator::Pow => left.powf(right),
    }
}
