/// An abstract syntax tree (AST) node representing an arithmetic expression.
///
/// By the time an expression reaches the parser every variable has been
/// substituted and every based or repeating-decimal literal has been expanded,
/// so the tree only ever holds plain numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A decimal number literal.
    Number(f64),
    /// Unary negation of the operand.
    Negate(Box<Self>),
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left-hand operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right-hand operand.
        right: Box<Self>,
    },
}

impl Expr {
    /// Builds a [`Expr::BinaryOp`] node.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        Self::BinaryOp { left: Box::new(left),
                         op,
                         right: Box::new(right) }
    }
}

/// The arithmetic operators, from lowest to highest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`, right-associative.
    Pow,
}
