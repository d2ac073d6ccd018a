use std::fmt::Display;
use std::rc::Rc;

use chizam_core::ast;

use thiserror::Error;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Real(f64),
    // Quotes included
    String(Rc<str>),
    Boolean(bool),
    Function(Rc<ast::Statement>),
    // What an assignment evaluates to: the name it wrote, not the value
    Name(Rc<str>),
}

impl Object {
    /// Whether a statement producing this object prints it on its own.
    /// Everything else is only visible through assignment echoes, loop
    /// bodies and `display`.
    pub fn is_echoed_at_top_level(&self) -> bool {
        match self {
            Object::Integer(_) => true,
            Object::String(value) => value.starts_with('"'),
            _ => false,
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            // Debug keeps the fractional part: 3.0 rather than 3
            Object::Real(value) => write!(f, "{:?}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Function(body) => write!(f, "func() -> {}", body),
            Object::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Everything a line writes to the session output, in order.
#[derive(Debug, PartialEq, Clone)]
pub enum Echo {
    Value(Object),
    UndefinedVariable(Rc<str>),
    UndefinedFunction(Rc<str>),
}

impl Display for Echo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Echo::Value(object) => write!(f, "{}", object),
            Echo::UndefinedVariable(name) => write!(f, "variable with name '{}' is undefined!", name),
            Echo::UndefinedFunction(name) => write!(f, "Undefined function '{}'", name),
        }
    }
}

/// An operand as seen by an operator: possibly the missing result of an
/// undefined lookup.
#[derive(Debug, PartialEq, Clone)]
pub struct Operand(pub Option<Object>);

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(object) => write!(f, "{}", object),
            None => write!(f, "nothing"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operation {
    Infix(ast::InfixOperationKind),
    Comparison(ast::ComparisonKind),
    Negation,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Infix(kind) => write!(f, "{}", kind),
            Operation::Comparison(kind) => write!(f, "{}", kind),
            Operation::Negation => write!(f, "unary -"),
        }
    }
}

#[derive(Debug, PartialEq, Error)]
pub enum EvaluationError {
    #[error("unsupported operands for '{operation}': {left} and {right}")]
    InvalidOperands {
        operation: Operation,
        left: Operand,
        right: Operand,
    },
    #[error("unsupported operand for '{operation}': {operand}")]
    InvalidOperand {
        operation: Operation,
        operand: Operand,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("Non boolean used in condition: {0}")]
    NonBooleanCondition(Operand),
    #[error("loop bounds must be integers, got {0}")]
    NonIntegerLoopBound(Operand),
    #[error("maximum call depth of {0} exceeded")]
    CallDepthExceeded(usize),
}
