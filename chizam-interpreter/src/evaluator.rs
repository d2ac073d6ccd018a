use std::cmp::Ordering;

use chizam_core::ast;
use chizam_core::ast::{ComparisonKind, Expression, InfixOperationKind, Statement};

use crate::environment::Environment;
use crate::object::{Echo, EvaluationError, Object, Operand, Operation};

/// Nested function calls allowed before a line is abandoned.
pub const MAX_CALL_DEPTH: usize = 200;

/// `None` is the "no value" result: nothing to print, and not usable as an
/// operand.
pub type Evaluated = Result<Option<Object>, EvaluationError>;

struct Context<'a> {
    environment: &'a mut Environment,
    echoes: &'a mut Vec<Echo>,
    call_depth: usize,
}

/// Evaluates one parsed line and applies the top-level print policy.
///
/// Echoes are appended to `echoes` as they happen, so a line that fails part
/// way keeps whatever it printed (and assigned) before the failure.
pub fn eval_line(
    statement: &Statement,
    environment: &mut Environment,
    echoes: &mut Vec<Echo>,
) -> Evaluated {
    let mut context = Context {
        environment,
        echoes,
        call_depth: 0,
    };
    let result = eval_statement(statement, &mut context)?;

    if let Some(object) = &result {
        if object.is_echoed_at_top_level() {
            context.echoes.push(Echo::Value(object.clone()));
        }
    }
    Ok(result)
}

fn eval_statement(statement: &Statement, context: &mut Context) -> Evaluated {
    match statement {
        Statement::Empty => Ok(None),
        Statement::Expression(expression) => eval_expression(expression, context),
        Statement::Assign(assignment) => {
            eval_assignment(assignment, context)?;
            Ok(Some(Object::Name(assignment.identifier.name.clone())))
        }
        Statement::If {
            condition,
            consequence,
            alternative,
        } => match eval_expression(condition, context)? {
            Some(Object::Boolean(true)) => eval_statement(consequence, context),
            Some(Object::Boolean(false)) => eval_statement(alternative, context),
            other => Err(EvaluationError::NonBooleanCondition(Operand(other))),
        },
        Statement::For {
            initializer,
            limit,
            body,
        } => eval_for_loop(initializer, limit, body, context),
        Statement::FunctionDefinition { identifier, body } => {
            context
                .environment
                .set(identifier.name.clone(), Object::Function(body.clone()));
            Ok(None)
        }
        Statement::Call(identifier) => eval_call(identifier, context),
        Statement::Display(inner) => {
            if let Some(object) = eval_statement(inner, context)? {
                context.echoes.push(Echo::Value(object));
            }
            Ok(None)
        }
    }
}

/// Stores and echoes the assigned value, returning it for the caller's use.
/// A missing value leaves the name unbound.
fn eval_assignment(
    assignment: &ast::Assignment,
    context: &mut Context,
) -> Result<Option<Object>, EvaluationError> {
    let name = &assignment.identifier.name;
    let value = eval_expression(&assignment.value, context)?;

    match &value {
        Some(object) => {
            context.environment.set(name.clone(), object.clone());
            context.echoes.push(Echo::Value(object.clone()));
        }
        None => {
            context.environment.remove(name);
        }
    }
    Ok(value)
}

fn eval_for_loop(
    initializer: &ast::Assignment,
    limit: &Expression,
    body: &Statement,
    context: &mut Context,
) -> Evaluated {
    let name = &initializer.identifier.name;

    let start = match eval_assignment(initializer, context)? {
        Some(Object::Integer(value)) => value,
        other => return Err(EvaluationError::NonIntegerLoopBound(Operand(other))),
    };
    let limit = match eval_expression(limit, context)? {
        Some(Object::Integer(value)) => value,
        other => return Err(EvaluationError::NonIntegerLoopBound(Operand(other))),
    };

    // The body runs before the variable is advanced, so it always sees the
    // previous index.
    if let Some(first) = start.checked_add(1) {
        for index in first..=limit {
            if let Some(object) = eval_statement(body, context)? {
                context.echoes.push(Echo::Value(object));
            }
            context.environment.set(name.clone(), Object::Integer(index));
        }
    }

    context.environment.remove(name);
    tracing::debug!(variable = %name, "loop variable removed");
    Ok(None)
}

fn eval_call(identifier: &ast::Identifier, context: &mut Context) -> Evaluated {
    let name = &identifier.name;

    let body = match context.environment.get(name) {
        Some(Object::Function(body)) => body.clone(),
        // Calling a plain value just yields it
        Some(object) => return Ok(Some(object.clone())),
        None => {
            tracing::trace!(function = %name, "call of undefined function");
            context.echoes.push(Echo::UndefinedFunction(name.clone()));
            return Ok(None);
        }
    };

    if context.call_depth >= MAX_CALL_DEPTH {
        return Err(EvaluationError::CallDepthExceeded(MAX_CALL_DEPTH));
    }
    context.call_depth += 1;
    let result = eval_statement(&body, context);
    context.call_depth -= 1;
    result
}

fn eval_expression(expression: &Expression, context: &mut Context) -> Evaluated {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Some(Object::Integer(*value))),
        Expression::StringLiteral(value) => Ok(Some(Object::String(value.clone()))),
        Expression::Identifier(identifier) => {
            let name = &identifier.name;
            match context.environment.get(name) {
                Some(object) => Ok(Some(object.clone())),
                None => {
                    tracing::trace!(variable = %name, "lookup of undefined variable");
                    context.echoes.push(Echo::UndefinedVariable(name.clone()));
                    Ok(None)
                }
            }
        }
        Expression::Negation(expression) => {
            let operand = eval_expression(expression, context)?;
            eval_negation(operand).map(Some)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, context)?;
            let right = eval_expression(right, context)?;
            eval_infix_operation(*kind, left, right).map(Some)
        }
        Expression::Comparison(kind, left, right) => {
            let left = eval_expression(left, context)?;
            let right = eval_expression(right, context)?;
            eval_comparison(*kind, left, right).map(Some)
        }
    }
}

fn eval_negation(operand: Option<Object>) -> Result<Object, EvaluationError> {
    match operand {
        Some(Object::Integer(value)) => value
            .checked_neg()
            .map(Object::Integer)
            .ok_or(EvaluationError::IntegerOverflow),
        Some(Object::Real(value)) => Ok(Object::Real(-value)),
        other => Err(EvaluationError::InvalidOperand {
            operation: Operation::Negation,
            operand: Operand(other),
        }),
    }
}

fn as_real(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}

fn eval_infix_operation(
    kind: InfixOperationKind,
    left: Option<Object>,
    right: Option<Object>,
) -> Result<Object, EvaluationError> {
    match (kind, left, right) {
        (_, Some(Object::Integer(left)), Some(Object::Integer(right))) => {
            eval_integer_operation(kind, left, right)
        }
        (InfixOperationKind::Plus, Some(Object::String(left)), Some(Object::String(right))) => {
            Ok(Object::String(format!("{}{}", left, right).into()))
        }
        (_, left, right) => match (
            left.as_ref().and_then(as_real),
            right.as_ref().and_then(as_real),
        ) {
            (Some(left), Some(right)) => eval_real_operation(kind, left, right),
            _ => Err(EvaluationError::InvalidOperands {
                operation: Operation::Infix(kind),
                left: Operand(left),
                right: Operand(right),
            }),
        },
    }
}

fn eval_integer_operation(
    kind: InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Object, EvaluationError> {
    use InfixOperationKind::*;
    let result = match kind {
        Plus => left.checked_add(right),
        Minus => left.checked_sub(right),
        Multiply => left.checked_mul(right),
        // Division never truncates
        Divide if right == 0 => return Err(EvaluationError::DivisionByZero),
        Divide => return Ok(Object::Real(left as f64 / right as f64)),
        Modulo if right == 0 => return Err(EvaluationError::DivisionByZero),
        Modulo => {
            // i64::MIN % -1 is the only overflowing case, and it is 0
            let remainder = left.checked_rem(right).unwrap_or(0);
            if remainder != 0 && (remainder < 0) != (right < 0) {
                Some(remainder + right)
            } else {
                Some(remainder)
            }
        }
    };
    result
        .map(Object::Integer)
        .ok_or(EvaluationError::IntegerOverflow)
}

fn eval_real_operation(
    kind: InfixOperationKind,
    left: f64,
    right: f64,
) -> Result<Object, EvaluationError> {
    use InfixOperationKind::*;
    let result = match kind {
        Plus => left + right,
        Minus => left - right,
        Multiply => left * right,
        Divide | Modulo if right == 0.0 => return Err(EvaluationError::DivisionByZero),
        Divide => left / right,
        Modulo => {
            let remainder = left % right;
            if remainder != 0.0 && (remainder < 0.0) != (right < 0.0) {
                remainder + right
            } else {
                remainder
            }
        }
    };
    Ok(Object::Real(result))
}

fn order_of(left: &Object, right: &Object) -> Option<Ordering> {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => Some(left.cmp(right)),
        (Object::String(left), Object::String(right)) => Some(left.cmp(right)),
        _ => match (as_real(left), as_real(right)) {
            (Some(left), Some(right)) => left.partial_cmp(&right),
            _ => None,
        },
    }
}

fn eval_comparison(
    kind: ComparisonKind,
    left: Option<Object>,
    right: Option<Object>,
) -> Result<Object, EvaluationError> {
    let invalid = |left: Option<Object>, right: Option<Object>| EvaluationError::InvalidOperands {
        operation: Operation::Comparison(kind),
        left: Operand(left),
        right: Operand(right),
    };

    let (left, right) = match (left, right) {
        (Some(left), Some(right)) => (left, right),
        (left, right) => return Err(invalid(left, right)),
    };

    let result = match (kind, order_of(&left, &right)) {
        (ComparisonKind::Equal, Some(ordering)) => ordering == Ordering::Equal,
        // Unrelated kinds are simply unequal
        (ComparisonKind::Equal, None) => left == right,
        (ComparisonKind::LessThan, Some(ordering)) => ordering == Ordering::Less,
        (ComparisonKind::GreaterThan, Some(ordering)) => ordering == Ordering::Greater,
        (ComparisonKind::LessEqual, Some(ordering)) => ordering != Ordering::Greater,
        (ComparisonKind::GreaterEqual, Some(ordering)) => ordering != Ordering::Less,
        (_, None) => return Err(invalid(Some(left), Some(right))),
    };
    Ok(Object::Boolean(result))
}
