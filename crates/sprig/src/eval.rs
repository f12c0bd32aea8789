//! Tree-walking evaluation of bound expressions.
//!
//! # Design
//!
//! - Int32 arithmetic wraps on overflow; only Int32 division by zero is a
//!   runtime error
//! - Any Decimal operand promotes the whole operation to Decimal
//! - Decimal division is fixed at 28 fractional digits, rounding half to even
//! - `and`/`or` short-circuit: the right operand is untouched when the left
//!   decides the result
//! - Function failures are wrapped with the call's name, evaluated arguments,
//!   and a copy of the runtime context, so hosts can log the exact invocation

use crate::binding::{BinaryOperatorKind, BoundExpr, UnaryOperatorKind};
use bigdecimal::{BigDecimal, RoundingMode, Zero};
use sprig_ext::{Function, FunctionError, RuntimeContext, Value};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Fractional digits kept by Decimal division.
const DIVISION_SCALE: i64 = 28;

/// A failure during evaluation.
#[derive(thiserror::Error)]
pub enum EvalError {
    /// The compilation carries diagnostics; evaluation refused to start.
    #[error("evaluation blocked by {count} outstanding diagnostic(s)")]
    BlockedByDiagnostics { count: usize },

    /// Int32 division with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// A registered function's `execute` returned an error. Carries the
    /// function descriptor, the evaluated arguments, and a copy of the
    /// runtime context, so hosts can reconstruct the exact invocation.
    #[error("function '{name}' failed (arguments: {arguments:?})")]
    FunctionFailed {
        name: String,
        function: Arc<dyn Function>,
        arguments: Vec<Value>,
        context: RuntimeContext,
        #[source]
        source: FunctionError,
    },

    /// An invariant the binder should have enforced did not hold.
    #[error("internal evaluation error: {0}")]
    Internal(String),
}

impl fmt::Debug for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::BlockedByDiagnostics { count } => f
                .debug_struct("BlockedByDiagnostics")
                .field("count", count)
                .finish(),
            EvalError::DivisionByZero => write!(f, "DivisionByZero"),
            EvalError::FunctionFailed {
                name,
                arguments,
                context,
                source,
                ..
            } => f
                .debug_struct("FunctionFailed")
                .field("name", name)
                .field("arguments", arguments)
                .field("context", context)
                .field("source", source)
                .finish(),
            EvalError::Internal(message) => f.debug_tuple("Internal").field(message).finish(),
        }
    }
}

pub(crate) struct Evaluator<'ctx> {
    context: &'ctx RuntimeContext,
}

impl<'ctx> Evaluator<'ctx> {
    pub(crate) fn new(context: &'ctx RuntimeContext) -> Self {
        Self { context }
    }

    pub(crate) fn evaluate(&self, expr: &BoundExpr) -> Result<Value, EvalError> {
        match expr {
            BoundExpr::Literal(value) => Ok(value.clone()),
            BoundExpr::Unary { operator, operand } => {
                let value = self.evaluate(operand)?;
                self.evaluate_unary(operator.kind, value)
            }
            BoundExpr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(operator.kind, left, right),
            BoundExpr::Call {
                function,
                arguments,
            } => {
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }
                trace!(function = function.name(), arity = values.len(), "invoking function");
                function
                    .execute(&values, self.context)
                    .map_err(|source| EvalError::FunctionFailed {
                        name: function.name().to_string(),
                        function: function.clone(),
                        arguments: values,
                        context: self.context.clone(),
                        source,
                    })
            }
            BoundExpr::Unknown => Err(EvalError::Internal(
                "attempted to evaluate an unbound expression".to_string(),
            )),
        }
    }

    fn evaluate_unary(&self, kind: UnaryOperatorKind, value: Value) -> Result<Value, EvalError> {
        match (kind, value) {
            (UnaryOperatorKind::Identity, value) => Ok(value),
            (UnaryOperatorKind::Negation, Value::Int32(n)) => Ok(Value::Int32(n.wrapping_neg())),
            (UnaryOperatorKind::Negation, Value::Decimal(d)) => Ok(Value::Decimal(-d)),
            (UnaryOperatorKind::LogicalNegation, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (kind, value) => Err(EvalError::Internal(format!(
                "unary {:?} applied to {}",
                kind,
                value.ty()
            ))),
        }
    }

    fn evaluate_binary(
        &self,
        kind: BinaryOperatorKind,
        left: &BoundExpr,
        right: &BoundExpr,
    ) -> Result<Value, EvalError> {
        // Logical operators decide on the left value alone when they can;
        // the right subtree is then never evaluated.
        match kind {
            BinaryOperatorKind::LogicalAnd => {
                if !as_bool(self.evaluate(left)?)? {
                    return Ok(Value::Boolean(false));
                }
                return Ok(Value::Boolean(as_bool(self.evaluate(right)?)?));
            }
            BinaryOperatorKind::LogicalOr => {
                if as_bool(self.evaluate(left)?)? {
                    return Ok(Value::Boolean(true));
                }
                return Ok(Value::Boolean(as_bool(self.evaluate(right)?)?));
            }
            _ => {}
        }

        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        match kind {
            BinaryOperatorKind::Addition
            | BinaryOperatorKind::Subtraction
            | BinaryOperatorKind::Multiplication
            | BinaryOperatorKind::Division => arithmetic(kind, left, right),
            BinaryOperatorKind::Equality => Ok(Value::Boolean(values_equal(&left, &right)?)),
            BinaryOperatorKind::Inequality => Ok(Value::Boolean(!values_equal(&left, &right)?)),
            BinaryOperatorKind::LessThan => {
                Ok(Value::Boolean(compare(&left, &right)? == Ordering::Less))
            }
            BinaryOperatorKind::LessThanOrEqual => {
                Ok(Value::Boolean(compare(&left, &right)? != Ordering::Greater))
            }
            BinaryOperatorKind::GreaterThan => {
                Ok(Value::Boolean(compare(&left, &right)? == Ordering::Greater))
            }
            BinaryOperatorKind::GreaterThanOrEqual => {
                Ok(Value::Boolean(compare(&left, &right)? != Ordering::Less))
            }
            BinaryOperatorKind::LogicalAnd | BinaryOperatorKind::LogicalOr => unreachable!(),
        }
    }
}

fn as_bool(value: Value) -> Result<bool, EvalError> {
    match value {
        Value::Boolean(b) => Ok(b),
        other => Err(EvalError::Internal(format!(
            "expected Boolean operand, got {}",
            other.ty()
        ))),
    }
}

fn as_decimal(value: &Value) -> Result<BigDecimal, EvalError> {
    match value {
        Value::Int32(n) => Ok(BigDecimal::from(*n)),
        Value::Decimal(d) => Ok(d.clone()),
        Value::Boolean(_) => Err(EvalError::Internal(
            "expected numeric operand, got Boolean".to_string(),
        )),
    }
}

/// Numeric arithmetic. Two Int32 operands stay in native integer math; any
/// Decimal operand promotes both sides.
fn arithmetic(kind: BinaryOperatorKind, left: Value, right: Value) -> Result<Value, EvalError> {
    if let (Value::Int32(l), Value::Int32(r)) = (&left, &right) {
        let result = match kind {
            BinaryOperatorKind::Addition => l.wrapping_add(*r),
            BinaryOperatorKind::Subtraction => l.wrapping_sub(*r),
            BinaryOperatorKind::Multiplication => l.wrapping_mul(*r),
            BinaryOperatorKind::Division => {
                if *r == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                l.wrapping_div(*r)
            }
            _ => {
                return Err(EvalError::Internal(format!(
                    "non-arithmetic kind {:?} in arithmetic",
                    kind
                )))
            }
        };
        return Ok(Value::Int32(result));
    }

    let l = as_decimal(&left)?;
    let r = as_decimal(&right)?;
    let result = match kind {
        BinaryOperatorKind::Addition => &l + &r,
        BinaryOperatorKind::Subtraction => &l - &r,
        BinaryOperatorKind::Multiplication => &l * &r,
        BinaryOperatorKind::Division => {
            if r.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            (&l / &r).with_scale_round(DIVISION_SCALE, RoundingMode::HalfEven)
        }
        _ => {
            return Err(EvalError::Internal(format!(
                "non-arithmetic kind {:?} in arithmetic",
                kind
            )))
        }
    };
    Ok(Value::Decimal(result))
}

/// Equality across values of the same or mixed numeric types. A Decimal on
/// either side promotes the comparison to Decimal.
fn values_equal(left: &Value, right: &Value) -> Result<bool, EvalError> {
    match (left, right) {
        (Value::Decimal(_), _) | (_, Value::Decimal(_)) => {
            Ok(as_decimal(left)? == as_decimal(right)?)
        }
        _ => Ok(left == right),
    }
}

/// Numeric ordering, promoting to Decimal when the types differ.
fn compare(left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    match (left, right) {
        (Value::Int32(l), Value::Int32(r)) => Ok(l.cmp(r)),
        _ => Ok(as_decimal(left)?.cmp(&as_decimal(right)?)),
    }
}
