//! Runtime values and their static types.

use bigdecimal::BigDecimal;
use std::fmt;

/// Static type of an expression or value.
///
/// The language has no user-defined types; `Unknown` marks nodes the binder
/// could not resolve and never survives into a successful evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// 32-bit signed integer
    Int32,
    /// Arbitrary-precision decimal
    Decimal,
    /// Boolean
    Boolean,
    /// Unresolved (binding failed upstream)
    Unknown,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int32 => write!(f, "Int32"),
            Type::Decimal => write!(f, "Decimal"),
            Type::Boolean => write!(f, "Boolean"),
            Type::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A runtime value.
///
/// This is the closed variant the evaluator dispatches on; every literal,
/// intermediate result, function argument, and context entry is one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Decimal(BigDecimal),
    Boolean(bool),
}

impl Value {
    /// Returns the static type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Value::Int32(_) => Type::Int32,
            Value::Decimal(_) => Type::Decimal,
            Value::Boolean(_) => Type::Boolean,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<BigDecimal> for Value {
    fn from(d: BigDecimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
