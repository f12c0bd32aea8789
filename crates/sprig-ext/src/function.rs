//! The callable-function contract.

use crate::value::{Type, Value};
use std::collections::HashMap;

/// Opaque host data threaded through an evaluation.
///
/// Passed unchanged from the top-level evaluate call into every function
/// invocation; the core never inspects or mutates it.
pub type RuntimeContext = HashMap<String, Value>;

/// Failure raised by a function's `execute` implementation.
pub type FunctionError = Box<dyn std::error::Error + Send + Sync>;

/// Schema for one argument of a [`Function`].
///
/// The binder checks each call site against this, index by index: the
/// argument list defines the function's arity and the accepted-type set
/// at each position.
#[derive(Debug, Clone)]
pub struct ArgumentDefinition {
    name: String,
    description: String,
    nullable: bool,
    accepted: Vec<Type>,
}

impl ArgumentDefinition {
    /// Creates an argument definition.
    ///
    /// `accepted` lists every type this position tolerates; the binder
    /// rejects call arguments whose bound type is not in the set.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        nullable: bool,
        accepted: impl Into<Vec<Type>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            nullable,
            accepted: accepted.into(),
        }
    }

    /// Argument name, for documentation and diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether a host-side caller may omit this argument's value.
    ///
    /// The expression language itself has no null literal; this flag exists
    /// for hosts that invoke functions outside an expression.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The set of types accepted at this position.
    pub fn accepted(&self) -> &[Type] {
        &self.accepted
    }
}

/// Contract for objects registered as callable functions.
///
/// The parser resolves call sites against registered names, the binder
/// validates arity and argument types against [`Function::arguments`], and
/// the evaluator invokes [`Function::execute`] with the evaluated argument
/// list and the caller-supplied context.
///
/// Implementations must be safe to call concurrently from independent
/// evaluations.
pub trait Function: Send + Sync {
    /// The exact name call sites are matched against.
    fn name(&self) -> &str;

    /// The static type of the value `execute` returns.
    fn return_type(&self) -> Type;

    /// Ordered argument schema; its length is the function's arity.
    fn arguments(&self) -> &[ArgumentDefinition];

    /// Runs the function with evaluated arguments and the host context.
    fn execute(&self, args: &[Value], ctx: &RuntimeContext) -> Result<Value, FunctionError>;
}
