//! End-to-end pipeline tests: source text in, value or diagnostics out.

use pretty_assertions::assert_eq;
use sprig::{
    ArgumentDefinition, Compilation, DiagnosticKind, EvalError, Function, FunctionError,
    FunctionRegistry, RuntimeContext, Severity, TextSpan, Type, Value,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Scales an Int32 by ten. Exercises arity and argument type checking.
struct Tenfold {
    arguments: Vec<ArgumentDefinition>,
}

impl Tenfold {
    fn new() -> Self {
        Self {
            arguments: vec![ArgumentDefinition::new(
                "value",
                "value to scale by ten",
                false,
                vec![Type::Int32],
            )],
        }
    }
}

impl Function for Tenfold {
    fn name(&self) -> &str {
        "TENFOLD"
    }

    fn return_type(&self) -> Type {
        Type::Int32
    }

    fn arguments(&self) -> &[ArgumentDefinition] {
        &self.arguments
    }

    fn execute(&self, args: &[Value], _: &RuntimeContext) -> Result<Value, FunctionError> {
        match args {
            [Value::Int32(n)] => Ok(Value::Int32(n.wrapping_mul(10))),
            _ => Err("TENFOLD expects one Int32".into()),
        }
    }
}

/// Returns `true` and counts invocations. Observes short-circuiting.
struct Tripwire {
    calls: Arc<AtomicUsize>,
}

impl Function for Tripwire {
    fn name(&self) -> &str {
        "TRIPWIRE"
    }

    fn return_type(&self) -> Type {
        Type::Boolean
    }

    fn arguments(&self) -> &[ArgumentDefinition] {
        &[]
    }

    fn execute(&self, _: &[Value], _: &RuntimeContext) -> Result<Value, FunctionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Boolean(true))
    }
}

/// Reads the `price` entry out of the runtime context, failing when the host
/// did not supply one.
struct Price;

impl Function for Price {
    fn name(&self) -> &str {
        "PRICE"
    }

    fn return_type(&self) -> Type {
        Type::Decimal
    }

    fn arguments(&self) -> &[ArgumentDefinition] {
        &[]
    }

    fn execute(&self, _: &[Value], ctx: &RuntimeContext) -> Result<Value, FunctionError> {
        ctx.get("price")
            .cloned()
            .ok_or_else(|| "no 'price' in context".into())
    }
}

fn registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry.register(Tenfold::new());
    registry.register(Price);
    registry
}

fn eval(source: &str) -> Value {
    let compilation = Compilation::compile(source, &registry());
    assert_eq!(compilation.diagnostics(), &[], "unexpected diagnostics");
    compilation
        .evaluate(&RuntimeContext::new())
        .expect("evaluation failed")
}

fn decimal(text: &str) -> Value {
    Value::Decimal(text.parse().unwrap())
}

#[test]
fn test_literals_round_trip() {
    assert_eq!(eval("42"), Value::Int32(42));
    assert_eq!(eval("3.14"), decimal("3.14"));
    assert_eq!(eval("true"), Value::Boolean(true));
    assert_eq!(eval("false"), Value::Boolean(false));
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(eval("2 + 3 * 4"), Value::Int32(14));
    assert_eq!(eval("(2 + 3) * 4"), Value::Int32(20));
    assert_eq!(eval("2 - 3 - 4"), Value::Int32(-5));
    assert_eq!(eval("-2 * 3"), Value::Int32(-6));
}

#[test]
fn test_result_is_decimal_iff_any_operand_is() {
    assert_eq!(eval("1 + 2"), Value::Int32(3));
    assert_eq!(eval("1 + 2.5"), decimal("3.5"));
    assert_eq!(eval("2.5 + 1"), decimal("3.5"));
    assert_eq!(eval("1.5 * 2.0"), decimal("3.00"));
}

#[test]
fn test_int32_division_truncates() {
    assert_eq!(eval("7 / 2"), Value::Int32(3));
    assert_eq!(eval("-7 / 2"), Value::Int32(-3));
}

#[test]
fn test_int32_arithmetic_wraps() {
    assert_eq!(eval("2147483647 + 1"), Value::Int32(i32::MIN));
}

#[test]
fn test_decimal_division_scale_and_rounding() {
    let expected = format!("0.{}", "3".repeat(28));
    assert_eq!(eval("1.0 / 3.0"), decimal(&expected));

    let expected = format!("0.{}7", "6".repeat(27));
    assert_eq!(eval("2.0 / 3.0"), decimal(&expected));
}

#[test]
fn test_division_by_zero() {
    let compilation = Compilation::compile("1 / 0", &registry());
    assert!(compilation.diagnostics().is_empty());
    let error = compilation.evaluate(&RuntimeContext::new()).unwrap_err();
    assert!(matches!(error, EvalError::DivisionByZero));

    let compilation = Compilation::compile("1.0 / 0.0", &registry());
    let error = compilation.evaluate(&RuntimeContext::new()).unwrap_err();
    assert!(matches!(error, EvalError::DivisionByZero));
}

#[test]
fn test_mixed_comparison_and_equality() {
    assert_eq!(eval("1 < 1.5"), Value::Boolean(true));
    assert_eq!(eval("1 == 1.0"), Value::Boolean(true));
    assert_eq!(eval("1 != 1.0"), Value::Boolean(false));
    assert_eq!(eval("2 >= 2"), Value::Boolean(true));
    assert_eq!(eval("2.5 <= 2"), Value::Boolean(false));
    assert_eq!(eval("true == true"), Value::Boolean(true));
}

#[test]
fn test_boolean_operators() {
    assert_eq!(eval("true and false"), Value::Boolean(false));
    assert_eq!(eval("true && true"), Value::Boolean(true));
    assert_eq!(eval("false or true"), Value::Boolean(true));
    assert_eq!(eval("not false"), Value::Boolean(true));
    assert_eq!(eval("!true or true"), Value::Boolean(true));
}

#[test]
fn test_short_circuit_skips_right_operand() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = FunctionRegistry::new();
    registry.register(Tripwire {
        calls: calls.clone(),
    });
    let context = RuntimeContext::new();

    let compilation = Compilation::compile("false and TRIPWIRE()", &registry);
    assert_eq!(
        compilation.evaluate(&context).unwrap(),
        Value::Boolean(false)
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let compilation = Compilation::compile("true or TRIPWIRE()", &registry);
    assert_eq!(compilation.evaluate(&context).unwrap(), Value::Boolean(true));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let compilation = Compilation::compile("true and TRIPWIRE()", &registry);
    assert_eq!(compilation.evaluate(&context).unwrap(), Value::Boolean(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_function_call_through_pipeline() {
    assert_eq!(eval("TENFOLD(4) + 2"), Value::Int32(42));
    assert_eq!(eval("TENFOLD(TENFOLD(1))"), Value::Int32(100));
}

#[test]
fn test_function_reads_runtime_context() {
    let compilation = Compilation::compile("PRICE() * 2", &registry());
    assert!(compilation.diagnostics().is_empty());

    let mut context = RuntimeContext::new();
    context.insert("price".to_string(), decimal("9.99"));
    assert_eq!(compilation.evaluate(&context).unwrap(), decimal("19.98"));
}

#[test]
fn test_function_failure_is_wrapped() {
    let compilation = Compilation::compile("PRICE()", &registry());
    assert!(compilation.diagnostics().is_empty());

    let error = compilation.evaluate(&RuntimeContext::new()).unwrap_err();
    match error {
        EvalError::FunctionFailed {
            name,
            function,
            arguments,
            ..
        } => {
            assert_eq!(name, "PRICE");
            assert_eq!(function.name(), "PRICE");
            assert_eq!(function.return_type(), Type::Decimal);
            assert!(arguments.is_empty());
        }
        other => panic!("expected FunctionFailed, got {:?}", other),
    }
}

#[test]
fn test_unknown_function_blocks_evaluation() {
    let compilation = Compilation::compile("UNKNOWN(1)", &registry());
    let diagnostics = compilation.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownFunction);
    assert_eq!(diagnostics[0].severity, Severity::Error);

    let error = compilation.evaluate(&RuntimeContext::new()).unwrap_err();
    assert!(matches!(
        error,
        EvalError::BlockedByDiagnostics { count: 1 }
    ));
}

#[test]
fn test_missing_close_paren_is_single_critical() {
    let source = "(1 + 2";
    let compilation = Compilation::compile(source, &registry());
    let diagnostics = compilation.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].kind,
        DiagnosticKind::MissingClosingParenthesis
    );
    assert_eq!(diagnostics[0].severity, Severity::Critical);
    assert_eq!(diagnostics[0].span, TextSpan::from_bounds(0, source.len()));

    assert!(compilation.evaluate(&RuntimeContext::new()).is_err());
}

#[test]
fn test_signature_mismatches_block_evaluation() {
    let compilation = Compilation::compile("TENFOLD(1, 2)", &registry());
    assert_eq!(
        compilation.diagnostics()[0].kind,
        DiagnosticKind::WrongArgumentCount
    );
    assert!(compilation.evaluate(&RuntimeContext::new()).is_err());

    let compilation = Compilation::compile("TENFOLD(true)", &registry());
    assert_eq!(
        compilation.diagnostics()[0].kind,
        DiagnosticKind::ArgumentTypeMismatch
    );
    assert!(compilation.evaluate(&RuntimeContext::new()).is_err());

    // A count mismatch does not silence type checks on the arguments that
    // do line up with the declaration.
    let compilation = Compilation::compile("TENFOLD(true, 2)", &registry());
    let kinds: Vec<_> = compilation.diagnostics().iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::WrongArgumentCount,
            DiagnosticKind::ArgumentTypeMismatch,
        ]
    );
    assert!(compilation.evaluate(&RuntimeContext::new()).is_err());
}

#[test]
fn test_result_type_reporting() {
    let registry = registry();
    assert_eq!(
        Compilation::compile("1 + 2", &registry).result_type(),
        Type::Int32
    );
    assert_eq!(
        Compilation::compile("1 / 2.0", &registry).result_type(),
        Type::Decimal
    );
    assert_eq!(
        Compilation::compile("1 < 2", &registry).result_type(),
        Type::Boolean
    );
    // A type error degrades the node to its left operand, so the overall
    // type stays usable even while evaluation is blocked.
    assert_eq!(
        Compilation::compile("1 + true", &registry).result_type(),
        Type::Int32
    );
    assert_eq!(
        Compilation::compile("UNKNOWN(1)", &registry).result_type(),
        Type::Unknown
    );
}

#[test]
fn test_compilation_is_idempotent() {
    let registry = registry();
    let context = RuntimeContext::new();
    for source in ["1 + 2 * 3", "1 + true", "(1 + 2"] {
        let first = Compilation::compile(source, &registry);
        let second = Compilation::compile(source, &registry);
        assert_eq!(first.diagnostics(), second.diagnostics());
        match (first.evaluate(&context), second.evaluate(&context)) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            other => panic!("runs diverged: {:?}", other),
        }
    }
}

#[test]
fn test_evaluate_is_repeatable_across_contexts() {
    let compilation = Compilation::compile("PRICE() + 0.5", &registry());
    for price in ["1.5", "2.5"] {
        let mut context = RuntimeContext::new();
        context.insert("price".to_string(), decimal(price));
        let expected = decimal(&format!("{}", 0.5 + price.parse::<f64>().unwrap()));
        assert_eq!(compilation.evaluate(&context).unwrap(), expected);
    }
}
