use std::{collections::HashMap, f64::consts::PI};

use tally::{
    ast::{Expr, InfixOperator},
    error::{Error, ParseError, RuntimeError},
    evaluate_source, evaluate_source_with,
    interpreter::evaluator::{
        core::Evaluator, environment::Environment, function::core::Arity,
    },
    parse_program,
};

fn assert_value(src: &str, expected: f64) {
    match evaluate_source(src) {
        Ok(value) => assert_eq!(value, expected, "script:\n{src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_close(src: &str, expected: f64) {
    match evaluate_source(src) {
        Ok(value) => {
            assert!((value - expected).abs() < 1e-9,
                    "expected {expected}, got {value}, script:\n{src}");
        },
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match evaluate_source(src) {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error, got {other:?}\n{src}"),
    }
}

fn parse_error(src: &str) -> ParseError {
    match evaluate_source(src) {
        Err(Error::Parse(e)) => e,
        other => panic!("expected a parse error, got {other:?}\n{src}"),
    }
}

#[test]
fn numbers_evaluate_to_themselves() {
    for value in [0.0, 42.0, 3.25, 0.5, 2.0, 1e-3, 2.5e4, 1e308] {
        let expr = Expr::Number { value, line: 1 };
        let env = Environment::new();
        assert_eq!(Evaluator::new().evaluate(&expr, &env.variables, &env.functions), Ok(value));
    }
}

#[test]
fn numeric_literal_forms() {
    assert_value("42", 42.0);
    assert_value(".5", 0.5);
    assert_value("2.", 2.0);
    assert_value("1e-3", 0.001);
    assert_value("2.5E+4", 25_000.0);
}

#[test]
fn operator_precedence() {
    assert_value("2*3+(5/(7-3**2))", 3.5);
    assert_value("1 + 2 * 3", 7.0);
    assert_value("(1 + 2) * 3", 9.0);
    assert_value("10 - 4 - 3", 3.0);
    assert_value("64 / 4 / 2", 8.0);
}

#[test]
fn power_is_left_associative() {
    assert_value("2**3**2", 64.0);
    assert_value("2 ** 0.5 ** 2", 2.0);
}

#[test]
fn prefix_operators() {
    assert_value("-3", -3.0);
    assert_value("+-+3", -3.0);
    assert_value("--3", 3.0);
    assert_value("-2**2", 4.0);
    assert_value("2 * -3", -6.0);
}

#[test]
fn division_by_zero_follows_ieee() {
    assert_value("1/0", f64::INFINITY);
    assert_value("-1/0", f64::NEG_INFINITY);
    assert!(evaluate_source("0/0").unwrap().is_nan());
}

#[test]
fn builtin_constants_and_functions() {
    assert_close("cos(pi)", -1.0);
    assert_close("sin(pi / 2)", 1.0);
    assert_close("tan(0)", 0.0);
    assert_close("acos(1)", 0.0);
    assert_close("asin(1)", PI / 2.0);
    assert_close("atan(1)", PI / 4.0);
    assert_close("atan2(1, 1)", PI / 4.0);
    assert_close("deg(pi)", 180.0);
    assert_close("rad(90)", PI / 2.0);
    assert_close("e", std::f64::consts::E);
    assert_value("abs(-7)", 7.0);
    assert_value("max(3, 9, -1)", 9.0);
    assert_value("min(3, 9, -1)", -1.0);
    assert_value("max(5)", 5.0);
}

#[test]
fn closures_capture_variables_by_value() {
    assert_value("a := 6\nf(b) := a + 4\na := 7\nf(5)", 10.0);
    assert_value("x := 1; f() := x; x := 2; g() := x; f() + g()", 3.0);
}

#[test]
fn parameters_shadow_outer_variables() {
    assert_value("x := 100\nf(x) := x * 2\nf(3) + x", 106.0);
}

#[test]
fn forward_references_and_recursion() {
    assert_value("f(x) := g(x) + 1\ng(x) := x * 10\nf(2)", 21.0);
    // Recursion needs no conditional to terminate if it is never entered.
    assert_value("f(n) := f(n - 1)\n5", 5.0);
}

#[test]
fn user_functions_shadow_builtins() {
    assert_value("sin(x) := x + 1\nsin(1)", 2.0);
    assert_value("pi := 3\npi", 3.0);
}

#[test]
fn function_redefinition_affects_earlier_callers() {
    assert_value("g() := 1\nf() := g()\ng() := 2\nf()", 2.0);
}

#[test]
fn unknown_names() {
    assert_eq!(runtime_error("z"),
               RuntimeError::UnknownVariable { name: "z".into(),
                                               line: 1, });
    assert_eq!(runtime_error("1 +\nnope()"),
               RuntimeError::UnknownFunction { name: "nope".into(),
                                               line: 2, });
}

#[test]
fn argument_count_is_checked() {
    assert_eq!(runtime_error("atan2(1)"),
               RuntimeError::ArityMismatch { name:     "atan2".into(),
                                             expected: Arity::Exact(2),
                                             found:    1,
                                             line:     1, });
    assert_eq!(runtime_error("f(b) := b\nf(1, 2)"),
               RuntimeError::ArityMismatch { name:     "f".into(),
                                             expected: Arity::Exact(1),
                                             found:    2,
                                             line:     2, });
    assert!(matches!(runtime_error("max()"),
                     RuntimeError::ArityMismatch { expected: Arity::AtLeast(1), .. }));
}

#[test]
fn duplicate_parameters_fail_when_defined() {
    assert_eq!(runtime_error("f(a, a) := a\n1"),
               RuntimeError::DuplicateParameter { function: "f".into(),
                                                  name:     "a".into(),
                                                  line:     1, });
}

#[test]
fn unbounded_recursion_is_reported() {
    assert!(matches!(runtime_error("f(x) := f(x)\nf(1)"),
                     RuntimeError::RecursionLimitExceeded { limit: 1000, .. }));

    let mut evaluator = Evaluator::with_max_call_depth(3);
    assert_eq!(evaluate_source_with("f(x) := g(x)\ng(x) := f(x)\nf(0)", &mut evaluator),
               Err(Error::Runtime(RuntimeError::RecursionLimitExceeded { name:  "g".into(),
                                                                         limit: 3,
                                                                         line:  1, })));
}

#[test]
fn deep_but_bounded_nesting() {
    let nested = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    assert_value(&nested, 1.0);

    let negations = format!("{}1", "-".repeat(2001));
    assert_value(&negations, -1.0);
}

#[test]
fn very_long_programs_are_freed() {
    let terms = 300_000;

    assert_value(&format!("1{}", "+1".repeat(terms)), 300_001.0);
    assert_value(&format!("{}1", "-".repeat(terms)), 1.0);
    assert_value(&format!("f(x) := x{}\nf(0)", "+1".repeat(terms)), 300_000.0);
    assert!(matches!(parse_error(&format!("{}1 2", "-".repeat(terms))),
                     ParseError::UnexpectedToken { .. }));

    let program = parse_program(&format!("2{}", "*2".repeat(terms))).unwrap();
    let copy = program.clone();
    assert_eq!(copy.expression.to_string().matches('*').count(), terms);
    drop(program);
    assert!(Evaluator::new().run_program(&copy).unwrap().is_infinite());
}

#[test]
fn evaluation_is_repeatable_across_environments() {
    let program = parse_program("k := 2\nsq(x) := x ** k\nsq(3) + k").unwrap();
    let mut evaluator = Evaluator::new();

    let mut first = Environment::new();
    let mut second = Environment::new();
    let a = evaluator.run_in(&mut first, &program.statements, &program.expression);
    let b = evaluator.run_in(&mut second, &program.statements, &program.expression);

    assert_eq!(a, Ok(11.0));
    assert_eq!(a, b);
    assert_eq!(first.variables, second.variables);
}

#[test]
fn evaluate_reads_but_never_writes() {
    let mut variables = HashMap::new();
    variables.insert("x".to_string(), 4.0);
    let env = Environment::new();
    let expr = Expr::InfixOperation { op:    InfixOperator::Mul,
                                      left:  Box::new(Expr::Variable { name: "x".into(),
                                                                       line: 1, }),
                                      right: Box::new(Expr::Number { value: 2.0,
                                                                     line:  1, }),
                                      line:  1, };

    let mut evaluator = Evaluator::new();
    assert_eq!(evaluator.evaluate(&expr, &variables, &env.functions), Ok(8.0));
    assert_eq!(evaluator.evaluate(&expr, &variables, &env.functions), Ok(8.0));
    assert_eq!(variables.len(), 1);
    assert!(env.functions.borrow().is_empty());
}

#[test]
fn separators_and_layout() {
    assert_value("a := 1; b := 2; a + b", 3.0);
    assert_value("a := 1 b := 2 a + b", 3.0);
    assert_value("\n\n a := 1\n\n a\n\n", 1.0);
    assert_value("f(a,\n  b) := a - b\nf(\n  5,\n  3\n)", 2.0);
    assert_value("1 +\n2", 3.0);
    assert_value("// leading comment\nx := 2 // trailing\nx", 2.0);
}

#[test]
fn syntax_errors() {
    assert!(matches!(parse_error("x := 1"), ParseError::MissingExpression { .. }));
    assert!(matches!(parse_error(""), ParseError::MissingExpression { .. }));
    assert!(matches!(parse_error("(1 + 2"), ParseError::ExpectedClosingParen { .. }));
    assert!(matches!(parse_error("1 2"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("1 $ 2"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("f(1) := 2\nf(1)"),
                     ParseError::InvalidFunctionDefinition { .. }));
}

#[test]
fn errors_render_with_their_line() {
    let message = evaluate_source("a := 1\nb := 2\nc").unwrap_err().to_string();
    assert!(message.contains("line 3"), "{message}");
    assert_eq!(runtime_error("a := 1\nb := 2\nc").line_number(), 3);
}

#[test]
fn end_of_input_is_reported_on_the_last_line() {
    assert_eq!(parse_error("a := 1\nb := 2 +"),
               ParseError::UnexpectedEndOfInput { line: 2 });
    assert_eq!(parse_error("x := 1\n\ny := -"),
               ParseError::UnexpectedEndOfInput { line: 3 });

    let message = evaluate_source("a := 1\nb := 2 +").unwrap_err().to_string();
    assert!(message.starts_with("Error on line 2:"), "{message}");
}
