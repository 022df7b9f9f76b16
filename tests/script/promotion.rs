//! The operator promotion table as scripts observe it.

use voidwake_model::{
    BinaryOp, Condition, DoubleCast, DoubleRef, ErrorKind, IntRef, Result, StringRef,
};
use voidwake_script::eval::Evaluator;
use voidwake_script::{ScriptHost, Value};

fn eval_one(source: &str) -> Result<Value> {
    let mut host = ScriptHost::new();
    let forms = voidwake_script::reader::read_forms(source)?;
    Evaluator::new(&mut host, "test.vcs").eval(&forms[0])
}

// =============================================================================
// Arithmetic promotion
// =============================================================================

#[test]
fn int_with_int_stays_int() {
    assert_eq!(
        eval_one("(+ 1 2)").unwrap(),
        Value::Int(IntRef::binary(
            BinaryOp::Add,
            IntRef::Constant(1),
            IntRef::Constant(2)
        ))
    );
}

#[test]
fn any_double_operand_promotes_and_widens_the_int_side() {
    let Value::Double(DoubleRef::BinaryOp { lhs, .. }) = eval_one("(* 2 1.5)").unwrap() else {
        panic!("expected double binary node");
    };
    assert!(matches!(*lhs, DoubleRef::Cast(DoubleCast::FromInt(_))));
}

#[test]
fn string_concatenation_needs_string_on_both_sides() {
    assert_eq!(
        eval_one("(+ \"PRE_\" Source.Name)").unwrap(),
        Value::Str(StringRef::binary(
            BinaryOp::Add,
            StringRef::Constant("PRE_".to_string()),
            StringRef::property(voidwake_model::ObjectBase::Source, "Name"),
        ))
    );

    let err = eval_one("(+ \"PRE_\" 3)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

// =============================================================================
// Comparisons
// =============================================================================

#[test]
fn numeric_comparison_builds_a_condition() {
    assert!(matches!(
        eval_one("(< Source.Owner 3)").unwrap(),
        Value::Cond(Condition::Comparison { .. })
    ));
}

#[test]
fn enum_equality_narrows_both_sides_through_the_cast_chain() {
    let Value::Cond(Condition::Comparison { lhs, rhs, .. }) =
        eval_one("(== Source.PlanetType Toxic)").unwrap()
    else {
        panic!("expected comparison");
    };
    assert!(matches!(*lhs, DoubleRef::Cast(DoubleCast::FromInt(_))));
    assert!(matches!(*rhs, DoubleRef::Cast(DoubleCast::FromInt(_))));
}

#[test]
fn cross_enum_equality_is_rejected_at_binding_time() {
    let err = eval_one("(== Source.PlanetType Blue)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn enum_ordering_is_rejected() {
    let err = eval_one("(< Source.PlanetType Toxic)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

// =============================================================================
// Boolean composition
// =============================================================================

#[test]
fn logical_operators_convert_numerics_to_value_tests_explicitly() {
    let Value::Cond(Condition::And(subs)) =
        eval_one("(& Source.Owner (> Target.Population 3.0))").unwrap()
    else {
        panic!("expected And");
    };
    assert!(matches!(subs[0], Condition::ValueTest(_)));
    assert!(matches!(subs[1], Condition::Comparison { .. }));
}

#[test]
fn strings_never_convert_to_conditions() {
    let err = eval_one("(& \"TEXT\" (> Target.Population 3.0))").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn negation_wraps_a_condition() {
    assert!(matches!(
        eval_one("(~ (== Source.Owner 1))").unwrap(),
        Value::Cond(Condition::Not(_))
    ));
}
