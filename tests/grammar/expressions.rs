//! Typed expression grammars.

use voidwake_grammar::{parse_condition, parse_double_expr, parse_int_expr, parse_string_expr};
use voidwake_model::{
    BinaryOp, CompareOp, Condition, DoubleCast, DoubleRef, ErrorKind, IntRef, ObjectBase,
    StringRef,
};

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = parse_int_expr("1 + 2 * 3").unwrap();
    let IntRef::BinaryOp { op, rhs, .. } = expr else {
        panic!("expected binary node");
    };
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(
        *rhs,
        IntRef::BinaryOp {
            op: BinaryOp::Multiply,
            ..
        }
    ));
}

#[test]
fn parentheses_override_precedence() {
    let expr = parse_int_expr("(1 + 2) * 3").unwrap();
    assert!(matches!(
        expr,
        IntRef::BinaryOp {
            op: BinaryOp::Multiply,
            ..
        }
    ));
}

#[test]
fn unary_minus_on_a_literal_folds_to_a_constant() {
    assert_eq!(parse_int_expr("-4").unwrap(), IntRef::Constant(-4));
    assert_eq!(parse_double_expr("-2.5").unwrap(), DoubleRef::Constant(-2.5));
}

#[test]
fn int_literal_in_double_position_widens() {
    assert_eq!(parse_double_expr("3").unwrap(), DoubleRef::Constant(3.0));
}

#[test]
fn int_property_in_double_position_gets_a_cast() {
    let expr = parse_double_expr("Source.Owner").unwrap();
    let DoubleRef::Cast(DoubleCast::FromInt(inner)) = expr else {
        panic!("expected widening cast, got {expr:?}");
    };
    assert_eq!(*inner, IntRef::property(ObjectBase::Source, "Owner"));
}

#[test]
fn string_concatenation() {
    let expr = parse_string_expr("\"PRE_\" + Source.Name").unwrap();
    assert!(matches!(
        expr,
        StringRef::BinaryOp {
            op: BinaryOp::Add,
            ..
        }
    ));
}

// =============================================================================
// Property paths
// =============================================================================

#[test]
fn navigation_segments_chain() {
    let expr = parse_double_expr("Source.Planet.Population").unwrap();
    assert_eq!(
        expr,
        DoubleRef::Variable {
            base: ObjectBase::Source,
            path: vec!["Planet".to_string(), "Population".to_string()],
        }
    );
}

#[test]
fn unknown_property_is_reported_by_name() {
    let err = parse_int_expr("Source.Wibble").unwrap_err();
    let ErrorKind::UnknownProperty(name) = err.kind else {
        panic!("expected unknown property, got {err:?}");
    };
    assert_eq!(name, "Wibble");
}

#[test]
fn wrongly_typed_property_is_rejected() {
    // Population is a double property; it cannot close an int path.
    assert!(parse_int_expr("Source.Population").is_err());
}

// =============================================================================
// Conditions
// =============================================================================

#[test]
fn comparison_condition() {
    let cond = parse_condition("(Target.Population >= 5.0)").unwrap();
    let Condition::Comparison { op, .. } = cond else {
        panic!("expected comparison");
    };
    assert_eq!(op, CompareOp::Ge);
}

#[test]
fn nested_boolean_conditions() {
    let cond = parse_condition(
        "And [ (Target.Population > 3.0) Not OwnedBy affiliation = AnyEmpire ]",
    )
    .unwrap();
    let Condition::And(subs) = cond else {
        panic!("expected And");
    };
    assert_eq!(subs.len(), 2);
    assert!(matches!(subs[1], Condition::Not(_)));
}

#[test]
fn parse_error_carries_rule_and_position() {
    let err = parse_int_expr("1 +").unwrap_err();
    let ErrorKind::Parse { line, column, .. } = err.kind else {
        panic!("expected parse error");
    };
    assert_eq!(line, 1);
    assert!(column >= 3);
}
