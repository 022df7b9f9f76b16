//! Token-syntax rendering of expression trees.

use voidwake_model::{
    BinaryOp, ComplexVariable, Condition, DoubleCast, DoubleRef, IntCast, IntRef, ObjectBase,
    PlanetType, Statistic, StatisticType, StringRef, ValueRef,
};

// =============================================================================
// Scalar nodes
// =============================================================================

#[test]
fn double_constants_keep_the_decimal_point() {
    assert_eq!(DoubleRef::Constant(2.0).describe(), "2.0");
    assert_eq!(DoubleRef::Constant(-0.5).describe(), "-0.5");
}

#[test]
fn string_constants_are_quoted_and_escaped() {
    assert_eq!(
        StringRef::Constant("say \"hi\"".to_string()).describe(),
        r#""say \"hi\"""#
    );
}

#[test]
fn variables_render_as_dotted_paths() {
    let node = DoubleRef::Variable {
        base: ObjectBase::Target,
        path: vec!["Planet".to_string(), "Population".to_string()],
    };
    assert_eq!(node.describe(), "Target.Planet.Population");
}

#[test]
fn binary_nodes_parenthesize() {
    let node = IntRef::binary(
        BinaryOp::Add,
        IntRef::Constant(1),
        IntRef::binary(BinaryOp::Multiply, IntRef::Constant(2), IntRef::Constant(3)),
    );
    assert_eq!(node.describe(), "(1 + (2 * 3))");
}

#[test]
fn negation_renders_compactly() {
    assert_eq!(IntRef::negate(IntRef::Constant(4)).describe(), "(-4)");
}

// =============================================================================
// Casts
// =============================================================================

#[test]
fn casts_are_invisible_in_source_text() {
    let widened = DoubleRef::Cast(DoubleCast::FromInt(Box::new(IntRef::Constant(3))));
    assert_eq!(widened.describe(), "3");

    let narrowed = IntRef::Cast(IntCast::FromPlanetType(Box::new(ValueRef::Constant(
        PlanetType::Toxic,
    ))));
    assert_eq!(narrowed.describe(), "Toxic");
}

// =============================================================================
// Statistics and complex variables
// =============================================================================

#[test]
fn count_statistic_omits_the_value_clause() {
    let node = IntRef::Statistic(Box::new(Statistic::count(Condition::All)));
    assert_eq!(node.describe(), "Statistic Count condition = All");
}

#[test]
fn sampled_statistic_renders_value_then_condition() {
    let node = DoubleRef::Statistic(Box::new(Statistic::sample(
        StatisticType::Mean,
        DoubleRef::property(ObjectBase::LocalCandidate, "Population"),
        Condition::All,
    )));
    assert_eq!(
        node.describe(),
        "Statistic Mean value = LocalCandidate.Population condition = All"
    );
}

#[test]
fn complex_variable_renders_only_filled_clauses() {
    let mut node = ComplexVariable::new("TurnTechResearched");
    node.name = Some(Box::new(StringRef::Constant("TECH_ALGO".to_string())));
    assert_eq!(
        IntRef::Complex(Box::new(node)).describe(),
        "TurnTechResearched name = \"TECH_ALGO\""
    );
}

#[test]
fn object_pair_tags_repeat_the_object_label() {
    let mut node = ComplexVariable::new("JumpsBetween");
    node.empire = Some(Box::new(IntRef::property(ObjectBase::Source, "SystemID")));
    node.object = Some(Box::new(IntRef::property(ObjectBase::Target, "SystemID")));
    assert_eq!(
        IntRef::Complex(Box::new(node)).describe(),
        "JumpsBetween object = Source.SystemID object = Target.SystemID"
    );
}
