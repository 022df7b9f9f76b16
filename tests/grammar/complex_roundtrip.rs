//! Describe/reparse round trips over generated complex variables.
//!
//! Every tree a strategy can produce must render to token syntax that
//! parses back into the identical tree.

use proptest::prelude::*;
use voidwake_grammar::{parse_double_expr, parse_int_expr};
use voidwake_model::{
    ComplexVariable, DoubleRef, IntCast, IntRef, PartClass, PlanetType, StringRef, ValueRef,
};

const EMPIRE_NAME_TAGS: &[&str] = &[
    "BuildingTypesOwned",
    "BuildingTypesProduced",
    "BuildingTypesScrapped",
    "SpeciesColoniesOwned",
    "SpeciesPlanetsBombed",
    "SpeciesPlanetsDepoped",
    "SpeciesPlanetsInvaded",
    "SpeciesShipsDestroyed",
    "SpeciesShipsLost",
    "SpeciesShipsOwned",
    "SpeciesShipsProduced",
    "SpeciesShipsScrapped",
    "TurnTechResearched",
    "TurnPolicyAdopted",
    "TurnsSincePolicyAdopted",
    "CumulativeTurnsPolicyAdopted",
    "LatestTurnPolicyAdopted",
    "NumPoliciesAdopted",
];

const DESIGN_TAGS: &[&str] = &[
    "ShipDesignsDestroyed",
    "ShipDesignsLost",
    "ShipDesignsInProduction",
    "ShipDesignsOwned",
    "ShipDesignsProduced",
    "ShipDesignsScrapped",
];

fn content_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,11}"
}

fn opt_int_slot() -> impl Strategy<Value = Option<Box<IntRef>>> {
    proptest::option::of((0i64..500).prop_map(|v| Box::new(IntRef::Constant(v))))
}

fn opt_name_slot() -> impl Strategy<Value = Option<Box<StringRef>>> {
    proptest::option::of(content_name().prop_map(|n| Box::new(StringRef::Constant(n))))
}

fn planet_type() -> impl Strategy<Value = PlanetType> {
    proptest::sample::select(PlanetType::ALL)
}

fn empire_name_variable() -> impl Strategy<Value = ComplexVariable> {
    (
        proptest::sample::select(EMPIRE_NAME_TAGS),
        opt_int_slot(),
        opt_name_slot(),
    )
        .prop_map(|(tag, empire, name)| {
            let mut node = ComplexVariable::new(tag);
            node.empire = empire;
            node.name = name;
            node
        })
}

fn design_group_variable() -> impl Strategy<Value = ComplexVariable> {
    (
        proptest::sample::select(DESIGN_TAGS),
        opt_int_slot(),
        opt_name_slot(),
    )
        .prop_map(|(tag, empire, design)| {
            let mut node = ComplexVariable::new(tag);
            node.empire = empire;
            node.name = design;
            node
        })
}

fn two_slot_variable() -> impl Strategy<Value = ComplexVariable> {
    (opt_int_slot(), opt_int_slot()).prop_map(|(empire, id)| {
        let mut node = ComplexVariable::new("TurnSystemExplored");
        node.empire = empire;
        node.object = id;
        node
    })
}

fn empire_ships_destroyed_variable() -> impl Strategy<Value = ComplexVariable> {
    (opt_int_slot(), opt_int_slot()).prop_map(|(first, second)| {
        let mut node = ComplexVariable::new("EmpireShipsDestroyed");
        // Both clauses share the `empire` label, so a lone clause always
        // parses into the first slot; only generate trees text can express.
        match (first, second) {
            (None, Some(only)) => node.empire = Some(only),
            (empire, object) => {
                node.empire = empire;
                node.object = object;
            }
        }
        node
    })
}

fn object_pair_variable() -> impl Strategy<Value = ComplexVariable> {
    (0i64..500, 0i64..500).prop_map(|(a, b)| {
        let mut node = ComplexVariable::new("JumpsBetween");
        node.empire = Some(Box::new(IntRef::Constant(a)));
        node.object = Some(Box::new(IntRef::Constant(b)));
        node
    })
}

fn ship_parts_owned_variable() -> impl Strategy<Value = ComplexVariable> {
    (
        opt_int_slot(),
        opt_name_slot(),
        proptest::option::of(proptest::sample::select(PartClass::ALL)),
    )
        .prop_map(|(empire, name, class)| {
            let mut node = ComplexVariable::new("ShipPartsOwned");
            node.empire = empire;
            node.name = name;
            node.object = class.map(|c| Box::new(IntRef::Constant(c.as_int())));
            node
        })
}

fn name_object_variable() -> impl Strategy<Value = ComplexVariable> {
    (opt_name_slot(), opt_int_slot()).prop_map(|(name, object)| {
        let mut node = ComplexVariable::new("SpecialAddedOnTurn");
        node.name = name;
        node.empire = object;
        node
    })
}

fn planet_type_difference_variable() -> impl Strategy<Value = ComplexVariable> {
    (planet_type(), planet_type()).prop_map(|(from, to)| {
        let mut node = ComplexVariable::new("PlanetTypeDifference");
        node.empire = Some(Box::new(IntRef::Cast(IntCast::FromPlanetType(Box::new(
            ValueRef::Constant(from),
        )))));
        node.object = Some(Box::new(IntRef::Cast(IntCast::FromPlanetType(Box::new(
            ValueRef::Constant(to),
        )))));
        node
    })
}

fn int_complex_variable() -> impl Strategy<Value = ComplexVariable> {
    prop_oneof![
        empire_name_variable(),
        design_group_variable(),
        two_slot_variable(),
        empire_ships_destroyed_variable(),
        object_pair_variable(),
        ship_parts_owned_variable(),
        name_object_variable(),
        planet_type_difference_variable(),
        content_name().prop_map(|name| {
            let mut node = ComplexVariable::new("GameRule");
            node.name = Some(Box::new(StringRef::Constant(name)));
            node
        }),
    ]
}

proptest! {
    #[test]
    fn int_complex_describe_reparses(node in int_complex_variable()) {
        let expr = IntRef::Complex(Box::new(node));
        let reparsed = parse_int_expr(&expr.describe()).unwrap();
        prop_assert_eq!(reparsed, expr);
    }

    #[test]
    fn hull_fuel_describe_reparses_as_double(name in content_name()) {
        let mut node = ComplexVariable::new("HullFuel");
        node.name = Some(Box::new(StringRef::Constant(name)));
        let expr = DoubleRef::Complex(Box::new(node));
        let reparsed = parse_double_expr(&expr.describe()).unwrap();
        prop_assert_eq!(reparsed, expr);
    }
}

// =============================================================================
// Fixed-type guarantees
// =============================================================================

#[test]
fn planet_type_difference_is_always_int_typed() {
    let expr = parse_int_expr("PlanetTypeDifference from = Toxic to = Target.PlanetType").unwrap();
    let IntRef::Complex(node) = expr else {
        panic!("expected complex variable");
    };
    assert!(matches!(
        node.empire.as_deref(),
        Some(IntRef::Cast(IntCast::FromPlanetType(_)))
    ));
    assert!(matches!(
        node.object.as_deref(),
        Some(IntRef::Cast(IntCast::FromPlanetType(_)))
    ));

    // In double position it still parses as an int complex, widened.
    let expr =
        parse_double_expr("PlanetTypeDifference from = Toxic to = Ocean").unwrap();
    assert!(matches!(
        expr,
        DoubleRef::Cast(voidwake_model::DoubleCast::FromInt(_))
    ));
}

#[test]
fn jumps_between_accepts_arbitrary_int_operands() {
    // Plain property operands.
    parse_int_expr("JumpsBetween object = Source.SystemID object = Target.SystemID").unwrap();
    // A statistic operand in the same clause position.
    parse_int_expr(
        "JumpsBetween object = Statistic Count condition = All object = Target.SystemID",
    )
    .unwrap();
}

#[test]
fn direct_distance_between_is_double_typed() {
    let expr =
        parse_double_expr("DirectDistanceBetween object = 1 object = 2").unwrap();
    assert!(matches!(expr, DoubleRef::Complex(_)));
}

#[test]
fn ship_part_meter_round_trips_through_describe() {
    let source = "ShipPartMeter part = \"SR_WEAPON_1_1\" meter = Detection id = 42";
    let expr = parse_double_expr(source).unwrap();
    assert_eq!(parse_double_expr(&expr.describe()).unwrap(), expr);
}

#[test]
fn ship_parts_owned_class_lands_in_second_int_slot() {
    let expr = parse_int_expr("ShipPartsOwned empire = 1 class = Armour").unwrap();
    let IntRef::Complex(node) = &expr else {
        panic!("expected complex variable");
    };
    assert_eq!(
        node.object.as_deref(),
        Some(&IntRef::Constant(PartClass::Armour.as_int()))
    );
    assert_eq!(node.object2, None);
    assert_eq!(parse_int_expr(&expr.describe()).unwrap(), expr);
}

#[test]
fn empire_ships_destroyed_lone_clause_fills_first_slot() {
    let expr = parse_int_expr("EmpireShipsDestroyed empire = 5").unwrap();
    let IntRef::Complex(node) = &expr else {
        panic!("expected complex variable");
    };
    assert_eq!(node.empire.as_deref(), Some(&IntRef::Constant(5)));
    assert_eq!(node.object, None);
    assert_eq!(parse_int_expr(&expr.describe()).unwrap(), expr);

    // Both clauses present: first and second slots in clause order.
    let expr = parse_int_expr("EmpireShipsDestroyed empire = 5 empire = 9").unwrap();
    assert_eq!(parse_int_expr(&expr.describe()).unwrap(), expr);
}
