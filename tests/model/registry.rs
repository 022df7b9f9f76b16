//! Registry behavior across definition kinds.

use voidwake_model::{
    Building, Condition, ContentRegistry, Definition, DoubleRef, ErrorKind, IntRef, Policy,
    Species,
};

fn building(name: &str) -> Building {
    Building {
        name: name.to_string(),
        description: format!("{name}_DESC"),
        build_cost: DoubleRef::Constant(10.0),
        build_time: IntRef::Constant(2),
        location: Condition::All,
        effect_groups: Vec::new(),
    }
}

#[test]
fn insert_dispatches_by_definition_kind() {
    let mut registry = ContentRegistry::new();
    registry
        .insert(Definition::Building(building("BLD_A")))
        .unwrap();
    registry
        .insert(Definition::Policy(Policy {
            name: "PLC_A".to_string(),
            description: "PLC_A_DESC".to_string(),
            adoption_cost: DoubleRef::Constant(5.0),
            prerequisites: Vec::new(),
            effect_groups: Vec::new(),
        }))
        .unwrap();
    registry
        .insert(Definition::Species(Species {
            name: "SP_A".to_string(),
            description: "SP_A_DESC".to_string(),
            foci: Vec::new(),
            effect_groups: Vec::new(),
        }))
        .unwrap();

    assert!(registry.building("BLD_A").is_some());
    assert!(registry.policy("PLC_A").is_some());
    assert!(registry.species("SP_A").is_some());
}

#[test]
fn duplicate_names_are_rejected_within_a_kind() {
    let mut registry = ContentRegistry::new();
    registry.insert_building(building("BLD_A")).unwrap();
    let err = registry.insert_building(building("BLD_A")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateContent(_)));
}

#[test]
fn kinds_do_not_share_a_namespace() {
    let mut registry = ContentRegistry::new();
    registry
        .insert(Definition::Building(building("SHARED")))
        .unwrap();
    registry
        .insert(Definition::Policy(Policy {
            name: "SHARED".to_string(),
            description: "D".to_string(),
            adoption_cost: DoubleRef::Constant(1.0),
            prerequisites: Vec::new(),
            effect_groups: Vec::new(),
        }))
        .unwrap();
    assert!(registry.building("SHARED").is_some());
    assert!(registry.policy("SHARED").is_some());
}

#[test]
fn definition_exposes_its_name() {
    assert_eq!(Definition::Building(building("BLD_A")).name(), "BLD_A");
}
