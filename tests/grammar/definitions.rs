//! Top-level definition parsing from whole content files.

use voidwake_grammar::parse_definitions;
use voidwake_model::{
    Condition, ContentRegistry, Definition, Effect, EmpireAffiliation, MeterType,
};

const MIXED_FILE: &str = r#"
    // Shipbuilding content.
    BuildingType
        name = "BLD_SHIPYARD"
        description = "BLD_SHIPYARD_DESC"
        buildcost = 10.0 * Target.HabitableSize
        buildtime = 4
        location = And [
            Planet type = [Ocean Terran]
            OwnedBy affiliation = TheEmpire
        ]
        effectsgroups = [
            EffectsGroup
                scope = All
                activation = OwnedBy affiliation = TheEmpire
                effects = [
                    SetMeter meter = Industry value = Target.Industry + 2.0
                ]
        ]

    Policy
        name = "PLC_CENTRALIZATION"
        description = "PLC_CENTRALIZATION_DESC"
        adoptioncost = 5.0 + Statistic Count condition = OwnedBy affiliation = TheEmpire

    Species
        name = "SP_ABADDONI"
        description = "SP_ABADDONI_DESC"
        foci = ["FOCUS_INDUSTRY" "FOCUS_RESEARCH"]
"#;

#[test]
fn mixed_file_yields_every_definition_kind() {
    let definitions = parse_definitions(MIXED_FILE).unwrap();
    assert_eq!(definitions.len(), 3);

    let Definition::Building(building) = &definitions[0] else {
        panic!("expected building first");
    };
    assert_eq!(building.name, "BLD_SHIPYARD");
    assert!(matches!(building.location, Condition::And(_)));
    assert_eq!(building.effect_groups.len(), 1);
    let group = &building.effect_groups[0];
    assert_eq!(
        group.activation,
        Some(Condition::OwnedBy {
            affiliation: EmpireAffiliation::TheEmpire,
            empire: None,
        })
    );
    assert!(matches!(
        group.effects[0],
        Effect::SetMeter {
            meter: MeterType::Industry,
            ..
        }
    ));

    let Definition::Policy(policy) = &definitions[1] else {
        panic!("expected policy second");
    };
    assert_eq!(policy.name, "PLC_CENTRALIZATION");

    let Definition::Species(species) = &definitions[2] else {
        panic!("expected species third");
    };
    assert_eq!(species.foci, vec!["FOCUS_INDUSTRY", "FOCUS_RESEARCH"]);
}

#[test]
fn parsed_definitions_feed_straight_into_the_registry() {
    let mut registry = ContentRegistry::new();
    for definition in parse_definitions(MIXED_FILE).unwrap() {
        registry.insert(definition).unwrap();
    }
    assert!(registry.building("BLD_SHIPYARD").is_some());
    assert!(registry.policy("PLC_CENTRALIZATION").is_some());
    assert!(registry.species("SP_ABADDONI").is_some());
}

#[test]
fn error_in_one_definition_names_the_rule() {
    let err = parse_definitions("BuildingType name = 42").unwrap_err();
    let voidwake_model::ErrorKind::Parse { rule, .. } = err.kind else {
        panic!("expected parse error, got {err:?}");
    };
    assert_eq!(rule, "BuildingType");
}
