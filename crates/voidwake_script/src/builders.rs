//! Builder globals available to every script namespace.
//!
//! Builders are plain tables of name/function pairs grouped the way scripts
//! think about them: definitions, effects, conditions, and value-refs, plus
//! two groups of plain value bindings (sources and enum constants). Module
//! execution seeds all of them into the module's namespace before the first
//! form runs, so scripts never import them.

use voidwake_model::{
    Building, ComplexVariable, Condition, Definition, DoubleRef, Effect, EffectGroup,
    EmpireAffiliation, IntCast, IntRef, MeterType, ObjectBase, PartClass, PlanetSize, PlanetType,
    Policy, Result, Species, StarType, Statistic, StatisticType, StringRef, ValueRef,
};

use crate::eval::{CallArgs, Evaluator};
use crate::host::Environment;
use crate::reader::Form;
use crate::value::{ObjectCursor, Value};

/// A builder: `head` is the bound name, forwarded so one function can serve
/// a whole keyword group.
pub type BuilderFn = fn(&mut Evaluator<'_>, &'static str, &CallArgs) -> Result<Value>;

/// A named group of builder bindings.
pub struct BuilderGroup {
    /// Group name, for diagnostics and tests.
    pub name: &'static str,
    /// Bound name to builder function.
    pub entries: &'static [(&'static str, BuilderFn)],
}

/// Every builder-function group, in seeding order.
pub static BUILDER_GROUPS: &[BuilderGroup] = &[
    BuilderGroup {
        name: "definitions",
        entries: &[
            ("BuildingType", build_building),
            ("Policy", build_policy),
            ("Species", build_species),
        ],
    },
    BuilderGroup {
        name: "effects",
        entries: &[
            ("EffectsGroup", build_effects_group),
            ("SetMeter", build_set_meter),
            ("SetEmpireMeter", build_set_empire_meter),
            ("GenerateSitrep", build_generate_sitrep),
            ("Destroy", build_destroy),
        ],
    },
    BuilderGroup {
        name: "conditions",
        entries: &[
            ("OwnedBy", build_owned_by),
            ("Planet", build_planet),
            ("Contains", build_contains),
        ],
    },
    BuilderGroup {
        name: "value-refs",
        entries: &[
            ("Statistic", build_statistic),
            ("GameRule", build_required_name),
            ("SlotsInHull", build_required_name),
            ("HullFuel", build_required_name_double),
            ("BuildingTypesOwned", build_empire_name),
            ("BuildingTypesProduced", build_empire_name),
            ("BuildingTypesScrapped", build_empire_name),
            ("SpeciesColoniesOwned", build_empire_name),
            ("SpeciesPlanetsBombed", build_empire_name),
            ("SpeciesPlanetsDepoped", build_empire_name),
            ("SpeciesPlanetsInvaded", build_empire_name),
            ("SpeciesShipsDestroyed", build_empire_name),
            ("SpeciesShipsLost", build_empire_name),
            ("SpeciesShipsOwned", build_empire_name),
            ("SpeciesShipsProduced", build_empire_name),
            ("SpeciesShipsScrapped", build_empire_name),
            ("TurnTechResearched", build_empire_name),
            ("TurnPolicyAdopted", build_empire_name),
            ("TurnsSincePolicyAdopted", build_empire_name),
            ("CumulativeTurnsPolicyAdopted", build_empire_name),
            ("LatestTurnPolicyAdopted", build_empire_name),
            ("NumPoliciesAdopted", build_empire_name),
            ("TurnSystemExplored", build_turn_system_explored),
            ("EmpireShipsDestroyed", build_empire_ships_destroyed),
            ("JumpsBetween", build_object_pair),
            ("DirectDistanceBetween", build_object_pair_double),
            ("OutpostsOwned", build_outposts_owned),
            ("PartsInShipDesign", build_parts_in_ship_design),
            ("PartOfClassInShipDesign", build_part_of_class),
            ("ShipPartsOwned", build_ship_parts_owned),
            ("ShipDesignsDestroyed", build_design_group),
            ("ShipDesignsLost", build_design_group),
            ("ShipDesignsInProduction", build_design_group),
            ("ShipDesignsOwned", build_design_group),
            ("ShipDesignsProduced", build_design_group),
            ("ShipDesignsScrapped", build_design_group),
            ("SlotsInShipDesign", build_slots_in_ship_design),
            ("SpecialAddedOnTurn", build_special_added_on_turn),
            ("SpecialCapacity", build_special_capacity),
            ("PlanetTypeDifference", build_planet_type_difference),
            ("ShipPartMeter", build_ship_part_meter),
        ],
    },
];

/// Looks up a builder function by bound name.
#[must_use]
pub fn lookup(name: &str) -> Option<(&'static str, BuilderFn)> {
    BUILDER_GROUPS
        .iter()
        .flat_map(|group| group.entries)
        .find(|(entry, _)| *entry == name)
        .map(|(entry, builder)| (*entry, *builder))
}

/// Invokes the builder bound to `name`.
///
/// # Errors
/// Propagates builder argument errors.
pub fn call(evaluator: &mut Evaluator<'_>, name: &str, args: &CallArgs) -> Result<Value> {
    let Some((head, builder)) = lookup(name) else {
        return Err(evaluator.error(format!("no builder named {name}")));
    };
    builder(evaluator, head, args)
}

/// Seeds every builder group plus the value groups (source objects, enum
/// constants, the `All` condition) into an environment.
pub fn seed_globals(env: &mut Environment) {
    for group in BUILDER_GROUPS {
        for (name, _) in group.entries {
            env.bind(*name, Value::Builder(*name));
        }
    }

    // sources group
    for base in [
        ObjectBase::Source,
        ObjectBase::Target,
        ObjectBase::LocalCandidate,
        ObjectBase::RootCandidate,
    ] {
        env.bind(base.keyword(), Value::Object(ObjectCursor::new(base)));
    }

    // enums group
    for planet_type in PlanetType::ALL {
        env.bind(
            planet_type.keyword(),
            Value::PlanetType(ValueRef::Constant(*planet_type)),
        );
    }
    for planet_size in PlanetSize::ALL {
        env.bind(
            planet_size.keyword(),
            Value::PlanetSize(ValueRef::Constant(*planet_size)),
        );
    }
    for star_type in StarType::ALL {
        env.bind(
            star_type.keyword(),
            Value::StarType(ValueRef::Constant(*star_type)),
        );
    }

    env.bind("All", Value::Cond(Condition::All));
}

// ============================================================================
// Argument helpers
// ============================================================================

fn literal_string(ev: &mut Evaluator<'_>, head: &str, form: &Form) -> Result<String> {
    match ev.eval(form)? {
        Value::Str(StringRef::Constant(text)) => Ok(text),
        other => Err(ev.error(format!(
            "{head} needs a literal string, got {}",
            other.kind()
        ))),
    }
}

fn raw_symbol<'form>(ev: &Evaluator<'_>, head: &str, form: &'form Form) -> Result<&'form str> {
    match form {
        Form::Symbol(name) => Ok(name),
        other => Err(ev.error(format!("{head} needs a bare keyword, got {}", other.kind()))),
    }
}

fn opt_int_slot(
    ev: &mut Evaluator<'_>,
    args: &CallArgs,
    name: &str,
) -> Result<Option<Box<IntRef>>> {
    match args.keyword(name) {
        Some(form) => Ok(Some(Box::new(ev.eval(form)?.into_int()?))),
        None => Ok(None),
    }
}

fn opt_string_slot(
    ev: &mut Evaluator<'_>,
    args: &CallArgs,
    name: &str,
) -> Result<Option<Box<StringRef>>> {
    match args.keyword(name) {
        Some(form) => Ok(Some(Box::new(ev.eval(form)?.into_string()?))),
        None => Ok(None),
    }
}

fn req_int_slot(
    ev: &mut Evaluator<'_>,
    head: &str,
    args: &CallArgs,
    name: &str,
) -> Result<Box<IntRef>> {
    let form = args.require(head, name)?;
    Ok(Box::new(ev.eval(form)?.into_int()?))
}

fn req_string_slot(
    ev: &mut Evaluator<'_>,
    head: &str,
    args: &CallArgs,
    name: &str,
) -> Result<Box<StringRef>> {
    let form = args.require(head, name)?;
    Ok(Box::new(ev.eval(form)?.into_string()?))
}

fn req_double(ev: &mut Evaluator<'_>, head: &str, args: &CallArgs, name: &str) -> Result<DoubleRef> {
    let form = args.require(head, name)?;
    ev.eval(form)?.into_double()
}

fn req_condition(
    ev: &mut Evaluator<'_>,
    head: &str,
    args: &CallArgs,
    name: &str,
) -> Result<Condition> {
    let form = args.require(head, name)?;
    ev.eval(form)?.into_condition()
}

/// A sequence argument: a `(list ...)` value or a single value.
fn seq_values(ev: &mut Evaluator<'_>, form: &Form) -> Result<Vec<Value>> {
    match ev.eval(form)? {
        Value::List(values) => Ok(values),
        single => Ok(vec![single]),
    }
}

fn string_seq(ev: &mut Evaluator<'_>, head: &str, name: &str, form: &Form) -> Result<Vec<String>> {
    seq_values(ev, form)?
        .into_iter()
        .map(|value| match value {
            Value::Str(StringRef::Constant(text)) => Ok(text),
            other => Err(ev.error(format!(
                "{head}: :{name} entries must be literal strings, got {}",
                other.kind()
            ))),
        })
        .collect()
}

fn effect_groups_arg(ev: &mut Evaluator<'_>, args: &CallArgs) -> Result<Vec<EffectGroup>> {
    let Some(form) = args.keyword("effectsgroups") else {
        return Ok(Vec::new());
    };
    seq_values(ev, form)?
        .into_iter()
        .map(Value::into_group)
        .collect()
}

// ============================================================================
// Definition builders
// ============================================================================

fn build_building(ev: &mut Evaluator<'_>, head: &'static str, args: &CallArgs) -> Result<Value> {
    let name = literal_string(ev, head, args.require(head, "name")?)?;
    let description = literal_string(ev, head, args.require(head, "description")?)?;
    let build_cost = req_double(ev, head, args, "buildcost")?;
    let build_time = ev.eval(args.require(head, "buildtime")?)?.into_int()?;
    let location = req_condition(ev, head, args, "location")?;
    let effect_groups = effect_groups_arg(ev, args)?;

    ev.host().push_definition(Definition::Building(Building {
        name,
        description,
        build_cost,
        build_time,
        location,
        effect_groups,
    }));
    Ok(Value::Unit)
}

fn build_policy(ev: &mut Evaluator<'_>, head: &'static str, args: &CallArgs) -> Result<Value> {
    let name = literal_string(ev, head, args.require(head, "name")?)?;
    let description = literal_string(ev, head, args.require(head, "description")?)?;
    let adoption_cost = req_double(ev, head, args, "adoptioncost")?;
    let prerequisites = match args.keyword("prerequisites") {
        Some(form) => string_seq(ev, head, "prerequisites", form)?,
        None => Vec::new(),
    };
    let effect_groups = effect_groups_arg(ev, args)?;

    ev.host().push_definition(Definition::Policy(Policy {
        name,
        description,
        adoption_cost,
        prerequisites,
        effect_groups,
    }));
    Ok(Value::Unit)
}

fn build_species(ev: &mut Evaluator<'_>, head: &'static str, args: &CallArgs) -> Result<Value> {
    let name = literal_string(ev, head, args.require(head, "name")?)?;
    let description = literal_string(ev, head, args.require(head, "description")?)?;
    let foci = match args.keyword("foci") {
        Some(form) => string_seq(ev, head, "foci", form)?,
        None => Vec::new(),
    };
    let effect_groups = effect_groups_arg(ev, args)?;

    ev.host().push_definition(Definition::Species(Species {
        name,
        description,
        foci,
        effect_groups,
    }));
    Ok(Value::Unit)
}

// ============================================================================
// Effect builders
// ============================================================================

fn build_effects_group(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let scope = req_condition(ev, head, args, "scope")?;
    let activation = match args.keyword("activation") {
        Some(form) => Some(ev.eval(form)?.into_condition()?),
        None => None,
    };
    let effects = seq_values(ev, args.require(head, "effects")?)?
        .into_iter()
        .map(Value::into_effect)
        .collect::<Result<Vec<_>>>()?;

    Ok(Value::Group(EffectGroup {
        scope,
        activation,
        effects,
    }))
}

fn build_set_meter(ev: &mut Evaluator<'_>, head: &'static str, args: &CallArgs) -> Result<Value> {
    let word = raw_symbol(ev, head, args.require(head, "meter")?)?;
    let Some(meter) = MeterType::from_keyword(word) else {
        return Err(ev.error(format!("{head}: unknown meter {word}")));
    };
    let value = Box::new(req_double(ev, head, args, "value")?);
    Ok(Value::Eff(Effect::SetMeter { meter, value }))
}

fn build_set_empire_meter(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let empire = req_int_slot(ev, head, args, "empire")?;
    let meter = literal_string(ev, head, args.require(head, "meter")?)?;
    let value = Box::new(req_double(ev, head, args, "value")?);
    Ok(Value::Eff(Effect::SetEmpireMeter {
        empire,
        meter,
        value,
    }))
}

fn build_generate_sitrep(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let message = literal_string(ev, head, args.require(head, "message")?)?;
    Ok(Value::Eff(Effect::GenerateSitrep { message }))
}

fn build_destroy(_ev: &mut Evaluator<'_>, _head: &'static str, _args: &CallArgs) -> Result<Value> {
    Ok(Value::Eff(Effect::Destroy))
}

// ============================================================================
// Condition builders
// ============================================================================

fn build_owned_by(ev: &mut Evaluator<'_>, head: &'static str, args: &CallArgs) -> Result<Value> {
    let affiliation = match args.keyword("affiliation") {
        Some(form) => {
            let word = raw_symbol(ev, head, form)?;
            let Some(affiliation) = EmpireAffiliation::from_keyword(word) else {
                return Err(ev.error(format!("{head}: unknown affiliation {word}")));
            };
            affiliation
        }
        None => EmpireAffiliation::TheEmpire,
    };
    let empire = opt_int_slot(ev, args, "empire")?;
    Ok(Value::Cond(Condition::OwnedBy {
        affiliation,
        empire,
    }))
}

fn build_planet(ev: &mut Evaluator<'_>, head: &'static str, args: &CallArgs) -> Result<Value> {
    let types = match args.keyword("type") {
        Some(form) => seq_values(ev, form)?
            .into_iter()
            .map(|value| match value {
                Value::PlanetType(node) => Ok(node),
                other => Err(ev.error(format!(
                    "{head}: type entries must be planet types, got {}",
                    other.kind()
                ))),
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };
    Ok(Value::Cond(Condition::Planet { types }))
}

fn build_contains(ev: &mut Evaluator<'_>, head: &'static str, args: &CallArgs) -> Result<Value> {
    let [inner] = args.positional() else {
        return Err(ev.error(format!("{head} takes one condition")));
    };
    let inner = ev.eval(inner)?.into_condition()?;
    Ok(Value::Cond(Condition::Contains(Box::new(inner))))
}

// ============================================================================
// Statistic and complex-variable builders
// ============================================================================

fn build_statistic(ev: &mut Evaluator<'_>, head: &'static str, args: &CallArgs) -> Result<Value> {
    let [aggregate] = args.positional() else {
        return Err(ev.error(format!("{head} takes the aggregate as its argument")));
    };
    let word = raw_symbol(ev, head, aggregate)?;
    let Some(stat) = StatisticType::from_keyword(word) else {
        return Err(ev.error(format!("{head}: unknown aggregate {word}")));
    };
    let condition = req_condition(ev, head, args, "condition")?;

    if stat == StatisticType::Count {
        if args.keyword("value").is_some() {
            return Err(ev.error(format!("{head} Count takes no :value")));
        }
        return Ok(Value::Int(IntRef::Statistic(Box::new(Statistic::count(
            condition,
        )))));
    }

    match ev.eval(args.require(head, "value")?)? {
        Value::Int(value) => Ok(Value::Int(IntRef::Statistic(Box::new(Statistic::sample(
            stat, value, condition,
        ))))),
        Value::Double(value) => Ok(Value::Double(DoubleRef::Statistic(Box::new(
            Statistic::sample(stat, value, condition),
        )))),
        other => Err(ev.error(format!(
            "{head}: :value must be numeric, got {}",
            other.kind()
        ))),
    }
}

fn build_required_name(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.name = Some(req_string_slot(ev, head, args, "name")?);
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_required_name_double(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.name = Some(req_string_slot(ev, head, args, "name")?);
    Ok(Value::Double(DoubleRef::Complex(Box::new(node))))
}

fn build_empire_name(ev: &mut Evaluator<'_>, head: &'static str, args: &CallArgs) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.empire = opt_int_slot(ev, args, "empire")?;
    node.name = opt_string_slot(ev, args, "name")?;
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_turn_system_explored(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.empire = opt_int_slot(ev, args, "empire")?;
    node.object = opt_int_slot(ev, args, "id")?;
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_empire_ships_destroyed(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.empire = opt_int_slot(ev, args, "empire")?;
    node.object = opt_int_slot(ev, args, "empire2")?;
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

/// Two positional int operands; either may be any int expression, a
/// statistic included.
fn object_pair(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<ComplexVariable> {
    let [first, second] = args.positional() else {
        return Err(ev.error(format!("{head} takes two object operands")));
    };
    let first = ev.eval(first)?.into_int()?;
    let second = ev.eval(second)?.into_int()?;
    let mut node = ComplexVariable::new(head);
    node.empire = Some(Box::new(first));
    node.object = Some(Box::new(second));
    Ok(node)
}

fn build_object_pair(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    Ok(Value::Int(IntRef::Complex(Box::new(object_pair(
        ev, head, args,
    )?))))
}

fn build_object_pair_double(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    Ok(Value::Double(DoubleRef::Complex(Box::new(object_pair(
        ev, head, args,
    )?))))
}

fn build_outposts_owned(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.empire = opt_int_slot(ev, args, "empire")?;
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_parts_in_ship_design(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.name = opt_string_slot(ev, args, "name")?;
    node.empire = Some(req_int_slot(ev, head, args, "design")?);
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_part_of_class(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let word = raw_symbol(ev, head, args.require(head, "class")?)?;
    let Some(class) = PartClass::from_keyword(word) else {
        return Err(ev.error(format!("{head}: unknown part class {word}")));
    };
    let mut node = ComplexVariable::new(head);
    node.name = Some(Box::new(StringRef::Constant(class.keyword().to_string())));
    node.empire = Some(req_int_slot(ev, head, args, "design")?);
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_ship_parts_owned(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.empire = opt_int_slot(ev, args, "empire")?;
    node.name = opt_string_slot(ev, args, "name")?;
    if let Some(form) = args.keyword("class") {
        let word = raw_symbol(ev, head, form)?;
        let Some(class) = PartClass::from_keyword(word) else {
            return Err(ev.error(format!("{head}: unknown part class {word}")));
        };
        node.object = Some(Box::new(IntRef::Constant(class.as_int())));
    }
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_design_group(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.empire = opt_int_slot(ev, args, "empire")?;
    node.name = opt_string_slot(ev, args, "design")?;
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_slots_in_ship_design(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.empire = Some(req_int_slot(ev, head, args, "design")?);
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_special_added_on_turn(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.name = opt_string_slot(ev, args, "name")?;
    node.empire = opt_int_slot(ev, args, "object")?;
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn build_special_capacity(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.name = Some(req_string_slot(ev, head, args, "name")?);
    node.empire = opt_int_slot(ev, args, "object")?;
    Ok(Value::Double(DoubleRef::Complex(Box::new(node))))
}

fn build_planet_type_difference(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let from = planet_type_operand(ev, head, args, "from")?;
    let to = planet_type_operand(ev, head, args, "to")?;
    let mut node = ComplexVariable::new(head);
    node.empire = Some(Box::new(IntRef::Cast(IntCast::FromPlanetType(Box::new(
        from,
    )))));
    node.object = Some(Box::new(IntRef::Cast(IntCast::FromPlanetType(Box::new(
        to,
    )))));
    Ok(Value::Int(IntRef::Complex(Box::new(node))))
}

fn planet_type_operand(
    ev: &mut Evaluator<'_>,
    head: &str,
    args: &CallArgs,
    name: &str,
) -> Result<ValueRef<PlanetType>> {
    match ev.eval(args.require(head, name)?)? {
        Value::PlanetType(node) => Ok(node),
        other => Err(ev.error(format!(
            "{head}: :{name} must be a planet type, got {}",
            other.kind()
        ))),
    }
}

fn build_ship_part_meter(
    ev: &mut Evaluator<'_>,
    head: &'static str,
    args: &CallArgs,
) -> Result<Value> {
    let mut node = ComplexVariable::new(head);
    node.name = Some(req_string_slot(ev, head, args, "part")?);
    let word = raw_symbol(ev, head, args.require(head, "meter")?)?;
    let Some(meter) = MeterType::from_keyword(word) else {
        return Err(ev.error(format!("{head}: unknown meter {word}")));
    };
    node.extra = Some(Box::new(StringRef::Constant(meter.keyword().to_string())));
    node.empire = Some(req_int_slot(ev, head, args, "id")?);
    Ok(Value::Double(DoubleRef::Complex(Box::new(node))))
}
