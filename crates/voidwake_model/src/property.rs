//! The shared property tables.
//!
//! Every object property either front end can read is declared here once,
//! partitioned strictly by result type. The grammar uses the tables to
//! type-check `Source.X` references; the script bridge consumes the same
//! data when it builds its attribute tables at start-up. New properties are
//! additions to these lists, not new code.

/// Integer-valued identity, container, and turn-counter properties.
pub const INT_PROPERTIES: &[&str] = &[
    "Owner",
    "OwnerBeforeLastConquered",
    "SupplyingEmpire",
    "ID",
    "CreationTurn",
    "Age",
    "ProducedByEmpireID",
    "ArrivedOnTurn",
    "DesignID",
    "FleetID",
    "PlanetID",
    "SystemID",
    "ContainerID",
    "FinalDestinationID",
    "NextSystemID",
    "NearestSystemID",
    "PreviousSystemID",
    "NumShips",
    "NumStarlanes",
    "LastTurnActiveInBattle",
    "LastTurnAttackedByShip",
    "LastTurnBattleHere",
    "LastTurnColonized",
    "LastTurnConquered",
    "LastTurnResupplied",
    "Orbit",
    "TurnsSinceColonization",
    "TurnsSinceFocusChange",
    "TurnsSinceLastConquered",
    "ETA",
    "LaunchedFrom",
    "LastInvadedByEmpire",
    "LastColonizedByEmpire",
];

/// Double-valued meter and position properties.
pub const DOUBLE_PROPERTIES: &[&str] = &[
    "Industry",
    "TargetIndustry",
    "Research",
    "TargetResearch",
    "Influence",
    "TargetInfluence",
    "Construction",
    "TargetConstruction",
    "Population",
    "TargetPopulation",
    "Happiness",
    "TargetHappiness",
    "MaxFuel",
    "Fuel",
    "MaxShield",
    "Shield",
    "MaxDefense",
    "Defense",
    "MaxTroops",
    "Troops",
    "RebelTroops",
    "MaxStructure",
    "Structure",
    "MaxSupply",
    "Supply",
    "MaxStockpile",
    "Stockpile",
    "Stealth",
    "Detection",
    "Speed",
    "X",
    "Y",
    "SizeAsDouble",
    "HabitableSize",
    "DistanceFromOriginalType",
    "PropagatedSupplyRange",
];

/// String-valued identity properties.
pub const STRING_PROPERTIES: &[&str] = &[
    "Name",
    "Species",
    "BuildingType",
    "FieldType",
    "Focus",
    "DefaultFocus",
    "Hull",
];

/// Planet-type-valued properties.
pub const PLANET_TYPE_PROPERTIES: &[&str] = &[
    "PlanetType",
    "OriginalType",
    "NextCloserToOriginalPlanetType",
    "NextBestPlanetType",
    "NextBetterPlanetType",
    "ClockwiseNextPlanetType",
    "CounterClockwiseNextPlanetType",
];

/// Planet-size-valued properties.
pub const PLANET_SIZE_PROPERTIES: &[&str] =
    &["PlanetSize", "NextLargerPlanetSize", "NextSmallerPlanetSize"];

/// Star-type-valued properties.
pub const STAR_TYPE_PROPERTIES: &[&str] = &["StarType", "NextOlderStarType", "NextYoungerStarType"];

/// Navigation properties: each yields the named contained or containing
/// object, on which further properties can be read.
pub const NAVIGATION_PROPERTIES: &[&str] = &["Planet", "System", "Fleet"];

/// The result-type group a property belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyGroup {
    /// Integer-valued property.
    Int,
    /// Double-valued property.
    Double,
    /// String-valued property.
    String,
    /// Planet-type-valued property.
    PlanetType,
    /// Planet-size-valued property.
    PlanetSize,
    /// Star-type-valued property.
    StarType,
    /// Navigation to another object.
    Navigation,
}

/// Looks up which group a property name belongs to.
///
/// A name is unique within its group; the groups are searched in a fixed
/// order so a name appearing in several groups (none do today) would resolve
/// deterministically.
#[must_use]
pub fn lookup_property(name: &str) -> Option<PropertyGroup> {
    let groups: [(&[&str], PropertyGroup); 7] = [
        (INT_PROPERTIES, PropertyGroup::Int),
        (DOUBLE_PROPERTIES, PropertyGroup::Double),
        (STRING_PROPERTIES, PropertyGroup::String),
        (PLANET_TYPE_PROPERTIES, PropertyGroup::PlanetType),
        (PLANET_SIZE_PROPERTIES, PropertyGroup::PlanetSize),
        (STAR_TYPE_PROPERTIES, PropertyGroup::StarType),
        (NAVIGATION_PROPERTIES, PropertyGroup::Navigation),
    ];

    groups
        .into_iter()
        .find(|(table, _)| table.contains(&name))
        .map(|(_, group)| group)
}
