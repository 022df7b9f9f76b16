//! Content definitions and the registry both front ends deposit into.

use std::collections::HashMap;

use crate::condition::Condition;
use crate::effect::EffectGroup;
use crate::error::{Error, Result};
use crate::value_ref::{DoubleRef, IntRef};

/// A building type definition.
#[derive(Clone, PartialEq, Debug)]
pub struct Building {
    /// Unique content name, e.g. `BLD_SHIPYARD`.
    pub name: String,
    /// User-visible description key.
    pub description: String,
    /// Production cost.
    pub build_cost: DoubleRef,
    /// Turns to build.
    pub build_time: IntRef,
    /// Where this building may be produced.
    pub location: Condition,
    /// Effects the building applies once built.
    pub effect_groups: Vec<EffectGroup>,
}

/// An adoptable policy definition.
#[derive(Clone, PartialEq, Debug)]
pub struct Policy {
    /// Unique content name, e.g. `PLC_CENTRALIZATION`.
    pub name: String,
    /// User-visible description key.
    pub description: String,
    /// Influence cost to adopt.
    pub adoption_cost: DoubleRef,
    /// Names of policies that must be adopted first.
    pub prerequisites: Vec<String>,
    /// Effects while the policy is adopted.
    pub effect_groups: Vec<EffectGroup>,
}

/// A playable or native species definition.
#[derive(Clone, PartialEq, Debug)]
pub struct Species {
    /// Unique content name, e.g. `SP_HUMAN`.
    pub name: String,
    /// User-visible description key.
    pub description: String,
    /// Foci this species can select.
    pub foci: Vec<String>,
    /// Effects the species applies to populated planets.
    pub effect_groups: Vec<EffectGroup>,
}

/// One complete definition as produced by either front end.
#[derive(Clone, PartialEq, Debug)]
pub enum Definition {
    /// A `BuildingType` definition.
    Building(Building),
    /// A `Policy` definition.
    Policy(Policy),
    /// A `Species` definition.
    Species(Species),
}

impl Definition {
    /// The definition's content name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Building(building) => &building.name,
            Self::Policy(policy) => &policy.name,
            Self::Species(species) => &species.name,
        }
    }

    /// The definition's kind keyword, as the token grammar spells it.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Building(_) => "BuildingType",
            Self::Policy(_) => "Policy",
            Self::Species(_) => "Species",
        }
    }
}

/// The game-content registry.
///
/// Both front ends deposit fully-owned definitions here, keyed by content
/// name. Duplicate names are rejected: the second definition loses and the
/// caller decides whether that aborts the file.
#[derive(Debug, Default)]
pub struct ContentRegistry {
    buildings: HashMap<String, Building>,
    policies: HashMap<String, Policy>,
    species: HashMap<String, Species>,
}

impl ContentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a building definition.
    ///
    /// # Errors
    /// Returns [`crate::ErrorKind::DuplicateContent`] if the name is taken.
    pub fn insert_building(&mut self, building: Building) -> Result<()> {
        if self.buildings.contains_key(&building.name) {
            return Err(Error::duplicate_content(building.name));
        }
        self.buildings.insert(building.name.clone(), building);
        Ok(())
    }

    /// Registers a policy definition.
    ///
    /// # Errors
    /// Returns [`crate::ErrorKind::DuplicateContent`] if the name is taken.
    pub fn insert_policy(&mut self, policy: Policy) -> Result<()> {
        if self.policies.contains_key(&policy.name) {
            return Err(Error::duplicate_content(policy.name));
        }
        self.policies.insert(policy.name.clone(), policy);
        Ok(())
    }

    /// Registers a species definition.
    ///
    /// # Errors
    /// Returns [`crate::ErrorKind::DuplicateContent`] if the name is taken.
    pub fn insert_species(&mut self, species: Species) -> Result<()> {
        if self.species.contains_key(&species.name) {
            return Err(Error::duplicate_content(species.name));
        }
        self.species.insert(species.name.clone(), species);
        Ok(())
    }

    /// Registers a definition of any kind.
    ///
    /// # Errors
    /// Returns [`crate::ErrorKind::DuplicateContent`] if the name is taken
    /// within its kind.
    pub fn insert(&mut self, definition: Definition) -> Result<()> {
        match definition {
            Definition::Building(building) => self.insert_building(building),
            Definition::Policy(policy) => self.insert_policy(policy),
            Definition::Species(species) => self.insert_species(species),
        }
    }

    /// Looks up a building by name.
    #[must_use]
    pub fn building(&self, name: &str) -> Option<&Building> {
        self.buildings.get(name)
    }

    /// Looks up a policy by name.
    #[must_use]
    pub fn policy(&self, name: &str) -> Option<&Policy> {
        self.policies.get(name)
    }

    /// Looks up a species by name.
    #[must_use]
    pub fn species(&self, name: &str) -> Option<&Species> {
        self.species.get(name)
    }

    /// Number of registered buildings.
    #[must_use]
    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    /// Number of registered policies.
    #[must_use]
    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }

    /// Number of registered species.
    #[must_use]
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Total number of registered definitions.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.buildings.len() + self.policies.len() + self.species.len()
    }
}
