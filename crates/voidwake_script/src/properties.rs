//! Attribute reads on game-object cursors.
//!
//! The property lists live in `voidwake_model::property` as plain name
//! tables; this module indexes them once into a lookup map at host start-up
//! and turns attribute reads into `Variable` nodes or longer navigation
//! cursors.

use std::collections::HashMap;

use voidwake_model::property::{
    DOUBLE_PROPERTIES, INT_PROPERTIES, NAVIGATION_PROPERTIES, PLANET_SIZE_PROPERTIES,
    PLANET_TYPE_PROPERTIES, STAR_TYPE_PROPERTIES, STRING_PROPERTIES,
};
use voidwake_model::{Error, PropertyGroup, Result, ValueRef};

use crate::value::{ObjectCursor, Value};

/// Indexed property-name table.
#[derive(Debug)]
pub struct PropertyTable {
    groups: HashMap<&'static str, PropertyGroup>,
}

impl PropertyTable {
    /// Builds the index from the model's property name lists.
    #[must_use]
    pub fn new() -> Self {
        let lists: [(&[&'static str], PropertyGroup); 7] = [
            (INT_PROPERTIES, PropertyGroup::Int),
            (DOUBLE_PROPERTIES, PropertyGroup::Double),
            (STRING_PROPERTIES, PropertyGroup::String),
            (PLANET_TYPE_PROPERTIES, PropertyGroup::PlanetType),
            (PLANET_SIZE_PROPERTIES, PropertyGroup::PlanetSize),
            (STAR_TYPE_PROPERTIES, PropertyGroup::StarType),
            (NAVIGATION_PROPERTIES, PropertyGroup::Navigation),
        ];
        let mut groups = HashMap::new();
        for (names, group) in lists {
            for name in names {
                groups.insert(*name, group);
            }
        }
        Self { groups }
    }

    /// Looks up a property's result-type group.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<PropertyGroup> {
        self.groups.get(name).copied()
    }

    /// Reads attribute `name` on a cursor: a navigation property extends the
    /// cursor, a typed property closes it into a `Variable` node.
    ///
    /// # Errors
    /// Returns [`voidwake_model::ErrorKind::UnknownProperty`] for names in no
    /// table.
    pub fn attribute(&self, cursor: &ObjectCursor, name: &str) -> Result<Value> {
        let Some(group) = self.group(name) else {
            return Err(Error::unknown_property(name));
        };
        let mut path = cursor.path.clone();
        path.push(name.to_string());
        let base = cursor.base;
        Ok(match group {
            PropertyGroup::Navigation => Value::Object(ObjectCursor { base, path }),
            PropertyGroup::Int => Value::Int(ValueRef::Variable { base, path }),
            PropertyGroup::Double => Value::Double(ValueRef::Variable { base, path }),
            PropertyGroup::String => Value::Str(ValueRef::Variable { base, path }),
            PropertyGroup::PlanetType => Value::PlanetType(ValueRef::Variable { base, path }),
            PropertyGroup::PlanetSize => Value::PlanetSize(ValueRef::Variable { base, path }),
            PropertyGroup::StarType => Value::StarType(ValueRef::Variable { base, path }),
        })
    }
}

impl Default for PropertyTable {
    fn default() -> Self {
        Self::new()
    }
}
