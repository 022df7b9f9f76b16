//! Runtime values of the script language.
//!
//! Every value is a thin wrapper over a model node (or a navigation cursor
//! that has not been resolved into one yet). Operators on wrappers build new
//! composite nodes; nothing is evaluated against game state here.

use voidwake_model::{
    Condition, DoubleCast, DoubleRef, Effect, EffectGroup, IntRef, ObjectBase, PlanetSize,
    PlanetType, StarType, StringRef, ValueRef,
};

use voidwake_model::{Error, Result};

/// A game-object cursor: an object base plus the navigation steps taken so
/// far. Attribute reads on it produce either a longer cursor or a `Variable`
/// node.
#[derive(Clone, PartialEq, Debug)]
pub struct ObjectCursor {
    /// The object the chain starts from.
    pub base: ObjectBase,
    /// Navigation segments already followed.
    pub path: Vec<String>,
}

impl ObjectCursor {
    /// Creates a cursor at an object base.
    #[must_use]
    pub fn new(base: ObjectBase) -> Self {
        Self {
            base,
            path: Vec::new(),
        }
    }
}

/// One script-level value.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    /// Int-typed expression node.
    Int(IntRef),
    /// Double-typed expression node.
    Double(DoubleRef),
    /// String-typed expression node.
    Str(StringRef),
    /// Planet-type-typed expression node.
    PlanetType(ValueRef<PlanetType>),
    /// Planet-size-typed expression node.
    PlanetSize(ValueRef<PlanetSize>),
    /// Star-type-typed expression node.
    StarType(ValueRef<StarType>),
    /// A condition node.
    Cond(Condition),
    /// A single effect.
    Eff(Effect),
    /// A scoped effect group.
    Group(EffectGroup),
    /// A game-object navigation cursor.
    Object(ObjectCursor),
    /// A list of values (effect lists, planet-type lists, ...).
    List(Vec<Value>),
    /// A builder function bound in a namespace; calling it constructs nodes.
    Builder(&'static str),
    /// The result of a definition form; carries nothing.
    Unit,
}

impl Value {
    /// Short type name for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::PlanetType(_) => "planet-type",
            Self::PlanetSize(_) => "planet-size",
            Self::StarType(_) => "star-type",
            Self::Cond(_) => "condition",
            Self::Eff(_) => "effect",
            Self::Group(_) => "effects-group",
            Self::Object(_) => "object",
            Self::List(_) => "list",
            Self::Builder(_) => "builder",
            Self::Unit => "unit",
        }
    }

    /// Extracts an int node.
    ///
    /// # Errors
    /// Returns a type mismatch unless the value is int-typed.
    pub fn into_int(self) -> Result<IntRef> {
        match self {
            Self::Int(node) => Ok(node),
            other => Err(Error::type_mismatch("int", other.kind())),
        }
    }

    /// Extracts a double node, widening an int through
    /// [`DoubleCast::FromInt`].
    ///
    /// # Errors
    /// Returns a type mismatch unless the value is numeric.
    pub fn into_double(self) -> Result<DoubleRef> {
        match self {
            Self::Double(node) => Ok(node),
            Self::Int(node) => Ok(DoubleRef::Cast(DoubleCast::FromInt(Box::new(node)))),
            other => Err(Error::type_mismatch("double", other.kind())),
        }
    }

    /// Extracts a string node.
    ///
    /// # Errors
    /// Returns a type mismatch unless the value is string-typed.
    pub fn into_string(self) -> Result<StringRef> {
        match self {
            Self::Str(node) => Ok(node),
            other => Err(Error::type_mismatch("string", other.kind())),
        }
    }

    /// Extracts a condition node. Numeric values do NOT convert here; the
    /// only numeric-to-condition path is the explicit one inside `&`/`|`/`~`.
    ///
    /// # Errors
    /// Returns a type mismatch unless the value is a condition.
    pub fn into_condition(self) -> Result<Condition> {
        match self {
            Self::Cond(node) => Ok(node),
            other => Err(Error::type_mismatch("condition", other.kind())),
        }
    }

    /// Extracts a single effect.
    ///
    /// # Errors
    /// Returns a type mismatch unless the value is an effect.
    pub fn into_effect(self) -> Result<Effect> {
        match self {
            Self::Eff(node) => Ok(node),
            other => Err(Error::type_mismatch("effect", other.kind())),
        }
    }

    /// Extracts an effect group.
    ///
    /// # Errors
    /// Returns a type mismatch unless the value is an effects group.
    pub fn into_group(self) -> Result<EffectGroup> {
        match self {
            Self::Group(node) => Ok(node),
            other => Err(Error::type_mismatch("effects-group", other.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_widens_to_double() {
        let widened = Value::Int(IntRef::Constant(3)).into_double().unwrap();
        assert_eq!(
            widened,
            DoubleRef::Cast(DoubleCast::FromInt(Box::new(IntRef::Constant(3))))
        );
    }

    #[test]
    fn double_does_not_narrow_to_int() {
        assert!(Value::Double(DoubleRef::Constant(2.5)).into_int().is_err());
    }

    #[test]
    fn numeric_is_not_a_condition() {
        let err = Value::Int(IntRef::Constant(1)).into_condition().unwrap_err();
        assert!(matches!(
            err.kind,
            voidwake_model::ErrorKind::TypeMismatch { .. }
        ));
    }
}
