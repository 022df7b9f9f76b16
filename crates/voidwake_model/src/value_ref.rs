//! Typed expression-tree nodes.
//!
//! A [`ValueRef`] is a value-producing node parameterized by its result type.
//! The node kinds form a closed sum: `Constant`, `Variable`, `Cast`,
//! `Complex`, `Statistic`, `BinaryOp`, and `UnaryOp`. A node's result type is
//! fixed at construction and never changes.
//!
//! Cross-type narrowing (enumeration to int, int to double) is only
//! representable where a grammar rule actually needs it: each result type
//! declares its admissible cast sources through [`RefType::Cast`], so a
//! `ValueRef<String>` simply has no cast variant to construct.

use std::fmt;

use crate::condition::Condition;
use crate::enums::{PartClass, PlanetSize, PlanetType, StarType, StatisticType, Visibility};

/// A result type an expression node can be parameterized by.
pub trait RefType: Clone + PartialEq + fmt::Debug + 'static {
    /// Admissible cast sources for this result type.
    type Cast: Clone + PartialEq + fmt::Debug;

    /// Type name used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Renders a constant of this type in token syntax.
    fn describe_constant(value: &Self) -> String;

    /// Renders a cast node in token syntax.
    ///
    /// Casts are invisible in source text: the narrowing is implied by the
    /// clause the operand appears in, so this renders the operand itself.
    fn describe_cast(cast: &Self::Cast) -> String;
}

/// Cast sources for a result type that admits none.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NoCast {}

/// Cast sources for integer-typed nodes.
#[derive(Clone, PartialEq, Debug)]
pub enum IntCast {
    /// Narrow a planet-type expression to its fixed integer ordering.
    FromPlanetType(Box<ValueRef<PlanetType>>),
    /// Narrow a planet-size expression to its fixed integer ordering.
    FromPlanetSize(Box<ValueRef<PlanetSize>>),
    /// Narrow a star-type expression to its fixed integer ordering.
    FromStarType(Box<ValueRef<StarType>>),
}

/// Cast sources for double-typed nodes.
#[derive(Clone, PartialEq, Debug)]
pub enum DoubleCast {
    /// Widen an integer expression to double.
    FromInt(Box<ValueRef<i64>>),
}

impl RefType for i64 {
    type Cast = IntCast;
    const TYPE_NAME: &'static str = "int";

    fn describe_constant(value: &Self) -> String {
        value.to_string()
    }

    fn describe_cast(cast: &Self::Cast) -> String {
        match cast {
            IntCast::FromPlanetType(inner) => inner.describe(),
            IntCast::FromPlanetSize(inner) => inner.describe(),
            IntCast::FromStarType(inner) => inner.describe(),
        }
    }
}

impl RefType for f64 {
    type Cast = DoubleCast;
    const TYPE_NAME: &'static str = "double";

    fn describe_constant(value: &Self) -> String {
        // Keep the decimal point so the text re-lexes as a float.
        format!("{value:?}")
    }

    fn describe_cast(cast: &Self::Cast) -> String {
        match cast {
            DoubleCast::FromInt(inner) => inner.describe(),
        }
    }
}

impl RefType for String {
    type Cast = NoCast;
    const TYPE_NAME: &'static str = "string";

    fn describe_constant(value: &Self) -> String {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }

    fn describe_cast(cast: &Self::Cast) -> String {
        match *cast {}
    }
}

/// Implements [`RefType`] for an enumeration result type with no casts.
macro_rules! enum_ref_type {
    ($ty:ty, $name:literal) => {
        impl RefType for $ty {
            type Cast = NoCast;
            const TYPE_NAME: &'static str = $name;

            fn describe_constant(value: &Self) -> String {
                value.keyword().to_string()
            }

            fn describe_cast(cast: &Self::Cast) -> String {
                match *cast {}
            }
        }
    };
}

enum_ref_type!(PlanetType, "planet-type");
enum_ref_type!(PlanetSize, "planet-size");
enum_ref_type!(StarType, "star-type");
enum_ref_type!(Visibility, "visibility");

/// Integer-typed expression node.
pub type IntRef = ValueRef<i64>;
/// Double-typed expression node.
pub type DoubleRef = ValueRef<f64>;
/// String-typed expression node.
pub type StringRef = ValueRef<String>;

/// The game object a `Variable` node reads its property from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectBase {
    /// The object the effect or condition originates from.
    Source,
    /// The object currently being acted on.
    Target,
    /// The candidate object inside a condition evaluation.
    LocalCandidate,
    /// The candidate object of the outermost condition.
    RootCandidate,
}

impl ObjectBase {
    /// Parses an object-base keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "Source" => Some(Self::Source),
            "Target" => Some(Self::Target),
            "LocalCandidate" => Some(Self::LocalCandidate),
            "RootCandidate" => Some(Self::RootCandidate),
            _ => None,
        }
    }

    /// Returns the keyword for this object base.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Target => "Target",
            Self::LocalCandidate => "LocalCandidate",
            Self::RootCandidate => "RootCandidate",
        }
    }
}

/// Arithmetic operators on numeric nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+` (also string concatenation on string nodes).
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
}

impl BinaryOp {
    /// Returns the operator's token text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }
}

/// Unary operators on numeric nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Negate,
}

/// A polymorphic value-producing expression node.
#[derive(Clone, PartialEq, Debug)]
pub enum ValueRef<T: RefType> {
    /// A literal constant.
    Constant(T),
    /// A property lookup on a game object, possibly through a navigation
    /// chain (`Source.Planet.Population` has path `["Planet", "Population"]`).
    Variable {
        /// The object the lookup starts from.
        base: ObjectBase,
        /// Navigation steps followed by the property name.
        path: Vec<String>,
    },
    /// A narrowing or widening cast admissible for this result type.
    Cast(T::Cast),
    /// An N-ary named-parameter derived-state query.
    Complex(Box<ComplexVariable>),
    /// An aggregate over an object set.
    Statistic(Box<Statistic<T>>),
    /// A binary operation over two nodes of the same result type.
    BinaryOp {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<ValueRef<T>>,
        /// Right operand.
        rhs: Box<ValueRef<T>>,
    },
    /// A unary operation.
    UnaryOp {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<ValueRef<T>>,
    },
}

impl<T: RefType> ValueRef<T> {
    /// Creates a variable node reading a direct property of `base`.
    #[must_use]
    pub fn property(base: ObjectBase, name: impl Into<String>) -> Self {
        Self::Variable {
            base,
            path: vec![name.into()],
        }
    }

    /// Creates a binary-operation node.
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Self::BinaryOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Creates a negation node.
    #[must_use]
    pub fn negate(operand: Self) -> Self {
        Self::UnaryOp {
            op: UnaryOp::Negate,
            operand: Box::new(operand),
        }
    }

    /// Returns true if this node is a constant.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    /// Renders this node back to canonical token-syntax text.
    ///
    /// Parsing the result yields a semantically equivalent tree: the same
    /// operation with the same present/absent optional slots.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Constant(value) => T::describe_constant(value),
            Self::Variable { base, path } => {
                let mut out = base.keyword().to_string();
                for segment in path {
                    out.push('.');
                    out.push_str(segment);
                }
                out
            }
            Self::Cast(cast) => T::describe_cast(cast),
            Self::Complex(complex) => complex.describe(),
            Self::Statistic(stat) => stat.describe(),
            Self::BinaryOp { op, lhs, rhs } => {
                format!("({} {} {})", lhs.describe(), op.symbol(), rhs.describe())
            }
            Self::UnaryOp {
                op: UnaryOp::Negate,
                operand,
            } => format!("(-{})", operand.describe()),
        }
    }
}

/// An aggregate over the set of objects matching a condition.
#[derive(Clone, PartialEq, Debug)]
pub struct Statistic<T: RefType> {
    /// The aggregation to apply.
    pub stat: StatisticType,
    /// The property sampled per object; `None` for `Count`.
    pub value: Option<Box<ValueRef<T>>>,
    /// The object set to aggregate over.
    pub condition: Box<Condition>,
}

impl<T: RefType> Statistic<T> {
    /// Creates a counting statistic over a condition.
    #[must_use]
    pub fn count(condition: Condition) -> Self {
        Self {
            stat: StatisticType::Count,
            value: None,
            condition: Box::new(condition),
        }
    }

    /// Creates a sampling statistic over a condition.
    #[must_use]
    pub fn sample(stat: StatisticType, value: ValueRef<T>, condition: Condition) -> Self {
        Self {
            stat,
            value: Some(Box::new(value)),
            condition: Box::new(condition),
        }
    }

    /// Renders this statistic in token syntax.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = format!("Statistic {}", self.stat.keyword());
        if let Some(value) = &self.value {
            out.push_str(" value = ");
            out.push_str(&value.describe());
        }
        out.push_str(" condition = ");
        out.push_str(&self.condition.describe());
        out
    }
}

/// An N-ary named-parameter expression node.
///
/// Slot semantics are operation-specific but slot count and order are uniform
/// across every complex variable: three integer slots and two string slots.
/// This keeps construction uniform for the grammar and makes the script
/// bridge's dispatch a single code path.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ComplexVariable {
    /// Which named operation this node performs.
    pub tag: String,
    /// First integer slot (usually an empire id).
    pub empire: Option<Box<IntRef>>,
    /// Second integer slot (usually an object or design id).
    pub object: Option<Box<IntRef>>,
    /// Third integer slot.
    pub object2: Option<Box<IntRef>>,
    /// First string slot (usually a content name).
    pub name: Option<Box<StringRef>>,
    /// Second string slot.
    pub extra: Option<Box<StringRef>>,
}

impl ComplexVariable {
    /// Creates a complex variable with all slots empty.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Number of filled slots.
    #[must_use]
    pub fn filled_slots(&self) -> usize {
        usize::from(self.empire.is_some())
            + usize::from(self.object.is_some())
            + usize::from(self.object2.is_some())
            + usize::from(self.name.is_some())
            + usize::from(self.extra.is_some())
    }

    /// Renders this node with its operation-specific clause labels.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = self.tag.clone();

        let clause_int = |out: &mut String, label: &str, slot: &Option<Box<IntRef>>| {
            if let Some(node) = slot {
                out.push_str(&format!(" {label} = {}", node.describe()));
            }
        };
        let clause_str = |out: &mut String, label: &str, slot: &Option<Box<StringRef>>| {
            if let Some(node) = slot {
                out.push_str(&format!(" {label} = {}", node.describe()));
            }
        };

        match self.tag.as_str() {
            "GameRule" | "SlotsInHull" | "HullFuel" => {
                clause_str(&mut out, "name", &self.name);
            }
            "TurnSystemExplored" => {
                clause_int(&mut out, "empire", &self.empire);
                clause_int(&mut out, "id", &self.object);
            }
            "EmpireShipsDestroyed" => {
                clause_int(&mut out, "empire", &self.empire);
                clause_int(&mut out, "empire", &self.object);
            }
            "JumpsBetween" | "DirectDistanceBetween" => {
                clause_int(&mut out, "object", &self.empire);
                clause_int(&mut out, "object", &self.object);
            }
            "OutpostsOwned" => {
                clause_int(&mut out, "empire", &self.empire);
            }
            "PartsInShipDesign" => {
                clause_str(&mut out, "name", &self.name);
                clause_int(&mut out, "design", &self.empire);
            }
            "PartOfClassInShipDesign" => {
                // The class clause is a bare keyword captured as a string
                // constant; render it unquoted.
                if let Some(name) = &self.name {
                    if let StringRef::Constant(class) = name.as_ref() {
                        out.push_str(&format!(" class = {class}"));
                    }
                }
                clause_int(&mut out, "design", &self.empire);
            }
            "ShipPartsOwned" => {
                clause_int(&mut out, "empire", &self.empire);
                clause_str(&mut out, "name", &self.name);
                // The class clause was narrowed to an int constant.
                if let Some(object) = &self.object {
                    if let IntRef::Constant(value) = object.as_ref() {
                        if let Some(class) = PartClass::ALL.iter().find(|c| c.as_int() == *value) {
                            out.push_str(&format!(" class = {class}"));
                        }
                    }
                }
            }
            "ShipDesignsDestroyed" | "ShipDesignsLost" | "ShipDesignsInProduction"
            | "ShipDesignsOwned" | "ShipDesignsProduced" | "ShipDesignsScrapped" => {
                clause_int(&mut out, "empire", &self.empire);
                clause_str(&mut out, "design", &self.name);
            }
            "SlotsInShipDesign" => {
                clause_int(&mut out, "design", &self.empire);
            }
            "SpecialAddedOnTurn" | "SpecialCapacity" => {
                clause_str(&mut out, "name", &self.name);
                clause_int(&mut out, "object", &self.empire);
            }
            "PlanetTypeDifference" => {
                clause_int(&mut out, "from", &self.empire);
                clause_int(&mut out, "to", &self.object);
            }
            "ShipPartMeter" => {
                clause_str(&mut out, "part", &self.name);
                if let Some(extra) = &self.extra {
                    if let StringRef::Constant(meter) = extra.as_ref() {
                        out.push_str(&format!(" meter = {meter}"));
                    }
                }
                clause_int(&mut out, "id", &self.empire);
            }
            // Empire/name property group and anything the table does not
            // special-case: the uniform clause order.
            _ => {
                clause_int(&mut out, "empire", &self.empire);
                clause_int(&mut out, "id", &self.object2);
                clause_str(&mut out, "name", &self.name);
            }
        }

        out
    }
}
