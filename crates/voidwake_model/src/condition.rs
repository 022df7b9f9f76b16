//! Object-set predicates.
//!
//! A [`Condition`] selects the objects a statistic aggregates over or an
//! effect group applies to. Logical composition (`And`, `Or`, `Not`) and
//! numeric comparisons are the forms the expression front ends build;
//! the leaf predicates are a representative slice of what the simulation
//! evaluates.

use crate::enums::{EmpireAffiliation, PlanetType};
use crate::value_ref::{DoubleRef, IntRef, ValueRef};

/// Comparison operators between two numeric expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompareOp {
    /// Returns the operator's token text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// A predicate over game objects.
#[derive(Clone, PartialEq, Debug)]
pub enum Condition {
    /// Matches every object.
    All,
    /// Matches objects owned per the given affiliation, optionally relative
    /// to a specific empire.
    OwnedBy {
        /// The ownership relationship required.
        affiliation: EmpireAffiliation,
        /// The reference empire, when the affiliation needs one.
        empire: Option<Box<IntRef>>,
    },
    /// Matches objects containing at least one object matching the inner
    /// condition.
    Contains(Box<Condition>),
    /// Matches planets of one of the listed types.
    Planet {
        /// Accepted planet types; empty means any planet.
        types: Vec<ValueRef<PlanetType>>,
    },
    /// Compares two numeric expressions.
    Comparison {
        /// Left operand.
        lhs: Box<DoubleRef>,
        /// The comparison operator.
        op: CompareOp,
        /// Right operand.
        rhs: Box<DoubleRef>,
    },
    /// A numeric expression used as a condition: matches when the value is
    /// non-zero. This conversion is always explicit; no front end relies on
    /// host-language truthiness.
    ValueTest(Box<DoubleRef>),
    /// All sub-conditions match.
    And(Vec<Condition>),
    /// At least one sub-condition matches.
    Or(Vec<Condition>),
    /// The sub-condition does not match.
    Not(Box<Condition>),
}

impl Condition {
    /// Creates a comparison condition.
    #[must_use]
    pub fn comparison(lhs: DoubleRef, op: CompareOp, rhs: DoubleRef) -> Self {
        Self::Comparison {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    /// Wraps a numeric expression as an explicit non-zero test.
    #[must_use]
    pub fn value_test(value: DoubleRef) -> Self {
        Self::ValueTest(Box::new(value))
    }

    /// Renders this condition back to canonical token-syntax text.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::OwnedBy {
                affiliation,
                empire,
            } => {
                let mut out = format!("OwnedBy affiliation = {affiliation}");
                if let Some(empire) = empire {
                    out.push_str(&format!(" empire = {}", empire.describe()));
                }
                out
            }
            Self::Contains(inner) => format!("Contains {}", inner.describe()),
            Self::Planet { types } => {
                if types.is_empty() {
                    "Planet".to_string()
                } else {
                    let list: Vec<String> = types.iter().map(ValueRef::describe).collect();
                    format!("Planet type = [{}]", list.join(" "))
                }
            }
            Self::Comparison { lhs, op, rhs } => {
                format!("({} {} {})", lhs.describe(), op.symbol(), rhs.describe())
            }
            Self::ValueTest(value) => format!("({} != 0.0)", value.describe()),
            Self::And(subs) => {
                let list: Vec<String> = subs.iter().map(Self::describe).collect();
                format!("And [{}]", list.join(" "))
            }
            Self::Or(subs) => {
                let list: Vec<String> = subs.iter().map(Self::describe).collect();
                format!("Or [{}]", list.join(" "))
            }
            Self::Not(inner) => format!("Not {}", inner.describe()),
        }
    }
}
