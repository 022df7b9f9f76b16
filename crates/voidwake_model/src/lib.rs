//! Target type system for Voidwake content.
//!
//! This crate provides:
//! - [`ValueRef`] - Typed expression-tree nodes produced by both front ends
//! - [`Condition`] - Object-set predicates used by statistics and effect scopes
//! - [`Effect`] / [`EffectGroup`] - Engine-side consequences of content definitions
//! - Game enumerations shared with the simulation ([`PlanetType`], [`PartClass`], ...)
//! - [`ContentRegistry`] - The keyed store both front ends deposit definitions into
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod condition;
pub mod content;
pub mod effect;
pub mod enums;
pub mod error;
pub mod property;
pub mod value_ref;

pub use condition::{CompareOp, Condition};
pub use content::{Building, ContentRegistry, Definition, Policy, Species};
pub use effect::{Effect, EffectGroup};
pub use enums::{
    EmpireAffiliation, MeterType, PartClass, PlanetSize, PlanetType, StarType, StatisticType,
    Visibility,
};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use property::{PropertyGroup, lookup_property};
pub use value_ref::{
    BinaryOp, ComplexVariable, DoubleCast, DoubleRef, IntCast, IntRef, NoCast, ObjectBase,
    RefType, Statistic, StringRef, UnaryOp, ValueRef,
};
