//! Engine-side consequences of content definitions.
//!
//! Effects are consumed by the simulation; the front ends only construct
//! them. The set here is the slice content definitions need: meter
//! manipulation, empire-level meters, sitrep generation, and destruction.

use crate::condition::Condition;
use crate::enums::MeterType;
use crate::value_ref::{DoubleRef, IntRef};

/// A single consequence applied to matched objects.
#[derive(Clone, PartialEq, Debug)]
pub enum Effect {
    /// Sets a meter on the target object.
    SetMeter {
        /// Which meter to set.
        meter: MeterType,
        /// The new value.
        value: Box<DoubleRef>,
    },
    /// Sets a named empire-level meter.
    SetEmpireMeter {
        /// The empire whose meter is set.
        empire: Box<IntRef>,
        /// The meter name (empire meters are open-ended, keyed by string).
        meter: String,
        /// The new value.
        value: Box<DoubleRef>,
    },
    /// Queues a situation-report message for the owner.
    GenerateSitrep {
        /// Message template name.
        message: String,
    },
    /// Destroys the target object.
    Destroy,
}

impl Effect {
    /// Renders this effect back to canonical token-syntax text.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::SetMeter { meter, value } => {
                format!("SetMeter meter = {meter} value = {}", value.describe())
            }
            Self::SetEmpireMeter {
                empire,
                meter,
                value,
            } => format!(
                "SetEmpireMeter empire = {} meter = \"{meter}\" value = {}",
                empire.describe(),
                value.describe()
            ),
            Self::GenerateSitrep { message } => format!("GenerateSitrep message = \"{message}\""),
            Self::Destroy => "Destroy".to_string(),
        }
    }
}

/// A scoped group of effects.
#[derive(Clone, PartialEq, Debug)]
pub struct EffectGroup {
    /// Objects the effects apply to.
    pub scope: Condition,
    /// Additional gate on the source object; `None` means always active.
    pub activation: Option<Condition>,
    /// The effects to apply.
    pub effects: Vec<Effect>,
}

impl EffectGroup {
    /// Creates an always-active effect group.
    #[must_use]
    pub fn new(scope: Condition, effects: Vec<Effect>) -> Self {
        Self {
            scope,
            activation: None,
            effects,
        }
    }

    /// Renders this group back to canonical token-syntax text.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = format!("EffectsGroup scope = {}", self.scope.describe());
        if let Some(activation) = &self.activation {
            out.push_str(&format!(" activation = {}", activation.describe()));
        }
        let effects: Vec<String> = self.effects.iter().map(Effect::describe).collect();
        out.push_str(&format!(" effects = [{}]", effects.join(" ")));
        out
    }
}
