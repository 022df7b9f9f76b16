//! Game enumerations shared with the simulation collaborator.
//!
//! These are the enumeration kinds that expression trees may be typed over or
//! reference as constants. The integer ordering of each enumeration is part of
//! the content contract: narrowing casts (`PlanetTypeDifference` and friends)
//! compare these values, so the discriminants are fixed explicitly.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generates a content enumeration with a fixed integer ordering and a
/// keyword table used by both front ends.
macro_rules! content_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal => $keyword:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[repr(i64)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[doc = concat!("The `", $keyword, "` keyword.")]
                $variant = $value
            ),+
        }

        impl $name {
            /// All variants in discriminant order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the fixed integer value of this variant.
            #[must_use]
            pub const fn as_int(self) -> i64 {
                self as i64
            }

            /// Parses a content-script keyword into a variant.
            #[must_use]
            pub fn from_keyword(keyword: &str) -> Option<Self> {
                match keyword {
                    $($keyword => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Returns the content-script keyword for this variant.
            #[must_use]
            pub const fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => $keyword),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.keyword())
            }
        }
    };
}

content_enum! {
    /// Planet surface classification.
    PlanetType {
        Swamp = 0 => "Swamp",
        Toxic = 1 => "Toxic",
        Inferno = 2 => "Inferno",
        Radiated = 3 => "Radiated",
        Barren = 4 => "Barren",
        Tundra = 5 => "Tundra",
        Desert = 6 => "Desert",
        Terran = 7 => "Terran",
        Ocean = 8 => "Ocean",
        Asteroids = 9 => "Asteroids",
        GasGiant = 10 => "GasGiant",
    }
}

content_enum! {
    /// Planet size classification.
    PlanetSize {
        Tiny = 0 => "Tiny",
        Small = 1 => "Small",
        Medium = 2 => "Medium",
        Large = 3 => "Large",
        Huge = 4 => "Huge",
    }
}

content_enum! {
    /// Star color/age classification.
    StarType {
        Blue = 0 => "Blue",
        White = 1 => "White",
        Yellow = 2 => "Yellow",
        Orange = 3 => "Orange",
        Red = 4 => "Red",
        Neutron = 5 => "Neutron",
        BlackHole = 6 => "BlackHole",
        NoStar = 7 => "NoStar",
    }
}

content_enum! {
    /// How much of an object an empire can see.
    Visibility {
        Invisible = 0 => "Invisible",
        Basic = 1 => "Basic",
        Partial = 2 => "Partial",
        Full = 3 => "Full",
    }
}

content_enum! {
    /// Functional class of a ship part.
    ///
    /// `PartOfClassInShipDesign` accepts exactly these keywords in its
    /// `class` clause.
    PartClass {
        ShortRange = 0 => "ShortRange",
        FighterBay = 1 => "FighterBay",
        FighterWeapon = 2 => "FighterWeapon",
        Shield = 3 => "Shield",
        Armour = 4 => "Armour",
        Troops = 5 => "Troops",
        Detection = 6 => "Detection",
        Stealth = 7 => "Stealth",
        Fuel = 8 => "Fuel",
        Colony = 9 => "Colony",
        Speed = 10 => "Speed",
        General = 11 => "General",
        Bombard = 12 => "Bombard",
        Research = 13 => "Research",
        Industry = 14 => "Industry",
        Influence = 15 => "Influence",
        ProductionLocation = 16 => "ProductionLocation",
    }
}

content_enum! {
    /// Relationship between an object's owner and a reference empire.
    EmpireAffiliation {
        TheEmpire = 0 => "TheEmpire",
        EnemyOf = 1 => "EnemyOf",
        AllyOf = 2 => "AllyOf",
        AnyEmpire = 3 => "AnyEmpire",
        None = 4 => "Unowned",
        Human = 5 => "Human",
    }
}

content_enum! {
    /// Meters an effect can set and a double expression can read.
    MeterType {
        Industry = 0 => "Industry",
        TargetIndustry = 1 => "TargetIndustry",
        Research = 2 => "Research",
        TargetResearch = 3 => "TargetResearch",
        Influence = 4 => "Influence",
        TargetInfluence = 5 => "TargetInfluence",
        Construction = 6 => "Construction",
        TargetConstruction = 7 => "TargetConstruction",
        Population = 8 => "Population",
        TargetPopulation = 9 => "TargetPopulation",
        Happiness = 10 => "Happiness",
        TargetHappiness = 11 => "TargetHappiness",
        Supply = 12 => "Supply",
        MaxSupply = 13 => "MaxSupply",
        Stealth = 14 => "Stealth",
        Detection = 15 => "Detection",
    }
}

content_enum! {
    /// Aggregation applied by a `Statistic` node over an object set.
    StatisticType {
        Count = 0 => "Count",
        Sum = 1 => "Sum",
        Mean = 2 => "Mean",
        Max = 3 => "Max",
        Min = 4 => "Min",
        Mode = 5 => "Mode",
    }
}
