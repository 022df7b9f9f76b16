//! Complex-variable grammar.
//!
//! Each complex variable is a keyword followed by labelled clauses. The root
//! rules commit on the keyword: once a keyword matches, a malformed clause is
//! a parse error for the whole file, not a cue to try another alternative.
//! Keywords are mutually exclusive by construction, so the dispatch order
//! carries no semantics.
//!
//! Clause sub-expressions are constructed into the parser's node pools as
//! they are recognized and opened out of their envelopes when the rule
//! completes, keeping clause parsing and node assembly decoupled.

use voidwake_model::{
    ComplexVariable, DoubleRef, IntCast, IntRef, MeterType, PartClass, Result, StringRef,
};

use crate::envelope::Envelope;
use crate::parser::Parser;

/// Keywords taking optional `empire =` and `name =` clauses, all reporting
/// per-empire content statistics.
const EMPIRE_NAME_KEYWORDS: &[&str] = &[
    "BuildingTypesOwned",
    "BuildingTypesProduced",
    "BuildingTypesScrapped",
    "SpeciesColoniesOwned",
    "SpeciesPlanetsBombed",
    "SpeciesPlanetsDepoped",
    "SpeciesPlanetsInvaded",
    "SpeciesShipsDestroyed",
    "SpeciesShipsLost",
    "SpeciesShipsOwned",
    "SpeciesShipsProduced",
    "SpeciesShipsScrapped",
    "TurnTechResearched",
    "TurnPolicyAdopted",
    "TurnsSincePolicyAdopted",
    "CumulativeTurnsPolicyAdopted",
    "LatestTurnPolicyAdopted",
    "NumPoliciesAdopted",
];

/// Keywords taking optional `empire =` and `design =` clauses.
const DESIGN_KEYWORDS: &[&str] = &[
    "ShipDesignsDestroyed",
    "ShipDesignsLost",
    "ShipDesignsInProduction",
    "ShipDesignsOwned",
    "ShipDesignsProduced",
    "ShipDesignsScrapped",
];

/// Int-valued complex variables with bespoke clause shapes.
const INT_SPECIAL_KEYWORDS: &[&str] = &[
    "GameRule",
    "TurnSystemExplored",
    "EmpireShipsDestroyed",
    "JumpsBetween",
    "OutpostsOwned",
    "PartsInShipDesign",
    "PartOfClassInShipDesign",
    "ShipPartsOwned",
    "SlotsInHull",
    "SlotsInShipDesign",
    "SpecialAddedOnTurn",
    "PlanetTypeDifference",
];

/// Double-valued complex variables.
const DOUBLE_KEYWORDS: &[&str] = &[
    "GameRule",
    "HullFuel",
    "ShipPartMeter",
    "SpecialCapacity",
    "DirectDistanceBetween",
];

/// Returns true if `word` starts an int-valued complex variable.
#[must_use]
pub fn is_int_complex_keyword(word: &str) -> bool {
    INT_SPECIAL_KEYWORDS.contains(&word)
        || EMPIRE_NAME_KEYWORDS.contains(&word)
        || DESIGN_KEYWORDS.contains(&word)
}

/// Returns true if `word` starts a double-valued complex variable.
#[must_use]
pub fn is_double_complex_keyword(word: &str) -> bool {
    DOUBLE_KEYWORDS.contains(&word)
}

impl Parser<'_> {
    /// Parses an int-valued complex variable. The current token must be one
    /// of the int complex keywords.
    ///
    /// # Errors
    /// Returns a parse error if a clause is malformed.
    pub fn parse_int_complex(&mut self) -> Result<IntRef> {
        let Some(word) = self.keyword() else {
            return Err(self.error("complex-variable keyword"));
        };
        let tag = word.to_string();
        self.set_rule(&tag);
        self.advance();

        let node = match tag.as_str() {
            "GameRule" | "SlotsInHull" => self.parse_required_name(&tag)?,
            "TurnSystemExplored" => self.parse_turn_system_explored()?,
            "EmpireShipsDestroyed" => self.parse_empire_ships_destroyed()?,
            "JumpsBetween" => self.parse_object_pair(&tag)?,
            "OutpostsOwned" => self.parse_outposts_owned()?,
            "PartsInShipDesign" => self.parse_parts_in_ship_design()?,
            "PartOfClassInShipDesign" => self.parse_part_of_class_in_ship_design()?,
            "ShipPartsOwned" => self.parse_ship_parts_owned()?,
            "SlotsInShipDesign" => self.parse_slots_in_ship_design()?,
            "SpecialAddedOnTurn" => self.parse_name_object(&tag, false)?,
            "PlanetTypeDifference" => self.parse_planet_type_difference()?,
            _ if DESIGN_KEYWORDS.contains(&tag.as_str()) => self.parse_design_group(&tag)?,
            _ if EMPIRE_NAME_KEYWORDS.contains(&tag.as_str()) => {
                self.parse_empire_name_group(&tag)?
            }
            _ => return Err(self.error("int complex-variable keyword")),
        };
        Ok(IntRef::Complex(Box::new(node)))
    }

    /// Parses a double-valued complex variable. The current token must be
    /// one of the double complex keywords.
    ///
    /// # Errors
    /// Returns a parse error if a clause is malformed.
    pub fn parse_double_complex(&mut self) -> Result<DoubleRef> {
        let Some(word) = self.keyword() else {
            return Err(self.error("complex-variable keyword"));
        };
        let tag = word.to_string();
        self.set_rule(&tag);
        self.advance();

        let node = match tag.as_str() {
            "GameRule" | "HullFuel" => self.parse_required_name(&tag)?,
            "ShipPartMeter" => self.parse_ship_part_meter()?,
            "SpecialCapacity" => self.parse_name_object(&tag, true)?,
            "DirectDistanceBetween" => self.parse_object_pair(&tag)?,
            _ => return Err(self.error("double complex-variable keyword")),
        };
        Ok(DoubleRef::Complex(Box::new(node)))
    }

    // ========================================================================
    // Clause helpers
    // ========================================================================

    /// Parses an int clause expression into the pool.
    fn construct_int(&mut self) -> Result<Envelope> {
        let expr = self.parse_int_expr()?;
        Ok(self.int_pool.construct(expr))
    }

    /// Parses a string clause expression into the pool.
    fn construct_string(&mut self) -> Result<Envelope> {
        let expr = self.parse_string_expr()?;
        Ok(self.string_pool.construct(expr))
    }

    fn optional_int_clause(&mut self, label: &str) -> Result<Option<Envelope>> {
        if self.try_label(label)? {
            Ok(Some(self.construct_int()?))
        } else {
            Ok(None)
        }
    }

    fn optional_string_clause(&mut self, label: &str) -> Result<Option<Envelope>> {
        if self.try_label(label)? {
            Ok(Some(self.construct_string()?))
        } else {
            Ok(None)
        }
    }

    fn open_optional_int(
        &mut self,
        envelope: Option<Envelope>,
        pass: &mut bool,
    ) -> Option<Box<IntRef>> {
        envelope.and_then(|envelope| self.open_int(envelope, pass))
    }

    fn open_optional_string(
        &mut self,
        envelope: Option<Envelope>,
        pass: &mut bool,
    ) -> Option<Box<StringRef>> {
        envelope.and_then(|envelope| self.open_string(envelope, pass))
    }

    // ========================================================================
    // Rule bodies
    // ========================================================================

    /// `<tag> name = <string>`
    fn parse_required_name(&mut self, tag: &str) -> Result<ComplexVariable> {
        self.label("name")?;
        let name = self.construct_string()?;

        let mut pass = true;
        let mut node = ComplexVariable::new(tag);
        node.name = self.open_string(name, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `TurnSystemExplored [empire = <int>] [id = <int>]`
    fn parse_turn_system_explored(&mut self) -> Result<ComplexVariable> {
        let empire = self.optional_int_clause("empire")?;
        let id = self.optional_int_clause("id")?;

        let mut pass = true;
        let mut node = ComplexVariable::new("TurnSystemExplored");
        node.empire = self.open_optional_int(empire, &mut pass);
        node.object = self.open_optional_int(id, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `EmpireShipsDestroyed [empire = <int>] [empire = <int>]`
    fn parse_empire_ships_destroyed(&mut self) -> Result<ComplexVariable> {
        let first = self.optional_int_clause("empire")?;
        let second = self.optional_int_clause("empire")?;

        let mut pass = true;
        let mut node = ComplexVariable::new("EmpireShipsDestroyed");
        node.empire = self.open_optional_int(first, &mut pass);
        node.object = self.open_optional_int(second, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `<tag> object = <int> object = <int>`
    ///
    /// Either operand position accepts any int expression, a statistic
    /// included; the operand grammar itself disambiguates.
    fn parse_object_pair(&mut self, tag: &str) -> Result<ComplexVariable> {
        self.label("object")?;
        let first = self.construct_int()?;
        self.label("object")?;
        let second = self.construct_int()?;

        let mut pass = true;
        let mut node = ComplexVariable::new(tag);
        node.empire = self.open_int(first, &mut pass);
        node.object = self.open_int(second, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `OutpostsOwned [empire = <int>]`
    fn parse_outposts_owned(&mut self) -> Result<ComplexVariable> {
        let empire = self.optional_int_clause("empire")?;

        let mut pass = true;
        let mut node = ComplexVariable::new("OutpostsOwned");
        node.empire = self.open_optional_int(empire, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `PartsInShipDesign [name = <string>] design = <int>`
    fn parse_parts_in_ship_design(&mut self) -> Result<ComplexVariable> {
        let name = self.optional_string_clause("name")?;
        self.label("design")?;
        let design = self.construct_int()?;

        let mut pass = true;
        let mut node = ComplexVariable::new("PartsInShipDesign");
        node.name = self.open_optional_string(name, &mut pass);
        node.empire = self.open_int(design, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `PartOfClassInShipDesign class = <part-class> design = <int>`
    ///
    /// The class clause is a bare keyword; it lands in the name slot as a
    /// string constant.
    fn parse_part_of_class_in_ship_design(&mut self) -> Result<ComplexVariable> {
        self.label("class")?;
        let class = self.parse_part_class()?;
        self.label("design")?;
        let design = self.construct_int()?;

        let mut pass = true;
        let mut node = ComplexVariable::new("PartOfClassInShipDesign");
        node.name = Some(Box::new(StringRef::Constant(class.keyword().to_string())));
        node.empire = self.open_int(design, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `ShipPartsOwned [empire = <int>] [name = <string>] [class = <part-class>]`
    ///
    /// The class keyword narrows to its int discriminant in the second int
    /// slot rather than a string slot.
    fn parse_ship_parts_owned(&mut self) -> Result<ComplexVariable> {
        let empire = self.optional_int_clause("empire")?;
        let name = self.optional_string_clause("name")?;
        let class = if self.try_label("class")? {
            Some(self.parse_part_class()?)
        } else {
            None
        };

        let mut pass = true;
        let mut node = ComplexVariable::new("ShipPartsOwned");
        node.empire = self.open_optional_int(empire, &mut pass);
        node.name = self.open_optional_string(name, &mut pass);
        node.object = class.map(|class| Box::new(IntRef::Constant(class.as_int())));
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `ShipDesigns* [empire = <int>] [design = <string>]`
    fn parse_design_group(&mut self, tag: &str) -> Result<ComplexVariable> {
        let empire = self.optional_int_clause("empire")?;
        let design = self.optional_string_clause("design")?;

        let mut pass = true;
        let mut node = ComplexVariable::new(tag);
        node.empire = self.open_optional_int(empire, &mut pass);
        node.name = self.open_optional_string(design, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `SlotsInShipDesign design = <int>`
    fn parse_slots_in_ship_design(&mut self) -> Result<ComplexVariable> {
        self.label("design")?;
        let design = self.construct_int()?;

        let mut pass = true;
        let mut node = ComplexVariable::new("SlotsInShipDesign");
        node.empire = self.open_int(design, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `<tag> [name = <string>] [object = <int>]`; `required_name` makes the
    /// name clause mandatory.
    fn parse_name_object(&mut self, tag: &str, required_name: bool) -> Result<ComplexVariable> {
        let name = if required_name {
            self.label("name")?;
            Some(self.construct_string()?)
        } else {
            self.optional_string_clause("name")?
        };
        let object = self.optional_int_clause("object")?;

        let mut pass = true;
        let mut node = ComplexVariable::new(tag);
        node.name = self.open_optional_string(name, &mut pass);
        node.empire = self.open_optional_int(object, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `<tag> [empire = <int>] [name = <string>]`
    fn parse_empire_name_group(&mut self, tag: &str) -> Result<ComplexVariable> {
        let empire = self.optional_int_clause("empire")?;
        let name = self.optional_string_clause("name")?;

        let mut pass = true;
        let mut node = ComplexVariable::new(tag);
        node.empire = self.open_optional_int(empire, &mut pass);
        node.name = self.open_optional_string(name, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `PlanetTypeDifference from = <planet-type> to = <planet-type>`
    ///
    /// Both clauses are required. Each enum operand narrows through
    /// [`IntCast::FromPlanetType`], so the whole node is int-typed no matter
    /// what shape the operands take.
    fn parse_planet_type_difference(&mut self) -> Result<ComplexVariable> {
        self.label("from")?;
        let from = self.parse_planet_type_expr()?;
        let from = self.planet_type_pool.construct(from);
        self.label("to")?;
        let to = self.parse_planet_type_expr()?;
        let to = self.planet_type_pool.construct(to);

        let mut pass = true;
        let mut node = ComplexVariable::new("PlanetTypeDifference");
        node.empire = self
            .planet_type_pool
            .open(from, &mut pass)
            .map(|inner| Box::new(IntRef::Cast(IntCast::FromPlanetType(Box::new(inner)))));
        node.object = self
            .planet_type_pool
            .open(to, &mut pass)
            .map(|inner| Box::new(IntRef::Cast(IntCast::FromPlanetType(Box::new(inner)))));
        self.check_pass(pass)?;
        Ok(node)
    }

    /// `ShipPartMeter part = <string> meter = <meter> id = <int>`
    fn parse_ship_part_meter(&mut self) -> Result<ComplexVariable> {
        self.label("part")?;
        let part = self.construct_string()?;
        self.label("meter")?;
        let Some(word) = self.keyword() else {
            return Err(self.error("meter keyword"));
        };
        let Some(meter) = MeterType::from_keyword(word) else {
            return Err(self.error("meter keyword"));
        };
        self.advance();
        self.label("id")?;
        let id = self.construct_int()?;

        let mut pass = true;
        let mut node = ComplexVariable::new("ShipPartMeter");
        node.name = self.open_string(part, &mut pass);
        node.extra = Some(Box::new(StringRef::Constant(meter.keyword().to_string())));
        node.empire = self.open_int(id, &mut pass);
        self.check_pass(pass)?;
        Ok(node)
    }

    fn parse_part_class(&mut self) -> Result<PartClass> {
        let Some(word) = self.keyword() else {
            return Err(self.error("part-class keyword"));
        };
        let Some(class) = PartClass::from_keyword(word) else {
            return Err(self.error("part-class keyword"));
        };
        self.advance();
        Ok(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voidwake_model::{ErrorKind, ObjectBase, PlanetType, StatisticType, ValueRef};

    fn int_complex(source: &str) -> ComplexVariable {
        match crate::parse_int_expr(source).unwrap() {
            IntRef::Complex(node) => *node,
            other => panic!("expected complex variable, got {other:?}"),
        }
    }

    fn double_complex(source: &str) -> ComplexVariable {
        match crate::parse_double_expr(source).unwrap() {
            DoubleRef::Complex(node) => *node,
            other => panic!("expected complex variable, got {other:?}"),
        }
    }

    #[test]
    fn game_rule_requires_name() {
        let node = int_complex("GameRule name = \"RULE_HABITABLE_SIZE\"");
        assert_eq!(node.tag, "GameRule");
        assert_eq!(
            node.name,
            Some(Box::new(StringRef::Constant(
                "RULE_HABITABLE_SIZE".to_string()
            )))
        );

        let err = crate::parse_int_expr("GameRule").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Parse { ref rule, .. } if rule == "GameRule"));
    }

    #[test]
    fn empire_name_group_clauses_optional() {
        let node = int_complex("TurnTechResearched");
        assert_eq!(node.filled_slots(), 0);

        let node = int_complex("TurnTechResearched empire = 1 name = \"TECH_ALGO\"");
        assert_eq!(node.empire, Some(Box::new(IntRef::Constant(1))));
        assert_eq!(
            node.name,
            Some(Box::new(StringRef::Constant("TECH_ALGO".to_string())))
        );
    }

    #[test]
    fn empire_ships_destroyed_takes_two_empire_clauses() {
        let node = int_complex("EmpireShipsDestroyed empire = 1 empire = 2");
        assert_eq!(node.empire, Some(Box::new(IntRef::Constant(1))));
        assert_eq!(node.object, Some(Box::new(IntRef::Constant(2))));
    }

    #[test]
    fn jumps_between_plain_operands() {
        let node = int_complex("JumpsBetween object = Source.SystemID object = Target.SystemID");
        assert_eq!(
            node.empire,
            Some(Box::new(IntRef::property(ObjectBase::Source, "SystemID")))
        );
        assert_eq!(
            node.object,
            Some(Box::new(IntRef::property(ObjectBase::Target, "SystemID")))
        );
    }

    #[test]
    fn jumps_between_statistic_operand() {
        // A statistic in operand position needs no special marker.
        let node = int_complex(
            "JumpsBetween object = Statistic Count condition = All object = Source.SystemID",
        );
        let Some(first) = node.empire else {
            panic!("first operand missing");
        };
        let IntRef::Statistic(stat) = *first else {
            panic!("expected statistic operand");
        };
        assert_eq!(stat.stat, StatisticType::Count);
    }

    #[test]
    fn part_of_class_stores_keyword_as_string_constant() {
        let node = int_complex("PartOfClassInShipDesign class = Armour design = Source.DesignID");
        assert_eq!(
            node.name,
            Some(Box::new(StringRef::Constant("Armour".to_string())))
        );
        assert_eq!(
            node.empire,
            Some(Box::new(IntRef::property(ObjectBase::Source, "DesignID")))
        );
    }

    #[test]
    fn ship_parts_owned_narrows_class_to_int() {
        let node = int_complex("ShipPartsOwned empire = 1 class = Shield");
        assert_eq!(
            node.object,
            Some(Box::new(IntRef::Constant(PartClass::Shield.as_int())))
        );
        assert!(node.object2.is_none());
        assert!(node.name.is_none());
    }

    #[test]
    fn planet_type_difference_is_int_typed() {
        let node = int_complex("PlanetTypeDifference from = Toxic to = Target.PlanetType");
        let Some(from) = node.empire else {
            panic!("from clause missing");
        };
        assert_eq!(
            *from,
            IntRef::Cast(IntCast::FromPlanetType(Box::new(ValueRef::Constant(
                PlanetType::Toxic
            ))))
        );
        let Some(to) = node.object else {
            panic!("to clause missing");
        };
        assert!(matches!(*to, IntRef::Cast(IntCast::FromPlanetType(_))));
    }

    #[test]
    fn planet_type_difference_clauses_required() {
        assert!(crate::parse_int_expr("PlanetTypeDifference from = Toxic").is_err());
        assert!(crate::parse_int_expr("PlanetTypeDifference to = Toxic").is_err());
    }

    #[test]
    fn ship_part_meter_clauses() {
        let node =
            double_complex("ShipPartMeter part = \"SR_WEAPON_1_1\" meter = Detection id = 42");
        assert_eq!(
            node.name,
            Some(Box::new(StringRef::Constant("SR_WEAPON_1_1".to_string())))
        );
        assert_eq!(
            node.extra,
            Some(Box::new(StringRef::Constant("Detection".to_string())))
        );
        assert_eq!(node.empire, Some(Box::new(IntRef::Constant(42))));
    }

    #[test]
    fn direct_distance_between_is_double_typed() {
        let node = double_complex("DirectDistanceBetween object = 1 object = 2");
        assert_eq!(node.tag, "DirectDistanceBetween");
    }

    #[test]
    fn game_rule_parses_in_double_position_too() {
        let node = double_complex("GameRule name = \"RULE_SHIP_SPEED_FACTOR\"");
        assert_eq!(node.tag, "GameRule");
    }

    #[test]
    fn special_capacity_requires_name() {
        let node = double_complex("SpecialCapacity name = \"GROWTH_SPECIAL\" object = Target.ID");
        assert_eq!(node.filled_slots(), 2);
        assert!(crate::parse_double_expr("SpecialCapacity object = 1").is_err());
    }

    #[test]
    fn describe_reparses_complex_variables() {
        for source in [
            "GameRule name = \"RULE_HABITABLE_SIZE\"",
            "TurnSystemExplored empire = 1 id = Source.SystemID",
            "EmpireShipsDestroyed empire = 1 empire = 2",
            "JumpsBetween object = Source.SystemID object = Target.SystemID",
            "OutpostsOwned empire = Target.Owner",
            "PartsInShipDesign name = \"SR_WEAPON_1_1\" design = Source.DesignID",
            "PartOfClassInShipDesign class = FighterBay design = 7",
            "ShipPartsOwned empire = 1 name = \"SH_DEFLECTOR\" class = Shield",
            "ShipDesignsOwned empire = 1 design = \"SD_DRAGON\"",
            "SlotsInHull name = \"SH_BASIC_LARGE\"",
            "SlotsInShipDesign design = 12",
            "SpecialAddedOnTurn name = \"ANCIENT_GUARDIANS_SPECIAL\" object = Target.ID",
            "PlanetTypeDifference from = Toxic to = Target.PlanetType",
        ] {
            let parsed = crate::parse_int_expr(source).unwrap();
            assert_eq!(crate::parse_int_expr(&parsed.describe()).unwrap(), parsed);
        }
    }

    #[test]
    fn describe_reparses_double_complex_variables() {
        for source in [
            "HullFuel name = \"SH_BASIC_SMALL\"",
            "ShipPartMeter part = \"SR_WEAPON_1_1\" meter = Stealth id = 3",
            "SpecialCapacity name = \"GROWTH_SPECIAL\"",
            "DirectDistanceBetween object = 1 object = 2",
        ] {
            let parsed = crate::parse_double_expr(source).unwrap();
            assert_eq!(
                crate::parse_double_expr(&parsed.describe()).unwrap(),
                parsed
            );
        }
    }
}
