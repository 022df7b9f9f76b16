//! Top-level content-definition grammar.
//!
//! A `.vct` file is a sequence of definitions, each opened by its kind
//! keyword (`BuildingType`, `Policy`, `Species`). Clause order is fixed;
//! the optional clauses may be omitted but not reordered.

use tracing::debug;
use voidwake_model::{
    Building, Definition, Effect, EffectGroup, MeterType, Policy, Result, Species,
};

use crate::parser::Parser;
use crate::token::TokenKind;

/// Parses every definition in a content file.
///
/// # Errors
/// Returns the first parse error; a malformed definition aborts the whole
/// file.
pub fn parse_definitions(source: &str) -> Result<Vec<Definition>> {
    let mut parser = Parser::new(source);
    let mut definitions = Vec::new();
    while parser.peek() != &TokenKind::Eof {
        let definition = parser.parse_definition()?;
        debug!(kind = definition.kind(), name = definition.name(), "parsed definition");
        definitions.push(definition);
    }
    Ok(definitions)
}

impl Parser<'_> {
    /// Parses one top-level definition.
    ///
    /// # Errors
    /// Returns a parse error on malformed input.
    pub fn parse_definition(&mut self) -> Result<Definition> {
        match self.keyword() {
            Some("BuildingType") => Ok(Definition::Building(self.parse_building()?)),
            Some("Policy") => Ok(Definition::Policy(self.parse_policy()?)),
            Some("Species") => Ok(Definition::Species(self.parse_species()?)),
            _ => Err(self.error("BuildingType, Policy, or Species")),
        }
    }

    fn parse_building(&mut self) -> Result<Building> {
        self.set_rule("BuildingType");
        self.expect_keyword("BuildingType")?;
        self.label("name")?;
        let name = self.expect_string_literal()?;
        self.label("description")?;
        let description = self.expect_string_literal()?;
        self.label("buildcost")?;
        let build_cost = self.parse_double_expr()?;
        self.label("buildtime")?;
        let build_time = self.parse_int_expr()?;
        self.label("location")?;
        let location = self.parse_condition()?;
        let effect_groups = self.parse_effects_groups_clause()?;

        Ok(Building {
            name,
            description,
            build_cost,
            build_time,
            location,
            effect_groups,
        })
    }

    fn parse_policy(&mut self) -> Result<Policy> {
        self.set_rule("Policy");
        self.expect_keyword("Policy")?;
        self.label("name")?;
        let name = self.expect_string_literal()?;
        self.label("description")?;
        let description = self.expect_string_literal()?;
        self.label("adoptioncost")?;
        let adoption_cost = self.parse_double_expr()?;
        let prerequisites = if self.try_label("prerequisites")? {
            self.parse_string_list()?
        } else {
            Vec::new()
        };
        let effect_groups = self.parse_effects_groups_clause()?;

        Ok(Policy {
            name,
            description,
            adoption_cost,
            prerequisites,
            effect_groups,
        })
    }

    fn parse_species(&mut self) -> Result<Species> {
        self.set_rule("Species");
        self.expect_keyword("Species")?;
        self.label("name")?;
        let name = self.expect_string_literal()?;
        self.label("description")?;
        let description = self.expect_string_literal()?;
        let foci = if self.try_label("foci")? {
            self.parse_string_list()?
        } else {
            Vec::new()
        };
        let effect_groups = self.parse_effects_groups_clause()?;

        Ok(Species {
            name,
            description,
            foci,
            effect_groups,
        })
    }

    /// `[effectsgroups = [ <EffectsGroup>* ]]`
    fn parse_effects_groups_clause(&mut self) -> Result<Vec<EffectGroup>> {
        if !self.try_label("effectsgroups")? {
            return Ok(Vec::new());
        }
        self.expect(&TokenKind::LBracket)?;
        let mut groups = Vec::new();
        while self.peek() != &TokenKind::RBracket {
            groups.push(self.parse_effects_group()?);
        }
        self.advance();
        Ok(groups)
    }

    /// `EffectsGroup scope = <cond> [activation = <cond>] effects = [ <effect>* ]`
    fn parse_effects_group(&mut self) -> Result<EffectGroup> {
        self.set_rule("EffectsGroup");
        self.expect_keyword("EffectsGroup")?;
        self.label("scope")?;
        let scope = self.parse_condition()?;
        let activation = if self.try_label("activation")? {
            Some(self.parse_condition()?)
        } else {
            None
        };
        self.set_rule("EffectsGroup");
        self.label("effects")?;
        self.expect(&TokenKind::LBracket)?;
        let mut effects = Vec::new();
        while self.peek() != &TokenKind::RBracket {
            effects.push(self.parse_effect()?);
        }
        self.advance();

        Ok(EffectGroup {
            scope,
            activation,
            effects,
        })
    }

    fn parse_effect(&mut self) -> Result<Effect> {
        match self.keyword() {
            Some("SetMeter") => {
                self.set_rule("SetMeter");
                self.advance();
                self.label("meter")?;
                let Some(word) = self.keyword() else {
                    return Err(self.error("meter keyword"));
                };
                let Some(meter) = MeterType::from_keyword(word) else {
                    return Err(self.error("meter keyword"));
                };
                self.advance();
                self.label("value")?;
                let value = Box::new(self.parse_double_expr()?);
                Ok(Effect::SetMeter { meter, value })
            }
            Some("SetEmpireMeter") => {
                self.set_rule("SetEmpireMeter");
                self.advance();
                self.label("empire")?;
                let empire = Box::new(self.parse_int_expr()?);
                self.label("meter")?;
                let meter = self.expect_string_literal()?;
                self.label("value")?;
                let value = Box::new(self.parse_double_expr()?);
                Ok(Effect::SetEmpireMeter {
                    empire,
                    meter,
                    value,
                })
            }
            Some("GenerateSitrep") => {
                self.set_rule("GenerateSitrep");
                self.advance();
                self.label("message")?;
                let message = self.expect_string_literal()?;
                Ok(Effect::GenerateSitrep { message })
            }
            Some("Destroy") => {
                self.advance();
                Ok(Effect::Destroy)
            }
            _ => Err(self.error("effect")),
        }
    }

    /// `[ "..." "..." ]`
    fn parse_string_list(&mut self) -> Result<Vec<String>> {
        self.expect(&TokenKind::LBracket)?;
        let mut items = Vec::new();
        while self.peek() != &TokenKind::RBracket {
            items.push(self.expect_string_literal()?);
        }
        self.advance();
        Ok(items)
    }
}
