//! Condition grammar.
//!
//! Conditions appear after `condition =` in statistics, after `scope =` and
//! `activation =` in effect groups, and after `location =` in content
//! definitions. Every form starts with a distinct keyword or `(`, so a
//! single token of lookahead picks the production.

use voidwake_model::{CompareOp, Condition, EmpireAffiliation, Result};

use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    /// Parses a condition.
    ///
    /// # Errors
    /// Returns a parse error on malformed input.
    pub fn parse_condition(&mut self) -> Result<Condition> {
        match self.peek() {
            TokenKind::LParen => self.parse_comparison(),
            TokenKind::Ident(word) => match word.as_str() {
                "All" => {
                    self.advance();
                    Ok(Condition::All)
                }
                "OwnedBy" => self.parse_owned_by(),
                "Contains" => {
                    self.advance();
                    Ok(Condition::Contains(Box::new(self.parse_condition()?)))
                }
                "Planet" => self.parse_planet(),
                "And" => Ok(Condition::And(self.parse_condition_list("And")?)),
                "Or" => Ok(Condition::Or(self.parse_condition_list("Or")?)),
                "Not" => {
                    self.advance();
                    Ok(Condition::Not(Box::new(self.parse_condition()?)))
                }
                _ => Err(self.error("condition")),
            },
            _ => Err(self.error("condition")),
        }
    }

    /// `( <double> <op> <double> )`
    fn parse_comparison(&mut self) -> Result<Condition> {
        self.set_rule("Comparison");
        self.expect(&TokenKind::LParen)?;
        let lhs = self.parse_double_expr()?;
        let op = match self.peek() {
            TokenKind::EqEq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::Ne,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Le => CompareOp::Le,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Ge => CompareOp::Ge,
            _ => return Err(self.error("comparison operator")),
        };
        self.advance();
        let rhs = self.parse_double_expr()?;
        self.expect(&TokenKind::RParen)?;
        Ok(Condition::comparison(lhs, op, rhs))
    }

    /// `OwnedBy [affiliation = <keyword>] [empire = <int>]`
    fn parse_owned_by(&mut self) -> Result<Condition> {
        self.set_rule("OwnedBy");
        self.expect_keyword("OwnedBy")?;

        let affiliation = if self.try_label("affiliation")? {
            let Some(word) = self.keyword() else {
                return Err(self.error("affiliation keyword"));
            };
            let Some(affiliation) = EmpireAffiliation::from_keyword(word) else {
                return Err(self.error("affiliation keyword"));
            };
            self.advance();
            affiliation
        } else {
            EmpireAffiliation::TheEmpire
        };

        let empire = if self.try_label("empire")? {
            Some(Box::new(self.parse_int_expr()?))
        } else {
            None
        };

        Ok(Condition::OwnedBy {
            affiliation,
            empire,
        })
    }

    /// `Planet [type = <planet-type> | type = [ <planet-type>* ]]`
    fn parse_planet(&mut self) -> Result<Condition> {
        self.set_rule("Planet");
        self.expect_keyword("Planet")?;

        let mut types = Vec::new();
        if self.try_label("type")? {
            if self.peek() == &TokenKind::LBracket {
                self.advance();
                while self.peek() != &TokenKind::RBracket {
                    types.push(self.parse_planet_type_expr()?);
                }
                self.advance();
            } else {
                types.push(self.parse_planet_type_expr()?);
            }
        }

        Ok(Condition::Planet { types })
    }

    /// `<keyword> [ <condition>* ]`
    fn parse_condition_list(&mut self, keyword: &str) -> Result<Vec<Condition>> {
        self.set_rule(keyword);
        self.expect_keyword(keyword)?;
        self.expect(&TokenKind::LBracket)?;
        let mut subs = Vec::new();
        while self.peek() != &TokenKind::RBracket {
            subs.push(self.parse_condition()?);
        }
        self.advance();
        Ok(subs)
    }
}
