//! Typed-expression sub-grammars.
//!
//! One family of rules per result type. The numeric grammars share the usual
//! precedence shape (additive over multiplicative over unary over primary);
//! string expressions support only concatenation; enum expressions are
//! keyword constants or property reads.
//!
//! Alternation across result types never needs backtracking: the leading
//! token (literal kind, object-base keyword, complex-variable keyword, or
//! `Statistic`) decides the production.

use voidwake_model::{
    BinaryOp, DoubleCast, DoubleRef, IntRef, ObjectBase, PlanetType, PropertyGroup, Result,
    Statistic, StatisticType, StringRef, ValueRef, lookup_property,
};

use crate::complex;
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    // ========================================================================
    // Int expressions
    // ========================================================================

    /// Parses an int-typed expression.
    ///
    /// # Errors
    /// Returns a parse error on malformed input.
    pub fn parse_int_expr(&mut self) -> Result<IntRef> {
        let mut lhs = self.parse_int_multiplicative()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_int_multiplicative()?;
            lhs = ValueRef::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_int_multiplicative(&mut self) -> Result<IntRef> {
        let mut lhs = self.parse_int_unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Multiply,
                TokenKind::Slash => BinaryOp::Divide,
                TokenKind::Percent => BinaryOp::Modulo,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_int_unary()?;
            lhs = ValueRef::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_int_unary(&mut self) -> Result<IntRef> {
        if self.peek() == &TokenKind::Minus {
            self.advance();
            // A negated literal folds to a negative constant so the text a
            // constant renders back to parses to the same node.
            if let TokenKind::Int(value) = *self.peek() {
                self.advance();
                return Ok(IntRef::Constant(-value));
            }
            let operand = self.parse_int_unary()?;
            return Ok(ValueRef::negate(operand));
        }
        self.parse_int_primary()
    }

    fn parse_int_primary(&mut self) -> Result<IntRef> {
        match self.peek() {
            TokenKind::Int(value) => {
                let value = *value;
                self.advance();
                Ok(IntRef::Constant(value))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_int_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(word) => {
                if word == "Statistic" {
                    return self.parse_int_statistic();
                }
                if complex::is_int_complex_keyword(word) {
                    return self.parse_int_complex();
                }
                if ObjectBase::from_keyword(word).is_some() {
                    return self.parse_property_ref(PropertyGroup::Int);
                }
                Err(self.error("int expression"))
            }
            _ => Err(self.error("int expression")),
        }
    }

    fn parse_int_statistic(&mut self) -> Result<IntRef> {
        self.set_rule("Statistic");
        self.expect_keyword("Statistic")?;
        let stat = self.parse_statistic_type()?;
        let stat = if stat == StatisticType::Count {
            self.label("condition")?;
            Statistic::count(self.parse_condition()?)
        } else {
            self.label("value")?;
            let value = self.parse_int_expr()?;
            self.label("condition")?;
            Statistic::sample(stat, value, self.parse_condition()?)
        };
        Ok(IntRef::Statistic(Box::new(stat)))
    }

    // ========================================================================
    // Double expressions
    // ========================================================================

    /// Parses a double-typed expression.
    ///
    /// Int literals and int-valued properties widen through
    /// [`DoubleCast::FromInt`], so int-shaped operands work anywhere a double
    /// is expected.
    ///
    /// # Errors
    /// Returns a parse error on malformed input.
    pub fn parse_double_expr(&mut self) -> Result<DoubleRef> {
        let mut lhs = self.parse_double_multiplicative()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_double_multiplicative()?;
            lhs = ValueRef::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_double_multiplicative(&mut self) -> Result<DoubleRef> {
        let mut lhs = self.parse_double_unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Multiply,
                TokenKind::Slash => BinaryOp::Divide,
                TokenKind::Percent => BinaryOp::Modulo,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_double_unary()?;
            lhs = ValueRef::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_double_unary(&mut self) -> Result<DoubleRef> {
        if self.peek() == &TokenKind::Minus {
            self.advance();
            match *self.peek() {
                TokenKind::Float(value) => {
                    self.advance();
                    return Ok(DoubleRef::Constant(-value));
                }
                TokenKind::Int(value) => {
                    self.advance();
                    #[allow(clippy::cast_precision_loss)]
                    return Ok(DoubleRef::Constant(-(value as f64)));
                }
                _ => {}
            }
            let operand = self.parse_double_unary()?;
            return Ok(ValueRef::negate(operand));
        }
        self.parse_double_primary()
    }

    fn parse_double_primary(&mut self) -> Result<DoubleRef> {
        match self.peek() {
            TokenKind::Float(value) => {
                let value = *value;
                self.advance();
                Ok(DoubleRef::Constant(value))
            }
            TokenKind::Int(value) => {
                let value = *value;
                self.advance();
                #[allow(clippy::cast_precision_loss)]
                Ok(DoubleRef::Constant(value as f64))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_double_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(word) => {
                if word == "Statistic" {
                    return self.parse_double_statistic();
                }
                if complex::is_double_complex_keyword(word) {
                    return self.parse_double_complex();
                }
                if complex::is_int_complex_keyword(word) {
                    let inner = self.parse_int_complex()?;
                    return Ok(DoubleRef::Cast(DoubleCast::FromInt(Box::new(inner))));
                }
                if ObjectBase::from_keyword(word).is_some() {
                    return self.parse_double_property_ref();
                }
                Err(self.error("double expression"))
            }
            _ => Err(self.error("double expression")),
        }
    }

    fn parse_double_statistic(&mut self) -> Result<DoubleRef> {
        self.set_rule("Statistic");
        self.expect_keyword("Statistic")?;
        let stat = self.parse_statistic_type()?;
        let stat = if stat == StatisticType::Count {
            self.label("condition")?;
            Statistic::count(self.parse_condition()?)
        } else {
            self.label("value")?;
            let value = self.parse_double_expr()?;
            self.label("condition")?;
            Statistic::sample(stat, value, self.parse_condition()?)
        };
        Ok(DoubleRef::Statistic(Box::new(stat)))
    }

    /// Property reference in double position. Int-group properties widen.
    fn parse_double_property_ref(&mut self) -> Result<DoubleRef> {
        let (base, path, group) =
            self.parse_property_path(&[PropertyGroup::Double, PropertyGroup::Int])?;
        if group == PropertyGroup::Int {
            return Ok(DoubleRef::Cast(DoubleCast::FromInt(Box::new(
                IntRef::Variable { base, path },
            ))));
        }
        Ok(DoubleRef::Variable { base, path })
    }

    // ========================================================================
    // String expressions
    // ========================================================================

    /// Parses a string-typed expression: literals, string properties, and
    /// `+` concatenation.
    ///
    /// # Errors
    /// Returns a parse error on malformed input.
    pub fn parse_string_expr(&mut self) -> Result<StringRef> {
        let mut lhs = self.parse_string_primary()?;
        while self.peek() == &TokenKind::Plus {
            self.advance();
            let rhs = self.parse_string_primary()?;
            lhs = ValueRef::binary(BinaryOp::Add, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_string_primary(&mut self) -> Result<StringRef> {
        match self.peek() {
            TokenKind::Str(_) => {
                let text = self.expect_string_literal()?;
                Ok(StringRef::Constant(text))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_string_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(word) if ObjectBase::from_keyword(word).is_some() => {
                self.parse_property_ref(PropertyGroup::String)
            }
            _ => Err(self.error("string expression")),
        }
    }

    // ========================================================================
    // Enum expressions
    // ========================================================================

    /// Parses a planet-type expression: a keyword constant or a planet-type
    /// property read.
    ///
    /// # Errors
    /// Returns a parse error on malformed input.
    pub fn parse_planet_type_expr(&mut self) -> Result<ValueRef<PlanetType>> {
        match self.peek() {
            TokenKind::Ident(word) => {
                if let Some(planet_type) = PlanetType::from_keyword(word) {
                    self.advance();
                    return Ok(ValueRef::Constant(planet_type));
                }
                if ObjectBase::from_keyword(word).is_some() {
                    return self.parse_property_ref(PropertyGroup::PlanetType);
                }
                Err(self.error("planet type"))
            }
            _ => Err(self.error("planet type")),
        }
    }

    // ========================================================================
    // Shared pieces
    // ========================================================================

    fn parse_statistic_type(&mut self) -> Result<StatisticType> {
        let Some(word) = self.keyword() else {
            return Err(self.error("statistic aggregate"));
        };
        let Some(stat) = StatisticType::from_keyword(word) else {
            return Err(self.error("statistic aggregate"));
        };
        self.advance();
        Ok(stat)
    }

    /// Parses an `ObjectBase.segment.segment` chain ending in a property of
    /// `group`.
    pub(crate) fn parse_property_ref<T: voidwake_model::RefType>(
        &mut self,
        group: PropertyGroup,
    ) -> Result<ValueRef<T>> {
        let (base, path, _) = self.parse_property_path(&[group])?;
        Ok(ValueRef::Variable { base, path })
    }

    /// Parses the raw chain and validates each segment: interior segments
    /// must navigate, the final one must belong to one of `allowed`.
    /// Returns the group the final segment matched.
    fn parse_property_path(
        &mut self,
        allowed: &[PropertyGroup],
    ) -> Result<(ObjectBase, Vec<String>, PropertyGroup)> {
        let Some(word) = self.keyword() else {
            return Err(self.error("Source, Target, LocalCandidate, or RootCandidate"));
        };
        let Some(base) = ObjectBase::from_keyword(word) else {
            return Err(self.error("Source, Target, LocalCandidate, or RootCandidate"));
        };
        self.advance();

        let mut path = Vec::new();
        while self.peek() == &TokenKind::Dot {
            self.advance();
            let Some(segment) = self.keyword() else {
                return Err(self.error("property name"));
            };
            path.push(segment.to_string());
            self.advance();
        }

        if path.is_empty() {
            return Err(self.error("'.' and a property name"));
        }

        for interior in &path[..path.len() - 1] {
            if lookup_property(interior) != Some(PropertyGroup::Navigation) {
                return Err(voidwake_model::Error::unknown_property(interior.clone()));
            }
        }
        let last = &path[path.len() - 1];
        match lookup_property(last) {
            Some(group) if allowed.contains(&group) => Ok((base, path, group)),
            Some(_) | None => Err(voidwake_model::Error::unknown_property(last.clone())),
        }
    }
}
