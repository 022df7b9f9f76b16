//! Token-syntax front end for Voidwake content.
//!
//! This crate turns `.vct` content text into the shared expression-tree
//! model:
//!
//! - [`lexer::Lexer`] - Tokenizes raw content text
//! - [`envelope`] - Arena-backed deferred-ownership carriers for grammar actions
//! - [`parser::Parser`] - Recursive-descent rules for typed expressions,
//!   conditions, complex variables, and top-level definitions
//!
//! The parallel script front end (`voidwake_script`) produces the identical
//! tree types from a different surface syntax.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod complex;
pub mod condition;
pub mod definition;
pub mod envelope;
pub mod expr;
pub mod lexer;
pub mod parser;
pub mod token;

pub use definition::parse_definitions;
pub use envelope::{Envelope, NodePool};
pub use parser::Parser;

use voidwake_model::{DoubleRef, IntRef, Result, StringRef};

/// Parses a complete int-typed expression from source text.
///
/// # Errors
/// Returns a parse error if the source is not a single well-formed
/// int expression.
pub fn parse_int_expr(source: &str) -> Result<IntRef> {
    let mut parser = Parser::new(source);
    let expr = parser.parse_int_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Parses a complete double-typed expression from source text.
///
/// # Errors
/// Returns a parse error if the source is not a single well-formed
/// double expression.
pub fn parse_double_expr(source: &str) -> Result<DoubleRef> {
    let mut parser = Parser::new(source);
    let expr = parser.parse_double_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Parses a complete string-typed expression from source text.
///
/// # Errors
/// Returns a parse error if the source is not a single well-formed
/// string expression.
pub fn parse_string_expr(source: &str) -> Result<StringRef> {
    let mut parser = Parser::new(source);
    let expr = parser.parse_string_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Parses a complete condition from source text.
///
/// # Errors
/// Returns a parse error if the source is not a single well-formed
/// condition.
pub fn parse_condition(source: &str) -> Result<voidwake_model::Condition> {
    let mut parser = Parser::new(source);
    let cond = parser.parse_condition()?;
    parser.expect_eof()?;
    Ok(cond)
}
