//! Integration tests for the token-syntax front end.
//!
//! Tests that feed whole source strings through the public parse entry
//! points and check the trees that come out.

mod complex_roundtrip;
mod definitions;
mod expressions;
