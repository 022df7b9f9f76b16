//! Integration tests for the shared content model.
//!
//! Tests that exercise the expression-tree types and the registry as a
//! consumer crate sees them.

mod describe;
mod registry;
