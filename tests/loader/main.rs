//! Integration tests for the content-directory loader.
//!
//! Tests that load mixed on-disk trees through both front ends at once.

mod directory;
