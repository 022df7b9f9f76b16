//! Voidwake content front end.
//!
//! This crate re-exports all layers of the Voidwake content system for
//! convenient access. For detailed documentation, see the individual layer
//! crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: voidwake_loader  — Content-directory walk, CLI
//! Layer 1: voidwake_grammar — Token-syntax front end
//!          voidwake_script  — Embedded script front end
//! Layer 0: voidwake_model   — Shared expression trees, registry, errors
//! ```
//!
//! Both front ends produce the same `voidwake_model` node types, so a
//! definition is indistinguishable once loaded regardless of which syntax
//! carried it.

pub use voidwake_grammar as grammar;
pub use voidwake_loader as loader;
pub use voidwake_model as model;
pub use voidwake_script as script;
