//! Script front end for Voidwake content.
//!
//! A small embedded s-expression language whose evaluation produces the same
//! expression-tree model as the token grammar. The pieces:
//!
//! - [`reader`] - Source text to forms
//! - [`value::Value`] - Runtime wrappers around model nodes
//! - [`ops`] - Operator semantics and the numeric promotion table
//! - [`properties::PropertyTable`] - Attribute reads on game-object symbols
//! - [`host::ScriptHost`] - Interpreter state: environments, module table,
//!   import-hook chain, restart policy
//! - [`modules`] - Dotted-name resolution and module execution
//! - [`bridge::ScriptBridge`] - Scoped host access with environment isolation
//!
//! Scripts never observe host-language truthiness or reflection; every
//! conversion between numeric values and conditions is an explicit node
//! construction.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bridge;
pub mod builders;
pub mod eval;
pub mod host;
pub mod modules;
pub mod ops;
pub mod properties;
pub mod reader;
pub mod value;

pub use bridge::ScriptBridge;
pub use host::ScriptHost;
pub use modules::{ContentResolver, Resolved, exec_module};
pub use value::Value;
