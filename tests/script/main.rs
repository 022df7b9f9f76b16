//! Integration tests for the script front end.
//!
//! Tests that drive the public host, evaluator, and bridge surfaces the way
//! a content loader would.

mod bridge_session;
mod promotion;
