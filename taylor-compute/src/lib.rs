//! The symbolic-math engine behind the Taylor series calculator.
//!
//! - [`symbolic`] holds the flattened expression form, the rule-based simplifier and the
//! differentiator.
//! - [`numerical`] partially evaluates expressions under a set of variable bindings.
//! - [`funcs`] lists the functions that may appear in the function text.

pub mod consts;
pub mod funcs;
pub mod numerical;
pub mod primitive;
pub mod symbolic;
