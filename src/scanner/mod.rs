//! Structural scanning and the top-level transform.
//!
//! This module drives the single pass over the source:
//!
//! - Brace depth and class body tracking
//! - Recognition of methods, `function`s and arrow functions
//! - Collecting edits and building the output text
//!
//! Parsing of the parameter lists themselves is delegated to the parser
//! module, and guard text to the codegen module.

pub mod patterns;
pub mod rewriter;
pub mod scanner;

pub use rewriter::Rewriter;
pub use scanner::{transform, Callable, CallableKind, Scanner};
