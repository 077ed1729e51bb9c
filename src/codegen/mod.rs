//! Code generation for parameter guards.
//!
//! This module turns a callable's parameter binding into the JavaScript
//! statements that validate or coerce each argument at call time.

pub mod codegen;

pub use codegen::generate_guards;

#[cfg(test)]
mod tests;
