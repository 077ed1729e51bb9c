//! Error types for the transform.
//!
//! The transform itself almost never fails: annotations it cannot read are
//! left in place as ordinary code. The errors here cover the few annotations
//! that are readable but ask for something the generated code cannot do.
//!
//! Errors carried by the generated JavaScript (the `TypeError`s thrown at call
//! time) are a separate domain and live in the `codegen` module as text.

pub mod errors;

#[cfg(test)]
mod tests;
