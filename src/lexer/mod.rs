//! Lexical analysis for the transform.
//!
//! This module decides, for every byte of the source, whether it is live
//! code or inert text inside a comment or string, and it holds the keyword
//! tables consulted by the later phases:
//!
//! - Comment and string context tracking with escape handling
//! - The host language's reserved words
//! - The annotation grammar's modifiers and scalar type names

pub mod context;
pub mod keywords;

pub use context::LexicalContext;
