//! Parser for annotated parameter lists.
//!
//! This module reads the annotation grammar out of a callable's parameter
//! list. It does not build a syntax tree: it produces the ordered binding of
//! parameter names to type specifications, plus the byte ranges of the
//! annotation text that has to be stripped from the output.
//!
//! - `types` - the Type Specification model and its grammar
//! - `params` - locating parameters and matching their annotations

pub mod params;
pub mod types;

pub use params::{find_closing_paren, parse_parameters, ParameterBinding, ParameterList, TypedParameter};
pub use types::{parse_type_spec, ContainerKind, Contents, TypeSpec};
