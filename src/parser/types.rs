//! Type specifications for annotated parameters.
//!
//! An annotation reads `[implicit] [[strict] nullable] Name`, optionally
//! followed by one level of contents in brackets:
//!
//! - `Array[T]`, `Set[T]` and `Object[T]` take one contents type
//! - `Map[K, V]` takes a key type and a value type
//!
//! Contents types accept the same modifiers but never carry contents of
//! their own, so `Array[Array[Number]]` is not an annotation at all.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::lexer::keywords::{is_grammar_keyword, is_reserved, is_scalar};

/// An identifier of the host language, restricted to ASCII.
pub const IDENTIFIER: &str = r"[A-Za-z_$][\w$]*";

/// Modifiers in the only order the grammar accepts.
pub const MODIFIERS: &str = r"(?:implicit\s+)?(?:(?:strict\s+)?nullable\s+)?";

lazy_static! {
    /// A modified name with no contents.
    pub static ref SIMPLE_TYPE: String = format!("{}{}", MODIFIERS, IDENTIFIER);

    /// A modified name with optional one-level contents.
    pub static ref FULL_TYPE: String = format!(
        r"{simple}(?:\s*\[\s*{simple}(?:\s*,\s*{simple})?\s*\])?",
        simple = *SIMPLE_TYPE
    );

    static ref TYPE_SPEC_PATTERN: Regex = Regex::new(&format!(
        r"^(?P<implicit>implicit\s+)?(?:(?P<strict>strict\s+)?(?P<nullable>nullable\s+))?(?P<base>{})(?:\s*\[\s*(?P<first>{simple})(?:\s*,\s*(?P<second>{simple}))?\s*\])?$",
        IDENTIFIER,
        simple = *SIMPLE_TYPE
    ))
    .unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub implicit: bool,
    pub nullable: bool,
    /// Only exact `null` bypasses the check. Always implies `nullable`.
    pub strict_nullable: bool,
    pub base_type: String,
    pub contents: Option<Contents>,
}

/// The contents of a container type. Contents never nest further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// Elements of an `Array` or `Set`, or own values of an `Object`.
    Single(Box<TypeSpec>),
    /// Keys and values of a `Map`.
    Pair(Box<TypeSpec>, Box<TypeSpec>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    Set,
    Object,
    Map,
}

impl ContainerKind {
    pub fn from_name(name: &str) -> Option<ContainerKind> {
        match name {
            "Array" => Some(ContainerKind::Array),
            "Set" => Some(ContainerKind::Set),
            "Object" => Some(ContainerKind::Object),
            "Map" => Some(ContainerKind::Map),
            _ => None,
        }
    }
}

impl TypeSpec {
    pub fn simple(base_type: &str) -> Self {
        TypeSpec {
            implicit: false,
            nullable: false,
            strict_nullable: false,
            base_type: base_type.to_string(),
            contents: None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        is_scalar(&self.base_type)
    }

    pub fn container_kind(&self) -> Option<ContainerKind> {
        ContainerKind::from_name(&self.base_type)
    }

    pub fn has_implicit_contents(&self) -> bool {
        match &self.contents {
            Some(Contents::Single(inner)) => inner.implicit,
            Some(Contents::Pair(keys, values)) => keys.implicit || values.implicit,
            None => false,
        }
    }

    /// The type name as shown in generated error messages.
    pub fn expected_name(&self) -> String {
        if self.strict_nullable {
            format!("{} or null", self.base_type)
        } else if self.nullable {
            format!("{} or null/undefined", self.base_type)
        } else {
            self.base_type.clone()
        }
    }
}

impl Display for TypeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.implicit {
            write!(f, "implicit ")?;
        }
        if self.strict_nullable {
            write!(f, "strict nullable ")?;
        } else if self.nullable {
            write!(f, "nullable ")?;
        }
        write!(f, "{}", self.base_type)?;

        match &self.contents {
            Some(Contents::Single(inner)) => write!(f, "[{}]", inner),
            Some(Contents::Pair(keys, values)) => write!(f, "[{}, {}]", keys, values),
            None => Ok(()),
        }
    }
}

fn is_valid_type_name(name: &str) -> bool {
    !is_reserved(name) && !is_grammar_keyword(name)
}

/// Parses annotation text such as `nullable Array[implicit Number]`.
///
/// Returns `None` for anything outside the grammar, including type names
/// that collide with reserved words and contents on a type that does not
/// take them.
pub fn parse_type_spec(text: &str) -> Option<TypeSpec> {
    let captures = TYPE_SPEC_PATTERN.captures(text.trim())?;
    let base = captures.name("base")?.as_str();

    if !is_valid_type_name(base) {
        return None;
    }

    let strict_nullable = captures.name("strict").is_some();
    let nullable = captures.name("nullable").is_some();

    let first = captures.name("first").map(|m| m.as_str());
    let second = captures.name("second").map(|m| m.as_str());

    let contents = match (ContainerKind::from_name(base), first, second) {
        (_, None, _) => None,
        (Some(ContainerKind::Map), Some(keys), Some(values)) => Some(Contents::Pair(
            Box::new(parse_contents_spec(keys)?),
            Box::new(parse_contents_spec(values)?),
        )),
        (Some(ContainerKind::Array | ContainerKind::Set | ContainerKind::Object), Some(inner), None) => {
            Some(Contents::Single(Box::new(parse_contents_spec(inner)?)))
        }
        _ => return None,
    };

    Some(TypeSpec {
        implicit: captures.name("implicit").is_some(),
        nullable,
        strict_nullable,
        base_type: base.to_string(),
        contents,
    })
}

fn parse_contents_spec(text: &str) -> Option<TypeSpec> {
    let spec = parse_type_spec(text)?;

    if spec.contents.is_some() {
        return None;
    }

    Some(spec)
}
