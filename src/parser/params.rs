//! Parameter list parsing.
//!
//! Given the byte offsets of a callable's `(` and matching `)`, this finds
//! every parameter written with a leading type annotation and records the
//! range of annotation text to strip. Only parameter starts are considered:
//! directly after the `(` or a top-level `,`, outside any nested brackets,
//! so default values and destructuring patterns are never read as types.

use std::{ops::Range, rc::Rc};

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    lexer::{context::next_context, keywords::is_reserved, LexicalContext},
    Position, Span,
};

use super::types::{parse_type_spec, TypeSpec, FULL_TYPE, IDENTIFIER};

lazy_static! {
    static ref PARAMETER_PATTERN: Regex = Regex::new(&format!(
        r"^(?P<type>{})\s+(?P<name>{})",
        *FULL_TYPE, IDENTIFIER
    ))
    .unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedParameter {
    pub spec: TypeSpec,
    /// The annotation text that was stripped, ending where the name begins.
    pub span: Span,
}

/// Typed parameters of one callable, in declaration order.
///
/// A repeated name keeps its first position but takes the later annotation.
pub type ParameterBinding = IndexMap<String, TypedParameter>;

#[derive(Debug, Clone, Default)]
pub struct ParameterList {
    pub bindings: ParameterBinding,
    /// Byte ranges of annotation text to delete, in source order.
    pub removals: Vec<Range<usize>>,
}

/// Finds the `)` matching the `(` at `open`, skipping strings and comments.
pub fn find_closing_paren(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut context = LexicalContext::None;
    let mut depth = 1usize;

    for pos in (open + 1)..bytes.len() {
        context = next_context(context, bytes, pos);
        if !context.is_code() {
            continue;
        }

        match bytes[pos] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parses the parameters between `open` and `close` (exclusive).
pub fn parse_parameters(source: &str, open: usize, close: usize, file: &Rc<String>) -> ParameterList {
    let bytes = source.as_bytes();
    let mut list = ParameterList::default();

    let mut context = LexicalContext::None;
    let mut parens = 1usize;
    let mut nesting = 0usize;
    let mut at_parameter_start = true;
    let mut pos = open + 1;

    while pos < close {
        let prev = context;
        context = next_context(context, bytes, pos);

        if !context.is_code() {
            if context.is_string() {
                at_parameter_start = false;
            }
            pos += 1;
            continue;
        }

        // The closing byte of a comment is still part of the comment.
        if prev.is_comment() {
            pos += 1;
            continue;
        }

        let byte = bytes[pos];
        match byte {
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            b'[' | b'{' => nesting += 1,
            b']' | b'}' => nesting = nesting.saturating_sub(1),
            _ => {}
        }

        let top_level = parens == 1 && nesting == 0;

        if byte == b',' && top_level {
            at_parameter_start = true;
            pos += 1;
            continue;
        }

        if byte.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if at_parameter_start && top_level {
            if let Some((name, range)) = match_typed_parameter(source, pos, close, file, &mut list) {
                trace!(parameter = %name, start = range.start, "stripped parameter annotation");
                list.removals.push(range.clone());
                pos = range.end + name.len();
                at_parameter_start = false;
                continue;
            }
        }

        at_parameter_start = false;
        pos += 1;
    }

    list
}

/// Tries to read `Type name` at `pos`. On success the binding is recorded
/// and the parameter name plus the range to strip are returned.
fn match_typed_parameter(
    source: &str,
    pos: usize,
    close: usize,
    file: &Rc<String>,
    list: &mut ParameterList,
) -> Option<(String, Range<usize>)> {
    if !source.is_char_boundary(pos) {
        return None;
    }

    let captures = PARAMETER_PATTERN.captures(&source[pos..close])?;
    let annotation = captures.name("type")?;
    let name = captures.name("name")?;

    if is_reserved(name.as_str()) {
        trace!(word = name.as_str(), "parameter name is reserved");
        return None;
    }

    let Some(spec) = parse_type_spec(annotation.as_str()) else {
        trace!(annotation = annotation.as_str(), "not a type annotation");
        return None;
    };

    // Only a delimiter, a default value or a comment may follow the name.
    let rest = source[pos + name.end()..close].trim_start();
    if !(rest.is_empty() || rest.starts_with(',') || rest.starts_with('=') || rest.starts_with('/')) {
        return None;
    }

    let range = pos..pos + name.start();
    let span = Span {
        start: Position(range.start as u32, Rc::clone(file)),
        end: Position(range.end as u32, Rc::clone(file)),
    };

    list.bindings
        .insert(name.as_str().to_string(), TypedParameter { spec, span });

    Some((name.as_str().to_string(), range))
}
