//! The structural scan and the transform entry point.
//!
//! The scanner walks the source once, byte by byte. For every byte of live
//! code it keeps the brace depth and the set of depths that sit directly
//! inside a class body, and it checks whether a callable's parameter list
//! opens here. Confirmed callables with typed parameters are compiled
//! immediately; the resulting edits are applied to a fresh output buffer at
//! the end of the scan.

use std::{collections::HashSet, rc::Rc};

use tracing::{debug, trace};

use crate::{
    codegen::generate_guards,
    errors::errors::Error,
    lexer::{context::next_context, keywords::is_identifier_byte, LexicalContext},
    parser::{find_closing_paren, parse_parameters},
};

use super::{
    patterns::{ARROW_BODY_PATTERN, BLOCK_BODY_PATTERN, CLASS_PATTERN, FUNCTION_PATTERN},
    rewriter::Rewriter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    /// A method directly inside a class body.
    Method,
    /// A `function` declaration or expression.
    Function,
    /// An arrow function with a block body.
    Arrow,
}

/// A parameter list that passed the body lookahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
    pub kind: CallableKind,
    /// Offset of the parameter list's `(`.
    pub open: usize,
    /// Offset of the matching `)`.
    pub close: usize,
    /// Offset of the body's `{`.
    pub body: usize,
}

/// Scanning state for one transform call.
pub struct Scanner<'a> {
    source: &'a str,
    file: Rc<String>,
    context: LexicalContext,
    depth: usize,
    /// Depths whose contents are directly inside a class body.
    class_depths: HashSet<usize>,
    /// Parameter lists already claimed by a `function` keyword match.
    claimed: HashSet<usize>,
    callables: Vec<Callable>,
    rewriter: Rewriter,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Self {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<input>"))
        };

        Scanner {
            source,
            file: file_name,
            context: LexicalContext::None,
            depth: 0,
            class_depths: HashSet::new(),
            claimed: HashSet::new(),
            callables: vec![],
            rewriter: Rewriter::new(),
        }
    }

    /// Every callable confirmed so far, typed or not, in scan order.
    pub fn callables(&self) -> &[Callable] {
        &self.callables
    }

    /// Runs the scan over the whole source, recording edits.
    pub fn scan(&mut self) -> Result<(), Error> {
        let source = self.source;
        let bytes = source.as_bytes();

        for pos in 0..bytes.len() {
            self.context = next_context(self.context, bytes, pos);
            if !self.context.is_code() {
                continue;
            }

            match bytes[pos] {
                b'{' => self.depth += 1,
                b'}' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.class_depths.remove(&self.depth);
                }
                _ => {}
            }

            if self.at_class(pos) {
                trace!(depth = self.depth, position = pos, "class body");
                self.class_depths.insert(self.depth);
            }

            if let Some((open, has_keyword)) = self.at_parameter_list(pos) {
                self.compile_callable(open, has_keyword)?;
            }
        }

        Ok(())
    }

    /// Consumes the scanner and builds the transformed source.
    pub fn finish(self) -> String {
        self.rewriter.apply(self.source)
    }

    fn follows_identifier(&self, pos: usize) -> bool {
        pos > 0 && is_identifier_byte(self.source.as_bytes()[pos - 1])
    }

    fn at_class(&self, pos: usize) -> bool {
        self.source.as_bytes()[pos] == b'c'
            && !self.follows_identifier(pos)
            && CLASS_PATTERN.is_match(&self.source[pos..])
    }

    /// Returns the offset of a parameter list's `(` starting at `pos`, and
    /// whether it was introduced by the `function` keyword.
    fn at_parameter_list(&mut self, pos: usize) -> Option<(usize, bool)> {
        match self.source.as_bytes()[pos] {
            b'(' if !self.claimed.contains(&pos) => Some((pos, false)),
            b'f' if !self.follows_identifier(pos) => {
                let matched = FUNCTION_PATTERN.find(&self.source[pos..])?;
                let open = pos + matched.end() - 1;
                self.claimed.insert(open);
                Some((open, true))
            }
            _ => None,
        }
    }

    fn is_class_method_depth(&self) -> bool {
        self.depth
            .checked_sub(1)
            .is_some_and(|depth| self.class_depths.contains(&depth))
    }

    /// Classifies the candidate at `open` and, if it is a callable, strips
    /// its annotations and queues its guards.
    fn compile_callable(&mut self, open: usize, has_keyword: bool) -> Result<(), Error> {
        let Some(callable) = self.classify(open, has_keyword) else {
            return Ok(());
        };
        self.callables.push(callable.clone());

        let list = parse_parameters(self.source, callable.open, callable.close, &self.file);
        if list.bindings.is_empty() {
            return Ok(());
        }

        debug!(
            kind = ?callable.kind,
            position = callable.open,
            parameters = list.bindings.len(),
            "typed callable"
        );

        let guards = generate_guards(&list.bindings)?;

        for range in list.removals {
            self.rewriter.remove(range);
        }
        self.rewriter.insert(callable.body + 1, guards);

        Ok(())
    }

    fn classify(&self, open: usize, has_keyword: bool) -> Option<Callable> {
        let Some(close) = find_closing_paren(self.source, open) else {
            debug!(position = open, "unterminated parameter list");
            return None;
        };
        let after = &self.source[close + 1..];

        let (kind, matched) = if has_keyword {
            (CallableKind::Function, BLOCK_BODY_PATTERN.find(after)?)
        } else if self.is_class_method_depth() {
            match BLOCK_BODY_PATTERN.find(after) {
                Some(matched) => (CallableKind::Method, matched),
                // Arrow functions assigned to class fields.
                None => (CallableKind::Arrow, ARROW_BODY_PATTERN.find(after)?),
            }
        } else {
            (CallableKind::Arrow, ARROW_BODY_PATTERN.find(after)?)
        };
        let body = close + matched.end();

        Some(Callable {
            kind,
            open,
            close,
            body,
        })
    }
}

/// Strips parameter type annotations from `source` and inserts the matching
/// runtime guards at the top of each annotated function body.
///
/// # Arguments
///
/// * `source` - The complete source text
/// * `file` - A label for positions in errors, `<input>` when absent
///
/// # Returns
///
/// The transformed source. Annotations that do not follow the grammar are
/// left untouched; the only error is an annotation the generated code
/// cannot honour.
pub fn transform(source: &str, file: Option<String>) -> Result<String, Error> {
    let mut scanner = Scanner::new(source, file);
    scanner.scan()?;
    Ok(scanner.finish())
}
