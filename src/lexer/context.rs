//! Lexical context tracking.
//!
//! The transform never tokenizes the source. Instead it walks the raw bytes
//! and asks, for every position, whether that byte is live code or inert
//! text inside a comment or string literal. All delimiters that matter here
//! are ASCII, so the walk is done over bytes and multi-byte UTF-8 sequences
//! are simply carried along as inert continuation bytes.

/// The lexical context in effect at a single byte of the source.
///
/// A closing delimiter (the quote that ends a string, the newline that ends
/// a line comment, the `/` that ends a block comment) already reports
/// [`LexicalContext::None`], since everything after it is code again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexicalContext {
    #[default]
    None,
    LineComment,
    /// `opened_at` is the offset of the opening `/`, so the `*` of `/*`
    /// is never mistaken for the start of `*/`.
    BlockComment {
        opened_at: usize,
    },
    DoubleQuoted,
    SingleQuoted,
    Template,
}

impl LexicalContext {
    pub fn is_code(&self) -> bool {
        matches!(self, LexicalContext::None)
    }

    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            LexicalContext::LineComment | LexicalContext::BlockComment { .. }
        )
    }

    pub fn is_string(&self) -> bool {
        matches!(
            self,
            LexicalContext::DoubleQuoted | LexicalContext::SingleQuoted | LexicalContext::Template
        )
    }
}

/// Counts the run of backslashes immediately before `pos`, stopping at the
/// first non-backslash byte or the start of the buffer.
pub fn count_preceding_backslashes(source: &[u8], pos: usize) -> usize {
    source[..pos.min(source.len())]
        .iter()
        .rev()
        .take_while(|byte| **byte == b'\\')
        .count()
}

/// A quote is escaped when an odd number of backslashes precede it.
pub fn is_escaped(source: &[u8], pos: usize) -> bool {
    count_preceding_backslashes(source, pos) % 2 == 1
}

/// Computes the context for the byte at `pos`, given the context of the
/// byte before it.
///
/// This is a pure step function: callers thread the returned value into the
/// next call. Positions past the end of `source` leave the context unchanged.
pub fn next_context(prev: LexicalContext, source: &[u8], pos: usize) -> LexicalContext {
    let Some(&current) = source.get(pos) else {
        return prev;
    };
    let lookahead = source.get(pos + 1).copied();

    match prev {
        LexicalContext::None => match current {
            b'/' if lookahead == Some(b'/') => LexicalContext::LineComment,
            b'/' if lookahead == Some(b'*') => LexicalContext::BlockComment { opened_at: pos },
            b'"' if !is_escaped(source, pos) => LexicalContext::DoubleQuoted,
            b'\'' if !is_escaped(source, pos) => LexicalContext::SingleQuoted,
            b'`' if !is_escaped(source, pos) => LexicalContext::Template,
            _ => LexicalContext::None,
        },
        LexicalContext::LineComment => match current {
            b'\n' | b'\r' => LexicalContext::None,
            _ => prev,
        },
        LexicalContext::BlockComment { opened_at } => {
            if current == b'/' && pos >= opened_at + 3 && source[pos - 1] == b'*' {
                LexicalContext::None
            } else {
                prev
            }
        }
        LexicalContext::DoubleQuoted => close_string(prev, b'"', source, pos),
        LexicalContext::SingleQuoted => close_string(prev, b'\'', source, pos),
        LexicalContext::Template => close_string(prev, b'`', source, pos),
    }
}

fn close_string(prev: LexicalContext, quote: u8, source: &[u8], pos: usize) -> LexicalContext {
    if source[pos] == quote && !is_escaped(source, pos) {
        LexicalContext::None
    } else {
        prev
    }
}

/// Runs the step function over a whole buffer and returns the context of
/// every byte.
pub fn classify(source: &str) -> Vec<LexicalContext> {
    let bytes = source.as_bytes();
    let mut context = LexicalContext::None;

    (0..bytes.len())
        .map(|pos| {
            context = next_context(context, bytes, pos);
            context
        })
        .collect()
}
