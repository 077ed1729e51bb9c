use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
    Remove(Range<usize>),
    Insert(usize, String),
}

impl Edit {
    fn position(&self) -> usize {
        match self {
            Edit::Remove(range) => range.start,
            Edit::Insert(at, _) => *at,
        }
    }
}

/// Collects edits against an unchanged source and builds the output in one
/// pass, so no offset ever has to be adjusted after an earlier edit.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    edits: Vec<Edit>,
}

impl Rewriter {
    pub fn new() -> Self {
        Rewriter { edits: vec![] }
    }

    pub fn remove(&mut self, range: Range<usize>) {
        if !range.is_empty() {
            self.edits.push(Edit::Remove(range));
        }
    }

    pub fn insert(&mut self, at: usize, text: String) {
        if !text.is_empty() {
            self.edits.push(Edit::Insert(at, text));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies every edit to `source`. Insertions at the same offset keep the
    /// order they were recorded in; overlapping removals are merged.
    pub fn apply(mut self, source: &str) -> String {
        if self.edits.is_empty() {
            return source.to_string();
        }

        self.edits.sort_by_key(Edit::position);

        let extra: usize = self
            .edits
            .iter()
            .map(|edit| match edit {
                Edit::Insert(_, text) => text.len(),
                Edit::Remove(_) => 0,
            })
            .sum();
        let mut output = String::with_capacity(source.len() + extra);
        let mut cursor = 0;

        for edit in self.edits {
            match edit {
                Edit::Remove(range) => {
                    if range.start > cursor {
                        output.push_str(&source[cursor..range.start]);
                    }
                    cursor = cursor.max(range.end);
                }
                Edit::Insert(at, text) => {
                    if at > cursor {
                        output.push_str(&source[cursor..at]);
                        cursor = at;
                    }
                    output.push_str(&text);
                }
            }
        }

        output.push_str(&source[cursor..]);
        output
    }
}
