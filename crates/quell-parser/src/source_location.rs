use serde::Deserialize;
use serde::Serialize;

/// A 1-based (line, column) position within a [`Source`](crate::Source).
///
/// Both fields are 1-based: the first character of a document sits at
/// `(1, 1)`. Columns count characters from the most recent line separator,
/// not bytes.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
