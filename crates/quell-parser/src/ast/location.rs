use crate::Source;
use crate::SourceLocation;
use std::sync::Arc;

/// The byte span of an AST node, with an optional back-pointer to the
/// [`Source`] it was parsed from.
///
/// The source pointer is omitted when parsing with
/// [`ParseOptions::no_source`](crate::ParseOptions); the whole location is
/// omitted under `no_location`.
#[derive(Clone)]
pub struct AstLocation {
    pub start: usize,
    pub end: usize,
    pub source: Option<Arc<Source>>,
}

impl AstLocation {
    pub fn new(start: usize, end: usize, source: Option<Arc<Source>>) -> Self {
        Self { start, end, source }
    }

    /// Resolves the start of this span to a (line, column), when the source
    /// was retained.
    pub fn source_location(&self) -> Option<SourceLocation> {
        self.source.as_ref().map(|source| source.location(self.start))
    }
}

impl PartialEq for AstLocation {
    /// Source back-pointers do not participate in equality; two locations
    /// are equal when they cover the same byte span.
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl std::fmt::Debug for AstLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AstLocation")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}
