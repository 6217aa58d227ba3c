use crate::SourceLocation;

/// An immutable, named piece of GraphQL source text.
///
/// The name is carried into syntax errors so diagnostics can identify which
/// document failed when multiple documents are parsed (the default name is
/// `"GraphQL"`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Source {
    body: String,
    name: String,
}

impl Source {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            name: "GraphQL".to_string(),
        }
    }

    pub fn with_name(body: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            name: name.into(),
        }
    }

    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Maps a byte offset into this source to a 1-based (line, column)
    /// location.
    ///
    /// Every line-separator form GraphQL recognizes ends a line: LF, CR,
    /// CRLF, U+2028 (line separator), and U+2029 (paragraph separator).
    /// Offsets past the end of the body map to the position just after the
    /// final character.
    pub fn location(&self, byte_offset: usize) -> SourceLocation {
        let mut line = 1;
        let mut column = 1;
        let mut chars = self.body.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            if offset >= byte_offset {
                break;
            }
            match ch {
                '\r' => {
                    // CRLF counts as a single separator.
                    if let Some((_, '\n')) = chars.peek() {
                        let (next_offset, _) = chars.next().expect("peeked");
                        if next_offset >= byte_offset {
                            break;
                        }
                    }
                    line += 1;
                    column = 1;
                }
                '\n' | '\u{2028}' | '\u{2029}' => {
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
        }
        SourceLocation::new(line, column)
    }

    /// Splits the body on every recognized line separator.
    ///
    /// Used by [`SyntaxError`](crate::SyntaxError) to render the excerpt
    /// around a failure.
    pub(crate) fn lines(&self) -> Vec<&str> {
        let mut lines = vec![];
        let mut line_start = 0;
        let mut chars = self.body.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\r' => {
                    lines.push(&self.body[line_start..offset]);
                    if let Some((_, '\n')) = chars.peek() {
                        chars.next();
                    }
                    line_start = chars.peek().map_or(self.body.len(), |(o, _)| *o);
                }
                '\n' | '\u{2028}' | '\u{2029}' => {
                    lines.push(&self.body[line_start..offset]);
                    line_start = offset + ch.len_utf8();
                }
                _ => {}
            }
        }
        lines.push(&self.body[line_start..]);
        lines
    }
}

impl From<&str> for Source {
    fn from(body: &str) -> Self {
        Source::new(body)
    }
}

impl From<String> for Source {
    fn from(body: String) -> Self {
        Source::new(body)
    }
}
