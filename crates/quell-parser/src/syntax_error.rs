use crate::Source;
use crate::SourceLocation;

/// A lexer or parser failure.
///
/// Carries the source name, the byte position of the failure, its resolved
/// (line, column), and a short description. The rendered form follows the
/// fixed diagnostic format:
///
/// ```text
/// Syntax Error GraphQL (1:5) Unexpected character "?".
///
/// 1: { ?
///        ^
/// ```
///
/// The excerpt shows up to one line of context on either side of the failing
/// line, with a caret under the failing column.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    source_name: String,
    position: usize,
    location: SourceLocation,
    description: String,
    message: String,
}

impl SyntaxError {
    pub fn new(source: &Source, position: usize, description: impl Into<String>) -> Self {
        let description = description.into();
        let location = source.location(position);
        let message = format!(
            "Syntax Error {} ({}) {}\n\n{}",
            source.name(),
            location,
            description,
            highlight_source_at_location(source, location),
        );
        Self {
            source_name: source.name().to_string(),
            position,
            location,
            description,
            message,
        }
    }

    /// The name of the [`Source`] that failed to parse.
    pub fn source_name(&self) -> &str {
        self.source_name.as_str()
    }

    /// The byte offset at which lexing or parsing failed.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The failure position resolved to a 1-based (line, column).
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// The bare description, without the `Syntax Error ...` prefix or the
    /// source excerpt.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Renders up to three source lines around `location` with a caret marking
/// the failing column.
fn highlight_source_at_location(source: &Source, location: SourceLocation) -> String {
    let lines = source.lines();
    let line = location.line;
    let pad_len = format!("{}", line + 1).len();
    let mut highlight = String::new();
    if line >= 2 {
        highlight.push_str(&format!(
            "{:>pad$}: {}\n",
            line - 1,
            lines[line - 2],
            pad = pad_len,
        ));
    }
    highlight.push_str(&format!("{:>pad$}: {}\n", line, lines[line - 1], pad = pad_len));
    highlight.push_str(&" ".repeat(1 + pad_len + location.column));
    highlight.push_str("^\n");
    if line < lines.len() {
        highlight.push_str(&format!("{:>pad$}: {}\n", line + 1, lines[line], pad = pad_len));
    }
    highlight
}
