//! The language layer of the `quell` GraphQL runtime: source handling,
//! lexing, parsing, and printing.
//!
//! The central entry point is [`parse`] (or [`parse_with_options`]), which
//! turns a [`Source`] into an [`ast::Document`] or fails with a
//! [`SyntaxError`]:
//!
//! ```
//! let doc = quell_parser::parse("{ hero { name } }").unwrap();
//! assert_eq!(doc.definitions.len(), 1);
//! ```

pub mod ast;
mod lexer;
mod parser;
pub mod printer;
mod source;
mod source_location;
mod syntax_error;
pub mod token;

pub use lexer::Lexer;
pub use parser::ParseOptions;
pub use parser::parse;
pub use parser::parse_with_options;
pub use source::Source;
pub use source_location::SourceLocation;
pub use syntax_error::SyntaxError;

#[cfg(test)]
mod tests;
