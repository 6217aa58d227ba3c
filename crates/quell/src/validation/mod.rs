//! Static validation of query documents against a schema.
//!
//! This is an extension point: the runtime ships no built-in rules, and
//! the executor accepts pre-validated documents unchanged. Callers (or
//! higher layers) install [`ValidationRule`]s to reject documents before
//! execution.

use crate::schema::Schema;
use quell_parser::SourceLocation;
use quell_parser::ast;
use serde::Serialize;

/// A static check failure for a document that is syntactically valid but
/// not executable against the schema.
#[derive(Clone, Debug, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
        }
    }

    pub fn with_locations(
        message: impl Into<String>,
        locations: Vec<SourceLocation>,
    ) -> Self {
        Self {
            message: message.into(),
            locations,
        }
    }
}

/// One static rule checked against a document.
pub trait ValidationRule: Send + Sync {
    /// A short rule name for diagnostics.
    fn name(&self) -> &str;

    fn check(&self, schema: &Schema, document: &ast::Document) -> Vec<ValidationError>;
}

/// Validates a document with the default rule set.
///
/// The default set is empty; an empty result therefore means "not
/// rejected", not "proven valid".
pub fn validate(schema: &Schema, document: &ast::Document) -> Vec<ValidationError> {
    validate_with_rules(schema, document, &[])
}

/// Validates a document with caller-supplied rules, concatenating every
/// rule's findings.
pub fn validate_with_rules(
    schema: &Schema,
    document: &ast::Document,
    rules: &[Box<dyn ValidationRule>],
) -> Vec<ValidationError> {
    let mut errors = vec![];
    for rule in rules {
        let found = rule.check(schema, document);
        if !found.is_empty() {
            tracing::debug!(rule = rule.name(), count = found.len(), "validation rule failed");
        }
        errors.extend(found);
    }
    errors
}
