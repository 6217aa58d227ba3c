use crate::ast::AstLocation;
use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::ast::SelectionSet;
use crate::ast::TypeAnnotation;
use crate::ast::Value;
use crate::ast::Variable;

/// Which kind of operation a definition describes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation definition, named or anonymous.
///
/// A bare top-level selection set parses as an anonymous query.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    pub name: Option<Name>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub loc: Option<AstLocation>,
}

impl OperationDefinition {
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().map(|name| name.as_str())
    }
}

/// A declared operation variable: `$name: Type = default`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub variable: Variable,
    pub annotation: TypeAnnotation,
    pub default_value: Option<Value>,
    pub loc: Option<AstLocation>,
}
