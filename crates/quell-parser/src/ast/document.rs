use crate::ast::AstLocation;
use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::ast::TypeSystemDefinition;

/// A parsed GraphQL document: a non-empty, ordered sequence of definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
    pub loc: Option<AstLocation>,
}

impl Document {
    /// All operation definitions in the document, in source order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            _ => None,
        })
    }

    /// All fragment definitions in the document, in source order.
    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(frag) => Some(frag),
            _ => None,
        })
    }
}

/// A single top-level definition.
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    TypeSystem(TypeSystemDefinition),
}
