use crate::ast::AstLocation;
use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::ast::SelectionSet;

/// A named fragment definition:
/// `fragment Name on Type @directives { selections }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub name: Name,
    pub type_condition: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub loc: Option<AstLocation>,
}

/// A fragment spread: `...Name @directives`.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub loc: Option<AstLocation>,
}

/// An inline fragment: `... on Type @directives { selections }`; the type
/// condition is optional.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<Name>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub loc: Option<AstLocation>,
}
