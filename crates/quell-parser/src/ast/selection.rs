use crate::ast::AstLocation;
use crate::ast::FragmentSpread;
use crate::ast::InlineFragment;
use crate::ast::Name;
use crate::ast::Value;

/// A braced group of selections.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
    pub loc: Option<AstLocation>,
}

/// One entry in a selection set.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

/// A field selection: `alias: name(args) @directives { selections }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: Option<SelectionSet>,
    pub loc: Option<AstLocation>,
}

impl Field {
    /// The key this field contributes to in the response: its alias when
    /// present, else its name.
    pub fn response_key(&self) -> &str {
        self.alias
            .as_ref()
            .map_or(self.name.as_str(), |alias| alias.as_str())
    }
}

/// A single `name: value` argument.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub value: Value,
    pub loc: Option<AstLocation>,
}

/// A directive applied to a node: `@name(args)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub loc: Option<AstLocation>,
}
