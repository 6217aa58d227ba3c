//! The canonical query-language AST.
//!
//! Every node carries a `loc: Option<AstLocation>` which the parser fills
//! unless disabled via [`ParseOptions`](crate::ParseOptions). Nodes are plain
//! data: the parser produces them, the printer renders them, and the runtime
//! walks them.

mod document;
mod fragment;
mod location;
mod name;
mod operation;
mod selection;
mod type_annotation;
mod type_system;
mod value;

pub use document::Definition;
pub use document::Document;
pub use fragment::FragmentDefinition;
pub use fragment::FragmentSpread;
pub use fragment::InlineFragment;
pub use location::AstLocation;
pub use name::Name;
pub use operation::OperationDefinition;
pub use operation::OperationKind;
pub use operation::VariableDefinition;
pub use selection::Argument;
pub use selection::DirectiveAnnotation;
pub use selection::Field;
pub use selection::Selection;
pub use selection::SelectionSet;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::NonNullTypeAnnotation;
pub use type_annotation::TypeAnnotation;
pub use type_system::EnumTypeDefinition;
pub use type_system::EnumValueDefinition;
pub use type_system::FieldDefinition;
pub use type_system::InputObjectTypeDefinition;
pub use type_system::InputValueDefinition;
pub use type_system::InterfaceTypeDefinition;
pub use type_system::ObjectTypeDefinition;
pub use type_system::ScalarTypeDefinition;
pub use type_system::TypeExtension;
pub use type_system::TypeSystemDefinition;
pub use type_system::UnionTypeDefinition;
pub use value::BooleanValue;
pub use value::EnumValue;
pub use value::FloatValue;
pub use value::IntValue;
pub use value::ListValue;
pub use value::NullValue;
pub use value::ObjectField;
pub use value::ObjectValue;
pub use value::StringValue;
pub use value::Value;
pub use value::Variable;
