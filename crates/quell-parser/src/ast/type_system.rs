use crate::ast::AstLocation;
use crate::ast::Name;
use crate::ast::TypeAnnotation;
use crate::ast::Value;

/// A type-system definition appearing in a document.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeSystemDefinition {
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Scalar(ScalarTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
    TypeExtension(TypeExtension),
}

/// `type Name implements A B { fields }`
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub name: Name,
    pub interfaces: Vec<Name>,
    pub fields: Vec<FieldDefinition>,
    pub loc: Option<AstLocation>,
}

/// A single field declaration within an object or interface definition.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub annotation: TypeAnnotation,
    pub loc: Option<AstLocation>,
}

/// An argument or input-field declaration: `name: Type = default`.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub name: Name,
    pub annotation: TypeAnnotation,
    pub default_value: Option<Value>,
    pub loc: Option<AstLocation>,
}

/// `interface Name { fields }`
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition {
    pub name: Name,
    pub fields: Vec<FieldDefinition>,
    pub loc: Option<AstLocation>,
}

/// `union Name = A | B`
#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub name: Name,
    pub members: Vec<Name>,
    pub loc: Option<AstLocation>,
}

/// `scalar Name`
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub name: Name,
    pub loc: Option<AstLocation>,
}

/// `enum Name { VALUES }`
#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub name: Name,
    pub values: Vec<EnumValueDefinition>,
    pub loc: Option<AstLocation>,
}

/// One declared value of an enum definition.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub name: Name,
    pub loc: Option<AstLocation>,
}

/// `input Name { fields }`
#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub name: Name,
    pub fields: Vec<InputValueDefinition>,
    pub loc: Option<AstLocation>,
}

/// `extend type Name { fields }` — a wrapper around the extended object
/// definition.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeExtension {
    pub definition: ObjectTypeDefinition,
    pub loc: Option<AstLocation>,
}
