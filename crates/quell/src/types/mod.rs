//! The type system: named type definitions, modifiers, and the builders
//! user code assembles schemas from.

mod argument;
mod builtins;
mod directive;
mod enum_type;
mod field;
mod input_field;
mod input_object_type;
mod interface_type;
mod object_type;
mod scalar_type;
mod type_annotation;
mod type_def;
mod union_type;

pub use argument::Argument;
pub use builtins::MAX_SAFE_INT;
pub use builtins::MIN_SAFE_INT;
pub use builtins::builtin_scalars;
pub use builtins::include_directive;
pub use builtins::skip_directive;
pub use directive::DirectiveDef;
pub use enum_type::EnumType;
pub use enum_type::EnumTypeBuilder;
pub use enum_type::EnumValue;
pub use field::Field;
pub use input_field::InputField;
pub use input_object_type::InputObjectType;
pub use input_object_type::InputObjectTypeBuilder;
pub use interface_type::InterfaceType;
pub use interface_type::InterfaceTypeBuilder;
pub use object_type::ObjectType;
pub use object_type::ObjectTypeBuilder;
pub use scalar_type::ScalarType;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::TypeAnnotation;
pub use type_def::TypeDef;
pub use type_def::TypeKind;
pub use union_type::UnionType;
pub use union_type::UnionTypeBuilder;

#[cfg(test)]
mod tests;
