use crate::types::EnumType;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::UnionType;

/// A named type definition.
#[derive(Clone, Debug)]
pub enum TypeDef {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Scalar(def) => def.name(),
            TypeDef::Object(def) => def.name(),
            TypeDef::Interface(def) => def.name(),
            TypeDef::Union(def) => def.name(),
            TypeDef::Enum(def) => def.name(),
            TypeDef::InputObject(def) => def.name(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDef::Scalar(def) => def.description(),
            TypeDef::Object(def) => def.description(),
            TypeDef::Interface(def) => def.description(),
            TypeDef::Union(def) => def.description(),
            TypeDef::Enum(def) => def.description(),
            TypeDef::InputObject(def) => def.description(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDef::Scalar(_) => TypeKind::Scalar,
            TypeDef::Object(_) => TypeKind::Object,
            TypeDef::Interface(_) => TypeKind::Interface,
            TypeDef::Union(_) => TypeKind::Union,
            TypeDef::Enum(_) => TypeKind::Enum,
            TypeDef::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Valid as the innermost type of a field's output annotation.
    pub fn is_output_type(&self) -> bool {
        !matches!(self, TypeDef::InputObject(_))
    }

    /// Valid as the innermost type of an argument or input-field
    /// annotation.
    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            TypeDef::Scalar(_) | TypeDef::Enum(_) | TypeDef::InputObject(_),
        )
    }

    /// Interface or union.
    pub fn is_abstract(&self) -> bool {
        matches!(self, TypeDef::Interface(_) | TypeDef::Union(_))
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        if let TypeDef::Object(def) = self {
            Some(def)
        } else {
            None
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceType> {
        if let TypeDef::Interface(def) = self {
            Some(def)
        } else {
            None
        }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        if let TypeDef::Union(def) = self {
            Some(def)
        } else {
            None
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        if let TypeDef::Enum(def) = self {
            Some(def)
        } else {
            None
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        if let TypeDef::Scalar(def) = self {
            Some(def)
        } else {
            None
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        if let TypeDef::InputObject(def) = self {
            Some(def)
        } else {
            None
        }
    }
}

impl From<ScalarType> for TypeDef {
    fn from(def: ScalarType) -> Self {
        TypeDef::Scalar(def)
    }
}

impl From<ObjectType> for TypeDef {
    fn from(def: ObjectType) -> Self {
        TypeDef::Object(def)
    }
}

impl From<InterfaceType> for TypeDef {
    fn from(def: InterfaceType) -> Self {
        TypeDef::Interface(def)
    }
}

impl From<UnionType> for TypeDef {
    fn from(def: UnionType) -> Self {
        TypeDef::Union(def)
    }
}

impl From<EnumType> for TypeDef {
    fn from(def: EnumType) -> Self {
        TypeDef::Enum(def)
    }
}

impl From<InputObjectType> for TypeDef {
    fn from(def: InputObjectType) -> Self {
        TypeDef::InputObject(def)
    }
}

/// The kind of a named type, as introspection reports it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
        }
    }
}
