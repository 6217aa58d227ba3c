use crate::ast::AstLocation;
use crate::ast::Name;

/// A type reference as written in a document: `Named`, `[Inner]`, or
/// `Inner!`.
///
/// The grammar guarantees `NonNull` never directly wraps another `NonNull`.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation {
    Named(NamedTypeAnnotation),
    List(ListTypeAnnotation),
    NonNull(NonNullTypeAnnotation),
}

impl TypeAnnotation {
    /// The innermost named type this annotation refers to.
    pub fn innermost_name(&self) -> &str {
        match self {
            TypeAnnotation::Named(named) => named.name.as_str(),
            TypeAnnotation::List(list) => list.inner.innermost_name(),
            TypeAnnotation::NonNull(non_null) => non_null.inner.innermost_name(),
        }
    }

    pub fn loc(&self) -> Option<&AstLocation> {
        match self {
            TypeAnnotation::Named(named) => named.loc.as_ref(),
            TypeAnnotation::List(list) => list.loc.as_ref(),
            TypeAnnotation::NonNull(non_null) => non_null.loc.as_ref(),
        }
    }
}

/// A bare named type reference.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeAnnotation {
    pub name: Name,
    pub loc: Option<AstLocation>,
}

/// A list type reference: `[Inner]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ListTypeAnnotation {
    pub inner: Box<TypeAnnotation>,
    pub loc: Option<AstLocation>,
}

/// A non-null type reference: `Inner!` where `Inner` is named or a list.
#[derive(Clone, Debug, PartialEq)]
pub struct NonNullTypeAnnotation {
    pub inner: Box<TypeAnnotation>,
    pub loc: Option<AstLocation>,
}
