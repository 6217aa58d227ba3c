use quell_parser::ast;

/// A schema-side type reference with its `List`/`NonNull` modifiers.
///
/// Non-nullability is encoded as a flag on each layer rather than as a
/// wrapper variant, which makes a `NonNull(NonNull(T))` unrepresentable by
/// construction. The referenced type is held by name and dereferenced
/// against the owning [`Schema`](crate::schema::Schema).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeAnnotation {
    Named(NamedTypeAnnotation),
    List(ListTypeAnnotation),
}

impl TypeAnnotation {
    /// A nullable reference to a named type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeAnnotation::Named(NamedTypeAnnotation {
            name: name.into(),
            nullable: true,
        })
    }

    /// A non-null reference to a named type: `Name!`.
    pub fn non_null(name: impl Into<String>) -> Self {
        TypeAnnotation::Named(NamedTypeAnnotation {
            name: name.into(),
            nullable: false,
        })
    }

    /// A nullable list: `[Inner]`.
    pub fn list_of(inner: TypeAnnotation) -> Self {
        TypeAnnotation::List(ListTypeAnnotation {
            inner: Box::new(inner),
            nullable: true,
        })
    }

    /// A non-null list: `[Inner]!`.
    pub fn non_null_list_of(inner: TypeAnnotation) -> Self {
        TypeAnnotation::List(ListTypeAnnotation {
            inner: Box::new(inner),
            nullable: false,
        })
    }

    pub fn nullable(&self) -> bool {
        match self {
            TypeAnnotation::Named(named) => named.nullable,
            TypeAnnotation::List(list) => list.nullable,
        }
    }

    /// The innermost named type this annotation refers to.
    pub fn innermost_name(&self) -> &str {
        match self {
            TypeAnnotation::Named(named) => named.name.as_str(),
            TypeAnnotation::List(list) => list.inner.innermost_name(),
        }
    }

    pub fn as_list(&self) -> Option<&ListTypeAnnotation> {
        if let TypeAnnotation::List(list) = self {
            Some(list)
        } else {
            None
        }
    }

    pub fn as_named(&self) -> Option<&NamedTypeAnnotation> {
        if let TypeAnnotation::Named(named) = self {
            Some(named)
        } else {
            None
        }
    }

    /// Converts an AST type reference (which models non-nullability as a
    /// wrapper) into the flag encoding.
    pub fn from_ast(ast_annotation: &ast::TypeAnnotation) -> Self {
        Self::from_ast_impl(ast_annotation, /* nullable = */ true)
    }

    fn from_ast_impl(ast_annotation: &ast::TypeAnnotation, nullable: bool) -> Self {
        match ast_annotation {
            ast::TypeAnnotation::Named(named) => TypeAnnotation::Named(NamedTypeAnnotation {
                name: named.name.value.clone(),
                nullable,
            }),
            ast::TypeAnnotation::List(list) => TypeAnnotation::List(ListTypeAnnotation {
                inner: Box::new(Self::from_ast(&list.inner)),
                nullable,
            }),
            ast::TypeAnnotation::NonNull(non_null) => {
                Self::from_ast_impl(&non_null.inner, false)
            }
        }
    }
}

impl std::fmt::Display for TypeAnnotation {
    /// Renders GraphQL notation, e.g. `[Episode!]!`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Named(named) => {
                write!(f, "{}", named.name)?;
                if !named.nullable {
                    write!(f, "!")?;
                }
            }
            TypeAnnotation::List(list) => {
                write!(f, "[{}]", list.inner)?;
                if !list.nullable {
                    write!(f, "!")?;
                }
            }
        }
        Ok(())
    }
}

/// A reference to a named type, plus nullability.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamedTypeAnnotation {
    pub(crate) name: String,
    pub(crate) nullable: bool,
}

impl NamedTypeAnnotation {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}

/// A list modifier around an inner annotation, plus nullability of the
/// list itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListTypeAnnotation {
    pub(crate) inner: Box<TypeAnnotation>,
    pub(crate) nullable: bool,
}

impl ListTypeAnnotation {
    pub fn inner(&self) -> &TypeAnnotation {
        &self.inner
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}
