use crate::resolve::FieldError;
use crate::resolve::ResolveParams;
use crate::resolve::Resolved;
use crate::resolve::Resolver;
use crate::types::Argument;
use crate::types::TypeAnnotation;

/// A field defined on an [`ObjectType`](crate::types::ObjectType) or
/// [`InterfaceType`](crate::types::InterfaceType).
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    description: Option<String>,
    annotation: TypeAnnotation,
    arguments: Vec<Argument>,
    resolver: Option<Resolver>,
    deprecation_reason: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, annotation: TypeAnnotation) -> Self {
        Self {
            name: name.into(),
            description: None,
            annotation,
            arguments: vec![],
            resolver: None,
            deprecation_reason: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a declared argument. Argument order is preserved and is the
    /// order introspection reports.
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Sets the resolver invoked for this field. Fields without a resolver
    /// fall back to the default by-name lookup on the source value.
    pub fn resolve(
        mut self,
        resolver: impl Fn(ResolveParams<'_>) -> Result<Resolved, FieldError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.resolver = Some(Resolver::new(resolver));
        self
    }

    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.annotation
    }

    pub fn arguments(&self) -> &[Argument] {
        self.arguments.as_slice()
    }

    pub fn find_argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|argument| argument.name() == name)
    }

    pub fn resolver(&self) -> Option<&Resolver> {
        self.resolver.as_ref()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation_reason.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }
}
