use crate::resolve::Resolved;
use crate::types::interface_type::ResolveTypeFn;
use std::sync::Arc;

/// A union type definition: a non-empty list of member object type names.
#[derive(Clone)]
pub struct UnionType {
    name: String,
    description: Option<String>,
    members: Vec<String>,
    resolve_type: Option<Arc<ResolveTypeFn>>,
}

impl UnionType {
    pub fn builder(name: impl Into<String>) -> UnionTypeBuilder {
        UnionTypeBuilder {
            name: name.into(),
            description: None,
            members: vec![],
            resolve_type: None,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn members(&self) -> &[String] {
        self.members.as_slice()
    }

    pub fn has_member(&self, object_name: &str) -> bool {
        self.members.iter().any(|member| member == object_name)
    }

    pub fn has_resolve_type(&self) -> bool {
        self.resolve_type.is_some()
    }

    pub fn resolve_type(&self, value: &Resolved) -> Option<Option<String>> {
        self.resolve_type.as_ref().map(|resolve| resolve(value))
    }
}

impl std::fmt::Debug for UnionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionType")
            .field("name", &self.name)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

/// Builder for [`UnionType`].
pub struct UnionTypeBuilder {
    name: String,
    description: Option<String>,
    members: Vec<String>,
    resolve_type: Option<Arc<ResolveTypeFn>>,
}

impl UnionTypeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a member object type by name.
    pub fn member(mut self, object_name: impl Into<String>) -> Self {
        self.members.push(object_name.into());
        self
    }

    pub fn resolve_type(
        mut self,
        resolve: impl Fn(&Resolved) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.resolve_type = Some(Arc::new(resolve));
        self
    }

    pub fn build(self) -> UnionType {
        UnionType {
            name: self.name,
            description: self.description,
            members: self.members,
            resolve_type: self.resolve_type,
        }
    }
}
