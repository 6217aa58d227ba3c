use crate::resolve::Resolved;
use crate::types::Field;
use indexmap::IndexMap;
use std::sync::Arc;

pub(crate) type ResolveTypeFn = dyn Fn(&Resolved) -> Option<String> + Send + Sync;

/// An interface type definition.
///
/// `possible_types` is filled in by the schema builder from the objects
/// that declare this interface; it is empty until the schema is built.
#[derive(Clone)]
pub struct InterfaceType {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, Field>,
    resolve_type: Option<Arc<ResolveTypeFn>>,
    possible_types: Vec<String>,
}

impl InterfaceType {
    pub fn builder(name: impl Into<String>) -> InterfaceTypeBuilder {
        InterfaceTypeBuilder {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
            resolve_type: None,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Names of the object types implementing this interface. Filled by
    /// the schema builder.
    pub fn possible_types(&self) -> &[String] {
        self.possible_types.as_slice()
    }

    pub fn has_resolve_type(&self) -> bool {
        self.resolve_type.is_some()
    }

    /// Applies the `resolve_type` function, if one was installed.
    pub fn resolve_type(&self, value: &Resolved) -> Option<Option<String>> {
        self.resolve_type.as_ref().map(|resolve| resolve(value))
    }

    pub(crate) fn record_possible_type(&mut self, object_name: String) {
        if !self.possible_types.contains(&object_name) {
            self.possible_types.push(object_name);
        }
    }
}

impl std::fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("possible_types", &self.possible_types)
            .finish_non_exhaustive()
    }
}

/// Builder for [`InterfaceType`].
pub struct InterfaceTypeBuilder {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, Field>,
    resolve_type: Option<Arc<ResolveTypeFn>>,
}

impl InterfaceTypeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.insert(field.name().to_string(), field);
        self
    }

    /// Installs a function mapping an instance to its concrete object type
    /// name. Without it, every possible type must provide `is_type_of`.
    pub fn resolve_type(
        mut self,
        resolve: impl Fn(&Resolved) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.resolve_type = Some(Arc::new(resolve));
        self
    }

    pub fn build(self) -> InterfaceType {
        InterfaceType {
            name: self.name,
            description: self.description,
            fields: self.fields,
            resolve_type: self.resolve_type,
            possible_types: vec![],
        }
    }
}
