use crate::resolve::Resolved;
use crate::types::Field;
use indexmap::IndexMap;
use std::sync::Arc;

type IsTypeOfFn = dyn Fn(&Resolved) -> bool + Send + Sync;

/// An object type definition: an ordered field map, the interfaces it
/// implements (by name), and an optional `is_type_of` predicate used to
/// identify instances during abstract-type resolution.
#[derive(Clone)]
pub struct ObjectType {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, Field>,
    interfaces: Vec<String>,
    is_type_of: Option<Arc<IsTypeOfFn>>,
}

impl ObjectType {
    pub fn builder(name: impl Into<String>) -> ObjectTypeBuilder {
        ObjectTypeBuilder {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
            interfaces: vec![],
            is_type_of: None,
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

    pub fn interfaces(&self) -> &[String] {
        self.interfaces.as_slice()
    }

    pub fn has_is_type_of(&self) -> bool {
        self.is_type_of.is_some()
    }

    /// Applies the `is_type_of` predicate, if one was installed.
    pub fn is_type_of(&self, value: &Resolved) -> Option<bool> {
        self.is_type_of.as_ref().map(|predicate| predicate(value))
    }
}

impl std::fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("interfaces", &self.interfaces)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ObjectType`].
pub struct ObjectTypeBuilder {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, Field>,
    interfaces: Vec<String>,
    is_type_of: Option<Arc<IsTypeOfFn>>,
}

impl ObjectTypeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field; declaration order is response order for
    /// introspection.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.insert(field.name().to_string(), field);
        self
    }

    /// Declares that this object implements the named interface.
    pub fn implements(mut self, interface_name: impl Into<String>) -> Self {
        self.interfaces.push(interface_name.into());
        self
    }

    pub fn is_type_of(
        mut self,
        predicate: impl Fn(&Resolved) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_type_of = Some(Arc::new(predicate));
        self
    }

    pub fn build(self) -> ObjectType {
        ObjectType {
            name: self.name,
            description: self.description,
            fields: self.fields,
            interfaces: self.interfaces,
            is_type_of: self.is_type_of,
        }
    }
}
