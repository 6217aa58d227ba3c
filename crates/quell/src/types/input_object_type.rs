use crate::types::InputField;
use indexmap::IndexMap;

/// An input-object type definition: an ordered map of input fields.
#[derive(Clone, Debug)]
pub struct InputObjectType {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, InputField>,
}

impl InputObjectType {
    pub fn builder(name: impl Into<String>) -> InputObjectTypeBuilder {
        InputObjectTypeBuilder {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, InputField> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.fields.get(name)
    }
}

/// Builder for [`InputObjectType`].
#[derive(Debug)]
pub struct InputObjectTypeBuilder {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, InputField>,
}

impl InputObjectTypeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: InputField) -> Self {
        self.fields.insert(field.name().to_string(), field);
        self
    }

    pub fn build(self) -> InputObjectType {
        InputObjectType {
            name: self.name,
            description: self.description,
            fields: self.fields,
        }
    }
}
