use crate::Value;
use crate::types::TypeAnnotation;

/// A declared field of an
/// [`InputObjectType`](crate::types::InputObjectType).
#[derive(Clone, Debug)]
pub struct InputField {
    name: String,
    description: Option<String>,
    annotation: TypeAnnotation,
    default: Option<Value>,
}

impl InputField {
    pub fn new(name: impl Into<String>, annotation: TypeAnnotation) -> Self {
        Self {
            name: name.into(),
            description: None,
            annotation,
            default: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
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

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}
