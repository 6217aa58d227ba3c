use crate::Value;
use indexmap::IndexMap;
use quell_parser::ast;

/// An enum type definition: an ordered set of named values, each with an
/// internal value.
///
/// Lookup works in both directions: by name (input coercion) and by
/// internal value (output serialization).
#[derive(Clone, Debug)]
pub struct EnumType {
    name: String,
    description: Option<String>,
    values: IndexMap<String, EnumValue>,
}

impl EnumType {
    pub fn builder(name: impl Into<String>) -> EnumTypeBuilder {
        EnumTypeBuilder {
            name: name.into(),
            description: None,
            values: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn values(&self) -> &IndexMap<String, EnumValue> {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.get(name)
    }

    /// Finds the declared value whose internal value equals `internal`.
    pub fn value_for_internal(&self, internal: &Value) -> Option<&EnumValue> {
        self.values.values().find(|value| value.value == *internal)
    }

    /// Serializes an internal value to its declared name.
    pub fn serialize(&self, internal: &Value) -> Option<Value> {
        // Resolvers commonly return the name itself rather than the
        // internal value; accept both.
        if let Some(name) = internal.as_str()
            && self.values.contains_key(name)
        {
            return Some(Value::Enum(name.to_string()));
        }
        self.value_for_internal(internal)
            .map(|value| Value::Enum(value.name.clone()))
    }

    /// Coerces a variable input (the value's name) to the internal value.
    pub fn parse_value(&self, input: &Value) -> Option<Value> {
        let name = input.as_str()?;
        self.values.get(name).map(|value| value.value.clone())
    }

    /// Coerces an enum literal to the internal value.
    pub fn parse_literal(&self, literal: &ast::Value) -> Option<Value> {
        if let ast::Value::Enum(enum_value) = literal {
            self.values
                .get(enum_value.value.as_str())
                .map(|value| value.value.clone())
        } else {
            None
        }
    }
}

/// One declared value of an [`EnumType`].
#[derive(Clone, Debug)]
pub struct EnumValue {
    name: String,
    value: Value,
    description: Option<String>,
    deprecation_reason: Option<String>,
}

impl EnumValue {
    /// A value whose internal form defaults to its own name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: Value::String(name.clone()),
            name,
            description: None,
            deprecation_reason: None,
        }
    }

    /// Overrides the internal value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation_reason.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }
}

/// Builder for [`EnumType`].
#[derive(Debug)]
pub struct EnumTypeBuilder {
    name: String,
    description: Option<String>,
    values: IndexMap<String, EnumValue>,
}

impl EnumTypeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn value(mut self, value: EnumValue) -> Self {
        self.values.insert(value.name.clone(), value);
        self
    }

    pub fn build(self) -> EnumType {
        EnumType {
            name: self.name,
            description: self.description,
            values: self.values,
        }
    }
}
