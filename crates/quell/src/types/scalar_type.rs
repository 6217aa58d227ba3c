use crate::Value;
use quell_parser::ast;
use std::sync::Arc;

type SerializeFn = dyn Fn(&Value) -> Option<Value> + Send + Sync;
type ParseValueFn = dyn Fn(&Value) -> Option<Value> + Send + Sync;
type ParseLiteralFn = dyn Fn(&ast::Value) -> Option<Value> + Send + Sync;

/// A scalar type definition.
///
/// `serialize` turns internal values into wire values and is mandatory.
/// The two input parsers are optional as a pair: a scalar that accepts
/// variable or literal input must provide both (the schema builder
/// enforces this).
///
/// All three functions signal "not coercible" by returning `None`; they
/// never panic.
#[derive(Clone)]
pub struct ScalarType {
    name: String,
    description: Option<String>,
    serialize: Arc<SerializeFn>,
    parse_value: Option<Arc<ParseValueFn>>,
    parse_literal: Option<Arc<ParseLiteralFn>>,
}

impl ScalarType {
    pub fn new(
        name: impl Into<String>,
        serialize: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            serialize: Arc::new(serialize),
            parse_value: None,
            parse_literal: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Installs the variable-input parser.
    pub fn value_parser(
        mut self,
        parse: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.parse_value = Some(Arc::new(parse));
        self
    }

    /// Installs the AST-literal parser.
    pub fn literal_parser(
        mut self,
        parse: impl Fn(&ast::Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.parse_literal = Some(Arc::new(parse));
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Serializes an internal value outward; `None` means unrepresentable.
    pub fn serialize(&self, value: &Value) -> Option<Value> {
        (self.serialize)(value)
    }

    /// Coerces a variable input inward; `None` means not coercible (or no
    /// parser installed).
    pub fn parse_value(&self, value: &Value) -> Option<Value> {
        self.parse_value.as_ref().and_then(|parse| parse(value))
    }

    /// Coerces an AST literal inward; `None` means not coercible (or no
    /// parser installed).
    pub fn parse_literal(&self, literal: &ast::Value) -> Option<Value> {
        self.parse_literal.as_ref().and_then(|parse| parse(literal))
    }

    /// Whether the input-parser pair is complete, partial, or absent:
    /// `(has_value_parser, has_literal_parser)`.
    pub(crate) fn input_parsers(&self) -> (bool, bool) {
        (self.parse_value.is_some(), self.parse_literal.is_some())
    }
}

impl std::fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
