use crate::ast::AstLocation;
use crate::ast::Name;

/// A literal (or variable) value appearing in a document.
///
/// Numeric literals keep their raw source text; interpreting them is a
/// coercion concern, not a parsing one.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(Variable),
    Int(IntValue),
    Float(FloatValue),
    String(StringValue),
    Boolean(BooleanValue),
    Null(NullValue),
    Enum(EnumValue),
    List(ListValue),
    Object(ObjectValue),
}

impl Value {
    pub fn loc(&self) -> Option<&AstLocation> {
        match self {
            Value::Variable(v) => v.loc.as_ref(),
            Value::Int(v) => v.loc.as_ref(),
            Value::Float(v) => v.loc.as_ref(),
            Value::String(v) => v.loc.as_ref(),
            Value::Boolean(v) => v.loc.as_ref(),
            Value::Null(v) => v.loc.as_ref(),
            Value::Enum(v) => v.loc.as_ref(),
            Value::List(v) => v.loc.as_ref(),
            Value::Object(v) => v.loc.as_ref(),
        }
    }
}

/// A variable reference: `$name`.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: Name,
    pub loc: Option<AstLocation>,
}

/// An integer literal, stored as raw source text.
#[derive(Clone, Debug, PartialEq)]
pub struct IntValue {
    pub value: String,
    pub loc: Option<AstLocation>,
}

impl IntValue {
    pub fn as_i64(&self) -> Option<i64> {
        self.value.parse().ok()
    }
}

/// A float literal, stored as raw source text.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatValue {
    pub value: String,
    pub loc: Option<AstLocation>,
}

impl FloatValue {
    pub fn as_f64(&self) -> Option<f64> {
        self.value.parse().ok()
    }
}

/// A string literal, stored with escapes already processed.
#[derive(Clone, Debug, PartialEq)]
pub struct StringValue {
    pub value: String,
    pub loc: Option<AstLocation>,
}

/// `true` or `false`.
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanValue {
    pub value: bool,
    pub loc: Option<AstLocation>,
}

/// The `null` literal.
#[derive(Clone, Debug, PartialEq)]
pub struct NullValue {
    pub loc: Option<AstLocation>,
}

/// An enum literal: any name other than `true`, `false`, or `null`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    pub value: String,
    pub loc: Option<AstLocation>,
}

/// A list literal: `[a, b, c]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ListValue {
    pub values: Vec<Value>,
    pub loc: Option<AstLocation>,
}

/// An input-object literal: `{ key: value, ... }`.
///
/// Field keys are unique per literal; the parser rejects duplicates.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    pub fields: Vec<ObjectField>,
    pub loc: Option<AstLocation>,
}

/// One `key: value` entry of an input-object literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    pub name: Name,
    pub value: Value,
    pub loc: Option<AstLocation>,
}
