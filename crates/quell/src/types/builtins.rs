//! The built-in scalar types and directives, constructed once per process.

use crate::Value;
use crate::types::Argument;
use crate::types::DirectiveDef;
use crate::types::ScalarType;
use crate::types::TypeAnnotation;
use lazy_static::lazy_static;
use quell_parser::ast;

/// Integers outside ±(2^53 − 1) are not representable losslessly in JSON
/// (IEEE 754 doubles), so Int coercion treats them as unrepresentable.
pub const MAX_SAFE_INT: i64 = 9_007_199_254_740_991;
pub const MIN_SAFE_INT: i64 = -9_007_199_254_740_991;

lazy_static! {
    static ref BUILTIN_SCALARS: Vec<ScalarType> = vec![
        build_int(),
        build_float(),
        build_string(),
        build_boolean(),
        build_id(),
    ];
    static ref SKIP_DIRECTIVE: DirectiveDef = DirectiveDef::new("skip")
        .with_description(
            "Directs the executor to skip this field or fragment when the `if` \
             argument is true.",
        )
        .argument(Argument::new("if", TypeAnnotation::non_null("Boolean"))
            .with_description("Skipped when true."))
        .on_operation()
        .on_fragment()
        .on_field();
    static ref INCLUDE_DIRECTIVE: DirectiveDef = DirectiveDef::new("include")
        .with_description(
            "Directs the executor to include this field or fragment only when \
             the `if` argument is true.",
        )
        .argument(Argument::new("if", TypeAnnotation::non_null("Boolean"))
            .with_description("Included when true."))
        .on_operation()
        .on_fragment()
        .on_field();
}

/// The five built-in scalars: Int, Float, String, Boolean, ID.
pub fn builtin_scalars() -> &'static [ScalarType] {
    BUILTIN_SCALARS.as_slice()
}

pub fn skip_directive() -> &'static DirectiveDef {
    &SKIP_DIRECTIVE
}

pub fn include_directive() -> &'static DirectiveDef {
    &INCLUDE_DIRECTIVE
}

fn int_or_none(value: i64) -> Option<Value> {
    if (MIN_SAFE_INT..=MAX_SAFE_INT).contains(&value) {
        Some(Value::Int(value))
    } else {
        None
    }
}

fn coerce_int(value: &Value) -> Option<Value> {
    match value {
        Value::Boolean(b) => Some(Value::Int(if *b { 1 } else { 0 })),
        Value::Int(i) => int_or_none(*i),
        Value::Float(f) => {
            if f.is_finite() {
                int_or_none(*f as i64)
            } else {
                None
            }
        }
        Value::String(s) => {
            let parsed: f64 = s.parse().ok()?;
            coerce_int(&Value::Float(parsed))
        }
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<Value> {
    match value {
        Value::Boolean(b) => Some(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Int(i) => Some(Value::Float(*i as f64)),
        Value::Float(f) => Some(Value::Float(*f)),
        Value::String(s) => s.parse().ok().map(Value::Float),
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Enum(s) => Some(Value::String(s.clone())),
        Value::Int(i) => Some(Value::String(i.to_string())),
        Value::Float(f) => Some(Value::String(f.to_string())),
        Value::Boolean(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

fn coerce_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Boolean(b) => Some(Value::Boolean(*b)),
        Value::String(s) => Some(Value::Boolean(!matches!(s.as_str(), "" | "false"))),
        Value::Int(i) => Some(Value::Boolean(*i != 0)),
        Value::Float(f) => Some(Value::Boolean(*f != 0.0)),
        _ => None,
    }
}

fn build_int() -> ScalarType {
    ScalarType::new("Int", coerce_int)
        .with_description(
            "The `Int` scalar type represents non-fractional signed whole numeric \
             values safely representable in JSON.",
        )
        .value_parser(coerce_int)
        .literal_parser(|literal| match literal {
            ast::Value::Int(int) => int.as_i64().and_then(int_or_none),
            _ => None,
        })
}

fn build_float() -> ScalarType {
    ScalarType::new("Float", coerce_float)
        .with_description(
            "The `Float` scalar type represents signed double-precision \
             fractional values as specified by IEEE 754.",
        )
        .value_parser(coerce_float)
        .literal_parser(|literal| match literal {
            ast::Value::Float(float) => float.as_f64().map(Value::Float),
            ast::Value::Int(int) => int.as_i64().map(|i| Value::Float(i as f64)),
            _ => None,
        })
}

fn build_string() -> ScalarType {
    ScalarType::new("String", coerce_string)
        .with_description(
            "The `String` scalar type represents textual data, represented as \
             UTF-8 character sequences.",
        )
        .value_parser(coerce_string)
        .literal_parser(|literal| match literal {
            ast::Value::String(string) => Some(Value::String(string.value.clone())),
            _ => None,
        })
}

fn build_boolean() -> ScalarType {
    ScalarType::new("Boolean", coerce_boolean)
        .with_description("The `Boolean` scalar type represents `true` or `false`.")
        .value_parser(coerce_boolean)
        .literal_parser(|literal| match literal {
            ast::Value::Boolean(boolean) => Some(Value::Boolean(boolean.value)),
            _ => None,
        })
}

fn build_id() -> ScalarType {
    ScalarType::new("ID", coerce_string)
        .with_description(
            "The `ID` scalar type represents a unique identifier. It serializes \
             like a String but accepts both numeric and string input.",
        )
        .value_parser(coerce_string)
        .literal_parser(|literal| match literal {
            ast::Value::String(string) => Some(Value::String(string.value.clone())),
            ast::Value::Int(int) => Some(Value::String(int.value.clone())),
            _ => None,
        })
}
