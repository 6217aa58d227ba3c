//! Inward value coercion: variables, arguments, and literals.
//!
//! All functions here run before or during field resolution; outward
//! (serialization) coercion lives on the scalar and enum types
//! themselves.

use crate::Value;
use crate::execute::ExecutionError;
use crate::resolve::FieldError;
use crate::schema::Schema;
use crate::types::Argument;
use crate::types::TypeAnnotation;
use crate::types::TypeDef;
use indexmap::IndexMap;
use quell_parser::ast;
use std::collections::HashMap;

#[cfg(test)]
mod tests;

/// Builds the coerced variable map for an operation.
///
/// Fails on the first variable that does not conform to its declared
/// type; per the execution contract the whole request then returns
/// `{ data: null, errors: [...] }` without invoking any resolver.
pub(crate) fn variable_values(
    schema: &Schema,
    definitions: &[ast::VariableDefinition],
    inputs: &IndexMap<String, Value>,
) -> Result<IndexMap<String, Value>, ExecutionError> {
    let mut values = IndexMap::new();
    for definition in definitions {
        let name = definition.variable.name.as_str();
        let input = inputs.get(name);
        let value = variable_value(schema, definition, input)?;
        values.insert(name.to_string(), value);
    }
    Ok(values)
}

fn variable_value(
    schema: &Schema,
    definition: &ast::VariableDefinition,
    input: Option<&Value>,
) -> Result<Value, ExecutionError> {
    let name = definition.variable.name.as_str();
    let annotation = TypeAnnotation::from_ast(&definition.annotation);
    let locations = definition
        .loc
        .as_ref()
        .and_then(|loc| loc.source_location())
        .into_iter()
        .collect::<Vec<_>>();

    let inner_is_input = schema
        .get_type(annotation.innermost_name())
        .is_some_and(|def| def.is_input_type());
    if !inner_is_input {
        return Err(ExecutionError::with_locations(
            format!(
                "Variable \"${name}\" expected value of type \"{annotation}\" which \
                 cannot be used as an input type.",
            ),
            locations,
        ));
    }

    let input = input.unwrap_or(&Value::Null);
    if is_valid_input_value(input, &annotation, schema) {
        if input.is_null()
            && let Some(default) = &definition.default_value
        {
            let empty = IndexMap::new();
            return Ok(
                value_from_ast(Some(default), &annotation, schema, &empty)
                    .unwrap_or(Value::Null),
            );
        }
        return Ok(coerce_input_value(input, &annotation, schema));
    }

    if input.is_null() {
        return Err(ExecutionError::with_locations(
            format!("Variable \"${name}\" of required type \"{annotation}\" was not provided."),
            locations,
        ));
    }

    let serialized =
        serde_json::to_string(&input.to_json()).unwrap_or_else(|_| "null".to_string());
    Err(ExecutionError::with_locations(
        format!(
            "Variable \"${name}\" expected value of type \"{annotation}\" but got: \
             {serialized}.",
        ),
        locations,
    ))
}

/// Builds the coerced argument map for one field (or directive)
/// application: explicit literal first (with variables substituted), then
/// declared default, else omitted. A missing non-null argument is an
/// error.
pub(crate) fn argument_values(
    definitions: &[Argument],
    arguments: &[ast::Argument],
    schema: &Schema,
    variables: &IndexMap<String, Value>,
) -> Result<IndexMap<String, Value>, FieldError> {
    let provided: HashMap<&str, &ast::Value> = arguments
        .iter()
        .map(|argument| (argument.name.as_str(), &argument.value))
        .collect();

    let mut values = IndexMap::new();
    for definition in definitions {
        let name = definition.name();
        let annotation = definition.type_annotation();
        let value = value_from_ast(
            provided.get(name).copied(),
            annotation,
            schema,
            variables,
        );
        let value = match value {
            Some(Value::Null) | None => definition.default().cloned(),
            some => some,
        };
        match value {
            Some(value) => {
                values.insert(name.to_string(), value);
            }
            None if !annotation.nullable() => {
                return Err(FieldError::new(format!(
                    "Argument \"{name}\" of required type \"{annotation}\" was not \
                     provided.",
                )));
            }
            None => {}
        }
    }
    Ok(values)
}

/// Whether `value` conforms to `annotation` without coercion errors.
pub(crate) fn is_valid_input_value(
    value: &Value,
    annotation: &TypeAnnotation,
    schema: &Schema,
) -> bool {
    if value.is_null() {
        return annotation.nullable();
    }

    match annotation {
        TypeAnnotation::List(list) => match value {
            Value::List(items) => items
                .iter()
                .all(|item| is_valid_input_value(item, list.inner(), schema)),
            // A single value coerces to a one-element list.
            single => is_valid_input_value(single, list.inner(), schema),
        },
        TypeAnnotation::Named(named) => {
            let Some(type_def) = schema.get_type(named.name()) else {
                return false;
            };
            match type_def {
                TypeDef::InputObject(input_object) => {
                    let Some(fields) = value.as_object() else {
                        return false;
                    };
                    // Unknown keys are rejected.
                    if fields
                        .keys()
                        .any(|key| input_object.field(key.as_str()).is_none())
                    {
                        return false;
                    }
                    input_object.fields().values().all(|field| {
                        match fields.get(field.name()) {
                            Some(provided) => is_valid_input_value(
                                provided,
                                field.type_annotation(),
                                schema,
                            ),
                            None => {
                                field.type_annotation().nullable()
                                    || field.default().is_some()
                            }
                        }
                    })
                }
                TypeDef::Scalar(scalar) => scalar.parse_value(value).is_some(),
                TypeDef::Enum(enum_type) => enum_type.parse_value(value).is_some(),
                _ => false,
            }
        }
    }
}

/// Coerces a value already checked by [`is_valid_input_value`].
pub(crate) fn coerce_input_value(
    value: &Value,
    annotation: &TypeAnnotation,
    schema: &Schema,
) -> Value {
    if value.is_null() {
        return Value::Null;
    }

    match annotation {
        TypeAnnotation::List(list) => match value {
            Value::List(items) => Value::List(
                items
                    .iter()
                    .map(|item| coerce_input_value(item, list.inner(), schema))
                    .collect(),
            ),
            single => Value::List(vec![coerce_input_value(single, list.inner(), schema)]),
        },
        TypeAnnotation::Named(named) => {
            let Some(type_def) = schema.get_type(named.name()) else {
                return Value::Null;
            };
            match type_def {
                TypeDef::InputObject(input_object) => {
                    let provided = value.as_object();
                    let mut coerced = IndexMap::new();
                    for field in input_object.fields().values() {
                        match provided.and_then(|fields| fields.get(field.name())) {
                            Some(field_value) => {
                                coerced.insert(
                                    field.name().to_string(),
                                    coerce_input_value(
                                        field_value,
                                        field.type_annotation(),
                                        schema,
                                    ),
                                );
                            }
                            None => {
                                if let Some(default) = field.default() {
                                    coerced.insert(
                                        field.name().to_string(),
                                        default.clone(),
                                    );
                                }
                            }
                        }
                    }
                    Value::Object(coerced)
                }
                TypeDef::Scalar(scalar) => scalar.parse_value(value).unwrap_or(Value::Null),
                TypeDef::Enum(enum_type) => {
                    enum_type.parse_value(value).unwrap_or(Value::Null)
                }
                _ => Value::Null,
            }
        }
    }
}

/// Produces an internal value from an AST literal under a target type,
/// substituting variables. `None` means "no usable value" (absent, or not
/// coercible) — the caller decides between defaults and errors.
pub(crate) fn value_from_ast(
    literal: Option<&ast::Value>,
    annotation: &TypeAnnotation,
    schema: &Schema,
    variables: &IndexMap<String, Value>,
) -> Option<Value> {
    let literal = literal?;

    if let ast::Value::Variable(variable) = literal {
        return variables.get(variable.name.as_str()).cloned();
    }
    if let ast::Value::Null(_) = literal {
        return Some(Value::Null);
    }

    match annotation {
        TypeAnnotation::List(list) => match literal {
            ast::Value::List(items) => Some(Value::List(
                items
                    .values
                    .iter()
                    .map(|item| {
                        value_from_ast(Some(item), list.inner(), schema, variables)
                            .unwrap_or(Value::Null)
                    })
                    .collect(),
            )),
            single => value_from_ast(Some(single), list.inner(), schema, variables)
                .map(|value| Value::List(vec![value])),
        },
        TypeAnnotation::Named(named) => {
            let type_def = schema.get_type(named.name())?;
            match type_def {
                TypeDef::InputObject(input_object) => {
                    let ast::Value::Object(object) = literal else {
                        return None;
                    };
                    let mut coerced = IndexMap::new();
                    for field in input_object.fields().values() {
                        let provided = object
                            .fields
                            .iter()
                            .find(|entry| entry.name.as_str() == field.name())
                            .map(|entry| &entry.value);
                        let value = value_from_ast(
                            provided,
                            field.type_annotation(),
                            schema,
                            variables,
                        )
                        .or_else(|| field.default().cloned());
                        if let Some(value) = value {
                            coerced.insert(field.name().to_string(), value);
                        }
                    }
                    Some(Value::Object(coerced))
                }
                TypeDef::Scalar(scalar) => scalar.parse_literal(literal),
                TypeDef::Enum(enum_type) => enum_type.parse_literal(literal),
                _ => None,
            }
        }
    }
}

/// Produces the AST form of an internal value, used to print default
/// values for introspection.
pub(crate) fn ast_from_value(value: &Value) -> ast::Value {
    match value {
        Value::Null => ast::Value::Null(ast::NullValue { loc: None }),
        Value::Boolean(b) => ast::Value::Boolean(ast::BooleanValue {
            value: *b,
            loc: None,
        }),
        Value::Int(i) => ast::Value::Int(ast::IntValue {
            value: i.to_string(),
            loc: None,
        }),
        Value::Float(f) => ast::Value::Float(ast::FloatValue {
            value: f.to_string(),
            loc: None,
        }),
        Value::String(s) => ast::Value::String(ast::StringValue {
            value: s.clone(),
            loc: None,
        }),
        Value::Enum(name) => ast::Value::Enum(ast::EnumValue {
            value: name.clone(),
            loc: None,
        }),
        Value::List(items) => ast::Value::List(ast::ListValue {
            values: items.iter().map(ast_from_value).collect(),
            loc: None,
        }),
        Value::Object(fields) => ast::Value::Object(ast::ObjectValue {
            fields: fields
                .iter()
                .map(|(key, value)| ast::ObjectField {
                    name: ast::Name::new(key.clone(), None),
                    value: ast_from_value(value),
                    loc: None,
                })
                .collect(),
            loc: None,
        }),
    }
}
