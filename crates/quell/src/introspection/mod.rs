//! The introspection sub-schema: `__Schema`, `__Type`, and friends.
//!
//! These are ordinary object and enum types whose resolvers read the type
//! system through small view values, so introspection queries run through
//! the executor unchanged. The whole sub-schema is built once per process
//! and merged into every schema's type map at build time.

use crate::Value;
use crate::resolve::Resolved;
use crate::schema::Schema;
use crate::types::Argument;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::Field;
use crate::types::InputField;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::types::TypeDef;
use crate::values::ast_from_value;
use lazy_static::lazy_static;
use quell_parser::printer::print_value;

lazy_static! {
    static ref META_TYPES: Vec<TypeDef> = vec![
        TypeDef::Object(build_schema_type()),
        TypeDef::Object(build_type_type()),
        TypeDef::Object(build_field_type()),
        TypeDef::Object(build_input_value_type()),
        TypeDef::Object(build_enum_value_type()),
        TypeDef::Object(build_directive_type()),
        TypeDef::Enum(build_type_kind_type()),
    ];
    static ref SCHEMA_META_FIELD: Field =
        Field::new("__schema", TypeAnnotation::non_null("__Schema"))
            .with_description("Access the current type schema of this server.")
            .resolve(|_params| Ok(Resolved::opaque(SchemaView)));
    static ref TYPE_META_FIELD: Field =
        Field::new("__type", TypeAnnotation::named("__Type"))
            .with_description("Request the type information of a single type.")
            .argument(Argument::new("name", TypeAnnotation::non_null("String")))
            .resolve(|params| {
                let Some(name) = params.arg("name").and_then(|value| value.as_str())
                else {
                    return Ok(Resolved::null());
                };
                if params.info.schema.get_type(name).is_some() {
                    Ok(Resolved::opaque(TypeView::Named(name.to_string())))
                } else {
                    Ok(Resolved::null())
                }
            });
    static ref TYPENAME_META_FIELD: Field =
        Field::new("__typename", TypeAnnotation::non_null("String"))
            .with_description("The name of the current Object type at runtime.")
            .resolve(|params| {
                Ok(Resolved::Value(Value::String(
                    params.info.parent_type_name.to_string(),
                )))
            });
}

/// The introspection types merged into every schema.
pub(crate) fn meta_types() -> &'static [TypeDef] {
    META_TYPES.as_slice()
}

pub(crate) fn schema_meta_field() -> &'static Field {
    &SCHEMA_META_FIELD
}

pub(crate) fn type_meta_field() -> &'static Field {
    &TYPE_META_FIELD
}

pub(crate) fn type_name_meta_field() -> &'static Field {
    &TYPENAME_META_FIELD
}

// =============================================================================
// View values carried through the executor as opaque sources
// =============================================================================

/// Marker for the schema itself (the `__schema` source).
#[derive(Clone, Debug)]
struct SchemaView;

/// A `__Type` instance: a named type or a modifier wrapper around one.
#[derive(Clone, Debug)]
enum TypeView {
    Named(String),
    List(Box<TypeView>),
    NonNull(Box<TypeView>),
}

impl TypeView {
    /// Expands an annotation's nullability flags into the wrapper shape
    /// introspection exposes.
    fn from_annotation(annotation: &TypeAnnotation) -> TypeView {
        let (base, nullable) = match annotation {
            TypeAnnotation::Named(named) => {
                (TypeView::Named(named.name().to_string()), named.nullable())
            }
            TypeAnnotation::List(list) => (
                TypeView::List(Box::new(TypeView::from_annotation(list.inner()))),
                list.nullable(),
            ),
        };
        if nullable {
            base
        } else {
            TypeView::NonNull(Box::new(base))
        }
    }
}

/// A `__Field` instance, identified by parent type and field name.
#[derive(Clone, Debug)]
struct FieldView {
    parent_type: String,
    field_name: String,
}

/// A `__InputValue` instance (argument or input-object field), carrying
/// copies of everything its resolvers need.
#[derive(Clone, Debug)]
struct InputValueView {
    name: String,
    description: Option<String>,
    annotation: TypeAnnotation,
    default: Option<Value>,
}

impl InputValueView {
    fn from_argument(argument: &Argument) -> Self {
        Self {
            name: argument.name().to_string(),
            description: argument.description().map(str::to_string),
            annotation: argument.type_annotation().clone(),
            default: argument.default().cloned(),
        }
    }

    fn from_input_field(field: &InputField) -> Self {
        Self {
            name: field.name().to_string(),
            description: field.description().map(str::to_string),
            annotation: field.type_annotation().clone(),
            default: field.default().cloned(),
        }
    }
}

/// A `__EnumValue` instance.
#[derive(Clone, Debug)]
struct EnumValueView {
    name: String,
    description: Option<String>,
    deprecation_reason: Option<String>,
}

/// A `__Directive` instance, identified by name.
#[derive(Clone, Debug)]
struct DirectiveView {
    name: String,
}

fn optional_string(value: Option<&str>) -> Resolved {
    match value {
        Some(text) => Resolved::Value(Value::String(text.to_string())),
        None => Resolved::null(),
    }
}

fn field_view_def<'a>(schema: &'a Schema, view: &FieldView) -> Option<&'a Field> {
    match schema.get_type(view.parent_type.as_str())? {
        TypeDef::Object(object) => object.field(view.field_name.as_str()),
        TypeDef::Interface(interface) => interface.field(view.field_name.as_str()),
        _ => None,
    }
}

// =============================================================================
// Meta type definitions
// =============================================================================

fn build_schema_type() -> ObjectType {
    ObjectType::builder("__Schema")
        .description(
            "A GraphQL Schema defines the capabilities of a GraphQL server. It \
             exposes all available types and directives on the server, as well \
             as the entry points for query, mutation, and subscription \
             operations.",
        )
        .field(
            Field::new(
                "types",
                TypeAnnotation::non_null_list_of(TypeAnnotation::non_null("__Type")),
            )
            .with_description("A list of all types supported by this server.")
            .resolve(|params| {
                Ok(Resolved::List(
                    params
                        .info
                        .schema
                        .type_map()
                        .keys()
                        .map(|name| Resolved::opaque(TypeView::Named(name.clone())))
                        .collect(),
                ))
            }),
        )
        .field(
            Field::new("queryType", TypeAnnotation::non_null("__Type"))
                .with_description("The type that query operations will be rooted at.")
                .resolve(|params| {
                    Ok(Resolved::opaque(TypeView::Named(
                        params.info.schema.query_type().name().to_string(),
                    )))
                }),
        )
        .field(
            Field::new("mutationType", TypeAnnotation::named("__Type"))
                .with_description(
                    "If this server supports mutation, the type that mutation \
                     operations will be rooted at.",
                )
                .resolve(|params| {
                    Ok(match params.info.schema.mutation_type() {
                        Some(mutation) => {
                            Resolved::opaque(TypeView::Named(mutation.name().to_string()))
                        }
                        None => Resolved::null(),
                    })
                }),
        )
        .field(
            Field::new("subscriptionType", TypeAnnotation::named("__Type"))
                .with_description(
                    "If this server supports subscription, the type that \
                     subscription operations will be rooted at.",
                )
                .resolve(|params| {
                    Ok(match params.info.schema.subscription_type() {
                        Some(subscription) => Resolved::opaque(TypeView::Named(
                            subscription.name().to_string(),
                        )),
                        None => Resolved::null(),
                    })
                }),
        )
        .field(
            Field::new(
                "directives",
                TypeAnnotation::non_null_list_of(TypeAnnotation::non_null("__Directive")),
            )
            .with_description("A list of all directives supported by this server.")
            .resolve(|params| {
                Ok(Resolved::List(
                    params
                        .info
                        .schema
                        .directives()
                        .iter()
                        .map(|directive| {
                            Resolved::opaque(DirectiveView {
                                name: directive.name().to_string(),
                            })
                        })
                        .collect(),
                ))
            }),
        )
        .build()
}

fn build_type_type() -> ObjectType {
    ObjectType::builder("__Type")
        .field(
            Field::new("kind", TypeAnnotation::non_null("__TypeKind")).resolve(|params| {
                let Some(view) = params.source.downcast_ref::<TypeView>() else {
                    return Ok(Resolved::null());
                };
                let kind = match view {
                    TypeView::NonNull(_) => "NON_NULL",
                    TypeView::List(_) => "LIST",
                    TypeView::Named(name) => {
                        match params.info.schema.get_type(name.as_str()) {
                            Some(def) => def.kind().as_str(),
                            None => return Ok(Resolved::null()),
                        }
                    }
                };
                Ok(Resolved::Value(Value::String(kind.to_string())))
            }),
        )
        .field(
            Field::new("name", TypeAnnotation::named("String")).resolve(|params| {
                Ok(match params.source.downcast_ref::<TypeView>() {
                    Some(TypeView::Named(name)) => {
                        Resolved::Value(Value::String(name.clone()))
                    }
                    _ => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new("description", TypeAnnotation::named("String")).resolve(|params| {
                Ok(match params.source.downcast_ref::<TypeView>() {
                    Some(TypeView::Named(name)) => optional_string(
                        params
                            .info
                            .schema
                            .get_type(name.as_str())
                            .and_then(|def| def.description()),
                    ),
                    _ => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new(
                "fields",
                TypeAnnotation::list_of(TypeAnnotation::non_null("__Field")),
            )
            .argument(
                Argument::new("includeDeprecated", TypeAnnotation::named("Boolean"))
                    .default_value(Value::Boolean(false)),
            )
            .resolve(|params| {
                let include_deprecated = params
                    .arg("includeDeprecated")
                    .and_then(|value| value.as_bool())
                    .unwrap_or(false);
                let Some(TypeView::Named(name)) =
                    params.source.downcast_ref::<TypeView>()
                else {
                    return Ok(Resolved::null());
                };
                let fields = match params.info.schema.get_type(name.as_str()) {
                    Some(TypeDef::Object(object)) => object.fields(),
                    Some(TypeDef::Interface(interface)) => interface.fields(),
                    _ => return Ok(Resolved::null()),
                };
                Ok(Resolved::List(
                    fields
                        .values()
                        .filter(|field| include_deprecated || !field.is_deprecated())
                        .map(|field| {
                            Resolved::opaque(FieldView {
                                parent_type: name.clone(),
                                field_name: field.name().to_string(),
                            })
                        })
                        .collect(),
                ))
            }),
        )
        .field(
            Field::new(
                "interfaces",
                TypeAnnotation::list_of(TypeAnnotation::non_null("__Type")),
            )
            .resolve(|params| {
                let Some(TypeView::Named(name)) =
                    params.source.downcast_ref::<TypeView>()
                else {
                    return Ok(Resolved::null());
                };
                match params.info.schema.get_type(name.as_str()) {
                    Some(TypeDef::Object(object)) => Ok(Resolved::List(
                        object
                            .interfaces()
                            .iter()
                            .map(|interface| {
                                Resolved::opaque(TypeView::Named(interface.clone()))
                            })
                            .collect(),
                    )),
                    _ => Ok(Resolved::null()),
                }
            }),
        )
        .field(
            Field::new(
                "possibleTypes",
                TypeAnnotation::list_of(TypeAnnotation::non_null("__Type")),
            )
            .resolve(|params| {
                let Some(TypeView::Named(name)) =
                    params.source.downcast_ref::<TypeView>()
                else {
                    return Ok(Resolved::null());
                };
                match params.info.schema.get_type(name.as_str()) {
                    Some(def) if def.is_abstract() => Ok(Resolved::List(
                        params
                            .info
                            .schema
                            .possible_types(name.as_str())
                            .iter()
                            .map(|object| {
                                Resolved::opaque(TypeView::Named(
                                    object.name().to_string(),
                                ))
                            })
                            .collect(),
                    )),
                    _ => Ok(Resolved::null()),
                }
            }),
        )
        .field(
            Field::new(
                "enumValues",
                TypeAnnotation::list_of(TypeAnnotation::non_null("__EnumValue")),
            )
            .argument(
                Argument::new("includeDeprecated", TypeAnnotation::named("Boolean"))
                    .default_value(Value::Boolean(false)),
            )
            .resolve(|params| {
                let include_deprecated = params
                    .arg("includeDeprecated")
                    .and_then(|value| value.as_bool())
                    .unwrap_or(false);
                let Some(TypeView::Named(name)) =
                    params.source.downcast_ref::<TypeView>()
                else {
                    return Ok(Resolved::null());
                };
                match params.info.schema.get_type(name.as_str()) {
                    Some(TypeDef::Enum(enum_type)) => Ok(Resolved::List(
                        enum_type
                            .values()
                            .values()
                            .filter(|value| include_deprecated || !value.is_deprecated())
                            .map(|value| {
                                Resolved::opaque(EnumValueView {
                                    name: value.name().to_string(),
                                    description: value.description().map(str::to_string),
                                    deprecation_reason: value
                                        .deprecation_reason()
                                        .map(str::to_string),
                                })
                            })
                            .collect(),
                    )),
                    _ => Ok(Resolved::null()),
                }
            }),
        )
        .field(
            Field::new(
                "inputFields",
                TypeAnnotation::list_of(TypeAnnotation::non_null("__InputValue")),
            )
            .resolve(|params| {
                let Some(TypeView::Named(name)) =
                    params.source.downcast_ref::<TypeView>()
                else {
                    return Ok(Resolved::null());
                };
                match params.info.schema.get_type(name.as_str()) {
                    Some(TypeDef::InputObject(input_object)) => Ok(Resolved::List(
                        input_object
                            .fields()
                            .values()
                            .map(|field| {
                                Resolved::opaque(InputValueView::from_input_field(field))
                            })
                            .collect(),
                    )),
                    _ => Ok(Resolved::null()),
                }
            }),
        )
        .field(
            Field::new("ofType", TypeAnnotation::named("__Type")).resolve(|params| {
                Ok(match params.source.downcast_ref::<TypeView>() {
                    Some(TypeView::NonNull(inner)) | Some(TypeView::List(inner)) => {
                        Resolved::opaque(inner.as_ref().clone())
                    }
                    _ => Resolved::null(),
                })
            }),
        )
        .build()
}

fn build_field_type() -> ObjectType {
    ObjectType::builder("__Field")
        .field(
            Field::new("name", TypeAnnotation::non_null("String")).resolve(|params| {
                Ok(match params.source.downcast_ref::<FieldView>() {
                    Some(view) => Resolved::Value(Value::String(view.field_name.clone())),
                    None => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new("description", TypeAnnotation::named("String")).resolve(|params| {
                let Some(view) = params.source.downcast_ref::<FieldView>() else {
                    return Ok(Resolved::null());
                };
                Ok(optional_string(
                    field_view_def(params.info.schema, view)
                        .and_then(|field| field.description()),
                ))
            }),
        )
        .field(
            Field::new(
                "args",
                TypeAnnotation::non_null_list_of(TypeAnnotation::non_null("__InputValue")),
            )
            .resolve(|params| {
                let Some(view) = params.source.downcast_ref::<FieldView>() else {
                    return Ok(Resolved::List(vec![]));
                };
                let arguments = field_view_def(params.info.schema, view)
                    .map(|field| field.arguments())
                    .unwrap_or_default();
                Ok(Resolved::List(
                    arguments
                        .iter()
                        .map(|argument| {
                            Resolved::opaque(InputValueView::from_argument(argument))
                        })
                        .collect(),
                ))
            }),
        )
        .field(
            Field::new("type", TypeAnnotation::non_null("__Type")).resolve(|params| {
                let Some(view) = params.source.downcast_ref::<FieldView>() else {
                    return Ok(Resolved::null());
                };
                Ok(match field_view_def(params.info.schema, view) {
                    Some(field) => Resolved::opaque(TypeView::from_annotation(
                        field.type_annotation(),
                    )),
                    None => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new("isDeprecated", TypeAnnotation::non_null("Boolean")).resolve(
                |params| {
                    let Some(view) = params.source.downcast_ref::<FieldView>() else {
                        return Ok(Resolved::Value(Value::Boolean(false)));
                    };
                    Ok(Resolved::Value(Value::Boolean(
                        field_view_def(params.info.schema, view)
                            .is_some_and(|field| field.is_deprecated()),
                    )))
                },
            ),
        )
        .field(
            Field::new("deprecationReason", TypeAnnotation::named("String")).resolve(
                |params| {
                    let Some(view) = params.source.downcast_ref::<FieldView>() else {
                        return Ok(Resolved::null());
                    };
                    Ok(optional_string(
                        field_view_def(params.info.schema, view)
                            .and_then(|field| field.deprecation_reason()),
                    ))
                },
            ),
        )
        .build()
}

fn build_input_value_type() -> ObjectType {
    ObjectType::builder("__InputValue")
        .field(
            Field::new("name", TypeAnnotation::non_null("String")).resolve(|params| {
                Ok(match params.source.downcast_ref::<InputValueView>() {
                    Some(view) => Resolved::Value(Value::String(view.name.clone())),
                    None => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new("description", TypeAnnotation::named("String")).resolve(|params| {
                Ok(match params.source.downcast_ref::<InputValueView>() {
                    Some(view) => optional_string(view.description.as_deref()),
                    None => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new("type", TypeAnnotation::non_null("__Type")).resolve(|params| {
                Ok(match params.source.downcast_ref::<InputValueView>() {
                    Some(view) => {
                        Resolved::opaque(TypeView::from_annotation(&view.annotation))
                    }
                    None => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new("defaultValue", TypeAnnotation::named("String")).resolve(|params| {
                let Some(view) = params.source.downcast_ref::<InputValueView>() else {
                    return Ok(Resolved::null());
                };
                Ok(match &view.default {
                    // The printed form of the declared default, exactly as
                    // the printer renders it.
                    Some(default) => Resolved::Value(Value::String(print_value(
                        &ast_from_value(default),
                    ))),
                    None => Resolved::null(),
                })
            }),
        )
        .build()
}

fn build_enum_value_type() -> ObjectType {
    ObjectType::builder("__EnumValue")
        .field(
            Field::new("name", TypeAnnotation::non_null("String")).resolve(|params| {
                Ok(match params.source.downcast_ref::<EnumValueView>() {
                    Some(view) => Resolved::Value(Value::String(view.name.clone())),
                    None => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new("description", TypeAnnotation::named("String")).resolve(|params| {
                Ok(match params.source.downcast_ref::<EnumValueView>() {
                    Some(view) => optional_string(view.description.as_deref()),
                    None => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new("isDeprecated", TypeAnnotation::non_null("Boolean")).resolve(
                |params| {
                    Ok(Resolved::Value(Value::Boolean(
                        params
                            .source
                            .downcast_ref::<EnumValueView>()
                            .is_some_and(|view| view.deprecation_reason.is_some()),
                    )))
                },
            ),
        )
        .field(
            Field::new("deprecationReason", TypeAnnotation::named("String")).resolve(
                |params| {
                    Ok(match params.source.downcast_ref::<EnumValueView>() {
                        Some(view) => optional_string(view.deprecation_reason.as_deref()),
                        None => Resolved::null(),
                    })
                },
            ),
        )
        .build()
}

fn build_directive_type() -> ObjectType {
    ObjectType::builder("__Directive")
        .field(
            Field::new("name", TypeAnnotation::non_null("String")).resolve(|params| {
                Ok(match params.source.downcast_ref::<DirectiveView>() {
                    Some(view) => Resolved::Value(Value::String(view.name.clone())),
                    None => Resolved::null(),
                })
            }),
        )
        .field(
            Field::new("description", TypeAnnotation::named("String")).resolve(|params| {
                let Some(view) = params.source.downcast_ref::<DirectiveView>() else {
                    return Ok(Resolved::null());
                };
                Ok(optional_string(
                    params
                        .info
                        .schema
                        .directive(view.name.as_str())
                        .and_then(|directive| directive.description()),
                ))
            }),
        )
        .field(
            Field::new(
                "args",
                TypeAnnotation::non_null_list_of(TypeAnnotation::non_null("__InputValue")),
            )
            .resolve(|params| {
                let Some(view) = params.source.downcast_ref::<DirectiveView>() else {
                    return Ok(Resolved::List(vec![]));
                };
                let arguments = params
                    .info
                    .schema
                    .directive(view.name.as_str())
                    .map(|directive| directive.arguments())
                    .unwrap_or_default();
                Ok(Resolved::List(
                    arguments
                        .iter()
                        .map(|argument| {
                            Resolved::opaque(InputValueView::from_argument(argument))
                        })
                        .collect(),
                ))
            }),
        )
        .field(directive_location_flag("onOperation", |directive| {
            directive.allows_operation()
        }))
        .field(directive_location_flag("onFragment", |directive| {
            directive.allows_fragment()
        }))
        .field(directive_location_flag("onField", |directive| {
            directive.allows_field()
        }))
        .build()
}

fn directive_location_flag(
    name: &'static str,
    flag: impl Fn(&crate::types::DirectiveDef) -> bool + Send + Sync + 'static,
) -> Field {
    Field::new(name, TypeAnnotation::non_null("Boolean")).resolve(move |params| {
        let Some(view) = params.source.downcast_ref::<DirectiveView>() else {
            return Ok(Resolved::Value(Value::Boolean(false)));
        };
        Ok(Resolved::Value(Value::Boolean(
            params
                .info
                .schema
                .directive(view.name.as_str())
                .is_some_and(&flag),
        )))
    })
}

fn build_type_kind_type() -> EnumType {
    EnumType::builder("__TypeKind")
        .description("An enum describing what kind of type a given __Type is.")
        .value(
            EnumValue::new("SCALAR").with_description("Indicates this type is a scalar."),
        )
        .value(EnumValue::new("OBJECT").with_description(
            "Indicates this type is an object. `fields` and `interfaces` are \
             valid fields.",
        ))
        .value(EnumValue::new("INTERFACE").with_description(
            "Indicates this type is an interface. `fields` and `possibleTypes` \
             are valid fields.",
        ))
        .value(EnumValue::new("UNION").with_description(
            "Indicates this type is a union. `possibleTypes` is a valid field.",
        ))
        .value(EnumValue::new("ENUM").with_description(
            "Indicates this type is an enum. `enumValues` is a valid field.",
        ))
        .value(EnumValue::new("INPUT_OBJECT").with_description(
            "Indicates this type is an input object. `inputFields` is a valid \
             field.",
        ))
        .value(EnumValue::new("LIST").with_description(
            "Indicates this type is a list. `ofType` is a valid field.",
        ))
        .value(EnumValue::new("NON_NULL").with_description(
            "Indicates this type is a non-null. `ofType` is a valid field.",
        ))
        .build()
}
