use crate::introspection;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::types::DirectiveDef;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::types::TypeDef;
use crate::types::builtin_scalars;
use crate::types::include_directive;
use crate::types::skip_directive;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Collects root types, additional named types, and custom directives,
/// then materializes and validates a [`Schema`].
///
/// Types reference each other by name (so cyclic shapes like
/// object → interface → object need no special handling); every name
/// mentioned anywhere must correspond to a registered type, a root, or a
/// built-in, or `build` fails.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    query: Option<ObjectType>,
    mutation: Option<ObjectType>,
    subscription: Option<ObjectType>,
    directives: Vec<DirectiveDef>,
    registered: Vec<TypeDef>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the (required) query root type.
    pub fn query(mut self, query: ObjectType) -> Self {
        self.query = Some(query);
        self
    }

    pub fn mutation(mut self, mutation: ObjectType) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn subscription(mut self, subscription: ObjectType) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Adds a custom directive definition. `@skip` and `@include` are
    /// always present.
    pub fn directive(mut self, directive: DirectiveDef) -> Self {
        self.directives.push(directive);
        self
    }

    /// Registers a named type referenced (by name) from elsewhere in the
    /// schema.
    pub fn register(mut self, type_def: impl Into<TypeDef>) -> Self {
        self.registered.push(type_def.into());
        self
    }

    pub fn build(self) -> Result<Schema> {
        let query = self.query.ok_or(SchemaBuildError::MissingQueryType)?;
        let query_name = query.name().to_string();
        let mutation_name = self.mutation.as_ref().map(|m| m.name().to_string());
        let subscription_name = self.subscription.as_ref().map(|s| s.name().to_string());

        // Assemble the full type map: roots and registered types first
        // (validated), then built-ins and the introspection sub-schema.
        let mut types: IndexMap<String, TypeDef> = IndexMap::new();
        let mut user_types: Vec<TypeDef> = vec![TypeDef::Object(query)];
        user_types.extend(self.mutation.map(TypeDef::Object));
        user_types.extend(self.subscription.map(TypeDef::Object));
        user_types.extend(self.registered);

        for type_def in user_types {
            validate_type_names(&type_def)?;
            let name = type_def.name().to_string();
            if types.contains_key(name.as_str()) {
                return Err(SchemaBuildError::DuplicateTypeDefinition { type_name: name });
            }
            types.insert(name, type_def);
        }

        for scalar in builtin_scalars() {
            if types.contains_key(scalar.name()) {
                return Err(SchemaBuildError::DuplicateTypeDefinition {
                    type_name: scalar.name().to_string(),
                });
            }
            types.insert(scalar.name().to_string(), TypeDef::Scalar(scalar.clone()));
        }

        for meta_type in introspection::meta_types() {
            types.insert(meta_type.name().to_string(), meta_type.clone());
        }

        let directives = assemble_directives(self.directives)?;

        for type_def in types.values() {
            validate_type_structure(&types, type_def)?;
        }
        for directive in &directives {
            for argument in directive.arguments() {
                validate_input_annotation(&types, argument.type_annotation()).map_err(
                    |referenced_type| SchemaBuildError::InvalidDirectiveArgumentType {
                        directive_name: directive.name().to_string(),
                        argument_name: argument.name().to_string(),
                        referenced_type,
                    },
                )?;
            }
        }

        let implementations = check_interface_conformance(&types)?;
        for (interface_name, object_name) in implementations {
            if let Some(TypeDef::Interface(interface)) = types.get_mut(interface_name.as_str())
            {
                interface.record_possible_type(object_name);
            }
        }

        check_abstract_resolvability(&types)?;

        tracing::debug!(
            types = types.len(),
            directives = directives.len(),
            query = query_name.as_str(),
            "schema built",
        );

        Ok(Schema {
            query_type: query_name,
            mutation_type: mutation_name,
            subscription_type: subscription_name,
            types,
            directives,
        })
    }
}

/// `^[_a-zA-Z][_a-zA-Z0-9]*$`
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

fn validate_type_names(type_def: &TypeDef) -> Result<()> {
    let type_name = type_def.name();
    if !is_valid_name(type_name) {
        return Err(SchemaBuildError::InvalidTypeName {
            type_name: type_name.to_string(),
        });
    }
    if type_name.starts_with("__") {
        return Err(SchemaBuildError::ReservedTypeName {
            type_name: type_name.to_string(),
        });
    }

    let invalid_member = |name: &str| SchemaBuildError::InvalidMemberName {
        type_name: type_name.to_string(),
        name: name.to_string(),
    };

    match type_def {
        TypeDef::Object(object) => {
            for field in object.fields().values() {
                if !is_valid_name(field.name()) {
                    return Err(invalid_member(field.name()));
                }
                for argument in field.arguments() {
                    if !is_valid_name(argument.name()) {
                        return Err(invalid_member(argument.name()));
                    }
                }
            }
        }
        TypeDef::Interface(interface) => {
            for field in interface.fields().values() {
                if !is_valid_name(field.name()) {
                    return Err(invalid_member(field.name()));
                }
                for argument in field.arguments() {
                    if !is_valid_name(argument.name()) {
                        return Err(invalid_member(argument.name()));
                    }
                }
            }
        }
        TypeDef::Enum(enum_type) => {
            for value in enum_type.values().values() {
                if !is_valid_name(value.name()) {
                    return Err(invalid_member(value.name()));
                }
            }
        }
        TypeDef::InputObject(input_object) => {
            for field in input_object.fields().values() {
                if !is_valid_name(field.name()) {
                    return Err(invalid_member(field.name()));
                }
            }
        }
        TypeDef::Scalar(_) | TypeDef::Union(_) => {}
    }
    Ok(())
}

fn assemble_directives(custom: Vec<DirectiveDef>) -> Result<Vec<DirectiveDef>> {
    let mut directives: Vec<DirectiveDef> = vec![];
    for directive in custom {
        if !is_valid_name(directive.name()) {
            return Err(SchemaBuildError::InvalidTypeName {
                type_name: directive.name().to_string(),
            });
        }
        if directives.iter().any(|seen| seen.name() == directive.name()) {
            return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: directive.name().to_string(),
            });
        }
        directives.push(directive);
    }
    for builtin in [skip_directive(), include_directive()] {
        if !directives.iter().any(|seen| seen.name() == builtin.name()) {
            directives.push(builtin.clone());
        }
    }
    Ok(directives)
}

/// Checks emptiness rules, type placement (output vs. input positions),
/// dangling references, union member kinds, and scalar parser pairing.
fn validate_type_structure(
    types: &IndexMap<String, TypeDef>,
    type_def: &TypeDef,
) -> Result<()> {
    let type_name = type_def.name();
    match type_def {
        TypeDef::Object(object) => {
            if object.fields().is_empty() {
                return Err(SchemaBuildError::EmptyFields {
                    type_name: type_name.to_string(),
                });
            }
            validate_field_annotations(types, type_name, object.fields().values())?;
        }
        TypeDef::Interface(interface) => {
            if interface.fields().is_empty() {
                return Err(SchemaBuildError::EmptyFields {
                    type_name: type_name.to_string(),
                });
            }
            validate_field_annotations(types, type_name, interface.fields().values())?;
        }
        TypeDef::Union(union) => {
            if union.members().is_empty() {
                return Err(SchemaBuildError::EmptyUnionMembers {
                    type_name: type_name.to_string(),
                });
            }
            for member in union.members() {
                match types.get(member.as_str()) {
                    None => {
                        return Err(SchemaBuildError::UndefinedTypeReference {
                            referenced_type: member.clone(),
                            referenced_by: type_name.to_string(),
                        });
                    }
                    Some(TypeDef::Object(_)) => {}
                    Some(_) => {
                        return Err(SchemaBuildError::UnionMemberNotAnObject {
                            type_name: type_name.to_string(),
                            member_name: member.clone(),
                        });
                    }
                }
            }
        }
        TypeDef::Enum(enum_type) => {
            if enum_type.values().is_empty() {
                return Err(SchemaBuildError::EmptyEnumValues {
                    type_name: type_name.to_string(),
                });
            }
        }
        TypeDef::InputObject(input_object) => {
            if input_object.fields().is_empty() {
                return Err(SchemaBuildError::EmptyFields {
                    type_name: type_name.to_string(),
                });
            }
            for field in input_object.fields().values() {
                validate_input_annotation(types, field.type_annotation()).map_err(
                    |referenced_type| SchemaBuildError::InvalidInputFieldType {
                        type_name: type_name.to_string(),
                        field_name: field.name().to_string(),
                        referenced_type,
                    },
                )?;
            }
        }
        TypeDef::Scalar(scalar) => match scalar.input_parsers() {
            (true, true) | (false, false) => {}
            _ => {
                return Err(SchemaBuildError::IncompleteScalarCoercion {
                    type_name: type_name.to_string(),
                });
            }
        },
    }
    Ok(())
}

fn validate_field_annotations<'a>(
    types: &IndexMap<String, TypeDef>,
    type_name: &str,
    fields: impl Iterator<Item = &'a crate::types::Field>,
) -> Result<()> {
    for field in fields {
        let referenced = field.type_annotation().innermost_name();
        match types.get(referenced) {
            None => {
                return Err(SchemaBuildError::UndefinedTypeReference {
                    referenced_type: referenced.to_string(),
                    referenced_by: format!("{}.{}", type_name, field.name()),
                });
            }
            Some(inner) if !inner.is_output_type() => {
                return Err(SchemaBuildError::InvalidOutputFieldType {
                    type_name: type_name.to_string(),
                    field_name: field.name().to_string(),
                    referenced_type: referenced.to_string(),
                });
            }
            Some(_) => {}
        }
        for argument in field.arguments() {
            validate_input_annotation(types, argument.type_annotation()).map_err(
                |referenced_type| SchemaBuildError::InvalidArgumentType {
                    type_name: type_name.to_string(),
                    field_name: field.name().to_string(),
                    argument_name: argument.name().to_string(),
                    referenced_type,
                },
            )?;
        }
    }
    Ok(())
}

/// Returns `Err(name)` when the annotation's innermost type is missing or
/// not usable in an input position.
fn validate_input_annotation(
    types: &IndexMap<String, TypeDef>,
    annotation: &TypeAnnotation,
) -> std::result::Result<(), String> {
    let referenced = annotation.innermost_name();
    match types.get(referenced) {
        Some(inner) if inner.is_input_type() => Ok(()),
        _ => Err(referenced.to_string()),
    }
}

/// Verifies every object provides each declared interface's fields with
/// equal types and identical argument lists, returning the
/// (interface, object) pairs to record.
fn check_interface_conformance(
    types: &IndexMap<String, TypeDef>,
) -> Result<Vec<(String, String)>> {
    let mut implementations = vec![];
    for type_def in types.values() {
        let TypeDef::Object(object) = type_def else {
            continue;
        };
        for interface_name in object.interfaces() {
            let interface = match types.get(interface_name.as_str()) {
                Some(TypeDef::Interface(interface)) => interface,
                Some(_) => {
                    return Err(SchemaBuildError::ImplementsNonInterface {
                        type_name: object.name().to_string(),
                        interface_name: interface_name.clone(),
                    });
                }
                None => {
                    return Err(SchemaBuildError::UndefinedTypeReference {
                        referenced_type: interface_name.clone(),
                        referenced_by: object.name().to_string(),
                    });
                }
            };
            check_object_implements(object, interface)?;
            implementations.push((interface_name.clone(), object.name().to_string()));
        }
    }
    Ok(implementations)
}

fn check_object_implements(object: &ObjectType, interface: &InterfaceType) -> Result<()> {
    for (field_name, interface_field) in interface.fields() {
        let Some(object_field) = object.field(field_name.as_str()) else {
            return Err(SchemaBuildError::MissingInterfaceField {
                type_name: object.name().to_string(),
                interface_name: interface.name().to_string(),
                field_name: field_name.clone(),
            });
        };

        if object_field.type_annotation() != interface_field.type_annotation() {
            return Err(SchemaBuildError::IncompatibleInterfaceFieldType {
                type_name: object.name().to_string(),
                interface_name: interface.name().to_string(),
                field_name: field_name.clone(),
                expected: interface_field.type_annotation().to_string(),
                found: object_field.type_annotation().to_string(),
            });
        }

        let argument_mismatch = |argument_name: &str| {
            SchemaBuildError::IncompatibleInterfaceFieldArguments {
                type_name: object.name().to_string(),
                interface_name: interface.name().to_string(),
                field_name: field_name.clone(),
                argument_name: argument_name.to_string(),
            }
        };
        for interface_argument in interface_field.arguments() {
            match object_field.find_argument(interface_argument.name()) {
                Some(object_argument)
                    if object_argument.type_annotation()
                        == interface_argument.type_annotation() => {}
                _ => return Err(argument_mismatch(interface_argument.name())),
            }
        }
        for object_argument in object_field.arguments() {
            if interface_field.find_argument(object_argument.name()).is_none() {
                return Err(argument_mismatch(object_argument.name()));
            }
        }
    }
    Ok(())
}

/// Every interface/union must be resolvable to a runtime type: either the
/// abstract type defines `resolve_type`, or every possible object type
/// defines `is_type_of`.
fn check_abstract_resolvability(types: &IndexMap<String, TypeDef>) -> Result<()> {
    let object_has_is_type_of = |name: &str| {
        types
            .get(name)
            .and_then(|def| def.as_object())
            .is_some_and(|object| object.has_is_type_of())
    };

    for type_def in types.values() {
        match type_def {
            TypeDef::Interface(interface) if !interface.has_resolve_type() => {
                // Possible types are not recorded yet at this call site's
                // first pass, so scan objects directly.
                for candidate in types.values() {
                    let TypeDef::Object(object) = candidate else {
                        continue;
                    };
                    let implements = object
                        .interfaces()
                        .iter()
                        .any(|name| name == interface.name());
                    if implements && !object.has_is_type_of() {
                        return Err(SchemaBuildError::UnresolvableAbstractType {
                            abstract_type_name: interface.name().to_string(),
                            object_type_name: object.name().to_string(),
                        });
                    }
                }
            }
            TypeDef::Union(union) if !union.has_resolve_type() => {
                for member in union.members() {
                    if !object_has_is_type_of(member.as_str()) {
                        return Err(SchemaBuildError::UnresolvableAbstractType {
                            abstract_type_name: union.name().to_string(),
                            object_type_name: member.clone(),
                        });
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}
