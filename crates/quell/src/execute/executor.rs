//! The executor: operation selection, strategy-driven field resolution,
//! value completion, and null propagation.

use crate::Value;
use crate::execute::ExecutionContext;
use crate::execute::ExecutionError;
use crate::execute::FieldStrategy;
use crate::execute::FieldTask;
use crate::execute::PathSegment;
use crate::execute::RequestContext;
use crate::execute::Response;
use crate::execute::SerialStrategy;
use crate::execute::collect::GroupedFields;
use crate::execute::collect::collect_fields;
use crate::execute::error::push_path;
use crate::introspection;
use crate::resolve::FieldError;
use crate::resolve::ResolveInfo;
use crate::resolve::ResolveParams;
use crate::resolve::Resolved;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::types::TypeDef;
use crate::values;
use indexmap::IndexMap;
use quell_parser::SourceLocation;
use quell_parser::ast;
use std::any::Any;
use std::collections::HashMap;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::sync::Mutex;

/// Everything [`execute`] needs for one request.
pub struct ExecuteParams<'a> {
    pub schema: &'a Schema,
    pub document: &'a ast::Document,
    /// Required when the document contains more than one operation.
    pub operation_name: Option<&'a str>,
    /// The value the root type's resolvers receive as their source.
    pub root_value: Resolved,
    /// Raw variable inputs, coerced against the operation's declarations
    /// before any resolver runs.
    pub variable_values: IndexMap<String, Value>,
    pub context: RequestContext,
    pub strategy: &'a dyn FieldStrategy,
}

impl<'a> ExecuteParams<'a> {
    pub fn new(schema: &'a Schema, document: &'a ast::Document) -> Self {
        Self {
            schema,
            document,
            operation_name: None,
            root_value: Resolved::null(),
            variable_values: IndexMap::new(),
            context: RequestContext::new(),
            strategy: &SerialStrategy,
        }
    }
}

/// Executes one operation of a parsed document against a schema.
///
/// Never panics and never returns errors out of band: every failure is
/// accumulated into the returned [`Response`].
pub fn execute(params: ExecuteParams<'_>) -> Response {
    let ExecuteParams {
        schema,
        document,
        operation_name,
        root_value,
        variable_values,
        context,
        strategy,
    } = params;

    let mut fragments: HashMap<&str, &ast::FragmentDefinition> = HashMap::new();
    for fragment in document.fragments() {
        fragments.insert(fragment.name.as_str(), fragment);
    }

    let operation = match select_operation(document, operation_name) {
        Ok(operation) => operation,
        Err(message) => return Response::from_errors(vec![ExecutionError::new(message)]),
    };

    let coerced_variables = match values::variable_values(
        schema,
        &operation.variable_definitions,
        &variable_values,
    ) {
        Ok(values) => values,
        Err(error) => return Response::from_errors(vec![error]),
    };

    tracing::debug!(
        operation = operation.name_str().unwrap_or("(anonymous)"),
        kind = %operation.kind,
        "executing operation",
    );

    let ctx = ExecutionContext::new(
        schema,
        fragments,
        operation,
        coerced_variables,
        &context,
        strategy,
    );
    let data = execute_operation(&ctx, operation, &root_value);
    Response::new(data, ctx.take_errors())
}

/// Picks the requested operation, or the only one when unnamed.
fn select_operation<'a>(
    document: &'a ast::Document,
    operation_name: Option<&str>,
) -> Result<&'a ast::OperationDefinition, String> {
    let operations: Vec<&ast::OperationDefinition> = document.operations().collect();
    match operation_name {
        Some(name) => operations
            .into_iter()
            .find(|operation| operation.name_str() == Some(name))
            .ok_or_else(|| format!("Unknown operation named \"{name}\".")),
        None => match operations.as_slice() {
            [only] => Ok(only),
            [] => Err("Must provide an operation.".to_string()),
            _ => Err(
                "Must provide operation name if query contains multiple operations."
                    .to_string(),
            ),
        },
    }
}

fn execute_operation(
    ctx: &ExecutionContext<'_>,
    operation: &ast::OperationDefinition,
    root_value: &Resolved,
) -> Value {
    let root_type = match operation.kind {
        ast::OperationKind::Query => Some(ctx.schema.query_type()),
        ast::OperationKind::Mutation => {
            if ctx.schema.mutation_type().is_none() {
                ctx.add_error(ExecutionError::new("Schema is not configured for mutations."));
            }
            ctx.schema.mutation_type()
        }
        ast::OperationKind::Subscription => {
            if ctx.schema.subscription_type().is_none() {
                ctx.add_error(ExecutionError::new(
                    "Schema is not configured for subscriptions.",
                ));
            }
            ctx.schema.subscription_type()
        }
    };
    let Some(root_type) = root_type else {
        return Value::Null;
    };

    let mut grouped = GroupedFields::new();
    let mut visited = HashSet::new();
    collect_fields(ctx, root_type, &operation.selection_set, &mut grouped, &mut visited);

    let result = if operation.kind == ast::OperationKind::Mutation {
        execute_fields_serially(ctx, root_type, root_value, grouped, &[])
    } else {
        execute_fields(ctx, root_type, root_value, grouped, &[])
    };
    match result {
        Ok(map) => Value::Object(map),
        // A non-null violation bubbled all the way to the operation root.
        Err(PropagateNull) => Value::Null,
    }
}

/// Marker for a null bubbling up through non-null ancestors. The error
/// that caused it is already recorded; propagation itself is silent.
pub(crate) struct PropagateNull;

/// The outcome of the resolve phase for one response key.
enum FieldOutcome<'a> {
    /// No such field on the parent type: the key is dropped.
    Skip,
    Ready {
        field: &'a Field,
        resolved: Result<Resolved, FieldError>,
    },
}

/// Resolves then completes each grouped field. Sibling resolvers are
/// dispatched together through the strategy; completion then walks the
/// slots in response-key order, so output ordering is deterministic even
/// when resolution is not.
fn execute_fields<'a>(
    ctx: &ExecutionContext<'a>,
    parent_type: &'a ObjectType,
    source: &Resolved,
    grouped: GroupedFields<'a>,
    path: &[PathSegment],
) -> Result<IndexMap<String, Value>, PropagateNull> {
    let entries: Vec<(&'a str, Vec<&'a ast::Field>)> = grouped.into_iter().collect();
    let slots: Vec<Mutex<Option<FieldOutcome<'a>>>> =
        entries.iter().map(|_| Mutex::new(None)).collect();

    let mut tasks: Vec<FieldTask<'_>> = vec![];
    for ((_, nodes), slot) in entries.iter().zip(&slots) {
        tasks.push(Box::new(move || {
            let outcome = resolve_field_value(ctx, parent_type, source, nodes);
            *slot.lock().expect("field slot lock poisoned") = Some(outcome);
        }));
    }
    ctx.strategy.run_many(tasks);

    let mut results = IndexMap::new();
    for ((key, nodes), slot) in entries.iter().zip(slots) {
        let outcome = slot
            .into_inner()
            .expect("field slot lock poisoned")
            .expect("strategy ran every task");
        let FieldOutcome::Ready { field, resolved } = outcome else {
            continue;
        };
        let field_path = push_path(path, PathSegment::Key((*key).to_string()));
        let completed =
            complete_resolved(ctx, field, parent_type.name(), nodes, resolved, &field_path)?;
        results.insert((*key).to_string(), completed);
    }
    Ok(results)
}

/// Mutation-root semantics: each field fully resolves and completes
/// (including its nested selections) before the next field starts. The
/// strategy still runs each unit, but only ever sees one at a time.
fn execute_fields_serially<'a>(
    ctx: &ExecutionContext<'a>,
    parent_type: &'a ObjectType,
    source: &Resolved,
    grouped: GroupedFields<'a>,
    path: &[PathSegment],
) -> Result<IndexMap<String, Value>, PropagateNull> {
    let mut results = IndexMap::new();
    for (key, nodes) in grouped {
        let slot: Mutex<Option<FieldOutcome<'a>>> = Mutex::new(None);
        let nodes_ref = &nodes;
        let slot_ref = &slot;
        let task: FieldTask<'_> = Box::new(move || {
            let outcome = resolve_field_value(ctx, parent_type, source, nodes_ref);
            *slot_ref.lock().expect("field slot lock poisoned") = Some(outcome);
        });
        ctx.strategy.run_many(vec![task]);
        let outcome = slot
            .into_inner()
            .expect("field slot lock poisoned")
            .expect("strategy ran the task");
        let FieldOutcome::Ready { field, resolved } = outcome else {
            continue;
        };
        let field_path = push_path(path, PathSegment::Key(key.to_string()));
        let completed =
            complete_resolved(ctx, field, parent_type.name(), &nodes, resolved, &field_path)?;
        results.insert(key.to_string(), completed);
    }
    Ok(results)
}

/// The resolve phase for one response key: look up the field definition,
/// coerce arguments, and invoke the resolver (or the default by-name
/// lookup), capturing panics and returned errors.
fn resolve_field_value<'a>(
    ctx: &ExecutionContext<'a>,
    parent_type: &'a ObjectType,
    source: &Resolved,
    nodes: &[&'a ast::Field],
) -> FieldOutcome<'a> {
    let node = nodes[0];
    let field_name = node.name.as_str();
    let Some(field) = find_field_def(ctx, parent_type, field_name) else {
        return FieldOutcome::Skip;
    };

    if ctx.request.is_cancelled() {
        let cause = ctx
            .request
            .cancellation_cause()
            .unwrap_or_else(|| "Execution cancelled.".to_string());
        return FieldOutcome::Ready {
            field,
            resolved: Err(FieldError::new(cause)),
        };
    }

    let args = match values::argument_values(
        field.arguments(),
        &node.arguments,
        ctx.schema,
        &ctx.variable_values,
    ) {
        Ok(args) => args,
        Err(error) => {
            return FieldOutcome::Ready {
                field,
                resolved: Err(error),
            };
        }
    };

    tracing::trace!(
        parent = parent_type.name(),
        field = field_name,
        "resolving field",
    );

    let resolved = match field.resolver() {
        Some(resolver) => {
            let params = ResolveParams {
                source,
                args: &args,
                context: ctx.request,
                info: ResolveInfo {
                    field_name,
                    parent_type_name: parent_type.name(),
                    return_annotation: field.type_annotation(),
                    schema: ctx.schema,
                },
            };
            match catch_unwind(AssertUnwindSafe(|| resolver.call(params))) {
                Ok(result) => result,
                Err(panic) => Err(FieldError::new(panic_message(panic))),
            }
        }
        None => Ok(default_resolve(source, field_name)),
    };

    FieldOutcome::Ready { field, resolved }
}

/// Field lookup with the three meta-field special cases: `__typename`
/// anywhere, `__schema` and `__type` on the query root only.
fn find_field_def<'a>(
    ctx: &ExecutionContext<'a>,
    parent_type: &'a ObjectType,
    field_name: &str,
) -> Option<&'a Field> {
    if field_name == "__typename" {
        return Some(introspection::type_name_meta_field());
    }
    if parent_type.name() == ctx.schema.query_type.as_str() {
        if field_name == "__schema" {
            return Some(introspection::schema_meta_field());
        }
        if field_name == "__type" {
            return Some(introspection::type_meta_field());
        }
    }
    parent_type.field(field_name)
}

/// The default resolver: a by-name lookup when the source is a property
/// map, else null. Thunk-valued properties are realized later, during
/// completion.
fn default_resolve(source: &Resolved, field_name: &str) -> Resolved {
    match source {
        Resolved::Object(map) => map.get(field_name).cloned().unwrap_or_else(Resolved::null),
        Resolved::Value(Value::Object(map)) => map
            .get(field_name)
            .cloned()
            .map(Resolved::Value)
            .unwrap_or_else(Resolved::null),
        _ => Resolved::null(),
    }
}

/// Records a resolver failure, or completes the resolved value under the
/// field's declared type.
fn complete_resolved<'a>(
    ctx: &ExecutionContext<'a>,
    field: &'a Field,
    parent_type_name: &str,
    nodes: &[&'a ast::Field],
    resolved: Result<Resolved, FieldError>,
    path: &[PathSegment],
) -> Result<Value, PropagateNull> {
    match resolved {
        Err(error) => {
            ctx.add_error(ExecutionError::at_path(
                error.message(),
                node_locations(nodes),
                path.to_vec(),
            ));
            null_or_propagate(field.type_annotation())
        }
        Ok(value) => complete_value(
            ctx,
            field.type_annotation(),
            parent_type_name,
            field.name(),
            nodes,
            value,
            path,
        ),
    }
}

fn null_or_propagate(annotation: &TypeAnnotation) -> Result<Value, PropagateNull> {
    if annotation.nullable() {
        Ok(Value::Null)
    } else {
        Err(PropagateNull)
    }
}

/// Completes a resolved value against an output annotation: realizes
/// thunks, recurses through lists and selection sets, serializes leaves,
/// and enforces non-null with single-recorded, silently-bubbling
/// violations.
fn complete_value<'a>(
    ctx: &ExecutionContext<'a>,
    annotation: &TypeAnnotation,
    parent_type_name: &str,
    field_name: &str,
    nodes: &[&'a ast::Field],
    value: Resolved,
    path: &[PathSegment],
) -> Result<Value, PropagateNull> {
    // Deferred values realize transparently; a thunk may itself return a
    // thunk.
    let mut value = value;
    loop {
        match value {
            Resolved::Deferred(thunk) => match thunk.realize() {
                Ok(inner) => value = inner,
                Err(error) => {
                    ctx.add_error(ExecutionError::at_path(
                        error.message(),
                        node_locations(nodes),
                        path.to_vec(),
                    ));
                    return null_or_propagate(annotation);
                }
            },
            other => {
                value = other;
                break;
            }
        }
    }

    let completed = if value.is_null() {
        Value::Null
    } else {
        match annotation {
            TypeAnnotation::List(list) => {
                let items: Vec<Resolved> = match value {
                    Resolved::List(items) => items,
                    Resolved::Value(Value::List(values)) => {
                        values.into_iter().map(Resolved::Value).collect()
                    }
                    _ => {
                        ctx.add_error(ExecutionError::at_path(
                            "User Error: expected iterable, but did not find one.",
                            node_locations(nodes),
                            path.to_vec(),
                        ));
                        return null_or_propagate(annotation);
                    }
                };
                let mut completed_items = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let item_path = push_path(path, PathSegment::Index(index));
                    match complete_value(
                        ctx,
                        list.inner(),
                        parent_type_name,
                        field_name,
                        nodes,
                        item,
                        &item_path,
                    ) {
                        Ok(item_value) => completed_items.push(item_value),
                        // A violated non-null element nulls the whole
                        // list; the violation is already recorded.
                        Err(propagate) => {
                            return if annotation.nullable() {
                                Ok(Value::Null)
                            } else {
                                Err(propagate)
                            };
                        }
                    }
                }
                Value::List(completed_items)
            }
            TypeAnnotation::Named(named) => {
                let Some(type_def) = ctx.schema.get_type(named.name()) else {
                    return null_or_propagate(annotation);
                };
                match type_def {
                    TypeDef::Scalar(scalar) => resolved_to_value(value)
                        .and_then(|leaf| scalar.serialize(&leaf))
                        .unwrap_or(Value::Null),
                    TypeDef::Enum(enum_type) => resolved_to_value(value)
                        .and_then(|leaf| enum_type.serialize(&leaf))
                        .unwrap_or(Value::Null),
                    TypeDef::Object(object) => {
                        return match execute_subfields(ctx, object, nodes, &value, path) {
                            Ok(map) => Ok(Value::Object(map)),
                            Err(propagate) => {
                                if annotation.nullable() {
                                    Ok(Value::Null)
                                } else {
                                    Err(propagate)
                                }
                            }
                        };
                    }
                    TypeDef::Interface(_) | TypeDef::Union(_) => {
                        let object = match resolve_runtime_type(ctx, type_def, &value) {
                            Ok(object) => object,
                            Err(message) => {
                                ctx.add_error(ExecutionError::at_path(
                                    message,
                                    node_locations(nodes),
                                    path.to_vec(),
                                ));
                                return null_or_propagate(annotation);
                            }
                        };
                        return match execute_subfields(ctx, object, nodes, &value, path) {
                            Ok(map) => Ok(Value::Object(map)),
                            Err(propagate) => {
                                if annotation.nullable() {
                                    Ok(Value::Null)
                                } else {
                                    Err(propagate)
                                }
                            }
                        };
                    }
                    // Input objects never appear in output positions in a
                    // validated schema.
                    TypeDef::InputObject(_) => Value::Null,
                }
            }
        }
    };

    if completed.is_null() && !annotation.nullable() {
        ctx.add_error(ExecutionError::at_path(
            format!(
                "Cannot return null for non-nullable field \
                 {parent_type_name}.{field_name}.",
            ),
            node_locations(nodes),
            path.to_vec(),
        ));
        return Err(PropagateNull);
    }
    Ok(completed)
}

/// Collects and executes the merged sub-selections of all nodes sharing a
/// response key.
fn execute_subfields<'a>(
    ctx: &ExecutionContext<'a>,
    object_type: &'a ObjectType,
    nodes: &[&'a ast::Field],
    source: &Resolved,
    path: &[PathSegment],
) -> Result<IndexMap<String, Value>, PropagateNull> {
    let mut grouped = GroupedFields::new();
    let mut visited = HashSet::new();
    for node in nodes {
        if let Some(selection_set) = &node.selection_set {
            collect_fields(ctx, object_type, selection_set, &mut grouped, &mut visited);
        }
    }
    execute_fields(ctx, object_type, source, grouped, path)
}

/// Determines the concrete object type for a value of abstract declared
/// type, via `resolve_type` or an `is_type_of` scan.
fn resolve_runtime_type<'a>(
    ctx: &ExecutionContext<'a>,
    abstract_def: &'a TypeDef,
    value: &Resolved,
) -> Result<&'a ObjectType, String> {
    let abstract_name = abstract_def.name();
    let resolved_name = match abstract_def {
        TypeDef::Interface(interface) => interface.resolve_type(value),
        TypeDef::Union(union) => union.resolve_type(value),
        _ => None,
    };

    if let Some(resolution) = resolved_name {
        // resolve_type was installed; trust its answer but verify the
        // result is a possible type.
        let Some(name) = resolution else {
            return Err(format!(
                "Abstract type \"{abstract_name}\" must resolve to an Object type at \
                 runtime.",
            ));
        };
        if !ctx.schema.is_possible_type(abstract_name, name.as_str()) {
            return Err(format!(
                "Runtime Object type \"{name}\" is not a possible type for \
                 \"{abstract_name}\".",
            ));
        }
        return ctx
            .schema
            .get_type(name.as_str())
            .and_then(|def| def.as_object())
            .ok_or_else(|| {
                format!(
                    "Runtime Object type \"{name}\" is not a possible type for \
                     \"{abstract_name}\".",
                )
            });
    }

    for object in ctx.schema.possible_types(abstract_name) {
        if object.is_type_of(value) == Some(true) {
            return Ok(object);
        }
    }
    Err(format!(
        "Abstract type \"{abstract_name}\" must resolve to an Object type at runtime.",
    ))
}

/// Recursively converts a materialized `Resolved` tree to a plain value;
/// `None` when it still contains opaque or stream parts.
fn resolved_to_value(value: Resolved) -> Option<Value> {
    match value {
        Resolved::Value(value) => Some(value),
        Resolved::List(items) => items
            .into_iter()
            .map(resolved_to_value)
            .collect::<Option<Vec<_>>>()
            .map(Value::List),
        Resolved::Object(fields) => fields
            .into_iter()
            .map(|(key, value)| resolved_to_value(value).map(|value| (key, value)))
            .collect::<Option<IndexMap<_, _>>>()
            .map(Value::Object),
        _ => None,
    }
}

fn node_locations(nodes: &[&ast::Field]) -> Vec<SourceLocation> {
    nodes
        .iter()
        .filter_map(|node| node.loc.as_ref().and_then(|loc| loc.source_location()))
        .collect()
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "resolver panicked".to_string()
    }
}
