//! The subscription execution primitive.
//!
//! `subscribe` resolves the subscription root field once; if the resolver
//! produces an event stream, each produced event is executed as the
//! operation's root value, yielding one [`Response`] per event. Event
//! production itself (transport, buffering, backpressure) is a
//! collaborator concern.

use crate::Value;
use crate::execute::ExecuteParams;
use crate::execute::ExecutionContext;
use crate::execute::FieldStrategy;
use crate::execute::GroupedFields;
use crate::execute::RequestContext;
use crate::execute::Response;
use crate::execute::SerialStrategy;
use crate::execute::collect_fields;
use crate::execute::execute;
use crate::resolve::ResolveInfo;
use crate::resolve::ResolveParams;
use crate::resolve::Resolved;
use crate::schema::Schema;
use crate::values;
use indexmap::IndexMap;
use quell_parser::ast;
use std::collections::HashMap;
use std::collections::HashSet;

/// Everything [`subscribe`] needs; mirrors
/// [`ExecuteParams`](crate::execute::ExecuteParams).
pub struct SubscribeParams<'a> {
    pub schema: &'a Schema,
    pub document: &'a ast::Document,
    pub operation_name: Option<&'a str>,
    pub root_value: Resolved,
    pub variable_values: IndexMap<String, Value>,
    pub context: RequestContext,
    pub strategy: &'a dyn FieldStrategy,
}

impl<'a> SubscribeParams<'a> {
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

/// Either a stream of responses (one per produced event) or a single
/// response when the root did not resolve to a stream.
pub enum SubscribeResult<'a> {
    Stream(ResponseStream<'a>),
    Single(Box<Response>),
}

/// Lazily executes the subscription operation once per event.
pub struct ResponseStream<'a> {
    schema: &'a Schema,
    document: &'a ast::Document,
    operation_name: Option<&'a str>,
    variable_values: IndexMap<String, Value>,
    context: RequestContext,
    strategy: &'a dyn FieldStrategy,
    events: Box<dyn Iterator<Item = Resolved> + Send>,
}

impl Iterator for ResponseStream<'_> {
    type Item = Response;

    fn next(&mut self) -> Option<Response> {
        let event = self.events.next()?;
        Some(execute(ExecuteParams {
            schema: self.schema,
            document: self.document,
            operation_name: self.operation_name,
            root_value: event,
            variable_values: self.variable_values.clone(),
            context: self.context.clone(),
            strategy: self.strategy,
        }))
    }
}

/// Resolves the subscription root; streams when the root produces a
/// stream, otherwise degrades to a single execution.
pub fn subscribe(params: SubscribeParams<'_>) -> SubscribeResult<'_> {
    match resolve_event_stream(&params) {
        Some(events) => SubscribeResult::Stream(ResponseStream {
            schema: params.schema,
            document: params.document,
            operation_name: params.operation_name,
            variable_values: params.variable_values,
            context: params.context,
            strategy: params.strategy,
            events,
        }),
        None => SubscribeResult::Single(Box::new(execute(ExecuteParams {
            schema: params.schema,
            document: params.document,
            operation_name: params.operation_name,
            root_value: params.root_value,
            variable_values: params.variable_values,
            context: params.context,
            strategy: params.strategy,
        }))),
    }
}

/// Invokes the first collected root field's resolver; `Some` only when it
/// cleanly produced an event stream.
fn resolve_event_stream(
    params: &SubscribeParams<'_>,
) -> Option<Box<dyn Iterator<Item = Resolved> + Send>> {
    let document = params.document;
    let operation = match params.operation_name {
        Some(name) => document
            .operations()
            .find(|operation| operation.name_str() == Some(name))?,
        None => {
            let mut operations = document.operations();
            let only = operations.next()?;
            if operations.next().is_some() {
                return None;
            }
            only
        }
    };
    if operation.kind != ast::OperationKind::Subscription {
        return None;
    }
    let root_type = params.schema.subscription_type()?;

    let fragments: HashMap<&str, &ast::FragmentDefinition> = document
        .fragments()
        .map(|fragment| (fragment.name.as_str(), fragment))
        .collect();
    let variable_values = values::variable_values(
        params.schema,
        &operation.variable_definitions,
        &params.variable_values,
    )
    .ok()?;

    let ctx = ExecutionContext::new(
        params.schema,
        fragments,
        operation,
        variable_values,
        &params.context,
        params.strategy,
    );
    let mut grouped = GroupedFields::new();
    let mut visited = HashSet::new();
    collect_fields(&ctx, root_type, &operation.selection_set, &mut grouped, &mut visited);

    let (_, nodes) = grouped.into_iter().next()?;
    let node = nodes.first()?;
    let field = root_type.field(node.name.as_str())?;

    let args = values::argument_values(
        field.arguments(),
        &node.arguments,
        params.schema,
        &ctx.variable_values,
    )
    .ok()?;
    let resolver = field.resolver()?;
    let resolved = resolver
        .call(ResolveParams {
            source: &params.root_value,
            args: &args,
            context: &params.context,
            info: ResolveInfo {
                field_name: node.name.as_str(),
                parent_type_name: root_type.name(),
                return_annotation: field.type_annotation(),
                schema: params.schema,
            },
        })
        .ok()?;

    if let Resolved::Stream(stream) = resolved {
        stream.take()
    } else {
        None
    }
}
