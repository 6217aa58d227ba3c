//! Wire request handling: the JSON request shape and the
//! parse → validate → execute pipeline.

use crate::Value;
use crate::execute::ExecuteParams;
use crate::execute::ExecutionError;
use crate::execute::FieldStrategy;
use crate::execute::RequestContext;
use crate::execute::Response;
use crate::execute::SerialStrategy;
use crate::execute::execute;
use crate::resolve::Resolved;
use crate::schema::Schema;
use crate::validation;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// The JSON request body:
/// `{ "query": "...", "operationName": "...", "variables": { ... } }`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Request {
    pub query: String,
    #[serde(
        rename = "operationName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    /// The variables member as an internal value map; absent or non-object
    /// variables yield an empty map.
    pub fn variable_values(&self) -> IndexMap<String, Value> {
        match &self.variables {
            Some(serde_json::Value::Object(fields)) => fields
                .iter()
                .map(|(key, value)| (key.clone(), Value::from_json(value.clone())))
                .collect(),
            _ => IndexMap::new(),
        }
    }
}

/// Everything [`run_request`] needs.
pub struct RequestParams<'a> {
    pub schema: &'a Schema,
    pub request: Request,
    pub root_value: Resolved,
    pub context: RequestContext,
    pub strategy: &'a dyn FieldStrategy,
}

impl<'a> RequestParams<'a> {
    pub fn new(schema: &'a Schema, request: Request) -> Self {
        Self {
            schema,
            request,
            root_value: Resolved::null(),
            context: RequestContext::new(),
            strategy: &SerialStrategy,
        }
    }
}

/// Parses, validates, and executes a raw request: the full
/// text-to-response pipeline in one call. Parse and validation failures
/// produce a `{ data: null, errors: [...] }` response rather than an
/// `Err`.
pub fn run_request(params: RequestParams<'_>) -> Response {
    let RequestParams {
        schema,
        request,
        root_value,
        context,
        strategy,
    } = params;

    let document = match quell_parser::parse(request.query.as_str()) {
        Ok(document) => document,
        Err(error) => {
            return Response::from_errors(vec![ExecutionError::with_locations(
                error.to_string(),
                vec![error.location()],
            )]);
        }
    };

    let validation_errors = validation::validate(schema, &document);
    if !validation_errors.is_empty() {
        return Response::from_errors(
            validation_errors
                .into_iter()
                .map(|error| {
                    ExecutionError::with_locations(error.message, error.locations)
                })
                .collect(),
        );
    }

    execute(ExecuteParams {
        schema,
        document: &document,
        operation_name: request.operation_name.as_deref(),
        root_value,
        variable_values: request.variable_values(),
        context,
        strategy,
    })
}
