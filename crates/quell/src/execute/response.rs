use crate::Value;
use crate::execute::ExecutionError;
use serde::Serialize;

/// The result of executing one operation.
///
/// Serializes to the wire shape `{ "data": ..., "errors": [...] }`, with
/// `errors` omitted when empty.
#[derive(Clone, Debug, Serialize)]
pub struct Response {
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ExecutionError>,
}

impl Response {
    pub fn new(data: Value, errors: Vec<ExecutionError>) -> Self {
        Self { data, errors }
    }

    /// A failed response: `data` is null.
    pub fn from_errors(errors: Vec<ExecutionError>) -> Self {
        Self {
            data: Value::Null,
            errors,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The wire JSON form.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("responses always serialize")
    }
}
