//! The dynamic value resolvers produce, and the resolver calling
//! convention.
//!
//! Resolvers return a [`Resolved`] — a tagged sum over plain values, lazy
//! thunks, opaque domain objects, and (at subscription roots) event
//! streams. The executor's completion step turns a `Resolved` into a wire
//! [`Value`] under the field's declared type.

use crate::Value;
use crate::execute::RequestContext;
use crate::schema::Schema;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;
use std::sync::Mutex;

/// An error returned (or panicked) from a resolver.
///
/// Carries only a message; the executor attaches the response path and
/// source locations when it records the failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::new(message)
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}

/// A value produced by a resolver.
#[derive(Clone)]
pub enum Resolved {
    /// A plain, fully-materialized value.
    Value(Value),
    /// A list whose elements may themselves be lazy or opaque.
    List(Vec<Resolved>),
    /// A property map whose values may be lazy or opaque. The default
    /// resolver reads child fields out of this by name.
    Object(IndexMap<String, Resolved>),
    /// An arbitrary domain object, passed through to child resolvers.
    Opaque(OpaqueValue),
    /// A zero-argument callable, realized transparently during completion.
    Deferred(Thunk),
    /// An event producer; only meaningful as a subscription root.
    Stream(EventStream),
}

impl Resolved {
    pub fn null() -> Self {
        Resolved::Value(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Resolved::Value(Value::Null))
    }

    /// Wraps an arbitrary value for downcasting in child resolvers.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Resolved::Opaque(OpaqueValue::new(value))
    }

    /// Wraps a callable realized when the value is completed.
    pub fn deferred(
        thunk: impl Fn() -> Result<Resolved, FieldError> + Send + Sync + 'static,
    ) -> Self {
        Resolved::Deferred(Thunk::new(thunk))
    }

    /// Wraps an event producer for `subscribe`.
    pub fn stream(events: impl Iterator<Item = Resolved> + Send + 'static) -> Self {
        Resolved::Stream(EventStream::new(events))
    }

    /// Downcasts an opaque payload.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        if let Resolved::Opaque(opaque) = self {
            opaque.downcast_ref()
        } else {
            None
        }
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolved::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Resolved::List(items) => f.debug_tuple("List").field(items).finish(),
            Resolved::Object(fields) => f.debug_tuple("Object").field(fields).finish(),
            Resolved::Opaque(_) => f.write_str("Opaque(..)"),
            Resolved::Deferred(_) => f.write_str("Deferred(..)"),
            Resolved::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Value> for Resolved {
    fn from(value: Value) -> Self {
        Resolved::Value(value)
    }
}

/// A shared, type-erased domain object.
#[derive(Clone)]
pub struct OpaqueValue(Arc<dyn Any + Send + Sync>);

impl OpaqueValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

/// A zero-argument callable standing in for a not-yet-materialized value.
#[derive(Clone)]
pub struct Thunk(Arc<dyn Fn() -> Result<Resolved, FieldError> + Send + Sync>);

impl Thunk {
    pub fn new(
        thunk: impl Fn() -> Result<Resolved, FieldError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(thunk))
    }

    pub fn realize(&self) -> Result<Resolved, FieldError> {
        (self.0)()
    }
}

/// A one-shot event producer for subscriptions.
///
/// Cloning shares the underlying iterator; `take` hands it out exactly
/// once.
#[derive(Clone)]
pub struct EventStream(Arc<Mutex<Option<Box<dyn Iterator<Item = Resolved> + Send>>>>);

impl EventStream {
    pub fn new(events: impl Iterator<Item = Resolved> + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(Some(Box::new(events)))))
    }

    pub(crate) fn take(&self) -> Option<Box<dyn Iterator<Item = Resolved> + Send>> {
        self.0.lock().expect("event stream lock poisoned").take()
    }
}

/// Everything a resolver receives.
pub struct ResolveParams<'a> {
    /// The parent value this field is being resolved on.
    pub source: &'a Resolved,
    /// Coerced argument values, keyed by argument name.
    pub args: &'a IndexMap<String, Value>,
    /// The per-request context (user value + cancellation).
    pub context: &'a RequestContext,
    /// Execution state: field and parent type names, return type, schema.
    pub info: ResolveInfo<'a>,
}

impl ResolveParams<'_> {
    /// Convenience accessor for a coerced argument.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }
}

/// Read-only information about the current resolution site.
pub struct ResolveInfo<'a> {
    pub field_name: &'a str,
    pub parent_type_name: &'a str,
    pub return_annotation: &'a TypeAnnotation,
    pub schema: &'a Schema,
}

type ResolverFn = dyn Fn(ResolveParams<'_>) -> Result<Resolved, FieldError> + Send + Sync;

/// A field resolver function.
#[derive(Clone)]
pub struct Resolver(Arc<ResolverFn>);

impl Resolver {
    pub fn new(
        resolver: impl Fn(ResolveParams<'_>) -> Result<Resolved, FieldError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self(Arc::new(resolver))
    }

    pub fn call(&self, params: ResolveParams<'_>) -> Result<Resolved, FieldError> {
        (self.0)(params)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Resolver(..)")
    }
}
