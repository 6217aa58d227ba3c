use crate::Value;
use crate::execute::ExecutionError;
use crate::execute::FieldStrategy;
use crate::resolve::OpaqueValue;
use crate::schema::Schema;
use indexmap::IndexMap;
use quell_parser::ast;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// The per-request context threaded through every resolver.
///
/// Carries an optional caller-supplied value (downcast via
/// [`RequestContext::value`]) and a cancellation flag. Cloning is cheap
/// and shares the same state, so a clone handed to another thread can
/// cancel in-flight execution. Timeouts are expressed as cancellation by
/// the caller; there is no separate mechanism.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    inner: Arc<ContextInner>,
}

#[derive(Default)]
struct ContextInner {
    value: Option<OpaqueValue>,
    cancelled: AtomicBool,
    cancel_cause: Mutex<Option<String>>,
}

impl std::fmt::Debug for ContextInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextInner")
            .field("cancelled", &self.cancelled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context carrying an application value for resolvers.
    pub fn with_value<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                value: Some(OpaqueValue::new(value)),
                ..ContextInner::default()
            }),
        }
    }

    /// Downcasts the caller-supplied value.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.inner.value.as_ref().and_then(|value| value.downcast_ref())
    }

    /// Signals cancellation. In-flight resolvers are expected to observe
    /// [`RequestContext::is_cancelled`] and abort; fields not yet resolved
    /// fail with `cause` on their path.
    pub fn cancel(&self, cause: impl Into<String>) {
        let mut slot = self.inner.cancel_cause.lock().expect("cancel lock poisoned");
        if slot.is_none() {
            *slot = Some(cause.into());
        }
        self.inner.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    pub fn cancellation_cause(&self) -> Option<String> {
        self.inner
            .cancel_cause
            .lock()
            .expect("cancel lock poisoned")
            .clone()
    }
}

/// Request-scoped execution state: the parsed operation, its fragments,
/// the coerced variable map, and the shared error accumulator.
///
/// The error slice is the only mutable state shared between sibling field
/// tasks; it is guarded by a mutex so parallel strategies can append
/// freely.
pub(crate) struct ExecutionContext<'a> {
    pub schema: &'a Schema,
    pub fragments: HashMap<&'a str, &'a ast::FragmentDefinition>,
    pub operation: &'a ast::OperationDefinition,
    pub variable_values: IndexMap<String, Value>,
    pub request: &'a RequestContext,
    pub strategy: &'a dyn FieldStrategy,
    errors: Mutex<Vec<ExecutionError>>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        schema: &'a Schema,
        fragments: HashMap<&'a str, &'a ast::FragmentDefinition>,
        operation: &'a ast::OperationDefinition,
        variable_values: IndexMap<String, Value>,
        request: &'a RequestContext,
        strategy: &'a dyn FieldStrategy,
    ) -> Self {
        Self {
            schema,
            fragments,
            operation,
            variable_values,
            request,
            strategy,
            errors: Mutex::new(vec![]),
        }
    }

    pub fn add_error(&self, error: ExecutionError) {
        self.errors.lock().expect("error lock poisoned").push(error);
    }

    pub fn take_errors(&self) -> Vec<ExecutionError> {
        std::mem::take(&mut *self.errors.lock().expect("error lock poisoned"))
    }
}
