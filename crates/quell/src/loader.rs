//! Keyed batching for resolvers.
//!
//! A [`Loader`] lets resolvers defer work and coalesce lookups: calling
//! [`Loader::defer`] enqueues a key and returns a
//! [`Resolved::Deferred`](crate::resolve::Resolved) thunk. Because the
//! executor runs every sibling resolver at a level before realizing any
//! thunk, the first realization flushes one batched call for all keys
//! enqueued so far. Results are cached for the loader's lifetime, which
//! should be one request.

use crate::resolve::FieldError;
use crate::resolve::Resolved;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

type BatchFn = dyn Fn(&[String]) -> Result<Vec<Resolved>, FieldError> + Send + Sync;

/// A request-scoped batch loader. Cloning shares the queue and cache.
#[derive(Clone)]
pub struct Loader {
    inner: Arc<LoaderInner>,
}

struct LoaderInner {
    batch: Box<BatchFn>,
    state: Mutex<LoaderState>,
}

#[derive(Default)]
struct LoaderState {
    pending: Vec<String>,
    /// Batch outcomes per key; errors are cached too, so every deferred
    /// field sees the same failure instead of a spurious missing-result
    /// error.
    cache: HashMap<String, Result<Resolved, FieldError>>,
}

impl Loader {
    /// Creates a loader around a batch function. The function receives
    /// every pending key (in enqueue order, deduplicated) and must return
    /// one result per key, aligned by index.
    pub fn new(
        batch: impl Fn(&[String]) -> Result<Vec<Resolved>, FieldError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                batch: Box::new(batch),
                state: Mutex::new(LoaderState::default()),
            }),
        }
    }

    /// Enqueues `key` and returns a deferred value that, when realized,
    /// dispatches the accumulated batch (once) and yields this key's
    /// result.
    pub fn defer(&self, key: impl Into<String>) -> Resolved {
        let key = key.into();
        {
            let mut state = self.inner.state.lock().expect("loader lock poisoned");
            if !state.cache.contains_key(key.as_str())
                && !state.pending.iter().any(|pending| *pending == key)
            {
                state.pending.push(key.clone());
            }
        }
        let loader = self.clone();
        Resolved::deferred(move || loader.demand(key.as_str()))
    }

    /// The number of keys waiting for the next batch dispatch.
    pub fn pending(&self) -> usize {
        self.inner
            .state
            .lock()
            .expect("loader lock poisoned")
            .pending
            .len()
    }

    /// Returns the cached result for `key`, dispatching the pending batch
    /// first if the key has not been fetched yet. The state lock is not
    /// held across the batch call, so batch functions may enqueue further
    /// keys.
    fn demand(&self, key: &str) -> Result<Resolved, FieldError> {
        let pending = {
            let mut state = self.inner.state.lock().expect("loader lock poisoned");
            if state.cache.contains_key(key) {
                vec![]
            } else {
                std::mem::take(&mut state.pending)
            }
        };

        if !pending.is_empty() {
            tracing::debug!(keys = pending.len(), "dispatching loader batch");
            let outcome = (self.inner.batch)(pending.as_slice()).and_then(|results| {
                if results.len() == pending.len() {
                    Ok(results)
                } else {
                    Err(FieldError::new(format!(
                        "Loader batch returned {} results for {} keys.",
                        results.len(),
                        pending.len(),
                    )))
                }
            });
            let mut state = self.inner.state.lock().expect("loader lock poisoned");
            match outcome {
                Ok(results) => {
                    for (key, result) in pending.into_iter().zip(results) {
                        state.cache.insert(key, Ok(result));
                    }
                }
                Err(error) => {
                    for key in pending {
                        state.cache.insert(key, Err(error.clone()));
                    }
                }
            }
        }

        self.inner
            .state
            .lock()
            .expect("loader lock poisoned")
            .cache
            .get(key)
            .cloned()
            .unwrap_or_else(|| {
                Err(FieldError::new(format!(
                    "Loader batch produced no result for \"{key}\"."
                )))
            })
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock().expect("loader lock poisoned");
        f.debug_struct("Loader")
            .field("pending", &state.pending.len())
            .field("cached", &state.cache.len())
            .finish_non_exhaustive()
    }
}
