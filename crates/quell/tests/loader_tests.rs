//! Loader batching through the executor: sibling resolvers defer keyed
//! lookups, and the first realization flushes one batched call.

use quell::ExecuteParams;
use quell::Field;
use quell::Loader;
use quell::ObjectType;
use quell::Resolved;
use quell::Schema;
use quell::TypeAnnotation;
use quell::Value;
use quell::execute;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;

/// A loader that records every batch it dispatches.
fn recording_loader(batches: Arc<Mutex<Vec<Vec<String>>>>) -> Loader {
    Loader::new(move |keys| {
        batches.lock().unwrap().push(keys.to_vec());
        Ok(keys
            .iter()
            .map(|key| Resolved::Value(Value::String(format!("user:{key}"))))
            .collect())
    })
}

fn user_schema(loader: Loader) -> Schema {
    let query = ObjectType::builder("Query")
        .field(
            Field::new("user", TypeAnnotation::named("String"))
                .argument(quell::Argument::new("id", TypeAnnotation::non_null("ID")))
                .resolve(move |params| {
                    let id = params
                        .arg("id")
                        .and_then(|value| value.as_str())
                        .unwrap_or_default();
                    Ok(loader.defer(id))
                }),
        )
        .build();
    Schema::builder().query(query).build().unwrap()
}

#[test]
fn sibling_lookups_coalesce_into_one_batch() {
    let batches = Arc::new(Mutex::new(vec![]));
    let schema = user_schema(recording_loader(Arc::clone(&batches)));

    let document = quell::parse(concat!(
        "{ a: user(id: \"1\") b: user(id: \"2\") c: user(id: \"3\") }",
    ))
    .unwrap();
    let response = execute(ExecuteParams::new(&schema, &document));

    assert_eq!(
        response.to_json(),
        json!({"data": {"a": "user:1", "b": "user:2", "c": "user:3"}}),
    );
    let dispatched = batches.lock().unwrap().clone();
    assert_eq!(dispatched, vec![vec!["1", "2", "3"]]);
}

#[test]
fn repeated_keys_are_deduplicated_and_cached() {
    let batches = Arc::new(Mutex::new(vec![]));
    let schema = user_schema(recording_loader(Arc::clone(&batches)));

    let document =
        quell::parse("{ a: user(id: \"1\") b: user(id: \"1\") c: user(id: \"2\") }").unwrap();
    let response = execute(ExecuteParams::new(&schema, &document));

    assert_eq!(
        response.to_json(),
        json!({"data": {"a": "user:1", "b": "user:1", "c": "user:2"}}),
    );
    let dispatched = batches.lock().unwrap().clone();
    assert_eq!(dispatched, vec![vec!["1", "2"]]);
}

#[test]
fn batch_errors_surface_on_every_deferred_field() {
    let loader = Loader::new(|_keys| Err(quell::FieldError::new("backend offline")));
    let schema = user_schema(loader);
    let document = quell::parse("{ a: user(id: \"1\") b: user(id: \"2\") }").unwrap();
    let response = execute(ExecuteParams::new(&schema, &document));
    let body = response.to_json();
    assert_eq!(body["data"], json!({"a": null, "b": null}));
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["message"], json!("backend offline"));
}

#[test]
fn pending_counts_drain_after_dispatch() {
    let loader = Loader::new(|keys| {
        Ok(keys.iter().map(|_| Resolved::Value(Value::Null)).collect())
    });
    loader.defer("x");
    loader.defer("y");
    assert_eq!(loader.pending(), 2);

    let thunk = loader.defer("z");
    let Resolved::Deferred(thunk) = thunk else {
        panic!("defer returns a deferred value");
    };
    thunk.realize().unwrap();
    assert_eq!(loader.pending(), 0);
}
