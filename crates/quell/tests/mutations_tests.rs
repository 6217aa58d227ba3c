//! Mutation semantics: serial top-level execution in source order, with
//! failures isolated to their own field.

use indexmap::IndexMap;
use quell::ExecuteParams;
use quell::Field;
use quell::FieldError;
use quell::ObjectType;
use quell::ParallelStrategy;
use quell::Resolved;
use quell::Schema;
use quell::TypeAnnotation;
use quell::Value;
use quell::execute;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;

/// The classic mutable-root fixture: a number that mutations overwrite,
/// exposed through a `NumberHolder`.
fn number_schema(number: Arc<Mutex<i64>>) -> Schema {
    let holder = ObjectType::builder("NumberHolder")
        .field(Field::new("theNumber", TypeAnnotation::named("Int")))
        .build();

    let query_number = Arc::clone(&number);
    let query = ObjectType::builder("Query")
        .field(
            Field::new("theNumber", TypeAnnotation::named("Int")).resolve(move |_| {
                Ok(Resolved::Value(Value::Int(*query_number.lock().unwrap())))
            }),
        )
        .build();

    let change_number = Arc::clone(&number);
    let mutation = ObjectType::builder("Mutation")
        .field(
            Field::new(
                "immediatelyChangeTheNumber",
                TypeAnnotation::named("NumberHolder"),
            )
            .argument(quell::Argument::new(
                "newNumber",
                TypeAnnotation::named("Int"),
            ))
            .resolve(move |params| {
                let new_number = params
                    .arg("newNumber")
                    .and_then(|value| value.as_i64())
                    .unwrap_or(0);
                *change_number.lock().unwrap() = new_number;
                Ok(Resolved::Object(IndexMap::from([(
                    "theNumber".to_string(),
                    Resolved::Value(Value::Int(new_number)),
                )])))
            }),
        )
        .field(
            Field::new(
                "failToChangeTheNumber",
                TypeAnnotation::named("NumberHolder"),
            )
            .argument(quell::Argument::new(
                "newNumber",
                TypeAnnotation::named("Int"),
            ))
            .resolve(|_| Err(FieldError::new("Cannot change the number"))),
        )
        .build();

    Schema::builder()
        .query(query)
        .mutation(mutation)
        .register(holder)
        .build()
        .unwrap()
}

#[test]
fn mutations_run_serially_and_failures_do_not_stop_later_fields() {
    let number = Arc::new(Mutex::new(0));
    let schema = number_schema(Arc::clone(&number));
    let document = quell::parse(concat!(
        "mutation M {\n",
        "  first: immediatelyChangeTheNumber(newNumber: 1) { theNumber }\n",
        "  second: immediatelyChangeTheNumber(newNumber: 2) { theNumber }\n",
        "  third: failToChangeTheNumber(newNumber: 3) { theNumber }\n",
        "  fourth: immediatelyChangeTheNumber(newNumber: 4) { theNumber }\n",
        "}",
    ))
    .unwrap();

    let response = execute(ExecuteParams::new(&schema, &document));
    let body = response.to_json();
    assert_eq!(
        body["data"],
        json!({
            "first": {"theNumber": 1},
            "second": {"theNumber": 2},
            "third": null,
            "fourth": {"theNumber": 4},
        }),
    );
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], json!("Cannot change the number"));
    // locations[0] points at the `third:` field.
    assert_eq!(errors[0]["locations"][0], json!({"line": 4, "column": 3}));
    assert_eq!(*number.lock().unwrap(), 4);
}

#[test]
fn top_level_side_effects_are_ordered_even_under_a_parallel_strategy() {
    let number = Arc::new(Mutex::new(0));
    let observed = Arc::new(Mutex::new(vec![]));

    let observer = Arc::clone(&observed);
    let counter = Arc::clone(&number);
    let mutation = ObjectType::builder("Mutation")
        .field(
            Field::new("bump", TypeAnnotation::named("Int")).resolve(move |_| {
                let mut value = counter.lock().unwrap();
                *value += 1;
                observer.lock().unwrap().push(*value);
                Ok(Resolved::Value(Value::Int(*value)))
            }),
        )
        .build();
    let query = ObjectType::builder("Query")
        .field(Field::new("ok", TypeAnnotation::named("Boolean")))
        .build();
    let schema = Schema::builder().query(query).mutation(mutation).build().unwrap();

    let document =
        quell::parse("mutation { a: bump b: bump c: bump d: bump }").unwrap();
    let response = execute(ExecuteParams {
        strategy: &ParallelStrategy,
        ..ExecuteParams::new(&schema, &document)
    });

    assert_eq!(
        response.to_json(),
        json!({"data": {"a": 1, "b": 2, "c": 3, "d": 4}}),
    );
    assert_eq!(*observed.lock().unwrap(), vec![1, 2, 3, 4]);
}

#[test]
fn a_schema_without_a_mutation_root_rejects_mutations() {
    let query = ObjectType::builder("Query")
        .field(Field::new("ok", TypeAnnotation::named("Boolean")))
        .build();
    let schema = Schema::builder().query(query).build().unwrap();
    let document = quell::parse("mutation { anything }").unwrap();
    let response = execute(ExecuteParams::new(&schema, &document));
    let body = response.to_json();
    assert_eq!(body["data"], json!(null));
    assert_eq!(
        body["errors"][0]["message"],
        json!("Schema is not configured for mutations."),
    );
}
