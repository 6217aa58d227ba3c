use crate::Value;
use crate::execute::ExecutionContext;
use crate::execute::GroupedFields;
use crate::execute::RequestContext;
use crate::execute::SerialStrategy;
use crate::execute::collect_fields;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use quell_parser::ast;
use std::collections::HashMap;
use std::collections::HashSet;

fn pet_schema() -> Schema {
    let pet = InterfaceType::builder("Pet")
        .field(Field::new("name", TypeAnnotation::named("String")))
        .resolve_type(|_| Some("Dog".to_string()))
        .build();
    let dog = ObjectType::builder("Dog")
        .implements("Pet")
        .field(Field::new("name", TypeAnnotation::named("String")))
        .field(Field::new("barkVolume", TypeAnnotation::named("Int")))
        .build();
    let query = ObjectType::builder("Query")
        .field(Field::new("pet", TypeAnnotation::named("Pet")))
        .build();
    Schema::builder().query(query).register(pet).register(dog).build().unwrap()
}

/// Collects the root selection set of `query_text` against the given
/// object type, returning the grouped response keys in order.
fn collect_keys(
    schema: &Schema,
    object_name: &str,
    query_text: &str,
    variables: IndexMap<String, Value>,
) -> Vec<String> {
    let document = quell_parser::parse(query_text).unwrap();
    let operation = document.operations().next().unwrap();
    let fragments: HashMap<&str, &ast::FragmentDefinition> = document
        .fragments()
        .map(|fragment| (fragment.name.as_str(), fragment))
        .collect();
    let request = RequestContext::new();
    let ctx = ExecutionContext::new(
        schema,
        fragments,
        operation,
        variables,
        &request,
        &SerialStrategy,
    );
    let object_type = schema.get_type(object_name).unwrap().as_object().unwrap();

    let mut grouped = GroupedFields::new();
    let mut visited = HashSet::new();
    collect_fields(&ctx, object_type, &operation.selection_set, &mut grouped, &mut visited);
    grouped.keys().map(|key| key.to_string()).collect()
}

#[test]
fn keys_follow_source_order_of_first_occurrence() {
    let schema = pet_schema();
    let keys = collect_keys(
        &schema,
        "Dog",
        "{ name barkVolume renamed: name name }",
        IndexMap::new(),
    );
    assert_eq!(keys, vec!["name", "barkVolume", "renamed"]);
}

#[test]
fn skip_and_include_drop_fields() {
    let schema = pet_schema();
    let keys = collect_keys(
        &schema,
        "Dog",
        "{ name @skip(if: true) barkVolume @include(if: false) kept: name }",
        IndexMap::new(),
    );
    assert_eq!(keys, vec!["kept"]);
}

#[test]
fn skip_wins_over_include() {
    let schema = pet_schema();
    let keys = collect_keys(
        &schema,
        "Dog",
        "{ name @skip(if: true) @include(if: true) }",
        IndexMap::new(),
    );
    assert!(keys.is_empty());
}

#[test]
fn directive_arguments_accept_variables() {
    let schema = pet_schema();
    let keys = collect_keys(
        &schema,
        "Dog",
        "query q($yes: Boolean!) { name @include(if: $yes) }",
        IndexMap::from([("yes".to_string(), Value::Boolean(true))]),
    );
    assert_eq!(keys, vec!["name"]);
}

#[test]
fn inline_fragment_conditions_filter_by_runtime_type() {
    let schema = pet_schema();
    let keys = collect_keys(
        &schema,
        "Dog",
        "{ ... on Dog { barkVolume } ... on Pet { name } ... on Query { pet } }",
        IndexMap::new(),
    );
    // Dog matches itself and the interface it implements, but not Query.
    assert_eq!(keys, vec!["barkVolume", "name"]);
}

#[test]
fn fragment_spreads_resolve_and_are_visited_once() {
    let schema = pet_schema();
    let keys = collect_keys(
        &schema,
        "Dog",
        concat!(
            "{ ...dogFields ...dogFields missing: name }\n",
            "fragment dogFields on Dog { name barkVolume }",
        ),
        IndexMap::new(),
    );
    assert_eq!(keys, vec!["name", "barkVolume", "missing"]);
}

#[test]
fn unconditioned_inline_fragments_always_apply() {
    let schema = pet_schema();
    let keys = collect_keys(&schema, "Dog", "{ ... { name } }", IndexMap::new());
    assert_eq!(keys, vec!["name"]);
}
