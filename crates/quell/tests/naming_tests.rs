//! Property: the schema builder accepts exactly the GraphQL name grammar
//! `[_a-zA-Z][_a-zA-Z0-9]*` for type names.

use proptest::prelude::*;
use quell::Field;
use quell::ObjectType;
use quell::Schema;
use quell::SchemaBuildError;
use quell::TypeAnnotation;

fn matches_name_grammar(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

fn build_with_type_name(name: &str) -> Result<Schema, SchemaBuildError> {
    let query = ObjectType::builder("Query")
        .field(Field::new("ok", TypeAnnotation::named("Boolean")))
        .build();
    let registered = ObjectType::builder(name)
        .field(Field::new("ok", TypeAnnotation::named("Boolean")))
        .build();
    Schema::builder().query(query).register(registered).build()
}

proptest! {
    #[test]
    fn invalid_names_are_rejected_and_valid_names_never_fail_the_grammar_check(
        name in "[ -~]{0,12}",
    ) {
        let result = build_with_type_name(name.as_str());
        if matches_name_grammar(name.as_str()) {
            // Valid names may still collide with `Query` or a built-in, or
            // be reserved, but never fail the grammar check.
            prop_assert!(
                !matches!(
                    result,
                    Err(SchemaBuildError::InvalidTypeName { .. }),
                ),
                "expected no InvalidTypeName error, got {:?}",
                result
            );
        } else {
            prop_assert_eq!(result.unwrap_err(), SchemaBuildError::InvalidTypeName {
                type_name: name.clone(),
            });
        }
    }

    #[test]
    fn canonical_names_always_build(name in "[_a-zA-Z][_a-zA-Z0-9]{0,12}") {
        prop_assume!(name != "Query");
        prop_assume!(!name.starts_with("__"));
        prop_assume!(!["Int", "Float", "String", "Boolean", "ID"].contains(&name.as_str()));
        prop_assert!(build_with_type_name(name.as_str()).is_ok());
    }
}
