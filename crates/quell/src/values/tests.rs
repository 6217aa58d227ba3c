use crate::Value;
use crate::schema::Schema;
use crate::types::Argument;
use crate::types::Field;
use crate::types::InputField;
use crate::types::InputObjectType;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::values::argument_values;
use crate::values::coerce_input_value;
use crate::values::is_valid_input_value;
use crate::values::value_from_ast;
use crate::values::variable_values;
use indexmap::IndexMap;
use quell_parser::ast;

/// `TestInputObject { a: String, b: [String], c: String! }` plus a field
/// taking it, matching the classic input-coercion fixtures.
fn test_schema() -> Schema {
    let input = InputObjectType::builder("TestInputObject")
        .field(InputField::new("a", TypeAnnotation::named("String")))
        .field(InputField::new(
            "b",
            TypeAnnotation::list_of(TypeAnnotation::named("String")),
        ))
        .field(InputField::new("c", TypeAnnotation::non_null("String")))
        .build();
    let query = ObjectType::builder("Query")
        .field(
            Field::new("fieldWithObjectInput", TypeAnnotation::named("String"))
                .argument(Argument::new(
                    "input",
                    TypeAnnotation::named("TestInputObject"),
                )),
        )
        .field(
            Field::new("fieldWithDefault", TypeAnnotation::named("String")).argument(
                Argument::new("value", TypeAnnotation::named("String"))
                    .default_value("Hello World"),
            ),
        )
        .field(
            Field::new("fieldWithNonNullArg", TypeAnnotation::named("String"))
                .argument(Argument::new("value", TypeAnnotation::non_null("String"))),
        )
        .build();
    Schema::builder().query(query).register(input).build().unwrap()
}

fn variable_definitions(query: &str) -> Vec<ast::VariableDefinition> {
    let document = quell_parser::parse(query).unwrap();
    document
        .operations()
        .next()
        .unwrap()
        .variable_definitions
        .clone()
}

fn inputs(json: serde_json::Value) -> IndexMap<String, Value> {
    match Value::from_json(json) {
        Value::Object(fields) => fields,
        _ => panic!("inputs must be a JSON object"),
    }
}

mod variables {
    use super::*;

    #[test]
    fn coerces_a_valid_input_object() {
        let schema = test_schema();
        let definitions = variable_definitions(
            "query q($input: TestInputObject) { fieldWithObjectInput(input: $input) }",
        );
        let values = variable_values(
            &schema,
            &definitions,
            &inputs(serde_json::json!({
                "input": {"a": "foo", "b": "bar", "c": "baz"},
            })),
        )
        .unwrap();

        let expected = Value::Object(IndexMap::from([
            ("a".to_string(), Value::String("foo".to_string())),
            (
                "b".to_string(),
                Value::List(vec![Value::String("bar".to_string())]),
            ),
            ("c".to_string(), Value::String("baz".to_string())),
        ]));
        assert_eq!(values.get("input"), Some(&expected));
    }

    #[test]
    fn reports_a_null_non_null_field_with_the_serialized_input() {
        let schema = test_schema();
        let definitions = variable_definitions(
            "query q($input: TestInputObject) { fieldWithObjectInput(input: $input) }",
        );
        let err = variable_values(
            &schema,
            &definitions,
            &inputs(serde_json::json!({
                "input": {"a": "foo", "b": "bar", "c": null},
            })),
        )
        .unwrap_err();
        assert_eq!(
            err.message,
            "Variable \"$input\" expected value of type \"TestInputObject\" but got: \
             {\"a\":\"foo\",\"b\":\"bar\",\"c\":null}.",
        );
    }

    #[test]
    fn reports_unknown_input_object_keys() {
        let schema = test_schema();
        let definitions = variable_definitions(
            "query q($input: TestInputObject) { fieldWithObjectInput(input: $input) }",
        );
        let err = variable_values(
            &schema,
            &definitions,
            &inputs(serde_json::json!({
                "input": {"a": "foo", "c": "bar", "extra": "dog"},
            })),
        )
        .unwrap_err();
        assert_eq!(
            err.message,
            "Variable \"$input\" expected value of type \"TestInputObject\" but got: \
             {\"a\":\"foo\",\"c\":\"bar\",\"extra\":\"dog\"}.",
        );
    }

    #[test]
    fn reports_missing_required_variables() {
        let schema = test_schema();
        let definitions =
            variable_definitions("query q($value: String!) { fieldWithNonNullArg(value: $value) }");
        let err = variable_values(&schema, &definitions, &IndexMap::new()).unwrap_err();
        assert_eq!(
            err.message,
            "Variable \"$value\" of required type \"String!\" was not provided.",
        );
    }

    #[test]
    fn applies_declared_defaults_for_missing_nullable_variables() {
        let schema = test_schema();
        let definitions = variable_definitions(
            "query q($value: String = \"fallback\") { fieldWithDefault(value: $value) }",
        );
        let values = variable_values(&schema, &definitions, &IndexMap::new()).unwrap();
        assert_eq!(
            values.get("value"),
            Some(&Value::String("fallback".to_string())),
        );
    }

    #[test]
    fn rejects_non_input_variable_types() {
        let schema = test_schema();
        let definitions =
            variable_definitions("query q($q: Query) { fieldWithDefault(value: \"x\") }");
        let err = variable_values(&schema, &definitions, &IndexMap::new()).unwrap_err();
        assert_eq!(
            err.message,
            "Variable \"$q\" expected value of type \"Query\" which cannot be used as \
             an input type.",
        );
    }
}

mod validity {
    use super::*;

    #[test]
    fn null_is_only_valid_for_nullable_types() {
        let schema = test_schema();
        assert!(is_valid_input_value(
            &Value::Null,
            &TypeAnnotation::named("String"),
            &schema,
        ));
        assert!(!is_valid_input_value(
            &Value::Null,
            &TypeAnnotation::non_null("String"),
            &schema,
        ));
    }

    #[test]
    fn single_values_are_valid_for_list_types() {
        let schema = test_schema();
        let annotation = TypeAnnotation::list_of(TypeAnnotation::named("String"));
        assert!(is_valid_input_value(
            &Value::String("solo".to_string()),
            &annotation,
            &schema,
        ));
        assert!(is_valid_input_value(
            &Value::List(vec![Value::String("one".to_string()), Value::Null]),
            &annotation,
            &schema,
        ));
    }
}

mod coercion {
    use super::*;

    #[test]
    fn wraps_single_values_into_lists() {
        let schema = test_schema();
        let annotation = TypeAnnotation::list_of(TypeAnnotation::named("String"));
        assert_eq!(
            coerce_input_value(&Value::String("solo".to_string()), &annotation, &schema),
            Value::List(vec![Value::String("solo".to_string())]),
        );
    }

    #[test]
    fn fills_input_object_defaults() {
        let defaulted = InputObjectType::builder("Defaulted")
            .field(
                InputField::new("mode", TypeAnnotation::named("String"))
                    .default_value("auto"),
            )
            .field(InputField::new("limit", TypeAnnotation::named("Int")))
            .build();
        let query = ObjectType::builder("Query")
            .field(
                Field::new("run", TypeAnnotation::named("String"))
                    .argument(Argument::new("opts", TypeAnnotation::named("Defaulted"))),
            )
            .build();
        let schema = Schema::builder().query(query).register(defaulted).build().unwrap();

        let coerced = coerce_input_value(
            &Value::Object(IndexMap::from([("limit".to_string(), Value::Int(3))])),
            &TypeAnnotation::named("Defaulted"),
            &schema,
        );
        assert_eq!(
            coerced,
            Value::Object(IndexMap::from([
                ("mode".to_string(), Value::String("auto".to_string())),
                ("limit".to_string(), Value::Int(3)),
            ])),
        );
    }
}

mod arguments {
    use super::*;

    fn field_arguments(query: &str) -> Vec<ast::Argument> {
        let document = quell_parser::parse(query).unwrap();
        let operation = document.operations().next().unwrap().clone();
        let ast::Selection::Field(field) = &operation.selection_set.selections[0] else {
            panic!("expected a field");
        };
        field.arguments.clone()
    }

    #[test]
    fn prefers_literals_then_variables_then_defaults() {
        let schema = test_schema();
        let definitions = [Argument::new("value", TypeAnnotation::named("String"))
            .default_value("fallback")];

        let literal = field_arguments("{ fieldWithDefault(value: \"explicit\") }");
        let values =
            argument_values(&definitions, &literal, &schema, &IndexMap::new()).unwrap();
        assert_eq!(values.get("value"), Some(&Value::String("explicit".to_string())));

        let via_variable = field_arguments("{ fieldWithDefault(value: $v) }");
        let variables =
            IndexMap::from([("v".to_string(), Value::String("from var".to_string()))]);
        let values =
            argument_values(&definitions, &via_variable, &schema, &variables).unwrap();
        assert_eq!(values.get("value"), Some(&Value::String("from var".to_string())));

        let values = argument_values(&definitions, &[], &schema, &IndexMap::new()).unwrap();
        assert_eq!(values.get("value"), Some(&Value::String("fallback".to_string())));
    }

    #[test]
    fn missing_non_null_arguments_error_with_the_fixed_template() {
        let schema = test_schema();
        let definitions = [Argument::new("value", TypeAnnotation::non_null("String"))];
        let err = argument_values(&definitions, &[], &schema, &IndexMap::new()).unwrap_err();
        assert_eq!(
            err.message(),
            "Argument \"value\" of required type \"String!\" was not provided.",
        );
    }
}

mod literals {
    use super::*;

    fn literal(body: &str) -> ast::Value {
        let document = quell_parser::parse(format!("{{ f(x: {body}) }}").as_str()).unwrap();
        let operation = document.operations().next().unwrap().clone();
        let ast::Selection::Field(field) = &operation.selection_set.selections[0] else {
            panic!("expected a field");
        };
        field.arguments[0].value.clone()
    }

    #[test]
    fn coerces_nested_literals_with_variables() {
        let schema = test_schema();
        let variables =
            IndexMap::from([("v".to_string(), Value::String("subbed".to_string()))]);
        let value = value_from_ast(
            Some(&literal("{a: $v, c: \"req\"}")),
            &TypeAnnotation::named("TestInputObject"),
            &schema,
            &variables,
        );
        assert_eq!(
            value,
            Some(Value::Object(IndexMap::from([
                ("a".to_string(), Value::String("subbed".to_string())),
                ("c".to_string(), Value::String("req".to_string())),
            ]))),
        );
    }

    #[test]
    fn uncoercible_literals_yield_none() {
        let schema = test_schema();
        assert_eq!(
            value_from_ast(
                Some(&literal("\"not an int\"")),
                &TypeAnnotation::named("Int"),
                &schema,
                &IndexMap::new(),
            ),
            None,
        );
    }
}
