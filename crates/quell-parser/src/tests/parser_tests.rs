use crate::ParseOptions;
use crate::SourceLocation;
use crate::ast;
use crate::parse;
use crate::parse_with_options;

fn parse_err(body: &str) -> crate::SyntaxError {
    parse(body).expect_err("expected a parse error")
}

mod operations {
    use super::*;

    #[test]
    fn parses_an_anonymous_selection_set_as_a_query() {
        let doc = parse("{ hero { name } }").unwrap();
        assert_eq!(doc.definitions.len(), 1);
        let op = doc.operations().next().unwrap();
        assert_eq!(op.kind, ast::OperationKind::Query);
        assert!(op.name.is_none());
        assert_eq!(op.selection_set.selections.len(), 1);
    }

    #[test]
    fn parses_named_operations_of_each_kind() {
        let doc = parse(concat!(
            "query FetchA { a }\n",
            "mutation ChangeB { b }\n",
            "subscription WatchC { c }",
        ))
        .unwrap();
        let ops: Vec<_> = doc.operations().collect();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].kind, ast::OperationKind::Query);
        assert_eq!(ops[0].name_str(), Some("FetchA"));
        assert_eq!(ops[1].kind, ast::OperationKind::Mutation);
        assert_eq!(ops[1].name_str(), Some("ChangeB"));
        assert_eq!(ops[2].kind, ast::OperationKind::Subscription);
        assert_eq!(ops[2].name_str(), Some("WatchC"));
    }

    #[test]
    fn parses_variable_definitions_with_defaults() {
        let doc = parse("query q($id: ID!, $limit: Int = 10) { node(id: $id) { id } }")
            .unwrap();
        let op = doc.operations().next().unwrap();
        assert_eq!(op.variable_definitions.len(), 2);

        let id_def = &op.variable_definitions[0];
        assert_eq!(id_def.variable.name.as_str(), "id");
        assert!(matches!(id_def.annotation, ast::TypeAnnotation::NonNull(_)));
        assert!(id_def.default_value.is_none());

        let limit_def = &op.variable_definitions[1];
        assert_eq!(limit_def.variable.name.as_str(), "limit");
        assert!(matches!(
            limit_def.default_value,
            Some(ast::Value::Int(ref int)) if int.value == "10"
        ));
    }

    #[test]
    fn parses_aliases_arguments_and_directives() {
        let doc = parse("{ alias: field(first: 10, after: \"cursor\") @include(if: true) }")
            .unwrap();
        let op = doc.operations().next().unwrap();
        let ast::Selection::Field(field) = &op.selection_set.selections[0] else {
            panic!("expected a field");
        };
        assert_eq!(field.alias.as_ref().unwrap().as_str(), "alias");
        assert_eq!(field.name.as_str(), "field");
        assert_eq!(field.response_key(), "alias");
        assert_eq!(field.arguments.len(), 2);
        assert_eq!(field.arguments[0].name.as_str(), "first");
        assert_eq!(field.directives.len(), 1);
        assert_eq!(field.directives[0].name.as_str(), "include");
    }

    #[test]
    fn requires_a_selection_set() {
        let err = parse_err("query Q");
        assert_eq!(err.description(), "Expected \"{\", found EOF");
    }

    #[test]
    fn rejects_an_empty_document() {
        let err = parse_err("");
        assert_eq!(err.description(), "Unexpected EOF");
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse_err("{ a } garbage");
        assert_eq!(err.description(), "Unexpected Name \"garbage\"");
    }
}

mod fragments {
    use super::*;

    #[test]
    fn parses_fragment_definitions_and_spreads() {
        let doc = parse(concat!(
            "query withFragments { user { ...friendFields } }\n",
            "fragment friendFields on User { id name }",
        ))
        .unwrap();
        let frag = doc.fragments().next().unwrap();
        assert_eq!(frag.name.as_str(), "friendFields");
        assert_eq!(frag.type_condition.as_str(), "User");
        assert_eq!(frag.selection_set.selections.len(), 2);

        let op = doc.operations().next().unwrap();
        let ast::Selection::Field(user) = &op.selection_set.selections[0] else {
            panic!("expected a field");
        };
        let inner = user.selection_set.as_ref().unwrap();
        assert!(matches!(
            &inner.selections[0],
            ast::Selection::FragmentSpread(spread) if spread.name.as_str() == "friendFields"
        ));
    }

    #[test]
    fn parses_inline_fragments_with_and_without_type_conditions() {
        let doc = parse("{ ... on Droid { primaryFunction } ... { name } }").unwrap();
        let op = doc.operations().next().unwrap();

        let ast::Selection::InlineFragment(with_condition) = &op.selection_set.selections[0]
        else {
            panic!("expected an inline fragment");
        };
        assert_eq!(
            with_condition.type_condition.as_ref().unwrap().as_str(),
            "Droid",
        );

        let ast::Selection::InlineFragment(bare) = &op.selection_set.selections[1] else {
            panic!("expected an inline fragment");
        };
        assert!(bare.type_condition.is_none());
    }

    #[test]
    fn rejects_on_as_a_fragment_name() {
        let err = parse_err("fragment on on User { id }");
        assert_eq!(err.description(), "Unexpected Name \"on\"");
    }
}

mod values {
    use super::*;

    fn first_argument_value(body: &str) -> ast::Value {
        let doc = parse(body).unwrap();
        let op = doc.operations().next().unwrap();
        let ast::Selection::Field(field) = &op.selection_set.selections[0] else {
            panic!("expected a field");
        };
        field.arguments[0].value.clone()
    }

    #[test]
    fn parses_scalar_literals() {
        assert!(matches!(
            first_argument_value("{ f(x: 42) }"),
            ast::Value::Int(int) if int.value == "42"
        ));
        assert!(matches!(
            first_argument_value("{ f(x: -1.5e3) }"),
            ast::Value::Float(float) if float.value == "-1.5e3"
        ));
        assert!(matches!(
            first_argument_value("{ f(x: \"text\") }"),
            ast::Value::String(string) if string.value == "text"
        ));
        assert!(matches!(
            first_argument_value("{ f(x: true) }"),
            ast::Value::Boolean(boolean) if boolean.value
        ));
        assert!(matches!(
            first_argument_value("{ f(x: null) }"),
            ast::Value::Null(_)
        ));
        assert!(matches!(
            first_argument_value("{ f(x: EMPIRE) }"),
            ast::Value::Enum(enum_value) if enum_value.value == "EMPIRE"
        ));
    }

    #[test]
    fn parses_nested_lists_and_objects() {
        let value = first_argument_value("{ f(x: {a: [1, 2], b: {c: \"d\"}}) }");
        let ast::Value::Object(object) = value else {
            panic!("expected an object literal");
        };
        assert_eq!(object.fields.len(), 2);
        assert_eq!(object.fields[0].name.as_str(), "a");
        assert!(matches!(
            &object.fields[0].value,
            ast::Value::List(list) if list.values.len() == 2
        ));
    }

    #[test]
    fn rejects_duplicate_object_literal_keys() {
        let err = parse_err("{ f(x: {a: 1, a: 2}) }");
        assert_eq!(err.description(), "Duplicate input object field a.");
    }

    #[test]
    fn rejects_variables_in_constant_values() {
        let err = parse_err("query q($v: Int = $other) { f }");
        assert_eq!(err.description(), "Unexpected variable in constant value.");
    }
}

mod type_annotations {
    use super::*;

    #[test]
    fn parses_modifier_stacks() {
        let doc = parse("query q($a: [[String!]!]!) { f(x: $a) }").unwrap();
        let op = doc.operations().next().unwrap();
        let annotation = &op.variable_definitions[0].annotation;
        assert_eq!(annotation.innermost_name(), "String");

        let ast::TypeAnnotation::NonNull(outer) = annotation else {
            panic!("expected outer non-null");
        };
        let ast::TypeAnnotation::List(outer_list) = outer.inner.as_ref() else {
            panic!("expected outer list");
        };
        let ast::TypeAnnotation::NonNull(inner) = outer_list.inner.as_ref() else {
            panic!("expected inner non-null");
        };
        assert!(matches!(inner.inner.as_ref(), ast::TypeAnnotation::List(_)));
    }
}

mod type_system {
    use super::*;

    fn type_system_definitions(body: &str) -> Vec<ast::TypeSystemDefinition> {
        parse(body)
            .unwrap()
            .definitions
            .into_iter()
            .map(|def| match def {
                ast::Definition::TypeSystem(def) => def,
                other => panic!("expected a type-system definition, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn parses_object_types_with_interfaces() {
        let defs = type_system_definitions(
            "type Human implements Character Named { id: ID! friends: [Character] }",
        );
        let ast::TypeSystemDefinition::Object(object) = &defs[0] else {
            panic!("expected an object definition");
        };
        assert_eq!(object.name.as_str(), "Human");
        assert_eq!(object.interfaces.len(), 2);
        assert_eq!(object.fields.len(), 2);
        assert_eq!(object.fields[0].name.as_str(), "id");
    }

    #[test]
    fn parses_field_arguments_with_defaults() {
        let defs = type_system_definitions(
            "type Query { hero(episode: Episode = NEWHOPE): Character }",
        );
        let ast::TypeSystemDefinition::Object(object) = &defs[0] else {
            panic!("expected an object definition");
        };
        let argument = &object.fields[0].arguments[0];
        assert_eq!(argument.name.as_str(), "episode");
        assert!(matches!(
            &argument.default_value,
            Some(ast::Value::Enum(value)) if value.value == "NEWHOPE"
        ));
    }

    #[test]
    fn parses_the_remaining_definition_kinds() {
        let defs = type_system_definitions(concat!(
            "interface Character { id: ID! }\n",
            "union SearchResult = Human | Droid\n",
            "scalar Date\n",
            "enum Episode { NEWHOPE EMPIRE JEDI }\n",
            "input ReviewInput { stars: Int! commentary: String }\n",
            "extend type Query { reviews: [String] }",
        ));
        assert!(matches!(&defs[0], ast::TypeSystemDefinition::Interface(def)
            if def.name.as_str() == "Character"));
        assert!(matches!(&defs[1], ast::TypeSystemDefinition::Union(def)
            if def.members.len() == 2));
        assert!(matches!(&defs[2], ast::TypeSystemDefinition::Scalar(def)
            if def.name.as_str() == "Date"));
        assert!(matches!(&defs[3], ast::TypeSystemDefinition::Enum(def)
            if def.values.len() == 3));
        assert!(matches!(&defs[4], ast::TypeSystemDefinition::InputObject(def)
            if def.fields.len() == 2));
        assert!(matches!(&defs[5], ast::TypeSystemDefinition::TypeExtension(ext)
            if ext.definition.name.as_str() == "Query"));
    }
}

mod locations {
    use super::*;

    #[test]
    fn attaches_spans_and_sources_by_default() {
        let doc = parse("{ a }").unwrap();
        let loc = doc.loc.as_ref().unwrap();
        assert_eq!((loc.start, loc.end), (0, 5));
        assert!(loc.source.is_some());

        let op = doc.operations().next().unwrap();
        let ast::Selection::Field(field) = &op.selection_set.selections[0] else {
            panic!("expected a field");
        };
        let field_loc = field.loc.as_ref().unwrap();
        assert_eq!((field_loc.start, field_loc.end), (2, 3));
        assert_eq!(
            field_loc.source_location(),
            Some(SourceLocation::new(1, 3)),
        );
    }

    #[test]
    fn no_source_drops_the_back_pointer_but_keeps_spans() {
        let doc = parse_with_options("{ a }", ParseOptions {
            no_location: false,
            no_source: true,
        })
        .unwrap();
        let loc = doc.loc.as_ref().unwrap();
        assert_eq!((loc.start, loc.end), (0, 5));
        assert!(loc.source.is_none());
    }

    #[test]
    fn no_location_drops_locations_entirely() {
        let doc = parse_with_options("{ a }", ParseOptions {
            no_location: true,
            no_source: false,
        })
        .unwrap();
        assert!(doc.loc.is_none());
        let op = doc.operations().next().unwrap();
        assert!(op.loc.is_none());
    }

    #[test]
    fn syntax_errors_carry_a_location_and_a_caret_excerpt() {
        let err = parse_err("{\n  bad?\n}");
        assert_eq!(err.location(), SourceLocation::new(2, 6));
        let rendered = err.to_string();
        assert!(rendered.starts_with("Syntax Error GraphQL (2:6) Unexpected character \"?\"."));
        assert!(rendered.contains("2:   bad?"));
        assert!(rendered.contains('^'));
    }
}

mod nesting_limits {
    use super::*;

    #[test]
    fn deeply_nested_list_values_fail_cleanly() {
        let mut body = "{ f(x: ".to_string();
        body.push_str(&"[".repeat(100));
        body.push_str(&"]".repeat(100));
        body.push_str(") }");
        let err = parse_err(&body);
        assert_eq!(
            err.description(),
            "Document nesting exceeds maximum allowed depth.",
        );
    }
}
