use crate::ParseOptions;
use crate::ast;
use crate::parse_with_options;
use crate::printer::print_document;
use crate::printer::print_value;
use proptest::prelude::*;

const NO_LOC: ParseOptions = ParseOptions {
    no_location: true,
    no_source: false,
};

fn round_trip(body: &str) -> (ast::Document, ast::Document, String) {
    let first = parse_with_options(body, NO_LOC).expect("original parses");
    let printed = print_document(&first);
    let second = parse_with_options(printed.as_str(), NO_LOC).expect("printed form parses");
    (first, second, printed)
}

#[test]
fn prints_a_minimal_query() {
    let doc = parse_with_options("{ hero { name } }", NO_LOC).unwrap();
    assert_eq!(print_document(&doc), "{\n  hero {\n    name\n  }\n}\n");
}

#[test]
fn prints_the_full_operation_header() {
    let doc = parse_with_options(
        "query FetchHero($episode: Episode = JEDI) @onQuery { hero(episode: $episode) @include(if: true) { name } }",
        NO_LOC,
    )
    .unwrap();
    assert_eq!(
        print_document(&doc),
        concat!(
            "query FetchHero($episode: Episode = JEDI) @onQuery {\n",
            "  hero(episode: $episode) @include(if: true) {\n",
            "    name\n",
            "  }\n",
            "}\n",
        ),
    );
}

#[test]
fn kitchen_sink_round_trips() {
    let (first, second, _printed) = round_trip(concat!(
        "query namedQuery($foo: ComplexFooType, $site: Site = MOBILE) {\n",
        "  whoever123is: node(id: [123, 456]) {\n",
        "    id\n",
        "    ... on User @defer {\n",
        "      field2 {\n",
        "        id\n",
        "        alias: field1(first: 10, after: $foo) @include(if: $foo) {\n",
        "          id\n",
        "          ...frag\n",
        "        }\n",
        "      }\n",
        "    }\n",
        "  }\n",
        "}\n",
        "mutation favPost { fav(post: 123) @defer { post { id } } }\n",
        "fragment frag on Friend {\n",
        "  foo(size: $size, bar: $b, obj: {key: \"value\"})\n",
        "}\n",
        "{ unnamed(truthyVal: true, falseyVal: false, nullVal: null) ... @skip(unless: $foo) { id } ... { id } }",
    ));
    assert_eq!(first, second);
}

#[test]
fn type_system_definitions_round_trip() {
    let (first, second, _printed) = round_trip(concat!(
        "type Human implements Character {\n",
        "  id: ID!\n",
        "  appearsIn(includeCut: Boolean = false): [Episode!]\n",
        "}\n",
        "interface Character { id: ID! }\n",
        "union SearchResult = Human | Droid\n",
        "scalar Date\n",
        "enum Episode { NEWHOPE EMPIRE JEDI }\n",
        "input ReviewInput { stars: Int! commentary: String = \"none\" }\n",
        "extend type Query { reviews: [String] }",
    ));
    assert_eq!(first, second);
}

#[test]
fn prints_escaped_strings() {
    let doc = parse_with_options(r#"{ f(x: "quote \" newline \n tab \t") }"#, NO_LOC).unwrap();
    let op = doc.operations().next().unwrap();
    let ast::Selection::Field(field) = &op.selection_set.selections[0] else {
        panic!("expected a field");
    };
    assert_eq!(
        print_value(&field.arguments[0].value),
        r#""quote \" newline \n tab \t""#,
    );
}

#[test]
fn prints_numbers_with_their_source_text() {
    let doc = parse_with_options("{ f(a: -0, b: 1.5e3, c: 100) }", NO_LOC).unwrap();
    let printed = print_document(&doc);
    assert_eq!(printed, "{\n  f(a: -0, b: 1.5e3, c: 100)\n}\n");
}

proptest! {
    /// Printing any generated document and re-parsing it yields an equal
    /// AST.
    #[test]
    fn generated_documents_round_trip(body in generated_document()) {
        let (first, second, printed) = round_trip(body.as_str());
        prop_assert_eq!(first, second, "printed form: {}", printed);
    }
}

/// A strategy producing small, valid query documents: nested selection
/// sets with aliases, arguments, and scalar literal values.
fn generated_document() -> impl Strategy<Value = String> {
    let name = "[a-zA-Z_][a-zA-Z0-9_]{0,8}";
    let literal = prop_oneof![
        "-?(0|[1-9][0-9]{0,6})".prop_map(|raw| raw),
        any::<bool>().prop_map(|b| b.to_string()),
        Just("null".to_string()),
        "[a-zA-Z ]{0,10}".prop_map(|s| format!("\"{s}\"")),
    ];
    let field = (name, proptest::option::of((name, literal))).prop_map(
        |(field_name, argument)| match argument {
            Some((arg_name, value)) => format!("{field_name}({arg_name}: {value})"),
            None => field_name,
        },
    );
    let fields = proptest::collection::vec(field, 1..5);
    (fields.clone(), fields).prop_map(|(outer, inner)| {
        let nested = inner.join(" ");
        let mut selections = outer.join(" ");
        selections.push_str(&format!(" nested {{ {nested} }}"));
        format!("{{ {selections} }}")
    })
}
