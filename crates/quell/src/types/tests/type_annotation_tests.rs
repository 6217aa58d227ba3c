use crate::types::TypeAnnotation;
use quell_parser::ast;

#[test]
fn displays_graphql_notation() {
    assert_eq!(TypeAnnotation::named("Int").to_string(), "Int");
    assert_eq!(TypeAnnotation::non_null("Int").to_string(), "Int!");
    assert_eq!(
        TypeAnnotation::list_of(TypeAnnotation::named("Int")).to_string(),
        "[Int]",
    );
    assert_eq!(
        TypeAnnotation::non_null_list_of(TypeAnnotation::non_null("Episode")).to_string(),
        "[Episode!]!",
    );
}

#[test]
fn nullability_is_per_layer() {
    let annotation = TypeAnnotation::non_null_list_of(TypeAnnotation::named("String"));
    assert!(!annotation.nullable());
    assert!(annotation.as_list().unwrap().inner().nullable());
    assert_eq!(annotation.innermost_name(), "String");
}

#[test]
fn equality_is_structural() {
    let a = TypeAnnotation::list_of(TypeAnnotation::non_null("Int"));
    let b = TypeAnnotation::list_of(TypeAnnotation::non_null("Int"));
    let c = TypeAnnotation::list_of(TypeAnnotation::named("Int"));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn converts_from_ast_wrappers() {
    let document = quell_parser::parse("query q($v: [[String!]!]!) { f(x: $v) }").unwrap();
    let operation = document.operations().next().unwrap();
    let ast_annotation = &operation.variable_definitions[0].annotation;

    let annotation = TypeAnnotation::from_ast(ast_annotation);
    assert_eq!(annotation.to_string(), "[[String!]!]!");
    assert_eq!(annotation.innermost_name(), "String");
}

#[test]
fn ast_conversion_keeps_nullable_layers_nullable() {
    let ast_annotation = ast::TypeAnnotation::List(ast::ListTypeAnnotation {
        inner: Box::new(ast::TypeAnnotation::Named(ast::NamedTypeAnnotation {
            name: ast::Name::new("Int", None),
            loc: None,
        })),
        loc: None,
    });
    let annotation = TypeAnnotation::from_ast(&ast_annotation);
    assert_eq!(annotation.to_string(), "[Int]");
    assert!(annotation.nullable());
}
