use crate::Value;
use crate::types::MAX_SAFE_INT;
use crate::types::ScalarType;
use crate::types::builtin_scalars;

fn builtin(name: &str) -> &'static ScalarType {
    builtin_scalars()
        .iter()
        .find(|scalar| scalar.name() == name)
        .expect("builtin scalar exists")
}

mod int {
    use super::*;

    #[test]
    fn serializes_numerics_and_numeric_strings() {
        let int = builtin("Int");
        assert_eq!(int.serialize(&Value::Int(42)), Some(Value::Int(42)));
        assert_eq!(int.serialize(&Value::Float(1.9)), Some(Value::Int(1)));
        assert_eq!(
            int.serialize(&Value::String("123".to_string())),
            Some(Value::Int(123)),
        );
        assert_eq!(int.serialize(&Value::Boolean(true)), Some(Value::Int(1)));
        assert_eq!(int.serialize(&Value::Boolean(false)), Some(Value::Int(0)));
    }

    #[test]
    fn clamps_to_the_safe_53_bit_range() {
        let int = builtin("Int");
        assert_eq!(
            int.serialize(&Value::Int(MAX_SAFE_INT)),
            Some(Value::Int(MAX_SAFE_INT)),
        );
        assert_eq!(int.serialize(&Value::Int(MAX_SAFE_INT + 1)), None);
        assert_eq!(int.serialize(&Value::Int(i64::MIN)), None);
        assert_eq!(int.serialize(&Value::Float(1e30)), None);
        assert_eq!(int.serialize(&Value::Float(f64::NAN)), None);
        assert_eq!(int.serialize(&Value::Float(f64::INFINITY)), None);
    }

    #[test]
    fn rejects_non_numeric_values() {
        let int = builtin("Int");
        assert_eq!(int.serialize(&Value::String("abc".to_string())), None);
        assert_eq!(int.serialize(&Value::Null), None);
        assert_eq!(int.serialize(&Value::List(vec![])), None);
    }
}

mod float {
    use super::*;

    #[test]
    fn accepts_numerics_and_numeric_strings() {
        let float = builtin("Float");
        assert_eq!(float.serialize(&Value::Int(2)), Some(Value::Float(2.0)));
        assert_eq!(float.serialize(&Value::Float(1.5)), Some(Value::Float(1.5)));
        assert_eq!(
            float.serialize(&Value::String("1.5".to_string())),
            Some(Value::Float(1.5)),
        );
        assert_eq!(float.serialize(&Value::String("nope".to_string())), None);
    }
}

mod boolean {
    use super::*;

    #[test]
    fn coerces_strings_and_numerics() {
        let boolean = builtin("Boolean");
        assert_eq!(
            boolean.serialize(&Value::String(String::new())),
            Some(Value::Boolean(false)),
        );
        assert_eq!(
            boolean.serialize(&Value::String("false".to_string())),
            Some(Value::Boolean(false)),
        );
        assert_eq!(
            boolean.serialize(&Value::String("anything else".to_string())),
            Some(Value::Boolean(true)),
        );
        assert_eq!(boolean.serialize(&Value::Int(0)), Some(Value::Boolean(false)));
        assert_eq!(boolean.serialize(&Value::Int(7)), Some(Value::Boolean(true)));
        assert_eq!(
            boolean.serialize(&Value::Float(0.0)),
            Some(Value::Boolean(false)),
        );
    }
}

mod string_and_id {
    use super::*;
    use quell_parser::ast;

    #[test]
    fn string_serializes_scalars() {
        let string = builtin("String");
        assert_eq!(
            string.serialize(&Value::Int(1)),
            Some(Value::String("1".to_string())),
        );
        assert_eq!(
            string.serialize(&Value::Boolean(true)),
            Some(Value::String("true".to_string())),
        );
        assert_eq!(string.serialize(&Value::List(vec![])), None);
    }

    #[test]
    fn id_accepts_int_and_string_literals() {
        let id = builtin("ID");
        let int_literal = ast::Value::Int(ast::IntValue {
            value: "123".to_string(),
            loc: None,
        });
        let string_literal = ast::Value::String(ast::StringValue {
            value: "abc".to_string(),
            loc: None,
        });
        let boolean_literal = ast::Value::Boolean(ast::BooleanValue {
            value: true,
            loc: None,
        });
        assert_eq!(id.parse_literal(&int_literal), Some(Value::String("123".to_string())));
        assert_eq!(
            id.parse_literal(&string_literal),
            Some(Value::String("abc".to_string())),
        );
        assert_eq!(id.parse_literal(&boolean_literal), None);
    }
}

mod directives {
    use crate::types::include_directive;
    use crate::types::skip_directive;

    #[test]
    fn builtin_directives_take_a_non_null_boolean() {
        for directive in [skip_directive(), include_directive()] {
            assert_eq!(directive.arguments().len(), 1);
            let argument = &directive.arguments()[0];
            assert_eq!(argument.name(), "if");
            assert_eq!(argument.type_annotation().to_string(), "Boolean!");
            assert!(directive.allows_field());
            assert!(directive.allows_fragment());
            assert!(directive.allows_operation());
        }
    }
}
