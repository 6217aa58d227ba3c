use crate::Lexer;
use crate::Source;
use crate::token::Token;
use crate::token::TokenKind;

fn lex_all(body: &str) -> Vec<Token<'_>> {
    // Leaking keeps this helper trivial; tests are short-lived processes.
    let source: &'static Source = Box::leak(Box::new(Source::new(body.to_string())));
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];
    loop {
        let token = lexer.advance().expect("lexes cleanly");
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}

fn lex_error(body: &str) -> crate::SyntaxError {
    let source = Source::new(body);
    let mut lexer = Lexer::new(&source);
    loop {
        match lexer.advance() {
            Ok(token) if token.kind == TokenKind::Eof => {
                panic!("expected a lex error for {body:?}")
            }
            Ok(_) => continue,
            Err(err) => return err,
        }
    }
}

mod punctuators_and_names {
    use super::*;

    #[test]
    fn lexes_a_simple_selection() {
        let kinds: Vec<TokenKind<'_>> =
            lex_all("{ name }").into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::BraceOpen,
            TokenKind::Name("name"),
            TokenKind::BraceClose,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn lexes_every_punctuator() {
        let kinds: Vec<TokenKind<'_>> =
            lex_all("! $ ( ) ... : = @ [ ] { | }").into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::Bang,
            TokenKind::Dollar,
            TokenKind::ParenOpen,
            TokenKind::ParenClose,
            TokenKind::Spread,
            TokenKind::Colon,
            TokenKind::Equals,
            TokenKind::At,
            TokenKind::BracketOpen,
            TokenKind::BracketClose,
            TokenKind::BraceOpen,
            TokenKind::Pipe,
            TokenKind::BraceClose,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn records_byte_spans() {
        let tokens = lex_all("{ name }");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 1));
        assert_eq!((tokens[1].start, tokens[1].end), (2, 6));
        assert_eq!((tokens[2].start, tokens[2].end), (7, 8));
    }

    #[test]
    fn skips_comments_and_commas() {
        let kinds: Vec<TokenKind<'_>> = lex_all("# leading comment\na, b # trailing\n,c")
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(kinds, vec![
            TokenKind::Name("a"),
            TokenKind::Name("b"),
            TokenKind::Name("c"),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn names_may_contain_underscores_and_digits() {
        let kinds: Vec<TokenKind<'_>> =
            lex_all("_foo9 __typename").into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::Name("_foo9"),
            TokenKind::Name("__typename"),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn rejects_unexpected_characters() {
        let err = lex_error("?");
        assert_eq!(err.description(), "Unexpected character \"?\".");
        assert_eq!(err.position(), 0);

        let err = lex_error("..");
        assert_eq!(err.description(), "Unexpected character \".\".");
    }
}

mod numbers {
    use super::*;

    #[test]
    fn lexes_int_literals() {
        let kinds: Vec<TokenKind<'_>> =
            lex_all("4 -4 0 9876").into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::Int("4"),
            TokenKind::Int("-4"),
            TokenKind::Int("0"),
            TokenKind::Int("9876"),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn lexes_float_literals() {
        let kinds: Vec<TokenKind<'_>> = lex_all("4.123 -4.123 0.123 123e4 123E4 123e-4 1.2e+3")
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(kinds, vec![
            TokenKind::Float("4.123"),
            TokenKind::Float("-4.123"),
            TokenKind::Float("0.123"),
            TokenKind::Float("123e4"),
            TokenKind::Float("123E4"),
            TokenKind::Float("123e-4"),
            TokenKind::Float("1.2e+3"),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn rejects_leading_zeros() {
        let err = lex_error("00");
        assert_eq!(
            err.description(),
            "Invalid number, unexpected digit after 0: \"0\".",
        );
        let err = lex_error("01");
        assert_eq!(
            err.description(),
            "Invalid number, unexpected digit after 0: \"1\".",
        );
    }

    #[test]
    fn rejects_incomplete_numbers() {
        let err = lex_error("1.");
        assert_eq!(err.description(), "Invalid number, expected digit but got: EOF.");

        let err = lex_error("1.A");
        assert_eq!(err.description(), "Invalid number, expected digit but got: \"A\".");

        let err = lex_error("-");
        assert_eq!(err.description(), "Invalid number, expected digit but got: EOF.");

        let err = lex_error("1.0e");
        assert_eq!(err.description(), "Invalid number, expected digit but got: EOF.");
    }
}

mod strings {
    use super::*;

    #[test]
    fn lexes_simple_strings() {
        let kinds: Vec<TokenKind<'_>> =
            lex_all("\"simple\" \"white space\"").into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::Str("simple".to_string()),
            TokenKind::Str("white space".to_string()),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn processes_escape_sequences() {
        let tokens = lex_all(r#""quote \" backslash \\ slash \/ controls \b\f\n\r\t""#);
        assert_eq!(
            tokens[0].kind,
            TokenKind::Str(
                "quote \" backslash \\ slash / controls \u{8}\u{c}\n\r\t".to_string()
            ),
        );
    }

    #[test]
    fn processes_unicode_escapes() {
        let tokens = lex_all(r#""unicode \u1234\u5678""#);
        assert_eq!(
            tokens[0].kind,
            TokenKind::Str("unicode \u{1234}\u{5678}".to_string()),
        );
    }

    #[test]
    fn rejects_unterminated_strings() {
        let err = lex_error("\"no end quote");
        assert_eq!(err.description(), "Unterminated string.");
        assert_eq!(err.position(), 0);

        let err = lex_error("\"multi\nline\"");
        assert_eq!(err.description(), "Unterminated string.");
    }

    #[test]
    fn rejects_invalid_escapes() {
        let err = lex_error(r#""bad \z escape""#);
        assert_eq!(err.description(), "Invalid character escape sequence: \\z.");

        let err = lex_error(r#""bad \uXYZA escape""#);
        assert_eq!(err.description(), "Invalid character escape sequence: \\uXYZA.");
    }
}

mod on_demand {
    use super::*;

    #[test]
    fn token_at_reads_from_any_offset() {
        let source = Source::new("{ a b }");
        let lexer = Lexer::new(&source);
        let token = lexer.token_at(2).unwrap();
        assert_eq!(token.kind, TokenKind::Name("a"));
        // Re-reading from the same offset is stable.
        assert_eq!(lexer.token_at(2).unwrap(), token);
        // Reading from inside whitespace finds the next token.
        let token = lexer.token_at(3).unwrap();
        assert_eq!(token.kind, TokenKind::Name("b"));
    }
}
