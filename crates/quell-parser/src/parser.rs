//! Recursive descent parser for GraphQL documents.
//!
//! Single-pass, one token of lookahead. Every `parse_*` method either
//! returns a finished node or fails with a [`SyntaxError`]; partial ASTs are
//! never produced. An anonymous top-level selection set parses as a query
//! operation.

use crate::Lexer;
use crate::Source;
use crate::SyntaxError;
use crate::ast;
use crate::token::Token;
use crate::token::TokenKind;
use smallvec::SmallVec;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SyntaxError>;

/// Options controlling what the parser attaches to produced nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// Skip `loc` entirely on every node.
    pub no_location: bool,
    /// Attach byte spans but not the `Arc<Source>` back-pointer.
    pub no_source: bool,
}

/// Parses a complete document with default options.
pub fn parse(source: impl Into<Source>) -> Result<ast::Document> {
    parse_with_options(source, ParseOptions::default())
}

/// Parses a complete document.
pub fn parse_with_options(
    source: impl Into<Source>,
    options: ParseOptions,
) -> Result<ast::Document> {
    let source = Arc::new(source.into());
    let mut parser = Parser::new(&source, options)?;
    parser.parse_document()
}

struct Parser<'src> {
    source: &'src Arc<Source>,
    lexer: Lexer<'src>,
    current: Token<'src>,
    /// End offset of the most recently consumed token, used to close node
    /// spans.
    prev_end: usize,
    options: ParseOptions,
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Maximum nesting depth for selection sets, list/object values, and
    /// type annotations. Guards against stack overflow on adversarial
    /// inputs like `[[[[...`.
    const MAX_DEPTH: usize = 64;

    fn new(source: &'src Arc<Source>, options: ParseOptions) -> Result<Self> {
        let lexer = Lexer::new(source);
        let current = lexer.token_at(0)?;
        Ok(Self {
            source,
            lexer,
            current,
            prev_end: 0,
            options,
            depth: 0,
        })
    }

    // =========================================================================
    // Token plumbing
    // =========================================================================

    /// Consumes the current token, replacing it with the next one.
    fn advance(&mut self) -> Result<Token<'src>> {
        let next = self.lexer.token_at(self.current.end)?;
        let consumed = std::mem::replace(&mut self.current, next);
        self.prev_end = consumed.end;
        Ok(consumed)
    }

    /// Consumes the current token if it matches `kind` (punctuators only).
    fn skip(&mut self, kind: &TokenKind<'static>) -> Result<bool> {
        if self.current.kind == *kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: &TokenKind<'static>) -> Result<Token<'src>> {
        if self.current.kind == *kind {
            self.advance()
        } else {
            Err(SyntaxError::new(
                self.source,
                self.current.start,
                format!(
                    "Expected {}, found {}",
                    kind.description(),
                    self.current.kind.description(),
                ),
            ))
        }
    }

    fn expect_keyword(&mut self, value: &str) -> Result<Token<'src>> {
        if self.peek_keyword(value) {
            self.advance()
        } else {
            Err(SyntaxError::new(
                self.source,
                self.current.start,
                format!(
                    "Expected \"{}\", found {}",
                    value,
                    self.current.kind.description(),
                ),
            ))
        }
    }

    fn peek_keyword(&self, value: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Name(name) if *name == value)
    }

    fn unexpected(&self) -> SyntaxError {
        SyntaxError::new(
            self.source,
            self.current.start,
            format!("Unexpected {}", self.current.kind.description()),
        )
    }

    fn loc(&self, start: usize) -> Option<ast::AstLocation> {
        if self.options.no_location {
            return None;
        }
        let source = if self.options.no_source {
            None
        } else {
            Some(Arc::clone(self.source))
        };
        Some(ast::AstLocation::new(start, self.prev_end, source))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > Self::MAX_DEPTH {
            return Err(SyntaxError::new(
                self.source,
                self.current.start,
                "Document nesting exceeds maximum allowed depth.",
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // =========================================================================
    // Document
    // =========================================================================

    fn parse_document(&mut self) -> Result<ast::Document> {
        let start = self.current.start;
        let mut definitions = vec![];
        loop {
            if self.current.kind == TokenKind::Eof {
                if definitions.is_empty() {
                    return Err(self.unexpected());
                }
                self.advance()?;
                break;
            }

            if self.current.kind == TokenKind::BraceOpen {
                // Anonymous operation shorthand.
                let start = self.current.start;
                let selection_set = self.parse_selection_set()?;
                definitions.push(ast::Definition::Operation(ast::OperationDefinition {
                    kind: ast::OperationKind::Query,
                    name: None,
                    variable_definitions: vec![],
                    directives: vec![],
                    selection_set,
                    loc: self.loc(start),
                }));
                continue;
            }

            let keyword = match &self.current.kind {
                TokenKind::Name(name) => *name,
                _ => return Err(self.unexpected()),
            };
            match keyword {
                "query" | "mutation" | "subscription" => {
                    definitions.push(ast::Definition::Operation(
                        self.parse_operation_definition()?,
                    ));
                }
                "fragment" => {
                    definitions.push(ast::Definition::Fragment(
                        self.parse_fragment_definition()?,
                    ));
                }
                "type" | "interface" | "union" | "scalar" | "enum" | "input" | "extend" => {
                    definitions.push(ast::Definition::TypeSystem(
                        self.parse_type_system_definition()?,
                    ));
                }
                _ => return Err(self.unexpected()),
            }
        }
        Ok(ast::Document {
            definitions,
            loc: self.loc(start),
        })
    }

    // =========================================================================
    // Operations
    // =========================================================================

    fn parse_operation_definition(&mut self) -> Result<ast::OperationDefinition> {
        let start = self.current.start;
        let kind = match self.parse_name()?.value.as_str() {
            "query" => ast::OperationKind::Query,
            "mutation" => ast::OperationKind::Mutation,
            "subscription" => ast::OperationKind::Subscription,
            _ => unreachable!("caller checked the operation keyword"),
        };
        let name = if matches!(&self.current.kind, TokenKind::Name(_)) {
            Some(self.parse_name()?)
        } else {
            None
        };
        let variable_definitions = self.parse_variable_definitions()?;
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::OperationDefinition {
            kind,
            name,
            variable_definitions,
            directives,
            selection_set,
            loc: self.loc(start),
        })
    }

    fn parse_variable_definitions(&mut self) -> Result<Vec<ast::VariableDefinition>> {
        if self.current.kind != TokenKind::ParenOpen {
            return Ok(vec![]);
        }
        self.advance()?;
        let mut definitions = vec![];
        loop {
            definitions.push(self.parse_variable_definition()?);
            if self.skip(&TokenKind::ParenClose)? {
                break;
            }
        }
        Ok(definitions)
    }

    fn parse_variable_definition(&mut self) -> Result<ast::VariableDefinition> {
        let start = self.current.start;
        let variable = self.parse_variable()?;
        self.expect(&TokenKind::Colon)?;
        let annotation = self.parse_type_annotation()?;
        let default_value = if self.skip(&TokenKind::Equals)? {
            Some(self.parse_value(/* is_const = */ true)?)
        } else {
            None
        };
        Ok(ast::VariableDefinition {
            variable,
            annotation,
            default_value,
            loc: self.loc(start),
        })
    }

    fn parse_variable(&mut self) -> Result<ast::Variable> {
        let start = self.current.start;
        self.expect(&TokenKind::Dollar)?;
        let name = self.parse_name()?;
        Ok(ast::Variable {
            name,
            loc: self.loc(start),
        })
    }

    // =========================================================================
    // Selections
    // =========================================================================

    fn parse_selection_set(&mut self) -> Result<ast::SelectionSet> {
        self.enter()?;
        let start = self.current.start;
        self.expect(&TokenKind::BraceOpen)?;
        let mut selections = vec![];
        loop {
            selections.push(self.parse_selection()?);
            if self.skip(&TokenKind::BraceClose)? {
                break;
            }
        }
        self.leave();
        Ok(ast::SelectionSet {
            selections,
            loc: self.loc(start),
        })
    }

    fn parse_selection(&mut self) -> Result<ast::Selection> {
        if self.current.kind == TokenKind::Spread {
            self.parse_fragment_selection()
        } else {
            Ok(ast::Selection::Field(self.parse_field()?))
        }
    }

    fn parse_field(&mut self) -> Result<ast::Field> {
        let start = self.current.start;
        let name_or_alias = self.parse_name()?;
        let (alias, name) = if self.skip(&TokenKind::Colon)? {
            (Some(name_or_alias), self.parse_name()?)
        } else {
            (None, name_or_alias)
        };
        let arguments = self.parse_arguments()?;
        let directives = self.parse_directives()?;
        let selection_set = if self.current.kind == TokenKind::BraceOpen {
            Some(self.parse_selection_set()?)
        } else {
            None
        };
        Ok(ast::Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
            loc: self.loc(start),
        })
    }

    fn parse_arguments(&mut self) -> Result<Vec<ast::Argument>> {
        if self.current.kind != TokenKind::ParenOpen {
            return Ok(vec![]);
        }
        self.advance()?;
        let mut arguments = vec![];
        loop {
            arguments.push(self.parse_argument()?);
            if self.skip(&TokenKind::ParenClose)? {
                break;
            }
        }
        Ok(arguments)
    }

    fn parse_argument(&mut self) -> Result<ast::Argument> {
        let start = self.current.start;
        let name = self.parse_name()?;
        self.expect(&TokenKind::Colon)?;
        let value = self.parse_value(/* is_const = */ false)?;
        Ok(ast::Argument {
            name,
            value,
            loc: self.loc(start),
        })
    }

    // =========================================================================
    // Fragments
    // =========================================================================

    /// Parses the selection after a `...`: either a named fragment spread or
    /// an inline fragment (with or without a type condition).
    fn parse_fragment_selection(&mut self) -> Result<ast::Selection> {
        let start = self.current.start;
        self.expect(&TokenKind::Spread)?;

        let is_named_spread =
            matches!(&self.current.kind, TokenKind::Name(name) if *name != "on");
        if is_named_spread {
            let name = self.parse_name()?;
            let directives = self.parse_directives()?;
            return Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
                name,
                directives,
                loc: self.loc(start),
            }));
        }

        let type_condition = if self.peek_keyword("on") {
            self.advance()?;
            Some(self.parse_name()?)
        } else {
            None
        };
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::Selection::InlineFragment(ast::InlineFragment {
            type_condition,
            directives,
            selection_set,
            loc: self.loc(start),
        }))
    }

    fn parse_fragment_definition(&mut self) -> Result<ast::FragmentDefinition> {
        let start = self.current.start;
        self.expect_keyword("fragment")?;
        let name = self.parse_fragment_name()?;
        self.expect_keyword("on")?;
        let type_condition = self.parse_name()?;
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
            loc: self.loc(start),
        })
    }

    fn parse_fragment_name(&mut self) -> Result<ast::Name> {
        if self.peek_keyword("on") {
            return Err(self.unexpected());
        }
        self.parse_name()
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_value(&mut self, is_const: bool) -> Result<ast::Value> {
        let start = self.current.start;
        match &self.current.kind {
            TokenKind::BracketOpen => self.parse_list_value(is_const),
            TokenKind::BraceOpen => self.parse_object_value(is_const),
            TokenKind::Dollar => {
                if is_const {
                    return Err(SyntaxError::new(
                        self.source,
                        self.current.start,
                        "Unexpected variable in constant value.",
                    ));
                }
                Ok(ast::Value::Variable(self.parse_variable()?))
            }
            TokenKind::Int(raw) => {
                let value = raw.to_string();
                self.advance()?;
                Ok(ast::Value::Int(ast::IntValue {
                    value,
                    loc: self.loc(start),
                }))
            }
            TokenKind::Float(raw) => {
                let value = raw.to_string();
                self.advance()?;
                Ok(ast::Value::Float(ast::FloatValue {
                    value,
                    loc: self.loc(start),
                }))
            }
            TokenKind::Str(value) => {
                let value = value.clone();
                self.advance()?;
                Ok(ast::Value::String(ast::StringValue {
                    value,
                    loc: self.loc(start),
                }))
            }
            TokenKind::Name(name) => match *name {
                "true" | "false" => {
                    let value = *name == "true";
                    self.advance()?;
                    Ok(ast::Value::Boolean(ast::BooleanValue {
                        value,
                        loc: self.loc(start),
                    }))
                }
                "null" => {
                    self.advance()?;
                    Ok(ast::Value::Null(ast::NullValue {
                        loc: self.loc(start),
                    }))
                }
                _ => {
                    let value = name.to_string();
                    self.advance()?;
                    Ok(ast::Value::Enum(ast::EnumValue {
                        value,
                        loc: self.loc(start),
                    }))
                }
            },
            _ => Err(self.unexpected()),
        }
    }

    fn parse_list_value(&mut self, is_const: bool) -> Result<ast::Value> {
        self.enter()?;
        let start = self.current.start;
        self.expect(&TokenKind::BracketOpen)?;
        let mut values = vec![];
        while !self.skip(&TokenKind::BracketClose)? {
            values.push(self.parse_value(is_const)?);
        }
        self.leave();
        Ok(ast::Value::List(ast::ListValue {
            values,
            loc: self.loc(start),
        }))
    }

    fn parse_object_value(&mut self, is_const: bool) -> Result<ast::Value> {
        self.enter()?;
        let start = self.current.start;
        self.expect(&TokenKind::BraceOpen)?;
        let mut fields: Vec<ast::ObjectField> = vec![];
        // Object literals are small in practice; a linear scan over a stack
        // buffer beats hashing here.
        let mut seen_names: SmallVec<[String; 8]> = SmallVec::new();
        while !self.skip(&TokenKind::BraceClose)? {
            let field_start = self.current.start;
            let name = self.parse_name()?;
            if seen_names.iter().any(|seen| seen.as_str() == name.as_str()) {
                return Err(SyntaxError::new(
                    self.source,
                    field_start,
                    format!("Duplicate input object field {}.", name.value),
                ));
            }
            seen_names.push(name.value.clone());
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_value(is_const)?;
            fields.push(ast::ObjectField {
                name,
                value,
                loc: self.loc(field_start),
            });
        }
        self.leave();
        Ok(ast::Value::Object(ast::ObjectValue {
            fields,
            loc: self.loc(start),
        }))
    }

    // =========================================================================
    // Directives and type annotations
    // =========================================================================

    fn parse_directives(&mut self) -> Result<Vec<ast::DirectiveAnnotation>> {
        let mut directives = vec![];
        while self.current.kind == TokenKind::At {
            let start = self.current.start;
            self.advance()?;
            let name = self.parse_name()?;
            let arguments = self.parse_arguments()?;
            directives.push(ast::DirectiveAnnotation {
                name,
                arguments,
                loc: self.loc(start),
            });
        }
        Ok(directives)
    }

    fn parse_type_annotation(&mut self) -> Result<ast::TypeAnnotation> {
        self.enter()?;
        let start = self.current.start;
        let inner = if self.skip(&TokenKind::BracketOpen)? {
            let inner = self.parse_type_annotation()?;
            self.expect(&TokenKind::BracketClose)?;
            ast::TypeAnnotation::List(ast::ListTypeAnnotation {
                inner: Box::new(inner),
                loc: self.loc(start),
            })
        } else {
            let name = self.parse_name()?;
            ast::TypeAnnotation::Named(ast::NamedTypeAnnotation {
                name,
                loc: self.loc(start),
            })
        };
        self.leave();
        if self.skip(&TokenKind::Bang)? {
            Ok(ast::TypeAnnotation::NonNull(ast::NonNullTypeAnnotation {
                inner: Box::new(inner),
                loc: self.loc(start),
            }))
        } else {
            Ok(inner)
        }
    }

    fn parse_name(&mut self) -> Result<ast::Name> {
        let start = self.current.start;
        match self.current.kind {
            TokenKind::Name(value) => {
                let value = value.to_string();
                self.advance()?;
                Ok(ast::Name::new(value, self.loc(start)))
            }
            _ => Err(SyntaxError::new(
                self.source,
                self.current.start,
                format!("Expected Name, found {}", self.current.kind.description()),
            )),
        }
    }

    // =========================================================================
    // Type-system definitions
    // =========================================================================

    fn parse_type_system_definition(&mut self) -> Result<ast::TypeSystemDefinition> {
        let keyword = match &self.current.kind {
            TokenKind::Name(name) => *name,
            _ => return Err(self.unexpected()),
        };
        match keyword {
            "type" => {
                Ok(ast::TypeSystemDefinition::Object(self.parse_object_type_definition()?))
            }
            "interface" => Ok(ast::TypeSystemDefinition::Interface(
                self.parse_interface_type_definition()?,
            )),
            "union" => {
                Ok(ast::TypeSystemDefinition::Union(self.parse_union_type_definition()?))
            }
            "scalar" => {
                Ok(ast::TypeSystemDefinition::Scalar(self.parse_scalar_type_definition()?))
            }
            "enum" => {
                Ok(ast::TypeSystemDefinition::Enum(self.parse_enum_type_definition()?))
            }
            "input" => Ok(ast::TypeSystemDefinition::InputObject(
                self.parse_input_object_type_definition()?,
            )),
            "extend" => {
                Ok(ast::TypeSystemDefinition::TypeExtension(self.parse_type_extension()?))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_object_type_definition(&mut self) -> Result<ast::ObjectTypeDefinition> {
        let start = self.current.start;
        self.expect_keyword("type")?;
        let name = self.parse_name()?;
        let interfaces = if self.peek_keyword("implements") {
            self.advance()?;
            let mut interfaces = vec![self.parse_name()?];
            while matches!(&self.current.kind, TokenKind::Name(_)) {
                interfaces.push(self.parse_name()?);
            }
            interfaces
        } else {
            vec![]
        };
        let fields = self.parse_field_definitions()?;
        Ok(ast::ObjectTypeDefinition {
            name,
            interfaces,
            fields,
            loc: self.loc(start),
        })
    }

    fn parse_field_definitions(&mut self) -> Result<Vec<ast::FieldDefinition>> {
        self.expect(&TokenKind::BraceOpen)?;
        let mut fields = vec![];
        loop {
            fields.push(self.parse_field_definition()?);
            if self.skip(&TokenKind::BraceClose)? {
                break;
            }
        }
        Ok(fields)
    }

    fn parse_field_definition(&mut self) -> Result<ast::FieldDefinition> {
        let start = self.current.start;
        let name = self.parse_name()?;
        let arguments = self.parse_input_value_definitions(
            &TokenKind::ParenOpen,
            &TokenKind::ParenClose,
        )?;
        self.expect(&TokenKind::Colon)?;
        let annotation = self.parse_type_annotation()?;
        Ok(ast::FieldDefinition {
            name,
            arguments,
            annotation,
            loc: self.loc(start),
        })
    }

    fn parse_input_value_definitions(
        &mut self,
        open: &TokenKind<'static>,
        close: &TokenKind<'static>,
    ) -> Result<Vec<ast::InputValueDefinition>> {
        if self.current.kind != *open {
            return Ok(vec![]);
        }
        self.advance()?;
        let mut definitions = vec![];
        while !self.skip(close)? {
            definitions.push(self.parse_input_value_definition()?);
        }
        Ok(definitions)
    }

    fn parse_input_value_definition(&mut self) -> Result<ast::InputValueDefinition> {
        let start = self.current.start;
        let name = self.parse_name()?;
        self.expect(&TokenKind::Colon)?;
        let annotation = self.parse_type_annotation()?;
        let default_value = if self.skip(&TokenKind::Equals)? {
            Some(self.parse_value(/* is_const = */ true)?)
        } else {
            None
        };
        Ok(ast::InputValueDefinition {
            name,
            annotation,
            default_value,
            loc: self.loc(start),
        })
    }

    fn parse_interface_type_definition(&mut self) -> Result<ast::InterfaceTypeDefinition> {
        let start = self.current.start;
        self.expect_keyword("interface")?;
        let name = self.parse_name()?;
        let fields = self.parse_field_definitions()?;
        Ok(ast::InterfaceTypeDefinition {
            name,
            fields,
            loc: self.loc(start),
        })
    }

    fn parse_union_type_definition(&mut self) -> Result<ast::UnionTypeDefinition> {
        let start = self.current.start;
        self.expect_keyword("union")?;
        let name = self.parse_name()?;
        self.expect(&TokenKind::Equals)?;
        let mut members = vec![self.parse_name()?];
        while self.skip(&TokenKind::Pipe)? {
            members.push(self.parse_name()?);
        }
        Ok(ast::UnionTypeDefinition {
            name,
            members,
            loc: self.loc(start),
        })
    }

    fn parse_scalar_type_definition(&mut self) -> Result<ast::ScalarTypeDefinition> {
        let start = self.current.start;
        self.expect_keyword("scalar")?;
        let name = self.parse_name()?;
        Ok(ast::ScalarTypeDefinition {
            name,
            loc: self.loc(start),
        })
    }

    fn parse_enum_type_definition(&mut self) -> Result<ast::EnumTypeDefinition> {
        let start = self.current.start;
        self.expect_keyword("enum")?;
        let name = self.parse_name()?;
        self.expect(&TokenKind::BraceOpen)?;
        let mut values = vec![];
        loop {
            let value_start = self.current.start;
            let value_name = self.parse_name()?;
            values.push(ast::EnumValueDefinition {
                name: value_name,
                loc: self.loc(value_start),
            });
            if self.skip(&TokenKind::BraceClose)? {
                break;
            }
        }
        Ok(ast::EnumTypeDefinition {
            name,
            values,
            loc: self.loc(start),
        })
    }

    fn parse_input_object_type_definition(
        &mut self,
    ) -> Result<ast::InputObjectTypeDefinition> {
        let start = self.current.start;
        self.expect_keyword("input")?;
        let name = self.parse_name()?;
        self.expect(&TokenKind::BraceOpen)?;
        let mut fields = vec![];
        loop {
            fields.push(self.parse_input_value_definition()?);
            if self.skip(&TokenKind::BraceClose)? {
                break;
            }
        }
        Ok(ast::InputObjectTypeDefinition {
            name,
            fields,
            loc: self.loc(start),
        })
    }

    fn parse_type_extension(&mut self) -> Result<ast::TypeExtension> {
        let start = self.current.start;
        self.expect_keyword("extend")?;
        let definition = self.parse_object_type_definition()?;
        Ok(ast::TypeExtension {
            definition,
            loc: self.loc(start),
        })
    }
}
