//! Turns GraphQL query-document source text into an [`ast::Document`].
//!
//! A thin recursive-descent parser over [`lexer::Lexer`]'s token stream,
//! assigning a [`NodeId`] to every spanned node as it's built. This module
//! (together with `lexer`) is the one piece of "the parser" the validator
//! would otherwise receive ready-made from a caller; it exists here only so
//! the rest of the crate and its tests have real documents to validate.

pub mod lexer;

use std::fmt;

use crate::ast::{
    Argument, Definition, Directive, Field, FragmentDefinition, FragmentSpread, InlineFragment,
    OperationDefinition, OperationType, Selection, SelectionSet, Type, Value, VariableDefinition,
};
use crate::span::{NodeId, NodeIdGenerator, SourcePosition, Span, Spanning};
use lexer::{Lexer, LexerError, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Lexer(LexerError, SourcePosition),
    UnexpectedToken {
        found: String,
        expected: String,
        at: SourcePosition,
    },
    UnexpectedEof {
        expected: String,
        at: SourcePosition,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lexer(err, at) => write!(f, "{err} at {at}"),
            ParseError::UnexpectedToken { found, expected, at } => {
                write!(f, "Expected {expected}, found {found} at {at}")
            }
            ParseError::UnexpectedEof { expected, at } => {
                write!(f, "Expected {expected}, found end of input at {at}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a complete query document, returning the definitions in source
/// order with freshly assigned [`NodeId`]s.
pub fn parse_document(source: &str) -> Result<Vec<Definition>, ParseError> {
    let mut parser = Parser::new(source)?;
    let doc = parser.parse_document()?;
    parser.expect_eof()?;
    Ok(doc)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: (Token, SourcePosition, SourcePosition),
    ids: NodeIdGenerator,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let first = Self::advance_lexer(&mut lexer)?;
        Ok(Parser {
            lexer,
            current: first,
            ids: NodeIdGenerator::new(),
        })
    }

    fn advance_lexer(
        lexer: &mut Lexer<'a>,
    ) -> Result<(Token, SourcePosition, SourcePosition), ParseError> {
        let tok = lexer
            .next_token()
            .map_err(|(err, at)| ParseError::Lexer(err, at))?;
        Ok((tok.token, tok.start, tok.end))
    }

    fn bump(&mut self) -> Result<(Token, SourcePosition, SourcePosition), ParseError> {
        let next = Self::advance_lexer(&mut self.lexer)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn peek(&self) -> &Token {
        &self.current.0
    }

    fn start_pos(&self) -> SourcePosition {
        self.current.1
    }

    fn next_id(&mut self) -> NodeId {
        self.ids.next()
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        if matches!(self.peek(), Token::Eof) {
            Ok(())
        } else {
            self.unexpected("end of input")
        }
    }

    fn unexpected<T>(&self, expected: &str) -> Result<T, ParseError> {
        let (tok, start, _) = &self.current;
        if matches!(tok, Token::Eof) {
            Err(ParseError::UnexpectedEof {
                expected: expected.into(),
                at: *start,
            })
        } else {
            Err(ParseError::UnexpectedToken {
                found: tok.to_string(),
                expected: expected.into(),
                at: *start,
            })
        }
    }

    fn expect_name(&mut self, what: &str) -> Result<Spanning<String>, ParseError> {
        let (tok, start, end) = self.bump()?;
        match tok {
            Token::Name(name) => Ok(Spanning::new(Span::new(start, end), self.next_id(), name)),
            _ => {
                self.current = (tok, start, end);
                self.unexpected(what)
            }
        }
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<(), ParseError> {
        match self.peek() {
            Token::Name(n) if n == kw => {
                self.bump()?;
                Ok(())
            }
            _ => self.unexpected(kw),
        }
    }

    fn peek_keyword(&self, kw: &str) -> bool {
        matches!(self.peek(), Token::Name(n) if n == kw)
    }

    fn expect_punct(&mut self, tok: Token, what: &str) -> Result<SourcePosition, ParseError> {
        if *self.peek() == tok {
            let (_, start, _) = self.bump()?;
            Ok(start)
        } else {
            self.unexpected(what)
        }
    }

    fn skip_punct(&mut self, tok: Token) -> Result<bool, ParseError> {
        if *self.peek() == tok {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_document(&mut self) -> Result<Vec<Definition>, ParseError> {
        let mut defs = Vec::new();
        while !matches!(self.peek(), Token::Eof) {
            defs.push(self.parse_definition()?);
        }
        Ok(defs)
    }

    fn parse_definition(&mut self) -> Result<Definition, ParseError> {
        if self.peek_keyword("fragment") {
            Ok(Definition::Fragment(self.parse_fragment_definition()?))
        } else {
            Ok(Definition::Operation(self.parse_operation_definition()?))
        }
    }

    fn parse_operation_definition(&mut self) -> Result<Spanning<OperationDefinition>, ParseError> {
        let start = self.start_pos();
        if matches!(self.peek(), Token::CurlyOpen) {
            let selection_set = self.parse_selection_set()?;
            let end = selection_set.span.end;
            let id = self.next_id();
            return Ok(Spanning::new(
                Span::new(start, end),
                id,
                OperationDefinition {
                    operation_type: OperationType::Query,
                    name: None,
                    variable_definitions: Vec::new(),
                    directives: Vec::new(),
                    selection_set,
                },
            ));
        }

        let operation_type = match self.peek() {
            Token::Name(n) if n == "query" => {
                self.bump()?;
                OperationType::Query
            }
            Token::Name(n) if n == "mutation" => {
                self.bump()?;
                OperationType::Mutation
            }
            Token::Name(n) if n == "subscription" => {
                self.bump()?;
                OperationType::Subscription
            }
            _ => return self.unexpected("query, mutation, subscription, or \"{\""),
        };

        let name = if matches!(self.peek(), Token::Name(_)) {
            Some(self.expect_name("operation name")?)
        } else {
            None
        };

        let variable_definitions = if matches!(self.peek(), Token::ParenOpen) {
            self.parse_variable_definitions()?
        } else {
            Vec::new()
        };

        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        let end = selection_set.span.end;
        let id = self.next_id();

        Ok(Spanning::new(
            Span::new(start, end),
            id,
            OperationDefinition {
                operation_type,
                name,
                variable_definitions,
                directives,
                selection_set,
            },
        ))
    }

    fn parse_fragment_definition(&mut self) -> Result<Spanning<FragmentDefinition>, ParseError> {
        let start = self.start_pos();
        self.expect_keyword("fragment")?;
        let name = self.expect_name("fragment name")?;
        self.expect_keyword("on")?;
        let type_condition = self.expect_name("type condition")?;
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        let end = selection_set.span.end;
        let id = self.next_id();

        Ok(Spanning::new(
            Span::new(start, end),
            id,
            FragmentDefinition {
                name,
                type_condition,
                directives,
                selection_set,
            },
        ))
    }

    fn parse_variable_definitions(&mut self) -> Result<Vec<Spanning<VariableDefinition>>, ParseError> {
        self.expect_punct(Token::ParenOpen, "\"(\"")?;
        let mut defs = Vec::new();
        while !matches!(self.peek(), Token::ParenClose) {
            defs.push(self.parse_variable_definition()?);
        }
        self.expect_punct(Token::ParenClose, "\")\"")?;
        Ok(defs)
    }

    fn parse_variable_definition(&mut self) -> Result<Spanning<VariableDefinition>, ParseError> {
        let start = self.start_pos();
        self.expect_punct(Token::Dollar, "\"$\"")?;
        let name = self.expect_name("variable name")?;
        self.expect_punct(Token::Colon, "\":\"")?;
        let var_type = self.parse_type()?;
        let default_value = if self.skip_punct(Token::Equals)? {
            Some(self.parse_value(true)?)
        } else {
            None
        };
        let end = default_value
            .as_ref()
            .map(|v| v.span.end)
            .unwrap_or(var_type.span.end);
        let id = self.next_id();

        Ok(Spanning::new(
            Span::new(start, end),
            id,
            VariableDefinition {
                name,
                var_type,
                default_value,
            },
        ))
    }

    fn parse_type(&mut self) -> Result<Spanning<Type>, ParseError> {
        let start = self.start_pos();
        let (inner, mut end) = if self.skip_punct(Token::BracketOpen)? {
            let element = self.parse_type()?;
            let close = self.expect_punct(Token::BracketClose, "\"]\"")?;
            (Type::List(Box::new(element.item)), close)
        } else {
            let name = self.expect_name("type name")?;
            (Type::Named(name.item), name.span.end)
        };

        let ty = if self.skip_punct(Token::Bang)? {
            end = self.current.1;
            Type::NonNull(Box::new(inner))
        } else {
            inner
        };

        let id = self.next_id();
        Ok(Spanning::new(Span::new(start, end), id, ty))
    }

    fn parse_directives(&mut self) -> Result<Vec<Spanning<Directive>>, ParseError> {
        let mut directives = Vec::new();
        while matches!(self.peek(), Token::At) {
            directives.push(self.parse_directive()?);
        }
        Ok(directives)
    }

    fn parse_directive(&mut self) -> Result<Spanning<Directive>, ParseError> {
        let start = self.start_pos();
        self.expect_punct(Token::At, "\"@\"")?;
        let name = self.expect_name("directive name")?;
        let arguments = self.parse_arguments()?;
        let end = arguments
            .last()
            .map(|a: &Spanning<Argument>| a.span.end)
            .unwrap_or(name.span.end);
        let id = self.next_id();
        Ok(Spanning::new(
            Span::new(start, end),
            id,
            Directive { name, arguments },
        ))
    }

    fn parse_arguments(&mut self) -> Result<Vec<Spanning<Argument>>, ParseError> {
        if !matches!(self.peek(), Token::ParenOpen) {
            return Ok(Vec::new());
        }
        self.bump()?;
        let mut args = Vec::new();
        while !matches!(self.peek(), Token::ParenClose) {
            args.push(self.parse_argument()?);
        }
        self.expect_punct(Token::ParenClose, "\")\"")?;
        Ok(args)
    }

    fn parse_argument(&mut self) -> Result<Spanning<Argument>, ParseError> {
        let start = self.start_pos();
        let name = self.expect_name("argument name")?;
        self.expect_punct(Token::Colon, "\":\"")?;
        let value = self.parse_value(false)?;
        let end = value.span.end;
        let id = self.next_id();
        Ok(Spanning::new(Span::new(start, end), id, Argument { name, value }))
    }

    fn parse_selection_set(&mut self) -> Result<SelectionSet, ParseError> {
        let start = self.expect_punct(Token::CurlyOpen, "\"{\"")?;
        let mut selections = Vec::new();
        while !matches!(self.peek(), Token::CurlyClose) {
            selections.push(self.parse_selection()?);
        }
        let end = self.expect_punct(Token::CurlyClose, "\"}\"")?;
        let id = self.next_id();
        Ok(SelectionSet {
            id,
            span: Span::new(start, end),
            selections,
        })
    }

    fn parse_selection(&mut self) -> Result<Selection, ParseError> {
        if matches!(self.peek(), Token::Ellipsis) {
            self.parse_fragment_or_inline_fragment()
        } else {
            Ok(Selection::Field(self.parse_field()?))
        }
    }

    fn parse_field(&mut self) -> Result<Spanning<Field>, ParseError> {
        let start = self.start_pos();
        let first = self.expect_name("field name")?;
        let (alias, name) = if self.skip_punct(Token::Colon)? {
            (Some(first), self.expect_name("field name")?)
        } else {
            (None, first)
        };

        let arguments = self.parse_arguments()?;
        let directives = self.parse_directives()?;
        let selection_set = if matches!(self.peek(), Token::CurlyOpen) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };

        let end = selection_set
            .as_ref()
            .map(|s| s.span.end)
            .or_else(|| directives.last().map(|d| d.span.end))
            .or_else(|| arguments.last().map(|a| a.span.end))
            .unwrap_or(name.span.end);
        let id = self.next_id();

        Ok(Spanning::new(
            Span::new(start, end),
            id,
            Field {
                alias,
                name,
                arguments,
                directives,
                selection_set,
            },
        ))
    }

    fn parse_fragment_or_inline_fragment(&mut self) -> Result<Selection, ParseError> {
        let start = self.start_pos();
        self.bump()?; // "..."

        if self.peek_keyword("on") {
            self.bump()?;
            let type_condition = Some(self.expect_name("type condition")?);
            let directives = self.parse_directives()?;
            let selection_set = self.parse_selection_set()?;
            let end = selection_set.span.end;
            let id = self.next_id();
            return Ok(Selection::InlineFragment(Spanning::new(
                Span::new(start, end),
                id,
                InlineFragment {
                    type_condition,
                    directives,
                    selection_set,
                },
            )));
        }

        if let Token::Name(n) = self.peek() {
            if n != "on" {
                let name = self.expect_name("fragment name")?;
                let directives = self.parse_directives()?;
                let end = directives.last().map(|d| d.span.end).unwrap_or(name.span.end);
                let id = self.next_id();
                return Ok(Selection::FragmentSpread(Spanning::new(
                    Span::new(start, end),
                    id,
                    FragmentSpread { name, directives },
                )));
            }
        }

        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        let end = selection_set.span.end;
        let id = self.next_id();
        Ok(Selection::InlineFragment(Spanning::new(
            Span::new(start, end),
            id,
            InlineFragment {
                type_condition: None,
                directives,
                selection_set,
            },
        )))
    }

    fn parse_value(&mut self, is_const: bool) -> Result<Spanning<Value>, ParseError> {
        let start = self.start_pos();
        let (tok, _, end) = self.bump()?;

        let value = match tok {
            Token::Dollar if is_const => return self.unexpected("a constant value"),
            Token::Dollar => {
                let name = self.expect_name("variable name")?;
                return Ok(Spanning::new(
                    Span::new(start, name.span.end),
                    self.next_id(),
                    Value::Variable(name.item),
                ));
            }
            Token::Int(i) => Value::Int(i),
            Token::Float(x) => Value::Float(x),
            Token::Str(s) => Value::String(s),
            Token::Name(n) if n == "true" => Value::Boolean(true),
            Token::Name(n) if n == "false" => Value::Boolean(false),
            Token::Name(n) if n == "null" => Value::Null,
            Token::Name(n) => Value::Enum(n),
            Token::BracketOpen => {
                self.current = (Token::BracketOpen, start, end);
                return self.parse_list_value(is_const);
            }
            Token::CurlyOpen => {
                self.current = (Token::CurlyOpen, start, end);
                return self.parse_object_value(is_const);
            }
            other => {
                self.current = (other, start, end);
                return self.unexpected("a value");
            }
        };

        Ok(Spanning::new(Span::new(start, end), self.next_id(), value))
    }

    fn parse_list_value(&mut self, is_const: bool) -> Result<Spanning<Value>, ParseError> {
        let start = self.expect_punct(Token::BracketOpen, "\"[\"")?;
        let mut items = Vec::new();
        while !matches!(self.peek(), Token::BracketClose) {
            items.push(self.parse_value(is_const)?);
        }
        let end = self.expect_punct(Token::BracketClose, "\"]\"")?;
        Ok(Spanning::new(
            Span::new(start, end),
            self.next_id(),
            Value::List(items),
        ))
    }

    fn parse_object_value(&mut self, is_const: bool) -> Result<Spanning<Value>, ParseError> {
        let start = self.expect_punct(Token::CurlyOpen, "\"{\"")?;
        let mut fields = Vec::new();
        while !matches!(self.peek(), Token::CurlyClose) {
            let name = self.expect_name("object field name")?;
            self.expect_punct(Token::Colon, "\":\"")?;
            let value = self.parse_value(is_const)?;
            fields.push((name, value));
        }
        let end = self.expect_punct(Token::CurlyClose, "\"}\"")?;
        Ok(Spanning::new(
            Span::new(start, end),
            self.next_id(),
            Value::Object(fields),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_query() {
        let doc = parse_document("{ hero { name } }").unwrap();
        assert_eq!(doc.len(), 1);
        let Definition::Operation(op) = &doc[0] else {
            panic!("expected an operation");
        };
        assert_eq!(op.item.operation_type, OperationType::Query);
        assert_eq!(op.item.selection_set.selections.len(), 1);
    }

    #[test]
    fn parses_named_operation_with_variables_and_directives() {
        let doc = parse_document(
            r#"query Hero($episode: Episode, $withFriends: Boolean = true) {
                hero(episode: $episode) {
                    name @include(if: $withFriends)
                }
            }"#,
        )
        .unwrap();
        let Definition::Operation(op) = &doc[0] else {
            panic!("expected an operation");
        };
        assert_eq!(op.item.name.as_ref().unwrap().item, "Hero");
        assert_eq!(op.item.variable_definitions.len(), 2);
        assert!(op.item.variable_definitions[1].item.default_value.is_some());
    }

    #[test]
    fn parses_fragments_and_inline_fragments() {
        let doc = parse_document(
            r#"{
                hero {
                    ...heroFields
                    ... on Droid {
                        primaryFunction
                    }
                    ... @skip(if: true) {
                        name
                    }
                }
            }
            fragment heroFields on Character {
                name
            }"#,
        )
        .unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn assigns_distinct_node_ids() {
        let doc = parse_document("{ a b }").unwrap();
        let Definition::Operation(op) = &doc[0] else {
            panic!("expected an operation");
        };
        let Selection::Field(a) = &op.item.selection_set.selections[0] else {
            panic!()
        };
        let Selection::Field(b) = &op.item.selection_set.selections[1] else {
            panic!()
        };
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn reports_unexpected_token() {
        let err = parse_document("{ a(").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }
}
