//! Tokenizer for the GraphQL query language.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::span::SourcePosition;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Name(String),
    Int(i64),
    Float(f64),
    Str(String),
    Bang,
    Dollar,
    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    CurlyOpen,
    CurlyClose,
    Ellipsis,
    Colon,
    Equals,
    At,
    Pipe,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(n) => write!(f, "{n}"),
            Token::Int(i) => write!(f, "{i}"),
            Token::Float(x) => write!(f, "{x}"),
            Token::Str(s) => write!(f, "{s:?}"),
            Token::Bang => write!(f, "!"),
            Token::Dollar => write!(f, "$"),
            Token::ParenOpen => write!(f, "("),
            Token::ParenClose => write!(f, ")"),
            Token::BracketOpen => write!(f, "["),
            Token::BracketClose => write!(f, "]"),
            Token::CurlyOpen => write!(f, "{{"),
            Token::CurlyClose => write!(f, "}}"),
            Token::Ellipsis => write!(f, "..."),
            Token::Colon => write!(f, ":"),
            Token::Equals => write!(f, "="),
            Token::At => write!(f, "@"),
            Token::Pipe => write!(f, "|"),
            Token::Eof => write!(f, "<EOF>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    UnknownCharacter(char),
    UnexpectedCharacter(char),
    UnterminatedString,
    UnknownEscapeSequence(char),
    UnexpectedEndOfFile,
    InvalidNumber,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::UnknownCharacter(c) => write!(f, "Unknown character \"{c}\""),
            LexerError::UnexpectedCharacter(c) => write!(f, "Unexpected character \"{c}\""),
            LexerError::UnterminatedString => write!(f, "Unterminated string literal"),
            LexerError::UnknownEscapeSequence(c) => write!(f, "Unknown escape sequence \"\\{c}\""),
            LexerError::UnexpectedEndOfFile => write!(f, "Unexpected end of input"),
            LexerError::InvalidNumber => write!(f, "Invalid number literal"),
        }
    }
}

impl std::error::Error for LexerError {}

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    pos: SourcePosition,
}

pub struct LexedToken {
    pub token: Token,
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            chars: source.char_indices().peekable(),
            pos: SourcePosition::start_of_file(),
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        if c == '\n' {
            self.pos.advance_line();
        } else {
            self.pos.advance_col();
        }
        Some(c)
    }

    fn skip_ignored(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() || c == ',' => {
                    self.bump();
                }
                Some('#') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('\u{FEFF}') => {
                    self.bump();
                }
                _ => break,
            }
        }
    }

    pub fn next_token(&mut self) -> Result<LexedToken, (LexerError, SourcePosition)> {
        self.skip_ignored();
        let start = self.pos;

        let Some(c) = self.peek_char() else {
            return Ok(LexedToken {
                token: Token::Eof,
                start,
                end: start,
            });
        };

        let token = match c {
            '!' => {
                self.bump();
                Token::Bang
            }
            '$' => {
                self.bump();
                Token::Dollar
            }
            '(' => {
                self.bump();
                Token::ParenOpen
            }
            ')' => {
                self.bump();
                Token::ParenClose
            }
            '[' => {
                self.bump();
                Token::BracketOpen
            }
            ']' => {
                self.bump();
                Token::BracketClose
            }
            '{' => {
                self.bump();
                Token::CurlyOpen
            }
            '}' => {
                self.bump();
                Token::CurlyClose
            }
            ':' => {
                self.bump();
                Token::Colon
            }
            '=' => {
                self.bump();
                Token::Equals
            }
            '@' => {
                self.bump();
                Token::At
            }
            '|' => {
                self.bump();
                Token::Pipe
            }
            '.' => {
                for _ in 0..3 {
                    match self.peek_char() {
                        Some('.') => {
                            self.bump();
                        }
                        _ => return Err((LexerError::UnexpectedCharacter('.'), start)),
                    }
                }
                Token::Ellipsis
            }
            '"' => return self.read_string(start),
            c if c == '_' || c.is_ascii_alphabetic() => self.read_name(),
            c if c == '-' || c.is_ascii_digit() => return self.read_number(start),
            c => return Err((LexerError::UnknownCharacter(c), start)),
        };

        Ok(LexedToken {
            token,
            start,
            end: self.pos,
        })
    }

    fn read_name(&mut self) -> Token {
        let mut name = String::new();
        while let Some(c) = self.peek_char() {
            if c == '_' || c.is_ascii_alphanumeric() {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Token::Name(name)
    }

    fn read_number(&mut self, start: SourcePosition) -> Result<LexedToken, (LexerError, SourcePosition)> {
        let mut buf = String::new();
        if self.peek_char() == Some('-') {
            buf.push('-');
            self.bump();
        }
        if self.peek_char() == Some('0') {
            buf.push('0');
            self.bump();
        } else {
            self.read_digits(&mut buf)?;
        }

        let mut is_float = false;
        if self.peek_char() == Some('.') {
            is_float = true;
            buf.push('.');
            self.bump();
            self.read_digits(&mut buf)?;
        }
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            is_float = true;
            buf.push('e');
            self.bump();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                buf.push(self.peek_char().unwrap());
                self.bump();
            }
            self.read_digits(&mut buf)?;
        }

        let token = if is_float {
            buf.parse::<f64>()
                .map(Token::Float)
                .map_err(|_| (LexerError::InvalidNumber, start))?
        } else {
            buf.parse::<i64>()
                .map(Token::Int)
                .map_err(|_| (LexerError::InvalidNumber, start))?
        };

        Ok(LexedToken {
            token,
            start,
            end: self.pos,
        })
    }

    fn read_digits(&mut self, buf: &mut String) -> Result<(), (LexerError, SourcePosition)> {
        let pos = self.pos;
        let mut any = false;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                buf.push(c);
                self.bump();
                any = true;
            } else {
                break;
            }
        }
        if !any {
            return Err((LexerError::InvalidNumber, pos));
        }
        Ok(())
    }

    fn read_string(&mut self, start: SourcePosition) -> Result<LexedToken, (LexerError, SourcePosition)> {
        self.bump(); // opening quote
        let mut s = String::new();
        loop {
            match self.peek_char() {
                None => return Err((LexerError::UnterminatedString, start)),
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\n') => return Err((LexerError::UnterminatedString, start)),
                Some('\\') => {
                    self.bump();
                    let esc_pos = self.pos;
                    match self.peek_char() {
                        Some('"') => {
                            s.push('"');
                            self.bump();
                        }
                        Some('\\') => {
                            s.push('\\');
                            self.bump();
                        }
                        Some('/') => {
                            s.push('/');
                            self.bump();
                        }
                        Some('b') => {
                            s.push('\u{8}');
                            self.bump();
                        }
                        Some('f') => {
                            s.push('\u{C}');
                            self.bump();
                        }
                        Some('n') => {
                            s.push('\n');
                            self.bump();
                        }
                        Some('r') => {
                            s.push('\r');
                            self.bump();
                        }
                        Some('t') => {
                            s.push('\t');
                            self.bump();
                        }
                        Some('u') => {
                            self.bump();
                            let mut code = 0u32;
                            for _ in 0..4 {
                                let c = self.peek_char().ok_or((LexerError::UnterminatedString, start))?;
                                code = code * 16
                                    + c.to_digit(16).ok_or((LexerError::UnterminatedString, start))?;
                                self.bump();
                            }
                            s.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                        }
                        Some(other) => return Err((LexerError::UnknownEscapeSequence(other), esc_pos)),
                        None => return Err((LexerError::UnterminatedString, start)),
                    }
                }
                Some(c) => {
                    s.push(c);
                    self.bump();
                }
            }
        }

        Ok(LexedToken {
            token: Token::Str(s),
            start,
            end: self.pos,
        })
    }
}
