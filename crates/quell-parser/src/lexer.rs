use crate::Source;
use crate::SyntaxError;
use crate::token::Token;
use crate::token::TokenKind;

type Result<T> = std::result::Result<T, SyntaxError>;

/// Produces [`Token`]s from a [`Source`] on demand.
///
/// The lexer is stateless apart from the position handed to
/// [`Lexer::token_at`]: it reads the next token starting at or after the
/// given byte offset, skipping whitespace (including commas) and `#` line
/// comments. [`Lexer::advance`] is a stateful convenience that resumes where
/// the previous token ended.
pub struct Lexer<'src> {
    source: &'src Source,
    position: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src Source) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Lexes and returns the token that follows the previously returned one.
    pub fn advance(&mut self) -> Result<Token<'src>> {
        let token = self.token_at(self.position)?;
        self.position = token.end;
        Ok(token)
    }

    /// Lexes the next token starting at or after `position`.
    pub fn token_at(&self, position: usize) -> Result<Token<'src>> {
        let body = self.source.body();
        let position = position_after_ignored(body, position);
        let Some(ch) = char_at(body, position) else {
            return Ok(Token::new(TokenKind::Eof, position, position));
        };

        match ch {
            '!' => Ok(self.punctuator(TokenKind::Bang, position)),
            '$' => Ok(self.punctuator(TokenKind::Dollar, position)),
            '(' => Ok(self.punctuator(TokenKind::ParenOpen, position)),
            ')' => Ok(self.punctuator(TokenKind::ParenClose, position)),
            ':' => Ok(self.punctuator(TokenKind::Colon, position)),
            '=' => Ok(self.punctuator(TokenKind::Equals, position)),
            '@' => Ok(self.punctuator(TokenKind::At, position)),
            '[' => Ok(self.punctuator(TokenKind::BracketOpen, position)),
            ']' => Ok(self.punctuator(TokenKind::BracketClose, position)),
            '{' => Ok(self.punctuator(TokenKind::BraceOpen, position)),
            '|' => Ok(self.punctuator(TokenKind::Pipe, position)),
            '}' => Ok(self.punctuator(TokenKind::BraceClose, position)),
            '.' => {
                if body[position..].starts_with("...") {
                    Ok(Token::new(TokenKind::Spread, position, position + 3))
                } else {
                    Err(self.unexpected_character(position, ch))
                }
            }
            '_' | 'a'..='z' | 'A'..='Z' => Ok(self.read_name(position)),
            '-' | '0'..='9' => self.read_number(position),
            '"' => self.read_string(position),
            _ => Err(self.unexpected_character(position, ch)),
        }
    }

    fn punctuator(&self, kind: TokenKind<'src>, position: usize) -> Token<'src> {
        Token::new(kind, position, position + 1)
    }

    fn unexpected_character(&self, position: usize, ch: char) -> SyntaxError {
        SyntaxError::new(
            self.source,
            position,
            format!("Unexpected character \"{ch}\"."),
        )
    }

    /// Reads `[_A-Za-z][_0-9A-Za-z]*` starting at `position`.
    fn read_name(&self, position: usize) -> Token<'src> {
        let body = self.source.body();
        let mut end = position + 1;
        while let Some(ch) = char_at(body, end) {
            if ch == '_' || ch.is_ascii_alphanumeric() {
                end += 1;
            } else {
                break;
            }
        }
        Token::new(TokenKind::Name(&body[position..end]), position, end)
    }

    /// Reads an int or float literal: `-?(0|[1-9][0-9]*)(\.[0-9]+)?
    /// ((e|E)(+|-)?[0-9]+)?`.
    fn read_number(&self, position: usize) -> Result<Token<'src>> {
        let body = self.source.body();
        let mut end = position;
        let mut is_float = false;

        if char_at(body, end) == Some('-') {
            end += 1;
        }
        end = self.read_integer_part(end)?;

        if char_at(body, end) == Some('.') {
            is_float = true;
            end += 1;
            end = self.read_digits(end)?;
        }
        if matches!(char_at(body, end), Some('e') | Some('E')) {
            is_float = true;
            end += 1;
            if matches!(char_at(body, end), Some('+') | Some('-')) {
                end += 1;
            }
            end = self.read_digits(end)?;
        }

        let raw = &body[position..end];
        let kind = if is_float {
            TokenKind::Float(raw)
        } else {
            TokenKind::Int(raw)
        };
        Ok(Token::new(kind, position, end))
    }

    /// Reads `0|[1-9][0-9]*`, rejecting leading zeros.
    fn read_integer_part(&self, position: usize) -> Result<usize> {
        let body = self.source.body();
        match char_at(body, position) {
            Some('0') => {
                if let Some(next) = char_at(body, position + 1)
                    && next.is_ascii_digit()
                {
                    return Err(SyntaxError::new(
                        self.source,
                        position + 1,
                        format!("Invalid number, unexpected digit after 0: \"{next}\"."),
                    ));
                }
                Ok(position + 1)
            }
            Some(ch) if ch.is_ascii_digit() => self.read_digits(position),
            found => Err(self.expected_digit(position, found)),
        }
    }

    /// Reads one-or-more ASCII digits.
    fn read_digits(&self, position: usize) -> Result<usize> {
        let body = self.source.body();
        match char_at(body, position) {
            Some(ch) if ch.is_ascii_digit() => {
                let mut end = position + 1;
                while let Some(ch) = char_at(body, end) {
                    if ch.is_ascii_digit() {
                        end += 1;
                    } else {
                        break;
                    }
                }
                Ok(end)
            }
            found => Err(self.expected_digit(position, found)),
        }
    }

    fn expected_digit(&self, position: usize, found: Option<char>) -> SyntaxError {
        let found = match found {
            Some(ch) => format!("\"{ch}\""),
            None => "EOF".to_string(),
        };
        SyntaxError::new(
            self.source,
            position,
            format!("Invalid number, expected digit but got: {found}."),
        )
    }

    /// Reads a double-quoted string literal, processing escapes.
    fn read_string(&self, position: usize) -> Result<Token<'src>> {
        let body = self.source.body();
        let mut value = String::new();
        let mut offset = position + 1;

        loop {
            let Some(ch) = char_at(body, offset) else {
                return Err(self.unterminated_string(position));
            };
            match ch {
                '"' => {
                    return Ok(Token::new(TokenKind::Str(value), position, offset + 1));
                }
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    return Err(self.unterminated_string(position));
                }
                '\\' => {
                    offset += 1;
                    let Some(escaped) = char_at(body, offset) else {
                        return Err(self.unterminated_string(position));
                    };
                    match escaped {
                        '"' => value.push('"'),
                        '\\' => value.push('\\'),
                        '/' => value.push('/'),
                        'b' => value.push('\u{0008}'),
                        'f' => value.push('\u{000C}'),
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        'u' => {
                            let code = self.read_unicode_escape(offset + 1)?;
                            value.push(code);
                            offset += 4;
                        }
                        _ => {
                            return Err(SyntaxError::new(
                                self.source,
                                offset,
                                format!("Invalid character escape sequence: \\{escaped}."),
                            ));
                        }
                    }
                    offset += 1;
                }
                _ => {
                    value.push(ch);
                    offset += ch.len_utf8();
                }
            }
        }
    }

    /// Reads the `XXXX` of a `\uXXXX` escape starting at `position`.
    fn read_unicode_escape(&self, position: usize) -> Result<char> {
        let body = self.source.body();
        let invalid = || {
            let hex = body
                .get(position..)
                .map(|rest| rest.chars().take(4).collect::<String>())
                .unwrap_or_default();
            SyntaxError::new(
                self.source,
                position - 2,
                format!("Invalid character escape sequence: \\u{hex}."),
            )
        };
        let hex = body.get(position..position + 4).ok_or_else(invalid)?;
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let code = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        char::from_u32(code).ok_or_else(invalid)
    }

    fn unterminated_string(&self, position: usize) -> SyntaxError {
        SyntaxError::new(self.source, position, "Unterminated string.")
    }
}

/// Returns the char starting at byte `position`, if it is a char boundary
/// within the body.
fn char_at(body: &str, position: usize) -> Option<char> {
    body.get(position..)?.chars().next()
}

/// Skips whitespace (space, tab, newline variants, NBSP, BOM, commas) and
/// `#` line comments; returns the offset of the next significant character.
fn position_after_ignored(body: &str, start: usize) -> usize {
    let mut position = start;
    while let Some(ch) = char_at(body, position) {
        match ch {
            ' ' | ',' | '\u{0009}'..='\u{000D}' | '\u{00A0}' | '\u{FEFF}' | '\u{2028}'
            | '\u{2029}' => {
                position += ch.len_utf8();
            }
            '#' => {
                position += 1;
                while let Some(ch) = char_at(body, position) {
                    if matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
                        break;
                    }
                    position += ch.len_utf8();
                }
            }
            _ => break,
        }
    }
    position
}
