use std::fmt;

use crate::error::{Error, ErrorKind, Result};
use crate::keyword::Keyword;

/// Identifiers must be strictly shorter than this.
pub const MAX_IDENTIFIER_LEN: usize = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    Number,
    Str,
    EndOfStatement,
    EndOfFile,
}

impl TokenKind {
    /// Name shown in the token table.
    pub fn category(self) -> &'static str {
        match self {
            TokenKind::Keyword(keyword) => keyword.category(),
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Str => "STRING",
            TokenKind::EndOfStatement => "END_OF_STATEMENT",
            TokenKind::EndOfFile => "END_OF_FILE",
        }
    }

    pub fn is_keyword(self, keyword: Keyword) -> bool {
        self == TokenKind::Keyword(keyword)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Lexeme {
    Number(i64),
    Text(String),
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Lexeme::Number(value) => write!(f, "{}", value),
            Lexeme::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub line: usize,
    pub kind: TokenKind,
    pub lexeme: Lexeme,
}

impl Token {
    fn new(line: usize, kind: TokenKind, lexeme: Lexeme) -> Token {
        Token { line, kind, lexeme }
    }

    fn marker(line: usize, kind: TokenKind) -> Token {
        let text = match kind {
            TokenKind::EndOfFile => "EOF",
            _ => "EOS",
        };
        Token::new(line, kind, Lexeme::Text(text.into()))
    }

    /// The token as it would be written in source; strings get their quotes back.
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::Str => format!("\"{}\"", self.lexeme),
            _ => self.lexeme.to_string(),
        }
    }

    /// Text of an identifier or string literal token.
    pub fn text(&self) -> Option<&str> {
        match &self.lexeme {
            Lexeme::Text(text) => Some(text),
            Lexeme::Number(_) => None,
        }
    }
}

/// Pull-based scanner over the whole program text.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    pub fn new(text: &str) -> Lexer {
        Lexer {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        if self.current() == Some('\n') {
            self.line += 1;
        }
        self.pos += 1;
    }

    fn error(&self, kind: ErrorKind) -> Error {
        Error::source_error(kind, self.line, self.current_line_text())
    }

    /// Text of the current line up to and including the current character.
    fn current_line_text(&self) -> String {
        let end = match self.current() {
            Some('\n') | None => self.pos.min(self.chars.len()),
            Some(_) => self.pos + 1,
        };
        let start = self.chars[..end]
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |i| i + 1);
        let text: String = self.chars[start..end].iter().collect();
        text.trim_end().to_string()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if c == '\n' || !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.current() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn starts_integer(&self, c: char) -> bool {
        c.is_ascii_digit()
            || ((c == '+' || c == '-') && self.peek().map_or(false, |n| n.is_ascii_digit()))
    }

    fn integer(&mut self) -> Result<Token> {
        let line = self.line;
        let mut text = String::new();
        while let Some(c) = self.current() {
            if c.is_whitespace() {
                break;
            }
            text.push(c);
            self.advance();
        }

        match text.parse::<i64>() {
            Ok(value) => Ok(Token::new(line, TokenKind::Number, Lexeme::Number(value))),
            Err(_) => Err(self.error(ErrorKind::InvalidDataType)),
        }
    }

    // The opening quote is already consumed.
    fn string(&mut self) -> Result<Token> {
        let line = self.line;
        let mut text = String::new();
        loop {
            match self.current() {
                Some('"') => {
                    self.advance();
                    return Ok(Token::new(line, TokenKind::Str, Lexeme::Text(text)));
                }
                Some(c) if (' '..='~').contains(&c) => {
                    text.push(c);
                    self.advance();
                }
                _ => return Err(self.error(ErrorKind::InvalidSyntax)),
            }
        }
    }

    fn word(&mut self) -> Result<Token> {
        let line = self.line;
        let mut text = String::new();
        while let Some(c) = self.current() {
            if !c.is_alphanumeric() {
                break;
            }
            text.push(c);
            self.advance();
        }

        if let Some(keyword) = Keyword::lookup(&text) {
            let lexeme = Lexeme::Text(keyword.lexeme().to_string());
            return Ok(Token::new(line, TokenKind::Keyword(keyword), lexeme));
        }

        let starts_with_letter = text.chars().next().map_or(false, char::is_alphabetic);
        if text.chars().count() < MAX_IDENTIFIER_LEN && starts_with_letter {
            Ok(Token::new(line, TokenKind::Identifier, Lexeme::Text(text)))
        } else {
            Err(self.error(ErrorKind::InvalidSyntax))
        }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        let token = self.scan()?;
        trace!("line {}: {} {}", token.line, token.kind.category(), token.lexeme);
        Ok(token)
    }

    fn scan(&mut self) -> Result<Token> {
        while let Some(c) = self.current() {
            match c {
                '\n' => {
                    let token = Token::marker(self.line, TokenKind::EndOfStatement);
                    self.advance();
                    return Ok(token);
                }
                '#' => self.skip_comment(),
                '"' => {
                    self.advance();
                    return self.string();
                }
                c if c.is_whitespace() => self.skip_whitespace(),
                c if self.starts_integer(c) => return self.integer(),
                c if c.is_alphanumeric() => return self.word(),
                _ => return Err(self.error(ErrorKind::InvalidSyntax)),
            }
        }
        Ok(Token::marker(self.line, TokenKind::EndOfFile))
    }
}
