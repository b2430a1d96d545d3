use std::fmt;

use crate::lexer::{Token, TokenKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VarType {
    Number,
    Str,
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VarType::Number => f.write_str("INTEGER"),
            VarType::Str => f.write_str("STRING"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(i64),
    Text(String),
}

impl Value {
    pub fn var_type(&self) -> VarType {
        match self {
            Value::Number(_) => VarType::Number,
            Value::Text(_) => VarType::Str,
        }
    }

    /// Integer held by the value. Text counts when it reads as an integer,
    /// which is how INPUT leaves Number variables.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Number(value) => Some(*value),
            Value::Text(text) => parse_integer(text),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{}", value),
            Value::Text(text) => f.write_str(text),
        }
    }
}

pub fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub var_type: VarType,
    pub value: Value,
}

impl Variable {
    pub fn new(name: &str, var_type: VarType, value: Value) -> Variable {
        Variable {
            name: name.to_string(),
            var_type,
            value,
        }
    }
}

/// Declared variables in declaration order. Names are unique.
#[derive(Debug, Default)]
pub struct SymbolTable {
    variables: Vec<Variable>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Adds a variable unless the name is taken. Returns whether it was added.
    #[must_use]
    pub fn define(&mut self, variable: Variable) -> bool {
        if self.lookup(&variable.name).is_some() {
            return false;
        }
        self.variables.push(variable);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Replaces the value of an existing variable; unknown names are ignored.
    pub fn update(&mut self, name: &str, value: Value) {
        if let Some(variable) = self.variables.iter_mut().find(|v| v.name == name) {
            variable.value = value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:<20} {:<15} {}", "VARIABLE NAME", "TYPE", "VALUE")?;
        for variable in &self.variables {
            writeln!(
                f,
                "{:<20} {:<15} {}",
                variable.name,
                variable.var_type.to_string(),
                variable.value
            )?;
        }
        Ok(())
    }
}

/// Every token the interpreter consumed, in order.
#[derive(Debug, Default)]
pub struct TokenTable {
    tokens: Vec<Token>,
}

impl TokenTable {
    pub fn new() -> TokenTable {
        TokenTable::default()
    }

    pub fn define(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Tokens consumed on `line`, line breaks excluded.
    pub fn lookup(&self, line: usize) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(move |t| t.line == line && t.kind != TokenKind::EndOfStatement)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl fmt::Display for TokenTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:<10} {:<30} {}", "LINE NO.", "TOKENS", "LEXEMES")?;
        for token in &self.tokens {
            writeln!(
                f,
                "{:<10} {:<30} {}",
                token.line,
                token.kind.category(),
                token.lexeme
            )?;
        }
        Ok(())
    }
}
