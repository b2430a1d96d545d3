use std::io::{self, BufRead, Write};

use crate::error::{Error, ErrorKind, Result};
use crate::expression::{evaluate, Operator, Term};
use crate::keyword::Keyword;
use crate::lexer::{Lexeme, Lexer, Token, TokenKind};
use crate::tables::{parse_integer, SymbolTable, TokenTable, Value, VarType, Variable};

// Statements are recognised and executed in the same pass: each handler
// pulls tokens from the lexer, logs them, and applies its effect at once.
// Nothing is undone when a later statement fails.

pub struct Interpreter<R, W> {
    lexer: Lexer,
    current: Token,
    tokens: TokenTable,
    variables: SymbolTable,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Reads INPUT lines from `input` and writes PRINT output to `output`.
    pub fn new(source: &str, input: R, output: W) -> Result<Interpreter<R, W>> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Interpreter {
            lexer,
            current,
            tokens: TokenTable::new(),
            variables: SymbolTable::new(),
            input,
            output,
        })
    }

    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    pub fn variables(&self) -> &SymbolTable {
        &self.variables
    }

    /// Runs the whole program. The first error ends the run.
    pub fn process(&mut self) -> Result<()> {
        info!("Interpretation started");
        self.skip_line_breaks()?;
        self.program()?;
        self.skip_line_breaks()?;
        self.consume(TokenKind::EndOfFile)?;
        info!(
            "Interpretation finished: {} tokens, {} variables",
            self.tokens.len(),
            self.variables.len()
        );
        Ok(())
    }

    /// Builds an error for the current line: the tokens already consumed on
    /// it followed by the offending token.
    fn error(&self, kind: ErrorKind) -> Error {
        let mut fragment = String::new();
        let offending = Some(&self.current).filter(|t| t.kind != TokenKind::EndOfStatement);
        for token in self.tokens.lookup(self.current.line).chain(offending) {
            fragment.push_str(&token.source_text());
            fragment.push(' ');
        }
        debug!("{:?} at line {}", kind, self.current.line);
        Error::source_error(kind, self.current.line, fragment)
    }

    fn is(&self, keyword: Keyword) -> bool {
        self.current.kind.is_keyword(keyword)
    }

    fn consume(&mut self, kind: TokenKind) -> Result<()> {
        if self.current.kind != kind {
            return Err(self.error(ErrorKind::InvalidSyntax));
        }
        let mut token = self.current.clone();
        if kind == TokenKind::EndOfFile {
            // End of file is listed on the line after the last one.
            token.line += 1;
            self.tokens.define(token);
            return Ok(());
        }
        self.tokens.define(token);
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn consume_keyword(&mut self, keyword: Keyword) -> Result<()> {
        self.consume(TokenKind::Keyword(keyword))
    }

    fn identifier(&self) -> Option<String> {
        match self.current.kind {
            TokenKind::Identifier => self.current.text().map(str::to_string),
            _ => None,
        }
    }

    fn skip_line_breaks(&mut self) -> Result<()> {
        while self.current.kind == TokenKind::EndOfStatement {
            self.consume(TokenKind::EndOfStatement)?;
        }
        Ok(())
    }

    fn program(&mut self) -> Result<()> {
        if !self.is(Keyword::Begin) {
            return Err(self.error(ErrorKind::InvalidSyntax));
        }
        self.consume_keyword(Keyword::Begin)?;

        self.statement_list()?;

        if self.current.kind == TokenKind::EndOfFile {
            return Err(self.error(ErrorKind::InvalidEndOfFile));
        }
        self.consume_keyword(Keyword::End)
    }

    fn statement_list(&mut self) -> Result<()> {
        while self.current.kind == TokenKind::EndOfStatement {
            self.consume(TokenKind::EndOfStatement)?;
            if !self.is(Keyword::Begin) {
                self.statement()?;
            }
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::VarInt) => self.declare_number(),
            TokenKind::Keyword(Keyword::VarStr) => self.declare_string(),
            TokenKind::Keyword(Keyword::Store) => self.store(),
            TokenKind::Keyword(Keyword::Input) => self.input(),
            TokenKind::Keyword(Keyword::Print) => self.print(false),
            TokenKind::Keyword(Keyword::PrintLn) => self.print(true),
            TokenKind::Keyword(keyword) if keyword.is_operator() => {
                let value = self.expression()?;
                debug!("Discarded expression value {}", value);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Consumes the name of a variable about to be declared.
    fn declared_name(&mut self, keyword: Keyword) -> Result<String> {
        self.consume_keyword(keyword)?;
        let name = match self.identifier() {
            Some(name) => name,
            None => return Err(self.error(ErrorKind::InvalidSyntax)),
        };
        if self.variables.lookup(&name).is_some() {
            return Err(self.error(ErrorKind::DuplicateVariable));
        }
        self.consume(TokenKind::Identifier)?;
        Ok(name)
    }

    fn define(&mut self, variable: Variable) -> Result<()> {
        debug!(
            "Declared {} {} = {}",
            variable.var_type, variable.name, variable.value
        );
        if self.variables.define(variable) {
            Ok(())
        } else {
            Err(self.error(ErrorKind::DuplicateVariable))
        }
    }

    // VARINT name [WITH expr]
    fn declare_number(&mut self) -> Result<()> {
        let name = self.declared_name(Keyword::VarInt)?;

        let mut value = 0;
        if self.is(Keyword::With) {
            self.consume_keyword(Keyword::With)?;
            if self.current.kind == TokenKind::Str {
                return Err(self.error(ErrorKind::InvalidDataType));
            }
            value = self.expression()?;
        }

        self.define(Variable::new(&name, VarType::Number, Value::Number(value)))
    }

    // VARSTR name [WITH "text"]
    fn declare_string(&mut self) -> Result<()> {
        let name = self.declared_name(Keyword::VarStr)?;

        let mut value = String::new();
        if self.is(Keyword::With) {
            self.consume_keyword(Keyword::With)?;
            if self.current.kind != TokenKind::Str {
                // Still parsed so that errors inside the expression win.
                self.expression()?;
                return Err(self.error(ErrorKind::InvalidDataType));
            }
            value = self.current.text().unwrap_or_default().to_string();
            self.consume(TokenKind::Str)?;
        }

        self.define(Variable::new(&name, VarType::Str, Value::Text(value)))
    }

    // STORE ("text" | expr) IN name
    fn store(&mut self) -> Result<()> {
        self.consume_keyword(Keyword::Store)?;

        let value = if self.current.kind == TokenKind::Str {
            let text = self.current.text().unwrap_or_default().to_string();
            self.consume(TokenKind::Str)?;
            Value::Text(text)
        } else {
            Value::Number(self.expression()?)
        };

        self.consume_keyword(Keyword::In)?;

        let name = match self.identifier() {
            Some(name) => name,
            None => return Err(self.error(ErrorKind::UndeclaredVariable)),
        };
        match self.variables.lookup(&name) {
            None => return Err(self.error(ErrorKind::UndeclaredVariable)),
            Some(variable) if variable.var_type != value.var_type() => {
                return Err(self.error(ErrorKind::InvalidDataType));
            }
            Some(_) => {}
        }
        self.consume(TokenKind::Identifier)?;

        debug!("Stored {} in {}", value, name);
        self.variables.update(&name, value);
        Ok(())
    }

    // INPUT name
    fn input(&mut self) -> Result<()> {
        self.consume_keyword(Keyword::Input)?;

        let name = match self.identifier() {
            Some(name) => name,
            None => return Err(self.error(ErrorKind::UndeclaredVariable)),
        };
        let var_type = match self.variables.lookup(&name) {
            Some(variable) => variable.var_type,
            None => return Err(self.error(ErrorKind::UndeclaredVariable)),
        };
        self.consume(TokenKind::Identifier)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input stream closed").into());
        }
        let text = line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string();

        if var_type == VarType::Number && parse_integer(&text).is_none() {
            return Err(self.error(ErrorKind::InvalidDataTypeInput));
        }

        // Number variables keep the text as typed; readers parse it on use.
        self.variables.update(&name, Value::Text(text));
        Ok(())
    }

    // PRINT / PRINTLN (name | "text" | expr)
    fn print(&mut self, newline: bool) -> Result<()> {
        self.consume(self.current.kind)?;

        let text = match self.current.kind {
            TokenKind::Identifier => {
                let text = match self.identifier().and_then(|n| self.variables.lookup(&n)) {
                    Some(variable) => variable.value.to_string(),
                    None => return Err(self.error(ErrorKind::UndeclaredVariable)),
                };
                self.consume(TokenKind::Identifier)?;
                text
            }
            TokenKind::Str => {
                let text = self.current.text().unwrap_or_default().to_string();
                self.consume(TokenKind::Str)?;
                text
            }
            _ => self.expression()?.to_string(),
        };

        write!(self.output, "{}", text)?;
        if newline {
            writeln!(self.output)?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn starts_expression(&self) -> bool {
        match self.current.kind {
            TokenKind::Number | TokenKind::Identifier => true,
            TokenKind::Keyword(keyword) => keyword.is_expression_term(),
            _ => false,
        }
    }

    fn at_expression_end(&self) -> bool {
        self.current.kind == TokenKind::EndOfStatement || self.is(Keyword::In)
    }

    /// Current value of a Number variable used as an operand.
    fn operand(&self) -> Result<i64> {
        let variable = match self.identifier().and_then(|n| self.variables.lookup(&n)) {
            Some(variable) => variable,
            None => return Err(self.error(ErrorKind::UndeclaredVariable)),
        };
        match (variable.var_type, variable.value.as_integer()) {
            (VarType::Number, Some(value)) => Ok(value),
            _ => Err(self.error(ErrorKind::IncompatibleDataType)),
        }
    }

    /// Consumes tokens up to the end of the statement or `IN` and reduces them.
    fn expression(&mut self) -> Result<i64> {
        if !self.starts_expression() {
            return Err(self.error(ErrorKind::InvalidSyntax));
        }

        let mut terms = Vec::new();
        while !self.at_expression_end() {
            let term = match (self.current.kind, &self.current.lexeme) {
                (TokenKind::Number, Lexeme::Number(value)) => Term::Value(*value),
                (TokenKind::Identifier, _) => Term::Value(self.operand()?),
                (TokenKind::Keyword(Keyword::And), _) => Term::And,
                (TokenKind::Keyword(keyword), _) => match Operator::from_keyword(keyword) {
                    Some(operator) => Term::Operator(operator),
                    None => return Err(self.error(ErrorKind::InvalidSyntax)),
                },
                _ => return Err(self.error(ErrorKind::InvalidSyntax)),
            };
            self.consume(self.current.kind)?;
            terms.push(term);
        }

        trace!("Evaluating {:?}", terms);
        evaluate(&terms).map_err(|kind| self.error(kind))
    }
}
