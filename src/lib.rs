//! INTERPOL: a line-oriented interpreter for a small typed language with
//! prefix arithmetic.
//!
//! Source text is scanned on demand and every statement is executed as soon
//! as it is recognised; see [`Interpreter::process`].

#[macro_use]
extern crate log;

pub mod error;
pub mod expression;
pub mod interpreter;
pub mod keyword;
pub mod lexer;
pub mod source;
pub mod tables;

pub use error::{Error, ErrorKind, InputError, Result};
pub use interpreter::Interpreter;
pub use tables::{SymbolTable, TokenTable, Value, VarType, Variable};
