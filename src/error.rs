use std::fmt;
use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Classification of errors detected in the program text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidSyntax,
    UndeclaredVariable,
    InvalidOperations,
    InvalidExpression,
    InvalidDataType,
    DuplicateVariable,
    IncompatibleDataType,
    InvalidDataTypeInput,
    InvalidEndOfFile,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            ErrorKind::InvalidSyntax => "Invalid syntax",
            ErrorKind::UndeclaredVariable => "Variable is not declared",
            ErrorKind::InvalidOperations => "Invalid arithmetic operation",
            ErrorKind::InvalidExpression => "Invalid expression",
            ErrorKind::InvalidDataType => "Invalid data type",
            ErrorKind::DuplicateVariable => "Duplicate variable declaration",
            ErrorKind::IncompatibleDataType => "Incompatible data type",
            ErrorKind::InvalidDataTypeInput => "Invalid data type input",
            ErrorKind::InvalidEndOfFile => "Invalid end of file",
        };
        f.write_str(message)
    }
}

/// Failures while acquiring the program file. These carry no line context.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid file")]
    InvalidFile,
    #[error("File not found")]
    FileNotFound,
    #[error("File is empty")]
    EmptyFile,
}

#[derive(Debug, Error)]
pub enum Error {
    /// An error located in the program text.
    #[error("{kind} at line number [ {line} ]\n ----> {fragment}")]
    Source {
        kind: ErrorKind,
        line: usize,
        fragment: String,
    },

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Encountered general error")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn source_error(kind: ErrorKind, line: usize, fragment: String) -> Error {
        Error::Source {
            kind,
            line,
            fragment,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Source { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
