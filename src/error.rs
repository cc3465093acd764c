// ABOUTME: Error types for the lex/parse/eval pipeline

use thiserror::Error;

/// Failure while scanning source text into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("lex error at byte {offset}: unrecognized character {found:?}")]
pub struct LexError {
    pub offset: usize,
    pub found: char,
}

/// Failure while building an AST from a token stream.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("parse error at byte {offset}: expected {expected}, found {got}")]
pub struct ParseError {
    pub expected: String,
    pub got: String,
    pub offset: usize,
}

#[allow(dead_code)]
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    #[error("name error: '{name}' is not defined")]
    NameError { name: String },

    #[error("{function}: expected {expected} argument{}, got {actual}", if expected == "1" { "" } else { "s" })]
    ArityError {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("{context}: expected {expected}, got {actual}")]
    TypeError {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("index {index} out of range for length {len}")]
    IndexError { index: i64, len: usize },

    #[error("arithmetic error: {0}")]
    ArithError(String),

    #[error("'{keyword}' used outside of a loop or function")]
    ControlFlowError { keyword: String },
}

impl EvalError {
    pub fn type_error(context: &str, expected: &str, actual: &crate::value::Value) -> Self {
        EvalError::TypeError {
            context: context.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
        }
    }

    pub fn arity_error(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::ArityError {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn name_error(name: impl Into<String>) -> Self {
        EvalError::NameError { name: name.into() }
    }
}
