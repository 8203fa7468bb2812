// ABOUTME: Error types for evaluation failures, convertible into Value::Error

use crate::value::Value;
use thiserror::Error;

/// Every way evaluation can fail. These never escape as Rust-level control
/// flow past a builtin or `eval::call` — they are converted into
/// `Value::Error` immediately and flow onward as ordinary data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LispError {
    #[error("Unbound symbol '{0}'")]
    UnboundSymbol(String),

    #[error("Function '{function}' passed incorrect type for argument {index}. Got {got}, expected {expected}.")]
    TypeMismatch {
        function: String,
        index: usize,
        got: String,
        expected: String,
    },

    #[error("Function '{function}' passed incorrect number of arguments. Got {got}, expected {expected}.")]
    Arity {
        function: String,
        got: usize,
        expected: String,
    },

    #[error("Function '{function}' passed {{}} for argument {index}.")]
    EmptyList { function: String, index: usize },

    #[error("Division by zero!")]
    DivisionByZero,

    #[error("S-Expression starts with incorrect type. Got {got}, expected Function.")]
    NotAFunction { got: String },

    #[error("Function format invalid. Symbol '&' not followed by single symbol.")]
    VariadicFormat,

    #[error("Cannot define non-symbol. Got {got}, Expected Symbol.")]
    NonSymbolFormal { got: String },

    #[error("Function '{function}' cannot define non-symbol. Got {got}, Expected Symbol.")]
    NonSymbolDefine { function: String, got: String },

    #[error("Function passed too many arguments. Got {got}, expected {expected}.")]
    TooManyArgs { got: usize, expected: usize },
}

impl LispError {
    pub fn type_mismatch(function: &str, index: usize, got: &Value, expected: &str) -> Self {
        LispError::TypeMismatch {
            function: function.to_string(),
            index,
            got: got.type_name().to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn arity(function: &str, got: usize, expected: impl Into<String>) -> Self {
        LispError::Arity {
            function: function.to_string(),
            got,
            expected: expected.into(),
        }
    }

    pub fn empty_list(function: &str, index: usize) -> Self {
        LispError::EmptyList {
            function: function.to_string(),
            index,
        }
    }

    pub fn non_symbol_define(function: &str, got: &Value) -> Self {
        LispError::NonSymbolDefine {
            function: function.to_string(),
            got: got.type_name().to_string(),
        }
    }
}

impl From<LispError> for Value {
    fn from(err: LispError) -> Self {
        Value::Error(err.to_string())
    }
}
