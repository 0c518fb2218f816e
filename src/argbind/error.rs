//! Error types for argument binding
//!
//! Every failure is terminal for the `parse` call that produced it and carries the
//! offending lexeme, alias or raw value so hosts can build their own messages.

use crate::argbind::conversion::ValueType;
use crate::argbind::schema::SlotRef;
use crate::argbind::token::TokenKind;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// Lexical failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    /// No lexical rule matches at `offset`. Unterminated quotes land here too, with
    /// the remainder starting at the opening quote.
    #[error("Invalid token at offset {offset}: {remainder:?}")]
    InvalidToken { offset: usize, remainder: String },
}

/// Token sequences that no grammar production accepts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Unexpected {kind} {lexeme:?} at token {position}")]
    UnexpectedToken {
        lexeme: String,
        kind: TokenKind,
        position: usize,
    },
}

/// Schema construction failures. Raised when the alias table is built, never while parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Parameter for slot {slot} declares no aliases")]
    EmptyAliases { slot: SlotRef },

    #[error("Parameter for slot {slot} declares an empty alias")]
    EmptyAlias { slot: SlotRef },

    #[error("Alias {alias:?} is declared by both {first} and {second}")]
    DuplicateAlias {
        alias: String,
        first: SlotRef,
        second: SlotRef,
    },
}

/// The underlying reason a raw value could not become its declared type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionFailure {
    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error(transparent)]
    Bool(#[from] ParseBoolError),

    #[error("not a well-formed {expected}")]
    Malformed { expected: &'static str },

    #[error("out of range for {expected}")]
    OutOfRange { expected: &'static str },
}

/// A raw value that cannot be converted to the declared type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Cannot convert {raw:?} to {value_type}: {cause}")]
pub struct ConversionError {
    pub raw: String,
    pub value_type: ValueType,
    #[source]
    pub cause: ConversionFailure,
}

/// Everything `parse` can fail with.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Unknown parameter specified: {alias}")]
    UnknownParameter { alias: String },

    #[error("Invalid value: {raw}, specified for parameter {alias}")]
    InvalidValue {
        alias: String,
        raw: String,
        #[source]
        cause: ConversionError,
    },
}

impl BindError {
    /// The alias the error is about, when there is one.
    pub fn alias(&self) -> Option<&str> {
        match self {
            BindError::UnknownParameter { alias } | BindError::InvalidValue { alias, .. } => {
                Some(alias)
            }
            BindError::Schema(SchemaError::DuplicateAlias { alias, .. }) => Some(alias),
            _ => None,
        }
    }

    /// The conversion failure behind an `InvalidValue`.
    pub fn conversion(&self) -> Option<&ConversionError> {
        match self {
            BindError::InvalidValue { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
