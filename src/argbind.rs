//! Main module for argbind library functionality

pub mod binding;
pub mod conversion;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod options;
pub mod parsing;
pub mod schema;
pub mod testing;
pub mod token;

pub use binding::{parse, Assignment, Binder};
pub use conversion::{convert, Value, ValueType};
pub use error::{BindError, ConversionError, ConversionFailure, GrammarError, LexError, SchemaError};
pub use options::{AliasMatching, ApplyMode, BinderOptions};
pub use parsing::{reduce, ParsedArguments, ParsedPair};
pub use schema::{resolve, ParameterDescriptor, Schema, SchemaTable, SlotRef, Slots, ValueMap};
pub use token::{Token, TokenKind};
