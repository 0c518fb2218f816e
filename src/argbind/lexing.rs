//! Lexer
//!
//!     This module turns argument text into a flat stream of classified tokens. The binder
//!     joins every argument with a single space before lexing, so argument boundaries and
//!     interior spaces look the same to the lexer.
//!
//! The Lexing Pipeline
//!
//!     The pipeline consists of:
//!         1. Argument joining. See [join_arguments]. Each argument is trimmed, empty ones
//!            are dropped, the rest are joined with one space.
//!
//!         2. Core tokenization. See [base_tokenization](base_tokenization). Lexical rules
//!            are tried in a fixed priority order at every position, the first rule that
//!            matches wins and consumes its longest match. See [rules](rules) for the table.
//!
//!         3. Separator collapsing. See [transformations](transformations). Adjacent
//!            separators carry no meaning of their own, so `--a =   1` lexes the same as
//!            `--a=1` as far as the grammar is concerned.
//!
//!     At this point lexing is complete: identifiers, single separators and values.

pub mod base_tokenization;
pub mod rules;
pub mod transformations;

pub use crate::argbind::error::LexError;
pub use crate::argbind::token::{Token, TokenKind};
pub use base_tokenization::tokenize;
pub use transformations::collapse_separators;

/// Trim every argument, drop the empty ones and join the rest with a single space.
pub fn join_arguments<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| arg.as_ref().trim())
        .filter(|arg| !arg.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Main lexer function: tokenize trimmed source and collapse separator runs.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let trimmed = source.trim();
    let offset = source.len() - source.trim_start().len();
    let tokens = tokenize(trimmed).map_err(|err| match err {
        LexError::InvalidToken {
            offset: inner,
            remainder,
        } => LexError::InvalidToken {
            offset: inner + offset,
            remainder,
        },
    })?;
    Ok(collapse_separators(tokens))
}

/// Lex a whole argument list.
pub fn lex_arguments<S: AsRef<str>>(args: &[S]) -> Result<Vec<Token>, LexError> {
    lex(&join_arguments(args))
}
