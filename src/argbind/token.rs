//! Token definitions for argument text
//!
//! The lexer classifies argument text into three kinds of tokens. Prefixes (`-`, `--`, `/`)
//! and quotes are consumed by the lexer and never show up in a token's lexeme.

use serde::Serialize;
use std::fmt;

/// Classification of a lexical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// A parameter name, prefix stripped (`--path` -> `path`, `-?` -> `?`)
    Identifier,

    /// Whitespace run, `=` or `:`
    Separator,

    /// Quoted string (quotes stripped), number, or bare word
    Value,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Value => "VALUE",
        };
        write!(f, "{}", name)
    }
}

impl TokenKind {
    /// Format token kind as grammar notation: `<token-name>`
    ///
    /// Used by the reducer to match token windows against the grammar table.
    pub fn to_grammar_string(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "<identifier>",
            TokenKind::Separator => "<separator>",
            TokenKind::Value => "<value>",
        }
    }
}

/// A classified lexical unit. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn identifier(lexeme: impl Into<String>) -> Self {
        Self::new(TokenKind::Identifier, lexeme)
    }

    pub fn separator(lexeme: impl Into<String>) -> Self {
        Self::new(TokenKind::Separator, lexeme)
    }

    pub fn value(lexeme: impl Into<String>) -> Self {
        Self::new(TokenKind::Value, lexeme)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_separator(&self) -> bool {
        self.kind == TokenKind::Separator
    }

    pub fn is_value(&self) -> bool {
        self.kind == TokenKind::Value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_to_grammar_string() {
        assert_eq!(TokenKind::Identifier.to_grammar_string(), "<identifier>");
        assert_eq!(TokenKind::Separator.to_grammar_string(), "<separator>");
        assert_eq!(TokenKind::Value.to_grammar_string(), "<value>");
    }

    #[test]
    fn test_token_predicates() {
        assert!(Token::identifier("path").is_identifier());
        assert!(!Token::identifier("path").is_value());
        assert!(Token::separator("=").is_separator());
        assert!(Token::value("123").is_value());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::identifier("path").to_string(), "IDENTIFIER(\"path\")");
        assert_eq!(Token::separator(":").to_string(), "SEPARATOR(\":\")");
    }
}
