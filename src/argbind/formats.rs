//! Output formats for token streams, parsed pairs and bound values
//!
//! This module contains the serializers used by the `argbind` inspection tool:
//! - a line-oriented `simple` format meant for humans
//! - `json` and `yaml` through serde
//! - a detokenizer that turns a token stream back into argument text

use crate::argbind::parsing::ParsedArguments;
use crate::argbind::schema::ValueMap;
use crate::argbind::token::{Token, TokenKind};
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

/// Error that can occur during formatting
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Simple,
    Json,
    Yaml,
}

impl Format {
    pub const NAMES: &'static [&'static str] = &["simple", "json", "yaml"];
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Format::Simple),
            "json" => Ok(Format::Json),
            "yaml" => Ok(Format::Yaml),
            other => Err(FormatError::FormatNotFound(other.to_string())),
        }
    }
}

/// Line-oriented rendering for the `simple` format
pub trait SimpleFormat {
    fn to_simple(&self) -> String;
}

impl SimpleFormat for [Token] {
    fn to_simple(&self) -> String {
        self.iter().fold(String::new(), |mut out, token| {
            let _ = writeln!(out, "{}", token);
            out
        })
    }
}

impl SimpleFormat for Vec<Token> {
    fn to_simple(&self) -> String {
        self.as_slice().to_simple()
    }
}

impl SimpleFormat for ParsedArguments {
    fn to_simple(&self) -> String {
        self.iter().fold(String::new(), |mut out, pair| {
            let _ = writeln!(out, "{} = {:?}", pair.alias, pair.raw);
            out
        })
    }
}

impl SimpleFormat for ValueMap {
    fn to_simple(&self) -> String {
        self.iter().fold(String::new(), |mut out, (slot, value)| {
            let _ = writeln!(out, "{} ({}) = {}", slot, value.value_type(), value);
            out
        })
    }
}

/// Serialize `value` in the requested format
pub fn serialize<T>(value: &T, format: Format) -> Result<String, FormatError>
where
    T: Serialize + SimpleFormat + ?Sized,
{
    match format {
        Format::Simple => Ok(value.to_simple()),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            Ok(json)
        }
        Format::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

/// Turn a token stream back into argument text.
///
/// Identifiers get a `--` prefix and values are always quoted, single quotes unless the
/// value itself contains one. Lexing the result yields the same stream for every input
/// that has no value containing both quote characters.
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().fold(String::new(), |mut out, token| {
        match token.kind {
            TokenKind::Identifier => {
                out.push_str("--");
                out.push_str(&token.lexeme);
            }
            TokenKind::Separator => out.push_str(&token.lexeme),
            TokenKind::Value => {
                let quote = if token.lexeme.contains('\'') { '"' } else { '\'' };
                out.push(quote);
                out.push_str(&token.lexeme);
                out.push(quote);
            }
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argbind::conversion::Value;
    use crate::argbind::lexing::lex;

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!(matches!(
            "xml".parse::<Format>(),
            Err(FormatError::FormatNotFound(name)) if name == "xml"
        ));
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex("--a=1").unwrap();
        assert_eq!(
            serialize(&tokens, Format::Simple).unwrap(),
            "IDENTIFIER(\"a\")\nSEPARATOR(\"=\")\nVALUE(\"1\")\n"
        );
    }

    #[test]
    fn test_json_tokens() {
        let tokens = vec![Token::identifier("a")];
        let json = serialize(&tokens, Format::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["kind"], "identifier");
        assert_eq!(parsed[0]["lexeme"], "a");
    }

    #[test]
    fn test_yaml_values() {
        let mut values = ValueMap::new();
        values.insert("size", Value::Int64(10));
        values.insert("name", Value::String("x".to_string()));
        assert_eq!(
            serialize(&values, Format::Yaml).unwrap(),
            "name: x\nsize: 10\n"
        );
        assert_eq!(
            serialize(&values, Format::Simple).unwrap(),
            "name (string) = x\nsize (int64) = 10\n"
        );
    }

    #[test]
    fn test_detokenize_round_trip() {
        let tokens = lex(r#"--path="a b" -v /n:'it"s'"#).unwrap();
        let text = detokenize(&tokens);
        assert_eq!(lex(&text).unwrap(), tokens);
    }
}
