//! Core tokenization
//!
//!     Scans the source left to right with a byte cursor. At each position the rules from
//!     [rules](super::rules) are tried in order and the first match is consumed. Every rule
//!     consumes at least one character, so the scan always terminates after one pass.
//!
//!     Identifier rules only apply at a token start: offset 0, or right after a separator
//!     token. Everywhere else `-` and `/` are ordinary value characters.
//!
//!     If no rule matches, the scan stops with [LexError::InvalidToken] carrying the
//!     unconsumed remainder. No partial token stream is returned.

use super::rules::COMPILED_RULES;
use crate::argbind::error::LexError;
use crate::argbind::token::Token;

/// Tokenize `source` without any post-processing.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut cursor = 0;

    while cursor < source.len() {
        let rest = &source[cursor..];
        let at_token_start = tokens.last().map_or(true, Token::is_separator);
        let (token, consumed) =
            scan_one(rest, at_token_start).ok_or_else(|| LexError::InvalidToken {
                offset: cursor,
                remainder: rest.to_string(),
            })?;
        tracing::trace!(offset = cursor, %token, "scanned token");
        tokens.push(token);
        cursor += consumed;
    }

    Ok(tokens)
}

/// Match the first applicable rule at the start of `rest`.
///
/// Returns the token and the number of bytes the whole match consumed.
fn scan_one(rest: &str, at_token_start: bool) -> Option<(Token, usize)> {
    COMPILED_RULES.iter().find_map(|rule| {
        let (lexeme, consumed) = rule.scan(rest, at_token_start)?;
        tracing::trace!(rule = rule.name, lexeme, "rule matched");
        Some((Token::new(rule.kind, lexeme), consumed))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_with_enclosed_value() {
        let tokens = tokenize("--testParam=123").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::identifier("testParam"),
                Token::separator("="),
                Token::value("123"),
            ]
        );
    }

    #[test]
    fn test_separators_are_not_collapsed_here() {
        let tokens = tokenize("--a = 1").unwrap();
        assert_eq!(tokens.len(), 5);
        assert!(tokens[1].is_separator() && tokens[2].is_separator() && tokens[3].is_separator());
    }

    #[test]
    fn test_mixed_forms() {
        let tokens = tokenize(r#"-param1 value1 --param2 /param3:"Test-:-work""#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::identifier("param1"),
                Token::separator(" "),
                Token::value("value1"),
                Token::separator(" "),
                Token::identifier("param2"),
                Token::separator(" "),
                Token::identifier("param3"),
                Token::separator(":"),
                Token::value("Test-:-work"),
            ]
        );
    }

    #[test]
    fn test_quoted_value_keeps_prefix_characters() {
        let tokens = tokenize("-param5 '--=nice=--'").unwrap();
        assert_eq!(tokens[2], Token::value("--=nice=--"));
    }

    #[test]
    fn test_adjacent_identifier_and_value() {
        let tokens = tokenize("--count'12'").unwrap();
        assert_eq!(
            tokens,
            vec![Token::identifier("count"), Token::value("12")]
        );
    }

    #[test]
    fn test_values_starting_with_digits_stay_whole() {
        assert_eq!(
            tokenize("--when=2024-01-01 --size=10px --ratio=1e3").unwrap(),
            vec![
                Token::identifier("when"),
                Token::separator("="),
                Token::value("2024-01-01"),
                Token::separator(" "),
                Token::identifier("size"),
                Token::separator("="),
                Token::value("10px"),
                Token::separator(" "),
                Token::identifier("ratio"),
                Token::separator("="),
                Token::value("1e3"),
            ]
        );
    }

    #[test]
    fn test_prefix_after_identifier_is_a_value() {
        assert_eq!(
            tokenize("--out/dir").unwrap(),
            vec![Token::identifier("out"), Token::value("/dir")]
        );
    }

    #[test]
    fn test_prefix_after_value_is_a_value() {
        assert_eq!(
            tokenize("'a'-b").unwrap(),
            vec![Token::value("a"), Token::value("-b")]
        );
    }

    #[test]
    fn test_help_marker() {
        assert_eq!(tokenize("-?").unwrap(), vec![Token::identifier("?")]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            tokenize("--name \"abc").unwrap_err(),
            LexError::InvalidToken {
                offset: 7,
                remainder: "\"abc".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(
            tokenize("--a=1;rm").unwrap_err(),
            LexError::InvalidToken {
                offset: 5,
                remainder: ";rm".to_string()
            }
        );
    }

    #[test]
    fn test_multibyte_offsets() {
        let tokens = tokenize("--naïve=café").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::identifier("naïve"),
                Token::separator("="),
                Token::value("café"),
            ]
        );
    }
}
