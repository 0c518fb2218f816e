//! Lexical Rule Definitions
//!
//! Rules are regexes anchored at the current scan position and are tried in declaration
//! order: the first rule that matches wins, whatever a later rule could have matched. A
//! rule's `lexeme` capture group, when present, is what ends up in the token; everything
//! else it matches (prefixes, quotes) is consumed and dropped.
//!
//! # Rule Order
//!
//! 1. identifier - `-`, `--` or `/` followed by word characters, at a token start only
//! 2. help - the `-?` / `--?` marker, lexed as identifier `?`, at a token start only
//! 3. separator - a whitespace run, `=` or `:`
//! 4. double_quoted / single_quoted - quoted run, quotes stripped
//! 5. number - digits with an optional `.` or `,` decimal part, not running into a word
//! 6. bare_word - words, paths and anything else made of word characters, `.`, `-`, `\`, `/`
//!
//! # Placement
//!
//! A token start is the beginning of the source or the position right after a separator.
//! A prefix anywhere else belongs to the value being scanned: `2024-01-01` and `a/b` are
//! single bare words. A number that runs straight into more bare-word characters (`1e3`,
//! `10px`, `1.2.3`) is not a number either and falls through to the bare word.
//!
//! At a token start identifiers still come first, so `-5` lexes as identifier `5`. Quote
//! negative values.

use crate::argbind::token::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Where a rule is allowed to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Placement {
    /// At any position
    Anywhere,
    /// Only at the beginning of the source or right after a separator
    TokenStart,
    /// At any position, as long as no bare-word character follows the match
    WordEnd,
}

/// Lexical rules as (rule_name, token_kind, placement, regex_pattern_string), in priority order.
pub(super) const LEXICAL_RULES: &[(&str, TokenKind, Placement, &str)] = &[
    (
        "identifier",
        TokenKind::Identifier,
        Placement::TokenStart,
        r"^(?:--|-|/)(?P<lexeme>\w+)",
    ),
    (
        "help",
        TokenKind::Identifier,
        Placement::TokenStart,
        r"^(?:--|-)(?P<lexeme>\?)",
    ),
    (
        "separator",
        TokenKind::Separator,
        Placement::Anywhere,
        r"^(?:\s+|=|:)",
    ),
    (
        "double_quoted",
        TokenKind::Value,
        Placement::Anywhere,
        r#"^"(?P<lexeme>[^"]*)""#,
    ),
    (
        "single_quoted",
        TokenKind::Value,
        Placement::Anywhere,
        r"^'(?P<lexeme>[^']*)'",
    ),
    (
        "number",
        TokenKind::Value,
        Placement::WordEnd,
        r"^\d+(?:[.,]\d+)?",
    ),
    (
        "bare_word",
        TokenKind::Value,
        Placement::Anywhere,
        r"^[\w.\-\\/]+",
    ),
];

/// First character of a bare word
static BARE_WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w.\-\\/]").unwrap());

/// A compiled lexical rule.
pub(super) struct LexicalRule {
    pub name: &'static str,
    pub kind: TokenKind,
    pub placement: Placement,
    pub regex: Regex,
}

impl LexicalRule {
    /// Match this rule at the start of `rest`.
    ///
    /// Returns the lexeme and the number of bytes the whole match consumed.
    pub fn scan<'a>(&self, rest: &'a str, at_token_start: bool) -> Option<(&'a str, usize)> {
        if self.placement == Placement::TokenStart && !at_token_start {
            return None;
        }
        let caps = self.regex.captures(rest)?;
        let whole = caps.get(0)?;
        let runs_into_word = BARE_WORD_START.is_match(&rest[whole.end()..]);
        if self.placement == Placement::WordEnd && runs_into_word {
            return None;
        }
        let lexeme = caps.name("lexeme").unwrap_or(whole);
        Some((lexeme.as_str(), whole.end()))
    }
}

/// Compiled once, in [LEXICAL_RULES] order.
pub(super) static COMPILED_RULES: Lazy<Vec<LexicalRule>> = Lazy::new(|| {
    LEXICAL_RULES
        .iter()
        .map(|&(name, kind, placement, pattern)| LexicalRule {
            name,
            kind,
            placement,
            regex: Regex::new(pattern).unwrap(),
        })
        .collect()
});
