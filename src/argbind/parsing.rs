//! Token Stream Reducer
//!
//!     Collapses a token stream into ordered alias / raw value pairs using the declarative
//!     grammar in [grammar](grammar):
//!
//!         1. Separator runs are collapsed (a no-op for streams that came from `lex`).
//!         2. A cursor walks the immutable token array. Separators at the cursor carry no
//!            meaning and are skipped.
//!         3. The window of tokens at the cursor is converted to grammar notation and matched
//!            against the patterns in declaration order. The first match decides the pair and
//!            how many tokens are consumed.
//!         4. Nothing matches: the token at the cursor is reported as a [GrammarError].
//!
//!     The window never exceeds three tokens, so reduction is linear in the stream length.
//!
//! Repeated Aliases
//!
//!     When an alias shows up more than once in one call, the first occurrence is kept and
//!     the later ones are dropped. Aliases are compared verbatim here; case folding, if any,
//!     is the binder's business.

mod grammar;

use crate::argbind::error::GrammarError;
use crate::argbind::lexing::collapse_separators;
use crate::argbind::token::Token;
use grammar::{COMPILED_PATTERNS, GRAMMAR_WINDOW};
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;

/// Value bound to a flag given without one.
pub const FLAG_VALUE: &str = "true";

/// One alias / raw value pair, before any conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedPair {
    pub alias: String,
    pub raw: String,
}

impl ParsedPair {
    pub fn new(alias: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            raw: raw.into(),
        }
    }
}

/// Pairs in first-seen order, at most one per alias
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParsedArguments {
    pairs: Vec<ParsedPair>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl ParsedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair unless its alias was already recorded. Returns whether it was kept.
    pub fn insert(&mut self, pair: ParsedPair) -> bool {
        if self.seen.contains(&pair.alias) {
            return false;
        }
        self.seen.insert(pair.alias.clone());
        self.pairs.push(pair);
        true
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.alias == alias)
            .map(|pair| pair.raw.as_str())
    }

    pub fn pairs(&self) -> &[ParsedPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParsedPair> {
        self.pairs.iter()
    }
}

impl IntoIterator for ParsedArguments {
    type Item = ParsedPair;
    type IntoIter = std::vec::IntoIter<ParsedPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Outcome of matching the grammar at the cursor, as token indices into the stream
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reduction {
    Pair {
        identifier_idx: usize,
        value_idx: usize,
    },
    Flag {
        identifier_idx: usize,
    },
}

/// Pattern matcher for the declarative argument grammar
struct GrammarMatcher;

impl GrammarMatcher {
    /// Try every pattern against the window at `start_idx`.
    ///
    /// Returns the reduction and the range of consumed token indices.
    fn try_match(tokens: &[Token], start_idx: usize) -> Option<(Reduction, Range<usize>)> {
        let end = (start_idx + GRAMMAR_WINDOW).min(tokens.len());
        let window = &tokens[start_idx..end];
        if window.is_empty() {
            return None;
        }
        let grammar = Self::tokens_to_grammar_string(window);

        for (pattern_name, regex) in COMPILED_PATTERNS.iter() {
            let Some(caps) = regex.captures(&grammar) else {
                continue;
            };
            let count = |group: &str| {
                caps.name(group)
                    .map(|m| Self::count_consumed_tokens(m.as_str()))
                    .unwrap_or(0)
            };
            let identifier = count("identifier");
            let separator = count("separator");
            let value = count("value");
            let consumed = identifier + separator + value;

            let reduction = match *pattern_name {
                "pair_separated" | "pair_adjacent" => Reduction::Pair {
                    identifier_idx: start_idx,
                    value_idx: start_idx + identifier + separator,
                },
                "flag" => Reduction::Flag {
                    identifier_idx: start_idx,
                },
                _ => continue,
            };
            tracing::trace!(pattern = pattern_name, start = start_idx, consumed, "reduced");
            return Some((reduction, start_idx..start_idx + consumed));
        }

        None
    }

    /// Convert tokens to grammar notation string
    fn tokens_to_grammar_string(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|token| token.kind.to_grammar_string())
            .collect()
    }

    /// Each token kind in angle brackets represents one token.
    fn count_consumed_tokens(grammar_str: &str) -> usize {
        grammar_str.matches('<').count()
    }
}

/// Reduce a token stream to alias / raw value pairs.
pub fn reduce(tokens: Vec<Token>) -> Result<ParsedArguments, GrammarError> {
    let tokens = collapse_separators(tokens);
    let mut parsed = ParsedArguments::new();
    let mut cursor = 0;

    while cursor < tokens.len() {
        if tokens[cursor].is_separator() {
            cursor += 1;
            continue;
        }

        let (reduction, consumed) =
            GrammarMatcher::try_match(&tokens, cursor).ok_or_else(|| {
                let token = &tokens[cursor];
                GrammarError::UnexpectedToken {
                    lexeme: token.lexeme.clone(),
                    kind: token.kind,
                    position: cursor,
                }
            })?;

        let pair = match reduction {
            Reduction::Pair {
                identifier_idx,
                value_idx,
            } => ParsedPair::new(&tokens[identifier_idx].lexeme, &tokens[value_idx].lexeme),
            Reduction::Flag { identifier_idx } => {
                ParsedPair::new(&tokens[identifier_idx].lexeme, FLAG_VALUE)
            }
        };
        if !parsed.insert(pair) {
            tracing::debug!(
                alias = %tokens[cursor].lexeme,
                "repeated alias ignored, first occurrence wins"
            );
        }

        cursor = consumed.end;
    }

    Ok(parsed)
}
