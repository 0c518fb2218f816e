//! Grammar Pattern Definitions
//!
//! This module defines the declarative grammar patterns used by the reducer.
//! Patterns are defined as regex rules over token kinds and are tried in declaration
//! order, most specific first.
//!
//! # Grammar Parse Order
//!
//! 1. pair_separated - `<identifier><separator><value>`
//! 2. pair_adjacent - `<identifier><value>`, no separator in between
//! 3. flag - `<identifier>` followed by another identifier or the end of the stream,
//!    optionally through one separator. The following identifier is not consumed.
//!
//! No production is longer than three tokens, so patterns only ever see a window of
//! [GRAMMAR_WINDOW] tokens starting at the cursor. `$` in a pattern means the end of that
//! window, which is the end of the stream whenever the window came up short.

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of tokens a pattern can look at.
pub(super) const GRAMMAR_WINDOW: usize = 3;

/// Grammar patterns as regex rules with names and patterns.
///
/// Named capture groups `identifier`, `separator` and `value` cover exactly the tokens a
/// match consumes. Anything matched outside them is lookahead.
pub(super) const GRAMMAR_PATTERNS: &[(&str, &str)] = &[
    (
        "pair_separated",
        r"^(?P<identifier><identifier>)(?P<separator><separator>)(?P<value><value>)",
    ),
    (
        "pair_adjacent",
        r"^(?P<identifier><identifier>)(?P<value><value>)",
    ),
    (
        "flag",
        r"^(?P<identifier><identifier>)(?P<separator><separator>)?(?:<identifier>|$)",
    ),
];

/// Compiled once, in [GRAMMAR_PATTERNS] order.
pub(super) static COMPILED_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    GRAMMAR_PATTERNS
        .iter()
        .map(|&(name, pattern)| (name, Regex::new(pattern).unwrap()))
        .collect()
});
