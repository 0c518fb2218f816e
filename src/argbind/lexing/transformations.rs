//! Token stream transformations
//!
//!     Separator collapsing merges every run of consecutive separators into a single
//!     separator whose lexeme is the concatenation of the run. Identifiers and values pass
//!     through untouched and keep their order.
//!
//!     The transformation is idempotent, so the reducer can apply it again to token streams
//!     that did not come through [lex](super::lex).

use crate::argbind::token::Token;

/// Collapse runs of adjacent separators into one.
pub fn collapse_separators(tokens: Vec<Token>) -> Vec<Token> {
    let mut collapsed: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match collapsed.last_mut() {
            Some(previous) if previous.is_separator() && token.is_separator() => {
                previous.lexeme.push_str(&token.lexeme);
            }
            _ => collapsed.push(token),
        }
    }

    collapsed
}
