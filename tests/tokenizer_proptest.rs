//! Property-based tests for the argument lexer and reducer
//!
//! These check properties that must hold for every input of a given shape rather than for
//! hand-picked samples: quoted values come back verbatim, no input text is lost, and
//! separator runs never change what a pair reduces to.

use argbind::argbind::formats::detokenize;
use argbind::argbind::lexing::{collapse_separators, lex, tokenize};
use argbind::argbind::parsing::reduce;
use argbind::argbind::testing::BasicCommandLine;
use argbind::argbind::{Binder, TokenKind};
use proptest::prelude::*;

/// Identifier names: word characters only
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,15}"
}

/// Separator spellings, including irregular whitespace around `=` and `:`
fn separator_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("=".to_string()),
        Just(":".to_string()),
        " {1,5}",
        " {0,3}= {0,10}",
        "\t{1,2}: {0,2}",
    ]
    .prop_filter("separator must not be empty", |s| !s.is_empty())
}

proptest! {
    #[test]
    fn quoted_values_round_trip(value in "[^']{0,40}") {
        let source = format!("--p='{}'", value);
        let parsed = reduce(lex(&source).unwrap()).unwrap();
        prop_assert_eq!(parsed.get("p"), Some(value.as_str()));
    }

    #[test]
    fn double_quoted_values_round_trip(value in "[^\"]{0,40}") {
        let source = format!("--p=\"{}\"", value);
        let parsed = reduce(lex(&source).unwrap()).unwrap();
        prop_assert_eq!(parsed.get("p"), Some(value.as_str()));
    }

    #[test]
    fn lexemes_cover_unprefixed_input(source in "[a-z0-9 =:._]{0,40}") {
        let tokens = tokenize(&source).unwrap();
        let rebuilt: String = tokens.iter().map(|token| token.lexeme.as_str()).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn lexed_streams_have_no_separator_runs(source in "[-/a-z0-9 =:'\"._]{0,40}") {
        if let Ok(tokens) = lex(&source) {
            prop_assert!(tokens
                .windows(2)
                .all(|pair| !(pair[0].is_separator() && pair[1].is_separator())));
            prop_assert_eq!(collapse_separators(tokens.clone()), tokens);
        }
    }

    #[test]
    fn identifiers_never_keep_their_prefix(name in name_strategy(), prefix in prop_oneof![Just("-"), Just("--"), Just("/")]) {
        let tokens = lex(&format!("{}{}", prefix, name)).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::Identifier);
        prop_assert_eq!(&tokens[0].lexeme, &name);
    }

    #[test]
    fn separator_spelling_does_not_matter(
        name in name_strategy(),
        separator in separator_strategy(),
        value in "[a-z][a-z0-9]{0,10}",
    ) {
        let tokens = lex(&format!("--{}{}{}", name, separator, value)).unwrap();
        prop_assert_eq!(tokens.len(), 3);
        prop_assert_eq!(tokens[1].kind, TokenKind::Separator);

        let parsed = reduce(tokens).unwrap();
        prop_assert_eq!(parsed.get(&name), Some(value.as_str()));
    }

    #[test]
    fn detokenized_streams_lex_back(
        pairs in prop::collection::vec((name_strategy(), "[^'\"]{0,12}"), 0..6),
    ) {
        let source = pairs
            .iter()
            .map(|(name, value)| format!("--{}='{}'", name, value))
            .collect::<Vec<_>>()
            .join(" ");
        let tokens = lex(&source).unwrap();
        prop_assert_eq!(lex(&detokenize(&tokens)).unwrap(), tokens);
    }

    #[test]
    fn int64_values_bind_exactly(n in any::<i64>()) {
        let binder = Binder::new(&BasicCommandLine::descriptors()).unwrap();
        let mut host = BasicCommandLine::new();
        let quoted = format!("'{}'", n);
        binder.parse(&["--testInt64", quoted.as_str()], &mut host).unwrap();
        prop_assert_eq!(host.test_int64, n);
    }
}
