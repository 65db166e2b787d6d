//! Property-based tests for the token stream.
//!
//! For source assembled from PHP fragments:
//! 1. Round trip: a fresh stream generates its source
//! 2. Blocks: every matched start/end pair is mutually inverse
//! 3. Index stability: merge and whitespace removal keep the length
//! 4. Cache: edits to one stream never reach another
//! 5. Override: replacing a range with its own tokens is a no-op

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use fixer_tokens::{BlockType, CaseSensitivity, TokenId, TokenPattern, Tokenizer, Tokens};
use proptest::prelude::*;

fn fragment_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        " ", "\n", "  \n  ", "\t", "$a", "$b", "foo", "Foo", "FOO", "(", ")", "[", "]", "{",
        "}", ";", ",", "=", "->", "::", "1", "'s'", "// c\n", "/* c */", "# c\n", "function",
        "class", "new", "return", "array", "echo",
    ])
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..30)
        .prop_map(|parts| format!("<?php {}", parts.concat()))
}

fn scan(source: &str) -> Tokens {
    Tokenizer::new().from_source(source)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn stream_generates_its_source(source in source_strategy()) {
        let tokens = scan(&source);
        prop_assert_eq!(tokens.generate_code(), source.as_str());
        prop_assert_eq!(tokens.generate_partial_code(..), source);
        prop_assert!(!tokens.is_changed());
    }

    #[test]
    fn block_edges_are_inverse(source in source_strategy()) {
        let tokens = scan(&source);
        for index in 0..tokens.len() {
            let Some(edge) = tokens.detect_block_type(index) else { continue };
            if !edge.is_start {
                continue;
            }
            if let Ok(end) = tokens.find_block_end(edge.block_type, index) {
                prop_assert!(end > index);
                prop_assert_eq!(tokens.find_block_start(edge.block_type, end), Ok(index));
            }
        }
    }

    #[test]
    fn merge_keeps_length(source in source_strategy(), pick in any::<prop::sample::Index>()) {
        let mut tokens = scan(&source);
        let len = tokens.len();
        let index = pick.index(len);
        tokens.clear_token_and_merge_surrounding_whitespace(index).unwrap();
        prop_assert_eq!(tokens.len(), len);
        prop_assert!(tokens[index].is_empty());
    }

    #[test]
    fn whitespace_removal_keeps_length(
        source in source_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tokens = scan(&source);
        let len = tokens.len();
        let index = pick.index(len);
        tokens.remove_leading_whitespace(index, None).unwrap();
        tokens.remove_trailing_whitespace(index, None).unwrap();
        prop_assert_eq!(tokens.len(), len);
        prop_assert_eq!(&tokens[index], &scan(&source)[index]);
    }

    #[test]
    fn cached_streams_are_independent(source in source_strategy()) {
        let mut tokenizer = Tokenizer::new();
        let mut first = tokenizer.from_source(&source);
        for index in 0..first.len() {
            first.clear_at(index).unwrap();
        }
        let second = tokenizer.from_source(&source);
        prop_assert_eq!(second.generate_code(), source);
        prop_assert!(!second.is_changed());
    }

    #[test]
    fn override_with_own_tokens_is_noop(
        source in source_strategy(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let mut tokens = scan(&source);
        let (a, b) = (a.index(tokens.len()), b.index(tokens.len()));
        let (start, end) = (a.min(b), a.max(b));
        let same = tokens.as_slice()[start..=end].to_vec();
        tokens.override_range(start, end, same).unwrap();
        prop_assert!(!tokens.is_changed());
        prop_assert_eq!(tokens.generate_code(), source);
    }

    #[test]
    fn insensitive_search_finds_any_case(
        name in prop::sample::select(vec!["foo", "Foo", "FOO"]),
        query in prop::sample::select(vec!["foo", "Foo", "FOO", "fOO"]),
    ) {
        let tokens = scan(&format!("<?php {name}();"));
        let pattern = [TokenPattern::Text(TokenId::String, query.to_owned()), '('.into()];

        let found = tokens
            .find_sequence(&pattern, .., &CaseSensitivity::Insensitive)
            .unwrap();
        prop_assert_eq!(found.map(|found| found.keys().copied().collect::<Vec<_>>()), Some(vec![1, 2]));

        let exact = tokens
            .find_sequence(&pattern, .., &CaseSensitivity::Sensitive)
            .unwrap();
        prop_assert_eq!(exact.is_some(), name == query);
    }

    #[test]
    fn every_block_type_id_round_trips(id in 1_i64..=12) {
        prop_assert_eq!(BlockType::try_from(id).map(BlockType::id), Ok(id));
    }
}
