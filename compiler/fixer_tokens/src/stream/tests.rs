use super::*;
use crate::pattern::{CaseSensitivity, TokenPattern};
use fixer_lexer::{tokenize, LexerConfig};
use pretty_assertions::assert_eq;

fn scan(source: &str) -> Tokens {
    Tokens::from_lex_items(&tokenize(source, LexerConfig::default()))
}

fn texts(tokens: &Tokens) -> Vec<&str> {
    tokens.iter().map(Token::text).collect()
}

// ─── Construction ───

#[test]
fn fresh_stream_is_unchanged() {
    let tokens = scan("<?php echo 1;");
    assert!(!tokens.is_changed());
    assert_eq!(tokens.generate_code(), "<?php echo 1;");
    assert_eq!(tokens.to_string(), "<?php echo 1;");
}

#[test]
fn token_list_hash_matches_source_hash() {
    let scanned = scan("<?php echo 1;");
    let listed: Tokens = scanned.iter().cloned().collect();
    assert_eq!(listed.code_hash(), scanned.code_hash());
    assert_eq!(listed.code_hash(), CodeHash::of("<?php echo 1;"));
    assert!(!listed.is_changed());
}

#[test]
fn empty_stream() {
    let tokens = Tokens::from_tokens([]);
    assert!(tokens.is_empty());
    assert!(!tokens.is_token_kind_found(TokenId::OpenTag));
    assert!(!tokens.is_monolithic_php());
    assert_eq!(tokens.generate_code(), "");
}

// ─── Access ───

#[test]
fn at_is_bounds_checked() {
    let tokens = scan("<?php ;");
    assert_eq!(tokens.at(1).map(Token::text), Ok(";"));
    assert_eq!(
        tokens.at(2),
        Err(TokensError::IndexOutOfBounds { index: 2, len: 2 })
    );
    assert_eq!(tokens.get(5), None);
}

#[test]
fn is_empty_at() {
    let mut tokens = Tokens::from_tokens([Token::char('('), Token::whitespace(" ")]);
    assert_eq!(tokens.is_empty_at(0), Ok(false));
    assert_eq!(tokens.is_empty_at(1), Ok(false));
    tokens.clear_at(0).unwrap();
    assert_eq!(tokens.is_empty_at(0), Ok(true));
    assert!(tokens.is_empty_at(2).is_err());
}

#[test]
fn partial_code_is_clamped() {
    let tokens = scan("<?php $a = 1;");
    assert_eq!(tokens.generate_partial_code(1..=3), "$a =");
    assert_eq!(tokens.generate_partial_code(5..), "1;");
    assert_eq!(tokens.generate_partial_code(5..100), "1;");
    assert_eq!(tokens.generate_partial_code(100..), "");
}

// ─── Mutation ───

#[test]
fn set_equal_token_is_noop() {
    let mut tokens = scan("<?php $a;");
    tokens.set(1, Token::new(TokenId::Variable, "$a")).unwrap();
    assert!(!tokens.is_changed());
    tokens.set(1, Token::new(TokenId::Variable, "$b")).unwrap();
    assert!(tokens.is_changed());
    assert_eq!(tokens.generate_code(), "<?php $b;");
}

#[test]
fn clearing_a_tombstone_does_not_mark_changed() {
    let mut tokens = Tokens::from_tokens([Token::empty(), Token::char(';')]);
    tokens.clear_at(0).unwrap();
    assert!(!tokens.is_changed());
}

#[test]
fn insert_at_shifts_and_indexes() {
    let mut tokens = scan("<?php $a;");
    let inserted = tokens
        .insert_at(1, [Token::new(TokenId::Echo, "echo"), Token::whitespace(" ")])
        .unwrap();
    assert_eq!(inserted, 2);
    assert_eq!(tokens.generate_code(), "<?php echo $a;");
    assert!(tokens.is_token_kind_found(TokenId::Echo));
    assert_eq!(
        tokens
            .find_given_kind(TokenId::Variable, ..)
            .keys()
            .copied()
            .collect::<Vec<_>>(),
        vec![3]
    );
    assert!(tokens.is_changed());
}

#[test]
fn insert_nothing_is_noop() {
    let mut tokens = scan("<?php $a;");
    assert_eq!(tokens.insert_at(1, []), Ok(0));
    assert!(!tokens.is_changed());
    assert!(tokens.insert_at(4, []).is_err());
}

#[test]
fn clear_range_keeps_length() {
    let mut tokens = scan("<?php $a = 1;");
    let len = tokens.len();
    tokens.clear_range(1, 5).unwrap();
    assert_eq!(tokens.len(), len);
    assert_eq!(tokens.generate_code(), "<?php ;");
    assert!(!tokens.is_token_kind_found(TokenId::Variable));
}

#[test]
fn clear_range_rejects_bad_bounds_without_mutating() {
    let mut tokens = scan("<?php $a;");
    assert_eq!(
        tokens.clear_range(1, 9),
        Err(TokensError::InvalidRange {
            start: 1,
            end: 9,
            len: 3
        })
    );
    assert!(tokens.clear_range(2, 1).is_err());
    assert!(!tokens.is_changed());
}

#[test]
fn override_range_shorter_replacement_tombstones_rest() {
    let mut tokens = scan("<?php $a = 1;");
    tokens
        .override_range(1, 5, [Token::new(TokenId::Variable, "$b")])
        .unwrap();
    assert_eq!(tokens.len(), 7);
    assert_eq!(tokens.generate_code(), "<?php $b;");
}

#[test]
fn override_range_longer_replacement_inserts_after_end() {
    let mut tokens = scan("<?php $a;");
    tokens
        .override_range(
            1,
            1,
            [
                Token::new(TokenId::Variable, "$a"),
                Token::char('+'),
                Token::new(TokenId::Variable, "$b"),
            ],
        )
        .unwrap();
    assert_eq!(texts(&tokens), vec!["<?php ", "$a", "+", "$b", ";"]);
}

#[test]
fn override_range_with_identical_tokens_changes_nothing() {
    let mut tokens = scan("<?php function foo(array $bar){}");
    tokens
        .override_range(5, 5, [Token::new(TokenId::Array, "array")])
        .unwrap();
    assert!(!tokens.is_changed());
    tokens.clear_empty_tokens();
    assert_eq!(tokens.generate_code(), "<?php function foo(array $bar){}");
}

#[test]
fn clear_empty_tokens_compacts() {
    let mut tokens = scan("<?php $a = 1;");
    tokens.clear_range(2, 4).unwrap();
    tokens.clear_empty_tokens();
    assert_eq!(texts(&tokens), vec!["<?php ", "$a", "1", ";"]);
    assert_eq!(
        tokens
            .find_given_kind(TokenId::LNumber, ..)
            .keys()
            .copied()
            .collect::<Vec<_>>(),
        vec![2]
    );
}

// ─── Kind occurrence ───

#[test]
fn kind_predicates() {
    let tokens = scan("<?php class A { function b() {} }");
    assert!(tokens.is_token_kind_found(TokenId::Class));
    assert!(tokens.is_token_kind_found('{'));
    assert!(tokens.is_all_token_kinds_found([TokenId::Class, TokenId::Function]));
    assert!(!tokens.is_all_token_kinds_found([TokenId::Class, TokenId::Interface]));
    assert!(tokens.is_any_token_kinds_found([TokenId::Interface, TokenId::Function]));
    assert!(!tokens.is_any_token_kinds_found([TokenId::Interface, TokenId::Trait]));
    assert_eq!(tokens.count_token_kind('{'), 2);
}

// ─── Monolithic detection ───

#[test]
fn monolithic_detection() {
    let cases = [
        ("<?php\n", true),
        ("<?php\n?>", true),
        ("", false),
        (" ", false),
        ("#!/usr/bin/env php\n<?php\n", false),
        (" <?php\n", false),
        ("<?php\n?> ", false),
        ("<?php\n?><?php\n", false),
        ("<?=' ';\n", true),
        ("<?=' '?>", true),
        ("<?php\n?><?=' ';\n", false),
    ];
    for (source, expected) in cases {
        assert_eq!(scan(source).is_monolithic_php(), expected, "{source:?}");
    }
}

#[test]
fn monolithic_detection_follows_short_open_tag() {
    let enabled = |source: &str| {
        Tokens::from_lex_items(&tokenize(source, LexerConfig::with_short_open_tag(true)))
            .is_monolithic_php()
    };
    let disabled = |source: &str| {
        Tokens::from_lex_items(&tokenize(source, LexerConfig::with_short_open_tag(false)))
            .is_monolithic_php()
    };
    assert!(enabled("<?\n"));
    assert!(enabled("<?\n?>"));
    assert!(!enabled("<?\n?><?php\n"));
    assert!(!disabled("<?\n"));
    assert!(!disabled("<?\n?>"));
}

// ─── Search ───

#[test]
fn sequence_search_restarts_after_partial_match() {
    let tokens = scan("<?php $a = 1; $a = 2;");
    let found = tokens
        .find_sequence(
            &[
                TokenPattern::Kind(TokenId::Variable),
                '='.into(),
                (TokenId::LNumber, "2").into(),
            ],
            ..,
            &CaseSensitivity::Sensitive,
        )
        .unwrap()
        .unwrap();
    assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![8, 10, 12]);
}

#[test]
fn sequence_search_skips_comments() {
    let tokens = scan("<?php foo /* x */ (1);");
    let found = tokens
        .find_sequence(
            &[(TokenId::String, "foo").into(), '('.into()],
            ..,
            &CaseSensitivity::default(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![1, 5]);
}

#[test]
fn sequence_search_skips_tombstones() {
    let mut tokens = scan("<?php $a = 1;");
    tokens.clear_at(3).unwrap();
    let found = tokens
        .find_sequence(
            &[TokenId::Variable.into(), TokenId::LNumber.into()],
            ..,
            &CaseSensitivity::default(),
        )
        .unwrap();
    assert_eq!(found.map(|found| found.len()), Some(2));
}

#[test]
fn sibling_navigation() {
    // 0 <?php_  1 $a  2 _  3 /* c */  4 _  5 ;
    let mut tokens = scan("<?php $a /* c */ ;");
    assert_eq!(tokens.next_meaningful(1), Some(5));
    assert_eq!(tokens.prev_meaningful(5), Some(1));
    assert_eq!(tokens.next_non_whitespace(1, None), Some(3));
    assert_eq!(tokens.prev_non_whitespace(5, None), Some(3));
    assert_eq!(tokens.non_empty_sibling(1, Direction::Forward), Some(2));
    tokens.clear_at(2).unwrap();
    assert_eq!(tokens.non_empty_sibling(1, Direction::Forward), Some(3));
    assert_eq!(tokens.prev_meaningful(1), Some(0));
    assert_eq!(tokens.prev_meaningful(0), None);
    assert_eq!(tokens.next_meaningful(5), None);
}

#[test]
fn non_whitespace_with_custom_chars() {
    // 0 <?php_  1 $a  2 "\n "  3 ;
    let tokens = scan("<?php $a\n ;");
    assert_eq!(tokens.next_non_whitespace(1, None), Some(3));
    assert_eq!(tokens.next_non_whitespace(1, Some(" ")), Some(2));
}

#[test]
fn kind_sibling_finds_comments() {
    let tokens = scan("<?php $a; // note\n$b;");
    let comment = [TokenPattern::Kind(TokenId::Comment)];
    assert_eq!(tokens.next_token_of_kind(0, &comment, true), Some(4));
    assert_eq!(tokens.prev_token_of_kind(6, &comment, true), Some(4));
    assert_eq!(
        tokens.next_token_of_kind(0, &[TokenId::Class.into()], true),
        None
    );
}

#[test]
fn kind_sibling_case_insensitive() {
    let tokens = scan("<?php FOO();");
    let pattern = [TokenPattern::from((TokenId::String, "foo"))];
    assert_eq!(tokens.next_token_of_kind(0, &pattern, true), None);
    assert_eq!(tokens.next_token_of_kind(0, &pattern, false), Some(1));
}

// ─── Whitespace helpers ───

#[test]
fn merge_moves_whitespace_into_cleared_slot_at_start() {
    let mut tokens = Tokens::from_tokens([
        Token::char(';'),
        Token::whitespace(" "),
        Token::char(';'),
    ]);
    tokens.clear_token_and_merge_surrounding_whitespace(0).unwrap();
    assert_eq!(texts(&tokens), vec![" ", "", ";"]);
}

#[test]
fn ensure_whitespace_rejects_bad_offset() {
    let mut tokens = scan("<?php $a;");
    assert!(tokens.ensure_whitespace_at_index(0, -1, " ").is_err());
    assert!(tokens.ensure_whitespace_at_index(9, 1, " ").is_err());
    assert!(!tokens.is_changed());
}

#[test]
fn remove_whitespace_with_custom_chars_trims_edge() {
    // 0 <?php_  1 $a  2 "\n  "  3 ;
    let mut tokens = scan("<?php $a\n  ;");
    tokens.remove_leading_whitespace(3, Some(" ")).unwrap();
    assert_eq!(tokens.generate_code(), "<?php $a\n;");
    assert_eq!(tokens.len(), 4);

    let mut tokens = scan("<?php $a  \n;");
    tokens.remove_trailing_whitespace(1, Some(" ")).unwrap();
    assert_eq!(tokens.generate_code(), "<?php $a\n;");
}

#[test]
fn remove_whitespace_ignores_non_whitespace_neighbour() {
    let mut tokens = scan("<?php $a;");
    tokens.remove_trailing_whitespace(1, None).unwrap();
    tokens.remove_leading_whitespace(1, None).unwrap();
    assert!(!tokens.is_changed());
}
