//! Property-based tests for the PHP scanner.
//!
//! For arbitrary text and for text assembled from PHP fragments:
//! 1. Round trip: item texts concatenate back to the source
//! 2. Progress: no item is empty
//! 3. Comments: single-line comments never end in blanks
//! 4. Lines: item lines never decrease

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use fixer_lexer::{tokenize, LexKind, LexerConfig, TokenId};
use proptest::prelude::*;

/// PHP-flavoured fragments that exercise every scanner mode.
fn fragment_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "<?php ", "<?php\n", "<?= ", "<?", "?>", "?>\n", "<html>", " ", "\n", "\r\n", "\t",
        "$a", "$", "{", "}", "(", ")", "[", "]", ";", ",", "->", "?->", "::", "\\", "=", "=>",
        "'s'", "'", "\"", "\"x $a y\"", "\"{$a}\"", "\"${b}\"", "\"$c[0]\"", "`", "{$", "${",
        "// c", "# c", "/* c */", "/** d */", "/*", "<<<EOT\n", "<<<'EOT'\n", "EOT", "EOT;",
        "class", "function", "new", "yield from", "__halt_compiler", "(int)", "1", "0x1F",
        "1.5", ".5", "b'x'", "é", "\u{1}",
    ])
}

fn php_source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..40).prop_map(|parts| parts.concat())
}

fn check_items(source: &str, config: LexerConfig) -> Result<(), TestCaseError> {
    let items = tokenize(source, config);

    let joined: String = items.iter().map(|item| item.text).collect();
    prop_assert_eq!(joined.as_str(), source);

    let mut line = 1;
    for item in &items {
        prop_assert!(!item.text.is_empty(), "empty item {:?}", item);
        prop_assert!(item.line >= line, "line went backwards at {:?}", item);
        line = item.line;

        let is_line_comment = item.kind == LexKind::Id(TokenId::Comment)
            && !item.text.starts_with("/*");
        if is_line_comment {
            prop_assert!(
                !item.text.ends_with([' ', '\t', '\n', '\r']),
                "comment owns trailing whitespace: {:?}",
                item.text
            );
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_arbitrary_text_round_trips(source in any::<String>()) {
        check_items(&source, LexerConfig::default())?;
    }

    #[test]
    fn prop_php_fragments_round_trip(source in php_source_strategy(), short in any::<bool>()) {
        check_items(&source, LexerConfig::with_short_open_tag(short))?;
    }

    #[test]
    fn prop_script_fragments_round_trip(body in php_source_strategy()) {
        check_items(&format!("<?php {body}"), LexerConfig::default())?;
    }
}
