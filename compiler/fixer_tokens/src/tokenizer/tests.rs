use std::cell::Cell;

use super::*;
use crate::token::Token;
use pretty_assertions::assert_eq;

/// Counts how often the wrapped scanner actually runs.
#[derive(Default)]
struct CountingScanner {
    inner: PhpScanner,
    scans: Cell<usize>,
}

impl Scanner for CountingScanner {
    fn scan<'a>(&self, source: &'a str) -> Vec<LexItem<'a>> {
        self.scans.set(self.scans.get() + 1);
        self.inner.scan(source)
    }
}

#[test]
fn second_request_is_served_from_cache() {
    let mut tokenizer = Tokenizer::with_scanner(CountingScanner::default());
    let first = tokenizer.from_source("<?php echo 1;");
    let second = tokenizer.from_source("<?php echo 1;");
    assert_eq!(tokenizer.scanner().scans.get(), 1);
    assert_eq!(first.as_slice(), second.as_slice());
    assert_eq!(tokenizer.cache().len(), 1);
}

#[test]
fn mutating_a_stream_does_not_touch_the_cache() {
    let mut tokenizer = Tokenizer::new();
    let mut tokens = tokenizer.from_source("<?php echo 1;");
    let count = tokens.len();
    for index in 0..count {
        tokens.clear_at(index).unwrap();
    }
    let again = tokenizer.from_source("<?php echo 1;");
    assert_eq!(again.len(), count);
    assert!(!again.is_changed());
    assert_eq!(again.generate_code(), "<?php echo 1;");
}

#[test]
fn clear_cache_forces_rescan() {
    let mut tokenizer = Tokenizer::with_scanner(CountingScanner::default());
    tokenizer.from_source("<?php ;");
    tokenizer.clear_cache();
    assert!(tokenizer.cache().is_empty());
    tokenizer.from_source("<?php ;");
    assert_eq!(tokenizer.scanner().scans.get(), 2);
}

#[test]
fn stored_stream_is_compacted_and_reused() {
    let mut tokenizer = Tokenizer::with_scanner(CountingScanner::default());
    let mut tokens = tokenizer.from_source("<?php $a = 1;");
    tokens.clear_range(2, 4).unwrap();
    tokens.insert_at(2, [Token::char('=')]).unwrap();

    let hash = tokenizer.store(&tokens);
    assert_eq!(hash, CodeHash::of("<?php $a=1;"));

    let reused = tokenizer.from_source("<?php $a=1;");
    assert_eq!(tokenizer.scanner().scans.get(), 1);
    assert_eq!(reused.len(), 5);
    assert!(!reused.is_changed());
}

#[test]
fn config_reaches_the_scanner() {
    let mut tokenizer = Tokenizer::with_config(LexerConfig::with_short_open_tag(false));
    let tokens = tokenizer.from_source("<? echo 1;");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_given_kind(fixer_lexer::TokenId::InlineHtml));
}

#[test]
fn one_off_scan() {
    let tokens = tokens_from_source("<?php ;", LexerConfig::default());
    assert_eq!(tokens.len(), 2);
}
