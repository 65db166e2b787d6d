//! Front door: source text in, token stream out, with caching.

use fixer_lexer::{LexItem, LexerConfig};
use tracing::debug;

use crate::cache::{CodeHash, TokenCache};
use crate::stream::Tokens;

/// Turns source text into primitive lexical items.
///
/// Implementations must be pure: the same text always yields the same
/// items, and the item texts concatenate back to the input.
pub trait Scanner {
    fn scan<'a>(&self, source: &'a str) -> Vec<LexItem<'a>>;
}

/// The PHP scanner from `fixer_lexer`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhpScanner {
    config: LexerConfig,
}

impl PhpScanner {
    pub const fn new(config: LexerConfig) -> Self {
        PhpScanner { config }
    }

    pub const fn config(&self) -> LexerConfig {
        self.config
    }
}

impl Scanner for PhpScanner {
    fn scan<'a>(&self, source: &'a str) -> Vec<LexItem<'a>> {
        fixer_lexer::tokenize(source, self.config)
    }
}

/// Builds token streams from source, reusing earlier scans of the same
/// text.
///
/// Every stream handed out is an independent copy: mutating it never
/// affects the cache or later streams for the same text.
#[derive(Debug, Default)]
pub struct Tokenizer<S = PhpScanner> {
    scanner: S,
    cache: TokenCache,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LexerConfig) -> Self {
        Self::with_scanner(PhpScanner::new(config))
    }
}

impl<S: Scanner> Tokenizer<S> {
    pub fn with_scanner(scanner: S) -> Self {
        Tokenizer {
            scanner,
            cache: TokenCache::default(),
        }
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    /// A fresh, unchanged stream for `source`.
    pub fn from_source(&mut self, source: &str) -> Tokens {
        let hash = CodeHash::of(source);
        if let Some(cached) = self.cache.get(hash) {
            // A hash collision must not hand out another file's tokens.
            if cached.generate_code() == source {
                debug!(hash = hash.value(), len = source.len(), "token cache hit");
                let mut tokens = cached.clone();
                tokens.clear_changed();
                return tokens;
            }
            debug!(hash = hash.value(), "token cache collision, rescanning");
        } else {
            debug!(hash = hash.value(), len = source.len(), "token cache miss");
        }

        let tokens = Tokens::from_lex_items(&self.scanner.scan(source));
        self.cache.put(hash, tokens.clone());
        tokens
    }

    /// Caches a compacted copy of `tokens` under the hash of their current
    /// code, so a later request for that text skips the scan.
    pub fn store(&mut self, tokens: &Tokens) -> CodeHash {
        let compact = tokens
            .iter()
            .filter(|token| !token.is_empty())
            .cloned()
            .collect::<Tokens>();
        let hash = compact.code_hash();
        debug!(hash = hash.value(), tokens = compact.len(), "storing token stream");
        self.cache.put(hash, compact);
        hash
    }

    /// Forgets every cached stream.
    pub fn clear_cache(&mut self) {
        debug!(entries = self.cache.len(), "clearing token cache");
        self.cache.clear();
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TokenCache {
        &mut self.cache
    }
}

/// Convenience for one-off scans that do not need a cache.
pub fn tokens_from_source(source: &str, config: LexerConfig) -> Tokens {
    Tokens::from_lex_items(&PhpScanner::new(config).scan(source))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
