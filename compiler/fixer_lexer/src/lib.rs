//! PHP scanner for the token-stream engine.
//!
//! Turns source text into a flat list of [`LexItem`]s: a kind (a generic
//! single character or a [`TokenId`]), the exact source text and the line
//! the text starts on.
//!
//! # Guarantees
//!
//! - Scanning is infallible.
//! - Concatenating the texts of all items reproduces the input byte for
//!   byte, for any input including the empty string.
//! - Single-line comments never contain trailing blanks or their newline.
//!
//! This crate has no `fixer_*` dependencies so tools that only need the raw
//! item list can use it on its own.

mod config;
mod cursor;
mod item;
mod keywords;
mod scanner;
mod token_id;

pub use config::LexerConfig;
pub use item::{LexItem, LexKind};
pub use scanner::RawScanner;
pub use token_id::TokenId;

/// Scans `source` into its lexical items.
pub fn tokenize(source: &str, config: LexerConfig) -> Vec<LexItem<'_>> {
    RawScanner::new(source, config).collect()
}
