//! Editable PHP token stream for source-rewriting rules.
//!
//! A [`Tokenizer`] turns source text into a [`Tokens`] stream. Rules query
//! the stream (sequence search, kind search, sibling navigation, block
//! matching) and mutate it in place without re-parsing; `generate_code`
//! turns it back into text.
//!
//! # Invariants
//!
//! - A stream built from source and never mutated regenerates the source
//!   byte for byte.
//! - Length-preserving mutations leave tombstones instead of removing
//!   slots, so indices other rules hold stay valid until
//!   [`Tokens::clear_empty_tokens`] compacts the stream.
//! - Operations that fail do so before touching the stream.
//!
//! # Example
//!
//! ```
//! use fixer_tokens::{BlockType, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::new();
//! let mut tokens = tokenizer.from_source("<?php foo($a);");
//! let end = tokens.find_block_end(BlockType::Parenthesis, 2).unwrap();
//! assert_eq!(end, 4);
//!
//! tokens.clear_range(2, end).unwrap();
//! assert_eq!(tokens.generate_code(), "<?php foo;");
//! ```

mod block;
mod cache;
mod category;
mod error;
mod kind_index;
mod pattern;
mod stream;
mod token;
mod tokenizer;

use std::sync::Once;

pub use block::{BlockEdge, BlockType};
pub use cache::{CodeHash, TokenCache};
pub use category::{classify, TokenCategory};
pub use error::{BlockSide, TokensError};
pub use fixer_lexer::{LexerConfig, TokenId};
pub use pattern::{CaseSensitivity, TokenPattern};
pub use stream::{Direction, Tokens};
pub use token::{Token, TokenKind, DEFAULT_WHITESPACE};
pub use tokenizer::{tokens_from_source, PhpScanner, Scanner, Tokenizer};

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber for the engine's cache, compaction and
/// block-matching events.
///
/// Does nothing unless `RUST_LOG` is set, so rule runners and tests can
/// call it unconditionally; later calls are no-ops. For example
/// `RUST_LOG=fixer_tokens=trace` shows every matched block and whitespace
/// merge.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
