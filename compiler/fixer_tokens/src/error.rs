//! Errors raised by token-stream operations.
//!
//! Every variant is a contract violation by the calling rule, not a data
//! condition to recover from. Operations check their arguments before
//! touching the stream, so an error always means nothing was changed.

use std::fmt;

use thiserror::Error;

/// Which edge of a block an index was expected to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockSide {
    Start,
    End,
}

impl fmt::Display for BlockSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockSide::Start => "start",
            BlockSide::End => "end",
        })
    }
}

/// Error returned by [`Tokens`](crate::Tokens) operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TokensError {
    /// `find_sequence` was given an empty pattern.
    #[error("Invalid sequence.")]
    EmptySequence,

    /// A sequence pattern element can only match whitespace, a comment or
    /// a tombstone.
    #[error("Non-meaningful token at position: \"{position}\".")]
    NonMeaningfulToken { position: usize },

    /// A numeric block type outside the catalog.
    #[error("Invalid param type: \"{0}\".")]
    InvalidBlockType(i64),

    /// The index handed to block navigation is not an edge of the
    /// requested block type.
    #[error("Invalid param ${param} - not a proper block \"{side}\".")]
    NotBlockEdge { param: &'static str, side: BlockSide },

    /// The scan ran off the stream without closing the block.
    #[error("Missing block \"{side}\".")]
    MissingBlockEdge { side: BlockSide },

    #[error("Index {index} is out of bounds for {len} tokens.")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid range {start}..={end} for {len} tokens.")]
    InvalidRange { start: usize, end: usize, len: usize },
}
