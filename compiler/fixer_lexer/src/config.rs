//! Scanner configuration.

/// Settings that change how source text is split into items.
///
/// Mirrors the PHP ini switches that affect tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Whether a bare `<?` opens PHP code (`short_open_tag`).
    ///
    /// `<?=` always opens code regardless of this flag.
    pub short_open_tag: bool,
}

impl LexerConfig {
    /// Default for `short_open_tag`, matching a stock PHP build.
    pub const DEFAULT_SHORT_OPEN_TAG: bool = true;

    /// Create a config with the given `short_open_tag` setting.
    pub const fn with_short_open_tag(short_open_tag: bool) -> Self {
        Self { short_open_tag }
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            short_open_tag: Self::DEFAULT_SHORT_OPEN_TAG,
        }
    }
}
