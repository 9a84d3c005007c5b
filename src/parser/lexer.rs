//! Markup Lexer
//!
//! Finds tag tokens in raw text and records their byte offsets.
//! Everything between tags is left to the tree builder as text.

use std::sync::LazyLock;

use regex::Regex;

/// Opening, closing or self-closing tag token, tolerant of case and of
/// whitespace inside the delimiters (`< div >`, `</ DIV >`).
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\s*(/)?\s*([A-Za-z][A-Za-z0-9-]*)[^<>]*>").expect("tag pattern is valid")
});

/// Half-open byte range into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Token types for tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<div>`
    Open,
    /// `</div>`
    Close,
    /// `<meta/>`
    SelfClosing,
}

/// A tag token with its lowercase name and position
#[derive(Debug, Clone, PartialEq)]
pub struct TagToken {
    pub kind: TagKind,
    pub name: String,
    pub span: Span,
}

/// Tokenize a whole document into tag tokens, in source order.
pub fn tokenize(text: &str) -> Vec<TagToken> {
    TAG_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(2)?.as_str().to_ascii_lowercase();
            let kind = if caps.get(1).is_some() {
                TagKind::Close
            } else if whole.as_str().contains("/>") {
                TagKind::SelfClosing
            } else {
                TagKind::Open
            };

            Some(TagToken {
                kind,
                name,
                span: Span::new(whole.start(), whole.end()),
            })
        })
        .collect()
}
