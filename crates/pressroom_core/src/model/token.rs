//! Positional `<image-N>` reference tokens inside article bodies.
//!
//! # Responsibility
//! - Produce and locate reference tokens in free-text content.
//! - Offer opt-in diagnostics and renumbering passes.
//!
//! # Invariants
//! - `N` is a 1-based ordinal into `Article::inline_images` at insertion time.
//! - Tokens are plain text; nothing here runs implicitly when the image list
//!   is reordered or shrunk.

use crate::model::article::Article;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

static IMAGE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<image-(\d+)>").expect("valid image token regex"));

/// One token occurrence found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef {
    /// 1-based ordinal carried by the token.
    pub ordinal: usize,
    /// Byte range of the whole token in the scanned text.
    pub span: Range<usize>,
}

/// Result of inserting a token into content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInsertion {
    pub content: String,
    /// Char offset right after the inserted token.
    pub caret: usize,
}

/// Renders the literal token text for `ordinal`.
pub fn image_token(ordinal: usize) -> String {
    format!("<image-{ordinal}>")
}

/// Inserts the token for `ordinal` at `caret` (a char offset), or appends it
/// when no caret is available.
///
/// Carets past the end are clamped to the end. The ordinal is not checked
/// against any image list.
pub fn insert_token(content: &str, ordinal: usize, caret: Option<usize>) -> TokenInsertion {
    let token = image_token(ordinal);
    let char_len = content.chars().count();
    let at = caret.map_or(char_len, |offset| offset.min(char_len));
    let byte_at = content
        .char_indices()
        .nth(at)
        .map_or(content.len(), |(index, _)| index);

    let mut next = String::with_capacity(content.len() + token.len());
    next.push_str(&content[..byte_at]);
    next.push_str(&token);
    next.push_str(&content[byte_at..]);

    TokenInsertion {
        content: next,
        caret: at + token.chars().count(),
    }
}

/// Finds every token in text order.
///
/// Tokens whose ordinal does not fit in `usize` are skipped.
pub fn find_tokens(content: &str) -> Vec<TokenRef> {
    IMAGE_TOKEN_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let ordinal = caps.get(1)?.as_str().parse().ok()?;
            Some(TokenRef {
                ordinal,
                span: whole.range(),
            })
        })
        .collect()
}

/// Lists ordinals in `article.content` that do not denote an existing image.
///
/// Diagnostic only; each dangling ordinal is reported once, in first-seen order.
pub fn dangling_ordinals(article: &Article) -> Vec<usize> {
    let count = article.inline_images.len();
    let mut dangling = Vec::new();
    for token in find_tokens(&article.content) {
        let in_range = token.ordinal >= 1 && token.ordinal <= count;
        if !in_range && !dangling.contains(&token.ordinal) {
            dangling.push(token.ordinal);
        }
    }
    dangling
}

/// Rewrites token ordinals through `mapping`.
///
/// `Some(n)` replaces the ordinal with `n`; `None` leaves the token untouched.
/// This is the explicit reconciliation pass callers may run after editing the
/// image list.
pub fn renumber_tokens<F>(content: &str, mut mapping: F) -> String
where
    F: FnMut(usize) -> Option<usize>,
{
    IMAGE_TOKEN_RE
        .replace_all(content, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(&mut mapping)
                .map_or_else(|| caps[0].to_string(), image_token)
        })
        .into_owned()
}
