//! Export projection and serialization.
//!
//! # Responsibility
//! - Project the collection for preview, clipboard and download output.
//! - Optionally strip markup from article bodies.
//!
//! # Invariants
//! - Projection never mutates its input; only `content` may differ.
//! - Preview, clipboard and file output share `to_export_json`, so equal
//!   inputs and flags give byte-identical text.

use crate::model::article::Article;
use log::info;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));
static CHAR_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});")
        .expect("valid character reference regex")
});

/// Error raised while producing export output.
#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize articles: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to write export `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Returns copies of `articles` with `content` optionally markup-stripped.
pub fn project(articles: &[Article], strip: bool) -> Vec<Article> {
    articles
        .iter()
        .map(|article| {
            let mut copy = article.clone();
            if strip {
                copy.content = strip_markup(&article.content);
            }
            copy
        })
        .collect()
}

/// Converts markup text to plain text.
///
/// Tags are removed, then character references (named, decimal and hex) are
/// decoded in a single pass, so `&amp;lt;` yields `&lt;` rather than `<`.
/// Non-breaking spaces, encoded or literal, become ordinary spaces.
/// `<image-N>` tokens look like tags and are removed as well.
///
/// Leading and trailing whitespace is trimmed on purpose: markup usually
/// leaves stray newlines around block tags.
pub fn strip_markup(content: &str) -> String {
    let without_tags = MARKUP_TAG_RE.replace_all(content, "");
    let decoded = CHAR_REF_RE.replace_all(&without_tags, |caps: &Captures<'_>| {
        decode_char_ref(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    decoded.replace('\u{a0}', " ").trim().to_string()
}

/// Decodes the body of `&...;`; unknown references yield `None`.
fn decode_char_ref(body: &str) -> Option<String> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let decoded = match body {
        "nbsp" => '\u{a0}',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "middot" => '\u{b7}',
        "bull" => '\u{2022}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "deg" => '\u{b0}',
        "euro" => '\u{20ac}',
        _ => return None,
    };
    Some(decoded.to_string())
}

/// Serializes the projection as indented JSON.
pub fn to_export_json(articles: &[Article], strip: bool) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&project(articles, strip))?)
}

/// Writes the export text to `dir/file_name` and returns the written path.
pub fn write_export_file(
    dir: &Path,
    file_name: &str,
    articles: &[Article],
    strip: bool,
) -> Result<PathBuf, ExportError> {
    let text = to_export_json(articles, strip)?;
    let path = dir.join(file_name);
    std::fs::write(&path, text.as_bytes()).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(
        "event=export_write module=transfer status=ok count={} strip={} bytes={}",
        articles.len(),
        strip,
        text.len()
    );
    Ok(path)
}
