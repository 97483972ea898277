//! Lenient coercion of loosely-typed import payloads into articles.
//!
//! # Responsibility
//! - Turn every element of an arbitrary JSON sequence into an `Article`.
//! - Keep the per-field default table in one place.
//!
//! # Invariants
//! - Never fails and never reports which fields were defaulted.
//! - Output length equals input length; input order is kept.
//! - Ids are taken as-is when numeric; collisions are not resolved here.

use crate::config::DeskConfig;
use crate::model::article::{Article, ArticleId, InlineImage};
use serde_json::{Map, Value};

/// Title used when an imported record carries none.
pub const UNTITLED: &str = "Untitled";

/// Fallback values for fields missing from imported records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeDefaults {
    pub category: String,
    pub accent_color_class: String,
    pub border_color_class: String,
    /// Already formatted display date used as "today".
    pub date: String,
}

impl NormalizeDefaults {
    /// Takes the first catalog options from `config` and `today` as the date.
    pub fn from_config(config: &DeskConfig, today: impl Into<String>) -> Self {
        Self {
            category: config.default_category().to_string(),
            accent_color_class: config.default_accent_color().to_string(),
            border_color_class: config.default_border_color().to_string(),
            date: today.into(),
        }
    }
}

/// Coerces every element of `raw` into an article.
pub fn normalize(raw: &[Value], defaults: &NormalizeDefaults) -> Vec<Article> {
    raw.iter()
        .enumerate()
        .map(|(position, value)| normalize_one(position, value, defaults))
        .collect()
}

fn normalize_one(position: usize, value: &Value, defaults: &NormalizeDefaults) -> Article {
    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);
    let field = |name: &str| fields.get(name).filter(|value| !value.is_null());

    Article {
        id: field("id")
            .and_then(numeric_id)
            .unwrap_or_else(|| fallback_id(position)),
        is_featured: fields.get("isFeatured").is_some_and(is_truthy),
        category: text_or(field("category"), &defaults.category),
        title: text_or(field("title"), UNTITLED),
        author: text_or(field("author"), ""),
        date: text_or(field("date"), &defaults.date),
        summary: text_or(field("summary"), ""),
        image: text_or(field("image"), ""),
        accent_color_class: text_or(field("accentColorClass"), &defaults.accent_color_class),
        border_color_class: text_or(field("borderColorClass"), &defaults.border_color_class),
        inline_images: field("inlineImages")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(normalize_inline_image).collect())
            .unwrap_or_default(),
        content: field("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

fn normalize_inline_image(value: &Value) -> InlineImage {
    let field = |name: &str| value.get(name).filter(|value| !value.is_null());
    InlineImage {
        url: text_or(field("url"), ""),
        caption: text_or(field("caption"), ""),
    }
}

/// Integer-valued JSON numbers become ids; anything else is rejected.
fn numeric_id(value: &Value) -> Option<ArticleId> {
    if let Some(id) = value.as_i64() {
        return Some(id);
    }
    let float = value.as_f64()?;
    let in_range = float >= ArticleId::MIN as f64 && float <= ArticleId::MAX as f64;
    (float.fract() == 0.0 && in_range).then_some(float as ArticleId)
}

fn fallback_id(position: usize) -> ArticleId {
    ArticleId::try_from(position)
        .map(|index| index.saturating_add(1))
        .unwrap_or(ArticleId::MAX)
}

/// Mirrors loose-typed truthiness: `false`, `0`, `""` and `null` are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Present strings pass through; other present scalars use their JSON text.
fn text_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => fallback.to_string(),
    }
}
