//! Strict structural conformance check for candidate article records.
//!
//! # Responsibility
//! - Decide whether a loosely-typed value already has the full article shape.
//!
//! # Invariants
//! - Checks are side-effect free and never repair input.
//! - Never called on the lenient import path; import goes through
//!   `transfer::normalize`.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Wire names of every field an article must carry.
pub const ARTICLE_FIELDS: &[&str] = &[
    "id",
    "isFeatured",
    "category",
    "title",
    "author",
    "date",
    "summary",
    "image",
    "accentColorClass",
    "borderColorClass",
    "inlineImages",
    "content",
];

/// First structural violation found in a candidate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    NotAnObject,
    MissingField(&'static str),
    NonNumericId,
    NonTextTitle,
}

impl Display for ShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "article candidate is not an object"),
            Self::MissingField(field) => write!(f, "article candidate is missing `{field}`"),
            Self::NonNumericId => write!(f, "article `id` must be a number"),
            Self::NonTextTitle => write!(f, "article `title` must be text"),
        }
    }
}

impl Error for ShapeError {}

/// Checks `candidate` against the article schema, reporting the first failure.
pub fn check_article_shape(candidate: &Value) -> Result<(), ShapeError> {
    let object = candidate.as_object().ok_or(ShapeError::NotAnObject)?;

    if let Some(missing) = ARTICLE_FIELDS
        .iter()
        .find(|field| !object.contains_key(**field))
    {
        return Err(ShapeError::MissingField(missing));
    }
    if !object["id"].is_number() {
        return Err(ShapeError::NonNumericId);
    }
    if !object["title"].is_string() {
        return Err(ShapeError::NonTextTitle);
    }
    Ok(())
}

/// Boolean form of [`check_article_shape`].
pub fn is_valid_article_shape(candidate: &Value) -> bool {
    check_article_shape(candidate).is_ok()
}
