//! Article domain model.
//!
//! # Responsibility
//! - Define the canonical article record and its inline-image list.
//! - Provide the typed field patch used by whole-record updates.
//!
//! # Invariants
//! - `id` is the identity key; it is never used as a display value.
//! - `inline_images` order decides which ordinal an `<image-N>` token denotes.
//! - `date` is a pre-formatted display string, not a structured date.

use serde::{Deserialize, Serialize};

/// Identity key of an article inside one collection.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ArticleId = i64;

/// Image embedded in an article body and referenced by ordinal tokens.
///
/// An empty `caption` means the image has no caption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

impl InlineImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: String::new(),
        }
    }

    pub fn with_caption(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: caption.into(),
        }
    }

    /// Returns the caption when one is set.
    pub fn caption(&self) -> Option<&str> {
        (!self.caption.is_empty()).then_some(self.caption.as_str())
    }
}

/// Canonical content record of the publication workflow.
///
/// Serialized with camelCase names to match the portable export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    /// Display-only flag; has no structural effect.
    pub is_featured: bool,
    pub category: String,
    pub title: String,
    pub author: String,
    /// Pre-formatted display date, e.g. `October 19, 2026`.
    pub date: String,
    pub summary: String,
    /// Hero image URL.
    pub image: String,
    pub accent_color_class: String,
    pub border_color_class: String,
    pub inline_images: Vec<InlineImage>,
    /// Free text that may carry markup and `<image-N>` tokens.
    pub content: String,
}

impl Article {
    /// Creates an article with the given id and empty text fields.
    ///
    /// Option-backed fields (`category`, color classes) and `date` are left
    /// empty; callers that need catalog defaults go through the store.
    pub fn new(id: ArticleId) -> Self {
        Self {
            id,
            is_featured: false,
            category: String::new(),
            title: String::new(),
            author: String::new(),
            date: String::new(),
            summary: String::new(),
            image: String::new(),
            accent_color_class: String::new(),
            border_color_class: String::new(),
            inline_images: Vec::new(),
            content: String::new(),
        }
    }

    /// Returns a copy of this article with `patch` merged over it.
    pub fn merged(&self, patch: &ArticlePatch) -> Self {
        let mut next = self.clone();
        patch.apply_to(&mut next);
        next
    }

    /// Returns whether `term` (already lowercased) occurs in any searchable field.
    pub(crate) fn matches_term(&self, lowered_term: &str) -> bool {
        [
            self.title.as_str(),
            self.author.as_str(),
            self.summary.as_str(),
            self.category.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(lowered_term))
    }
}

/// Field-level patch for `CollectionStore::update`.
///
/// `None` leaves the field unchanged. `id` is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub is_featured: Option<bool>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub accent_color_class: Option<String>,
    pub border_color_class: Option<String>,
    pub inline_images: Option<Vec<InlineImage>>,
    pub content: Option<String>,
}

impl ArticlePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn inline_images(value: Vec<InlineImage>) -> Self {
        Self {
            inline_images: Some(value),
            ..Self::default()
        }
    }

    /// Returns whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply_to(&self, article: &mut Article) {
        if let Some(value) = self.is_featured {
            article.is_featured = value;
        }
        overwrite(&mut article.category, &self.category);
        overwrite(&mut article.title, &self.title);
        overwrite(&mut article.author, &self.author);
        overwrite(&mut article.date, &self.date);
        overwrite(&mut article.summary, &self.summary);
        overwrite(&mut article.image, &self.image);
        overwrite(&mut article.accent_color_class, &self.accent_color_class);
        overwrite(&mut article.border_color_class, &self.border_color_class);
        overwrite(&mut article.inline_images, &self.inline_images);
        overwrite(&mut article.content, &self.content);
    }
}

fn overwrite<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
