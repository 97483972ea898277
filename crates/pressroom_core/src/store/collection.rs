//! Ordered article collection with selection and id allocation.
//!
//! # Responsibility
//! - Own the authoritative article sequence and the current selection.
//! - Expose add/duplicate/delete/move/update and inline-image edits.
//! - Route import/export through the transfer boundary.
//!
//! # Invariants
//! - Every mutation builds a new sequence and installs it as a new `Arc`;
//!   snapshots handed out earlier never change.
//! - Selection is an id, resolved against the current snapshot on read.
//! - Order changes only through add/duplicate/move/delete/import.
//! - Failed imports leave sequence and selection untouched.

use crate::config::{DeskConfig, CATEGORY_FILTER_ALL};
use crate::model::article::{Article, ArticleId, ArticlePatch, InlineImage};
use crate::model::date::today_display_date;
use crate::model::token::insert_token;
use crate::transfer::export::{to_export_json, write_export_file, ExportError};
use crate::transfer::import::{import_articles, read_import_file, ImportError};
use crate::transfer::normalize::NormalizeDefaults;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Suffix appended to the title of a duplicated article.
pub const COPY_SUFFIX: &str = " (Copy)";

type DateSource = Box<dyn Fn() -> String + Send + Sync>;

/// Direction for swapping an entry with its neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards the front (-1).
    Up,
    /// Towards the back (+1).
    Down,
}

impl MoveDirection {
    /// Maps `-1`/`+1` steps to a direction; other values are rejected.
    pub fn from_step(step: i32) -> Option<Self> {
        match step {
            -1 => Some(Self::Up),
            1 => Some(Self::Down),
            _ => None,
        }
    }

    /// Index of the neighbor of `index` in a sequence of `len`, if any.
    fn neighbor(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Self::Up => index.checked_sub(1),
            Self::Down => (index + 1 < len).then_some(index + 1),
        }
    }
}

/// Category part of the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parses UI filter values; the `all` sentinel matches everything.
    pub fn parse(value: &str) -> Self {
        if value == CATEGORY_FILTER_ALL {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(expected) => expected == category,
        }
    }
}

/// Returns `max(existing ids) + 1`, or `1` for an empty collection.
///
/// Non-positive imported ids never drive allocation below `1`. When the
/// maximum is `ArticleId::MAX` the smallest unused positive id is returned,
/// so an allocated id never collides with an existing one.
pub fn next_article_id(articles: &[Article]) -> ArticleId {
    let Some(max) = articles.iter().map(|article| article.id).max() else {
        return 1;
    };
    max.max(0)
        .checked_add(1)
        .unwrap_or_else(|| smallest_unused_id(articles))
}

fn smallest_unused_id(articles: &[Article]) -> ArticleId {
    let used: BTreeSet<ArticleId> = articles
        .iter()
        .map(|article| article.id)
        .filter(|id| *id > 0)
        .collect();

    let mut candidate = 1;
    for id in used {
        if id != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}

/// Derived view of `articles` matching `search` and `category`.
///
/// Search is a case-insensitive substring match over title, author, summary
/// and category; an empty term matches everything. Order is preserved.
pub fn filter_articles<'a>(
    articles: &'a [Article],
    search: &str,
    category: &CategoryFilter,
) -> Vec<&'a Article> {
    let lowered = search.to_lowercase();
    articles
        .iter()
        .filter(|article| lowered.is_empty() || article.matches_term(&lowered))
        .filter(|article| category.matches(&article.category))
        .collect()
}

/// In-memory system of record for one editing session.
pub struct CollectionStore {
    articles: Arc<Vec<Article>>,
    selected: Option<ArticleId>,
    config: DeskConfig,
    today: DateSource,
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new(DeskConfig::default())
    }
}

impl CollectionStore {
    /// Creates an empty store using the local clock for "today".
    pub fn new(config: DeskConfig) -> Self {
        Self::with_date_source(config, today_display_date)
    }

    /// Creates an empty store with a caller-provided "today" formatter.
    pub fn with_date_source<F>(config: DeskConfig, today: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            articles: Arc::new(Vec::new()),
            selected: None,
            config: config.with_fallbacks(),
            today: Box::new(today),
        }
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Shared handle to the current sequence.
    pub fn snapshot(&self) -> Arc<Vec<Article>> {
        Arc::clone(&self.articles)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Looks up the first article carrying `id`.
    pub fn get(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    pub fn next_id(&self) -> ArticleId {
        next_article_id(&self.articles)
    }

    pub fn selected_id(&self) -> Option<ArticleId> {
        self.selected
    }

    /// Resolves the selection against the current snapshot.
    pub fn selected(&self) -> Option<&Article> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Selects `id` when it exists; returns whether the selection changed.
    pub fn select(&mut self, id: ArticleId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Appends a record with catalog defaults and selects it.
    pub fn add(&mut self) -> ArticleId {
        let id = self.next_id();
        let mut article = Article::new(id);
        article.category = self.config.default_category().to_string();
        article.accent_color_class = self.config.default_accent_color().to_string();
        article.border_color_class = self.config.default_border_color().to_string();
        article.date = (self.today)();

        let mut next = self.articles.as_ref().clone();
        next.push(article);
        self.install(next);
        self.selected = Some(id);

        info!("event=article_add module=store status=ok id={id}");
        id
    }

    /// Appends a copy of `id` with a fresh id and a `(Copy)` title suffix.
    ///
    /// Returns the new id, or `None` when `id` is unknown.
    pub fn duplicate(&mut self, id: ArticleId) -> Option<ArticleId> {
        let source = self.get(id)?;
        let new_id = self.next_id();
        let mut copy = source.clone();
        copy.id = new_id;
        copy.title.push_str(COPY_SUFFIX);

        let mut next = self.articles.as_ref().clone();
        next.push(copy);
        self.install(next);
        self.selected = Some(new_id);

        info!("event=article_duplicate module=store status=ok source_id={id} id={new_id}");
        Some(new_id)
    }

    /// Removes `id`; clears the selection if it pointed there.
    pub fn delete(&mut self, id: ArticleId) -> bool {
        let Some(index) = self.position(id) else {
            debug!("event=article_delete module=store status=skipped reason=not_found id={id}");
            return false;
        };

        let mut next = self.articles.as_ref().clone();
        next.remove(index);
        self.install(next);
        if self.selected == Some(id) {
            self.selected = None;
        }

        info!("event=article_delete module=store status=ok id={id}");
        true
    }

    /// Swaps `id` with its neighbor in `direction`.
    ///
    /// No-op at the boundary or when `id` is unknown.
    pub fn move_article(&mut self, id: ArticleId, direction: MoveDirection) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let Some(target) = direction.neighbor(index, self.articles.len()) else {
            return false;
        };

        let mut next = self.articles.as_ref().clone();
        next.swap(index, target);
        self.install(next);

        debug!("event=article_move module=store status=ok id={id} from={index} to={target}");
        true
    }

    /// Replaces `id` with a merged copy.
    ///
    /// No-op when nothing is selected or `id` is unknown.
    pub fn update(&mut self, id: ArticleId, patch: &ArticlePatch) -> bool {
        if self.selected.is_none() {
            debug!("event=article_update module=store status=skipped reason=no_selection id={id}");
            return false;
        }
        self.replace_with(id, |article| article.merged(patch))
    }

    /// Pure derived view; see [`filter_articles`].
    pub fn filter(&self, search: &str, category: &CategoryFilter) -> Vec<&Article> {
        filter_articles(&self.articles, search, category)
    }

    /// Appends an inline image to `id` without touching its content.
    pub fn add_inline_image(&mut self, id: ArticleId, image: InlineImage) -> bool {
        self.replace_with(id, |article| {
            let mut next = article.clone();
            next.inline_images.push(image);
            next
        })
    }

    /// Replaces the inline image at `index` (0-based).
    pub fn update_inline_image(&mut self, id: ArticleId, index: usize, image: InlineImage) -> bool {
        if !self.has_inline_image(id, index) {
            return false;
        }
        self.replace_with(id, |article| {
            let mut next = article.clone();
            next.inline_images[index] = image;
            next
        })
    }

    /// Removes the inline image at `index` (0-based).
    ///
    /// Tokens in the content keep their ordinals and may now dangle.
    pub fn remove_inline_image(&mut self, id: ArticleId, index: usize) -> bool {
        if !self.has_inline_image(id, index) {
            return false;
        }
        self.replace_with(id, |article| {
            let mut next = article.clone();
            next.inline_images.remove(index);
            next
        })
    }

    /// Swaps the inline image at `index` with its neighbor.
    ///
    /// Tokens in the content are not renumbered.
    pub fn move_inline_image(
        &mut self,
        id: ArticleId,
        index: usize,
        direction: MoveDirection,
    ) -> bool {
        let Some(article) = self.get(id) else {
            return false;
        };
        let len = article.inline_images.len();
        if index >= len {
            return false;
        }
        let Some(target) = direction.neighbor(index, len) else {
            return false;
        };
        self.replace_with(id, |article| {
            let mut next = article.clone();
            next.inline_images.swap(index, target);
            next
        })
    }

    /// Inserts `<image-N>` into the content of `id`.
    ///
    /// Uses `caret` (char offset) when the editor has one, otherwise appends.
    /// Returns the caret after the token, or `None` when `id` is unknown.
    pub fn insert_image_token(
        &mut self,
        id: ArticleId,
        ordinal: usize,
        caret: Option<usize>,
    ) -> Option<usize> {
        let inserted = insert_token(&self.get(id)?.content, ordinal, caret);
        let caret = inserted.caret;
        self.replace_with(id, |article| {
            let mut next = article.clone();
            next.content = inserted.content;
            next
        });
        Some(caret)
    }

    /// Replaces the whole collection with normalized articles.
    ///
    /// Selects the first record, or nothing when the result is empty.
    pub fn replace_all(&mut self, articles: Vec<Article>) {
        self.selected = articles.first().map(|article| article.id);
        self.install(articles);
    }

    /// Parses and normalizes `text`, then replaces the collection.
    ///
    /// Returns the imported record count. On error nothing changes.
    pub fn import_json(&mut self, text: &str) -> Result<usize, ImportError> {
        let defaults = NormalizeDefaults::from_config(&self.config, (self.today)());
        let articles = import_articles(text, &defaults).inspect_err(|err| {
            warn!("event=import module=store status=error reason={}", import_reason(err));
        })?;

        let count = articles.len();
        self.replace_all(articles);
        info!("event=import module=store status=ok count={count}");
        Ok(count)
    }

    /// Reads `path` to completion, then imports it like [`Self::import_json`].
    pub fn import_file(&mut self, path: &Path) -> Result<usize, ImportError> {
        let text = read_import_file(path).inspect_err(|err| {
            warn!("event=import module=store status=error reason={}", import_reason(err));
        })?;
        self.import_json(&text)
    }

    /// Export text shared by preview and clipboard output.
    pub fn export_json(&self, strip_markup: bool) -> Result<String, ExportError> {
        to_export_json(&self.articles, strip_markup)
    }

    /// Writes the export text under the configured fixed file name.
    pub fn export_to_dir(&self, dir: &Path, strip_markup: bool) -> Result<PathBuf, ExportError> {
        write_export_file(dir, &self.config.export_file_name, &self.articles, strip_markup)
    }

    fn position(&self, id: ArticleId) -> Option<usize> {
        self.articles.iter().position(|article| article.id == id)
    }

    fn has_inline_image(&self, id: ArticleId, index: usize) -> bool {
        self.get(id)
            .is_some_and(|article| index < article.inline_images.len())
    }

    /// Installs a sequence where only the first record carrying `id` is
    /// replaced by `f(record)`.
    fn replace_with<F>(&mut self, id: ArticleId, f: F) -> bool
    where
        F: FnOnce(&Article) -> Article,
    {
        let Some(index) = self.position(id) else {
            return false;
        };

        let mut next = self.articles.as_ref().clone();
        next[index] = f(&self.articles[index]);
        self.install(next);

        debug!("event=article_update module=store status=ok id={id}");
        true
    }

    fn install(&mut self, next: Vec<Article>) {
        self.articles = Arc::new(next);
    }
}

fn import_reason(err: &ImportError) -> &'static str {
    match err {
        ImportError::Io { .. } => "io",
        ImportError::Parse(_) => "parse",
        ImportError::RootNotArray => "root_not_array",
    }
}

#[cfg(test)]
mod tests {
    use super::{next_article_id, CategoryFilter, MoveDirection};
    use crate::model::article::Article;

    #[test]
    fn next_id_is_max_plus_one() {
        let articles: Vec<Article> = [1, 2, 4].into_iter().map(Article::new).collect();
        assert_eq!(next_article_id(&articles), 5);
        assert_eq!(next_article_id(&[]), 1);
    }

    #[test]
    fn next_id_stays_positive_after_negative_imports() {
        assert_eq!(next_article_id(&[Article::new(-3)]), 1);
    }

    #[test]
    fn next_id_reuses_smallest_gap_when_max_is_exhausted() {
        let articles: Vec<Article> = [i64::MAX, 1, 2, 4, -7]
            .into_iter()
            .map(Article::new)
            .collect();
        assert_eq!(next_article_id(&articles), 3);
        assert_eq!(next_article_id(&[Article::new(i64::MAX)]), 1);
    }

    #[test]
    fn steps_map_to_directions() {
        assert_eq!(MoveDirection::from_step(-1), Some(MoveDirection::Up));
        assert_eq!(MoveDirection::from_step(1), Some(MoveDirection::Down));
        assert_eq!(MoveDirection::from_step(2), None);
    }

    #[test]
    fn neighbor_respects_bounds() {
        assert_eq!(MoveDirection::Up.neighbor(0, 3), None);
        assert_eq!(MoveDirection::Down.neighbor(2, 3), None);
        assert_eq!(MoveDirection::Down.neighbor(1, 3), Some(2));
    }

    #[test]
    fn all_sentinel_parses() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("All"),
            CategoryFilter::Category("All".to_string())
        );
    }
}
