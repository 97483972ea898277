//! Core domain logic for Pressroom.
//! This crate is the single source of truth for article collection invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod store;
pub mod transfer;

pub use config::{default_log_level, ConfigError, DeskConfig, LoggingConfig};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::article::{Article, ArticleId, ArticlePatch, InlineImage};
pub use model::date::{format_display_date, today_display_date};
pub use model::shape::{check_article_shape, is_valid_article_shape, ShapeError};
pub use model::token::{
    dangling_ordinals, find_tokens, image_token, insert_token, renumber_tokens, TokenInsertion,
    TokenRef,
};
pub use store::collection::{
    filter_articles, next_article_id, CategoryFilter, CollectionStore, MoveDirection,
};
pub use transfer::export::{project, strip_markup, to_export_json, write_export_file, ExportError};
pub use transfer::import::{import_articles, parse_import, read_import_file, ImportError};
pub use transfer::normalize::{normalize, NormalizeDefaults};
