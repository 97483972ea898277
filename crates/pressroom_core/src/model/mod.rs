//! Article domain model.
//!
//! # Responsibility
//! - Define the article record, its strict shape check and body tokens.
//! - Keep formatting helpers shared by the store and the normalizer.
//!
//! # Invariants
//! - Every article is identified by an `ArticleId`, looked up against the
//!   current collection snapshot rather than held by reference.
//! - Body tokens are weak positional references with no enforced integrity.

pub mod article;
pub mod date;
pub mod shape;
pub mod token;
