//! Import/export boundary between the collection and its JSON form.
//!
//! # Responsibility
//! - Normalize untrusted import payloads into articles.
//! - Project and serialize the collection for preview, clipboard and files.
//!
//! # Invariants
//! - Import either yields a full replacement collection or an error.
//! - Export is a pure projection of the current snapshot.

pub mod export;
pub mod import;
pub mod normalize;
