//! Collection state owned by one editing session.
//!
//! # Responsibility
//! - Hold the article sequence, selection and id allocation.
//! - Keep presentation layers decoupled from transfer details.

pub mod collection;
