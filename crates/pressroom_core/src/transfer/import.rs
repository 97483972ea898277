//! Import boundary: read, parse and root-check serialized collections.
//!
//! # Responsibility
//! - Reject text that is not JSON or whose root is not an array.
//! - Hand accepted elements to the normalizer.
//!
//! # Invariants
//! - File contents are read to completion before parsing starts.
//! - Failures carry one user-facing message and never a partial result.

use crate::model::article::Article;
use crate::transfer::normalize::{normalize, NormalizeDefaults};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Import failure surfaced to the user; the collection stays unchanged.
#[derive(Debug)]
pub enum ImportError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    RootNotArray,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not read `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "import failed: file is not valid JSON ({err})"),
            Self::RootNotArray => write!(f, "import failed: expected a list of articles"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::RootNotArray => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Parses `text` and returns the root array elements.
pub fn parse_import(text: &str) -> Result<Vec<Value>, ImportError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(items),
        _ => Err(ImportError::RootNotArray),
    }
}

/// Parses and normalizes `text` in one step.
pub fn import_articles(
    text: &str,
    defaults: &NormalizeDefaults,
) -> Result<Vec<Article>, ImportError> {
    let raw = parse_import(text)?;
    Ok(normalize(&raw, defaults))
}

/// Reads a whole file as UTF-8 text for import.
pub fn read_import_file(path: &Path) -> Result<String, ImportError> {
    std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
