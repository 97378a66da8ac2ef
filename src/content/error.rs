//! Content loading errors
//!
//! Content is author-controlled, so every one of these aborts the build and
//! names the file to fix.

use std::path::PathBuf;
use thiserror::Error;

use super::{Category, FrontMatterError};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("malformed front-matter in {}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("{}: missing required field `{field}`", .path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{}: invalid slug {slug:?}, expected lowercase words joined by hyphens", .path.display())]
    InvalidSlug { path: PathBuf, slug: String },

    #[error("duplicate {category} slug {slug:?}: {} and {}", .first.display(), .second.display())]
    DuplicateSlug {
        category: Category,
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, ContentError>;
