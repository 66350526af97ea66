use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can go wrong while loading or querying the article collection.
///
/// `Load`, `Parse` and `DuplicateSlug` abort a whole load cycle. `NotFound` is
/// local to a single lookup and leaves the loaded collection usable.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("unable to read content source {path:?}: {source}")]
    Load {
        path: PathBuf,
        source: io::Error,
    },

    #[error("invalid article '{slug}' ({path:?}): {reason}")]
    Parse {
        slug: String,
        path: PathBuf,
        reason: String,
    },

    #[error("duplicate slug '{slug}' in {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("article '{slug}' not found")]
    NotFound { slug: String },
}

pub type Result<T> = std::result::Result<T, ContentError>;

impl ContentError {
    pub fn load(path: &Path, source: io::Error) -> Self {
        ContentError::Load {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(slug: &str, path: &Path, reason: impl Into<String>) -> Self {
        ContentError::Parse {
            slug: slug.to_string(),
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn not_found(slug: &str) -> Self {
        ContentError::NotFound { slug: slug.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
