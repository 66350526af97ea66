use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ContentError, Result};

const CONTENT_EXTENSIONS: [&str; 3] = ["md", "mdx", "markdown"];

/// One content unit as read from disk, before any parsing.
pub struct ContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(slug: String, file_path: PathBuf) -> Result<ContentFile> {
        let raw_content = fs::read_to_string(&file_path)
            .map_err(|e| ContentError::load(&file_path, e))?;

        Ok(ContentFile {
            slug,
            file_path,
            raw_content,
        })
    }

    pub fn from_string(slug: &str, file_path: &Path, raw_content: &str) -> ContentFile {
        ContentFile {
            slug: slug.to_string(),
            file_path: file_path.to_path_buf(),
            raw_content: raw_content.to_string(),
        }
    }

    pub fn is_content_file(file_name: &Path) -> bool {
        match file_name.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => CONTENT_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}
