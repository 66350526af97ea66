use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::content::content_file::ContentFile;
use crate::error::{ContentError, Result};

pub const DEFAULT_INDEX_BASE_NAME: &str = "index";

/// A content unit found on disk and the slug it will be published under.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLink {
    pub slug: String,
    pub path: PathBuf,
}

/// A directory of articles.
///
/// Two layouts are recognised side by side:
/// - `content/hello-world.md` publishes `hello-world`
/// - `content/hello-world/index.md` publishes `hello-world`, so images can live next to the article
pub struct ContentSource {
    pub root_dir: PathBuf,
    pub index_base_name: String,
}

impl ContentSource {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        ContentSource {
            root_dir: root_dir.into(),
            index_base_name: DEFAULT_INDEX_BASE_NAME.to_string(),
        }
    }

    pub fn with_index_base_name(mut self, index_base_name: &str) -> Self {
        self.index_base_name = index_base_name.to_string();
        self
    }

    /// Every content unit, sorted by slug.
    pub fn list_units(&self) -> Result<Vec<ContentLink>> {
        let mut units = vec![];

        for (dir, index_file) in self.retrieve_dirs()? {
            if let Some(slug) = file_name_str(&dir) {
                units.push(ContentLink { slug, path: index_file });
            }
        }

        for file in self.retrieve_files()? {
            let slug = file.file_stem()
                .and_then(|stem| stem.to_str())
                .map(|stem| stem.to_string());
            if let Some(slug) = slug {
                units.push(ContentLink { slug, path: file });
            }
        }

        units.sort_by(|a, b| a.slug.cmp(&b.slug).then_with(|| a.path.cmp(&b.path)));
        Ok(units)
    }

    pub fn retrieve_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = vec![];
        for path in Self::list_entries(&self.root_dir)? {
            if path.is_file() && ContentFile::is_content_file(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }

    pub fn retrieve_dirs(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let mut post_dirs = vec![];
        for path in Self::list_entries(&self.root_dir)? {
            if !path.is_dir() {
                continue;
            }
            // Directories without an index file are asset folders, not articles
            if let Some(index_file) = self.find_index_file(&path)? {
                post_dirs.push((path, index_file));
            }
        }
        Ok(post_dirs)
    }

    fn find_index_file(&self, dir: &Path) -> Result<Option<PathBuf>> {
        for path in Self::list_entries(dir)? {
            let stem = path.file_stem().and_then(|stem| stem.to_str());
            if path.is_file() && stem == Some(self.index_base_name.as_str()) && ContentFile::is_content_file(&path) {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    /// Non-hidden entries of `dir`, sorted by path.
    /// A name that is not valid UTF-8 cannot become a slug and fails the listing.
    fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| ContentError::load(dir, e))?;

        let mut paths = vec![];
        for entry in entries {
            let entry = entry.map_err(|e| ContentError::load(dir, e))?;
            let path = entry.path();
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                let err = io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8");
                return Err(ContentError::load(&path, err));
            };
            if !name.starts_with('.') {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

fn file_name_str(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_list_units() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("zeta.md"), "z").unwrap();
        fs::write(root.join("alpha.mdx"), "a").unwrap();
        fs::write(root.join("notes.txt"), "ignored").unwrap();
        fs::write(root.join(".draft.md"), "hidden").unwrap();
        fs::create_dir(root.join("with-images")).unwrap();
        fs::write(root.join("with-images").join("index.md"), "w").unwrap();
        fs::write(root.join("with-images").join("cover.png"), "png").unwrap();
        fs::create_dir(root.join("assets")).unwrap();
        fs::write(root.join("assets").join("logo.svg"), "svg").unwrap();

        let units = ContentSource::new(root).list_units().unwrap();
        let slugs: Vec<&str> = units.iter().map(|u| u.slug.as_str()).collect();
        assert_eq!(slugs, ["alpha", "with-images", "zeta"]);
        assert_eq!(units[1].path, root.join("with-images").join("index.md"));
    }

    #[test]
    fn test_custom_index_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("post")).unwrap();
        fs::write(root.join("post").join("index.md"), "i").unwrap();
        fs::create_dir(root.join("other")).unwrap();
        fs::write(root.join("other").join("article.md"), "a").unwrap();

        let source = ContentSource::new(root).with_index_base_name("article");
        let units = source.list_units().unwrap();
        assert_eq!(units, vec![ContentLink { slug: "other".to_string(), path: root.join("other").join("article.md") }]);
    }

    #[test]
    fn test_upper_case_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("SHOUT.MD"), "s").unwrap();
        fs::create_dir(root.join("gallery")).unwrap();
        fs::write(root.join("gallery").join("index.Mdx"), "g").unwrap();

        let units = ContentSource::new(root).list_units().unwrap();
        let slugs: Vec<&str> = units.iter().map(|u| u.slug.as_str()).collect();
        assert_eq!(slugs, ["SHOUT", "gallery"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_undecodable_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join(OsStr::from_bytes(b"caf\xe9.md"));
        if fs::write(&bad, "x").is_err() {
            // Some filesystems refuse names that are not UTF-8
            return;
        }

        let err = ContentSource::new(dir.path()).list_units().unwrap_err();
        assert!(matches!(err, ContentError::Load { ref path, .. } if path == &bad));
    }

    #[test]
    fn test_unreadable_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = ContentSource::new(&missing).list_units().unwrap_err();
        assert!(matches!(err, ContentError::Load { ref path, .. } if path == &missing));
    }
}
