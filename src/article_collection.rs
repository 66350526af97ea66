use std::collections::HashMap;
use std::slice;

use spdlog::{debug, info};

use crate::category_index::CategoryIndex;
use crate::content::content_file::ContentFile;
use crate::content::Article;
use crate::content_list::ContentSource;
use crate::error::{ContentError, Result};
use crate::navigation::{navigation_for, publication_order, Navigation};

/// Every article of a content source, newest first.
///
/// Built in one go and never modified afterwards. A changed content directory
/// means loading a new collection.
#[derive(Debug, Default)]
pub struct ArticleCollection {
    articles: Vec<Article>,
    slug_to_index: HashMap<String, usize>,
}

impl ArticleCollection {
    /// Reads and parses every unit of `source`.
    ///
    /// The first unreadable unit, malformed unit or duplicated slug aborts the
    /// whole load, there is no partial collection.
    pub fn load(source: &ContentSource) -> Result<ArticleCollection> {
        info!("Loading articles from {}", source.root_dir.display());

        let mut articles = vec![];
        for unit in source.list_units()? {
            debug!("Parsing article {} from {}", unit.slug, unit.path.display());
            let content_file = ContentFile::from_file(unit.slug, unit.path)?;
            articles.push(Article::parse(&content_file)?);
        }

        let collection = Self::from_articles(articles)?;
        info!("Loaded {} articles in {} categories", collection.len(), collection.categories().len());
        Ok(collection)
    }

    pub fn from_articles(mut articles: Vec<Article>) -> Result<ArticleCollection> {
        articles.sort_by(publication_order);

        let mut slug_to_index: HashMap<String, usize> = HashMap::with_capacity(articles.len());
        for (idx, article) in articles.iter().enumerate() {
            if let Some(&first) = slug_to_index.get(article.slug()) {
                return Err(ContentError::DuplicateSlug {
                    slug: article.slug().to_string(),
                    first: articles[first].file_name.clone(),
                    second: article.file_name.clone(),
                });
            }
            slug_to_index.insert(article.slug().to_string(), idx);
        }

        Ok(ArticleCollection {
            articles,
            slug_to_index,
        })
    }

    pub fn get(&self, slug: &str) -> Result<&Article> {
        self.slug_to_index.get(slug)
            .map(|&idx| &self.articles[idx])
            .ok_or_else(|| ContentError::not_found(slug))
    }

    pub fn navigation(&self, slug: &str) -> Result<Navigation> {
        navigation_for(&self.articles, slug)
    }

    pub fn categories(&self) -> CategoryIndex {
        CategoryIndex::from_articles(&self.articles)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.articles.iter().map(|article| article.slug()).collect()
    }

    pub fn iter(&self) -> slice::Iter<'_, Article> {
        self.articles.iter()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl<'a> IntoIterator for &'a ArticleCollection {
    type Item = &'a Article;
    type IntoIter = slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.iter()
    }
}

/// Single article lookup for per-article rendering.
///
/// Goes through a full load so that a slug is only ever served from a
/// consistent, duplicate-free collection.
pub fn load_article(source: &ContentSource, slug: &str) -> Result<Article> {
    let collection = ArticleCollection::load(source)?;
    collection.get(slug).cloned()
}
