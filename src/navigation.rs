use std::cmp::Ordering;

use serde::Serialize;

use crate::content::Article;
use crate::error::{ContentError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationLink {
    pub slug: String,
    pub title: String,
}

impl From<&Article> for NavigationLink {
    fn from(article: &Article) -> Self {
        NavigationLink {
            slug: article.slug().to_string(),
            title: article.title().to_string(),
        }
    }
}

/// Neighbours of an article in reading order.
/// `previous` is the newer article, `next` the older one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub previous: Option<NavigationLink>,
    pub next: Option<NavigationLink>,
}

/// Newest first. Articles published at the same instant are ordered by slug.
pub fn publication_order(a: &Article, b: &Article) -> Ordering {
    b.published_date()
        .cmp(a.published_date())
        .then_with(|| a.slug().cmp(b.slug()))
}

/// Resolves previous/next for `slug`.
///
/// The order is rebuilt from the publication key on every call, so the result
/// does not depend on the order the articles are handed in.
pub fn navigation_for<'a, I>(articles: I, slug: &str) -> Result<Navigation>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut ordered: Vec<&Article> = articles.into_iter().collect();
    ordered.sort_by(|a, b| publication_order(a, b));

    let index = ordered.iter()
        .position(|article| article.slug() == slug)
        .ok_or_else(|| ContentError::not_found(slug))?;

    let previous = index.checked_sub(1)
        .and_then(|i| ordered.get(i))
        .map(|article| NavigationLink::from(*article));
    let next = ordered.get(index + 1)
        .map(|article| NavigationLink::from(*article));

    Ok(Navigation { previous, next })
}
