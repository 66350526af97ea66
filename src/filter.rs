use std::collections::HashSet;

use crate::content::Article;

/// Keyword a listing request uses to ask for every category.
pub const ALL_CATEGORIES: &str = "all";

/// Articles whose title or description contains `query`, ignoring case.
///
/// A blank query keeps everything. Order is preserved.
pub fn search<'a, I>(articles: I, query: &str) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return articles.into_iter().collect();
    }

    articles.into_iter()
        .filter(|article| {
            article.metadata.title.to_lowercase().contains(&query)
                || article.metadata.description.to_lowercase().contains(&query)
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategorySelection {
    #[default]
    All,
    Only(String),
}

impl CategorySelection {
    /// Unset, blank and `"all"` select everything. Any other value is kept as written.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => CategorySelection::All,
            Some(category) if matches!(category.trim(), "" | ALL_CATEGORIES) => CategorySelection::All,
            Some(category) => CategorySelection::Only(category.to_string()),
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Only(category) => article.category() == category,
        }
    }

    pub fn as_param(&self) -> &str {
        match self {
            CategorySelection::All => ALL_CATEGORIES,
            CategorySelection::Only(category) => category,
        }
    }
}

/// Articles in the selected category (exact match). Order is preserved.
pub fn filter_by_category<'a, I>(articles: I, selection: &CategorySelection) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    articles.into_iter()
        .filter(|article| selection.matches(article))
        .collect()
}

/// Articles of `left` whose slug is also in `right`, in `left` order.
pub fn intersect<'a>(left: &[&'a Article], right: &[&'a Article]) -> Vec<&'a Article> {
    let slugs: HashSet<&str> = right.iter().map(|article| article.slug()).collect();
    left.iter()
        .copied()
        .filter(|article| slugs.contains(article.slug()))
        .collect()
}
