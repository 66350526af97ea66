use serde::Serialize;

use crate::article_collection::ArticleCollection;
use crate::category_index::CategoryIndex;
use crate::content::Article;
use crate::filter::{filter_by_category, intersect, search, CategorySelection};
use crate::paginator::Paginator;
use crate::query_string::ListingQuery;
use crate::text_utils::format_date_time;
use crate::view::article_link;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub link: String,
}

impl From<&Article> for ListItem {
    fn from(article: &Article) -> Self {
        let (date, _time) = format_date_time(article.published_date());
        ListItem {
            slug: article.slug().to_string(),
            title: article.title().to_string(),
            description: article.metadata.description.clone(),
            category: article.category().to_string(),
            date,
            link: article_link(article.slug()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    pub items: Vec<ListItem>,
    /// Matching articles across all pages
    pub total: usize,
    pub page: u32,
    pub page_count: u32,
    pub search: String,
    pub category: String,
    /// Filter controls, always computed over the whole collection
    pub categories: CategoryIndex,
}

/// Runs the search and the category filter independently over the whole
/// collection and keeps the articles both of them matched.
pub fn narrow<'a>(collection: &'a ArticleCollection, query: &str, category: &CategorySelection) -> Vec<&'a Article> {
    let by_text = search(collection, query);
    let by_category = filter_by_category(collection, category);
    intersect(&by_text, &by_category)
}

pub struct ListRenderer {
    pub page_size: u32,
}

impl ListRenderer {
    pub fn new(page_size: u32) -> ListRenderer {
        ListRenderer { page_size }
    }

    pub fn render(&self, collection: &ArticleCollection, query: &ListingQuery) -> ListPage {
        let matching = narrow(collection, &query.search, &query.category);

        let paginator = Paginator::from(&matching, self.page_size);
        let (page, articles) = paginator.page_or_first(query.page);

        ListPage {
            items: articles.iter().map(|article| ListItem::from(*article)).collect(),
            total: matching.len(),
            page,
            page_count: paginator.page_count(),
            search: query.search.clone(),
            category: query.category.as_param().to_string(),
            categories: collection.categories(),
        }
    }
}
