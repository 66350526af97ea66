use serde::Serialize;

use crate::article_collection::ArticleCollection;
use crate::content::Article;
use crate::error::Result;
use crate::navigation::{NavigationLink, Navigation};
use crate::text_utils::format_date_time;

/// Everything the article page needs: the article itself and where to go next.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView<'a> {
    pub article: &'a Article,
    pub date: String,
    pub time: String,
    pub previous: Option<NavigationLink>,
    pub next: Option<NavigationLink>,
}

pub struct ArticleRenderer;

impl ArticleRenderer {
    pub fn render<'a>(collection: &'a ArticleCollection, slug: &str) -> Result<ArticleView<'a>> {
        let article = collection.get(slug)?;
        let Navigation { previous, next } = collection.navigation(slug)?;
        let (date, time) = format_date_time(article.published_date());

        Ok(ArticleView {
            article,
            date,
            time,
            previous,
            next,
        })
    }
}
