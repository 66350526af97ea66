pub mod article_view;
pub mod list_view;

/// URL under which an article is served.
pub fn article_link(slug: &str) -> String {
    format!("/articles/{}", slug)
}
