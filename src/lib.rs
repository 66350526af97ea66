pub mod article_collection;
pub mod category_index;
pub mod config;
pub mod content;
pub mod content_list;
pub mod error;
pub mod filter;
pub mod logger;
pub mod navigation;
pub mod paginator;
pub mod query_string;
pub mod server;
pub mod text_utils;
pub mod view;
mod test_data;

pub use article_collection::{load_article, ArticleCollection};
pub use category_index::{CategoryCount, CategoryIndex};
pub use content::{Article, ArticleMetadata};
pub use content_list::ContentSource;
pub use error::{ContentError, Result};
pub use filter::{filter_by_category, search, CategorySelection};
pub use navigation::{navigation_for, Navigation, NavigationLink};
