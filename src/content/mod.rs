use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::content::content_file::ContentFile;
use crate::content::parsing_utils::{collect_body, parse_frontmatter, parse_texted_header, take_heading_title, HeaderStyle, RawHeader};
use crate::error::{ContentError, Result};
use crate::text_utils::parse_date_time;

pub mod content_file;
pub mod parsing_utils;

/// Category given to articles whose metadata has none.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub published_date: NaiveDateTime,
}

/// A parsed article. The body is kept exactly as written, it is never rendered here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub metadata: ArticleMetadata,
    pub body: String,
    #[serde(skip)]
    pub file_name: PathBuf,
}

impl Article {
    pub fn parse(content_file: &ContentFile) -> Result<Article> {
        let fail = |reason: String| ContentError::parse(&content_file.slug, &content_file.file_path, reason);

        let raw = content_file.raw_content.as_str();
        let (header, body) = match HeaderStyle::detect(raw) {
            HeaderStyle::Frontmatter => {
                let (header, rest) = parse_frontmatter(raw).map_err(fail)?;
                let mut lines = rest.lines();
                let first = lines.next();
                (header, collect_body(first, lines))
            }
            HeaderStyle::Texted => {
                let (mut header, lines, maybe_line) = parse_texted_header(raw.lines()).map_err(fail)?;
                if header.title.is_some() {
                    (header, collect_body(maybe_line, lines))
                } else {
                    let (title, lines, maybe_line) = take_heading_title(lines, maybe_line);
                    header.title = title;
                    (header, collect_body(maybe_line, lines))
                }
            }
        };

        let metadata = Self::validate(&content_file.slug, header).map_err(fail)?;

        Ok(Article {
            metadata,
            body,
            file_name: content_file.file_path.clone(),
        })
    }

    fn validate(slug: &str, header: RawHeader) -> std::result::Result<ArticleMetadata, String> {
        let title = header.title.ok_or_else(|| "missing title".to_string())?;
        let date = header.published_date.ok_or_else(|| "missing publishedDate".to_string())?;
        let published_date = parse_date_time(&date)?;

        Ok(ArticleMetadata {
            slug: slug.to_string(),
            title,
            description: header.description.unwrap_or_default(),
            category: header.category.unwrap_or_else(|| UNCATEGORIZED.to_string()),
            published_date,
        })
    }

    pub fn slug(&self) -> &str {
        &self.metadata.slug
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn category(&self) -> &str {
        &self.metadata.category
    }

    pub fn published_date(&self) -> &NaiveDateTime {
        &self.metadata.published_date
    }
}
