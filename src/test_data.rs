#[cfg(test)]
pub const FRONTMATTER_POST: &str = r#"---
title: "Writing Systems"
description: How scripts shape the way we think
category: tech
publishedDate: "2023-06-01"
keywords:
  - language
  - scripts
---

Some people write left to right, some right to left.

<Callout>Both are fine.</Callout>
"#;

#[cfg(test)]
pub const TEXTED_POST: &str = "<!--
[ID]: # (a63bd715-a3fe-4788-b0e1-2a3153778544)
[DATE]: # (2022-04-02 12:05:00.000)
[AUTHOR]: # (thiago)
[CATEGORY]: # (life)
-->

# What I learned after 20+ years of software development
How to be a great software engineer?

Someone asked me this question today and I didn't have an answer.

<!-- more -->

## Non technical
";

/// Builds a frontmatter content unit with the fields the indexer cares about.
#[cfg(test)]
pub fn article_source(title: &str, description: &str, category: &str, date: &str) -> String {
    format!("---\ntitle: {}\ndescription: {}\ncategory: {}\npublishedDate: {}\n---\n\nBody of {}\n",
            title, description, category, date, title)
}

/// In-memory article, skipping the parser.
#[cfg(test)]
pub fn article(slug: &str, title: &str, category: &str, date: &str) -> crate::content::Article {
    use crate::content::{Article, ArticleMetadata};

    Article {
        metadata: ArticleMetadata {
            slug: slug.to_string(),
            title: title.to_string(),
            description: format!("About {}", title),
            category: category.to_string(),
            published_date: crate::text_utils::parse_date_time(date).unwrap(),
        },
        body: String::new(),
        file_name: std::path::PathBuf::from(format!("content/{}.md", slug)),
    }
}
