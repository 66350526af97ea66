use std::collections::HashMap;

use serde::Serialize;

use crate::content::Article;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Distinct categories with the number of articles in each.
///
/// Categories are compared exactly (`Tech` and `tech` are two entries) and kept
/// in the order they first appear in the articles given to [`CategoryIndex::from_articles`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryIndex {
    entries: Vec<CategoryCount>,
}

impl CategoryIndex {
    pub fn from_articles<'a, I>(articles: I) -> Self
    where
        I: IntoIterator<Item = &'a Article>,
    {
        let mut entries: Vec<CategoryCount> = vec![];
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for article in articles {
            let category = article.category();
            match positions.get(category) {
                Some(&pos) => entries[pos].count += 1,
                None => {
                    positions.insert(category, entries.len());
                    entries.push(CategoryCount {
                        category: category.to_string(),
                        count: 1,
                    });
                }
            }
        }

        CategoryIndex { entries }
    }

    pub fn entries(&self) -> &[CategoryCount] {
        &self.entries
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.category.as_str())
    }

    pub fn count(&self, category: &str) -> usize {
        self.entries.iter()
            .find(|entry| entry.category == category)
            .map_or(0, |entry| entry.count)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|entry| entry.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
