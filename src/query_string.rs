use std::collections::HashMap;

use crate::filter::CategorySelection;

/// What a listing request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub search: String,
    pub category: CategorySelection,
    pub page: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        ListingQuery {
            search: String::new(),
            category: CategorySelection::All,
            page: 1,
        }
    }
}

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get_page(&self) -> u32 {
        match self.items.get("page").and_then(|val| val.trim().parse::<u32>().ok()) {
            Some(page) if page > 0 => page,
            _ => 1,
        }
    }

    pub fn get_search(&self) -> String {
        self.items.get("q").cloned().unwrap_or_default()
    }

    pub fn get_category(&self) -> CategorySelection {
        CategorySelection::from_param(self.items.get("category").map(|c| c.as_str()))
    }

    pub fn to_listing_query(&self) -> ListingQuery {
        ListingQuery {
            search: self.get_search(),
            category: self.get_category(),
            page: self.get_page(),
        }
    }
}
