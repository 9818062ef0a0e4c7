use serde::{Deserialize, Serialize};

/// A named link: either curated (absolute URL) or derived from a cached site
/// (root-relative path).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub title: String,
}

impl Link {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Link {
        Link {
            url: url.into(),
            title: title.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub path: String,
    /// Empty for catalog hits.
    pub snippet: String,
}

impl SearchResult {
    pub fn from_link(link: &Link) -> SearchResult {
        SearchResult {
            title: link.title.clone(),
            path: link.url.clone(),
            snippet: String::new(),
        }
    }
}
