use std::fs;
use std::path::Path;

use crate::data_models::{Link, SearchResult};
use crate::error::CatalogError;

const SCHEME_DELIMITER: &str = "://";

/// Named links searchable by title or URL. Built once at startup, never mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    links: Vec<Link>,
}

impl Catalog {
    /// Curated links first, then one derived entry per well-formed site line.
    pub fn new<'a>(curated: Vec<Link>, site_lines: impl IntoIterator<Item = &'a str>) -> Catalog {
        let mut links = curated;
        for line in site_lines {
            match parse_site_line(line) {
                Some(link) => links.push(link),
                None => log::debug!("skipping malformed site line: {line:?}"),
            }
        }
        Catalog { links }
    }

    /// Loads the curated links (a JSON array of `{url, title}`) and the
    /// newline-delimited list of cached sites.
    pub fn load(links_file: &Path, sites_file: &Path) -> Result<Catalog, CatalogError> {
        let raw_links = fs::read(links_file).map_err(|source| CatalogError::Io {
            path: links_file.to_path_buf(),
            source,
        })?;
        let curated: Vec<Link> =
            serde_json::from_slice(&raw_links).map_err(|source| CatalogError::Json {
                path: links_file.to_path_buf(),
                source,
            })?;

        let sites = fs::read_to_string(sites_file).map_err(|source| CatalogError::Io {
            path: sites_file.to_path_buf(),
            source,
        })?;

        let curated_count = curated.len();
        let catalog = Catalog::new(curated, sites.lines());
        log::info!(
            "Loaded catalog: {} curated links, {} cached sites",
            curated_count,
            catalog.len() - curated_count
        );
        Ok(catalog)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Every entry whose title or URL contains `query`, in catalog order.
    /// `query` must already be lower-cased.
    pub fn matches(&self, query: &str) -> Vec<SearchResult> {
        self.links
            .iter()
            .filter(|link| {
                link.title.to_lowercase().contains(query) || link.url.to_lowercase().contains(query)
            })
            .map(SearchResult::from_link)
            .collect()
    }
}

/// `https://example.com/docs` becomes `{url: "/example.com/docs", title: "example.com/docs"}`.
/// Lines are lower-cased first. Anything without exactly one `://` is rejected.
pub fn parse_site_line(line: &str) -> Option<Link> {
    let line = line.to_lowercase();
    let mut parts = line.split(SCHEME_DELIMITER);
    let (_scheme, rest) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(Link::new(format!("/{rest}"), rest))
}
