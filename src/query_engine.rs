use crate::analyzer::TextExtractor;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::data_models::SearchResult;
use crate::error::{CatalogError, SearchError};
use crate::scanner::TreeScanner;
use crate::snippet::SnippetBuilder;

/// Answers one query against the catalog and the document tree.
///
/// Holds no mutable state, so a single instance can serve concurrent requests
/// behind an `Arc`.
pub struct QueryEngine {
    catalog: Catalog,
    scanner: TreeScanner,
}

impl QueryEngine {
    pub fn new(catalog: Catalog, scanner: TreeScanner) -> Self {
        Self { catalog, scanner }
    }

    /// Loads the catalog files and sets up the scanner from configuration.
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let catalog = Catalog::load(&config.links_file, &config.sites_file)?;
        let scanner = TreeScanner::new(&config.sites_dir)
            .with_cap(config.result_cap)
            .with_extractor(TextExtractor::new(config.skip_scripts))
            .with_snippet_builder(SnippetBuilder::new(config.search_context));
        Ok(Self::new(catalog, scanner))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scanner(&self) -> &TreeScanner {
        &self.scanner
    }

    /// Catalog hits first, then document hits. Matching is case-insensitive.
    ///
    /// Catalog hits are never dropped, but they count toward the scanner's cap,
    /// so document hits stop once the combined count passes it.
    pub fn query(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let mut results = self.catalog.matches(&query);
        let catalog_hits = results.len();
        results.extend(self.scanner.scan_after(&query, catalog_hits)?);

        log::info!(
            "query {:?}: {} catalog hits, {} document hits",
            query,
            catalog_hits,
            results.len() - catalog_hits
        );
        Ok(results)
    }
}
