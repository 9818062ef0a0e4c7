use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::analyzer::{HtmlDocument, TextExtractor, find_title};
use crate::data_models::SearchResult;
use crate::error::SearchError;
use crate::snippet::SnippetBuilder;

pub const DEFAULT_RESULT_CAP: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotHtml,
    Unreadable,
    Unparseable,
}

/// What happened to a single walk entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Match(SearchResult),
    NoMatch,
    Skipped(SkipReason),
}

pub fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Walks a document root and greps the text content of every HTML file in it.
///
/// Every call rescans the tree; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct TreeScanner {
    root: PathBuf,
    cap: usize,
    extractor: TextExtractor,
    snippets: SnippetBuilder,
}

impl TreeScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cap: DEFAULT_RESULT_CAP,
            extractor: TextExtractor::default(),
            snippets: SnippetBuilder::default(),
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_extractor(mut self, extractor: TextExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_snippet_builder(mut self, snippets: SnippetBuilder) -> Self {
        self.snippets = snippets;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the matching files in walk order (file names sorted within each
    /// directory).
    ///
    /// Only a root that cannot be opened is an error. Unreadable entries, files
    /// that fail to read and files that fail to parse are skipped.
    pub fn scan(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        self.scan_after(query, 0)
    }

    /// Like [`TreeScanner::scan`], with `prior_hits` results already collected
    /// elsewhere counting toward the cap.
    ///
    /// The cap is checked before each entry and the walk stops once
    /// `prior_hits` plus the file hits is *above* it, so the combined count
    /// reaches at most `cap + 1`. With `prior_hits > cap` no file is read.
    pub fn scan_after(
        &self,
        query: &str,
        prior_hits: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.check_root()?;

        let mut results = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            if prior_hits + results.len() > self.cap {
                log::debug!("result cap of {} reached, stopping walk", self.cap);
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::trace!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            match self.process_file(entry.path(), query) {
                FileOutcome::Match(result) => results.push(result),
                FileOutcome::NoMatch => {}
                FileOutcome::Skipped(reason) => {
                    log::trace!("skipped {}: {reason:?}", entry.path().display());
                }
            }
        }

        Ok(results)
    }

    fn check_root(&self) -> Result<(), SearchError> {
        let walk_start = |source| SearchError::WalkStart {
            root: self.root.clone(),
            source,
        };
        let metadata = fs::metadata(&self.root).map_err(walk_start)?;
        if !metadata.is_dir() {
            return Err(walk_start(io::Error::new(
                io::ErrorKind::NotADirectory,
                "not a directory",
            )));
        }
        Ok(())
    }

    /// Runs one file through extraction and matching. `query` must be lower-cased.
    pub fn process_file(&self, path: &Path, query: &str) -> FileOutcome {
        if !is_html_file(path) {
            return FileOutcome::Skipped(SkipReason::NotHtml);
        }

        let Ok(raw) = fs::read(path) else {
            return FileOutcome::Skipped(SkipReason::Unreadable);
        };
        let Ok(document) = HtmlDocument::parse(&raw) else {
            return FileOutcome::Skipped(SkipReason::Unparseable);
        };

        let text = self.extractor.extract(document.root()).to_lowercase();
        let Some(snippet) = self.snippets.build(&text, query) else {
            return FileOutcome::NoMatch;
        };

        let rel_path = self.relative_path(path);
        let title = find_title(document.root()).unwrap_or_else(|| rel_path.clone());
        FileOutcome::Match(SearchResult {
            title,
            path: rel_path,
            snippet,
        })
    }

    /// `<root>/blog/post.html` -> `/blog/post.html`
    pub fn relative_path(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let mut out = String::new();
        for component in rel.components() {
            if let Component::Normal(part) = component {
                out.push('/');
                out.push_str(&part.to_string_lossy());
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_html_file() {
        assert!(is_html_file(Path::new("a/index.html")));
        assert!(is_html_file(Path::new("a/INDEX.HTM")));
        assert!(is_html_file(Path::new("page.Html")));
        assert!(!is_html_file(Path::new("data.txt")));
        assert!(!is_html_file(Path::new("html")));
        assert!(!is_html_file(Path::new("archive.html.gz")));
    }

    #[test]
    fn test_relative_path() {
        let scanner = TreeScanner::new("./config/root");
        assert_eq!(
            scanner.relative_path(Path::new("./config/root/about.html")),
            "/about.html"
        );
        assert_eq!(
            scanner.relative_path(Path::new("./config/root/blog/2024/post.htm")),
            "/blog/2024/post.htm"
        );
    }

    #[test]
    fn test_process_file_skips_non_html() {
        let scanner = TreeScanner::new("/nonexistent");
        assert_eq!(
            scanner.process_file(Path::new("/nonexistent/notes.txt"), "x"),
            FileOutcome::Skipped(SkipReason::NotHtml)
        );
    }

    #[test]
    fn test_process_file_unreadable() {
        let scanner = TreeScanner::new("/nonexistent");
        assert_eq!(
            scanner.process_file(Path::new("/nonexistent/gone.html"), "x"),
            FileOutcome::Skipped(SkipReason::Unreadable)
        );
    }
}
