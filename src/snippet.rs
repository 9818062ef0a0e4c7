pub const DEFAULT_CONTEXT: usize = 100;
pub const MARK_OPEN: &str = "<b>";
pub const MARK_CLOSE: &str = "</b>";

/// The first occurrence of a query inside a text, with the surrounding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet<'a> {
    pub prefix: &'a str,
    pub matched: &'a str,
    pub suffix: &'a str,
}

impl Snippet<'_> {
    /// `prefix<b>matched</b>suffix`
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.prefix.len() + self.matched.len() + self.suffix.len() + MARK_OPEN.len() + MARK_CLOSE.len(),
        );
        out.push_str(self.prefix);
        out.push_str(MARK_OPEN);
        out.push_str(self.matched);
        out.push_str(MARK_CLOSE);
        out.push_str(self.suffix);
        out
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SnippetBuilder {
    context: usize,
}

impl Default for SnippetBuilder {
    fn default() -> Self {
        Self {
            context: DEFAULT_CONTEXT,
        }
    }
}

impl SnippetBuilder {
    pub fn new(context: usize) -> Self {
        Self { context }
    }

    /// Locates the first occurrence of `query` in `text`.
    ///
    /// Both are expected to be lower-cased already. The context on each side is
    /// counted in chars and clipped at the text boundaries. An empty query never
    /// matches.
    pub fn locate<'a>(&self, text: &'a str, query: &str) -> Option<Snippet<'a>> {
        if query.is_empty() {
            return None;
        }
        let idx = text.find(query)?;
        let match_end = idx + query.len();

        let start = match self.context {
            0 => idx,
            n => text[..idx]
                .char_indices()
                .rev()
                .nth(n - 1)
                .map(|(i, _)| i)
                .unwrap_or(0),
        };

        let end = text[match_end..]
            .char_indices()
            .nth(self.context)
            .map(|(i, _)| match_end + i)
            .unwrap_or(text.len());

        Some(Snippet {
            prefix: &text[start..idx],
            matched: &text[idx..match_end],
            suffix: &text[match_end..end],
        })
    }

    pub fn build(&self, text: &str, query: &str) -> Option<String> {
        self.locate(text, query).map(|s| s.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_keeps_everything() {
        let builder = SnippetBuilder::default();
        let snippet = builder.build("about hello world, welcome!", "world");
        assert_eq!(snippet.as_deref(), Some("about hello <b>world</b>, welcome!"));
    }

    #[test]
    fn test_no_match() {
        let builder = SnippetBuilder::default();
        assert_eq!(builder.build("about hello world", "planet"), None);
    }

    #[test]
    fn test_empty_query_never_matches() {
        let builder = SnippetBuilder::default();
        assert_eq!(builder.locate("anything", ""), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let builder = SnippetBuilder::new(3);
        let snippet = builder.locate("abc cat def cat ghi", "cat").unwrap();
        assert_eq!(snippet.prefix, "bc ");
        assert_eq!(snippet.matched, "cat");
        assert_eq!(snippet.suffix, " de");
    }

    #[test]
    fn test_match_at_start_and_end() {
        let builder = SnippetBuilder::new(5);
        let snippet = builder.locate("needle in a haystack", "needle").unwrap();
        assert_eq!(snippet.prefix, "");
        assert_eq!(snippet.suffix, " in a");

        let snippet = builder.locate("a haystack with needle", "needle").unwrap();
        assert_eq!(snippet.prefix, "with ");
        assert_eq!(snippet.suffix, "");
    }

    #[test]
    fn test_context_is_clipped_to_window() {
        let builder = SnippetBuilder::default();
        let text = format!("{}needle{}", "x".repeat(250), "y".repeat(250));
        let snippet = builder.locate(&text, "needle").unwrap();
        assert_eq!(snippet.prefix, "x".repeat(100));
        assert_eq!(snippet.suffix, "y".repeat(100));
        assert_eq!(
            snippet.render(),
            format!("{}<b>needle</b>{}", "x".repeat(100), "y".repeat(100))
        );
    }

    #[test]
    fn test_context_counts_chars_not_bytes() {
        let builder = SnippetBuilder::new(2);
        let snippet = builder.locate("ééé needle ééé", "needle").unwrap();
        assert_eq!(snippet.prefix, "é ");
        assert_eq!(snippet.suffix, " é");
    }

    #[test]
    fn test_zero_context() {
        let builder = SnippetBuilder::new(0);
        let snippet = builder.locate("one two three", "two").unwrap();
        assert_eq!(snippet.render(), "<b>two</b>");
    }
}
