use anyhow::{Context, Result};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// A parsed HTML document. Lives only for the duration of processing one file.
pub struct HtmlDocument {
    dom: RcDom,
}

impl HtmlDocument {
    /// Parses raw bytes as HTML. Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn parse(html: &[u8]) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut std::io::Cursor::new(html))
            .context("Failed to parse html document")?;
        Ok(Self { dom })
    }

    pub fn root(&self) -> &Handle {
        &self.dom.document
    }
}

fn element_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

fn is_non_visible(local: &str) -> bool {
    matches!(local, "script" | "style" | "noscript")
}

/// Flattens a document tree into plain text.
///
/// Every text node contributes its raw contents. Every other node contributes
/// each child's text followed by a single space, and the result is trimmed, so
/// sibling elements always end up separated by exactly one space regardless of
/// the whitespace in the source markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextExtractor {
    skip_non_visible: bool,
}

impl TextExtractor {
    /// With `skip_non_visible`, `script`, `style` and `noscript` subtrees are
    /// dropped along with their separating space.
    pub fn new(skip_non_visible: bool) -> Self {
        Self { skip_non_visible }
    }

    pub fn extract(&self, handle: &Handle) -> String {
        if let NodeData::Text { contents } = &handle.data {
            return contents.borrow().to_string();
        }

        let mut text = String::new();
        for child in handle.children.borrow().iter() {
            if self.skip_non_visible && element_name(child).is_some_and(is_non_visible) {
                continue;
            }
            text.push_str(&self.extract(child));
            text.push(' ');
        }
        text.trim().to_string()
    }
}

/// Finds the text of the first `<title>` element, depth-first.
///
/// Only the first child of the element is considered. A title element that is
/// empty, or whose first child is not text, counts as not found.
pub fn find_title(handle: &Handle) -> Option<String> {
    if element_name(handle) == Some("title") {
        let children = handle.children.borrow();
        return match children.first().map(|c| &c.data) {
            Some(NodeData::Text { contents }) => Some(contents.borrow().to_string()),
            _ => None,
        };
    }

    for child in handle.children.borrow().iter() {
        if let Some(title) = find_title(child) {
            return Some(title);
        }
    }
    None
}
