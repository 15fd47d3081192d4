//! Narrow element-query capability the extraction rules are written against.
//!
//! The rules only need to find descendants by tag plus id or class, read
//! attributes and text, and test for a class flag. [`HtmlNode`] provides that
//! over a parsed `scraper` document.

use scraper::{ElementRef, Selector};

/// A descendant lookup: tag name plus either an id or a single class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'a> {
    Id { tag: &'a str, id: &'a str },
    Class { tag: &'a str, class: &'a str },
}

impl Query<'_> {
    fn to_css(self) -> String {
        match self {
            Query::Id { tag, id } => format!("{tag}#{id}"),
            Query::Class { tag, class } => format!("{tag}.{class}"),
        }
    }
}

/// Element handle the extractor reads from.
///
/// Lookups search descendants in document order. Missing elements and
/// attributes surface as `None`, never as errors.
pub trait MarkupNode: Sized {
    fn find(&self, query: Query<'_>) -> Option<Self>;

    fn find_all(&self, query: Query<'_>) -> Vec<Self>;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Concatenated text of this element and its descendants, untrimmed.
    fn text(&self) -> String;

    fn has_class(&self, class: &str) -> bool;
}

/// [`MarkupNode`] backed by a `scraper` element.
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl<'a> HtmlNode<'a> {
    #[must_use]
    pub fn new(element: ElementRef<'a>) -> Self {
        Self(element)
    }

    fn selector(query: Query<'_>) -> Option<Selector> {
        let css = query.to_css();
        let parsed = match Selector::parse(&css) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::warn!(selector = %css, error = %e, "unusable selector; treating as no match");
                None
            }
        };
        parsed
    }
}

impl MarkupNode for HtmlNode<'_> {
    fn find(&self, query: Query<'_>) -> Option<Self> {
        let selector = Self::selector(query)?;
        self.0.select(&selector).next().map(HtmlNode)
    }

    fn find_all(&self, query: Query<'_>) -> Vec<Self> {
        Self::selector(query)
            .map(|selector| self.0.select(&selector).map(HtmlNode).collect())
            .unwrap_or_default()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.value().classes().any(|c| c == class)
    }
}
