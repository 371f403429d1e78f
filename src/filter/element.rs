//! Element filter by name and namespace.

use super::Filter;
use crate::tree::{Document, NodeId, NodeKind};

/// Selects elements, optionally by local name and namespace URI.
///
/// A namespace of `""` selects elements in no namespace. Leaving the name
/// or the namespace unset matches any.
///
/// # Examples
///
/// ```
/// use xmlgrove::filter::{ElementFilter, Filter};
/// use xmlgrove::Document;
///
/// let mut doc = Document::new();
/// let plain = doc.create_element("item");
/// let svg = doc.create_element_ns("svg:item", "http://www.w3.org/2000/svg");
///
/// assert!(ElementFilter::named("item").matches(&doc, svg));
/// assert!(!ElementFilter::named_ns("item", "").matches(&doc, svg));
/// assert!(ElementFilter::named_ns("item", "").matches(&doc, plain));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementFilter {
    name: Option<String>,
    namespace: Option<String>,
}

impl ElementFilter {
    /// Selects every element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects elements with the given local name, in any namespace.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            namespace: None,
        }
    }

    /// Selects elements with the given local name and namespace URI.
    #[must_use]
    pub fn named_ns(name: &str, namespace: &str) -> Self {
        Self::named(name).in_namespace(namespace)
    }

    /// Restricts the filter to one namespace URI.
    #[must_use]
    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// The local name this filter requires, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The namespace URI this filter requires, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl Filter for ElementFilter {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let NodeKind::Element {
            name, namespace, ..
        } = doc.node(node).kind()
        else {
            return false;
        };
        let name_ok = self.name.as_deref().map_or(true, |wanted| wanted == name);
        let namespace_ok = self
            .namespace
            .as_deref()
            .map_or(true, |wanted| wanted == namespace.as_deref().unwrap_or(""));
        name_ok && namespace_ok
    }
}
