//! View filters and live filtered views over content lists.
//!
//! A [`Filter`] decides whether a node belongs to a projection of a content
//! list. A [`FilteredView`] pairs a container with a filter and presents the
//! matching entries, in backing order, as a mutable sequence of their own.
//!
//! # Examples
//!
//! ```
//! use xmlgrove::filter::{ContentFilter, Filter, FilteredView};
//! use xmlgrove::Document;
//!
//! let mut doc = Document::new();
//! let list = doc.create_element("list");
//! let a = doc.create_text("a");
//! let b = doc.create_element("b");
//! let c = doc.create_comment("c");
//! doc.add_all(list, &[a, b, c]).unwrap();
//!
//! let elements = FilteredView::new(list, ContentFilter::elements());
//! assert_eq!(elements.size(&doc), 1);
//! assert_eq!(elements.get(&doc, 0), Some(b));
//!
//! let not_elements = ContentFilter::elements().negate();
//! assert!(not_elements.matches(&doc, c));
//! ```

mod content;
mod element;
mod view;

pub use content::ContentFilter;
pub use element::ElementFilter;
pub use view::{FilteredView, ViewIter};

use crate::tree::{Document, NodeId};

/// A membership test used to select entries of a content list.
///
/// Filters see the whole document, so they may inspect a node's payload,
/// attributes or children as well as its kind.
pub trait Filter {
    /// Returns `true` if `node` belongs to the view.
    fn matches(&self, doc: &Document, node: NodeId) -> bool;

    /// Matches nodes accepted by both filters.
    #[must_use]
    fn and<G: Filter>(self, other: G) -> And<Self, G>
    where
        Self: Sized,
    {
        And(self, other)
    }

    /// Matches nodes accepted by either filter.
    #[must_use]
    fn or<G: Filter>(self, other: G) -> Or<Self, G>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    /// Matches nodes this filter rejects.
    #[must_use]
    fn negate(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

impl<F: Filter + ?Sized> Filter for &F {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        (**self).matches(doc, node)
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        (**self).matches(doc, node)
    }
}

/// Conjunction of two filters. See [`Filter::and`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<A, B>(pub A, pub B);

impl<A: Filter, B: Filter> Filter for And<A, B> {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.0.matches(doc, node) && self.1.matches(doc, node)
    }
}

/// Disjunction of two filters. See [`Filter::or`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Or<A, B>(pub A, pub B);

impl<A: Filter, B: Filter> Filter for Or<A, B> {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.0.matches(doc, node) || self.1.matches(doc, node)
    }
}

/// Negation of a filter. See [`Filter::negate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Not<A>(pub A);

impl<A: Filter> Filter for Not<A> {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        !self.0.matches(doc, node)
    }
}

/// Adapts a closure into a [`Filter`].
///
/// # Examples
///
/// ```
/// use xmlgrove::filter::{Filter, Predicate};
/// use xmlgrove::Document;
///
/// let mut doc = Document::new();
/// let item = doc.create_element("item");
/// doc.set_attribute_value(item, "keep", "yes").unwrap();
///
/// let kept = Predicate(|doc: &Document, id| doc.attribute(id, "keep") == Some("yes"));
/// assert!(kept.matches(&doc, item));
/// ```
#[derive(Clone, Copy)]
pub struct Predicate<F>(pub F);

impl<F> std::fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate(..)")
    }
}

impl<F: Fn(&Document, NodeId) -> bool> Filter for Predicate<F> {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        (self.0)(doc, node)
    }
}

impl Document {
    /// Returns a live view of the child elements of `parent`.
    #[must_use]
    pub fn element_view(&self, parent: NodeId) -> FilteredView<ElementFilter> {
        FilteredView::new(parent, ElementFilter::new())
    }

    /// Returns the first child element of `parent` with the given local name
    /// and namespace URI (`""` for no namespace).
    #[must_use]
    pub fn child(&self, parent: NodeId, name: &str, namespace: &str) -> Option<NodeId> {
        let filter = ElementFilter::named_ns(name, namespace);
        self.content(parent)
            .iter()
            .copied()
            .find(|&node| filter.matches(self, node))
    }

    /// Returns a live view of the child elements of `parent` with the given
    /// local name and namespace URI.
    #[must_use]
    pub fn children_named(
        &self,
        parent: NodeId,
        name: &str,
        namespace: &str,
    ) -> FilteredView<ElementFilter> {
        FilteredView::new(parent, ElementFilter::named_ns(name, namespace))
    }

    /// Returns the direct text of the first matching child element, or
    /// `None` if there is no such child.
    #[must_use]
    pub fn child_text(&self, parent: NodeId, name: &str, namespace: &str) -> Option<String> {
        self.child(parent, name, namespace)
            .map(|child| self.element_text(child))
    }
}
