//! Node-kind filter.

use super::Filter;
use crate::tree::{Document, NodeId, NodeType};

/// Selects content by node kind.
///
/// The filter is a set of [`NodeType`]s. Presets cover the common views;
/// [`with`](Self::with) and [`without`](Self::without) adjust them.
///
/// # Examples
///
/// ```
/// use xmlgrove::filter::ContentFilter;
/// use xmlgrove::tree::NodeType;
///
/// let markup = ContentFilter::elements().with(NodeType::Comment);
/// assert!(markup.accepts(NodeType::Comment));
/// assert!(!markup.accepts(NodeType::Text));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentFilter {
    mask: u8,
}

impl ContentFilter {
    /// Selects nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self { mask: 0 }
    }

    /// Selects every kind of content.
    #[must_use]
    pub fn all() -> Self {
        NodeType::ALL
            .iter()
            .filter(|&&kind| kind != NodeType::Document)
            .fold(Self::none(), |filter, &kind| filter.with(kind))
    }

    /// Selects elements.
    #[must_use]
    pub fn elements() -> Self {
        Self::none().with(NodeType::Element)
    }

    /// Selects character content: text and CDATA sections.
    #[must_use]
    pub fn text() -> Self {
        Self::none().with(NodeType::Text).with(NodeType::CData)
    }

    /// Selects plain text nodes, excluding CDATA sections.
    #[must_use]
    pub fn text_only() -> Self {
        Self::none().with(NodeType::Text)
    }

    /// Selects comments.
    #[must_use]
    pub fn comments() -> Self {
        Self::none().with(NodeType::Comment)
    }

    /// Selects processing instructions.
    #[must_use]
    pub fn processing_instructions() -> Self {
        Self::none().with(NodeType::ProcessingInstruction)
    }

    /// Selects entity references.
    #[must_use]
    pub fn entity_refs() -> Self {
        Self::none().with(NodeType::EntityRef)
    }

    /// Selects document type declarations.
    #[must_use]
    pub fn doc_types() -> Self {
        Self::none().with(NodeType::DocumentType)
    }

    /// Adds a node kind to the set.
    #[must_use]
    pub fn with(self, kind: NodeType) -> Self {
        Self {
            mask: self.mask | bit(kind),
        }
    }

    /// Removes a node kind from the set.
    #[must_use]
    pub fn without(self, kind: NodeType) -> Self {
        Self {
            mask: self.mask & !bit(kind),
        }
    }

    /// Returns `true` if nodes of `kind` are selected.
    #[must_use]
    pub fn accepts(self, kind: NodeType) -> bool {
        self.mask & bit(kind) != 0
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl Filter for ContentFilter {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.accepts(doc.node_type(node))
    }
}

fn bit(kind: NodeType) -> u8 {
    match kind {
        NodeType::Document => 1 << 0,
        NodeType::Element => 1 << 1,
        NodeType::Text => 1 << 2,
        NodeType::CData => 1 << 3,
        NodeType::Comment => 1 << 4,
        NodeType::ProcessingInstruction => 1 << 5,
        NodeType::EntityRef => 1 << 6,
        NodeType::DocumentType => 1 << 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_excludes_document() {
        let all = ContentFilter::all();
        assert!(!all.accepts(NodeType::Document));
        for kind in NodeType::ALL {
            if kind != NodeType::Document {
                assert!(all.accepts(kind), "{kind}");
            }
        }
    }

    #[test]
    fn test_text_includes_cdata() {
        assert!(ContentFilter::text().accepts(NodeType::CData));
        assert!(!ContentFilter::text_only().accepts(NodeType::CData));
        assert!(ContentFilter::text_only().accepts(NodeType::Text));
    }

    #[test]
    fn test_with_and_without() {
        let filter = ContentFilter::all().without(NodeType::Comment);
        assert!(!filter.accepts(NodeType::Comment));
        assert!(filter.accepts(NodeType::Element));
        assert_eq!(filter.with(NodeType::Comment), ContentFilter::all());
        assert_eq!(ContentFilter::default(), ContentFilter::all());
    }

    #[test]
    fn test_matches_node_kind() {
        let mut doc = Document::new();
        let pi = doc.create_processing_instruction("p", None);
        let entity = doc.create_entity_ref("amp");
        assert!(ContentFilter::processing_instructions().matches(&doc, pi));
        assert!(ContentFilter::entity_refs().matches(&doc, entity));
        assert!(!ContentFilter::doc_types().matches(&doc, entity));
    }
}
