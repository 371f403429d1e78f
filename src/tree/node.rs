//! Node type definitions.
//!
//! The `NodeKind` enum is the closed set of node kinds a tree can hold. Each
//! variant carries the kind-specific payload; navigation links and the
//! per-container content list live in `NodeData`, not here.

use std::fmt;

/// The kind of an XML node and its associated data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document node. There is exactly one per `Document`.
    Document,

    /// An element node, e.g., `<svg:rect>`.
    ///
    /// Attributes are held in the element's attribute set, see
    /// [`Document::attribute_ids`](super::Document::attribute_ids).
    Element {
        /// The element's local name.
        name: String,
        /// Namespace prefix (e.g., `"svg"` in `svg:rect`), if any.
        prefix: Option<String>,
        /// Namespace URI, if any.
        namespace: Option<String>,
    },

    /// A text node containing character data.
    Text {
        /// The text content.
        content: String,
    },

    /// A CDATA section, e.g., `<![CDATA[...]]>`.
    CData {
        /// The CDATA content (no escaping applied).
        content: String,
    },

    /// A comment node, e.g., `<!-- ... -->`.
    Comment {
        /// The comment text (without the `<!--` and `-->` delimiters).
        content: String,
    },

    /// A processing instruction, e.g., `<?target data?>`.
    ProcessingInstruction {
        /// The PI target (e.g., `"xml-stylesheet"`).
        target: String,
        /// The PI data, if any.
        data: Option<String>,
    },

    /// An unexpanded entity reference (e.g., `&nbsp;`).
    EntityRef {
        /// The entity name (without `&` and `;`).
        name: String,
        /// The PUBLIC identifier of the entity, if known.
        public_id: Option<String>,
        /// The SYSTEM identifier of the entity, if known.
        system_id: Option<String>,
    },

    /// A document type declaration node, e.g., `<!DOCTYPE html>`.
    DocumentType {
        /// The root element name declared in the DOCTYPE.
        name: String,
        /// The PUBLIC identifier, if any.
        public_id: Option<String>,
        /// The SYSTEM identifier (URI), if any.
        system_id: Option<String>,
        /// The internal subset text between `[` and `]`, if any.
        internal_subset: Option<String>,
    },
}

impl NodeKind {
    /// Returns the payload-free tag for this kind.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Document => NodeType::Document,
            Self::Element { .. } => NodeType::Element,
            Self::Text { .. } => NodeType::Text,
            Self::CData { .. } => NodeType::CData,
            Self::Comment { .. } => NodeType::Comment,
            Self::ProcessingInstruction { .. } => NodeType::ProcessingInstruction,
            Self::EntityRef { .. } => NodeType::EntityRef,
            Self::DocumentType { .. } => NodeType::DocumentType,
        }
    }
}

/// Payload-free tag for a [`NodeKind`].
///
/// Used by content filters and error reporting where only the kind matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Document,
    Element,
    Text,
    CData,
    Comment,
    ProcessingInstruction,
    EntityRef,
    DocumentType,
}

impl NodeType {
    /// Every node type, in declaration order.
    pub const ALL: [NodeType; 8] = [
        Self::Document,
        Self::Element,
        Self::Text,
        Self::CData,
        Self::Comment,
        Self::ProcessingInstruction,
        Self::EntityRef,
        Self::DocumentType,
    ];

    /// Returns `true` for kinds that own a content list.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Document | Self::Element)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Document => "document",
            Self::Element => "element",
            Self::Text => "text",
            Self::CData => "CDATA",
            Self::Comment => "comment",
            Self::ProcessingInstruction => "processing instruction",
            Self::EntityRef => "entity reference",
            Self::DocumentType => "doctype",
        };
        f.write_str(name)
    }
}
