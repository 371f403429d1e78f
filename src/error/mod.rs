//! Error types for tree mutation and tree construction.
//!
//! Every mutating operation on a [`Document`](crate::Document) validates
//! its arguments completely before touching the tree. When validation fails
//! the operation returns one of the [`TreeError`] kinds below and the tree
//! is exactly as it was before the call.
//!
//! These are contract violations by the caller, not transient conditions:
//! nothing in this crate retries or recovers from them.

use crate::tree::NodeType;

/// The error type returned by content-list, filtered-view and attribute-set
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node kind is not legal in the target container, or the target is
    /// not a container at all.
    #[error("illegal addition: {0}")]
    IllegalAddition(String),

    /// The node is attached elsewhere and the target container requires it
    /// to be detached first.
    #[error("{what} already has a parent; detach it first")]
    ContentAlreadyAttached {
        /// Description of the node or attribute being attached.
        what: String,
    },

    /// The node is the target container itself or one of its ancestors.
    #[error("a node cannot be added to itself or to one of its descendants")]
    CycleDetected,

    /// The document already holds a document type declaration.
    #[error("document already has a doctype")]
    DuplicateDocType,

    /// The doctype would follow the root element, or the root element would
    /// precede the doctype.
    #[error("misplaced doctype: {0}")]
    MisplacedDocType(&'static str),

    /// A position outside the valid range was used.
    #[error("index {index} out of range for content of size {size}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The size of the list (or view) at the time of the call.
        size: usize,
    },

    /// An attribute with the same local name and namespace URI is already
    /// present on the element.
    #[error("duplicate attribute {name:?} in namespace {namespace:?}")]
    DuplicateAttribute {
        /// Local name of the colliding attribute.
        name: String,
        /// Namespace URI of the colliding attribute (`""` for none).
        namespace: String,
    },

    /// A node was offered to a filtered view whose filter does not accept it.
    #[error("{kind} node rejected by view filter")]
    FilterRejected {
        /// Kind of the rejected node.
        kind: NodeType,
    },

    /// A root element was requested from a rootless document.
    #[error("document has no root element")]
    NoRootElement,
}

/// The error type returned by [`TreeBuilder::finish`](crate::sax::TreeBuilder::finish).
///
/// Structural failures surface as the same [`TreeError`] kinds that
/// programmatic misuse produces; the remaining variants describe
/// unbalanced event sequences.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// An event was rejected by the content list of the open container.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// `end_element` named a different element than the one that is open.
    #[error("end tag {found:?} does not match open element {expected:?}")]
    MismatchedEnd {
        /// Qualified name of the open element, led by `{uri}` when it
        /// has a namespace.
        expected: String,
        /// Name passed to `end_element`, in the same form.
        found: String,
    },

    /// `end_element` arrived while no element was open.
    #[error("end tag {0:?} without a matching start tag")]
    UnexpectedEnd(String),

    /// The event stream ended with elements still open.
    #[error("{0} element(s) still open at end of document")]
    Unclosed(usize),

    /// Element nesting exceeded the configured maximum depth.
    #[error("element nesting exceeds maximum depth of {0}")]
    DepthLimit(usize),
}
