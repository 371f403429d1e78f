//! # xmlgrove
//!
//! A mutable in-memory XML document tree. Application code builds, queries
//! and edits the tree directly; every container (the document or an element)
//! owns an ordered content list that enforces the structural rules of XML on
//! each mutation, and filtered views give live, editable projections of those
//! lists.
//!
//! ## Quick Start
//!
//! ```
//! use xmlgrove::filter::{ContentFilter, FilteredView};
//! use xmlgrove::{Document, TreeError};
//!
//! let mut doc = Document::new();
//! let root = doc.create_element("root");
//! doc.add_content(doc.root(), root).unwrap();
//!
//! let intro = doc.create_text("intro");
//! let item = doc.create_element("item");
//! doc.add_all(root, &[intro, item]).unwrap();
//!
//! // Views are live: edits through the view land in the backing list.
//! let items = FilteredView::new(root, ContentFilter::elements());
//! let first = doc.create_element("item");
//! items.insert(&mut doc, 0, first).unwrap();
//! assert_eq!(doc.content(root), &[intro, first, item]);
//!
//! // Structural rules are checked before anything changes.
//! assert_eq!(doc.add_content(item, root), Err(TreeError::CycleDetected));
//! ```
//!
//! ## Modules
//!
//! - [`tree`]: the node arena, content lists and attribute sets.
//! - [`filter`]: view filters and live filtered views.
//! - [`sax`]: building a tree from handler events and replaying it.
//! - [`serial`]: writing a tree out as XML text.
//! - [`error`]: the error types.

pub mod error;
pub mod filter;
pub mod sax;
pub mod serial;
pub mod tree;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use error::{BuildError, TreeError};
pub use tree::{AttrId, Attribute, Document, NodeId};
