//! Arena-based XML document tree.
//!
//! This module implements the core tree representation using arena allocation
//! with typed indices. All nodes live in a contiguous `Vec<NodeData>` owned by
//! the `Document`, and are referenced by `NodeId`, a newtype over `NonZeroU32`.
//! Attributes live in a second arena addressed by `AttrId`.
//!
//! # Architecture
//!
//! Every container (the document node or an element) owns an ordered content
//! list of child ids; every node stores the id of its current owner. Both
//! links are private to this module: they change only through the
//! content-list operations in `content.rs` and the attribute-set operations
//! in `attribute.rs`, which validate each mutation in full before applying
//! it. A node is therefore either detached or held by exactly one container,
//! and the ownership graph never contains a cycle.
//!
//! All tree operations go through `&Document` (navigation) or
//! `&mut Document` (mutation). Ids are only meaningful for the `Document`
//! that allocated them; use [`Document::import_node`] to copy content
//! between documents.

mod attribute;
mod content;
mod node;
mod options;

pub use attribute::{AttrId, Attribute};
pub use node::{NodeKind, NodeType};
pub use options::{AttachPolicy, TreeOptions};

use attribute::AttrData;

use crate::error::TreeError;
use crate::util::qname::{join_qname, namespace_from_uri, split_qname};
use std::collections::HashMap;
use std::num::NonZeroU32;

/// A typed index into the document's node arena.
///
/// `NodeId` is a newtype over `NonZeroU32`, meaning it can never be zero
/// and `Option<NodeId>` has the same size as `NodeId` (niche optimization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` from a raw index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0.
    #[allow(clippy::expect_used, clippy::cast_possible_truncation)]
    fn from_index(index: usize) -> Self {
        Self(NonZeroU32::new(index as u32).expect("NodeId index must be non-zero"))
    }

    /// Returns the raw index as a `usize` for indexing into the arena.
    fn as_index(self) -> usize {
        self.0.get() as usize
    }

    /// Converts this `NodeId` to a raw `u32`.
    ///
    /// The returned value is always non-zero (valid `NodeId`s start at 1).
    #[must_use]
    pub fn into_raw(self) -> u32 {
        self.0.get()
    }

    /// Creates a `NodeId` from a raw `u32`, if non-zero.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }
}

/// Storage for a single node in the document arena.
///
/// Access individual nodes via [`Document::node`]. The owner link and the
/// content list are read-only from outside the `tree` module.
#[derive(Debug, Clone)]
pub struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    content: Vec<NodeId>,
    attributes: Vec<AttrId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            content: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// What kind of node this is and its payload.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The payload-free tag of this node.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// The container currently holding this node, if any.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The ordered content list. Empty for non-container nodes.
    #[must_use]
    pub fn content(&self) -> &[NodeId] {
        &self.content
    }

    /// The element's attribute ids in insertion order. Empty for
    /// non-element nodes.
    #[must_use]
    pub fn attributes(&self) -> &[AttrId] {
        &self.attributes
    }
}

/// An XML document.
///
/// The `Document` owns all nodes in an arena and provides methods for
/// tree navigation and mutation. Nodes are never freed: a detached node
/// keeps its slot (and any attach-policy override) until the document is
/// dropped.
///
/// # Examples
///
/// ```
/// use xmlgrove::Document;
///
/// let mut doc = Document::new();
/// let root = doc.create_element("root");
/// doc.add_content(doc.root(), root).unwrap();
/// assert_eq!(doc.root_element(), Ok(root));
/// assert_eq!(doc.node_name(root), Some("root"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    /// The node arena. Index 0 is unused (placeholder for `NonZeroU32`).
    nodes: Vec<NodeData>,
    /// The attribute arena. Index 0 is unused, as above.
    attrs: Vec<AttrData>,
    /// The document node id (the Document node, not the root element).
    root: NodeId,
    options: TreeOptions,
    /// Per-container overrides of `options.attach_policy`.
    policies: HashMap<NodeId, AttachPolicy>,
    /// XML version from the XML declaration (e.g., "1.0").
    pub version: Option<String>,
    /// Encoding from the XML declaration (e.g., "UTF-8").
    pub encoding: Option<String>,
    /// Standalone flag from the XML declaration.
    pub standalone: Option<bool>,
}

impl Document {
    /// Creates a new empty document with default options.
    ///
    /// The document contains a single Document node and no root element.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(TreeOptions::default())
    }

    /// Creates a new empty document with the given options.
    #[must_use]
    pub fn with_options(options: TreeOptions) -> Self {
        let mut nodes = Vec::with_capacity(64);
        // Index 0: placeholder (NodeId uses NonZeroU32)
        nodes.push(NodeData::new(NodeKind::Document));
        // Index 1: the document node
        nodes.push(NodeData::new(NodeKind::Document));
        Self {
            nodes,
            attrs: vec![AttrData::placeholder()],
            root: NodeId::from_index(1),
            options,
            policies: HashMap::new(),
            version: None,
            encoding: None,
            standalone: None,
        }
    }

    /// Returns the options this document was created with.
    #[must_use]
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Returns the attach policy in force for `container`.
    #[must_use]
    pub fn attach_policy(&self, container: NodeId) -> AttachPolicy {
        self.policies
            .get(&container)
            .copied()
            .unwrap_or(self.options.attach_policy)
    }

    /// Overrides the attach policy for one container's content list and
    /// attribute set.
    ///
    /// # Errors
    ///
    /// Returns `IllegalAddition` if `container` is not a document or element.
    pub fn set_attach_policy(
        &mut self,
        container: NodeId,
        policy: AttachPolicy,
    ) -> Result<(), TreeError> {
        let kind = self.node_type(container);
        if !kind.is_container() {
            return Err(TreeError::IllegalAddition(format!(
                "a {kind} node has no content list"
            )));
        }
        self.policies.insert(container, policy);
        Ok(())
    }

    /// Returns the document node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the root element of the document (the single top-level element).
    ///
    /// # Errors
    ///
    /// Returns `NoRootElement` if the document currently has no element child.
    pub fn root_element(&self) -> Result<NodeId, TreeError> {
        self.node(self.root)
            .content
            .iter()
            .copied()
            .find(|&id| self.node_type(id) == NodeType::Element)
            .ok_or(TreeError::NoRootElement)
    }

    /// Returns `true` if the document currently has a root element.
    #[must_use]
    pub fn has_root_element(&self) -> bool {
        self.root_element().is_ok()
    }

    /// Makes `element` the root element.
    ///
    /// An existing root is replaced in place and returned, detached.
    /// Otherwise `element` is appended to the document content.
    ///
    /// # Errors
    ///
    /// Fails with `IllegalAddition` if `element` is not an element, or with
    /// any error of [`set_content`](Self::set_content) /
    /// [`add_content`](Self::add_content).
    pub fn set_root_element(&mut self, element: NodeId) -> Result<Option<NodeId>, TreeError> {
        if self.node_type(element) != NodeType::Element {
            return Err(TreeError::IllegalAddition(format!(
                "a {} node cannot be the root element",
                self.node_type(element)
            )));
        }
        match self.root_element() {
            Ok(current) if current == element => Ok(None),
            Ok(current) => {
                let index = self.content_index(self.root, current).unwrap_or(0);
                self.set_content(self.root, index, element).map(Some)
            }
            Err(_) => self.add_content(self.root, element).map(|()| None),
        }
    }

    /// Returns the document type declaration, if present.
    #[must_use]
    pub fn doc_type(&self) -> Option<NodeId> {
        self.node(self.root)
            .content
            .iter()
            .copied()
            .find(|&id| self.node_type(id) == NodeType::DocumentType)
    }

    /// Installs `doctype` as the document type declaration.
    ///
    /// An existing doctype is replaced in place and returned, detached.
    /// Otherwise the doctype is inserted just before the root element, or
    /// appended when the document is rootless.
    ///
    /// # Errors
    ///
    /// Fails with `IllegalAddition` if `doctype` is not a doctype node, or
    /// with any error of the underlying content-list operation.
    pub fn set_doc_type(&mut self, doctype: NodeId) -> Result<Option<NodeId>, TreeError> {
        if self.node_type(doctype) != NodeType::DocumentType {
            return Err(TreeError::IllegalAddition(format!(
                "a {} node is not a doctype",
                self.node_type(doctype)
            )));
        }
        if let Some(current) = self.doc_type() {
            if current == doctype {
                return Ok(None);
            }
            let index = self.content_index(self.root, current).unwrap_or(0);
            return self.set_content(self.root, index, doctype).map(Some);
        }
        let index = match self.root_element() {
            Ok(element) => self.content_index(self.root, element).unwrap_or(0),
            Err(_) => self.content_size(self.root),
        };
        self.insert_content(self.root, index, doctype).map(|()| None)
    }

    /// Removes the document type declaration, returning it detached.
    pub fn remove_doc_type(&mut self) -> Option<NodeId> {
        let doctype = self.doc_type()?;
        self.remove_content(self.root, doctype).then_some(doctype)
    }

    /// Returns a reference to the `NodeData` for the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a valid node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    /// Returns a mutable reference to the `NodeData` for the given node.
    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_index()]
    }

    /// Returns the payload-free kind tag of a node.
    #[must_use]
    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.node(id).node_type()
    }

    /// Returns the name of a node, if applicable.
    ///
    /// Elements return their local name, PIs their target, entity references
    /// and doctypes their name; other kinds return `None`.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. }
            | NodeKind::ProcessingInstruction { target: name, .. }
            | NodeKind::EntityRef { name, .. }
            | NodeKind::DocumentType { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the namespace prefix of an element node, if any.
    #[must_use]
    pub fn node_prefix(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { prefix, .. } => prefix.as_deref(),
            _ => None,
        }
    }

    /// Returns the namespace URI of an element node, if any.
    ///
    /// Non-element nodes always return `None`.
    #[must_use]
    pub fn node_namespace(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { namespace, .. } => namespace.as_deref(),
            _ => None,
        }
    }

    /// Returns `prefix:name` for a prefixed element, the bare name for an
    /// unprefixed one, and `None` for other kinds.
    #[must_use]
    pub fn qualified_name(&self, id: NodeId) -> Option<String> {
        match &self.node(id).kind {
            NodeKind::Element { name, prefix, .. } => {
                Some(join_qname(prefix.as_deref(), name).into_owned())
            }
            _ => None,
        }
    }

    /// Returns the character payload of a text, CDATA, comment or PI node.
    ///
    /// For element nodes, returns `None`; use `text_content()` to get the
    /// concatenated text of all descendant text nodes.
    #[must_use]
    pub fn node_text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Text { content }
            | NodeKind::Comment { content }
            | NodeKind::CData { content } => Some(content),
            NodeKind::ProcessingInstruction { data, .. } => data.as_deref(),
            _ => None,
        }
    }

    /// Returns the concatenated text content of a node and all its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        if let NodeKind::Text { content } | NodeKind::CData { content } = &self.node(id).kind {
            result.push_str(content);
        }
        for desc in self.descendants(id) {
            if let NodeKind::Text { content } | NodeKind::CData { content } = &self.node(desc).kind
            {
                result.push_str(content);
            }
        }
        result
    }

    /// Returns the concatenated Text and CDATA children of an element,
    /// ignoring nested elements.
    #[must_use]
    pub fn element_text(&self, id: NodeId) -> String {
        let mut result = String::new();
        for child in self.children(id) {
            if let NodeKind::Text { content } | NodeKind::CData { content } =
                &self.node(child).kind
            {
                result.push_str(content);
            }
        }
        result
    }

    // --- Navigation ---

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).content.first().copied()
    }

    /// Returns the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).content.last().copied()
    }

    /// Returns the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.content_index(parent, id)?;
        self.content_at(parent, index + 1)
    }

    /// Returns the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.content_index(parent, id)?;
        index
            .checked_sub(1)
            .and_then(|prev| self.content_at(parent, prev))
    }

    /// Returns an iterator over the children of a node.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            inner: self.node(id).content.iter(),
        }
    }

    /// Returns an iterator over a node and its ancestors (walking up to root).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: Some(id),
        }
    }

    /// Returns an iterator over all descendants of a node (depth-first,
    /// document order), not including the node itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![self.node(id).content.iter()],
        }
    }

    // --- Construction ---

    /// Allocates a new, detached node in the arena and returns its `NodeId`.
    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(NodeData::new(kind));
        NodeId::from_index(index)
    }

    /// Creates a detached element with no namespace.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.create_node(NodeKind::Element {
            name: name.to_string(),
            prefix: None,
            namespace: None,
        })
    }

    /// Creates a detached element from a qualified name and namespace URI.
    ///
    /// The prefix is taken from `qname` (`"svg:rect"` → prefix `svg`,
    /// local name `rect`). An empty `namespace` means no namespace.
    pub fn create_element_ns(&mut self, qname: &str, namespace: &str) -> NodeId {
        let (prefix, local) = split_qname(qname);
        self.create_node(NodeKind::Element {
            name: local.to_string(),
            prefix: prefix.map(str::to_string),
            namespace: namespace_from_uri(namespace),
        })
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.create_node(NodeKind::Text {
            content: content.to_string(),
        })
    }

    /// Creates a detached CDATA section.
    pub fn create_cdata(&mut self, content: &str) -> NodeId {
        self.create_node(NodeKind::CData {
            content: content.to_string(),
        })
    }

    /// Creates a detached comment.
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.create_node(NodeKind::Comment {
            content: content.to_string(),
        })
    }

    /// Creates a detached processing instruction.
    pub fn create_processing_instruction(&mut self, target: &str, data: Option<&str>) -> NodeId {
        self.create_node(NodeKind::ProcessingInstruction {
            target: target.to_string(),
            data: data.map(str::to_string),
        })
    }

    /// Creates a detached entity reference.
    pub fn create_entity_ref(&mut self, name: &str) -> NodeId {
        self.create_node(NodeKind::EntityRef {
            name: name.to_string(),
            public_id: None,
            system_id: None,
        })
    }

    /// Creates a detached document type declaration.
    pub fn create_doc_type(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> NodeId {
        self.create_node(NodeKind::DocumentType {
            name: name.to_string(),
            public_id: public_id.map(str::to_string),
            system_id: system_id.map(str::to_string),
            internal_subset: None,
        })
    }

    // --- Payload editing ---

    /// Replaces the payload of a text, CDATA or comment node.
    ///
    /// Returns `false` (and changes nothing) for other kinds.
    pub fn set_node_text(&mut self, id: NodeId, text: &str) -> bool {
        match &mut self.node_mut(id).kind {
            NodeKind::Text { content }
            | NodeKind::CData { content }
            | NodeKind::Comment { content } => {
                text.clone_into(content);
                true
            }
            _ => false,
        }
    }

    /// Renames an element, keeping its prefix and namespace.
    ///
    /// Returns `false` for non-element nodes.
    pub fn set_element_name(&mut self, id: NodeId, new_name: &str) -> bool {
        match &mut self.node_mut(id).kind {
            NodeKind::Element { name, .. } => {
                new_name.clone_into(name);
                true
            }
            _ => false,
        }
    }

    /// Replaces the data of a processing instruction.
    ///
    /// Returns `false` for other kinds.
    pub fn set_pi_data(&mut self, id: NodeId, new_data: Option<&str>) -> bool {
        match &mut self.node_mut(id).kind {
            NodeKind::ProcessingInstruction { data, .. } => {
                *data = new_data.map(str::to_string);
                true
            }
            _ => false,
        }
    }

    /// Replaces the internal subset of a doctype.
    ///
    /// Returns `false` for other kinds.
    pub fn set_internal_subset(&mut self, id: NodeId, subset: Option<&str>) -> bool {
        match &mut self.node_mut(id).kind {
            NodeKind::DocumentType {
                internal_subset, ..
            } => {
                *internal_subset = subset.map(str::to_string);
                true
            }
            _ => false,
        }
    }

    /// Replaces all content of an element with a single text node.
    ///
    /// An empty `text` leaves the element empty. Returns the detached former
    /// content.
    ///
    /// # Errors
    ///
    /// Returns `IllegalAddition` if `id` is not an element; nothing changes.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<Vec<NodeId>, TreeError> {
        if self.node_type(id) != NodeType::Element {
            return Err(TreeError::IllegalAddition(format!(
                "cannot set text content of a {} node",
                self.node_type(id)
            )));
        }
        let removed = self.clear_content(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.add_content(id, node)?;
        }
        Ok(removed)
    }

    // --- Copying ---

    /// Deep-copies a node (payload, attributes and descendants) into new,
    /// detached ids in this document. Per-container attach-policy overrides
    /// are copied along with the nodes they belong to.
    ///
    /// # Errors
    ///
    /// Returns `IllegalAddition` for the document node; clone the whole
    /// `Document` instead.
    pub fn clone_node(&mut self, id: NodeId) -> Result<NodeId, TreeError> {
        let snapshot = self.snapshot(id)?;
        Ok(self.materialize(snapshot))
    }

    /// Deep-copies a node from another document into this one, detached.
    /// Attach-policy overrides set in `other` come along, as for
    /// [`clone_node`](Self::clone_node).
    ///
    /// # Errors
    ///
    /// Returns `IllegalAddition` for the other document's document node.
    pub fn import_node(&mut self, other: &Document, id: NodeId) -> Result<NodeId, TreeError> {
        let snapshot = other.snapshot(id)?;
        Ok(self.materialize(snapshot))
    }

    /// Flattens the subtree at `id` in pre-order; each entry records the
    /// position of its parent entry.
    fn snapshot(&self, id: NodeId) -> Result<Vec<SnapshotEntry>, TreeError> {
        if self.node_type(id) == NodeType::Document {
            return Err(TreeError::IllegalAddition(
                "the document node cannot be copied".to_string(),
            ));
        }
        let mut entries = Vec::new();
        let mut pending = vec![(id, None)];
        while let Some((current, parent)) = pending.pop() {
            let data = self.node(current);
            let position = entries.len();
            entries.push(SnapshotEntry {
                kind: data.kind.clone(),
                attributes: data
                    .attributes
                    .iter()
                    .map(|&attr| self.attribute_data(attr).clone())
                    .collect(),
                policy: self.policies.get(&current).copied(),
                parent,
            });
            for &child in data.content.iter().rev() {
                pending.push((child, Some(position)));
            }
        }
        Ok(entries)
    }

    /// Allocates a flattened subtree and links it; returns the copy's root.
    fn materialize(&mut self, entries: Vec<SnapshotEntry>) -> NodeId {
        let mut ids: Vec<NodeId> = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = self.create_node(entry.kind);
            if let Some(policy) = entry.policy {
                self.policies.insert(id, policy);
            }
            for attr in entry.attributes {
                let attr_id = self.create_attribute(attr);
                self.link_attribute(id, attr_id);
            }
            if let Some(parent) = entry.parent.map(|position| ids[position]) {
                self.node_mut(id).parent = Some(parent);
                self.node_mut(parent).content.push(id);
            }
            ids.push(id);
        }
        ids[0]
    }

    /// Returns the total number of nodes in the arena, the document node
    /// included. Detached nodes are counted.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1 // subtract placeholder at index 0
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// One node of a flattened subtree, used while copying.
struct SnapshotEntry {
    kind: NodeKind,
    attributes: Vec<Attribute>,
    policy: Option<AttachPolicy>,
    parent: Option<usize>,
}

// --- Iterators ---

/// Iterator over the children of a node.
pub struct Children<'a> {
    inner: std::slice::Iter<'a, NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Children<'_> {}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).parent;
        Some(current)
    }
}

/// Depth-first iterator over all descendants of a node.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<std::slice::Iter<'a, NodeId>>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            if let Some(&id) = level.next() {
                self.stack.push(self.doc.node(id).content.iter());
                return Some(id);
            }
            self.stack.pop();
        }
    }
}
