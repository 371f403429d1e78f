//! Content-list operations.
//!
//! Every container (the document node or an element) owns an ordered list
//! of child ids. The methods here are the only code that writes a node's
//! owner link. Each mutation runs in two phases: `check_insert` validates
//! the complete request against the current tree without touching it, then
//! the apply step performs the change. A failed call therefore leaves the
//! tree exactly as it was, including for bulk inserts.

use tracing::trace;

use super::{AttachPolicy, Document, NodeId, NodeType};
use crate::error::TreeError;

impl Document {
    /// Returns the content list of a container. Empty for leaf nodes.
    #[must_use]
    pub fn content(&self, parent: NodeId) -> &[NodeId] {
        &self.node(parent).content
    }

    /// Returns the number of entries in a container's content list.
    #[must_use]
    pub fn content_size(&self, parent: NodeId) -> usize {
        self.node(parent).content.len()
    }

    /// Returns the entry at `index`, or `None` past the end.
    #[must_use]
    pub fn content_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.node(parent).content.get(index).copied()
    }

    /// Returns the position of `node` in the content list of `parent`.
    #[must_use]
    pub fn content_index(&self, parent: NodeId, node: NodeId) -> Option<usize> {
        if self.node(node).parent != Some(parent) {
            return None;
        }
        self.node(parent).content.iter().position(|&c| c == node)
    }

    /// Returns `true` if `ancestor` is a proper ancestor of `node`.
    ///
    /// Walks owner links upward from `node`; a node is never its own
    /// ancestor.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).skip(1).any(|id| id == ancestor)
    }

    /// Inserts `node` at `index` in the content list of `parent`.
    ///
    /// `index == content_size(parent)` appends. Under
    /// [`AttachPolicy::Transfer`] a node held by another container (or
    /// elsewhere in this one) is moved; `index` refers to the list as it is
    /// before the move.
    ///
    /// # Errors
    ///
    /// - `IllegalAddition` if `parent` is not a container or the node kind is
    ///   not allowed there (including a second root element).
    /// - `CycleDetected` if `node` is `parent` or one of its ancestors.
    /// - `ContentAlreadyAttached` if `node` is attached and the container
    ///   requires detached content.
    /// - `DuplicateDocType` / `MisplacedDocType` for doctype ordering.
    /// - `IndexOutOfRange` if `index > content_size(parent)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlgrove::Document;
    ///
    /// let mut doc = Document::new();
    /// let list = doc.create_element("list");
    /// let a = doc.create_text("a");
    /// let b = doc.create_text("b");
    /// doc.add_content(list, b).unwrap();
    /// doc.insert_content(list, 0, a).unwrap();
    /// assert_eq!(doc.content(list), &[a, b]);
    /// ```
    pub fn insert_content(
        &mut self,
        parent: NodeId,
        index: usize,
        node: NodeId,
    ) -> Result<(), TreeError> {
        self.insert_all(parent, index, &[node])
    }

    /// Appends `node` to the content list of `parent`.
    ///
    /// # Errors
    ///
    /// Same as [`insert_content`](Self::insert_content).
    pub fn add_content(&mut self, parent: NodeId, node: NodeId) -> Result<(), TreeError> {
        let size = self.content_size(parent);
        self.insert_all(parent, size, &[node])
    }

    /// Inserts `nodes`, in order, starting at `index`.
    ///
    /// Every node is validated before anything is changed: if one node is
    /// rejected the whole call fails and the list is unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`insert_content`](Self::insert_content), plus
    /// `IllegalAddition` if the same node appears twice in `nodes`.
    pub fn insert_all(
        &mut self,
        parent: NodeId,
        index: usize,
        nodes: &[NodeId],
    ) -> Result<(), TreeError> {
        let position = self.check_insert(parent, index, nodes, None)?;
        for &node in nodes {
            self.release(node);
        }
        let content = &mut self.node_mut(parent).content;
        content.splice(position..position, nodes.iter().copied());
        for &node in nodes {
            self.node_mut(node).parent = Some(parent);
        }
        trace!(?parent, position, count = nodes.len(), "content inserted");
        Ok(())
    }

    /// Appends `nodes`, in order, with all-or-nothing validation.
    ///
    /// # Errors
    ///
    /// Same as [`insert_all`](Self::insert_all).
    pub fn add_all(&mut self, parent: NodeId, nodes: &[NodeId]) -> Result<(), TreeError> {
        let size = self.content_size(parent);
        self.insert_all(parent, size, nodes)
    }

    /// Replaces the entry at `index` with `node` and returns the former
    /// occupant, now detached.
    ///
    /// `node` is validated exactly as for an insert, with the replaced entry
    /// already out of the way (so an element may replace the root element).
    /// Replacing an entry with itself is a no-op.
    ///
    /// # Errors
    ///
    /// Same as [`insert_content`](Self::insert_content);
    /// `IndexOutOfRange` if `index >= content_size(parent)`.
    pub fn set_content(
        &mut self,
        parent: NodeId,
        index: usize,
        node: NodeId,
    ) -> Result<NodeId, TreeError> {
        let size = self.content_size(parent);
        if index >= size {
            return Err(TreeError::IndexOutOfRange { index, size });
        }
        let occupant = self.node(parent).content[index];
        if occupant == node {
            return Ok(node);
        }
        let position = self.check_insert(parent, index, &[node], Some(index))?;
        self.release(node);
        self.node_mut(parent).content[position] = node;
        self.node_mut(node).parent = Some(parent);
        self.node_mut(occupant).parent = None;
        trace!(?parent, position, ?node, ?occupant, "content replaced");
        Ok(occupant)
    }

    /// Removes and returns the entry at `index`, leaving it detached.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= content_size(parent)`.
    pub fn remove_content_at(&mut self, parent: NodeId, index: usize) -> Result<NodeId, TreeError> {
        let size = self.content_size(parent);
        if index >= size {
            return Err(TreeError::IndexOutOfRange { index, size });
        }
        let node = self.node_mut(parent).content.remove(index);
        self.node_mut(node).parent = None;
        trace!(?parent, index, ?node, "content removed");
        Ok(node)
    }

    /// Removes `node` from the content list of `parent`.
    ///
    /// Returns `false` if `node` is not held by `parent`.
    pub fn remove_content(&mut self, parent: NodeId, node: NodeId) -> bool {
        match self.content_index(parent, node) {
            Some(index) => self.remove_content_at(parent, index).is_ok(),
            None => false,
        }
    }

    /// Removes every entry of a container and returns them, detached, in
    /// their former order.
    pub fn clear_content(&mut self, parent: NodeId) -> Vec<NodeId> {
        let removed = std::mem::take(&mut self.node_mut(parent).content);
        for &node in &removed {
            self.node_mut(node).parent = None;
        }
        if !removed.is_empty() {
            trace!(?parent, count = removed.len(), "content cleared");
        }
        removed
    }

    /// Detaches a node from its container and returns the former container.
    ///
    /// The node remains allocated in the arena and can be inserted again.
    /// Detaching a detached node is a no-op returning `None`.
    pub fn detach(&mut self, node: NodeId) -> Option<NodeId> {
        self.release(node)
    }

    /// Unlinks `node` from its current owner without any validation.
    fn release(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.node(node).parent?;
        let content = &mut self.node_mut(parent).content;
        if let Some(index) = content.iter().position(|&c| c == node) {
            content.remove(index);
        }
        self.node_mut(node).parent = None;
        trace!(?node, ?parent, "node detached");
        Some(parent)
    }

    /// Validates inserting `nodes` at `index` (or replacing the entry at
    /// `replacing`) without mutating anything.
    ///
    /// Returns the position at which `nodes` land once any of them that
    /// already sit in this list have been taken out.
    fn check_insert(
        &self,
        parent: NodeId,
        index: usize,
        nodes: &[NodeId],
        replacing: Option<usize>,
    ) -> Result<usize, TreeError> {
        let parent_type = self.node_type(parent);
        if !parent_type.is_container() {
            return Err(TreeError::IllegalAddition(format!(
                "a {parent_type} node cannot hold content"
            )));
        }
        let content = &self.node(parent).content;
        if replacing.is_none() && index > content.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                size: content.len(),
            });
        }

        let policy = self.attach_policy(parent);
        for (i, &node) in nodes.iter().enumerate() {
            let kind = self.node_type(node);
            if nodes[..i].contains(&node) {
                return Err(TreeError::IllegalAddition(format!(
                    "the same {kind} node appears twice in one insertion"
                )));
            }
            if !accepts(parent_type, kind) {
                return Err(TreeError::IllegalAddition(format!(
                    "a {kind} node is not allowed in {parent_type} content"
                )));
            }
            if node == parent || self.is_ancestor_of(node, parent) {
                return Err(TreeError::CycleDetected);
            }
            if policy == AttachPolicy::RequireDetached && self.node(node).parent.is_some() {
                return Err(TreeError::ContentAlreadyAttached {
                    what: format!("{kind} node"),
                });
            }
        }

        // Entries that stay put: not replaced and not being moved.
        let stays = |(i, c): &(usize, &NodeId)| Some(*i) != replacing && !nodes.contains(c);
        let position = content[..index].iter().enumerate().filter(stays).count();

        if parent_type == NodeType::Document {
            let mut kinds: Vec<NodeType> = content
                .iter()
                .enumerate()
                .filter(stays)
                .map(|(_, &c)| self.node_type(c))
                .collect();
            kinds.splice(
                position..position,
                nodes.iter().map(|&node| self.node_type(node)),
            );
            let adds_doctype = nodes
                .iter()
                .any(|&node| self.node_type(node) == NodeType::DocumentType);
            check_document_order(&kinds, adds_doctype)?;
        }
        Ok(position)
    }
}

/// Content-type legality per container kind.
fn accepts(parent: NodeType, child: NodeType) -> bool {
    match child {
        NodeType::Document => false,
        NodeType::Element | NodeType::Comment | NodeType::ProcessingInstruction => true,
        NodeType::DocumentType => parent == NodeType::Document,
        NodeType::Text | NodeType::CData | NodeType::EntityRef => parent == NodeType::Element,
    }
}

/// Checks the document-level rules on the would-be document content: at
/// most one element, at most one doctype, and the doctype before the
/// element.
fn check_document_order(kinds: &[NodeType], adds_doctype: bool) -> Result<(), TreeError> {
    let mut element = None;
    let mut doctype = None;
    for (i, &kind) in kinds.iter().enumerate() {
        match kind {
            NodeType::Element => {
                if element.is_some() {
                    return Err(TreeError::IllegalAddition(
                        "a document can hold only one root element".to_string(),
                    ));
                }
                element = Some(i);
            }
            NodeType::DocumentType => {
                if doctype.is_some() {
                    return Err(TreeError::DuplicateDocType);
                }
                doctype = Some(i);
            }
            _ => {}
        }
    }
    match (doctype, element) {
        (Some(d), Some(e)) if d > e => Err(TreeError::MisplacedDocType(if adds_doctype {
            "a doctype cannot follow the root element"
        } else {
            "the root element cannot precede the doctype"
        })),
        _ => Ok(()),
    }
}
