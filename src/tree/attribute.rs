//! Element attribute sets.
//!
//! Attributes live in their own arena and are addressed by `AttrId`. Each
//! element keeps its attribute ids in insertion order, unique on the key
//! (local name, namespace URI). An attribute belongs to at most one element
//! at a time; like node content, the owner link is written only here.

use std::num::NonZeroU32;

use tracing::trace;

use super::{AttachPolicy, Document, NodeId, NodeType};
use crate::error::TreeError;
use crate::util::qname::{join_qname, namespace_from_uri, split_qname};

/// A typed index into the document's attribute arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct AttrId(NonZeroU32);

impl AttrId {
    #[allow(clippy::expect_used, clippy::cast_possible_truncation)]
    fn from_index(index: usize) -> Self {
        Self(NonZeroU32::new(index as u32).expect("AttrId index must be non-zero"))
    }

    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name (the local part, e.g., `"lang"` for `xml:lang`).
    pub name: String,
    /// The attribute value.
    pub value: String,
    /// Namespace prefix, if any (e.g., `"xml"` for `xml:lang`).
    pub prefix: Option<String>,
    /// Namespace URI, if any.
    pub namespace: Option<String>,
}

impl Attribute {
    /// Creates an attribute in no namespace.
    #[must_use]
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            prefix: None,
            namespace: None,
        }
    }

    /// Creates an attribute from a qualified name and a namespace URI.
    ///
    /// An empty `namespace` means no namespace.
    #[must_use]
    pub fn with_namespace(qname: &str, value: &str, namespace: &str) -> Self {
        let (prefix, local) = split_qname(qname);
        Self {
            name: local.to_string(),
            value: value.to_string(),
            prefix: prefix.map(str::to_string),
            namespace: namespace_from_uri(namespace),
        }
    }

    /// The namespace URI, with `""` standing for no namespace.
    #[must_use]
    pub fn namespace_uri(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    /// Returns `prefix:name`, or the bare name when unprefixed.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        join_qname(self.prefix.as_deref(), &self.name).into_owned()
    }

    fn has_key(&self, name: &str, namespace: &str) -> bool {
        self.name == name && self.namespace_uri() == namespace
    }
}

/// Arena slot for one attribute.
#[derive(Debug, Clone)]
pub(super) struct AttrData {
    attr: Attribute,
    parent: Option<NodeId>,
}

impl AttrData {
    pub(super) fn placeholder() -> Self {
        Self {
            attr: Attribute::new("", ""),
            parent: None,
        }
    }
}

impl Document {
    /// Allocates a detached attribute.
    pub fn create_attribute(&mut self, attr: Attribute) -> AttrId {
        let index = self.attrs.len();
        self.attrs.push(AttrData { attr, parent: None });
        AttrId::from_index(index)
    }

    /// Returns the attribute stored under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a valid attribute.
    #[must_use]
    pub fn attribute_data(&self, id: AttrId) -> &Attribute {
        &self.attrs[id.as_index()].attr
    }

    /// Returns the element currently holding the attribute.
    #[must_use]
    pub fn attribute_parent(&self, id: AttrId) -> Option<NodeId> {
        self.attrs[id.as_index()].parent
    }

    /// Replaces the value of an attribute, attached or not.
    pub fn set_attribute_data_value(&mut self, id: AttrId, value: &str) {
        value.clone_into(&mut self.attrs[id.as_index()].attr.value);
    }

    /// Returns the attribute ids of an element in insertion order.
    ///
    /// Returns an empty slice for non-element nodes.
    #[must_use]
    pub fn attribute_ids(&self, element: NodeId) -> &[AttrId] {
        &self.node(element).attributes
    }

    /// Returns an iterator over the attributes of an element.
    pub fn attributes(&self, element: NodeId) -> impl Iterator<Item = &Attribute> + '_ {
        self.attribute_ids(element)
            .iter()
            .map(|&id| self.attribute_data(id))
    }

    /// Returns the value of a no-namespace attribute by name.
    #[must_use]
    pub fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.attribute_ns(element, name, "")
    }

    /// Returns the value of an attribute by local name and namespace URI.
    #[must_use]
    pub fn attribute_ns(&self, element: NodeId, name: &str, namespace: &str) -> Option<&str> {
        self.attribute_node(element, name, namespace)
            .map(|id| self.attribute_data(id).value.as_str())
    }

    /// Looks up an attribute id by local name and namespace URI (`""` for
    /// no namespace).
    #[must_use]
    pub fn attribute_node(&self, element: NodeId, name: &str, namespace: &str) -> Option<AttrId> {
        self.attribute_ids(element)
            .iter()
            .copied()
            .find(|&id| self.attribute_data(id).has_key(name, namespace))
    }

    /// Attaches `attr` to `element`, replacing any attribute with the same
    /// key. The replaced attribute is returned, detached, and `attr` takes
    /// its place in iteration order; otherwise `attr` is appended.
    ///
    /// # Errors
    ///
    /// - `IllegalAddition` if `element` is not an element.
    /// - `ContentAlreadyAttached` if `attr` belongs to another element and
    ///   `element` requires detached content.
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        attr: AttrId,
    ) -> Result<Option<AttrId>, TreeError> {
        self.check_attach_attribute(element, attr)?;
        if self.attribute_parent(attr) == Some(element) {
            return Ok(None);
        }
        let key = self.attribute_data(attr);
        let existing = self.attribute_node(element, &key.name, key.namespace_uri());
        self.release_attribute(attr);
        match existing {
            Some(old) => {
                if let Some(slot) = self
                    .node_mut(element)
                    .attributes
                    .iter_mut()
                    .find(|slot| **slot == old)
                {
                    *slot = attr;
                }
                self.attrs[old.as_index()].parent = None;
                self.attrs[attr.as_index()].parent = Some(element);
                trace!(?element, ?attr, replaced = ?old, "attribute replaced");
                Ok(Some(old))
            }
            None => {
                self.link_attribute(element, attr);
                Ok(None)
            }
        }
    }

    /// Sets a no-namespace attribute by name, updating the value in place
    /// when it already exists. Returns the attribute id.
    ///
    /// # Errors
    ///
    /// Returns `IllegalAddition` if `element` is not an element.
    pub fn set_attribute_value(
        &mut self,
        element: NodeId,
        name: &str,
        value: &str,
    ) -> Result<AttrId, TreeError> {
        check_element(self.node_type(element))?;
        if let Some(id) = self.attribute_node(element, name, "") {
            self.set_attribute_data_value(id, value);
            return Ok(id);
        }
        let id = self.create_attribute(Attribute::new(name, value));
        self.link_attribute(element, id);
        Ok(id)
    }

    /// Appends `attr` without replacing anything.
    ///
    /// # Errors
    ///
    /// - `DuplicateAttribute` if an attribute with the same key is present.
    /// - Otherwise as [`set_attribute`](Self::set_attribute).
    pub fn append_attribute(&mut self, element: NodeId, attr: AttrId) -> Result<(), TreeError> {
        self.check_attach_attribute(element, attr)?;
        let data = self.attribute_data(attr);
        if self.attribute_node(element, &data.name, data.namespace_uri()).is_some() {
            return Err(TreeError::DuplicateAttribute {
                name: data.name.clone(),
                namespace: data.namespace_uri().to_string(),
            });
        }
        self.release_attribute(attr);
        self.link_attribute(element, attr);
        Ok(())
    }

    /// Removes the attribute with the given key and returns it, detached.
    pub fn remove_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        namespace: &str,
    ) -> Option<AttrId> {
        let id = self.attribute_node(element, name, namespace)?;
        self.release_attribute(id);
        Some(id)
    }

    /// Detaches an attribute from its element and returns the former owner.
    pub fn detach_attribute(&mut self, attr: AttrId) -> Option<NodeId> {
        self.release_attribute(attr)
    }

    /// Appends without validation; the caller guarantees `attr` is detached
    /// and its key is free on `element`.
    pub(super) fn link_attribute(&mut self, element: NodeId, attr: AttrId) {
        self.node_mut(element).attributes.push(attr);
        self.attrs[attr.as_index()].parent = Some(element);
        trace!(?element, ?attr, "attribute attached");
    }

    fn release_attribute(&mut self, attr: AttrId) -> Option<NodeId> {
        let element = self.attrs[attr.as_index()].parent.take()?;
        self.node_mut(element).attributes.retain(|&id| id != attr);
        trace!(?element, ?attr, "attribute detached");
        Some(element)
    }

    fn check_attach_attribute(&self, element: NodeId, attr: AttrId) -> Result<(), TreeError> {
        check_element(self.node_type(element))?;
        let owner = self.attribute_parent(attr);
        if owner.is_some_and(|owner| owner != element)
            && self.attach_policy(element) == AttachPolicy::RequireDetached
        {
            return Err(TreeError::ContentAlreadyAttached {
                what: format!("attribute {:?}", self.attribute_data(attr).qualified_name()),
            });
        }
        Ok(())
    }
}

fn check_element(kind: NodeType) -> Result<(), TreeError> {
    if kind == NodeType::Element {
        Ok(())
    } else {
        Err(TreeError::IllegalAddition(format!(
            "a {kind} node cannot hold attributes"
        )))
    }
}
