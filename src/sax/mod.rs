//! Event-driven tree construction and replay.
//!
//! A markup parser reports a document as a stream of events: start and end
//! tags, character data, comments and so on. [`SaxHandler`] is the callback
//! trait for that stream. [`TreeBuilder`] implements it by turning every
//! event into an ordinary content-list insert against the currently open
//! container, so a malformed event sequence fails with the same
//! [`TreeError`] kinds that programmatic misuse produces.
//!
//! [`emit_events`] goes the other way and replays a finished tree as events.
//!
//! # Examples
//!
//! ```
//! use xmlgrove::sax::{SaxHandler, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! builder.start_document();
//! builder.start_element("root", None, None, &[]);
//! builder.characters("hello, ");
//! builder.characters("world");
//! builder.end_element("root", None, None);
//! builder.end_document();
//!
//! let doc = builder.finish().unwrap();
//! let root = doc.root_element().unwrap();
//! assert_eq!(doc.content_size(root), 1);
//! assert_eq!(doc.text_content(root), "hello, world");
//! ```

use tracing::debug;

use crate::error::{BuildError, TreeError};
use crate::tree::{Attribute, Document, NodeId, NodeKind, TreeOptions};
use crate::util::qname::join_qname;

/// An attribute as carried by [`SaxHandler::start_element`]:
/// `(local_name, value, prefix, namespace_uri)`.
pub type SaxAttribute = (String, String, Option<String>, Option<String>);

/// A document event handler.
///
/// Implement the callbacks you care about; all methods have default no-op
/// implementations so you only need to override what you need.
///
/// # Attribute tuples
///
/// Attributes are passed as `(local_name, value, prefix, namespace_uri)` tuples.
#[allow(unused_variables)]
pub trait SaxHandler {
    /// Called at the start of the document, before any other events.
    fn start_document(&mut self) {}

    /// Called at the end of the document, after all other events.
    fn end_document(&mut self) {}

    /// Called for a document type declaration.
    fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        internal_subset: Option<&str>,
    ) {
    }

    /// Called when an element start tag is encountered.
    fn start_element(
        &mut self,
        local_name: &str,
        prefix: Option<&str>,
        namespace: Option<&str>,
        attributes: &[SaxAttribute],
    ) {
    }

    /// Called when an element end tag is encountered (or a self-closing tag ends).
    fn end_element(&mut self, local_name: &str, prefix: Option<&str>, namespace: Option<&str>) {}

    /// Called for character data. One run of text may arrive in several
    /// chunks.
    fn characters(&mut self, content: &str) {}

    /// Called for CDATA sections.
    fn cdata(&mut self, content: &str) {}

    /// Called for comments.
    fn comment(&mut self, content: &str) {}

    /// Called for processing instructions.
    fn processing_instruction(&mut self, target: &str, data: Option<&str>) {}

    /// Called for an entity reference left unexpanded.
    fn entity_reference(&mut self, name: &str) {}
}

/// A default no-op handler. Useful as a base or for testing.
pub struct DefaultHandler;

impl SaxHandler for DefaultHandler {}

/// Options for [`TreeBuilder`].
///
/// # Examples
///
/// ```
/// use xmlgrove::sax::BuildOptions;
///
/// let opts = BuildOptions::default().ignore_whitespace(true).max_depth(64);
/// assert!(opts.ignore_whitespace);
/// assert_eq!(opts.max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Drop text runs that consist only of whitespace.
    pub ignore_whitespace: bool,
    /// Maximum element nesting depth (default: 256).
    pub max_depth: usize,
    /// Options for the document being built.
    pub tree: TreeOptions,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace: false,
            max_depth: 256,
            tree: TreeOptions::default(),
        }
    }
}

impl BuildOptions {
    /// Sets whether whitespace-only text is dropped.
    #[must_use]
    pub fn ignore_whitespace(mut self, yes: bool) -> Self {
        self.ignore_whitespace = yes;
        self
    }

    /// Sets the maximum element nesting depth.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the options of the document being built.
    #[must_use]
    pub fn tree_options(mut self, tree: TreeOptions) -> Self {
        self.tree = tree;
        self
    }
}

/// Builds a [`Document`] from handler events.
///
/// Adjacent `characters` events are coalesced into one text node. The first
/// failure is recorded and every later event is ignored; [`finish`] reports
/// it. Whitespace-only text outside the root element is dropped, since the
/// document's content list cannot hold text.
///
/// [`finish`]: TreeBuilder::finish
#[derive(Debug)]
pub struct TreeBuilder {
    doc: Document,
    options: BuildOptions,
    /// Open elements, innermost last.
    open: Vec<NodeId>,
    pending_text: String,
    error: Option<BuildError>,
}

impl TreeBuilder {
    /// Creates a builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BuildOptions::default())
    }

    /// Creates a builder with the given options.
    #[must_use]
    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            doc: Document::with_options(options.tree.clone()),
            options,
            open: Vec::new(),
            pending_text: String::new(),
            error: None,
        }
    }

    /// Returns the document built so far.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Returns the first failure, if one has been recorded.
    #[must_use]
    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// Completes construction and returns the document.
    ///
    /// # Errors
    ///
    /// Returns the first failure recorded while handling events, or
    /// `Unclosed` if elements are still open.
    pub fn finish(mut self) -> Result<Document, BuildError> {
        self.flush_text();
        if self.error.is_none() && !self.open.is_empty() {
            self.fail(BuildError::Unclosed(self.open.len()));
        }
        match self.error {
            Some(err) => Err(err),
            None => {
                debug!(nodes = self.doc.node_count(), "tree build finished");
                Ok(self.doc)
            }
        }
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(self.doc.root())
    }

    fn failed(&self) -> bool {
        self.error.is_some()
    }

    fn fail(&mut self, err: BuildError) {
        if self.error.is_none() {
            debug!(error = %err, depth = self.open.len(), "tree build failed");
            self.error = Some(err);
        }
    }

    /// Inserts `node` at the end of the open container, recording failure.
    fn append(&mut self, node: NodeId) -> bool {
        let parent = self.current();
        match self.doc.add_content(parent, node) {
            Ok(()) => true,
            Err(err) => {
                self.fail(err.into());
                false
            }
        }
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() || self.failed() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        let blank = text.chars().all(char::is_whitespace);
        if blank && (self.options.ignore_whitespace || self.open.is_empty()) {
            return;
        }
        let node = self.doc.create_text(&text);
        self.append(node);
    }

    fn attach_attributes(
        &mut self,
        element: NodeId,
        attributes: &[SaxAttribute],
    ) -> Result<(), TreeError> {
        for (name, value, prefix, namespace) in attributes {
            let attr = self.doc.create_attribute(Attribute {
                name: name.clone(),
                value: value.clone(),
                prefix: prefix.clone().filter(|p| !p.is_empty()),
                namespace: namespace.clone().filter(|ns| !ns.is_empty()),
            });
            self.doc.append_attribute(element, attr)?;
        }
        Ok(())
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SaxHandler for TreeBuilder {
    fn end_document(&mut self) {
        self.flush_text();
    }

    fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        internal_subset: Option<&str>,
    ) {
        self.flush_text();
        if self.failed() {
            return;
        }
        let node = self.doc.create_doc_type(name, public_id, system_id);
        self.doc.set_internal_subset(node, internal_subset);
        self.append(node);
    }

    fn start_element(
        &mut self,
        local_name: &str,
        prefix: Option<&str>,
        namespace: Option<&str>,
        attributes: &[SaxAttribute],
    ) {
        self.flush_text();
        if self.failed() {
            return;
        }
        if self.open.len() >= self.options.max_depth {
            self.fail(BuildError::DepthLimit(self.options.max_depth));
            return;
        }
        let qname = join_qname(prefix, local_name);
        let element = self
            .doc
            .create_element_ns(&qname, namespace.unwrap_or_default());
        if let Err(err) = self.attach_attributes(element, attributes) {
            self.fail(err.into());
            return;
        }
        if self.append(element) {
            self.open.push(element);
        }
    }

    fn end_element(&mut self, local_name: &str, prefix: Option<&str>, namespace: Option<&str>) {
        self.flush_text();
        if self.failed() {
            return;
        }
        let Some(element) = self.open.pop() else {
            self.fail(BuildError::UnexpectedEnd(local_name.to_string()));
            return;
        };
        let doc = &self.doc;
        let namespace = namespace.filter(|uri| !uri.is_empty());
        let matches = doc.node_name(element) == Some(local_name)
            && doc.node_prefix(element) == prefix.filter(|p| !p.is_empty())
            && doc.node_namespace(element) == namespace;
        if !matches {
            let err = BuildError::MismatchedEnd {
                expected: tag_label(
                    &doc.qualified_name(element).unwrap_or_default(),
                    doc.node_namespace(element),
                ),
                found: tag_label(&join_qname(prefix, local_name), namespace),
            };
            self.fail(err);
        }
    }

    fn characters(&mut self, content: &str) {
        if !self.failed() {
            self.pending_text.push_str(content);
        }
    }

    fn cdata(&mut self, content: &str) {
        self.flush_text();
        if !self.failed() {
            let node = self.doc.create_cdata(content);
            self.append(node);
        }
    }

    fn comment(&mut self, content: &str) {
        self.flush_text();
        if !self.failed() {
            let node = self.doc.create_comment(content);
            self.append(node);
        }
    }

    fn processing_instruction(&mut self, target: &str, data: Option<&str>) {
        self.flush_text();
        if !self.failed() {
            let node = self.doc.create_processing_instruction(target, data);
            self.append(node);
        }
    }

    fn entity_reference(&mut self, name: &str) {
        self.flush_text();
        if !self.failed() {
            let node = self.doc.create_entity_ref(name);
            self.append(node);
        }
    }
}

/// Replays a finished tree as handler events, in document order.
///
/// Only the content-list reads `content_size` and `content_at` are used to
/// walk the tree.
///
/// # Examples
///
/// ```
/// use xmlgrove::sax::{emit_events, TreeBuilder};
/// use xmlgrove::Document;
///
/// let mut doc = Document::new();
/// let root = doc.create_element("root");
/// doc.add_content(doc.root(), root).unwrap();
/// doc.set_attribute_value(root, "id", "1").unwrap();
///
/// let mut builder = TreeBuilder::new();
/// emit_events(&doc, &mut builder);
/// let copy = builder.finish().unwrap();
/// assert_eq!(copy.attribute(copy.root_element().unwrap(), "id"), Some("1"));
/// ```
pub fn emit_events(doc: &Document, handler: &mut dyn SaxHandler) {
    handler.start_document();
    emit_content(doc, doc.root(), handler);
    handler.end_document();
}

/// Names an end-tag mismatch side as `{uri}prefix:local`, or just the
/// qualified name outside any namespace.
fn tag_label(qname: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(uri) => format!("{{{uri}}}{qname}"),
        None => qname.to_string(),
    }
}

fn emit_content(doc: &Document, parent: NodeId, handler: &mut dyn SaxHandler) {
    for index in 0..doc.content_size(parent) {
        if let Some(child) = doc.content_at(parent, index) {
            emit_node(doc, child, handler);
        }
    }
}

fn emit_node(doc: &Document, id: NodeId, handler: &mut dyn SaxHandler) {
    match doc.node(id).kind() {
        NodeKind::Document => emit_content(doc, id, handler),
        NodeKind::Element {
            name,
            prefix,
            namespace,
        } => {
            let attributes: Vec<SaxAttribute> = doc
                .attributes(id)
                .map(|a| {
                    (
                        a.name.clone(),
                        a.value.clone(),
                        a.prefix.clone(),
                        a.namespace.clone(),
                    )
                })
                .collect();
            handler.start_element(name, prefix.as_deref(), namespace.as_deref(), &attributes);
            emit_content(doc, id, handler);
            handler.end_element(name, prefix.as_deref(), namespace.as_deref());
        }
        NodeKind::Text { content } => handler.characters(content),
        NodeKind::CData { content } => handler.cdata(content),
        NodeKind::Comment { content } => handler.comment(content),
        NodeKind::ProcessingInstruction { target, data } => {
            handler.processing_instruction(target, data.as_deref());
        }
        NodeKind::EntityRef { name, .. } => handler.entity_reference(name),
        NodeKind::DocumentType {
            name,
            public_id,
            system_id,
            internal_subset,
        } => handler.doctype(
            name,
            public_id.as_deref(),
            system_id.as_deref(),
            internal_subset.as_deref(),
        ),
    }
}
