//! XML writer.
//!
//! Walks a finished tree through its content lists and produces markup
//! text. Only element content with no significant character data is
//! indented; mixed content is written exactly as stored.

use std::fmt::Write as _;

use crate::filter::{ContentFilter, Filter, FilteredView};
use crate::tree::{Document, NodeId, NodeKind, NodeType};
use crate::util::qname::join_qname;

/// Options controlling XML serialization output.
///
/// # Examples
///
/// ```
/// use xmlgrove::serial::{serialize_with_options, SerializeOptions};
/// use xmlgrove::Document;
///
/// let mut doc = Document::new();
/// let root = doc.create_element("root");
/// let child = doc.create_element("child");
/// doc.add_content(doc.root(), root).unwrap();
/// doc.add_content(root, child).unwrap();
///
/// let opts = SerializeOptions::default().indent(true).declaration(false);
/// assert_eq!(serialize_with_options(&doc, &opts), "<root>\n  <child/>\n</root>\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Whether to produce indented (pretty-printed) output.
    /// Defaults to `false`.
    pub indent: bool,
    /// The indentation string used for each level when `indent` is `true`.
    /// Defaults to two spaces.
    pub indent_str: String,
    /// Whether to write the `<?xml ...?>` declaration. Defaults to `true`.
    pub declaration: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            indent: false,
            indent_str: "  ".to_string(),
            declaration: true,
        }
    }
}

impl SerializeOptions {
    /// Enables or disables indented output.
    #[must_use]
    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the indentation string used for each nesting level.
    ///
    /// Only takes effect when [`indent`](Self::indent) is enabled.
    #[must_use]
    pub fn indent_str(mut self, s: &str) -> Self {
        self.indent_str = s.to_string();
        self
    }

    /// Enables or disables the XML declaration.
    #[must_use]
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

/// Serializes a document to an XML string with default options.
///
/// # Examples
///
/// ```
/// use xmlgrove::serial::serialize;
/// use xmlgrove::Document;
///
/// let mut doc = Document::new();
/// let root = doc.create_element("root");
/// doc.add_content(doc.root(), root).unwrap();
/// assert_eq!(serialize(&doc), "<?xml version=\"1.0\"?>\n<root/>\n");
/// ```
#[must_use]
pub fn serialize(doc: &Document) -> String {
    serialize_with_options(doc, &SerializeOptions::default())
}

/// Serializes a document to an XML string with the given options.
///
/// The declaration uses the document's `version` (default `1.0`),
/// `encoding` and `standalone` fields. Top-level nodes are written one per
/// line.
#[must_use]
pub fn serialize_with_options(doc: &Document, options: &SerializeOptions) -> String {
    let mut writer = XmlWriter::new(doc, options);
    if options.declaration {
        writer.declaration();
    }
    let top = doc.root();
    for index in 0..doc.content_size(top) {
        if let Some(child) = doc.content_at(top, index) {
            writer.node(child, 0, true);
            if !writer.out.ends_with('\n') {
                writer.out.push('\n');
            }
        }
    }
    writer.out
}

/// Serializes one node and its descendants, without a declaration.
///
/// # Examples
///
/// ```
/// use xmlgrove::serial::{serialize_node, SerializeOptions};
/// use xmlgrove::Document;
///
/// let mut doc = Document::new();
/// let p = doc.create_element("p");
/// let text = doc.create_text("a < b");
/// doc.add_content(p, text).unwrap();
/// assert_eq!(serialize_node(&doc, p, &SerializeOptions::default()), "<p>a &lt; b</p>");
/// ```
#[must_use]
pub fn serialize_node(doc: &Document, id: NodeId, options: &SerializeOptions) -> String {
    let mut writer = XmlWriter::new(doc, options);
    if let NodeKind::Document = doc.node(id).kind() {
        writer.content(id, 0, false);
    } else {
        writer.node(id, 0, false);
    }
    writer.out
}

/// Serializes a run of sibling or unrelated nodes in the given order, each
/// with its descendants, without a declaration.
///
/// Accepts any slice, so a filtered selection serializes through
/// [`FilteredView::to_vec`].
///
/// # Examples
///
/// ```
/// use xmlgrove::filter::{ContentFilter, Filter, FilteredView};
/// use xmlgrove::serial::{serialize_content, SerializeOptions};
/// use xmlgrove::Document;
///
/// let mut doc = Document::new();
/// let list = doc.create_element("list");
/// let a = doc.create_element("a");
/// let note = doc.create_comment("skip");
/// let b = doc.create_text("b & c");
/// doc.add_all(list, &[a, note, b]).unwrap();
///
/// let view = FilteredView::new(list, ContentFilter::comments().negate());
/// let opts = SerializeOptions::default();
/// assert_eq!(serialize_content(&doc, &view.to_vec(&doc), &opts), "<a/>b &amp; c");
/// ```
#[must_use]
pub fn serialize_content(doc: &Document, nodes: &[NodeId], options: &SerializeOptions) -> String {
    let mut writer = XmlWriter::new(doc, options);
    for &id in nodes {
        writer.node(id, 0, false);
    }
    writer.out
}

struct XmlWriter<'a> {
    doc: &'a Document,
    options: &'a SerializeOptions,
    out: String,
}

impl<'a> XmlWriter<'a> {
    fn new(doc: &'a Document, options: &'a SerializeOptions) -> Self {
        Self {
            doc,
            options,
            out: String::new(),
        }
    }

    fn declaration(&mut self) {
        let doc = self.doc;
        let version = doc.version.as_deref().unwrap_or("1.0");
        let _ = write!(self.out, "<?xml version=\"{version}\"");
        if let Some(encoding) = &doc.encoding {
            let _ = write!(self.out, " encoding=\"{encoding}\"");
        }
        if let Some(standalone) = doc.standalone {
            let flag = if standalone { "yes" } else { "no" };
            let _ = write!(self.out, " standalone=\"{flag}\"");
        }
        self.out.push_str("?>\n");
    }

    fn pad(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(&self.options.indent_str);
        }
    }

    /// Writes `id`. `pretty` is set when the parent is element-only content
    /// being indented, so the node sits on its own line.
    fn node(&mut self, id: NodeId, depth: usize, pretty: bool) {
        let doc = self.doc;
        let pretty = pretty && self.options.indent;
        match doc.node(id).kind() {
            NodeKind::Document => self.content(id, depth, false),
            NodeKind::Element { name, prefix, .. } => {
                let qname = join_qname(prefix.as_deref(), name);
                if pretty {
                    self.pad(depth);
                }
                self.out.push('<');
                self.out.push_str(&qname);
                for attr in doc.attributes(id) {
                    self.out.push(' ');
                    self.out.push_str(&attr.qualified_name());
                    self.out.push_str("=\"");
                    escape_attr(&mut self.out, &attr.value);
                    self.out.push('"');
                }
                if doc.content_size(id) == 0 {
                    self.out.push_str("/>");
                } else {
                    self.out.push('>');
                    let indent_children = self.options.indent && is_element_only(doc, id);
                    if indent_children {
                        self.out.push('\n');
                    }
                    self.content(id, depth + 1, indent_children);
                    if indent_children {
                        self.pad(depth);
                    }
                    self.out.push_str("</");
                    self.out.push_str(&qname);
                    self.out.push('>');
                }
                if pretty {
                    self.out.push('\n');
                }
            }
            NodeKind::Text { content } => escape_text(&mut self.out, content),
            NodeKind::CData { content } => {
                self.out.push_str("<![CDATA[");
                // A literal `]]>` ends one section and opens the next.
                self.out.push_str(&content.replace("]]>", "]]]]><![CDATA[>"));
                self.out.push_str("]]>");
            }
            NodeKind::Comment { content } => {
                if pretty {
                    self.pad(depth);
                }
                self.out.push_str("<!--");
                write_comment_text(&mut self.out, content);
                self.out.push_str("-->");
                if pretty {
                    self.out.push('\n');
                }
            }
            NodeKind::ProcessingInstruction { target, data } => {
                if pretty {
                    self.pad(depth);
                }
                self.out.push_str("<?");
                self.out.push_str(target);
                if let Some(data) = data {
                    self.out.push(' ');
                    self.out.push_str(data);
                }
                self.out.push_str("?>");
                if pretty {
                    self.out.push('\n');
                }
            }
            NodeKind::EntityRef { name, .. } => {
                let _ = write!(self.out, "&{name};");
            }
            NodeKind::DocumentType {
                name,
                public_id,
                system_id,
                internal_subset,
            } => {
                let _ = write!(self.out, "<!DOCTYPE {name}");
                match (public_id, system_id) {
                    (Some(public), system) => {
                        self.out.push_str(" PUBLIC ");
                        write_literal(&mut self.out, public);
                        if let Some(system) = system {
                            self.out.push(' ');
                            write_literal(&mut self.out, system);
                        }
                    }
                    (None, Some(system)) => {
                        self.out.push_str(" SYSTEM ");
                        write_literal(&mut self.out, system);
                    }
                    (None, None) => {}
                }
                if let Some(subset) = internal_subset {
                    let _ = write!(self.out, " [{subset}]");
                }
                self.out.push('>');
            }
        }
    }

    fn content(&mut self, parent: NodeId, depth: usize, pretty: bool) {
        let doc = self.doc;
        for index in 0..doc.content_size(parent) {
            let Some(child) = doc.content_at(parent, index) else {
                break;
            };
            if pretty && is_blank_text(doc, child) {
                continue;
            }
            self.node(child, depth, pretty);
        }
    }
}

/// `true` if the element has element children and no character content
/// other than whitespace.
fn is_element_only(doc: &Document, id: NodeId) -> bool {
    let elements = FilteredView::new(id, ContentFilter::elements());
    let characters = FilteredView::new(id, ContentFilter::text().with(NodeType::EntityRef));
    !elements.is_empty(doc)
        && characters
            .iter(doc)
            .all(|child| is_blank_text(doc, child))
}

fn is_blank_text(doc: &Document, id: NodeId) -> bool {
    ContentFilter::text_only().matches(doc, id)
        && doc
            .node_text(id)
            .is_some_and(|text| text.trim().is_empty())
}

/// Writes comment text with a space between any two adjacent hyphens and
/// after a trailing hyphen, since `--` may not occur inside a comment.
fn write_comment_text(out: &mut String, text: &str) {
    let mut last = None;
    for ch in text.chars() {
        if ch == '-' && last == Some('-') {
            out.push(' ');
        }
        out.push(ch);
        last = Some(ch);
    }
    if last == Some('-') {
        out.push(' ');
    }
}

/// Writes a public or system literal, quoted with `'` when the value holds
/// a `"`. A literal cannot escape its own quote character.
fn write_literal(out: &mut String, value: &str) {
    let quote = if value.contains('"') { '\'' } else { '"' };
    out.push(quote);
    out.push_str(value);
    out.push(quote);
}

fn write_char_ref(out: &mut String, ch: char) {
    let _ = write!(out, "&#x{:X};", u32::from(ch));
}

/// Escapes character data: `& < >` as entities, CR and other control
/// characters as character references.
fn escape_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            '\t' | '\n' => out.push(ch),
            c if u32::from(c) < 0x20 => write_char_ref(out, c),
            _ => out.push(ch),
        }
    }
}

/// Escapes an attribute value; whitespace other than space is written as a
/// character reference so it survives attribute-value normalization.
fn escape_attr(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c if u32::from(c) < 0x20 => write_char_ref(out, c),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tree::Attribute;

    fn with_root(name: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.create_element(name);
        doc.add_content(doc.root(), root).unwrap();
        (doc, root)
    }

    #[test]
    fn test_serialize_empty_element() {
        let (doc, _) = with_root("br");
        assert_eq!(serialize(&doc), "<?xml version=\"1.0\"?>\n<br/>\n");
    }

    #[test]
    fn test_serialize_element_with_text() {
        let (mut doc, p) = with_root("p");
        let text = doc.create_text("Hello");
        doc.add_content(p, text).unwrap();
        assert_eq!(serialize(&doc), "<?xml version=\"1.0\"?>\n<p>Hello</p>\n");
    }

    #[test]
    fn test_serialize_attributes_in_order() {
        let (mut doc, div) = with_root("div");
        doc.set_attribute_value(div, "id", "main").unwrap();
        doc.set_attribute_value(div, "class", "big").unwrap();
        let xlink = doc.create_attribute(Attribute::with_namespace(
            "xlink:href",
            "#a",
            "http://www.w3.org/1999/xlink",
        ));
        doc.set_attribute(div, xlink).unwrap();
        assert_eq!(
            serialize(&doc),
            "<?xml version=\"1.0\"?>\n<div id=\"main\" class=\"big\" xlink:href=\"#a\"/>\n"
        );
    }

    #[test]
    fn test_serialize_escaping() {
        let (mut doc, p) = with_root("p");
        let text = doc.create_text("a < b & c > d\u{1}");
        doc.add_content(p, text).unwrap();
        assert_eq!(
            serialize_node(&doc, p, &SerializeOptions::default()),
            "<p>a &lt; b &amp; c &gt; d&#x1;</p>"
        );
    }

    #[test]
    fn test_serialize_attr_escaping() {
        let (mut doc, a) = with_root("a");
        doc.set_attribute_value(a, "title", "He said \"hi\" & <bye>\n")
            .unwrap();
        assert_eq!(
            serialize_node(&doc, a, &SerializeOptions::default()),
            "<a title=\"He said &quot;hi&quot; &amp; &lt;bye&gt;&#10;\"/>"
        );
    }

    #[test]
    fn test_serialize_prolog() {
        let mut doc = Document::new();
        doc.encoding = Some("UTF-8".to_string());
        doc.standalone = Some(true);
        let dt = doc.create_doc_type("html", Some("-//W3C//DTD XHTML 1.0//EN"), Some("x.dtd"));
        let pi = doc.create_processing_instruction("xml-stylesheet", Some("href=\"s.css\""));
        let c = doc.create_comment(" note ");
        let root = doc.create_element("html");
        doc.add_all(doc.root(), &[dt, pi, c, root]).unwrap();
        assert_eq!(
            serialize(&doc),
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\" \"x.dtd\">\n\
             <?xml-stylesheet href=\"s.css\"?>\n\
             <!-- note -->\n\
             <html/>\n"
        );
    }

    #[test]
    fn test_serialize_cdata_and_entity_ref() {
        let (mut doc, s) = with_root("s");
        let cdata = doc.create_cdata("x < 1 && y");
        let amp = doc.create_entity_ref("nbsp");
        doc.add_all(s, &[cdata, amp]).unwrap();
        assert_eq!(
            serialize_node(&doc, s, &SerializeOptions::default()),
            "<s><![CDATA[x < 1 && y]]>&nbsp;</s>"
        );
    }

    #[test]
    fn test_cdata_with_terminator_is_split() {
        let (mut doc, s) = with_root("s");
        let cdata = doc.create_cdata("a]]>b");
        doc.add_content(s, cdata).unwrap();
        assert_eq!(
            serialize_node(&doc, s, &SerializeOptions::default()),
            "<s><![CDATA[a]]]]><![CDATA[>b]]></s>"
        );
    }

    #[test]
    fn test_comment_hyphens_are_spaced() {
        let mut doc = Document::new();
        let c = doc.create_comment("a--b---c-");
        assert_eq!(
            serialize_node(&doc, c, &SerializeOptions::default()),
            "<!--a- -b- - -c- -->"
        );
        let plain = doc.create_comment(" a-b ");
        assert_eq!(
            serialize_node(&doc, plain, &SerializeOptions::default()),
            "<!-- a-b -->"
        );
    }

    #[test]
    fn test_doctype_literal_quoting() {
        let mut doc = Document::new();
        let dt = doc.create_doc_type("d", Some("-//A \"B\"//EN"), Some("say \"hi\".dtd"));
        assert_eq!(
            serialize_node(&doc, dt, &SerializeOptions::default()),
            "<!DOCTYPE d PUBLIC '-//A \"B\"//EN' 'say \"hi\".dtd'>"
        );
        let system_only = doc.create_doc_type("d", None, Some("it's.dtd"));
        assert_eq!(
            serialize_node(&doc, system_only, &SerializeOptions::default()),
            "<!DOCTYPE d SYSTEM \"it's.dtd\">"
        );
    }

    #[test]
    fn test_serialize_content_slice() {
        let (mut doc, root) = with_root("root");
        let a = doc.create_element("a");
        let t = doc.create_text("x<y");
        let c = doc.create_comment("c");
        let b = doc.create_element("b");
        doc.add_all(root, &[a, t, c, b]).unwrap();
        let opts = SerializeOptions::default();

        let elements = FilteredView::new(root, ContentFilter::elements());
        assert_eq!(
            serialize_content(&doc, &elements.to_vec(&doc), &opts),
            "<a/><b/>"
        );
        assert_eq!(serialize_content(&doc, &[c, t], &opts), "<!--c-->x&lt;y");
        assert_eq!(serialize_content(&doc, &[], &opts), "");
    }

    #[test]
    fn test_pretty_print_element_only() {
        let (mut doc, root) = with_root("root");
        let child = doc.create_element("child");
        let inner = doc.create_element("inner");
        let text = doc.create_text("text");
        let ws = doc.create_text("\n   ");
        doc.add_all(root, &[ws, child]).unwrap();
        doc.add_content(child, inner).unwrap();
        doc.add_content(inner, text).unwrap();
        let opts = SerializeOptions::default().indent(true);
        assert_eq!(
            serialize_with_options(&doc, &opts),
            "<?xml version=\"1.0\"?>\n<root>\n  <child>\n    <inner>text</inner>\n  </child>\n</root>\n"
        );
    }

    #[test]
    fn test_pretty_print_keeps_mixed_content() {
        let (mut doc, root) = with_root("root");
        let p = doc.create_element("p");
        let hello = doc.create_text("Hello ");
        let b = doc.create_element("b");
        doc.add_content(root, p).unwrap();
        doc.add_all(p, &[hello, b]).unwrap();
        let opts = SerializeOptions::default().indent(true).indent_str("\t");
        let xml = serialize_with_options(&doc, &opts);
        assert!(xml.contains("\t<p>Hello <b/></p>\n"));
    }

    #[test]
    fn test_serialize_without_declaration() {
        let (doc, _) = with_root("r");
        let opts = SerializeOptions::default().declaration(false);
        assert_eq!(serialize_with_options(&doc, &opts), "<r/>\n");
    }
}
