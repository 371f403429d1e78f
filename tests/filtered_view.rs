//! Filtered views observed and edited alongside their backing lists.

#![allow(clippy::unwrap_used)]

use xmlgrove::filter::{ContentFilter, ElementFilter, Filter, FilteredView, Predicate};
use xmlgrove::tree::NodeType;
use xmlgrove::{Document, NodeId, TreeError};

#[test]
fn test_element_view_selects_by_identity() {
    let mut doc = Document::new();
    let list = doc.create_element("list");
    let a = doc.create_text("a");
    let b = doc.create_element("b");
    let c = doc.create_comment("c");
    doc.add_all(list, &[a, b, c]).unwrap();

    let view = FilteredView::new(list, ContentFilter::elements());
    assert_eq!(view.size(&doc), 1);
    assert_eq!(view.size(&doc), 1);
    assert_eq!(view.get(&doc, 0), Some(b));
}

#[test]
fn test_insert_through_view_lands_before_nth_match() {
    let mut doc = Document::new();
    let list = doc.create_element("list");
    let t1 = doc.create_text("1");
    let x = doc.create_element("x");
    let t2 = doc.create_text("2");
    let y = doc.create_element("y");
    doc.add_all(list, &[t1, x, t2, y]).unwrap();

    let view = doc.element_view(list);
    assert_eq!(view.size(&doc), 2);
    let z = doc.create_element("z");
    view.insert(&mut doc, 1, z).unwrap();

    assert_eq!(doc.content(list), &[t1, x, t2, z, y]);
    assert_eq!(doc.parent(z), Some(list));
}

#[test]
fn test_order_matches_backing_after_mixed_edits() {
    let mut doc = Document::new();
    let list = doc.create_element("list");
    let view = FilteredView::new(list, ContentFilter::elements());

    let mut expected: Vec<NodeId> = Vec::new();
    for i in 0..6 {
        let e = doc.create_element(&format!("e{i}"));
        let t = doc.create_text(&i.to_string());
        // Alternate between direct and view insertion.
        if i % 2 == 0 {
            doc.add_all(list, &[t, e]).unwrap();
        } else {
            view.add(&mut doc, e).unwrap();
            doc.insert_content(list, 0, t).unwrap();
        }
        expected.push(e);
    }
    view.remove_at(&mut doc, 2).unwrap();
    expected.remove(2);

    let from_backing: Vec<NodeId> = doc
        .content(list)
        .iter()
        .copied()
        .filter(|&n| doc.node_type(n) == NodeType::Element)
        .collect();
    assert_eq!(view.to_vec(&doc), from_backing);
    assert_eq!(view.to_vec(&doc), expected);
}

#[test]
fn test_clear_removes_every_match_once() {
    let mut doc = Document::new();
    let list = doc.create_element("list");
    let mut nodes = Vec::new();
    for i in 0..5 {
        nodes.push(doc.create_comment(&i.to_string()));
        nodes.push(doc.create_comment(&i.to_string()));
        nodes.push(doc.create_text(&i.to_string()));
    }
    doc.add_all(list, &nodes).unwrap();

    let comments = FilteredView::new(list, ContentFilter::comments());
    let removed = comments.clear(&mut doc);
    assert_eq!(removed.len(), 10);
    assert!(removed.iter().all(|&n| doc.parent(n).is_none()));
    assert_eq!(doc.content_size(list), 5);
    assert!(comments.is_empty(&doc));
}

#[test]
fn test_view_mutation_respects_document_rules() {
    let mut doc = Document::new();
    let root = doc.create_element("root");
    doc.add_content(doc.root(), root).unwrap();

    let elements = doc.element_view(doc.root());
    let second = doc.create_element("second");
    assert!(matches!(
        elements.add(&mut doc, second),
        Err(TreeError::IllegalAddition(_))
    ));

    let doctypes = FilteredView::new(doc.root(), ContentFilter::doc_types());
    let dt = doc.create_doc_type("root", None, None);
    assert!(matches!(
        doctypes.add(&mut doc, dt),
        Err(TreeError::MisplacedDocType(_))
    ));
    // Position 0 of an empty view maps to the end of the backing list too.
    assert!(doctypes.insert(&mut doc, 0, dt).is_err());
    doc.insert_content(doc.root(), 0, dt).unwrap();
    assert_eq!(doctypes.to_vec(&doc), vec![dt]);
}

#[test]
fn test_filter_rejection_reports_kind() {
    let mut doc = Document::new();
    let list = doc.create_element("list");
    let view = FilteredView::new(list, ElementFilter::named("item"));
    let other = doc.create_element("other");
    let pi = doc.create_processing_instruction("t", None);

    assert_eq!(
        view.add(&mut doc, other),
        Err(TreeError::FilterRejected {
            kind: NodeType::Element
        })
    );
    assert_eq!(
        view.add(&mut doc, pi),
        Err(TreeError::FilterRejected {
            kind: NodeType::ProcessingInstruction
        })
    );
    assert!(doc.content(list).is_empty());
}

#[test]
fn test_named_children_and_predicates() {
    let mut doc = Document::new();
    let catalog = doc.create_element("catalog");
    for (i, price) in ["10", "25", "40"].iter().enumerate() {
        let book = doc.create_element("book");
        doc.set_attribute_value(book, "id", &format!("b{i}")).unwrap();
        let p = doc.create_element("price");
        doc.set_text_content(p, price).unwrap();
        doc.add_content(book, p).unwrap();
        doc.add_content(catalog, book).unwrap();
    }
    let note = doc.create_element("note");
    doc.add_content(catalog, note).unwrap();

    let books = doc.children_named(catalog, "book", "");
    assert_eq!(books.size(&doc), 3);

    let cheap = Predicate(|doc: &Document, book| {
        doc.child_text(book, "price", "")
            .and_then(|p| p.parse::<u32>().ok())
            .is_some_and(|p| p < 30)
    });
    let cheap_books = FilteredView::new(catalog, books.filter().clone().and(cheap));
    let ids: Vec<&str> = cheap_books
        .iter(&doc)
        .filter_map(|b| doc.attribute(b, "id"))
        .collect();
    assert_eq!(ids, vec!["b0", "b1"]);

    let removed = cheap_books.clear(&mut doc);
    assert_eq!(removed.len(), 2);
    assert_eq!(books.size(&doc), 1);
    assert_eq!(doc.child(catalog, "note", ""), Some(note));
}

#[test]
fn test_multiple_views_over_one_list() {
    let mut doc = Document::new();
    let list = doc.create_element("list");
    let text = FilteredView::new(list, ContentFilter::text());
    let everything = FilteredView::new(list, ContentFilter::all());
    let not_text = FilteredView::new(list, ContentFilter::text().negate());

    let t = doc.create_text("t");
    let cd = doc.create_cdata("cd");
    let e = doc.create_element("e");
    text.add(&mut doc, t).unwrap();
    not_text.add(&mut doc, e).unwrap();
    text.insert(&mut doc, 1, cd).unwrap();

    assert_eq!(everything.to_vec(&doc), vec![t, e, cd]);
    assert_eq!(text.to_vec(&doc), vec![t, cd]);
    assert_eq!(not_text.to_vec(&doc), vec![e]);

    let u = doc.create_text("u");
    assert_eq!(text.set(&mut doc, 0, u), Ok(t));
    assert_eq!(everything.size(&doc), 3);
    assert_eq!(doc.parent(t), None);
}
