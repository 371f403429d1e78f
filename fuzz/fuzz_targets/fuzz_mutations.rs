#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlgrove::filter::{ContentFilter, FilteredView};
use xmlgrove::tree::NodeType;
use xmlgrove::{Document, NodeId};

/// Every attached node is listed exactly once by its parent, and every
/// listed node points back at the list's owner.
fn check_invariants(doc: &Document, nodes: &[NodeId]) {
    for &node in nodes {
        if let Some(parent) = doc.parent(node) {
            let held = doc.content(parent).iter().filter(|&&c| c == node).count();
            assert_eq!(held, 1);
            assert!(!doc.is_ancestor_of(node, parent));
        }
        for &child in doc.content(node) {
            assert_eq!(doc.parent(child), Some(node));
        }
    }
    let top = doc.content(doc.root());
    let roots = top.iter().filter(|&&c| doc.node_type(c) == NodeType::Element).count();
    assert!(roots <= 1);
    let doctypes: Vec<usize> = top
        .iter()
        .enumerate()
        .filter(|&(_, &c)| doc.node_type(c) == NodeType::DocumentType)
        .map(|(i, _)| i)
        .collect();
    assert!(doctypes.len() <= 1);
    if let (Some(&dt), Ok(root)) = (doctypes.first(), doc.root_element()) {
        assert!(Some(dt) < doc.content_index(doc.root(), root));
    }
}

fuzz_target!(|data: &[u8]| {
    let mut doc = Document::new();
    let mut nodes = vec![doc.root()];
    for chunk in data.chunks(3) {
        let [op, a, b] = match *chunk {
            [op, a, b] => [op, a, b],
            _ => break,
        };
        let pick = |n: u8| nodes[usize::from(n) % nodes.len()];
        let (target, node) = (pick(a), pick(b));
        let index = usize::from(b) % (doc.content_size(target) + 1);
        let before = doc.content(target).to_vec();
        let created = match op % 10 {
            0 => Some(doc.create_element("e")),
            1 => Some(doc.create_text("t")),
            2 => Some(doc.create_doc_type("e", None, None)),
            3 => Some(doc.create_comment("c")),
            _ => None,
        };
        if let Some(created) = created {
            nodes.push(created);
            continue;
        }
        let result = match op % 10 {
            4 => doc.insert_content(target, index, node),
            5 => doc.set_content(target, index, node).map(|_| ()),
            6 => doc.remove_content_at(target, index).map(|_| ()),
            7 => {
                doc.detach(node);
                Ok(())
            }
            8 => FilteredView::new(target, ContentFilter::elements()).insert(
                &mut doc,
                usize::from(a) % 4,
                node,
            ),
            _ => {
                FilteredView::new(target, ContentFilter::text()).clear(&mut doc);
                Ok(())
            }
        };
        if result.is_err() {
            assert_eq!(doc.content(target), before.as_slice());
        }
        check_invariants(&doc, &nodes);
    }
});
