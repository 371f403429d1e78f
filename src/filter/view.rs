//! Live filtered views.

use super::Filter;
use crate::error::TreeError;
use crate::tree::{Document, NodeId};

/// A live, order-preserving projection of one container's content list.
///
/// The view stores only the container id and the filter. Every call scans
/// the backing list as it is at that moment, so views never go stale: any
/// number of them can be kept over the same container while the list is
/// edited directly or through another view.
///
/// View positions count matching entries only. Mutations are translated to
/// backing positions and delegated to the content list, which performs its
/// usual validation.
///
/// # Examples
///
/// ```
/// use xmlgrove::filter::{ContentFilter, FilteredView};
/// use xmlgrove::Document;
///
/// let mut doc = Document::new();
/// let list = doc.create_element("list");
/// let t1 = doc.create_text("1");
/// let x = doc.create_element("x");
/// let t2 = doc.create_text("2");
/// let y = doc.create_element("y");
/// doc.add_all(list, &[t1, x, t2, y]).unwrap();
///
/// let elements = FilteredView::new(list, ContentFilter::elements());
/// let z = doc.create_element("z");
/// elements.insert(&mut doc, 1, z).unwrap();
///
/// assert_eq!(doc.content(list), &[t1, x, t2, z, y]);
/// assert_eq!(elements.to_vec(&doc), vec![x, z, y]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView<F> {
    parent: NodeId,
    filter: F,
}

impl<F: Filter> FilteredView<F> {
    /// Creates a view of `parent`'s content list.
    #[must_use]
    pub fn new(parent: NodeId, filter: F) -> Self {
        Self { parent, filter }
    }

    /// The container whose content list backs this view.
    #[must_use]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// The filter selecting the view's entries.
    #[must_use]
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Returns the number of matching entries.
    #[must_use]
    pub fn size(&self, doc: &Document) -> usize {
        self.iter(doc).count()
    }

    /// Returns `true` if no entry matches.
    #[must_use]
    pub fn is_empty(&self, doc: &Document) -> bool {
        self.iter(doc).next().is_none()
    }

    /// Returns the matching entry at view position `index`.
    #[must_use]
    pub fn get(&self, doc: &Document, index: usize) -> Option<NodeId> {
        self.iter(doc).nth(index)
    }

    /// Returns the view position of `node`, or `None` if it is not in the
    /// backing list or does not match.
    #[must_use]
    pub fn index_of(&self, doc: &Document, node: NodeId) -> Option<usize> {
        self.iter(doc).position(|n| n == node)
    }

    /// Returns `true` if `node` is one of the view's entries.
    #[must_use]
    pub fn contains(&self, doc: &Document, node: NodeId) -> bool {
        doc.parent(node) == Some(self.parent) && self.filter.matches(doc, node)
    }

    /// Iterates over the matching entries in backing order.
    pub fn iter<'a>(&'a self, doc: &'a Document) -> ViewIter<'a, F> {
        ViewIter {
            doc,
            filter: &self.filter,
            inner: doc.content(self.parent).iter(),
        }
    }

    /// Collects the matching entries.
    #[must_use]
    pub fn to_vec(&self, doc: &Document) -> Vec<NodeId> {
        self.iter(doc).collect()
    }

    /// Inserts `node` so that it becomes the entry at view position `index`.
    ///
    /// The node lands immediately before the backing entry that currently
    /// holds view position `index`, or at the end of the backing list when
    /// `index == size`.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `index > size`.
    /// - `FilterRejected` if `node` does not match the filter.
    /// - Any error of [`Document::insert_content`].
    pub fn insert(&self, doc: &mut Document, index: usize, node: NodeId) -> Result<(), TreeError> {
        self.insert_all(doc, index, &[node])
    }

    /// Appends `node` after the last backing entry.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn add(&self, doc: &mut Document, node: NodeId) -> Result<(), TreeError> {
        let size = self.size(doc);
        self.insert_all(doc, size, &[node])
    }

    /// Inserts `nodes`, in order, at view position `index`.
    ///
    /// Every node is checked against the filter before the backing list
    /// validates the batch, so the call is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert) and [`Document::insert_all`].
    pub fn insert_all(
        &self,
        doc: &mut Document,
        index: usize,
        nodes: &[NodeId],
    ) -> Result<(), TreeError> {
        let position = self.insertion_point(doc, index)?;
        self.check_matches(doc, nodes)?;
        doc.insert_all(self.parent, position, nodes)
    }

    /// Replaces the entry at view position `index` and returns the former
    /// entry, now detached.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `index >= size`.
    /// - `FilterRejected` if `node` does not match the filter.
    /// - Any error of [`Document::set_content`].
    pub fn set(&self, doc: &mut Document, index: usize, node: NodeId) -> Result<NodeId, TreeError> {
        let position = self.backing_position(doc, index)?;
        self.check_matches(doc, &[node])?;
        doc.set_content(self.parent, position, node)
    }

    /// Removes and returns the entry at view position `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= size`.
    pub fn remove_at(&self, doc: &mut Document, index: usize) -> Result<NodeId, TreeError> {
        let position = self.backing_position(doc, index)?;
        doc.remove_content_at(self.parent, position)
    }

    /// Removes `node` if it is one of the view's entries.
    ///
    /// Returns `false`, leaving the list untouched, for nodes outside the
    /// view even when the backing list holds them.
    pub fn remove(&self, doc: &mut Document, node: NodeId) -> bool {
        self.contains(doc, node) && doc.remove_content(self.parent, node)
    }

    /// Removes every matching entry and returns them, detached, in their
    /// former order. Non-matching entries keep their relative order.
    pub fn clear(&self, doc: &mut Document) -> Vec<NodeId> {
        let matching = self.to_vec(doc);
        for &node in &matching {
            doc.remove_content(self.parent, node);
        }
        matching
    }

    /// Keeps only the matching entries for which `keep` returns `true`;
    /// returns the removed entries.
    pub fn retain<P>(&self, doc: &mut Document, mut keep: P) -> Vec<NodeId>
    where
        P: FnMut(&Document, NodeId) -> bool,
    {
        let doomed: Vec<NodeId> = {
            let doc: &Document = doc;
            self.iter(doc).filter(|&node| !keep(doc, node)).collect()
        };
        for &node in &doomed {
            doc.remove_content(self.parent, node);
        }
        doomed
    }

    /// Backing position of the entry at view position `index`.
    fn backing_position(&self, doc: &Document, index: usize) -> Result<usize, TreeError> {
        let mut seen = 0;
        for (position, &node) in doc.content(self.parent).iter().enumerate() {
            if self.filter.matches(doc, node) {
                if seen == index {
                    return Ok(position);
                }
                seen += 1;
            }
        }
        Err(TreeError::IndexOutOfRange { index, size: seen })
    }

    /// Like `backing_position`, but `index == size` maps to the end of the
    /// backing list.
    fn insertion_point(&self, doc: &Document, index: usize) -> Result<usize, TreeError> {
        match self.backing_position(doc, index) {
            Err(TreeError::IndexOutOfRange { size, .. }) if size == index => {
                Ok(doc.content_size(self.parent))
            }
            other => other,
        }
    }

    fn check_matches(&self, doc: &Document, nodes: &[NodeId]) -> Result<(), TreeError> {
        match nodes.iter().find(|&&node| !self.filter.matches(doc, node)) {
            Some(&node) => Err(TreeError::FilterRejected {
                kind: doc.node_type(node),
            }),
            None => Ok(()),
        }
    }
}

/// Iterator over the entries of a [`FilteredView`].
pub struct ViewIter<'a, F> {
    doc: &'a Document,
    filter: &'a F,
    inner: std::slice::Iter<'a, NodeId>,
}

impl<F: Filter> Iterator for ViewIter<'_, F> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let doc = self.doc;
        let filter = self.filter;
        self.inner
            .by_ref()
            .copied()
            .find(|&node| filter.matches(doc, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<F: Filter> DoubleEndedIterator for ViewIter<'_, F> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let doc = self.doc;
        let filter = self.filter;
        self.inner
            .by_ref()
            .copied()
            .rfind(|&node| filter.matches(doc, node))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::filter::{ContentFilter, ElementFilter};
    use crate::tree::NodeType;

    /// `[Text, Element x, Text, Element y]` under one element.
    fn mixed() -> (Document, NodeId, [NodeId; 4]) {
        let mut doc = Document::new();
        let list = doc.create_element("list");
        let t1 = doc.create_text("1");
        let x = doc.create_element("x");
        let t2 = doc.create_text("2");
        let y = doc.create_element("y");
        doc.add_all(list, &[t1, x, t2, y]).unwrap();
        (doc, list, [t1, x, t2, y])
    }

    #[test]
    fn test_reads() {
        let (doc, list, [t1, x, t2, y]) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        assert_eq!(view.size(&doc), 2);
        assert_eq!(view.size(&doc), 2);
        assert_eq!(view.get(&doc, 0), Some(x));
        assert_eq!(view.get(&doc, 2), None);
        assert_eq!(view.index_of(&doc, y), Some(1));
        assert_eq!(view.index_of(&doc, t1), None);
        assert!(view.contains(&doc, x));
        assert!(!view.contains(&doc, t2));
        assert_eq!(view.iter(&doc).rev().collect::<Vec<_>>(), vec![y, x]);
    }

    #[test]
    fn test_insert_lands_before_nth_match() {
        let (mut doc, list, [t1, x, t2, y]) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        let z = doc.create_element("z");
        view.insert(&mut doc, 1, z).unwrap();
        assert_eq!(doc.content(list), &[t1, x, t2, z, y]);
    }

    #[test]
    fn test_insert_at_size_appends_to_backing() {
        let (mut doc, list, [t1, x, t2, y]) = mixed();
        let t3 = doc.create_text("3");
        doc.add_content(list, t3).unwrap();
        let view = FilteredView::new(list, ContentFilter::elements());
        let z = doc.create_element("z");
        view.add(&mut doc, z).unwrap();
        assert_eq!(doc.content(list), &[t1, x, t2, y, t3, z]);
    }

    #[test]
    fn test_insert_past_size_fails() {
        let (mut doc, list, _) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        let z = doc.create_element("z");
        assert_eq!(
            view.insert(&mut doc, 3, z),
            Err(TreeError::IndexOutOfRange { index: 3, size: 2 })
        );
    }

    #[test]
    fn test_insert_rejected_by_filter() {
        let (mut doc, list, _) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        let t = doc.create_text("t");
        assert_eq!(
            view.insert(&mut doc, 0, t),
            Err(TreeError::FilterRejected {
                kind: NodeType::Text
            })
        );
        assert_eq!(doc.content_size(list), 4);
        assert_eq!(doc.parent(t), None);
    }

    #[test]
    fn test_insert_all_checks_every_node_first() {
        let (mut doc, list, _) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        let z = doc.create_element("z");
        let c = doc.create_comment("c");
        assert!(matches!(
            view.insert_all(&mut doc, 0, &[z, c]),
            Err(TreeError::FilterRejected { .. })
        ));
        assert_eq!(doc.parent(z), None);
        assert_eq!(doc.content_size(list), 4);
    }

    #[test]
    fn test_insert_inherits_content_list_checks() {
        let (mut doc, list, _) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        assert_eq!(
            view.insert(&mut doc, 0, list),
            Err(TreeError::CycleDetected)
        );
    }

    #[test]
    fn test_owner_and_its_ancestors_are_refused() {
        let (mut doc, list, _) = mixed();
        let outer = doc.create_element("outer");
        doc.add_content(outer, list).unwrap();
        let before = doc.content(list).to_vec();

        let view = FilteredView::new(list, ContentFilter::elements());
        for owner_or_ancestor in [list, outer] {
            assert_eq!(
                view.add(&mut doc, owner_or_ancestor),
                Err(TreeError::CycleDetected)
            );
        }
        assert_eq!(doc.content(list), before.as_slice());
        assert_eq!(doc.parent(list), Some(outer));
        assert_eq!(doc.parent(outer), None);
    }

    #[test]
    fn test_remove_at_translates_position() {
        let (mut doc, list, [t1, x, t2, y]) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        assert_eq!(view.remove_at(&mut doc, 1), Ok(y));
        assert_eq!(doc.content(list), &[t1, x, t2]);
        assert_eq!(doc.parent(y), None);
        assert_eq!(
            view.remove_at(&mut doc, 1),
            Err(TreeError::IndexOutOfRange { index: 1, size: 1 })
        );
    }

    #[test]
    fn test_set_replaces_matching_entry() {
        let (mut doc, list, [t1, x, t2, y]) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        let z = doc.create_element("z");
        assert_eq!(view.set(&mut doc, 0, z), Ok(x));
        assert_eq!(doc.content(list), &[t1, z, t2, y]);
        let c = doc.create_comment("c");
        assert!(view.set(&mut doc, 0, c).is_err());
        assert_eq!(doc.content(list), &[t1, z, t2, y]);
    }

    #[test]
    fn test_remove_ignores_non_matching() {
        let (mut doc, list, [t1, x, _, _]) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        assert!(!view.remove(&mut doc, t1));
        assert_eq!(doc.parent(t1), Some(list));
        assert!(view.remove(&mut doc, x));
        assert!(!view.remove(&mut doc, x));
    }

    #[test]
    fn test_clear_removes_all_matches() {
        let mut doc = Document::new();
        let list = doc.create_element("list");
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let t = doc.create_text("t");
        let c = doc.create_element("c");
        doc.add_all(list, &[a, b, t, c]).unwrap();

        let view = FilteredView::new(list, ContentFilter::elements());
        assert_eq!(view.clear(&mut doc), vec![a, b, c]);
        assert_eq!(doc.content(list), &[t]);
        assert!(view.is_empty(&doc));
    }

    #[test]
    fn test_retain() {
        let (mut doc, list, [t1, x, t2, y]) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        let removed = view.retain(&mut doc, |doc, id| doc.node_name(id) == Some("y"));
        assert_eq!(removed, vec![x]);
        assert_eq!(doc.content(list), &[t1, t2, y]);
    }

    #[test]
    fn test_views_observe_each_other() {
        let (mut doc, list, [t1, _, t2, _]) = mixed();
        let elements = FilteredView::new(list, ElementFilter::new());
        let text = FilteredView::new(list, ContentFilter::text());
        assert_eq!(text.to_vec(&doc), vec![t1, t2]);

        elements.clear(&mut doc);
        let t3 = doc.create_text("3");
        text.insert(&mut doc, 1, t3).unwrap();
        assert_eq!(doc.content(list), &[t1, t3, t2]);
        assert_eq!(elements.size(&doc), 0);

        let e = doc.create_element("e");
        doc.add_content(list, e).unwrap();
        assert_eq!(elements.to_vec(&doc), vec![e]);
    }

    #[test]
    fn test_move_within_backing_through_view() {
        let (mut doc, list, [t1, x, t2, y]) = mixed();
        let view = FilteredView::new(list, ContentFilter::elements());
        view.insert(&mut doc, 0, y).unwrap();
        assert_eq!(doc.content(list), &[t1, y, x, t2]);
    }
}
