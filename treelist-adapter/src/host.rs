use treelist::{FlatNode, NodeSet, ScrollMetrics, Selection};

/// The collaborators a hosting UI supplies to a [`crate::Navigator`].
///
/// Implement this on whatever owns the content tree, the selection and the scroll container,
/// then call [`crate::Navigator::sync_from`] once per event-loop tick.
pub trait NavigatorHost<K> {
    /// The upstream node collection, in sibling order.
    fn flat_nodes(&self) -> &[FlatNode<K>];

    /// Projection root. `None` lists top-level nodes.
    fn root(&self) -> Option<&K> {
        None
    }

    fn selection(&self) -> &Selection<K>;

    /// Nodes currently being dragged. They are hidden together with their subtrees.
    fn dragged_ids(&self) -> &NodeSet<K>;

    fn scroll_metrics(&self) -> ScrollMetrics;
}
