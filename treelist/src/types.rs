use alloc::vec::Vec;

/// One entry of the upstream node collection.
///
/// Parent/child relations are given as parent pointers; sibling order is the order in which
/// entries appear in the collection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatNode<K> {
    pub id: K,
    pub parent: Option<K>,
}

impl<K> FlatNode<K> {
    pub fn root(id: K) -> Self {
        Self { id, parent: None }
    }

    pub fn child(id: K, parent: K) -> Self {
        Self {
            id,
            parent: Some(parent),
        }
    }
}

/// A node of a projected tree snapshot.
///
/// Snapshots are values: a tree change produces a new snapshot instead of mutating this one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode<K> {
    pub id: K,
    pub children: Vec<TreeNode<K>>,
    /// `true` when the node (or one of its ancestors) is being dragged. Dragged nodes are kept
    /// only by [`crate::project_marked`] and never contribute rows.
    pub is_dragged: bool,
}

impl<K> TreeNode<K> {
    pub fn leaf(id: K) -> Self {
        Self {
            id,
            children: Vec::new(),
            is_dragged: false,
        }
    }

    pub fn with_children(id: K, children: Vec<TreeNode<K>>) -> Self {
        Self {
            id,
            children,
            is_dragged: false,
        }
    }

    /// Returns `true` if at least one child would render as a row.
    pub fn has_children(&self) -> bool {
        self.children.iter().any(|c| !c.is_dragged)
    }
}

/// Half-open index range over the linear (flattened, collapse-aware) row ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl WindowRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// A materialized row, as handed to the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRow<K> {
    pub id: K,
    /// Position in the linear row ordering.
    pub index: usize,
    /// `0` for top-level rows.
    pub depth: usize,
    pub is_expanded: bool,
    pub has_children: bool,
}

/// Externally owned selection, read-only to the navigator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection<K> {
    pub selected_ids: Vec<K>,
    /// Root-to-parent chain of the primary selection.
    pub selected_ancestor_ids: Vec<K>,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected_ids: Vec::new(),
            selected_ancestor_ids: Vec::new(),
        }
    }
}

impl<K> Selection<K> {
    pub fn new(selected_ids: Vec<K>, selected_ancestor_ids: Vec<K>) -> Self {
        Self {
            selected_ids,
            selected_ancestor_ids,
        }
    }

    pub fn single(id: K, ancestors: Vec<K>) -> Self {
        Self {
            selected_ids: alloc::vec![id],
            selected_ancestor_ids: ancestors,
        }
    }

    pub fn primary(&self) -> Option<&K> {
        self.selected_ids.first()
    }

    pub fn top_level_ancestor(&self) -> Option<&K> {
        self.selected_ancestor_ids.first()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }
}

/// A snapshot of the scroll container geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub offset: u64,
    pub viewport_height: u32,
}

impl ScrollMetrics {
    pub fn new(offset: u64, viewport_height: u32) -> Self {
        Self {
            offset,
            viewport_height,
        }
    }
}
