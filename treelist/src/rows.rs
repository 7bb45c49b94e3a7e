use alloc::vec::Vec;
use core::ops::ControlFlow;

use crate::key::NodeKey;
use crate::{ExpansionState, TreeNode, VisibleRow, WindowRange};

/// Counts the rows a node produces in a linear rendering.
///
/// The node itself always counts as one row; its children are only counted when the node is
/// explicitly expanded. When a child with id `stop_at` is reached (at any depth), counting halts
/// and the rows accumulated so far are returned, i.e. the number of rows rendered before that
/// child. Dragged nodes produce no rows.
pub fn count_visible_rows<K: NodeKey>(
    node: &TreeNode<K>,
    state: &ExpansionState<K>,
    stop_at: Option<&K>,
) -> usize {
    match count_until(node, state, stop_at) {
        ControlFlow::Continue(n) | ControlFlow::Break((n, _)) => n,
    }
}

fn count_until<'a, K: NodeKey>(
    node: &'a TreeNode<K>,
    state: &ExpansionState<K>,
    stop_at: Option<&K>,
) -> ControlFlow<(usize, &'a TreeNode<K>), usize> {
    if node.is_dragged {
        return ControlFlow::Continue(0);
    }
    let mut count = 1usize;
    if !state.is_expanded(&node.id) {
        return ControlFlow::Continue(count);
    }
    for child in &node.children {
        if stop_at == Some(&child.id) {
            return ControlFlow::Break((count, child));
        }
        match count_until(child, state, stop_at) {
            ControlFlow::Continue(n) => count += n,
            ControlFlow::Break((n, found)) => return ControlFlow::Break((count + n, found)),
        }
    }
    ControlFlow::Continue(count)
}

/// Total number of rows a full (non-windowed) render of `roots` produces.
pub fn total_visible_rows<K: NodeKey>(roots: &[TreeNode<K>], state: &ExpansionState<K>) -> usize {
    roots
        .iter()
        .map(|root| count_visible_rows(root, state, None))
        .sum()
}

/// Returns the linear row index of `id`, or `None` if the node is not rendered (missing,
/// dragged, or inside a collapsed subtree).
pub fn row_index_of<K: NodeKey>(
    roots: &[TreeNode<K>],
    state: &ExpansionState<K>,
    id: &K,
) -> Option<usize> {
    let mut before = 0usize;
    for root in roots {
        if &root.id == id {
            return (!root.is_dragged).then_some(before);
        }
        match count_until(root, state, Some(id)) {
            ControlFlow::Continue(n) => before += n,
            ControlFlow::Break((n, found)) => {
                return (!found.is_dragged).then_some(before + n);
            }
        }
    }
    None
}

/// Calls `f` for every rendered row whose index lies in `range`, in row order.
///
/// The walk stops as soon as `range.end` is reached, so the cost is bounded by `range.end`
/// rather than by the size of the tree.
pub fn for_each_visible_row_in<K: NodeKey>(
    roots: &[TreeNode<K>],
    state: &ExpansionState<K>,
    range: WindowRange,
    mut f: impl FnMut(VisibleRow<K>),
) {
    if range.is_empty() {
        return;
    }
    let mut next = 0usize;
    let _ = walk(roots, state, 0, &mut next, range, &mut f);
}

/// Flattens the whole tree into rendered rows.
pub fn flatten_visible<K: NodeKey>(
    roots: &[TreeNode<K>],
    state: &ExpansionState<K>,
) -> Vec<VisibleRow<K>> {
    let mut out = Vec::new();
    for_each_visible_row_in(roots, state, WindowRange::new(0, usize::MAX), |row| {
        out.push(row)
    });
    out
}

/// Finds a node anywhere in the snapshot, rendered or not.
pub fn find_node<'a, K: NodeKey>(roots: &'a [TreeNode<K>], id: &K) -> Option<&'a TreeNode<K>> {
    for node in roots {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Finds the rendered row for `id`.
pub fn find_row<K: NodeKey>(
    roots: &[TreeNode<K>],
    state: &ExpansionState<K>,
    id: &K,
) -> Option<VisibleRow<K>> {
    let index = row_index_of(roots, state, id)?;
    let mut found = None;
    for_each_visible_row_in(roots, state, WindowRange::new(index, index + 1), |row| {
        found = Some(row)
    });
    found
}

fn walk<K: NodeKey>(
    nodes: &[TreeNode<K>],
    state: &ExpansionState<K>,
    depth: usize,
    next: &mut usize,
    range: WindowRange,
    f: &mut impl FnMut(VisibleRow<K>),
) -> ControlFlow<()> {
    for node in nodes {
        if node.is_dragged {
            continue;
        }
        if *next >= range.end {
            return ControlFlow::Break(());
        }
        let index = *next;
        *next += 1;

        let is_expanded = state.is_expanded(&node.id);
        if range.contains(index) {
            f(VisibleRow {
                id: node.id.clone(),
                index,
                depth,
                is_expanded,
                has_children: node.has_children(),
            });
        }
        if is_expanded {
            walk(&node.children, state, depth + 1, next, range, f)?;
        }
    }
    ControlFlow::Continue(())
}
