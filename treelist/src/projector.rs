use alloc::vec::Vec;

use crate::key::{NodeKey, NodeMap, NodeSet};
use crate::{FlatNode, InvalidTreeError, TreeNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragMode {
    Exclude,
    Mark,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

/// Projects a parent-pointer collection into an ordered tree snapshot.
///
/// - `root = None` projects top-level nodes (those without a parent); `Some(r)` projects the
///   children of `r`.
/// - Nodes listed in `dragged` are dropped together with their whole subtree. Every other node
///   keeps its upstream sibling order.
///
/// Fails on duplicate ids, parent references to ids missing from `nodes`, and parent-pointer
/// cycles. A parent equal to `root` is accepted even when `root` itself is not in `nodes`.
pub fn project<K: NodeKey>(
    nodes: &[FlatNode<K>],
    root: Option<&K>,
    dragged: &NodeSet<K>,
) -> Result<Vec<TreeNode<K>>, InvalidTreeError<K>> {
    Projection::new(nodes, root)?.build(dragged, DragMode::Exclude)
}

/// Like [`project`], but dragged subtrees are kept with `is_dragged = true`.
///
/// This is what a drop indicator needs: the dragged rows still have a position in the tree, but
/// row counting and flattening skip them.
pub fn project_marked<K: NodeKey>(
    nodes: &[FlatNode<K>],
    root: Option<&K>,
    dragged: &NodeSet<K>,
) -> Result<Vec<TreeNode<K>>, InvalidTreeError<K>> {
    Projection::new(nodes, root)?.build(dragged, DragMode::Mark)
}

/// Fail-safe variant of [`project`]: an invalid collection projects to an empty tree.
///
/// Projection runs on the rendering path, which must not abort the host, so the error is logged
/// and swallowed here.
pub fn project_or_empty<K: NodeKey>(
    nodes: &[FlatNode<K>],
    root: Option<&K>,
    dragged: &NodeSet<K>,
) -> Vec<TreeNode<K>> {
    match project(nodes, root, dragged) {
        Ok(tree) => tree,
        Err(err) => {
            vwarn!(error = ?err, "project_or_empty: invalid tree, rendering empty projection");
            let _ = err;
            Vec::new()
        }
    }
}

struct Projection<'a, K> {
    nodes: &'a [FlatNode<K>],
    root: Option<&'a K>,
    index: NodeMap<K, usize>,
    children: Vec<Vec<usize>>,
    top_level: Vec<usize>,
}

impl<'a, K: NodeKey> Projection<'a, K> {
    fn new(nodes: &'a [FlatNode<K>], root: Option<&'a K>) -> Result<Self, InvalidTreeError<K>> {
        let mut index = NodeMap::<K, usize>::new();
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(InvalidTreeError::DuplicateId {
                    id: node.id.clone(),
                });
            }
        }

        let mut children = alloc::vec![Vec::new(); nodes.len()];
        let mut top_level = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            if node.parent.as_ref() == root {
                top_level.push(i);
            }
            if let Some(parent) = &node.parent {
                match index.get(parent) {
                    Some(&p) => children[p].push(i),
                    None if Some(parent) == root => {}
                    None => {
                        return Err(InvalidTreeError::DanglingParent {
                            id: node.id.clone(),
                            parent: parent.clone(),
                        });
                    }
                }
            }
        }

        let projection = Self {
            nodes,
            root,
            index,
            children,
            top_level,
        };
        projection.check_acyclic()?;
        vtrace!(
            nodes = nodes.len(),
            top_level = projection.top_level.len(),
            "Projection::new"
        );
        Ok(projection)
    }

    fn check_acyclic(&self) -> Result<(), InvalidTreeError<K>> {
        let mut state = alloc::vec![Visit::Unvisited; self.nodes.len()];
        let mut chain = Vec::new();

        for start in 0..self.nodes.len() {
            let mut cur = Some(start);
            while let Some(i) = cur {
                match state[i] {
                    Visit::Done => break,
                    Visit::InProgress => {
                        return Err(InvalidTreeError::Cycle {
                            id: self.nodes[i].id.clone(),
                        });
                    }
                    Visit::Unvisited => {
                        state[i] = Visit::InProgress;
                        chain.push(i);
                        cur = self.nodes[i]
                            .parent
                            .as_ref()
                            .and_then(|p| self.index.get(p).copied());
                    }
                }
            }
            for i in chain.drain(..) {
                state[i] = Visit::Done;
            }
        }
        Ok(())
    }

    /// Returns `true` if the projection root or one of its ancestors is dragged.
    fn root_is_dragged(&self, dragged: &NodeSet<K>) -> bool {
        let mut cur = self.root;
        while let Some(id) = cur {
            if dragged.contains(id) {
                return true;
            }
            cur = self
                .index
                .get(id)
                .and_then(|&i| self.nodes[i].parent.as_ref());
        }
        false
    }

    fn build(
        &self,
        dragged: &NodeSet<K>,
        mode: DragMode,
    ) -> Result<Vec<TreeNode<K>>, InvalidTreeError<K>> {
        let inherited = self.root_is_dragged(dragged);
        if inherited && mode == DragMode::Exclude {
            return Ok(Vec::new());
        }
        let mut out = Vec::with_capacity(self.top_level.len());
        for &i in &self.top_level {
            if let Some(node) = self.build_node(i, dragged, mode, inherited) {
                out.push(node);
            }
        }
        Ok(out)
    }

    fn build_node(
        &self,
        i: usize,
        dragged: &NodeSet<K>,
        mode: DragMode,
        inherited: bool,
    ) -> Option<TreeNode<K>> {
        let id = &self.nodes[i].id;
        let is_dragged = inherited || dragged.contains(id);
        if is_dragged && mode == DragMode::Exclude {
            return None;
        }
        let children = self.children[i]
            .iter()
            .filter_map(|&c| self.build_node(c, dragged, mode, is_dragged))
            .collect();
        Some(TreeNode {
            id: id.clone(),
            children,
            is_dragged,
        })
    }
}
