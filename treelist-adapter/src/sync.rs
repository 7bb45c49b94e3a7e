use treelist::{ExpansionStore, NodeKey, Selection, TreeNode, count_visible_rows};

/// Lifecycle facts the synchronizer needs from its owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncContext {
    /// Whether the list is attached to a scroll container.
    pub mounted: bool,
}

/// A request to position the scroll container so its content offset equals `offset`.
///
/// The navigator never touches the container itself; the host applies this command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollRequest<K> {
    /// The top-level row the offset points at.
    pub target: K,
    pub offset: u64,
}

/// Keeps expansion and scroll position in step with selection changes made outside the list.
///
/// It reacts once per distinct primary selected id. Selecting an already-selected node again is
/// a no-op, and so is a selection that originated from the list itself (see
/// [`ScrollSynchronizer::note_selected_from_list`]).
#[derive(Clone, Debug)]
pub struct ScrollSynchronizer<K> {
    last_primary: Option<K>,
    selected_from_list: Option<K>,
}

impl<K: NodeKey> Default for ScrollSynchronizer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> ScrollSynchronizer<K> {
    pub fn new() -> Self {
        Self {
            last_primary: None,
            selected_from_list: None,
        }
    }

    /// The primary id of the last selection the synchronizer reacted to.
    pub fn last_primary(&self) -> Option<&K> {
        self.last_primary.as_ref()
    }

    /// Records that `id` was selected by clicking its row, so the matching selection change does
    /// not scroll the list under the pointer.
    pub fn note_selected_from_list(&mut self, id: K) {
        self.selected_from_list = Some(id);
    }

    /// Reacts to a selection change.
    ///
    /// 1. Expands every ancestor of the selection. Nothing is ever collapsed here.
    /// 2. Picks the scroll target: the top-level ancestor, or the selection itself.
    /// 3. Sums the rows of every root before that target.
    /// 4. Returns `rows * row_height` as the requested offset.
    ///
    /// The expansion is applied before counting, so the offset reflects the expanded branch.
    /// Returns `None` when the primary id did not change, the selection is empty, it came from
    /// the list itself, or the list is not mounted.
    pub fn on_selection_change(
        &mut self,
        ctx: SyncContext,
        selection: &Selection<K>,
        roots: &[TreeNode<K>],
        expansion: &mut ExpansionStore<K>,
        row_height: u32,
    ) -> Option<ScrollRequest<K>> {
        let primary = selection.primary();
        if primary == self.last_primary.as_ref() {
            return None;
        }
        self.last_primary = primary.cloned();
        let primary = primary?;

        if self.selected_from_list.take().as_ref() == Some(primary) {
            nav_log!(trace, id = ?primary, "selection came from the list, skipping sync");
            return None;
        }

        expansion.expand(&selection.selected_ancestor_ids);

        if !ctx.mounted {
            nav_log!(debug, id = ?primary, "list not mounted, no scroll request");
            // Sync again once mounted.
            self.last_primary = None;
            return None;
        }

        let target = selection.top_level_ancestor().unwrap_or(primary);
        let rows: usize = roots
            .iter()
            .take_while(|root| &root.id != target)
            .map(|root| count_visible_rows(root, expansion.state(), None))
            .sum();
        let offset = (rows as u64).saturating_mul(row_height as u64);

        nav_log!(
            debug,
            id = ?primary,
            target = ?target,
            rows,
            offset,
            "ScrollSynchronizer: scroll request"
        );
        Some(ScrollRequest {
            target: target.clone(),
            offset,
        })
    }

    /// Forgets the last reacted-to selection, so the next selection always syncs.
    pub fn reset(&mut self) {
        self.last_primary = None;
        self.selected_from_list = None;
    }
}
