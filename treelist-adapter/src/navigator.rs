use alloc::vec::Vec;

use treelist::{
    ExpansionStore, FlatNode, NodeKey, NodeSet, ScrollMetrics, Selection, TreeNode, VisibleRow,
    WindowRange,
};

use crate::{NavigatorHost, NavigatorOptions, ScrollRequest, ScrollSynchronizer, SyncContext};

/// A framework-neutral list navigator over a collapsible tree.
///
/// It owns the projected tree snapshot, the expansion state, the last known scroll metrics and
/// the scroll synchronizer. It holds no UI objects. Adapters drive it by calling:
/// - `set_tree` when the upstream node collection or the dragged set changes
/// - `on_selection_change` when the selection changes outside the list
/// - `on_scroll` / `on_resize` when the scroll container reports new geometry
///
/// and render whatever `for_each_visible_row` yields. Every query is derived from the current
/// snapshot and expansion state, so the window never lags behind a mutation.
#[derive(Clone, Debug)]
pub struct Navigator<K> {
    options: NavigatorOptions,
    roots: Vec<TreeNode<K>>,
    /// Every id of the last node collection, projected or not.
    known: NodeSet<K>,
    /// Ids present in the current projection.
    projected: NodeSet<K>,
    expansion: ExpansionStore<K>,
    sync: ScrollSynchronizer<K>,
    metrics: ScrollMetrics,
    total_rows: usize,
    mounted: bool,
}

impl<K: NodeKey> Navigator<K> {
    pub fn new(options: NavigatorOptions) -> Self {
        nav_log!(
            debug,
            row_height = options.row_height,
            overscan = options.overscan,
            windowing = options.windowing,
            "Navigator::new"
        );
        Self {
            options,
            roots: Vec::new(),
            known: NodeSet::new(),
            projected: NodeSet::new(),
            expansion: ExpansionStore::new(),
            sync: ScrollSynchronizer::new(),
            metrics: ScrollMetrics::default(),
            total_rows: 0,
            mounted: false,
        }
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: NavigatorOptions) {
        self.options = options;
        nav_log!(
            trace,
            row_height = options.row_height,
            overscan = options.overscan,
            windowing = options.windowing,
            "Navigator::set_options"
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Marks the list as attached to a scroll container. Selection changes only produce scroll
    /// requests while mounted.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn roots(&self) -> &[TreeNode<K>] {
        &self.roots
    }

    pub fn expansion(&self) -> &ExpansionStore<K> {
        &self.expansion
    }

    pub fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    /// Re-projects the tree from the upstream collection.
    ///
    /// An invalid collection (cycle, dangling parent, duplicate id) renders as an empty tree.
    pub fn set_tree(&mut self, nodes: &[FlatNode<K>], root: Option<&K>, dragged: &NodeSet<K>) {
        let roots = treelist::project_or_empty(nodes, root, dragged);
        self.known = nodes.iter().map(|n| n.id.clone()).collect();
        self.replace_roots(roots);
    }

    /// Replaces the snapshot with an already projected tree.
    ///
    /// Marked snapshots (see [`treelist::project_marked`]) are accepted: dragged nodes keep their
    /// expansion flags but are treated as stale ids by `expand` and `collapse`, as with `set_tree`.
    pub fn set_roots(&mut self, roots: Vec<TreeNode<K>>) {
        self.known.clear();
        collect_ids(&roots, &mut self.known);
        self.replace_roots(roots);
    }

    fn replace_roots(&mut self, roots: Vec<TreeNode<K>>) {
        self.roots = roots;
        self.projected.clear();
        collect_projected_ids(&self.roots, &mut self.projected);
        if self.options.prune_stale_expansion {
            let known = &self.known;
            self.expansion.retain_known(|id| known.contains(id));
        }
        self.refresh();
        nav_log!(
            debug,
            roots = self.roots.len(),
            total_rows = self.total_rows,
            "Navigator::replace_roots"
        );
    }

    /// Recounts rows after a tree or expansion change and pulls the offset back into range.
    fn refresh(&mut self) {
        self.total_rows = treelist::total_visible_rows(&self.roots, self.expansion.state());
        let clamped = self.clamp_scroll_offset(self.metrics.offset);
        if clamped != self.metrics.offset {
            nav_log!(
                trace,
                from = self.metrics.offset,
                to = clamped,
                "offset clamped after shrink"
            );
            self.metrics.offset = clamped;
        }
    }

    pub fn is_expanded(&self, id: &K) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Expands a row. Ids missing from the current projection are logged and ignored.
    pub fn expand(&mut self, id: &K) -> bool {
        if !self.check_projected(id, "expand") {
            return false;
        }
        self.expansion.expand(core::slice::from_ref(id));
        self.refresh();
        true
    }

    /// Collapses a row. Ids missing from the current projection are logged and ignored.
    pub fn collapse(&mut self, id: &K) -> bool {
        if !self.check_projected(id, "collapse") {
            return false;
        }
        self.expansion.collapse(core::slice::from_ref(id));
        self.refresh();
        true
    }

    pub fn toggle(&mut self, id: &K) -> bool {
        if self.is_expanded(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Row-level expand entry point for keyboard grids. A row without an id is ignored.
    pub fn on_row_expand_toggle(&mut self, row: Option<&K>) -> bool {
        row.is_some_and(|id| self.expand(id))
    }

    /// Row-level collapse entry point for keyboard grids. A row without an id is ignored.
    pub fn on_row_collapse_toggle(&mut self, row: Option<&K>) -> bool {
        row.is_some_and(|id| self.collapse(id))
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
        self.refresh();
    }

    fn check_projected(&self, id: &K, op: &'static str) -> bool {
        if self.projected.contains(id) {
            return true;
        }
        nav_log!(warn, id = ?id, op, "stale id: not in the current projection");
        let _ = op;
        false
    }

    /// Records a selection made from within the list.
    ///
    /// The host is expected to forward the selection to its store; when it comes back through
    /// [`Self::on_selection_change`] the list does not scroll, since the row is already on screen.
    pub fn select(&mut self, id: K) {
        nav_log!(trace, id = ?id, "Navigator::select");
        self.sync.note_selected_from_list(id);
    }

    /// Reconciles expansion and scroll position with an external selection change.
    ///
    /// The ancestors are expanded before the target offset is computed. The returned request is
    /// clamped to the scrollable range and already applied to the navigator's own scroll metrics,
    /// so the window reflects the new position right away; the host must apply it to the real
    /// container.
    pub fn on_selection_change(&mut self, selection: &Selection<K>) -> Option<ScrollRequest<K>> {
        let ctx = SyncContext {
            mounted: self.mounted,
        };
        let request = self.sync.on_selection_change(
            ctx,
            selection,
            &self.roots,
            &mut self.expansion,
            self.options.row_height,
        );
        self.refresh();

        let mut request = request?;
        request.offset = self.clamp_scroll_offset(request.offset);
        self.metrics.offset = request.offset;
        Some(request)
    }

    pub fn on_scroll(&mut self, offset: u64) {
        nav_log!(trace, offset, "Navigator::on_scroll");
        self.metrics.offset = offset;
    }

    pub fn on_resize(&mut self, viewport_height: u32) {
        nav_log!(trace, viewport_height, "Navigator::on_resize");
        self.metrics.viewport_height = viewport_height;
    }

    pub fn set_scroll_metrics(&mut self, metrics: ScrollMetrics) {
        self.metrics = metrics;
    }

    /// Pulls every input from `host` in dependency order: tree, then geometry, then selection.
    ///
    /// Returns the scroll request produced by the selection step, if any.
    pub fn sync_from(&mut self, host: &impl NavigatorHost<K>) -> Option<ScrollRequest<K>> {
        self.set_tree(host.flat_nodes(), host.root(), host.dragged_ids());
        self.set_scroll_metrics(host.scroll_metrics());
        self.on_selection_change(host.selection())
    }

    /// Number of rows a full render would produce.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn total_height(&self) -> u64 {
        self.options.window_config().row_offset(self.total_rows)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.options
            .window_config()
            .max_scroll_offset(self.total_rows, self.metrics.viewport_height)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// The rows to materialize for the current scroll position.
    pub fn window(&self) -> WindowRange {
        self.options
            .window_config()
            .window(self.metrics, self.total_rows)
    }

    pub fn for_each_visible_row(&self, f: impl FnMut(VisibleRow<K>)) {
        treelist::for_each_visible_row_in(&self.roots, self.expansion.state(), self.window(), f);
    }

    /// Collects the rows of the current window into `out` (clears `out` first).
    pub fn collect_visible_rows(&self, out: &mut Vec<VisibleRow<K>>) {
        out.clear();
        self.for_each_visible_row(|row| out.push(row));
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow<K>> {
        let mut out = Vec::with_capacity(self.window().len());
        self.collect_visible_rows(&mut out);
        out
    }

    pub fn row_index_of(&self, id: &K) -> Option<usize> {
        treelist::row_index_of(&self.roots, self.expansion.state(), id)
    }

    pub fn row(&self, id: &K) -> Option<VisibleRow<K>> {
        treelist::find_row(&self.roots, self.expansion.state(), id)
    }

    /// Number of rows `id` spans: its own row plus its rendered descendants.
    pub fn row_span(&self, id: &K) -> Option<usize> {
        let node = treelist::find_node(&self.roots, id)?;
        self.row_index_of(id)?;
        Some(treelist::count_visible_rows(node, self.expansion.state(), None))
    }

    /// Offset of the top edge of the row for `id`.
    pub fn row_offset(&self, id: &K) -> Option<u64> {
        let index = self.row_index_of(id)?;
        Some(self.options.window_config().row_offset(index))
    }
}

fn collect_ids<K: NodeKey>(nodes: &[TreeNode<K>], out: &mut NodeSet<K>) {
    for node in nodes {
        out.insert(node.id.clone());
        collect_ids(&node.children, out);
    }
}

/// Like `collect_ids`, but skips dragged nodes and their subtrees, which have no rows.
fn collect_projected_ids<K: NodeKey>(nodes: &[TreeNode<K>], out: &mut NodeSet<K>) {
    for node in nodes.iter().filter(|n| !n.is_dragged) {
        out.insert(node.id.clone());
        collect_projected_ids(&node.children, out);
    }
}
