// Example: a host owning the tree, selection and scroll container drives a navigator.
use treelist::{FlatNode, NodeSet, ScrollMetrics, Selection};
use treelist_adapter::{
    DropPosition, DropTarget, Navigator, NavigatorHost, NavigatorOptions, resolve_drop_indicator,
};

struct Host {
    nodes: Vec<FlatNode<u32>>,
    selection: Selection<u32>,
    dragged: NodeSet<u32>,
    scroll_top: u64,
    viewport: u32,
}

impl NavigatorHost<u32> for Host {
    fn flat_nodes(&self) -> &[FlatNode<u32>] {
        &self.nodes
    }

    fn selection(&self) -> &Selection<u32> {
        &self.selection
    }

    fn dragged_ids(&self) -> &NodeSet<u32> {
        &self.dragged
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.scroll_top, self.viewport)
    }
}

fn main() {
    // 200 groups, each with one nested child: group -> item -> leaf.
    let mut nodes = Vec::new();
    for g in 0..200u32 {
        let group = g * 100;
        nodes.push(FlatNode::root(group));
        nodes.push(FlatNode::child(group + 1, group));
        nodes.push(FlatNode::child(group + 2, group + 1));
    }

    let mut host = Host {
        nodes,
        selection: Selection::default(),
        dragged: NodeSet::new(),
        scroll_top: 0,
        viewport: 360,
    };

    let mut nav = Navigator::new(NavigatorOptions::new(36).with_overscan(4));
    nav.mount();
    nav.sync_from(&host);
    println!("total_rows={} window={:?}", nav.total_rows(), nav.window());

    // The editor selects a deeply nested block somewhere in the middle.
    host.selection = Selection::single(12_302, vec![12_300, 12_301]);
    if let Some(req) = nav.sync_from(&host) {
        println!("scroll to {} (target {})", req.offset, req.target);
        host.scroll_top = req.offset;
    }
    for row in nav.visible_rows().iter().take(4) {
        println!("{:>4} depth={} id={}", row.index, row.depth, row.id);
    }

    let indicator = resolve_drop_indicator(
        &nav,
        &DropTarget {
            id: 12_301,
            position: DropPosition::Inside,
        },
    );
    println!("drop indicator={indicator:?}");

    // Dragging the selected group hides it and its subtree.
    host.dragged.insert(12_300);
    nav.sync_from(&host);
    println!("while dragging: total_rows={}", nav.total_rows());
}
