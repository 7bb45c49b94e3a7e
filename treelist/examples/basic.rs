// Example: project a tree, expand a branch, and window the flattened rows.
use treelist::{
    ExpansionStore, FlatNode, NodeSet, WindowConfig, flatten_visible, for_each_visible_row_in,
    project, row_index_of, total_visible_rows,
};

fn main() {
    let mut nodes = Vec::new();
    for section in 0..1_000u32 {
        let id = section * 10;
        nodes.push(FlatNode::root(id));
        for child in 1..4 {
            nodes.push(FlatNode::child(id + child, id));
        }
    }

    let tree = match project(&nodes, None, &NodeSet::new()) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("invalid tree: {err}");
            return;
        }
    };

    let mut expansion = ExpansionStore::new();
    expansion.expand(&[500, 510]);
    let total = total_visible_rows(&tree, expansion.state());
    println!("total_rows={total}");
    println!("row_of(511)={:?}", row_index_of(&tree, expansion.state(), &511));

    let cfg = WindowConfig::new(36).with_overscan(2);
    let offset = cfg.row_offset(48);
    let window = cfg.window(treelist::ScrollMetrics::new(offset, 360), total);
    println!("window={window:?}");

    for_each_visible_row_in(&tree, expansion.state(), window, |row| {
        println!(
            "{:>4} {}{}{}",
            row.index,
            "  ".repeat(row.depth),
            if row.has_children { if row.is_expanded { "v " } else { "> " } } else { "  " },
            row.id
        );
    });

    let all = flatten_visible(&tree, expansion.state());
    assert_eq!(all.len(), total);
}
