use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Random parent-pointer forest: node `i` hangs off a random earlier node or is top-level.
fn random_flat_nodes(rng: &mut Lcg, n: usize) -> Vec<FlatNode<u64>> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let parent = if i == 0 || rng.gen_range_usize(0, 4) == 0 {
            None
        } else {
            Some(rng.gen_range_u64(0, i as u64))
        };
        out.push(FlatNode {
            id: i as u64,
            parent,
        });
    }
    out
}

fn random_expansion(rng: &mut Lcg, n: usize) -> ExpansionStore<u64> {
    let mut store = ExpansionStore::new();
    for i in 0..n as u64 {
        match rng.gen_range_usize(0, 3) {
            0 => {}
            1 => {
                store.expand(&[i]);
            }
            _ => {
                store.collapse(&[i]);
            }
        }
    }
    store
}

/// Reference full render: every row a non-windowed render would produce, in order.
fn expected_rows(
    roots: &[TreeNode<u64>],
    state: &ExpansionState<u64>,
    depth: usize,
    out: &mut Vec<(u64, usize)>,
) {
    for node in roots {
        if node.is_dragged {
            continue;
        }
        out.push((node.id, depth));
        if state.get(&node.id) == Some(true) {
            expected_rows(&node.children, state, depth + 1, out);
        }
    }
}

fn sample_nodes() -> Vec<FlatNode<&'static str>> {
    // A -> [B, C], B -> [D], E
    alloc::vec![
        FlatNode::root("A"),
        FlatNode::child("B", "A"),
        FlatNode::child("C", "A"),
        FlatNode::child("D", "B"),
        FlatNode::root("E"),
    ]
}

fn ids<K: Clone>(rows: &[VisibleRow<K>]) -> Vec<K> {
    rows.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn projection_preserves_sibling_order() {
    let nodes = alloc::vec![
        FlatNode::root(3u32),
        FlatNode::child(10, 3),
        FlatNode::root(1),
        FlatNode::child(12, 3),
        FlatNode::child(11, 3),
        FlatNode::root(2),
    ];
    let tree = project(&nodes, None, &NodeSet::new()).unwrap();
    let roots: Vec<u32> = tree.iter().map(|n| n.id).collect();
    assert_eq!(roots, [3, 1, 2]);
    let children: Vec<u32> = tree[0].children.iter().map(|n| n.id).collect();
    assert_eq!(children, [10, 12, 11]);
}

#[test]
fn projection_drops_dragged_subtrees() {
    let dragged: NodeSet<&str> = ["B"].into_iter().collect();
    let tree = project(&sample_nodes(), None, &dragged).unwrap();
    assert_eq!(tree.len(), 2);
    let a = &tree[0];
    assert_eq!(a.children.len(), 1);
    assert_eq!(a.children[0].id, "C");
    assert!(tree.iter().all(|n| !n.is_dragged));
}

#[test]
fn marked_projection_keeps_dragged_rows_out_of_the_count() {
    let dragged: NodeSet<&str> = ["B"].into_iter().collect();
    let tree = project_marked(&sample_nodes(), None, &dragged).unwrap();
    let b = &tree[0].children[0];
    assert_eq!(b.id, "B");
    assert!(b.is_dragged);
    assert!(b.children[0].is_dragged, "descendants inherit the flag");

    let mut store = ExpansionStore::new();
    store.expand(&["A", "B"]);
    let rows = flatten_visible(&tree, store.state());
    assert_eq!(ids(&rows), ["A", "C", "E"]);
    assert_eq!(total_visible_rows(&tree, store.state()), 3);
    assert_eq!(row_index_of(&tree, store.state(), &"D"), None);
}

#[test]
fn projection_under_a_subtree_root() {
    let tree = project(&sample_nodes(), Some(&"A"), &NodeSet::new()).unwrap();
    let roots: Vec<&str> = tree.iter().map(|n| n.id).collect();
    assert_eq!(roots, ["B", "C"]);

    // The root does not have to be part of the collection.
    let nodes = alloc::vec![FlatNode::child(1u8, 0), FlatNode::child(2, 1)];
    let tree = project(&nodes, Some(&0), &NodeSet::new()).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].children[0].id, 2);

    let dragged: NodeSet<&str> = ["A"].into_iter().collect();
    assert!(project(&sample_nodes(), Some(&"B"), &dragged).unwrap().is_empty());
}

#[test]
fn projection_rejects_invalid_trees() {
    let cycle = alloc::vec![
        FlatNode::root(0u8),
        FlatNode::child(1, 2),
        FlatNode::child(2, 1)
    ];
    let err = project(&cycle, None, &NodeSet::new()).unwrap_err();
    assert!(matches!(err, InvalidTreeError::Cycle { .. }));

    let dangling = alloc::vec![FlatNode::root(0u8), FlatNode::child(1, 9)];
    assert_eq!(
        project(&dangling, None, &NodeSet::new()),
        Err(InvalidTreeError::DanglingParent { id: 1, parent: 9 })
    );

    let duplicate = alloc::vec![FlatNode::root(0u8), FlatNode::child(0, 0)];
    let err = project(&duplicate, None, &NodeSet::new()).unwrap_err();
    assert_eq!(err, InvalidTreeError::DuplicateId { id: 0 });
    assert_eq!(*err.node(), 0);

    let self_parent = alloc::vec![FlatNode::child(5u8, 5)];
    assert_eq!(
        project(&self_parent, None, &NodeSet::new()),
        Err(InvalidTreeError::Cycle { id: 5 })
    );

    assert!(project_or_empty(&cycle, None, &NodeSet::new()).is_empty());
}

#[test]
fn expansion_commands_are_idempotent_and_order_independent() {
    let mut once = ExpansionStore::new();
    once.expand(&["a", "b"]);
    let mut twice = once.clone();
    twice.expand(&["a", "b"]);
    assert_eq!(once.state(), twice.state());

    once.collapse(&["a"]);
    assert_eq!(once.get(&"a"), Some(false));
    assert_eq!(once.get(&"b"), Some(true));
    assert_eq!(once.get(&"c"), None);
    assert!(!once.is_expanded(&"c"));

    let mut reversed = ExpansionStore::new();
    reversed.expand(&["b", "a"]);
    reversed.collapse(&["a"]);
    assert_eq!(once.state(), reversed.state());
}

#[test]
fn empty_expansion_command_is_a_noop() {
    let mut store = ExpansionStore::<u32>::new();
    assert!(!store.expand(&[]));
    assert!(!store.dispatch(ExpansionCommand::Collapse(Vec::new())));
    assert!(store.is_empty());

    let state = reduce(ExpansionState::<u32>::new(), &ExpansionCommand::Expand(Vec::new()));
    assert!(state.is_empty());
}

#[test]
fn reduce_is_a_pure_transition() {
    let s0 = ExpansionState::new();
    let s1 = reduce(s0.clone(), &ExpansionCommand::Expand(alloc::vec![1u32, 2]));
    let s2 = reduce(s1.clone(), &ExpansionCommand::Collapse(alloc::vec![1]));
    assert!(s0.is_empty());
    assert_eq!(s1.len(), 2);
    assert!(s1.is_expanded(&1));
    assert!(!s2.is_expanded(&1));
    assert!(s2.is_expanded(&2));
}

#[test]
fn collapse_all_and_pruning() {
    let mut store = ExpansionStore::new();
    store.expand(&[1u32, 2, 3]);
    assert_eq!(store.retain_known(|id| *id != 2), 1);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&2), None);

    store.collapse_all();
    assert!(store.is_empty());
}

#[test]
fn counting_respects_expansion_and_stop_id() {
    let tree = project(&sample_nodes(), None, &NodeSet::new()).unwrap();
    let a = &tree[0];
    let mut store = ExpansionStore::new();

    // Roots always count, their children only when expanded.
    assert_eq!(count_visible_rows(a, store.state(), None), 1);

    store.expand(&["A"]);
    assert_eq!(count_visible_rows(a, store.state(), None), 3);

    store.expand(&["B"]);
    assert_eq!(count_visible_rows(a, store.state(), None), 4);

    // Rows before the stop id, at any depth.
    assert_eq!(count_visible_rows(a, store.state(), Some(&"B")), 1);
    assert_eq!(count_visible_rows(a, store.state(), Some(&"D")), 2);
    assert_eq!(count_visible_rows(a, store.state(), Some(&"C")), 3);
    assert_eq!(count_visible_rows(a, store.state(), Some(&"zz")), 4);

    assert_eq!(row_index_of(&tree, store.state(), &"A"), Some(0));
    assert_eq!(row_index_of(&tree, store.state(), &"D"), Some(2));
    assert_eq!(row_index_of(&tree, store.state(), &"E"), Some(4));

    store.collapse(&["B"]);
    assert_eq!(row_index_of(&tree, store.state(), &"D"), None);
    assert_eq!(row_index_of(&tree, store.state(), &"E"), Some(3));
}

#[test]
fn flattening_reports_depth_and_children() {
    let tree = project(&sample_nodes(), None, &NodeSet::new()).unwrap();
    let mut store = ExpansionStore::new();
    store.expand(&["A", "D"]);

    let rows = flatten_visible(&tree, store.state());
    assert_eq!(ids(&rows), ["A", "B", "C", "E"]);
    let b = &rows[1];
    assert_eq!(b.index, 1);
    assert_eq!(b.depth, 1);
    assert!(b.has_children);
    assert!(!b.is_expanded);
    assert!(!rows[3].has_children);

    let d = find_row(&tree, store.state(), &"C").unwrap();
    assert_eq!((d.index, d.depth), (2, 1));
}

#[test]
fn collapse_then_expand_restores_rows() {
    let mut rng = Lcg::new(7);
    let nodes = random_flat_nodes(&mut rng, 200);
    let tree = project(&nodes, None, &NodeSet::new()).unwrap();
    let mut store = random_expansion(&mut rng, 200);
    store.expand(&[0]);

    let before = flatten_visible(&tree, store.state());
    store.collapse(&[0]);
    let collapsed = flatten_visible(&tree, store.state());
    assert!(collapsed.len() <= before.len());
    store.expand(&[0]);
    assert_eq!(flatten_visible(&tree, store.state()), before);
}

#[test]
fn row_count_matches_full_render_randomized() {
    let mut rng = Lcg::new(0xC0FFEE);
    for _case in 0..50 {
        let n = rng.gen_range_usize(0, 120);
        let nodes = random_flat_nodes(&mut rng, n);
        let dragged: NodeSet<u64> = (0..n as u64)
            .filter(|_| rng.gen_range_usize(0, 10) == 0)
            .collect();
        let marked = rng.gen_bool();
        let tree = if marked {
            project_marked(&nodes, None, &dragged).unwrap()
        } else {
            project(&nodes, None, &dragged).unwrap()
        };
        let store = random_expansion(&mut rng, n);

        let mut expected = Vec::new();
        expected_rows(&tree, store.state(), 0, &mut expected);

        assert_eq!(total_visible_rows(&tree, store.state()), expected.len());
        let rows = flatten_visible(&tree, store.state());
        let got: Vec<(u64, usize)> = rows.iter().map(|r| (r.id, r.depth)).collect();
        assert_eq!(got, expected);

        for (i, (id, _)) in expected.iter().enumerate() {
            assert_eq!(row_index_of(&tree, store.state(), id), Some(i));
        }
    }
}

#[test]
fn window_scenario_three_roots() {
    let r = compute_window(36, 72, 36, 3, 1);
    assert_eq!(r, WindowRange { start: 0, end: 3 });

    let r = compute_window(36, 72, 36, 100, 1);
    assert_eq!(r, WindowRange { start: 0, end: 4 });
}

#[test]
fn window_overscan_and_clamping() {
    let r = compute_window(36 * 50, 360, 36, 1000, 2);
    assert_eq!(r, WindowRange { start: 48, end: 62 });

    // Past the end of the list: empty, never inverted.
    let r = compute_window(36 * 2000, 360, 36, 1000, 2);
    assert!(r.is_empty());
    assert!(r.start <= r.end);
    assert_eq!(r.end, 1000);

    assert_eq!(compute_window(0, 0, 36, 0, 40), WindowRange::default());
    assert_eq!(compute_window(500, 100, 0, 7, 1), WindowRange::new(0, 7));

    assert_eq!(max_scroll_offset(10, 36, 72), 288);
    assert_eq!(clamp_scroll_offset(10_000, 10, 36, 72), 288);
    assert_eq!(clamp_scroll_offset(10_000, 1, 36, 72), 0);
}

#[test]
fn window_properties_randomized() {
    let mut rng = Lcg::new(42);
    for _ in 0..2_000 {
        let total = rng.gen_range_usize(0, 500);
        let rh = rng.gen_range_u64(1, 64) as u32;
        let vh = rng.gen_range_u64(0, 2_000) as u32;
        let overscan = rng.gen_range_usize(0, 8);
        let off = rng.gen_range_u64(0, (total as u64 + 10) * rh as u64 + 1);

        let r = compute_window(off, vh, rh, total, overscan);
        assert!(r.start <= r.end);
        assert!(r.end <= total);

        let visible = visible_rows_range(off, vh, rh, total);
        if !visible.is_empty() {
            assert!(r.start <= visible.start && visible.end <= r.end);
        }

        let bound = (vh as usize).div_ceil(rh as usize) + 1 + 2 * overscan;
        assert!(r.len() <= bound, "len={} bound={bound}", r.len());
    }
}

#[test]
fn disabled_windowing_renders_everything() {
    let cfg = WindowConfig::default().with_windowing(false);
    let r = cfg.window(ScrollMetrics::new(36 * 400, 360), 1_000);
    assert_eq!(r, WindowRange::new(0, 1_000));

    let cfg = WindowConfig::new(36).with_overscan(1);
    let r = cfg.window(ScrollMetrics::new(36, 72), 3);
    assert_eq!(r, WindowRange::new(0, 3));
    assert_eq!(cfg.row_offset(3), 108);
}

#[test]
fn windowed_walk_matches_full_flatten() {
    let mut rng = Lcg::new(99);
    let nodes = random_flat_nodes(&mut rng, 300);
    let tree = project(&nodes, None, &NodeSet::new()).unwrap();
    let store = random_expansion(&mut rng, 300);
    let all = flatten_visible(&tree, store.state());

    for _ in 0..50 {
        let start = rng.gen_range_usize(0, all.len() + 1);
        let end = rng.gen_range_usize(start, all.len() + 2);
        let mut got = Vec::new();
        for_each_visible_row_in(&tree, store.state(), WindowRange::new(start, end), |row| {
            got.push(row)
        });
        let end = end.min(all.len());
        assert_eq!(got, all[start.min(end)..end]);
    }
}
