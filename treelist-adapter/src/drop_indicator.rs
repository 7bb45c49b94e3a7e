use treelist::NodeKey;

use crate::Navigator;

/// Where a dragged block would land relative to the target row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropPosition {
    /// Before the target, as its previous sibling.
    Top,
    /// After the target (and its rendered descendants), as its next sibling.
    Bottom,
    /// As the target's first child.
    Inside,
}

/// A drop target as produced by the host's drop-zone resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropTarget<K> {
    pub id: K,
    pub position: DropPosition,
}

/// Geometry of the drag-target affordance, in the list's content coordinates.
///
/// Lines (`Top`/`Bottom`) have `height == 0`; `Inside` outlines the whole target row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropIndicator {
    pub top: u64,
    pub height: u32,
    /// Nesting level the dropped block would end up at.
    pub depth: usize,
}

/// Resolves a drop target against the navigator's current tree and window.
///
/// Returns `None` when the target row is not rendered or lies outside the materialized window.
pub fn resolve_drop_indicator<K: NodeKey>(
    nav: &Navigator<K>,
    target: &DropTarget<K>,
) -> Option<DropIndicator> {
    let row = nav.row(&target.id)?;
    if !nav.window().contains(row.index) {
        return None;
    }
    let cfg = nav.options().window_config();
    let indicator = match target.position {
        DropPosition::Top => DropIndicator {
            top: cfg.row_offset(row.index),
            height: 0,
            depth: row.depth,
        },
        DropPosition::Bottom => {
            let span = nav.row_span(&target.id)?;
            DropIndicator {
                top: cfg.row_offset(row.index + span),
                height: 0,
                depth: row.depth,
            }
        }
        DropPosition::Inside => DropIndicator {
            top: cfg.row_offset(row.index),
            height: cfg.row_height,
            depth: row.depth + 1,
        },
    };
    Some(indicator)
}
