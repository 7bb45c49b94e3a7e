//! Headless core for virtualized, collapsible tree list views.
//!
//! For the navigator controller (selection-driven scrolling, host wiring, drop indicators), see
//! the `treelist-adapter` crate.
//!
//! This crate holds the pure algorithms behind a "list view" of a block tree:
//! - projecting a parent-pointer node collection into an ordered tree snapshot
//! - per-node expand/collapse state driven by commands
//! - collapse-aware row counting and flattening
//! - fixed-row-height windowing with overscan
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the node collection and the set of dragged ids
//! - viewport height and scroll offset
//! - the selection
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod expansion;
mod key;
mod projector;
mod rows;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use error::InvalidTreeError;
pub use expansion::{ExpansionCommand, ExpansionState, ExpansionStore, reduce};
pub use key::{NodeKey, NodeMap, NodeSet};
pub use projector::{project, project_marked, project_or_empty};
pub use rows::{
    count_visible_rows, find_node, find_row, flatten_visible, for_each_visible_row_in, row_index_of,
    total_visible_rows,
};
pub use types::{FlatNode, ScrollMetrics, Selection, TreeNode, VisibleRow, WindowRange};
pub use window::{
    DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT, WindowConfig, clamp_scroll_offset, compute_window,
    max_scroll_offset, visible_rows_range,
};
