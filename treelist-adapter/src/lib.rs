//! Navigator controller for the `treelist` crate.
//!
//! The `treelist` crate is UI-agnostic and focuses on the core algorithms. This crate wires them
//! into the state a hosting list view needs:
//!
//! - A [`Navigator`] owning tree snapshot, expansion state and scroll metrics
//! - Selection-driven scroll synchronization ([`ScrollSynchronizer`])
//! - Drop indicator geometry for drag-and-drop ([`resolve_drop_indicator`])
//!
//! This crate is intentionally framework-agnostic: scrolling is expressed as [`ScrollRequest`]
//! values the host applies to its own container.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod drop_indicator;
mod host;
mod navigator;
mod options;
mod sync;


pub use drop_indicator::{DropIndicator, DropPosition, DropTarget, resolve_drop_indicator};
pub use host::NavigatorHost;
pub use navigator::Navigator;
pub use options::NavigatorOptions;
pub use sync::{ScrollRequest, ScrollSynchronizer, SyncContext};
pub use treelist::NodeKey;
