#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub type NodeMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub type NodeMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
pub type NodeSet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub type NodeSet<K> = BTreeSet<K>;

/// Identity of a node in the tree.
///
/// With `std` this is `Hash + Eq`, without it `Ord`, so the same code can pick between hash and
/// B-tree collections.
#[cfg(feature = "std")]
pub trait NodeKey: core::hash::Hash + Eq + Clone + core::fmt::Debug {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone + core::fmt::Debug> NodeKey for K {}

#[cfg(not(feature = "std"))]
pub trait NodeKey: Ord + Clone + core::fmt::Debug {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone + core::fmt::Debug> NodeKey for K {}
