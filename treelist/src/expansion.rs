use alloc::vec::Vec;

use crate::key::{NodeKey, NodeMap};

/// A command accepted by the expansion state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpansionCommand<K> {
    Expand(Vec<K>),
    Collapse(Vec<K>),
}

impl<K> ExpansionCommand<K> {
    pub fn ids(&self) -> &[K] {
        match self {
            Self::Expand(ids) | Self::Collapse(ids) => ids,
        }
    }

    fn expanded(&self) -> bool {
        matches!(self, Self::Expand(_))
    }
}

/// Per-node expanded/collapsed flags.
///
/// A node without an entry is collapsed.
#[derive(Clone, Debug)]
pub struct ExpansionState<K> {
    flags: NodeMap<K, bool>,
}

impl<K: NodeKey> Default for ExpansionState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> PartialEq for ExpansionState<K> {
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
    }
}

impl<K: NodeKey> Eq for ExpansionState<K> {}

impl<K: NodeKey> ExpansionState<K> {
    pub fn new() -> Self {
        Self {
            flags: NodeMap::new(),
        }
    }

    /// Returns the explicit flag for `id`, if any.
    pub fn get(&self, id: &K) -> Option<bool> {
        self.flags.get(id).copied()
    }

    pub fn is_expanded(&self, id: &K) -> bool {
        self.get(id).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, bool)> {
        self.flags.iter().map(|(k, v)| (k, *v))
    }

    fn apply(&mut self, command: &ExpansionCommand<K>) {
        let expanded = command.expanded();
        for id in command.ids() {
            self.flags.insert(id.clone(), expanded);
        }
    }
}

/// Pure transition function: `(state, command) -> state`.
///
/// An empty id list returns `state` untouched.
pub fn reduce<K: NodeKey>(
    mut state: ExpansionState<K>,
    command: &ExpansionCommand<K>,
) -> ExpansionState<K> {
    state.apply(command);
    state
}

/// Owner of the navigator's [`ExpansionState`].
///
/// All mutation goes through [`ExpansionStore::dispatch`]; `expand`/`collapse` are shorthands.
#[derive(Clone, Debug)]
pub struct ExpansionStore<K> {
    state: ExpansionState<K>,
}

impl<K: NodeKey> Default for ExpansionStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> ExpansionStore<K> {
    pub fn new() -> Self {
        Self {
            state: ExpansionState::new(),
        }
    }

    pub fn state(&self) -> &ExpansionState<K> {
        &self.state
    }

    pub fn is_expanded(&self, id: &K) -> bool {
        self.state.is_expanded(id)
    }

    pub fn get(&self, id: &K) -> Option<bool> {
        self.state.get(id)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Applies a command. Returns `false` when the command carried no ids.
    pub fn dispatch(&mut self, command: ExpansionCommand<K>) -> bool {
        if command.ids().is_empty() {
            return false;
        }
        vtrace!(
            expand = command.expanded(),
            ids = command.ids().len(),
            "ExpansionStore::dispatch"
        );
        self.state.apply(&command);
        true
    }

    pub fn expand(&mut self, ids: &[K]) -> bool {
        self.dispatch(ExpansionCommand::Expand(ids.to_vec()))
    }

    pub fn collapse(&mut self, ids: &[K]) -> bool {
        self.dispatch(ExpansionCommand::Collapse(ids.to_vec()))
    }

    /// Forgets every flag, so every node falls back to collapsed.
    pub fn collapse_all(&mut self) {
        vdebug!(cleared = self.state.len(), "ExpansionStore::collapse_all");
        self.state.flags.clear();
    }

    /// Drops flags for ids that `is_known` rejects. Returns the number of removed entries.
    pub fn retain_known(&mut self, mut is_known: impl FnMut(&K) -> bool) -> usize {
        let before = self.state.flags.len();
        self.state.flags.retain(|k, _| is_known(k));
        let removed = before - self.state.flags.len();
        if removed > 0 {
            vdebug!(removed, "ExpansionStore::retain_known");
        }
        removed
    }
}
