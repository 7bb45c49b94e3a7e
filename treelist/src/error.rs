/// Errors detected while projecting the upstream node collection into a tree.
///
/// The navigator recovers from these by rendering an empty tree, see
/// [`crate::project_or_empty`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTreeError<K> {
    /// Following parent pointers from `id` leads back to `id`.
    #[error("cycle in parent chain at node {id:?}")]
    Cycle { id: K },

    /// `id` names a parent that is not part of the collection.
    #[error("node {id:?} references missing parent {parent:?}")]
    DanglingParent { id: K, parent: K },

    /// The same id appears more than once in the collection.
    #[error("duplicate node id {id:?}")]
    DuplicateId { id: K },
}

impl<K> InvalidTreeError<K> {
    /// The node at which the problem was detected.
    pub fn node(&self) -> &K {
        match self {
            Self::Cycle { id } | Self::DanglingParent { id, .. } | Self::DuplicateId { id } => id,
        }
    }
}
