//! Per-container entry indices and the registry that owns them.

use std::collections::HashMap;

use super::map::IndexShiftingMap;
use crate::error::{DomainError, DomainResult};
use crate::id::child_id;

/// Issues and tracks the identifiers of one container's children.
///
/// Identifiers have the form `<parent_id>/<k>` where `k` only ever grows, so
/// an identifier handed out once is never handed out again by this index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIndex {
    parent_id: String,
    next_key: usize,
    positions: IndexShiftingMap,
}

impl EntryIndex {
    /// Indexes `len` existing children of `parent_id`.
    #[must_use]
    pub fn new(parent_id: impl Into<String>, len: usize) -> Self {
        let parent_id = parent_id.into();
        Self {
            positions: IndexShiftingMap::children_of(&parent_id, len),
            next_key: len,
            parent_id,
        }
    }

    /// The identifier of the container owning these children.
    #[must_use]
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    /// Child identifiers in array order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.positions.keys_in_order().map(str::to_string).collect()
    }

    /// Number of indexed children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the container has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current array position of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntryNotFound`] if `id` is not a live child.
    pub fn position(&self, id: &str) -> DomainResult<usize> {
        self.positions
            .get_by_key(id)
            .ok_or_else(|| DomainError::EntryNotFound(id.to_string()))
    }

    /// Identifier of the child at `position`.
    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<&str> {
        self.positions.get_by_position(position)
    }

    /// Issues an identifier for a child appended at the end of the array.
    ///
    /// # Errors
    ///
    /// Fails only if the index is out of sync with its array.
    pub fn issue(&mut self) -> DomainResult<String> {
        let id = child_id(&self.parent_id, self.next_key);
        self.positions.set(id.clone(), self.positions.len())?;
        self.next_key += 1;
        Ok(id)
    }

    /// Forgets `id` and returns the array position it occupied.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntryNotFound`] if `id` is not a live child.
    pub fn remove(&mut self, id: &str) -> DomainResult<usize> {
        self.positions.delete_by_key(id)
    }
}

/// One [`EntryIndex`] per container, keyed by container identifier.
///
/// Owned by a root adapter and shared (by reference) with every container
/// wrapper it hands out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRegistry {
    indices: HashMap<String, EntryIndex>,
}

impl IndexRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the children of `container_id`, replacing any earlier index.
    pub fn register(&mut self, container_id: impl Into<String>, len: usize) {
        let container_id = container_id.into();
        self.indices
            .insert(container_id.clone(), EntryIndex::new(container_id, len));
    }

    /// The index of `container_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntryNotFound`] if the container is unknown.
    pub fn get(&self, container_id: &str) -> DomainResult<&EntryIndex> {
        self.indices
            .get(container_id)
            .ok_or_else(|| DomainError::EntryNotFound(container_id.to_string()))
    }

    /// The mutable index of `container_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntryNotFound`] if the container is unknown.
    pub fn get_mut(&mut self, container_id: &str) -> DomainResult<&mut EntryIndex> {
        self.indices
            .get_mut(container_id)
            .ok_or_else(|| DomainError::EntryNotFound(container_id.to_string()))
    }

    /// Drops the index of `container_id` and of every container below it.
    pub fn forget_subtree(&mut self, container_id: &str) {
        let prefix = format!("{container_id}/");
        self.indices
            .retain(|id, _| id != container_id && !id.starts_with(&prefix));
    }

    /// Number of registered containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no container is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_index_issues_sequential_ids() {
        let index = EntryIndex::new("root", 3);
        assert_eq!(index.ids(), vec!["root/0", "root/1", "root/2"]);
        assert_eq!(index.position("root/2").unwrap(), 2);
        assert_eq!(index.id_at(1), Some("root/1"));
    }

    #[test]
    fn test_removal_shifts_later_entries() {
        let mut index = EntryIndex::new("root", 4);
        assert_eq!(index.remove("root/1").unwrap(), 1);

        assert_eq!(index.ids(), vec!["root/0", "root/2", "root/3"]);
        assert_eq!(index.position("root/2").unwrap(), 1);
        assert_eq!(index.position("root/3").unwrap(), 2);
        assert_eq!(
            index.position("root/1"),
            Err(DomainError::EntryNotFound("root/1".to_string()))
        );
    }

    #[test]
    fn test_issue_after_delete_all_never_reuses_ids() {
        let mut index = EntryIndex::new("root", 2);
        index.remove("root/0").unwrap();
        index.remove("root/1").unwrap();
        assert!(index.is_empty());

        let id = index.issue().unwrap();
        assert_eq!(id, "root/2");
        assert_eq!(index.position(&id).unwrap(), 0);
        assert_eq!(index.ids(), vec!["root/2"]);
    }

    #[test]
    fn test_issue_places_new_entry_at_end() {
        let mut index = EntryIndex::new("root", 2);
        let id = index.issue().unwrap();
        assert_eq!(index.position(&id).unwrap(), 2);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_registry_forgets_whole_subtree() {
        let mut registry = IndexRegistry::new();
        registry.register("root", 2);
        registry.register("root/0", 1);
        registry.register("root/0/0", 0);
        registry.register("root/1", 0);
        registry.register("root/10", 0);

        registry.forget_subtree("root/0");

        assert!(registry.get("root/0").is_err());
        assert!(registry.get("root/0/0").is_err());
        assert!(registry.get("root/1").is_ok());
        assert!(registry.get("root/10").is_ok());
        assert_eq!(registry.len(), 3);
    }
}
