//! Bidirectional key ↔ position maps.

use std::collections::{BTreeMap, HashMap};

use crate::error::{DomainError, DomainResult};
use crate::id::child_id;

/// A bijection between opaque string keys and array positions.
///
/// `set` refuses to overwrite either side, so a stale key can never silently
/// take over another entry's position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMap {
    by_key: HashMap<String, usize>,
    by_position: BTreeMap<usize, String>,
}

impl IdentityMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `<parent_id>/<k>` to position `k` for every `k` below `len`.
    ///
    /// Distinct positions give distinct keys, so the result is a bijection
    /// without going through [`IdentityMap::set`].
    #[must_use]
    pub fn children_of(parent_id: &str, len: usize) -> Self {
        let by_position: BTreeMap<usize, String> = (0..len)
            .map(|position| (position, child_id(parent_id, position)))
            .collect();
        let by_key = by_position
            .iter()
            .map(|(position, key)| (key.clone(), *position))
            .collect();
        Self {
            by_key,
            by_position,
        }
    }

    /// Maps `key` to `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty, or if either the key or the
    /// position is already mapped.
    pub fn set(&mut self, key: impl Into<String>, position: usize) -> DomainResult<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(DomainError::InvalidIdentifier(key));
        }
        if self.by_key.contains_key(&key) {
            return Err(DomainError::DuplicateKey(key));
        }
        if self.by_position.contains_key(&position) {
            return Err(DomainError::DuplicatePosition(position));
        }
        self.by_key.insert(key.clone(), position);
        self.by_position.insert(position, key);
        Ok(())
    }

    /// Returns the position mapped to `key`.
    #[must_use]
    pub fn get_by_key(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Returns the key mapped to `position`.
    #[must_use]
    pub fn get_by_position(&self, position: usize) -> Option<&str> {
        self.by_position.get(&position).map(String::as_str)
    }

    /// Removes the pair for `key` and returns the position it held.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntryNotFound`] if the key is not mapped.
    pub fn delete_by_key(&mut self, key: &str) -> DomainResult<usize> {
        let position = self
            .by_key
            .remove(key)
            .ok_or_else(|| DomainError::EntryNotFound(key.to_string()))?;
        self.by_position.remove(&position);
        Ok(position)
    }

    /// Returns the number of mapped pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Iterates keys in ascending position order.
    pub fn keys_in_order(&self) -> impl Iterator<Item = &str> {
        self.by_position.values().map(String::as_str)
    }

    /// Moves the pair at `from` to the free position `to`.
    fn reposition(&mut self, from: usize, to: usize) {
        if let Some(key) = self.by_position.remove(&from) {
            self.by_key.insert(key.clone(), to);
            self.by_position.insert(to, key);
        }
    }
}

/// An [`IdentityMap`] over a dense array.
///
/// Removing an element from a dense array moves every later element down by
/// one, so deleting a key here also decrements every position above the
/// removed one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexShiftingMap {
    inner: IdentityMap,
}

impl IndexShiftingMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`IdentityMap::children_of`].
    #[must_use]
    pub fn children_of(parent_id: &str, len: usize) -> Self {
        Self {
            inner: IdentityMap::children_of(parent_id, len),
        }
    }

    /// Maps `key` to `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if either the key or the position is already mapped.
    pub fn set(&mut self, key: impl Into<String>, position: usize) -> DomainResult<()> {
        self.inner.set(key, position)
    }

    /// Returns the position mapped to `key`.
    #[must_use]
    pub fn get_by_key(&self, key: &str) -> Option<usize> {
        self.inner.get_by_key(key)
    }

    /// Returns the key mapped to `position`.
    #[must_use]
    pub fn get_by_position(&self, position: usize) -> Option<&str> {
        self.inner.get_by_position(position)
    }

    /// Removes `key` and shifts every later position down by one.
    ///
    /// Positions are visited in ascending order so each target slot has
    /// already been vacated when a pair moves into it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntryNotFound`] if the key is not mapped.
    pub fn delete_by_key(&mut self, key: &str) -> DomainResult<usize> {
        let removed = self.inner.delete_by_key(key)?;
        let later: Vec<usize> = self
            .inner
            .by_position
            .range(removed + 1..)
            .map(|(position, _)| *position)
            .collect();
        for position in later {
            self.inner.reposition(position, position - 1);
        }
        Ok(removed)
    }

    /// Returns the number of mapped pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates keys in ascending position order.
    pub fn keys_in_order(&self) -> impl Iterator<Item = &str> {
        self.inner.keys_in_order()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_and_lookup_both_directions() {
        let mut map = IdentityMap::new();
        map.set("a", 0).unwrap();
        map.set("b", 1).unwrap();

        assert_eq!(map.get_by_key("b"), Some(1));
        assert_eq!(map.get_by_position(0), Some("a"));
        assert_eq!(map.get_by_key("missing"), None);
        assert_eq!(map.get_by_position(7), None);
    }

    #[test]
    fn test_set_rejects_duplicate_key() {
        let mut map = IdentityMap::new();
        map.set("a", 0).unwrap();
        assert_eq!(
            map.set("a", 1),
            Err(DomainError::DuplicateKey("a".to_string()))
        );
        assert_eq!(map.get_by_key("a"), Some(0));
    }

    #[test]
    fn test_children_of_is_a_bijection() {
        let map = IdentityMap::children_of("c", 3);

        assert_eq!(map.len(), 3);
        assert_eq!(map.keys_in_order().collect::<Vec<_>>(), vec!["c/0", "c/1", "c/2"]);
        for position in 0..3 {
            let key = map.get_by_position(position).unwrap();
            assert_eq!(map.get_by_key(key), Some(position));
        }
        assert!(IdentityMap::children_of("c", 0).is_empty());
    }

    #[test]
    fn test_children_of_accepts_further_sets() {
        let mut map = IndexShiftingMap::children_of("c", 2);
        assert_eq!(
            map.set("c/1", 2),
            Err(DomainError::DuplicateKey("c/1".to_string()))
        );
        map.set("c/2", 2).unwrap();
        assert_eq!(map.delete_by_key("c/0").unwrap(), 0);
        assert_eq!(map.get_by_key("c/2"), Some(1));
    }

    #[test]
    fn test_set_rejects_empty_key() {
        let mut map = IdentityMap::new();
        assert_eq!(map.set("", 0), Err(DomainError::InvalidIdentifier(String::new())));
        assert!(map.is_empty());
    }

    #[test]
    fn test_set_rejects_duplicate_position() {
        let mut map = IdentityMap::new();
        map.set("a", 0).unwrap();
        assert_eq!(map.set("b", 0), Err(DomainError::DuplicatePosition(0)));
        assert_eq!(map.get_by_key("b"), None);
    }

    #[test]
    fn test_plain_delete_does_not_shift() {
        let mut map = IdentityMap::new();
        map.set("a", 0).unwrap();
        map.set("b", 1).unwrap();

        assert_eq!(map.delete_by_key("a").unwrap(), 0);
        assert_eq!(map.get_by_key("b"), Some(1));
        assert!(map.delete_by_key("a").is_err());
    }

    #[test]
    fn test_shifting_delete_decrements_later_positions() {
        let mut map = IndexShiftingMap::new();
        for (position, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            map.set(key, position).unwrap();
        }

        assert_eq!(map.delete_by_key("b").unwrap(), 1);

        assert_eq!(map.get_by_key("a"), Some(0));
        assert_eq!(map.get_by_key("c"), Some(1));
        assert_eq!(map.get_by_key("d"), Some(2));
        assert_eq!(map.get_by_key("b"), None);
        assert_eq!(map.get_by_position(3), None);
        assert_eq!(map.keys_in_order().collect::<Vec<_>>(), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_shifting_delete_last_leaves_others() {
        let mut map = IndexShiftingMap::new();
        map.set("a", 0).unwrap();
        map.set("b", 1).unwrap();

        map.delete_by_key("b").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_by_key("a"), Some(0));
        map.set("c", 1).unwrap();
        assert_eq!(map.get_by_position(1), Some("c"));
    }
}
