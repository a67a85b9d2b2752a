//! Modification tracking shared between a root adapter and its wrappers.

use std::cell::Cell;

/// "Modified since last commit" flag.
///
/// A root adapter owns one and lends `&DirtyFlag` to every child wrapper it
/// hands out; setters call [`DirtyFlag::mark`]. Only the root clears it.
#[derive(Debug, Default)]
pub struct DirtyFlag(Cell<bool>);

impl DirtyFlag {
    /// Creates a clean flag.
    #[must_use]
    pub const fn new() -> Self {
        Self(Cell::new(false))
    }

    /// Records a modification.
    pub fn mark(&self) {
        self.0.set(true);
    }

    /// Returns true if a modification happened since the last clear.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.0.get()
    }

    /// Clears the flag after a commit.
    pub fn clear(&self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_through_shared_reference() {
        let flag = DirtyFlag::new();
        let lent = &flag;
        assert!(!flag.is_dirty());
        lent.mark();
        assert!(flag.is_dirty());
        flag.clear();
        assert!(!flag.is_dirty());
    }
}
