//! Collection tree node kinds

mod dirty;

pub use dirty::DirtyFlag;

use std::fmt;

/// The role of a node in a collection tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// The collection itself.
    Root,
    /// A folder.
    Container,
    /// A request.
    Item,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Container => write!(f, "container"),
            Self::Item => write!(f, "item"),
        }
    }
}
