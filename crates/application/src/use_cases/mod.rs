//! Application use cases (format-independent algorithms over the ports).

mod convert_collection;
mod convert_environments;
#[cfg(test)]
mod mock;
mod resolve_authorization;
mod walk_tree;

pub use convert_collection::ConvertCollection;
pub use convert_environments::ConvertEnvironments;
pub use resolve_authorization::{InheritedAuthorization, resolve_inherited_authorization};
pub use walk_tree::{TreeNode, TreeSummary, summarize, walk_tree};
