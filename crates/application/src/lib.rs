//! Netconsole Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits: the uniform collection / environment adapter interface
//!   every dialect implements
//! - Use cases: cross-format conversion, authorization inheritance and tree
//!   walks, written against the ports only
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{AdapterError, AdapterResult};
pub use ports::{
    CollectionAdapter, CollectionFormat, ContainerAdapter, ContainerView, EntryAdapter, EntryView,
    EnvironmentAdapter, EnvironmentContainerAdapter, EnvironmentFormat, EnvironmentView,
    ItemAdapter, ItemView,
};
pub use use_cases::{
    ConvertCollection, ConvertEnvironments, InheritedAuthorization, TreeNode, TreeSummary,
    resolve_inherited_authorization, summarize, walk_tree,
};
