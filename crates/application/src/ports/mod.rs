//! Port definitions (interfaces)
//!
//! Ports define the boundary between the format-independent use cases and
//! the dialect adapters implemented in the infrastructure layer.

mod collection;
mod environment;
mod format;

pub use collection::{
    CollectionAdapter, ContainerAdapter, ContainerView, EntryAdapter, EntryView, ItemAdapter,
    ItemView,
};
pub use environment::{EnvironmentAdapter, EnvironmentContainerAdapter, EnvironmentView};
pub use format::{CollectionFormat, EnvironmentFormat};
