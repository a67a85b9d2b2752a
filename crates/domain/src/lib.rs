//! Netconsole Domain - Core types
//!
//! This crate defines the format-independent model shared by every
//! collection and environment adapter: requests, authorization values,
//! environments and the identity index that gives tree entries stable IDs.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod collection;
pub mod environment;
pub mod error;
pub mod id;
pub mod identity;
pub mod request;

pub use auth::{Authorization, AuthorizationType, BasicCredentials, TokenCredentials};
pub use collection::{DirtyFlag, NodeType};
pub use environment::Environment;
pub use error::{DomainError, DomainResult};
pub use id::{child_id, generate_id};
pub use identity::{EntryIndex, IdentityMap, IndexRegistry, IndexShiftingMap};
pub use request::{
    ActiveBody, BodySelection, FileAttachment, FormDataEntry, HttpMethod, Parameter, Request,
    RequestBody,
};
