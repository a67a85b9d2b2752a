//! Netconsole Infrastructure - Format adapters
//!
//! This crate provides the concrete collection and environment formats
//! behind the ports defined in the application layer, plus the registry that
//! detects which format a document is written in.

pub mod formats;
pub mod registry;
pub mod serialization;

pub use formats::native::{
    NativeCollectionAdapter, NativeEnvironmentContainer, NativeFormat,
    FORMAT_ID as NATIVE_FORMAT_ID,
};
pub use formats::openapi::{
    OpenApiCollectionAdapter, OpenApiEnvironmentContainer, OpenApiFormat,
    FORMAT_ID as OPENAPI_FORMAT_ID,
};
pub use formats::postman::{
    PostmanCollectionAdapter, PostmanEnvironmentContainer, PostmanFormat,
    FORMAT_ID as POSTMAN_FORMAT_ID,
};
pub use registry::{
    FormatRegistry, ReaderConfig, try_read_collection, try_read_environment,
};
pub use serialization::{SerializationError, to_json_stable};
