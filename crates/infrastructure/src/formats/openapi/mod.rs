//! OpenAPI v2 (Swagger 2.0) format, read-only.

mod collection;
mod document;
mod environment;
mod operation;

pub use collection::OpenApiCollectionAdapter;
pub use environment::OpenApiEnvironmentContainer;

use netconsole_application::{
    AdapterResult, CollectionAdapter, CollectionFormat, EnvironmentContainerAdapter,
    EnvironmentFormat,
};

use collection::read_only;

/// Identifier of the OpenAPI v2 format.
pub const FORMAT_ID: &str = "openapi-v2";

/// The OpenAPI v2 format. Documents can be read and converted, never written.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiFormat;

impl CollectionFormat for OpenApiFormat {
    fn format_id(&self) -> &'static str {
        FORMAT_ID
    }

    fn display_name(&self) -> &'static str {
        "OpenAPI 2.0"
    }

    fn can_write(&self) -> bool {
        false
    }

    fn create_collection(&self, _name: &str) -> AdapterResult<Box<dyn CollectionAdapter>> {
        Err(read_only("create_collection"))
    }

    fn parse(&self, id: &str, text: &str) -> AdapterResult<Box<dyn CollectionAdapter>> {
        Ok(Box::new(OpenApiCollectionAdapter::parse(id, text)?))
    }
}

impl EnvironmentFormat for OpenApiFormat {
    fn format_id(&self) -> &'static str {
        FORMAT_ID
    }

    fn display_name(&self) -> &'static str {
        "OpenAPI 2.0"
    }

    fn can_write(&self) -> bool {
        false
    }

    fn supports_multiple_environments(&self) -> bool {
        true
    }

    fn create_environment_container(
        &self,
        _name: &str,
    ) -> AdapterResult<Box<dyn EnvironmentContainerAdapter>> {
        Err(read_only("create_environment_container"))
    }

    fn parse(&self, id: &str, text: &str) -> AdapterResult<Box<dyn EnvironmentContainerAdapter>> {
        Ok(Box::new(OpenApiEnvironmentContainer::parse(id, text)?))
    }
}
