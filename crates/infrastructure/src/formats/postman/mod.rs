//! Postman v2.1 format: collections and single-environment files.

mod collection;
mod environment;
pub mod mapping;
pub mod types;

pub use collection::{PostmanCollectionAdapter, PostmanDialect};
pub use environment::PostmanEnvironmentContainer;

use netconsole_application::{
    AdapterResult, CollectionAdapter, CollectionFormat, EnvironmentContainerAdapter,
    EnvironmentFormat,
};

/// Identifier of the Postman v2.1 format.
pub const FORMAT_ID: &str = "postman-v2.1";

/// The Postman v2.1 collection and environment format.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostmanFormat;

impl CollectionFormat for PostmanFormat {
    fn format_id(&self) -> &'static str {
        FORMAT_ID
    }

    fn display_name(&self) -> &'static str {
        "Postman Collection v2.1"
    }

    fn can_write(&self) -> bool {
        true
    }

    fn create_collection(&self, name: &str) -> AdapterResult<Box<dyn CollectionAdapter>> {
        Ok(Box::new(PostmanCollectionAdapter::create(name)?))
    }

    fn parse(&self, id: &str, text: &str) -> AdapterResult<Box<dyn CollectionAdapter>> {
        Ok(Box::new(PostmanCollectionAdapter::parse(id, text)?))
    }
}

impl EnvironmentFormat for PostmanFormat {
    fn format_id(&self) -> &'static str {
        FORMAT_ID
    }

    fn display_name(&self) -> &'static str {
        "Postman Environment"
    }

    fn can_write(&self) -> bool {
        true
    }

    fn supports_multiple_environments(&self) -> bool {
        false
    }

    fn create_environment_container(
        &self,
        name: &str,
    ) -> AdapterResult<Box<dyn EnvironmentContainerAdapter>> {
        Ok(Box::new(PostmanEnvironmentContainer::create(name)?))
    }

    fn parse(&self, id: &str, text: &str) -> AdapterResult<Box<dyn EnvironmentContainerAdapter>> {
        Ok(Box::new(PostmanEnvironmentContainer::parse(id, text)?))
    }
}
