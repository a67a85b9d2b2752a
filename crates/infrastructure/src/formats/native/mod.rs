//! Native format: the tool's own collection and environment files.

mod collection;
mod environment;
pub mod types;

pub use collection::{NativeCollectionAdapter, NativeDialect};
pub use environment::NativeEnvironmentContainer;

use netconsole_application::{
    AdapterResult, CollectionAdapter, CollectionFormat, EnvironmentContainerAdapter,
    EnvironmentFormat,
};

/// Identifier of the native format.
pub const FORMAT_ID: &str = "native";

/// The native collection and environment format.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFormat;

impl CollectionFormat for NativeFormat {
    fn format_id(&self) -> &'static str {
        FORMAT_ID
    }

    fn display_name(&self) -> &'static str {
        "Network Console"
    }

    fn can_write(&self) -> bool {
        true
    }

    fn create_collection(&self, name: &str) -> AdapterResult<Box<dyn CollectionAdapter>> {
        Ok(Box::new(NativeCollectionAdapter::create(name)?))
    }

    fn parse(&self, id: &str, text: &str) -> AdapterResult<Box<dyn CollectionAdapter>> {
        Ok(Box::new(NativeCollectionAdapter::parse(id, text)?))
    }
}

impl EnvironmentFormat for NativeFormat {
    fn format_id(&self) -> &'static str {
        FORMAT_ID
    }

    fn display_name(&self) -> &'static str {
        "Network Console"
    }

    fn can_write(&self) -> bool {
        true
    }

    fn supports_multiple_environments(&self) -> bool {
        true
    }

    fn create_environment_container(
        &self,
        name: &str,
    ) -> AdapterResult<Box<dyn EnvironmentContainerAdapter>> {
        Ok(Box::new(NativeEnvironmentContainer::create(name)?))
    }

    fn parse(&self, id: &str, text: &str) -> AdapterResult<Box<dyn EnvironmentContainerAdapter>> {
        Ok(Box::new(NativeEnvironmentContainer::parse(id, text)?))
    }
}
