//! Format ports: factories that create and parse adapters.

use super::{CollectionAdapter, EnvironmentContainerAdapter};
use crate::error::AdapterResult;

/// A collection dialect.
pub trait CollectionFormat {
    /// Stable identifier, e.g. `"postman-v2.1"`.
    fn format_id(&self) -> &'static str;

    /// Human-readable name.
    fn display_name(&self) -> &'static str;

    /// Whether adapters of this format accept mutations.
    fn can_write(&self) -> bool;

    /// Creates a minimal valid document named `name`.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` if the format is read-only.
    fn create_collection(&self, name: &str) -> AdapterResult<Box<dyn CollectionAdapter>>;

    /// Wraps `text`, validating its structure.
    ///
    /// # Errors
    ///
    /// `FormatValidation` if `text` is malformed or another dialect.
    fn parse(&self, id: &str, text: &str) -> AdapterResult<Box<dyn CollectionAdapter>>;

    /// Like [`CollectionFormat::parse`] but turns validation failures into
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Any error other than `FormatValidation`.
    fn try_parse(&self, id: &str, text: &str) -> AdapterResult<Option<Box<dyn CollectionAdapter>>> {
        match self.parse(id, text) {
            Ok(adapter) => Ok(Some(adapter)),
            Err(error) if error.is_validation() => {
                tracing::debug!(format = self.format_id(), %error, "document rejected");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

/// An environment dialect.
pub trait EnvironmentFormat {
    /// Stable identifier, e.g. `"postman-v2.1"`.
    fn format_id(&self) -> &'static str;

    /// Human-readable name.
    fn display_name(&self) -> &'static str;

    /// Whether adapters of this format accept mutations.
    fn can_write(&self) -> bool;

    /// Whether one file may hold more than one environment.
    fn supports_multiple_environments(&self) -> bool;

    /// Creates a minimal valid file named `name`.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` if the format is read-only.
    fn create_environment_container(
        &self,
        name: &str,
    ) -> AdapterResult<Box<dyn EnvironmentContainerAdapter>>;

    /// Wraps `text`, validating its structure.
    ///
    /// # Errors
    ///
    /// `FormatValidation` if `text` is malformed or another dialect.
    fn parse(&self, id: &str, text: &str) -> AdapterResult<Box<dyn EnvironmentContainerAdapter>>;

    /// Like [`EnvironmentFormat::parse`] but turns validation failures into
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Any error other than `FormatValidation`.
    fn try_parse(
        &self,
        id: &str,
        text: &str,
    ) -> AdapterResult<Option<Box<dyn EnvironmentContainerAdapter>>> {
        match self.parse(id, text) {
            Ok(adapter) => Ok(Some(adapter)),
            Err(error) if error.is_validation() => {
                tracing::debug!(format = self.format_id(), %error, "environment rejected");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}
