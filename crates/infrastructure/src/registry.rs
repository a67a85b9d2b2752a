//! Format registry and detector.
//!
//! The registry is built once and handed to whoever needs to look up or
//! detect a format; there is no global list.

use netconsole_application::{
    AdapterResult, CollectionAdapter, CollectionFormat, EnvironmentContainerAdapter,
    EnvironmentFormat,
};

use crate::formats::native::NativeFormat;
use crate::formats::openapi::OpenApiFormat;
use crate::formats::postman::PostmanFormat;

/// Limits applied to every document handed to the detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Maximum document size in bytes (default: 10MB)
    pub max_document_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_document_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// The known formats, in detection order.
pub struct FormatRegistry {
    config: ReaderConfig,
    collections: Vec<Box<dyn CollectionFormat>>,
    environments: Vec<Box<dyn EnvironmentFormat>>,
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("config", &self.config)
            .field(
                "collections",
                &self.collection_formats().map(|f| f.format_id()).collect::<Vec<_>>(),
            )
            .field(
                "environments",
                &self.environment_formats().map(|f| f.format_id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FormatRegistry {
    /// Native, then Postman v2.1, then OpenAPI v2, with default limits.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    /// The standard formats with custom limits.
    #[must_use]
    pub fn with_config(config: ReaderConfig) -> Self {
        Self {
            config,
            collections: vec![
                Box::new(NativeFormat),
                Box::new(PostmanFormat),
                Box::new(OpenApiFormat),
            ],
            environments: vec![
                Box::new(NativeFormat),
                Box::new(PostmanFormat),
                Box::new(OpenApiFormat),
            ],
        }
    }

    /// Limits applied by the detector.
    #[must_use]
    pub const fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Collection formats in detection order.
    pub fn collection_formats(&self) -> impl Iterator<Item = &dyn CollectionFormat> {
        self.collections.iter().map(AsRef::as_ref)
    }

    /// Environment formats in detection order.
    pub fn environment_formats(&self) -> impl Iterator<Item = &dyn EnvironmentFormat> {
        self.environments.iter().map(AsRef::as_ref)
    }

    /// Looks up a collection format by identifier.
    #[must_use]
    pub fn collection_format(&self, format_id: &str) -> Option<&dyn CollectionFormat> {
        self.collection_formats()
            .find(|format| format.format_id() == format_id)
    }

    /// Looks up an environment format by identifier.
    #[must_use]
    pub fn environment_format(&self, format_id: &str) -> Option<&dyn EnvironmentFormat> {
        self.environment_formats()
            .find(|format| format.format_id() == format_id)
    }

    /// True if `text` is larger than the detector accepts.
    #[must_use]
    pub const fn exceeds_limit(&self, text: &str) -> bool {
        text.len() > self.config.max_document_size
    }

    fn accepts(&self, source_id: &str, text: &str) -> bool {
        if self.exceeds_limit(text) {
            tracing::warn!(
                source = source_id,
                size = text.len(),
                max = self.config.max_document_size,
                "document too large, skipping detection"
            );
            return false;
        }
        true
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Tries every collection format in order and returns the first adapter
/// that accepts `text`, or `None` if no format recognizes it. Documents over
/// the size limit are never parsed and yield `None`.
///
/// # Errors
///
/// Any non-validation error raised by a format while parsing.
pub fn try_read_collection(
    registry: &FormatRegistry,
    source_id: &str,
    text: &str,
) -> AdapterResult<Option<Box<dyn CollectionAdapter>>> {
    if !registry.accepts(source_id, text) {
        return Ok(None);
    }
    for format in registry.collection_formats() {
        if let Some(adapter) = format.try_parse(source_id, text)? {
            tracing::debug!(source = source_id, format = format.format_id(), "collection detected");
            return Ok(Some(adapter));
        }
    }
    tracing::debug!(source = source_id, "no collection format recognized");
    Ok(None)
}

/// Tries every environment format in order and returns the first adapter
/// that accepts `text`, or `None` if no format recognizes it. Documents over
/// the size limit are never parsed and yield `None`.
///
/// # Errors
///
/// Any non-validation error raised by a format while parsing.
pub fn try_read_environment(
    registry: &FormatRegistry,
    source_id: &str,
    text: &str,
) -> AdapterResult<Option<Box<dyn EnvironmentContainerAdapter>>> {
    if !registry.accepts(source_id, text) {
        return Ok(None);
    }
    for format in registry.environment_formats() {
        if let Some(adapter) = format.try_parse(source_id, text)? {
            tracing::debug!(source = source_id, format = format.format_id(), "environments detected");
            return Ok(Some(adapter));
        }
    }
    tracing::debug!(source = source_id, "no environment format recognized");
    Ok(None)
}
