//! Snapshot writer and JSON decoding helpers shared by the JSON dialects.

use netconsole_application::AdapterError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Failure while writing a snapshot or decoding a JSON document.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// The document model could not be written.
    #[error("cannot write snapshot: {0}")]
    Write(#[from] serde_json::Error),

    /// The text is not JSON, or does not fit the target model.
    #[error("cannot read JSON: {0}")]
    Read(serde_json::Error),

    /// The writer produced bytes that are not UTF-8.
    #[error("snapshot is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<SerializationError> for AdapterError {
    fn from(error: SerializationError) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Writes `value` the way every committed snapshot is written: two-space
/// indentation and a trailing newline.
///
/// # Errors
///
/// `Write` if `value` refuses to serialize.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"  "));
    value.serialize(&mut serializer)?;

    let mut snapshot = String::from_utf8(buffer)?;
    snapshot.push('\n');
    Ok(snapshot)
}

/// Decodes an already parsed value into a typed model.
///
/// # Errors
///
/// `Read` if the value does not fit `T`.
pub fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, SerializationError> {
    serde_json::from_value(value).map_err(SerializationError::Read)
}

/// Parses `text` into an untyped value.
///
/// Format adapters check the document shape field by field on the result
/// before the typed decode, so each missing field gets its own reason.
///
/// # Errors
///
/// `Read` if `text` is not JSON.
pub fn validate_json(text: &str) -> Result<serde_json::Value, SerializationError> {
    serde_json::from_str(text).map_err(SerializationError::Read)
}
