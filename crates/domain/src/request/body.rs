//! HTTP Request body types

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::Parameter;

/// Which body representation of a request is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BodySelection {
    /// No body
    #[default]
    None,
    /// Raw text body with a content type
    Raw,
    /// Multipart form data
    FormData,
    /// Form URL encoded body
    XWwwFormUrlencoded,
}

/// A file attached to a form-data entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    /// Original file name.
    pub file_name: String,
    /// Content type of the file, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// File bytes, base64 encoded.
    #[serde(default)]
    pub content_base64: String,
}

impl FileAttachment {
    /// Creates an attachment from raw bytes.
    #[must_use]
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            content_base64: STANDARD.encode(bytes),
        }
    }

    /// Creates an attachment that only names a file.
    #[must_use]
    pub fn reference(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            content_base64: String::new(),
        }
    }

    /// Decodes the file bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored content is not valid base64.
    pub fn bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.content_base64)
    }

    /// Returns true if the attachment carries file content.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.content_base64.is_empty()
    }
}

/// A multipart form-data entry: a text value or a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDataEntry {
    /// Field name
    pub key: String,
    /// Text value (ignored when `file` is set)
    #[serde(default)]
    pub value: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the entry is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Attached file, if this is a file field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileAttachment>,
}

const fn default_enabled() -> bool {
    true
}

impl FormDataEntry {
    /// Creates a text field.
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
            enabled: true,
            file: None,
        }
    }

    /// Creates a file field.
    #[must_use]
    pub fn file(key: impl Into<String>, file: FileAttachment) -> Self {
        Self {
            key: key.into(),
            value: String::new(),
            description: None,
            enabled: true,
            file: Some(file),
        }
    }
}

/// Every body component of a request.
///
/// Inactive components are retained so switching the selection back and
/// forth in an editor does not lose input. Only [`RequestBody::active`] may
/// be used to compose what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// Raw text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text_body: Option<String>,
    /// Content type of the raw text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text_body_content_type: Option<String>,
    /// Multipart form-data entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<Vec<FormDataEntry>>,
    /// URL-encoded form entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_www_form_urlencoded: Option<Vec<Parameter>>,
}

/// The body representation selected for the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveBody<'a> {
    /// Nothing is sent.
    None,
    /// Raw text with an optional content type.
    Raw {
        /// Body text
        text: &'a str,
        /// Content type, if set
        content_type: Option<&'a str>,
    },
    /// Multipart form-data entries.
    FormData(&'a [FormDataEntry]),
    /// URL-encoded entries.
    XWwwFormUrlencoded(&'a [Parameter]),
}

impl RequestBody {
    /// Creates a body holding only raw text.
    #[must_use]
    pub fn raw(text: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            raw_text_body: Some(text.into()),
            raw_text_body_content_type: Some(content_type.into()),
            ..Self::default()
        }
    }

    /// Creates a body holding only form-data entries.
    #[must_use]
    pub fn form_data(entries: Vec<FormDataEntry>) -> Self {
        Self {
            form_data: Some(entries),
            ..Self::default()
        }
    }

    /// Creates a body holding only url-encoded entries.
    #[must_use]
    pub fn urlencoded(entries: Vec<Parameter>) -> Self {
        Self {
            x_www_form_urlencoded: Some(entries),
            ..Self::default()
        }
    }

    /// Returns the component chosen by `selection`.
    ///
    /// A selection whose component is missing yields an empty component of
    /// that kind rather than falling back to another one.
    #[must_use]
    pub fn active(&self, selection: BodySelection) -> ActiveBody<'_> {
        match selection {
            BodySelection::None => ActiveBody::None,
            BodySelection::Raw => ActiveBody::Raw {
                text: self.raw_text_body.as_deref().unwrap_or_default(),
                content_type: self.raw_text_body_content_type.as_deref(),
            },
            BodySelection::FormData => {
                ActiveBody::FormData(self.form_data.as_deref().unwrap_or_default())
            }
            BodySelection::XWwwFormUrlencoded => ActiveBody::XWwwFormUrlencoded(
                self.x_www_form_urlencoded.as_deref().unwrap_or_default(),
            ),
        }
    }

    /// Returns true if no component is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw_text_body.is_none()
            && self.raw_text_body_content_type.is_none()
            && self.form_data.is_none()
            && self.x_www_form_urlencoded.is_none()
    }
}
