//! Postman Collection v2.1 and Environment type definitions.
//!
//! Only the fields the adapters read or write are modelled; everything else
//! is kept verbatim in flattened `extra` maps.

#![allow(missing_docs)]

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The `info.schema` value of every v2.1 collection.
pub const SCHEMA_V21: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

fn default_method() -> String {
    "GET".to_string()
}

/// Root structure for Postman Collection v2.1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    pub item: Vec<PostmanEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<PostmanAuth>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Collection metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanInfo {
    #[serde(rename = "_postman_id", default, skip_serializing_if = "Option::is_none")]
    pub postman_id: Option<String>,
    pub name: String,
    pub schema: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An element of an `item` array: a folder (it has its own `item` array)
/// or a request (it has a `request`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PostmanEntry {
    Folder(PostmanFolder),
    Request(PostmanRequestItem),
}

impl<'de> Deserialize<'de> for PostmanEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        let Some(object) = value.as_object() else {
            return Err(D::Error::custom("item is not an object"));
        };
        if object.get("item").is_some_and(Value::is_array) {
            serde_json::from_value(value)
                .map(Self::Folder)
                .map_err(D::Error::custom)
        } else if object.contains_key("request") {
            serde_json::from_value(value)
                .map(Self::Request)
                .map_err(D::Error::custom)
        } else {
            Err(D::Error::custom("item is neither a folder nor a request"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanFolder {
    pub name: String,
    pub item: Vec<PostmanEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<PostmanAuth>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanRequestItem {
    pub name: String,
    /// Either a request object or a bare URL string, which reads as a GET.
    #[serde(deserialize_with = "request_or_url")]
    pub request: PostmanRequest,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Postman Request definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanRequest {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub header: Vec<PostmanKeyValue>,
    #[serde(default)]
    pub url: PostmanUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PostmanBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<PostmanAuth>,
    /// A string, or a `{content, type}` object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostmanRequest {
    /// A GET request with no headers, body or auth.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            method: default_method(),
            header: Vec::new(),
            url: PostmanUrl::Raw(url.into()),
            body: None,
            auth: None,
            description: None,
            extra: Map::new(),
        }
    }
}

fn request_or_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PostmanRequest, D::Error> {
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::String(url) => Ok(PostmanRequest::from_url(url)),
        value @ Value::Object(_) => serde_json::from_value(value).map_err(D::Error::custom),
        _ => Err(D::Error::custom("request is neither an object nor a URL string")),
    }
}

/// URL can be either a simple string or a structured object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostmanUrl {
    Raw(String),
    Structured(PostmanUrlObject),
}

impl Default for PostmanUrl {
    fn default() -> Self {
        Self::Raw(String::new())
    }
}

/// Structured URL object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostmanUrlObject {
    #[serde(default)]
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// A dotted string or an array of labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// A string or an array of segments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<PostmanKeyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<PostmanKeyValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Header, query parameter, path variable or url-encoded field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanKeyValue {
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanBody {
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urlencoded: Option<Vec<PostmanKeyValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formdata: Option<Vec<PostmanFormDataParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PostmanBodyOptions>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Form-data parameter (supports file uploads)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanFormDataParam {
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// A path, or an array of paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(rename = "contentType", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body options (e.g., raw language)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostmanBodyOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<PostmanRawOptions>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostmanRawOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanAuth {
    #[serde(rename = "type")]
    pub auth_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<Vec<PostmanAuthParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<Vec<PostmanAuthParam>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostmanAuth {
    /// Get a parameter value by key
    #[must_use]
    pub fn get_param<'a>(params: Option<&'a [PostmanAuthParam]>, key: &str) -> Option<&'a Value> {
        params?
            .iter()
            .find(|p| p.key == key)
            .and_then(|p| p.value.as_ref())
    }
}

/// Auth parameter (key-value pair)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanAuthParam {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
}

/// Root structure for Postman Environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanEnvironment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub values: Vec<PostmanEnvVariable>,
    #[serde(
        rename = "_postman_variable_scope",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub variable_scope: Option<String>,
    #[serde(
        rename = "_postman_exported_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exported_at: Option<String>,
    #[serde(
        rename = "_postman_exported_using",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exported_using: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Postman environment variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanEnvVariable {
    pub key: String,
    /// Usually a string; some exports write numbers or booleans.
    #[serde(default)]
    pub value: Value,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_collection() {
        let json = r#"{
            "info": {
                "name": "Test Collection",
                "_postman_id": "abc123",
                "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
            },
            "item": []
        }"#;

        let collection: PostmanCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.info.name, "Test Collection");
        assert_eq!(collection.info.schema, SCHEMA_V21);
        assert!(collection.item.is_empty());
    }

    #[test]
    fn test_items_are_discriminated_by_shape() {
        let json = r#"[
            {"name": "Users", "item": []},
            {"name": "Create User", "request": {"method": "POST", "url": "https://api.example.com/users"}}
        ]"#;

        let items: Vec<PostmanEntry> = serde_json::from_str(json).unwrap();
        assert!(matches!(items[0], PostmanEntry::Folder(_)));
        let PostmanEntry::Request(item) = &items[1] else {
            panic!("Expected request item");
        };
        assert_eq!(item.request.method, "POST");
        assert_eq!(
            item.request.url,
            PostmanUrl::Raw("https://api.example.com/users".to_string())
        );
    }

    #[test]
    fn test_request_may_be_a_bare_url() {
        let json = r#"{"name": "Ping", "request": "https://example.com/ping"}"#;

        let PostmanEntry::Request(item) = serde_json::from_str(json).unwrap() else {
            panic!("Expected request item");
        };
        assert_eq!(item.request, PostmanRequest::from_url("https://example.com/ping"));
        assert_eq!(item.request.method, "GET");
    }

    #[test]
    fn test_request_of_another_type_is_rejected() {
        let result: Result<PostmanEntry, _> = serde_json::from_str(r#"{"name": "x", "request": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_structured_url() {
        let json = r#"{
            "raw": "https://api.example.com/users?page=1",
            "protocol": "https",
            "host": ["api", "example", "com"],
            "path": ["users"],
            "query": [{"key": "page", "value": "1"}]
        }"#;

        let url: PostmanUrl = serde_json::from_str(json).unwrap();
        let PostmanUrl::Structured(url) = url else {
            panic!("Expected structured url");
        };
        assert_eq!(url.raw, "https://api.example.com/users?page=1");
        assert_eq!(url.query.len(), 1);
    }

    #[test]
    fn test_parse_auth_types() {
        let json = r#"{
            "type": "bearer",
            "bearer": [{"key": "token", "value": "abc123", "type": "string"}]
        }"#;

        let auth: PostmanAuth = serde_json::from_str(json).unwrap();
        assert_eq!(auth.auth_type, "bearer");
        assert_eq!(
            PostmanAuth::get_param(auth.bearer.as_deref(), "token"),
            Some(&Value::from("abc123"))
        );
    }

    #[test]
    fn test_disabled_is_only_written_when_set() {
        let header: PostmanKeyValue =
            serde_json::from_str(r#"{"key": "Accept", "value": "*/*"}"#).unwrap();
        assert!(!header.disabled);
        assert_eq!(
            serde_json::to_string(&header).unwrap(),
            r#"{"key":"Accept","value":"*/*"}"#
        );
    }

    #[test]
    fn test_parse_environment() {
        let json = r#"{
            "id": "env-123",
            "name": "Development",
            "values": [
                {"key": "BASE_URL", "value": "https://dev.api.com", "enabled": true},
                {"key": "RETRIES", "value": 3}
            ],
            "_postman_variable_scope": "environment"
        }"#;

        let env: PostmanEnvironment = serde_json::from_str(json).unwrap();
        assert_eq!(env.name, "Development");
        assert_eq!(env.values.len(), 2);
        assert!(env.values[1].enabled);
        assert_eq!(env.variable_scope.as_deref(), Some("environment"));
    }
}
