//! Native collection and environment document types.
//!
//! Every object keeps the fields it does not model in a flattened `extra`
//! map, so editing a document never drops data written by another tool.

#![allow(missing_docs)]

use netconsole_domain::{Authorization, Parameter, Request};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Version written into new collection documents.
pub const COLLECTION_VERSION: &str = "1.0";

/// Version written into new environment documents.
pub const ENVIRONMENT_VERSION: &str = "1.0";

/// Root of a native collection file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeCollectionDocument {
    pub meta: NativeCollectionMeta,
    #[serde(flatten)]
    pub root: NativeFolder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeCollectionMeta {
    #[serde(rename = "networkConsoleCollectionVersion")]
    pub version: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A folder, or the body of the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeFolder {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Authorization>,
    pub entries: Vec<NativeEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An element of an `entries` array.
///
/// Objects with an `entries` array are folders; objects with a `request`
/// are requests. Anything else is rejected when the document is parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NativeEntry {
    Folder(NativeFolder),
    Request(NativeRequestEntry),
}

impl<'de> Deserialize<'de> for NativeEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        let Some(object) = value.as_object() else {
            return Err(D::Error::custom("entry is not an object"));
        };
        if object.contains_key("entries") {
            serde_json::from_value(value)
                .map(Self::Folder)
                .map_err(D::Error::custom)
        } else if object.contains_key("request") {
            serde_json::from_value(value)
                .map(Self::Request)
                .map_err(D::Error::custom)
        } else {
            Err(D::Error::custom("entry is neither a folder nor a request"))
        }
    }
}

/// A request entry: the item's authorization plus the request itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeRequestEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Authorization>,
    pub request: NativeRequest,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeRequest {
    #[serde(flatten)]
    pub spec: Request,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NativeFolder {
    /// An empty folder that inherits its parent's authorization.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auth: Some(Authorization::Inherit),
            entries: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl NativeCollectionDocument {
    /// An empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: NativeCollectionMeta {
                version: Value::from(COLLECTION_VERSION),
                extra: Map::new(),
            },
            root: NativeFolder {
                auth: Some(Authorization::None),
                ..NativeFolder::new(name)
            },
        }
    }
}

impl From<&Request> for NativeRequestEntry {
    fn from(request: &Request) -> Self {
        Self {
            auth: Some(Authorization::Inherit),
            request: NativeRequest {
                spec: request.clone(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }
}

/// Root of a native environment file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeEnvironmentDocument {
    pub meta: NativeEnvironmentMeta,
    pub name: String,
    pub environments: Vec<NativeEnvironment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeEnvironmentMeta {
    #[serde(rename = "networkConsoleEnvironmentVersion")]
    pub version: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeEnvironment {
    pub name: String,
    #[serde(default)]
    pub variables: Vec<Parameter>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NativeEnvironment {
    /// An environment without variables.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl NativeEnvironmentDocument {
    /// A file holding no environments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: NativeEnvironmentMeta {
                version: Value::from(ENVIRONMENT_VERSION),
                extra: Map::new(),
            },
            name: name.into(),
            environments: Vec::new(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use netconsole_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_entries_are_discriminated_by_shape() {
        let entries: Vec<NativeEntry> = serde_json::from_value(json!([
            {"name": "Users", "entries": []},
            {"auth": {"type": "inherit"}, "request": {"name": "List", "verb": "GET", "url": "/"}}
        ]))
        .unwrap();

        assert!(matches!(entries[0], NativeEntry::Folder(_)));
        let NativeEntry::Request(entry) = &entries[1] else {
            panic!("Expected request entry");
        };
        assert_eq!(entry.auth, Some(Authorization::Inherit));
        assert_eq!(entry.request.spec.verb, HttpMethod::Get);
    }

    #[test]
    fn test_unknown_entry_shape_is_rejected() {
        let result: Result<NativeEntry, _> = serde_json::from_value(json!({"name": "x"}));
        let error = result.unwrap_err().to_string();
        assert!(error.contains("neither a folder nor a request"));
    }

    #[test]
    fn test_unknown_fields_survive_a_roundtrip() {
        let input = json!({
            "meta": {"networkConsoleCollectionVersion": "1.0", "exportedBy": "tool"},
            "name": "API",
            "entries": [{
                "request": {"name": "a", "verb": "POST", "url": "/", "timeoutMs": 5},
                "pinned": true
            }],
            "color": "blue"
        });

        let document: NativeCollectionDocument = serde_json::from_value(input).unwrap();
        assert_eq!(document.root.extra["color"], "blue");
        assert_eq!(document.meta.extra["exportedBy"], "tool");

        let output = serde_json::to_value(&document).unwrap();
        assert_eq!(output["color"], "blue");
        assert_eq!(output["entries"][0]["pinned"], true);
        assert_eq!(output["entries"][0]["request"]["timeoutMs"], 5);
        assert_eq!(output["entries"][0]["request"]["verb"], "POST");
    }

    #[test]
    fn test_basic_without_payload_is_rejected() {
        let result: Result<NativeFolder, _> = serde_json::from_value(json!({
            "name": "x",
            "auth": {"type": "basic"},
            "entries": []
        }));
        assert!(result.is_err());
    }
}
