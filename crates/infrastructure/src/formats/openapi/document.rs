//! Swagger 2.0 loading, validation and reference lookup.

use std::sync::LazyLock;

use netconsole_application::{AdapterError, AdapterResult};
use regex::Regex;
use serde_json::Value;

use super::FORMAT_ID;
use crate::serialization::validate_json;

/// Longest chain of local references followed before giving up.
const MAX_REF_DEPTH: usize = 16;

static PATH_PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\{([^{}/]+)\}"));

/// Decodes `text` as JSON or YAML and validates it as a Swagger 2.0 document.
///
/// Only the supplied text is read. References that do not start with `#/`
/// are left alone and never fetched.
///
/// # Errors
///
/// `FormatValidation` naming the first check that failed.
pub fn load(text: &str) -> AdapterResult<Value> {
    let invalid = |reason: String| AdapterError::validation(FORMAT_ID, reason);

    let document = if text.trim_start().starts_with('{') {
        validate_json(text).map_err(|e| invalid(format!("not valid JSON: {e}")))?
    } else {
        serde_yaml::from_str::<Value>(text).map_err(|e| invalid(format!("not valid YAML: {e}")))?
    };

    if document.get("swagger").and_then(Value::as_str) != Some("2.0") {
        return Err(invalid("swagger must be \"2.0\"".to_string()));
    }
    let info = document.get("info");
    for field in ["title", "version"] {
        if !info
            .and_then(|info| info.get(field))
            .is_some_and(Value::is_string)
        {
            return Err(invalid(format!("info.{field} must be a string")));
        }
    }
    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return Err(invalid("paths must be an object".to_string()));
    };
    if let Some(key) = paths
        .keys()
        .find(|key| !key.starts_with('/') && !key.starts_with("x-"))
    {
        return Err(invalid(format!("path {key:?} does not start with '/'")));
    }
    check_refs(&document, &document).map_err(invalid)?;

    Ok(document)
}

fn check_refs(root: &Value, value: &Value) -> Result<(), String> {
    match value {
        Value::Object(object) => {
            if let Some(reference) = object.get("$ref").and_then(Value::as_str)
                && let Some(pointer) = reference.strip_prefix('#')
                && root.pointer(pointer).is_none()
            {
                return Err(format!("unresolved reference {reference}"));
            }
            object.values().try_for_each(|child| check_refs(root, child))
        }
        Value::Array(items) => items.iter().try_for_each(|child| check_refs(root, child)),
        _ => Ok(()),
    }
}

/// Follows local `$ref` links from `value` to the object they name.
///
/// Values without a local reference are returned unchanged.
pub fn resolve<'a>(root: &'a Value, mut value: &'a Value) -> &'a Value {
    for _ in 0..MAX_REF_DEPTH {
        let Some(target) = value
            .get("$ref")
            .and_then(Value::as_str)
            .and_then(|reference| reference.strip_prefix('#'))
            .and_then(|pointer| root.pointer(pointer))
        else {
            break;
        };
        value = target;
    }
    value
}

/// Rewrites `{name}` path placeholders as `:name`.
pub fn route_template(path: &str) -> String {
    match &*PATH_PLACEHOLDER {
        Ok(placeholder) => placeholder.replace_all(path, ":$1").into_owned(),
        Err(_) => path.to_string(),
    }
}

/// A string field of `value`.
pub fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}
