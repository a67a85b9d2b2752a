//! Maps a Swagger 2.0 operation onto a request and its authorization.

use netconsole_domain::{
    Authorization, BodySelection, FileAttachment, FormDataEntry, HttpMethod, Parameter, Request,
    RequestBody,
};
use serde_json::Value;

use super::document::{resolve, route_template, str_field};

const DEFAULT_CONTENT_TYPE: &str = "application/json";
const MULTIPART: &str = "multipart/form-data";

/// Builds the request for `method` on `path`.
pub fn request_for(
    root: &Value,
    path: &str,
    path_item: &Value,
    method: HttpMethod,
    operation: &Value,
) -> Request {
    let name = str_field(operation, "summary")
        .or_else(|| str_field(operation, "operationId"))
        .map_or_else(|| format!("{} {path}", method.as_str()), str::to_string);

    let mut request = Request::new(name).with_verb(method);
    request.url = format!("{{{{baseUri}}}}{}", route_template(path));
    request.description = str_field(operation, "description").map(str::to_string);

    let consumes = consumes(root, operation);
    let mut body_text = None;
    let mut form = Vec::new();
    for parameter in merged_parameters(root, path_item, operation) {
        let Some(name) = str_field(parameter, "name") else {
            continue;
        };
        match str_field(parameter, "in") {
            Some("path") => request.route_parameters.push(to_parameter(name, parameter)),
            Some("query") => request.query_parameters.push(to_parameter(name, parameter)),
            Some("header") => request.headers.push(to_parameter(name, parameter)),
            Some("body") => body_text = Some(example_body(root, parameter)),
            Some("formData") => form.push((name, parameter)),
            other => tracing::debug!(parameter = name, location = ?other, "parameter skipped"),
        }
    }

    if let Some(text) = body_text {
        let content_type = consumes.first().copied().unwrap_or(DEFAULT_CONTENT_TYPE);
        request = request.with_body(BodySelection::Raw, RequestBody::raw(text, content_type));
    } else if !form.is_empty() {
        request = if consumes.contains(&MULTIPART) {
            let entries = form
                .into_iter()
                .map(|(name, parameter)| {
                    if str_field(parameter, "type") == Some("file") {
                        FormDataEntry::file(name, FileAttachment::reference(""))
                    } else {
                        FormDataEntry::text(name, default_value(parameter))
                    }
                })
                .collect();
            request.with_body(BodySelection::FormData, RequestBody::form_data(entries))
        } else {
            let entries = form
                .into_iter()
                .map(|(name, parameter)| to_parameter(name, parameter))
                .collect();
            request.with_body(
                BodySelection::XWwwFormUrlencoded,
                RequestBody::urlencoded(entries),
            )
        };
    }

    request
}

/// `none` for `security: []`, an empty basic credential when a basic scheme
/// is required, `inherit` otherwise.
pub fn authorization_for(root: &Value, operation: &Value) -> Authorization {
    let Some(requirements) = operation.get("security").and_then(Value::as_array) else {
        return Authorization::Inherit;
    };
    if requirements.is_empty() {
        return Authorization::None;
    }
    let uses_basic = requirements
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|requirement| requirement.keys())
        .any(|scheme| {
            root.get("securityDefinitions")
                .and_then(|definitions| definitions.get(scheme))
                .and_then(|definition| str_field(definition, "type"))
                == Some("basic")
        });
    if uses_basic {
        Authorization::basic("", "")
    } else {
        Authorization::Inherit
    }
}

/// Path-level parameters overridden by operation-level ones with the same
/// name and location.
fn merged_parameters<'a>(root: &'a Value, path_item: &'a Value, operation: &'a Value) -> Vec<&'a Value> {
    let declared = [path_item, operation]
        .into_iter()
        .filter_map(|owner| owner.get("parameters").and_then(Value::as_array))
        .flatten()
        .map(|parameter| resolve(root, parameter));

    let mut merged: Vec<&Value> = Vec::new();
    for parameter in declared {
        let key = (str_field(parameter, "name"), str_field(parameter, "in"));
        match merged
            .iter_mut()
            .find(|seen| (str_field(seen, "name"), str_field(seen, "in")) == key)
        {
            Some(slot) => *slot = parameter,
            None => merged.push(parameter),
        }
    }
    merged
}

fn consumes<'a>(root: &'a Value, operation: &'a Value) -> Vec<&'a str> {
    operation
        .get("consumes")
        .or_else(|| root.get("consumes"))
        .and_then(Value::as_array)
        .map(|types| types.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

fn to_parameter(name: &str, parameter: &Value) -> Parameter {
    Parameter {
        key: name.to_string(),
        value: default_value(parameter),
        description: str_field(parameter, "description").map(str::to_string),
        enabled: true,
    }
}

fn default_value(parameter: &Value) -> String {
    match parameter.get("default").or_else(|| parameter.get("x-example")) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn example_body(root: &Value, parameter: &Value) -> String {
    parameter
        .get("schema")
        .map(|schema| resolve(root, schema))
        .and_then(|schema| schema.get("example"))
        .and_then(|example| serde_json::to_string_pretty(example).ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parameters_map_by_location() {
        let root = json!({
            "parameters": {"trace": {"name": "X-Trace", "in": "header", "default": "on"}}
        });
        let path_item = json!({
            "parameters": [
                {"name": "petId", "in": "path", "required": true},
                {"name": "limit", "in": "query", "default": 5}
            ]
        });
        let operation = json!({
            "operationId": "getPet",
            "parameters": [
                {"name": "limit", "in": "query", "default": 10, "description": "Page size"},
                {"$ref": "#/parameters/trace"}
            ]
        });

        let request = request_for(&root, "/pets/{petId}", &path_item, HttpMethod::Get, &operation);

        assert_eq!(request.name, "getPet");
        assert_eq!(request.url, "{{baseUri}}/pets/:petId");
        assert_eq!(request.route_parameters, vec![Parameter::new("petId", "")]);
        assert_eq!(
            request.query_parameters,
            vec![Parameter::new("limit", "10").with_description("Page size")]
        );
        assert_eq!(request.headers, vec![Parameter::new("X-Trace", "on")]);
        assert_eq!(request.body_selection, BodySelection::None);
    }

    #[test]
    fn test_body_parameter_uses_consumes() {
        let root = json!({"consumes": ["application/xml"]});
        let operation = json!({
            "summary": "Add pet",
            "parameters": [{"name": "pet", "in": "body", "schema": {"example": {"id": 1}}}]
        });

        let request = request_for(&root, "/pets", &json!({}), HttpMethod::Post, &operation);

        assert_eq!(request.name, "Add pet");
        assert_eq!(request.body_selection, BodySelection::Raw);
        assert_eq!(
            request.body,
            RequestBody::raw("{\n  \"id\": 1\n}", "application/xml")
        );
    }

    #[test]
    fn test_form_parameters_follow_multipart() {
        let parameters = json!([
            {"name": "note", "in": "formData", "type": "string"},
            {"name": "photo", "in": "formData", "type": "file"}
        ]);
        let multipart = json!({"consumes": [MULTIPART], "parameters": parameters});
        let request = request_for(&json!({}), "/upload", &json!({}), HttpMethod::Post, &multipart);
        assert_eq!(request.body_selection, BodySelection::FormData);
        assert_eq!(
            request.body.form_data.unwrap()[1],
            FormDataEntry::file("photo", FileAttachment::reference(""))
        );

        let encoded = json!({"parameters": parameters});
        let request = request_for(&json!({}), "/upload", &json!({}), HttpMethod::Post, &encoded);
        assert_eq!(request.body_selection, BodySelection::XWwwFormUrlencoded);
        assert_eq!(request.name, "POST /upload");
    }

    #[test]
    fn test_authorization_from_security() {
        let root = json!({"securityDefinitions": {
            "basicAuth": {"type": "basic"},
            "key": {"type": "apiKey", "in": "header", "name": "X-Key"}
        }});

        assert_eq!(authorization_for(&root, &json!({})), Authorization::Inherit);
        assert_eq!(
            authorization_for(&root, &json!({"security": []})),
            Authorization::None
        );
        assert_eq!(
            authorization_for(&root, &json!({"security": [{"basicAuth": []}]})),
            Authorization::basic("", "")
        );
        assert_eq!(
            authorization_for(&root, &json!({"security": [{"key": []}]})),
            Authorization::Inherit
        );
    }
}
