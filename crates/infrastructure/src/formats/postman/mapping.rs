//! Narrow translations between Postman shapes and domain values.

use netconsole_domain::{
    Authorization, BasicCredentials, BodySelection, FileAttachment, FormDataEntry, Parameter,
    RequestBody, TokenCredentials,
};
use serde_json::{Map, Value};

use super::types::{
    PostmanAuth, PostmanAuthParam, PostmanBody, PostmanBodyOptions, PostmanFormDataParam,
    PostmanKeyValue, PostmanRawOptions, PostmanUrlObject,
};

/// Raw body languages and the content types they stand for.
const RAW_LANGUAGES: [(&str, &str); 5] = [
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("html", "text/html"),
    ("javascript", "application/javascript"),
    ("text", "text/plain"),
];

/// Reads a Postman `auth` object. A missing object means `inherit`.
pub fn auth_from_postman(auth: Option<&PostmanAuth>) -> Authorization {
    let Some(auth) = auth else {
        return Authorization::Inherit;
    };
    match auth.auth_type.as_str() {
        "noauth" => Authorization::None,
        "basic" => {
            let params = auth.basic.as_deref();
            Authorization::Basic {
                basic: BasicCredentials {
                    username: param_text(params, "username"),
                    password: param_text(params, "password"),
                    show_password: PostmanAuth::get_param(params, "showPassword")
                        .is_some_and(|value| value == &Value::Bool(true) || value == "true"),
                },
            }
        }
        "bearer" => Authorization::Token {
            token: TokenCredentials {
                token: param_text(auth.bearer.as_deref(), "token"),
            },
        },
        other => {
            tracing::warn!(auth_type = other, "unsupported Postman auth type read as none");
            Authorization::None
        }
    }
}

/// Writes an authorization as a Postman `auth` object. `inherit` removes it.
pub fn auth_to_postman(authorization: &Authorization) -> Option<PostmanAuth> {
    let auth = |auth_type: &str| PostmanAuth {
        auth_type: auth_type.to_string(),
        basic: None,
        bearer: None,
        extra: Map::new(),
    };
    match authorization {
        Authorization::Inherit => None,
        Authorization::None => Some(auth("noauth")),
        Authorization::Basic { basic } => Some(PostmanAuth {
            basic: Some(vec![
                auth_param("username", Value::from(basic.username.as_str())),
                auth_param("password", Value::from(basic.password.as_str())),
                PostmanAuthParam {
                    key: "showPassword".to_string(),
                    value: Some(Value::Bool(basic.show_password)),
                    param_type: Some("boolean".to_string()),
                },
            ]),
            ..auth("basic")
        }),
        Authorization::Token { token } => Some(PostmanAuth {
            bearer: Some(vec![auth_param("token", Value::from(token.token.as_str()))]),
            ..auth("bearer")
        }),
    }
}

fn auth_param(key: &str, value: Value) -> PostmanAuthParam {
    PostmanAuthParam {
        key: key.to_string(),
        value: Some(value),
        param_type: Some("string".to_string()),
    }
}

fn param_text(params: Option<&[PostmanAuthParam]>, key: &str) -> String {
    match PostmanAuth::get_param(params, key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Text of a description that may be a string or a `{content}` object.
pub fn description_text(description: Option<&Value>) -> Option<String> {
    match description? {
        Value::String(text) => Some(text.clone()),
        Value::Object(object) => object
            .get("content")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Reads a header, query parameter or url-encoded field.
pub fn parameter_from_postman(param: &PostmanKeyValue) -> Parameter {
    Parameter {
        key: param.key.clone(),
        value: param.value.clone().unwrap_or_default(),
        description: description_text(param.description.as_ref()),
        enabled: !param.disabled,
    }
}

/// Writes a header, query parameter or url-encoded field.
pub fn parameter_to_postman(param: &Parameter) -> PostmanKeyValue {
    PostmanKeyValue {
        key: param.key.clone(),
        value: Some(param.value.clone()),
        description: param.description.clone().map(Value::String),
        disabled: !param.enabled,
        extra: Map::new(),
    }
}

/// Content type of a raw body language.
pub fn content_type_for(language: &str) -> Option<&'static str> {
    RAW_LANGUAGES
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, content_type)| *content_type)
}

/// Raw body language of a content type.
pub fn language_for(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if essence == "text/xml" || essence.ends_with("+xml") {
        return "xml";
    }
    if essence.ends_with("+json") {
        return "json";
    }
    RAW_LANGUAGES
        .iter()
        .find(|(_, known)| *known == essence)
        .map_or("text", |(language, _)| *language)
}

/// Reads a Postman body. A missing body selects none.
pub fn body_from_postman(body: Option<&PostmanBody>) -> (BodySelection, RequestBody) {
    let Some(body) = body else {
        return (BodySelection::None, RequestBody::default());
    };

    let content_type = body
        .options
        .as_ref()
        .and_then(|options| options.raw.as_ref())
        .and_then(|raw| raw.language.as_deref())
        .and_then(content_type_for);
    let request_body = RequestBody {
        raw_text_body: body.raw.clone(),
        raw_text_body_content_type: content_type.map(str::to_string),
        form_data: body
            .formdata
            .as_ref()
            .map(|entries| entries.iter().map(form_data_from_postman).collect()),
        x_www_form_urlencoded: body
            .urlencoded
            .as_ref()
            .map(|entries| entries.iter().map(parameter_from_postman).collect()),
    };

    let selection = match body.mode.as_str() {
        "raw" => BodySelection::Raw,
        "formdata" => BodySelection::FormData,
        "urlencoded" => BodySelection::XWwwFormUrlencoded,
        other => {
            tracing::warn!(mode = other, "unsupported Postman body mode read as none");
            BodySelection::None
        }
    };
    (selection, request_body)
}

/// Writes a body. Selecting none removes the body object.
///
/// `previous` supplies the fields of the body being replaced that are not
/// modelled, so they survive the edit.
pub fn body_to_postman(
    selection: BodySelection,
    body: &RequestBody,
    previous: Option<PostmanBody>,
) -> Option<PostmanBody> {
    let mode = match selection {
        BodySelection::None => return None,
        BodySelection::Raw => "raw",
        BodySelection::FormData => "formdata",
        BodySelection::XWwwFormUrlencoded => "urlencoded",
    };

    let (mut options, extra) = previous.map_or_else(
        || (None, Map::new()),
        |previous| (previous.options, previous.extra),
    );
    if let Some(content_type) = body.raw_text_body_content_type.as_deref() {
        options
            .get_or_insert_with(PostmanBodyOptions::default)
            .raw
            .get_or_insert_with(PostmanRawOptions::default)
            .language = Some(language_for(content_type).to_string());
    }

    Some(PostmanBody {
        mode: mode.to_string(),
        raw: body.raw_text_body.clone(),
        urlencoded: body
            .x_www_form_urlencoded
            .as_ref()
            .map(|entries| entries.iter().map(parameter_to_postman).collect()),
        formdata: body
            .form_data
            .as_ref()
            .map(|entries| entries.iter().map(form_data_to_postman).collect()),
        options,
        extra,
    })
}

fn form_data_from_postman(param: &PostmanFormDataParam) -> FormDataEntry {
    let file = (param.param_type.as_deref() == Some("file")).then(|| {
        let file_name = match &param.src {
            Some(Value::String(src)) => src.clone(),
            Some(Value::Array(sources)) => sources
                .first()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        };
        FileAttachment {
            content_type: param.content_type.clone(),
            ..FileAttachment::reference(file_name)
        }
    });

    FormDataEntry {
        key: param.key.clone(),
        value: param.value.clone().unwrap_or_default(),
        description: description_text(param.description.as_ref()),
        enabled: !param.disabled,
        file,
    }
}

fn form_data_to_postman(entry: &FormDataEntry) -> PostmanFormDataParam {
    let mut param = PostmanFormDataParam {
        key: entry.key.clone(),
        value: None,
        src: None,
        description: entry.description.clone().map(Value::String),
        param_type: Some("text".to_string()),
        content_type: None,
        disabled: !entry.enabled,
        extra: Map::new(),
    };
    match &entry.file {
        Some(file) => {
            if file.has_content() {
                tracing::warn!(
                    key = %entry.key,
                    file = %file.file_name,
                    "Postman cannot embed file bytes; only the file name is kept"
                );
            }
            param.param_type = Some("file".to_string());
            param.src = Some(Value::String(file.file_name.clone()));
            param.content_type.clone_from(&file.content_type);
        }
        None => param.value = Some(entry.value.clone()),
    }
    param
}

/// Components of a URL template, split the way Postman splits `raw`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub protocol: Option<String>,
    pub host: Vec<String>,
    pub port: Option<String>,
    pub path: Vec<String>,
}

impl UrlParts {
    /// Splits `raw`, ignoring its query string and fragment.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let base = raw.split(['?', '#']).next().unwrap_or_default();
        let (protocol, rest) = match base.split_once("://") {
            Some((protocol, rest)) => (Some(protocol.to_string()), rest),
            None => (None, base),
        };
        let (authority, path) = match rest.split_once('/') {
            Some((authority, path)) => (authority, Some(path)),
            None => (rest, None),
        };
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
                (host, Some(port.to_string()))
            }
            _ => (authority, None),
        };

        Self {
            protocol,
            host: if host.is_empty() {
                Vec::new()
            } else {
                host.split('.').map(str::to_string).collect()
            },
            port,
            path: path
                .map(|path| path.split('/').map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

fn string_array(items: Vec<String>) -> Option<Value> {
    (!items.is_empty()).then(|| Value::Array(items.into_iter().map(Value::String).collect()))
}

impl PostmanUrlObject {
    /// A URL object for `raw`, with its derived components.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let mut url = Self::default();
        url.set_raw(raw);
        url
    }

    /// Replaces `query` and rewrites the query string of `raw` to match.
    /// Disabled entries stay in `query` but are left out of `raw`.
    pub fn set_query(&mut self, query: Vec<PostmanKeyValue>) {
        let (base, fragment) = match self.raw.split_once('#') {
            Some((base, fragment)) => (base, Some(fragment)),
            None => (self.raw.as_str(), None),
        };
        let mut raw = base.split_once('?').map_or(base, |(path, _)| path).to_string();
        let pairs: Vec<String> = query
            .iter()
            .filter(|entry| !entry.disabled)
            .map(|entry| match &entry.value {
                Some(value) => format!("{}={value}", entry.key),
                None => entry.key.clone(),
            })
            .collect();
        if !pairs.is_empty() {
            raw.push('?');
            raw.push_str(&pairs.join("&"));
        }
        if let Some(fragment) = fragment {
            raw.push('#');
            raw.push_str(fragment);
        }
        self.raw = raw;
        self.query = query;
    }

    /// Replaces `raw` and re-derives protocol, host, port and path.
    pub fn set_raw(&mut self, raw: &str) {
        let parts = UrlParts::parse(raw);
        self.raw = raw.to_string();
        self.protocol = parts.protocol;
        self.host = string_array(parts.host);
        self.port = parts.port;
        self.path = string_array(parts.path);
    }
}
