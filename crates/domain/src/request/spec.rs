//! Request specification type

use serde::{Deserialize, Serialize};

use super::{ActiveBody, BodySelection, HttpMethod, Parameter, RequestBody};

/// Complete specification of an HTTP request, as the uniform tree exposes it.
///
/// Serializes to the native collection file's request shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Human-readable name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// HTTP method
    pub verb: HttpMethod,
    /// URL template (may contain `{{variables}}` and `:route` placeholders)
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Vec<Parameter>,
    /// Query string parameters
    #[serde(default)]
    pub query_parameters: Vec<Parameter>,
    /// Values for `:name` placeholders in the URL
    #[serde(default)]
    pub route_parameters: Vec<Parameter>,
    /// Active body representation
    #[serde(default)]
    pub body_selection: BodySelection,
    /// Body components
    #[serde(default)]
    pub body: RequestBody,
}

impl Request {
    /// Creates a request with default values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            verb: HttpMethod::default(),
            url: String::new(),
            headers: Vec::new(),
            query_parameters: Vec::new(),
            route_parameters: Vec::new(),
            body_selection: BodySelection::None,
            body: RequestBody::default(),
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::new(name)
        }
    }

    /// Sets the verb.
    #[must_use]
    pub const fn with_verb(mut self, verb: HttpMethod) -> Self {
        self.verb = verb;
        self
    }

    /// Sets the body and selects which component is active.
    #[must_use]
    pub fn with_body(mut self, selection: BodySelection, body: RequestBody) -> Self {
        self.body_selection = selection;
        self.body = body;
        self
    }

    /// The body that goes on the wire.
    #[must_use]
    pub fn active_body(&self) -> ActiveBody<'_> {
        self.body.active(self.body_selection)
    }

    /// Returns true if the URL contains variable placeholders.
    #[must_use]
    pub fn has_variables(&self) -> bool {
        self.url.contains("{{") && self.url.contains("}}")
    }

    /// Names of the `:name` route placeholders in the URL, in order.
    #[must_use]
    pub fn route_placeholders(&self) -> Vec<&str> {
        self.url
            .split(['/', '?', '#'])
            .filter_map(|segment| segment.strip_prefix(':'))
            .filter(|name| !name.is_empty())
            .collect()
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new("New Request")
    }
}
