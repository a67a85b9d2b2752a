//! Postman v2.1 collection dialect.

use netconsole_application::{AdapterError, AdapterResult};
use netconsole_domain::{
    Authorization, BodySelection, HttpMethod, Parameter, Request, RequestBody, generate_id,
};
use serde_json::{Map, Value};

use super::FORMAT_ID;
use super::mapping::{
    auth_from_postman, auth_to_postman, body_from_postman, body_to_postman, description_text,
    parameter_from_postman, parameter_to_postman,
};
use super::types::{
    PostmanCollection, PostmanEntry, PostmanFolder, PostmanInfo, PostmanRequest,
    PostmanRequestItem, PostmanUrl, PostmanUrlObject, SCHEMA_V21,
};
use crate::formats::tree::{Child, ContainerNode, ItemNode, TreeCollection, TreeDialect};
use crate::serialization::{from_value, validate_json};

/// Root adapter over a Postman v2.1 collection.
pub type PostmanCollectionAdapter = TreeCollection<PostmanDialect>;

/// Postman v2.1 dialect marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostmanDialect;

impl TreeDialect for PostmanDialect {
    const FORMAT_ID: &'static str = FORMAT_ID;

    type Document = PostmanCollection;

    fn create_document(name: &str) -> Self::Document {
        PostmanCollection {
            info: PostmanInfo {
                postman_id: Some(generate_id()),
                name: name.to_string(),
                schema: SCHEMA_V21.to_string(),
                extra: Map::new(),
            },
            item: Vec::new(),
            auth: None,
            extra: Map::new(),
        }
    }

    fn parse_document(text: &str) -> AdapterResult<Self::Document> {
        let invalid = |reason: String| AdapterError::validation(FORMAT_ID, reason);

        let value = validate_json(text).map_err(|e| invalid(format!("not valid JSON: {e}")))?;
        let schema = value
            .get("info")
            .and_then(|info| info.get("schema"))
            .and_then(Value::as_str);
        if schema != Some(SCHEMA_V21) {
            return Err(invalid(format!(
                "info.schema must be {SCHEMA_V21}, found {}",
                schema.unwrap_or("nothing")
            )));
        }
        if !value.get("item").is_some_and(Value::is_array) {
            return Err(invalid("item must be an array".to_string()));
        }
        let collection: PostmanCollection =
            from_value(value).map_err(|e| invalid(format!("malformed items: {e}")))?;
        check_methods(&collection.item).map_err(invalid)?;
        Ok(collection)
    }
}

fn check_methods(entries: &[PostmanEntry]) -> Result<(), String> {
    entries.iter().try_for_each(|entry| match entry {
        PostmanEntry::Folder(folder) => check_methods(&folder.item),
        PostmanEntry::Request(item) => item
            .request
            .method
            .parse::<HttpMethod>()
            .map(|_| ())
            .map_err(|e| format!("request {:?}: {e}", item.name)),
    })
}

fn child_of(entry: &PostmanEntry) -> Child<&PostmanFolder, &PostmanRequestItem> {
    match entry {
        PostmanEntry::Folder(folder) => Child::Folder(folder),
        PostmanEntry::Request(item) => Child::Item(item),
    }
}

fn child_of_mut(entry: &mut PostmanEntry) -> Child<&mut PostmanFolder, &mut PostmanRequestItem> {
    match entry {
        PostmanEntry::Folder(folder) => Child::Folder(folder),
        PostmanEntry::Request(item) => Child::Item(item),
    }
}

fn remove_at(items: &mut Vec<PostmanEntry>, position: usize) {
    if position < items.len() {
        items.remove(position);
    }
}

impl ContainerNode for PostmanCollection {
    type Folder = PostmanFolder;
    type Item = PostmanRequestItem;

    fn name(&self) -> &str {
        &self.info.name
    }

    fn set_name(&mut self, name: &str) {
        self.info.name = name.to_string();
    }

    fn authorization(&self) -> Authorization {
        auth_from_postman(self.auth.as_ref())
    }

    fn set_authorization(&mut self, authorization: Authorization) {
        self.auth = auth_to_postman(&authorization);
    }

    fn children_len(&self) -> usize {
        self.item.len()
    }

    fn child(&self, position: usize) -> Option<Child<&PostmanFolder, &PostmanRequestItem>> {
        self.item.get(position).map(child_of)
    }

    fn child_mut(
        &mut self,
        position: usize,
    ) -> Option<Child<&mut PostmanFolder, &mut PostmanRequestItem>> {
        self.item.get_mut(position).map(child_of_mut)
    }

    fn push_folder(&mut self, name: &str) {
        self.item
            .push(PostmanEntry::Folder(PostmanFolder::new(name)));
    }

    fn push_item(&mut self, request: &Request) {
        self.item
            .push(PostmanEntry::Request(PostmanRequestItem::from(request)));
    }

    fn remove_child(&mut self, position: usize) {
        remove_at(&mut self.item, position);
    }
}

impl PostmanFolder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            item: Vec::new(),
            auth: None,
            extra: Map::new(),
        }
    }
}

impl ContainerNode for PostmanFolder {
    type Folder = Self;
    type Item = PostmanRequestItem;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn authorization(&self) -> Authorization {
        auth_from_postman(self.auth.as_ref())
    }

    fn set_authorization(&mut self, authorization: Authorization) {
        self.auth = auth_to_postman(&authorization);
    }

    fn children_len(&self) -> usize {
        self.item.len()
    }

    fn child(&self, position: usize) -> Option<Child<&Self, &PostmanRequestItem>> {
        self.item.get(position).map(child_of)
    }

    fn child_mut(&mut self, position: usize) -> Option<Child<&mut Self, &mut PostmanRequestItem>> {
        self.item.get_mut(position).map(child_of_mut)
    }

    fn push_folder(&mut self, name: &str) {
        self.item.push(PostmanEntry::Folder(Self::new(name)));
    }

    fn push_item(&mut self, request: &Request) {
        self.item
            .push(PostmanEntry::Request(PostmanRequestItem::from(request)));
    }

    fn remove_child(&mut self, position: usize) {
        remove_at(&mut self.item, position);
    }
}

impl From<&Request> for PostmanRequestItem {
    fn from(request: &Request) -> Self {
        let mut item = Self {
            name: request.name.clone(),
            request: PostmanRequest::from_url(request.url.clone()),
            extra: Map::new(),
        };
        item.set_request(request);
        item
    }
}

impl PostmanUrl {
    /// The URL template as written in `raw`.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Raw(raw) => raw,
            Self::Structured(url) => &url.raw,
        }
    }

    /// The structured form, synthesized from a plain string on first use.
    fn structured(&mut self) -> Option<&mut PostmanUrlObject> {
        if let Self::Raw(raw) = self {
            *self = Self::Structured(PostmanUrlObject::from_raw(raw));
        }
        match self {
            Self::Structured(url) => Some(url),
            Self::Raw(_) => None,
        }
    }
}

impl ItemNode for PostmanRequestItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn authorization(&self) -> Authorization {
        auth_from_postman(self.request.auth.as_ref())
    }

    fn request(&self) -> Request {
        let (query_parameters, route_parameters) = match &self.request.url {
            PostmanUrl::Raw(_) => (Vec::new(), Vec::new()),
            PostmanUrl::Structured(url) => (
                url.query.iter().map(parameter_from_postman).collect(),
                url.variable.iter().map(parameter_from_postman).collect(),
            ),
        };
        let (body_selection, body) = body_from_postman(self.request.body.as_ref());

        Request {
            name: self.name.clone(),
            description: description_text(self.request.description.as_ref()),
            verb: self.request.method.parse().unwrap_or_default(),
            url: self.request.url.raw().to_string(),
            headers: self
                .request
                .header
                .iter()
                .map(parameter_from_postman)
                .collect(),
            query_parameters,
            route_parameters,
            body_selection,
            body,
        }
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn set_authorization(&mut self, authorization: Authorization) {
        self.request.auth = auth_to_postman(&authorization);
    }

    fn set_verb(&mut self, verb: HttpMethod) {
        self.request.method = verb.as_str().to_string();
    }

    fn set_url(&mut self, url: &str) {
        match &mut self.request.url {
            PostmanUrl::Raw(raw) => *raw = url.to_string(),
            PostmanUrl::Structured(structured) => structured.set_raw(url),
        }
    }

    fn set_description(&mut self, description: Option<&str>) {
        self.request.description = description.map(Value::from);
    }

    fn set_headers(&mut self, headers: &[Parameter]) {
        self.request.header = headers.iter().map(parameter_to_postman).collect();
    }

    fn set_query_parameters(&mut self, parameters: &[Parameter]) {
        if parameters.is_empty() && matches!(self.request.url, PostmanUrl::Raw(_)) {
            return;
        }
        if let Some(url) = self.request.url.structured() {
            url.set_query(parameters.iter().map(parameter_to_postman).collect());
        }
    }

    fn set_route_parameters(&mut self, parameters: &[Parameter]) {
        if parameters.is_empty() && matches!(self.request.url, PostmanUrl::Raw(_)) {
            return;
        }
        if let Some(url) = self.request.url.structured() {
            url.variable = parameters.iter().map(parameter_to_postman).collect();
        }
    }

    fn set_body(&mut self, selection: BodySelection, body: &RequestBody) {
        self.request.body = body_to_postman(selection, body, self.request.body.take());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use netconsole_application::{
        CollectionAdapter, ContainerAdapter, ContainerView, EntryAdapter, EntryView,
    };
    use pretty_assertions::assert_eq;

    fn sample() -> String {
        serde_json::json!({
            "info": {"_postman_id": "p1", "name": "Petstore", "schema": SCHEMA_V21},
            "item": [
                {"name": "Pets", "auth": {"type": "bearer", "bearer": [{"key": "token", "value": "t0"}]}, "item": [
                    {"name": "List pets", "request": {
                        "method": "GET",
                        "url": {"raw": "{{base}}/pets?limit=10", "host": ["{{base}}"], "path": ["pets"],
                                "query": [{"key": "limit", "value": "10"}]}
                    }, "response": []}
                ]},
                {"name": "Ping", "request": {"method": "GET", "url": "{{base}}/ping",
                    "auth": {"type": "noauth"}}, "event": [{"listen": "test"}]}
            ],
            "variable": [{"key": "base", "value": "http://localhost"}]
        })
        .to_string()
    }

    #[test]
    fn test_schema_is_required() {
        let text = sample().replace(SCHEMA_V21, "https://example.com/other.json");
        let error = PostmanCollectionAdapter::parse("p", &text).unwrap_err();
        assert!(error.is_validation());

        let error = PostmanCollectionAdapter::parse(
            "p",
            &format!(r#"{{"info": {{"name": "x", "schema": "{SCHEMA_V21}"}}, "item": {{}}}}"#),
        )
        .unwrap_err();
        assert_eq!(
            error,
            AdapterError::validation(FORMAT_ID, "item must be an array")
        );
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let text = sample().replace("\"GET\"", "\"BREW\"");
        let error = PostmanCollectionAdapter::parse("p", &text).unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn test_reads_requests_and_authorization() {
        let collection = PostmanCollectionAdapter::parse("p", &sample()).unwrap();
        assert_eq!(collection.name(), "Petstore");
        assert_eq!(collection.authorization(), Authorization::None);

        let EntryView::Container(folder) = collection.entry("p/0").unwrap() else {
            panic!("Expected folder");
        };
        assert_eq!(folder.authorization(), Authorization::token("t0"));
        let EntryView::Item(item) = folder.entry("p/0/0").unwrap() else {
            panic!("Expected request");
        };
        assert_eq!(item.authorization(), Authorization::Inherit);
        let request = item.request();
        assert_eq!(request.url, "{{base}}/pets?limit=10");
        assert_eq!(request.query_parameters, vec![Parameter::new("limit", "10")]);

        let EntryView::Item(ping) = collection.entry("p/1").unwrap() else {
            panic!("Expected request");
        };
        assert_eq!(ping.authorization(), Authorization::None);
    }

    #[test]
    fn test_query_parameters_synthesize_url_object() {
        let mut collection = PostmanCollectionAdapter::parse("p", &sample()).unwrap();
        {
            let EntryAdapter::Item(mut ping) = collection.entry_mut("p/1").unwrap() else {
                panic!("Expected request");
            };
            ping.set_query_parameters(&[Parameter::new("verbose", "1")])
                .unwrap();
            ping.set_route_parameters(&[]).unwrap();
        }
        collection.commit().unwrap();

        let written: Value = serde_json::from_str(&collection.stringify().unwrap()).unwrap();
        let url = &written["item"][1]["request"]["url"];
        assert_eq!(url["raw"], "{{base}}/ping?verbose=1");
        assert_eq!(url["host"], serde_json::json!(["{{base}}"]));
        assert_eq!(url["query"][0]["key"], "verbose");
        assert_eq!(written["item"][1]["event"][0]["listen"], "test");
    }

    #[test]
    fn test_query_edit_keeps_url_in_step() {
        let mut collection = PostmanCollectionAdapter::parse("p", &sample()).unwrap();
        {
            let EntryAdapter::Container(mut folder) = collection.entry_mut("p/0").unwrap() else {
                panic!("Expected folder");
            };
            let EntryAdapter::Item(mut item) = folder.entry_mut("p/0/0").unwrap() else {
                panic!("Expected request");
            };
            item.set_query_parameters(&[Parameter::new("page", "2")])
                .unwrap();
        }

        let EntryView::Container(folder) = collection.entry("p/0").unwrap() else {
            panic!("Expected folder");
        };
        let EntryView::Item(item) = folder.entry("p/0/0").unwrap() else {
            panic!("Expected request");
        };
        let request = item.request();
        assert_eq!(request.url, "{{base}}/pets?page=2");
        assert_eq!(request.query_parameters, vec![Parameter::new("page", "2")]);
    }

    #[test]
    fn test_bare_url_request_is_read_as_get() {
        let text = serde_json::json!({
            "info": {"name": "Bare", "schema": SCHEMA_V21},
            "item": [{"name": "Ping", "request": "https://example.com/ping"}]
        })
        .to_string();

        let collection = PostmanCollectionAdapter::parse("b", &text).unwrap();
        let EntryView::Item(item) = collection.entry("b/0").unwrap() else {
            panic!("Expected request");
        };
        let request = item.request();
        assert_eq!(request.verb, HttpMethod::Get);
        assert_eq!(request.url, "https://example.com/ping");
        assert_eq!(item.authorization(), Authorization::Inherit);
    }

    #[test]
    fn test_set_url_rederives_structured_url() {
        let mut collection = PostmanCollectionAdapter::parse("p", &sample()).unwrap();
        {
            let EntryAdapter::Container(mut folder) = collection.entry_mut("p/0").unwrap() else {
                panic!("Expected folder");
            };
            let EntryAdapter::Item(mut item) = folder.entry_mut("p/0/0").unwrap() else {
                panic!("Expected request");
            };
            item.set_url("https://pets.example.com:8443/v2/pets").unwrap();
        }
        collection.commit().unwrap();

        let written: Value = serde_json::from_str(&collection.stringify().unwrap()).unwrap();
        let url = &written["item"][0]["item"][0]["request"]["url"];
        assert_eq!(url["protocol"], "https");
        assert_eq!(url["port"], "8443");
        assert_eq!(url["path"], serde_json::json!(["v2", "pets"]));
        assert_eq!(url["query"][0]["key"], "limit");
    }

    #[test]
    fn test_inherit_removes_auth_object() {
        let mut collection = PostmanCollectionAdapter::parse("p", &sample()).unwrap();
        {
            let mut folder = collection.entry_mut("p/0").unwrap();
            folder.set_authorization(Authorization::Inherit).unwrap();
        }
        collection.commit().unwrap();

        let written: Value = serde_json::from_str(&collection.stringify().unwrap()).unwrap();
        assert!(written["item"][0].get("auth").is_none());
    }

    #[test]
    fn test_appended_request_keeps_its_fields() {
        let mut collection = PostmanCollectionAdapter::create("New").unwrap();
        let mut with_params = Request::get("Search", "{{base}}/search/:kind")
            .with_body(BodySelection::Raw, RequestBody::raw("{}", "application/json"));
        with_params.route_parameters = vec![Parameter::new("kind", "books")];
        {
            let mut item = collection.append_item_entry(&with_params).unwrap();
            item.set_authorization(Authorization::basic("u", "p")).unwrap();
        }

        let EntryView::Item(item) = collection.entry(&collection.child_entry_ids()[0]).unwrap()
        else {
            panic!("Expected request");
        };
        assert_eq!(item.request(), with_params);
        assert_eq!(item.authorization(), Authorization::basic("u", "p"));
    }
}
