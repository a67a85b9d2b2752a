//! Native collection dialect.

use netconsole_application::{AdapterError, AdapterResult};
use netconsole_domain::{Authorization, BodySelection, HttpMethod, Parameter, Request, RequestBody};
use serde_json::Value;

use super::FORMAT_ID;
use super::types::{NativeCollectionDocument, NativeEntry, NativeFolder, NativeRequestEntry};
use crate::formats::tree::{Child, ContainerNode, ItemNode, TreeCollection, TreeDialect};
use crate::serialization::{from_value, validate_json};

/// Root adapter over a native collection document.
pub type NativeCollectionAdapter = TreeCollection<NativeDialect>;

/// Native collection dialect marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialect;

impl TreeDialect for NativeDialect {
    const FORMAT_ID: &'static str = FORMAT_ID;

    type Document = NativeCollectionDocument;

    fn create_document(name: &str) -> Self::Document {
        NativeCollectionDocument::new(name)
    }

    fn parse_document(text: &str) -> AdapterResult<Self::Document> {
        let invalid = |reason: String| AdapterError::validation(FORMAT_ID, reason);

        let value = validate_json(text).map_err(|e| invalid(format!("not valid JSON: {e}")))?;
        if value
            .get("meta")
            .and_then(|meta| meta.get("networkConsoleCollectionVersion"))
            .is_none()
        {
            return Err(invalid(
                "missing meta.networkConsoleCollectionVersion".to_string(),
            ));
        }
        if !value.get("name").is_some_and(Value::is_string) {
            return Err(invalid("missing collection name".to_string()));
        }
        if !value.get("entries").is_some_and(Value::is_array) {
            return Err(invalid("entries must be an array".to_string()));
        }
        from_value(value).map_err(|e| invalid(format!("malformed entries: {e}")))
    }
}

impl ContainerNode for NativeCollectionDocument {
    type Folder = NativeFolder;
    type Item = NativeRequestEntry;

    fn name(&self) -> &str {
        self.root.name()
    }

    fn set_name(&mut self, name: &str) {
        self.root.set_name(name);
    }

    fn authorization(&self) -> Authorization {
        self.root.authorization()
    }

    fn set_authorization(&mut self, authorization: Authorization) {
        self.root.set_authorization(authorization);
    }

    fn children_len(&self) -> usize {
        self.root.children_len()
    }

    fn child(&self, position: usize) -> Option<Child<&NativeFolder, &NativeRequestEntry>> {
        self.root.child(position)
    }

    fn child_mut(
        &mut self,
        position: usize,
    ) -> Option<Child<&mut NativeFolder, &mut NativeRequestEntry>> {
        self.root.child_mut(position)
    }

    fn push_folder(&mut self, name: &str) {
        self.root.push_folder(name);
    }

    fn push_item(&mut self, request: &Request) {
        self.root.push_item(request);
    }

    fn remove_child(&mut self, position: usize) {
        self.root.remove_child(position);
    }
}

impl ContainerNode for NativeFolder {
    type Folder = Self;
    type Item = NativeRequestEntry;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn authorization(&self) -> Authorization {
        self.auth.clone().unwrap_or(Authorization::Inherit)
    }

    fn set_authorization(&mut self, authorization: Authorization) {
        self.auth = Some(authorization);
    }

    fn children_len(&self) -> usize {
        self.entries.len()
    }

    fn child(&self, position: usize) -> Option<Child<&Self, &NativeRequestEntry>> {
        self.entries.get(position).map(|entry| match entry {
            NativeEntry::Folder(folder) => Child::Folder(folder),
            NativeEntry::Request(request) => Child::Item(request),
        })
    }

    fn child_mut(&mut self, position: usize) -> Option<Child<&mut Self, &mut NativeRequestEntry>> {
        self.entries.get_mut(position).map(|entry| match entry {
            NativeEntry::Folder(folder) => Child::Folder(folder),
            NativeEntry::Request(request) => Child::Item(request),
        })
    }

    fn push_folder(&mut self, name: &str) {
        self.entries.push(NativeEntry::Folder(Self::new(name)));
    }

    fn push_item(&mut self, request: &Request) {
        self.entries
            .push(NativeEntry::Request(NativeRequestEntry::from(request)));
    }

    fn remove_child(&mut self, position: usize) {
        if position < self.entries.len() {
            self.entries.remove(position);
        }
    }
}

impl ItemNode for NativeRequestEntry {
    fn name(&self) -> &str {
        &self.request.spec.name
    }

    fn authorization(&self) -> Authorization {
        self.auth.clone().unwrap_or(Authorization::Inherit)
    }

    fn request(&self) -> Request {
        self.request.spec.clone()
    }

    fn set_name(&mut self, name: &str) {
        self.request.spec.name = name.to_string();
    }

    fn set_authorization(&mut self, authorization: Authorization) {
        self.auth = Some(authorization);
    }

    fn set_verb(&mut self, verb: HttpMethod) {
        self.request.spec.verb = verb;
    }

    fn set_url(&mut self, url: &str) {
        self.request.spec.url = url.to_string();
    }

    fn set_description(&mut self, description: Option<&str>) {
        self.request.spec.description = description.map(str::to_string);
    }

    fn set_headers(&mut self, headers: &[Parameter]) {
        self.request.spec.headers = headers.to_vec();
    }

    fn set_query_parameters(&mut self, parameters: &[Parameter]) {
        self.request.spec.query_parameters = parameters.to_vec();
    }

    fn set_route_parameters(&mut self, parameters: &[Parameter]) {
        self.request.spec.route_parameters = parameters.to_vec();
    }

    fn set_body(&mut self, selection: BodySelection, body: &RequestBody) {
        self.request.spec.body_selection = selection;
        self.request.spec.body = body.clone();
    }

    fn set_request(&mut self, request: &Request) {
        self.request.spec = request.clone();
    }
}
