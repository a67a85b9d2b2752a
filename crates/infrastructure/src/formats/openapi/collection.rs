//! Read-only collection view of a Swagger 2.0 document.
//!
//! Every path becomes a container and every operation on it an item. The
//! tree is synthesized once, when the document is parsed.

use netconsole_application::{
    AdapterError, AdapterResult, CollectionAdapter, ContainerAdapter, ContainerView, EntryAdapter,
    EntryView, ItemAdapter, ItemView,
};
use netconsole_domain::{Authorization, EntryIndex, HttpMethod, NodeType, Request, child_id};
use serde_json::Value;

use super::FORMAT_ID;
use super::document::{load, str_field};
use super::operation::{authorization_for, request_for};

pub(super) fn read_only(operation: &str) -> AdapterError {
    AdapterError::unsupported(format!("{operation} on a read-only {FORMAT_ID} document"))
}

/// Root adapter over a Swagger 2.0 document.
#[derive(Debug)]
pub struct OpenApiCollectionAdapter {
    id: String,
    title: String,
    index: EntryIndex,
    paths: Vec<PathContainer>,
    source: String,
}

#[derive(Debug)]
struct PathContainer {
    id: String,
    path: String,
    index: EntryIndex,
    operations: Vec<Operation>,
}

#[derive(Debug)]
struct Operation {
    id: String,
    authorization: Authorization,
    request: Request,
}

impl OpenApiCollectionAdapter {
    /// Validates `text` and synthesizes the collection tree.
    ///
    /// # Errors
    ///
    /// `FormatValidation` if `text` is not a Swagger 2.0 document.
    pub fn parse(id: &str, text: &str) -> AdapterResult<Self> {
        let document = load(text)?;
        let title = str_field(&document["info"], "title")
            .unwrap_or_default()
            .to_string();

        let paths: Vec<PathContainer> = document["paths"]
            .as_object()
            .into_iter()
            .flatten()
            .filter(|(path, _)| path.starts_with('/'))
            .enumerate()
            .map(|(position, (path, item))| {
                PathContainer::new(&document, child_id(id, position), path, item)
            })
            .collect();

        tracing::debug!(format = FORMAT_ID, id, paths = paths.len(), "document parsed");
        Ok(Self {
            id: id.to_string(),
            title,
            index: EntryIndex::new(id, paths.len()),
            paths,
            source: text.to_string(),
        })
    }
}

impl PathContainer {
    fn new(document: &Value, id: String, path: &str, item: &Value) -> Self {
        let operations: Vec<Operation> = HttpMethod::OPENAPI_KEYS
            .iter()
            .filter_map(|key| Some((HttpMethod::from_openapi_key(key)?, item.get(*key)?)))
            .enumerate()
            .map(|(position, (method, operation))| Operation {
                id: child_id(&id, position),
                authorization: authorization_for(document, operation),
                request: request_for(document, path, item, method, operation),
            })
            .collect();

        Self {
            index: EntryIndex::new(id.clone(), operations.len()),
            id,
            path: path.to_string(),
            operations,
        }
    }
}

impl ContainerView for OpenApiCollectionAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Root
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn authorization(&self) -> Authorization {
        Authorization::None
    }

    fn child_entry_ids(&self) -> Vec<String> {
        self.index.ids()
    }

    fn entry(&self, id: &str) -> AdapterResult<EntryView<'_>> {
        let position = self.index.position(id)?;
        self.paths
            .get(position)
            .map(|container| EntryView::Container(Box::new(container)))
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))
    }
}

impl ContainerAdapter for OpenApiCollectionAdapter {
    fn set_name(&mut self, _name: &str) -> AdapterResult<()> {
        Err(read_only("set_name"))
    }

    fn set_authorization(&mut self, _authorization: Authorization) -> AdapterResult<()> {
        Err(read_only("set_authorization"))
    }

    fn entry_mut(&mut self, _id: &str) -> AdapterResult<EntryAdapter<'_>> {
        Err(read_only("entry_mut"))
    }

    fn append_container_entry(
        &mut self,
        _name: &str,
    ) -> AdapterResult<Box<dyn ContainerAdapter + '_>> {
        Err(read_only("append_container_entry"))
    }

    fn append_item_entry(&mut self, _request: &Request) -> AdapterResult<Box<dyn ItemAdapter + '_>> {
        Err(read_only("append_item_entry"))
    }

    fn delete_entry(&mut self, _id: &str) -> AdapterResult<()> {
        Err(read_only("delete_entry"))
    }
}

impl CollectionAdapter for OpenApiCollectionAdapter {
    fn format_id(&self) -> &'static str {
        FORMAT_ID
    }

    fn is_dirty(&self) -> bool {
        false
    }

    fn commit(&mut self) -> AdapterResult<()> {
        Err(read_only("commit"))
    }

    fn stringify(&self) -> AdapterResult<String> {
        Ok(self.source.clone())
    }
}

impl ContainerView for &PathContainer {
    fn id(&self) -> &str {
        &self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Container
    }

    fn name(&self) -> &str {
        &self.path
    }

    fn authorization(&self) -> Authorization {
        Authorization::Inherit
    }

    fn child_entry_ids(&self) -> Vec<String> {
        self.index.ids()
    }

    fn entry(&self, id: &str) -> AdapterResult<EntryView<'_>> {
        let position = self.index.position(id)?;
        self.operations
            .get(position)
            .map(|operation| EntryView::Item(Box::new(operation)))
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))
    }
}

impl ItemView for &Operation {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.request.name
    }

    fn authorization(&self) -> Authorization {
        self.authorization.clone()
    }

    fn request(&self) -> Request {
        self.request.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PETSTORE: &str = r"swagger: '2.0'
info:
  title: Petstore
  version: 1.0.0
host: petstore.example.com
basePath: /v1
schemes: [http, https]
securityDefinitions:
  basicAuth:
    type: basic
paths:
  /pets:
    get:
      summary: List pets
      parameters:
        - name: limit
          in: query
          type: integer
    post:
      operationId: createPet
      security:
        - basicAuth: []
  /pets/{petId}:
    del:
      security: []
    get: {}
";

    fn adapter() -> OpenApiCollectionAdapter {
        OpenApiCollectionAdapter::parse("api", PETSTORE).unwrap()
    }

    #[test]
    fn test_paths_become_containers() {
        let collection = adapter();
        assert_eq!(collection.name(), "Petstore");
        assert_eq!(collection.authorization(), Authorization::None);
        assert_eq!(collection.child_entry_ids(), vec!["api/0", "api/1"]);

        let EntryView::Container(pets) = collection.entry("api/1").unwrap() else {
            panic!("Expected container");
        };
        assert_eq!(pets.name(), "/pets/{petId}");
        assert_eq!(pets.authorization(), Authorization::Inherit);
        assert_eq!(pets.child_entry_ids(), vec!["api/1/0", "api/1/1"]);
    }

    #[test]
    fn test_operations_follow_method_order() {
        let collection = adapter();
        let EntryView::Container(pets) = collection.entry("api/1").unwrap() else {
            panic!("Expected container");
        };

        let EntryView::Item(get) = pets.entry("api/1/0").unwrap() else {
            panic!("Expected item");
        };
        assert_eq!(get.name(), "GET /pets/{petId}");
        assert_eq!(get.request().url, "{{baseUri}}/pets/:petId");
        assert_eq!(get.authorization(), Authorization::Inherit);

        let EntryView::Item(delete) = pets.entry("api/1/1").unwrap() else {
            panic!("Expected item");
        };
        assert_eq!(delete.request().verb, HttpMethod::Delete);
        assert_eq!(delete.authorization(), Authorization::None);
    }

    #[test]
    fn test_basic_security_reads_as_empty_basic() {
        let collection = adapter();
        let EntryView::Container(pets) = collection.entry("api/0").unwrap() else {
            panic!("Expected container");
        };
        let EntryView::Item(create) = pets.entry("api/0/1").unwrap() else {
            panic!("Expected item");
        };
        assert_eq!(create.name(), "createPet");
        assert_eq!(create.authorization(), Authorization::basic("", ""));
    }

    #[test]
    fn test_every_mutation_is_unsupported() {
        let mut collection = adapter();
        let unsupported = |result: AdapterResult<()>| {
            assert!(matches!(result, Err(AdapterError::UnsupportedOperation(_))));
        };

        unsupported(collection.set_name("Renamed"));
        unsupported(collection.set_authorization(Authorization::token("t")));
        unsupported(collection.delete_entry("api/0"));
        unsupported(collection.commit());
        unsupported(collection.append_container_entry("New").map(|_| ()));
        unsupported(
            collection
                .append_item_entry(&Request::get("New", "/"))
                .map(|_| ()),
        );
        unsupported(collection.entry_mut("api/0").map(|_| ()));

        assert!(!collection.is_dirty());
        assert_eq!(collection.stringify().unwrap(), PETSTORE);
    }

    #[test]
    fn test_unknown_entry_is_not_found() {
        let collection = adapter();
        assert!(matches!(
            collection.entry("api/7"),
            Err(AdapterError::NotFound(_))
        ));
    }
}
