//! Generic tree adapters shared by the writable collection formats.
//!
//! A writable dialect only describes how to read and edit its own document
//! nodes ([`ContainerNode`], [`ItemNode`]) and how to create and parse a
//! document ([`TreeDialect`]). Identity indices, dirty tracking, snapshots
//! and the port implementations live here once.

use netconsole_application::{
    AdapterError, AdapterResult, CollectionAdapter, ContainerAdapter, ContainerView, EntryAdapter,
    EntryView, ItemAdapter, ItemView,
};
use netconsole_domain::{
    Authorization, BodySelection, DirtyFlag, EntryIndex, HttpMethod, IndexRegistry, NodeType,
    Parameter, Request, RequestBody, child_id, generate_id,
};
use serde::Serialize;

use crate::serialization::to_json_stable;

/// A direct child of a container node.
#[derive(Debug)]
pub enum Child<F, I> {
    /// A folder.
    Folder(F),
    /// A request.
    Item(I),
}

/// A root or folder of a writable document.
///
/// Setters are infallible: documents are validated once, when parsed.
pub trait ContainerNode: 'static {
    /// Folder type of this document.
    type Folder: ContainerNode<Folder = Self::Folder, Item = Self::Item>;
    /// Request type of this document.
    type Item: ItemNode;

    /// Display name.
    fn name(&self) -> &str;
    /// Renames the node.
    fn set_name(&mut self, name: &str);
    /// Stored authorization; a missing one reads as `inherit`.
    fn authorization(&self) -> Authorization;
    /// Stores `authorization`.
    fn set_authorization(&mut self, authorization: Authorization);
    /// Number of children.
    fn children_len(&self) -> usize;
    /// Child at `position`.
    fn child(&self, position: usize) -> Option<Child<&Self::Folder, &Self::Item>>;
    /// Child at `position`, for editing.
    fn child_mut(&mut self, position: usize) -> Option<Child<&mut Self::Folder, &mut Self::Item>>;
    /// Appends an empty folder.
    fn push_folder(&mut self, name: &str);
    /// Appends a request.
    fn push_item(&mut self, request: &Request);
    /// Removes the child at `position`.
    fn remove_child(&mut self, position: usize);
}

/// A request node of a writable document.
pub trait ItemNode: 'static {
    /// Display name.
    fn name(&self) -> &str;
    /// Stored authorization; a missing one reads as `inherit`.
    fn authorization(&self) -> Authorization;
    /// The request in domain form.
    fn request(&self) -> Request;
    /// Renames the item and its request.
    fn set_name(&mut self, name: &str);
    /// Stores `authorization`.
    fn set_authorization(&mut self, authorization: Authorization);
    /// Replaces the verb.
    fn set_verb(&mut self, verb: HttpMethod);
    /// Replaces the URL template.
    fn set_url(&mut self, url: &str);
    /// Replaces or clears the description.
    fn set_description(&mut self, description: Option<&str>);
    /// Replaces the headers.
    fn set_headers(&mut self, headers: &[Parameter]);
    /// Replaces the query parameters.
    fn set_query_parameters(&mut self, parameters: &[Parameter]);
    /// Replaces the route parameters.
    fn set_route_parameters(&mut self, parameters: &[Parameter]);
    /// Replaces the body.
    fn set_body(&mut self, selection: BodySelection, body: &RequestBody);

    /// Replaces every request field.
    fn set_request(&mut self, request: &Request) {
        self.set_name(&request.name);
        self.set_verb(request.verb);
        self.set_url(&request.url);
        self.set_description(request.description.as_deref());
        self.set_headers(&request.headers);
        self.set_query_parameters(&request.query_parameters);
        self.set_route_parameters(&request.route_parameters);
        self.set_body(request.body_selection, &request.body);
    }
}

/// A writable collection dialect.
pub trait TreeDialect: 'static {
    /// Stable format identifier.
    const FORMAT_ID: &'static str;

    /// Root document type.
    type Document: ContainerNode + Serialize;

    /// A minimal valid document named `name`.
    fn create_document(name: &str) -> Self::Document;

    /// Validates and decodes `text`.
    ///
    /// # Errors
    ///
    /// `FormatValidation` if `text` is not a document of this dialect.
    fn parse_document(text: &str) -> AdapterResult<Self::Document>;
}

/// Root adapter over a writable document.
pub struct TreeCollection<D: TreeDialect> {
    id: String,
    document: D::Document,
    indices: IndexRegistry,
    dirty: DirtyFlag,
    snapshot: String,
}

impl<D: TreeDialect> std::fmt::Debug for TreeCollection<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeCollection")
            .field("format", &D::FORMAT_ID)
            .field("id", &self.id)
            .field("dirty", &self.dirty.is_dirty())
            .finish_non_exhaustive()
    }
}

impl<D: TreeDialect> TreeCollection<D> {
    /// Creates a minimal document named `name` with a fresh identifier.
    ///
    /// # Errors
    ///
    /// `Serialization` if the initial snapshot cannot be written.
    pub fn create(name: &str) -> AdapterResult<Self> {
        let document = D::create_document(name);
        let snapshot = to_json_stable(&document)?;
        Ok(Self::wrap(generate_id(), document, snapshot))
    }

    /// Wraps `text`, which becomes the committed snapshot.
    ///
    /// # Errors
    ///
    /// `FormatValidation` if `text` is not a document of this dialect.
    pub fn parse(id: &str, text: &str) -> AdapterResult<Self> {
        let document = D::parse_document(text)?;
        tracing::debug!(format = D::FORMAT_ID, id, "document parsed");
        Ok(Self::wrap(id.to_string(), document, text.to_string()))
    }

    fn wrap(id: String, document: D::Document, snapshot: String) -> Self {
        let mut indices = IndexRegistry::new();
        register_subtree(&document, &id, &mut indices);
        Self {
            id,
            document,
            indices,
            dirty: DirtyFlag::new(),
            snapshot,
        }
    }

    /// The decoded document.
    #[must_use]
    pub const fn document(&self) -> &D::Document {
        &self.document
    }

    fn view(&self) -> ContainerRef<'_, D::Document> {
        ContainerRef {
            id: self.id.clone(),
            node_type: NodeType::Root,
            node: &self.document,
            indices: &self.indices,
        }
    }

    fn edit(&mut self) -> ContainerMut<'_, D::Document> {
        ContainerMut {
            id: self.id.clone(),
            node_type: NodeType::Root,
            node: &mut self.document,
            indices: &mut self.indices,
            dirty: &self.dirty,
        }
    }
}

fn register_subtree<N: ContainerNode>(node: &N, id: &str, indices: &mut IndexRegistry) {
    indices.register(id, node.children_len());
    for position in 0..node.children_len() {
        if let Some(Child::Folder(folder)) = node.child(position) {
            register_subtree(folder, &child_id(id, position), indices);
        }
    }
}

fn normalized(node_type: NodeType, authorization: Authorization) -> Authorization {
    if node_type == NodeType::Root {
        authorization.for_root()
    } else {
        authorization
    }
}

impl<D: TreeDialect> ContainerView for TreeCollection<D> {
    fn id(&self) -> &str {
        &self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Root
    }

    fn name(&self) -> &str {
        self.document.name()
    }

    fn authorization(&self) -> Authorization {
        self.document.authorization().for_root()
    }

    fn child_entry_ids(&self) -> Vec<String> {
        self.view().child_entry_ids()
    }

    fn entry(&self, id: &str) -> AdapterResult<EntryView<'_>> {
        self.view().lookup(id)
    }
}

impl<D: TreeDialect> ContainerAdapter for TreeCollection<D> {
    fn set_name(&mut self, name: &str) -> AdapterResult<()> {
        self.edit().rename(name)
    }

    fn set_authorization(&mut self, authorization: Authorization) -> AdapterResult<()> {
        self.edit().store_authorization(authorization)
    }

    fn entry_mut(&mut self, id: &str) -> AdapterResult<EntryAdapter<'_>> {
        self.edit().into_entry(id)
    }

    fn append_container_entry(
        &mut self,
        name: &str,
    ) -> AdapterResult<Box<dyn ContainerAdapter + '_>> {
        Ok(Box::new(self.edit().into_appended_container(name)?))
    }

    fn append_item_entry(&mut self, request: &Request) -> AdapterResult<Box<dyn ItemAdapter + '_>> {
        Ok(Box::new(self.edit().into_appended_item(request)?))
    }

    fn delete_entry(&mut self, id: &str) -> AdapterResult<()> {
        self.edit().remove_entry(id)
    }
}

impl<D: TreeDialect> CollectionAdapter for TreeCollection<D> {
    fn format_id(&self) -> &'static str {
        D::FORMAT_ID
    }

    fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    fn commit(&mut self) -> AdapterResult<()> {
        self.snapshot = to_json_stable(&self.document)?;
        self.dirty.clear();
        tracing::debug!(format = D::FORMAT_ID, id = %self.id, "committed");
        Ok(())
    }

    fn stringify(&self) -> AdapterResult<String> {
        Ok(self.snapshot.clone())
    }
}

/// Read-only wrapper around a root or folder.
pub struct ContainerRef<'a, N: ContainerNode> {
    id: String,
    node_type: NodeType,
    node: &'a N,
    indices: &'a IndexRegistry,
}

impl<'a, N: ContainerNode> ContainerRef<'a, N> {
    fn lookup(&self, id: &str) -> AdapterResult<EntryView<'a>> {
        let position = self.indices.get(&self.id)?.position(id)?;
        match self.node.child(position) {
            Some(Child::Folder(folder)) => Ok(EntryView::Container(Box::new(ContainerRef {
                id: id.to_string(),
                node_type: NodeType::Container,
                node: folder,
                indices: self.indices,
            }))),
            Some(Child::Item(item)) => Ok(EntryView::Item(Box::new(ItemRef {
                id: id.to_string(),
                node: item,
            }))),
            None => Err(AdapterError::NotFound(id.to_string())),
        }
    }
}

impl<N: ContainerNode> ContainerView for ContainerRef<'_, N> {
    fn id(&self) -> &str {
        &self.id
    }

    fn node_type(&self) -> NodeType {
        self.node_type
    }

    fn name(&self) -> &str {
        self.node.name()
    }

    fn authorization(&self) -> Authorization {
        normalized(self.node_type, self.node.authorization())
    }

    fn child_entry_ids(&self) -> Vec<String> {
        self.indices
            .get(&self.id)
            .map(EntryIndex::ids)
            .unwrap_or_default()
    }

    fn entry(&self, id: &str) -> AdapterResult<EntryView<'_>> {
        self.lookup(id)
    }
}

/// Editing wrapper around a root or folder. Borrows the root mutably.
pub struct ContainerMut<'a, N: ContainerNode> {
    id: String,
    node_type: NodeType,
    node: &'a mut N,
    indices: &'a mut IndexRegistry,
    dirty: &'a DirtyFlag,
}

impl<'a, N: ContainerNode> ContainerMut<'a, N> {
    fn view(&self) -> ContainerRef<'_, N> {
        ContainerRef {
            id: self.id.clone(),
            node_type: self.node_type,
            node: &*self.node,
            indices: &*self.indices,
        }
    }

    fn reborrow(&mut self) -> ContainerMut<'_, N> {
        ContainerMut {
            id: self.id.clone(),
            node_type: self.node_type,
            node: &mut *self.node,
            indices: &mut *self.indices,
            dirty: self.dirty,
        }
    }

    fn into_entry(self, id: &str) -> AdapterResult<EntryAdapter<'a>> {
        let Self {
            id: parent,
            node,
            indices,
            dirty,
            ..
        } = self;
        let position = indices.get(&parent)?.position(id)?;
        match node.child_mut(position) {
            Some(Child::Folder(folder)) => Ok(EntryAdapter::Container(Box::new(ContainerMut {
                id: id.to_string(),
                node_type: NodeType::Container,
                node: folder,
                indices,
                dirty,
            }))),
            Some(Child::Item(item)) => Ok(EntryAdapter::Item(Box::new(ItemMut {
                id: id.to_string(),
                node: item,
                dirty,
            }))),
            None => Err(AdapterError::NotFound(id.to_string())),
        }
    }

    fn into_appended_container(self, name: &str) -> AdapterResult<ContainerMut<'a, N::Folder>> {
        let Self {
            id: parent,
            node,
            indices,
            dirty,
            ..
        } = self;
        let id = indices.get_mut(&parent)?.issue()?;
        node.push_folder(name);
        indices.register(id.clone(), 0);
        dirty.mark();

        match node.child_mut(node.children_len().saturating_sub(1)) {
            Some(Child::Folder(folder)) => Ok(ContainerMut {
                id,
                node_type: NodeType::Container,
                node: folder,
                indices,
                dirty,
            }),
            _ => Err(AdapterError::NotFound(id)),
        }
    }

    fn into_appended_item(self, request: &Request) -> AdapterResult<ItemMut<'a, N::Item>> {
        let Self {
            id: parent,
            node,
            indices,
            dirty,
            ..
        } = self;
        let id = indices.get_mut(&parent)?.issue()?;
        node.push_item(request);
        dirty.mark();

        match node.child_mut(node.children_len().saturating_sub(1)) {
            Some(Child::Item(item)) => Ok(ItemMut {
                id,
                node: item,
                dirty,
            }),
            _ => Err(AdapterError::NotFound(id)),
        }
    }

    fn rename(&mut self, name: &str) -> AdapterResult<()> {
        self.node.set_name(name);
        self.dirty.mark();
        Ok(())
    }

    fn store_authorization(&mut self, authorization: Authorization) -> AdapterResult<()> {
        self.node
            .set_authorization(normalized(self.node_type, authorization));
        self.dirty.mark();
        Ok(())
    }

    fn remove_entry(&mut self, id: &str) -> AdapterResult<()> {
        let index = self.indices.get_mut(&self.id)?;
        let position = index.position(id)?;
        if position >= self.node.children_len() {
            return Err(AdapterError::NotFound(id.to_string()));
        }
        index.remove(id)?;
        self.node.remove_child(position);
        self.indices.forget_subtree(id);
        self.dirty.mark();
        Ok(())
    }
}

impl<N: ContainerNode> ContainerView for ContainerMut<'_, N> {
    fn id(&self) -> &str {
        &self.id
    }

    fn node_type(&self) -> NodeType {
        self.node_type
    }

    fn name(&self) -> &str {
        self.node.name()
    }

    fn authorization(&self) -> Authorization {
        normalized(self.node_type, self.node.authorization())
    }

    fn child_entry_ids(&self) -> Vec<String> {
        self.view().child_entry_ids()
    }

    fn entry(&self, id: &str) -> AdapterResult<EntryView<'_>> {
        self.view().lookup(id)
    }
}

impl<N: ContainerNode> ContainerAdapter for ContainerMut<'_, N> {
    fn set_name(&mut self, name: &str) -> AdapterResult<()> {
        self.rename(name)
    }

    fn set_authorization(&mut self, authorization: Authorization) -> AdapterResult<()> {
        self.store_authorization(authorization)
    }

    fn entry_mut(&mut self, id: &str) -> AdapterResult<EntryAdapter<'_>> {
        self.reborrow().into_entry(id)
    }

    fn append_container_entry(
        &mut self,
        name: &str,
    ) -> AdapterResult<Box<dyn ContainerAdapter + '_>> {
        Ok(Box::new(self.reborrow().into_appended_container(name)?))
    }

    fn append_item_entry(&mut self, request: &Request) -> AdapterResult<Box<dyn ItemAdapter + '_>> {
        Ok(Box::new(self.reborrow().into_appended_item(request)?))
    }

    fn delete_entry(&mut self, id: &str) -> AdapterResult<()> {
        self.remove_entry(id)
    }
}

/// Read-only wrapper around a request node.
pub struct ItemRef<'a, I: ItemNode> {
    id: String,
    node: &'a I,
}

impl<I: ItemNode> ItemView for ItemRef<'_, I> {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.node.name()
    }

    fn authorization(&self) -> Authorization {
        self.node.authorization()
    }

    fn request(&self) -> Request {
        self.node.request()
    }
}

/// Editing wrapper around a request node. Every setter marks the root dirty.
pub struct ItemMut<'a, I: ItemNode> {
    id: String,
    node: &'a mut I,
    dirty: &'a DirtyFlag,
}

impl<I: ItemNode> ItemMut<'_, I> {
    fn edit(&mut self, apply: impl FnOnce(&mut I)) -> AdapterResult<()> {
        apply(&mut *self.node);
        self.dirty.mark();
        Ok(())
    }
}

impl<I: ItemNode> ItemView for ItemMut<'_, I> {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.node.name()
    }

    fn authorization(&self) -> Authorization {
        self.node.authorization()
    }

    fn request(&self) -> Request {
        self.node.request()
    }
}

impl<I: ItemNode> ItemAdapter for ItemMut<'_, I> {
    fn set_name(&mut self, name: &str) -> AdapterResult<()> {
        self.edit(|node| node.set_name(name))
    }

    fn set_authorization(&mut self, authorization: Authorization) -> AdapterResult<()> {
        self.edit(|node| node.set_authorization(authorization))
    }

    fn set_request(&mut self, request: &Request) -> AdapterResult<()> {
        self.edit(|node| node.set_request(request))
    }

    fn set_verb(&mut self, verb: HttpMethod) -> AdapterResult<()> {
        self.edit(|node| node.set_verb(verb))
    }

    fn set_url(&mut self, url: &str) -> AdapterResult<()> {
        self.edit(|node| node.set_url(url))
    }

    fn set_description(&mut self, description: Option<&str>) -> AdapterResult<()> {
        self.edit(|node| node.set_description(description))
    }

    fn set_headers(&mut self, headers: &[Parameter]) -> AdapterResult<()> {
        self.edit(|node| node.set_headers(headers))
    }

    fn set_query_parameters(&mut self, parameters: &[Parameter]) -> AdapterResult<()> {
        self.edit(|node| node.set_query_parameters(parameters))
    }

    fn set_route_parameters(&mut self, parameters: &[Parameter]) -> AdapterResult<()> {
        self.edit(|node| node.set_route_parameters(parameters))
    }

    fn set_body(&mut self, selection: BodySelection, body: &RequestBody) -> AdapterResult<()> {
        self.edit(|node| node.set_body(selection, body))
    }
}
