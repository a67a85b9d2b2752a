//! In-memory collection tree shared by the use case tests.

use netconsole_domain::{Authorization, NodeType, Request, child_id};

use crate::error::{AdapterError, AdapterResult};
use crate::ports::{ContainerView, EntryView, ItemView};

/// Shape of a test tree, before identifiers are assigned.
pub enum Node {
    Folder(&'static str, Authorization, Vec<Node>),
    Request(Request, Authorization),
}

pub fn folder(name: &'static str, authorization: Authorization, children: Vec<Node>) -> Node {
    Node::Folder(name, authorization, children)
}

pub fn request(name: &str, url: &str, authorization: Authorization) -> Node {
    Node::Request(Request::get(name, url), authorization)
}

#[derive(Clone)]
pub struct MockContainer {
    id: String,
    node_type: NodeType,
    name: String,
    authorization: Authorization,
    children: Vec<MockEntry>,
}

#[derive(Clone)]
enum MockEntry {
    Container(MockContainer),
    Item(MockItem),
}

#[derive(Clone)]
struct MockItem {
    id: String,
    authorization: Authorization,
    request: Request,
}

impl MockContainer {
    pub fn root(id: &str, name: &str, authorization: Authorization, children: Vec<Node>) -> Self {
        Self::build(id.to_string(), NodeType::Root, name, authorization, children)
    }

    fn build(
        id: String,
        node_type: NodeType,
        name: &str,
        authorization: Authorization,
        children: Vec<Node>,
    ) -> Self {
        let children = children
            .into_iter()
            .enumerate()
            .map(|(key, node)| {
                let child = child_id(&id, key);
                match node {
                    Node::Folder(name, authorization, nested) => MockEntry::Container(Self::build(
                        child,
                        NodeType::Container,
                        name,
                        authorization,
                        nested,
                    )),
                    Node::Request(request, authorization) => MockEntry::Item(MockItem {
                        id: child,
                        authorization,
                        request,
                    }),
                }
            })
            .collect();
        Self {
            id,
            node_type,
            name: name.to_string(),
            authorization,
            children,
        }
    }
}

impl ContainerView for MockContainer {
    fn id(&self) -> &str {
        &self.id
    }

    fn node_type(&self) -> NodeType {
        self.node_type
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn authorization(&self) -> Authorization {
        self.authorization.clone()
    }

    fn child_entry_ids(&self) -> Vec<String> {
        self.children
            .iter()
            .map(|child| match child {
                MockEntry::Container(container) => container.id.clone(),
                MockEntry::Item(item) => item.id.clone(),
            })
            .collect()
    }

    fn entry(&self, id: &str) -> AdapterResult<EntryView<'_>> {
        self.children
            .iter()
            .find_map(|child| match child {
                MockEntry::Container(container) if container.id == id => {
                    Some(EntryView::Container(Box::new(container.clone())))
                }
                MockEntry::Item(item) if item.id == id => {
                    Some(EntryView::Item(Box::new(item.clone())))
                }
                _ => None,
            })
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))
    }
}

impl ItemView for MockItem {
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
