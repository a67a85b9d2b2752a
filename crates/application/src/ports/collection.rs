//! Uniform collection tree ports.
//!
//! Every dialect presents its document as a root, containers (folders) and
//! items (requests). The read side (`*View`) and the write side (`*Adapter`)
//! are separate traits: wrappers returned from `&self` can only read, those
//! returned from `&mut self` borrow the root mutably and can edit.
//!
//! Child wrappers borrow their root, so the borrow checker enforces the
//! "one in-flight edit per adapter" rule.

use netconsole_domain::{
    Authorization, BodySelection, HttpMethod, NodeType, Parameter, Request, RequestBody,
};

use crate::error::AdapterResult;

/// Read access to a root or a container.
pub trait ContainerView {
    /// Stable identifier of this node.
    fn id(&self) -> &str;

    /// [`NodeType::Root`] or [`NodeType::Container`].
    fn node_type(&self) -> NodeType;

    /// Display name.
    fn name(&self) -> &str;

    /// Authorization of this node. Roots never report `inherit`.
    fn authorization(&self) -> Authorization;

    /// Identifiers of the children, in document order.
    fn child_entry_ids(&self) -> Vec<String>;

    /// Looks up a direct child.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not a live child of this node.
    fn entry(&self, id: &str) -> AdapterResult<EntryView<'_>>;
}

/// Read access to an item.
pub trait ItemView {
    /// Stable identifier of this item.
    fn id(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    /// Authorization of the item, possibly `inherit`.
    fn authorization(&self) -> Authorization;

    /// Snapshot of the wrapped request.
    fn request(&self) -> Request;
}

/// A child seen through a [`ContainerView`].
pub enum EntryView<'a> {
    /// A folder.
    Container(Box<dyn ContainerView + 'a>),
    /// A request.
    Item(Box<dyn ItemView + 'a>),
}

/// Write access to a root or a container.
///
/// Read-only formats implement every method by failing with
/// `UnsupportedOperation`.
pub trait ContainerAdapter: ContainerView {
    /// Renames the node.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` on read-only formats.
    fn set_name(&mut self, name: &str) -> AdapterResult<()>;

    /// Replaces the authorization. Roots store `inherit` as `none`.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` on read-only formats.
    fn set_authorization(&mut self, authorization: Authorization) -> AdapterResult<()>;

    /// Looks up a direct child for editing.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is not a live child, `UnsupportedOperation` on
    /// read-only formats.
    fn entry_mut(&mut self, id: &str) -> AdapterResult<EntryAdapter<'_>>;

    /// Appends an empty folder and returns it.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` on read-only formats.
    fn append_container_entry(&mut self, name: &str)
    -> AdapterResult<Box<dyn ContainerAdapter + '_>>;

    /// Appends a request and returns its item.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` on read-only formats.
    fn append_item_entry(&mut self, request: &Request) -> AdapterResult<Box<dyn ItemAdapter + '_>>;

    /// Removes a direct child (and its subtree).
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is not a live child, `UnsupportedOperation` on
    /// read-only formats.
    fn delete_entry(&mut self, id: &str) -> AdapterResult<()>;
}

/// Write access to an item.
///
/// # Errors
///
/// Every setter fails with `UnsupportedOperation` on read-only formats.
#[allow(clippy::missing_errors_doc)]
pub trait ItemAdapter: ItemView {
    /// Renames the item (and its request).
    fn set_name(&mut self, name: &str) -> AdapterResult<()>;

    /// Replaces the item's authorization.
    fn set_authorization(&mut self, authorization: Authorization) -> AdapterResult<()>;

    /// Replaces every request field at once.
    fn set_request(&mut self, request: &Request) -> AdapterResult<()>;

    /// Replaces the verb.
    fn set_verb(&mut self, verb: HttpMethod) -> AdapterResult<()>;

    /// Replaces the URL template.
    fn set_url(&mut self, url: &str) -> AdapterResult<()>;

    /// Replaces or clears the description.
    fn set_description(&mut self, description: Option<&str>) -> AdapterResult<()>;

    /// Replaces the headers.
    fn set_headers(&mut self, headers: &[Parameter]) -> AdapterResult<()>;

    /// Replaces the query parameters.
    fn set_query_parameters(&mut self, parameters: &[Parameter]) -> AdapterResult<()>;

    /// Replaces the route parameters.
    fn set_route_parameters(&mut self, parameters: &[Parameter]) -> AdapterResult<()>;

    /// Replaces the body components and the active selection.
    fn set_body(&mut self, selection: BodySelection, body: &RequestBody) -> AdapterResult<()>;
}

/// A child seen through a [`ContainerAdapter`].
pub enum EntryAdapter<'a> {
    /// A folder.
    Container(Box<dyn ContainerAdapter + 'a>),
    /// A request.
    Item(Box<dyn ItemAdapter + 'a>),
}

/// The root of a collection document.
pub trait CollectionAdapter: ContainerAdapter {
    /// Identifier of the format backing this adapter.
    fn format_id(&self) -> &'static str;

    /// True if a mutation happened since construction or the last commit.
    fn is_dirty(&self) -> bool;

    /// Serializes the current state as the committed snapshot and clears the
    /// dirty flag.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` on read-only formats, `Serialization` if the
    /// document cannot be written.
    fn commit(&mut self) -> AdapterResult<()>;

    /// The committed snapshot. Mutations made after the last commit are not
    /// reflected.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in formats; kept fallible for formats that
    /// serialize lazily.
    fn stringify(&self) -> AdapterResult<String>;
}

impl EntryView<'_> {
    /// The child's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Container(container) => container.id(),
            Self::Item(item) => item.id(),
        }
    }

    /// The child's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Container(container) => container.name(),
            Self::Item(item) => item.name(),
        }
    }

    /// The child's authorization.
    #[must_use]
    pub fn authorization(&self) -> Authorization {
        match self {
            Self::Container(container) => container.authorization(),
            Self::Item(item) => item.authorization(),
        }
    }

    /// [`NodeType::Container`] or [`NodeType::Item`].
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Container(_) => NodeType::Container,
            Self::Item(_) => NodeType::Item,
        }
    }
}

impl EntryAdapter<'_> {
    /// The child's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Container(container) => container.id(),
            Self::Item(item) => item.id(),
        }
    }

    /// Replaces the child's authorization.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` on read-only formats.
    pub fn set_authorization(&mut self, authorization: Authorization) -> AdapterResult<()> {
        match self {
            Self::Container(container) => container.set_authorization(authorization),
            Self::Item(item) => item.set_authorization(authorization),
        }
    }

    /// Renames the child.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` on read-only formats.
    pub fn set_name(&mut self, name: &str) -> AdapterResult<()> {
        match self {
            Self::Container(container) => container.set_name(name),
            Self::Item(item) => item.set_name(name),
        }
    }
}
