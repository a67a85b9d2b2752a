//! Authorization inheritance resolution.

use netconsole_domain::{Authorization, child_id};

use crate::error::{AdapterError, AdapterResult};
use crate::ports::{ContainerView, EntryView};

/// The authorization an `inherit` request ends up using.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritedAuthorization {
    /// The nearest non-`inherit` authorization above the request.
    pub authorization: Authorization,
    /// Names from the root down to the node that supplied it.
    pub source_path: Vec<String>,
}

impl InheritedAuthorization {
    /// `source_path` joined with `/`, for display.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.source_path.join("/")
    }
}

/// Finds the authorization an item inherits from its ancestors.
///
/// The item's ancestry is read from its identifier (`<root>/<k1>/<k2>/…`).
/// Ancestors are consulted from the immediate parent upward, stopping at the
/// first whose authorization is not `inherit`. `Ok(None)` means no ancestor
/// supplies one; callers must treat that as `none` themselves.
///
/// # Errors
///
/// `NotFound` if `item_id` does not name an item below `root`.
pub fn resolve_inherited_authorization<C>(
    root: &C,
    item_id: &str,
) -> AdapterResult<Option<InheritedAuthorization>>
where
    C: ContainerView + ?Sized,
{
    let keys: Vec<&str> = item_id
        .strip_prefix(root.id())
        .and_then(|rest| rest.strip_prefix('/'))
        .map(|rest| rest.split('/').collect())
        .ok_or_else(|| AdapterError::NotFound(item_id.to_string()))?;

    let mut ancestors = Vec::new();
    collect_ancestors(root, &keys, item_id, &mut ancestors)?;

    let Some(source) = ancestors.iter().rposition(|(_, auth)| !auth.is_inherit()) else {
        return Ok(None);
    };
    let authorization = ancestors[source].1.clone();
    let source_path = ancestors
        .into_iter()
        .take(source + 1)
        .map(|(name, _)| name)
        .collect();
    Ok(Some(InheritedAuthorization {
        authorization,
        source_path,
    }))
}

/// Pushes `(name, authorization)` of `node` and of every container on the
/// way down to the item named by `keys`.
fn collect_ancestors<N>(
    node: &N,
    keys: &[&str],
    item_id: &str,
    ancestors: &mut Vec<(String, Authorization)>,
) -> AdapterResult<()>
where
    N: ContainerView + ?Sized,
{
    ancestors.push((node.name().to_string(), node.authorization()));

    let not_found = || AdapterError::NotFound(item_id.to_string());
    let (key, rest) = keys.split_first().ok_or_else(not_found)?;
    let key: usize = key.parse().map_err(|_| not_found())?;
    let id = child_id(node.id(), key);

    match (node.entry(&id)?, rest.is_empty()) {
        (EntryView::Item(_), true) => Ok(()),
        (EntryView::Container(folder), false) => {
            collect_ancestors(folder.as_ref(), rest, item_id, ancestors)
        }
        _ => Err(not_found()),
    }
}
