//! Flattened views of a collection tree.

use netconsole_domain::{Authorization, HttpMethod, NodeType};

use crate::error::AdapterResult;
use crate::ports::{ContainerView, EntryView};

/// One node of a flattened tree, in depth-first document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Node identifier.
    pub id: String,
    /// Distance from the root (the root is 0).
    pub depth: usize,
    /// Role of the node.
    pub node_type: NodeType,
    /// Display name.
    pub name: String,
    /// Authorization as stored on the node.
    pub authorization: Authorization,
    /// Verb and URL of items.
    pub request_line: Option<(HttpMethod, String)>,
}

/// Counts of a tree's nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    /// Number of folders at any depth.
    pub containers: usize,
    /// Number of requests at any depth.
    pub items: usize,
    /// Deepest level holding a node (the root is 0).
    pub max_depth: usize,
}

/// Flattens the tree below `root`, root first.
///
/// # Errors
///
/// Propagates lookup errors of the adapter.
pub fn walk_tree<C>(root: &C) -> AdapterResult<Vec<TreeNode>>
where
    C: ContainerView + ?Sized,
{
    let mut nodes = vec![TreeNode {
        id: root.id().to_string(),
        depth: 0,
        node_type: root.node_type(),
        name: root.name().to_string(),
        authorization: root.authorization(),
        request_line: None,
    }];
    walk_children(root, 1, &mut nodes)?;
    Ok(nodes)
}

fn walk_children<N>(node: &N, depth: usize, nodes: &mut Vec<TreeNode>) -> AdapterResult<()>
where
    N: ContainerView + ?Sized,
{
    for id in node.child_entry_ids() {
        match node.entry(&id)? {
            EntryView::Container(folder) => {
                nodes.push(TreeNode {
                    id,
                    depth,
                    node_type: NodeType::Container,
                    name: folder.name().to_string(),
                    authorization: folder.authorization(),
                    request_line: None,
                });
                walk_children(folder.as_ref(), depth + 1, nodes)?;
            }
            EntryView::Item(item) => {
                let request = item.request();
                nodes.push(TreeNode {
                    id,
                    depth,
                    node_type: NodeType::Item,
                    name: item.name().to_string(),
                    authorization: item.authorization(),
                    request_line: Some((request.verb, request.url)),
                });
            }
        }
    }
    Ok(())
}

/// Counts folders and requests below `root`.
///
/// # Errors
///
/// Propagates lookup errors of the adapter.
pub fn summarize<C>(root: &C) -> AdapterResult<TreeSummary>
where
    C: ContainerView + ?Sized,
{
    let nodes = walk_tree(root)?;
    Ok(nodes.iter().fold(TreeSummary::default(), |mut summary, node| {
        match node.node_type {
            NodeType::Container => summary.containers += 1,
            NodeType::Item => summary.items += 1,
            NodeType::Root => {}
        }
        summary.max_depth = summary.max_depth.max(node.depth);
        summary
    }))
}
