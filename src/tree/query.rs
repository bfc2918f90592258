//! Path, distance, and predicate-search queries over a `Tree`.

use super::Tree;
use crate::node::{Node, NodeId};

/// The chain of ancestors from the tree's root down to and including `id`.
pub fn get_path_from_root(tree: &Tree, id: NodeId) -> Result<Vec<NodeId>, String> {
    if tree.get_node(id).is_none() {
        return Err(format!("node {} not found", id));
    }
    let mut path = Vec::new();
    let mut current = Some(id);
    while let Some(cur) = current {
        path.push(cur);
        current = tree.get_node(cur).and_then(|n| n.parent);
    }
    path.reverse();
    Ok(path)
}

/// Topological distance (edge count) and cumulative branch length between
/// `a` and `b`, via their lowest common ancestor. Edges with an unspecified
/// length string contribute `0.0` to the weighted sum.
pub fn get_distance(tree: &Tree, a: NodeId, b: NodeId) -> Result<(f64, usize), String> {
    let lca = crate::lca::lca2(tree, a, b)?;
    let path_a = get_path_from_root(tree, a)?;
    let path_b = get_path_from_root(tree, b)?;
    let lca_depth = get_path_from_root(tree, lca)?.len() - 1;

    let mut weighted = 0.0;
    let mut edges = 0usize;
    for &node_id in path_a.iter().skip(lca_depth + 1) {
        weighted += tree.get_node(node_id).unwrap().length.unwrap_or(0.0);
        edges += 1;
    }
    for &node_id in path_b.iter().skip(lca_depth + 1) {
        weighted += tree.get_node(node_id).unwrap().length.unwrap_or(0.0);
        edges += 1;
    }
    Ok((weighted, edges))
}

pub fn find_nodes<F>(tree: &Tree, predicate: F) -> Vec<NodeId>
where
    F: Fn(&Node) -> bool,
{
    tree.nodes
        .iter()
        .filter(|n| !n.deleted && predicate(n))
        .map(|n| n.id)
        .collect()
}

/// Count of all proper descendants of `id` (excludes `id` itself).
pub fn count_descendants(tree: &Tree, id: NodeId) -> usize {
    super::traversal::preorder(tree, id).len().saturating_sub(1)
}

/// Height of the subtree rooted at `id`: the longest root-to-leaf path,
/// measured in edge count (`weighted = false`) or cumulative branch length
/// (`weighted = true`, unspecified edges counting as `0.0`).
pub fn get_height(tree: &Tree, id: NodeId, weighted: bool) -> f64 {
    let Some(node) = tree.get_node(id) else {
        return 0.0;
    };
    if node.is_leaf() {
        return 0.0;
    }
    node.children
        .iter()
        .map(|&child| {
            let edge = if weighted {
                tree.get_node(child).unwrap().length.unwrap_or(0.0)
            } else {
                1.0
            };
            edge + get_height(tree, child, weighted)
        })
        .fold(0.0, f64::max)
}
