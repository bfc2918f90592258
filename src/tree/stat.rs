//! Whole-tree statistics and classification.

use super::{Tree, TreeType};
use crate::node::NodeId;
use std::collections::BTreeMap;

pub fn get_leaves(tree: &Tree, root: NodeId) -> Vec<NodeId> {
    super::traversal::preorder(tree, root)
        .into_iter()
        .filter(|&id| tree.get_node(id).map(|n| n.is_leaf()).unwrap_or(false))
        .collect()
}

pub fn get_leaf_names(tree: &Tree, root: NodeId) -> Vec<String> {
    get_leaves(tree, root)
        .into_iter()
        .filter_map(|id| tree.get_node(id).and_then(|n| n.name.clone()))
        .collect()
}

/// A tree is binary if every internal node has exactly two children.
pub fn is_binary(tree: &Tree) -> bool {
    tree.nodes
        .iter()
        .filter(|n| !n.deleted && !n.is_leaf())
        .all(|n| n.children.len() == 2)
}

/// The greatest weighted distance between any two leaves, or `None` for a
/// tree with fewer than two leaves.
pub fn diameter(tree: &Tree) -> Option<f64> {
    let root = tree.get_root()?;
    let leaves = get_leaves(tree, root);
    if leaves.len() < 2 {
        return None;
    }
    let mut best = 0.0_f64;
    for i in 0..leaves.len() {
        for j in (i + 1)..leaves.len() {
            if let Ok((dist, _)) = super::query::get_distance(tree, leaves[i], leaves[j]) {
                best = best.max(dist);
            }
        }
    }
    Some(best)
}

pub fn get_names(tree: &Tree) -> Vec<String> {
    tree.nodes
        .iter()
        .filter(|n| !n.deleted)
        .filter_map(|n| n.name.clone())
        .collect()
}

/// Map from name to node id; last node wins on duplicate names, matching
/// the Rnode-iterator leaf-label convention.
pub fn get_name_id(tree: &Tree) -> BTreeMap<String, NodeId> {
    let mut map = BTreeMap::new();
    for node in tree.nodes.iter().filter(|n| !n.deleted) {
        if let Some(name) = &node.name {
            if !name.is_empty() {
                map.insert(name.clone(), node.id);
            }
        }
    }
    map
}

pub fn get_property_values(tree: &Tree, key: &str) -> BTreeMap<NodeId, String> {
    let mut map = BTreeMap::new();
    for node in tree.nodes.iter().filter(|n| !n.deleted) {
        if let Some(value) = node.get_property(key) {
            map.insert(node.id, value.clone());
        }
    }
    map
}

pub fn get_node_with_longest_edge(tree: &Tree) -> Option<NodeId> {
    tree.nodes
        .iter()
        .filter(|n| !n.deleted && n.length.is_some())
        .max_by(|a, b| a.length.unwrap().partial_cmp(&b.length.unwrap()).unwrap())
        .map(|n| n.id)
}

/// Classify the tree by inspecting every non-root node's length string:
/// all-empty is a cladogram, all-numeric a phylogram, a mix is neither.
pub fn classify_tree_type(tree: &Tree) -> TreeType {
    let mut any_empty = false;
    let mut any_numeric = false;
    for node in tree.nodes.iter().filter(|n| !n.deleted && n.parent.is_some()) {
        if node.length_str.is_empty() {
            any_empty = true;
        } else {
            any_numeric = true;
        }
    }
    match (any_empty, any_numeric) {
        (true, true) => TreeType::Neither,
        (true, false) => TreeType::Cladogram,
        (false, true) => TreeType::Phylogram,
        (false, false) => TreeType::Cladogram,
    }
}
