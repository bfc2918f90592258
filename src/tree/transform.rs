//! Component 12: whole-tree structural transformations built from the
//! node-linking primitives in [`super::ops`].

use super::Tree;
use crate::node::NodeId;
use std::collections::BTreeSet;

/// Reroot the tree so its root sits on the edge leading to `outgroup`: a new
/// node is inserted above `outgroup` at the midpoint of that edge (per
/// [`super::ops::insert_node_above`]'s length-halving rule), the direction of
/// every edge from the old root down to that new node is reversed, and any
/// degree-2 node left behind by the old root is spliced out.
///
/// If `process_support_values` is set, internal-node labels (typically
/// bootstrap support values) are shifted one step along the reversed path so
/// each label stays associated with the same bipartition as before.
///
/// A no-op if `outgroup` is already the tree's root.
pub fn reroot_tree(tree: &mut Tree, outgroup: NodeId, process_support_values: bool) -> Result<(), String> {
    let old_root = tree.get_root().ok_or("tree has no root")?;
    if tree.get_node(outgroup).is_none() {
        return Err(format!("node {} not found", outgroup));
    }
    if outgroup == old_root {
        return Ok(());
    }

    let new_root = super::ops::insert_node_above(tree, outgroup, None)?;
    let path = super::query::get_path_from_root(tree, new_root)?;

    if process_support_values {
        shift_support_labels(tree, &path);
    }

    let length_strs: Vec<String> = path
        .iter()
        .map(|&id| tree.get_node(id).unwrap().length_str.clone())
        .collect();

    for i in (1..path.len()).rev() {
        let child_id = path[i];
        let parent_id = path[i - 1];
        let length_str = length_strs[i].clone();

        if let Some(parent) = tree.nodes.get_mut(parent_id) {
            parent.children.retain(|&c| c != child_id);
        }
        if let Some(child) = tree.nodes.get_mut(child_id) {
            child.children.push(parent_id);
        }
        if let Some(parent) = tree.nodes.get_mut(parent_id) {
            parent.parent = Some(child_id);
            parent.set_length_str(length_str);
        }
    }

    if let Some(node) = tree.nodes.get_mut(new_root) {
        node.parent = None;
        node.clear_length();
    }
    tree.set_root(new_root);
    super::ops::remove_degree_two_nodes(tree);
    Ok(())
}

/// Shift internal-node labels one step along `path` (root to new-root order)
/// so each stays attached to the same split after the edges above it flip
/// direction; leaves keep their own names.
fn shift_support_labels(tree: &mut Tree, path: &[NodeId]) {
    let new_root_is_leaf = tree
        .get_node(*path.last().unwrap())
        .map(|n| n.is_leaf())
        .unwrap_or(false);
    let names: Vec<Option<String>> = path
        .iter()
        .map(|&id| tree.get_node(id).unwrap().name.clone())
        .collect();

    for (i, &node_id) in path.iter().enumerate() {
        let is_last = i == path.len() - 1;
        if is_last && new_root_is_leaf {
            continue;
        }
        let new_name = if i < path.len() - 1 {
            let next_is_leaf = i + 1 == path.len() - 1 && new_root_is_leaf;
            if next_is_leaf {
                None
            } else {
                names[i + 1].clone()
            }
        } else {
            names[0].clone()
        };
        if let Some(node) = tree.get_node_mut(node_id) {
            node.name = new_name;
        }
    }
}

/// Post-order pass: any interior node whose children are all leaves sharing
/// one label is replaced by a leaf carrying that label, its own edge length
/// unchanged. Purity propagates upward within the single pass.
pub fn collapse_pure_clades(tree: &mut Tree) {
    let Some(root) = tree.get_root() else { return };
    let order = crate::rnode_iter::build_post_order(tree, root);

    for id in order {
        let Some(node) = tree.get_node(id) else { continue };
        if node.is_leaf() {
            continue;
        }
        let mut shared: Option<String> = None;
        let mut pure = true;
        for &child in &node.children {
            let child_node = tree.get_node(child).unwrap();
            if !child_node.is_leaf() {
                pure = false;
                break;
            }
            match (&shared, &child_node.name) {
                (None, Some(name)) => shared = Some(name.clone()),
                (Some(s), Some(name)) if s == name => {}
                _ => {
                    pure = false;
                    break;
                }
            }
        }
        if !pure || shared.is_none() {
            continue;
        }

        let children = tree.get_node(id).unwrap().children.clone();
        for child in children {
            if let Some(c) = tree.get_node_mut(child) {
                c.deleted = true;
                c.parent = None;
            }
        }
        let node = tree.get_node_mut(id).unwrap();
        node.children.clear();
        node.name = shared;
    }
}

/// `ancestor` is monophyletic with respect to `descendants` iff the set of
/// leaf labels under `ancestor` equals exactly the set of labels named by
/// `descendants` (same cardinality, same membership).
pub fn is_monophyletic(tree: &Tree, descendants: &[NodeId], ancestor: NodeId) -> Result<bool, String> {
    if tree.get_node(ancestor).is_none() {
        return Err(format!("node {} not found", ancestor));
    }
    let ancestor_leaves: BTreeSet<String> = super::stat::get_leaf_names(tree, ancestor).into_iter().collect();

    let mut given: BTreeSet<String> = BTreeSet::new();
    for &id in descendants {
        let name = tree
            .get_node(id)
            .ok_or(format!("node {} not found", id))?
            .name
            .clone()
            .ok_or_else(|| format!("node {} has no label", id))?;
        given.insert(name);
    }

    Ok(ancestor_leaves == given)
}
