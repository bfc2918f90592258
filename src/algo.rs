//! Component: child-order algorithms ("ladderizing") used by the `order`
//! CLI driver. Grounded in the donor's `algo` module — sorts children of
//! every node without touching topology, branch lengths, or labels.

use crate::node::NodeId;
use crate::tree::Tree;
use std::collections::HashMap;

/// Sort the children of every node alphanumerically by label, propagating an
/// unnamed node's effective sort key up from its own (already-sorted) first
/// child.
pub fn sort_by_name(tree: &mut Tree, descending: bool) {
    let Some(root) = tree.get_root() else { return };
    let ids = tree.postorder(root);

    let mut key_of: HashMap<NodeId, String> = HashMap::new();
    for &id in &ids {
        let node = tree.get_node(id).unwrap();
        if node.is_leaf() {
            key_of.insert(id, node.name.clone().unwrap_or_default());
            continue;
        }

        if let Some(node_mut) = tree.get_node_mut(id) {
            node_mut.children.sort_by(|a, b| {
                let ka = key_of.get(a).map(String::as_str).unwrap_or("");
                let kb = key_of.get(b).map(String::as_str).unwrap_or("");
                if descending { kb.cmp(ka) } else { ka.cmp(kb) }
            });
        }

        let node = tree.get_node(id).unwrap();
        let own = node.name.clone().unwrap_or_default();
        let key = if !own.is_empty() {
            own
        } else {
            node.children
                .first()
                .and_then(|c| key_of.get(c))
                .cloned()
                .unwrap_or_default()
        };
        key_of.insert(id, key);
    }
}

/// Sort the children of every node by subtree size (ladderize).
pub fn ladderize(tree: &mut Tree, descending: bool) {
    let Some(root) = tree.get_root() else { return };
    let post = tree.postorder(root);

    let mut size_of: HashMap<NodeId, usize> = HashMap::new();
    for &id in &post {
        let node = tree.get_node(id).unwrap();
        let size = 1 + node.children.iter().map(|c| size_of.get(c).copied().unwrap_or(0)).sum::<usize>();
        size_of.insert(id, size);
    }

    for &id in &tree.levelorder(root) {
        if let Some(node) = tree.get_node_mut(id) {
            node.children.sort_by(|a, b| {
                let sa = size_of.get(a).copied().unwrap_or(0);
                let sb = size_of.get(b).copied().unwrap_or(0);
                if descending { sb.cmp(&sa) } else { sa.cmp(&sb) }
            });
        }
    }
}

/// Alternate sort direction (by subtree size) at every successive depth.
pub fn deladderize(tree: &mut Tree) {
    let Some(root) = tree.get_root() else { return };
    let post = tree.postorder(root);

    let mut size_of: HashMap<NodeId, usize> = HashMap::new();
    for &id in &post {
        let node = tree.get_node(id).unwrap();
        let size = 1 + node.children.iter().map(|c| size_of.get(c).copied().unwrap_or(0)).sum::<usize>();
        size_of.insert(id, size);
    }

    let mut depth_of: HashMap<NodeId, usize> = HashMap::new();
    depth_of.insert(root, 0);
    for &id in &tree.levelorder(root) {
        let depth = depth_of.get(&id).copied().unwrap_or(0);
        let node = tree.get_node(id).unwrap();
        for &child in &node.children {
            depth_of.insert(child, depth + 1);
        }
        let descending = depth % 2 == 1;
        if let Some(node) = tree.get_node_mut(id) {
            node.children.sort_by(|a, b| {
                let sa = size_of.get(a).copied().unwrap_or(0);
                let sb = size_of.get(b).copied().unwrap_or(0);
                if descending { sb.cmp(&sa) } else { sa.cmp(&sb) }
            });
        }
    }
}

/// Sort every node's children by the position of their minimum-positioned
/// descendant in `order_list` (unlisted names sort last, ties break by id).
pub fn sort_by_list(tree: &mut Tree, order_list: &[String]) {
    let Some(root) = tree.get_root() else { return };
    let max_pos = order_list.len();
    let pos_map: HashMap<&str, usize> = order_list.iter().map(|s| s.as_str()).zip(0..).collect();

    let post = tree.postorder(root);
    let mut pos_of: HashMap<NodeId, usize> = HashMap::new();
    for &id in &post {
        let node = tree.get_node(id).unwrap();
        let mut pos = node
            .name
            .as_deref()
            .and_then(|n| pos_map.get(n).copied())
            .unwrap_or(max_pos);
        for &child in &node.children {
            if let Some(&p) = pos_of.get(&child) {
                pos = pos.min(p);
            }
        }
        pos_of.insert(id, pos);
    }

    for &id in &tree.levelorder(root) {
        if let Some(node) = tree.get_node_mut(id) {
            node.children.sort_by(|a, b| {
                let pa = pos_of.get(a).copied().unwrap_or(max_pos);
                let pb = pos_of.get(b).copied().unwrap_or(max_pos);
                pa.cmp(&pb).then(a.cmp(b))
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_newick;
    use crate::writer::write_newick;

    #[test]
    fn test_sort_by_name_ascending() {
        let mut tree = parse_newick("(C,A,B);").unwrap();
        sort_by_name(&mut tree, false);
        assert_eq!(write_newick(&tree), "(A,B,C);");
    }

    #[test]
    fn test_ladderize_ascending() {
        let mut tree = parse_newick("((A,B),C);").unwrap();
        ladderize(&mut tree, false);
        assert_eq!(write_newick(&tree), "(C,(A,B));");
    }

    #[test]
    fn test_sort_by_list() {
        let mut tree = parse_newick("(A,B,C);").unwrap();
        let order = vec!["C".to_string(), "B".to_string(), "A".to_string()];
        sort_by_list(&mut tree, &order);
        assert_eq!(write_newick(&tree), "(C,B,A);");
    }

    #[test]
    fn test_deladderize_runs_without_panicking() {
        let mut tree = parse_newick("(((A,B),C),((D,E),F));").unwrap();
        deladderize(&mut tree);
        assert_eq!(tree.get_leaf_names().len(), 6);
    }
}
