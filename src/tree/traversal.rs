//! Component 7 helpers built on top of the Rnode iterator: simple pre-order
//! and level-order walks, and subtree extraction.

use super::Tree;
use crate::node::NodeId;
use std::collections::VecDeque;

/// Visit `start`, then recurse into each child left to right.
pub fn preorder(tree: &Tree, start: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        out.push(id);
        if let Some(node) = tree.get_node(id) {
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }
    out
}

/// Breadth-first from `start`.
pub fn levelorder(tree: &Tree, start: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);
    while let Some(id) = queue.pop_front() {
        out.push(id);
        if let Some(node) = tree.get_node(id) {
            for &child in &node.children {
                queue.push_back(child);
            }
        }
    }
    out
}

/// Build a standalone `Tree` containing only `root` and its descendants,
/// preserving relative child order, names, length strings and properties.
pub fn extract_subtree(tree: &Tree, root: NodeId) -> Result<Tree, String> {
    if tree.get_node(root).is_none() {
        return Err(format!("node {} not found", root));
    }

    let mut out = Tree::new();
    let mut old_to_new = std::collections::HashMap::new();

    for &old_id in &preorder(tree, root) {
        let old_node = tree.get_node(old_id).unwrap();
        let new_id = out.add_node();
        old_to_new.insert(old_id, new_id);
        {
            let new_node = out.get_node_mut(new_id).unwrap();
            new_node.name = old_node.name.clone();
            new_node.length_str = old_node.length_str.clone();
            new_node.length = old_node.length;
            new_node.properties = old_node.properties.clone();
        }
        if old_id != root {
            let old_parent = old_node.parent.unwrap();
            let new_parent = *old_to_new.get(&old_parent).unwrap();
            out.get_node_mut(new_parent).unwrap().children.push(new_id);
            out.get_node_mut(new_id).unwrap().parent = Some(new_parent);
        }
    }

    out.set_root(*old_to_new.get(&root).unwrap());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_newick;
    use crate::writer::write_newick;

    #[test]
    fn test_preorder_visits_node_before_children() {
        let tree = parse_newick("((A,B)f,C)r;").unwrap();
        let root = tree.get_root().unwrap();
        let order = preorder(&tree, root);
        let names: Vec<Option<String>> = order
            .iter()
            .map(|&id| tree.get_node(id).unwrap().name.clone())
            .collect();
        assert_eq!(
            names,
            vec![
                Some("r".to_string()),
                Some("f".to_string()),
                Some("A".to_string()),
                Some("B".to_string()),
                Some("C".to_string()),
            ]
        );
    }

    #[test]
    fn test_levelorder_breadth_first() {
        let tree = parse_newick("((A,B)f,C)r;").unwrap();
        let root = tree.get_root().unwrap();
        let order = levelorder(&tree, root);
        let names: Vec<Option<String>> = order
            .iter()
            .map(|&id| tree.get_node(id).unwrap().name.clone())
            .collect();
        assert_eq!(
            names,
            vec![
                Some("r".to_string()),
                Some("f".to_string()),
                Some("C".to_string()),
                Some("A".to_string()),
                Some("B".to_string()),
            ]
        );
    }

    #[test]
    fn test_extract_subtree_is_standalone() {
        let tree = parse_newick("((A:1,B:2)f:3,C:4)r;").unwrap();
        let root = tree.get_root().unwrap();
        let f = tree.get_node(root).unwrap().children[0];
        let sub = extract_subtree(&tree, f).unwrap();
        assert_eq!(write_newick(&sub), "(A:1,B:2)f:3;");
    }
}
