//! Depth-first edge-walk traversal ("Rnode iterator").
//!
//! Each call to `next` performs one step: descend to the next unvisited child
//! of the current node, or step back up to the parent once all children are
//! exhausted. Consequently every non-leaf is yielded once per outgoing edge
//! plus once on the way back to its own parent, and every leaf is yielded
//! exactly once (immediately followed by its parent).
//!
//! Cursor state (which child to descend to next) is owned by the iterator in
//! a `HashMap<NodeId, usize>`, never stored on `Node` — so, unlike the
//! traversal this is modelled on, two iterators may walk overlapping subtrees
//! concurrently without stepping on each other's state.
//!
//! One deliberate deviation: termination is always relative to the
//! iterator's own start node, including when the start node is itself a
//! leaf. The original implementation instead tested against the tree's
//! global root in that one branch, which means starting an iterator at a
//! non-root leaf could walk past the intended subtree boundary. Terminating
//! relative to `start` in every branch is what the surrounding prose
//! ("the iterator terminates after yielding the start node for the last
//! time") actually describes, and it is the only choice under which
//! `build_post_order`/`leaf_label_map` called on an arbitrary subtree root
//! stay confined to that subtree.

use crate::node::NodeId;
use crate::tree::Tree;
use std::collections::{HashMap, HashSet};

pub struct RnodeIterator<'a> {
    tree: &'a Tree,
    start: NodeId,
    current: Option<NodeId>,
    cursors: HashMap<NodeId, usize>,
}

impl<'a> RnodeIterator<'a> {
    pub fn new(tree: &'a Tree, start: NodeId) -> Self {
        Self {
            tree,
            start,
            current: Some(start),
            cursors: HashMap::new(),
        }
    }
}

impl<'a> Iterator for RnodeIterator<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.current?;
        let node = self.tree.get_node(current)?;

        if node.is_leaf() {
            if current == self.start {
                self.current = None;
                return None;
            }
            self.current = node.parent;
            return self.current;
        }

        let visited = *self.cursors.get(&current).unwrap_or(&0);
        if visited >= node.children.len() {
            if current == self.start {
                self.current = None;
                return None;
            }
            self.current = node.parent;
            return self.current;
        }

        let child = node.children[visited];
        self.cursors.insert(current, visited + 1);
        self.current = Some(child);
        Some(child)
    }
}

/// Run the iterator to exhaustion, reverse, keep each node's first
/// appearance, reverse again: a fresh post-order list with each node
/// appearing exactly once.
pub fn build_post_order(tree: &Tree, root: NodeId) -> Vec<NodeId> {
    let mut traversal: Vec<NodeId> = RnodeIterator::new(tree, root).collect();
    if traversal.is_empty() {
        // Degenerate case: a single-node (leaf) subtree yields nothing from
        // the edge walk since there is no edge to walk; report the node itself.
        return vec![root];
    }
    traversal.reverse();
    let mut seen = HashSet::new();
    let mut deduped = Vec::with_capacity(traversal.len());
    for n in traversal {
        if seen.insert(n) {
            deduped.push(n);
        }
    }
    deduped.reverse();
    deduped
}

/// Map from non-empty leaf label to leaf node id, last-seen-wins on
/// duplicate labels.
pub fn leaf_label_map(tree: &Tree, root: NodeId) -> HashMap<String, NodeId> {
    let mut map = HashMap::new();
    let mut any = false;
    for id in RnodeIterator::new(tree, root) {
        any = true;
        record_leaf(tree, id, &mut map);
    }
    if !any {
        record_leaf(tree, root, &mut map);
    }
    map
}

fn record_leaf(tree: &Tree, id: NodeId, map: &mut HashMap<String, NodeId>) {
    if let Some(node) = tree.get_node(id) {
        if node.is_leaf() {
            if let Some(name) = &node.name {
                if !name.is_empty() {
                    map.insert(name.clone(), id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_newick;

    #[test]
    fn test_build_post_order_matches_scenario_one() {
        let tree = parse_newick("((A,B),C);").unwrap();
        let root = tree.get_root().unwrap();
        let order = build_post_order(&tree, root);
        let names: Vec<Option<String>> = order
            .iter()
            .map(|&id| tree.get_node(id).unwrap().name.clone())
            .collect();
        // A, B, (A,B), C, root — only A/B/C carry labels here.
        assert_eq!(
            names,
            vec![
                Some("A".to_string()),
                Some("B".to_string()),
                None,
                Some("C".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_post_order_ancestor_after_descendants() {
        let tree = parse_newick("((A,B)f,(C,(D,E)g)h)i;").unwrap();
        let root = tree.get_root().unwrap();
        let order = build_post_order(&tree, root);
        let pos = |name: &str| {
            order
                .iter()
                .position(|&id| tree.get_node(id).unwrap().name.as_deref() == Some(name))
                .unwrap()
        };
        assert!(pos("A") < pos("f"));
        assert!(pos("B") < pos("f"));
        assert!(pos("f") < pos("i"));
        assert!(pos("D") < pos("g"));
        assert!(pos("g") < pos("h"));
        assert!(pos("h") < pos("i"));
    }

    #[test]
    fn test_leaf_label_map_last_seen_wins() {
        let tree = parse_newick("((A,A),B);").unwrap();
        let root = tree.get_root().unwrap();
        let map = leaf_label_map(&tree, root);
        let a_id = *map.get("A").unwrap();
        // Last A in post-order traversal order should win; just check it's a leaf named A.
        assert_eq!(tree.get_node(a_id).unwrap().name.as_deref(), Some("A"));
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = parse_newick("A;").unwrap();
        let root = tree.get_root().unwrap();
        let order = build_post_order(&tree, root);
        assert_eq!(order, vec![root]);
        let map = leaf_label_map(&tree, root);
        assert_eq!(map.get("A"), Some(&root));
    }
}
