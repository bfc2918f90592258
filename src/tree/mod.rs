pub mod ops;
pub mod query;
pub mod stat;
pub mod traversal;
pub mod transform;

use crate::node::{Node, NodeId};
use std::cell::Cell;
use std::collections::BTreeMap;

/// Lazily-computed, memoised classification of a tree's branch lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeType {
    /// Every non-root node has an empty length string.
    Cladogram,
    /// Every non-root node has a numeric length string (root's length is
    /// optionally empty).
    Phylogram,
    /// A mix of empty and numeric length strings among non-root nodes.
    Neither,
    /// Not yet computed for this tree instance.
    Unknown,
}

/// An outcome of [`ops::unlink_rnode`], modelled as a genuine three-armed
/// enum rather than an out-parameter plus status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlinkOutcome {
    /// The node was removed; its former parent still has at least two children.
    Done,
    /// The node was removed and its former parent is now single-child; the
    /// caller must promote that remaining child to take the parent's place
    /// (see [`ops::promote_root_child`]).
    RootChild(NodeId),
    /// The operation could not be completed (`n` is the root, or already
    /// detached).
    Error(String),
}

#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: Option<NodeId>,
    tree_type: Cell<TreeType>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            tree_type: Cell::new(TreeType::Unknown),
        }
    }

    /// Add a new, unattached node to the arena. Returns its id.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id));
        self.invalidate_type();
        id
    }

    /// Number of live (non soft-deleted) nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
            self.invalidate_type();
        }
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).filter(|n| !n.deleted)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.invalidate_type();
        self.nodes.get_mut(id).filter(|n| !n.deleted)
    }

    fn invalidate_type(&mut self) {
        self.tree_type.set(TreeType::Unknown);
    }

    /// Classify the tree's branch-length regime, memoising the result until
    /// the next mutation through `get_node_mut`/`add_node`/`set_root`.
    pub fn tree_type(&self) -> TreeType {
        if matches!(self.tree_type.get(), TreeType::Unknown) {
            self.tree_type.set(stat::classify_tree_type(self));
        }
        self.tree_type.get()
    }

    // --- node linking (component 6) ---

    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
        ops::add_child(self, parent_id, child_id)
    }

    pub fn remove_node(&mut self, id: NodeId, recursive: bool) {
        ops::remove_node(self, id, recursive)
    }

    pub fn collapse_node(&mut self, id: NodeId) -> Result<(), String> {
        ops::collapse_node(self, id)
    }

    pub fn compact(&mut self) {
        ops::compact(self)
    }

    pub fn insert_node_above(&mut self, id: NodeId, label: Option<&str>) -> Result<NodeId, String> {
        ops::insert_node_above(self, id, label)
    }

    pub fn splice_out(&mut self, id: NodeId) -> Result<(), String> {
        ops::splice_out(self, id)
    }

    pub fn unlink_rnode(&mut self, id: NodeId) -> UnlinkOutcome {
        ops::unlink_rnode(self, id)
    }

    pub fn promote_root_child(&mut self, old_root: NodeId, new_root: NodeId) {
        ops::promote_root_child(self, old_root, new_root)
    }

    pub fn swap_with_parent(&mut self, id: NodeId) -> Result<(), String> {
        ops::swap_with_parent(self, id)
    }

    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        ops::siblings(self, id)
    }

    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: isize) -> Result<(), String> {
        ops::insert_child(self, parent, child, index)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), String> {
        ops::remove_child(self, parent, child)
    }

    pub fn remove_degree_two_nodes(&mut self) {
        ops::remove_degree_two_nodes(self)
    }

    pub fn prune_where<F>(&mut self, predicate: F)
    where
        F: Fn(&Node) -> bool + Copy,
    {
        ops::prune_where(self, predicate)
    }

    // --- traversal (component 7) ---

    pub fn preorder(&self, start: NodeId) -> Vec<NodeId> {
        traversal::preorder(self, start)
    }

    pub fn postorder(&self, start: NodeId) -> Vec<NodeId> {
        crate::rnode_iter::build_post_order(self, start)
    }

    pub fn levelorder(&self, start: NodeId) -> Vec<NodeId> {
        traversal::levelorder(self, start)
    }

    pub fn get_subtree(&self, root: NodeId) -> Vec<NodeId> {
        traversal::preorder(self, root)
    }

    pub fn extract_subtree(&self, root: NodeId) -> Result<Tree, String> {
        traversal::extract_subtree(self, root)
    }

    // --- query ---

    pub fn get_path_from_root(&self, id: NodeId) -> Result<Vec<NodeId>, String> {
        query::get_path_from_root(self, id)
    }

    pub fn get_common_ancestor(&self, a: NodeId, b: NodeId) -> Result<NodeId, String> {
        crate::lca::lca2(self, a, b)
    }

    pub fn get_distance(&self, a: NodeId, b: NodeId) -> Result<(f64, usize), String> {
        query::get_distance(self, a, b)
    }

    pub fn find_nodes<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        query::find_nodes(self, predicate)
    }

    pub fn count_descendants(&self, id: NodeId) -> usize {
        query::count_descendants(self, id)
    }

    pub fn get_height(&self, id: NodeId, weighted: bool) -> f64 {
        query::get_height(self, id, weighted)
    }

    // --- stat ---

    pub fn get_leaves(&self) -> Vec<NodeId> {
        self.root.map(|r| stat::get_leaves(self, r)).unwrap_or_default()
    }

    pub fn get_leaf_names(&self) -> Vec<String> {
        self.root
            .map(|r| stat::get_leaf_names(self, r))
            .unwrap_or_default()
    }

    pub fn is_binary(&self) -> bool {
        stat::is_binary(self)
    }

    pub fn diameter(&self) -> Option<f64> {
        stat::diameter(self)
    }

    pub fn get_names(&self) -> Vec<String> {
        stat::get_names(self)
    }

    pub fn get_name_id(&self) -> BTreeMap<String, NodeId> {
        stat::get_name_id(self)
    }

    pub fn get_property_values(&self, key: &str) -> BTreeMap<NodeId, String> {
        stat::get_property_values(self, key)
    }

    pub fn get_node_with_longest_edge(&self) -> Option<NodeId> {
        stat::get_node_with_longest_edge(self)
    }

    // --- tree operations (component 12) ---

    pub fn reroot_tree(&mut self, outgroup: NodeId, process_support_values: bool) -> Result<(), String> {
        transform::reroot_tree(self, outgroup, process_support_values)
    }

    pub fn collapse_pure_clades(&mut self) {
        transform::collapse_pure_clades(self)
    }

    pub fn is_monophyletic(&self, descendants: &[NodeId], ancestor: NodeId) -> Result<bool, String> {
        transform::is_monophyletic(self, descendants, ancestor)
    }
}
