//! Component 10: resolving user-supplied names/patterns to node ids.
//! Grounded in the `--node`/`--file`/`--regex`/`--descendants` matching
//! logic shared by every CLI driver that selects a subset of a tree's nodes,
//! factored here so it no longer depends on a particular arg-parsing library.

use crate::error::TreeError;
use crate::node::NodeId;
use crate::tree::Tree;
use regex::RegexBuilder;
use std::collections::{BTreeSet, HashMap};

/// Ids of the named nodes among `names` that actually exist in `tree`;
/// unknown names are silently skipped (callers that need to warn should
/// diff `names` against the returned set's labels themselves).
pub fn match_by_names(tree: &Tree, names: &[String]) -> BTreeSet<NodeId> {
    let id_of = tree.get_name_id();
    names.iter().filter_map(|n| id_of.get(n).copied()).collect()
}

/// Like [`match_by_names`], reading one name per line from `path`.
pub fn match_by_file(tree: &Tree, path: &str) -> Result<BTreeSet<NodeId>, TreeError> {
    let names = intspan::read_first_column(path);
    Ok(match_by_names(tree, &names))
}

/// Ids of every named node whose label case-insensitively matches `pattern`.
pub fn match_by_regex(tree: &Tree, pattern: &str) -> Result<BTreeSet<NodeId>, TreeError> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| TreeError::LogicError(format!("invalid pattern '{}': {}", pattern, e)))?;
    let id_of = tree.get_name_id();
    Ok(id_of
        .iter()
        .filter(|(name, _)| re.is_match(name))
        .map(|(_, &id)| id)
        .collect())
}

/// Extend `ids` with every named descendant of any internal node already in
/// the set.
pub fn with_descendants(tree: &Tree, ids: BTreeSet<NodeId>) -> BTreeSet<NodeId> {
    let mut out = ids.clone();
    for &id in &ids {
        let Some(node) = tree.get_node(id) else { continue };
        if node.is_leaf() {
            continue;
        }
        for &descendant in &tree.get_subtree(id) {
            if tree.get_node(descendant).map(|n| n.name.is_some()).unwrap_or(false) {
                out.insert(descendant);
            }
        }
    }
    out
}

/// Every node id, partitioned by leaf/internal status, honouring
/// `skip_leaf`/`skip_internal`.
pub fn match_by_position(tree: &Tree, skip_leaf: bool, skip_internal: bool) -> BTreeSet<NodeId> {
    let Some(root) = tree.get_root() else {
        return BTreeSet::new();
    };
    tree.preorder(root)
        .into_iter()
        .filter(|&id| {
            let node = tree.get_node(id).unwrap();
            (node.is_leaf() && !skip_leaf) || (!node.is_leaf() && !skip_internal)
        })
        .collect()
}

/// Name to every node id carrying that name, in tree-order — unlike
/// `Tree::get_name_id`, duplicate labels are not collapsed to a single
/// winner; needed for support/bipartition leaf mapping and
/// `lca_from_labels_multi`.
pub fn name_multimap(tree: &Tree) -> HashMap<String, Vec<NodeId>> {
    let mut map: HashMap<String, Vec<NodeId>> = HashMap::new();
    if let Some(root) = tree.get_root() {
        for id in tree.preorder(root) {
            if let Some(name) = &tree.get_node(id).unwrap().name {
                if !name.is_empty() {
                    map.entry(name.clone()).or_default().push(id);
                }
            }
        }
    }
    map
}
