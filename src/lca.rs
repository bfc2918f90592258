//! Component 11: lowest common ancestor queries, built on
//! [`Tree::get_path_from_root`] and the [`crate::seq::Seq`] reduction used to
//! fold a multi-node query down to a single pairwise primitive.

use crate::seq::Seq;
use crate::tree::Tree;
use crate::NodeId;

/// The deepest node that is an ancestor of both `a` and `b` (inclusive — if
/// `a` is an ancestor of `b`, `lca2(a, b) == a`). Symmetric in `a`/`b`.
pub fn lca2(tree: &Tree, a: NodeId, b: NodeId) -> Result<NodeId, String> {
    let path_a = tree.get_path_from_root(a)?;
    let path_b = tree.get_path_from_root(b)?;

    let mut last_common = *path_a.first().ok_or("empty path to root")?;
    for (pa, pb) in path_a.iter().zip(path_b.iter()) {
        if pa != pb {
            break;
        }
        last_common = *pa;
    }
    Ok(last_common)
}

/// Fold `lca2` over two or more node ids.
pub fn lca_from_nodes(tree: &Tree, nodes: &[NodeId]) -> Result<NodeId, String> {
    if nodes.is_empty() {
        return Err("no-matching-nodes".to_string());
    }
    let seq = Seq::from_vec(nodes.to_vec());
    let mut first_err = None;
    let result = seq
        .reduce(|a, b| match lca2(tree, a, b) {
            Ok(id) => id,
            Err(e) => {
                first_err.get_or_insert(e);
                a
            }
        })
        .unwrap();
    match first_err {
        Some(e) => Err(e),
        None => Ok(result),
    }
}

/// Resolve labels to node ids via `tree.get_name_id()`, warning on (and
/// skipping) unknown labels to stderr; fails with `no-matching-nodes` if
/// every label is unknown.
pub fn lca_from_labels(tree: &Tree, labels: &[String]) -> Result<NodeId, String> {
    let name_id = tree.get_name_id();
    let mut ids = Vec::new();
    for label in labels {
        match name_id.get(label) {
            Some(&id) => ids.push(id),
            None => eprintln!("warning: no node named '{}'", label),
        }
    }
    if ids.is_empty() {
        return Err("no-matching-nodes".to_string());
    }
    lca_from_nodes(tree, &ids)
}

/// Like [`lca_from_labels`], but a label that names more than one node (a
/// duplicated leaf or internal label) contributes every one of its
/// occurrences to the reduction, not just the last-inserted one.
pub fn lca_from_labels_multi(tree: &Tree, labels: &[String]) -> Result<NodeId, String> {
    let multimap = crate::labels::name_multimap(tree);
    let mut ids = Vec::new();
    for label in labels {
        match multimap.get(label) {
            Some(occurrences) => ids.extend(occurrences.iter().copied()),
            None => eprintln!("warning: no node named '{}'", label),
        }
    }
    if ids.is_empty() {
        return Err("no-matching-nodes".to_string());
    }
    lca_from_nodes(tree, &ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_newick;

    #[test]
    fn test_lca2_symmetric() {
        let tree = parse_newick("((A,B)f,(C,(D,E)g)h)i;").unwrap();
        let id = tree.get_name_id();
        assert_eq!(
            lca2(&tree, id["A"], id["C"]).unwrap(),
            lca2(&tree, id["C"], id["A"]).unwrap()
        );
    }

    #[test]
    fn test_lca2_scenario() {
        let tree = parse_newick("((A,B)f,(C,(D,E)g)h)i;").unwrap();
        let id = tree.get_name_id();
        let name = |n: NodeId| tree.get_node(n).unwrap().name.clone();

        assert_eq!(name(lca2(&tree, id["A"], id["B"]).unwrap()), Some("f".to_string()));
        assert_eq!(name(lca2(&tree, id["A"], id["C"]).unwrap()), Some("i".to_string()));
        assert_eq!(name(lca2(&tree, id["h"], id["E"]).unwrap()), Some("h".to_string()));
    }

    #[test]
    fn test_lca_from_labels_skips_unknown() {
        let tree = parse_newick("((A,B)f,(C,(D,E)g)h)i;").unwrap();
        let labels: Vec<String> = vec!["C".to_string(), "D".to_string(), "nonexistent".to_string()];
        let anc = lca_from_labels(&tree, &labels).unwrap();
        assert_eq!(tree.get_node(anc).unwrap().name.as_deref(), Some("h".to_string()).as_deref());
    }

    #[test]
    fn test_lca_from_labels_all_unknown_fails() {
        let tree = parse_newick("(A,B);").unwrap();
        let labels: Vec<String> = vec!["nope".to_string()];
        assert_eq!(lca_from_labels(&tree, &labels), Err("no-matching-nodes".to_string()));
    }

    #[test]
    fn test_lca_from_labels_multi_uses_every_occurrence_of_a_duplicate_label() {
        // Two leaves are both named "dup"; a query for "dup" must fold over
        // both occurrences, not just whichever one get_name_id() kept.
        let tree = parse_newick("((dup,B)f,(dup,E)g)i;").unwrap();
        let labels: Vec<String> = vec!["dup".to_string()];
        let anc = lca_from_labels_multi(&tree, &labels).unwrap();
        assert_eq!(tree.get_node(anc).unwrap().name.as_deref(), Some("i"));
    }
}
