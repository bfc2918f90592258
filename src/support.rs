//! Component 13: bipartition computation and clade-support annotation.
//! Grounded in the teacher's `tree::support` module, extended with the final
//! relabeling step (spec scenario 6) that module stops short of: writing
//! counts or percentages back onto a target tree's internal-node labels.

use crate::node::NodeId;
use crate::tree::Tree;
use fixedbitset::FixedBitSet;
use std::collections::HashMap;

/// Map every leaf name appearing in `tree` to a stable bit index, sorted by
/// name so the mapping is independent of leaf order in the source file.
pub fn build_leaf_map(tree: &Tree) -> Result<HashMap<String, usize>, String> {
    let mut leaf_names = Vec::new();
    for node in &tree.nodes {
        if !node.deleted && node.is_leaf() {
            match &node.name {
                Some(name) => leaf_names.push(name.clone()),
                None => return Err("leaf node missing a name".to_string()),
            }
        }
    }
    leaf_names.sort();
    leaf_names.dedup();

    Ok(leaf_names.into_iter().enumerate().map(|(i, n)| (n, i)).collect())
}

/// Post-order bipartition bit-sets for every node: a leaf's set has just its
/// own bit; an interior node's set is the union of its children's. A leaf
/// whose name is absent from `leaf_map` is a malformed-map error, not a
/// silently-skipped bit — a replicate with a foreign leaf would otherwise
/// produce a bipartition count that looks valid but isn't comparable to the
/// target tree's.
pub fn compute_all_bitsets(
    tree: &Tree,
    leaf_map: &HashMap<String, usize>,
) -> Result<HashMap<NodeId, FixedBitSet>, String> {
    let num_leaves = leaf_map.len();
    let mut node_bitsets = HashMap::new();

    let Some(root) = tree.get_root() else {
        return Ok(node_bitsets);
    };

    for id in tree.postorder(root) {
        let node = tree.get_node(id).unwrap();
        let mut bitset = FixedBitSet::with_capacity(num_leaves);

        if node.is_leaf() {
            let name = node.name.as_deref().ok_or("leaf node missing a name")?;
            let idx = leaf_map
                .get(name)
                .ok_or_else(|| format!("malformed bipartition map: leaf '{}' absent from leaf_map", name))?;
            bitset.set(*idx, true);
        } else {
            for &child in &node.children {
                if let Some(child_bs) = node_bitsets.get(&child) {
                    bitset.union_with(child_bs);
                }
            }
        }
        node_bitsets.insert(id, bitset);
    }

    Ok(node_bitsets)
}

/// Count how many replicate trees contain each internal-node bipartition.
/// Leaves are excluded — a leaf's bit is present by definition in every
/// replicate that has it, so a leaf count would be uninformative.
pub fn count_clades(trees: &[Tree], leaf_map: &HashMap<String, usize>) -> Result<HashMap<FixedBitSet, usize>, String> {
    let mut counts = HashMap::new();
    for tree in trees {
        let bitsets = compute_all_bitsets(tree, leaf_map)
            .map_err(|e| crate::error::TreeError::MalformedMap(e).to_string())?;
        for (id, bs) in bitsets {
            if !tree.get_node(id).unwrap().is_leaf() {
                *counts.entry(bs).or_insert(0) += 1;
            }
        }
    }
    Ok(counts)
}

/// Relabel every internal node of `target` with its bipartition's replicate
/// count (or, if `as_percentage`, that count as a percentage of
/// `replicate_count`, rounded to the nearest integer). A clade absent from
/// `counts` is labelled `0`.
pub fn annotate_support(
    target: &mut Tree,
    replicate_count: usize,
    counts: &HashMap<FixedBitSet, usize>,
    leaf_map: &HashMap<String, usize>,
    as_percentage: bool,
) -> Result<(), String> {
    let bitsets = compute_all_bitsets(target, leaf_map)?;
    let Some(root) = target.get_root() else {
        return Ok(());
    };

    for id in target.postorder(root) {
        if target.get_node(id).unwrap().is_leaf() {
            continue;
        }
        let bs = bitsets.get(&id).cloned().unwrap_or_else(|| FixedBitSet::with_capacity(leaf_map.len()));
        let count = counts.get(&bs).copied().unwrap_or(0);
        let label = if as_percentage && replicate_count > 0 {
            format!("{}", ((count as f64 / replicate_count as f64) * 100.0).round() as i64)
        } else {
            format!("{}", count)
        };
        target.get_node_mut(id).unwrap().set_name(label);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_newick;

    #[test]
    fn test_build_leaf_map_sorted_and_deduped() {
        let tree = parse_newick("((A,B),C);").unwrap();
        let map = build_leaf_map(&tree).unwrap();
        assert_eq!(map.len(), 3);
        let mut names: Vec<&String> = map.keys().collect();
        names.sort();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_count_clades_and_annotate_support() {
        let leaf_map: HashMap<String, usize> =
            ["A", "B", "C", "D", "E"].iter().enumerate().map(|(i, &n)| (n.to_string(), i)).collect();

        let rep1 = parse_newick("((A,B),(C,(D,E)));").unwrap();
        let rep2 = parse_newick("((A,B),(C,(D,E)));").unwrap();
        let rep3 = parse_newick("(((A,B),C),(D,E));").unwrap();

        let counts = count_clades(&[rep1, rep2, rep3], &leaf_map).unwrap();

        let mut target = parse_newick("((A,B)f,(C,(D,E)g)h)i;").unwrap();
        annotate_support(&mut target, 3, &counts, &leaf_map, false).unwrap();

        // (A,B) appears in all three replicates, so f's new label is "3".
        let labels: Vec<String> = target
            .preorder(target.get_root().unwrap())
            .iter()
            .filter_map(|&id| target.get_node(id).unwrap().name.clone())
            .collect();
        assert!(labels.contains(&"3".to_string()));
    }

    #[test]
    fn test_count_clades_rejects_replicate_with_foreign_leaf() {
        let leaf_map: HashMap<String, usize> =
            ["A", "B", "C"].iter().enumerate().map(|(i, &n)| (n.to_string(), i)).collect();
        // "D" is not in leaf_map: a typo'd or extra leaf label must be fatal,
        // not silently dropped from the bipartition.
        let bad_rep = parse_newick("((A,B),D);").unwrap();
        let err = count_clades(&[bad_rep], &leaf_map).unwrap_err();
        assert!(err.contains("malformed bipartition map"));
    }

    #[test]
    fn test_annotate_support_as_percentage() {
        let leaf_map: HashMap<String, usize> =
            ["A", "B", "C"].iter().enumerate().map(|(i, &n)| (n.to_string(), i)).collect();
        let rep = parse_newick("((A,B),C);").unwrap();
        let counts = count_clades(&[rep], &leaf_map).unwrap();

        let mut target = parse_newick("((A,B)f,C)r;").unwrap();
        annotate_support(&mut target, 1, &counts, &leaf_map, true).unwrap();
        let f = target.get_name_id()["100"];
        assert_eq!(target.get_node(f).unwrap().name.as_deref(), Some("100"));
    }
}
