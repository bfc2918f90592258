//! Shared node-selection plumbing for CLI drivers, built on [`nwk::labels`].
//! Mirrors the donor CLI's bundled `-n/-f/-r/-D` selection rules, but against
//! plain argument values instead of a particular arg-parsing library's
//! `ArgMatches`.

use nwk::labels;
use nwk::tree::Tree;
use nwk::NodeId;
use std::collections::BTreeSet;

/// Resolve the usual `--node`/`--file`/`--regex` selection trio, defaulting
/// to every named node when none of the three is supplied, then optionally
/// expanding to descendants of any selected internal node.
pub fn select_ids(
    tree: &Tree,
    names: &[String],
    file: Option<&str>,
    regexes: &[String],
    descendants: bool,
) -> anyhow::Result<BTreeSet<NodeId>> {
    let any_selector = !names.is_empty() || file.is_some() || !regexes.is_empty();

    let mut ids: BTreeSet<NodeId> = BTreeSet::new();
    if !names.is_empty() {
        ids.extend(labels::match_by_names(tree, names));
    }
    if let Some(path) = file {
        ids.extend(labels::match_by_file(tree, path)?);
    }
    for pattern in regexes {
        ids.extend(labels::match_by_regex(tree, pattern)?);
    }

    if !any_selector {
        ids = tree.get_name_id().into_values().collect();
    }

    if descendants {
        ids = labels::with_descendants(tree, ids);
    }

    Ok(ids)
}

/// Position-based selection (`--Internal`/`--Leaf`, which *exclude* that
/// class), honouring the `--monophyly`-implies-leaves-only rule.
pub fn select_positions(tree: &Tree, skip_internal: bool, skip_leaf: bool, monophyly: bool) -> BTreeSet<NodeId> {
    let skip_internal = skip_internal || monophyly;
    labels::match_by_position(tree, skip_leaf, skip_internal)
}
