use clap::*;
use nwk::reader;
use std::collections::BTreeSet;
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("subtree")
        .about("Extracts or condenses a subtree")
        .after_help(
            r###"
Extracts the clade rooted at the lowest common ancestor of the selected
nodes, or (with `--condense`) collapses that clade in place down to a
single labelled node.

Notes:
* Node selection: `--node`/`--file`/`--regex`; with none given, nothing
  is selected and no output is produced.
* `--monophyly` only prints output when the selected leaves are exactly
  the leaf set under their LCA.
* `--condense NAME` replaces the subtree with a single node named NAME,
  carrying `member=<count>` and `tri=white` NHX properties and the
  subtree root's own edge length.
* `--context N` walks N levels above the LCA before extracting/condensing.

Examples:
1. Extract the clade containing Human and Chimp:
   nwk subtree tree.nwk -n Human -n Chimp

2. Condense the Hominini clade into one node:
   nwk subtree tree.nwk -n Homo -n Pan --condense Hominini
"###,
        )
        .arg(Arg::new("infile").required(true).num_args(1).index(1).help("Input filename. [stdin] for standard input"))
        .arg(Arg::new("node").long("node").short('n').num_args(1).action(ArgAction::Append).help("Select nodes by exact name"))
        .arg(Arg::new("file").long("file").short('f').num_args(1).help("Select nodes from a file"))
        .arg(Arg::new("regex").long("regex").short('r').num_args(1).action(ArgAction::Append).help("Select nodes by regex"))
        .arg(Arg::new("descendants").long("descendants").short('D').action(ArgAction::SetTrue).help("Include descendants of selected internal nodes"))
        .arg(Arg::new("monophyly").long("monophyly").short('M').action(ArgAction::SetTrue).help("Only print when the selection is monophyletic"))
        .arg(Arg::new("condense").long("condense").short('C').num_args(1).help("Condense the subtree into a single node with this name"))
        .arg(Arg::new("context").long("context").short('c').num_args(1).value_parser(value_parser!(usize)).default_value("0").help("Extend the subtree by N levels above the LCA"))
        .arg(Arg::new("outfile").short('o').long("outfile").num_args(1).default_value("stdout").help("Output filename. [stdout] for screen"))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let names: Vec<String> = args.get_many::<String>("node").unwrap_or_default().cloned().collect();
    let file = args.get_one::<String>("file").map(String::as_str);
    let regexes: Vec<String> = args.get_many::<String>("regex").unwrap_or_default().cloned().collect();
    let descendants = args.get_flag("descendants");
    let is_monophyly = args.get_flag("monophyly");
    let condense_name = args.get_one::<String>("condense");
    let context_levels = *args.get_one::<usize>("context").unwrap();

    let infile = args.get_one::<String>("infile").unwrap();
    let mut trees = reader::read_trees_from_path(infile)?;

    for tree in &mut trees {
        let ids = super::util::select_ids(tree, &names, file, &regexes, descendants)?;
        if ids.is_empty() {
            continue;
        }
        let id_vec: Vec<_> = ids.iter().copied().collect();
        let mut sub_root_id = match nwk::lca::lca_from_nodes(tree, &id_vec) {
            Ok(id) => id,
            Err(_) => continue,
        };

        if is_monophyly {
            let leaves_under: BTreeSet<_> = tree
                .get_subtree(sub_root_id)
                .into_iter()
                .filter(|&id| tree.get_node(id).unwrap().is_leaf() && tree.get_node(id).unwrap().name.is_some())
                .collect();
            if ids != leaves_under {
                continue;
            }
        }

        for _ in 0..context_levels {
            if let Some(parent) = tree.get_node(sub_root_id).and_then(|n| n.parent) {
                sub_root_id = parent;
            } else {
                break;
            }
        }

        if let Some(name) = condense_name {
            let parent_id = tree.get_node(sub_root_id).unwrap().parent;
            let edge_len = tree.get_node(sub_root_id).unwrap().length_str.clone();

            let new_node_id = tree.add_node();
            {
                let node = tree.get_node_mut(new_node_id).unwrap();
                node.set_name(name.clone());
                node.set_length_str(edge_len);
                node.add_property("member", ids.len().to_string());
                node.add_property("tri", "white");
            }

            tree.remove_node(sub_root_id, true);
            match parent_id {
                Some(parent) => {
                    tree.add_child(parent, new_node_id).map_err(anyhow::Error::msg)?;
                }
                None => tree.set_root(new_node_id),
            }
            writer.write_all((nwk::writer::write_newick(tree) + "\n").as_bytes())?;
        } else {
            let subtree = tree.extract_subtree(sub_root_id).map_err(anyhow::Error::msg)?;
            writer.write_all((nwk::writer::write_newick(&subtree) + "\n").as_bytes())?;
        }
    }

    Ok(())
}
