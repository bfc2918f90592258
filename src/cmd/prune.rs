use clap::*;
use nwk::reader;
use std::collections::HashSet;
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("prune")
        .about("Remove nodes from a Newick tree")
        .after_help(
            r###"
Removes nodes matched by name, file, or regex, then cleans up the topology
left behind: a parent with one surviving child is spliced out, and an
internal node stripped of all its children is removed in turn.

Notes:
* `--invert` keeps the selected nodes (plus their ancestors and
  descendants) and removes everything else.

Examples:
1. Remove specific leaves:
   nwk prune input.nwk -n Homo -n Pan

2. Keep only a named clade, dropping the rest:
   nwk prune input.nwk -v -n Hominidae
"###,
        )
        .arg(Arg::new("infile").required(true).num_args(1).index(1).help("Input filename. [stdin] for standard input"))
        .arg(Arg::new("node").long("node").short('n').num_args(1).action(ArgAction::Append).help("Node name; may be repeated"))
        .arg(Arg::new("file").long("file").short('f').num_args(1).help("File of node names, one per line"))
        .arg(Arg::new("regex").long("regex").short('r').num_args(1).action(ArgAction::Append).help("Node-name regex; may be repeated"))
        .arg(Arg::new("descendants").long("descendants").short('D').action(ArgAction::SetTrue).help("Include descendants of selected internal nodes"))
        .arg(Arg::new("invert").long("invert").short('v').action(ArgAction::SetTrue).help("Keep selected nodes (and ancestors/descendants); remove the rest"))
        .arg(Arg::new("outfile").short('o').long("outfile").num_args(1).default_value("stdout").help("Output filename. [stdout] for screen"))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let infile = args.get_one::<String>("infile").unwrap();
    let trees = reader::read_trees_from_path(infile)?;

    let names: Vec<String> = args.get_many::<String>("node").unwrap_or_default().cloned().collect();
    let file = args.get_one::<String>("file").map(String::as_str);
    let regexes: Vec<String> = args.get_many::<String>("regex").unwrap_or_default().cloned().collect();
    let descendants = args.get_flag("descendants");
    let invert = args.get_flag("invert");

    for mut tree in trees {
        let target_ids = super::util::select_ids(&tree, &names, file, &regexes, descendants)?;

        let old_internals: Vec<_> = tree
            .get_root()
            .map(|root| tree.levelorder(root).into_iter().filter(|&id| !tree.get_node(id).unwrap().is_leaf()).collect())
            .unwrap_or_default();

        let to_remove: Vec<_> = if invert {
            let Some(root) = tree.get_root() else { continue };
            let mut keep: HashSet<_> = HashSet::new();
            let all_nodes = tree.levelorder(root);

            for &id in &all_nodes {
                let node = tree.get_node(id).unwrap();
                let self_target = target_ids.contains(&id);
                let parent_kept = node.parent.map(|p| keep.contains(&p)).unwrap_or(false);
                if self_target || parent_kept {
                    keep.insert(id);
                }
            }
            for &id in all_nodes.iter().rev() {
                if keep.contains(&id) {
                    if let Some(parent) = tree.get_node(id).unwrap().parent {
                        keep.insert(parent);
                    }
                }
            }
            all_nodes.into_iter().filter(|id| !keep.contains(id)).collect()
        } else {
            target_ids.into_iter().collect()
        };

        for id in to_remove {
            tree.remove_node(id, true);
        }

        // A node that was interior before pruning but lost every child is a
        // dangling internal node, not a genuine leaf; drop it too.
        for id in old_internals.into_iter().rev() {
            if tree.get_node(id).map(|n| n.is_leaf()).unwrap_or(false) {
                tree.remove_node(id, false);
            }
        }

        tree.remove_degree_two_nodes();

        if let Some(root) = tree.get_root() {
            if tree.get_node(root).unwrap().children.len() == 1 {
                let only_child = tree.get_node(root).unwrap().children[0];
                tree.promote_root_child(root, only_child);
                tree.remove_degree_two_nodes();
            }
        }

        writer.write_all((nwk::writer::write_newick(&tree) + "\n").as_bytes())?;
    }

    Ok(())
}
