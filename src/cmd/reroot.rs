use clap::*;
use nwk::reader;
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("reroot")
        .about("Reroots a tree at a specified node or the longest branch")
        .after_help(
            r###"
Reroots a phylogenetic tree on a specific branch or node.

Notes:
* Target nodes (`--node`/`-n`) can be leaves or internal nodes.
* With multiple `--node` values, the tree is rerooted on the edge above
  their lowest common ancestor.
* With no `--node` given, the tree is rerooted at the midpoint of its
  longest branch.
* `--support-as-labels` shifts internal-node labels (commonly bootstrap
  support values) along the reversed path so they stay attached to the
  same split.
* Degree-2 nodes left behind by the old root are removed automatically.

Examples:
1. Reroot at the longest branch:
   nwk reroot input.nwk

2. Reroot on a named node:
   nwk reroot input.nwk -n Homo

3. Reroot on the LCA of two nodes, preserving support labels:
   nwk reroot input.nwk -n Homo -n Pan -s
"###,
        )
        .arg(Arg::new("infile").required(true).num_args(1).index(1).help("Input filename. [stdin] for standard input"))
        .arg(
            Arg::new("node")
                .long("node")
                .short('n')
                .num_args(1)
                .action(ArgAction::Append)
                .help("Node name; may be repeated"),
        )
        .arg(
            Arg::new("support_as_labels")
                .long("support-as-labels")
                .short('s')
                .action(ArgAction::SetTrue)
                .help("Shift internal node labels when rerooting"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let process_support = args.get_flag("support_as_labels");

    let infile = args.get_one::<String>("infile").unwrap();
    let mut tree = reader::read_one_tree_from_path(infile)?;

    let names: Vec<String> = args.get_many::<String>("node").unwrap_or_default().cloned().collect();

    let new_outgroup = if names.is_empty() {
        tree.get_node_with_longest_edge()
    } else {
        let ids = super::util::select_ids(&tree, &names, None, &[], false)?;
        let id_vec: Vec<_> = ids.into_iter().collect();
        if id_vec.is_empty() {
            None
        } else {
            Some(nwk::lca::lca_from_nodes(&tree, &id_vec).map_err(anyhow::Error::msg)?)
        }
    };

    if let Some(outgroup) = new_outgroup {
        tree.reroot_tree(outgroup, process_support).map_err(anyhow::Error::msg)?;
    }

    writer.write_all((nwk::writer::write_newick(&tree) + "\n").as_bytes())?;
    Ok(())
}
