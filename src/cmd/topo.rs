use clap::*;
use nwk::reader;
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("topo")
        .about("Strips a tree down to topology and selected attributes")
        .after_help(
            r###"
By default, branch lengths and NHX comments are removed, leaving bare
topology plus labels.

Notes:
* `--bl` keeps branch lengths.
* `--comment` keeps NHX comments.
* `-I` drops internal-node labels.
* `-L` drops leaf labels.

Examples:
1. Topology only:
   nwk topo tree.nwk

2. Keep branch lengths, drop comments:
   nwk topo tree.nwk --bl
"###,
        )
        .arg(Arg::new("infile").required(true).num_args(1).index(1).help("Input filename. [stdin] for standard input"))
        .arg(Arg::new("bl").long("bl").short('b').action(ArgAction::SetTrue).help("Keep branch lengths"))
        .arg(Arg::new("comment").long("comment").short('c').action(ArgAction::SetTrue).help("Keep NHX comments"))
        .arg(Arg::new("Internal").long("Internal").short('I').action(ArgAction::SetTrue).help("Drop internal-node labels"))
        .arg(Arg::new("Leaf").long("Leaf").short('L').action(ArgAction::SetTrue).help("Drop leaf labels"))
        .arg(Arg::new("outfile").short('o').long("outfile").num_args(1).default_value("stdout").help("Output filename. [stdout] for screen"))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let keep_bl = args.get_flag("bl");
    let keep_comment = args.get_flag("comment");
    let drop_internal = args.get_flag("Internal");
    let drop_leaf = args.get_flag("Leaf");

    let infile = args.get_one::<String>("infile").unwrap();
    let trees = reader::read_trees_from_path(infile)?;

    for mut tree in trees {
        if let Some(root) = tree.get_root() {
            for id in tree.levelorder(root) {
                let is_leaf = tree.get_node(id).unwrap().is_leaf();
                let node = tree.get_node_mut(id).unwrap();
                if !keep_bl {
                    node.clear_length();
                }
                if !keep_comment {
                    node.properties = None;
                }
                if is_leaf && drop_leaf {
                    node.name = None;
                }
                if !is_leaf && drop_internal {
                    node.name = None;
                }
            }
        }

        writer.write_all((nwk::writer::write_newick(&tree) + "\n").as_bytes())?;
    }

    Ok(())
}
