use clap::*;
use nwk::reader;
use std::collections::BTreeSet;
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("label")
        .about("Lists labels in a Newick file")
        .after_help(
            r###"
Prints the tree's labels, one per line in tree order, by default. Empty
labels produce no output.

Notes:
* `-t` prints all labels on one line, tab-separated.
* `-I`/`-L` exclude internal or leaf nodes.
* `-n`/`-f`/`-r` select a subset of nodes; they combine.
* `-D` also includes descendants of selected internal nodes.
* `-M` only prints output if the selection is monophyletic.
* `--root` prints only the root's label.

Examples:
1. List all labels:
   nwk label tree.nwk

2. Count leaves:
   nwk label tree.nwk -I | wc -l

3. Check monophyly of two leaves:
   nwk label tree.nwk -n Human -n Chimp -M
"###,
        )
        .arg(Arg::new("infile").required(true).num_args(1).index(1).help("Input filename. [stdin] for standard input"))
        .arg(Arg::new("Internal").long("Internal").short('I').action(ArgAction::SetTrue).help("Don't print internal labels"))
        .arg(Arg::new("Leaf").long("Leaf").short('L').action(ArgAction::SetTrue).help("Don't print leaf labels"))
        .arg(Arg::new("node").long("node").short('n').num_args(1).action(ArgAction::Append).help("Select nodes by exact name"))
        .arg(Arg::new("file").long("file").short('f').num_args(1).help("Select nodes from a file"))
        .arg(Arg::new("regex").long("regex").short('r').num_args(1).action(ArgAction::Append).help("Select nodes by regex"))
        .arg(Arg::new("descendants").long("descendants").short('D').action(ArgAction::SetTrue).help("Include descendants of selected internal nodes"))
        .arg(Arg::new("root").long("root").action(ArgAction::SetTrue).help("Only print the root's label"))
        .arg(Arg::new("tab").long("tab").short('t').action(ArgAction::SetTrue).help("Print labels on one tab-separated line"))
        .arg(Arg::new("monophyly").long("monophyly").short('M').action(ArgAction::SetTrue).help("Only print when the selection is monophyletic"))
        .arg(Arg::new("outfile").short('o').long("outfile").num_args(1).default_value("stdout").help("Output filename. [stdout] for screen"))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let names: Vec<String> = args.get_many::<String>("node").unwrap_or_default().cloned().collect();
    let file = args.get_one::<String>("file").map(String::as_str);
    let regexes: Vec<String> = args.get_many::<String>("regex").unwrap_or_default().cloned().collect();
    let descendants = args.get_flag("descendants");
    let skip_internal = args.get_flag("Internal");
    let skip_leaf = args.get_flag("Leaf");
    let is_monophyly = args.get_flag("monophyly");
    let tab_sep = args.get_flag("tab");
    let has_selector = !names.is_empty() || file.is_some() || !regexes.is_empty();

    let infile = args.get_one::<String>("infile").unwrap();
    let trees = reader::read_trees_from_path(infile)?;

    for tree in &trees {
        if args.get_flag("root") {
            if let Some(root) = tree.get_root() {
                if let Some(name) = &tree.get_node(root).unwrap().name {
                    if !name.is_empty() {
                        writer.write_fmt(format_args!("{}\n", name))?;
                    }
                }
            }
            continue;
        }

        let ids_name = super::util::select_ids(tree, &names, file, &regexes, descendants)?;
        let ids_pos = super::util::select_positions(tree, skip_internal, skip_leaf, is_monophyly);
        let ids: BTreeSet<_> = if has_selector {
            ids_name.intersection(&ids_pos).copied().collect()
        } else {
            ids_pos
        };

        if is_monophyly {
            let id_vec: Vec<_> = ids.iter().copied().collect();
            if id_vec.is_empty() {
                continue;
            }
            let lca = match nwk::lca::lca_from_nodes(tree, &id_vec) {
                Ok(id) => id,
                Err(_) => continue,
            };
            match tree.is_monophyletic(&id_vec, lca) {
                Ok(true) => {}
                _ => continue,
            }
        }

        let mut collected = Vec::new();
        for &id in &ids {
            if let Some(name) = &tree.get_node(id).unwrap().name {
                if name.is_empty() {
                    continue;
                }
                if tab_sep {
                    collected.push(name.clone());
                } else {
                    writer.write_fmt(format_args!("{}\n", name))?;
                }
            }
        }
        if tab_sep && !collected.is_empty() {
            writer.write_fmt(format_args!("{}\n", collected.join("\t")))?;
        }
    }

    Ok(())
}
