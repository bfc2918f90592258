use clap::*;
use nwk::reader;
use nwk::tree::TreeType;

pub fn make_subcommand() -> Command {
    Command::new("stat")
        .about("Prints statistics about trees")
        .after_help(
            r###"
Output format:
* Key-value pairs (`--style col`, default):
    Type    cladogram
    nodes   18
    leaves  11
    ...

* One row per tree, tab-separated (`--style line`):
    Type       nodes  leaves  dichotomies  leaf labels  internal labels
    cladogram  18     11      5            11           0

Examples:
1. Default statistics:
   nwk stat data/catarrhini.nw

2. Output to a file:
   nwk stat data/catarrhini.nw -o stats.tsv
"###,
        )
        .arg(Arg::new("infile").required(true).num_args(1).index(1).help("Input filename. [stdin] for standard input"))
        .arg(Arg::new("outfile").short('o').long("outfile").num_args(1).default_value("stdout").help("Output filename. [stdout] for screen"))
        .arg(Arg::new("style").long("style").value_parser(["col", "line"]).default_value("col").help("Output style"))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let infile = args.get_one::<String>("infile").unwrap();
    let style = args.get_one::<String>("style").unwrap();

    let trees = reader::read_trees_from_path(infile)?;

    use std::io::Write;
    if style == "line" {
        writer.write_fmt(format_args!("Type\tnodes\tleaves\tdichotomies\tleaf labels\tinternal labels\n"))?;
    }

    for tree in &trees {
        let Some(root) = tree.get_root() else { continue };
        let nodes = tree.preorder(root);

        let mut n_leaf = 0;
        let mut n_dichotomies = 0;
        let mut n_leaf_label = 0;
        let mut n_internal_label = 0;

        for &id in &nodes {
            let node = tree.get_node(id).unwrap();
            if node.is_leaf() {
                n_leaf += 1;
            }
            if node.children.len() == 2 {
                n_dichotomies += 1;
            }
            if node.name.as_deref().map(|s| !s.is_empty()).unwrap_or(false) {
                if node.is_leaf() {
                    n_leaf_label += 1;
                } else {
                    n_internal_label += 1;
                }
            }
        }

        let tree_type = match tree.tree_type() {
            TreeType::Cladogram => "cladogram",
            TreeType::Phylogram => "phylogram",
            TreeType::Neither | TreeType::Unknown => "neither",
        };

        if style == "line" {
            writer.write_fmt(format_args!(
                "{}\t{}\t{}\t{}\t{}\t{}\n",
                tree_type,
                nodes.len(),
                n_leaf,
                n_dichotomies,
                n_leaf_label,
                n_internal_label
            ))?;
        } else {
            writer.write_fmt(format_args!("Type\t{}\n", tree_type))?;
            writer.write_fmt(format_args!("nodes\t{}\n", nodes.len()))?;
            writer.write_fmt(format_args!("leaves\t{}\n", n_leaf))?;
            writer.write_fmt(format_args!("dichotomies\t{}\n", n_dichotomies))?;
            writer.write_fmt(format_args!("leaf labels\t{}\n", n_leaf_label))?;
            writer.write_fmt(format_args!("internal labels\t{}\n", n_internal_label))?;
        }
    }

    Ok(())
}
