use clap::*;
use nwk::reader;
use nwk::support as supp;
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("support")
        .about("Annotates internal nodes with bipartition support from replicate trees")
        .after_help(
            r###"
Computes, for every internal node of the target tree, how many of the
replicate trees (e.g. bootstrap pseudoreplicates) contain the same
bipartition of leaves, and relabels that node with the count (or, with
`--percent`, that count as a percentage of the replicate total).

Notes:
* The first argument is the target tree (to which support values are attributed).
* The second argument is the replicate trees (e.g., from bootstrap).
* Assumes that all trees share the same leaf set; a replicate with a leaf
  absent from the target tree is a fatal error.

Examples:
1. Attribute support values:
   nwk support target.nwk replicates.nwk

2. Output support as percentages:
   nwk support target.nwk replicates.nwk --percent
"###,
        )
        .arg(Arg::new("target").required(true).num_args(1).index(1).help("Target tree filename. [stdin] for standard input"))
        .arg(Arg::new("replicates").required(true).num_args(1).index(2).help("Replicate trees filename"))
        .arg(Arg::new("percent").long("percent").short('p').action(ArgAction::SetTrue).help("Label with percentages instead of raw counts"))
        .arg(Arg::new("outfile").short('o').long("outfile").num_args(1).default_value("stdout").help("Output filename. [stdout] for screen"))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let target_file = args.get_one::<String>("target").unwrap();
    let replicates_file = args.get_one::<String>("replicates").unwrap();
    let as_percentage = args.get_flag("percent");

    let mut target = reader::read_one_tree_from_path(target_file)?;
    let replicates = reader::read_trees_from_path(replicates_file)?;

    let leaf_map = supp::build_leaf_map(&target).map_err(anyhow::Error::msg)?;
    let counts = supp::count_clades(&replicates, &leaf_map).map_err(anyhow::Error::msg)?;
    supp::annotate_support(&mut target, replicates.len(), &counts, &leaf_map, as_percentage)
        .map_err(anyhow::Error::msg)?;

    writer.write_all((nwk::writer::write_newick(&target) + "\n").as_bytes())?;
    Ok(())
}
