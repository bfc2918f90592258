use clap::*;
use nwk::{algo, reader};
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("order")
        .about("Sorts the children of each node without changing topology")
        .after_help(
            r###"
Notes:
* `--list` is applied first, then `--an`/`--anr`, then `--nd`/`--ndr`.
* With none of `--list`/`--an`/`--anr`/`--nd`/`--ndr`/`--deladderize`
  given, alphanumeric order is used.
* `--deladderize` alternates sort direction (by subtree size) at each
  successive depth.

Examples:
1. Ladderize (smallest subtree first):
   nwk order tree.nwk --nd

2. Alphanumeric order:
   nwk order tree.nwk --an

3. Order by a list of names:
   nwk order tree.nwk --list names.txt
"###,
        )
        .arg(Arg::new("infile").required(true).num_args(1).index(1).help("Input filename. [stdin] for standard input"))
        .arg(arg!(--nd "By number of descendants"))
        .arg(arg!(--ndr "By number of descendants, reversed"))
        .group(ArgGroup::new("number-of-descendants").args(["nd", "ndr"]))
        .arg(arg!(--an "By alphanumeric order of labels"))
        .arg(arg!(--anr "By alphanumeric order of labels, reversed"))
        .group(ArgGroup::new("alphanumeric").args(["an", "anr"]))
        .arg(Arg::new("deladderize").long("deladderize").alias("dl").action(ArgAction::SetTrue).help("Alternate sort direction at each depth"))
        .arg(Arg::new("list").long("list").short('l').num_args(1).help("Order by a list of names in a file"))
        .arg(Arg::new("outfile").short('o').long("outfile").num_args(1).default_value("stdout").help("Output filename. [stdout] for screen"))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let opt_nd = args.get_one::<Id>("number-of-descendants").map(|x| x.as_str()).unwrap_or("");
    let opt_an = args.get_one::<Id>("alphanumeric").map(|x| x.as_str()).unwrap_or("");
    let is_deladderize = args.get_flag("deladderize");

    let infile = args.get_one::<String>("infile").unwrap();
    let mut trees = reader::read_trees_from_path(infile)?;

    let mut names = Vec::new();
    if let Some(list_file) = args.get_one::<String>("list") {
        names = intspan::read_first_column(list_file);
    }

    let default_an = names.is_empty() && opt_an.is_empty() && opt_nd.is_empty() && !is_deladderize;

    for tree in &mut trees {
        if !names.is_empty() {
            algo::sort_by_list(tree, &names);
        }
        if default_an || !opt_an.is_empty() {
            algo::sort_by_name(tree, opt_an == "anr");
        }
        if !opt_nd.is_empty() {
            algo::ladderize(tree, opt_nd == "ndr");
        }
        if is_deladderize {
            algo::deladderize(tree);
        }

        writer.write_all((nwk::writer::write_newick(tree) + "\n").as_bytes())?;
    }

    Ok(())
}
