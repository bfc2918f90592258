use clap::*;
use nwk::reader;
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("distance")
        .about("Prints the patristic or topological distance between two nodes")
        .after_help(
            r###"
Reports the distance between two named nodes: the patristic distance
(sum of edge lengths along the path through their LCA) and the
topological distance (number of edges along that path).

Examples:
1. Distance between two leaves:
   nwk distance tree.nwk -n Human -n Chimp

2. Topological distance only:
   nwk distance tree.nwk -n Human -n Chimp --topological
"###,
        )
        .arg(Arg::new("infile").required(true).num_args(1).index(1).help("Input filename. [stdin] for standard input"))
        .arg(
            Arg::new("node")
                .long("node")
                .short('n')
                .num_args(1)
                .action(ArgAction::Append)
                .required(true)
                .help("Node name; must be given exactly twice"),
        )
        .arg(Arg::new("topological").long("topological").short('t').action(ArgAction::SetTrue).help("Print only the topological (edge-count) distance"))
        .arg(Arg::new("outfile").short('o').long("outfile").num_args(1).default_value("stdout").help("Output filename. [stdout] for screen"))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let topological_only = args.get_flag("topological");

    let infile = args.get_one::<String>("infile").unwrap();
    let trees = reader::read_trees_from_path(infile)?;

    let names: Vec<String> = args.get_many::<String>("node").unwrap_or_default().cloned().collect();
    if names.len() != 2 {
        anyhow::bail!("--node must be given exactly twice, got {}", names.len());
    }

    for tree in &trees {
        let id_of = tree.get_name_id();
        let (Some(&a), Some(&b)) = (id_of.get(&names[0]), id_of.get(&names[1])) else {
            eprintln!("warning: one or both of '{}', '{}' not found in this tree", names[0], names[1]);
            continue;
        };

        let (patristic, topological) = tree.get_distance(a, b).map_err(anyhow::Error::msg)?;
        if topological_only {
            writer.write_fmt(format_args!("{}\n", topological))?;
        } else {
            writer.write_fmt(format_args!("{}\t{}\t{}\n", names[0], names[1], patristic))?;
        }
    }

    Ok(())
}
