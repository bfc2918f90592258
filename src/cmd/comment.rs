use clap::*;
use nwk::reader;
use regex::RegexBuilder;
use std::io::Write;

pub fn make_subcommand() -> Command {
    Command::new("comment")
        .about("Adds or removes NHX-style comments on nodes")
        .after_help(
            r###"
Comments are NHX-like `:key=value` properties.

Notes:
* `--node` targets a named node; `--lca A,B` targets the lowest common
  ancestor of two named nodes (repeatable).
* `--string` adds free-form `:key=value` pairs, parsed the same way the
  parser reads them out of an input file's own NHX comments.
* `--color`/`--label`/`--comment`/`--dot`/`--bar`/`--rec`/`--tri` each
  set one well-known property used by downstream renderers.
* `--remove REGEX` scans every node's properties and deletes any whose
  `key` or `key=value` text matches.

Examples:
1. Tag a node:
   nwk comment tree.nwk -n Homo --color red

2. Tag the LCA of two leaves:
   nwk comment tree.nwk --lca Homo,Pan --label Hominini

3. Strip all taxid annotations:
   nwk comment tree.nwk --remove '^T='
"###,
        )
        .arg(Arg::new("infile").required(true).num_args(1).index(1).help("Input filename. [stdin] for standard input"))
        .arg(Arg::new("node").long("node").short('n').num_args(1).action(ArgAction::Append).help("Node name; may be repeated"))
        .arg(Arg::new("lca").long("lca").short('l').num_args(1).action(ArgAction::Append).help("'NameA,NameB' naming an LCA target; may be repeated"))
        .arg(Arg::new("string").long("string").short('s').num_args(1).help("Free-form 'key=value[:key=value...]' properties"))
        .arg(Arg::new("color").long("color").num_args(1).help("Set the 'color' property"))
        .arg(Arg::new("label").long("label").num_args(1).help("Set the 'label' property"))
        .arg(Arg::new("comment").long("comment").num_args(1).help("Set the 'comment' property"))
        .arg(Arg::new("dot").long("dot").num_args(0..=1).default_missing_value("black").help("Set the 'dot' property; value is a color"))
        .arg(Arg::new("bar").long("bar").num_args(0..=1).default_missing_value("black").help("Set the 'bar' property; value is a color"))
        .arg(Arg::new("rec").long("rec").num_args(0..=1).default_missing_value("LemonChiffon").help("Set the 'rec' property; value is a color"))
        .arg(Arg::new("tri").long("tri").num_args(0..=1).default_missing_value("white").help("Set the 'tri' property; value is a color"))
        .arg(Arg::new("remove").long("remove").short('R').num_args(1).help("Remove properties matching this regex"))
        .arg(Arg::new("outfile").short('o').long("outfile").num_args(1).default_value("stdout").help("Output filename. [stdout] for screen"))
}

fn apply_string_properties(node: &mut nwk::Node, spec: &str) {
    for part in spec.split(':') {
        if part.is_empty() {
            continue;
        }
        match part.split_once('=') {
            Some((k, v)) => node.add_property(k, v),
            None => node.add_property(part, ""),
        }
    }
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let opt_string = args.get_one::<String>("string");
    let opt_color = args.get_one::<String>("color");
    let opt_label = args.get_one::<String>("label");
    let opt_comment = args.get_one::<String>("comment");
    let opt_dot = args.get_one::<String>("dot");
    let opt_bar = args.get_one::<String>("bar");
    let opt_rec = args.get_one::<String>("rec");
    let opt_tri = args.get_one::<String>("tri");
    let opt_remove = args.get_one::<String>("remove");

    let infile = args.get_one::<String>("infile").unwrap();
    let mut trees = reader::read_trees_from_path(infile)?;

    for tree in &mut trees {
        let id_of = tree.get_name_id();
        let mut ids = Vec::new();

        for name in args.get_many::<String>("node").unwrap_or_default() {
            if let Some(&id) = id_of.get(name) {
                ids.push(id);
            }
        }

        for pair in args.get_many::<String>("lca").unwrap_or_default() {
            let parts: Vec<&str> = pair.split(',').collect();
            if parts.len() != 2 {
                continue;
            }
            if let (Some(&a), Some(&b)) = (id_of.get(parts[0]), id_of.get(parts[1])) {
                if let Ok(id) = tree.get_common_ancestor(a, b) {
                    ids.push(id);
                }
            }
        }

        for &id in &ids {
            let Some(node) = tree.get_node_mut(id) else { continue };
            if let Some(s) = opt_string {
                apply_string_properties(node, s);
            }
            if let Some(x) = opt_color {
                node.add_property("color", x.clone());
            }
            if let Some(x) = opt_label {
                node.add_property("label", x.clone());
            }
            if let Some(x) = opt_comment {
                node.add_property("comment", x.clone());
            }
            if let Some(x) = opt_dot {
                node.add_property("dot", x.clone());
            }
            if let Some(x) = opt_bar {
                node.add_property("bar", x.clone());
            }
            if let Some(x) = opt_rec {
                node.add_property("rec", x.clone());
            }
            if let Some(x) = opt_tri {
                node.add_property("tri", x.clone());
            }
        }

        if let Some(pattern) = opt_remove {
            let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
            for i in 0..tree.len() {
                let Some(node) = tree.get_node_mut(i) else { continue };
                if let Some(props) = &mut node.properties {
                    let to_remove: Vec<String> = props
                        .iter()
                        .filter(|(k, v)| {
                            let entry = if v.is_empty() { (*k).clone() } else { format!("{}={}", k, v) };
                            re.is_match(&entry)
                        })
                        .map(|(k, _)| k.clone())
                        .collect();
                    for k in to_remove {
                        props.remove(&k);
                    }
                }
            }
        }

        writer.write_all((nwk::writer::write_newick(tree) + "\n").as_bytes())?;
    }

    Ok(())
}
