extern crate clap;

mod cmd;

fn main() -> anyhow::Result<()> {
    let app = clap::Command::new("nwk")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("A command-line toolkit for manipulating rooted phylogenetic trees in Newick format")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(clap::ColorChoice::Auto)
        .subcommand(cmd::comment::make_subcommand())
        .subcommand(cmd::distance::make_subcommand())
        .subcommand(cmd::label::make_subcommand())
        .subcommand(cmd::order::make_subcommand())
        .subcommand(cmd::prune::make_subcommand())
        .subcommand(cmd::reroot::make_subcommand())
        .subcommand(cmd::stat::make_subcommand())
        .subcommand(cmd::subtree::make_subcommand())
        .subcommand(cmd::support::make_subcommand())
        .subcommand(cmd::topo::make_subcommand());

    match app.get_matches().subcommand() {
        Some(("comment", sub_args)) => cmd::comment::execute(sub_args),
        Some(("distance", sub_args)) => cmd::distance::execute(sub_args),
        Some(("label", sub_args)) => cmd::label::execute(sub_args),
        Some(("order", sub_args)) => cmd::order::execute(sub_args),
        Some(("prune", sub_args)) => cmd::prune::execute(sub_args),
        Some(("reroot", sub_args)) => cmd::reroot::execute(sub_args),
        Some(("stat", sub_args)) => cmd::stat::execute(sub_args),
        Some(("subtree", sub_args)) => cmd::subtree::execute(sub_args),
        Some(("support", sub_args)) => cmd::support::execute(sub_args),
        Some(("topo", sub_args)) => cmd::topo::execute(sub_args),
        _ => unreachable!("arg_required_else_help prevents reaching here"),
    }?;

    Ok(())
}
