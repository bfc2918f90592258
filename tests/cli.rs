use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const CATARRHINI: &str = "(((Homo,Pan),Gorilla),Pongo);";
const CATARRHINI_LABELED: &str = "(((Homo,Pan)Hominini,Gorilla)Homininae,Pongo)Hominidae;";

fn nwk() -> Command {
    Command::cargo_bin("nwk").unwrap()
}

// ================================================================
// prune
// ================================================================

#[test]
fn prune_remove_single_leaf() {
    nwk()
        .arg("prune")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .write_stdin(CATARRHINI)
        .assert()
        .success()
        .stdout(predicate::str::contains("((Pan,Gorilla),Pongo);"));
}

#[test]
fn prune_remove_multiple_leaves() {
    nwk()
        .arg("prune")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("-n")
        .arg("Pan")
        .write_stdin(CATARRHINI)
        .assert()
        .success()
        .stdout(predicate::str::contains("(Gorilla,Pongo);"));
}

#[test]
fn prune_remove_all_leaves_in_clade_promotes_root() {
    nwk()
        .arg("prune")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("-n")
        .arg("Pan")
        .arg("-n")
        .arg("Gorilla")
        .write_stdin(CATARRHINI)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pongo;"));
}

#[test]
fn prune_regex_match() {
    nwk()
        .arg("prune")
        .arg("stdin")
        .arg("--regex")
        .arg("^H")
        .write_stdin(CATARRHINI)
        .assert()
        .success()
        .stdout(predicate::str::contains("((Pan,Gorilla),Pongo);"));
}

#[test]
fn prune_invert_keeps_selected_node() {
    nwk()
        .arg("prune")
        .arg("stdin")
        .arg("-v")
        .arg("-n")
        .arg("Homo")
        .write_stdin(CATARRHINI)
        .assert()
        .success()
        .stdout(predicate::str::contains("Homo;"));
}

#[test]
fn prune_invert_keeps_internal_node_and_descendants() {
    nwk()
        .arg("prune")
        .arg("stdin")
        .arg("-v")
        .arg("-n")
        .arg("Hominini")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("(Homo,Pan)Hominini;"));
}

#[test]
fn prune_file_list() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Homo").unwrap();
    writeln!(file, "Pan").unwrap();

    nwk()
        .arg("prune")
        .arg("stdin")
        .arg("-f")
        .arg(file.path())
        .write_stdin(CATARRHINI)
        .assert()
        .success()
        .stdout(predicate::str::contains("(Gorilla,Pongo);"));
}

// ================================================================
// topo
// ================================================================

#[test]
fn topo_default_strips_lengths_keeps_labels() {
    nwk()
        .arg("topo")
        .arg("stdin")
        .write_stdin("((Homo:1,Pan:2)Hominini:3,Gorilla:4);")
        .assert()
        .success()
        .stdout(predicate::str::contains("((Homo,Pan)Hominini,Gorilla);"))
        .stdout(predicate::str::contains(":").not());
}

#[test]
fn topo_bl_keeps_lengths() {
    nwk()
        .arg("topo")
        .arg("stdin")
        .arg("--bl")
        .write_stdin("((Homo:1,Pan:2)Hominini:3,Gorilla:4);")
        .assert()
        .success()
        .stdout(predicate::str::contains("Homo:1"));
}

#[test]
fn topo_strip_all_labels() {
    nwk()
        .arg("topo")
        .arg("stdin")
        .arg("-I")
        .arg("-L")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hominini").not())
        .stdout(predicate::str::contains("Homo").not());
}

// ================================================================
// order
// ================================================================

#[test]
fn order_alphanumeric_default() {
    nwk()
        .arg("order")
        .arg("stdin")
        .write_stdin("(C,(B,A));")
        .assert()
        .success()
        .stdout(predicate::str::contains("((A,B),C);"));
}

#[test]
fn order_alphanumeric_reversed() {
    nwk()
        .arg("order")
        .arg("stdin")
        .arg("--anr")
        .write_stdin("(C,(A,B));")
        .assert()
        .success()
        .stdout(predicate::str::contains("(C,(B,A));"));
}

#[test]
fn order_ladderize_smallest_first() {
    nwk()
        .arg("order")
        .arg("stdin")
        .arg("--nd")
        .write_stdin("((A,B),C);")
        .assert()
        .success()
        .stdout(predicate::str::contains("(C,(A,B));"));
}

// ================================================================
// label
// ================================================================

#[test]
fn label_lists_all_names_in_tree_order() {
    nwk()
        .arg("label")
        .arg("stdin")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout("Homo\nPan\nHominini\nGorilla\nHomininae\nPongo\nHominidae\n");
}

#[test]
fn label_leaves_only() {
    nwk()
        .arg("label")
        .arg("stdin")
        .arg("-I")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hominini").not())
        .stdout(predicate::str::contains("Homo\n"));
}

#[test]
fn label_monophyly_true_prints_selection() {
    nwk()
        .arg("label")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("-n")
        .arg("Pan")
        .arg("-M")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Homo"))
        .stdout(predicate::str::contains("Pan"));
}

#[test]
fn label_monophyly_false_prints_nothing() {
    nwk()
        .arg("label")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("-n")
        .arg("Gorilla")
        .arg("-M")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout("");
}

// ================================================================
// stat
// ================================================================

#[test]
fn stat_counts_catarrhini() {
    nwk()
        .arg("stat")
        .arg("stdin")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Type\tcladogram"))
        .stdout(predicate::str::contains("nodes\t7"))
        .stdout(predicate::str::contains("leaves\t4"))
        .stdout(predicate::str::contains("dichotomies\t3"))
        .stdout(predicate::str::contains("leaf labels\t4"))
        .stdout(predicate::str::contains("internal labels\t3"));
}

#[test]
fn stat_phylogram_classification() {
    nwk()
        .arg("stat")
        .arg("stdin")
        .write_stdin("((A:1,B:2):3,C:4):5;")
        .assert()
        .success()
        .stdout(predicate::str::contains("Type\tphylogram"));
}

#[test]
fn stat_line_style() {
    nwk()
        .arg("stat")
        .arg("stdin")
        .arg("--style")
        .arg("line")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("cladogram\t7\t4\t3\t4\t3"));
}

// ================================================================
// reroot
// ================================================================

#[test]
fn reroot_on_named_node() {
    nwk()
        .arg("reroot")
        .arg("stdin")
        .arg("-n")
        .arg("Pongo")
        .write_stdin(CATARRHINI)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pongo"));
}

// ================================================================
// subtree
// ================================================================

#[test]
fn subtree_extracts_clade_by_lca() {
    nwk()
        .arg("subtree")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("-n")
        .arg("Pan")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("(Homo,Pan)Hominini;"));
}

#[test]
fn subtree_condense_into_single_node() {
    nwk()
        .arg("subtree")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("-n")
        .arg("Pan")
        .arg("-C")
        .arg("Clade")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Clade[&&NHX:member=2:tri=white]"));
}

#[test]
fn subtree_monophyly_false_prints_nothing() {
    nwk()
        .arg("subtree")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("-n")
        .arg("Gorilla")
        .arg("-M")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout("");
}

// ================================================================
// distance
// ================================================================

#[test]
fn distance_patristic_and_topological() {
    nwk()
        .arg("distance")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("-n")
        .arg("Pan")
        .write_stdin("((Homo:1,Pan:2)Hominini:3,Gorilla:4);")
        .assert()
        .success()
        .stdout("Homo\tPan\t3\n");
}

#[test]
fn distance_topological_only() {
    nwk()
        .arg("distance")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("-n")
        .arg("Gorilla")
        .arg("-t")
        .write_stdin("((Homo:1,Pan:2)Hominini:3,Gorilla:4);")
        .assert()
        .success()
        .stdout("3\n");
}

// ================================================================
// comment
// ================================================================

#[test]
fn comment_sets_well_known_property() {
    nwk()
        .arg("comment")
        .arg("stdin")
        .arg("-n")
        .arg("Homo")
        .arg("--color")
        .arg("red")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Homo[&&NHX:color=red]"));
}

#[test]
fn comment_lca_of_two_names() {
    nwk()
        .arg("comment")
        .arg("stdin")
        .arg("--lca")
        .arg("Homo,Pan")
        .arg("--label")
        .arg("tag")
        .write_stdin(CATARRHINI_LABELED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hominini[&&NHX:label=tag]"));
}

// ================================================================
// support
// ================================================================

#[test]
fn support_annotates_counts() {
    let mut target_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(target_file, "((A,B),(C,D));").unwrap();

    let mut replicates_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(replicates_file, "((A,B),(C,D));").unwrap();
    writeln!(replicates_file, "((A,B),(C,D));").unwrap();
    writeln!(replicates_file, "((A,C),(B,D));").unwrap();

    nwk()
        .arg("support")
        .arg(target_file.path())
        .arg(replicates_file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("((A,B)2,(C,D)2)3;"));
}

#[test]
fn support_percent() {
    let mut target_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(target_file, "((A,B),(C,D));").unwrap();

    let mut replicates_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(replicates_file, "((A,B),(C,D));").unwrap();
    writeln!(replicates_file, "((A,B),(C,D));").unwrap();
    writeln!(replicates_file, "((A,C),(B,D));").unwrap();

    nwk()
        .arg("support")
        .arg(target_file.path())
        .arg(replicates_file.path())
        .arg("--percent")
        .assert()
        .success()
        .stdout(predicate::str::contains("((A,B)66,(C,D)66)100;"));
}
