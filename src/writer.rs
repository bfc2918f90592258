//! Component 9: Newick serializer. Emits `node.length_str` verbatim rather
//! than reformatting `node.length`, which is the crux of parse-then-write
//! idempotence — an input whose length text was `"1.0"` stays `"1.0"`, not
//! `"1"`.

use crate::node::NodeId;
use crate::tree::Tree;

/// Serialize to a compact, single-line Newick string.
///
/// # Example
/// ```
/// use nwk::tree::Tree;
/// use nwk::writer;
/// let mut tree = Tree::new();
/// let root = tree.add_node();
/// tree.set_root(root);
/// tree.get_node_mut(root).unwrap().set_name("A");
/// assert_eq!(writer::write_newick(&tree), "A;");
/// ```
pub fn write_newick(tree: &Tree) -> String {
    write_newick_with_format(tree, "")
}

/// Serialize with indentation; an empty `indent` yields compact output.
///
/// # Example
/// ```
/// use nwk::tree::Tree;
/// use nwk::writer;
/// let mut tree = Tree::new();
/// let root = tree.add_node();
/// let child = tree.add_node();
/// tree.set_root(root);
/// tree.add_child(root, child).unwrap();
/// tree.get_node_mut(root).unwrap().set_name("Root");
/// tree.get_node_mut(child).unwrap().set_name("Child");
/// assert_eq!(writer::write_newick_with_format(&tree, "  "), "(\n  Child\n)Root;");
/// ```
pub fn write_newick_with_format(tree: &Tree, indent: &str) -> String {
    match tree.get_root() {
        Some(root) => {
            let mut s = to_newick_recursive(tree, root, indent, 0);
            s.push(';');
            s
        }
        None => ";".to_string(),
    }
}

fn to_newick_recursive(tree: &Tree, node_id: NodeId, indent: &str, depth: usize) -> String {
    let node = tree.get_node(node_id).unwrap();
    let is_pretty = !indent.is_empty();
    let my_indent = if is_pretty { indent.repeat(depth) } else { String::new() };

    let mut node_info = String::new();
    if let Some(name) = &node.name {
        node_info.push_str(&quote_label(name));
    }
    if !node.length_str.is_empty() {
        node_info.push(':');
        node_info.push_str(&node.length_str);
    }
    if let Some(props) = &node.properties {
        if !props.is_empty() {
            node_info.push_str("[&&NHX");
            for (k, v) in props {
                node_info.push_str(&format!(":{}={}", k, v));
            }
            node_info.push(']');
        }
    }

    if node.children.is_empty() {
        format!("{}{}", my_indent, node_info)
    } else {
        let children_strs: Vec<String> = node
            .children
            .iter()
            .map(|&child| to_newick_recursive(tree, child, indent, depth + 1))
            .collect();

        if is_pretty {
            format!("{}(\n{}\n{}){}", my_indent, children_strs.join(",\n"), my_indent, node_info)
        } else {
            format!("({}){}", children_strs.join(","), node_info)
        }
    }
}

/// Debug-only Graphviz DOT rendering, one node per arena entry reachable
/// from the root.
pub fn write_dot(tree: &Tree) -> String {
    let mut s = String::from("digraph Tree {\n");
    s.push_str("    node [shape=box];\n");

    if let Some(root) = tree.get_root() {
        for &node_id in &tree.preorder(root) {
            let node = tree.get_node(node_id).unwrap();
            let label = node.name.as_deref().unwrap_or("");
            let label_attr = if label.is_empty() {
                format!("label=\"{}\"", node_id)
            } else {
                format!("label=\"{}\"", label)
            };
            s.push_str(&format!("    {} [{}];\n", node_id, label_attr));

            for &child_id in &node.children {
                let child = tree.get_node(child_id).unwrap();
                let edge_attr_str = if child.length_str.is_empty() {
                    String::new()
                } else {
                    format!(" [label=\"{}\"]", child.length_str)
                };
                s.push_str(&format!("    {} -> {}{};\n", node_id, child_id, edge_attr_str));
            }
        }
    }

    s.push_str("}\n");
    s
}

fn quote_label(label: &str) -> String {
    let needs_quote = label.chars().any(|c| "(),:;[] \t\n".contains(c));
    if needs_quote {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
