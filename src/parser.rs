//! Component 8: streaming Newick parser. Grounded in a `nom`-based recursive
//! descent (subtree := children? label? comment? length? comment?) with two
//! deliberate departures from the common pattern this is built on:
//!
//! * the exact source text of a branch length is captured alongside its
//!   parsed `f64` (via `recognize`), so `length_str` round-trips verbatim;
//! * internal whitespace in a *bare* (unquoted) label is folded to
//!   underscores rather than merely trimmed at the ends, since unquoted
//!   Newick labels cannot otherwise carry spaces unambiguously.

use crate::error::TreeError;
use crate::node::NodeId;
use crate::tree::Tree;
use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while},
    character::complete::{char, digit1, multispace0},
    combinator::{cut, map, map_res, opt, recognize},
    error::{context, ContextError, ErrorKind, FromExternalError, ParseError},
    multi::{many1, separated_list1},
    sequence::{delimited, preceded},
    IResult, Offset, Parser,
};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
enum DetailedErrorKind {
    Context(&'static str),
    Nom(ErrorKind),
}

#[derive(Clone, Debug, PartialEq)]
struct DetailedError<'a> {
    errors: Vec<(&'a str, DetailedErrorKind)>,
}

impl<'a> ParseError<&'a str> for DetailedError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        DetailedError {
            errors: vec![(input, DetailedErrorKind::Nom(kind))],
        }
    }

    fn append(input: &'a str, kind: ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, DetailedErrorKind::Nom(kind)));
        other
    }
}

impl<'a> ContextError<&'a str> for DetailedError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input, DetailedErrorKind::Context(ctx)));
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for DetailedError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        DetailedError {
            errors: vec![(input, DetailedErrorKind::Nom(kind))],
        }
    }
}

/// Recursive intermediate form, independent of the arena, built bottom-up and
/// then flattened with [`ParsedNode::to_tree`].
struct ParsedNode {
    name: Option<String>,
    length_str: String,
    properties: Option<BTreeMap<String, String>>,
    children: Vec<ParsedNode>,
}

impl ParsedNode {
    fn new() -> Self {
        Self {
            name: None,
            length_str: String::new(),
            properties: None,
            children: Vec::new(),
        }
    }

    fn to_tree(self, tree: &mut Tree) -> NodeId {
        let id = tree.add_node();
        for child in self.children {
            let child_id = child.to_tree(tree);
            tree.add_child(id, child_id).unwrap();
        }
        if let Some(node) = tree.get_node_mut(id) {
            node.name = self.name;
            node.set_length_str(self.length_str);
            node.properties = self.properties;
        }
        id
    }
}

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

/// A label is an unquoted run up to a structural character (internal
/// whitespace folded to `_`), or a single- or double-quoted string with
/// doubled-quote escaping, preserved verbatim including whitespace.
fn parse_label(input: &str) -> IResult<&str, String, DetailedError<'_>> {
    let unquoted = map(take_while(|c: char| !"():;,[]".contains(c)), |s: &str| {
        s.trim().split_whitespace().collect::<Vec<_>>().join("_")
    });

    let single_quoted = delimited(
        char('\''),
        map(is_not("'"), |s: &str| s.replace("''", "'")),
        char('\''),
    );

    let double_quoted = delimited(
        char('"'),
        map(is_not("\""), |s: &str| s.replace("\"\"", "\"")),
        char('"'),
    );

    context("label", alt((single_quoted, double_quoted, unquoted))).parse(input)
}

/// A length is a colon followed by a float; the returned string is the exact
/// source text (not a reformatted number), which is what makes parse-then-
/// serialise idempotent.
fn parse_length(input: &str) -> IResult<&str, String, DetailedError<'_>> {
    context(
        "length",
        preceded(
            ws(char(':')),
            cut(map_res(
                recognize((
                    opt(char('-')),
                    digit1,
                    opt((char('.'), digit1)),
                    opt((
                        alt((char('e'), char('E'))),
                        opt(alt((char('+'), char('-')))),
                        digit1,
                    )),
                )),
                |s: &str| s.parse::<f64>().map(|_| s.to_string()),
            )),
        ),
    )
    .parse(input)
}

/// `[...]` comments. An `&&NHX:key=value:...` or bare `key=value key2=value2`
/// body is parsed out into properties; anything else is dropped.
fn parse_comment(input: &str) -> IResult<&str, Option<BTreeMap<String, String>>, DetailedError<'_>> {
    let comment_content = delimited(ws(char('[')), is_not("]"), char(']'));

    context(
        "comment",
        map(opt(comment_content), |content: Option<&str>| {
            let s = content?;
            let mut props = BTreeMap::new();
            if let Some(rest) = s.strip_prefix("&&NHX") {
                for part in rest.split(':').filter(|p| !p.is_empty()) {
                    if let Some((k, v)) = part.split_once('=') {
                        props.insert(k.to_string(), v.to_string());
                    }
                }
            } else {
                for part in s.split_whitespace() {
                    if let Some((k, v)) = part.split_once('=') {
                        props.insert(k.to_string(), v.to_string());
                    }
                }
            }
            if props.is_empty() {
                None
            } else {
                Some(props)
            }
        }),
    )
    .parse(input)
}

fn parse_subtree(input: &str) -> IResult<&str, ParsedNode, DetailedError<'_>> {
    let (input, children) = context(
        "children",
        opt(delimited(
            ws(char('(')),
            separated_list1(ws(char(',')), parse_subtree),
            ws(char(')')),
        )),
    )
    .parse(input)?;

    let (input, label) = opt(parse_label).parse(input)?;
    let (input, comment1) = parse_comment(input)?;
    let (input, length) = opt(parse_length).parse(input)?;
    let (input, comment2) = parse_comment(input)?;

    let mut node = ParsedNode::new();
    if let Some(c) = children {
        node.children = c;
    }
    if let Some(l) = label {
        if !l.is_empty() {
            node.name = Some(l);
        }
    }
    node.length_str = length.unwrap_or_default();

    if comment1.is_some() || comment2.is_some() {
        let mut props = BTreeMap::new();
        if let Some(p) = comment1 {
            props.extend(p);
        }
        if let Some(p) = comment2 {
            props.extend(p);
        }
        node.properties = Some(props);
    }

    Ok((input, node))
}

/// Parse one Newick tree, terminated by `;`.
pub fn parse_newick(input: &str) -> Result<Tree, TreeError> {
    let mut parser = (ws(parse_subtree), ws(char(';')));
    match parser.parse(input) {
        Ok((_, (root_node, _))) => {
            let mut tree = Tree::new();
            let root_id = root_node.to_tree(&mut tree);
            tree.set_root(root_id);
            Ok(tree)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(make_tree_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(TreeError::ParseError {
            message: "incomplete input".to_string(),
            line: 0,
            column: 0,
            snippet: String::new(),
        }),
    }
}

/// Parse a stream containing multiple `;`-terminated trees, tolerating
/// top-level `[...]` blocks (e.g. file headers) between them.
pub fn parse_newick_multi(input: &str) -> Result<Vec<Tree>, TreeError> {
    let valid_tree = map((ws(parse_subtree), ws(char(';'))), |(root, _)| Some(root));
    let garbage = map(
        ws(delimited(char('['), take_while(|c| c != ']'), char(']'))),
        |_| None,
    );

    let mut parser = many1(alt((valid_tree, garbage)));
    match parser.parse(input) {
        Ok((_, trees_data)) => Ok(trees_data
            .into_iter()
            .flatten()
            .map(|root_node| {
                let mut tree = Tree::new();
                let root_id = root_node.to_tree(&mut tree);
                tree.set_root(root_id);
                tree
            })
            .collect()),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(make_tree_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(TreeError::ParseError {
            message: "incomplete input".to_string(),
            line: 0,
            column: 0,
            snippet: String::new(),
        }),
    }
}

fn make_tree_error(input: &str, e: DetailedError) -> TreeError {
    let (remaining, _) = e.errors.first().unwrap();
    let offset = input.offset(remaining);

    let prefix = &input[..offset];
    let line = prefix.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = prefix.rfind('\n').map(|p| p + 1).unwrap_or(0);
    let column = offset - last_newline + 1;

    let mut msg = String::new();
    for (_, kind) in e.errors.iter().rev() {
        match kind {
            DetailedErrorKind::Context(ctx) => {
                msg.push_str(&format!("while parsing {}:\n", ctx));
            }
            DetailedErrorKind::Nom(k) => {
                msg.push_str(&format!("  error: {:?}\n", k));
            }
        }
    }

    TreeError::ParseError {
        message: msg,
        line,
        column,
        snippet: remaining.chars().take(50).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_simple() {
        let tree = parse_newick("(A,B)C;").unwrap();
        assert_eq!(tree.len(), 3);
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.name.as_deref(), Some("C"));
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn test_parser_preserves_length_source_text() {
        let tree = parse_newick("(A:0.10,B:1e-2)Root:100;").unwrap();
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.length_str, "100");
        let a = tree.get_node(root.children[0]).unwrap();
        assert_eq!(a.length_str, "0.10");
        assert_eq!(a.length, Some(0.10));
        let b = tree.get_node(root.children[1]).unwrap();
        assert_eq!(b.length_str, "1e-2");
        assert_eq!(b.length, Some(0.01));
    }

    #[test]
    fn test_parser_unspecified_length_is_empty_string() {
        let tree = parse_newick("(A,B)Root;").unwrap();
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.length_str, "");
        assert_eq!(root.length, None);
    }

    #[test]
    fn test_bare_label_internal_whitespace_becomes_underscore() {
        let tree = parse_newick("(A B,C)Root;").unwrap();
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        let a = tree.get_node(root.children[0]).unwrap();
        assert_eq!(a.name.as_deref(), Some("A_B"));
    }

    #[test]
    fn test_quoted_label_preserves_whitespace() {
        let tree = parse_newick("('Homo sapiens':0.1,B)Root;").unwrap();
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        let a = tree.get_node(root.children[0]).unwrap();
        assert_eq!(a.name.as_deref(), Some("Homo sapiens"));
    }

    #[test]
    fn test_double_quoted_with_escape() {
        let tree = parse_newick("(\"He said \"\"Hi\"\"\":0.1,B)Root;").unwrap();
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        let a = tree.get_node(root.children[0]).unwrap();
        assert_eq!(a.name.as_deref(), Some("He said \"Hi\""));
    }

    #[test]
    fn test_parser_nhx_properties() {
        let tree = parse_newick("(A:0.1,B:0.2)n1[&&NHX:S=human:E=1.5];").unwrap();
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        let props = root.properties.as_ref().unwrap();
        assert_eq!(props.get("S").map(String::as_str), Some("human"));
        assert_eq!(props.get("E").map(String::as_str), Some("1.5"));
    }

    #[test]
    fn test_parser_whitespace_tolerant() {
        let tree = parse_newick("  (  A : 0.1 ,  B  )  ;  ").unwrap();
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_parser_multi() {
        let trees = parse_newick_multi("(A,B);\n(C,D);\n").unwrap();
        assert_eq!(trees.len(), 2);
    }

    #[test]
    fn test_parser_multi_tolerates_header_comment() {
        let trees = parse_newick_multi("[a header]\n(A,B);\n(C,D);\n").unwrap();
        assert_eq!(trees.len(), 2);
    }

    #[test]
    fn test_parser_missing_semicolon_reports_position() {
        match parse_newick("(A,B)C") {
            Err(TreeError::ParseError { line, column, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(column, 7);
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_invalid_length_reports_context() {
        match parse_newick("(A,B:invalid)C;") {
            Err(TreeError::ParseError { message, .. }) => {
                assert!(message.contains("length"));
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }
}
