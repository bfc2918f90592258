//! A single, consistent entry point for reading trees from a file path,
//! `-`/stdin, or an in-memory string — resolving the ambiguity between
//! "does it return a `Tree` or a `Vec<Tree>`, and is it infallible" that
//! shows up across ad hoc call sites in tools this is modelled on.

use crate::error::TreeError;
use crate::tree::Tree;
use std::io::Read;

/// Read every `;`-terminated tree from `path` (or stdin if `path == "-"`).
pub fn read_trees_from_path(path: &str) -> Result<Vec<Tree>, TreeError> {
    let mut reader = intspan::reader(path);
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| TreeError::LogicError(format!("failed to read {}: {}", path, e)))?;
    read_trees_from_str(&content)
}

/// Read every `;`-terminated tree out of an in-memory string.
pub fn read_trees_from_str(content: &str) -> Result<Vec<Tree>, TreeError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    crate::parser::parse_newick_multi(content)
}

/// Read exactly one tree from `path`; an error if the stream holds zero or
/// more than one.
pub fn read_one_tree_from_path(path: &str) -> Result<Tree, TreeError> {
    let mut trees = read_trees_from_path(path)?;
    match trees.len() {
        1 => Ok(trees.remove(0)),
        0 => Err(TreeError::LogicError(format!("{} contains no trees", path))),
        n => Err(TreeError::LogicError(format!("{} contains {} trees, expected exactly one", path, n))),
    }
}
