use std::fmt;

/// Error kind distinguished by the rooted-tree engine.
///
/// Interior helpers mostly return `Result<T, String>`; this type is reserved for
/// the boundaries that need a caller to match on *kind* (parsing, label lookup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Syntactic error while parsing a Newick string.
    ParseError {
        message: String,
        line: usize,
        column: usize,
        snippet: String,
    },
    /// Structural/logical error (cycle, missing node, bad operation precondition).
    LogicError(String),
    /// No label in a lookup set matched any node in the tree.
    NoMatchingNodes(String),
    /// Bipartition analysis saw a replicate whose leaf set disagrees with the target.
    MalformedMap(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::ParseError {
                message,
                line,
                column,
                snippet,
            } => write!(
                f,
                "parse error at line {}, column {}: {}\nsnippet: \"{}\"",
                line, column, message, snippet
            ),
            TreeError::LogicError(msg) => write!(f, "tree logic error: {}", msg),
            TreeError::NoMatchingNodes(msg) => write!(f, "no matching nodes: {}", msg),
            TreeError::MalformedMap(msg) => write!(f, "malformed bipartition map: {}", msg),
        }
    }
}

impl std::error::Error for TreeError {}
