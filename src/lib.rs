//! Engine for manipulating rooted phylogenetic trees in Newick format.
//!
//! The arena-based [`tree::Tree`] owns a vector of [`node::Node`]s; all
//! structural operations, traversals, and algorithms are free functions or
//! inherent methods over that arena. See `SPEC_FULL.md` at the repository
//! root for the full component breakdown.

pub mod algo;
pub mod error;
pub mod labels;
pub mod lca;
pub mod node;
pub mod nodeset;
pub mod parser;
pub mod reader;
pub mod rnode_iter;
pub mod seq;
pub mod support;
pub mod tree;
pub mod writer;

pub use error::TreeError;
pub use node::{Node, NodeId};
pub use tree::Tree;

/// Format a floating-point value the way C's `%g` would: the shortest decimal
/// representation that round-trips, without a forced exponent for ordinary
/// magnitudes. Used wherever the engine computes a new length rather than
/// preserving a source string (halving in `insert_node_above`, summing in
/// `splice_out`).
pub fn fmt_g(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.6}", value);
        let trimmed = s.trim_end_matches('0');
        let trimmed = trimmed.trim_end_matches('.');
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_g_integral() {
        assert_eq!(fmt_g(2.0), "2");
        assert_eq!(fmt_g(0.0), "0");
    }

    #[test]
    fn test_fmt_g_fractional() {
        assert_eq!(fmt_g(0.5), "0.5");
        assert_eq!(fmt_g(1.25), "1.25");
    }
}
