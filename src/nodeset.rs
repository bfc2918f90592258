//! Fixed-capacity bit-set of small integers ("node set"), used to represent a
//! bipartition as the set of leaf ordinals on one side of an edge.

use fixedbitset::FixedBitSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeSet {
    bits: FixedBitSet,
}

impl NodeSet {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.count_ones(..) == 0
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.bits.set(index, value);
    }

    pub fn contains(&self, index: usize) -> bool {
        self.bits.contains(index)
    }

    pub fn union_with(&mut self, other: &NodeSet) {
        self.bits.union_with(&other.bits);
    }

    /// Canonical string form: one character per position, `*` set, `.` unset.
    ///
    /// # Example
    /// ```
    /// use nwk::nodeset::NodeSet;
    /// let mut s = NodeSet::with_capacity(4);
    /// s.set(0, true);
    /// s.set(2, true);
    /// assert_eq!(s.to_string_form(), "*.*.");
    /// ```
    pub fn to_string_form(&self) -> String {
        (0..self.bits.len())
            .map(|i| if self.bits.contains(i) { '*' } else { '.' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_commutative() {
        let mut a = NodeSet::with_capacity(5);
        a.set(0, true);
        a.set(1, true);
        let mut b = NodeSet::with_capacity(5);
        b.set(2, true);

        let mut ab = a.clone();
        ab.union_with(&b);
        let mut ba = b.clone();
        ba.union_with(&a);

        assert_eq!(ab.to_string_form(), ba.to_string_form());
        assert_eq!(ab.to_string_form(), "**...");
    }

    #[test]
    fn test_empty_set() {
        let s = NodeSet::with_capacity(3);
        assert_eq!(s.to_string_form(), "...");
        assert!(s.is_empty());
    }
}
