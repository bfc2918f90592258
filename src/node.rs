use std::collections::BTreeMap;

/// `NodeId` is an index into the tree's node arena. It is `Copy` and never
/// dereferenced directly; all access goes through `Tree::get_node[_mut]`.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    /// Index of this node in the arena it belongs to.
    pub id: NodeId,

    /// Parent node id (`None` iff this node is a tree's root).
    pub parent: Option<NodeId>,

    /// Ordered child ids. Empty iff this node is a leaf.
    pub children: Vec<NodeId>,

    /// Label, possibly empty/absent. May double as a bootstrap support value
    /// on internal nodes; serialisation never reinterprets it.
    pub name: Option<String>,

    /// Parsed numeric edge length, `None` when the length string is empty or
    /// unspecified. Kept in sync with `length_str`.
    pub length: Option<f64>,

    /// Exact source text of the edge length, e.g. `"1.0"` or `"1e-3"`. Empty
    /// string means "unspecified", which is distinct from the length `0`.
    /// The serializer always emits this string verbatim, never a reformatted
    /// `length`, which is what makes parse-then-serialise idempotent.
    pub length_str: String,

    /// Structured NHX-style properties parsed out of bracketed comments.
    /// `BTreeMap` for deterministic iteration/output order.
    pub properties: Option<BTreeMap<String, String>>,

    /// Soft-deletion flag; `Tree::compact` reclaims nodes marked `deleted`.
    pub deleted: bool,
}

impl Node {
    /// Create a new, unattached node with the given arena id.
    ///
    /// # Example
    /// ```
    /// use nwk::node::Node;
    /// let node = Node::new(1);
    /// assert_eq!(node.id, 1);
    /// assert!(node.is_leaf());
    /// assert!(node.name.is_none());
    /// assert_eq!(node.length_str, "");
    /// ```
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
            length: None,
            length_str: String::new(),
            properties: None,
            deleted: false,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the edge length from a parsed number, formatting it with `%g`-style
    /// shortest representation and keeping `length_str` in sync.
    ///
    /// # Example
    /// ```
    /// use nwk::node::Node;
    /// let node = Node::new(1).with_length(0.5);
    /// assert_eq!(node.length, Some(0.5));
    /// assert_eq!(node.length_str, "0.5");
    /// ```
    pub fn with_length(mut self, length: f64) -> Self {
        self.set_length(length);
        self
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = Some(length);
        self.length_str = crate::fmt_g(length);
    }

    /// Set both representations directly from a source string, e.g. as produced
    /// by the parser. An empty string clears the length (unspecified).
    pub fn set_length_str(&mut self, s: impl Into<String>) {
        let s = s.into();
        if s.is_empty() {
            self.length = None;
        } else {
            self.length = s.parse::<f64>().ok();
        }
        self.length_str = s;
    }

    /// Clear the edge length entirely (both string and numeric form).
    pub fn clear_length(&mut self) {
        self.length = None;
        self.length_str.clear();
    }

    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    pub fn get_property(&self, key: &str) -> Option<&String> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    /// A node is a leaf iff it has no children.
    ///
    /// # Example
    /// ```
    /// use nwk::node::Node;
    /// let mut node = Node::new(1);
    /// assert!(node.is_leaf());
    /// node.children.push(2);
    /// assert!(!node.is_leaf());
    /// ```
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
