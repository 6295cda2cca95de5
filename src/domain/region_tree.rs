use std::collections::BTreeSet;
use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Label of the implicit root node (the unscoped/global registry).
pub const DEFAULT_ROOT_LABEL: &str = "world";

/// A region and the advertising platforms active there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionNode {
    /// Normalized region key, unique within a tree
    pub region: String,
    /// Platforms registered for this region
    pub platform_names: BTreeSet<String>,
    /// Index of the node this one was created under, None for the root.
    /// Relational metadata only; the arena owns every node.
    pub parent: Option<Index>,
}

impl RegionNode {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            platform_names: BTreeSet::new(),
            parent: None,
        }
    }

    pub fn with_parent(region: impl Into<String>, parent: Index) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(region)
        }
    }
}

impl fmt::Display for RegionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.platform_names.is_empty() {
            return write!(f, "{}", self.region);
        }
        let names: Vec<&str> = self.platform_names.iter().map(String::as_str).collect();
        write!(f, "{} [{}]", self.region, names.join(", "))
    }
}

/// Flat, append-only registry of uniquely-keyed region nodes.
///
/// Nodes live in a generational arena and are additionally tracked in creation
/// order. The first node is always the root; nothing is ever removed.
#[derive(Debug, Clone)]
pub struct RegionTree {
    arena: Arena<RegionNode>,
    /// Creation order; `order[0]` is the root once it exists
    order: Vec<Index>,
    root_label: String,
}

impl Default for RegionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionTree {
    /// Empty tree; the root is created on first mutation.
    pub fn new() -> Self {
        Self::with_root_label(DEFAULT_ROOT_LABEL)
    }

    pub fn with_root_label(root_label: impl Into<String>) -> Self {
        Self {
            arena: Arena::new(),
            order: Vec::new(),
            root_label: root_label.into(),
        }
    }

    /// Tree holding only the root node.
    pub fn with_root() -> Self {
        let mut tree = Self::new();
        tree.ensure_root();
        tree
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    pub fn root(&self) -> Option<Index> {
        self.order.first().copied()
    }

    /// Return the root index, creating the root node if the tree is empty.
    #[instrument(level = "trace", skip(self))]
    pub fn ensure_root(&mut self) -> Index {
        if let Some(root) = self.root() {
            return root;
        }
        debug!(root_label = %self.root_label, "creating root node");
        self.append(RegionNode::new(self.root_label.clone()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&RegionNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut RegionNode> {
        self.arena.get_mut(idx)
    }

    /// Linear search for the node registered under `region` (already normalized).
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, region: &str) -> Option<Index> {
        self.order
            .iter()
            .copied()
            .find(|&idx| self.arena.get(idx).is_some_and(|n| n.region == region))
    }

    /// Append a node, keeping regions unique.
    ///
    /// The root is created first if missing, unless `node` is itself the root.
    /// A node without a parent is attached to the root.
    ///
    /// A parent index is validated against this tree's arena only. `Index`
    /// carries no tree identity, so an index taken from another tree that
    /// lands on a live slot here is read as the local node in that slot.
    /// Indices past this tree's slots are rejected with `UnknownParent`.
    #[instrument(level = "debug", skip(self, node), fields(region = %node.region))]
    pub fn insert_node(&mut self, mut node: RegionNode) -> DomainResult<Index> {
        if self.is_empty() && node.region == self.root_label {
            node.parent = None;
            return Ok(self.append(node));
        }

        let root = self.ensure_root();
        if self.find(&node.region).is_some() {
            return Err(DomainError::DuplicateRegion(node.region));
        }
        if let Some(parent) = node.parent {
            if !self.arena.contains(parent) {
                return Err(DomainError::UnknownParent(node.region));
            }
        } else {
            node.parent = Some(root);
        }

        Ok(self.append(node))
    }

    /// Append without checks; the caller has already searched for the region.
    pub(crate) fn append(&mut self, node: RegionNode) -> Index {
        let idx = self.arena.insert(node);
        self.order.push(idx);
        idx
    }

    /// Nodes in creation order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = (Index, &RegionNode)> + '_ {
        self.order
            .iter()
            .filter_map(move |&idx| self.arena.get(idx).map(|node| (idx, node)))
    }

    /// Nodes whose parent is `idx`, in creation order.
    pub fn children(&self, idx: Index) -> impl Iterator<Item = (Index, &RegionNode)> + '_ {
        self.nodes()
            .filter(move |(_, node)| node.parent == Some(idx))
    }

    /// Render the tree for display, e.g.
    ///
    /// ```text
    /// world
    /// ├── ru [VKontakte, Yandex.Direct]
    /// └── com [Google Ads]
    /// ```
    pub fn to_tree_string(&self) -> Tree<String> {
        let Some((root_idx, root)) = self.nodes().next() else {
            return Tree::new("Empty tree".to_string());
        };

        fn build_tree(tree: &RegionTree, node_idx: Index, parent_tree: &mut Tree<String>) {
            for (child_idx, child) in tree.children(node_idx) {
                let mut child_tree = Tree::new(child.to_string());
                build_tree(tree, child_idx, &mut child_tree);
                parent_tree.push(child_tree);
            }
        }

        let mut rendered = Tree::new(root.to_string());
        build_tree(self, root_idx, &mut rendered);
        rendered
    }
}
