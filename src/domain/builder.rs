//! Tree builder: applies platform/region associations to a region tree.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::association::{normalize_region, Association};
use crate::domain::region_tree::{RegionNode, RegionTree};

/// Register `platform_name` for the region at `path`.
///
/// `path` may carry a leading `/`. The root is created if the tree is empty.
/// An unknown region gets a new node under the root; a known one gains the
/// platform (no-op when already present). Returns the index of the region node.
#[instrument(level = "debug", skip(tree))]
pub fn add_sub_tree(tree: &mut RegionTree, path: &str, platform_name: &str) -> Index {
    let region = normalize_region(path);
    let root = tree.ensure_root();

    if let Some(idx) = tree.find(region) {
        if let Some(node) = tree.get_node_mut(idx) {
            let added = node.platform_names.insert(platform_name.to_string());
            trace!(region, added, "existing region");
        }
        return idx;
    }

    let mut node = RegionNode::with_parent(region, root);
    node.platform_names.insert(platform_name.to_string());
    debug!(region, "new region node");
    tree.append(node)
}

/// Apply every association in order.
#[instrument(level = "debug", skip_all)]
pub fn create_tree<I>(associations: I, tree: &mut RegionTree)
where
    I: IntoIterator<Item = Association>,
{
    let mut applied = 0usize;
    for association in associations {
        add_sub_tree(tree, &association.region, &association.platform_name);
        applied += 1;
    }
    debug!(applied, nodes = tree.len(), "tree built");
    trace!("\n{}", tree.to_tree_string());
}
