//! Read-only lookups against a region tree.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::domain::association::normalize_region;
use crate::domain::region_tree::RegionTree;

/// Platforms registered for `region` (leading `/` allowed).
///
/// An unknown region yields an empty set.
#[instrument(level = "debug", skip(tree))]
pub fn find_platform_names(region: &str, tree: &RegionTree) -> BTreeSet<String> {
    tree.find(normalize_region(region))
        .and_then(|idx| tree.get_node(idx))
        .map(|node| node.platform_names.clone())
        .unwrap_or_default()
}
